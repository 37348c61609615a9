use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation failure for an incoming profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    fn summary(&self) -> String {
        self.field_errors
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid profile: {}", self.summary())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub major: String,
    pub keywords: String,
    pub education_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

const REQUIRED_FIELDS: [(&str, &str); 3] = [
    ("major", "Major is required."),
    ("keywords", "Keywords of interest are required."),
    ("educationLevel", "Education level is required."),
];

impl UserProfile {
    pub fn new(
        major: impl Into<String>,
        keywords: impl Into<String>,
        education_level: impl Into<String>,
        additional_info: Option<String>,
    ) -> Result<Self, ValidationError> {
        let profile = Self {
            major: major.into(),
            keywords: keywords.into(),
            education_level: education_level.into(),
            additional_info,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Build a profile from a request body, collecting every field problem
    /// instead of stopping at the first one.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        let mut required = Vec::with_capacity(REQUIRED_FIELDS.len());

        for (field, empty_message) in REQUIRED_FIELDS {
            match body.get(field) {
                None | Some(Value::Null) => errors.push(field, "Required"),
                Some(Value::String(text)) if text.trim().is_empty() => {
                    errors.push(field, empty_message)
                }
                Some(Value::String(text)) => required.push(text.clone()),
                Some(_) => errors.push(field, "Expected string"),
            }
        }

        let additional_info = match body.get("additionalInfo") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                errors.push("additionalInfo", "Expected string");
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut required = required.into_iter();
        match (required.next(), required.next(), required.next()) {
            (Some(major), Some(keywords), Some(education_level)) => Ok(Self {
                major,
                keywords,
                education_level,
                additional_info,
            }),
            _ => Err(errors),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        let values = [&self.major, &self.keywords, &self.education_level];
        for ((field, message), value) in REQUIRED_FIELDS.iter().zip(values) {
            if value.trim().is_empty() {
                errors.push(field, *message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Query sent to the researcher directory.
    pub fn directory_query(&self) -> String {
        format!("{} {}", self.keywords, self.major).trim().to_string()
    }

    /// Text embedded on the user side of the similarity comparison.
    pub fn embedding_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.major,
            self.keywords,
            self.education_level,
            self.additional_info.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    pub fn education_label(&self) -> &str {
        education_label(&self.education_level)
    }
}

pub const EDUCATION_LEVELS: [&str; 7] = [
    "undergraduate",
    "masters_applicant",
    "masters_student",
    "phd_applicant",
    "phd_student",
    "postdoc",
    "early_career_researcher",
];

/// Human-readable label for the education level codes the form submits.
/// Unknown codes are returned unchanged.
pub fn education_label(code: &str) -> &str {
    match code {
        "undergraduate" => "Undergraduate student",
        "masters_applicant" => "Master's applicant",
        "masters_student" => "Master's student",
        "phd_applicant" => "PhD applicant",
        "phd_student" => "PhD student",
        "postdoc" => "Postdoctoral researcher",
        "early_career_researcher" => "Early-career researcher",
        other => other,
    }
}
