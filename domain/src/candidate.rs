use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::json_path::{resolve, resolve_str};

/// A raw researcher record as returned by the directory. The schema belongs
/// to the directory service, so it is kept as an opaque JSON tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRecord(pub Value);

/// The identifier and the text used to embed a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateText {
    pub id: String,
    pub text: String,
}

/// A candidate together with its similarity to the user profile.
/// `similarity` is 0 when it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: String,
    pub text: String,
    pub similarity: f32,
}

impl ScoredCandidate {
    pub fn unscored(candidate: CandidateText) -> Self {
        Self {
            id: candidate.id,
            text: candidate.text,
            similarity: 0.0,
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn string_items(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().or_else(|| resolve_str(item, "value")))
            .collect(),
        Some(Value::String(text)) => vec![text.as_str()],
        _ => Vec::new(),
    }
}

impl CandidateRecord {
    pub fn identifier(&self) -> Option<&str> {
        non_empty(resolve_str(&self.0, "orcid-identifier.path"))
            .or_else(|| non_empty(resolve_str(&self.0, "orcid-id")))
    }

    fn display_name(&self) -> String {
        if let Some(title) = non_empty(resolve_str(&self.0, "title.0.title.value")) {
            return title.to_string();
        }
        if let Some(name) = non_empty(resolve_str(&self.0, "name.value")) {
            return name.to_string();
        }
        [
            resolve_str(&self.0, "given-names"),
            resolve_str(&self.0, "family-names"),
        ]
        .into_iter()
        .filter_map(non_empty)
        .collect::<Vec<_>>()
        .join(" ")
    }

    fn summary(&self) -> &str {
        non_empty(resolve_str(&self.0, "summary.0.value"))
            .or_else(|| non_empty(resolve_str(&self.0, "biography.value")))
            .unwrap_or("")
    }

    fn work_summaries(&self) -> Vec<String> {
        let groups: Vec<&Value> = match self.0.get("group") {
            Some(Value::Array(groups)) => groups.iter().collect(),
            Some(group @ Value::Object(_)) => vec![group],
            _ => Vec::new(),
        };

        groups
            .into_iter()
            .filter_map(|group| group.get("work-summary").and_then(Value::as_array))
            .flatten()
            .map(|work| {
                let title = resolve_str(work, "title.title.value").unwrap_or("");
                let journal = resolve_str(work, "journal-title.value").unwrap_or("");
                format!("{title} {journal}").trim().to_string()
            })
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Flatten the record into the text that gets embedded and shown to the
    /// LLM. Records without an identifier or without any text yield `None`.
    pub fn to_candidate_text(&self) -> Option<CandidateText> {
        let id = self.identifier()?.to_string();

        let keywords = string_items(resolve(&self.0, "keywords.value")).join(" ");
        let institutions = string_items(self.0.get("institution-name")).join(" ");
        let works = self.work_summaries().join(" ");

        let text = [
            self.display_name().as_str(),
            self.summary(),
            keywords.as_str(),
            institutions.as_str(),
            works.as_str(),
        ]
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        if text.is_empty() {
            return None;
        }
        Some(CandidateText { id, text })
    }
}
