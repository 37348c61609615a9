//! Turning raw LLM output into well-formed recommendations.
//!
//! The model is asked for a JSON array but routinely returns partial objects,
//! wraps the array in an object, or surrounds it with a markdown fence. Every
//! field is coerced here so callers always get a complete `LabRecommendation`.

use anyhow::{anyhow, bail, Context};
use domain::recommendation::{
    clamp_match_rate, LabRecommendation, MentorRecommendation, YearCount,
    CAREER_SCENARIO_PLACEHOLDER,
};
use serde_json::{Map, Value};
use shared::types::Result;
use shared::utils::{normalize_identifier, preview};
use std::time::{SystemTime, UNIX_EPOCH};

/// Keys under which the model sometimes nests the recommendation array.
const WRAPPER_KEYS: [&str; 3] = ["recommendations", "labs", "results"];

const DEFAULT_MATCH_RATE: u32 = 75;
const DEFAULT_LAB_NAME: &str = "Unnamed research lab";
const DEFAULT_PROJECT: &str = "No information";
const DEFAULT_MENTOR_NAME: &str = "Unnamed mentor";
const DEFAULT_MENTOR_TITLE: &str = "No title information";
const DEFAULT_MENTOR_PROFILE: &str = "No profile information";

const FENCE: &str = "```";

/// Return the body of the first markdown code fence. Output that already
/// starts as JSON, or has no complete fence, is only trimmed. A language tag
/// right after the opening fence is dropped, on its own line or not.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with(['[', '{']) {
        return trimmed;
    }
    let Some(open) = trimmed.find(FENCE) else {
        return trimmed;
    };
    let rest = &trimmed[open + FENCE.len()..];
    let Some(close) = rest.find(FENCE) else {
        return trimmed;
    };
    rest[..close]
        .trim_start_matches(|c: char| !c.is_whitespace() && c != '[' && c != '{')
        .trim()
}

/// Locate the recommendation array in the model's JSON output.
pub fn extract_array(raw: &str) -> Result<Vec<Value>> {
    let json = strip_code_fence(raw);
    let parsed: Value = serde_json::from_str(json)
        .with_context(|| format!("LLM response is not valid JSON: {}", preview(json, 200)))?;

    match parsed {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for key in WRAPPER_KEYS {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return Ok(items);
                }
            }
            bail!("LLM response is not in the expected array format (no recommendation array in object)")
        }
        _ => Err(anyhow!("LLM response is not a JSON array")),
    }
}

/// Parse and normalize the model's recommendation output.
pub fn parse_recommendations(raw: &str) -> Result<Vec<LabRecommendation>> {
    let items = extract_array(raw)?;
    let stamp = millis_since_epoch();
    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_lab(item, index, stamp))
        .collect())
}

fn millis_since_epoch() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

fn non_empty_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn string_list(fields: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    fields.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// Deterministic URL-safe image seed derived from a name, falling back to
/// the position when the name is blank.
pub fn image_seed(name: Option<&str>, index: usize) -> String {
    let normalized = name.map(normalize_identifier).unwrap_or_default();
    if normalized.is_empty() {
        return index.to_string();
    }
    let digest = format!("{:x}", md5::compute(normalized.as_bytes()));
    digest[..12].to_string()
}

fn non_negative_count(value: Option<&Value>) -> u32 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, f64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

fn normalize_trend(value: &Value) -> YearCount {
    let year = match value.get("year") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    YearCount {
        year,
        count: non_negative_count(value.get("count")),
    }
}

fn normalize_mentor(
    value: &Value,
    lab_index: usize,
    mentor_index: usize,
    stamp: u128,
) -> MentorRecommendation {
    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);
    let name = non_empty_str(fields, "name");

    MentorRecommendation {
        id: non_empty_str(fields, "id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("temp-mentor-{stamp}-{lab_index}-{mentor_index}")),
        avatar_url: Some(
            non_empty_str(fields, "avatarUrl")
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!(
                        "https://picsum.photos/seed/mentor_{}/80/80",
                        image_seed(name, mentor_index)
                    )
                }),
        ),
        name: name.unwrap_or(DEFAULT_MENTOR_NAME).to_string(),
        title: non_empty_str(fields, "title")
            .unwrap_or(DEFAULT_MENTOR_TITLE)
            .to_string(),
        profile: non_empty_str(fields, "profile")
            .unwrap_or(DEFAULT_MENTOR_PROFILE)
            .to_string(),
    }
}

/// Coerce one model-produced object into a complete recommendation.
/// Non-object values produce an all-default recommendation.
pub fn normalize_lab(value: &Value, index: usize, stamp: u128) -> LabRecommendation {
    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);
    let name = non_empty_str(fields, "name");

    let match_rate = fields
        .get("matchRate")
        .and_then(Value::as_f64)
        .map(clamp_match_rate)
        .unwrap_or(DEFAULT_MATCH_RATE);

    let publication_trends = fields
        .get("publicationTrends")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_trend).collect())
        .unwrap_or_default();

    let member_count = match fields.get("memberCount") {
        Some(count @ Value::Number(_)) => non_negative_count(Some(count)),
        _ => 0,
    };

    let mentors = fields
        .get("mentors")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(m, mentor)| normalize_mentor(mentor, index, m, stamp))
                .collect()
        })
        .unwrap_or_default();

    LabRecommendation {
        id: non_empty_str(fields, "id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("temp-lab-{stamp}-{index}")),
        logo_url: non_empty_str(fields, "logoUrl")
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "https://picsum.photos/seed/lab_{}/100/100",
                    image_seed(name, index)
                )
            }),
        name: name.unwrap_or(DEFAULT_LAB_NAME).to_string(),
        keywords: string_list(fields, "keywords").unwrap_or_default(),
        match_rate,
        projects: string_list(fields, "projects")
            .unwrap_or_else(|| vec![DEFAULT_PROJECT.to_string()]),
        publication_trends,
        member_count,
        mentors,
        career_scenario: non_empty_str(fields, "careerScenario")
            .unwrap_or(CAREER_SCENARIO_PLACEHOLDER)
            .to_string(),
        similarity_score: None,
    }
}
