use serde::{Deserialize, Serialize};

/// Marker text the synthesizer leaves in `career_scenario` until the
/// narrative step fills it in.
pub const CAREER_SCENARIO_PLACEHOLDER: &str = "AI career scenario pending...";
const PLACEHOLDER_MARKER: &str = "scenario pending";

pub const MATCH_RATE_MAX: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabRecommendation {
    pub id: String,
    pub logo_url: String,
    pub name: String,
    pub keywords: Vec<String>,
    pub match_rate: u32,
    pub projects: Vec<String>,
    pub publication_trends: Vec<YearCount>,
    pub member_count: u32,
    pub mentors: Vec<MentorRecommendation>,
    pub career_scenario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRecommendation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub name: String,
    pub title: String,
    pub profile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: String,
    pub count: u32,
}

impl LabRecommendation {
    pub fn needs_career_scenario(&self) -> bool {
        let scenario = self.career_scenario.trim();
        scenario.is_empty() || scenario.contains(PLACEHOLDER_MARKER)
    }

    /// Apply a similarity (0..=1) computed for this lab's candidate. The
    /// computed rate replaces the LLM estimate only when it is higher.
    pub fn reconcile_similarity(&mut self, similarity: f32) {
        if similarity <= 0.0 {
            return;
        }
        let percent = f64::from(similarity) * 100.0;
        self.similarity_score = Some((percent * 100.0).round() / 100.0);

        let computed = clamp_match_rate(percent);
        if self.match_rate < computed {
            self.match_rate = computed;
        }
    }
}

/// Round and clamp any reported rate into `0..=100`.
pub fn clamp_match_rate(rate: f64) -> u32 {
    if !rate.is_finite() {
        return 0;
    }
    rate.round().clamp(0.0, f64::from(MATCH_RATE_MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab(match_rate: u32) -> LabRecommendation {
        LabRecommendation {
            id: "0000-0002-1825-0097".into(),
            logo_url: "https://picsum.photos/seed/lab/100/100".into(),
            name: "Systems Lab".into(),
            keywords: vec!["systems".into()],
            match_rate,
            projects: vec![],
            publication_trends: vec![],
            member_count: 4,
            mentors: vec![],
            career_scenario: CAREER_SCENARIO_PLACEHOLDER.into(),
            similarity_score: None,
        }
    }

    #[test]
    fn test_clamp_match_rate() {
        assert_eq!(clamp_match_rate(-15.0), 0);
        assert_eq!(clamp_match_rate(250.0), 100);
        assert_eq!(clamp_match_rate(84.6), 85);
        assert_eq!(clamp_match_rate(f64::NAN), 0);
        assert_eq!(clamp_match_rate(f64::INFINITY), 0);
    }

    #[test]
    fn test_higher_similarity_wins() {
        let mut recommendation = lab(70);
        recommendation.reconcile_similarity(0.92);
        assert_eq!(recommendation.match_rate, 92);
        assert_eq!(recommendation.similarity_score, Some(92.0));
    }

    #[test]
    fn test_lower_similarity_keeps_llm_rate() {
        let mut recommendation = lab(88);
        recommendation.reconcile_similarity(0.4123);
        assert_eq!(recommendation.match_rate, 88);
        assert_eq!(recommendation.similarity_score, Some(41.23));
    }

    #[test]
    fn test_zero_similarity_is_ignored() {
        let mut recommendation = lab(60);
        recommendation.reconcile_similarity(0.0);
        assert_eq!(recommendation.match_rate, 60);
        assert_eq!(recommendation.similarity_score, None);
    }

    #[test]
    fn test_placeholder_detection() {
        let mut recommendation = lab(50);
        assert!(recommendation.needs_career_scenario());
        recommendation.career_scenario = "   ".into();
        assert!(recommendation.needs_career_scenario());
        recommendation.career_scenario = "Strong industry ties.".into();
        assert!(!recommendation.needs_career_scenario());
    }

    #[test]
    fn test_serializes_camel_case_and_omits_missing_score() {
        let json = serde_json::to_value(lab(75)).unwrap();
        assert_eq!(json["matchRate"], 75);
        assert_eq!(json["logoUrl"], "https://picsum.photos/seed/lab/100/100");
        assert!(json.get("similarityScore").is_none());
    }
}
