use domain::candidate::ScoredCandidate;
use domain::chat::ChatPrompt;
use domain::profile::UserProfile;
use domain::recommendation::CAREER_SCENARIO_PLACEHOLDER;

const SYNTHESIS_TEMPERATURE: f32 = 0.3;
const SYNTHESIS_MAX_TOKENS: u32 = 2500;
const NARRATIVE_TEMPERATURE: f32 = 0.5;
const NARRATIVE_MAX_TOKENS: u32 = 100;

/// One block per candidate, separated by `---`. The similarity note is only
/// added when a similarity was actually computed.
pub fn format_candidates(candidates: &[ScoredCandidate]) -> String {
    candidates
        .iter()
        .map(|candidate| {
            let similarity = if candidate.similarity > 0.0 {
                format!(
                    " (computed similarity: {:.0}%)",
                    f64::from(candidate.similarity) * 100.0
                )
            } else {
                String::new()
            };
            format!(
                "ORCID ID: {}{}\nResearch summary: {}",
                candidate.id, similarity, candidate.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn profile_line(profile: &UserProfile) -> String {
    let mut line = format!(
        "major {}, keywords of interest {}, education level {}",
        profile.major,
        profile.keywords,
        profile.education_label()
    );
    if let Some(info) = profile
        .additional_info
        .as_deref()
        .map(str::trim)
        .filter(|info| !info.is_empty())
    {
        line.push_str(&format!(", additional information: {info}"));
    }
    line
}

pub fn synthesis_prompt(profile: &UserProfile, candidates: &[ScoredCandidate]) -> ChatPrompt {
    let content = format!(
        r#"You are an expert in recommending research labs. Using the user profile and the list of researchers below (from ORCID, pre-filtered and ordered by relevance), recommend the 3-5 research labs that best fit the user, and suggest 1-2 possible mentors for each lab.

User query: {query}
User profile: {profile}.

Researchers:
---
{documents}
---

Response rules:
1. Return ONLY a JSON array in the format shown below.
2. The "id" of each lab must be the ORCID ID (format 0000-0001-2345-6789) of the lab's lead researcher or of the most relevant entry above. If no suitable ORCID ID exists, create a temporary ID starting with "temp-lab-id-".
3. Use ORCID IDs for mentor "id" fields when possible; otherwise create a temporary ID starting with "temp-mentor-id-".
4. Build logoUrl and mentor avatarUrl as "https://picsum.photos/seed/UNIQUE_SEED/SIZE".
5. Fill matchRate (0-100, fit with the user), projects, publicationTrends and memberCount with realistic estimates.
6. Set careerScenario to "{placeholder}".

JSON format:
[
  {{
    "id": "(ORCID ID or temporary ID)",
    "logoUrl": "https://picsum.photos/seed/lab_seed_example/100/100",
    "name": "(lab name)",
    "keywords": ["keyword1", "keyword2"],
    "matchRate": 85,
    "projects": ["example project 1", "example project 2"],
    "publicationTrends": [{{ "year": "2022", "count": 10 }}, {{ "year": "2023", "count": 12 }}],
    "memberCount": 20,
    "mentors": [
      {{ "id": "(ORCID ID or temporary ID)", "avatarUrl": "https://picsum.photos/seed/mentor_seed_example/80/80", "name": "(mentor name)", "title": "(position)", "profile": "(research area and short introduction)" }}
    ],
    "careerScenario": "{placeholder}"
  }}
]"#,
        query = profile.embedding_text(),
        profile = profile_line(profile),
        documents = format_candidates(candidates),
        placeholder = CAREER_SCENARIO_PLACEHOLDER,
    );

    let mut prompt = ChatPrompt::new(SYNTHESIS_TEMPERATURE, SYNTHESIS_MAX_TOKENS).json();
    prompt.push_user(content);
    prompt
}

pub fn narrative_prompt(lab_name: &str, keywords: &[String]) -> ChatPrompt {
    let mut prompt = ChatPrompt::new(NARRATIVE_TEMPERATURE, NARRATIVE_MAX_TOKENS);
    prompt.push_system("You are a career consultant for IT and science fields.");
    prompt.push_user(format!(
        "Summarize, in 1-2 concise and appealing sentences (under 200 characters), the career \
         outlook, growth opportunities and networking benefits of joining the following lab.\n\n\
         Lab name: \"{lab_name}\"\nMain research keywords: {}\n\nSummary:",
        keywords.join(", ")
    ));
    prompt
}
