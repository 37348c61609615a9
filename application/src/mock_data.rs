use domain::recommendation::{LabRecommendation, MentorRecommendation, YearCount};

/// Built-in recommendation set served when no real data can be produced
/// (no LLM credential, or no directory candidates to analyse).
pub fn mock_recommendations() -> Vec<LabRecommendation> {
    vec![LabRecommendation {
        id: "mock-lab-ai-detailed".to_string(),
        logo_url: "https://picsum.photos/seed/mockdetailedai/100/100".to_string(),
        name: "[Mock] Future AI Convergence Research Center".to_string(),
        keywords: ["Artificial Intelligence", "Data Science", "HCI", "Robotics"]
            .into_iter()
            .map(String::from)
            .collect(),
        match_rate: 88,
        projects: [
            "Advanced human-robot interaction",
            "Explainable AI (XAI) model development",
            "Healthcare data analytics platform",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        publication_trends: [("2021", 8), ("2022", 12), ("2023", 18)]
            .into_iter()
            .map(|(year, count)| YearCount {
                year: year.to_string(),
                count,
            })
            .collect(),
        member_count: 25,
        mentors: vec![
            MentorRecommendation {
                id: "mock-mentor-ai-1".to_string(),
                avatar_url: Some("https://picsum.photos/seed/mockmA1/80/80".to_string()),
                name: "Prof. Minho Lee".to_string(),
                title: "Center Director, Professor of Computer Science".to_string(),
                profile: "Machine learning and data mining; has led many industry projects."
                    .to_string(),
            },
            MentorRecommendation {
                id: "mock-mentor-ai-2".to_string(),
                avatar_url: Some("https://picsum.photos/seed/mockmA2/80/80".to_string()),
                name: "Dr. Seojun Park".to_string(),
                title: "Senior Researcher (Ph.D.)".to_string(),
                profile: "Natural language processing and applied deep learning; a promising early-career researcher."
                    .to_string(),
            },
        ],
        career_scenario: "[Mock] The center studies core AI technologies and a wide range of \
                          applications. Researchers grow quickly through project-based learning and \
                          conference presentations, and often go on to leading AI groups in \
                          academia and industry."
            .to_string(),
        similarity_score: None,
    }]
}
