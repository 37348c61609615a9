use colored::Colorize;
use domain::recommendation::LabRecommendation;
use std::fmt::Write;

const MAX_KEYWORDS: usize = 5;

/// Render recommendations as a terminal report.
pub fn render_report(labs: &[LabRecommendation]) -> String {
    if labs.is_empty() {
        return format!("{}\n", "No recommendations found.".yellow());
    }

    let mut out = String::new();
    for (i, lab) in labs.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {}",
            format!("[{}]", i + 1).blue(),
            lab.name.green().bold()
        );
        let mut rate = format!("    Match rate: {}%", lab.match_rate);
        if let Some(similarity) = lab.similarity_score {
            let _ = write!(rate, " (computed similarity {similarity:.2}%)");
        }
        let _ = writeln!(out, "{}", rate.cyan());

        if !lab.keywords.is_empty() {
            let shown: Vec<&str> = lab
                .keywords
                .iter()
                .take(MAX_KEYWORDS)
                .map(String::as_str)
                .collect();
            let _ = writeln!(out, "    Keywords: {}", shown.join(", "));
        }
        if lab.member_count > 0 {
            let _ = writeln!(out, "    Members: {}", lab.member_count);
        }
        if !lab.projects.is_empty() {
            let _ = writeln!(out, "    {}", "Projects:".bold());
            for project in &lab.projects {
                let _ = writeln!(out, "      - {project}");
            }
        }
        if !lab.mentors.is_empty() {
            let _ = writeln!(out, "    {}", "Mentors:".bold());
            for mentor in &lab.mentors {
                let _ = writeln!(out, "      - {} ({})", mentor.name, mentor.title.dimmed());
            }
        }
        let _ = writeln!(out, "    {} {}", "Career:".yellow(), lab.career_scenario);
        out.push('\n');
    }
    out
}
