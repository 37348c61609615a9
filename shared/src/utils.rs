/// Canonical form used to compare directory identifiers coming from different
/// sources (directory records, LLM output). Lowercased, `orcid.org/` URL prefix
/// removed, separators dropped.
pub fn normalize_identifier(id: &str) -> String {
    let lowered = id.trim().to_lowercase();
    let bare = match lowered.rfind("orcid.org/") {
        Some(pos) => &lowered[pos + "orcid.org/".len()..],
        None => lowered.as_str(),
    };
    bare.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
