pub fn parse_env_bool(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|value| value.trim().to_ascii_lowercase()),
        Some(value) if matches!(value.as_str(), "1" | "true" | "yes" | "on")
    )
}

/// Returns the body of the first fenced code block (```` ```json ... ``` ````),
/// with the language tag removed.
pub fn extract_fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body = after_fence.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let close = body.find("```")?;
    let inner = body[..close].trim();
    (!inner.is_empty()).then_some(inner)
}

pub fn extract_json_fragment(text: &str) -> Option<String> {
    let start = text
        .char_indices()
        .find(|(_, c)| *c == '{' || *c == '[')
        .map(|(idx, _)| idx)?;
    let sliced = &text[start..];
    let end = sliced
        .char_indices()
        .rev()
        .find(|(_, c)| *c == '}' || *c == ']')
        .map(|(idx, c)| idx + c.len_utf8())?;
    Some(sliced[..end].to_string())
}

/// Candidate JSON texts for a model response, most specific first.
pub fn json_candidates(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(block) = extract_fenced_block(text)
        && let Some(fragment) = extract_json_fragment(block)
    {
        out.push(fragment);
    }
    if let Some(fragment) = extract_json_fragment(text) {
        out.push(fragment);
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
    out.dedup();
    out
}
