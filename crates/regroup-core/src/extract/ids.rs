use uuid::Uuid;

const QUOTE_CHARS: &[char] = &['"', '\'', '`', '「', '」', '“', '”', '‘', '’'];

/// Canonical member ids are hyphenated UUIDs (8-4-4-4-12 hex, any case).
#[must_use]
pub fn is_canonical_id(token: &str) -> bool {
    token.len() == 36 && Uuid::try_parse(token).is_ok()
}

#[must_use]
pub fn clean_token(raw: &str) -> Option<String> {
    let cleaned = raw.trim_matches(|c: char| {
        c.is_whitespace() || c == '[' || c == ']' || QUOTE_CHARS.contains(&c)
    });
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Splits a comma-separated id run (optionally bracketed and quoted).
#[must_use]
pub fn split_id_tokens(raw: &str) -> Vec<String> {
    raw.split([',', '、'])
        .filter_map(clean_token)
        .collect()
}
