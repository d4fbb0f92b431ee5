/// Truncate `s` to at most `max_chars` Unicode scalar values.
pub fn clip(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Trim and truncate a required field. An empty result means the field is missing.
pub fn normalize_required(raw: Option<&str>, max_chars: usize) -> String {
    clip(raw.unwrap_or_default().trim(), max_chars).to_string()
}

/// Trim an optional field, mapping blank input to `None`.
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
