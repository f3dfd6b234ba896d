/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Placeholders the provider writes for a missing value.
pub fn is_missing(cleaned: &str) -> bool {
    cleaned.is_empty()
        || ["NA", "NaN", "None", "null", "<NA>"]
            .iter()
            .any(|m| cleaned.eq_ignore_ascii_case(m))
}

/// Parse a cell as an integer, truncating decimals. `None` when missing or
/// not a finite number.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = clean_str(raw);
    if is_missing(s) {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Some(f.trunc() as i64)
        }
        _ => None,
    }
}

/// Best-effort integer: anything unparsable is 0.
pub fn coerce_int(raw: &str) -> i64 {
    parse_int(raw).unwrap_or(0)
}

/// Cleaned text, or `None` for a missing placeholder.
pub fn parse_text(raw: &str) -> Option<String> {
    let s = clean_str(raw);
    (!is_missing(s)).then(|| s.to_string())
}
