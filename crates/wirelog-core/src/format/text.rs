use serde_json::Value;

/// Display text for a payload: strings verbatim, null as nothing, any
/// other JSON value in its compact serialized form.
pub fn payload_text(payload: &Value) -> String {
    match payload {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cap `text` at `max` characters, marking the cut with a trailing
/// ellipsis. Text at or under the cap is returned unchanged.
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(max).collect();
        clipped.push_str("...");
        clipped
    }
}

/// Strip anything that could corrupt the terminal: line breaks and tabs
/// become spaces, remaining control characters are dropped.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Live counter label, pluralized.
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 message".to_string()
    } else {
        format!("{} messages", count)
    }
}
