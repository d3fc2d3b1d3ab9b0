/// Extract the `HH:MM:SS` clock component from a message timestamp.
///
/// Empty input stays empty. Anything 8 characters or shorter is assumed to
/// already be a bare clock string and passes through. Longer values are
/// treated as ISO-8601 and sliced at the fixed time-of-day offset; a slice
/// that fails (short or non-ASCII input) renders empty rather than
/// erroring.
pub fn clock_time(ts: &str) -> String {
    if ts.is_empty() {
        return String::new();
    }
    if ts.chars().count() <= 8 {
        return ts.to_string();
    }
    ts.get(11..19).map(str::to_string).unwrap_or_default()
}
