use wirelog_types::LogMessage;

use crate::format::text::payload_text;

/// Case-insensitive substring match over the topic and the payload's
/// display text. The needle must already be lowercased (ViewState stores it
/// that way); an empty needle matches everything.
pub fn matches(msg: &LogMessage, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if msg.topic.to_lowercase().contains(needle) {
        return true;
    }
    payload_text(&msg.payload).to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn msg(topic: &str, payload: serde_json::Value) -> LogMessage {
        LogMessage {
            topic: topic.to_string(),
            payload,
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        assert!(matches(&msg("", json!(null)), ""));
        assert!(matches(&msg("anything", json!("x")), ""));
    }

    #[test]
    fn test_topic_match_is_case_insensitive() {
        let m = msg("0xAB12/Sensors/Temp", json!(null));
        assert!(matches(&m, "sensors"));
        assert!(matches(&m, "0xab12"));
        assert!(!matches(&m, "humidity"));
    }

    #[test]
    fn test_payload_match_covers_structured_values() {
        let m = msg("status", json!({"station": "Radio FOUR"}));
        assert!(matches(&m, "four"));
        assert!(matches(&m, "station"));
        assert!(!matches(&m, "five"));
    }

    #[test]
    fn test_string_payload_matches_verbatim_text() {
        let m = msg("rt", json!("Now Playing: Nightdrive"));
        assert!(matches(&m, "nightdrive"));
    }
}
