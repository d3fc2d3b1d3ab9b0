use serde::{Deserialize, Serialize};
use serde_json::Value;

// NOTE: Schema Design
//
// The server frames one JSON object per message. Every field is optional on
// the wire: producers emit partial records while a decode is still
// in-flight, so absent fields default instead of failing the whole frame.
// A frame that is not a JSON object at all is dropped by the runtime layer.

/// One decoded frame from the console feed.
///
/// Immutable once decoded; owned by the message buffer after append,
/// projection code only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMessage {
    /// Source topic, e.g. `0xAB12CD/sensors/temp`. May be empty.
    #[serde(default)]
    pub topic: String,

    /// Arbitrary JSON payload. Strings render verbatim, everything else is
    /// serialized for display.
    #[serde(default)]
    pub payload: Value,

    /// ISO-8601 instant or a bare `HH:MM[:SS]` clock string. May be empty.
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_frame() {
        let msg: LogMessage =
            serde_json::from_str(r#"{"topic":"rds/pty","payload":"News","timestamp":"2024-01-02T03:04:05Z"}"#)
                .unwrap();
        assert_eq!(msg.topic, "rds/pty");
        assert_eq!(msg.payload, Value::String("News".to_string()));
        assert_eq!(msg.timestamp, "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_decode_defaults_missing_fields() {
        let msg: LogMessage = serde_json::from_str(r#"{"topic":"status"}"#).unwrap();
        assert_eq!(msg.topic, "status");
        assert!(msg.payload.is_null());
        assert_eq!(msg.timestamp, "");
    }

    #[test]
    fn test_decode_structured_payload() {
        let msg: LogMessage =
            serde_json::from_str(r#"{"topic":"af","payload":{"count":3}}"#).unwrap();
        assert_eq!(msg.payload["count"], 3);
    }

    #[test]
    fn test_non_object_frame_is_an_error() {
        assert!(serde_json::from_str::<LogMessage>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<LogMessage>("not json").is_err());
    }
}
