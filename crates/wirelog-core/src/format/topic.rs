/// Display label for a topic: a leading `0x<hex>/` namespace segment
/// (machine-generated station/device prefixes) is stripped. The stored
/// topic is never touched, only the label.
pub fn short_topic(topic: &str) -> &str {
    let Some(rest) = topic.strip_prefix("0x") else {
        return topic;
    };
    let digits = rest
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .count();
    if digits == 0 {
        return topic;
    }
    // Hex digits are ASCII, so the char count is a byte offset.
    match rest[digits..].strip_prefix('/') {
        Some(tail) => tail,
        None => topic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_prefix_is_stripped() {
        assert_eq!(short_topic("0xAB12CD/sensors/temp"), "sensors/temp");
        assert_eq!(short_topic("0xab12cd/rt"), "rt");
    }

    #[test]
    fn test_unprefixed_topic_is_unchanged() {
        assert_eq!(short_topic("sensors/temp"), "sensors/temp");
        assert_eq!(short_topic(""), "");
    }

    #[test]
    fn test_near_misses_are_left_alone() {
        // No digits between 0x and the slash.
        assert_eq!(short_topic("0x/sensors"), "0x/sensors");
        // Not hex.
        assert_eq!(short_topic("0xZZ/sensors"), "0xZZ/sensors");
        // No slash after the digits.
        assert_eq!(short_topic("0xAB12CD"), "0xAB12CD");
        // Prefix must be at the start.
        assert_eq!(short_topic("a/0xAB/sensors"), "a/0xAB/sensors");
    }
}
