//! Integer literal parsing for addresses, values and bitmasks.
//!
//! Accepted forms: decimal (`3456`), hexadecimal (`0xd24`), binary (`0b1000_0000`), octal
//! (`0o17` or `017`). Underscores may separate digits. Signs are rejected.

/// Parses an unsigned 32-bit integer literal, returning `None` if the text is not one
pub fn parse_u32(text: &str) -> Option<u32> {
    let text = text.trim();

    let (digits, radix) = if let Some(rest) = strip_radix_prefix(text, 'x') {
        (rest, 16)
    } else if let Some(rest) = strip_radix_prefix(text, 'b') {
        (rest, 2)
    } else if let Some(rest) = strip_radix_prefix(text, 'o') {
        (rest, 8)
    } else if text.len() > 1 && text.starts_with('0') {
        (&text[1..], 8)
    } else {
        (text, 10)
    };

    // from_str_radix() would accept a sign, so only digits and separators get through
    if digits.is_empty()
        || !digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    u32::from_str_radix(&digits.replace('_', ""), radix).ok()
}

fn strip_radix_prefix(text: &str, marker: char) -> Option<&str> {
    let rest = text.strip_prefix('0')?;
    rest.strip_prefix(marker).or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_radix() {
        assert_eq!(parse_u32("3364"), Some(3364));
        assert_eq!(parse_u32("0xd24"), Some(0xd24));
        assert_eq!(parse_u32("0XD24"), Some(0xd24));
        assert_eq!(parse_u32("0b1000_0000"), Some(0x80));
        assert_eq!(parse_u32("0o17"), Some(0o17));
        assert_eq!(parse_u32("017"), Some(0o17));
        assert_eq!(parse_u32("0"), Some(0));
        assert_eq!(parse_u32("00"), Some(0));
        assert_eq!(parse_u32("0xFFFF_FFFF"), Some(u32::MAX));
    }

    #[test]
    fn rejects_malformed_literals() {
        let rejected =
            ["", "-1", "+1", "0x", "0x+5", "0xg", "08", "0b102", "4294967296", "1__0", "_1"];
        for text in rejected {
            assert_eq!(parse_u32(text), None, "{text:?} should be rejected");
        }
    }
}
