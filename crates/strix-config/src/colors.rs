//! Color string parsing for config values.

/// Parse a `#rrggbb` hex color into `[r, g, b]`.
pub fn parse_hex_rgb(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    // The length check counts bytes; non-ASCII input must bail before
    // the fixed-offset slicing below.
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_hex() {
        assert_eq!(parse_hex_rgb("#000000"), Some([0, 0, 0]));
        assert_eq!(parse_hex_rgb("#1e1e1e"), Some([30, 30, 30]));
        assert_eq!(parse_hex_rgb("#FFffFF"), Some([255, 255, 255]));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(parse_hex_rgb("1e1e1e"), None);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(parse_hex_rgb("#fff"), None);
        assert_eq!(parse_hex_rgb("#1e1e1e1e"), None);
        assert_eq!(parse_hex_rgb("#"), None);
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert_eq!(parse_hex_rgb("#zzzzzz"), None);
    }

    #[test]
    fn rejects_multibyte_input() {
        // Six bytes but not six ASCII digits.
        assert_eq!(parse_hex_rgb("#a€bc"), None);
    }
}
