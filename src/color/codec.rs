//! RGB to hex conversion for Figma paints.

/// Convert normalized (0.0-1.0) channels to an uppercase `#RRGGBB` string.
///
/// Channels are floored after scaling to 0-255. Values outside the
/// normalized range are clamped.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    let packed = (1u32 << 24) | (channel(r) << 16) | (channel(g) << 8) | channel(b);
    // The sentinel bit guarantees seven hex digits; the first one is dropped.
    let digits = format!("{packed:x}");
    format!("#{}", digits[1..].to_uppercase())
}

/// Parse `#RRGGBB` (or `RRGGBB`) into its byte channels.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}

fn channel(value: f64) -> u32 {
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    (clamped * 255.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_and_extremes() {
        assert_eq!(rgb_to_hex(0.0, 0.0, 0.0), "#000000");
        assert_eq!(rgb_to_hex(1.0, 1.0, 1.0), "#FFFFFF");
        assert_eq!(rgb_to_hex(1.0, 0.0, 0.0), "#FF0000");
        assert_eq!(rgb_to_hex(0.0, 0.0, 1.0), "#0000FF");
    }

    #[test]
    fn channels_are_floored_not_rounded() {
        // 0.5 * 255 = 127.5
        assert_eq!(rgb_to_hex(0.5, 0.5, 0.5), "#7F7F7F");
        // Figma's serialization of #102030
        assert_eq!(rgb_to_hex(0.062745, 0.12549, 0.188235), "#0F1F2F");
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        assert_eq!(rgb_to_hex(1.5, -0.2, f64::NAN), "#FF0000");
    }

    #[test]
    fn parse_hex_accepts_optional_hash() {
        assert_eq!(parse_hex("#FF8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex("0a0b0c"), Some([10, 11, 12]));
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }
}
