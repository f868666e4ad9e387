//! Packed ARGB dot colors
//!
//! Every cell of the matrix stores one `u32` with the byte layout
//! `alpha | red | green | blue`, most significant byte first.

use egui::Color32;

const RED_MASK: u32 = 0xFF << 16;
const GREEN_MASK: u32 = 0xFF << 8;
const BLUE_MASK: u32 = 0xFF;
const ALPHA_MASK: u32 = 0xFF << 24;
const CHANNEL_FACTOR: f32 = 1.0 / 255.0;

/// Named colors used by the widget defaults and the demos.
pub struct DotColors;

impl DotColors {
    /// Default "on" color, a warm LED orange.
    pub const ACTIVE: u32 = pack(255, 55, 0, 255);
    /// Default "off" color, half transparent dark grey.
    pub const INACTIVE: u32 = pack(51, 51, 51, 128);
    pub const LIME: u32 = pack(0, 255, 0, 255);
    pub const RED: u32 = pack(255, 0, 0, 255);
    pub const WHITE: u32 = pack(255, 255, 255, 255);
    pub const TRANSPARENT: u32 = 0;
}

/// Pack 8-bit channels into a single ARGB value.
pub const fn pack(red: u8, green: u8, blue: u8, alpha: u8) -> u32 {
    (alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32
}

/// Pack normalized channels (0.0..=1.0). Each channel is clamped and then
/// rounded to the nearest 8-bit step.
pub fn pack_f32(red: f32, green: f32, blue: f32, alpha: f32) -> u32 {
    pack(to_byte(red), to_byte(green), to_byte(blue), to_byte(alpha))
}

fn to_byte(channel: f32) -> u8 {
    if channel.is_nan() {
        return 0;
    }
    (255.0 * channel.clamp(0.0, 1.0)).round() as u8
}

/// Split a packed value into `[red, green, blue, alpha]` bytes.
pub const fn unpack_u8(value: u32) -> [u8; 4] {
    [
        ((value & RED_MASK) >> 16) as u8,
        ((value & GREEN_MASK) >> 8) as u8,
        (value & BLUE_MASK) as u8,
        ((value & ALPHA_MASK) >> 24) as u8,
    ]
}

/// Split a packed value into normalized `[red, green, blue, alpha]`.
pub fn unpack(value: u32) -> [f32; 4] {
    let [r, g, b, a] = unpack_u8(value);
    [
        r as f32 * CHANNEL_FACTOR,
        g as f32 * CHANNEL_FACTOR,
        b as f32 * CHANNEL_FACTOR,
        a as f32 * CHANNEL_FACTOR,
    ]
}

pub fn to_color32(value: u32) -> Color32 {
    let [r, g, b, a] = unpack_u8(value);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub fn from_color32(color: Color32) -> u32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    pack(r, g, b, a)
}

/// Parse `#RRGGBB` or `#AARRGGBB` (leading `#` optional).
pub fn from_hex(hex: &str) -> Option<u32> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(ALPHA_MASK | value),
        8 => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(pack(255, 0, 0, 255), 0xFFFF_0000);
        assert_eq!(pack(0x12, 0x34, 0x56, 0x78), 0x7812_3456);
        assert_eq!(unpack_u8(0x7812_3456), [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_pack_f32_rounds() {
        assert_eq!(pack_f32(1.0, 0.0, 0.0, 1.0), 0xFFFF_0000);
        // 0.5 * 255 = 127.5 rounds up
        assert_eq!(unpack_u8(pack_f32(0.5, 0.5, 0.5, 0.5)), [128, 128, 128, 128]);
        assert_eq!(unpack_u8(pack_f32(0.2, 0.2, 0.2, 1.0)), [51, 51, 51, 255]);
    }

    #[test]
    fn test_pack_f32_clamps() {
        assert_eq!(pack_f32(2.0, -1.0, f32::NAN, 1.5), pack(255, 0, 0, 255));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(unpack_u8(DotColors::ACTIVE), [255, 55, 0, 255]);
        let [_, _, _, a] = unpack(DotColors::INACTIVE);
        assert!((a - 0.5).abs() <= CHANNEL_FACTOR);
    }

    #[test]
    fn test_color32_conversion() {
        let value = pack(10, 20, 30, 255);
        assert_eq!(to_color32(value), Color32::from_rgb(10, 20, 30));
        assert_eq!(from_color32(Color32::from_rgb(10, 20, 30)), value);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(from_hex("#1F6823"), Some(0xFF1F_6823));
        assert_eq!(from_hex("80EEEEEE"), Some(0x80EE_EEEE));
        assert_eq!(from_hex("#12345"), None);
        assert_eq!(from_hex("#zzzzzz"), None);
        assert_eq!(from_hex("#+FFFFF"), None);
        assert_eq!(from_hex("+FFFFFFF"), None);
        assert_eq!(from_hex(" #00ff00 "), Some(0xFF00_FF00));
    }

    proptest! {
        #[test]
        fn test_round_trip_within_one_step(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), a in any::<u8>()) {
            let normalized = [r, g, b, a].map(|c| c as f32 / 255.0);
            let packed = pack_f32(normalized[0], normalized[1], normalized[2], normalized[3]);
            let back = unpack(packed);
            for (expected, actual) in normalized.iter().zip(back.iter()) {
                prop_assert!((expected - actual).abs() <= CHANNEL_FACTOR);
            }
            prop_assert_eq!(unpack_u8(pack(r, g, b, a)), [r, g, b, a]);
        }
    }
}
