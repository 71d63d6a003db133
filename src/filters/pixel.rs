//! Packed pixel values and channel access.
//!
//! A pixel is a single `u32` in `0xAARRGGBB` order, 8 bits per channel.
//! Every operation in this crate writes fully opaque pixels (alpha = 255)
//! and never reads the alpha channel.

use serde::{Deserialize, Serialize};

/// Alpha bits of a fully opaque pixel.
pub const ALPHA_OPAQUE: u32 = 0xFF00_0000;

/// Mask covering the three color channels.
pub const RGB_MASK: u32 = 0x00FF_FFFF;

/// Opaque black.
pub const BLACK: u32 = 0xFF00_0000;

/// Opaque white.
pub const WHITE: u32 = 0xFFFF_FFFF;

/// One of the three color channels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in packing order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    const fn bit_offset(self) -> u32 {
        match self {
            Channel::Red => 16,
            Channel::Green => 8,
            Channel::Blue => 0,
        }
    }

    /// Lowercase channel name.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// Pack three color channels into an opaque pixel.
#[inline]
pub const fn opaque_rgb(r: u8, g: u8, b: u8) -> u32 {
    ALPHA_OPAQUE | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Value of a single color channel.
#[inline]
pub const fn channel_value(pixel: u32, channel: Channel) -> u8 {
    ((pixel >> channel.bit_offset()) & 0xFF) as u8
}

/// Red, green and blue components of a pixel.
#[inline]
pub const fn rgb_components(pixel: u32) -> (u8, u8, u8) {
    (
        channel_value(pixel, Channel::Red),
        channel_value(pixel, Channel::Green),
        channel_value(pixel, Channel::Blue),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_and_unpack() {
        let pixel = opaque_rgb(200, 100, 50);
        assert_eq!(pixel, 0xFFC8_6432);
        assert_eq!(rgb_components(pixel), (200, 100, 50));
        assert_eq!(channel_value(pixel, Channel::Green), 100);
    }

    #[test]
    fn test_alpha_ignored_on_read() {
        let translucent = 0x1020_3040;
        assert_eq!(rgb_components(translucent), (0x20, 0x30, 0x40));
    }

    #[test]
    fn test_channel_serde_names() {
        let json = serde_json::to_string(&Channel::ALL).unwrap();
        assert_eq!(json, r#"["red","green","blue"]"#);
    }
}
