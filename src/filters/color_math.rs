//! Per-pixel color math: negate, grayscale, threshold, channel shift, isolation.
//!
//! These are pure functions over a packed `0xAARRGGBB` pixel. None of them
//! look at neighboring pixels, which is what lets the pipeline fuse them into
//! a single pass. Output alpha is always 255.

use super::pixel::{channel_value, opaque_rgb, rgb_components, Channel, ALPHA_OPAQUE, BLACK, RGB_MASK, WHITE};

/// Average above which the threshold filter outputs white.
const THRESHOLD_MIDPOINT: f32 = 127.5;

/// Float mean of the three color channels.
#[inline]
fn channel_mean(pixel: u32) -> f32 {
    let (r, g, b) = rgb_components(pixel);
    (r as u32 + g as u32 + b as u32) as f32 / 3.0
}

// ============================================================================
// Negate
// ============================================================================

/// Invert the three color channels.
#[inline]
pub fn negate(pixel: u32) -> u32 {
    (pixel ^ RGB_MASK) | ALPHA_OPAQUE
}

// ============================================================================
// Grayscale
// ============================================================================

/// Replace every color channel with the truncated channel mean.
///
/// The mean is computed in floating point and truncated toward zero, so
/// (0, 255, 255) becomes 170 and (100, 100, 10) becomes 70.
#[inline]
pub fn grayscale_average(pixel: u32) -> u32 {
    let gray = channel_mean(pixel) as u8;
    opaque_rgb(gray, gray, gray)
}

/// Map a pixel to pure white or pure black.
///
/// White only when the channel mean is strictly above 127.5.
#[inline]
pub fn grayscale_threshold(pixel: u32) -> u32 {
    if channel_mean(pixel) > THRESHOLD_MIDPOINT {
        WHITE
    } else {
        BLACK
    }
}

// ============================================================================
// Channel intensity
// ============================================================================

/// Add a signed delta to one channel, clamped to 0-255.
///
/// # Arguments
/// * `pixel` - Packed input pixel
/// * `channel` - Channel to change, the other two are copied through
/// * `delta` - Amount to add; negative values darken the channel
#[inline]
pub fn shift_channel(pixel: u32, channel: Channel, delta: i32) -> u32 {
    let shift = |target: Channel| {
        let value = channel_value(pixel, target);
        if target == channel {
            (value as i32).saturating_add(delta).clamp(0, 255) as u8
        } else {
            value
        }
    };
    opaque_rgb(shift(Channel::Red), shift(Channel::Green), shift(Channel::Blue))
}

// ============================================================================
// Channel isolation
// ============================================================================

/// Keep the pixel only if `channel` dominates it, otherwise grayscale it.
///
/// Dominance is strict: the channel must be greater than both others.
/// A tie for the maximum falls back to [`grayscale_average`].
#[inline]
pub fn isolate_channel(pixel: u32, channel: Channel) -> u32 {
    let target = channel_value(pixel, channel);
    let dominant = Channel::ALL
        .iter()
        .filter(|&&other| other != channel)
        .all(|&other| target > channel_value(pixel, other));

    if dominant {
        pixel | ALPHA_OPAQUE
    } else {
        grayscale_average(pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opaque pixels on a coarse grid, including both channel extremes.
    fn sample_pixels() -> Vec<u32> {
        let steps: Vec<u8> = (0..=255u32).step_by(15).map(|v| v as u8).chain([1, 127, 128, 254]).collect();
        let mut pixels = Vec::new();
        for &r in &steps {
            for &g in &steps {
                for &b in &steps {
                    pixels.push(opaque_rgb(r, g, b));
                }
            }
        }
        pixels
    }

    // ========================================================================
    // Negate
    // ========================================================================

    #[test]
    fn test_negate_red() {
        assert_eq!(rgb_components(negate(opaque_rgb(255, 0, 0))), (0, 255, 255));
    }

    #[test]
    fn test_negate_involution() {
        for p in sample_pixels() {
            assert_eq!(negate(negate(p)), p);
        }
    }

    #[test]
    fn test_negate_forces_opaque() {
        assert_eq!(negate(0x0000_0000), WHITE);
    }

    // ========================================================================
    // Grayscale
    // ========================================================================

    #[test]
    fn test_grayscale_truncates() {
        assert_eq!(rgb_components(grayscale_average(opaque_rgb(0, 255, 255))), (170, 170, 170));
        assert_eq!(rgb_components(grayscale_average(opaque_rgb(100, 100, 10))), (70, 70, 70));
        // 2/3 truncates to 0, not rounded up to 1
        assert_eq!(rgb_components(grayscale_average(opaque_rgb(1, 1, 0))), (0, 0, 0));
    }

    #[test]
    fn test_grayscale_equal_channels_and_idempotent() {
        for p in sample_pixels() {
            let gray = grayscale_average(p);
            let (r, g, b) = rgb_components(gray);
            assert!(r == g && g == b);
            assert_eq!(grayscale_average(gray), gray);
        }
    }

    #[test]
    fn test_threshold_boundary_is_strict() {
        // mean 127.33 and 127.67 straddle the midpoint
        assert_eq!(grayscale_threshold(opaque_rgb(127, 127, 128)), BLACK);
        assert_eq!(grayscale_threshold(opaque_rgb(128, 128, 127)), WHITE);
        assert_eq!(grayscale_threshold(opaque_rgb(255, 255, 255)), WHITE);
        assert_eq!(grayscale_threshold(opaque_rgb(0, 0, 0)), BLACK);
    }

    #[test]
    fn test_threshold_output_and_idempotence() {
        for p in sample_pixels() {
            let out = grayscale_threshold(p);
            assert!(out == BLACK || out == WHITE);
            assert_eq!(grayscale_threshold(out), out);
        }
    }

    // ========================================================================
    // Channel intensity
    // ========================================================================

    #[test]
    fn test_shift_red_up_and_clamp() {
        assert_eq!(rgb_components(shift_channel(opaque_rgb(200, 10, 10), Channel::Red, 50)), (250, 10, 10));
        assert_eq!(rgb_components(shift_channel(opaque_rgb(230, 10, 10), Channel::Red, 50)), (255, 10, 10));
    }

    #[test]
    fn test_shift_down_clamps_at_zero() {
        assert_eq!(rgb_components(shift_channel(opaque_rgb(10, 30, 200), Channel::Green, -50)), (10, 0, 200));
    }

    #[test]
    fn test_shift_extreme_delta() {
        assert_eq!(rgb_components(shift_channel(opaque_rgb(1, 2, 3), Channel::Blue, i32::MAX)), (1, 2, 255));
        assert_eq!(rgb_components(shift_channel(opaque_rgb(1, 2, 3), Channel::Blue, i32::MIN)), (1, 2, 0));
    }

    #[test]
    fn test_shift_touches_only_target_channel() {
        for p in sample_pixels() {
            for channel in Channel::ALL {
                for delta in [-300, -50, -1, 0, 1, 50, 300] {
                    let out = shift_channel(p, channel, delta);
                    let expected = (channel_value(p, channel) as i32 + delta).clamp(0, 255) as u8;
                    assert_eq!(channel_value(out, channel), expected);
                    for other in Channel::ALL.into_iter().filter(|&c| c != channel) {
                        assert_eq!(channel_value(out, other), channel_value(p, other));
                    }
                }
            }
        }
    }

    // ========================================================================
    // Channel isolation
    // ========================================================================

    #[test]
    fn test_isolate_dominant_unchanged() {
        let p = opaque_rgb(200, 50, 10);
        assert_eq!(isolate_channel(p, Channel::Red), p);
    }

    #[test]
    fn test_isolate_tie_falls_back_to_grayscale() {
        let out = isolate_channel(opaque_rgb(100, 100, 10), Channel::Red);
        assert_eq!(rgb_components(out), (70, 70, 70));
    }

    #[test]
    fn test_isolate_non_dominant() {
        let out = isolate_channel(opaque_rgb(200, 50, 10), Channel::Blue);
        assert_eq!(rgb_components(out), (86, 86, 86));
    }
}
