//! Preview downscaling.
//!
//! Processed images are shown at screen size. [`fit_dimensions`] picks the
//! preview size, keeping the aspect ratio with the longer side capped at
//! `max_side`; [`downscale_to_fit`] resamples a buffer to that size with
//! bilinear filtering.

use crate::buffer::{allocate_pixels, PixelBuffer};
use crate::error::{PipelineError, PipelineResult};
use crate::filters::pixel::{opaque_rgb, rgb_components};

/// Size of a `width` x `height` image fitted inside a `max_side` square.
///
/// Images already within bounds keep their size. Otherwise the longer side
/// becomes `max_side` and the shorter one is scaled by the aspect ratio,
/// truncated, and kept at least 1.
pub fn fit_dimensions(width: usize, height: usize, max_side: usize) -> (usize, usize) {
    if width <= max_side && height <= max_side {
        return (width, height);
    }
    let ratio = width as f64 / height as f64;
    if width >= height {
        (max_side, ((max_side as f64 / ratio) as usize).max(1))
    } else {
        (((max_side as f64 * ratio) as usize).max(1), max_side)
    }
}

/// Bilinear-resampled copy of `source` fitted inside `max_side`.
///
/// Returns a plain copy when no scaling is needed.
pub fn downscale_to_fit(source: &PixelBuffer, max_side: usize) -> PipelineResult<PixelBuffer> {
    if max_side == 0 {
        return Err(PipelineError::dimension(0, 0, source.len()));
    }
    let (src_w, src_h) = (source.width(), source.height());
    let (dst_w, dst_h) = fit_dimensions(src_w, src_h, max_side);
    if (dst_w, dst_h) == (src_w, src_h) {
        return source.try_clone();
    }

    let view = source.view();
    let scale_x = src_w as f32 / dst_w as f32;
    let scale_y = src_h as f32 / dst_h as f32;
    let mut output = allocate_pixels(dst_w * dst_h)?;

    for (y, row) in output.chunks_mut(dst_w).enumerate() {
        // Sample at pixel centers
        let sy = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, (src_h - 1) as f32);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = sy - y0 as f32;

        for (x, dst) in row.iter_mut().enumerate() {
            let sx = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, (src_w - 1) as f32);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(src_w - 1);
            let fx = sx - x0 as f32;

            let corners = [
                view[[y0, x0]],
                view[[y0, x1]],
                view[[y1, x0]],
                view[[y1, x1]],
            ];
            *dst = blend_bilinear(corners, fx, fy);
        }
    }

    PixelBuffer::new(dst_w, dst_h, output)
}

/// Interpolate four neighbors (top-left, top-right, bottom-left, bottom-right).
fn blend_bilinear(corners: [u32; 4], fx: f32, fy: f32) -> u32 {
    let weights = [
        (1.0 - fx) * (1.0 - fy),
        fx * (1.0 - fy),
        (1.0 - fx) * fy,
        fx * fy,
    ];
    let mut acc = [0.0f32; 3];
    for (&pixel, &w) in corners.iter().zip(weights.iter()) {
        let (r, g, b) = rgb_components(pixel);
        acc[0] += r as f32 * w;
        acc[1] += g as f32 * w;
        acc[2] += b as f32 * w;
    }
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    opaque_rgb(channel(acc[0]), channel(acc[1]), channel(acc[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_bounds_unchanged() {
        assert_eq!(fit_dimensions(800, 600, 1080), (800, 600));
        assert_eq!(fit_dimensions(1080, 1080, 1080), (1080, 1080));
    }

    #[test]
    fn test_fit_landscape() {
        assert_eq!(fit_dimensions(4000, 3000, 1000), (1000, 750));
    }

    #[test]
    fn test_fit_portrait_keeps_orientation() {
        assert_eq!(fit_dimensions(3000, 4000, 1000), (750, 1000));
    }

    #[test]
    fn test_fit_extreme_ratio_keeps_one_pixel() {
        assert_eq!(fit_dimensions(10_000, 2, 100), (100, 1));
    }

    #[test]
    fn test_downscale_uniform_color() {
        let source = PixelBuffer::filled(40, 20, opaque_rgb(10, 200, 90)).unwrap();
        let preview = downscale_to_fit(&source, 10).unwrap();
        assert_eq!((preview.width(), preview.height()), (10, 5));
        assert!(preview.iter().all(|p| p == opaque_rgb(10, 200, 90)));
    }

    #[test]
    fn test_downscale_averages_checker() {
        // 2x2 black/white checker collapses to mid gray
        let pixels = vec![opaque_rgb(0, 0, 0), opaque_rgb(255, 255, 255), opaque_rgb(255, 255, 255), opaque_rgb(0, 0, 0)];
        let source = PixelBuffer::new(2, 2, pixels).unwrap();
        let preview = downscale_to_fit(&source, 1).unwrap();
        assert_eq!(rgb_components(preview.get(0, 0).unwrap()), (128, 128, 128));
    }

    #[test]
    fn test_downscale_small_image_copies() {
        let source = PixelBuffer::filled(3, 3, opaque_rgb(1, 2, 3)).unwrap();
        let preview = downscale_to_fit(&source, 100).unwrap();
        assert_eq!(preview, source);
    }

    #[test]
    fn test_zero_max_side_rejected() {
        let source = PixelBuffer::filled(3, 3, 0).unwrap();
        assert!(downscale_to_fit(&source, 0).is_err());
    }
}
