//! Image buffers of packed pixels.
//!
//! [`PixelBuffer`] holds a `(height, width)` array of `0xAARRGGBB` pixels in
//! row-major order. Buffers are never empty: both dimensions are at least 1.
//!
//! ## RGBA Interop
//!
//! Images arriving as `(height, width, channels)` u8 arrays can be converted
//! with [`PixelBuffer::from_rgba_u8`]:
//! - **Grayscale**: (height, width, 1) - value replicated to R, G and B
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - alpha dropped, every pixel is opaque

use ndarray::{Array2, Array3, ArrayView1, ArrayView2, ArrayView3};

use crate::error::{PipelineError, PipelineResult};
use crate::filters::pixel::{opaque_rgb, rgb_components};

/// Empty pixel vector with room for `len` pixels, reporting failure instead of aborting.
fn reserve_pixels(len: usize) -> PipelineResult<Vec<u32>> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| PipelineError::AllocationFailure { pixels: len })?;
    Ok(pixels)
}

/// Zeroed pixel vector of length `len`.
pub(crate) fn allocate_pixels(len: usize) -> PipelineResult<Vec<u32>> {
    let mut pixels = reserve_pixels(len)?;
    pixels.resize(len, 0);
    Ok(pixels)
}

/// Pixel count for a shape, rejecting zero sides and overflow.
fn checked_len(width: usize, height: usize, supplied: usize) -> PipelineResult<usize> {
    if width == 0 || height == 0 {
        return Err(PipelineError::dimension(width, height, supplied));
    }
    width
        .checked_mul(height)
        .ok_or_else(|| PipelineError::dimension(width, height, supplied))
}

/// A width x height grid of packed pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array2<u32>,
}

impl PixelBuffer {
    /// Build a buffer from row-major pixels.
    ///
    /// Fails with [`PipelineError::InvalidDimension`] if either side is zero
    /// or `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u32>) -> PipelineResult<Self> {
        let len = checked_len(width, height, pixels.len())?;
        if pixels.len() != len {
            return Err(PipelineError::dimension(width, height, pixels.len()));
        }
        let data = Array2::from_shape_vec((height, width), pixels)
            .map_err(|_| PipelineError::dimension(width, height, len))?;
        Ok(Self { data })
    }

    /// Buffer with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: u32) -> PipelineResult<Self> {
        let len = checked_len(width, height, 0)?;
        let mut pixels = allocate_pixels(len)?;
        pixels.fill(pixel);
        Self::new(width, height, pixels)
    }

    /// Wrap an existing `(height, width)` array.
    ///
    /// Arrays that are not row-major, or that start part way into a larger
    /// allocation (e.g. after `slice_move`), are copied into fresh storage.
    pub fn from_array(data: Array2<u32>) -> PipelineResult<Self> {
        let (height, width) = data.dim();
        let len = checked_len(width, height, data.len())?;
        if !data.is_standard_layout() {
            let mut pixels = reserve_pixels(len)?;
            pixels.extend(data.iter().copied());
            return Self::new(width, height, pixels);
        }

        let (pixels, offset) = data.into_raw_vec_and_offset();
        match offset {
            Some(0) if pixels.len() == len => Self::new(width, height, pixels),
            Some(start) => {
                let window = start
                    .checked_add(len)
                    .and_then(|end| pixels.get(start..end))
                    .ok_or_else(|| PipelineError::dimension(width, height, pixels.len()))?;
                let mut owned = reserve_pixels(len)?;
                owned.extend_from_slice(window);
                Self::new(width, height, owned)
            }
            None => Err(PipelineError::dimension(width, height, 0)),
        }
    }

    /// Copy into freshly allocated storage.
    pub fn try_clone(&self) -> PipelineResult<Self> {
        let mut pixels = reserve_pixels(self.len())?;
        pixels.extend(self.data.iter().copied());
        Self::new(self.width(), self.height(), pixels)
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed buffer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.data.get((y, x)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, u32> {
        self.data.view()
    }

    pub(crate) fn row(&self, y: usize) -> ArrayView1<'_, u32> {
        self.data.row(y)
    }

    /// Pixels in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.data.iter().copied()
    }

    pub fn into_array(self) -> Array2<u32> {
        self.data
    }

    /// Consume the buffer, returning row-major pixels.
    ///
    /// Storage is always standard layout starting at offset 0, so the raw
    /// vector holds exactly `width * height` pixels.
    pub fn into_pixels(self) -> Vec<u32> {
        self.data.into_raw_vec_and_offset().0
    }

    // ========================================================================
    // RGBA conversion
    // ========================================================================

    /// Pack a `(height, width, channels)` u8 image.
    pub fn from_rgba_u8(input: ArrayView3<u8>) -> PipelineResult<Self> {
        let (height, width, channels) = input.dim();
        if !matches!(channels, 1 | 3 | 4) {
            return Err(PipelineError::UnsupportedChannels { channels });
        }
        let len = checked_len(width, height, width.saturating_mul(height))?;
        let mut pixels = reserve_pixels(len)?;

        for y in 0..height {
            for x in 0..width {
                let pixel = if channels == 1 {
                    let v = input[[y, x, 0]];
                    opaque_rgb(v, v, v)
                } else {
                    opaque_rgb(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]])
                };
                pixels.push(pixel);
            }
        }
        Self::new(width, height, pixels)
    }

    /// Unpack to a `(height, width, 4)` u8 RGBA image.
    pub fn to_rgba_u8(&self) -> Array3<u8> {
        let (height, width) = self.data.dim();
        let mut output = Array3::<u8>::zeros((height, width, 4));

        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = rgb_components(self.data[[y, x]]);
                output[[y, x, 0]] = r;
                output[[y, x, 1]] = g;
                output[[y, x, 2]] = b;
                output[[y, x, 3]] = 255;
            }
        }
        output
    }
}
