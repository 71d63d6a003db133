//! Error types for the filter pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur while building buffers or running a pipeline.
///
/// Color math itself is total; everything here is about buffer shape,
/// memory, or malformed input at the binding boundary.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Zero-sized buffer, overflowing size, or pixel count not matching the shape.
    #[error("invalid buffer dimensions: {width}x{height} with {len} pixels")]
    InvalidDimension {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
        /// Number of pixels actually supplied.
        len: usize,
    },

    /// A destination buffer could not be allocated.
    #[error("failed to allocate a buffer of {pixels} pixels")]
    AllocationFailure {
        /// Number of pixels requested.
        pixels: usize,
    },

    /// RGBA interop received an array with an unsupported channel count.
    #[error("unsupported channel count: {channels} (expected 1, 3 or 4)")]
    UnsupportedChannels {
        /// Channel count of the rejected array.
        channels: usize,
    },

    /// A JSON filter list could not be parsed.
    #[error("invalid filter list: {0}")]
    InvalidFilterList(#[from] serde_json::Error),
}

impl PipelineError {
    pub(crate) fn dimension(width: usize, height: usize, len: usize) -> Self {
        Self::InvalidDimension { width, height, len }
    }
}
