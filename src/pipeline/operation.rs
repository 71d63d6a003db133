//! Pixel operations and their fusion.
//!
//! A [`PixelOperation`] maps one packed pixel to another. Operations that are
//! pointwise (output depends only on the input pixel) can be fused: running
//! `A` then `B` over a buffer equals running `Fused(A, B)` once.

use std::fmt;
use std::sync::Arc;

use crate::filters::color_math::{grayscale_average, grayscale_threshold, isolate_channel, negate, shift_channel};
use crate::filters::pixel::Channel;

/// A deterministic, side-effect-free pixel transform.
///
/// Implementations must be `Send + Sync` so a pass can be split across
/// threads.
pub trait PixelOperation: Send + Sync + fmt::Debug {
    /// Transform a single packed pixel.
    fn apply(&self, pixel: u32) -> u32;

    /// Whether the output depends only on the input pixel.
    fn is_pointwise(&self) -> bool {
        true
    }

    /// Whether `self` followed by `next` can run as one pass.
    fn can_fuse_with(&self, next: &dyn PixelOperation) -> bool {
        self.is_pointwise() && next.is_pointwise()
    }

    /// Number of original operations this one stands for.
    fn stages(&self) -> usize {
        1
    }
}

/// Shared handle to an operation.
pub type SharedOperation = Arc<dyn PixelOperation>;

// ============================================================================
// Color operations
// ============================================================================

/// The closed set of color operations a filter can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorOperation {
    Negate,
    GrayscaleAverage,
    GrayscaleThreshold,
    ShiftChannel { channel: Channel, delta: i32 },
    IsolateChannel(Channel),
}

impl PixelOperation for ColorOperation {
    #[inline]
    fn apply(&self, pixel: u32) -> u32 {
        match *self {
            ColorOperation::Negate => negate(pixel),
            ColorOperation::GrayscaleAverage => grayscale_average(pixel),
            ColorOperation::GrayscaleThreshold => grayscale_threshold(pixel),
            ColorOperation::ShiftChannel { channel, delta } => shift_channel(pixel, channel, delta),
            ColorOperation::IsolateChannel(channel) => isolate_channel(pixel, channel),
        }
    }
}

// ============================================================================
// Fusion
// ============================================================================

/// Two operations run back to back on each pixel.
///
/// Holds shared handles to both halves; neither is modified.
#[derive(Clone)]
pub struct Fused {
    first: SharedOperation,
    second: SharedOperation,
}

impl Fused {
    pub fn new(first: SharedOperation, second: SharedOperation) -> Self {
        Self { first, second }
    }
}

impl fmt::Debug for Fused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fused").field(&self.first).field(&self.second).finish()
    }
}

impl PixelOperation for Fused {
    #[inline]
    fn apply(&self, pixel: u32) -> u32 {
        self.second.apply(self.first.apply(pixel))
    }

    fn is_pointwise(&self) -> bool {
        self.first.is_pointwise() && self.second.is_pointwise()
    }

    fn stages(&self) -> usize {
        self.first.stages() + self.second.stages()
    }
}

/// Compose `first` then `second` into a new shared operation.
pub fn fuse(first: SharedOperation, second: SharedOperation) -> SharedOperation {
    Arc::new(Fused::new(first, second))
}
