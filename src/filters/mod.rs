//! Filter definitions and per-pixel color math.
//!
//! ## Pixel Format
//!
//! Pixels are packed `u32` values in `0xAARRGGBB` order:
//!
//! | Bits | Channel |
//! |------|---------|
//! | 24-31 | Alpha (always written as 255) |
//! | 16-23 | Red |
//! | 8-15 | Green |
//! | 0-7 | Blue |
//!
//! ## Filters
//!
//! | Filter | Operation |
//! |--------|-----------|
//! | Negative | [`color_math::negate`] |
//! | BlackAndWhite | [`color_math::grayscale_average`] |
//! | HardBlackAndWhite | [`color_math::grayscale_threshold`] |
//! | ChangeIntensity | [`color_math::shift_channel`] |
//! | LeaveAlone | [`color_math::isolate_channel`] |
//!
//! All filters are pointwise, so any sequence of them fuses into one pass.

pub mod pixel;
pub mod color_math;
pub mod catalog;
pub mod sequence;
