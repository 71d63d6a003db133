//! Filter catalog: the user-selectable filters and their operation mapping.
//!
//! Filters are plain values. Each one carries presentation metadata
//! (description, display colors, ordering key) and maps to exactly one
//! [`ColorOperation`].
//!
//! ## JSON form
//!
//! Filters serialize with a `kind` tag so catalogs and filter sequences can be
//! kept as configuration data:
//!
//! ```json
//! [
//!   {"kind": "negative"},
//!   {"kind": "change_intensity", "channel": "red", "delta": 50},
//!   {"kind": "leave_alone", "channel": "blue"}
//! ]
//! ```

use serde::{Deserialize, Serialize};

use super::pixel::Channel;
use crate::error::PipelineResult;
use crate::pipeline::operation::ColorOperation;

/// Intensity step used by the default catalog.
pub const DEFAULT_INTENSITY_DELTA: u8 = 50;

/// Display colors from the application theme (opaque ARGB).
mod palette {
    pub const GRAY: u32 = 0xFF88_8888;
    pub const BLACK: u32 = 0xFF00_0000;
    pub const DARK_GRAY: u32 = 0xFF44_4444;
    pub const WHITE: u32 = 0xFFFF_FFFF;

    pub const HARD_RED: u32 = 0xFFBD_1016;
    pub const HARD_GREEN: u32 = 0xFF23_9909;
    pub const HARD_BLUE: u32 = 0xFF0F_43C7;

    pub const SOFT_RED: u32 = 0xFFAD_373C;
    pub const SOFT_GREEN: u32 = 0xFF57_A047;
    pub const SOFT_BLUE: u32 = 0xFF53_76CE;

    pub const GREY_RED: u32 = 0xFFB3_7D7F;
    pub const GREY_GREEN: u32 = 0xFF83_A27C;
    pub const GREY_BLUE: u32 = 0xFF9A_AAD3;
}

/// A selectable color filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// Average grayscale.
    BlackAndWhite,
    /// Pure black or white by mean threshold.
    HardBlackAndWhite,
    /// Inverted colors.
    Negative,
    /// Add `delta` to one channel; a negative delta decreases it.
    ChangeIntensity { channel: Channel, delta: i32 },
    /// Keep pixels where `channel` dominates, grayscale the rest.
    LeaveAlone { channel: Channel },
}

impl Filter {
    /// Intensity increase on `channel`.
    pub fn increase(channel: Channel, amount: u8) -> Self {
        Filter::ChangeIntensity { channel, delta: amount as i32 }
    }

    /// Intensity decrease on `channel`. Same channel, negated delta.
    pub fn decrease(channel: Channel, amount: u8) -> Self {
        Filter::ChangeIntensity { channel, delta: -(amount as i32) }
    }

    pub fn leave_alone(channel: Channel) -> Self {
        Filter::LeaveAlone { channel }
    }

    /// The operation this filter applies to each pixel.
    pub fn operation(&self) -> ColorOperation {
        match *self {
            Filter::Negative => ColorOperation::Negate,
            Filter::BlackAndWhite => ColorOperation::GrayscaleAverage,
            Filter::HardBlackAndWhite => ColorOperation::GrayscaleThreshold,
            Filter::ChangeIntensity { channel, delta } => ColorOperation::ShiftChannel { channel, delta },
            Filter::LeaveAlone { channel } => ColorOperation::IsolateChannel(channel),
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match *self {
            Filter::BlackAndWhite => "Black and white",
            Filter::HardBlackAndWhite => "Only black and white",
            Filter::Negative => "Negative",
            Filter::ChangeIntensity { channel, delta } => match (channel, delta >= 0) {
                (Channel::Red, true) => "Increase red intensity",
                (Channel::Green, true) => "Increase green intensity",
                (Channel::Blue, true) => "Increase blue intensity",
                (Channel::Red, false) => "Decrease red intensity",
                (Channel::Green, false) => "Decrease green intensity",
                (Channel::Blue, false) => "Decrease blue intensity",
            },
            Filter::LeaveAlone { channel } => match channel {
                Channel::Red => "Leave only red",
                Channel::Green => "Leave only green",
                Channel::Blue => "Leave only blue",
            },
        }
    }

    /// Background color used when presenting the filter.
    pub fn represent_color(&self) -> u32 {
        match *self {
            Filter::BlackAndWhite => palette::GRAY,
            Filter::HardBlackAndWhite => palette::BLACK,
            Filter::Negative => palette::DARK_GRAY,
            Filter::ChangeIntensity { channel, delta } => match (channel, delta >= 0) {
                (Channel::Red, true) => palette::HARD_RED,
                (Channel::Green, true) => palette::HARD_GREEN,
                (Channel::Blue, true) => palette::HARD_BLUE,
                (Channel::Red, false) => palette::SOFT_RED,
                (Channel::Green, false) => palette::SOFT_GREEN,
                (Channel::Blue, false) => palette::SOFT_BLUE,
            },
            Filter::LeaveAlone { channel } => match channel {
                Channel::Red => palette::GREY_RED,
                Channel::Green => palette::GREY_GREEN,
                Channel::Blue => palette::GREY_BLUE,
            },
        }
    }

    /// Foreground color drawn on top of [`Filter::represent_color`].
    pub fn content_color(&self) -> u32 {
        palette::WHITE
    }

    /// Stable ordering key within the catalog.
    pub fn number(&self) -> u32 {
        let channel_index = |channel: Channel| match channel {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        };
        match *self {
            Filter::BlackAndWhite => 1,
            Filter::HardBlackAndWhite => 2,
            Filter::Negative => 3,
            Filter::ChangeIntensity { channel, delta } if delta >= 0 => 4 + channel_index(channel),
            Filter::ChangeIntensity { channel, .. } => 7 + channel_index(channel),
            Filter::LeaveAlone { channel } => 10 + channel_index(channel),
        }
    }
}

/// The filters offered to the user, sorted by [`Filter::number`].
pub fn default_catalog() -> Vec<Filter> {
    let mut filters = vec![Filter::Negative, Filter::BlackAndWhite, Filter::HardBlackAndWhite];
    filters.extend(Channel::ALL.map(|c| Filter::increase(c, DEFAULT_INTENSITY_DELTA)));
    filters.extend(Channel::ALL.map(|c| Filter::decrease(c, DEFAULT_INTENSITY_DELTA)));
    filters.extend(Channel::ALL.map(Filter::leave_alone));
    filters.sort_by_key(Filter::number);
    filters
}

/// Parse a JSON array of filters.
pub fn filters_from_json(json: &str) -> PipelineResult<Vec<Filter>> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize filters as a JSON array.
pub fn filters_to_json(filters: &[Filter]) -> PipelineResult<String> {
    Ok(serde_json::to_string(filters)?)
}
