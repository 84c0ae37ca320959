use crate::hash::*;

use smallvec::*;

use std::hash::{Hash, Hasher};
use std::collections::hash_map::{DefaultHasher};

///
/// The largest number of entries in a dash pattern
///
pub const MAX_DASHES: usize = 8;

///
/// How the open ends of a stroked contour are finished
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CapKind {
    /// The stroke stops at the end point
    None,

    /// The stroke is extended by half its width with a square end
    Flat,

    /// The stroke is extended by half its width to a point
    Sharp,

    /// The stroke is finished with a semicircle
    Round,
}

///
/// How the corners between segments of a stroked contour are filled in
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum JoinKind {
    /// Corners are left unfilled
    None,

    /// Corners are cut off with a straight line (a bevel)
    Flat,

    /// The outer edges are extended until they meet (a miter)
    Sharp,

    /// Corners are rounded off with an arc
    Round,
}

///
/// Describes how a path should be filled and stroked
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// True if the interior of the path should be filled
    pub fill: bool,

    pub cap: CapKind,

    pub join: JoinKind,

    /// The width of the stroke (0 for no stroke)
    pub width: f32,

    /// Alternating lengths of dashes and gaps (empty for a solid line)
    pub dash_pattern: SmallVec<[f32; MAX_DASHES]>,
}

///
/// The canonical form of a stroke style, used when hashing and comparing styles
///
/// Widths and dash lengths are quantized, so styles that only differ by rounding errors compare as equal.
///
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct QuantizedStyle {
    pub fill:           bool,
    pub cap:            CapKind,
    pub join:           JoinKind,
    pub width:          i32,
    pub dash_pattern:   SmallVec<[i32; MAX_DASHES]>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle {
            fill:           true,
            cap:            CapKind::None,
            join:           JoinKind::None,
            width:          0.0,
            dash_pattern:   smallvec![],
        }
    }
}

impl StrokeStyle {
    ///
    /// A style that fills a path without stroking it
    ///
    pub fn fill() -> StrokeStyle {
        StrokeStyle::default()
    }

    ///
    /// A style that strokes a path with the specified width without filling it
    ///
    pub fn stroke(width: f32) -> StrokeStyle {
        StrokeStyle {
            fill:   false,
            width:  width,
            ..StrokeStyle::default()
        }
    }

    pub fn with_fill(mut self, fill: bool) -> StrokeStyle {
        self.fill = fill;
        self
    }

    pub fn with_width(mut self, width: f32) -> StrokeStyle {
        self.width = width;
        self
    }

    pub fn with_cap(mut self, cap: CapKind) -> StrokeStyle {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: JoinKind) -> StrokeStyle {
        self.join = join;
        self
    }

    ///
    /// Sets the dash pattern for this style (at most `MAX_DASHES` entries are used)
    ///
    pub fn with_dash_pattern(mut self, pattern: impl IntoIterator<Item=f32>) -> StrokeStyle {
        self.dash_pattern = pattern.into_iter().take(MAX_DASHES).collect();
        self
    }

    ///
    /// True if the dash pattern has at least one dash with a length
    ///
    pub fn is_dashed(&self) -> bool {
        !self.dash_pattern.is_empty() && self.dash_pattern.iter().any(|len| *len > 0.0)
    }

    ///
    /// The canonical, quantized encoding of this style
    ///
    pub fn quantized(&self) -> QuantizedStyle {
        QuantizedStyle {
            fill:           self.fill,
            cap:            self.cap,
            join:           self.join,
            width:          quantize(self.width),
            dash_pattern:   self.dash_pattern.iter().copied().map(quantize).collect(),
        }
    }

    ///
    /// Hash of the quantized form of this style
    ///
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.quantized().hash(&mut hasher);

        hasher.finish()
    }

    ///
    /// True if two styles are the same once quantized
    ///
    #[inline]
    pub fn matches(&self, other: &StrokeStyle) -> bool {
        self.quantized() == other.quantized()
    }
}
