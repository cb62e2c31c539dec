use crate::foundation::error::{GiltError, GiltResult};

pub use kurbo::{Point, Vec2};

/// Milliseconds on a controller clock.
pub type Millis = u64;

/// Absolute 0-based frame index in render timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> GiltResult<Self> {
        if start.0 > end.0 {
            return Err(GiltError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Iterate the frame indices of the range in increasing order.
    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> GiltResult<Self> {
        if den == 0 {
            return Err(GiltError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GiltError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Timestamp of the start of `frame`, floored to whole milliseconds.
    pub fn frame_to_millis(self, frame: FrameIndex) -> Millis {
        let ms = u128::from(frame.0) * 1000 * u128::from(self.den) / u128::from(self.num);
        Millis::try_from(ms).unwrap_or(Millis::MAX)
    }

    /// Number of frames needed to cover `ms` milliseconds (ceil).
    pub fn millis_to_frames_ceil(self, ms: Millis) -> u64 {
        let num = u128::from(ms) * u128::from(self.num);
        let den = 1000 * u128::from(self.den);
        u64::try_from(num.div_ceil(den)).unwrap_or(u64::MAX)
    }

    /// Frame containing the timestamp `ms` (floor).
    pub fn millis_to_frame_floor(self, ms: Millis) -> FrameIndex {
        let num = u128::from(ms) * u128::from(self.num);
        let den = 1000 * u128::from(self.den);
        FrameIndex(u64::try_from(num / den).unwrap_or(u64::MAX))
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated, non-empty canvas.
    pub fn new(width: u32, height: u32) -> GiltResult<Self> {
        if width == 0 || height == 0 {
            return Err(GiltError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Scale factor relative to the 720px-tall reference layout.
    pub fn layout_scale(self) -> f64 {
        f64::from(self.height) / 720.0
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
