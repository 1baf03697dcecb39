use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn as_i64(self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> MotionResult<Self> {
        if start.0 > end.0 {
            return Err(MotionError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Shorthand for `FrameRange::new(FrameIndex(start), FrameIndex(end))`.
    pub fn frames(start: u64, end: u64) -> MotionResult<Self> {
        Self::new(FrameIndex(start), FrameIndex(end))
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Signed variant of [`FrameRange::contains`]; negative frames are never contained.
    pub fn contains_i64(self, f: i64) -> bool {
        u64::try_from(f).is_ok_and(|f| self.contains(FrameIndex(f)))
    }

    pub fn clamp(self, f: FrameIndex) -> FrameIndex {
        if self.is_empty() {
            return self.start;
        }
        let max_inclusive = self.end.0.saturating_sub(1);
        FrameIndex(f.0.clamp(self.start.0, max_inclusive))
    }

    /// Clamp a signed host frame into the range.
    pub fn clamp_i64(self, f: i64) -> FrameIndex {
        let f = u64::try_from(f).unwrap_or(0);
        self.clamp(FrameIndex(f))
    }

    /// Number of frames shared by `self` and `other`.
    pub fn overlap_frames(self, other: Self) -> u64 {
        let start = self.start.0.max(other.start.0);
        let end = self.end.0.min(other.end.0);
        end.saturating_sub(start)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> MotionResult<Self> {
        if den == 0 {
            return Err(MotionError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(MotionError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Integer frame rate (`den == 1`).
    pub const fn integer(num: u32) -> Self {
        Self { num, den: 1 }
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Fractional frame counts are allowed; springs sample sub-frame elapsed time.
    pub fn frames_to_secs(self, frames: f64) -> f64 {
        frames * self.frame_duration_secs()
    }

    pub fn validate(self) -> MotionResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }
}

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn validate(self) -> MotionResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MotionError::validation("viewport width/height must be > 0"));
        }
        Ok(())
    }
}

/// Straight-alpha RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Component-wise interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        let t = t.clamp(0.0, 1.0);
        Self {
            r: lerp_u8(self.r, other.r, t),
            g: lerp_u8(self.g, other.g, t),
            b: lerp_u8(self.b, other.b, t),
            a: lerp_u8(self.a, other.a, t),
        }
    }
}

/// One stop of a (possibly single-stop) color ramp.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorStop {
    /// Position along the ramp in `[0, 1]`.
    pub offset: f64,
    pub color: Rgba8,
}

impl ColorStop {
    pub fn solid(color: Rgba8) -> Self {
        Self { offset: 0.0, color }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
