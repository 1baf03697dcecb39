use crate::{
    animation::{
        ease::{Ease, cubic_bezier},
        spring::{SpringConfig, spring_progress},
    },
    foundation::{
        core::Fps,
        error::{MotionError, MotionResult},
        math::clamp01,
    },
};

/// Distance from 1 under which an eased value counts as settled.
pub const SETTLE_EPSILON: f64 = 0.005;

const MAX_SETTLE_FRAMES: u64 = 1 << 20;

/// Progress strategy driving spring-style primitives.
///
/// Implementations map elapsed frames to progress in `[0, 1]`: 0 at or before zero elapsed
/// frames, never decreasing afterwards. They must be pure so frames can be sampled in any order.
pub trait Easing: Send + Sync {
    /// Progress after `elapsed_frames` (may be fractional or negative).
    fn evaluate(&self, elapsed_frames: f64, fps: Fps) -> f64;

    /// Smallest whole number of elapsed frames after which progress stays within `epsilon` of 1.
    ///
    /// Saturates at 2^20 frames for curves that never get that close.
    fn settle_frames(&self, fps: Fps, epsilon: f64) -> u64 {
        let target = 1.0 - epsilon.clamp(0.0, 1.0);
        let settled = |n: u64| self.evaluate(n as f64, fps) >= target;
        if settled(0) {
            return 0;
        }

        let mut hi = 1u64;
        while !settled(hi) {
            if hi >= MAX_SETTLE_FRAMES {
                return MAX_SETTLE_FRAMES;
            }
            hi *= 2;
        }
        let mut lo = hi / 2;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if settled(mid) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        hi
    }

    fn has_settled(&self, elapsed_frames: f64, fps: Fps, epsilon: f64) -> bool {
        self.evaluate(elapsed_frames, fps) >= 1.0 - epsilon.clamp(0.0, 1.0)
    }
}

impl Easing for SpringConfig {
    fn evaluate(&self, elapsed_frames: f64, fps: Fps) -> f64 {
        spring_progress(elapsed_frames, fps, self)
    }
}

/// CSS-style cubic bezier over a fixed number of frames.
///
/// Control-point ordinates are restricted to `[0, 1]` so the curve cannot leave the unit range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub duration_frames: f64,
}

impl CubicBezier {
    /// CSS `ease-in-out` over `duration_frames`.
    pub fn ease_in_out(duration_frames: f64) -> Self {
        Self {
            x1: 0.42,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
            duration_frames,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        for (name, v) in [
            ("x1", self.x1),
            ("y1", self.y1),
            ("x2", self.x2),
            ("y2", self.y2),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(MotionError::validation(format!(
                    "cubic bezier {name} must be within [0, 1]"
                )));
            }
        }
        validate_duration(self.duration_frames, "cubic bezier")
    }
}

impl Easing for CubicBezier {
    fn evaluate(&self, elapsed_frames: f64, _fps: Fps) -> f64 {
        if elapsed_frames.is_nan() || elapsed_frames <= 0.0 {
            return 0.0;
        }
        let t = elapsed_frames / self.duration_frames;
        clamp01(cubic_bezier(t, self.x1, self.y1, self.x2, self.y2))
    }
}

/// `1 - 0.5^(elapsed / half_life)`: fast start, asymptotic tail.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExponentialDecay {
    pub half_life_frames: f64,
}

impl ExponentialDecay {
    pub fn validate(&self) -> MotionResult<()> {
        validate_duration(self.half_life_frames, "exponential decay half_life_frames")
    }
}

impl Easing for ExponentialDecay {
    fn evaluate(&self, elapsed_frames: f64, _fps: Fps) -> f64 {
        if elapsed_frames.is_nan() || elapsed_frames <= 0.0 {
            return 0.0;
        }
        clamp01(1.0 - 0.5f64.powf(elapsed_frames / self.half_life_frames))
    }
}

/// A classic [`Ease`] stretched over `duration_frames`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Curve {
    pub ease: Ease,
    pub duration_frames: f64,
}

impl Curve {
    pub fn validate(&self) -> MotionResult<()> {
        validate_duration(self.duration_frames, "curve")
    }
}

impl Easing for Curve {
    fn evaluate(&self, elapsed_frames: f64, _fps: Fps) -> f64 {
        if elapsed_frames.is_nan() || elapsed_frames <= 0.0 {
            return 0.0;
        }
        self.ease.apply(elapsed_frames / self.duration_frames)
    }
}

fn validate_duration(v: f64, what: &str) -> MotionResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(MotionError::validation(format!(
            "{what} duration must be finite and > 0"
        )));
    }
    Ok(())
}

/// Serializable choice of [`Easing`] strategy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EasingSpec {
    Spring(SpringConfig),
    CubicBezier(CubicBezier),
    Exponential(ExponentialDecay),
    Curve(Curve),
}

impl Default for EasingSpec {
    fn default() -> Self {
        Self::Spring(SpringConfig::default())
    }
}

impl EasingSpec {
    pub fn validate(&self) -> MotionResult<()> {
        match self {
            Self::Spring(cfg) => cfg.validate(),
            Self::CubicBezier(b) => b.validate(),
            Self::Exponential(e) => e.validate(),
            Self::Curve(c) => c.validate(),
        }
    }
}

impl Easing for EasingSpec {
    fn evaluate(&self, elapsed_frames: f64, fps: Fps) -> f64 {
        match self {
            Self::Spring(cfg) => cfg.evaluate(elapsed_frames, fps),
            Self::CubicBezier(b) => b.evaluate(elapsed_frames, fps),
            Self::Exponential(e) => e.evaluate(elapsed_frames, fps),
            Self::Curve(c) => c.evaluate(elapsed_frames, fps),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/easing.rs"]
mod tests;
