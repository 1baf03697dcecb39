//! Closed-form damped spring.
//!
//! The spring starts at rest at 0 and is pulled toward 1. Progress is a pure function of elapsed
//! time, so any frame can be sampled without simulating the frames before it.

use std::f64::consts::PI;

use crate::foundation::{
    core::Fps,
    error::{MotionError, MotionResult},
};

/// Physical parameters of a unit spring (`m x'' + c x' + k (x - 1) = 0`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Mass `m`.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Stiffness `k`.
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Damping coefficient `c`.
    #[serde(default = "default_damping")]
    pub damping: f64,
}

fn default_mass() -> f64 {
    1.0
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_damping() -> f64 {
    20.0
}

impl Default for SpringConfig {
    /// Critically damped: `1, 100, 20`. Settles within [`crate::SETTLE_EPSILON`] after roughly
    /// 23 frames at 30 fps.
    fn default() -> Self {
        Self {
            mass: default_mass(),
            stiffness: default_stiffness(),
            damping: default_damping(),
        }
    }
}

impl SpringConfig {
    pub fn new(mass: f64, stiffness: f64, damping: f64) -> MotionResult<Self> {
        let cfg = Self {
            mass,
            stiffness,
            damping,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(MotionError::validation("spring mass must be finite and > 0"));
        }
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(MotionError::validation(
                "spring stiffness must be finite and > 0",
            ));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(MotionError::validation(
                "spring damping must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Undamped angular frequency `w0 = sqrt(k / m)`.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio `zeta = c / (2 sqrt(k m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

const CRITICAL_TOLERANCE: f64 = 1e-6;

/// Spring progress after `elapsed_frames` at `fps`.
///
/// Returns 0 for `elapsed_frames <= 0` and a value in `[0, 1]` that never decreases as
/// `elapsed_frames` grows. Under-damped springs hold at 1 from their first crossing of the target
/// instead of overshooting.
pub fn spring_progress(elapsed_frames: f64, fps: Fps, cfg: &SpringConfig) -> f64 {
    if elapsed_frames.is_nan() || elapsed_frames <= 0.0 {
        return 0.0;
    }
    if elapsed_frames.is_infinite() {
        return 1.0;
    }

    let t = fps.frames_to_secs(elapsed_frames);
    let w0 = cfg.natural_frequency();
    let zeta = cfg.damping_ratio();

    let x = if (zeta - 1.0).abs() <= CRITICAL_TOLERANCE {
        1.0 - (-w0 * t).exp() * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        let decay = zeta * w0;
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let first_crossing = (PI - wd.atan2(decay)) / wd;
        if t >= first_crossing {
            1.0
        } else {
            1.0 - (-decay * t).exp() * ((wd * t).cos() + (decay / wd) * (wd * t).sin())
        }
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r_slow = -w0 * (zeta - root);
        let r_fast = -w0 * (zeta + root);
        1.0 - (r_fast * (r_slow * t).exp() - r_slow * (r_fast * t).exp()) / (r_fast - r_slow)
    };

    x.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
