//! Pure `frame -> state` timing primitives.
//!
//! Every function here is referentially transparent: the result depends only on the arguments.
//! Frames outside a primitive's window clamp to the nearest boundary state.

use crate::{
    animation::easing::Easing,
    foundation::{
        core::{Affine, Fps, Point, Vec2},
        error::{MotionError, MotionResult},
        math::{clamp01, interpolate, lerp},
    },
};

/// Linear 0 -> 1 ramp over `[start_at, start_at + duration]`.
///
/// A non-positive `duration` degenerates to a step at `start_at`.
pub fn fade_in(frame: i64, start_at: i64, duration: i64) -> f64 {
    if duration <= 0 {
        return if frame >= start_at { 1.0 } else { 0.0 };
    }
    let elapsed = frame.saturating_sub(start_at) as f64;
    clamp01(elapsed / duration as f64)
}

/// Linear 1 -> 0 ramp over `[start_at, start_at + duration]`.
pub fn fade_out(frame: i64, start_at: i64, duration: i64) -> f64 {
    1.0 - fade_in(frame, start_at, duration)
}

/// Linear path-drawing progress; same ramp as [`fade_in`].
pub fn draw_progress(frame: i64, start_at: i64, duration: i64) -> f64 {
    fade_in(frame, start_at, duration)
}

fn elapsed(frame: i64, start_at: i64) -> f64 {
    frame.saturating_sub(start_at) as f64
}

fn check_frames(v: i64, what: &str) -> MotionResult<()> {
    if v <= 0 {
        return Err(MotionError::validation(format!("{what} must be > 0")));
    }
    Ok(())
}

fn check_finite(v: f64, what: &str) -> MotionResult<()> {
    if !v.is_finite() {
        return Err(MotionError::validation(format!("{what} must be finite")));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideUp {
    pub start_at: i64,
    /// Length of the opacity ramp.
    pub fade_frames: i64,
    /// Initial downward offset in pixels.
    pub distance: f64,
}

impl SlideUp {
    pub const DEFAULT_FADE_FRAMES: i64 = 15;
    pub const DEFAULT_DISTANCE: f64 = 40.0;

    pub fn at(start_at: i64) -> Self {
        Self {
            start_at,
            fade_frames: Self::DEFAULT_FADE_FRAMES,
            distance: Self::DEFAULT_DISTANCE,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        check_frames(self.fade_frames, "slide_up fade_frames")?;
        check_finite(self.distance, "slide_up distance")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideState {
    pub opacity: f64,
    pub translate_y: f64,
}

/// Fade in while a spring (or any [`Easing`]) pulls the offset from `distance` to 0.
pub fn slide_up<E: Easing + ?Sized>(
    frame: i64,
    fps: Fps,
    params: &SlideUp,
    easing: &E,
) -> SlideState {
    let p = easing.evaluate(elapsed(frame, params.start_at), fps);
    SlideState {
        opacity: fade_in(frame, params.start_at, params.fade_frames),
        translate_y: params.distance * (1.0 - p),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleIn {
    pub start_at: i64,
    pub fade_frames: i64,
    /// Initial scale; the lower bound of the output scale.
    pub from_scale: f64,
}

impl ScaleIn {
    pub const DEFAULT_FADE_FRAMES: i64 = 15;
    pub const DEFAULT_FROM_SCALE: f64 = 0.6;

    pub fn at(start_at: i64) -> Self {
        Self {
            start_at,
            fade_frames: Self::DEFAULT_FADE_FRAMES,
            from_scale: Self::DEFAULT_FROM_SCALE,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        check_frames(self.fade_frames, "scale_in fade_frames")?;
        if !self.from_scale.is_finite() || self.from_scale <= 0.0 || self.from_scale > 1.0 {
            return Err(MotionError::validation(
                "scale_in from_scale must be within (0, 1]",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleState {
    pub opacity: f64,
    pub scale: f64,
}

/// Fade in while the scale eases from `from_scale` to 1.
pub fn scale_in<E: Easing + ?Sized>(
    frame: i64,
    fps: Fps,
    params: &ScaleIn,
    easing: &E,
) -> ScaleState {
    let p = clamp01(easing.evaluate(elapsed(frame, params.start_at), fps));
    let scale = lerp(params.from_scale, 1.0, p).clamp(params.from_scale.min(1.0), 1.0);
    ScaleState {
        opacity: fade_in(frame, params.start_at, params.fade_frames),
        scale,
    }
}

/// Camera zoom toward `focal` between `start_at` and `end_at`, then back out.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoomTo {
    pub start_at: i64,
    pub end_at: i64,
    pub target_scale: f64,
    pub focal: Point,
}

impl ZoomTo {
    pub fn validate(&self) -> MotionResult<()> {
        if self.end_at <= self.start_at {
            return Err(MotionError::validation("zoom_to end_at must be > start_at"));
        }
        if !self.target_scale.is_finite() || self.target_scale <= 0.0 {
            return Err(MotionError::validation(
                "zoom_to target_scale must be finite and > 0",
            ));
        }
        check_finite(self.focal.x, "zoom_to focal.x")?;
        check_finite(self.focal.y, "zoom_to focal.y")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoomState {
    pub scale: f64,
    pub translate: Vec2,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomState {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    /// Outer transform: translate by `translate`, then scale about `center`.
    ///
    /// At `scale == 1` (where `translate` is zero) this is the identity.
    pub fn to_affine(self, center: Point) -> Affine {
        Affine::translate(center.to_vec2())
            * Affine::scale(self.scale)
            * Affine::translate(self.translate - center.to_vec2())
    }
}

/// Three-phase zoom: rest before `start_at`, ease to `target_scale` until `end_at`, then ease
/// back to 1 starting from the scale reached at `end_at`.
///
/// `translate = (center - focal) * t` with `t = (scale - 1) / (target_scale - 1)`; `t` is forced
/// to 0 when `target_scale == 1`.
pub fn zoom_to<E: Easing + ?Sized>(
    frame: i64,
    fps: Fps,
    params: &ZoomTo,
    viewport_center: Point,
    easing: &E,
) -> ZoomState {
    let target = params.target_scale;
    let zoom_in = |f: i64| lerp(1.0, target, easing.evaluate(elapsed(f, params.start_at), fps));

    let scale = if frame < params.start_at {
        1.0
    } else if frame < params.end_at {
        zoom_in(frame)
    } else {
        let peak = zoom_in(params.end_at);
        lerp(peak, 1.0, easing.evaluate(elapsed(frame, params.end_at), fps))
    };

    let span = target - 1.0;
    let t = if span == 0.0 {
        0.0
    } else {
        clamp01((scale - 1.0) / span)
    };
    ZoomState {
        scale,
        translate: (viewport_center - params.focal) * t,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PulseRing {
    pub start_at: i64,
    pub duration: i64,
    pub max_radius: f64,
    /// Opacity at onset; halves by the midpoint and reaches 0 at the end.
    pub peak_opacity: f64,
}

impl PulseRing {
    pub const DEFAULT_MAX_RADIUS: f64 = 60.0;
    pub const DEFAULT_PEAK_OPACITY: f64 = 0.8;

    pub fn new(start_at: i64, duration: i64) -> Self {
        Self {
            start_at,
            duration,
            max_radius: Self::DEFAULT_MAX_RADIUS,
            peak_opacity: Self::DEFAULT_PEAK_OPACITY,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        check_frames(self.duration, "pulse_ring duration")?;
        if !self.max_radius.is_finite() || self.max_radius < 0.0 {
            return Err(MotionError::validation(
                "pulse_ring max_radius must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.peak_opacity) {
            return Err(MotionError::validation(
                "pulse_ring peak_opacity must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PulseState {
    pub radius: f64,
    pub opacity: f64,
}

/// One-shot expanding ring; `{0, 0}` outside `[start_at, start_at + duration]`.
pub fn pulse_ring(frame: i64, params: &PulseRing) -> PulseState {
    let end = params.start_at.saturating_add(params.duration);
    if params.duration <= 0 || frame < params.start_at || frame > end {
        return PulseState::default();
    }

    let progress = fade_in(frame, params.start_at, params.duration);
    let peak = params.peak_opacity.clamp(0.0, 1.0);
    PulseState {
        radius: (params.max_radius * progress).clamp(0.0, params.max_radius.max(0.0)),
        opacity: clamp01(interpolate(progress, &[0.0, 0.5, 1.0], &[peak, peak * 0.5, 0.0])),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/primitives.rs"]
mod tests;
