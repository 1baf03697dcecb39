use std::path::Path;

use crate::{
    animation::{easing::EasingSpec, spring::SpringConfig},
    foundation::{
        core::{Fps, Point, Rect, Rgba8, Viewport},
        error::{MotionError, MotionResult},
    },
    scene::model::Style,
};

/// Width and height the built-in layouts are authored against.
pub const DESIGN_VIEWPORT: Viewport = Viewport {
    width: 1280,
    height: 720,
};

/// Immutable configuration shared by every built-in composition.
///
/// Built-in layouts are authored in [`DESIGN_VIEWPORT`] pixels and scaled to `viewport`. Timings
/// are in frames and do not scale with `fps`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    pub viewport: Viewport,
    pub fps: Fps,
    pub palette: Palette,
    pub timing: Timing,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgba8,
    pub surface: Rgba8,
    pub outline: Rgba8,
    pub text: Rgba8,
    pub muted: Rgba8,
    pub accent: Rgba8,
    pub highlight: Rgba8,
    pub server: Rgba8,
    pub client: Rgba8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Scene crossfade length in frames.
    pub scene_crossfade: u64,
    /// Phase entry/exit ramp length in frames.
    pub phase_ramp: u64,
    pub fade_frames: i64,
    pub slide_distance: f64,
    pub from_scale: f64,
    pub draw_frames: i64,
    pub pulse_frames: i64,
    pub pulse_radius: f64,
    pub spring: SpringConfig,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            viewport: DESIGN_VIEWPORT,
            fps: Fps::integer(30),
            palette: Palette::default(),
            timing: Timing::default(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(15, 23, 42),
            surface: Rgba8::rgb(30, 41, 59),
            outline: Rgba8::rgb(100, 116, 139),
            text: Rgba8::rgb(226, 232, 240),
            muted: Rgba8::rgb(148, 163, 184),
            accent: Rgba8::rgb(56, 189, 248),
            highlight: Rgba8::rgb(250, 204, 21),
            server: Rgba8::rgb(167, 139, 250),
            client: Rgba8::rgb(52, 211, 153),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            scene_crossfade: 20,
            phase_ramp: 10,
            fade_frames: 15,
            slide_distance: 40.0,
            from_scale: 0.6,
            draw_frames: 20,
            pulse_frames: 30,
            pulse_radius: 60.0,
            spring: SpringConfig::default(),
        }
    }
}

impl Theme {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let theme: Self =
            serde_json::from_str(s).map_err(|e| MotionError::serde(format!("theme json: {e}")))?;
        theme.validate()?;
        Ok(theme)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MotionError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.viewport.validate()?;
        self.fps.validate()?;
        self.timing.spring.validate()?;
        let t = &self.timing;
        if t.fade_frames <= 0
            || t.draw_frames <= 0
            || t.pulse_frames <= 0
            || t.phase_ramp == 0
            || t.scene_crossfade == 0
        {
            return Err(MotionError::validation(
                "theme timing frame counts must be > 0",
            ));
        }
        if !t.slide_distance.is_finite() || !t.pulse_radius.is_finite() || t.pulse_radius < 0.0 {
            return Err(MotionError::validation(
                "theme slide_distance/pulse_radius must be finite (radius >= 0)",
            ));
        }
        if !t.from_scale.is_finite() || t.from_scale <= 0.0 || t.from_scale > 1.0 {
            return Err(MotionError::validation(
                "theme from_scale must be within (0, 1]",
            ));
        }
        Ok(())
    }

    pub fn easing(&self) -> EasingSpec {
        EasingSpec::Spring(self.timing.spring)
    }

    /// Map a point authored in [`DESIGN_VIEWPORT`] pixels into the theme viewport.
    pub fn point(&self, x: f64, y: f64) -> Point {
        let (sx, sy) = self.design_scale();
        Point::new(x * sx, y * sy)
    }

    pub fn rect(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::from_points(self.point(x0, y0), self.point(x1, y1))
    }

    /// Uniform length scale (the smaller axis factor).
    pub fn length(&self, v: f64) -> f64 {
        let (sx, sy) = self.design_scale();
        v * sx.min(sy)
    }

    pub fn surface_style(&self) -> Style {
        Style {
            stroke: Some(self.palette.outline),
            stroke_width: 2.0,
            ..Style::solid(self.palette.surface, self.palette.highlight)
        }
    }

    pub fn text_style(&self) -> Style {
        Style::solid(self.palette.text, self.palette.highlight)
    }

    pub fn line_style(&self) -> Style {
        Style::stroked(self.palette.muted, 3.0, self.palette.highlight)
    }

    fn design_scale(&self) -> (f64, f64) {
        (
            f64::from(self.viewport.width) / f64::from(DESIGN_VIEWPORT.width),
            f64::from(self.viewport.height) / f64::from(DESIGN_VIEWPORT.height),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/theme.rs"]
mod tests;
