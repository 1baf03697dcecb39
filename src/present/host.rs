use smallvec::SmallVec;

use crate::foundation::{
    core::{ColorStop, FrameIndex, Point, Rect, Rgba8, Viewport},
    error::MotionResult,
};

/// What a paint call draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rect,
    Circle,
    Line,
    Path,
    Text,
    /// Pulse ring around a highlighted element.
    Ring,
}

/// Geometry in output pixels, with the element transform already applied.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    Rect { rect: Rect, corner_radius: f64 },
    Circle { center: Point, radius: f64 },
    /// Stroked polyline; partially drawn shapes are emitted as their trimmed outline.
    Polyline { points: Vec<Point>, closed: bool },
    Text { origin: Point, text: String, size_px: f64 },
}

/// Resolved paint style. Colors are straight alpha; `opacity` applies on top.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaintStyle {
    pub fill: SmallVec<[ColorStop; 2]>,
    pub stroke: Option<Rgba8>,
    pub stroke_width: f64,
    pub opacity: f64,
}

/// Host side of the presentation contract.
///
/// [`crate::present`] calls `begin_frame` once and then `paint` once per visible element (plus
/// one [`ShapeKind::Ring`] per visible pulse ring), in declaration order.
pub trait PaintHost {
    fn begin_frame(&mut self, _viewport: Viewport, _frame: FrameIndex) -> MotionResult<()> {
        Ok(())
    }

    fn paint(&mut self, shape: ShapeKind, geometry: &Geometry, style: &PaintStyle)
    -> MotionResult<()>;
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaintCall {
    pub shape: ShapeKind,
    pub geometry: Geometry,
    pub style: PaintStyle,
}

/// [`PaintHost`] that records every call; used by the CLI and by tests.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PaintList {
    pub viewport: Option<Viewport>,
    pub frame: Option<FrameIndex>,
    pub calls: Vec<PaintCall>,
}

impl PaintList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, shape: ShapeKind) -> usize {
        self.calls.iter().filter(|c| c.shape == shape).count()
    }
}

impl PaintHost for PaintList {
    fn begin_frame(&mut self, viewport: Viewport, frame: FrameIndex) -> MotionResult<()> {
        self.viewport = Some(viewport);
        self.frame = Some(frame);
        self.calls.clear();
        Ok(())
    }

    fn paint(
        &mut self,
        shape: ShapeKind,
        geometry: &Geometry,
        style: &PaintStyle,
    ) -> MotionResult<()> {
        self.calls.push(PaintCall {
            shape,
            geometry: geometry.clone(),
            style: style.clone(),
        });
        Ok(())
    }
}
