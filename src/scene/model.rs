use std::{io::Read, path::Path};

use smallvec::SmallVec;

use crate::{
    animation::{
        ease::Ease,
        easing::EasingSpec,
        primitives::{PulseRing, ScaleIn, SlideUp, ZoomTo},
    },
    foundation::{
        core::{ColorStop, FrameIndex, FrameRange, Fps, Point, Rect, Rgba8, Viewport},
        error::{MotionError, MotionResult},
    },
    scene::phase::{Phase, PhaseId, PhaseTable},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Serializable declaration of one composition.
///
/// A declaration is plain data; it becomes evaluable once validated into a [`Composition`]
/// (see [`Composition::new`] or [`crate::CompositionBuilder`]).
pub struct CompositionDef {
    /// Registry id, e.g. `"memo-rerender-flow"`.
    pub id: String,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output frame dimensions.
    pub viewport: Viewport,
    /// Total frames; valid frames are `0..duration_in_frames`.
    pub duration_in_frames: u64,
    /// Scene table. Each scene's ramps are its crossfade with its neighbours.
    pub scenes: Vec<Phase>,
    /// Behavioral phase table (gates such as "click" or "hydrate").
    #[serde(default)]
    pub phases: Vec<Phase>,
    /// Shared camera zoom applied to every element flagged `zoomed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<ZoomDef>,
    /// Elements in paint order.
    pub elements: Vec<ElementDef>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Composition-level zoom declaration.
pub struct ZoomDef {
    pub start_at: u64,
    pub end_at: u64,
    pub target_scale: f64,
    pub focal: Point,
    #[serde(default)]
    pub easing: EasingSpec,
}

impl ZoomDef {
    /// Primitive parameters for [`crate::zoom_to`].
    pub fn params(&self) -> ZoomTo {
        ZoomTo {
            start_at: frame_i64(self.start_at),
            end_at: frame_i64(self.end_at),
            target_scale: self.target_scale,
            focal: self.focal,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One animated element.
pub struct ElementDef {
    /// Unique element id within the composition.
    pub id: String,
    /// Name of the owning scene; the scene weight multiplies the element's opacity.
    pub scene: String,
    pub shape: Shape,
    pub style: Style,
    /// Global frame at which the entrance starts.
    pub appear_at: u64,
    #[serde(default)]
    pub entrance: Entrance,
    /// Global frame at which the element is highlighted (color ramp plus pulse ring).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_at: Option<u64>,
    #[serde(default)]
    pub highlight: Highlight,
    /// Phase-gated behaviors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gates: Vec<Gate>,
    /// Whether the composition zoom applies to this element.
    #[serde(default)]
    pub zoomed: bool,
    /// Easing for spring-driven entrances; defaults to the default spring.
    #[serde(default)]
    pub easing: EasingSpec,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Element geometry in viewport coordinates.
pub enum Shape {
    Rect { rect: Rect, corner_radius: f64 },
    Circle { center: Point, radius: f64 },
    Line { from: Point, to: Point },
    Path { points: Vec<Point>, closed: bool },
    Text { origin: Point, text: String, size_px: f64 },
}

impl Shape {
    /// Pivot used for element scaling and pulse rings.
    pub fn anchor(&self) -> Point {
        match self {
            Self::Rect { rect, .. } => rect.center(),
            Self::Circle { center, .. } => *center,
            Self::Line { from, to } => from.midpoint(*to),
            Self::Path { points, .. } => bounding_box(points).map_or(Point::ORIGIN, |r| r.center()),
            Self::Text { origin, .. } => *origin,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
        let ok = match self {
            Self::Rect {
                rect,
                corner_radius,
            } => {
                rect.x0.is_finite()
                    && rect.y0.is_finite()
                    && rect.x1.is_finite()
                    && rect.y1.is_finite()
                    && rect.width() >= 0.0
                    && rect.height() >= 0.0
                    && corner_radius.is_finite()
                    && *corner_radius >= 0.0
            }
            Self::Circle { center, radius } => {
                finite(center) && radius.is_finite() && *radius >= 0.0
            }
            Self::Line { from, to } => finite(from) && finite(to),
            Self::Path { points, .. } => points.len() >= 2 && points.iter().all(finite),
            Self::Text {
                origin,
                text,
                size_px,
            } => finite(origin) && !text.is_empty() && size_px.is_finite() && *size_px > 0.0,
        };
        if !ok {
            return Err(MotionError::validation(format!(
                "malformed {} geometry",
                self.kind_name()
            )));
        }
        Ok(())
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Line { .. } => "line",
            Self::Path { .. } => "path",
            Self::Text { .. } => "text",
        }
    }
}

fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let init = Rect::from_points(*first, *first);
    Some(
        points
            .iter()
            .skip(1)
            .fold(init, |acc, p| acc.union_pt(*p)),
    )
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Element paint style.
pub struct Style {
    /// Fill ramp; a single stop is a solid fill.
    pub fill: SmallVec<[ColorStop; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Rgba8>,
    #[serde(default)]
    pub stroke_width: f64,
    /// Color every fill stop moves toward while highlighted.
    pub highlight: Rgba8,
}

impl Style {
    pub fn solid(fill: Rgba8, highlight: Rgba8) -> Self {
        Self {
            fill: smallvec::smallvec![ColorStop::solid(fill)],
            stroke: None,
            stroke_width: 0.0,
            highlight,
        }
    }

    pub fn stroked(stroke: Rgba8, width: f64, highlight: Rgba8) -> Self {
        Self {
            fill: SmallVec::new(),
            stroke: Some(stroke),
            stroke_width: width,
            highlight,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(MotionError::validation(
                "style stroke_width must be finite and >= 0",
            ));
        }
        if self
            .fill
            .iter()
            .any(|s| !s.offset.is_finite() || !(0.0..=1.0).contains(&s.offset))
        {
            return Err(MotionError::validation(
                "style fill stop offsets must be within [0, 1]",
            ));
        }
        if !self.fill.windows(2).all(|w| w[0].offset <= w[1].offset) {
            return Err(MotionError::validation(
                "style fill stops must be sorted by offset",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// How an element enters at `appear_at`.
pub enum Entrance {
    /// Fully visible from `appear_at`.
    Cut,
    /// Linear opacity ramp.
    Fade { duration: i64 },
    /// Fade while sliding up from `distance` pixels below.
    SlideUp { fade_frames: i64, distance: f64 },
    /// Fade while scaling up from `from_scale`.
    ScaleIn { fade_frames: i64, from_scale: f64 },
    /// Visible from `appear_at`, stroked progressively over `duration` frames.
    Draw { duration: i64 },
}

impl Default for Entrance {
    fn default() -> Self {
        Self::Fade { duration: 15 }
    }
}

impl Entrance {
    pub fn slide_up() -> Self {
        Self::SlideUp {
            fade_frames: SlideUp::DEFAULT_FADE_FRAMES,
            distance: SlideUp::DEFAULT_DISTANCE,
        }
    }

    pub fn scale_in() -> Self {
        Self::ScaleIn {
            fade_frames: ScaleIn::DEFAULT_FADE_FRAMES,
            from_scale: ScaleIn::DEFAULT_FROM_SCALE,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        match *self {
            Self::Cut => Ok(()),
            Self::Fade { duration } | Self::Draw { duration } => {
                if duration <= 0 {
                    return Err(MotionError::validation("entrance duration must be > 0"));
                }
                Ok(())
            }
            Self::SlideUp {
                fade_frames,
                distance,
            } => SlideUp {
                start_at: 0,
                fade_frames,
                distance,
            }
            .validate(),
            Self::ScaleIn {
                fade_frames,
                from_scale,
            } => ScaleIn {
                start_at: 0,
                fade_frames,
                from_scale,
            }
            .validate(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Highlight timing used from `highlight_at`.
pub struct Highlight {
    /// Frames for the fill to reach the highlight color.
    #[serde(default = "default_highlight_ramp")]
    pub ramp_frames: i64,
    /// Pulse ring length; 0 disables the ring.
    #[serde(default = "default_pulse_frames")]
    pub pulse_frames: i64,
    #[serde(default = "default_pulse_radius")]
    pub pulse_radius: f64,
}

fn default_highlight_ramp() -> i64 {
    10
}

fn default_pulse_frames() -> i64 {
    20
}

fn default_pulse_radius() -> f64 {
    PulseRing::DEFAULT_MAX_RADIUS
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            ramp_frames: default_highlight_ramp(),
            pulse_frames: default_pulse_frames(),
            pulse_radius: default_pulse_radius(),
        }
    }
}

impl Highlight {
    pub fn validate(&self) -> MotionResult<()> {
        if self.ramp_frames < 0 || self.pulse_frames < 0 {
            return Err(MotionError::validation(
                "highlight ramp/pulse frames must be >= 0",
            ));
        }
        if !self.pulse_radius.is_finite() || self.pulse_radius < 0.0 {
            return Err(MotionError::validation(
                "highlight pulse_radius must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A behavior active while `phase` is active.
pub struct Gate {
    pub phase: String,
    pub effect: GateEffect,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateEffect {
    /// Visible only during the phase (opacity times phase weight).
    Show,
    /// Hidden during the phase (opacity times one minus phase weight).
    Hide,
    /// Highlight color at the phase weight.
    Highlight,
    /// Pulse ring starting at the phase start.
    Pulse { duration: i64, max_radius: f64 },
    /// Stroke progressively across the phase.
    Draw,
    /// Translate by `(dx, dy)` across the phase; holds the offset afterwards.
    MoveBy {
        dx: f64,
        dy: f64,
        #[serde(default)]
        ease: Ease,
    },
}

impl GateEffect {
    /// Whether the effect scales opacity by the phase weight.
    pub fn sets_visibility(&self) -> bool {
        matches!(self, Self::Show | Self::Hide)
    }

    pub fn validate(&self) -> MotionResult<()> {
        match *self {
            Self::Pulse {
                duration,
                max_radius,
            } => PulseRing {
                start_at: 0,
                duration,
                max_radius,
                peak_opacity: PulseRing::DEFAULT_PEAK_OPACITY,
            }
            .validate(),
            Self::MoveBy { dx, dy, .. } => {
                if !dx.is_finite() || !dy.is_finite() {
                    return Err(MotionError::validation("move_by offsets must be finite"));
                }
                Ok(())
            }
            Self::Show | Self::Hide | Self::Highlight | Self::Draw => Ok(()),
        }
    }
}

/// Show and Hide gates need a ramp on every edge a frame can cross: an entry ramp unless the
/// phase starts at frame 0, an exit ramp unless it ends with the composition.
fn check_visibility_ramps(phases: &PhaseTable, pid: PhaseId, duration: u64) -> MotionResult<()> {
    let Some(phase) = phases.get(pid) else {
        return Ok(());
    };
    if phase.enter == 0 && phase.range.start.0 > 0 {
        return Err(MotionError::validation(format!(
            "show/hide gate on phase '{}' needs an enter ramp",
            phase.name
        )));
    }
    if phase.exit == 0 && phase.range.end.0 < duration {
        return Err(MotionError::validation(format!(
            "show/hide gate on phase '{}' needs an exit ramp",
            phase.name
        )));
    }
    Ok(())
}

/// Registry metadata handed to export hosts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompositionMeta {
    pub id: String,
    pub duration_in_frames: u64,
    pub fps: Fps,
    pub width: u32,
    pub height: u32,
}

/// An element with its table references resolved.
#[derive(Clone, Debug)]
pub struct ResolvedElement {
    pub def: ElementDef,
    pub scene: PhaseId,
    pub gates: Vec<(PhaseId, GateEffect)>,
    pub anchor: Point,
}

/// A validated, immutable composition.
///
/// Construction checks every authoring rule once; evaluation of a `Composition` cannot fail.
#[derive(Clone, Debug)]
pub struct Composition {
    def: CompositionDef,
    scenes: PhaseTable,
    phases: PhaseTable,
    elements: Vec<ResolvedElement>,
}

impl Composition {
    pub fn new(def: CompositionDef) -> MotionResult<Self> {
        let id = def.id.trim();
        if id.is_empty() {
            return Err(MotionError::declaration("composition id must be non-empty"));
        }
        def.fps.validate()?;
        def.viewport.validate()?;
        if def.duration_in_frames == 0 {
            return Err(MotionError::declaration(format!(
                "composition '{id}' duration_in_frames must be > 0"
            )));
        }
        let end = FrameIndex(def.duration_in_frames);

        let scenes = PhaseTable::new(def.scenes.clone())
            .map_err(|e| MotionError::declaration(format!("composition '{id}' scenes: {e}")))?;
        if scenes.is_empty() {
            return Err(MotionError::declaration(format!(
                "composition '{id}' must declare at least one scene"
            )));
        }
        let phases = PhaseTable::new(def.phases.clone())
            .map_err(|e| MotionError::declaration(format!("composition '{id}' phases: {e}")))?;
        if !scenes.fits_within(end) || !phases.fits_within(end) {
            return Err(MotionError::declaration(format!(
                "composition '{id}' has scenes or phases past duration_in_frames"
            )));
        }

        if let Some(zoom) = &def.zoom {
            zoom.params().validate()?;
            zoom.easing.validate()?;
            if zoom.end_at >= def.duration_in_frames {
                return Err(MotionError::declaration(format!(
                    "composition '{id}' zoom end_at must be inside the composition"
                )));
            }
        }

        let mut elements = Vec::with_capacity(def.elements.len());
        for (i, el) in def.elements.iter().enumerate() {
            if el.id.trim().is_empty() {
                return Err(MotionError::declaration("element id must be non-empty"));
            }
            if def.elements[..i].iter().any(|e| e.id == el.id) {
                return Err(MotionError::declaration(format!(
                    "duplicate element id '{}'",
                    el.id
                )));
            }
            let ctx = |e: MotionError| MotionError::declaration(format!("element '{}': {e}", el.id));

            let scene = scenes.require(&el.scene).map_err(ctx)?;
            if el.appear_at >= def.duration_in_frames {
                return Err(ctx(MotionError::validation(
                    "appear_at must be inside the composition",
                )));
            }
            if let Some(at) = el.highlight_at {
                if at >= def.duration_in_frames {
                    return Err(ctx(MotionError::validation(
                        "highlight_at must be inside the composition",
                    )));
                }
                if at < el.appear_at {
                    return Err(ctx(MotionError::validation(
                        "highlight_at must not precede appear_at",
                    )));
                }
            }
            el.shape.validate().map_err(ctx)?;
            el.style.validate().map_err(ctx)?;
            el.entrance.validate().map_err(ctx)?;
            el.highlight.validate().map_err(ctx)?;
            el.easing.validate().map_err(ctx)?;
            if el.zoomed && def.zoom.is_none() {
                return Err(ctx(MotionError::validation(
                    "zoomed element in a composition without zoom",
                )));
            }

            let mut gates = Vec::with_capacity(el.gates.len());
            for gate in &el.gates {
                let pid = phases.require(&gate.phase).map_err(ctx)?;
                gate.effect.validate().map_err(ctx)?;
                if gate.effect.sets_visibility() {
                    check_visibility_ramps(&phases, pid, def.duration_in_frames).map_err(ctx)?;
                }
                gates.push((pid, gate.effect));
            }

            elements.push(ResolvedElement {
                def: el.clone(),
                scene,
                gates,
                anchor: el.shape.anchor(),
            });
        }

        tracing::debug!(
            composition = id,
            scenes = scenes.len(),
            phases = phases.len(),
            elements = elements.len(),
            "composition declared"
        );

        Ok(Self {
            def,
            scenes,
            phases,
            elements,
        })
    }

    /// Parse and validate a JSON declaration.
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let def: CompositionDef = serde_json::from_str(s)
            .map_err(|e| MotionError::serde(format!("composition json: {e}")))?;
        Self::new(def)
    }

    pub fn from_reader(reader: impl Read) -> MotionResult<Self> {
        let def: CompositionDef = serde_json::from_reader(reader)
            .map_err(|e| MotionError::serde(format!("composition json: {e}")))?;
        Self::new(def)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            MotionError::Other(anyhow::Error::new(e).context(format!("open '{}'", path.display())))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn to_json_string(&self) -> MotionResult<String> {
        serde_json::to_string_pretty(&self.def)
            .map_err(|e| MotionError::serde(format!("composition json: {e}")))
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn fps(&self) -> Fps {
        self.def.fps
    }

    pub fn viewport(&self) -> Viewport {
        self.def.viewport
    }

    pub fn duration_in_frames(&self) -> u64 {
        self.def.duration_in_frames
    }

    /// `[0, duration_in_frames)`.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.def.duration_in_frames),
        }
    }

    pub fn scenes(&self) -> &PhaseTable {
        &self.scenes
    }

    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    pub fn zoom(&self) -> Option<&ZoomDef> {
        self.def.zoom.as_ref()
    }

    pub fn elements(&self) -> &[ResolvedElement] {
        &self.elements
    }

    pub fn element(&self, id: &str) -> Option<&ResolvedElement> {
        self.elements.iter().find(|e| e.def.id == id)
    }

    pub fn def(&self) -> &CompositionDef {
        &self.def
    }

    pub fn meta(&self) -> CompositionMeta {
        CompositionMeta {
            id: self.def.id.clone(),
            duration_in_frames: self.def.duration_in_frames,
            fps: self.def.fps,
            width: self.def.viewport.width,
            height: self.def.viewport.height,
        }
    }
}

pub(crate) fn frame_i64(f: u64) -> i64 {
    FrameIndex(f).as_i64()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
