use crate::{
    animation::easing::EasingSpec,
    foundation::{
        core::{Fps, Point, Viewport},
        error::{MotionError, MotionResult},
    },
    scene::{
        model::{
            Composition, CompositionDef, ElementDef, Entrance, Gate, GateEffect, Highlight, Shape,
            Style, ZoomDef,
        },
        phase::Phase,
    },
};

pub struct CompositionBuilder {
    id: String,
    fps: Fps,
    viewport: Viewport,
    duration_in_frames: u64,
    scenes: Vec<Phase>,
    phases: Vec<Phase>,
    zoom: Option<ZoomDef>,
    elements: Vec<ElementDef>,
}

impl CompositionBuilder {
    pub fn new(id: impl Into<String>, fps: Fps, viewport: Viewport, duration_in_frames: u64) -> Self {
        Self {
            id: id.into(),
            fps,
            viewport,
            duration_in_frames,
            scenes: Vec::new(),
            phases: Vec::new(),
            zoom: None,
            elements: Vec::new(),
        }
    }

    pub fn scene(mut self, scene: Phase) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn zoom(mut self, zoom: ZoomDef) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn element(mut self, element: ElementDef) -> MotionResult<Self> {
        if self.elements.iter().any(|e| e.id == element.id) {
            return Err(MotionError::declaration(format!(
                "duplicate element id '{}'",
                element.id
            )));
        }
        self.elements.push(element);
        Ok(self)
    }

    pub fn into_def(self) -> CompositionDef {
        CompositionDef {
            id: self.id,
            fps: self.fps,
            viewport: self.viewport,
            duration_in_frames: self.duration_in_frames,
            scenes: self.scenes,
            phases: self.phases,
            zoom: self.zoom,
            elements: self.elements,
        }
    }

    pub fn build(self) -> MotionResult<Composition> {
        Composition::new(self.into_def())
    }
}

pub fn zoom(start_at: u64, end_at: u64, target_scale: f64, focal: Point) -> ZoomDef {
    ZoomDef {
        start_at,
        end_at,
        target_scale,
        focal,
        easing: EasingSpec::default(),
    }
}

pub struct ElementBuilder {
    id: String,
    scene: String,
    shape: Shape,
    style: Style,
    appear_at: u64,
    entrance: Entrance,
    highlight_at: Option<u64>,
    highlight: Highlight,
    gates: Vec<Gate>,
    zoomed: bool,
    easing: EasingSpec,
}

impl ElementBuilder {
    pub fn new(id: impl Into<String>, scene: impl Into<String>, shape: Shape, style: Style) -> Self {
        Self {
            id: id.into(),
            scene: scene.into(),
            shape,
            style,
            appear_at: 0,
            entrance: Entrance::default(),
            highlight_at: None,
            highlight: Highlight::default(),
            gates: Vec::new(),
            zoomed: false,
            easing: EasingSpec::default(),
        }
    }

    pub fn appear_at(mut self, frame: u64) -> Self {
        self.appear_at = frame;
        self
    }

    pub fn entrance(mut self, entrance: Entrance) -> Self {
        self.entrance = entrance;
        self
    }

    pub fn highlight_at(mut self, frame: u64) -> Self {
        self.highlight_at = Some(frame);
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn gate(mut self, phase: impl Into<String>, effect: GateEffect) -> Self {
        self.gates.push(Gate {
            phase: phase.into(),
            effect,
        });
        self
    }

    pub fn zoomed(mut self, zoomed: bool) -> Self {
        self.zoomed = zoomed;
        self
    }

    pub fn easing(mut self, easing: EasingSpec) -> Self {
        self.easing = easing;
        self
    }

    /// Checks local parameters; table references are resolved by [`Composition::new`].
    pub fn build(self) -> MotionResult<ElementDef> {
        if self.id.trim().is_empty() {
            return Err(MotionError::validation("element id must be non-empty"));
        }
        if self.scene.trim().is_empty() {
            return Err(MotionError::validation("element scene must be non-empty"));
        }
        self.shape.validate()?;
        self.style.validate()?;
        self.entrance.validate()?;
        self.highlight.validate()?;
        self.easing.validate()?;
        for gate in &self.gates {
            gate.effect.validate()?;
        }

        Ok(ElementDef {
            id: self.id,
            scene: self.scene,
            shape: self.shape,
            style: self.style,
            appear_at: self.appear_at,
            entrance: self.entrance,
            highlight_at: self.highlight_at,
            highlight: self.highlight,
            gates: self.gates,
            zoomed: self.zoomed,
            easing: self.easing,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
