use smallvec::SmallVec;

use crate::{
    animation::primitives::{
        PulseRing, PulseState, ScaleIn, SlideUp, ZoomState, draw_progress, fade_in, pulse_ring,
        scale_in, slide_up, zoom_to,
    },
    foundation::{
        core::{Affine, ColorStop, FrameIndex, Point, Vec2},
        math::clamp01,
    },
    scene::{
        model::{Composition, Entrance, GateEffect, ResolvedElement, frame_i64},
        phase::{PhaseId, PhaseTable},
    },
};

/// Everything a host needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameState {
    pub composition: String,
    /// The evaluated frame after clamping into the composition.
    pub frame: FrameIndex,
    /// One entry per declared scene, in table order.
    pub scenes: Vec<SceneState>,
    /// Behavioral phases containing the frame.
    pub phases: Vec<PhaseState>,
    pub zoom: ZoomState,
    /// One entry per declared element, in paint order.
    pub elements: Vec<ElementState>,
}

impl FrameState {
    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn scene_opacity(&self, name: &str) -> Option<f64> {
        self.scenes.iter().find(|s| s.name == name).map(|s| s.opacity)
    }

    pub fn is_phase_active(&self, name: &str) -> bool {
        self.phases.iter().any(|p| p.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneState {
    pub name: String,
    /// Crossfade multiplier applied to every element of the scene.
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseState {
    pub name: String,
    pub progress: f64,
    pub weight: f64,
}

/// Visual state vector of one element. Derived every frame, never stored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Element opacity before the scene multiplier.
    pub opacity: f64,
    pub translate: Vec2,
    pub scale: f64,
    pub draw_progress: f64,
    /// Highlight amount in `[0, 1]`.
    pub highlight: f64,
    /// Pulse ring radius; 0 when no ring is showing.
    pub radius: f64,
    pub ring_opacity: f64,
    pub color_stops: SmallVec<[ColorStop; 2]>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementState {
    pub id: String,
    /// Final opacity (visual opacity times scene opacity), in `[0, 1]`.
    pub opacity: f64,
    /// Scene-weighted pulse ring opacity.
    pub ring_opacity: f64,
    pub visual: VisualState,
    /// Zoom (when `zoomed`) after translate after scale about the element anchor.
    pub transform: Affine,
    pub zoomed: bool,
}

impl ElementState {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 || self.ring_opacity > 0.0
    }
}

pub struct Evaluator;

impl Evaluator {
    /// Evaluate `frame` (clamped into `[0, duration_in_frames)`).
    ///
    /// Pure in `(comp, frame)`: frames may be evaluated in any order, repeatedly, or concurrently.
    #[tracing::instrument(level = "trace", skip(comp), fields(comp = comp.id()))]
    pub fn eval_frame(comp: &Composition, frame: i64) -> FrameState {
        let frame_idx = comp.range().clamp_i64(frame);
        let f = frame_idx.as_i64();

        let scenes = comp
            .scenes()
            .iter()
            .map(|(id, scene)| SceneState {
                name: scene.name.clone(),
                opacity: comp.scenes().weight(id, f),
            })
            .collect();

        let phases = comp
            .phases()
            .resolve_active_phases(f)
            .into_iter()
            .filter_map(|a| {
                comp.phases().get(a.id).map(|p| PhaseState {
                    name: p.name.clone(),
                    progress: a.progress,
                    weight: a.weight,
                })
            })
            .collect();

        let center = comp.viewport().center();
        let zoom = comp.zoom().map_or(ZoomState::IDENTITY, |z| {
            zoom_to(f, comp.fps(), &z.params(), center, &z.easing)
        });
        let zoom_affine = zoom.to_affine(center);

        let elements = comp
            .elements()
            .iter()
            .map(|el| eval_element(comp, el, f, zoom_affine))
            .collect();

        FrameState {
            composition: comp.id().to_owned(),
            frame: frame_idx,
            scenes,
            phases,
            zoom,
            elements,
        }
    }
}

fn eval_element(comp: &Composition, el: &ResolvedElement, f: i64, zoom: Affine) -> ElementState {
    let def = &el.def;
    let fps = comp.fps();
    let appear = frame_i64(def.appear_at);

    let mut v = VisualState {
        opacity: 1.0,
        translate: Vec2::ZERO,
        scale: 1.0,
        draw_progress: 1.0,
        highlight: 0.0,
        radius: 0.0,
        ring_opacity: 0.0,
        color_stops: SmallVec::new(),
    };

    match def.entrance {
        Entrance::Cut => v.opacity = fade_in(f, appear, 0),
        Entrance::Fade { duration } => v.opacity = fade_in(f, appear, duration),
        Entrance::SlideUp {
            fade_frames,
            distance,
        } => {
            let s = slide_up(
                f,
                fps,
                &SlideUp {
                    start_at: appear,
                    fade_frames,
                    distance,
                },
                &def.easing,
            );
            v.opacity = s.opacity;
            v.translate.y = s.translate_y;
        }
        Entrance::ScaleIn {
            fade_frames,
            from_scale,
        } => {
            let s = scale_in(
                f,
                fps,
                &ScaleIn {
                    start_at: appear,
                    fade_frames,
                    from_scale,
                },
                &def.easing,
            );
            v.opacity = s.opacity;
            v.scale = s.scale;
        }
        Entrance::Draw { duration } => {
            v.opacity = fade_in(f, appear, 0);
            v.draw_progress = draw_progress(f, appear, duration);
        }
    }

    let mut ring = PulseState::default();
    if let Some(at) = def.highlight_at {
        let at = frame_i64(at);
        v.highlight = fade_in(f, at, def.highlight.ramp_frames);
        if def.highlight.pulse_frames > 0 {
            ring = pulse_ring(
                f,
                &PulseRing {
                    max_radius: def.highlight.pulse_radius,
                    ..PulseRing::new(at, def.highlight.pulse_frames)
                },
            );
        }
    }

    for &(pid, effect) in &el.gates {
        apply_gate(comp.phases(), pid, effect, f, &mut v, &mut ring);
    }

    v.opacity = clamp01(v.opacity);
    v.highlight = clamp01(v.highlight);
    v.draw_progress = clamp01(v.draw_progress);
    v.radius = ring.radius;
    v.ring_opacity = ring.opacity;
    v.color_stops = def
        .style
        .fill
        .iter()
        .map(|s| ColorStop {
            offset: s.offset,
            color: s.color.lerp(def.style.highlight, v.highlight),
        })
        .collect();

    let scene_opacity = comp.scenes().weight(el.scene, f);
    let transform = element_affine(el.anchor, &v, def.zoomed.then_some(zoom));

    ElementState {
        id: def.id.clone(),
        opacity: clamp01(v.opacity * scene_opacity),
        ring_opacity: clamp01(v.ring_opacity * scene_opacity),
        visual: v,
        transform,
        zoomed: def.zoomed,
    }
}

fn apply_gate(
    phases: &PhaseTable,
    pid: PhaseId,
    effect: GateEffect,
    f: i64,
    v: &mut VisualState,
    ring: &mut PulseState,
) {
    match effect {
        GateEffect::Show => v.opacity *= phases.weight(pid, f),
        GateEffect::Hide => v.opacity *= 1.0 - phases.weight(pid, f),
        GateEffect::Highlight => v.highlight = v.highlight.max(phases.weight(pid, f)),
        GateEffect::Pulse {
            duration,
            max_radius,
        } => {
            let Some(phase) = phases.get(pid) else {
                return;
            };
            let p = pulse_ring(
                f,
                &PulseRing {
                    max_radius,
                    ..PulseRing::new(phase.range.start.as_i64(), duration)
                },
            );
            if p.opacity > ring.opacity {
                *ring = p;
            }
        }
        GateEffect::Draw => v.draw_progress *= phases.progress(pid, f),
        GateEffect::MoveBy { dx, dy, ease } => {
            let t = ease.apply(phases.progress(pid, f));
            v.translate += Vec2::new(dx, dy) * t;
        }
    }
}

fn element_affine(anchor: Point, v: &VisualState, zoom: Option<Affine>) -> Affine {
    let local = Affine::translate(v.translate)
        * Affine::translate(anchor.to_vec2())
        * Affine::scale(v.scale)
        * Affine::translate(-anchor.to_vec2());
    match zoom {
        Some(z) => z * local,
        None => local,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
