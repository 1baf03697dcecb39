//! explainer-motion is a deterministic, frame-indexed animation engine for pre-rendered explainer
//! videos.
//!
//! Every visual property of a frame (opacity, position, scale, draw progress, pulse rings, camera
//! zoom, colors) is a pure function of the frame number and an immutable [`Composition`].
//!
//! # Pipeline overview
//!
//! 1. **Declare**: a [`CompositionDef`] (JSON or [`CompositionBuilder`]) is validated once into a
//!    [`Composition`]. All authoring errors surface here.
//! 2. **Evaluate**: `Composition + frame -> FrameState` via [`Evaluator::eval_frame`]; infallible,
//!    stateless, and safe to run out of order or in parallel ([`eval_range`], [`FrameCache`]).
//! 3. **Present**: [`present`] turns a [`FrameState`] into calls on a host-provided
//!    [`PaintHost`]. Pixels and encoding belong to the host.
//!
//! Built-in explainers are listed by [`Registry::builtin`] from one injected [`Theme`].
#![forbid(unsafe_code)]

mod animation;
mod compositions;
mod eval;
mod foundation;
mod present;
mod scene;

pub use animation::ease::{Ease, cubic_bezier};
pub use animation::easing::{
    CubicBezier, Curve, Easing, EasingSpec, ExponentialDecay, SETTLE_EPSILON,
};
pub use animation::primitives::{
    PulseRing, PulseState, ScaleIn, ScaleState, SlideState, SlideUp, ZoomState, ZoomTo,
    draw_progress, fade_in, fade_out, pulse_ring, scale_in, slide_up, zoom_to,
};
pub use animation::spring::{SpringConfig, spring_progress};
pub use compositions::memo_rerender;
pub use compositions::registry::Registry;
pub use compositions::ssr_hydration;
pub use compositions::theme::{DESIGN_VIEWPORT, Palette, Theme, Timing};
pub use eval::cache::{CacheStats, FrameCache, MAX_CACHED_FRAMES};
pub use eval::evaluator::{
    ElementState, Evaluator, FrameState, PhaseState, SceneState, VisualState,
};
pub use eval::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use eval::range::{EvalStats, EvalThreading, eval_range, eval_range_with_stats};
pub use foundation::core::{
    Affine, ColorStop, FrameIndex, FrameRange, Fps, Point, Rect, Rgba8, Vec2, Viewport,
};
pub use foundation::error::{MotionError, MotionResult};
pub use foundation::math::{clamp01, interpolate, lerp};
pub use present::frame::{
    DRAW_STROKE_WIDTH, PresentStats, RING_STROKE_WIDTH, present, trim_polyline,
};
pub use present::host::{Geometry, PaintCall, PaintHost, PaintList, PaintStyle, ShapeKind};
pub use scene::dsl::{CompositionBuilder, ElementBuilder, zoom};
pub use scene::model::{
    Composition, CompositionDef, CompositionMeta, ElementDef, Entrance, Gate, GateEffect,
    Highlight, ResolvedElement, Shape, Style, ZoomDef,
};
pub use scene::phase::{ActivePhase, ActivePhases, Phase, PhaseId, PhaseTable};
