use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    eval::evaluator::{ElementState, FrameState},
    foundation::{
        core::{Affine, Point, Rect},
        error::{MotionError, MotionResult},
    },
    present::host::{Geometry, PaintHost, PaintStyle, ShapeKind},
    scene::model::{Composition, ResolvedElement, Shape},
};

/// Stroke width used for partially drawn shapes that declare no stroke.
pub const DRAW_STROKE_WIDTH: f64 = 2.0;
/// Minimum pulse ring stroke width.
pub const RING_STROKE_WIDTH: f64 = 2.0;

const CIRCLE_SEGMENTS: usize = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PresentStats {
    pub painted: usize,
    pub rings: usize,
    /// Elements not painted because they are invisible or not drawn yet.
    pub skipped: usize,
}

/// Turn an evaluated frame into paint calls on `host`.
///
/// Visibility is decided here only: an invisible element still has a full [`ElementState`].
#[tracing::instrument(level = "trace", skip_all, fields(comp = comp.id(), frame = state.frame.0))]
pub fn present<H: PaintHost + ?Sized>(
    comp: &Composition,
    state: &FrameState,
    host: &mut H,
) -> MotionResult<PresentStats> {
    if state.composition != comp.id() {
        return Err(MotionError::evaluation(format!(
            "frame state belongs to '{}', not '{}'",
            state.composition,
            comp.id()
        )));
    }
    if state.elements.len() != comp.elements().len() {
        return Err(MotionError::evaluation(format!(
            "frame state has {} elements, composition '{}' declares {}",
            state.elements.len(),
            comp.id(),
            comp.elements().len()
        )));
    }

    host.begin_frame(comp.viewport(), state.frame)?;

    let mut stats = PresentStats::default();
    for (el, es) in comp.elements().iter().zip(&state.elements) {
        let scale = uniform_scale(es.transform);
        let progress = es.visual.draw_progress;

        if es.opacity > 0.0 && progress > 0.0 {
            let (kind, geometry) = element_geometry(&el.def.shape, es.transform, progress);
            let style = element_style(el, es, scale, &geometry);
            host.paint(kind, &geometry, &style)?;
            stats.painted += 1;
        } else {
            stats.skipped += 1;
        }

        if es.ring_opacity > 0.0 && es.visual.radius > 0.0 {
            let geometry = Geometry::Circle {
                center: es.transform * el.anchor,
                radius: es.visual.radius * scale,
            };
            let style = PaintStyle {
                fill: smallvec::SmallVec::new(),
                stroke: Some(el.def.style.highlight),
                stroke_width: el.def.style.stroke_width.max(RING_STROKE_WIDTH) * scale,
                opacity: es.ring_opacity,
            };
            host.paint(ShapeKind::Ring, &geometry, &style)?;
            stats.rings += 1;
        }
    }
    Ok(stats)
}

fn uniform_scale(t: Affine) -> f64 {
    t.determinant().abs().sqrt()
}

fn element_style(
    el: &ResolvedElement,
    es: &ElementState,
    scale: f64,
    geometry: &Geometry,
) -> PaintStyle {
    let style = &el.def.style;
    let stroke = style
        .stroke
        .map(|c| c.lerp(style.highlight, es.visual.highlight));

    let outline_only = matches!(geometry, Geometry::Polyline { .. })
        && matches!(el.def.shape, Shape::Rect { .. } | Shape::Circle { .. });
    if outline_only {
        return PaintStyle {
            fill: smallvec::SmallVec::new(),
            stroke: stroke.or_else(|| es.visual.color_stops.first().map(|s| s.color)),
            stroke_width: style.stroke_width.max(DRAW_STROKE_WIDTH) * scale,
            opacity: es.opacity,
        };
    }

    let opacity = match el.def.shape {
        Shape::Text { .. } => es.opacity * es.visual.draw_progress,
        _ => es.opacity,
    };
    PaintStyle {
        fill: es.visual.color_stops.clone(),
        stroke,
        stroke_width: style.stroke_width * scale,
        opacity,
    }
}

fn element_geometry(shape: &Shape, t: Affine, progress: f64) -> (ShapeKind, Geometry) {
    let s = uniform_scale(t);
    let full = progress >= 1.0;
    match shape {
        Shape::Rect {
            rect,
            corner_radius,
        } => {
            let geometry = if full {
                Geometry::Rect {
                    rect: t.transform_rect_bbox(*rect),
                    corner_radius: corner_radius * s,
                }
            } else {
                outline(&rect_corners(*rect), t, progress)
            };
            (ShapeKind::Rect, geometry)
        }
        Shape::Circle { center, radius } => {
            let geometry = if full {
                Geometry::Circle {
                    center: t * *center,
                    radius: radius * s,
                }
            } else {
                outline(&circle_points(*center, *radius), t, progress)
            };
            (ShapeKind::Circle, geometry)
        }
        Shape::Line { from, to } => (
            ShapeKind::Line,
            Geometry::Polyline {
                points: trim_polyline(&[t * *from, t * *to], false, progress),
                closed: false,
            },
        ),
        Shape::Path { points, closed } => {
            let pts: Vec<Point> = points.iter().map(|p| t * *p).collect();
            (
                ShapeKind::Path,
                Geometry::Polyline {
                    points: if full {
                        pts
                    } else {
                        trim_polyline(&pts, *closed, progress)
                    },
                    closed: *closed && full,
                },
            )
        }
        Shape::Text {
            origin,
            text,
            size_px,
        } => (
            ShapeKind::Text,
            Geometry::Text {
                origin: t * *origin,
                text: text.clone(),
                size_px: size_px * s,
            },
        ),
    }
}

fn outline(points: &[Point], t: Affine, progress: f64) -> Geometry {
    let pts: Vec<Point> = points.iter().map(|p| t * *p).collect();
    Geometry::Polyline {
        points: trim_polyline(&pts, true, progress),
        closed: false,
    }
}

/// Clockwise from the top-left corner.
fn rect_corners(r: Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

/// Clockwise polygon starting at twelve o'clock.
fn circle_points(center: Point, radius: f64) -> Vec<Point> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let a = -FRAC_PI_2 + TAU * (i as f64) / (CIRCLE_SEGMENTS as f64);
            Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

/// Leading `progress` fraction (by arc length) of a polyline.
///
/// A closed polyline includes its closing segment, so a fully drawn closed outline ends back at
/// its first point.
pub fn trim_polyline(points: &[Point], closed: bool, progress: f64) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let progress = progress.clamp(0.0, 1.0);
    if progress >= 1.0 && !closed {
        return points.to_vec();
    }

    let mut path: Vec<Point> = points.to_vec();
    if closed {
        path.push(first);
    }
    if progress >= 1.0 {
        return path;
    }

    let total: f64 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total <= 0.0 {
        return vec![first];
    }

    let mut remaining = total * progress;
    let mut out = vec![first];
    for w in path.windows(2) {
        let seg = w[0].distance(w[1]);
        if remaining >= seg {
            out.push(w[1]);
            remaining -= seg;
            continue;
        }
        if remaining > 0.0 {
            out.push(w[0].lerp(w[1], remaining / seg));
        }
        break;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/present/frame.rs"]
mod tests;
