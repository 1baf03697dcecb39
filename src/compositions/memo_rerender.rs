//! "Memo re-render flow": a state change re-renders a whole component tree, then a side-by-side
//! comparison shows a memoized child skipping the render while the camera zooms into the
//! un-memoized one.

use crate::{
    compositions::theme::Theme,
    foundation::{
        core::{Point, Rect},
        error::MotionResult,
    },
    scene::{
        dsl::{CompositionBuilder, ElementBuilder},
        model::{
            Composition, ElementDef, Entrance, GateEffect, Highlight, Shape, Style, ZoomDef,
        },
        phase::Phase,
    },
};

pub const ID: &str = "memo-rerender-flow";
pub const DURATION_IN_FRAMES: u64 = 660;

/// Zoom window and focal point (design pixels) of the comparison scene.
pub const ZOOM_START: u64 = 490;
pub const ZOOM_END: u64 = 565;
pub const ZOOM_TARGET: f64 = 1.35;
pub const ZOOM_FOCAL: (f64, f64) = (290.0, 365.0);

pub fn build(theme: &Theme) -> MotionResult<Composition> {
    let t = &theme.timing;
    let fade = t.scene_crossfade;
    let ramp = t.phase_ramp;

    let mut b = CompositionBuilder::new(ID, theme.fps, theme.viewport, DURATION_IN_FRAMES)
        .scene(Phase::new("tree", 0, 310)?.exit(fade))
        .scene(Phase::new("compare", 290, DURATION_IN_FRAMES)?.enter(fade))
        .phase(Phase::new("click", 110, 160)?.crossfade(ramp))
        .phase(Phase::new("rerender", 150, 260)?.crossfade(ramp))
        .phase(Phase::new("cascade", 190, 290)?.crossfade(ramp))
        .phase(Phase::new("update", 380, 450)?.crossfade(ramp))
        .phase(Phase::new("skip", 440, 520)?.crossfade(ramp))
        .zoom(ZoomDef {
            start_at: ZOOM_START,
            end_at: ZOOM_END,
            target_scale: ZOOM_TARGET,
            focal: theme.point(ZOOM_FOCAL.0, ZOOM_FOCAL.1),
            easing: theme.easing(),
        });

    for el in tree_scene(theme)? {
        b = b.element(el)?;
    }
    for el in compare_scene(theme)? {
        b = b.element(el)?;
    }
    b.build()
}

fn text(
    theme: &Theme,
    id: &str,
    scene: &str,
    at: (f64, f64),
    body: &str,
    size: f64,
) -> ElementBuilder {
    ElementBuilder::new(
        id,
        scene,
        Shape::Text {
            origin: theme.point(at.0, at.1),
            text: body.to_owned(),
            size_px: theme.length(size),
        },
        theme.text_style(),
    )
    .easing(theme.easing())
}

fn node(theme: &Theme, id: &str, scene: &str, rect: Rect) -> ElementBuilder {
    ElementBuilder::new(
        id,
        scene,
        Shape::Rect {
            rect: theme.rect(rect.x0, rect.y0, rect.x1, rect.y1),
            corner_radius: theme.length(12.0),
        },
        theme.surface_style(),
    )
    .easing(theme.easing())
}

fn edge(theme: &Theme, id: &str, scene: &str, from: Point, to: Point) -> ElementBuilder {
    ElementBuilder::new(
        id,
        scene,
        Shape::Line {
            from: theme.point(from.x, from.y),
            to: theme.point(to.x, to.y),
        },
        theme.line_style(),
    )
    .entrance(Entrance::Draw {
        duration: theme.timing.draw_frames,
    })
}

fn slide(theme: &Theme) -> Entrance {
    Entrance::SlideUp {
        fade_frames: theme.timing.fade_frames,
        distance: theme.timing.slide_distance,
    }
}

fn scale(theme: &Theme) -> Entrance {
    Entrance::ScaleIn {
        fade_frames: theme.timing.fade_frames,
        from_scale: theme.timing.from_scale,
    }
}

fn tree_scene(theme: &Theme) -> MotionResult<Vec<ElementDef>> {
    const S: &str = "tree";
    let fade = Entrance::Fade {
        duration: theme.timing.fade_frames,
    };
    let children = [
        ("header", 360.0, 30),
        ("list", 640.0, 36),
        ("footer", 920.0, 42),
    ];
    let items = [
        ("item-0", 500.0, 60),
        ("item-1", 640.0, 66),
        ("item-2", 780.0, 72),
    ];

    let title = "Every render starts at the top";
    let mut out = vec![
        text(theme, "tree-title", S, (80.0, 80.0), title, 40.0)
            .entrance(fade)
            .build()?,
        node(theme, "app", S, Rect::new(540.0, 148.0, 740.0, 212.0))
            .appear_at(10)
            .entrance(scale(theme))
            .highlight_at(125)
            .highlight(Highlight {
                ramp_frames: theme.timing.phase_ramp as i64,
                pulse_frames: theme.timing.pulse_frames,
                pulse_radius: theme.timing.pulse_radius,
            })
            .build()?,
    ];

    for (id, x, at) in children {
        out.push(
            node(theme, id, S, Rect::new(x - 90.0, 312.0, x + 90.0, 368.0))
                .appear_at(at)
                .entrance(slide(theme))
                .gate("rerender", GateEffect::Highlight)
                .build()?,
        );
        out.push(
            edge(
                theme,
                &format!("edge-app-{id}"),
                S,
                Point::new(640.0, 212.0),
                Point::new(x, 312.0),
            )
            .appear_at(48)
            .build()?,
        );
    }
    for (id, x, at) in items {
        out.push(
            node(theme, id, S, Rect::new(x - 55.0, 476.0, x + 55.0, 524.0))
                .appear_at(at)
                .entrance(slide(theme))
                .gate("cascade", GateEffect::Highlight)
                .build()?,
        );
        out.push(
            edge(
                theme,
                &format!("edge-list-{id}"),
                S,
                Point::new(640.0, 368.0),
                Point::new(x, 476.0),
            )
            .appear_at(80)
            .build()?,
        );
    }

    let pulse = GateEffect::Pulse {
        duration: theme.timing.pulse_frames,
        max_radius: theme.timing.pulse_radius,
    };
    out.push(
        ElementBuilder::new(
            "cursor",
            S,
            Shape::Circle {
                center: theme.point(700.0, 200.0),
                radius: theme.length(10.0),
            },
            Style::solid(theme.palette.accent, theme.palette.highlight),
        )
        .appear_at(100)
        .entrance(Entrance::Cut)
        .gate("click", GateEffect::Show)
        .gate("click", pulse)
        .build()?,
    );
    let caption = "setState() re-renders every child";
    out.push(
        text(theme, "tree-caption", S, (80.0, 640.0), caption, 28.0)
            .appear_at(160)
            .entrance(fade)
            .build()?,
    );
    Ok(out)
}

fn compare_scene(theme: &Theme) -> MotionResult<Vec<ElementDef>> {
    const S: &str = "compare";
    let fade = Entrance::Fade {
        duration: theme.timing.fade_frames,
    };

    let mut out = Vec::new();
    let sides = [
        ("plain", 290.0, "Without memo"),
        ("memo", 930.0, "With React.memo"),
    ];
    for (side, x, title) in sides {
        let zoomed = side == "plain";
        out.push(
            text(theme, &format!("{side}-title"), S, (x - 130.0, 200.0), title, 32.0)
                .appear_at(300)
                .entrance(fade)
                .zoomed(zoomed)
                .build()?,
        );
        let parent = Rect::new(x - 90.0, 262.0, x + 90.0, 318.0);
        out.push(
            node(theme, &format!("{side}-parent"), S, parent)
                .appear_at(310)
                .entrance(scale(theme))
                .gate("update", GateEffect::Highlight)
                .zoomed(zoomed)
                .build()?,
        );
        out.push(
            edge(
                theme,
                &format!("{side}-edge"),
                S,
                Point::new(x, 318.0),
                Point::new(x, 392.0),
            )
            .appear_at(325)
            .zoomed(zoomed)
            .build()?,
        );
        let child_rect = Rect::new(x - 90.0, 392.0, x + 90.0, 448.0);
        let child = node(theme, &format!("{side}-child"), S, child_rect)
            .appear_at(335)
            .entrance(scale(theme))
            .zoomed(zoomed);
        let child = if zoomed {
            let pulse = GateEffect::Pulse {
                duration: theme.timing.pulse_frames,
                max_radius: theme.timing.pulse_radius,
            };
            child
                .gate("update", GateEffect::Highlight)
                .gate("update", pulse)
        } else {
            child
        };
        out.push(child.build()?);
    }

    out.push(
        ElementBuilder::new(
            "skip-badge",
            S,
            Shape::Text {
                origin: theme.point(1040.0, 428.0),
                text: "skipped".to_owned(),
                size_px: theme.length(24.0),
            },
            Style::solid(theme.palette.client, theme.palette.highlight),
        )
        .appear_at(440)
        .entrance(scale(theme))
        .easing(theme.easing())
        .gate("skip", GateEffect::Show)
        .build()?,
    );
    out.push(
        ElementBuilder::new(
            "props-arrow",
            S,
            Shape::Line {
                from: theme.point(930.0, 150.0),
                to: theme.point(930.0, 258.0),
            },
            Style::stroked(theme.palette.accent, 3.0, theme.palette.highlight),
        )
        .appear_at(380)
        .entrance(Entrance::Cut)
        .gate("update", GateEffect::Draw)
        .build()?,
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/memo_rerender.rs"]
mod tests;
