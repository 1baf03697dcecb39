//! "SSR hydration flow": the server renders HTML, the markup streams to the browser, and the
//! client bundle hydrates the static page into an interactive one.

use crate::{
    animation::ease::Ease,
    compositions::theme::Theme,
    foundation::{
        core::{Point, Rect, Rgba8},
        error::MotionResult,
    },
    scene::{
        dsl::{CompositionBuilder, ElementBuilder},
        model::{Composition, ElementDef, Entrance, GateEffect, Highlight, Shape, Style},
        phase::Phase,
    },
};

pub const ID: &str = "ssr-hydration-flow";
pub const DURATION_IN_FRAMES: u64 = 600;

pub fn build(theme: &Theme) -> MotionResult<Composition> {
    let fade = theme.timing.scene_crossfade;
    let ramp = theme.timing.phase_ramp;

    let mut b = CompositionBuilder::new(ID, theme.fps, theme.viewport, DURATION_IN_FRAMES)
        .scene(Phase::new("server", 0, 210)?.exit(fade))
        .scene(Phase::new("transfer", 190, 400)?.crossfade(fade))
        .scene(Phase::new("hydrate", 380, DURATION_IN_FRAMES)?.enter(fade))
        .phase(Phase::new("render", 40, 160)?.crossfade(ramp))
        .phase(Phase::new("stream", 220, 360)?.crossfade(ramp))
        .phase(Phase::new("attach", 420, 530)?.crossfade(ramp))
        .phase(Phase::new("hydrated", 420, DURATION_IN_FRAMES)?.enter(ramp))
        .phase(Phase::new("interactive", 520, DURATION_IN_FRAMES)?.enter(ramp));

    let elements = server_scene(theme)?
        .into_iter()
        .chain(transfer_scene(theme)?)
        .chain(hydrate_scene(theme)?);
    for el in elements {
        b = b.element(el)?;
    }
    b.build()
}

fn rect(theme: &Theme, id: &str, scene: &str, r: Rect, style: Style) -> ElementBuilder {
    ElementBuilder::new(
        id,
        scene,
        Shape::Rect {
            rect: theme.rect(r.x0, r.y0, r.x1, r.y1),
            corner_radius: theme.length(16.0),
        },
        style,
    )
    .easing(theme.easing())
}

fn label(theme: &Theme, id: &str, scene: &str, at: Point, body: &str) -> ElementBuilder {
    ElementBuilder::new(
        id,
        scene,
        Shape::Text {
            origin: theme.point(at.x, at.y),
            text: body.to_owned(),
            size_px: theme.length(28.0),
        },
        theme.text_style(),
    )
    .entrance(Entrance::Fade {
        duration: theme.timing.fade_frames,
    })
}

fn tinted(theme: &Theme, fill: Rgba8) -> Style {
    Style {
        stroke: Some(theme.palette.outline),
        stroke_width: 2.0,
        ..Style::solid(fill, theme.palette.highlight)
    }
}

fn server_scene(theme: &Theme) -> MotionResult<Vec<ElementDef>> {
    const S: &str = "server";
    let doc = [
        (800.0, 220.0),
        (1040.0, 220.0),
        (1040.0, 460.0),
        (800.0, 460.0),
    ]
    .map(|(x, y)| theme.point(x, y));
    let server_style = tinted(theme, theme.palette.server);

    Ok(vec![
        label(theme, "server-title", S, Point::new(80.0, 80.0), "1. The server renders HTML")
            .build()?,
        rect(theme, "server", S, Rect::new(160.0, 220.0, 480.0, 420.0), server_style)
            .appear_at(10)
            .entrance(Entrance::ScaleIn {
                fade_frames: theme.timing.fade_frames,
                from_scale: theme.timing.from_scale,
            })
            .gate("render", GateEffect::Highlight)
            .build()?,
        label(theme, "server-label", S, Point::new(250.0, 330.0), "Node server")
            .appear_at(20)
            .build()?,
        ElementBuilder::new(
            "render-arrow",
            S,
            Shape::Line {
                from: theme.point(480.0, 320.0),
                to: theme.point(800.0, 320.0),
            },
            theme.line_style(),
        )
        .appear_at(40)
        .entrance(Entrance::Draw { duration: 30 })
        .build()?,
        ElementBuilder::new(
            "html-doc",
            S,
            Shape::Path {
                points: doc.to_vec(),
                closed: true,
            },
            Style::stroked(theme.palette.text, 3.0, theme.palette.highlight),
        )
        .appear_at(60)
        .entrance(Entrance::Draw { duration: 40 })
        .highlight_at(130)
        .build()?,
    ])
}

fn transfer_scene(theme: &Theme) -> MotionResult<Vec<ElementDef>> {
    const S: &str = "transfer";
    let surface = theme.surface_style();
    Ok(vec![
        label(theme, "transfer-title", S, Point::new(80.0, 80.0), "2. HTML streams over")
            .appear_at(200)
            .build()?,
        ElementBuilder::new(
            "network",
            S,
            Shape::Line {
                from: theme.point(200.0, 360.0),
                to: theme.point(880.0, 360.0),
            },
            theme.line_style(),
        )
        .appear_at(200)
        .entrance(Entrance::Draw { duration: 40 })
        .build()?,
        rect(theme, "browser", S, Rect::new(880.0, 200.0, 1160.0, 520.0), surface)
            .appear_at(210)
            .entrance(Entrance::SlideUp {
                fade_frames: theme.timing.fade_frames,
                distance: theme.timing.slide_distance,
            })
            .build()?,
        ElementBuilder::new(
            "packet",
            S,
            Shape::Circle {
                center: theme.point(200.0, 360.0),
                radius: theme.length(14.0),
            },
            Style::solid(theme.palette.accent, theme.palette.highlight),
        )
        .appear_at(220)
        .entrance(Entrance::Cut)
        .gate("stream", GateEffect::Show)
        .gate(
            "stream",
            GateEffect::MoveBy {
                dx: theme.length(680.0),
                dy: 0.0,
                ease: Ease::InOutCubic,
            },
        )
        .build()?,
    ])
}

fn hydrate_scene(theme: &Theme) -> MotionResult<Vec<ElementDef>> {
    const S: &str = "hydrate";
    let client = tinted(theme, theme.palette.client);
    let accent = tinted(theme, theme.palette.accent);
    Ok(vec![
        label(theme, "hydrate-title", S, Point::new(80.0, 80.0), "3. React hydrates the page")
            .appear_at(390)
            .build()?,
        rect(theme, "page", S, Rect::new(320.0, 160.0, 960.0, 560.0), theme.surface_style())
            .appear_at(390)
            .entrance(Entrance::Fade {
                duration: theme.timing.fade_frames,
            })
            .build()?,
        label(theme, "static-label", S, Point::new(560.0, 220.0), "static HTML")
            .appear_at(395)
            .gate("hydrated", GateEffect::Hide)
            .build()?,
        rect(theme, "js-bundle", S, Rect::new(60.0, 300.0, 220.0, 400.0), client)
            .appear_at(410)
            .entrance(Entrance::SlideUp {
                fade_frames: theme.timing.fade_frames,
                distance: theme.timing.slide_distance,
            })
            .gate(
                "attach",
                GateEffect::MoveBy {
                    dx: theme.length(300.0),
                    dy: 0.0,
                    ease: Ease::OutCubic,
                },
            )
            .gate("interactive", GateEffect::Hide)
            .build()?,
        rect(theme, "button", S, Rect::new(540.0, 420.0, 740.0, 480.0), accent)
            .appear_at(400)
            .entrance(Entrance::ScaleIn {
                fade_frames: theme.timing.fade_frames,
                from_scale: theme.timing.from_scale,
            })
            .highlight_at(520)
            .highlight(Highlight {
                ramp_frames: theme.timing.phase_ramp as i64,
                pulse_frames: theme.timing.pulse_frames,
                pulse_radius: theme.timing.pulse_radius,
            })
            .build()?,
        label(theme, "live-label", S, Point::new(560.0, 220.0), "interactive")
            .appear_at(500)
            .gate("interactive", GateEffect::Show)
            .build()?,
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/ssr_hydration.rs"]
mod tests;
