use super::*;
use crate::{
    eval::evaluator::Evaluator,
    foundation::core::{Fps, FrameIndex, Rect, Rgba8, Viewport},
    scene::{
        dsl::{CompositionBuilder, ElementBuilder},
        model::{Composition, Entrance, Shape, Style},
        phase::Phase,
    },
};

fn comp() -> Composition {
    CompositionBuilder::new(
        "fp",
        Fps::integer(30),
        Viewport {
            width: 320,
            height: 180,
        },
        40,
    )
    .scene(Phase::new("main", 0, 40).unwrap())
    .element(
        ElementBuilder::new(
            "box",
            "main",
            Shape::Rect {
                rect: Rect::new(10.0, 10.0, 60.0, 40.0),
                corner_radius: 0.0,
            },
            Style::solid(Rgba8::rgb(20, 20, 20), Rgba8::rgb(250, 200, 0)),
        )
        .entrance(Entrance::Fade { duration: 10 })
        .build()
        .unwrap(),
    )
    .unwrap()
    .build()
    .unwrap()
}

#[test]
fn equal_states_hash_equal() {
    let c = comp();
    let a = fingerprint_frame(&Evaluator::eval_frame(&c, 5));
    let b = fingerprint_frame(&Evaluator::eval_frame(&c, 5));
    assert_eq!(a, b);
}

#[test]
fn visible_changes_change_the_hash() {
    let c = comp();
    let a = fingerprint_frame(&Evaluator::eval_frame(&c, 4));
    let b = fingerprint_frame(&Evaluator::eval_frame(&c, 5));
    assert_ne!(a, b);

    let mut s = Evaluator::eval_frame(&c, 20);
    let before = fingerprint_frame(&s);
    s.elements[0].visual.color_stops[0].color = Rgba8::rgb(21, 20, 20);
    assert_ne!(before, fingerprint_frame(&s));
}

#[test]
fn frame_number_is_not_hashed() {
    let c = comp();
    let a = Evaluator::eval_frame(&c, 20);
    let b = Evaluator::eval_frame(&c, 30);
    assert_eq!(b.frame, FrameIndex(30));
    assert_eq!(fingerprint_frame(&a), fingerprint_frame(&b));
}

#[test]
fn negative_zero_matches_zero() {
    let c = comp();
    let mut a = Evaluator::eval_frame(&c, 20);
    let mut b = a.clone();
    a.zoom.translate.x = 0.0;
    b.zoom.translate.x = -0.0;
    assert_eq!(fingerprint_frame(&a), fingerprint_frame(&b));
}

#[test]
fn display_is_32_hex_digits() {
    let fp = FrameFingerprint { hi: 1, lo: 0xab };
    let s = fp.to_string();
    assert_eq!(s.len(), 32);
    assert_eq!(s, "000000000000000100000000000000ab");
}
