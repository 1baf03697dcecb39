use super::*;
use crate::{
    compositions::{memo_rerender, theme::Theme},
    foundation::core::{Fps, Rect, Rgba8, Viewport},
    scene::{
        dsl::{CompositionBuilder, ElementBuilder},
        model::{Entrance, Shape, Style},
        phase::Phase,
    },
};

fn fade_then_hold() -> Composition {
    CompositionBuilder::new(
        "hold",
        Fps::integer(30),
        Viewport {
            width: 320,
            height: 180,
        },
        30,
    )
    .scene(Phase::new("main", 0, 30).unwrap())
    .element(
        ElementBuilder::new(
            "box",
            "main",
            Shape::Rect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                corner_radius: 0.0,
            },
            Style::solid(Rgba8::rgb(0, 0, 0), Rgba8::rgb(255, 255, 255)),
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
fn sequential_range_matches_single_frames() {
    let c = fade_then_hold();
    let range = FrameRange::frames(5, 25).unwrap();
    let frames = eval_range(&c, range, &EvalThreading::default()).unwrap();
    assert_eq!(frames.len(), 20);
    for (i, state) in frames.iter().enumerate() {
        assert_eq!(*state, Evaluator::eval_frame(&c, 5 + i as i64));
    }
}

#[test]
fn parallel_matches_sequential() {
    let c = memo_rerender::build(&Theme::default()).unwrap();
    let range = c.range();
    let (seq, seq_stats) = eval_range_with_stats(&c, range, &EvalThreading::default()).unwrap();
    let (par, par_stats) = eval_range_with_stats(
        &c,
        range,
        &EvalThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(2),
        },
    )
    .unwrap();

    assert_eq!(seq, par);
    assert_eq!(par_stats.frames_total, 660);
    assert_eq!(par_stats.chunks, 95);
    assert_eq!(seq_stats.chunks, 11);
    assert_eq!(seq_stats.frames_held, par_stats.frames_held);
}

#[test]
fn held_frames_are_counted() {
    let c = fade_then_hold();
    let (_, stats) = eval_range_with_stats(&c, c.range(), &EvalThreading::default()).unwrap();
    assert_eq!(stats.frames_total, 30);
    assert_eq!(stats.chunks, 1);
    // Opacity settles at frame 10; frames 11..30 repeat their predecessor.
    assert_eq!(stats.frames_held, 19);
}

#[test]
fn zero_chunk_size_is_one_frame_per_chunk() {
    let c = fade_then_hold();
    let threading = EvalThreading {
        chunk_size: 0,
        ..EvalThreading::default()
    };
    let (_, stats) =
        eval_range_with_stats(&c, FrameRange::frames(0, 4).unwrap(), &threading).unwrap();
    assert_eq!(stats.chunks, 4);
}

#[test]
fn invalid_ranges_are_rejected() {
    let c = fade_then_hold();
    let t = EvalThreading::default();
    assert!(matches!(
        eval_range(&c, FrameRange::frames(3, 3).unwrap(), &t),
        Err(MotionError::Validation(_))
    ));
    assert!(matches!(
        eval_range(&c, FrameRange::frames(0, 31).unwrap(), &t),
        Err(MotionError::Validation(_))
    ));
}

#[test]
fn zero_threads_is_rejected() {
    let c = fade_then_hold();
    let threading = EvalThreading {
        parallel: true,
        chunk_size: 8,
        threads: Some(0),
    };
    let err = eval_range(&c, c.range(), &threading).unwrap_err();
    assert!(err.to_string().contains("threads"));
}
