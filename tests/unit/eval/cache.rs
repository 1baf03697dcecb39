use super::*;
use crate::foundation::core::{Fps, Point, Rgba8, Viewport};
use crate::scene::{
    dsl::{CompositionBuilder, ElementBuilder},
    model::{Entrance, Shape, Style},
    phase::Phase,
};

fn comp(id: &str, frames: u64) -> Arc<Composition> {
    let c = CompositionBuilder::new(
        id,
        Fps::integer(30),
        Viewport {
            width: 320,
            height: 180,
        },
        frames,
    )
    .scene(Phase::new("main", 0, frames).unwrap())
    .element(
        ElementBuilder::new(
            "dot",
            "main",
            Shape::Circle {
                center: Point::new(50.0, 50.0),
                radius: 10.0,
            },
            Style::solid(Rgba8::rgb(0, 0, 0), Rgba8::rgb(255, 0, 0)),
        )
        .entrance(Entrance::scale_in())
        .build()
        .unwrap(),
    )
    .unwrap()
    .build()
    .unwrap();
    Arc::new(c)
}

#[test]
fn first_lookup_fills_later_lookups_hit() {
    let cache = FrameCache::with_composition(comp("c", 60)).unwrap();
    let first = cache.frame("c", 12).unwrap().clone();
    let second = cache.frame("c", 12).unwrap();
    assert_eq!(&first, second);
    assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    assert_eq!(cache.cached_frames("c"), 1);
}

#[test]
fn cached_state_equals_fresh_evaluation() {
    let c = comp("c", 60);
    let cache = FrameCache::with_composition(Arc::clone(&c)).unwrap();
    for f in [0, 7, 30, 59] {
        assert_eq!(cache.frame("c", f).unwrap(), &Evaluator::eval_frame(&c, f));
    }
}

#[test]
fn clamped_frames_share_a_slot() {
    let cache = FrameCache::with_composition(comp("c", 60)).unwrap();
    cache.frame("c", -3).unwrap();
    cache.frame("c", 0).unwrap();
    cache.frame("c", 500).unwrap();
    cache.frame("c", 59).unwrap();
    assert_eq!(cache.cached_frames("c"), 2);
    assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 2 });
}

#[test]
fn compositions_are_isolated_by_id() {
    let mut cache = FrameCache::new();
    cache.insert(comp("a", 30)).unwrap();
    cache.insert(comp("b", 90)).unwrap();
    assert_eq!(cache.frame("a", 80).unwrap().frame.0, 29);
    assert_eq!(cache.frame("b", 80).unwrap().frame.0, 80);
    assert_eq!(cache.composition("b").unwrap().duration_in_frames(), 90);
    assert_eq!(cache.cached_frames("a"), 1);
    assert_eq!(cache.cached_frames("missing"), 0);
}

#[test]
fn unknown_and_duplicate_ids_error() {
    let mut cache = FrameCache::with_composition(comp("a", 30)).unwrap();
    assert!(matches!(
        cache.frame("nope", 0),
        Err(MotionError::Evaluation(_))
    ));
    assert!(matches!(
        cache.insert(comp("a", 10)),
        Err(MotionError::Declaration(_))
    ));
}

#[test]
fn oversized_compositions_are_refused() {
    let mut cache = FrameCache::new();
    let err = cache.insert(comp("huge", MAX_CACHED_FRAMES + 1)).unwrap_err();
    assert!(matches!(err, MotionError::Validation(_)));
}

#[test]
fn concurrent_lookups_fill_each_slot_once() {
    use rayon::prelude::*;

    let cache = FrameCache::with_composition(comp("c", 48)).unwrap();
    (0..48i64)
        .into_par_iter()
        .flat_map_iter(|f| [f, f])
        .for_each(|f| {
            cache.frame("c", f).unwrap();
        });
    let stats = cache.stats();
    assert_eq!(stats.misses, 48);
    assert_eq!(stats.hits, 48);
    assert_eq!(cache.cached_frames("c"), 48);
}
