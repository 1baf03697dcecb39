//! Memoized frame states keyed by `(composition id, frame)`.
//!
//! Each registered composition owns an arena of write-once slots, one per frame. Slots fill on
//! first lookup and are shared by reference afterwards; evaluation is pure, so a cached state is
//! always equal to a fresh one.

use std::{
    collections::HashMap,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    eval::evaluator::{Evaluator, FrameState},
    foundation::error::{MotionError, MotionResult},
    scene::model::Composition,
};

/// Upper bound on slots allocated for a single composition.
///
/// Slots are allocated up front on [`FrameCache::insert`]. An empty slot is
/// `size_of::<OnceLock<FrameState>>()` bytes (about 150 on 64-bit targets), so a full-size arena
/// costs roughly 10 MB before any frame is filled. 65 536 frames is over 36 minutes at 30 fps.
pub const MAX_CACHED_FRAMES: u64 = 1 << 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct Arena {
    comp: Arc<Composition>,
    slots: Box<[OnceLock<FrameState>]>,
}

#[derive(Default)]
pub struct FrameCache {
    arenas: Vec<Arena>,
    index: HashMap<String, usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for FrameCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCache")
            .field("compositions", &self.index.keys().collect::<Vec<_>>())
            .field("stats", &self.stats())
            .finish()
    }
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_composition(comp: Arc<Composition>) -> MotionResult<Self> {
        let mut cache = Self::new();
        cache.insert(comp)?;
        Ok(cache)
    }

    /// Register a composition. Ids must be unique within one cache.
    pub fn insert(&mut self, comp: Arc<Composition>) -> MotionResult<()> {
        if self.index.contains_key(comp.id()) {
            return Err(MotionError::declaration(format!(
                "composition '{}' is already cached",
                comp.id()
            )));
        }
        let len = comp.duration_in_frames();
        if len > MAX_CACHED_FRAMES {
            return Err(MotionError::validation(format!(
                "composition '{}' has {len} frames; the cache holds at most {MAX_CACHED_FRAMES}",
                comp.id()
            )));
        }
        let slots = (0..len).map(|_| OnceLock::new()).collect();
        self.index.insert(comp.id().to_owned(), self.arenas.len());
        self.arenas.push(Arena { comp, slots });
        Ok(())
    }

    pub fn composition(&self, id: &str) -> Option<&Arc<Composition>> {
        self.arena(id).map(|a| &a.comp)
    }

    /// Cached state for `frame` (clamped like [`Evaluator::eval_frame`]).
    pub fn frame(&self, id: &str, frame: i64) -> MotionResult<&FrameState> {
        let arena = self
            .arena(id)
            .ok_or_else(|| MotionError::evaluation(format!("composition '{id}' is not cached")))?;
        let idx = arena.comp.range().clamp_i64(frame);
        let slot = usize::try_from(idx.0)
            .ok()
            .and_then(|i| arena.slots.get(i))
            .ok_or_else(|| MotionError::evaluation(format!("frame {} has no cache slot", idx.0)))?;

        let mut filled = false;
        let state = slot.get_or_init(|| {
            filled = true;
            Evaluator::eval_frame(&arena.comp, idx.as_i64())
        });
        if filled {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(comp = id, frame = idx.0, "frame cache fill");
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        Ok(state)
    }

    /// Number of filled slots for `id`.
    pub fn cached_frames(&self, id: &str) -> usize {
        self.arena(id)
            .map_or(0, |a| a.slots.iter().filter(|s| s.get().is_some()).count())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn arena(&self, id: &str) -> Option<&Arena> {
        self.index.get(id).and_then(|&i| self.arenas.get(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/cache.rs"]
mod tests;
