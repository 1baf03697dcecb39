use rayon::prelude::*;

use crate::{
    eval::{
        evaluator::{Evaluator, FrameState},
        fingerprint::fingerprint_frame,
    },
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{MotionError, MotionResult},
    },
    scene::model::Composition,
};

/// Threading and chunking for range evaluation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EvalThreading {
    pub parallel: bool,
    /// Frames per chunk; 0 is treated as 1.
    pub chunk_size: usize,
    /// Worker count for the rayon pool; `None` uses the rayon default.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct EvalStats {
    pub frames_total: u64,
    pub chunks: u64,
    /// Frames whose fingerprint equals the preceding frame's (nothing moved).
    pub frames_held: u64,
}

/// Evaluate every frame of `range`, in order.
pub fn eval_range(
    comp: &Composition,
    range: FrameRange,
    threading: &EvalThreading,
) -> MotionResult<Vec<FrameState>> {
    eval_range_with_stats(comp, range, threading).map(|(frames, _)| frames)
}

/// Evaluate `range` sequentially or on a rayon pool. Output order and content are the same
/// either way.
#[tracing::instrument(skip(comp, threading), fields(comp = comp.id()))]
pub fn eval_range_with_stats(
    comp: &Composition,
    range: FrameRange,
    threading: &EvalThreading,
) -> MotionResult<(Vec<FrameState>, EvalStats)> {
    if range.len_frames() == 0 {
        return Err(MotionError::validation("eval range must be non-empty"));
    }
    if range.end.0 > comp.duration_in_frames() {
        return Err(MotionError::validation(format!(
            "eval range end {} exceeds composition '{}' duration {}",
            range.end.0,
            comp.id(),
            comp.duration_in_frames()
        )));
    }

    let len = range.len_frames();
    let mut out = Vec::with_capacity(len.min(4096) as usize);
    let mut stats = EvalStats::default();
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| MotionError::evaluation(format!("invalid chunk range: {e}")))?;
        let frames = match &pool {
            Some(pool) => eval_chunk_parallel(comp, chunk, pool),
            None => eval_chunk_sequential(comp, chunk),
        };
        stats.frames_total += frames.len() as u64;
        stats.chunks += 1;
        out.extend(frames);
        chunk_start = chunk_end;
    }

    stats.frames_held = count_held_frames(&out);
    tracing::debug!(
        frames = stats.frames_total,
        chunks = stats.chunks,
        held = stats.frames_held,
        parallel = threading.parallel,
        "range evaluated"
    );
    Ok((out, stats))
}

fn eval_chunk_sequential(comp: &Composition, range: FrameRange) -> Vec<FrameState> {
    (range.start.0..range.end.0)
        .map(|f| Evaluator::eval_frame(comp, FrameIndex(f).as_i64()))
        .collect()
}

fn eval_chunk_parallel(
    comp: &Composition,
    range: FrameRange,
    pool: &rayon::ThreadPool,
) -> Vec<FrameState> {
    pool.install(|| {
        (range.start.0..range.end.0)
            .into_par_iter()
            .map(|f| Evaluator::eval_frame(comp, FrameIndex(f).as_i64()))
            .collect()
    })
}

fn count_held_frames(frames: &[FrameState]) -> u64 {
    let prints: Vec<_> = frames.iter().map(fingerprint_frame).collect();
    prints.windows(2).filter(|w| w[0] == w[1]).count() as u64
}

fn build_thread_pool(threads: Option<usize>) -> MotionResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MotionError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MotionError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/range.rs"]
mod tests;
