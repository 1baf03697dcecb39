//! Ordered phase tables.
//!
//! A composition declares its scenes and its behavioral phases as tables of named half-open frame
//! intervals. All conditional behavior is a pure lookup into a table; nothing is remembered
//! between frames.

use smallvec::SmallVec;

use crate::{
    animation::primitives::{fade_in, fade_out},
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{MotionError, MotionResult},
    },
};

/// Index of a phase inside its [`PhaseTable`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PhaseId(pub u16);

impl PhaseId {
    fn idx(self) -> usize {
        usize::from(self.0)
    }
}

/// One named interval `[range.start, range.end)` with entry and exit crossfade lengths.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    pub name: String,
    pub range: FrameRange,
    /// Frames spent ramping in from `range.start`.
    #[serde(default)]
    pub enter: u64,
    /// Frames spent ramping out before `range.end`.
    #[serde(default)]
    pub exit: u64,
}

impl Phase {
    pub fn new(name: impl Into<String>, start: u64, end: u64) -> MotionResult<Self> {
        Ok(Self {
            name: name.into(),
            range: FrameRange::frames(start, end)?,
            enter: 0,
            exit: 0,
        })
    }

    /// Set both the entry and exit ramp.
    pub fn crossfade(mut self, frames: u64) -> Self {
        self.enter = frames;
        self.exit = frames;
        self
    }

    pub fn enter(mut self, frames: u64) -> Self {
        self.enter = frames;
        self
    }

    pub fn exit(mut self, frames: u64) -> Self {
        self.exit = frames;
        self
    }

    fn start_i64(&self) -> i64 {
        self.range.start.as_i64()
    }

    fn end_i64(&self) -> i64 {
        self.range.end.as_i64()
    }
}

/// Phase that contains a given frame, with its local state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActivePhase {
    pub id: PhaseId,
    /// Linear progress through the phase in `[0, 1)`.
    pub progress: f64,
    /// Crossfade weight (entry ramp times exit ramp).
    pub weight: f64,
}

pub type ActivePhases = SmallVec<[ActivePhase; 4]>;

/// Validated, ordered table of phases.
///
/// Invariants checked by [`PhaseTable::new`]:
/// - names are non-empty and unique, ranges are non-empty, starts never decrease;
/// - `enter + exit <= len` for every phase;
/// - when a phase starts at or before the end of the previous one (a hand-over), the two overlap
///   by at least `max(prev.exit, next.enter)` frames, so no frame renders a hard cut.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct PhaseTable {
    phases: Vec<Phase>,
}

impl TryFrom<Vec<Phase>> for PhaseTable {
    type Error = MotionError;

    fn try_from(phases: Vec<Phase>) -> MotionResult<Self> {
        Self::new(phases)
    }
}

impl From<PhaseTable> for Vec<Phase> {
    fn from(table: PhaseTable) -> Self {
        table.phases
    }
}

impl PhaseTable {
    pub fn new(phases: Vec<Phase>) -> MotionResult<Self> {
        if phases.len() > usize::from(u16::MAX) {
            return Err(MotionError::declaration("phase table has too many entries"));
        }

        for (i, phase) in phases.iter().enumerate() {
            if phase.name.trim().is_empty() {
                return Err(MotionError::declaration("phase name must be non-empty"));
            }
            if phases[..i].iter().any(|p| p.name == phase.name) {
                return Err(MotionError::declaration(format!(
                    "duplicate phase name '{}'",
                    phase.name
                )));
            }
            if phase.range.is_empty() {
                return Err(MotionError::declaration(format!(
                    "phase '{}' has an empty range",
                    phase.name
                )));
            }
            if phase.enter.saturating_add(phase.exit) > phase.range.len_frames() {
                return Err(MotionError::declaration(format!(
                    "phase '{}' ramps ({} + {}) exceed its length {}",
                    phase.name,
                    phase.enter,
                    phase.exit,
                    phase.range.len_frames()
                )));
            }
        }

        for pair in phases.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.range.start < prev.range.start {
                return Err(MotionError::declaration(format!(
                    "phase '{}' starts before '{}'; tables must be ordered by start",
                    next.name, prev.name
                )));
            }
            if next.range.start > prev.range.end {
                continue;
            }
            let required = prev.exit.max(next.enter);
            let overlap = prev.range.overlap_frames(next.range);
            if overlap < required {
                return Err(MotionError::declaration(format!(
                    "phases '{}' -> '{}' overlap by {overlap} frames but their crossfade needs {required}",
                    prev.name, next.name
                )));
            }
        }

        Ok(Self { phases })
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PhaseId, &Phase)> {
        self.phases
            .iter()
            .enumerate()
            .map(|(i, p)| (PhaseId(i as u16), p))
    }

    pub fn get(&self, id: PhaseId) -> Option<&Phase> {
        self.phases.get(id.idx())
    }

    pub fn id(&self, name: &str) -> Option<PhaseId> {
        self.phases
            .iter()
            .position(|p| p.name == name)
            .map(|i| PhaseId(i as u16))
    }

    /// Like [`PhaseTable::id`], failing with a declaration error for unknown names.
    pub fn require(&self, name: &str) -> MotionResult<PhaseId> {
        self.id(name)
            .ok_or_else(|| MotionError::declaration(format!("unknown phase '{name}'")))
    }

    /// Frames covered from the first start to the last end.
    pub fn span(&self) -> Option<FrameRange> {
        let start = self.phases.iter().map(|p| p.range.start).min()?;
        let end = self.phases.iter().map(|p| p.range.end).max()?;
        Some(FrameRange { start, end })
    }

    /// Gate: `frame ∈ [start, end)`.
    pub fn is_active(&self, id: PhaseId, frame: i64) -> bool {
        self.get(id).is_some_and(|p| p.range.contains_i64(frame))
    }

    /// Linear progress through the phase; 0 before it, 1 after it.
    pub fn progress(&self, id: PhaseId, frame: i64) -> f64 {
        let Some(p) = self.get(id) else {
            return 0.0;
        };
        fade_in(frame, p.start_i64(), p.range.len_frames() as i64)
    }

    /// Crossfade weight: entry ramp times exit ramp, 0 outside the phase.
    pub fn weight(&self, id: PhaseId, frame: i64) -> f64 {
        self.get(id).map_or(0.0, |p| phase_weight(p, frame))
    }

    /// All phases containing `frame`, in table order.
    pub fn resolve_active_phases(&self, frame: i64) -> ActivePhases {
        self.iter()
            .filter(|(_, p)| p.range.contains_i64(frame))
            .map(|(id, p)| ActivePhase {
                id,
                progress: fade_in(frame, p.start_i64(), p.range.len_frames() as i64),
                weight: phase_weight(p, frame),
            })
            .collect()
    }

    /// Latest-starting phase containing `frame`.
    pub fn current(&self, frame: i64) -> Option<PhaseId> {
        self.iter()
            .filter(|(_, p)| p.range.contains_i64(frame))
            .map(|(id, _)| id)
            .last()
    }

    /// Whether every phase ends at or before `end`.
    pub(crate) fn fits_within(&self, end: FrameIndex) -> bool {
        self.phases.iter().all(|p| p.range.end <= end)
    }
}

fn phase_weight(p: &Phase, frame: i64) -> f64 {
    if !p.range.contains_i64(frame) {
        return 0.0;
    }
    let enter = p.enter as i64;
    let exit = p.exit as i64;
    let entry = fade_in(frame, p.start_i64(), enter);
    let leave = if exit == 0 {
        1.0
    } else {
        fade_out(frame, p.end_i64() - exit, exit)
    };
    entry * leave
}

#[cfg(test)]
#[path = "../../tests/unit/scene/phase.rs"]
mod tests;
