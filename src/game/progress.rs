//! Collected-piece state and the unlock decision derived from it.

use super::types::{PuzzleKind, PIECE_COUNT};

#[derive(Debug)]
pub struct PieceSlot {
    pub kind: PuzzleKind,
    pub collected: bool,
}

/// The four-slot collection. Created once at startup, mutated only by
/// successful puzzle resolution, never decremented.
#[derive(Debug)]
pub struct ProgressTracker {
    slots: [PieceSlot; PIECE_COUNT],
}

impl ProgressTracker {
    pub fn new() -> Self {
        ProgressTracker {
            slots: PuzzleKind::ALL.map(|kind| PieceSlot {
                kind,
                collected: false,
            }),
        }
    }

    /// Marks the slot for `kind` collected. Idempotent: returns true only
    /// the first time, later calls are no-ops.
    pub fn record(&mut self, kind: PuzzleKind) -> bool {
        let slot = &mut self.slots[kind.slot()];
        let fresh = !slot.collected;
        slot.collected = true;
        fresh
    }

    pub fn is_collected(&self, kind: PuzzleKind) -> bool {
        self.slots[kind.slot()].collected
    }

    pub fn count_collected(&self) -> usize {
        self.slots.iter().filter(|s| s.collected).count()
    }

    pub fn is_complete(&self) -> bool {
        self.count_collected() == PIECE_COUNT
    }

    /// Icon per slot, in slot order; `None` for uncollected slots (the UI
    /// renders those as a question mark).
    pub fn icons(&self) -> [Option<&'static str>; PIECE_COUNT] {
        self.slots
            .each_ref()
            .map(|s| s.collected.then(|| s.kind.icon()))
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// The unlock gate. Pure and recomputed on every gating attempt, never
/// cached, so external callers always see the current decision.
pub fn can_unlock(progress: &ProgressTracker) -> bool {
    progress.is_complete()
}
