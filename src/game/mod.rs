pub mod evaluator;
pub mod progress;
pub mod session;
pub mod types;

pub use session::{
    Answer, Board, FlipOutcome, Phase, SessionController, SubmitOutcome, TickOutcome,
};
pub use types::{Gift, GiftId, GiftTable, PuzzleKind, PIECE_COUNT};

use std::collections::VecDeque;

use crate::book::MemoryBook;
use crate::card::CardConfig;
use progress::ProgressTracker;

/// Outbound notifications for the presentation layer, drained each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SessionChanged {
        phase: Option<Phase>,
        remaining: Option<u32>,
    },
    ProgressChanged {
        collected: usize,
        icons: [Option<&'static str>; PIECE_COUNT],
    },
    UnlockChanged(bool),
    BookOpened,
    BookClosed,
}

/// Result of trying to open the main gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    Allowed,
    Denied { collected: usize },
}

/// The whole card in one place: gift table, piece progress, the single
/// session controller, and the memory book. The presentation layer feeds
/// inbound events in and drains `GameEvent`s out; no rendering concern
/// lives below this line.
pub struct Game {
    pub card: CardConfig,
    pub gifts: GiftTable,
    pub progress: ProgressTracker,
    pub sessions: SessionController,
    pub book: MemoryBook,
    events: VecDeque<GameEvent>,
}

impl Game {
    pub fn new(card: CardConfig) -> Self {
        let book = MemoryBook::new(card.pages.clone());
        Game {
            card,
            gifts: GiftTable::standard(),
            progress: ProgressTracker::new(),
            sessions: SessionController::new(),
            book,
            events: VecDeque::new(),
        }
    }

    #[cfg(test)]
    fn seeded(card: CardConfig, seed: u64) -> Self {
        let mut game = Game::new(card);
        game.sessions = SessionController::seeded(seed);
        game
    }

    /// Opens the puzzle behind a gift. Returns the new session id, or
    /// `None` for solved gifts, decorations, and the main gift.
    pub fn open_puzzle(&mut self, gift_id: GiftId) -> Option<u64> {
        let kind = self.gifts.get(gift_id)?.kind?;
        let id = self.sessions.open(kind, gift_id, &self.gifts, &self.card)?;
        self.note_session();
        Some(id)
    }

    pub fn submit_answer(&mut self, answer: Answer) -> SubmitOutcome {
        let outcome =
            self.sessions
                .submit(&answer, &self.card, &mut self.progress, &mut self.gifts);
        if outcome == SubmitOutcome::Solved {
            self.note_progress();
        }
        if outcome != SubmitOutcome::Ignored {
            self.note_session();
        }
        outcome
    }

    pub fn flip_card(&mut self, index: usize) -> FlipOutcome {
        let outcome = self
            .sessions
            .flip_card(index, &mut self.progress, &mut self.gifts);
        if outcome == FlipOutcome::Solved {
            self.note_progress();
            self.note_session();
        }
        outcome
    }

    pub fn place_letter(&mut self, tile_index: usize) -> bool {
        self.sessions.place_letter(tile_index)
    }

    pub fn select_slot(&mut self, slot: usize) {
        self.sessions.select_slot(slot);
    }

    pub fn reset_assembly(&mut self) {
        self.sessions.reset_assembly();
    }

    pub fn retry_puzzle(&mut self) -> Option<u64> {
        let id = self.sessions.retry(&self.card)?;
        self.note_session();
        Some(id)
    }

    pub fn close_puzzle(&mut self) {
        self.sessions.close();
        self.note_session();
    }

    pub fn tick(&mut self, session_id: u64) -> TickOutcome {
        let outcome = self.sessions.tick(session_id);
        if outcome != TickOutcome::Ignored {
            self.note_session();
        }
        outcome
    }

    /// The reward boundary: allowed iff the unlock gate holds right now.
    /// On `Allowed` the main gift is marked solved and the memory book
    /// opens; `Denied` changes no state and carries the current count.
    pub fn attempt_main_unlock(&mut self) -> UnlockOutcome {
        if progress::can_unlock(&self.progress) {
            self.gifts.mark_solved(self.gifts.main_gift_id());
            self.book.open();
            self.events.push_back(GameEvent::BookOpened);
            UnlockOutcome::Allowed
        } else {
            UnlockOutcome::Denied {
                collected: self.progress.count_collected(),
            }
        }
    }

    pub fn close_book(&mut self) {
        self.book.close();
        self.events.push_back(GameEvent::BookClosed);
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    fn note_session(&mut self) {
        let (phase, remaining) = match self.sessions.session() {
            Some(s) => (Some(s.phase), s.remaining),
            None => (None, None),
        };
        self.events
            .push_back(GameEvent::SessionChanged { phase, remaining });
    }

    fn note_progress(&mut self) {
        self.events.push_back(GameEvent::ProgressChanged {
            collected: self.progress.count_collected(),
            icons: self.progress.icons(),
        });
        self.events
            .push_back(GameEvent::UnlockChanged(progress::can_unlock(
                &self.progress,
            )));
    }
}
