//! One puzzle attempt at a time: the `Idle → Active → {Solved | Failed |
//! TimedOut} → Idle` machine, its per-kind working state, and the tick
//! handling for the two timed puzzles.
//!
//! Time is never read from a wall clock here. The owner calls
//! `tick(session_id)` once per second; a tick carrying a stale id (its
//! session was closed or superseded) is ignored, so a late callback can
//! never mutate state it no longer owns.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::card::CardConfig;
use super::evaluator;
use super::progress::ProgressTracker;
use super::types::{GiftId, GiftTable, PuzzleKind};

pub const WORD_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Solved,
    Failed,
    TimedOut,
}

#[derive(Debug)]
pub struct Tile {
    pub letter: char,
    pub used: bool,
}

/// Working state for the word-assembly puzzle: a shuffled tile pool and
/// three answer slot groups whose lengths mirror the target words.
#[derive(Debug)]
pub struct AssemblyBoard {
    pub tiles: Vec<Tile>,
    pub placed: [Vec<char>; WORD_SLOTS],
    pub slot_lens: [usize; WORD_SLOTS],
    pub active_slot: usize,
    reshuffle_every: u32,
    ticks_since_shuffle: u32,
}

impl AssemblyBoard {
    pub fn assembled_words(&self) -> [String; WORD_SLOTS] {
        self.placed.each_ref().map(|slot| slot.iter().collect())
    }

    pub fn unplaced_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.used).count()
    }

    fn clear_placements(&mut self) {
        for tile in &mut self.tiles {
            tile.used = false;
        }
        for slot in &mut self.placed {
            slot.clear();
        }
        self.active_slot = 0;
    }
}

#[derive(Debug)]
pub struct PairCard {
    pub symbol: String,
    pub face_up: bool,
    pub matched: bool,
}

/// Working state for pair matching: twelve shuffled cards, at most two
/// face up, resolved on the second flip.
#[derive(Debug)]
pub struct PairBoard {
    pub cards: Vec<PairCard>,
    face_up: Vec<usize>,
    pub moves: u32,
    pub matched_pairs: usize,
}

impl PairBoard {
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    fn clear_board(&mut self) {
        for card in &mut self.cards {
            card.face_up = false;
            card.matched = false;
        }
        self.face_up.clear();
        self.moves = 0;
        self.matched_pairs = 0;
    }
}

#[derive(Debug)]
pub enum Board {
    Date,
    Assembly(AssemblyBoard),
    Choice,
    Pairs(PairBoard),
}

#[derive(Debug)]
pub struct Session {
    pub id: u64,
    pub kind: PuzzleKind,
    pub gift_id: GiftId,
    pub phase: Phase,
    /// Seconds left, for the two timed kinds only.
    pub remaining: Option<u32>,
    pub board: Board,
}

/// A submission payload. Assembly submits whatever is placed on its board;
/// pair matching has no single-shot submission at all.
#[derive(Debug)]
pub enum Answer {
    Date(String),
    Choice(String),
    Assembly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Solved,
    Wrong,
    /// Submission arrived outside `Active` or with a mismatched payload.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    Flipped,
    Matched,
    Mismatch { first: String, second: String },
    Solved,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    Reshuffled { remaining: u32 },
    TimedOut,
    Ignored,
}

/// Owns the single active session. Only one may exist system-wide; opening
/// a new one implicitly closes the previous.
pub struct SessionController {
    session: Option<Session>,
    next_id: u64,
    rng: StdRng,
}

impl SessionController {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic shuffles for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        SessionController {
            session: None,
            next_id: 0,
            rng,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Opens a session for `kind` on the given gift. Rejected (returns
    /// `None`, no session created) when the gift is already solved or does
    /// not carry that kind.
    pub fn open(
        &mut self,
        kind: PuzzleKind,
        gift_id: GiftId,
        gifts: &GiftTable,
        card: &CardConfig,
    ) -> Option<u64> {
        let gift = gifts.get(gift_id)?;
        if gift.solved || gift.kind != Some(kind) {
            return None;
        }
        // Supersede whatever was active; its ticks go stale with it.
        self.session = None;
        Some(self.start(kind, gift_id, card))
    }

    fn start(&mut self, kind: PuzzleKind, gift_id: GiftId, card: &CardConfig) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        let (board, remaining) = self.fresh_board(kind, card);
        self.session = Some(Session {
            id,
            kind,
            gift_id,
            phase: Phase::Active,
            remaining,
            board,
        });
        id
    }

    fn fresh_board(&mut self, kind: PuzzleKind, card: &CardConfig) -> (Board, Option<u32>) {
        match kind {
            PuzzleKind::DateRecall => (Board::Date, None),
            PuzzleKind::ChoiceEquation => (Board::Choice, None),
            PuzzleKind::WordAssembly => {
                let cfg = &card.assembly;
                let mut letters: Vec<char> = cfg.words.iter().flat_map(|w| w.chars()).collect();
                letters.extend(cfg.decoys.iter().filter_map(|d| d.chars().next()));
                letters.shuffle(&mut self.rng);
                let board = AssemblyBoard {
                    tiles: letters
                        .into_iter()
                        .map(|letter| Tile {
                            letter,
                            used: false,
                        })
                        .collect(),
                    placed: Default::default(),
                    slot_lens: cfg.word_lengths(),
                    active_slot: 0,
                    reshuffle_every: cfg.reshuffle_seconds,
                    ticks_since_shuffle: 0,
                };
                (Board::Assembly(board), Some(cfg.time_limit_seconds))
            }
            PuzzleKind::PairMatching => {
                let cfg = &card.pairs;
                let mut symbols: Vec<String> = cfg
                    .symbols
                    .iter()
                    .flat_map(|s| [s.clone(), s.clone()])
                    .collect();
                symbols.shuffle(&mut self.rng);
                let board = PairBoard {
                    cards: symbols
                        .into_iter()
                        .map(|symbol| PairCard {
                            symbol,
                            face_up: false,
                            matched: false,
                        })
                        .collect(),
                    face_up: Vec::new(),
                    moves: 0,
                    matched_pairs: 0,
                };
                (Board::Pairs(board), Some(cfg.time_limit_seconds))
            }
        }
    }

    /// Re-enters `Active` from `Failed` or `TimedOut` with freshly
    /// initialized working state and a new session id (any tick from the
    /// previous run is stale). No-op in other phases.
    pub fn retry(&mut self, card: &CardConfig) -> Option<u64> {
        let session = self.session.as_ref()?;
        if !matches!(session.phase, Phase::Failed | Phase::TimedOut) {
            return None;
        }
        let (kind, gift_id) = (session.kind, session.gift_id);
        self.session = None;
        Some(self.start(kind, gift_id, card))
    }

    /// Valid from any state; discards all transient working state.
    pub fn close(&mut self) {
        self.session = None;
    }

    /// Evaluates a submission. Only meaningful in `Active`; anywhere else
    /// it is a silent no-op. On success the piece is recorded and the
    /// originating gift is permanently marked solved.
    pub fn submit(
        &mut self,
        answer: &Answer,
        card: &CardConfig,
        progress: &mut ProgressTracker,
        gifts: &mut GiftTable,
    ) -> SubmitOutcome {
        let Some(session) = self.session.as_mut() else {
            return SubmitOutcome::Ignored;
        };
        if session.phase != Phase::Active {
            return SubmitOutcome::Ignored;
        }
        let correct = match (&session.board, answer) {
            (Board::Date, Answer::Date(text)) => {
                evaluator::date_recall(text, card.date.day, card.date.month)
            }
            (Board::Choice, Answer::Choice(id)) => {
                evaluator::choice_equation(id, &card.equation.correct)
            }
            (Board::Assembly(board), Answer::Assembly) => {
                let words = board.assembled_words();
                evaluator::word_assembly(
                    [&words[0], &words[1], &words[2]].map(String::as_str),
                    card.assembly.targets(),
                )
            }
            _ => return SubmitOutcome::Ignored,
        };
        if correct {
            session.phase = Phase::Solved;
            session.remaining = None;
            progress.record(session.kind);
            gifts.mark_solved(session.gift_id);
            SubmitOutcome::Solved
        } else {
            session.phase = Phase::Failed;
            SubmitOutcome::Wrong
        }
    }

    /// Advances the session clock by one second. Ignored unless the id
    /// matches the current `Active` session of a timed kind. Reaching zero
    /// forces `TimedOut` and wipes partial progress; for word assembly,
    /// every `reshuffle_seconds` the unplaced tile pool is reshuffled
    /// without touching placed letters or the countdown.
    pub fn tick(&mut self, session_id: u64) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Ignored;
        };
        if session.id != session_id || session.phase != Phase::Active {
            return TickOutcome::Ignored;
        }
        let Some(remaining) = session.remaining.as_mut() else {
            return TickOutcome::Ignored;
        };
        *remaining = remaining.saturating_sub(1);
        let remaining = *remaining;
        if remaining == 0 {
            session.phase = Phase::TimedOut;
            match &mut session.board {
                Board::Assembly(board) => board.clear_placements(),
                Board::Pairs(board) => board.clear_board(),
                Board::Date | Board::Choice => {}
            }
            return TickOutcome::TimedOut;
        }
        if let Board::Assembly(board) = &mut session.board {
            board.ticks_since_shuffle += 1;
            if board.ticks_since_shuffle >= board.reshuffle_every && board.unplaced_count() > 0 {
                board.ticks_since_shuffle = 0;
                board.tiles.shuffle(&mut self.rng);
                return TickOutcome::Reshuffled { remaining };
            }
        }
        TickOutcome::Running { remaining }
    }

    /// Places an unused tile into the active answer slot, if it has room.
    /// A slot that fills up hands the cursor to the next unfilled one.
    pub fn place_letter(&mut self, tile_index: usize) -> bool {
        let Some(board) = self.active_assembly() else {
            return false;
        };
        let Some(tile) = board.tiles.get_mut(tile_index) else {
            return false;
        };
        if tile.used || board.placed[board.active_slot].len() >= board.slot_lens[board.active_slot]
        {
            return false;
        }
        let letter = tile.letter;
        tile.used = true;
        board.placed[board.active_slot].push(letter);
        if board.placed[board.active_slot].len() == board.slot_lens[board.active_slot] {
            if let Some(next) = (0..WORD_SLOTS).find(|&i| board.placed[i].len() < board.slot_lens[i])
            {
                board.active_slot = next;
            }
        }
        true
    }

    pub fn select_slot(&mut self, slot: usize) {
        if slot >= WORD_SLOTS {
            return;
        }
        if let Some(board) = self.active_assembly() {
            board.active_slot = slot;
        }
    }

    /// Returns every placed tile to the pool. The countdown keeps running.
    pub fn reset_assembly(&mut self) {
        if let Some(board) = self.active_assembly() {
            board.clear_placements();
        }
    }

    fn active_assembly(&mut self) -> Option<&mut AssemblyBoard> {
        let session = self.session.as_mut()?;
        if session.phase != Phase::Active {
            return None;
        }
        match &mut session.board {
            Board::Assembly(board) => Some(board),
            _ => None,
        }
    }

    /// Flips a card. The second flip of a turn resolves the pair on the
    /// spot: a match stays down as matched, a mismatch turns both back.
    /// Matching the final pair solves the puzzle and cancels the timer.
    pub fn flip_card(
        &mut self,
        index: usize,
        progress: &mut ProgressTracker,
        gifts: &mut GiftTable,
    ) -> FlipOutcome {
        let Some(session) = self.session.as_mut() else {
            return FlipOutcome::Ignored;
        };
        if session.phase != Phase::Active {
            return FlipOutcome::Ignored;
        }
        let Board::Pairs(board) = &mut session.board else {
            return FlipOutcome::Ignored;
        };
        let Some(card) = board.cards.get(index) else {
            return FlipOutcome::Ignored;
        };
        if card.face_up || card.matched || board.face_up.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        board.cards[index].face_up = true;
        board.face_up.push(index);
        if board.face_up.len() < 2 {
            return FlipOutcome::Flipped;
        }
        board.moves += 1;
        let (first, second) = (board.face_up[0], board.face_up[1]);
        board.face_up.clear();
        board.cards[first].face_up = false;
        board.cards[second].face_up = false;
        if board.cards[first].symbol == board.cards[second].symbol {
            board.cards[first].matched = true;
            board.cards[second].matched = true;
            board.matched_pairs += 1;
            if board.matched_pairs == board.total_pairs() {
                session.phase = Phase::Solved;
                session.remaining = None;
                progress.record(session.kind);
                gifts.mark_solved(session.gift_id);
                return FlipOutcome::Solved;
            }
            FlipOutcome::Matched
        } else {
            FlipOutcome::Mismatch {
                first: board.cards[first].symbol.clone(),
                second: board.cards[second].symbol.clone(),
            }
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::loader::parse_card;

    fn card() -> CardConfig {
        parse_card(
            r#"
            [date]
            prompt = "Our day?"
            day = 14
            month = 9

            [assembly]
            prompt = "Three words"
            words = ["ANH", "YÊU", "EM"]
            decoys = ["X", "Z", "Q", "K"]

            [equation]
            prompt = "You + me = ?"
            correct = "heart"
            [[equation.options]]
            id = "heart"
            label = "Love"
            [[equation.options]]
            id = "star"
            label = "A star"

            [pairs]
            symbols = ["A", "B", "C", "D", "E", "F"]
        "#,
        )
        .unwrap()
    }

    struct Fixture {
        card: CardConfig,
        gifts: GiftTable,
        progress: ProgressTracker,
        sessions: SessionController,
    }

    fn fixture() -> Fixture {
        Fixture {
            card: card(),
            gifts: GiftTable::standard(),
            progress: ProgressTracker::new(),
            sessions: SessionController::seeded(7),
        }
    }

    fn gift_for(gifts: &GiftTable, kind: PuzzleKind) -> GiftId {
        gifts
            .iter()
            .find(|g| g.kind == Some(kind))
            .map(|g| g.id)
            .unwrap()
    }

    /// Solves the active pair-matching session by flipping cards by symbol.
    fn solve_pairs(fx: &mut Fixture) -> FlipOutcome {
        let mut last = FlipOutcome::Ignored;
        for symbol in ["A", "B", "C", "D", "E", "F"] {
            let indices: Vec<usize> = match &fx.sessions.session().unwrap().board {
                Board::Pairs(board) => board
                    .cards
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.symbol == symbol)
                    .map(|(i, _)| i)
                    .collect(),
                _ => panic!("not a pair board"),
            };
            for i in indices {
                last = fx.sessions.flip_card(i, &mut fx.progress, &mut fx.gifts);
            }
        }
        last
    }

    #[test]
    fn each_kind_collects_its_piece_exactly_once() {
        let mut fx = fixture();

        let id = gift_for(&fx.gifts, PuzzleKind::DateRecall);
        fx.sessions
            .open(PuzzleKind::DateRecall, id, &fx.gifts, &fx.card)
            .unwrap();
        let outcome = fx.sessions.submit(
            &Answer::Date("14/9".into()),
            &fx.card,
            &mut fx.progress,
            &mut fx.gifts,
        );
        assert_eq!(outcome, SubmitOutcome::Solved);
        assert_eq!(fx.progress.count_collected(), 1);
        assert!(fx.gifts.get(id).unwrap().solved);

        // A repeated submission in Solved is ignored and counts nothing.
        let outcome = fx.sessions.submit(
            &Answer::Date("14/9".into()),
            &fx.card,
            &mut fx.progress,
            &mut fx.gifts,
        );
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(fx.progress.count_collected(), 1);

        let id = gift_for(&fx.gifts, PuzzleKind::ChoiceEquation);
        fx.sessions
            .open(PuzzleKind::ChoiceEquation, id, &fx.gifts, &fx.card)
            .unwrap();
        fx.sessions.submit(
            &Answer::Choice("heart".into()),
            &fx.card,
            &mut fx.progress,
            &mut fx.gifts,
        );
        assert_eq!(fx.progress.count_collected(), 2);
    }

    #[test]
    fn solved_gift_cannot_be_reopened() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::DateRecall);
        fx.sessions
            .open(PuzzleKind::DateRecall, id, &fx.gifts, &fx.card)
            .unwrap();
        fx.sessions.submit(
            &Answer::Date("14-09".into()),
            &fx.card,
            &mut fx.progress,
            &mut fx.gifts,
        );
        assert!(fx
            .sessions
            .open(PuzzleKind::DateRecall, id, &fx.gifts, &fx.card)
            .is_none());
    }

    #[test]
    fn wrong_answer_fails_and_retry_restores_active() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::DateRecall);
        fx.sessions
            .open(PuzzleKind::DateRecall, id, &fx.gifts, &fx.card)
            .unwrap();
        let outcome = fx.sessions.submit(
            &Answer::Date("9/14".into()),
            &fx.card,
            &mut fx.progress,
            &mut fx.gifts,
        );
        assert_eq!(outcome, SubmitOutcome::Wrong);
        assert_eq!(fx.sessions.session().unwrap().phase, Phase::Failed);
        assert_eq!(fx.progress.count_collected(), 0);
        assert!(!fx.gifts.get(id).unwrap().solved);

        fx.sessions.retry(&fx.card).unwrap();
        assert_eq!(fx.sessions.session().unwrap().phase, Phase::Active);
    }

    #[test]
    fn assembly_board_matches_word_shape() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::WordAssembly);
        fx.sessions
            .open(PuzzleKind::WordAssembly, id, &fx.gifts, &fx.card)
            .unwrap();
        let Board::Assembly(board) = &fx.sessions.session().unwrap().board else {
            panic!("expected an assembly board");
        };
        // 8 real letters plus 4 decoys.
        assert_eq!(board.tiles.len(), 12);
        assert_eq!(board.slot_lens, [3, 3, 2]);
        assert_eq!(board.active_slot, 0);
    }

    #[test]
    fn assembly_solves_via_placed_letters() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::WordAssembly);
        fx.sessions
            .open(PuzzleKind::WordAssembly, id, &fx.gifts, &fx.card)
            .unwrap();

        // Place the target words letter by letter, relying on the cursor
        // advancing to the next slot when one fills.
        for word in ["ANH", "YÊU", "EM"] {
            for letter in word.chars() {
                let index = match &fx.sessions.session().unwrap().board {
                    Board::Assembly(board) => board
                        .tiles
                        .iter()
                        .position(|t| !t.used && t.letter == letter)
                        .unwrap(),
                    _ => unreachable!(),
                };
                assert!(fx.sessions.place_letter(index));
            }
        }
        let outcome = fx.sessions.submit(
            &Answer::Assembly,
            &fx.card,
            &mut fx.progress,
            &mut fx.gifts,
        );
        assert_eq!(outcome, SubmitOutcome::Solved);
        assert!(fx.progress.is_collected(PuzzleKind::WordAssembly));
    }

    #[test]
    fn reordered_assembly_is_wrong() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::WordAssembly);
        fx.sessions
            .open(PuzzleKind::WordAssembly, id, &fx.gifts, &fx.card)
            .unwrap();
        for word in ["EMX", "YÊU", "AN"] {
            for letter in word.chars() {
                let index = match &fx.sessions.session().unwrap().board {
                    Board::Assembly(board) => board
                        .tiles
                        .iter()
                        .position(|t| !t.used && t.letter == letter)
                        .unwrap(),
                    _ => unreachable!(),
                };
                fx.sessions.place_letter(index);
            }
        }
        let outcome = fx.sessions.submit(
            &Answer::Assembly,
            &fx.card,
            &mut fx.progress,
            &mut fx.gifts,
        );
        assert_eq!(outcome, SubmitOutcome::Wrong);
    }

    #[test]
    fn assembly_times_out_and_clears_progress() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::WordAssembly);
        let session_id = fx
            .sessions
            .open(PuzzleKind::WordAssembly, id, &fx.gifts, &fx.card)
            .unwrap();
        fx.sessions.place_letter(0);

        let mut last = TickOutcome::Ignored;
        for _ in 0..45 {
            last = fx.sessions.tick(session_id);
        }
        assert_eq!(last, TickOutcome::TimedOut);
        let session = fx.sessions.session().unwrap();
        assert_eq!(session.phase, Phase::TimedOut);
        let Board::Assembly(board) = &session.board else {
            panic!();
        };
        assert_eq!(board.unplaced_count(), board.tiles.len());
        assert!(board.placed.iter().all(|s| s.is_empty()));

        // A fresh re-initialization is required; retry provides it.
        let new_id = fx.sessions.retry(&fx.card).unwrap();
        assert_ne!(new_id, session_id);
        assert_eq!(
            fx.sessions.session().unwrap().remaining,
            Some(fx.card.assembly.time_limit_seconds)
        );
    }

    #[test]
    fn reshuffle_fires_every_interval_without_resetting_countdown() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::WordAssembly);
        let session_id = fx
            .sessions
            .open(PuzzleKind::WordAssembly, id, &fx.gifts, &fx.card)
            .unwrap();
        for i in 1..=4 {
            assert_eq!(
                fx.sessions.tick(session_id),
                TickOutcome::Running { remaining: 45 - i }
            );
        }
        assert_eq!(
            fx.sessions.tick(session_id),
            TickOutcome::Reshuffled { remaining: 40 }
        );
        assert_eq!(
            fx.sessions.tick(session_id),
            TickOutcome::Running { remaining: 39 }
        );
    }

    #[test]
    fn reshuffle_still_fires_while_decoys_remain_unplaced() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::WordAssembly);
        let session_id = fx
            .sessions
            .open(PuzzleKind::WordAssembly, id, &fx.gifts, &fx.card)
            .unwrap();
        // Fill all three slots (8 tiles); the 4 decoys stay in the pool.
        for _ in 0..8 {
            let index = match &fx.sessions.session().unwrap().board {
                Board::Assembly(board) => board.tiles.iter().position(|t| !t.used).unwrap(),
                _ => unreachable!(),
            };
            fx.sessions.place_letter(index);
        }
        // 4 decoys still unplaced, so the reshuffle still fires.
        for _ in 0..4 {
            fx.sessions.tick(session_id);
        }
        assert!(matches!(
            fx.sessions.tick(session_id),
            TickOutcome::Reshuffled { .. }
        ));
    }

    #[test]
    fn pairs_solve_before_timeout_cancels_timer() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::PairMatching);
        let session_id = fx
            .sessions
            .open(PuzzleKind::PairMatching, id, &fx.gifts, &fx.card)
            .unwrap();
        fx.sessions.tick(session_id);

        let last = solve_pairs(&mut fx);
        assert_eq!(last, FlipOutcome::Solved);
        let session = fx.sessions.session().unwrap();
        assert_eq!(session.phase, Phase::Solved);
        assert_eq!(session.remaining, None);
        assert!(fx.progress.is_collected(PuzzleKind::PairMatching));
        assert!(fx.gifts.get(id).unwrap().solved);

        // The timer is cancelled: further ticks change nothing.
        assert_eq!(fx.sessions.tick(session_id), TickOutcome::Ignored);
    }

    #[test]
    fn pairs_mismatch_turns_both_back() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::PairMatching);
        fx.sessions
            .open(PuzzleKind::PairMatching, id, &fx.gifts, &fx.card)
            .unwrap();
        let (a, b) = match &fx.sessions.session().unwrap().board {
            Board::Pairs(board) => {
                let a = 0;
                let b = board
                    .cards
                    .iter()
                    .position(|c| c.symbol != board.cards[a].symbol)
                    .unwrap();
                (a, b)
            }
            _ => unreachable!(),
        };
        assert_eq!(
            fx.sessions.flip_card(a, &mut fx.progress, &mut fx.gifts),
            FlipOutcome::Flipped
        );
        let outcome = fx.sessions.flip_card(b, &mut fx.progress, &mut fx.gifts);
        assert!(matches!(outcome, FlipOutcome::Mismatch { .. }));
        match &fx.sessions.session().unwrap().board {
            Board::Pairs(board) => {
                assert!(!board.cards[a].face_up && !board.cards[b].face_up);
                assert_eq!(board.moves, 1);
                assert_eq!(board.matched_pairs, 0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn pairs_timeout_wipes_the_board() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::PairMatching);
        let session_id = fx
            .sessions
            .open(PuzzleKind::PairMatching, id, &fx.gifts, &fx.card)
            .unwrap();
        // Match one pair, then let the clock run out.
        let indices: Vec<usize> = match &fx.sessions.session().unwrap().board {
            Board::Pairs(board) => board
                .cards
                .iter()
                .enumerate()
                .filter(|(_, c)| c.symbol == "A")
                .map(|(i, _)| i)
                .collect(),
            _ => unreachable!(),
        };
        fx.sessions.flip_card(indices[0], &mut fx.progress, &mut fx.gifts);
        fx.sessions.flip_card(indices[1], &mut fx.progress, &mut fx.gifts);

        for _ in 0..30 {
            fx.sessions.tick(session_id);
        }
        let session = fx.sessions.session().unwrap();
        assert_eq!(session.phase, Phase::TimedOut);
        match &session.board {
            Board::Pairs(board) => {
                assert_eq!(board.matched_pairs, 0);
                assert!(board.cards.iter().all(|c| !c.matched && !c.face_up));
            }
            _ => unreachable!(),
        }
        // Flips are ignored until a fresh session.
        assert_eq!(
            fx.sessions.flip_card(0, &mut fx.progress, &mut fx.gifts),
            FlipOutcome::Ignored
        );
    }

    #[test]
    fn stale_tick_after_close_is_a_no_op() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::PairMatching);
        let stale = fx
            .sessions
            .open(PuzzleKind::PairMatching, id, &fx.gifts, &fx.card)
            .unwrap();
        fx.sessions.close();
        assert_eq!(fx.sessions.tick(stale), TickOutcome::Ignored);
        assert!(fx.sessions.session().is_none());
    }

    #[test]
    fn stale_tick_after_superseding_open_is_a_no_op() {
        let mut fx = fixture();
        let pairs_gift = gift_for(&fx.gifts, PuzzleKind::PairMatching);
        let assembly_gift = gift_for(&fx.gifts, PuzzleKind::WordAssembly);
        let stale = fx
            .sessions
            .open(PuzzleKind::PairMatching, pairs_gift, &fx.gifts, &fx.card)
            .unwrap();
        // Opening a new session implicitly closes the previous one.
        let fresh = fx
            .sessions
            .open(PuzzleKind::WordAssembly, assembly_gift, &fx.gifts, &fx.card)
            .unwrap();
        assert_ne!(stale, fresh);
        assert_eq!(fx.sessions.tick(stale), TickOutcome::Ignored);
        assert_eq!(
            fx.sessions.session().unwrap().remaining,
            Some(fx.card.assembly.time_limit_seconds)
        );
    }

    #[test]
    fn submit_while_idle_is_ignored() {
        let mut fx = fixture();
        let outcome = fx.sessions.submit(
            &Answer::Date("14/9".into()),
            &fx.card,
            &mut fx.progress,
            &mut fx.gifts,
        );
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(fx.progress.count_collected(), 0);
    }

    #[test]
    fn reset_assembly_returns_tiles_without_touching_the_clock() {
        let mut fx = fixture();
        let id = gift_for(&fx.gifts, PuzzleKind::WordAssembly);
        let session_id = fx
            .sessions
            .open(PuzzleKind::WordAssembly, id, &fx.gifts, &fx.card)
            .unwrap();
        fx.sessions.tick(session_id);
        fx.sessions.place_letter(0);
        fx.sessions.place_letter(1);
        fx.sessions.reset_assembly();
        let session = fx.sessions.session().unwrap();
        assert_eq!(session.remaining, Some(44));
        match &session.board {
            Board::Assembly(board) => {
                assert_eq!(board.unplaced_count(), board.tiles.len());
            }
            _ => unreachable!(),
        }
    }
}
