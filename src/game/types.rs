/// The four mini-puzzles. Each kind owns exactly one piece slot (0-3)
/// and one icon; all four pieces are needed to open the main gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleKind {
    DateRecall,
    WordAssembly,
    ChoiceEquation,
    PairMatching,
}

pub const PIECE_COUNT: usize = 4;

impl PuzzleKind {
    pub const ALL: [PuzzleKind; PIECE_COUNT] = [
        PuzzleKind::DateRecall,
        PuzzleKind::WordAssembly,
        PuzzleKind::ChoiceEquation,
        PuzzleKind::PairMatching,
    ];

    pub fn slot(self) -> usize {
        match self {
            PuzzleKind::DateRecall => 0,
            PuzzleKind::WordAssembly => 1,
            PuzzleKind::ChoiceEquation => 2,
            PuzzleKind::PairMatching => 3,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PuzzleKind::DateRecall => "❤️",
            PuzzleKind::WordAssembly => "💎",
            PuzzleKind::ChoiceEquation => "⭐",
            PuzzleKind::PairMatching => "🎄",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PuzzleKind::DateRecall => "The Red Gift",
            PuzzleKind::WordAssembly => "The Green Gift",
            PuzzleKind::ChoiceEquation => "The Blue Gift",
            PuzzleKind::PairMatching => "The Purple Gift",
        }
    }
}

pub type GiftId = usize;

/// One clickable box in the scene. Puzzle gifts carry a kind and become
/// `solved` permanently on a correct submission; the main gift carries no
/// kind and is gated by the unlock decision; decorations do nothing.
#[derive(Debug)]
pub struct Gift {
    pub id: GiftId,
    pub name: &'static str,
    pub kind: Option<PuzzleKind>,
    pub solved: bool,
    pub is_main: bool,
}

#[derive(Debug)]
pub struct GiftTable {
    gifts: Vec<Gift>,
}

impl GiftTable {
    /// The card's fixed layout: one gift per puzzle, the main gift, and
    /// two decorations that are only there to look pretty.
    pub fn standard() -> Self {
        let mut gifts = Vec::new();
        let mut push = |name, kind, is_main| {
            let id = gifts.len();
            gifts.push(Gift {
                id,
                name,
                kind,
                solved: false,
                is_main,
            });
        };
        push("Red gift", Some(PuzzleKind::DateRecall), false);
        push("Green gift", Some(PuzzleKind::WordAssembly), false);
        push("Blue gift", Some(PuzzleKind::ChoiceEquation), false);
        push("Purple gift", Some(PuzzleKind::PairMatching), false);
        push("Big white gift", None, true);
        push("Teal gift", None, false);
        push("Orange gift", None, false);
        GiftTable { gifts }
    }

    pub fn get(&self, id: GiftId) -> Option<&Gift> {
        self.gifts.get(id)
    }

    pub fn mark_solved(&mut self, id: GiftId) {
        if let Some(gift) = self.gifts.get_mut(id) {
            gift.solved = true;
        }
    }

    pub fn main_gift(&self) -> &Gift {
        self.gifts
            .iter()
            .find(|g| g.is_main)
            .expect("gift table always contains a main gift")
    }

    pub fn main_gift_id(&self) -> GiftId {
        self.main_gift().id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gift> {
        self.gifts.iter()
    }

    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }
}
