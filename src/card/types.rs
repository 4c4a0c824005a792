use serde::Deserialize;

/// Everything personal about the card lives in one TOML file: puzzle
/// answers, distractors, timer durations, and the memory-book pages.
#[derive(Debug, Deserialize)]
pub struct CardConfig {
    pub date: DatePuzzle,
    pub assembly: AssemblyPuzzle,
    pub equation: EquationPuzzle,
    pub pairs: PairsPuzzle,
    #[serde(rename = "page", default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub struct DatePuzzle {
    pub prompt: String,
    pub day: u32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct AssemblyPuzzle {
    pub prompt: String,
    /// Exactly three target words, matched in this order.
    pub words: Vec<String>,
    /// Decoy letters mixed into the tile pool, one letter each.
    #[serde(default)]
    pub decoys: Vec<String>,
    #[serde(default = "default_assembly_seconds")]
    pub time_limit_seconds: u32,
    #[serde(default = "default_reshuffle_seconds")]
    pub reshuffle_seconds: u32,
}

#[derive(Debug, Deserialize)]
pub struct EquationPuzzle {
    pub prompt: String,
    pub options: Vec<EquationOption>,
    pub correct: String,
}

#[derive(Debug, Deserialize)]
pub struct EquationOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct PairsPuzzle {
    /// Exactly six symbols; each appears on two cards.
    pub symbols: Vec<String>,
    #[serde(default = "default_pairs_seconds")]
    pub time_limit_seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub date: String,
    pub message: String,
    #[serde(default)]
    pub photo: Option<String>,
}

fn default_assembly_seconds() -> u32 {
    45
}

fn default_reshuffle_seconds() -> u32 {
    5
}

fn default_pairs_seconds() -> u32 {
    30
}

impl AssemblyPuzzle {
    /// The three targets as an array. Only valid after loader validation.
    pub fn targets(&self) -> [&str; 3] {
        [&self.words[0], &self.words[1], &self.words[2]]
    }

    pub fn word_lengths(&self) -> [usize; 3] {
        self.targets().map(|w| w.chars().count())
    }
}
