use anyhow::{ensure, Context, Result};
use std::path::Path;

use super::types::CardConfig;

pub fn load_card(path: &Path) -> Result<CardConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading card file {}", path.display()))?;
    parse_card(&content)
}

pub fn parse_card(content: &str) -> Result<CardConfig> {
    let card: CardConfig = toml::from_str(content)?;
    validate(&card)?;
    Ok(card)
}

fn validate(card: &CardConfig) -> Result<()> {
    ensure!(
        card.assembly.words.len() == 3,
        "assembly puzzle needs exactly 3 words, found {}",
        card.assembly.words.len()
    );
    ensure!(
        card.assembly.words.iter().all(|w| !w.is_empty()),
        "assembly words must not be empty"
    );
    for decoy in &card.assembly.decoys {
        ensure!(
            decoy.chars().count() == 1,
            "decoy {decoy:?} must be a single letter"
        );
    }
    ensure!(
        card.equation
            .options
            .iter()
            .any(|o| o.id == card.equation.correct),
        "equation correct id {:?} is not among the options",
        card.equation.correct
    );
    ensure!(
        card.pairs.symbols.len() == 6,
        "pair matching needs exactly 6 symbols, found {}",
        card.pairs.symbols.len()
    );
    ensure!(
        card.assembly.time_limit_seconds > 0 && card.pairs.time_limit_seconds > 0,
        "time limits must be positive"
    );
    ensure!(
        card.assembly.reshuffle_seconds > 0,
        "reshuffle interval must be positive"
    );
    Ok(())
}
