//! Built-in flashcard content.

use crate::error::Result;
use study_core::CardContent;

const BUILTIN_FLASHCARDS: &str = include_str!("../data/flashcards.json");

/// Parse a JSON array of flashcard content.
pub fn parse(json: &str) -> Result<Vec<CardContent>> {
    Ok(serde_json::from_str(json)?)
}

/// The flashcards shipped with the application.
pub fn builtin() -> Result<Vec<CardContent>> {
    parse(BUILTIN_FLASHCARDS)
}
