//! CSV deck import
//!
//! Expected columns (header row required, any order, case-insensitive):
//! `id,front,back,category`. The `back` column holds one or more answer
//! lines separated by `;`. Missing columns read as empty strings so that
//! validation can report them per row.

use std::fs;
use std::path::Path;

use super::{DeckError, Result};
use crate::flashcards::Card;

/// Separator between answer lines in the `back` column
pub const BACK_SEPARATOR: char = ';';

/// Parse CSV text into cards without validating them
pub fn parse_csv(content: &str) -> Result<Vec<Card>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (id_col, front_col, back_col, category_col) =
        (column("id"), column("front"), column("back"), column("category"));

    if front_col.is_none() {
        log::warn!("CSV header has no 'front' column: {:?}", headers);
    }

    let mut cards = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let field = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        cards.push(Card {
            id: field(id_col),
            front: field(front_col),
            back: split_back(&field(back_col)),
            category: field(category_col),
        });
    }

    log::info!("Parsed {} cards from CSV", cards.len());
    Ok(cards)
}

/// Read and parse a CSV file
pub fn parse_csv_file(path: &Path) -> Result<Vec<Card>> {
    let content = fs::read_to_string(path)?;
    parse_csv(&content)
}

/// Parse CSV text and reject the deck if any row is invalid
pub fn import_csv(content: &str) -> Result<Vec<Card>> {
    let cards = parse_csv(content)?;
    let errors = super::validate_deck(&cards);
    if !errors.is_empty() {
        return Err(DeckError::Invalid(errors));
    }
    Ok(cards)
}

/// Split the `back` column into trimmed, non-empty answer lines
pub fn split_back(raw: &str) -> Vec<String> {
    raw.split(BACK_SEPARATOR)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
