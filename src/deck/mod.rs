//! Deck authoring helpers: CSV import, validation and card ids
//!
//! The scheduler assumes every card has a unique, non-empty id. This module
//! is where decks are checked before they are saved and studied.

pub mod import;

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::flashcards::Card;

pub use import::{import_csv, parse_csv, parse_csv_file};

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Deck has {} invalid row(s)", .0.len())]
    Invalid(Vec<RowErrors>),
}

pub type Result<T> = std::result::Result<T, DeckError>;

/// Validation problems found in one deck row (0-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowErrors {
    pub row: usize,
    pub messages: Vec<String>,
}

impl fmt::Display for RowErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row + 1, self.messages.join(", "))
    }
}

/// Check required fields and id uniqueness. An empty result means the deck is valid.
pub fn validate_deck(cards: &[Card]) -> Vec<RowErrors> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut errors = Vec::new();

    for (row, card) in cards.iter().enumerate() {
        let mut messages = Vec::new();

        if card.id.trim().is_empty() {
            messages.push("ID is required".to_string());
        }
        if card.front.trim().is_empty() {
            messages.push("Front is required".to_string());
        }
        if card.back.iter().all(|line| line.trim().is_empty()) {
            messages.push("Back is required".to_string());
        }
        if card.category.trim().is_empty() {
            messages.push("Category is required".to_string());
        }

        if !card.id.is_empty() && !seen.insert(card.id.as_str()) {
            messages.push("ID must be unique".to_string());
        }

        if !messages.is_empty() {
            errors.push(RowErrors { row, messages });
        }
    }

    errors
}

/// Id for a card added by hand, e.g. `card-1760745600000`
pub fn new_card_id() -> String {
    format!("card-{}", Utc::now().timestamp_millis())
}

/// Id not yet used in `cards`, based on [`new_card_id`]
pub fn unique_card_id(cards: &[Card]) -> String {
    let base = new_card_id();
    if !cards.iter().any(|c| c.id == base) {
        return base;
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !cards.iter().any(|c| &c.id == candidate))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_card(id: &str) -> Card {
        Card::new(id, "front", vec!["back".to_string()], "category")
    }

    #[test]
    fn test_valid_deck_has_no_errors() {
        let cards = vec![valid_card("a"), valid_card("b")];
        assert!(validate_deck(&cards).is_empty());
    }

    #[test]
    fn test_empty_deck_is_valid() {
        assert!(validate_deck(&[]).is_empty());
    }

    #[test]
    fn test_missing_fields_reported_per_row() {
        let cards = vec![
            valid_card("a"),
            Card::new("", "", vec![], ""),
            Card::new("c", "front", vec!["  ".to_string()], "cat"),
        ];

        let errors = validate_deck(&cards);
        assert_eq!(errors.len(), 2);

        assert_eq!(errors[0].row, 1);
        assert_eq!(
            errors[0].messages,
            vec![
                "ID is required",
                "Front is required",
                "Back is required",
                "Category is required",
            ]
        );

        assert_eq!(errors[1].row, 2);
        assert_eq!(errors[1].messages, vec!["Back is required"]);
    }

    #[test]
    fn test_duplicate_ids_flag_later_rows() {
        let cards = vec![valid_card("a"), valid_card("b"), valid_card("a"), valid_card("a")];

        let errors = validate_deck(&cards);
        let rows: Vec<usize> = errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![2, 3]);
        assert_eq!(errors[0].messages, vec!["ID must be unique"]);
    }

    #[test]
    fn test_row_errors_display_is_one_based() {
        let err = RowErrors {
            row: 0,
            messages: vec!["ID is required".to_string(), "Front is required".to_string()],
        };
        assert_eq!(err.to_string(), "row 1: ID is required, Front is required");
    }

    #[test]
    fn test_unique_card_id_avoids_collisions() {
        let first = unique_card_id(&[]);
        assert!(first.starts_with("card-"));

        let cards = vec![valid_card(&first)];
        let second = unique_card_id(&cards);
        assert_ne!(second, first);
        assert!(second.starts_with("card-"));
    }
}
