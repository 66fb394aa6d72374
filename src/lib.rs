//! Leitner-box flashcard scheduling
//!
//! The engine lives in [`flashcards::algorithm`]: pure functions over a
//! card list and a [`flashcards::ProgressMap`] snapshot. Everything else
//! (storage, deck import, sessions, config) is built around it for the
//! `flashbox` command-line front end.

pub mod config;
pub mod dates;
pub mod deck;
pub mod flashcards;
