//! Flashcard study engine
//!
//! This module provides:
//! - Card and progress models
//! - Leitner-box scheduling, due selection and box counts
//! - Progress, deck and tally storage
//! - Deck filtering and review sessions

pub mod algorithm;
pub mod filters;
pub mod models;
pub mod session;
pub mod storage;

pub use algorithm::{
    get_box_counts, get_due_cards, get_due_cards_on, get_filtered_box_counts, update_progress,
    update_progress_on,
};
pub use models::*;
pub use storage::{ProgressStore, StorageError};
