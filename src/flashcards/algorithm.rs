//! Leitner-box scheduling
//!
//! Three boxes, answered cards move between them:
//! - correct: one box up (box 3 stays in box 3), due again after the
//!   new box's interval (0, 3 or 7 days)
//! - incorrect: back to box 1, due again today
//!
//! Cards without a progress entry are treated as box 1 and due today.
//! Every function here is pure; the `_on` variants take "today" explicitly
//! and the others read the local clock through [`crate::dates::today`].

use chrono::{DateTime, Utc};

use super::models::{BoxCounts, Card, CardProgress, LeitnerBox, ProgressMap};
use crate::dates;

/// Review interval in days for each box
pub const INTERVALS: [(LeitnerBox, i32); 3] = [
    (LeitnerBox::One, 0),
    (LeitnerBox::Two, 3),
    (LeitnerBox::Three, 7),
];

/// Compute a card's next progress from its current one and an answer
pub fn schedule(current: CardProgress, correct: bool, today: DateTime<Utc>) -> CardProgress {
    if correct {
        let leitner_box = current.leitner_box.promoted();
        CardProgress::new(leitner_box, dates::add_days_from(today, leitner_box.interval_days()))
    } else {
        CardProgress::new(LeitnerBox::One, today)
    }
}

/// Record an answer for `card_id` and return the updated progress map
///
/// The input map is not modified. The card id is not checked against any
/// deck; an unknown (or empty) id simply gets its own entry.
pub fn update_progress(progress: &ProgressMap, card_id: &str, correct: bool) -> ProgressMap {
    update_progress_on(progress, card_id, correct, dates::today())
}

pub fn update_progress_on(
    progress: &ProgressMap,
    card_id: &str,
    correct: bool,
    today: DateTime<Utc>,
) -> ProgressMap {
    let current = progress
        .get(card_id)
        .copied()
        .unwrap_or_else(|| CardProgress::initial(today));

    let next = schedule(current, correct, today);
    log::debug!(
        "Card {:?}: box {} -> box {}, due {}",
        card_id,
        current.leitner_box.number(),
        next.leitner_box.number(),
        dates::format_date(next.next)
    );

    progress.with_entry(card_id, next)
}

/// Cards due for review today, in deck order
pub fn get_due_cards<'a>(cards: &'a [Card], progress: &ProgressMap) -> Vec<&'a Card> {
    get_due_cards_on(cards, progress, dates::today())
}

pub fn get_due_cards_on<'a>(
    cards: &'a [Card],
    progress: &ProgressMap,
    today: DateTime<Utc>,
) -> Vec<&'a Card> {
    cards
        .iter()
        .filter(|card| {
            progress
                .get(&card.id)
                .map_or(true, |entry| entry.is_due_on(today))
        })
        .collect()
}

/// Number of progress entries in each box. Cards never answered are not counted.
pub fn get_box_counts(progress: &ProgressMap) -> BoxCounts {
    let mut counts = BoxCounts::default();
    for entry in progress.values() {
        counts.add(entry.leitner_box);
    }
    counts
}

/// Box counts restricted to the given cards (e.g. a filtered view of the deck)
pub fn get_filtered_box_counts<'a, I>(cards: I, progress: &ProgressMap) -> BoxCounts
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut counts = BoxCounts::default();
    for card in cards {
        if let Some(entry) = progress.get(&card.id) {
            counts.add(entry.leitner_box);
        }
    }
    counts
}
