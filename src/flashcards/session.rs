//! Review session over today's due cards
//!
//! The session owns the queue and a working copy of the progress map. Each
//! answer runs through the scheduler; a missed card goes to the back of the
//! queue so it comes up again before the session ends. Persisting the
//! snapshot after every answer is up to the caller.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::algorithm::update_progress_on;
use super::models::{Card, CardProgress, ProgressMap};
use crate::dates;

/// Correct / again counts for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTally {
    pub date: NaiveDate,
    pub correct: u32,
    pub again: u32,
}

impl DailyTally {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            correct: 0,
            again: 0,
        }
    }

    /// Carry a stored tally forward; a tally from another day starts over
    pub fn for_day(stored: Option<DailyTally>, date: NaiveDate) -> Self {
        match stored {
            Some(tally) if tally.date == date => tally,
            _ => Self::new(date),
        }
    }

    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.again += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.again
    }

    /// Share of correct answers in whole percent, 0 when nothing was answered
    pub fn correct_rate(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (f64::from(self.correct) * 100.0 / f64::from(total)).round() as u32
    }
}

/// Result of answering the current card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub card_id: String,
    pub progress: CardProgress,
    /// The card was missed and will be shown again later in this session
    pub requeued: bool,
}

pub struct ReviewSession {
    queue: VecDeque<Card>,
    progress: ProgressMap,
    tally: DailyTally,
    today: DateTime<Utc>,
}

impl ReviewSession {
    pub fn new(due: Vec<Card>, progress: ProgressMap, tally: DailyTally) -> Self {
        Self::starting_on(due, progress, tally, dates::today())
    }

    pub fn starting_on(
        due: Vec<Card>,
        progress: ProgressMap,
        tally: DailyTally,
        today: DateTime<Utc>,
    ) -> Self {
        Self {
            queue: due.into(),
            progress,
            tally,
            today,
        }
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.queue.make_contiguous().shuffle(rng);
    }

    /// Card waiting for an answer
    pub fn current(&self) -> Option<&Card> {
        self.queue.front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Answer the current card. Returns `None` when the queue is empty.
    pub fn answer(&mut self, correct: bool) -> Option<AnswerOutcome> {
        let card = self.queue.pop_front()?;

        self.progress = update_progress_on(&self.progress, &card.id, correct, self.today);
        self.tally.record(correct);

        let progress = self
            .progress
            .get(&card.id)
            .copied()
            .unwrap_or_else(|| CardProgress::initial(self.today));
        let card_id = card.id.clone();

        if !correct {
            self.queue.push_back(card);
        }

        Some(AnswerOutcome {
            card_id,
            progress,
            requeued: !correct,
        })
    }

    /// Progress snapshot including every answer given so far
    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    pub fn tally(&self) -> DailyTally {
        self.tally
    }

    pub fn into_progress(self) -> ProgressMap {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::LeitnerBox;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn cards(ids: &[&str]) -> Vec<Card> {
        ids.iter()
            .map(|id| Card::new(*id, format!("Q {}", id), vec![format!("A {}", id)], "general"))
            .collect()
    }

    fn session(ids: &[&str]) -> ReviewSession {
        ReviewSession::starting_on(
            cards(ids),
            ProgressMap::new(),
            DailyTally::new(day()),
            dates::local_midnight(day()),
        )
    }

    fn queue_ids(session: &ReviewSession) -> Vec<String> {
        session.queue.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_correct_answer_leaves_queue() {
        let mut session = session(&["a", "b"]);

        let outcome = session.answer(true).unwrap();
        assert_eq!(outcome.card_id, "a");
        assert!(!outcome.requeued);
        assert_eq!(outcome.progress.leitner_box, LeitnerBox::Two);
        assert_eq!(queue_ids(&session), vec!["b"]);
    }

    #[test]
    fn test_missed_card_is_replayed_last() {
        let mut session = session(&["a", "b", "c"]);

        let outcome = session.answer(false).unwrap();
        assert!(outcome.requeued);
        assert_eq!(queue_ids(&session), vec!["b", "c", "a"]);
        assert_eq!(session.progress().get("a").unwrap().leitner_box, LeitnerBox::One);
    }

    #[test]
    fn test_session_finishes_once_everything_is_correct() {
        let mut session = session(&["a", "b"]);

        session.answer(false); // a requeued
        session.answer(true); // b
        assert_eq!(session.current().unwrap().id, "a");
        session.answer(true); // a, now box 2

        assert!(session.is_finished());
        assert!(session.answer(true).is_none());
        assert_eq!(session.progress().get("a").unwrap().leitner_box, LeitnerBox::Two);

        let tally = session.tally();
        assert_eq!((tally.correct, tally.again), (2, 1));
    }

    #[test]
    fn test_shuffle_keeps_all_cards() {
        let mut session = session(&["a", "b", "c", "d", "e"]);
        session.shuffle_with(&mut StdRng::seed_from_u64(7));

        let mut ids = queue_ids(&session);
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_correct_rate_rounds() {
        let mut tally = DailyTally::new(day());
        assert_eq!(tally.correct_rate(), 0);

        tally.record(true);
        tally.record(true);
        tally.record(false);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.correct_rate(), 67);
    }

    #[test]
    fn test_tally_resets_on_new_day() {
        let mut yesterday = DailyTally::new(day().pred_opt().unwrap());
        yesterday.record(true);

        let carried = DailyTally::for_day(Some(yesterday), day());
        assert_eq!(carried, DailyTally::new(day()));

        let mut current = DailyTally::new(day());
        current.record(false);
        assert_eq!(DailyTally::for_day(Some(current), day()), current);
    }
}
