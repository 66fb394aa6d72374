//! Data models for the flashcard system

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates;

/// A flashcard with a prompt (front) and one or more answer lines (back)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub front: String,
    #[serde(default)]
    pub back: Vec<String>,
    #[serde(default)]
    pub category: String,
}

impl Card {
    pub fn new(id: impl Into<String>, front: impl Into<String>, back: Vec<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            back,
            category: category.into(),
        }
    }
}

/// Leitner box a card currently sits in
///
/// Box 1 is reviewed every day, box 3 is the "mastered" box with the longest
/// interval. Stored as the integer 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum LeitnerBox {
    #[default]
    One,
    Two,
    Three,
}

impl LeitnerBox {
    pub const ALL: [LeitnerBox; 3] = [LeitnerBox::One, LeitnerBox::Two, LeitnerBox::Three];

    /// Box number, 1 through 3
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Next box after a correct answer; box 3 stays in box 3
    pub fn promoted(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two | Self::Three => Self::Three,
        }
    }

    /// Days until the next review for a card that just landed in this box
    pub fn interval_days(self) -> i32 {
        match self {
            Self::One => 0,
            Self::Two => 3,
            Self::Three => 7,
        }
    }
}

impl From<LeitnerBox> for u8 {
    fn from(value: LeitnerBox) -> Self {
        value.number()
    }
}

/// Out-of-range box numbers from stored snapshots are clamped into 1..=3.
impl From<i64> for LeitnerBox {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            n if n < 1 => {
                log::warn!("Progress entry has box {}, clamping to box 1", n);
                Self::One
            }
            n => {
                log::warn!("Progress entry has box {}, clamping to box 3", n);
                Self::Three
            }
        }
    }
}

/// Scheduling state for a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardProgress {
    #[serde(rename = "box")]
    pub leitner_box: LeitnerBox,
    /// Midnight of the day the card is next due
    #[serde(with = "dates::iso_millis")]
    pub next: DateTime<Utc>,
}

impl CardProgress {
    pub fn new(leitner_box: LeitnerBox, next: DateTime<Utc>) -> Self {
        Self { leitner_box, next }
    }

    /// Implicit state of a card that has never been answered
    pub fn initial(today: DateTime<Utc>) -> Self {
        Self::new(LeitnerBox::One, today)
    }

    pub fn is_due_on(&self, today: DateTime<Utc>) -> bool {
        dates::is_due_on(self.next, today)
    }
}

/// Per-card progress keyed by card id
///
/// Only cards that have been answered at least once have an entry. The map
/// is used as a value: scheduling returns a new map and leaves the old one
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<String, CardProgress>);

impl ProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, card_id: &str) -> Option<&CardProgress> {
        self.0.get(card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.0.contains_key(card_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CardProgress)> {
        self.0.iter().map(|(id, progress)| (id.as_str(), progress))
    }

    pub fn values(&self) -> impl Iterator<Item = &CardProgress> {
        self.0.values()
    }

    /// Copy of this map with `card_id`'s entry replaced
    pub fn with_entry(&self, card_id: &str, progress: CardProgress) -> Self {
        let mut next = self.0.clone();
        next.insert(card_id.to_string(), progress);
        Self(next)
    }
}

impl FromIterator<(String, CardProgress)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (String, CardProgress)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Number of progress entries in each box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxCounts {
    pub box1: usize,
    pub box2: usize,
    pub box3: usize,
}

impl BoxCounts {
    pub fn add(&mut self, leitner_box: LeitnerBox) {
        match leitner_box {
            LeitnerBox::One => self.box1 += 1,
            LeitnerBox::Two => self.box2 += 1,
            LeitnerBox::Three => self.box3 += 1,
        }
    }

    pub fn get(&self, leitner_box: LeitnerBox) -> usize {
        match leitner_box {
            LeitnerBox::One => self.box1,
            LeitnerBox::Two => self.box2,
            LeitnerBox::Three => self.box3,
        }
    }

    pub fn total(&self) -> usize {
        self.box1 + self.box2 + self.box3
    }

    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.box1, self.box2, self.box3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_box_promotion_saturates() {
        assert_eq!(LeitnerBox::One.promoted(), LeitnerBox::Two);
        assert_eq!(LeitnerBox::Two.promoted(), LeitnerBox::Three);
        assert_eq!(LeitnerBox::Three.promoted(), LeitnerBox::Three);
    }

    #[test]
    fn test_box_intervals() {
        let intervals: Vec<i32> = LeitnerBox::ALL.iter().map(|b| b.interval_days()).collect();
        assert_eq!(intervals, vec![0, 3, 7]);
    }

    #[test]
    fn test_progress_json_shape() {
        let next = Utc.with_ymd_and_hms(2026, 10, 18, 15, 0, 0).unwrap();
        let map = ProgressMap::new().with_entry("c1", CardProgress::new(LeitnerBox::Two, next));

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "c1": { "box": 2, "next": "2026-10-18T15:00:00.000Z" } })
        );
    }

    #[test]
    fn test_progress_reads_stored_snapshot() {
        let raw = r#"{
            "a": { "box": 1, "next": "2025-03-01T15:00:00.000Z" },
            "b": { "box": 3, "next": "2025-03-08T15:00:00Z" }
        }"#;
        let map: ProgressMap = serde_json::from_str(raw).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a").unwrap().leitner_box, LeitnerBox::One);
        assert_eq!(map.get("b").unwrap().leitner_box, LeitnerBox::Three);
        assert_eq!(
            map.get("b").unwrap().next,
            Utc.with_ymd_and_hms(2025, 3, 8, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_box_is_clamped() {
        let raw = r#"{
            "low": { "box": 0, "next": "2025-03-01T00:00:00.000Z" },
            "negative": { "box": -4, "next": "2025-03-01T00:00:00.000Z" },
            "high": { "box": 9, "next": "2025-03-01T00:00:00.000Z" }
        }"#;
        let map: ProgressMap = serde_json::from_str(raw).unwrap();

        assert_eq!(map.get("low").unwrap().leitner_box, LeitnerBox::One);
        assert_eq!(map.get("negative").unwrap().leitner_box, LeitnerBox::One);
        assert_eq!(map.get("high").unwrap().leitner_box, LeitnerBox::Three);
    }

    #[test]
    fn test_non_numeric_box_is_rejected() {
        let raw = r#"{ "a": { "box": "two", "next": "2025-03-01T00:00:00.000Z" } }"#;
        assert!(serde_json::from_str::<ProgressMap>(raw).is_err());
    }

    #[test]
    fn test_with_entry_leaves_original_untouched() {
        let day = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let original = ProgressMap::new().with_entry("a", CardProgress::initial(day));
        let updated = original.with_entry("b", CardProgress::new(LeitnerBox::Three, day));

        assert_eq!(original.len(), 1);
        assert!(!original.contains("b"));
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.get("a"), original.get("a"));
    }

    #[test]
    fn test_card_deserializes_with_missing_optional_fields() {
        let card: Card = serde_json::from_str(r#"{ "id": "x", "front": "猫" }"#).unwrap();
        assert!(card.back.is_empty());
        assert_eq!(card.category, "");
    }
}
