//! Category and keyword filtering of a deck

use super::models::Card;

/// Category value that matches every card
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Exact category, or `None` for all categories
    pub category: Option<String>,
    /// Case-insensitive substring matched against front and back
    pub search: Option<String>,
}

impl CardFilter {
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
            .map(str::to_string);
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        Self { category, search }
    }

    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.search.is_some()
    }

    pub fn matches(&self, card: &Card) -> bool {
        if let Some(category) = &self.category {
            if card.category != *category {
                return false;
            }
        }

        match &self.search {
            Some(term) => {
                card.front.to_lowercase().contains(term)
                    || card.back.iter().any(|line| line.to_lowercase().contains(term))
            }
            None => true,
        }
    }

    pub fn apply<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }
}

/// Distinct non-empty categories, sorted
pub fn categories(cards: &[Card]) -> Vec<String> {
    let mut categories: Vec<String> = cards
        .iter()
        .map(|c| c.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}
