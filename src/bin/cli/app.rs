use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use flashbox_lib::config::AppConfig;
use flashbox_lib::dates;
use flashbox_lib::flashcards::filters::CardFilter;
use flashbox_lib::flashcards::session::DailyTally;
use flashbox_lib::flashcards::storage::{
    default_data_dir, DeckStorage, JsonProgressStore, TallyStorage,
};
use flashbox_lib::flashcards::{Card, ProgressMap, ProgressStore};

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub deck: DeckStorage,
    pub progress_store: Box<dyn ProgressStore>,
    pub tally_storage: TallyStorage,
}

impl App {
    /// Initialize from the given or default data directory
    pub fn new(data_dir: Option<&Path>, deck_override: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir().context("Failed to get data directory")?,
        };

        let config = AppConfig::load(&data_dir)
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;

        let deck_path = match deck_override {
            Some(path) => path.to_path_buf(),
            None => config.deck_path(&data_dir),
        };
        log::debug!("Using deck {}", deck_path.display());

        Ok(Self {
            deck: DeckStorage::new(deck_path),
            progress_store: Box::new(JsonProgressStore::new(config.progress_path(&data_dir))),
            tally_storage: TallyStorage::new(config.tally_path(&data_dir)),
            data_dir,
            config,
        })
    }

    /// Load the deck, failing with a hint when there is none
    pub fn load_cards(&self) -> Result<Vec<Card>> {
        let cards = self.deck.load()
            .with_context(|| format!("Failed to load deck {}", self.deck.path().display()))?;
        if cards.is_empty() && !self.deck.exists() {
            bail!(
                "No deck at {}. Create one with `flashbox import <file.csv>` or `flashbox add`.",
                self.deck.path().display()
            );
        }
        Ok(cards)
    }

    /// Deck cards matching the category / search filter
    pub fn filtered_cards(&self, cards: &[Card], category: Option<&str>, search: Option<&str>) -> Vec<Card> {
        let filter = CardFilter::new(category, search);
        filter.apply(cards).into_iter().cloned().collect()
    }

    pub fn load_progress(&self) -> Result<ProgressMap> {
        self.progress_store.load().context("Failed to load progress")
    }

    pub fn save_progress(&self, progress: &ProgressMap) -> Result<()> {
        self.progress_store.save(progress).context("Failed to save progress")
    }

    /// Today's tally; counts from an earlier day are dropped
    pub fn load_tally(&self) -> Result<DailyTally> {
        let stored = self.tally_storage.load().context("Failed to load today's tally")?;
        Ok(DailyTally::for_day(stored, dates::local_date(dates::today())))
    }

    pub fn save_tally(&self, tally: &DailyTally) -> Result<()> {
        self.tally_storage.save(tally).context("Failed to save today's tally")
    }

    /// Find a card by exact id, suggesting ids that share the given prefix
    pub fn find_card(&self, cards: &[Card], card_id: &str) -> Result<Card> {
        if let Some(card) = cards.iter().find(|c| c.id == card_id) {
            return Ok(card.clone());
        }

        let matches: Vec<&Card> = cards.iter()
            .filter(|c| c.id.starts_with(card_id))
            .collect();

        if matches.is_empty() {
            bail!("No card with id '{}' in {}", card_id, self.deck.path().display());
        }
        bail!("No card with id '{}'. Did you mean:\n{}", card_id,
            matches.iter().map(|c| format!("  - {} ({})", c.id, c.front)).collect::<Vec<_>>().join("\n"))
    }
}
