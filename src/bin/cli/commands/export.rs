use std::path::Path;

use anyhow::{bail, Context, Result};

use flashbox_lib::deck::validate_deck;
use flashbox_lib::flashcards::storage::DeckStorage;

use crate::app::App;

pub fn run(app: &App, path: &Path) -> Result<()> {
    let cards = app.load_cards()?;

    let errors = validate_deck(&cards);
    if !errors.is_empty() {
        bail!(
            "Fix the deck before exporting:\n{}",
            errors.iter().map(|e| format!("  {}", e)).collect::<Vec<_>>().join("\n")
        );
    }

    if path == Path::new("-") {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    DeckStorage::new(path.to_path_buf())
        .save(&cards)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Exported {} cards to {}", cards.len(), path.display());

    Ok(())
}
