use anyhow::{bail, Context, Result};

use flashbox_lib::deck::{import::split_back, unique_card_id, validate_deck};
use flashbox_lib::flashcards::Card;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    id: Option<String>,
    front: &str,
    back: &str,
    category: &str,
    format: &OutputFormat,
) -> Result<()> {
    let mut cards = app.deck.load().context("Failed to load deck")?;

    let id = id.unwrap_or_else(|| unique_card_id(&cards));
    let card = Card::new(id, front.trim(), split_back(back), category.trim());
    cards.push(card.clone());

    // Only the new row can be invalid if the existing deck was saved through validation
    let errors = validate_deck(&cards);
    if !errors.is_empty() {
        bail!(
            "Card not added:\n{}",
            errors.iter().map(|e| format!("  {}", e)).collect::<Vec<_>>().join("\n")
        );
    }

    app.deck.save(&cards).context("Failed to save deck")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Added card \"{}\" to {}", card.front, app.deck.path().display());
            println!("  ID: {}", card.id);
            println!("  Category: {}", card.category);
            println!("  Back: {}", card.back.join(" / "));
        }
    }

    Ok(())
}
