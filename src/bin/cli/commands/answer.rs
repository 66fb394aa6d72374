use anyhow::Result;

use flashbox_lib::dates;
use flashbox_lib::flashcards::update_progress;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, card_id: &str, correct: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = app.load_cards()?;
    let card = app.find_card(&cards, card_id)?;

    let progress = update_progress(&app.load_progress()?, &card.id, correct);
    app.save_progress(&progress)?;

    let mut tally = app.load_tally()?;
    tally.record(correct);
    app.save_tally(&tally)?;

    let Some(entry) = progress.get(&card.id) else {
        anyhow::bail!("Progress for '{}' was not recorded", card.id);
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": card.id,
                "correct": correct,
                "box": entry.leitner_box.number(),
                "next": dates::to_iso_string(entry.next),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let verdict = if correct {
                terminal::paint("correct", Color::GREEN, use_color)
            } else {
                terminal::paint("again", Color::RED, use_color)
            };
            println!("{} ({}): {}", card.front, card.id, verdict);
            println!(
                "  Box {}, next review {}",
                entry.leitner_box.number(),
                dates::format_date(entry.next)
            );
        }
    }

    Ok(())
}
