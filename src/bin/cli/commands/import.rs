use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use flashbox_lib::deck::{parse_csv, validate_deck};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, path: &Path, dry_run: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read CSV from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let cards = parse_csv(&content).context("Failed to parse CSV")?;
    let errors = validate_deck(&cards);

    if let OutputFormat::Json = format {
        let output = serde_json::json!({
            "cards": cards.len(),
            "errors": errors,
            "saved": errors.is_empty() && !dry_run,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for error in &errors {
            eprintln!("{}", terminal::paint(&error.to_string(), Color::RED, use_color));
        }
    }

    if !errors.is_empty() {
        bail!("Deck not saved: {} invalid row(s)", errors.len());
    }

    if dry_run {
        if let OutputFormat::Plain = format {
            println!("{} cards are valid (dry run, nothing saved)", cards.len());
        }
        return Ok(());
    }

    app.deck.save(&cards).context("Failed to save deck")?;

    // Progress for cards that left the deck is kept; it is simply never due-listed
    let progress = app.load_progress()?;
    let orphaned = progress.iter()
        .filter(|(id, _)| !cards.iter().any(|c| c.id == *id))
        .count();
    if orphaned > 0 {
        log::info!("{} progress entries belong to cards not in the new deck", orphaned);
    }

    if let OutputFormat::Plain = format {
        println!("Imported {} cards into {}", cards.len(), app.deck.path().display());
    }

    Ok(())
}
