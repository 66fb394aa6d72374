use anyhow::Result;

use flashbox_lib::dates;
use flashbox_lib::flashcards::get_due_cards;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    category: Option<&str>,
    search: Option<&str>,
    limit: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let cards = app.load_cards()?;
    let filtered = app.filtered_cards(&cards, category, search);
    let progress = app.load_progress()?;

    let due = get_due_cards(&filtered, &progress);
    let total_due = due.len();
    let shown = &due[..limit.unwrap_or(total_due).min(total_due)];

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = shown.iter().map(|card| {
                let entry = progress.get(&card.id);
                serde_json::json!({
                    "id": card.id,
                    "front": card.front,
                    "back": card.back,
                    "category": card.category,
                    "box": entry.map(|p| p.leitner_box.number()),
                    "next": entry.map(|p| dates::to_iso_string(p.next)),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("No cards due today.");
                return Ok(());
            }

            let max_id_len = shown.iter().map(|c| c.id.len()).max().unwrap_or(2).max(2);

            println!("{:<width$} {:<5} {:<10} Front", "ID", "Box", "Due", width = max_id_len);
            println!("{}", "\u{2500}".repeat(max_id_len + 24));

            for card in shown {
                let (box_label, due_label) = match progress.get(&card.id) {
                    Some(entry) => (entry.leitner_box.number().to_string(), dates::format_date(entry.next)),
                    None => ("new".to_string(), "-".to_string()),
                };
                println!(
                    "{:<width$} {:<5} {:<10} {}",
                    card.id,
                    box_label,
                    due_label,
                    terminal::paint(&card.front, Color::BOLD, use_color),
                    width = max_id_len
                );
            }

            if shown.len() < total_due {
                println!("\n{} of {} due cards shown", shown.len(), total_due);
            } else {
                println!("\n{} cards due", total_due);
            }
        }
    }

    Ok(())
}
