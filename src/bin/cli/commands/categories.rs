use anyhow::Result;

use flashbox_lib::flashcards::filters::categories;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let cards = app.load_cards()?;

    let counts: Vec<(String, usize)> = categories(&cards)
        .into_iter()
        .map(|category| {
            let count = cards.iter().filter(|c| c.category == category).count();
            (category, count)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = counts.iter().map(|(category, count)| {
                serde_json::json!({
                    "category": category,
                    "count": count,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if counts.is_empty() {
                println!("No categories found.");
                return Ok(());
            }

            let max_len = counts.iter().map(|(c, _)| c.chars().count()).max().unwrap_or(8).max(8);

            println!("{:<width$} Cards", "Category", width = max_len + 1);
            println!("{} {}", "\u{2500}".repeat(max_len + 1), "\u{2500}".repeat(6));

            for (category, count) in &counts {
                println!("{:<width$} {}", category, count, width = max_len + 1);
            }

            println!("\n{} categories total", counts.len());
        }
    }

    Ok(())
}
