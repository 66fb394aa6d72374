use anyhow::Result;

use flashbox_lib::flashcards::{get_box_counts, get_due_cards, get_filtered_box_counts};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    category: Option<&str>,
    search: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let cards = app.load_cards()?;
    let filtered = app.filtered_cards(&cards, category, search);
    let progress = app.load_progress()?;
    let tally = app.load_tally()?;

    let counts = get_filtered_box_counts(&filtered, &progress);
    let due = get_due_cards(&filtered, &progress).len();
    let new_cards = filtered.iter().filter(|c| !progress.contains(&c.id)).count();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "totalCards": cards.len(),
                "shownCards": filtered.len(),
                "boxes": counts,
                "allBoxes": get_box_counts(&progress),
                "newCards": new_cards,
                "dueCards": due,
                "today": {
                    "correct": tally.correct,
                    "again": tally.again,
                    "correctRate": tally.correct_rate(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint("Cards per box", Color::BOLD, use_color));
            for line in terminal::box_chart(&counts, use_color) {
                println!("  {}", line);
            }
            println!("  New   {:>5}", new_cards);
            println!("  Due   {:>5}", due);

            if filtered.len() == cards.len() {
                println!("  All {} cards shown", cards.len());
            } else {
                println!("  {} / {} cards shown", filtered.len(), cards.len());
            }

            println!();
            println!("{}", terminal::paint("Today", Color::BOLD, use_color));
            println!("  Correct rate {}%", tally.correct_rate());
            println!(
                "  {} correct, {} again, {} answers",
                terminal::paint(&tally.correct.to_string(), Color::GREEN, use_color),
                terminal::paint(&tally.again.to_string(), Color::RED, use_color),
                tally.total()
            );
        }
    }

    Ok(())
}
