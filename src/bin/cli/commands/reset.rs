use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use crate::app::App;

pub fn run(app: &App, all: bool, yes: bool) -> Result<()> {
    let what = if all {
        "all progress, today's tally and the deck"
    } else {
        "all progress"
    };

    if !yes {
        if !crate::stdin_is_tty() {
            bail!("Refusing to reset without confirmation; pass --yes");
        }

        print!("Delete {} in {}? [y/N] ", what, app.data_dir.display());
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        if !matches!(line.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    app.progress_store.reset().context("Failed to reset progress")?;
    if all {
        app.tally_storage.delete().context("Failed to delete today's tally")?;
        app.deck.delete().context("Failed to delete deck")?;
    }

    log::info!("Reset {}", what);
    println!("Deleted {}.", what);
    Ok(())
}
