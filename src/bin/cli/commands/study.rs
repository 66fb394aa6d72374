use std::io::{self, BufRead, Write};

use anyhow::Result;

use flashbox_lib::dates;
use flashbox_lib::flashcards::get_due_cards;
use flashbox_lib::flashcards::session::ReviewSession;

use crate::app::App;
use crate::render::terminal::{self, Color};

enum Reply {
    Correct,
    Again,
    Quit,
}

pub fn run(
    app: &App,
    category: Option<&str>,
    search: Option<&str>,
    shuffle: bool,
    use_color: bool,
) -> Result<()> {
    let cards = app.load_cards()?;
    let filtered = app.filtered_cards(&cards, category, search);
    let progress = app.load_progress()?;

    let due: Vec<_> = get_due_cards(&filtered, &progress).into_iter().cloned().collect();
    if due.is_empty() {
        println!("No cards due today.");
        return Ok(());
    }

    let mut session = ReviewSession::new(due, progress, app.load_tally()?);
    if shuffle {
        session.shuffle();
    }
    log::info!("Starting session with {} cards", session.remaining());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    loop {
        let card = match session.current() {
            Some(card) => card.clone(),
            None => break,
        };

        println!();
        println!("{}", terminal::paint(&format!("[{} left]", session.remaining()), Color::GRAY, use_color));
        println!("{}", terminal::render_front(&card, use_color));

        if prompt(&mut input, &mut stdout, "Press Enter to show the answer (q to quit) ")?.as_deref() == Some("q") {
            break;
        }
        for line in terminal::render_back(&card, use_color) {
            println!("{}", line);
        }

        let correct = match read_reply(&mut input, &mut stdout)? {
            Reply::Quit => break,
            Reply::Correct => true,
            Reply::Again => false,
        };

        let Some(outcome) = session.answer(correct) else {
            break;
        };
        app.save_progress(session.progress())?;
        app.save_tally(&session.tally())?;

        if outcome.requeued {
            println!("{}", terminal::paint("→ box 1, again later in this session", Color::RED, use_color));
        } else {
            let message = format!(
                "→ box {}, next review {}",
                outcome.progress.leitner_box.number(),
                dates::format_date(outcome.progress.next)
            );
            println!("{}", terminal::paint(&message, Color::GREEN, use_color));
        }
    }

    let tally = session.tally();
    println!();
    if session.is_finished() {
        println!("All due cards reviewed.");
    } else {
        println!("Session stopped, {} cards left.", session.remaining());
    }
    println!(
        "Today: {} correct, {} again ({}%)",
        tally.correct,
        tally.again,
        tally.correct_rate()
    );

    Ok(())
}

/// Print a prompt and read one trimmed, lowercased line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

fn read_reply<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Reply> {
    loop {
        let Some(answer) = prompt(input, output, "Correct? [y]es / [n]o / [q]uit: ")? else {
            return Ok(Reply::Quit);
        };
        match answer.as_str() {
            "y" | "yes" => return Ok(Reply::Correct),
            "n" | "no" => return Ok(Reply::Again),
            "q" | "quit" => return Ok(Reply::Quit),
            _ => continue,
        }
    }
}
