use flashbox_lib::flashcards::{BoxCounts, Card, LeitnerBox};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Widest bar in the box chart
const CHART_WIDTH: usize = 40;

/// Wrap `text` in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Box 1 red, box 2 blue, box 3 green
pub fn box_color(leitner_box: LeitnerBox) -> &'static str {
    match leitner_box {
        LeitnerBox::One => Color::RED,
        LeitnerBox::Two => Color::BLUE,
        LeitnerBox::Three => Color::GREEN,
    }
}

/// Horizontal bar chart of the box counts, one line per box
pub fn box_chart(counts: &BoxCounts, use_color: bool) -> Vec<String> {
    let max = LeitnerBox::ALL.iter().map(|b| counts.get(*b)).max().unwrap_or(0);

    LeitnerBox::ALL
        .iter()
        .map(|b| {
            let count = counts.get(*b);
            let bar = "\u{2588}".repeat(bar_width(count, max));
            format!("Box {} {:>5} {}", b.number(), count, paint(&bar, box_color(*b), use_color))
        })
        .collect()
}

/// Bar length scaled to `CHART_WIDTH`; any non-zero count gets at least one cell
fn bar_width(count: usize, max: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count * CHART_WIDTH + max / 2) / max).max(1)
}

pub fn render_front(card: &Card, use_color: bool) -> String {
    let mut out = paint(&card.front, Color::BOLD, use_color);
    if !card.category.is_empty() {
        out.push_str(&format!("  {}", paint(&format!("[{}]", card.category), Color::DIM, use_color)));
    }
    out
}

pub fn render_back(card: &Card, use_color: bool) -> Vec<String> {
    card.back
        .iter()
        .map(|line| format!("  {}", paint(line, Color::CYAN, use_color)))
        .collect()
}
