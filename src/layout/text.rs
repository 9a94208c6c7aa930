//! Text measurement for the built-in Helvetica faces.
//!
//! printpdf does not expose metrics for builtin fonts, so widths come from
//! the Helvetica AFM advance widths (1/1000 em), grouped by character class.

use super::FontWeight;

/// Points to millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Line spacing as a multiple of font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

fn advance(c: char) -> u16 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' => 222,
        ' ' | '.' | ',' | ':' | ';' | '!' | 'f' | 't' | 'I' | '/' | '\\' | '[' | ']' => 278,
        'r' | '(' | ')' | '-' | '"' | '`' => 333,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500,
        'm' => 833,
        'w' | 'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'G' | 'O' | 'Q' => 778,
        'F' | 'T' | 'Z' => 611,
        'M' => 833,
        'W' => 944,
        '%' => 889,
        '@' => 1015,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' | '&' => 667,
        _ => 556,
    }
}

/// Rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, size_pt: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|c| advance(c) as u32).sum();
    let bold_factor = match weight {
        FontWeight::Regular => 1.0,
        FontWeight::Bold => 1.06,
    };
    units as f32 / 1000.0 * size_pt * PT_TO_MM * bold_factor
}

pub fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_HEIGHT_FACTOR
}

/// Break `text` into lines no wider than `max_width_mm`. Explicit newlines
/// are kept; words longer than a line are split by character. Empty text
/// yields a single empty line so every cell keeps its height.
pub fn wrap_text(text: &str, size_pt: f32, weight: FontWeight, max_width_mm: f32) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, size_pt, weight) <= max_width_mm;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if fits(&candidate) {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if fits(word) {
                line = word.to_string();
            } else {
                for c in word.chars() {
                    line.push(c);
                    if !fits(&line) && line.chars().count() > 1 {
                        line.pop();
                        lines.push(std::mem::take(&mut line));
                        line.push(c);
                    }
                }
            }
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
