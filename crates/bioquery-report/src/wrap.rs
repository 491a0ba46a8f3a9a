//! Deterministic text measurement and greedy word-wrap.
//!
//! Real font metrics vary per backend; layout must not. Width is
//! approximated as a fixed ratio of the font size, which keeps line
//! breaks identical across the PDF, text, and test surfaces.

/// Points to millimetres.
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Average glyph advance as a fraction of the font size.
const GLYPH_RATIO: f64 = 0.5;

/// Width of one character cell in mm at the given font size (pt).
pub fn char_width_mm(font_size: f64) -> f64 {
    font_size * GLYPH_RATIO * PT_TO_MM
}

/// Approximate rendered width of a string in mm.
pub fn text_width_mm(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * char_width_mm(font_size)
}

/// Greedy word-wrap into lines no wider than `max_width_mm`. Words
/// longer than a full line are hard-split.
pub fn wrap(text: &str, max_width_mm: f64, font_size: f64) -> Vec<String> {
    let max_chars = ((max_width_mm / char_width_mm(font_size)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current_len == 0 && word_len <= max_chars {
            current.push_str(word);
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if word_len <= max_chars {
                current.push_str(word);
            } else {
                // Hard-split an overlong word.
                let mut rest: Vec<char> = word.chars().collect();
                while rest.len() > max_chars {
                    lines.push(rest.drain(..max_chars).collect());
                }
                current = rest.into_iter().collect();
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
