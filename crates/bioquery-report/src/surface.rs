//! Draw surfaces — the medium-specific back ends behind the layout.

use crate::layout::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Regular,
    Bold,
    Mono,
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f64,
    pub font: FontKind,
    pub color: Rgb,
}

impl TextStyle {
    pub fn regular(size: f64) -> Self {
        Self { size, font: FontKind::Regular, color: Rgb::BLACK }
    }

    pub fn bold(size: f64) -> Self {
        Self { size, font: FontKind::Bold, color: Rgb::BLACK }
    }

    pub fn mono(size: f64) -> Self {
        Self { size, font: FontKind::Mono, color: Rgb::BLACK }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

/// Drawing primitives a report back end must provide. Coordinates are
/// millimetres from the top-left of the page named by `Position`.
pub trait DrawSurface {
    fn text(&mut self, pos: Position, x: f64, text: &str, style: TextStyle);
    fn rule(&mut self, pos: Position, x0: f64, x1: f64, color: Rgb);
    /// Background boxes; decorative, extends downward from `pos`.
    fn fill_rect(&mut self, pos: Position, x: f64, width: f64, height: f64, color: Rgb);
}

/// Plain-text back end for TXT export. Text placed on the same row is
/// joined left-to-right; rules become separator lines, fills are
/// dropped.
#[derive(Debug, Default)]
pub struct TextSurface {
    // (page, y in tenths of mm, x in tenths of mm, text)
    items: Vec<(usize, i64, i64, String)>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(mut self) -> String {
        self.items.sort_by_key(|(page, y, x, _)| (*page, *y, *x));

        let mut out = String::new();
        let mut current_page = 0usize;
        let mut current_row: Option<i64> = None;
        for (page, y, _, text) in self.items {
            if page != current_page {
                out.push_str("\n\n");
                current_page = page;
                current_row = None;
            }
            if current_row == Some(y) {
                out.push(' ');
            } else {
                if current_row.is_some() {
                    out.push('\n');
                }
                current_row = Some(y);
            }
            out.push_str(&text);
        }
        out.push('\n');
        out
    }
}

impl DrawSurface for TextSurface {
    fn text(&mut self, pos: Position, x: f64, text: &str, _style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.items.push((
            pos.page,
            (pos.y * 10.0).round() as i64,
            (x * 10.0).round() as i64,
            text.to_string(),
        ));
    }

    fn rule(&mut self, pos: Position, x0: f64, _x1: f64, _color: Rgb) {
        self.items.push((
            pos.page,
            (pos.y * 10.0).round() as i64,
            (x0 * 10.0).round() as i64,
            "-".repeat(40),
        ));
    }

    fn fill_rect(&mut self, _pos: Position, _x: f64, _width: f64, _height: f64, _color: Rgb) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_join_left_to_right() {
        let mut surface = TextSurface::new();
        let row = Position { page: 0, y: 20.0 };
        surface.text(row, 40.0, "value", TextStyle::regular(10.0));
        surface.text(row, 20.0, "Key:", TextStyle::bold(10.0));
        surface.text(Position { page: 0, y: 26.0 }, 20.0, "next line", TextStyle::regular(10.0));

        let text = surface.into_string();
        assert_eq!(text, "Key: value\nnext line\n");
    }

    #[test]
    fn pages_are_separated() {
        let mut surface = TextSurface::new();
        surface.text(Position { page: 0, y: 20.0 }, 20.0, "one", TextStyle::regular(10.0));
        surface.text(Position { page: 1, y: 20.0 }, 20.0, "two", TextStyle::regular(10.0));
        let text = surface.into_string();
        assert!(text.contains("one\n\ntwo"));
    }
}
