//! Paginated document renderer.
//!
//! Walks a `QueryResult` in source-map order and emits summary cards,
//! per-source blocks, normalized records, molecule property tables, and
//! the AI analysis block through the layout engine onto any
//! [`DrawSurface`]. Every primitive is sized first and emitted second;
//! wrapped text goes line by line so page breaks land exactly on the
//! first overflowing line.

use chrono::Local;

use bioquery_common::models::{QueryResult, SourceResult};

use crate::layout::LayoutEngine;
use crate::markdown::{flow_lines, strip_markdown, FlowLine};
use crate::normalize::{normalize_record, Field, PropertyRow, RenderTarget};
use crate::surface::{DrawSurface, Rgb, TextStyle};
use crate::wrap::{text_width_mm, wrap};

// Palette lifted from the web view.
pub const DARK: Rgb = Rgb(44, 62, 80);
pub const GRAY: Rgb = Rgb(108, 117, 125);
pub const ACCENT_BLUE: Rgb = Rgb(79, 172, 254);
pub const PUBMED_BLUE: Rgb = Rgb(0, 123, 255);
pub const UNIPROT_GREEN: Rgb = Rgb(40, 167, 69);
pub const SWISSADME_ORANGE: Rgb = Rgb(253, 126, 20);
const RULE_GRAY: Rgb = Rgb(200, 200, 200);
const ERROR_BG: Rgb = Rgb(248, 215, 218);
const ERROR_TEXT: Rgb = Rgb(114, 28, 36);
const CARD_BG: Rgb = Rgb(248, 249, 250);
const SMILES_BG: Rgb = Rgb(233, 236, 239);
const SMILES_TEXT: Rgb = Rgb(73, 80, 87);
const DIAGRAM_BG: Rgb = Rgb(255, 243, 205);
const DIAGRAM_TEXT: Rgb = Rgb(133, 100, 4);
const AI_PURPLE: Rgb = Rgb(111, 66, 193);

/// Fixed source -> header color table.
pub fn source_color(source: &str) -> Rgb {
    let source = source.to_lowercase();
    if source.contains("pubmed") {
        PUBMED_BLUE
    } else if source.contains("uniprot") {
        UNIPROT_GREEN
    } else if source.contains("swissadme") {
        SWISSADME_ORANGE
    } else {
        GRAY
    }
}

pub fn source_display_name(source: &str) -> String {
    match source {
        "pubmed" => "PubMed Articles".to_string(),
        "uniprot" => "UniProt Proteins".to_string(),
        "swissadme" => "SwissADME Drug Properties".to_string(),
        other => other.to_uppercase(),
    }
}

// Molecule property table geometry (mm, relative to the indent).
const TABLE_NAME_COL: f64 = 72.0;
const TABLE_GAP: f64 = 3.0;

pub struct ReportBuilder<'a, S: DrawSurface> {
    surface: &'a mut S,
    layout: LayoutEngine,
    target: RenderTarget,
}

impl<'a, S: DrawSurface> ReportBuilder<'a, S> {
    pub fn new(surface: &'a mut S, target: RenderTarget) -> Self {
        Self {
            surface,
            layout: LayoutEngine::default(),
            target,
        }
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    fn margin(&self) -> f64 {
        self.layout.metrics().margin
    }

    fn line_height(&self) -> f64 {
        self.layout.metrics().line_height
    }

    fn content_width(&self) -> f64 {
        self.layout.metrics().content_width
    }

    /// Document title, generation timestamp, and a separator rule.
    pub fn title_block(&mut self, title: &str) {
        let margin = self.margin();
        let pos = self.layout.emit(15.0);
        self.surface.text(pos, margin, title, TextStyle::bold(20.0));

        let stamp = format!("Generated on: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let pos = self.layout.emit(10.0);
        self.surface.text(pos, margin, &stamp, TextStyle::regular(10.0));

        self.rule();
    }

    fn rule(&mut self) {
        let margin = self.margin();
        let end = margin + self.content_width();
        let pos = self.layout.emit(5.0);
        self.surface.rule(pos, margin, end, RULE_GRAY);
    }

    pub fn section_header(&mut self, title: &str, size: f64, color: Rgb) {
        let margin = self.margin();
        let pos = self.layout.emit(8.0);
        self.surface.text(pos, margin, title, TextStyle::bold(size).color(color));
        self.rule();
    }

    /// Wrapped free text; each line is emitted (and break-checked)
    /// individually.
    pub fn text(&mut self, body: &str, style: TextStyle, indent: f64) {
        let max_width = self.content_width() - indent;
        let x = self.margin() + indent;
        for line in wrap(body, max_width, style.size) {
            let pos = self.layout.emit(self.line_height());
            self.surface.text(pos, x, &line, style);
        }
    }

    /// Bold key with the value wrapped in the remaining width. The
    /// first value line shares the key's row; continuation lines are
    /// indented under it.
    pub fn key_value(&mut self, key: &str, value: &str, size: f64, indent: f64, value_color: Rgb) {
        let key_text = format!("{}:", key);
        let key_width = text_width_mm(&key_text, size);
        let x_key = self.margin() + indent;
        let x_value = x_key + key_width + TABLE_GAP;
        let value_width = (self.content_width() - indent - key_width - TABLE_GAP).max(20.0);

        let lines = wrap(value, value_width, size);
        let pos = self.layout.emit(self.line_height());
        self.surface.text(pos, x_key, &key_text, TextStyle::bold(size));
        match lines.split_first() {
            None => {}
            Some((first, rest)) => {
                self.surface
                    .text(pos, x_value, first, TextStyle::regular(size).color(value_color));
                for line in rest {
                    let pos = self.layout.emit(self.line_height());
                    self.surface
                        .text(pos, x_value, line, TextStyle::regular(size).color(value_color));
                }
            }
        }
    }

    /// The three fixed summary entries.
    pub fn summary_cards(&mut self, results: &QueryResult) {
        self.section_header("Summary Statistics", 14.0, ACCENT_BLUE);

        let margin = self.margin();
        let card_height = 3.0 * self.line_height() + 4.0;
        let pos = self.layout.ensure(card_height);
        self.surface
            .fill_rect(pos, margin - 2.0, self.content_width() + 4.0, card_height, CARD_BG);

        self.key_value("Total Results", &results.total_results().to_string(), 11.0, 0.0, ACCENT_BLUE);
        self.key_value("Sources Queried", &results.sources_queried().to_string(), 11.0, 0.0, ACCENT_BLUE);
        self.key_value("Orchestration Method", results.orchestration_label(), 11.0, 0.0, ACCENT_BLUE);
        self.layout.space(5.0);
    }

    /// One per-source block: colored header, then error box / empty
    /// notice / numbered record list.
    pub fn source_block(&mut self, source: &str, result: &SourceResult) {
        let color = source_color(source);
        self.section_header(&source_display_name(source), 12.0, color);

        if let Some(error) = result.error() {
            let margin = self.margin();
            let pos = self.layout.ensure(12.0);
            self.surface
                .fill_rect(pos, margin - 2.0, self.content_width() + 4.0, 12.0, ERROR_BG);
            self.text(&format!("Error: {}", error), TextStyle::regular(10.0).color(ERROR_TEXT), 0.0);
            self.layout.space(5.0);
            return;
        }

        let records = match result.records() {
            Some(records) if !records.is_empty() => records,
            _ => {
                self.text("No results found for this source.", TextStyle::regular(10.0).color(GRAY), 0.0);
                self.layout.space(5.0);
                return;
            }
        };

        self.text(
            &format!("Found {} results:", records.len()),
            TextStyle::bold(10.0).color(color),
            0.0,
        );
        self.layout.space(3.0);

        for (index, record) in records.iter().enumerate() {
            for field in normalize_record(source, record, index, self.target) {
                self.field(&field);
            }
            self.layout.space(8.0);
        }
    }

    fn field(&mut self, field: &Field) {
        match field {
            Field::RecordHeading(number) => {
                let margin = self.margin();
                let pos = self.layout.emit(10.0);
                self.surface.text(
                    pos,
                    margin,
                    &format!("Result {}", number),
                    TextStyle::bold(11.0).color(DARK),
                );
            }
            Field::Title(title) => self.text(title, TextStyle::bold(11.0), 0.0),
            Field::Meta(meta) => self.text(meta, TextStyle::regular(9.0).color(GRAY), 2.0),
            Field::Text(body) => self.text(body, TextStyle::regular(9.0), 2.0),
            Field::KeyValue { key, value } => self.key_value(key, value, 9.0, 2.0, Rgb::BLACK),
            Field::Link { label, url } => self.text(
                &format!("{}: {}", label, url),
                TextStyle::regular(8.0).color(ACCENT_BLUE),
                2.0,
            ),
            Field::Diagram { label, url: _ } => {
                let margin = self.margin();
                let pos = self.layout.ensure(10.0);
                self.surface
                    .fill_rect(pos, margin - 2.0, self.content_width() + 4.0, 10.0, DIAGRAM_BG);
                self.text(
                    &format!("{}: available in the web interface", label),
                    TextStyle::bold(10.0).color(DIAGRAM_TEXT),
                    2.0,
                );
                self.layout.space(4.0);
            }
            Field::MoleculeHeader { index, smiles } => {
                let margin = self.margin();
                let pos = self.layout.emit(8.0);
                self.surface
                    .fill_rect(pos, margin - 2.0, self.content_width() + 4.0, 7.0, ACCENT_BLUE);
                self.surface.text(
                    pos,
                    margin,
                    &format!("Molecule {}", index),
                    TextStyle::bold(10.0).color(Rgb::WHITE),
                );
                if smiles != "Unknown" {
                    let pos = self.layout.ensure(6.0);
                    self.surface
                        .fill_rect(pos, margin + 2.0, self.content_width() - 4.0, 6.0, SMILES_BG);
                    self.text(
                        &format!("SMILES: {}", smiles),
                        TextStyle::mono(8.0).color(SMILES_TEXT),
                        4.0,
                    );
                }
                self.layout.space(2.0);
            }
            Field::PropertyGroup { name, rows } => self.property_table(name, rows, 4.0),
            Field::ImageNote(note) => {
                self.text(note, TextStyle::regular(8.0).color(GRAY), 4.0);
                self.layout.space(2.0);
            }
        }
    }

    /// Property/Value table with alternating row backgrounds. Values
    /// wider than the value column wrap onto sub-lines inside the same
    /// row; each sub-line is break-checked on its own.
    fn property_table(&mut self, name: &str, rows: &[PropertyRow], indent: f64) {
        self.text(&format!("{}:", name), TextStyle::bold(9.0).color(DARK), indent);

        let margin = self.margin();
        let x_name = margin + indent;
        let x_value = x_name + TABLE_NAME_COL;
        let value_width = (self.content_width() - indent - TABLE_NAME_COL - TABLE_GAP).max(20.0);
        let row_width = self.content_width() - indent;

        let pos = self.layout.emit(self.line_height());
        self.surface.text(pos, x_name, "Property", TextStyle::bold(8.0).color(GRAY));
        self.surface.text(pos, x_value, "Value", TextStyle::bold(8.0).color(GRAY));

        for (row_index, row) in rows.iter().enumerate() {
            let background = if row_index % 2 == 0 { CARD_BG } else { Rgb::WHITE };
            let lines = wrap(&row.value, value_width, 8.0);
            if lines.is_empty() {
                let pos = self.layout.emit(self.line_height());
                self.surface.fill_rect(pos, x_name, row_width, self.line_height(), background);
                self.surface.text(pos, x_name, &row.name, TextStyle::regular(8.0).color(GRAY));
                continue;
            }
            for (line_index, line) in lines.iter().enumerate() {
                let pos = self.layout.emit(self.line_height());
                self.surface.fill_rect(pos, x_name, row_width, self.line_height(), background);
                if line_index == 0 {
                    self.surface.text(pos, x_name, &row.name, TextStyle::regular(8.0).color(GRAY));
                }
                self.surface.text(pos, x_value, line, TextStyle::bold(8.0).color(DARK));
            }
        }
        self.layout.space(3.0);
    }

    /// AI analysis block: purple banner, then the stripped markdown
    /// flowed as paragraphs, bullets, and numbered items.
    pub fn ai_analysis(&mut self, analysis: &str) {
        let margin = self.margin();
        let pos = self.layout.emit(12.0);
        self.surface
            .fill_rect(pos, margin - 2.0, self.content_width() + 4.0, 11.0, AI_PURPLE);
        self.surface.text(
            pos,
            margin,
            "AI Analysis & Synthesis",
            TextStyle::bold(14.0).color(Rgb::WHITE),
        );
        self.layout.space(3.0);

        for line in flow_lines(&strip_markdown(analysis)) {
            match line {
                FlowLine::Paragraph(text) => {
                    self.text(&text, TextStyle::regular(10.0).color(DARK), 0.0);
                    self.layout.space(2.0);
                }
                FlowLine::Bullet(text) => {
                    self.text(&format!("• {}", text), TextStyle::regular(10.0).color(DARK), 4.0);
                }
                FlowLine::Numbered(text) => {
                    self.text(&text, TextStyle::regular(10.0).color(DARK), 4.0);
                }
            }
        }
        self.layout.space(5.0);
    }
}

/// Render the full report for `results` onto `surface`.
pub fn render_report<S: DrawSurface>(results: &QueryResult, surface: &mut S, target: RenderTarget) {
    let mut builder = ReportBuilder::new(surface, target);
    builder.title_block("Biomedical Research Results");
    builder.summary_cards(results);
    for (source, result) in &results.results {
        builder.source_block(source, result);
    }
    if let Some(analysis) = &results.ai_analysis {
        builder.ai_analysis(analysis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Position;
    use serde_json::json;

    #[derive(Default)]
    struct FillRecorder {
        fills: Vec<(usize, f64, f64)>,
    }

    impl DrawSurface for FillRecorder {
        fn text(&mut self, _pos: Position, _x: f64, _text: &str, _style: TextStyle) {}
        fn rule(&mut self, _pos: Position, _x0: f64, _x1: f64, _color: Rgb) {}
        fn fill_rect(&mut self, pos: Position, _x: f64, _width: f64, height: f64, _color: Rgb) {
            self.fills.push((pos.page, pos.y, height));
        }
    }

    #[test]
    fn backgrounds_never_straddle_a_page_boundary() {
        // Enough decorated blocks (error boxes, diagram banner, SMILES
        // strips, table rows) to cross several pages at varying
        // offsets; every background must fit within the page that its
        // content starts on.
        let mut sources = serde_json::Map::new();
        for i in 0..30 {
            sources.insert(format!("source{i:02}"), json!({"error": "upstream timeout"}));
        }
        sources.insert(
            "swissadme".to_string(),
            json!([{
                "smiles": ["CCO", "CCN", "CCC"],
                "boiled_egg_plot": "data:image/png;base64,x",
                "physicochemical_properties": {"CCO": {"molecular_weight": 46.07}},
            }]),
        );
        let results: QueryResult = serde_json::from_value(json!({
            "orchestration_method": "direct",
            "results": sources,
        }))
        .unwrap();

        let mut surface = FillRecorder::default();
        render_report(&results, &mut surface, RenderTarget::Export);

        assert!(surface.fills.len() > 30);
        for (page, y, height) in &surface.fills {
            assert!(*y >= 20.0 - 1e-9, "fill above the top margin on page {page}");
            assert!(
                y + height <= 280.0 + 1e-9,
                "fill on page {page} at y {y} with height {height} crosses the boundary"
            );
        }
    }

    #[test]
    fn color_table_is_fixed() {
        assert_eq!(source_color("pubmed"), PUBMED_BLUE);
        assert_eq!(source_color("uniprot"), UNIPROT_GREEN);
        assert_eq!(source_color("swissadme"), SWISSADME_ORANGE);
        assert_eq!(source_color("chembl"), GRAY);
    }

    #[test]
    fn display_names() {
        assert_eq!(source_display_name("pubmed"), "PubMed Articles");
        assert_eq!(source_display_name("chembl"), "CHEMBL");
    }
}
