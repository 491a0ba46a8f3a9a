//! PDF back end on lopdf.
//!
//! Collects draw operations per page, then assembles an A4 document
//! with Helvetica / Helvetica-Bold / Courier over WinAnsi. Layout
//! positions arrive in millimetres from the top-left; conversion to
//! PDF points happens only here.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use bioquery_common::error::{BioqueryError, Result};

use crate::layout::Position;
use crate::surface::{DrawSurface, FontKind, Rgb, TextStyle};
use crate::wrap::PT_TO_MM;

const MM_TO_PT: f64 = 72.0 / 25.4;
const A4_WIDTH_PT: f64 = 595.28;
const A4_HEIGHT_PT: f64 = 841.89;

fn real(v: f64) -> Object {
    Object::Real(v as _)
}

fn color_ops(color: Rgb) -> (f64, f64, f64) {
    (
        f64::from(color.0) / 255.0,
        f64::from(color.1) / 255.0,
        f64::from(color.2) / 255.0,
    )
}

/// Helvetica lacks glyph escapes beyond Latin-1; anything outside maps
/// to '?'.
fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
        .collect()
}

#[derive(Debug, Default)]
pub struct PdfSurface {
    pages: Vec<Vec<Operation>>,
}

impl PdfSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn page_ops(&mut self, page: usize) -> &mut Vec<Operation> {
        while self.pages.len() <= page {
            self.pages.push(Vec::new());
        }
        &mut self.pages[page]
    }

    /// Assemble the collected pages into PDF bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let mono_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
                "F3" => mono_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        let page_count = self.pages.len();
        for operations in self.pages {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| BioqueryError::Export(format!("PDF content encoding failed: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![real(0.0), real(0.0), real(A4_WIDTH_PT), real(A4_HEIGHT_PT)],
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| BioqueryError::Export(format!("PDF serialization failed: {e}")))?;
        Ok(bytes)
    }
}

impl DrawSurface for PdfSurface {
    fn text(&mut self, pos: Position, x: f64, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let font = match style.font {
            FontKind::Regular => "F1",
            FontKind::Bold => "F2",
            FontKind::Mono => "F3",
        };
        // Baseline sits roughly one cap height below the row top.
        let baseline_mm = pos.y + style.size * PT_TO_MM * 0.9;
        let x_pt = x * MM_TO_PT;
        let y_pt = A4_HEIGHT_PT - baseline_mm * MM_TO_PT;
        let (r, g, b) = color_ops(style.color);

        let ops = self.page_ops(pos.page);
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.into(), real(style.size)]));
        ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new("Td", vec![real(x_pt), real(y_pt)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_winansi(text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn rule(&mut self, pos: Position, x0: f64, x1: f64, color: Rgb) {
        let y_pt = A4_HEIGHT_PT - pos.y * MM_TO_PT;
        let (r, g, b) = color_ops(color);
        let ops = self.page_ops(pos.page);
        ops.push(Operation::new("RG", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new("w", vec![real(0.5)]));
        ops.push(Operation::new("m", vec![real(x0 * MM_TO_PT), real(y_pt)]));
        ops.push(Operation::new("l", vec![real(x1 * MM_TO_PT), real(y_pt)]));
        ops.push(Operation::new("S", vec![]));
    }

    fn fill_rect(&mut self, pos: Position, x: f64, width: f64, height: f64, color: Rgb) {
        let (r, g, b) = color_ops(color);
        let x_pt = x * MM_TO_PT;
        let y_pt = A4_HEIGHT_PT - (pos.y + height) * MM_TO_PT;
        let ops = self.page_ops(pos.page);
        ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new(
            "re",
            vec![real(x_pt), real(y_pt), real(width * MM_TO_PT), real(height * MM_TO_PT)],
        ));
        ops.push(Operation::new("f", vec![]));
    }
}
