//! bioquery-report — result normalization and paginated report rendering.
//!
//! Two cooperating transforms over the shared `QueryResult` model:
//!
//! * the **normalizer** maps each raw per-source record to an ordered
//!   list of presentation [`Field`]s, independent of the output medium;
//! * the **renderer** lays those fields out as a vertically flowing,
//!   page-bounded document through a [`LayoutEngine`] onto a pluggable
//!   [`DrawSurface`] (PDF, plain text, or the web view).
//!
//! Export entry points for PDF/JSON/CSV/TXT live in [`export`].

pub mod document;
pub mod export;
pub mod layout;
pub mod markdown;
pub mod normalize;
pub mod pdf;
pub mod surface;
pub mod units;
pub mod wrap;

pub use document::{render_report, ReportBuilder};
pub use export::{export, file_name, ExportFormat};
pub use layout::{LayoutEngine, PageMetrics, Position};
pub use normalize::{normalize_record, Field, PropertyRow, RenderTarget};
pub use pdf::PdfSurface;
pub use surface::{DrawSurface, FontKind, Rgb, TextStyle, TextSurface};
