//! Export entry points: one `QueryResult`, four file formats.

use std::str::FromStr;

use tracing::debug;

use bioquery_common::error::{BioqueryError, Result};
use bioquery_common::models::QueryResult;

use crate::document::render_report;
use crate::normalize::{normalize_record, Field, RenderTarget};
use crate::pdf::PdfSurface;
use crate::surface::TextSurface;

pub const EXPORT_BASENAME: &str = "biomedical-research-results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Json,
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Txt => "text/plain",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = BioqueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" => Ok(ExportFormat::Txt),
            other => Err(BioqueryError::Export(format!(
                "unsupported export format: {other}"
            ))),
        }
    }
}

/// `biomedical-research-results.<ext>`
pub fn file_name(format: ExportFormat) -> String {
    format!("{}.{}", EXPORT_BASENAME, format.extension())
}

/// Serialize `results` into the requested format. Runs synchronously to
/// completion and never mutates the input.
pub fn export(results: &QueryResult, format: ExportFormat) -> Result<Vec<u8>> {
    debug!(format = format.extension(), "exporting results");
    match format {
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(results)?),
        ExportFormat::Pdf => {
            let mut surface = PdfSurface::new();
            render_report(results, &mut surface, RenderTarget::Export);
            surface.finish()
        }
        ExportFormat::Txt => {
            let mut surface = TextSurface::new();
            render_report(results, &mut surface, RenderTarget::Export);
            Ok(surface.into_string().into_bytes())
        }
        ExportFormat::Csv => export_csv(results),
    }
}

fn export_csv(results: &QueryResult) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["source", "record", "field", "value"])
        .map_err(|e| BioqueryError::Export(e.to_string()))?;

    for (source, result) in &results.results {
        if let Some(error) = result.error() {
            writer
                .write_record([source.as_str(), "", "error", error])
                .map_err(|e| BioqueryError::Export(e.to_string()))?;
            continue;
        }
        let Some(records) = result.records() else {
            continue;
        };
        for (index, record) in records.iter().enumerate() {
            let number = (index + 1).to_string();
            for field in normalize_record(source, record, index, RenderTarget::Export) {
                for (name, value) in flatten_field(&field) {
                    writer
                        .write_record([source.as_str(), number.as_str(), name.as_str(), value.as_str()])
                        .map_err(|e| BioqueryError::Export(e.to_string()))?;
                }
            }
        }
    }

    writer
        .into_inner()
        .map_err(|e| BioqueryError::Export(e.to_string()))
}

fn flatten_field(field: &Field) -> Vec<(String, String)> {
    match field {
        Field::RecordHeading(_) => vec![],
        Field::Title(title) => vec![("title".to_string(), title.clone())],
        Field::Meta(meta) => vec![("meta".to_string(), meta.clone())],
        Field::Text(body) => vec![("text".to_string(), body.clone())],
        Field::KeyValue { key, value } => vec![(key.clone(), value.clone())],
        Field::Link { label, url } => vec![(label.clone(), url.clone())],
        Field::Diagram { label, url } => vec![(label.clone(), url.clone())],
        Field::MoleculeHeader { smiles, .. } => vec![("molecule".to_string(), smiles.clone())],
        Field::PropertyGroup { name, rows } => rows
            .iter()
            .map(|row| (format!("{} / {}", name, row.name), row.value.clone()))
            .collect(),
        Field::ImageNote(_) => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_parsing_and_names() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!(file_name(ExportFormat::Json), "biomedical-research-results.json");
        assert!("docx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn csv_rows_cover_records_and_errors() {
        let results: QueryResult = serde_json::from_value(json!({
            "orchestration_method": "direct",
            "results": {
                "pubmed": [{"title": "t", "pmid": "1"}],
                "uniprot": {"error": "upstream timeout"},
            }
        }))
        .unwrap();

        let bytes = export(&results, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "source,record,field,value");
        assert!(lines.iter().any(|l| l.starts_with("pubmed,1,title,t")));
        assert!(lines.iter().any(|l| l.starts_with("uniprot,,error,upstream timeout")));
    }
}
