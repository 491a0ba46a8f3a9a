//! Wire types for the upstream query API.
//!
//! The upstream backend returns one `QueryResult` per submitted
//! `QueryRequest`. Per-source payloads are either an array of records or
//! an `{ "error": ... }` object; consumers must check for the error shape
//! before assuming array-ness, which is why `SourceResult` is an untagged
//! union with explicit accessors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BioqueryError, Result};

pub const MAX_RESULTS_MIN: u32 = 1;
pub const MAX_RESULTS_MAX: u32 = 50;
pub const MAX_RESULTS_DEFAULT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    Ai,
    Direct,
}

impl ProcessingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Ai => "ai",
            ProcessingMode::Direct => "direct",
        }
    }
}

/// A query as submitted to `POST /api/query`. Immutable once sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub sources: Vec<String>,
    pub max_results: u32,
    #[serde(rename = "processingMode")]
    pub processing_mode: ProcessingMode,
}

impl QueryRequest {
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(BioqueryError::InvalidQuery("query must not be empty".into()));
        }
        if self.sources.is_empty() {
            return Err(BioqueryError::InvalidQuery(
                "at least one source must be selected".into(),
            ));
        }
        if !(MAX_RESULTS_MIN..=MAX_RESULTS_MAX).contains(&self.max_results) {
            return Err(BioqueryError::InvalidQuery(format!(
                "max_results must be in {}..={}",
                MAX_RESULTS_MIN, MAX_RESULTS_MAX
            )));
        }
        Ok(())
    }

    /// Clamp arbitrary form input into the accepted range. Unparsable
    /// input falls back to the default rather than being stored raw.
    pub fn clamp_max_results(raw: Option<&str>) -> u32 {
        match raw.map(str::trim) {
            None | Some("") => MAX_RESULTS_DEFAULT,
            Some(s) => match s.parse::<i64>() {
                Ok(n) => n.clamp(MAX_RESULTS_MIN as i64, MAX_RESULTS_MAX as i64) as u32,
                Err(_) => MAX_RESULTS_DEFAULT,
            },
        }
    }
}

/// One entry of the upstream source catalog. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCatalog {
    #[serde(default)]
    pub sources: Vec<SourceDescriptor>,
}

/// Per-source payload: an ordered record array, or an error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceResult {
    Failed(SourceError),
    Records(Vec<Value>),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceError {
    pub error: String,
}

impl SourceResult {
    pub fn error(&self) -> Option<&str> {
        match self {
            SourceResult::Failed(e) => Some(&e.error),
            _ => None,
        }
    }

    pub fn records(&self) -> Option<&[Value]> {
        match self {
            SourceResult::Records(items) => Some(items),
            _ => None,
        }
    }

    /// Contribution to the total result count. Errored or non-array
    /// payloads count zero.
    pub fn len(&self) -> usize {
        self.records().map_or(0, <[Value]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level response envelope from `POST /api/query`.
///
/// `results` keeps wire order (insertion-ordered map) so that rendering,
/// export, and JSON round-trips all walk sources in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub orchestration_method: String,
    #[serde(default)]
    pub results: IndexMap<String, SourceResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

impl QueryResult {
    /// Sum of array lengths across all sources.
    pub fn total_results(&self) -> usize {
        self.results.values().map(SourceResult::len).sum()
    }

    /// Number of sources present in the results map.
    pub fn sources_queried(&self) -> usize {
        self.results.len()
    }

    pub fn orchestration_label(&self) -> &str {
        if self.orchestration_method.is_empty() {
            "N/A"
        } else {
            &self.orchestration_method
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_result_distinguishes_error_from_array() {
        let err: SourceResult = serde_json::from_value(json!({"error": "upstream timeout"})).unwrap();
        assert_eq!(err.error(), Some("upstream timeout"));
        assert_eq!(err.len(), 0);

        let recs: SourceResult = serde_json::from_value(json!([{"pmid": "1"}, {"pmid": "2"}])).unwrap();
        assert!(recs.error().is_none());
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn query_result_counts() {
        let result: QueryResult = serde_json::from_value(json!({
            "orchestration_method": "direct",
            "results": {
                "pubmed": [{"pmid": "1"}],
                "uniprot": {"error": "upstream timeout"},
            }
        }))
        .unwrap();
        assert_eq!(result.total_results(), 1);
        assert_eq!(result.sources_queried(), 2);
        assert_eq!(result.orchestration_label(), "direct");
    }

    #[test]
    fn query_result_round_trips() {
        let original = json!({
            "orchestration_method": "ai",
            "results": {
                "pubmed": [{"pmid": "1", "title": "t"}],
                "swissadme": [{"smiles": ["CCO"]}],
            },
            "ai_analysis": "## Findings\nSome text."
        });
        let parsed: QueryResult = serde_json::from_value(original.clone()).unwrap();
        let dumped = serde_json::to_string_pretty(&parsed).unwrap();
        let reparsed: QueryResult = serde_json::from_str(&dumped).unwrap();
        assert_eq!(parsed, reparsed);
        // Key order survives the round trip.
        let keys: Vec<_> = reparsed.results.keys().cloned().collect();
        assert_eq!(keys, vec!["pubmed", "swissadme"]);
    }

    #[test]
    fn clamp_max_results_bounds_and_garbage() {
        assert_eq!(QueryRequest::clamp_max_results(None), 10);
        assert_eq!(QueryRequest::clamp_max_results(Some("")), 10);
        assert_eq!(QueryRequest::clamp_max_results(Some("25")), 25);
        assert_eq!(QueryRequest::clamp_max_results(Some("0")), 1);
        assert_eq!(QueryRequest::clamp_max_results(Some("900")), 50);
        assert_eq!(QueryRequest::clamp_max_results(Some("lots")), 10);
    }

    #[test]
    fn validate_rejects_empty_query_and_sources() {
        let req = QueryRequest {
            query: "  ".into(),
            sources: vec!["pubmed".into()],
            max_results: 10,
            processing_mode: ProcessingMode::Direct,
        };
        assert!(req.validate().is_err());

        let req = QueryRequest {
            query: "CRISPR".into(),
            sources: vec![],
            max_results: 10,
            processing_mode: ProcessingMode::Ai,
        };
        assert!(req.validate().is_err());
    }
}
