//! Query submission.
//!
//! The form is parsed by hand from the raw urlencoded body because the
//! source checkboxes repeat the `sources` key once per selection. Input
//! is sanitized on the way in (max_results clamped, mode defaulted) and
//! the request is validated before it leaves the process.

use axum::extract::{RawForm, State};
use axum::response::Html;
use tracing::{info, instrument, warn};

use bioquery_common::models::{ProcessingMode, QueryRequest};

use crate::error::{AppError, AppResult};
use crate::state::SharedState;
use crate::view;

fn parse_form(body: &[u8]) -> QueryRequest {
    let mut query = String::new();
    let mut sources = Vec::new();
    let mut max_results_raw: Option<String> = None;
    let mut processing_mode = ProcessingMode::Ai;

    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "query" => query = value.into_owned(),
            "sources" => sources.push(value.into_owned()),
            "max_results" => max_results_raw = Some(value.into_owned()),
            "processing_mode" => {
                if value.as_ref() == "direct" {
                    processing_mode = ProcessingMode::Direct;
                }
            }
            _ => {}
        }
    }

    QueryRequest {
        query,
        sources,
        max_results: QueryRequest::clamp_max_results(max_results_raw.as_deref()),
        processing_mode,
    }
}

#[instrument(skip(state, body))]
pub async fn query_submit(
    State(state): State<SharedState>,
    RawForm(body): RawForm,
) -> AppResult<Html<String>> {
    let request = parse_form(&body);

    if let Err(e) = request.validate() {
        let sources = state.sources.read().await;
        let results = state.results.read().await;
        return Ok(Html(view::page(&sources, results.as_ref(), &e.to_string())));
    }

    if !state.begin_query() {
        let sources = state.sources.read().await;
        let results = state.results.read().await;
        return Ok(Html(view::page(
            &sources,
            results.as_ref(),
            "A query is already in progress. Please wait for it to finish.",
        )));
    }

    let outcome = state.upstream.submit_query(&request).await;
    state.end_query();

    match outcome {
        Ok(results) => {
            info!(
                total = results.total_results(),
                sources = results.sources_queried(),
                "query completed"
            );
            *state.results.write().await = Some(results);
            let sources = state.sources.read().await;
            let results = state.results.read().await;
            let status = format!(
                "Query complete: {} results from {} sources",
                results.as_ref().map_or(0, |r| r.total_results()),
                results.as_ref().map_or(0, |r| r.sources_queried()),
            );
            Ok(Html(view::page(&sources, results.as_ref(), &status)))
        }
        Err(e) => {
            warn!("query failed, clearing held results: {e}");
            *state.results.write().await = None;
            Err(AppError::new(e, &state.noise))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_source_keys_accumulate() {
        let body = b"query=CRISPR+repair&sources=pubmed&sources=uniprot&max_results=15&processing_mode=direct";
        let request = parse_form(body);
        assert_eq!(request.query, "CRISPR repair");
        assert_eq!(request.sources, vec!["pubmed", "uniprot"]);
        assert_eq!(request.max_results, 15);
        assert_eq!(request.processing_mode, ProcessingMode::Direct);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let request = parse_form(b"query=telomerase");
        assert_eq!(request.max_results, 10);
        assert_eq!(request.processing_mode, ProcessingMode::Ai);
        assert!(request.sources.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn out_of_range_max_results_is_clamped() {
        let request = parse_form(b"query=x&sources=pubmed&max_results=500");
        assert_eq!(request.max_results, 50);
        let request = parse_form(b"query=x&sources=pubmed&max_results=-3");
        assert_eq!(request.max_results, 1);
    }
}
