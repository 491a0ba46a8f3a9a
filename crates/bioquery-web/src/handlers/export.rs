//! Export downloads for the currently held result set.
//!
//! Exports read state without mutating it: a failed export leaves the
//! held results intact so the user can retry or pick another format.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use tracing::{info, instrument, warn};

use bioquery_common::error::BioqueryError;
use bioquery_report::export::{export, file_name, ExportFormat};

use crate::error::{AppError, AppResult};
use crate::state::SharedState;

#[instrument(skip(state))]
pub async fn export_results(
    State(state): State<SharedState>,
    Path(format): Path<String>,
) -> AppResult<impl IntoResponse> {
    let format: ExportFormat = format
        .parse()
        .map_err(|e: BioqueryError| AppError::new(e, &state.noise))?;

    let results = state.results.read().await.clone();
    let results = results.ok_or_else(|| {
        AppError::new(
            BioqueryError::Export("no results available to export".into()),
            &state.noise,
        )
    })?;

    let bytes = export(&results, format).map_err(|e| {
        warn!("export failed: {e}");
        AppError::new(e, &state.noise)
    })?;

    let name = file_name(format);
    info!(format = format.extension(), size = bytes.len(), "export produced");

    let disposition = HeaderValue::try_from(format!("attachment; filename=\"{name}\""))
        .map_err(|e| {
            AppError::new(
                BioqueryError::Export(format!("invalid download header: {e}")),
                &state.noise,
            )
        })?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(format.content_type()));
    headers.insert(CONTENT_DISPOSITION, disposition);
    Ok((headers, bytes))
}
