//! Top-level error boundary.
//!
//! Every handler failure flows through [`AppError`], which is
//! classified at construction against the injected [`NoiseFilter`]:
//! extension-messaging noise becomes a dismissable notice, anything
//! else a genuine failure panel with reload/retry actions.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};

use bioquery_common::error::BioqueryError;
use bioquery_common::noise::NoiseFilter;

use crate::view;

#[derive(Debug)]
pub struct AppError {
    message: String,
    detail: String,
    suppressed: bool,
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn new(err: BioqueryError, filter: &NoiseFilter) -> Self {
        let message = err.to_string();
        let detail = format!("{err:?}");
        let suppressed = filter.is_noise(&message, &detail);
        Self { message, detail, suppressed }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.suppressed {
            warn!("messaging noise suppressed: {}", self.message);
            return (StatusCode::OK, Html(view::notice_page(
                "A browser extension interfered with the page. This does not affect your results.",
            )))
                .into_response();
        }
        error!("request failed: {}", self.message);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(view::error_page(&self.message, &self.detail)),
        )
            .into_response()
    }
}
