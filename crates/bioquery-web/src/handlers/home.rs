//! Landing page — query form plus whatever results are held in state.

use axum::extract::State;
use axum::response::Html;

use crate::state::SharedState;
use crate::view;

pub async fn home(State(state): State<SharedState>) -> Html<String> {
    let sources = state.sources.read().await;
    let results = state.results.read().await;
    let status = match results.as_ref() {
        Some(r) => format!("{} results loaded", r.total_results()),
        None => "Ready".to_string(),
    };
    Html(view::page(&sources, results.as_ref(), &status))
}
