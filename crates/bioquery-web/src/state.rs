//! Shared application state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use bioquery_common::models::{QueryResult, SourceDescriptor};
use bioquery_common::noise::NoiseFilter;
use bioquery_common::Result;

use crate::config::AppConfig;
use crate::upstream::UpstreamClient;

/// State injected into every handler. Holds exactly one result at a
/// time; a new query replaces it wholesale.
pub struct AppState {
    pub upstream: UpstreamClient,
    pub sources: RwLock<Vec<SourceDescriptor>>,
    pub results: RwLock<Option<QueryResult>>,
    pub noise: NoiseFilter,
    query_pending: AtomicBool,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            upstream: UpstreamClient::new(&config.upstream_base)?,
            sources: RwLock::new(Vec::new()),
            results: RwLock::new(None),
            noise: NoiseFilter::default(),
            query_pending: AtomicBool::new(false),
        })
    }

    /// Fetch the source catalog once. Failure is logged and leaves the
    /// catalog empty rather than aborting startup.
    pub async fn refresh_sources(&self) {
        match self.upstream.fetch_sources().await {
            Ok(sources) => {
                info!(count = sources.len(), "loaded source catalog");
                *self.sources.write().await = sources;
            }
            Err(e) => {
                warn!("source catalog fetch failed, continuing with no sources: {e}");
            }
        }
    }

    /// Claim the single in-flight query slot. Returns false when a
    /// query is already pending.
    pub fn begin_query(&self) -> bool {
        !self.query_pending.swap(true, Ordering::SeqCst)
    }

    pub fn end_query(&self) {
        self.query_pending.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_state() -> AppState {
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            upstream_base: "http://127.0.0.1:1".to_string(),
        };
        AppState::new(&config).unwrap()
    }

    #[test]
    fn only_one_query_may_be_in_flight() {
        let state = test_state();
        assert!(state.begin_query());
        assert!(!state.begin_query());
        state.end_query();
        assert!(state.begin_query());
    }
}
