//! Client for the upstream aggregation backend.
//!
//! Two endpoints only. Catalog failures are recoverable (the caller
//! falls back to an empty source list); query failures surface the HTTP
//! status with no retry.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};
use url::Url;

use bioquery_common::error::{BioqueryError, Result};
use bioquery_common::models::{QueryRequest, QueryResult, SourceCatalog, SourceDescriptor};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base: Url,
}

impl UpstreamClient {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| BioqueryError::Config(format!("invalid upstream base URL: {e}")))?;
        let client = ClientBuilder::new().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| BioqueryError::Config(format!("invalid endpoint path {path}: {e}")))
    }

    /// `GET /api/sources` — the source catalog.
    #[instrument(skip(self))]
    pub async fn fetch_sources(&self) -> Result<Vec<SourceDescriptor>> {
        let url = self.endpoint("api/sources")?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(BioqueryError::UpstreamStatus(resp.status().as_u16()));
        }
        let catalog: SourceCatalog = resp.json().await?;
        debug!(count = catalog.sources.len(), "fetched source catalog");
        Ok(catalog.sources)
    }

    /// `POST /api/query` — submit one query and wait for the aggregated
    /// result envelope.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn submit_query(&self, request: &QueryRequest) -> Result<QueryResult> {
        let url = self.endpoint("api/query")?;
        let resp = self.client.post(url).json(request).send().await?;
        if !resp.status().is_success() {
            return Err(BioqueryError::UpstreamStatus(resp.status().as_u16()));
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bioquery_common::models::ProcessingMode;

    #[test]
    fn rejects_malformed_base_url() {
        assert!(UpstreamClient::new("not a url").is_err());
        assert!(UpstreamClient::new("http://127.0.0.1:8000").is_ok());
    }

    #[test]
    fn request_serializes_with_wire_field_names() {
        let request = QueryRequest {
            query: "CRISPR gene editing".into(),
            sources: vec!["pubmed".into()],
            max_results: 10,
            processing_mode: ProcessingMode::Direct,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["processingMode"], "direct");
        assert_eq!(body["max_results"], 10);
    }

    // Requires a running upstream backend.
    #[tokio::test]
    #[ignore]
    async fn fetch_sources_live() {
        let client = UpstreamClient::new("http://127.0.0.1:8000").unwrap();
        let sources = client.fetch_sources().await.expect("catalog fetch failed");
        assert!(!sources.is_empty());
    }
}
