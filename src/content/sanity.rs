use crate::config::SiteConfig;
use crate::content::traits::ContentSource;
use crate::content::types::QueryParams;
use crate::error::ContentError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Envelope the query endpoint wraps results in
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    ms: Option<u64>,
}

/// HTTP client for the content platform's query API
pub struct SanityClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl SanityClient {
    /// Create a client for the project and dataset in `config`
    pub fn new(config: &SiteConfig) -> Result<Self, ContentError> {
        Self::with_endpoint(config, config.query_endpoint())
    }

    /// Same as [`SanityClient::new`], but querying `endpoint` instead of the
    /// platform URL derived from `config`
    pub fn with_endpoint(
        config: &SiteConfig,
        endpoint: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("realty-content/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ContentError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn fetch(&self, query: &str, params: &QueryParams) -> Result<Value, ContentError> {
        let mut pairs = vec![("query".to_string(), query.to_string())];
        pairs.extend(params.to_query_pairs());

        debug!(endpoint = %self.endpoint, query, "Sending content query");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&pairs)
            .send()
            .await
            .map_err(|e| ContentError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Content API returned an error");
            return Err(ContentError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ContentError::from_reqwest(e, self.timeout))?;

        debug!(ms = ?body.ms, "Content query completed");
        Ok(body.result)
    }

    fn source_name(&self) -> &'static str {
        "Sanity"
    }
}
