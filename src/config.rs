use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2021-03-25";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Content platform configuration, built once at start-up and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub timeout: Duration,
}

impl SiteConfig {
    /// Config with the default dataset, API version and timeout. CDN is on.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "production".to_string());
        let timeout_secs: u64 = env::var("CONTENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .context("CONTENT_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            project_id: env::var("SANITY_PROJECT_ID")
                .context("SANITY_PROJECT_ID must be set")?,
            dataset: env::var("SANITY_DATASET").unwrap_or_else(|_| DEFAULT_DATASET.to_string()),
            api_version: env::var("SANITY_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            use_cdn: use_cdn_for(&app_env),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Base URL of the query endpoint for this project and dataset.
    pub fn query_endpoint(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.project_id, host, self.api_version, self.dataset
        )
    }
}

/// Development reads go straight to the API so edits show up immediately.
fn use_cdn_for(app_env: &str) -> bool {
    app_env != "development"
}
