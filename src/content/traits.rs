use crate::content::types::QueryParams;
use crate::error::ContentError;
use async_trait::async_trait;
use serde_json::Value;

/// Common trait for content stores the loaders can query.
/// The HTTP client implements it; tests substitute an in-memory store.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run `query` with its named parameters and return the projected result
    /// (object, array or null). One round trip, no retries.
    async fn fetch(&self, query: &str, params: &QueryParams) -> Result<Value, ContentError>;

    /// Name of the backing store, for logs
    fn source_name(&self) -> &'static str;
}
