//! In-memory content store used by loader and route tests.

use crate::content::traits::ContentSource;
use crate::content::types::QueryParams;
use crate::error::ContentError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

/// Answers the site's query shapes from a fixed document list. Documents are
/// stored the way the platform stores them (`slug: { current }`) and flattened
/// on the way out.
#[derive(Default)]
pub struct MemorySource {
    documents: Vec<Value>,
    failure: Option<fn() -> ContentError>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, QueryParams)>>,
}

impl MemorySource {
    pub fn new(documents: Vec<Value>) -> Self {
        Self {
            documents,
            ..Default::default()
        }
    }

    /// Every fetch fails with the error `failure` builds
    pub fn failing(failure: fn() -> ContentError) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    /// Every fetch sleeps for `delay` before answering
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, QueryParams)> {
        self.calls.lock().unwrap().clone()
    }

    fn of_type<'a>(&'a self, doc_type: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.documents
            .iter()
            .filter(move |d| d["_type"].as_str() == Some(doc_type))
    }

    fn doc_type(query: &str) -> &'static str {
        if query.contains(r#"_type == "blogPost""#) {
            "blogPost"
        } else {
            "home"
        }
    }
}

/// Replace the stored `slug: { current }` with a plain string, or null when
/// the document has no slug, as `"slug": slug.current` does
fn flatten(doc: &Value) -> Value {
    let mut doc = doc.clone();
    doc["slug"] = match doc["slug"]["current"].as_str() {
        Some(current) => Value::String(current.to_string()),
        None => Value::Null,
    };
    doc
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch(&self, query: &str, params: &QueryParams) -> Result<Value, ContentError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), params.clone()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let doc_type = Self::doc_type(query);

        if let Some(slug) = params.get("slug") {
            let Some(doc) = self
                .of_type(doc_type)
                .find(|d| &d["slug"]["current"] == slug)
            else {
                return Ok(Value::Null);
            };

            let mut out = flatten(doc);
            if query.contains("similarHomes") {
                let similar: Vec<Value> = self
                    .of_type(doc_type)
                    .filter(|d| d["city"] == doc["city"] && d["_id"] != doc["_id"])
                    .map(flatten)
                    .collect();
                out["similarHomes"] = Value::Array(similar);
            }
            return Ok(out);
        }

        if let Some(city) = params.get("city") {
            let homes: Vec<Value> = self
                .of_type(doc_type)
                .filter(|d| &d["city"] == city)
                .map(flatten)
                .collect();
            return Ok(Value::Array(homes));
        }

        Ok(Value::Null)
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}
