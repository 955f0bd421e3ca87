//! Per-route loaders: one content query each, shaped into a view-model.
//!
//! A loader either resolves to its view-model or fails. A null primary
//! result, or a missing path parameter, becomes [`LoadError::NotFound`];
//! transport failures and timeouts propagate as [`LoadError::Content`].

use crate::config::SiteConfig;
use crate::content::{ContentQuery, ContentSource};
use crate::error::{ContentError, LoadError};
use crate::models::{BlogPost, BlogPostPage, CityListings, DocumentType, Home, HomeDetails};
use crate::text::deslug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Loaders for every page route, sharing one content source
#[derive(Clone)]
pub struct Loaders {
    source: Arc<dyn ContentSource>,
    timeout: Duration,
}

impl Loaders {
    pub fn new(source: Arc<dyn ContentSource>, config: &SiteConfig) -> Self {
        Self {
            source,
            timeout: config.timeout,
        }
    }

    /// Run a query under the configured timeout
    async fn run(&self, query: &ContentQuery) -> Result<Value, ContentError> {
        let groq = query.groq();
        let params = query.params();

        debug!(source = self.source.source_name(), query = %groq, "Running content query");

        match tokio::time::timeout(self.timeout, self.source.fetch(&groq, &params)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Content query timed out");
                Err(ContentError::Timeout(self.timeout))
            }
        }
    }

    /// `/homes/:state/:city/:slug`: the listing and the other homes in its city
    pub async fn home_details(&self, slug: Option<&str>) -> Result<HomeDetails, LoadError> {
        let slug = required(slug)?;
        info!(slug, "Loading home");

        let value = self.run(&ContentQuery::by_slug(DocumentType::Home, slug)).await?;
        if value.is_null() {
            info!(slug, "No home matches slug");
            return Err(LoadError::NotFound);
        }

        let details: HomeDetails = decode("home", value)?;
        debug!(
            slug,
            similar = details.similar_homes.len(),
            "Loaded home with similar listings"
        );
        Ok(details)
    }

    /// `/blog/:slug`
    pub async fn blog_post(&self, slug: Option<&str>) -> Result<BlogPostPage, LoadError> {
        let slug = required(slug)?;
        info!(slug, "Loading blog post");

        let value = self
            .run(&ContentQuery::by_slug(DocumentType::BlogPost, slug))
            .await?;
        if value.is_null() {
            info!(slug, "No blog post matches slug");
            return Err(LoadError::NotFound);
        }

        let post: BlogPost = decode("blogPost", value)?;
        Ok(BlogPostPage { post })
    }

    /// `/homes/:state/:city`: every home in the city, in store order.
    ///
    /// An empty city resolves to an empty list; only missing path
    /// parameters are not-found.
    pub async fn city_listings(
        &self,
        state: Option<&str>,
        city: Option<&str>,
    ) -> Result<CityListings, LoadError> {
        let state = required(state)?;
        let city_slug = required(city)?;
        let city = deslug(city_slug);
        info!(state, city = %city, "Loading homes by city");

        let value = self.run(&ContentQuery::homes_in_city(city.as_str())).await?;
        let homes: Vec<Home> = if value.is_null() {
            Vec::new()
        } else {
            decode("home", value)?
        };

        info!(count = homes.len(), city = %city, "Loaded homes");
        Ok(CityListings {
            homes,
            city,
            state: state.to_string(),
        })
    }
}

fn required(param: Option<&str>) -> Result<&str, LoadError> {
    match param {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(LoadError::NotFound),
    }
}

fn decode<T: DeserializeOwned>(kind: &'static str, value: Value) -> Result<T, LoadError> {
    serde_json::from_value(value).map_err(|e| LoadError::Malformed {
        kind,
        message: e.to_string(),
    })
}
