use crate::config::SiteConfig;
use crate::error::LoadError;
use crate::image::ImageUrlBuilder;
use crate::loaders::Loaders;
use crate::views::{BlogPostView, CityView, HomeDetailsView};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Page routes the site serves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    BlogPost { slug: String },
    CityListings { state: String, city: String },
    HomeDetails { state: String, city: String, slug: String },
}

impl Route {
    /// Match a request path. Query strings and a trailing slash are ignored,
    /// and each segment is percent-decoded. A segment that does not decode to
    /// UTF-8 matches no route.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::decode(s).ok().map(|s| s.into_owned()))
            .collect::<Option<Vec<String>>>()?;
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            ["blog", slug] => Some(Route::BlogPost {
                slug: slug.to_string(),
            }),
            ["homes", state, city] => Some(Route::CityListings {
                state: state.to_string(),
                city: city.to_string(),
            }),
            ["homes", state, city, slug] => Some(Route::HomeDetails {
                state: state.to_string(),
                city: city.to_string(),
                slug: slug.to_string(),
            }),
            _ => None,
        }
    }
}

/// Status code and JSON body for a resolved route
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteResponse {
    pub status: u16,
    pub body: Value,
}

impl RouteResponse {
    fn ok(body: impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self {
                status: 500,
                body: json!({ "error": e.to_string() }),
            },
        }
    }

    fn error(err: &LoadError) -> Self {
        let status = err.status_code();
        let message = if status == 404 {
            "Not Found".to_string()
        } else {
            err.to_string()
        };
        Self {
            status,
            body: json!({ "error": message }),
        }
    }
}

/// Dispatches request paths to their loader and view
#[derive(Clone)]
pub struct Router {
    loaders: Loaders,
    images: ImageUrlBuilder,
}

impl Router {
    pub fn new(loaders: Loaders, config: &SiteConfig) -> Self {
        Self {
            loaders,
            images: ImageUrlBuilder::new(config),
        }
    }

    pub async fn handle(&self, path: &str) -> RouteResponse {
        let Some(route) = Route::parse(path) else {
            info!(path, "No route matches path");
            return RouteResponse::error(&LoadError::NotFound);
        };

        let response = match self.render(&route).await {
            Ok(response) => response,
            Err(err) => RouteResponse::error(&err),
        };

        if response.status >= 500 {
            warn!(path, status = response.status, "Route failed");
        } else {
            info!(path, status = response.status, "Route served");
        }
        response
    }

    async fn render(&self, route: &Route) -> Result<RouteResponse, LoadError> {
        Ok(match route {
            Route::BlogPost { slug } => {
                let page = self.loaders.blog_post(Some(slug.as_str())).await?;
                RouteResponse::ok(BlogPostView::build(&self.images, &page)?)
            }
            Route::CityListings { state, city } => {
                let listings = self
                    .loaders
                    .city_listings(Some(state.as_str()), Some(city.as_str()))
                    .await?;
                let view = CityView::build(&self.images, &listings, city)?;
                if view.is_empty() {
                    info!(state = %state, city = %view.city, "City has no listings");
                }
                RouteResponse::ok(view)
            }
            Route::HomeDetails { state, city, slug } => {
                let details = self.loaders.home_details(Some(slug.as_str())).await?;
                RouteResponse::ok(HomeDetailsView::build(&self.images, &details, state, city)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::memory::MemorySource;
    use crate::error::ContentError;
    use crate::models::fixtures::{blog_post_json, home_json, stored};
    use std::sync::Arc;

    fn router(source: MemorySource) -> Router {
        let config = SiteConfig::new("p1");
        Router::new(Loaders::new(Arc::new(source), &config), &config)
    }

    fn catalog() -> MemorySource {
        MemorySource::new(vec![
            stored(home_json("h1", "123-main-st", "Austin", 4)),
            stored(home_json("h2", "9-elm-ave", "Austin", 4)),
            stored(blog_post_json("first-time-buyers")),
        ])
    }

    #[test]
    fn parses_the_three_routes() {
        assert_eq!(
            Route::parse("/blog/first-time-buyers"),
            Some(Route::BlogPost {
                slug: "first-time-buyers".into()
            })
        );
        assert_eq!(
            Route::parse("/homes/tx/austin/"),
            Some(Route::CityListings {
                state: "tx".into(),
                city: "austin".into()
            })
        );
        assert_eq!(
            Route::parse("/homes/tx/austin/123-main-st?ref=home"),
            Some(Route::HomeDetails {
                state: "tx".into(),
                city: "austin".into(),
                slug: "123-main-st".into()
            })
        );
    }

    #[test]
    fn path_segments_are_percent_decoded() {
        assert_eq!(
            Route::parse("/homes/tx/san%20antonio"),
            Some(Route::CityListings {
                state: "tx".into(),
                city: "san antonio".into()
            })
        );
        assert_eq!(
            Route::parse("/blog/caf%C3%A9-guide"),
            Some(Route::BlogPost {
                slug: "café-guide".into()
            })
        );
        assert_eq!(Route::parse("/blog/%FF"), None);
    }

    #[test]
    fn incomplete_paths_do_not_match() {
        assert_eq!(Route::parse("/homes/tx"), None);
        assert_eq!(Route::parse("/blog"), None);
        assert_eq!(Route::parse("/about"), None);
        assert_eq!(Route::parse("/homes/tx/austin/slug/extra"), None);
    }

    #[tokio::test]
    async fn home_details_route() {
        let response = router(catalog()).handle("/homes/tx/austin/123-main-st").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["price"], "$450,000");
        assert_eq!(
            response.body["similar_homes"][0]["href"],
            "/homes/tx/austin/9-elm-ave"
        );
    }

    #[tokio::test]
    async fn unknown_slug_is_404() {
        let response = router(catalog()).handle("/homes/tx/austin/nope").await;
        assert_eq!(response.status, 404);
        assert_eq!(response.body["error"], "Not Found");
    }

    #[tokio::test]
    async fn unmatched_path_is_404() {
        let response = router(catalog()).handle("/homes/tx").await;
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn empty_city_is_200_with_no_homes() {
        let response = router(catalog()).handle("/homes/tx/el-paso").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["city"], "El Paso");
        assert_eq!(response.body["homes"], json!([]));
    }

    #[tokio::test]
    async fn encoded_city_segment_reaches_the_loader_decoded() {
        let source = MemorySource::new(vec![stored(home_json(
            "h4",
            "500-river-walk",
            "San Antonio",
            4,
        ))]);
        let response = router(source).handle("/homes/tx/san%20antonio").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["city"], "San Antonio");
        assert_eq!(
            response.body["homes"][0]["href"],
            "/homes/tx/san%20antonio/500-river-walk"
        );
    }

    #[tokio::test]
    async fn listing_without_slug_renders_unlinked() {
        let mut unslugged = home_json("h3", "", "Austin", 4);
        unslugged.as_object_mut().unwrap().remove("slug");
        let source = MemorySource::new(vec![
            stored(home_json("h1", "123-main-st", "Austin", 4)),
            unslugged,
        ]);
        let router = router(source);

        let response = router.handle("/homes/tx/austin").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["homes"][1]["href"], Value::Null);

        let response = router.handle("/homes/tx/austin/123-main-st").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["similar_homes"][0]["href"], Value::Null);
    }

    #[tokio::test]
    async fn blog_route() {
        let response = router(catalog()).handle("/blog/first-time-buyers").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["title"], "Five Tips for First-Time Buyers");
        assert_eq!(response.body["published_at"], "2022-04-12");
    }

    #[tokio::test]
    async fn transport_failure_is_5xx() {
        let source = MemorySource::failing(|| ContentError::Api {
            status: 400,
            message: "parse error".into(),
        });
        let response = router(source).handle("/blog/anything").await;
        assert_eq!(response.status, 502);
    }

    #[tokio::test]
    async fn short_gallery_is_5xx_not_a_panic() {
        let source = MemorySource::new(vec![stored(home_json("h1", "tiny", "Austin", 1))]);
        let response = router(source).handle("/homes/tx/austin/tiny").await;
        assert_eq!(response.status, 502);
    }
}
