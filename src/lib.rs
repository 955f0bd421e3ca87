//! Content retrieval and view-model shaping for a real-estate listings site.
//!
//! Pages are served by [`routes::Router`], which hands each path to a
//! [`loaders::Loaders`] method. Loaders query the content platform through a
//! [`content::ContentSource`] and shape the result into the view-models in
//! [`models`]; [`views`] resolves images and formats prices for display.

pub mod config;
pub mod content;
pub mod error;
pub mod image;
pub mod loaders;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod text;
pub mod views;

pub use config::SiteConfig;
pub use error::{ContentError, ImageError, LoadError};
pub use loaders::Loaders;
pub use routes::{Route, RouteResponse, Router};
