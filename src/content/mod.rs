pub mod query;
pub mod sanity;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod memory;

pub use query::ContentQuery;
pub use sanity::SanityClient;
pub use traits::ContentSource;
pub use types::QueryParams;
