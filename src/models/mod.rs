use crate::error::ImageError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Number of media entries a home detail page lays out in its gallery
pub const GALLERY_SIZE: usize = 4;

/// Divisor the listing pages use to estimate a monthly mortgage payment
const MORTGAGE_DIVISOR: f64 = 158.91;

/// Document types stored in the content platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    Home,
    BlogPost,
}

impl DocumentType {
    /// The `_type` tag used in queries
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Home => "home",
            DocumentType::BlogPost => "blogPost",
        }
    }
}

/// Reference to an uploaded asset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// Opaque image reference embedded in a document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageRef {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRef>,
}

impl ImageRef {
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            key: None,
            asset: Some(AssetRef {
                reference: asset_id.into(),
            }),
        }
    }

    pub fn asset_id(&self) -> Option<&str> {
        self.asset.as_ref().map(|a| a.reference.as_str())
    }
}

/// Blog cover image: an image reference plus its required alt text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverImage {
    #[serde(flatten)]
    pub image: ImageRef,
    #[serde(rename = "altText", default)]
    pub alt_text: String,
}

/// Portable-text block, rendered by the presentation layer as-is
pub type Block = serde_json::Value;

/// Property listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub price: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub sqft: f64,
    #[serde(default)]
    pub media: Vec<ImageRef>,
    #[serde(default)]
    pub description: Vec<Block>,
    /// Absent in older documents
    #[serde(default)]
    pub features: Vec<String>,
    /// Flattened from `slug.current` by the query projection. The studio
    /// does not require a slug, so the projection can yield null.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Home {
    /// Estimated monthly mortgage payment, in whole dollars
    pub fn estimated_mortgage(&self) -> f64 {
        (self.price / MORTGAGE_DIVISOR).floor()
    }

    /// The first four media entries laid out on the detail page.
    ///
    /// Authoring validation requires four images, but nothing re-checks it
    /// at read time, so this returns an error instead of indexing blindly.
    pub fn gallery(&self) -> Result<&[ImageRef], ImageError> {
        if self.media.len() < GALLERY_SIZE {
            return Err(ImageError::NotEnoughMedia {
                found: self.media.len(),
                needed: GALLERY_SIZE,
            });
        }
        Ok(&self.media[..GALLERY_SIZE])
    }

    /// Card thumbnail, if the listing has any media at all
    pub fn thumbnail(&self) -> Option<&ImageRef> {
        self.media.first()
    }
}

/// Blog article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub published_at: NaiveDate,
    pub cover_image: CoverImage,
    pub title: String,
    /// Flattened from `slug.current` by the query projection
    pub slug: String,
    #[serde(default)]
    pub body: Vec<Block>,
}

/// View-model for `/homes/:state/:city/:slug`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HomeDetails {
    #[serde(flatten)]
    pub home: Home,
    /// Other listings in the same city, store order
    #[serde(default)]
    pub similar_homes: Vec<Home>,
}

/// View-model for `/homes/:state/:city`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityListings {
    pub homes: Vec<Home>,
    /// Display name derived from the path segment
    pub city: String,
    pub state: String,
}

/// View-model for `/blog/:slug`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPostPage {
    pub post: BlogPost,
}
