use crate::config::SiteConfig;
use crate::error::ImageError;
use crate::models::ImageRef;

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Resolves image references to CDN URLs for one project and dataset
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
        }
    }

    /// Start building a URL for `source`
    pub fn image<'a>(&'a self, source: &'a ImageRef) -> ImageUrl<'a> {
        ImageUrl {
            builder: self,
            source,
            auto_format: false,
            width: None,
            height: None,
        }
    }
}

/// Accumulated transformation options for a single image
#[derive(Debug, Clone)]
pub struct ImageUrl<'a> {
    builder: &'a ImageUrlBuilder,
    source: &'a ImageRef,
    auto_format: bool,
    width: Option<u32>,
    height: Option<u32>,
}

impl<'a> ImageUrl<'a> {
    /// Let the CDN pick the best format the client accepts (`auto=format`)
    pub fn auto_format(mut self) -> Self {
        self.auto_format = true;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Materialize the absolute URL.
    ///
    /// Query options are always emitted in the order `w`, `h`, `auto`, so the
    /// result does not depend on the order the options were set in.
    pub fn url(&self) -> Result<String, ImageError> {
        let asset = parse_asset_id(self.source.asset_id().ok_or(ImageError::MissingAsset)?)?;

        let mut url = format!(
            "{}/{}/{}/{}-{}x{}.{}",
            CDN_BASE,
            self.builder.project_id,
            self.builder.dataset,
            asset.id,
            asset.width,
            asset.height,
            asset.format
        );

        let mut params = Vec::new();
        if let Some(w) = self.width {
            params.push(format!("w={}", w));
        }
        if let Some(h) = self.height {
            params.push(format!("h={}", h));
        }
        if self.auto_format {
            params.push("auto=format".to_string());
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        Ok(url)
    }
}

/// Parts of an asset id such as `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`
#[derive(Debug, PartialEq)]
struct AssetId<'a> {
    id: &'a str,
    width: u32,
    height: u32,
    format: &'a str,
}

fn parse_asset_id(reference: &str) -> Result<AssetId<'_>, ImageError> {
    let malformed = || ImageError::MalformedAsset(reference.to_string());

    let rest = reference.strip_prefix("image-").ok_or_else(malformed)?;
    let mut parts = rest.rsplitn(3, '-');
    let format = parts.next().ok_or_else(malformed)?;
    let dimensions = parts.next().ok_or_else(malformed)?;
    let id = parts.next().ok_or_else(malformed)?;

    let (w, h) = dimensions.split_once('x').ok_or_else(malformed)?;
    let width = w.parse().map_err(|_| malformed())?;
    let height = h.parse().map_err(|_| malformed())?;

    if id.is_empty() || format.is_empty() {
        return Err(malformed());
    }

    Ok(AssetId {
        id,
        width,
        height,
        format,
    })
}
