use crate::error::ImageError;
use crate::image::ImageUrlBuilder;
use crate::models::{BlogPostPage, Block, CityListings, Home, HomeDetails};
use crate::text::format_price;
use chrono::NaiveDate;
use serde::Serialize;

/// Card thumbnail height on the city page
const CARD_IMAGE_HEIGHT: u32 = 448;
const COVER_WIDTH: u32 = 1310;
const COVER_HEIGHT: u32 = 873;

/// Listing card shown on city pages and under "similar homes"
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomeCard {
    /// None for listings saved without a slug; they render without a link
    pub href: Option<String>,
    pub address: String,
    pub price: String,
    pub image: Option<String>,
}

impl HomeCard {
    fn build(
        images: &ImageUrlBuilder,
        home: &Home,
        state: &str,
        city: &str,
        height: Option<u32>,
    ) -> Result<Self, ImageError> {
        let image = match home.thumbnail() {
            Some(media) => {
                let mut url = images.image(media).auto_format();
                if let Some(h) = height {
                    url = url.height(h);
                }
                Some(url.url()?)
            }
            None => None,
        };

        Ok(Self {
            href: home
                .slug
                .as_ref()
                .map(|slug| {
                    format!(
                        "/homes/{}/{}/{}",
                        urlencoding::encode(state),
                        urlencoding::encode(city),
                        urlencoding::encode(slug)
                    )
                }),
            address: home.address.clone(),
            price: format_price(home.price),
            image,
        })
    }
}

/// `/homes/:state/:city/:slug`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomeDetailsView {
    pub address: String,
    pub location: String,
    pub price: String,
    pub estimated_mortgage: String,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub sqft: f64,
    pub features: Vec<String>,
    pub description: Vec<Block>,
    pub gallery: Vec<String>,
    pub similar_homes: Vec<HomeCard>,
}

impl HomeDetailsView {
    /// `state` and `city` are the request's path segments, reused for links
    pub fn build(
        images: &ImageUrlBuilder,
        details: &HomeDetails,
        state: &str,
        city: &str,
    ) -> Result<Self, ImageError> {
        let home = &details.home;

        let gallery = home
            .gallery()?
            .iter()
            .map(|media| images.image(media).auto_format().url())
            .collect::<Result<Vec<_>, _>>()?;

        let similar_homes = details
            .similar_homes
            .iter()
            .map(|h| HomeCard::build(images, h, state, city, None))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            address: home.address.clone(),
            location: format!("{}, {} {}", home.city, home.state, home.zip),
            price: format_price(home.price),
            estimated_mortgage: format!("{}/mo", format_price(home.estimated_mortgage())),
            bedrooms: home.bedrooms,
            bathrooms: home.bathrooms,
            sqft: home.sqft,
            features: home.features.clone(),
            description: home.description.clone(),
            gallery,
            similar_homes,
        })
    }
}

/// `/homes/:state/:city`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CityView {
    pub city: String,
    pub state: String,
    pub homes: Vec<HomeCard>,
}

impl CityView {
    /// `city_segment` is the decoded path segment, re-encoded into card links
    pub fn build(
        images: &ImageUrlBuilder,
        listings: &CityListings,
        city_segment: &str,
    ) -> Result<Self, ImageError> {
        let homes = listings
            .homes
            .iter()
            .map(|h| {
                HomeCard::build(
                    images,
                    h,
                    &listings.state,
                    city_segment,
                    Some(CARD_IMAGE_HEIGHT),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            city: listings.city.clone(),
            state: listings.state.clone(),
            homes,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.homes.is_empty()
    }
}

/// `/blog/:slug`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlogPostView {
    pub title: String,
    pub published_at: NaiveDate,
    pub cover_image: String,
    pub cover_alt: String,
    pub body: Vec<Block>,
}

impl BlogPostView {
    pub fn build(images: &ImageUrlBuilder, page: &BlogPostPage) -> Result<Self, ImageError> {
        let post = &page.post;
        let cover_image = images
            .image(&post.cover_image.image)
            .auto_format()
            .width(COVER_WIDTH)
            .height(COVER_HEIGHT)
            .url()?;

        Ok(Self {
            title: post.title.clone(),
            published_at: post.published_at,
            cover_image,
            cover_alt: post.cover_image.alt_text.clone(),
            body: post.body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::models::fixtures::{blog_post_json, home_json};
    use crate::models::BlogPost;

    fn images() -> ImageUrlBuilder {
        ImageUrlBuilder::new(&SiteConfig::new("p1"))
    }

    fn home(id: &str, slug: &str, media: usize) -> Home {
        serde_json::from_value(home_json(id, slug, "Austin", media)).unwrap()
    }

    #[test]
    fn details_view_resolves_gallery_and_links() {
        let details = HomeDetails {
            home: home("h1", "123-main-st", 4),
            similar_homes: vec![home("h2", "9-elm-ave", 4)],
        };

        let view = HomeDetailsView::build(&images(), &details, "tx", "austin").unwrap();
        assert_eq!(view.price, "$450,000");
        assert_eq!(view.estimated_mortgage, "$2,831/mo");
        assert_eq!(view.location, "Austin, TX 78701");
        assert_eq!(view.gallery.len(), 4);
        assert_eq!(
            view.gallery[0],
            "https://cdn.sanity.io/images/p1/production/h10-1200x800.jpg?auto=format"
        );
        assert_eq!(
            view.similar_homes[0].href.as_deref(),
            Some("/homes/tx/austin/9-elm-ave")
        );
    }

    #[test]
    fn details_view_rejects_short_gallery() {
        let details = HomeDetails {
            home: home("h1", "123-main-st", 2),
            similar_homes: vec![],
        };
        let err = HomeDetailsView::build(&images(), &details, "tx", "austin").unwrap_err();
        assert_eq!(err, ImageError::NotEnoughMedia { found: 2, needed: 4 });
    }

    #[test]
    fn city_cards_use_fixed_height_thumbnails() {
        let listings = CityListings {
            homes: vec![home("h1", "123-main-st", 4), home("h2", "no-photos", 0)],
            city: "San Antonio".to_string(),
            state: "tx".to_string(),
        };

        let view = CityView::build(&images(), &listings, "san-antonio").unwrap();
        assert_eq!(
            view.homes[0].href.as_deref(),
            Some("/homes/tx/san-antonio/123-main-st")
        );
        assert!(view.homes[0]
            .image
            .as_deref()
            .unwrap()
            .ends_with("?h=448&auto=format"));
        assert_eq!(view.homes[1].image, None);
        assert!(!view.is_empty());
    }

    #[test]
    fn card_without_slug_has_no_link() {
        let mut unslugged = home("h2", "", 4);
        unslugged.slug = None;
        let listings = CityListings {
            homes: vec![home("h1", "123-main-st", 4), unslugged],
            city: "Austin".to_string(),
            state: "tx".to_string(),
        };

        let view = CityView::build(&images(), &listings, "austin").unwrap();
        assert_eq!(view.homes.len(), 2);
        assert!(view.homes[0].href.is_some());
        assert_eq!(view.homes[1].href, None);
        assert_eq!(view.homes[1].address, "123 Main St");
    }

    #[test]
    fn blog_cover_is_sized() {
        let post: BlogPost = serde_json::from_value(blog_post_json("tips")).unwrap();
        let view = BlogPostView::build(&images(), &BlogPostPage { post }).unwrap();
        assert_eq!(
            view.cover_image,
            "https://cdn.sanity.io/images/p1/production/cover123-2620x1746.png?w=1310&h=873&auto=format"
        );
        assert_eq!(view.cover_alt, "Porch at sunset");
    }
}
