use crate::content::types::QueryParams;
use crate::models::DocumentType;

/// Flattens `slug.current` into a plain string field
const SLUG_PROJECTION: &str = r#""slug": slug.current"#;

/// The query shapes the site issues
#[derive(Debug, Clone, PartialEq)]
pub enum ContentQuery {
    /// One document of the given type whose slug equals `$slug`. Homes also
    /// project the other listings in their city in the same execution.
    BySlug { doc_type: DocumentType, slug: String },
    /// All homes whose `city` equals `$city`, in store order
    HomesInCity { city: String },
}

impl ContentQuery {
    pub fn by_slug(doc_type: DocumentType, slug: impl Into<String>) -> Self {
        Self::BySlug {
            doc_type,
            slug: slug.into(),
        }
    }

    pub fn homes_in_city(city: impl Into<String>) -> Self {
        Self::HomesInCity { city: city.into() }
    }

    /// GROQ text for this query
    pub fn groq(&self) -> String {
        match self {
            ContentQuery::BySlug {
                doc_type: DocumentType::Home,
                ..
            } => {
                let home = DocumentType::Home.as_str();
                format!(
                    r#"*[_type == "{home}" && slug.current == $slug] {{ ..., {slug}, "similarHomes": *[_type == "{home}" && city == ^.city && _id != ^._id] {{ ..., {slug} }} }}[0]"#,
                    home = home,
                    slug = SLUG_PROJECTION
                )
            }
            ContentQuery::BySlug {
                doc_type: DocumentType::BlogPost,
                ..
            } => format!(
                r#"*[_type == "{}" && slug.current == $slug] {{ ..., {} }}[0]"#,
                DocumentType::BlogPost.as_str(),
                SLUG_PROJECTION
            ),
            ContentQuery::HomesInCity { .. } => format!(
                r#"*[_type == "{}" && city == $city] {{ ..., {} }}"#,
                DocumentType::Home.as_str(),
                SLUG_PROJECTION
            ),
        }
    }

    /// Parameters bound into [`ContentQuery::groq`]
    pub fn params(&self) -> QueryParams {
        match self {
            ContentQuery::BySlug { slug, .. } => QueryParams::new().with("slug", slug.as_str()),
            ContentQuery::HomesInCity { city } => QueryParams::new().with("city", city.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn home_by_slug_projects_similar_homes_in_one_query() {
        let query = ContentQuery::by_slug(DocumentType::Home, "123-main-st");
        let groq = query.groq();
        assert!(groq.starts_with(r#"*[_type == "home" && slug.current == $slug]"#));
        assert!(groq.contains(r#""similarHomes": *[_type == "home" && city == ^.city && _id != ^._id]"#));
        assert!(groq.ends_with("[0]"));
        assert_eq!(query.params().get("slug"), Some(&json!("123-main-st")));
    }

    #[test]
    fn blog_post_by_slug_has_no_relation() {
        let groq = ContentQuery::by_slug(DocumentType::BlogPost, "tips").groq();
        assert_eq!(
            groq,
            r#"*[_type == "blogPost" && slug.current == $slug] { ..., "slug": slug.current }[0]"#
        );
    }

    #[test]
    fn homes_in_city_is_a_list_query() {
        let query = ContentQuery::homes_in_city("San Antonio");
        assert_eq!(
            query.groq(),
            r#"*[_type == "home" && city == $city] { ..., "slug": slug.current }"#
        );
        assert_eq!(query.params().get("city"), Some(&json!("San Antonio")));
    }
}
