//! Document schemas for the authoring studio.
//!
//! These describe what an author may save: field types, validation rules and
//! the preview shown in the studio's document list. Nothing here runs when a
//! page is served.

use crate::models::DocumentType;
use crate::text::slugify;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Value type of a schema field
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    String,
    Number,
    Date,
    Url,
    Slug,
    Image,
    BlockArray,
    StringArray,
    ImageArray,
}

impl FieldType {
    fn is_array(&self) -> bool {
        matches!(
            self,
            FieldType::BlockArray | FieldType::StringArray | FieldType::ImageArray
        )
    }
}

/// Validation rule attached to a field
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "rule", content = "value")]
pub enum Rule {
    Required,
    /// Minimum numeric value, or minimum length for arrays
    Min(f64),
}

/// One entry of a field's fixed option list
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListOption {
    pub title: &'static str,
    pub value: &'static str,
}

/// A field in a document schema
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<Rule>,
    /// Sub-fields stored alongside an image
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
    /// Field a slug is generated from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<ListOption>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hotspot: bool,
}

impl FieldDefinition {
    pub fn new(name: &'static str, title: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            title,
            field_type,
            validation: Vec::new(),
            fields: Vec::new(),
            source: None,
            list: Vec::new(),
            hotspot: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.validation.push(Rule::Required);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.validation.push(Rule::Min(min));
        self
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn option(mut self, title: &'static str, value: &'static str) -> Self {
        self.list.push(ListOption { title, value });
        self
    }

    pub fn hotspot(mut self) -> Self {
        self.hotspot = true;
        self
    }

    fn is_required(&self) -> bool {
        self.validation.contains(&Rule::Required)
    }

    fn validate(&self, value: Option<&Value>, path: &str, failures: &mut Vec<ValidationFailure>) {
        for message in self.check(value) {
            failures.push(ValidationFailure {
                field: path.to_string(),
                message,
            });
        }

        if let Some(value) = value.filter(|v| !is_blank(self.field_type, v)) {
            for sub in &self.fields {
                let sub_path = format!("{}.{}", path, sub.name);
                sub.validate(value.get(sub.name), &sub_path, failures);
            }
        }
    }

    /// Messages for the rules this field's own value breaks
    fn check(&self, value: Option<&Value>) -> Vec<String> {
        let value = match value {
            Some(v) if !is_blank(self.field_type, v) => v,
            _ if self.is_required() => return vec!["Required".to_string()],
            _ => return Vec::new(),
        };

        if let Err(message) = self.check_type(value) {
            return vec![message];
        }

        let mut messages = Vec::new();
        for rule in &self.validation {
            if let Rule::Min(min) = rule {
                if self.field_type.is_array() {
                    let len = value.as_array().map(Vec::len).unwrap_or_default();
                    if (len as f64) < *min {
                        messages.push(format!("Must have at least {} items", min));
                    }
                } else if let Some(n) = value.as_f64() {
                    if n < *min {
                        messages.push(format!("Must be greater than or equal to {}", min));
                    }
                }
            }
        }

        if !self.list.is_empty() && !self.list.iter().any(|o| value.as_str() == Some(o.value)) {
            let values: Vec<&str> = self.list.iter().map(|o| o.value).collect();
            messages.push(format!("Must be one of: {}", values.join(", ")));
        }

        messages
    }

    fn check_type(&self, value: &Value) -> Result<(), String> {
        let ok = match self.field_type {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Date => value
                .as_str()
                .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok())
                .unwrap_or(false),
            FieldType::Url => value
                .as_str()
                .map(|s| reqwest::Url::parse(s).is_ok())
                .unwrap_or(false),
            FieldType::Slug => value["current"].is_string(),
            FieldType::Image => value["asset"]["_ref"].is_string(),
            FieldType::BlockArray => value.is_array(),
            FieldType::StringArray => value
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false),
            FieldType::ImageArray => value
                .as_array()
                .map(|items| items.iter().all(|i| i["asset"]["_ref"].is_string()))
                .unwrap_or(false),
        };

        if ok {
            Ok(())
        } else {
            Err(format!("Expected {:?}", self.field_type))
        }
    }
}

/// Empty strings, empty arrays and slugs without a value count as absent
fn is_blank(field_type: FieldType, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) if field_type == FieldType::Slug => {
            value["current"].as_str().map(str::is_empty).unwrap_or(true)
        }
        _ => false,
    }
}

/// A rule an author's document breaks
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Row shown for a document in the studio's list view
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Preview {
    pub title: String,
    pub subtitle: String,
    pub media: Option<Value>,
}

/// A document type's schema
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub name: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldDefinition>,
    #[serde(skip)]
    doc_type: DocumentType,
}

impl Schema {
    pub fn for_type(doc_type: DocumentType) -> Self {
        match doc_type {
            DocumentType::Home => home(),
            DocumentType::BlogPost => blog_post(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Every rule `document` breaks, in field order. Empty means it can be saved.
    pub fn validate(&self, document: &Value) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        for field in &self.fields {
            field.validate(document.get(field.name), field.name, &mut failures);
        }
        failures
    }

    /// Studio list-view projection of `document`
    pub fn preview(&self, document: &Value) -> Preview {
        let text = |name: &str| document[name].as_str().unwrap_or_default().to_string();

        match self.doc_type {
            DocumentType::Home => Preview {
                title: text("address"),
                subtitle: format!("{}, {}", text("city"), text("state")),
                media: document["media"].get(0).cloned(),
            },
            DocumentType::BlogPost => Preview {
                title: text("title"),
                subtitle: format!("Published: {}", text("publishedAt")),
                media: document.get("coverImage").filter(|v| !v.is_null()).cloned(),
            },
        }
    }

    /// Slug the studio generates from the slug field's source
    pub fn generate_slug(&self, document: &Value) -> Option<String> {
        let source = self
            .fields
            .iter()
            .find(|f| f.field_type == FieldType::Slug)?
            .source?;
        document[source].as_str().map(slugify)
    }
}

/// Property listing schema
pub fn home() -> Schema {
    Schema {
        name: "home",
        title: "Homes",
        doc_type: DocumentType::Home,
        fields: vec![
            FieldDefinition::new("media", "Media", FieldType::ImageArray)
                .hotspot()
                .required()
                .min(4.0),
            FieldDefinition::new("price", "Price", FieldType::Number)
                .required()
                .min(1.0),
            // Generated from the address; the studio does not require it
            FieldDefinition::new("slug", "URL Slug", FieldType::Slug).source("address"),
            FieldDefinition::new("address", "Address", FieldType::String).required(),
            FieldDefinition::new("city", "City", FieldType::String).required(),
            FieldDefinition::new("state", "State", FieldType::String)
                .option("Texas", "TX")
                .required(),
            FieldDefinition::new("zip", "Zip Code", FieldType::String).required(),
            FieldDefinition::new("bedrooms", "Bedrooms", FieldType::Number)
                .required()
                .min(1.0),
            FieldDefinition::new("bathrooms", "Bathrooms", FieldType::Number)
                .required()
                .min(1.0),
            FieldDefinition::new("sqft", "Square Feet", FieldType::Number)
                .required()
                .min(1.0),
            FieldDefinition::new("description", "Description", FieldType::BlockArray).required(),
            FieldDefinition::new("features", "Features", FieldType::StringArray),
            FieldDefinition::new("link", "Listing Link", FieldType::Url),
        ],
    }
}

/// Blog article schema
pub fn blog_post() -> Schema {
    Schema {
        name: "blogPost",
        title: "Blog Posts",
        doc_type: DocumentType::BlogPost,
        fields: vec![
            FieldDefinition::new("publishedAt", "Publication Date", FieldType::Date).required(),
            FieldDefinition::new("coverImage", "Cover Image", FieldType::Image)
                .hotspot()
                .field(FieldDefinition::new("altText", "Alt Text", FieldType::String).required())
                .required(),
            FieldDefinition::new("title", "Title", FieldType::String).required(),
            FieldDefinition::new("slug", "Slug", FieldType::Slug)
                .source("title")
                .required(),
            FieldDefinition::new("body", "Body", FieldType::BlockArray).required(),
        ],
    }
}
