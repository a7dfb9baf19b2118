use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A bestseller category as published by the NYT Books API.
///
/// Passed through exactly as the provider returns it: documented fields the
/// provider leaves out stay absent, and undocumented ones are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "list_name": "Hardcover Fiction",
    "display_name": "Hardcover Fiction",
    "list_name_encoded": "hardcover-fiction",
    "oldest_published_date": "2008-06-08",
    "newest_published_date": "2022-01-01",
    "updated": "WEEKLY"
}))]
pub struct BookList {
    /// Stable category identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
    /// Human readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// URL-safe identifier, usable as a list code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_name_encoded: Option<String>,
    /// First publication date of the list (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_published_date: Option<String>,
    /// Latest publication date of the list (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_published_date: Option<String>,
    /// Publication cadence, e.g. `WEEKLY` or `MONTHLY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Fields the provider sends beyond the documented ones
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A catalog entry from the Google Books API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "title": "The Great Gatsby",
    "authors": ["F. Scott Fitzgerald"],
    "previewLink": "https://books.google.com/greatgatsby"
}))]
pub struct Book {
    /// Title of the book, empty when the catalog has none
    pub title: String,
    /// Authors in catalog order
    pub authors: Vec<String>,
    /// Link to the catalog preview page, empty when the catalog has none
    #[serde(rename = "previewLink")]
    pub preview_link: String,
}
