//! Aggregation service talking to the NYT Books and Google Books APIs.

use std::fmt;

use books_kernel::settings::{GoogleBooksSettings, NytSettings, ProviderSettings};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use super::models::{Book, BookList};

const NYT_LIST_NAMES_PATH: &str = "/svc/books/v3/lists/names.json";
const GOOGLE_VOLUMES_PATH: &str = "/books/v1/volumes";

/// Upstream book provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Nyt,
    GoogleBooks,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Nyt => f.write_str("NYT Books API"),
            Provider::GoogleBooks => f.write_str("Google Books API"),
        }
    }
}

/// What went wrong while talking to a provider.
///
/// Request URLs are stripped from the wrapped `reqwest` errors because they
/// carry the API key in the query string.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {provider} failed")]
    Request {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} responded with status {status}")]
    Status {
        provider: Provider,
        status: StatusCode,
    },

    #[error("failed to decode {provider} response")]
    Decode {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    pub fn provider(&self) -> Provider {
        match self {
            UpstreamError::Request { provider, .. }
            | UpstreamError::Status { provider, .. }
            | UpstreamError::Decode { provider, .. } => *provider,
        }
    }
}

/// Failure of a service operation.
///
/// Displays only a generic message; the upstream cause is reachable through
/// [`std::error::Error::source`] and [`ServiceError::upstream`].
#[derive(Debug, Error)]
#[error("Internal Server Error")]
pub struct ServiceError {
    #[from]
    source: UpstreamError,
}

impl ServiceError {
    pub fn upstream(&self) -> &UpstreamError {
        &self.source
    }
}

#[derive(Debug, Deserialize)]
struct ListNamesResponse {
    results: Vec<BookList>,
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    #[serde(rename = "previewLink")]
    preview_link: Option<String>,
}

impl From<VolumeInfo> for Book {
    fn from(info: VolumeInfo) -> Self {
        Book {
            title: info.title.unwrap_or_default(),
            authors: info.authors.unwrap_or_default(),
            preview_link: info.preview_link.unwrap_or_default(),
        }
    }
}

/// Owns the provider credentials and a pooled HTTP client.
///
/// Built once per process and shared behind an `Arc`; never mutated.
pub struct BookDataService {
    http: Client,
    nyt: NytSettings,
    google_books: GoogleBooksSettings,
}

impl BookDataService {
    pub fn new(providers: &ProviderSettings, http: Client) -> Self {
        Self {
            http,
            nyt: providers.nyt.clone(),
            google_books: providers.google_books.clone(),
        }
    }

    /// Build the service with a default-configured HTTP client
    pub fn from_settings(providers: &ProviderSettings) -> reqwest::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self::new(providers, http))
    }

    /// All bestseller lists known to the NYT Books API.
    #[tracing::instrument(skip(self))]
    pub async fn get_book_lists(&self) -> Result<Vec<BookList>, ServiceError> {
        let url = endpoint(&self.nyt.base_url, NYT_LIST_NAMES_PATH);
        let request = self
            .http
            .get(url)
            .query(&[("api-key", self.nyt.api_key.as_str())]);

        let body: ListNamesResponse = fetch(Provider::Nyt, request).await?;
        tracing::debug!(count = body.results.len(), "fetched bestseller lists");

        Ok(body.results)
    }

    /// Catalog entries matching `list_code`, used as a free-text search term.
    #[tracing::instrument(skip(self))]
    pub async fn get_books_by_list_code(
        &self,
        list_code: &str,
    ) -> Result<Vec<Book>, ServiceError> {
        let url = endpoint(&self.google_books.base_url, GOOGLE_VOLUMES_PATH);
        let request = self.http.get(url).query(&[
            ("q", list_code),
            ("key", self.google_books.api_key.as_str()),
        ]);

        let body: VolumesResponse = fetch(Provider::GoogleBooks, request).await?;
        let books: Vec<Book> = body
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|volume| Book::from(volume.volume_info.unwrap_or_default()))
            .collect();
        tracing::debug!(count = books.len(), "fetched catalog volumes");

        Ok(books)
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

async fn fetch<T>(provider: Provider, request: RequestBuilder) -> Result<T, UpstreamError>
where
    T: DeserializeOwned,
{
    let response = request
        .send()
        .await
        .map_err(|e| UpstreamError::Request {
            provider,
            source: e.without_url(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status { provider, status });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::Decode {
            provider,
            source: e.without_url(),
        })
}
