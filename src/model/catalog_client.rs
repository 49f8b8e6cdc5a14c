//! Book catalog API client (Google Books volumes endpoint)

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use thiserror::Error;

use super::types::{BookRecord, Category, SearchCriteria};

/// Fixed page size; the catalog caps a single request at this many items
pub const MAX_RESULTS: u32 = 10;

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced a response (DNS, timeout, refused connection)
    #[error("{0}")]
    Network(String),

    #[error("Request failed with status code {0}")]
    Http(u16),

    #[error("Unexpected response payload: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        CatalogError::Network(error_chain(&error))
    }
}

/// reqwest's top-level message hides the interesting part in its source chain
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Anything that can answer a book search. The controller only talks to this.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<BookRecord>, CatalogError>;

    /// Whether a thumbnail URL actually resolves to something
    async fn thumbnail_available(&self, _url: &str) -> bool {
        true
    }
}

/// Build the request URL. `q` is `<text>` or `<text>+subject:<category>`.
pub fn build_search_url(base_url: &str, criteria: &SearchCriteria) -> String {
    let mut query = utf8_percent_encode(&criteria.free_text, URI_COMPONENT).to_string();
    if criteria.category != Category::All {
        query.push_str("+subject:");
        query.extend(utf8_percent_encode(criteria.category.value(), URI_COMPONENT));
    }
    format!("{}?q={}&maxResults={}", base_url, query, MAX_RESULTS)
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "imageLinks", default)]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageLinks {
    #[serde(default)]
    thumbnail: Option<String>,
}

fn valid_thumbnail(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    match url::Url::parse(raw.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(raw.trim().to_string()),
        _ => None,
    }
}

/// Decode a volumes payload. A missing `items` field is an empty result, not an error;
/// individual entries that do not look like volumes are skipped.
pub fn parse_volumes(body: &str) -> Result<Vec<BookRecord>, CatalogError> {
    let response: VolumesResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let mut seen: HashMap<String, usize> = HashMap::new();
    let books = response
        .items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value::<Volume>(raw) {
            Ok(volume) => Some((index, volume)),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed volume");
                None
            }
        })
        .map(|(index, volume)| {
            let base_id = volume
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("item-{}", index));
            let count = seen.entry(base_id.clone()).or_insert(0);
            *count += 1;
            let id = if *count == 1 {
                base_id
            } else {
                tracing::debug!(id = %base_id, "Duplicate volume id in payload");
                format!("{}#{}", base_id, count)
            };

            let info = volume.volume_info;
            BookRecord {
                id,
                title: info.title.unwrap_or_default(),
                thumbnail_url: valid_thumbnail(info.image_links.and_then(|links| links.thumbnail)),
                description: info.description.filter(|d| !d.trim().is_empty()),
            }
        })
        .collect();

    Ok(books)
}

/// HTTP client for the catalog service
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_volumes(&self, url: &str) -> Result<Vec<BookRecord>, CatalogError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        parse_volumes(&body)
    }
}

#[async_trait]
impl BookCatalog for CatalogClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<BookRecord>, CatalogError> {
        let url = build_search_url(&self.base_url, criteria);
        tracing::debug!(url = %url, "GET volumes");
        self.fetch_volumes(&url).await
    }

    async fn thumbnail_available(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(response) => match response.status() {
                // HEAD not supported; the image itself may be fine
                StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED => {
                    tracing::debug!(url, status = %response.status(), "Thumbnail host refused HEAD");
                    true
                }
                status => status.is_success(),
            },
            Err(e) => {
                tracing::debug!(url, error = %e, "Thumbnail probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server) -> CatalogClient {
        CatalogClient::new(format!("{}/books/v1/volumes", server.url()), Duration::from_secs(5))
            .expect("client")
    }

    fn three_volumes() -> serde_json::Value {
        json!({
            "kind": "books#volumes",
            "totalItems": 3,
            "items": [
                {
                    "id": "v1",
                    "volumeInfo": {
                        "title": "Dragon Rider",
                        "description": "A dragon and a boy.",
                        "imageLinks": { "thumbnail": "http://books.google.com/books/content?id=v1" }
                    }
                },
                {
                    "id": "v2",
                    "volumeInfo": { "title": "Eragon" }
                },
                {
                    "id": "v3",
                    "volumeInfo": {
                        "title": "Temeraire",
                        "imageLinks": { "smallThumbnail": "http://example.com/small.jpg" }
                    }
                }
            ]
        })
    }

    #[test]
    fn url_without_category() {
        let criteria = SearchCriteria::new("dragons", Category::All);
        assert_eq!(
            build_search_url("https://example.com/volumes", &criteria),
            "https://example.com/volumes?q=dragons&maxResults=10"
        );
    }

    #[test]
    fn url_with_category_suffix() {
        let criteria = SearchCriteria::new("dragons", Category::Fiction);
        assert_eq!(
            build_search_url("https://example.com/volumes", &criteria),
            "https://example.com/volumes?q=dragons+subject:fiction&maxResults=10"
        );
    }

    #[test]
    fn url_encodes_free_text_like_uri_components() {
        let criteria = SearchCriteria::new("war & peace/tolstoy (1869)", Category::SciFi);
        assert_eq!(
            build_search_url("https://example.com/volumes", &criteria),
            "https://example.com/volumes?q=war%20%26%20peace%2Ftolstoy%20(1869)+subject:scifi&maxResults=10"
        );
    }

    #[test]
    fn parse_extracts_optional_fields() {
        let books = parse_volumes(&three_volumes().to_string()).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].title, "Dragon Rider");
        assert_eq!(books[0].description.as_deref(), Some("A dragon and a boy."));
        assert_eq!(
            books[0].thumbnail_url.as_deref(),
            Some("http://books.google.com/books/content?id=v1")
        );
        assert_eq!(books[1].thumbnail_url, None);
        assert_eq!(books[1].description, None);
        assert_eq!(books[2].thumbnail_url, None);
    }

    #[test]
    fn parse_treats_missing_items_as_empty() {
        assert_eq!(parse_volumes(r#"{"kind":"books#volumes","totalItems":0}"#).unwrap(), vec![]);
        assert_eq!(parse_volumes(r#"{"items":[]}"#).unwrap(), vec![]);
    }

    #[test]
    fn parse_rejects_non_object_payloads() {
        assert!(matches!(parse_volumes("<html>"), Err(CatalogError::Parse(_))));
        assert!(matches!(parse_volumes(r#"{"items":"nope"}"#), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn parse_skips_malformed_entries() {
        let body = json!({
            "items": [
                null,
                { "id": "ok", "volumeInfo": { "title": "Kept" } },
                42,
                { "id": "bad", "volumeInfo": { "title": ["not", "a", "string"] } },
                { "volumeInfo": { "title": "Also kept" } }
            ]
        });
        let books = parse_volumes(&body.to_string()).unwrap();

        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Kept", "Also kept"]);
        assert_eq!(books[1].id, "item-4");
    }

    #[test]
    fn parse_keeps_ids_unique() {
        let body = json!({
            "items": [
                { "id": "dup", "volumeInfo": { "title": "A" } },
                { "id": "dup", "volumeInfo": { "title": "B" } },
                { "volumeInfo": { "title": "C" } }
            ]
        });
        let ids: Vec<String> = parse_volumes(&body.to_string())
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec!["dup", "dup#2", "item-2"]);
    }

    #[test]
    fn parse_drops_unusable_thumbnails_and_blank_descriptions() {
        let body = json!({
            "items": [
                { "id": "a", "volumeInfo": { "title": "A", "description": "  ",
                  "imageLinks": { "thumbnail": "not a url" } } },
                { "id": "b", "volumeInfo": { "title": "B",
                  "imageLinks": { "thumbnail": "" } } }
            ]
        });
        let books = parse_volumes(&body.to_string()).unwrap();
        assert!(books.iter().all(|b| b.thumbnail_url.is_none()));
        assert_eq!(books[0].description, None);
    }

    #[tokio::test]
    async fn search_sends_expected_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/books/v1/volumes")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "dragons subject:fiction".into()),
                Matcher::UrlEncoded("maxResults".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(three_volumes().to_string())
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let books = client
            .search(&SearchCriteria::new("dragons", Category::Fiction))
            .await
            .unwrap();

        assert_eq!(books.len(), 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_without_category_has_no_subject() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/books/v1/volumes")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "xyzzy123".into()),
                Matcher::UrlEncoded("maxResults".into(), "10".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let books = client
            .search(&SearchCriteria::new("xyzzy123", Category::All))
            .await
            .unwrap();

        assert!(books.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/books/v1/volumes")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .search(&SearchCriteria::new("test", Category::All))
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::Http(503));
        assert_eq!(err.to_string(), "Request failed with status code 503");
    }

    #[tokio::test]
    async fn garbage_body_is_parse_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/books/v1/volumes")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .search(&SearchCriteria::new("test", Category::All))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let client = CatalogClient::new("http://127.0.0.1:1/volumes", Duration::from_secs(2)).unwrap();
        let err = client
            .search(&SearchCriteria::new("test", Category::All))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Network(ref msg) if !msg.is_empty()));
    }

    #[tokio::test]
    async fn thumbnail_check_follows_status() {
        let mut server = Server::new_async().await;
        server.mock("HEAD", "/ok.jpg").with_status(200).create_async().await;
        server.mock("HEAD", "/gone.jpg").with_status(404).create_async().await;
        server.mock("HEAD", "/no-head.jpg").with_status(501).create_async().await;

        let client = client_for(&server);
        assert!(client.thumbnail_available(&format!("{}/ok.jpg", server.url())).await);
        assert!(!client.thumbnail_available(&format!("{}/gone.jpg", server.url())).await);
        assert!(client.thumbnail_available(&format!("{}/no-head.jpg", server.url())).await);
    }
}
