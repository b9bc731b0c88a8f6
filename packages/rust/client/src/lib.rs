//! Confluence REST API client.
//!
//! A thin wrapper over the content REST endpoints conflabel needs: fetching
//! a page body, adding a label, and listing the page/folder children of a
//! node. The client is an explicit handle constructed from [`WikiConfig`]
//! and passed to callers — never a process-wide singleton.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use conflabel_shared::{ConflabelError, Result, WikiConfig};

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("conflabel/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Timeout in seconds for a single API request.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Window size for child-listing pagination.
const CHILD_PAGE_LIMIT: usize = 100;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The two child collections a node can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    Page,
    Folder,
}

impl ChildKind {
    /// Path segment used by the `child/{type}` endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            ChildKind::Page => "page",
            ChildKind::Folder => "folder",
        }
    }
}

impl std::fmt::Display for ChildKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a child-listing response.
///
/// The API contract nominally guarantees an `id`, but records without one
/// have been observed in the wild; callers must treat a missing id as a
/// non-fatal skip.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildRecord {
    /// Content identifier of the child, if present.
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable title, if present.
    #[serde(default)]
    pub title: Option<String>,
}

/// Envelope of a `child/{type}` response window.
#[derive(Debug, Deserialize)]
struct ChildListing {
    #[serde(default)]
    results: Vec<ChildRecord>,
}

/// Envelope of a content fetch with `expand=body.storage`.
#[derive(Debug, Deserialize)]
struct ContentEnvelope {
    body: StorageBody,
}

#[derive(Debug, Deserialize)]
struct StorageBody {
    storage: StorageValue,
}

#[derive(Debug, Deserialize)]
struct StorageValue {
    value: String,
}

// ---------------------------------------------------------------------------
// ConfluenceClient
// ---------------------------------------------------------------------------

/// Handle to one Confluence instance, authenticated with basic auth.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    http: Client,
    config: WikiConfig,
}

impl ConfluenceClient {
    /// Create a client for the instance described by `config`.
    pub fn new(config: WikiConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConflabelError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// The content REST endpoint for one identifier.
    fn content_url(&self, id: &str) -> String {
        format!("{}/rest/api/content/{id}", self.config.base_url)
    }

    /// Fetch the stored body of a page, expanding `body.storage`.
    pub async fn page_content(&self, id: &str) -> Result<String> {
        let url = self.content_url(id);
        let envelope: ContentEnvelope = self
            .get_json(&url, &[("expand", "body.storage".to_string())])
            .await?;
        Ok(envelope.body.storage.value)
    }

    /// Add a label to a page or folder.
    pub async fn add_label(&self, id: &str, label: &str) -> Result<()> {
        let url = format!("{}/label", self.content_url(id));
        let body = serde_json::json!([{ "prefix": "global", "name": label }]);

        debug!(id, label, "adding label");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.api_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| ConflabelError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConflabelError::Network(format!("{url}: HTTP {status}")));
        }

        Ok(())
    }

    /// List all children of `id` with the given kind.
    ///
    /// The endpoint pages its results; the windows are fetched in order and
    /// concatenated, stopping at the first short window. No guarantee is
    /// made against items moving between windows mid-listing.
    pub async fn children(&self, id: &str, kind: ChildKind) -> Result<Vec<ChildRecord>> {
        let url = format!("{}/child/{}", self.content_url(id), kind.as_str());
        let mut records = Vec::new();
        let mut start = 0usize;

        loop {
            let window: ChildListing = self
                .get_json(
                    &url,
                    &[
                        ("start", start.to_string()),
                        ("limit", CHILD_PAGE_LIMIT.to_string()),
                    ],
                )
                .await?;

            let fetched = window.results.len();
            records.extend(window.results);

            if fetched < CHILD_PAGE_LIMIT {
                break;
            }
            start += CHILD_PAGE_LIMIT;
        }

        debug!(id, %kind, count = records.len(), "listed children");
        Ok(records)
    }

    /// GET a JSON document, mapping transport and decode failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .basic_auth(&self.config.username, Some(&self.config.api_token))
            .send()
            .await
            .map_err(|e| ConflabelError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConflabelError::Network(format!("{url}: HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ConflabelError::Api(format!("{url}: unexpected payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ConfluenceClient {
        let config = WikiConfig::new(server.uri(), "user@example.com", "token");
        ConfluenceClient::new(config).expect("build client")
    }

    #[tokio::test]
    async fn page_content_extracts_storage_value() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/content/196845"))
            .and(query_param("expand", "body.storage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "196845",
                "body": { "storage": { "value": "<p>hello</p>" } }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let content = client.page_content("196845").await.unwrap();
        assert_eq!(content, "<p>hello</p>");
    }

    #[tokio::test]
    async fn add_label_posts_global_prefix_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/content/100/label"))
            .and(body_json(serde_json::json!([
                { "prefix": "global", "name": "review" }
            ])))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.add_label("100", "review").await.unwrap();
    }

    #[tokio::test]
    async fn add_label_maps_http_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/content/100/label"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.add_label("100", "review").await.unwrap_err();
        assert!(matches!(err, ConflabelError::Network(_)));
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn children_stops_on_short_window() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/content/100/child/page"))
            .and(query_param("start", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    { "id": "101", "title": "Child A" },
                    { "id": "102", "title": "Child B" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let children = client.children("100", ChildKind::Page).await.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id.as_deref(), Some("101"));
    }

    #[tokio::test]
    async fn children_follows_full_windows() {
        let server = MockServer::start().await;

        let full_window: Vec<serde_json::Value> = (0..CHILD_PAGE_LIMIT)
            .map(|i| serde_json::json!({ "id": format!("{}", 1000 + i) }))
            .collect();

        Mock::given(method("GET"))
            .and(path("/rest/api/content/100/child/page"))
            .and(query_param("start", "0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "results": full_window })),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/api/content/100/child/page"))
            .and(query_param("start", CHILD_PAGE_LIMIT.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [ { "id": "9999" } ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let children = client.children("100", ChildKind::Page).await.unwrap();
        assert_eq!(children.len(), CHILD_PAGE_LIMIT + 1);
        assert_eq!(children.last().unwrap().id.as_deref(), Some("9999"));
    }

    #[tokio::test]
    async fn child_record_without_id_decodes_to_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/content/100/child/folder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [ { "title": "orphaned record" } ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let children = client.children("100", ChildKind::Folder).await.unwrap();
        assert_eq!(children.len(), 1);
        assert!(children[0].id.is_none());
        assert_eq!(children[0].title.as_deref(), Some("orphaned record"));
    }

    #[tokio::test]
    async fn children_maps_http_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/content/100/child/page"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.children("100", ChildKind::Page).await.unwrap_err();
        assert!(matches!(err, ConflabelError::Network(_)));
    }
}
