//! Bilibili Manga HTTP client.

use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::types::*;
use crate::error::{Error, Result};

/// Manga API base URL.
pub const MANGA_BASE: &str = "https://manga.bilibili.com";

/// Main site API base URL (profile lookups).
pub const API_BASE: &str = "https://api.bilibili.com";

const MANGA_DETAIL_PATH: &str = "/twirp/comic.v1.Comic/ComicDetail?device=pc&platform=web";
const IMAGE_INDEX_PATH: &str = "/twirp/comic.v1.Comic/GetImageIndex?device=pc&platform=web";
const IMAGE_TOKEN_PATH: &str = "/twirp/comic.v1.Comic/ImageToken?device=pc&platform=web";
const NAV_PATH: &str = "/x/web-interface/nav";

/// Content type sent with JSON request bodies.
pub const JSON_CONTENT: &str = "application/json;charset=UTF-8";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URLs the client talks to.
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    pub manga_base: String,
    pub api_base: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            manga_base: MANGA_BASE.to_string(),
            api_base: API_BASE.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Point every endpoint at a single base URL.
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            manga_base: base.clone(),
            api_base: base,
        }
    }
}

/// Authenticated Bilibili Manga API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct MangaApi {
    client: Client,
    cookie: HeaderValue,
    endpoints: ApiEndpoints,
}

impl MangaApi {
    /// Create a new API client for the given session cookie.
    pub fn new(cookie: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let cookie = HeaderValue::from_str(cookie.trim()).map_err(|_| Error::ConfigValidation {
            field: "cookie".to_string(),
            message: "Cookie contains characters not allowed in an HTTP header".to_string(),
        })?;

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            cookie,
            endpoints: ApiEndpoints::default(),
        })
    }

    /// Replace the base URLs the client talks to.
    pub fn with_endpoints(mut self, endpoints: ApiEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Perform a single request and return the full response body.
    ///
    /// The body is returned whatever the HTTP status; callers interpret
    /// JSON envelopes themselves. Only transport failures are errors.
    pub async fn fetch(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Vec<u8>> {
        let url = Url::parse(url)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .header(header::COOKIE, self.cookie.clone());

        if let Some(body) = body {
            if let Some(content_type) = content_type.filter(|c| !c.is_empty()) {
                request = request.header(header::CONTENT_TYPE, content_type);
            }
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        tracing::debug!("Response status: {}", response.status());

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// POST a JSON payload and decode the envelope's data.
    async fn post_json<P: Serialize, T: DeserializeOwned>(&self, url: &str, payload: &P) -> Result<T> {
        let body = serde_json::to_string(payload)
            .map_err(|e| Error::Protocol(format!("Failed to encode request: {}", e)))?;
        tracing::debug!("Request body: {}", body);

        let response = self
            .fetch(Method::POST, url, Some(&body), Some(JSON_CONTENT))
            .await?;
        tracing::debug!("Response: {}", String::from_utf8_lossy(&response));

        ApiResponse::parse(&response)?.into_data()
    }

    /// Get the profile of the logged-in user (validates the cookie).
    pub async fn get_user_info(&self) -> Result<UserInfo> {
        let url = format!("{}{}", self.endpoints.api_base, NAV_PATH);
        let response = self.fetch(Method::GET, &url, None, None).await?;
        tracing::debug!("Nav response: {}", String::from_utf8_lossy(&response));

        ApiResponse::parse(&response)?.into_data()
    }

    /// Get a manga's details and episode catalog.
    pub async fn get_manga_detail(&self, manga_id: i64) -> Result<MangaDetail> {
        let url = format!("{}{}", self.endpoints.manga_base, MANGA_DETAIL_PATH);
        self.post_json(&url, &MangaDetailRequest { comic_id: manga_id })
            .await
    }

    /// Look up where an episode's encoded index document lives.
    pub async fn get_episode_index(&self, episode_id: i64) -> Result<EpisodeIndex> {
        let url = format!("{}{}", self.endpoints.manga_base, IMAGE_INDEX_PATH);
        self.post_json(&url, &ImageIndexRequest { ep_id: episode_id })
            .await
    }

    /// Download the raw (header + ciphertext) index blob.
    pub async fn get_index_blob(&self, index: &EpisodeIndex) -> Result<Vec<u8>> {
        let blob = self.fetch(Method::GET, &index.url(), None, None).await?;
        tracing::debug!("Index blob: {} bytes", blob.len());
        Ok(blob)
    }

    /// Exchange resource paths for signed download locations, in the same order.
    pub async fn get_image_tokens(&self, pics: &[String]) -> Result<Vec<ImageToken>> {
        let url = format!("{}{}", self.endpoints.manga_base, IMAGE_TOKEN_PATH);
        let urls = serde_json::to_string(pics)
            .map_err(|e| Error::Protocol(format!("Failed to encode resource list: {}", e)))?;

        self.post_json(&url, &ImageTokenRequest { urls }).await
    }

    /// Download an image, returning its bytes verbatim.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        self.fetch(Method::GET, url, None, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COOKIE: &str = "SESSDATA=abc123; bili_jct=xyz";
    const UA: &str = "bilimanga-downloader-test";

    fn api_for(server: &MockServer) -> MangaApi {
        MangaApi::new(COOKIE, UA, DEFAULT_TIMEOUT)
            .unwrap()
            .with_endpoints(ApiEndpoints::single(server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_sets_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("cookie", COOKIE))
            .and(header("user-agent", UA))
            .and(header("content-type", JSON_CONTENT))
            .and(body_string("{}"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let url = format!("{}/echo", server.uri());
        let body = api
            .fetch(Method::POST, &url, Some("{}"), Some(JSON_CONTENT))
            .await
            .unwrap();
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn test_fetch_without_body_has_no_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let url = format!("{}/plain", server.uri());
        let body = api
            .fetch(Method::GET, &url, None, Some(JSON_CONTENT))
            .await
            .unwrap();
        assert_eq!(body, vec![1u8, 2, 3]);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("content-type").is_none());
        assert!(requests[0].headers.get("cookie").is_some());
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let body = api
            .fetch(Method::GET, &server.uri(), None, None)
            .await
            .unwrap();
        assert_eq!(body, b"upstream broke");
    }

    #[tokio::test]
    async fn test_fetch_transport_failure() {
        let api = MangaApi::new(COOKIE, UA, Duration::from_secs(5)).unwrap();
        let err = api
            .fetch(Method::GET, "http://127.0.0.1:1/unreachable", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let api = MangaApi::new(COOKIE, UA, Duration::from_millis(200))
            .unwrap()
            .with_endpoints(ApiEndpoints::single(server.uri()));
        let err = api
            .fetch(Method::GET, &server.uri(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_invalid_cookie_rejected() {
        assert!(matches!(
            MangaApi::new("bad\ncookie", UA, DEFAULT_TIMEOUT),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_episode_index() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/twirp/comic.v1.Comic/GetImageIndex"))
            .and(body_json(json!({ "ep_id": 7 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "msg": "",
                "data": { "host": "https://i0.hdslb.com", "path": "/bfs/manga/7.index" }
            })))
            .mount(&server)
            .await;

        let index = api_for(&server).get_episode_index(7).await.unwrap();
        assert_eq!(index.url(), "https://i0.hdslb.com/bfs/manga/7.index");
    }

    #[tokio::test]
    async fn test_get_image_tokens_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/twirp/comic.v1.Comic/ImageToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 99,
                "msg": "token service unavailable",
                "data": {}
            })))
            .mount(&server)
            .await;

        let err = api_for(&server)
            .get_image_tokens(&["a.jpg".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api { code: 99, .. }));
    }

    #[tokio::test]
    async fn test_get_manga_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/twirp/comic.v1.Comic/ComicDetail"))
            .and(body_json(json!({ "comic_id": 100 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "data": {
                    "id": 100,
                    "title": "Example",
                    "ep_list": [
                        { "id": 8, "ord": 2, "title": "Second", "short_title": "2", "is_locked": true, "is_in_free": false },
                        { "id": 7, "ord": 1, "title": "First", "short_title": "1", "is_locked": false, "is_in_free": false }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let detail = api_for(&server).get_manga_detail(100).await.unwrap();
        assert_eq!(detail.title, "Example");
        assert_eq!(detail.ep_list.len(), 2);
        assert!(!detail.ep_list[0].is_available());
        assert!(detail.ep_list[1].is_available());
    }

    #[tokio::test]
    async fn test_get_user_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x/web-interface/nav"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "message": "0",
                "data": { "isLogin": true, "uname": "reader" }
            })))
            .mount(&server)
            .await;

        let user = api_for(&server).get_user_info().await.unwrap();
        assert_eq!(user.uname, "reader");
        assert!(user.is_login);
    }
}
