//! API response type definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Generic API response envelope shared by every JSON endpoint.
///
/// `data` is kept as raw JSON until `code` has been checked, since error
/// responses do not carry the endpoint's payload shape.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Parse an envelope from a raw response body.
    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            let text = String::from_utf8_lossy(body);
            Error::Protocol(format!(
                "Malformed response envelope: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Check the application status code and decode the payload.
    pub fn into_data<T: for<'de> Deserialize<'de>>(self) -> Result<T> {
        if self.code != 0 {
            let message = self
                .msg
                .filter(|m| !m.is_empty())
                .or(self.message)
                .unwrap_or_default();
            return Err(Error::Api {
                code: self.code,
                message,
            });
        }

        let data = self
            .data
            .ok_or_else(|| Error::Protocol("Response envelope has no data".into()))?;

        serde_json::from_value(data)
            .map_err(|e| Error::Protocol(format!("Unexpected response data: {}", e)))
    }
}

/// Location of an episode's encoded index document.
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeIndex {
    pub host: String,
    pub path: String,
}

impl EpisodeIndex {
    /// Full URL of the index blob.
    pub fn url(&self) -> String {
        format!("{}{}", self.host, self.path)
    }
}

/// Decoded image index: ordered resource paths of an episode's pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageIndex {
    pub pics: Vec<String>,
}

/// A signed download location for one page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageToken {
    pub url: String,
    pub token: String,
}

impl ImageToken {
    /// URL with the token appended as a query parameter.
    pub fn signed_url(&self) -> String {
        format!("{}?token={}", self.url, self.token)
    }
}

/// Request body for the image index endpoint.
#[derive(Debug, Serialize)]
pub struct ImageIndexRequest {
    pub ep_id: i64,
}

/// Request body for the token exchange endpoint.
///
/// `urls` is itself a JSON-encoded array of resource paths.
#[derive(Debug, Serialize)]
pub struct ImageTokenRequest {
    pub urls: String,
}

/// Request body for the manga detail endpoint.
#[derive(Debug, Serialize)]
pub struct MangaDetailRequest {
    pub comic_id: i64,
}

/// Manga details with its episode catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct MangaDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub ep_list: Vec<EpisodeInfo>,
}

/// One episode in a manga's catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeInfo {
    pub id: i64,
    #[serde(default)]
    pub ord: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_title: String,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_in_free: bool,
}

impl EpisodeInfo {
    /// Whether the current session may download this episode.
    pub fn is_available(&self) -> bool {
        !self.is_locked || self.is_in_free
    }

    /// Human-readable label, e.g. `12 Homecoming`.
    pub fn label(&self) -> String {
        format!("{} {}", self.short_title, self.title).trim().to_string()
    }
}

/// Logged-in user profile from the navigation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub uname: String,
    #[serde(default, rename = "isLogin")]
    pub is_login: bool,
}
