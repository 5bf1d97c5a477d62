//! Configuration structures and loading logic.

use crate::config::modes::FailurePolicy;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Session credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Raw `Cookie` header value of a logged-in browser session.
    #[serde(default)]
    pub cookie: String,

    /// File holding the cookie, used when `cookie` is empty.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// What to download.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Manga URL (`https://manga.bilibili.com/detail/mc28284`), `mc28284` or `28284`.
    #[serde(default)]
    pub manga: Option<String>,
}

/// Download options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Maximum pages downloaded at once within an episode.
    #[serde(default = "default_max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,

    /// What a failed page does to the rest of its episode.
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            max_concurrent_downloads: default_max_concurrent_downloads(),
            failure_policy: FailurePolicy::default(),
            request_timeout_seconds: default_request_timeout(),
            show_downloads: true,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            cookie: String::new(),
            cookie_file: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.99 Safari/537.36".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_concurrent_downloads() -> usize {
    16
}

fn default_request_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Get the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.options.request_timeout_seconds)
    }

    /// Get the session cookie, reading `cookie_file` when no inline cookie is set.
    pub fn resolve_cookie(&self) -> Result<String> {
        let inline = self.account.cookie.trim();
        if !inline.is_empty() {
            return Ok(inline.to_string());
        }

        match &self.account.cookie_file {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!(
                        "Failed to read cookie file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(content.trim().to_string())
            }
            None => Err(Error::MissingConfig("cookie or cookie_file".to_string())),
        }
    }
}
