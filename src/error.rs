//! Error types for the bilimanga-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid manga id or URL: {0}")]
    InvalidMangaId(String),

    // Transport errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Protocol errors
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    // Index decoding errors
    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Image index has {resources} entries but token exchange returned {tokens}")]
    DataIntegrity { resources: usize, tokens: usize },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Download cancelled")]
    Cancelled,

    // File system errors
    #[error("Invalid path component: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Archive(err.to_string())
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SOME_EPISODES_FAILED: i32 = 6;
}
