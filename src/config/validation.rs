//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Minimum length for a session cookie.
const MIN_COOKIE_LENGTH: usize = 10;

/// Upper bound on concurrent page downloads.
const MAX_CONCURRENT_DOWNLOADS: usize = 256;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_cookie(&config.resolve_cookie()?)?;
    validate_user_agent(&config.account.user_agent)?;
    validate_concurrency(config.options.max_concurrent_downloads)?;
    validate_timeout(config.options.request_timeout_seconds)?;

    let manga = config
        .target
        .manga
        .as_deref()
        .ok_or_else(|| Error::MissingConfig("manga (URL or id to download)".to_string()))?;
    parse_manga_id(manga)?;

    Ok(())
}

/// Validate the session cookie.
pub fn validate_cookie(cookie: &str) -> Result<()> {
    if cookie.is_empty() {
        return Err(Error::MissingConfig("cookie".to_string()));
    }

    if cookie.len() < MIN_COOKIE_LENGTH {
        return Err(Error::ConfigValidation {
            field: "cookie".to_string(),
            message: format!(
                "Cookie must be at least {} characters (got {})",
                MIN_COOKIE_LENGTH,
                cookie.len()
            ),
        });
    }

    // Check for placeholder values
    let cookie_lower = cookie.to_lowercase();
    if cookie_lower.contains("replaceme") || cookie_lower.contains("your_cookie") {
        return Err(Error::ConfigValidation {
            field: "cookie".to_string(),
            message: "Cookie appears to be a placeholder. Please provide your browser's cookie."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    Ok(())
}

/// Validate the page download concurrency.
pub fn validate_concurrency(max_concurrent: usize) -> Result<()> {
    if max_concurrent == 0 || max_concurrent > MAX_CONCURRENT_DOWNLOADS {
        return Err(Error::ConfigValidation {
            field: "max_concurrent_downloads".to_string(),
            message: format!(
                "Must be between 1 and {} (got {})",
                MAX_CONCURRENT_DOWNLOADS, max_concurrent
            ),
        });
    }

    Ok(())
}

/// Validate the request timeout.
pub fn validate_timeout(seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "request_timeout_seconds".to_string(),
            message: "Timeout must be at least 1 second".to_string(),
        });
    }

    Ok(())
}

/// Extract the numeric manga id from a URL, an `mc`-prefixed id, or a bare id.
pub fn parse_manga_id(input: &str) -> Result<i64> {
    let input = input.trim();

    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        // Pattern: https://manga.bilibili.com/detail/mc28284?from=manga_homepage
        let url = Url::parse(input)?;
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidMangaId(input.to_string()))?
    } else {
        input.to_string()
    };

    let id_pattern =
        Regex::new(r"^(?:mc)?(\d+)$").map_err(|e| Error::Config(e.to_string()))?;

    id_pattern
        .captures(&candidate)
        .and_then(|captures| captures.get(1))
        .and_then(|id| id.as_str().parse::<i64>().ok())
        .ok_or_else(|| Error::InvalidMangaId(input.to_string()))
}
