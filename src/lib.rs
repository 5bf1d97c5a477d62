//! Bilimanga Downloader - episode downloader for Bilibili Manga
//!
//! This library provides the episode acquisition pipeline and the glue
//! around it.
//!
//! # Features
//!
//! - Episode index lookup and decoding (repeating-key cipher + zip container)
//! - Token exchange for signed page URLs
//! - Bounded concurrent page downloads with best-effort or fail-fast policy
//! - Cancellation of in-flight downloads
//! - Catalog iteration that skips locked and already-downloaded episodes
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use bilimanga_downloader::download::{download_all, resolve_episode, FanoutOptions};
//! use bilimanga_downloader::{EpisodeKey, MangaApi};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = MangaApi::new(
//!         "SESSDATA=...",
//!         "Mozilla/5.0",
//!         bilimanga_downloader::api::DEFAULT_TIMEOUT,
//!     )?;
//!
//!     let dir = Path::new("downloads/1");
//!     let tasks = resolve_episode(&api, EpisodeKey::new(28284, 477511), dir).await?;
//!     let report = download_all(&api, tasks, &FanoutOptions::default(), &CancellationToken::new()).await?;
//!     println!("{} pages downloaded", report.downloaded.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod index;
pub mod output;

// Re-exports for convenience
pub use api::MangaApi;
pub use config::{Config, FailurePolicy};
pub use download::{download_all, download_manga, resolve_episode, DownloadTask, EpisodeKey};
pub use error::{Error, Result};
