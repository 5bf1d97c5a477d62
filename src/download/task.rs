//! Episode keys and per-page download tasks.

use std::path::PathBuf;

/// Identifies an episode and, through [`crate::index::index_key`], its cipher key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpisodeKey {
    pub manga_id: i64,
    pub episode_id: i64,
}

impl EpisodeKey {
    pub fn new(manga_id: i64, episode_id: i64) -> Self {
        Self {
            manga_id,
            episode_id,
        }
    }
}

/// One page to fetch and persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// 1-based page position within the episode.
    pub ordinal: u32,
    /// Signed image URL, token included.
    pub url: String,
    /// File the image bytes are written to.
    pub destination: PathBuf,
}
