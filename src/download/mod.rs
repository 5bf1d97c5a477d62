//! Download module for episode acquisition.
//!
//! This module provides:
//! - Episode resolution into signed page tasks
//! - Bounded concurrent page downloads
//! - Catalog iteration over a manga's episodes
//! - Download statistics

pub mod fanout;
pub mod manga;
pub mod resolver;
pub mod state;
pub mod task;

pub use fanout::{download_all, FanoutOptions, FanoutReport};
pub use manga::{download_episode, download_manga};
pub use resolver::{build_download_tasks, resolve_episode};
pub use state::MangaState;
pub use task::{DownloadTask, EpisodeKey};
