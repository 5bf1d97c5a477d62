//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename generation and sanitisation

pub mod naming;
pub mod paths;

pub use naming::{page_filename, sanitize_path_component};
pub use paths::{
    commit_episode_dir, discard_episode_dir, ensure_dir, get_episode_folder, get_manga_folder,
    page_path, prepare_episode_dir, staging_dir,
};
