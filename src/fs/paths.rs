//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::api::EpisodeInfo;
use crate::config::Config;
use crate::error::Result;
use crate::fs::naming::{page_filename, sanitize_path_component};

/// Get the folder a manga's episodes are stored under.
pub fn get_manga_folder(config: &Config, title: &str) -> Result<PathBuf> {
    Ok(config
        .download_directory()
        .join(sanitize_path_component(title)?))
}

/// Get the folder for one episode, e.g. `<manga>/3. 3 Homecoming`.
pub fn get_episode_folder(manga_dir: &Path, episode: &EpisodeInfo) -> Result<PathBuf> {
    let name = format!("{}. {}", episode.ord, episode.label());
    Ok(manga_dir.join(sanitize_path_component(&name)?))
}

/// Get the file a page is written to.
pub fn page_path(episode_dir: &Path, ordinal: u32) -> PathBuf {
    episode_dir.join(page_filename(ordinal))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Folder an episode is written to until all of its pages are on disk.
pub fn staging_dir(episode_dir: &Path) -> PathBuf {
    let mut name = episode_dir
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    episode_dir.with_file_name(name)
}

/// Prepare an episode for download.
///
/// Returns `None` when the episode folder already exists, meaning the episode
/// was completed by an earlier run. Otherwise returns a fresh staging folder;
/// leftovers from an interrupted run are discarded first. A plain file with
/// the episode folder's name is replaced.
pub fn prepare_episode_dir(episode_dir: &Path) -> Result<Option<PathBuf>> {
    match std::fs::metadata(episode_dir) {
        Ok(meta) if meta.is_dir() => return Ok(None),
        Ok(_) => std::fs::remove_file(episode_dir)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let staging = staging_dir(episode_dir);
    match std::fs::metadata(&staging) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(&staging)?,
        Ok(_) => std::fs::remove_file(&staging)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    std::fs::create_dir(&staging)?;
    Ok(Some(staging))
}

/// Move a completed staging folder to its final episode folder.
pub fn commit_episode_dir(staging: &Path, episode_dir: &Path) -> Result<()> {
    std::fs::rename(staging, episode_dir)?;
    Ok(())
}

/// Remove a staging folder after an incomplete download.
pub fn discard_episode_dir(staging: &Path) {
    if let Err(e) = std::fs::remove_dir_all(staging) {
        tracing::debug!("Could not remove {}: {}", staging.display(), e);
    }
}
