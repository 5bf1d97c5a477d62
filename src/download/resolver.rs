//! Episode resolution: from an episode key to signed per-page download tasks.

use std::path::Path;

use crate::api::{ImageToken, MangaApi};
use crate::download::task::{DownloadTask, EpisodeKey};
use crate::error::{Error, Result};
use crate::fs::page_path;
use crate::index::decode_index_blob;

/// Resolve an episode into download tasks targeting `directory`.
///
/// Runs the index lookup, blob download, decode, and token exchange in
/// order. The first failing step aborts resolution and its error is returned
/// as is.
pub async fn resolve_episode(
    api: &MangaApi,
    key: EpisodeKey,
    directory: &Path,
) -> Result<Vec<DownloadTask>> {
    let index = api.get_episode_index(key.episode_id).await?;
    tracing::debug!("Episode {} index at {}", key.episode_id, index.url());

    let blob = api.get_index_blob(&index).await?;
    let image_index = decode_index_blob(key.manga_id, key.episode_id, &blob)?;

    if image_index.pics.is_empty() {
        tracing::info!("Episode {} has no pages", key.episode_id);
        return Ok(Vec::new());
    }

    let tokens = api.get_image_tokens(&image_index.pics).await?;
    let tasks = build_download_tasks(directory, &image_index.pics, tokens)?;

    tracing::info!("Resolved {} pages for episode {}", tasks.len(), key.episode_id);
    Ok(tasks)
}

/// Pair resource paths with their tokens, positionally, into numbered tasks.
pub fn build_download_tasks(
    directory: &Path,
    pics: &[String],
    tokens: Vec<ImageToken>,
) -> Result<Vec<DownloadTask>> {
    if pics.len() != tokens.len() {
        return Err(Error::DataIntegrity {
            resources: pics.len(),
            tokens: tokens.len(),
        });
    }

    Ok(tokens
        .into_iter()
        .zip(1u32..)
        .map(|(token, ordinal)| DownloadTask {
            ordinal,
            url: token.signed_url(),
            destination: page_path(directory, ordinal),
        })
        .collect())
}
