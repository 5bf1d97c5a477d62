//! Catalog-level download logic.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::api::{MangaApi, MangaDetail};
use crate::config::Config;
use crate::download::fanout::{download_all, FanoutOptions, FanoutReport};
use crate::download::resolver::resolve_episode;
use crate::download::state::MangaState;
use crate::download::task::EpisodeKey;
use crate::error::{Error, Result};
use crate::fs::{
    commit_episode_dir, discard_episode_dir, ensure_dir, get_episode_folder, get_manga_folder,
    prepare_episode_dir,
};

/// Download one episode into an existing directory.
pub async fn download_episode(
    api: &MangaApi,
    key: EpisodeKey,
    directory: &Path,
    options: &FanoutOptions,
    cancel: &CancellationToken,
) -> Result<FanoutReport> {
    let tasks = resolve_episode(api, key, directory).await?;
    download_all(api, tasks, options, cancel).await
}

/// Download every available episode of a manga that is not on disk yet.
///
/// Episodes are processed in catalog order. Locked episodes and episodes
/// whose folder already exists are skipped; a failing episode is logged and
/// the next one is attempted. Only cancellation stops the loop early.
///
/// Pages are written to a staging folder that only becomes the episode
/// folder once every page is on disk, so anything short of that is retried
/// by the next run.
pub async fn download_manga(
    api: &MangaApi,
    config: &Config,
    detail: &MangaDetail,
    cancel: &CancellationToken,
) -> Result<MangaState> {
    let manga_dir = get_manga_folder(config, &detail.title)?;
    ensure_dir(&manga_dir)?;

    let options = FanoutOptions::from_config(config);
    let mut state = MangaState::new(detail.title.clone());

    tracing::info!(
        "Downloading {} ({} episodes) into {}",
        detail.title,
        detail.ep_list.len(),
        manga_dir.display()
    );

    for episode in &detail.ep_list {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let label = episode.label();

        if !episode.is_available() {
            tracing::info!("{} is locked, skipping", label);
            state.mark_locked();
            continue;
        }

        let episode_dir = get_episode_folder(&manga_dir, episode)?;
        let Some(staging) = prepare_episode_dir(&episode_dir)? else {
            tracing::info!("{} has been downloaded, skipping", label);
            state.mark_skipped();
            continue;
        };

        tracing::info!("Downloading {}", label);
        let key = EpisodeKey::new(detail.id, episode.id);

        match download_episode(api, key, &staging, &options, cancel).await {
            Ok(report) if report.is_complete() => {
                match commit_episode_dir(&staging, &episode_dir) {
                    Ok(()) => state.add_episode(&report),
                    Err(e) => {
                        tracing::warn!("Failed to finalise {}: {}", label, e);
                        discard_episode_dir(&staging);
                        state.mark_failed();
                    }
                }
            }
            Ok(report) => {
                tracing::warn!(
                    "{}: {} of {} pages failed",
                    label,
                    report.failed.len(),
                    report.failed.len() + report.downloaded.len()
                );
                discard_episode_dir(&staging);
                state.add_episode(&report);
            }
            Err(Error::Cancelled) => {
                discard_episode_dir(&staging);
                return Err(Error::Cancelled);
            }
            Err(e) => {
                tracing::warn!("Failed to download {}: {}", label, e);
                discard_episode_dir(&staging);
                state.mark_failed();
            }
        }
    }

    Ok(state)
}
