//! Download statistics tracking.

use crate::download::fanout::FanoutReport;

/// Per-manga download statistics.
#[derive(Debug, Default, Clone)]
pub struct MangaState {
    pub title: String,

    // Episode outcomes
    pub episodes_downloaded: u64,
    pub episodes_incomplete: u64,
    pub episodes_skipped: u64,
    pub episodes_locked: u64,
    pub episodes_failed: u64,

    // Page outcomes
    pub pages_downloaded: u64,
    pub pages_failed: u64,
}

impl MangaState {
    /// Create a new state for a manga.
    pub fn new(title: String) -> Self {
        Self {
            title,
            ..Default::default()
        }
    }

    /// Record the page outcomes of a finished episode.
    pub fn add_episode(&mut self, report: &FanoutReport) {
        if report.is_complete() {
            self.episodes_downloaded += 1;
        } else {
            self.episodes_incomplete += 1;
        }
        self.pages_downloaded += report.downloaded.len() as u64;
        self.pages_failed += report.failed.len() as u64;
    }

    /// Mark an episode as already present on disk.
    pub fn mark_skipped(&mut self) {
        self.episodes_skipped += 1;
    }

    /// Mark an episode as locked for this account.
    pub fn mark_locked(&mut self) {
        self.episodes_locked += 1;
    }

    /// Mark an episode as failed before any page was fetched.
    pub fn mark_failed(&mut self) {
        self.episodes_failed += 1;
    }

    /// Whether any episode failed or ended up incomplete.
    pub fn has_failures(&self) -> bool {
        self.episodes_failed > 0 || self.episodes_incomplete > 0
    }
}
