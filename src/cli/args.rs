//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, FailurePolicy};

/// Bilibili Manga episode downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "bilimanga-downloader",
    version,
    about = "Download manga episodes from Bilibili Manga",
    long_about = "A CLI tool to download every available episode of a Bilibili Manga title.\n\n\
                  Episodes already present on disk and episodes locked for your account are skipped."
)]
pub struct Args {
    /// Manga URL or id (e.g. https://manga.bilibili.com/detail/mc28284).
    #[arg(short, long)]
    pub url: Option<String>,

    /// Session cookie of a logged-in browser.
    #[arg(short, long, env = "BILIMANGA_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// File containing the session cookie.
    #[arg(long = "cookie-file", env = "BILIMANGA_COOKIE_FILE")]
    pub cookie_file: Option<PathBuf>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent")]
    pub user_agent: Option<String>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Maximum number of pages downloaded at once.
    #[arg(short = 'j', long = "jobs")]
    pub max_concurrent_downloads: Option<usize>,

    /// What to do when a page fails to download.
    #[arg(long = "on-failure", value_enum)]
    pub failure_policy: Option<FailurePolicyArg>,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout")]
    pub request_timeout: Option<u64>,

    /// Path to configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI failure policy argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FailurePolicyArg {
    /// Keep downloading the other pages of an episode.
    BestEffort,
    /// Abort the episode at its first failed page.
    FailFast,
}

impl From<FailurePolicyArg> for FailurePolicy {
    fn from(arg: FailurePolicyArg) -> Self {
        match arg {
            FailurePolicyArg::BestEffort => FailurePolicy::BestEffort,
            FailurePolicyArg::FailFast => FailurePolicy::FailFast,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(url) = self.url {
            config.target.manga = Some(url);
        }

        // Override account settings if provided
        if let Some(cookie) = self.cookie {
            config.account.cookie = cookie;
        }

        if let Some(cookie_file) = self.cookie_file {
            config.account.cookie_file = Some(cookie_file);
        }

        if let Some(user_agent) = self.user_agent {
            config.account.user_agent = user_agent;
        }

        // Override options if provided
        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if let Some(jobs) = self.max_concurrent_downloads {
            config.options.max_concurrent_downloads = jobs;
        }

        if let Some(policy) = self.failure_policy {
            config.options.failure_policy = policy.into();
        }

        if let Some(timeout) = self.request_timeout {
            config.options.request_timeout_seconds = timeout;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}
