//! Progress indicators.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while waiting on a single API call.
pub fn create_spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.magenta} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let spinner = ProgressBar::new_spinner().with_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Bar counting the pages of one episode.
pub fn create_page_bar(pages: u64) -> ProgressBar {
    let style = ProgressStyle::with_template("  {bar:30.magenta/blue} {pos:>3}/{len} pages {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

    ProgressBar::new(pages).with_style(style)
}
