//! Console output utilities.

use console::{style, StyledObject};

use crate::api::MangaDetail;
use crate::config::Config;

fn print_tagged(tag: StyledObject<&str>, message: &str) {
    println!("{:>5} {}", tag, message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    print_tagged(style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    print_tagged(style("DONE").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    print_tagged(style("WARN").yellow().bold(), message);
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{:>5} {}", style("ERROR").red().bold(), message);
}

/// Print the application name and version.
pub fn print_banner() {
    println!();
    println!(
        "{} {}",
        style("bilimanga-downloader").magenta().bold(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    );
    println!("{}", style("Episode downloader for Bilibili Manga").dim());
    println!();
}

/// Print what is about to be downloaded and how.
pub fn print_manga_summary(detail: &MangaDetail, config: &Config) {
    let available = detail.ep_list.iter().filter(|ep| ep.is_available()).count();
    let locked = detail.ep_list.len() - available;

    println!("{} {}", style("Manga").bold(), style(&detail.title).cyan());
    println!(
        "  episodes   {} available, {} locked",
        style(available).green(),
        style(locked).yellow()
    );
    println!(
        "  pages      {} at a time, {}",
        config.options.max_concurrent_downloads, config.options.failure_policy
    );
    println!("  saving to  {}", config.download_directory().display());
    println!();
}
