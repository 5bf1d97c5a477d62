//! Statistics reporting.

use console::style;

use crate::download::MangaState;

/// Print statistics for a manga.
pub fn print_manga_stats(state: &MangaState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Statistics for {}:", state.title)).bold()
    );
    println!("  Episodes downloaded: {}", state.episodes_downloaded);
    if state.episodes_incomplete > 0 {
        println!(
            "  Episodes incomplete: {}",
            style(state.episodes_incomplete).yellow()
        );
    }
    if state.episodes_failed > 0 {
        println!(
            "  Episodes failed:     {}",
            style(state.episodes_failed).red()
        );
    }
    println!("  Episodes skipped:    {} (already downloaded)", state.episodes_skipped);
    println!("  Episodes locked:     {}", state.episodes_locked);
    println!(
        "  Pages:               {} downloaded, {} failed",
        style(state.pages_downloaded).green(),
        style(state.pages_failed).yellow()
    );
    println!("{}", style("═".repeat(50)).dim());
}
