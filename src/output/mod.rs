//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_error, print_info, print_manga_summary, print_success, print_warning,
};
pub use progress::{create_page_bar, create_spinner};
pub use stats::print_manga_stats;
