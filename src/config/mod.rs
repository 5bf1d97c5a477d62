//! Configuration module for the bilimanga-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - CLI argument parsing and merging
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig, TargetConfig};
pub use modes::FailurePolicy;
pub use validation::{parse_manga_id, validate_config};
