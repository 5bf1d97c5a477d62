//! Bilibili Manga API module.
//!
//! This module provides:
//! - HTTP client for the manga and profile endpoints
//! - The shared JSON response envelope
//! - API request and response types

pub mod client;
pub mod types;

pub use client::{ApiEndpoints, MangaApi, DEFAULT_TIMEOUT, JSON_CONTENT};
pub use types::*;
