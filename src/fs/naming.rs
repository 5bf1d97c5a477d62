//! Filename generation and sanitisation.

use crate::error::{Error, Result};

/// File name of a page image, e.g. `3.jpg`.
pub fn page_filename(ordinal: u32) -> String {
    format!("{}.jpg", ordinal)
}

/// Sanitize a path component (folder name) built from remote titles.
///
/// Separators and characters invalid on common filesystems become
/// underscores, so the result is always a single component. Names that
/// reduce to nothing (or to `.`/`..`) are rejected.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Trailing dots and spaces are stripped by Windows
    let sanitized = sanitized.trim().trim_end_matches('.').to_string();

    if sanitized.is_empty() {
        return Err(Error::InvalidFilename(format!(
            "Path component cannot be empty, whitespace or dots only: '{}'",
            name
        )));
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_filename() {
        assert_eq!(page_filename(1), "1.jpg");
        assert_eq!(page_filename(42), "42.jpg");
    }

    #[test]
    fn test_sanitize_path_component_valid() {
        assert_eq!(sanitize_path_component("My Manga").unwrap(), "My Manga");
        assert_eq!(
            sanitize_path_component("Who? What: Why/How").unwrap(),
            "Who_ What_ Why_How"
        );
        assert_eq!(sanitize_path_component("1. Start ").unwrap(), "1. Start");
        assert_eq!(sanitize_path_component("進撃の巨人").unwrap(), "進撃の巨人");
    }

    #[test]
    fn test_sanitize_path_component_traversal() {
        assert!(sanitize_path_component("..").is_err());
        assert!(sanitize_path_component(" . ").is_err());
        assert_eq!(sanitize_path_component("../evil").unwrap(), ".._evil");
        assert_eq!(sanitize_path_component("foo/../bar").unwrap(), "foo_.._bar");
        assert_eq!(sanitize_path_component("Wait...").unwrap(), "Wait");
    }

    #[test]
    fn test_sanitize_path_component_empty() {
        assert!(sanitize_path_component("").is_err());
        assert!(sanitize_path_component("   ").is_err());
        assert!(sanitize_path_component("a\0b").is_err());
    }
}
