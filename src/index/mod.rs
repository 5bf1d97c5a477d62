//! Episode index decoding.
//!
//! This module provides:
//! - The repeating-key cipher applied to index blobs
//! - First-entry extraction from the embedded zip container
//! - Parsing of the decoded image index

pub mod archive;
pub mod cipher;

pub use archive::extract_first_entry;
pub use cipher::{decode_index, index_key};

use crate::api::types::ImageIndex;
use crate::error::{Error, Result};

/// Length of the transport header preceding the ciphertext in an index blob.
pub const INDEX_HEADER_LEN: usize = 9;

/// Decode a raw index blob into the ordered list of image resource paths.
///
/// Strips the fixed header, deciphers the remainder with the episode key,
/// and parses the first archive entry as an [`ImageIndex`].
pub fn decode_index_blob(manga_id: i64, episode_id: i64, blob: &[u8]) -> Result<ImageIndex> {
    if blob.len() < INDEX_HEADER_LEN {
        return Err(Error::Protocol(format!(
            "Index blob is {} bytes, shorter than its {}-byte header",
            blob.len(),
            INDEX_HEADER_LEN
        )));
    }

    let mut data = blob[INDEX_HEADER_LEN..].to_vec();
    decode_index(&mut data, manga_id, episode_id);

    let entry = extract_first_entry(&data)?;
    let index: ImageIndex = serde_json::from_slice(&entry)
        .map_err(|e| Error::Archive(format!("Failed to parse image index: {}", e)))?;

    tracing::debug!("Decoded image index with {} pictures", index.pics.len());
    Ok(index)
}
