//! First-entry extraction from the index zip container.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::{Error, Result};

/// Largest expansion ratio trusted when presizing the output buffer.
const MAX_SIZE_HINT_RATIO: u64 = 1024;

/// Open an in-memory zip image and return the decompressed bytes of its first entry.
pub fn extract_first_entry(data: &[u8]) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    if archive.len() == 0 {
        return Err(Error::Archive("Index archive contains no entries".into()));
    }

    let mut entry = archive.by_index(0)?;
    tracing::debug!(
        "Extracting index entry '{}' ({} bytes)",
        entry.name(),
        entry.size()
    );

    // The declared size comes from the archive itself and may be forged.
    let hint = entry
        .size()
        .min((data.len() as u64).saturating_mul(MAX_SIZE_HINT_RATIO));
    let mut contents = Vec::with_capacity(usize::try_from(hint).unwrap_or(0));
    entry
        .read_to_end(&mut contents)
        .map_err(|e| Error::Archive(format!("Failed to read index entry: {}", e)))?;

    Ok(contents)
}
