//! Repeating-key XOR cipher for episode index blobs.

/// Build the 8-byte keystream block for an episode.
///
/// Low 32 bits of the episode id, then low 32 bits of the manga id, both
/// little-endian.
pub fn index_key(manga_id: i64, episode_id: i64) -> [u8; 8] {
    let mut key = [0u8; 8];
    key[..4].copy_from_slice(&(episode_id as u32).to_le_bytes());
    key[4..].copy_from_slice(&(manga_id as u32).to_le_bytes());
    key
}

/// Decode (or encode, the operation is self-inverse) an index blob in place.
pub fn decode_index(data: &mut [u8], manga_id: i64, episode_id: i64) {
    let key = index_key(manga_id, episode_id);
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= key[i % key.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(index_key(1, 2), [2, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(
            index_key(0x0102_0304, 0x0A0B_0C0D),
            [0x0D, 0x0C, 0x0B, 0x0A, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_key_uses_low_32_bits() {
        assert_eq!(index_key(0x7_0000_0001, 0x5_0000_0002), index_key(1, 2));
        assert_eq!(index_key(-1, 0), [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_self_inverse() {
        let original: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        for (manga_id, episode_id) in [(0, 0), (1, 2), (28284, 477_511), (i64::MAX, i64::MIN)] {
            let mut data = original.clone();
            decode_index(&mut data, manga_id, episode_id);
            decode_index(&mut data, manga_id, episode_id);
            assert_eq!(data, original);
        }
    }

    #[test]
    fn test_positional_and_periodic() {
        let mut zeros = vec![0u8; 24];
        decode_index(&mut zeros, 1, 2);
        // XOR against zero exposes the keystream, repeating every 8 bytes.
        assert_eq!(&zeros[..8], &[2, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(&zeros[..8], &zeros[8..16]);
        assert_eq!(&zeros[..8], &zeros[16..24]);

        let base = vec![0x55u8; 16];
        let mut changed = base.clone();
        changed[5] = 0xAA;

        let mut a = base.clone();
        let mut b = changed.clone();
        decode_index(&mut a, 9, 10);
        decode_index(&mut b, 9, 10);

        for i in 0..16 {
            if i == 5 {
                assert_ne!(a[i], b[i]);
            } else {
                assert_eq!(a[i], b[i]);
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let mut data: Vec<u8> = Vec::new();
        decode_index(&mut data, 1, 2);
        assert!(data.is_empty());
    }
}
