use serde::{Deserialize, Serialize};

use crate::format::SaveFormat;
use crate::layout::{self, ByteRange};

/// Validation result for one slot. Slots 0-9 are character slots, 10 is
/// the metadata slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotCheck {
    pub slot: usize,
    pub valid: bool,
}

/// Recompute and store the digest of every slot in the format's layout.
/// All eleven slots are rewritten in one call; the buffer is not a valid
/// converted save until this returns.
pub fn recompute_checksums(data: &mut [u8], format: SaveFormat) {
    for entry in &layout::file_layout(format).slots {
        let digest = digest_range(data, entry.data);
        write_digest(data, entry.checksum, &digest);
    }
}

/// Compare each slot's stored digest against the digest of its data range,
/// mutating nothing. Results come back in slot order 0-10; a mismatch is a
/// normal `valid: false` row, not an error.
pub fn validate_checksums(data: &[u8], format: SaveFormat) -> Vec<SlotCheck> {
    layout::file_layout(format)
        .slots
        .iter()
        .enumerate()
        .map(|(slot, entry)| {
            let stored = entry.checksum.clamp_to(data.len());
            let computed = digest_range(data, entry.data);
            SlotCheck {
                slot,
                valid: data[stored.start..stored.end] == computed,
            }
        })
        .collect()
}

fn digest_range(data: &[u8], range: ByteRange) -> [u8; 16] {
    let range = range.clamp_to(data.len());
    md5::compute(&data[range.start..range.end]).0
}

fn write_digest(data: &mut [u8], range: ByteRange, digest: &[u8; 16]) {
    let range = range.clamp_to(data.len());
    let len = range.len().min(digest.len());
    data[range.start..range.start + len].copy_from_slice(&digest[..len]);
}
