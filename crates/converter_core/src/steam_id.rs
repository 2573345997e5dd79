use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::SaveFormat;

// Seamless Coop stores the account id at a fixed position inside the
// general metadata region, four bytes past the start of the data range.
const SEAMLESS_COOP_ID_OFFSET: usize = 0x019003B4;

/// A SteamID64 account identifier, constrained to the individual-account
/// range. Encoded little-endian wherever it appears in a save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SteamId(u64);

impl SteamId {
    pub const MIN_RAW: u64 = 76_561_197_960_265_728;
    pub const MAX_RAW: u64 = 76_561_199_999_999_999;

    pub fn from_raw(raw: u64) -> Option<Self> {
        (Self::MIN_RAW..=Self::MAX_RAW)
            .contains(&raw)
            .then_some(Self(raw))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scan for candidate account ids at 4-byte-aligned offsets, in ascending
/// offset order. The aligned stride halves the scan at the cost of never
/// seeing a value at an odd alignment; real saves keep the id aligned.
pub fn find_candidates(data: &[u8]) -> Vec<(usize, SteamId)> {
    let mut found = Vec::new();
    let mut offset = 0;
    while offset + 8 <= data.len() {
        if let Some(raw) = read_u64_le(data, offset)
            && let Some(id) = SteamId::from_raw(raw)
        {
            found.push((offset, id));
        }
        offset += 4;
    }
    found
}

/// The single id treated as "the one to replace". Seamless Coop saves get
/// a fast path through the fixed metadata offset; vanilla saves, and coop
/// saves whose fixed offset holds no valid id, fall back to a full scan.
pub fn primary_steam_id(data: &[u8], format: SaveFormat) -> Option<SteamId> {
    if format == SaveFormat::SeamlessCoop
        && let Some(raw) = read_u64_le(data, SEAMLESS_COOP_ID_OFFSET)
        && let Some(id) = SteamId::from_raw(raw)
    {
        return Some(id);
    }

    most_frequent_candidate(&find_candidates(data))
}

/// Most frequent candidate wins; on equal counts the value seen first in
/// the file wins.
fn most_frequent_candidate(candidates: &[(usize, SteamId)]) -> Option<SteamId> {
    let mut counts: Vec<(SteamId, usize)> = Vec::new();
    for &(_, id) in candidates {
        match counts.iter_mut().find(|(seen, _)| *seen == id) {
            Some((_, count)) => *count += 1,
            None => counts.push((id, 1)),
        }
    }

    let mut best: Option<(SteamId, usize)> = None;
    for &(id, count) in &counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((id, count)),
        }
    }
    best.map(|(id, _)| id)
}

fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    let bytes = data.get(offset..offset + 8)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Some(u64::from_le_bytes(buf))
}
