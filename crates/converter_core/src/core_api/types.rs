use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::checksum::SlotCheck;
use crate::format::SaveFormat;
use crate::steam_id::SteamId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionReport {
    pub format: SaveFormat,
    pub old_steam_id: SteamId,
    pub new_steam_id: SteamId,
    pub patched_offsets: Vec<u64>,
    /// Set by the file-level entry point; `None` for in-memory conversions.
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationReport {
    pub format: SaveFormat,
    pub slots: Vec<SlotCheck>,
}
