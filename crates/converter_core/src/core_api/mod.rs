mod engine;
mod error;
mod types;

pub use engine::{Conversion, Engine, ProgressSink, parse_steam_id};
pub use error::{CoreError, CoreErrorCode};
pub use types::{ConversionReport, ValidationReport};

pub use crate::checksum::SlotCheck;
pub use crate::format::SaveFormat;
pub use crate::steam_id::SteamId;
