//! Conversion library for Elden Ring save files.
//!
//! Rewrites the Steam account id embedded in a vanilla (`.sl2`) or
//! Seamless Coop (`.co2`) save and recomputes the per-region MD5
//! checksums the game checks on load. Front ends should go through
//! [`core_api`]; the leaf modules expose the individual pipeline stages.

pub mod checksum;
pub mod core_api;
pub mod format;
pub mod layout;
pub mod patch;
pub mod steam_id;
