use std::fs;
use std::io;
use std::path::Path;

use crate::checksum::{self, SlotCheck};
use crate::format::SaveFormat;
use crate::patch;
use crate::steam_id::{self, SteamId};

use super::error::{CoreError, CoreErrorCode};
use super::types::{ConversionReport, ValidationReport};

/// Observational side channel for pipeline progress. Messages never affect
/// control flow; passing no sink means silence.
pub trait ProgressSink {
    fn progress(&self, message: &str);
}

impl<F: Fn(&str)> ProgressSink for F {
    fn progress(&self, message: &str) {
        self(message)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// One conversion session. Owns the save buffer for its entire lifetime,
/// so no second conversion can touch the bytes while this one runs.
#[derive(Debug)]
pub struct Conversion {
    format: SaveFormat,
    data: Vec<u8>,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Detection always succeeds (unrecognized sizes classify as vanilla),
    /// so opening a buffer cannot fail.
    pub fn open_bytes(&self, bytes: Vec<u8>, name_hint: Option<&Path>) -> Conversion {
        let format = SaveFormat::detect(&bytes, name_hint);
        Conversion {
            format,
            data: bytes,
        }
    }

    /// Read a save, convert it to `new_steam_id`, and write the result.
    /// `output` defaults to overwriting the input. The write happens once,
    /// after every in-memory mutation has succeeded, so a failed pipeline
    /// never corrupts the file on disk.
    pub fn convert_file(
        &self,
        input: &Path,
        new_steam_id: SteamId,
        output: Option<&Path>,
        sink: Option<&dyn ProgressSink>,
    ) -> Result<ConversionReport, CoreError> {
        let bytes = read_file(input)?;
        let mut conversion = self.open_bytes(bytes, Some(input));
        let mut report = conversion.convert_to(new_steam_id, sink)?;

        let output = output.unwrap_or(input);
        fs::write(output, conversion.bytes()).map_err(|e| {
            CoreError::new(
                CoreErrorCode::WriteFailure,
                format!("failed to write {}: {e}", output.display()),
            )
        })?;
        emit(sink, &format!("Save file written to: {}", output.display()));

        report.output_path = Some(output.to_path_buf());
        Ok(report)
    }

    /// Read-only checksum validation of a save on disk.
    pub fn validate_file(&self, input: &Path) -> Result<ValidationReport, CoreError> {
        let bytes = read_file(input)?;
        let conversion = self.open_bytes(bytes, Some(input));
        Ok(ValidationReport {
            format: conversion.format(),
            slots: conversion.validate_checksums(),
        })
    }
}

impl Conversion {
    pub fn format(&self) -> SaveFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn primary_steam_id(&self) -> Option<SteamId> {
        steam_id::primary_steam_id(&self.data, self.format)
    }

    pub fn validate_checksums(&self) -> Vec<SlotCheck> {
        checksum::validate_checksums(&self.data, self.format)
    }

    /// Run the locate -> patch -> re-checksum pipeline against the owned
    /// buffer. The buffer is untouched when this returns an error.
    pub fn convert_to(
        &mut self,
        new_steam_id: SteamId,
        sink: Option<&dyn ProgressSink>,
    ) -> Result<ConversionReport, CoreError> {
        emit(sink, &format!("Detected save type: {}", self.format));

        let old_steam_id = self.primary_steam_id().ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::SteamIdNotFound,
                "could not find a valid Steam ID in the save file",
            )
        })?;

        if old_steam_id == new_steam_id {
            return Err(CoreError::new(
                CoreErrorCode::NoOpConversion,
                format!("save file already uses Steam ID {new_steam_id}"),
            ));
        }

        emit(sink, &format!("Current Steam ID: {old_steam_id}"));
        emit(sink, &format!("New Steam ID: {new_steam_id}"));

        let patched = patch::replace_steam_id(&mut self.data, old_steam_id, new_steam_id);
        emit(
            sink,
            &format!("Replaced Steam ID at {} location(s)", patched.len()),
        );

        checksum::recompute_checksums(&mut self.data, self.format);
        emit(sink, "Recalculated all checksums");

        Ok(ConversionReport {
            format: self.format,
            old_steam_id,
            new_steam_id,
            patched_offsets: patched.iter().map(|&offset| offset as u64).collect(),
            output_path: None,
        })
    }
}

/// Parse an account id from user input. Surrounding whitespace is
/// accepted; anything non-numeric or outside the SteamID64 account range
/// is rejected.
pub fn parse_steam_id(text: &str) -> Result<SteamId, CoreError> {
    let trimmed = text.trim();
    let raw: u64 = trimmed.parse().map_err(|_| {
        CoreError::new(
            CoreErrorCode::InvalidSteamId,
            format!("Steam ID must be a number, got: {trimmed}"),
        )
    })?;
    SteamId::from_raw(raw).ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::InvalidSteamId,
            format!("invalid Steam ID: {raw}"),
        )
    })
}

fn read_file(path: &Path) -> Result<Vec<u8>, CoreError> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CoreError::new(
            CoreErrorCode::FileNotFound,
            format!("file not found: {}", path.display()),
        ),
        _ => CoreError::new(
            CoreErrorCode::UnreadableFile,
            format!("failed to read {}: {e}", path.display()),
        ),
    })
}

fn emit(sink: Option<&dyn ProgressSink>, message: &str) {
    if let Some(sink) = sink {
        sink.progress(message);
    }
}
