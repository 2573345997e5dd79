use std::io;

use crate::format::SaveFormat;

pub const SLOT_COUNT: usize = 10;
pub const SLOT_STRIDE: usize = 0x280010;
pub const SLOT_DATA_LENGTH: usize = 0x280000;
pub const FIRST_SLOT_CHECKSUM: usize = 0x300;
pub const FIRST_SLOT_DATA: usize = 0x310;
pub const CHECKSUM_LENGTH: usize = 16;

// Slot 10 (general metadata). The checksum location is shared; the
// protected data range is what separates the two formats.
const METADATA_CHECKSUM_START: usize = 0x019003A0;
const METADATA_CHECKSUM_END: usize = 0x019003B0;
const METADATA_DATA_START: usize = 0x019003B0;
const VANILLA_METADATA_DATA_END: usize = 0x01901BB0;
const SEAMLESS_COOP_METADATA_DATA_END: usize = 0x019603B0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp to a buffer of `len` bytes. A range that runs past the end of
    /// a short buffer degrades to a shorter (possibly empty) range rather
    /// than slicing out of bounds.
    pub fn clamp_to(&self, len: usize) -> ByteRange {
        let end = self.end.min(len);
        ByteRange {
            start: self.start.min(end),
            end,
        }
    }
}

/// One checksummed region: a 16-byte digest stored immediately before the
/// data range it protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub checksum: ByteRange,
    pub data: ByteRange,
}

#[derive(Debug, Clone)]
pub struct FileLayout {
    pub file_len: usize,
    pub slots: Vec<SlotLayout>,
}

/// Byte-range table for one save format: ten character slots (identical
/// across formats) followed by the metadata slot at index 10.
pub fn file_layout(format: SaveFormat) -> FileLayout {
    let mut slots = Vec::with_capacity(SLOT_COUNT + 1);

    for slot in 0..SLOT_COUNT {
        let checksum_start = FIRST_SLOT_CHECKSUM + slot * SLOT_STRIDE;
        let data_start = FIRST_SLOT_DATA + slot * SLOT_STRIDE;
        slots.push(SlotLayout {
            checksum: ByteRange {
                start: checksum_start,
                end: checksum_start + CHECKSUM_LENGTH,
            },
            data: ByteRange {
                start: data_start,
                end: data_start + SLOT_DATA_LENGTH,
            },
        });
    }

    let metadata_data_end = match format {
        SaveFormat::Vanilla => VANILLA_METADATA_DATA_END,
        SaveFormat::SeamlessCoop => SEAMLESS_COOP_METADATA_DATA_END,
    };
    slots.push(SlotLayout {
        checksum: ByteRange {
            start: METADATA_CHECKSUM_START,
            end: METADATA_CHECKSUM_END,
        },
        data: ByteRange {
            start: METADATA_DATA_START,
            end: metadata_data_end,
        },
    });

    FileLayout {
        file_len: format.reference_file_size(),
        slots,
    }
}

impl FileLayout {
    pub fn validate(&self) -> io::Result<()> {
        if self.slots.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "file layout must contain at least one slot",
            ));
        }

        for (slot, entry) in self.slots.iter().enumerate() {
            if entry.checksum.len() != CHECKSUM_LENGTH {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "slot {} checksum range is {} bytes, expected {}",
                        slot,
                        entry.checksum.len(),
                        CHECKSUM_LENGTH
                    ),
                ));
            }
            for range in [entry.checksum, entry.data] {
                if range.end < range.start || range.end > self.file_len {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "slot {} range {}..{} exceeds file length {}",
                            slot, range.start, range.end, self.file_len
                        ),
                    ));
                }
            }
        }

        let mut data_ranges: Vec<(usize, ByteRange)> = self
            .slots
            .iter()
            .enumerate()
            .map(|(slot, entry)| (slot, entry.data))
            .collect();
        data_ranges.sort_by_key(|(_, range)| range.start);
        for pair in data_ranges.windows(2) {
            let (first_slot, first) = pair[0];
            let (second_slot, second) = pair[1];
            if second.start < first.end {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "data ranges of slots {} and {} overlap",
                        first_slot, second_slot
                    ),
                ));
            }
        }

        Ok(())
    }
}
