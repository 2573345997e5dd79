use converter_core::format::SaveFormat;
use converter_core::layout::{
    self, CHECKSUM_LENGTH, FIRST_SLOT_CHECKSUM, FIRST_SLOT_DATA, SLOT_COUNT, SLOT_DATA_LENGTH,
    SLOT_STRIDE,
};

#[test]
fn both_layouts_validate() {
    for format in [SaveFormat::Vanilla, SaveFormat::SeamlessCoop] {
        let table = layout::file_layout(format);
        table
            .validate()
            .unwrap_or_else(|e| panic!("{format} layout should validate: {e}"));
    }
}

#[test]
fn eleven_slots_per_format() {
    for format in [SaveFormat::Vanilla, SaveFormat::SeamlessCoop] {
        assert_eq!(layout::file_layout(format).slots.len(), SLOT_COUNT + 1);
    }
}

#[test]
fn character_slot_arithmetic() {
    let table = layout::file_layout(SaveFormat::Vanilla);

    let first = &table.slots[0];
    assert_eq!(first.checksum.start, FIRST_SLOT_CHECKSUM);
    assert_eq!(first.checksum.len(), CHECKSUM_LENGTH);
    assert_eq!(first.data.start, FIRST_SLOT_DATA);
    assert_eq!(first.data.len(), SLOT_DATA_LENGTH);

    let last = &table.slots[SLOT_COUNT - 1];
    assert_eq!(last.checksum.start, FIRST_SLOT_CHECKSUM + 9 * SLOT_STRIDE);
    assert_eq!(last.data.start, FIRST_SLOT_DATA + 9 * SLOT_STRIDE);

    // Each digest sits immediately before the data range it protects.
    for entry in &table.slots {
        assert_eq!(entry.checksum.end, entry.data.start);
    }
}

#[test]
fn character_slots_identical_across_formats() {
    let vanilla = layout::file_layout(SaveFormat::Vanilla);
    let coop = layout::file_layout(SaveFormat::SeamlessCoop);

    for slot in 0..SLOT_COUNT {
        assert_eq!(vanilla.slots[slot], coop.slots[slot]);
    }
}

#[test]
fn metadata_slot_diverges_only_in_data_length() {
    let vanilla = layout::file_layout(SaveFormat::Vanilla).slots[SLOT_COUNT];
    let coop = layout::file_layout(SaveFormat::SeamlessCoop).slots[SLOT_COUNT];

    assert_eq!(vanilla.checksum, coop.checksum);
    assert_eq!(vanilla.checksum.start, 0x019003A0);
    assert_eq!(vanilla.checksum.end, 0x019003B0);

    assert_eq!(vanilla.data.start, coop.data.start);
    assert_eq!(vanilla.data.start, 0x019003B0);
    assert_eq!(vanilla.data.end, 0x01901BB0);
    assert_eq!(coop.data.end, 0x019603B0);
    assert!(coop.data.len() > vanilla.data.len());
}

#[test]
fn ranges_fit_reference_file_sizes() {
    for format in [SaveFormat::Vanilla, SaveFormat::SeamlessCoop] {
        let table = layout::file_layout(format);
        assert_eq!(table.file_len, format.reference_file_size());
        for entry in &table.slots {
            assert!(entry.checksum.end <= table.file_len);
            assert!(entry.data.end <= table.file_len);
        }
    }
}

#[test]
fn data_ranges_are_disjoint() {
    for format in [SaveFormat::Vanilla, SaveFormat::SeamlessCoop] {
        let table = layout::file_layout(format);
        let mut ranges: Vec<_> = table.slots.iter().map(|entry| entry.data).collect();
        ranges.sort_by_key(|range| range.start);
        for pair in ranges.windows(2) {
            assert!(
                pair[0].end <= pair[1].start,
                "{format}: {}..{} overlaps {}..{}",
                pair[0].start,
                pair[0].end,
                pair[1].start,
                pair[1].end
            );
        }
    }
}

#[test]
fn clamp_truncates_out_of_bounds_ranges() {
    let range = converter_core::layout::ByteRange { start: 10, end: 30 };

    assert_eq!(range.clamp_to(100), range);

    let clipped = range.clamp_to(20);
    assert_eq!(clipped.start, 10);
    assert_eq!(clipped.end, 20);

    let gone = range.clamp_to(5);
    assert!(gone.is_empty());
}
