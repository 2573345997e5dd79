use converter_core::patch::replace_steam_id;
use converter_core::steam_id::SteamId;

fn id(raw: u64) -> SteamId {
    SteamId::from_raw(raw).expect("raw value should be in range")
}

fn plant(data: &mut [u8], offset: usize, value: SteamId) {
    data[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

#[test]
fn replaces_single_occurrence() {
    let old = id(SteamId::MIN_RAW);
    let new = id(SteamId::MIN_RAW + 1);

    let mut data = vec![0u8; 64];
    plant(&mut data, 24, old);

    let offsets = replace_steam_id(&mut data, old, new);
    assert_eq!(offsets, vec![24]);
    assert_eq!(&data[24..32], &new.to_le_bytes());
}

#[test]
fn replaces_every_occurrence_in_ascending_order() {
    let old = id(SteamId::MIN_RAW);
    let new = id(SteamId::MIN_RAW + 1);

    let mut data = vec![0u8; 256];
    for offset in [200, 16, 96] {
        plant(&mut data, offset, old);
    }

    let offsets = replace_steam_id(&mut data, old, new);
    assert_eq!(offsets, vec![16, 96, 200]);
    for offset in offsets {
        assert_eq!(&data[offset..offset + 8], &new.to_le_bytes());
    }
}

#[test]
fn replaces_unaligned_occurrences() {
    // Unlike the candidate scan, replacement works at byte granularity.
    let old = id(SteamId::MIN_RAW);
    let new = id(SteamId::MIN_RAW + 1);

    let mut data = vec![0u8; 64];
    plant(&mut data, 13, old);

    let offsets = replace_steam_id(&mut data, old, new);
    assert_eq!(offsets, vec![13]);
    assert_eq!(&data[13..21], &new.to_le_bytes());
}

#[test]
fn no_occurrences_leaves_buffer_untouched() {
    let old = id(SteamId::MIN_RAW);
    let new = id(SteamId::MIN_RAW + 1);

    let mut data: Vec<u8> = (0..128).map(|i| (i % 251) as u8).collect();
    let before = data.clone();

    let offsets = replace_steam_id(&mut data, old, new);
    assert!(offsets.is_empty());
    assert_eq!(data, before);
}

#[test]
fn replacement_is_complete() {
    let old = id(SteamId::MIN_RAW + 5);
    let new = id(SteamId::MIN_RAW + 6);
    let old_bytes = old.to_le_bytes();

    let mut data = vec![0u8; 4096];
    for offset in [0, 512, 1024, 4088] {
        plant(&mut data, offset, old);
    }

    let offsets = replace_steam_id(&mut data, old, new);
    assert_eq!(offsets.len(), 4);

    // No window of the result still holds the old encoding.
    for window in data.windows(8) {
        assert_ne!(window, old_bytes);
    }
}

#[test]
fn bytes_outside_reported_windows_are_untouched() {
    let old = id(SteamId::MIN_RAW);
    let new = id(SteamId::MIN_RAW + 1);

    let mut data: Vec<u8> = (0..512).map(|i| (i * 31 % 200) as u8).collect();
    plant(&mut data, 40, old);
    plant(&mut data, 300, old);
    let before = data.clone();

    let offsets = replace_steam_id(&mut data, old, new);
    assert_eq!(offsets, vec![40, 300]);

    let mut patched = vec![false; data.len()];
    for &offset in &offsets {
        for flag in &mut patched[offset..offset + 8] {
            *flag = true;
        }
    }
    for (index, (&was, &now)) in before.iter().zip(data.iter()).enumerate() {
        if !patched[index] {
            assert_eq!(was, now, "byte {index} changed outside a patch window");
        }
    }
}
