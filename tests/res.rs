use editres::{accelerator, constants::*, res, *};

mod common;
use common::*;

fn config_key() -> ResourceKey { ResourceKey::new(RT_RCDATA, "CONFIG", LANGUAGE_ID_EN_US) }

fn sample_set() -> ResourceSet {
    let mut set = ResourceSet::new();
    set.insert(ResRecord::new(config_key(), vec![1, 2, 3]));

    let table = AcceleratorTable(vec![Accelerator::from_text("^S", &[] as &[&str], 1).unwrap()]);
    let key = ResourceKey::new(RT_ACCELERATOR, 101u16, LANGUAGE_ID_EN_US);
    set.insert_resource(key, &Resource::Accelerators(table)).unwrap();
    set
}

#[test]
fn sentinel_record_bytes() {
    init_logger();

    let data = res::encode([&ResRecord::sentinel()]).unwrap();
    let mut expected = vec![0, 0, 0, 0, 0x18, 0, 0, 0, 0xFF, 0xFF, 0, 0, 0xFF, 0xFF, 0, 0];
    expected.extend([0; 16]);
    assert_eq!(data, expected, "empty leading record");

    let records = res::decode(&data).into_result().unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_sentinel(), "sentinel recognized");
}

#[test]
fn set_round_trip() {
    init_logger();

    let set = sample_set();
    let data = set.to_res().unwrap();
    assert_eq!(data.len() % 4, 0, "file padded to a dword boundary");
    assert_eq!(u32_at(&data, 32), 3, "payload size of the first record");
    // type atom, "CONFIG" padded to a dword and the fixed tail
    assert_eq!(u32_at(&data, 36), 4 + 16 + 16, "header size covers type, name and tail");
    assert_eq!(u16_at(&data, 40), 0xFFFF, "type is an atom");
    assert_eq!(&data[44..58], utf16z("CONFIG").as_slice(), "name is a string");
    assert_eq!(&data[76..79], [1, 2, 3], "payload follows the header");
    assert_eq!(&data[79..80], [0], "payload padded");
    assert_eq!(u32_at(&data, 80), 8, "second record starts on a dword boundary");

    let decoded = ResourceSet::from_res(&data);
    assert!(!decoded.is_partial(), "file decoded completely");
    let decoded = decoded.value;
    assert_eq!(decoded.len(), 2, "sentinel is not part of the set");
    assert_eq!(
        decoded.keys().collect::<Vec<_>>(),
        set.keys().collect::<Vec<_>>(),
        "records keep their order"
    );
    for record in set.records() {
        assert_eq!(decoded.get(&record.key), Some(record), "record {} round trip", record.key);
    }
    assert_eq!(decoded.to_res().unwrap(), data, "file reproduced byte for byte");
}

#[test]
fn metadata_passes_through() {
    init_logger();

    let record = ResRecord {
        key: ResourceKey::new("CUSTOM", 7u16, make_lang_id(LANG_ENGLISH, SUBLANG_ENGLISH_US)),
        data_version: 5,
        memory_flags: MEMORY_FLAG_MOVEABLE | MEMORY_FLAG_PURE,
        version: 0x0102_0304,
        characteristics: 0xCAFE,
        payload: vec![9; 10].into(),
    };
    let data = res::encode([&ResRecord::sentinel(), &record]).unwrap();
    let records = res::decode(&data).into_result().unwrap();
    assert_eq!(records[1], record, "header fields carried through");
    assert_eq!(records[1].key.language, 0x0409, "language id");
}

#[test]
fn header_size_with_prefix_accepted() {
    init_logger();

    let set = sample_set();
    let mut data = set.to_res().unwrap();
    let header_size = u32_at(&data, 36);
    data[36..40].copy_from_slice(&(header_size + 8).to_le_bytes());

    let decoded = ResourceSet::from_res(&data);
    assert!(!decoded.is_partial(), "alternative header size accepted");
    assert_eq!(decoded.value.get(&config_key()).map(ResRecord::payload), Some(&[1, 2, 3][..]));
}

/// A record with both atoms, the fixed tail and the given declared header size.
fn record_with_header_size(header_size: u32) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(0u32.to_le_bytes());
    data.extend(header_size.to_le_bytes());
    data.extend([0xFF, 0xFF, 1, 0, 0xFF, 0xFF, 1, 0]);
    data.extend([0; 16]);
    data
}

#[test]
fn zero_header_size_rejected() {
    init_logger();

    let decoded = res::decode(&record_with_header_size(0));
    assert!(decoded.is_partial(), "empty header reported");
    assert!(decoded.value.is_empty(), "no record read");
    let error = decoded.error.unwrap();
    assert!(
        matches!(error, DecodeError::MalformedField { field: "resource header size", offset: 0, .. }),
        "header size named: {error:?}"
    );
}

#[test]
fn short_header_size_rejected() {
    init_logger();

    let mut data = res::encode([&ResRecord::sentinel()]).unwrap();
    data.extend(record_with_header_size(20));

    let decoded = res::decode(&data);
    assert!(decoded.is_partial(), "short header reported");
    assert_eq!(decoded.value.len(), 1, "records before the failure kept");
    let error = decoded.error.unwrap();
    assert_eq!(error.field(), "resource header size");
    assert_eq!(error.offset(), 32, "offset of the failing record");
}

#[test]
fn long_header_size_skipped() {
    init_logger();

    let mut data = record_with_header_size(28);
    data.extend([0xAA; 4]);

    let records = res::decode(&data).into_result().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key.name, AtomOrString::Atom(1));
    assert!(records[0].payload().is_empty(), "extra header bytes are not payload");
}

#[test]
fn payload_overrun_reported() {
    init_logger();

    let mut data = sample_set().to_res().unwrap();
    data[32..36].copy_from_slice(&1000u32.to_le_bytes());

    let decoded = res::decode(&data);
    assert!(decoded.is_partial(), "overrun reported");
    assert_eq!(decoded.value.len(), 1, "records before the failure kept");
    assert!(decoded.value[0].is_sentinel());
    let error = decoded.error.unwrap();
    assert_eq!(error.field(), "resource data", "failing field named");
    assert!(
        matches!(error, DecodeError::OutOfRange { declared: 1000, .. }),
        "declared size reported"
    );
}

#[test]
fn decode_all_isolates_failures() {
    init_logger();

    let mut set = ResourceSet::new();
    let broken_dialog = ResourceKey::new(RT_DIALOG, 100u16, LANGUAGE_ID_EN_US);
    let named_strings = ResourceKey::new(RT_STRING, "NAMED", LANGUAGE_ID_EN_US);
    let accelerators = ResourceKey::new(RT_ACCELERATOR, 101u16, LANGUAGE_ID_EN_US);
    set.insert(ResRecord::new(broken_dialog.clone(), vec![1, 2, 3]));
    set.insert(ResRecord::new(named_strings.clone(), vec![0; 32]));
    set.insert(ResRecord::new(
        accelerators.clone(),
        accelerator::encode(&AcceleratorTable(vec![Accelerator {
            flags:      FVIRTKEY,
            key_code:   0x70,
            command_id: 1,
        }])),
    ));

    let results = set.decode_all();
    assert_eq!(results.len(), 3, "every record decoded");

    let (key, dialog) = &results[0];
    assert_eq!(*key, &broken_dialog);
    assert_eq!(dialog.error.as_ref().map(DecodeError::field), Some("dialog header"));

    let (key, strings) = &results[1];
    assert_eq!(*key, &named_strings);
    assert_eq!(strings.value, Resource::Raw(vec![0; 32]), "payload kept raw");
    assert_eq!(
        strings.error.as_ref().map(DecodeError::field),
        Some("string table block number")
    );

    let (key, table) = &results[2];
    assert_eq!(*key, &accelerators);
    assert!(!table.is_partial(), "sibling of failing records decoded");
    assert!(matches!(&table.value, Resource::Accelerators(table) if table.len() == 1));
}

#[test]
fn custom_types_stay_raw() {
    init_logger();

    let key = ResourceKey::new("CUSTOM", "DATA", 0);
    let decoded = Resource::decode(&key, &[1, 2, 3]);
    assert_eq!(decoded, Decoded::complete(Resource::Raw(vec![1, 2, 3])));
    assert_eq!(decoded.value.type_id(), None);

    let key = ResourceKey::new(RT_STRING, 2u16, 0);
    let decoded = Resource::decode(&key, &[0; 32]).into_result().unwrap();
    assert_eq!(decoded, Resource::StringTable(StringTableBlock::new(2)), "empty block");
    assert_eq!(decoded.type_id(), Some(RT_STRING));
}

#[test]
fn insert_replace_and_remove() {
    init_logger();

    let first = ResourceKey::new(RT_RCDATA, 1u16, 0);
    let second = ResourceKey::new(RT_RCDATA, 2u16, 0);
    let third = ResourceKey::new(RT_RCDATA, 3u16, 0);

    let mut set = ResourceSet::new();
    assert!(set.is_empty());
    for key in [&first, &second, &third] {
        assert_eq!(set.insert(ResRecord::new(key.clone(), vec![1])), None, "new key");
    }

    let mut replacement = ResRecord::new(first.clone(), vec![2]);
    replacement.data_version = 3;
    let replaced = set.insert(replacement).unwrap();
    assert_eq!(replaced.payload(), [1], "replaced record returned");
    assert_eq!(set.keys().next(), Some(&first), "replacement keeps the position");

    let previous = set.insert_resource(first.clone(), &Resource::Raw(vec![4, 5])).unwrap();
    assert_eq!(previous, Some(vec![2]), "previous payload returned");
    let record = set.get(&first).unwrap();
    assert_eq!(record.payload(), [4, 5], "payload updated");
    assert_eq!(record.data_version, 3, "metadata kept");

    assert_eq!(set.remove(&second).map(|record| record.key), Some(second.clone()));
    assert_eq!(set.remove(&second), None, "removed once");
    assert_eq!(set.keys().collect::<Vec<_>>(), vec![&first, &third], "order kept after removal");
    assert_eq!(set.len(), 2);
}

#[test]
fn edit_through_handle_keeps_key() {
    init_logger();

    let mut set = sample_set();
    let key = ResourceKey::new(RT_ACCELERATOR, 101u16, LANGUAGE_ID_EN_US);
    {
        let mut record = set.get_mut(&config_key()).unwrap();
        assert_eq!(record.key, config_key(), "key readable through the handle");
        record.set_payload(vec![7, 8]);
        record.set_data_version(2);
        record.set_memory_flags(MEMORY_FLAG_PURE);
        record.set_version(3);
        record.set_characteristics(4);
    }
    {
        let table = AcceleratorTable(vec![Accelerator::from_text("^P", &[] as &[&str], 9).unwrap()]);
        set.get_mut(&key).unwrap().set_resource(&Resource::Accelerators(table)).unwrap();
    }

    let record = set.get(&config_key()).unwrap();
    assert_eq!(record.payload(), [7, 8], "payload replaced");
    assert_eq!(
        (record.data_version, record.memory_flags, record.version, record.characteristics),
        (2, MEMORY_FLAG_PURE, 3, 4),
        "metadata replaced"
    );
    assert_eq!(
        set.keys().collect::<Vec<_>>(),
        vec![&config_key(), &key],
        "keys and order unchanged"
    );
    let decoded = set.get(&key).unwrap().decode().into_result().unwrap();
    assert!(matches!(decoded, Resource::Accelerators(table) if table.0[0].command_id == 9));
}

#[test]
fn empty_file() {
    init_logger();

    let decoded = res::decode(&[]);
    assert!(!decoded.is_partial() && decoded.value.is_empty(), "empty input has no records");

    let set = ResourceSet::from_res(&[]).into_result().unwrap();
    assert!(set.is_empty());
    assert_eq!(set.to_res().unwrap().len(), 32, "empty set is written as the sentinel");
}
