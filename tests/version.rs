use editres::{constants::*, version, *};

mod common;
use common::*;

fn header(length: u16, value_length: u16, type_: u16) -> Vec<u8> {
    [length, value_length, type_].iter().flat_map(|value| value.to_le_bytes()).collect()
}

/// `VS_VERSION_INFO` with a single `ProductName` entry, laid out by hand.
fn product_name_block() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(header(148, 0, 0));
    data.extend(utf16z("VS_VERSION_INFO"));
    data.extend([0, 0]);

    data.extend(header(108, 0, 1));
    data.extend(utf16z("StringFileInfo"));
    data.extend([0, 0, 0, 0]);

    data.extend(header(68, 0, 1));
    data.extend(utf16z("040904B0"));

    data.extend(header(44, 5, 1));
    data.extend(utf16z("ProductName"));
    data.extend([0, 0]);
    data.extend(utf16z("Demo"));
    data.extend([0, 0]);
    data
}

fn full_version_info() -> VersionInfo {
    let mut english = VersionStringTable::new(LANGUAGE_ID_EN_US, CODE_PAGE_ID_EN_US);
    english.set(VS_COMPANY_NAME, "Example Corp");
    english.set(VS_FILE_DESCRIPTION, "Resource editor");
    english.set(VS_FILE_VERSION, "1.2.3.4");
    english.set(VS_COMMENTS, "");
    english.set(VS_PRODUCT_NAME, "Demo");

    let mut german = VersionStringTable::new(0x0407, CODE_PAGE_ID_EN_US);
    german.set(VS_PRODUCT_NAME, "Vorführung");

    VersionInfo {
        fixed:         Some(FixedInfo {
            file_version: [1, 2, 3, 4],
            product_version: [1, 2, 0, 0],
            file_type: VFT_DLL,
            file_date: 0x0123_4567_89AB_CDEF,
            ..Default::default()
        }),
        string_tables: vec![english, german],
        var_entries:   vec![VarEntry::translation(&[
            (LANGUAGE_ID_EN_US, CODE_PAGE_ID_EN_US),
            (0x0407, CODE_PAGE_ID_EN_US),
        ])],
    }
}

/// Check every block between `start` and `end` and return the number of blocks.
///
/// Each block length has to reach exactly up to the next sibling, and the last sibling has to
/// reach exactly up to the end of its parent.
fn check_block_lengths(data: &[u8], start: usize, end: usize) -> usize {
    let mut count = 0;
    let mut offset = start;
    while offset < end {
        let length = u16_at(data, offset) as usize;
        let value_length = u16_at(data, offset + 2) as usize;
        let type_ = u16_at(data, offset + 4);
        assert!(offset + length <= end, "block at {:#x} exceeds its parent", offset);

        let value = align4(skip_string(data, offset + 6));
        let value_size = if type_ == VS_VALUE_TEXT { value_length * 2 } else { value_length };
        let children = align4(value + value_size);
        count += 1 + check_block_lengths(data, children.min(offset + length), offset + length);
        offset = align4(offset + length);
    }
    assert_eq!(offset, end, "sibling lengths add up to the parent length");
    count
}

#[test]
fn product_name_scenario() {
    init_logger();

    let data = product_name_block();
    assert_eq!(data.len(), 148, "hand built block size");

    let decoded = version::decode(&data);
    assert!(!decoded.is_partial(), "version info decoded completely");
    let info = decoded.value;
    assert_eq!(info.fixed, None, "no fixed file info");
    assert_eq!(info.string_tables.len(), 1, "one string table");
    assert_eq!(info.string_tables[0].lang_codepage_hex, "040904B0");
    assert_eq!(
        info.string_tables[0].entries,
        vec![("ProductName".to_string(), "Demo".to_string())]
    );
    assert!(info.var_entries.is_empty(), "no var file info");

    assert_eq!(version::encode(&info).unwrap(), data, "encoding reproduces the block");
}

#[test]
fn full_round_trip() {
    init_logger();

    let info = full_version_info();
    let data = version::encode(&info).unwrap();
    assert_eq!(u16_at(&data, 0) as usize, data.len(), "root length covers the resource");
    assert_eq!(u16_at(&data, 2), 52, "fixed file info length");
    assert_eq!(u32_at(&data, 40), VS_FIXEDFILEINFO_SIGNATURE, "fixed file info signature");
    assert_eq!(u32_at(&data, 48), 0x0001_0002, "file version most significant part");
    assert_eq!(u32_at(&data, 52), 0x0003_0004, "file version least significant part");

    let decoded = version::decode(&data);
    assert!(!decoded.is_partial(), "version info decoded completely");
    assert_eq!(decoded.value, info, "version info round trip");
    assert_eq!(decoded.value.string(VS_PRODUCT_NAME), Some("Demo"));
    assert_eq!(decoded.value.string(VS_COMMENTS), Some(""), "empty value kept");
    assert_eq!(
        decoded.value.translations(),
        vec![(0x0409, 0x04B0), (0x0407, 0x04B0)],
        "translations decoded"
    );
    assert_eq!(decoded.value.string_tables[1].language(), Some(0x0407));
    assert_eq!(decoded.value.string_tables[1].codepage(), Some(CODE_PAGE_ID_EN_US));
}

#[test]
fn block_lengths_are_patched_at_every_level() {
    init_logger();

    let data = version::encode(&full_version_info()).unwrap();
    // root, string and var file info, two tables, six strings, one translation
    assert_eq!(check_block_lengths(&data, 0, data.len()), 12, "every block checked");

    let data = product_name_block();
    assert_eq!(check_block_lengths(&data, 0, data.len()), 4, "hand built blocks checked");
}

#[test]
fn empty_value_has_zero_length() {
    init_logger();

    let mut table = VersionStringTable::new(LANGUAGE_ID_EN_US, CODE_PAGE_ID_EN_US);
    table.set(VS_COMMENTS, "");
    let info = VersionInfo {
        string_tables: vec![table],
        ..Default::default()
    };
    let data = version::encode(&info).unwrap();
    // root 40, string file info 40, table 24
    let entry = 104;
    assert_eq!(u16_at(&data, entry + 2), 0, "empty value has no length");
    assert_eq!(
        u16_at(&data, entry) as usize,
        6 + utf16z(VS_COMMENTS).len(),
        "entry ends after its key"
    );
    assert_eq!(version::decode(&data).into_result(), Ok(info), "empty value round trip");
}

#[test]
fn signature_mismatch_is_not_fatal() {
    init_logger();

    let info = full_version_info();
    let mut data = version::encode(&info).unwrap();
    data[40..44].copy_from_slice(&0u32.to_le_bytes());

    let decoded = version::decode(&data);
    assert!(!decoded.is_partial(), "wrong signature only logs a warning");
    assert_eq!(decoded.value, info, "fields and children still decoded");
}

#[test]
fn unknown_blocks_are_skipped() {
    init_logger();

    let mut data = product_name_block();
    let mut unknown = header(30, 0, 1);
    unknown.extend(utf16z("UnknownInfo"));
    data.extend(unknown);
    data[0..2].copy_from_slice(&178u16.to_le_bytes());

    let decoded = version::decode(&data);
    assert!(!decoded.is_partial(), "unknown block skipped");
    assert_eq!(decoded.value.string(VS_PRODUCT_NAME), Some("Demo"), "known blocks decoded");
}

#[test]
fn truncated_version_info() {
    init_logger();

    let data = version::encode(&full_version_info()).unwrap();
    let decoded = version::decode(&data[..100]);
    assert!(decoded.is_partial(), "truncation reported");
    let error = decoded.error.unwrap();
    assert_eq!(error.field(), "version block length", "root length exceeds the data");
    assert_eq!(error.offset(), 0);

    let mut data = product_name_block();
    // let the string table overrun its parent
    data[80..82].copy_from_slice(&200u16.to_le_bytes());
    let decoded = version::decode(&data);
    assert!(decoded.is_partial(), "overrunning child reported");
    assert_eq!(decoded.error.unwrap().offset(), 80, "offset of the overrunning block");
}

#[test]
fn oversized_block_rejected() {
    init_logger();

    let mut table = VersionStringTable::new(LANGUAGE_ID_EN_US, CODE_PAGE_ID_EN_US);
    table.set(VS_COMMENTS, "x".repeat(40000));
    let info = VersionInfo {
        string_tables: vec![table],
        ..Default::default()
    };
    assert!(
        matches!(version::encode(&info), Err(EncodeError::ValueOutOfRange { .. })),
        "blocks are limited to 16 bit lengths"
    );
}
