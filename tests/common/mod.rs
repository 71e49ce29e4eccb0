#![allow(dead_code)]

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Info)
            .format_timestamp(None)
            .format_module_path(false)
            .format_level(true)
            .format_target(false)
            .write_style(env_logger::WriteStyle::Auto)
            .init();
    });
}

/// UTF-16LE bytes of a string including the terminator.
pub fn utf16z(string: &str) -> Vec<u8> {
    let mut data = string.encode_utf16().flat_map(u16::to_le_bytes).collect::<Vec<_>>();
    data.extend([0, 0]);
    data
}

pub fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

pub fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

pub fn align4(value: usize) -> usize { (value + 3) & !3 }

/// Returns the offset after the null-terminated UTF-16 string at `offset`.
pub fn skip_string(data: &[u8], mut offset: usize) -> usize {
    while u16_at(data, offset) != 0 {
        offset += 2;
    }
    offset + 2
}
