//! Version information.
//!
//! A `VS_VERSIONINFO` resource is a tree of self-sizing blocks. Every block starts with a
//! [`VersionHeader`] whose length covers the block including all of its children, followed by the
//! DWORD aligned key, the DWORD aligned value and the child blocks.
//!
//! See <https://learn.microsoft.com/en-us/windows/win32/menurc/vs-versioninfo> for more information.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::mem::size_of;

use log::{debug, trace, warn};
use zerocopy::IntoBytes;

use crate::{constants::*, errors::*, types::*, util::*};

/// Fixed file information of a version resource.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FixedInfo {
    pub struct_version:  u32,
    /// File version as `major.minor.patch.build`.
    pub file_version:    [u16; 4],
    /// Product version as `major.minor.patch.build`.
    pub product_version: [u16; 4],
    pub file_flags_mask: u32,
    pub file_flags:      u32,
    pub file_os:         u32,
    pub file_type:       u32,
    pub file_subtype:    u32,
    pub file_date:       u64,
}
impl Default for FixedInfo {
    fn default() -> Self { FixedFileInfo::default().into() }
}
impl From<FixedFileInfo> for FixedInfo {
    fn from(info: FixedFileInfo) -> Self {
        let split = |version: VersionU32| {
            let (ms, ls) = (version.major, version.minor);
            [(ms >> 16) as u16, ms as u16, (ls >> 16) as u16, ls as u16]
        };
        Self {
            struct_version:  info.struct_version,
            file_version:    split(info.file_version),
            product_version: split(info.product_version),
            file_flags_mask: info.file_flags_mask,
            file_flags:      info.file_flags,
            file_os:         info.file_os,
            file_type:       info.file_type,
            file_subtype:    info.file_subtype,
            file_date:       (info.file_date_ms as u64) << 32 | info.file_date_ls as u64,
        }
    }
}
impl From<&FixedInfo> for FixedFileInfo {
    fn from(info: &FixedInfo) -> Self {
        let join = |version: [u16; 4]| VersionU32 {
            major: (version[0] as u32) << 16 | version[1] as u32,
            minor: (version[2] as u32) << 16 | version[3] as u32,
        };
        Self {
            signature:       VS_FIXEDFILEINFO_SIGNATURE,
            struct_version:  info.struct_version,
            file_version:    join(info.file_version),
            product_version: join(info.product_version),
            file_flags_mask: info.file_flags_mask,
            file_flags:      info.file_flags,
            file_os:         info.file_os,
            file_type:       info.file_type,
            file_subtype:    info.file_subtype,
            file_date_ms:    (info.file_date >> 32) as u32,
            file_date_ls:    info.file_date as u32,
        }
    }
}

/// String table of a `StringFileInfo` block for one language and code page.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct VersionStringTable {
    /// Language and code page as eight hexadecimal digits, for example `040904B0`.
    pub lang_codepage_hex: String,
    /// Key and value pairs in file order.
    pub entries:           Vec<(String, String)>,
}
impl VersionStringTable {
    pub fn new(language: u16, codepage: u16) -> Self {
        Self {
            lang_codepage_hex: format!("{:04X}{:04X}", language, codepage),
            entries:           Vec::new(),
        }
    }

    /// Returns the language id encoded in the key.
    pub fn language(&self) -> Option<u16> {
        u16::from_str_radix(self.lang_codepage_hex.get(0..4)?, 16).ok()
    }

    /// Returns the code page encoded in the key.
    pub fn codepage(&self) -> Option<u16> {
        u16::from_str_radix(self.lang_codepage_hex.get(4..8)?, 16).ok()
    }

    /// Returns the value for the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(name, _)| name == key).map(|(_, value)| value.as_str())
    }

    /// Set the value for the given key, keeping its position if it already exists.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Entry of the `VarFileInfo` block.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct VarEntry {
    pub key:    String,
    pub values: Vec<u16>,
}
impl VarEntry {
    /// Build a `Translation` entry from language and code page pairs.
    pub fn translation(pairs: &[(u16, u16)]) -> Self {
        Self {
            key:    VS_TRANSLATION.to_string(),
            values: pairs.iter().flat_map(|&(language, codepage)| [language, codepage]).collect(),
        }
    }
}

/// Decoded version resource.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct VersionInfo {
    pub fixed:         Option<FixedInfo>,
    pub string_tables: Vec<VersionStringTable>,
    pub var_entries:   Vec<VarEntry>,
}
impl VersionInfo {
    /// Returns the value for the given key from the first string table containing it.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.string_tables.iter().find_map(|table| table.get(key))
    }

    /// Returns the language and code page pairs of the `Translation` entry.
    pub fn translations(&self) -> Vec<(u16, u16)> {
        self.var_entries
            .iter()
            .filter(|entry| entry.key == VS_TRANSLATION)
            .flat_map(|entry| entry.values.chunks_exact(2).map(|pair| (pair[0], pair[1])))
            .collect()
    }
}

/// Header and bounds of a block being decoded.
struct Block {
    end:          usize,
    value_length: u16,
    key:          String,
}

/// Read a block header and key.
/// Returns a reader bounded to the block and positioned after the key.
fn read_block<'a>(reader: &mut Reader<'a>) -> Result<(Block, Reader<'a>), DecodeError> {
    reader.align(4);
    let start = reader.position();
    let header = reader.read::<VersionHeader>("version block header")?;
    let length = header.length as usize;
    if length < size_of::<VersionHeader>() {
        return Err(DecodeError::MalformedField {
            field:  "version block length",
            offset: start,
            reason: format!("block length {} is smaller than its header", length),
        });
    }
    if length > reader.len() - start {
        return Err(DecodeError::OutOfRange {
            field:     "version block length",
            offset:    start,
            declared:  length,
            available: reader.len() - start,
        });
    }
    let mut block = reader.bounded(start + length);
    let key = block.read_aligned_string("version block key")?;
    trace!("version block {:?} at {:#x}: {:?}", key, start, header);
    Ok((
        Block {
            end: start + length,
            value_length: header.value_length,
            key,
        },
        block,
    ))
}

/// Call `f` for every child block remaining in `parent`.
fn for_each_child<'a, F>(parent: &mut Reader<'a>, mut f: F) -> Result<(), DecodeError>
where
    F: FnMut(&Block, &mut Reader<'a>) -> Result<(), DecodeError>,
{
    loop {
        parent.align(4);
        let padding = parent.remaining() < size_of::<VersionHeader>()
            || parent.peek_u16("version block header")? == 0;
        if padding {
            if !parent.is_at_end() {
                trace!("ignoring {} bytes of padding after version block", parent.remaining());
            }
            return Ok(());
        }
        let (block, mut child) = read_block(parent)?;
        f(&block, &mut child)?;
        parent.seek(block.end);
    }
}

/// Decode a version resource.
///
/// Decoding is best-effort: blocks read before an error are kept in the returned value.
pub fn decode(payload: &[u8]) -> Decoded<VersionInfo> {
    let mut info = VersionInfo::default();
    let result = decode_root(&mut Reader::new(payload), &mut info);
    if let Err(error) = &result {
        warn!("version info decoded partially: {:?}", error);
    }
    Decoded::from_parts(info, result)
}

fn decode_root(reader: &mut Reader, info: &mut VersionInfo) -> Result<(), DecodeError> {
    let (root, mut body) = read_block(reader)?;
    if root.key != VS_VERSION_INFO {
        warn!("unexpected version info key {:?}", root.key);
    }

    if root.value_length != 0 {
        let offset = body.position();
        let value = body.bytes(root.value_length as usize, "fixed file info")?;
        match read::<FixedFileInfo>(value, 0, "fixed file info") {
            Ok(fixed) => {
                if fixed.signature != VS_FIXEDFILEINFO_SIGNATURE {
                    warn!(
                        "fixed file info at {:#x} has signature {:#x}, expected {:#x}",
                        offset,
                        { fixed.signature },
                        VS_FIXEDFILEINFO_SIGNATURE
                    );
                }
                debug!("fixed file info: {:#x?}", fixed);
                info.fixed = Some(fixed.into());
            }
            Err(_) => warn!(
                "fixed file info has {} bytes, expected {}, ignoring it",
                value.len(),
                size_of::<FixedFileInfo>()
            ),
        }
    }

    for_each_child(&mut body, |block, child| match block.key.as_str() {
        VS_STRING_FILE_INFO => decode_string_file_info(child, info),
        VS_VAR_FILE_INFO => decode_var_file_info(child, info),
        key => {
            warn!("skipping unknown version block {:?}", key);
            Ok(())
        }
    })
}

fn decode_string_file_info(reader: &mut Reader, info: &mut VersionInfo) -> Result<(), DecodeError> {
    for_each_child(reader, |block, child| {
        let mut table = VersionStringTable {
            lang_codepage_hex: block.key.clone(),
            entries:           Vec::new(),
        };
        let result = for_each_child(child, |entry, value| {
            let text = if entry.value_length == 0 || value.is_at_end() {
                String::new()
            } else {
                value.read_string("version string value")?
            };
            trace!("{:?} = {:?}", entry.key, text);
            table.entries.push((entry.key.clone(), text));
            Ok(())
        });
        debug!("string table {:?} with {} entries", table.lang_codepage_hex, table.entries.len());
        info.string_tables.push(table);
        result
    })
}

fn decode_var_file_info(reader: &mut Reader, info: &mut VersionInfo) -> Result<(), DecodeError> {
    for_each_child(reader, |block, value| {
        let data = value.bytes(block.value_length as usize, "version var value")?;
        if data.len() % 2 != 0 {
            warn!("var {:?} has an odd value length {}", block.key, data.len());
        }
        let values = data
            .chunks_exact(2)
            .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
            .collect::<Vec<_>>();
        trace!("{:?} = {:04x?}", block.key, values);
        info.var_entries.push(VarEntry {
            key: block.key.clone(),
            values,
        });
        Ok(())
    })
}

/// Value of a block being encoded.
enum Value<'a> {
    Empty,
    Binary(&'a [u8]),
    Text(&'a str),
}

/// Write a block and its children, then patch its length.
fn write_block<F>(
    writer: &mut Writer, key: &str, type_: u16, value: Value, children: F,
) -> Result<(), EncodeError>
where
    F: FnOnce(&mut Writer) -> Result<(), EncodeError>,
{
    let value_length = match &value {
        Value::Empty => 0,
        Value::Binary(data) => data.len(),
        Value::Text(text) if text.is_empty() => 0,
        Value::Text(text) => text.encode_utf16().count() + 1,
    };
    let value_length = u16::try_from(value_length).map_err(|_| EncodeError::ValueOutOfRange {
        field: "version value length",
        value: value_length as u64,
    })?;

    writer.align(4);
    let start = writer.position();
    writer.write(&VersionHeader {
        length: 0,
        value_length,
        type_,
    });
    writer.write_aligned_string(key);
    match value {
        Value::Empty => {}
        Value::Binary(data) => writer.bytes(data),
        Value::Text(text) if text.is_empty() => {}
        Value::Text(text) => writer.write_string(text),
    }
    writer.align(4);
    children(writer)?;

    let length = writer.position() - start;
    let length = u16::try_from(length).map_err(|_| EncodeError::ValueOutOfRange {
        field: "version block length",
        value: length as u64,
    })?;
    writer.patch_u16(start, length);
    Ok(())
}

/// Encode a version resource.
///
/// The fixed file information is written first, followed by the `StringFileInfo` block if there
/// are string tables and the `VarFileInfo` block if there are var entries.
///
/// # Returns
/// Returns an error if a block exceeds the maximum block length of `u16::MAX` bytes.
pub fn encode(info: &VersionInfo) -> Result<Vec<u8>, EncodeError> {
    let fixed = info.fixed.as_ref().map(FixedFileInfo::from);
    let value = match &fixed {
        Some(fixed) => Value::Binary(fixed.as_bytes()),
        None => Value::Empty,
    };

    let mut writer = Writer::new();
    write_block(&mut writer, VS_VERSION_INFO, VS_VALUE_BINARY, value, |writer| {
        if !info.string_tables.is_empty() {
            write_block(writer, VS_STRING_FILE_INFO, VS_VALUE_TEXT, Value::Empty, |writer| {
                for table in &info.string_tables {
                    write_block(
                        writer,
                        &table.lang_codepage_hex,
                        VS_VALUE_TEXT,
                        Value::Empty,
                        |writer| {
                            for (key, value) in &table.entries {
                                let value = Value::Text(value);
                                write_block(writer, key, VS_VALUE_TEXT, value, |_| Ok(()))?;
                            }
                            Ok(())
                        },
                    )?;
                }
                Ok(())
            })?;
        }
        if !info.var_entries.is_empty() {
            write_block(writer, VS_VAR_FILE_INFO, VS_VALUE_TEXT, Value::Empty, |writer| {
                for entry in &info.var_entries {
                    let data = entry
                        .values
                        .iter()
                        .flat_map(|value| value.to_le_bytes())
                        .collect::<Vec<_>>();
                    let value = Value::Binary(&data);
                    write_block(writer, &entry.key, VS_VALUE_BINARY, value, |_| Ok(()))?;
                }
                Ok(())
            })?;
        }
        Ok(())
    })?;
    Ok(writer.into_inner())
}
