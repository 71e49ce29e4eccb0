//! String table blocks.
//!
//! String tables are stored in blocks of 16 strings. The name of an `RT_STRING` resource is the
//! 1-based block number, and string `id` lives in block `id / 16 + 1` at slot `id % 16`.
//! Each slot is a character count followed by that many UTF-16LE code units without a terminator.

use alloc::{collections::BTreeMap, format, string::String, vec::Vec};

use log::{trace, warn};

use crate::{errors::*, util::*};

/// Number of string slots in a block.
pub const STRINGS_PER_BLOCK: u16 = 16;

/// Highest valid block number, containing the ids up to `u16::MAX`.
pub const MAX_BLOCK_NUMBER: u16 = 4096;

/// A single string of a string table.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct StringEntry {
    pub id:   u16,
    pub text: String,
}

/// One 16-slot block of a string table.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct StringTableBlock {
    /// 1-based block number, the resource name of the block.
    pub block_number: u16,
    /// Non-empty strings of the block, in slot order after decoding.
    pub entries:      Vec<StringEntry>,
}
impl StringTableBlock {
    pub fn new(block_number: u16) -> Self {
        Self {
            block_number,
            entries: Vec::new(),
        }
    }

    /// Returns the id of the first slot in the block.
    pub fn base_id(&self) -> u32 { base_id(self.block_number) }

    /// Returns the string with the given id.
    pub fn get(&self, id: u16) -> Option<&str> {
        self.entries.iter().find(|entry| entry.id == id).map(|entry| entry.text.as_str())
    }

    /// Group strings into blocks.
    /// Empty strings occupy no slot and are skipped.
    ///
    /// # Returns
    /// Returns the blocks ordered by block number, or an error if an id appears more than once.
    pub fn split<I: IntoIterator<Item = StringEntry>>(entries: I) -> Result<Vec<Self>, EncodeError> {
        let mut blocks = BTreeMap::<u16, Vec<StringEntry>>::new();
        for entry in entries {
            if entry.text.is_empty() {
                continue;
            }
            let (block_number, _) = block_of(entry.id);
            let block = blocks.entry(block_number).or_default();
            if block.iter().any(|existing| existing.id == entry.id) {
                return Err(EncodeError::DuplicateStringId(entry.id));
            }
            block.push(entry);
        }
        Ok(blocks
            .into_iter()
            .map(|(block_number, mut entries)| {
                entries.sort();
                Self {
                    block_number,
                    entries,
                }
            })
            .collect())
    }
}

fn base_id(block_number: u16) -> u32 { (block_number as u32).saturating_sub(1) * 16 }

/// Returns the block number and slot of a string id.
pub fn block_of(id: u16) -> (u16, u16) { (id / STRINGS_PER_BLOCK + 1, id % STRINGS_PER_BLOCK) }

/// Returns `true` for the block numbers `1..=4096` that hold string ids.
pub fn is_valid_block_number(block_number: u16) -> bool {
    (1..=MAX_BLOCK_NUMBER).contains(&block_number)
}

/// Decode a string table block.
///
/// Decoding stops early only if the payload is truncated, keeping the strings read so far.
/// An invalid block number is reported without reading any slot.
pub fn decode(payload: &[u8], block_number: u16) -> Decoded<StringTableBlock> {
    let mut block = StringTableBlock::new(block_number);
    if !is_valid_block_number(block_number) {
        warn!("string table block number {} is out of range", block_number);
        return Decoded::partial(block, DecodeError::MalformedField {
            field:  "string table block number",
            offset: 0,
            reason: format!("block number {} is not in 1..={}", block_number, MAX_BLOCK_NUMBER),
        });
    }
    let result = decode_slots(&mut Reader::new(payload), &mut block);
    if let Err(error) = &result {
        warn!("string table block {} is truncated: {:?}", block_number, error);
    }
    Decoded::from_parts(block, result)
}

fn decode_slots(reader: &mut Reader, block: &mut StringTableBlock) -> Result<(), DecodeError> {
    let base = block.base_id();
    for slot in 0..STRINGS_PER_BLOCK as u32 {
        let count = reader.u16("string length")? as usize;
        if count == 0 {
            continue;
        }
        let data = reader.bytes(count * 2, "string data")?;
        let units = data
            .chunks_exact(2)
            .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
            .collect::<Vec<_>>();
        let id = base + slot;
        let text = u16_to_string(&units, "string data");
        trace!("string {}: {:?}", id, text);
        block.entries.push(StringEntry {
            id: id as u16,
            text,
        });
    }
    if !reader.is_at_end() {
        trace!("ignoring {} trailing bytes after string table block", reader.remaining());
    }
    Ok(())
}

/// Encode a string table block.
///
/// # Returns
/// Returns an error if the block number is invalid, or if an entry is outside the block or
/// its slot is already occupied.
pub fn encode(block: &StringTableBlock) -> Result<Vec<u8>, EncodeError> {
    if !is_valid_block_number(block.block_number) {
        return Err(EncodeError::InvalidBlockNumber(block.block_number));
    }
    let base = block.base_id();

    let mut slots: [Option<&str>; STRINGS_PER_BLOCK as usize] = Default::default();
    for entry in &block.entries {
        let id = entry.id as u32;
        if id < base || id >= base + STRINGS_PER_BLOCK as u32 {
            return Err(EncodeError::StringIdOutOfBlock {
                id:    entry.id,
                block: block.block_number,
            });
        }
        let slot = &mut slots[(id - base) as usize];
        if slot.is_some() {
            return Err(EncodeError::DuplicateStringId(entry.id));
        }
        *slot = Some(&entry.text);
    }

    let mut writer = Writer::new();
    for slot in slots {
        let text = slot.unwrap_or_default();
        let units = text.encode_utf16().collect::<Vec<_>>();
        if units.len() > u16::MAX as usize {
            return Err(EncodeError::ValueOutOfRange {
                field: "string length",
                value: units.len() as u64,
            });
        }
        writer.u16(units.len() as u16);
        for unit in units {
            writer.u16(unit);
        }
    }
    Ok(writer.into_inner())
}
