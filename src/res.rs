//! Compiled resource files.
//!
//! A `.RES` file is a plain sequence of records without an index. Each record is a
//! `RESOURCEHEADER` followed by the payload, and both the header and the payload are padded to a
//! DWORD boundary. The header size counts the type, the name and the fixed tail, but not the
//! leading data size and header size fields.
//!
//! See <https://learn.microsoft.com/en-us/windows/win32/menurc/resourceheader> for more information.

use alloc::{format, vec::Vec};
use core::mem::size_of;

use log::{debug, trace, warn};

use crate::{errors::*, resource::*, types::*, util::*};

/// Decode the records of a `.RES` file.
///
/// The leading empty record is returned like any other record, see [`ResRecord::is_sentinel`].
/// Decoding is best-effort: records read before an error are kept in the returned value.
pub fn decode(data: &[u8]) -> Decoded<Vec<ResRecord>> {
    let mut records = Vec::new();
    let result = decode_records(&mut Reader::new(data), &mut records);
    if let Err(error) = &result {
        warn!("resource file decoded partially ({} records read): {:?}", records.len(), error);
    }
    debug!("read {} resource records", records.len());
    Decoded::from_parts(records, result)
}

fn decode_records(reader: &mut Reader, records: &mut Vec<ResRecord>) -> Result<(), DecodeError> {
    loop {
        reader.align(4);
        if reader.is_at_end() {
            return Ok(());
        }
        let start = reader.position();
        let prefix = reader.read::<ResHeaderPrefix>("resource header")?;
        let type_ = reader.read_atom_or_string("resource type")?;
        let name = reader.read_atom_or_string("resource name")?;
        let tail = reader.read::<ResHeaderTail>("resource header")?;

        let header_size = prefix.header_size as usize;
        let parsed_size = reader.position() - start - size_of::<ResHeaderPrefix>();
        // some writers count the size and header size fields as part of the header
        if header_size != parsed_size && header_size != parsed_size + size_of::<ResHeaderPrefix>() {
            let declared_end = start + size_of::<ResHeaderPrefix>() + header_size;
            if header_size < parsed_size {
                return Err(DecodeError::MalformedField {
                    field:  "resource header size",
                    offset: start,
                    reason: format!(
                        "header declares {} bytes but type, name and tail take {}",
                        header_size, parsed_size
                    ),
                });
            }
            if declared_end > reader.len() {
                return Err(DecodeError::OutOfRange {
                    field:     "resource header size",
                    offset:    start,
                    declared:  header_size,
                    available: reader.len() - start - size_of::<ResHeaderPrefix>(),
                });
            }
            warn!(
                "resource header at {:#x} declares {} bytes but {} were read, skipping to its end",
                start, header_size, parsed_size
            );
            reader.seek(declared_end);
        }

        let payload = reader.bytes(prefix.data_size as usize, "resource data")?;
        let record = ResRecord {
            key:             ResourceKey {
                type_,
                name,
                language: tail.language_id,
            },
            data_version:    tail.data_version,
            memory_flags:    tail.memory_flags,
            version:         tail.version,
            characteristics: tail.characteristics,
            payload:         payload.to_vec().into(),
        };
        trace!("resource record {} at {:#x}, {} bytes", record.key, start, payload.len());
        records.push(record);
    }
}

/// Encode records into a `.RES` file.
///
/// Records are written as given, use [`ResRecord::sentinel`] as the first record to produce a file
/// that resource tools accept.
///
/// # Returns
/// Returns an error if a payload or header does not fit the `u32` size fields.
pub fn encode<'a, I: IntoIterator<Item = &'a ResRecord>>(records: I) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    for record in records {
        writer.align(4);

        let mut header = Writer::new();
        header.write_atom_or_string(&record.key.type_);
        header.write_atom_or_string(&record.key.name);
        header.write(&ResHeaderTail {
            data_version:    record.data_version,
            memory_flags:    record.memory_flags,
            language_id:     record.key.language,
            version:         record.version,
            characteristics: record.characteristics,
        });

        let header_size = header.position();
        let prefix = ResHeaderPrefix {
            data_size:   size_field("resource data size", record.payload.len())?,
            header_size: size_field("resource header size", header_size)?,
        };
        trace!("writing resource record {} at {:#x}", record.key, writer.position());
        writer.write(&prefix);
        writer.bytes(header.as_slice());
        writer.bytes(&record.payload);
    }
    writer.align(4);
    Ok(writer.into_inner())
}

fn size_field(field: &'static str, value: usize) -> Result<u32, EncodeError> {
    u32::try_from(value).map_err(|_| EncodeError::ValueOutOfRange {
        field,
        value: value as u64,
    })
}
