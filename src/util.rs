//! Cursor based primitives shared by all resource codecs.
//!
//! Every resource format stores UTF-16 strings, atom-or-string fields and padding in the same way.
//! Offsets and alignment are always relative to the start of the buffer a [`Reader`] or [`Writer`]
//! was created for, which is the start of the record being decoded or encoded.

use alloc::{string::String, vec::Vec};
use core::{
    mem::size_of,
    ops::{Add, Rem, Sub},
};

use log::warn;
use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::{errors::*, resource::AtomOrString};

/// Marker that precedes an ordinal in an atom-or-string field.
pub const ATOM_MARKER: u16 = 0xFFFF;

pub fn read<T: FromBytes + Copy>(
    data: &[u8], offset: usize, field: &'static str,
) -> Result<T, DecodeError> {
    T::read_from_prefix(data.get(offset..).unwrap_or_default())
        .map_err(|_| DecodeError::Truncated { field, offset })
        .map(|(value, _)| value)
}

pub fn aligned_to<T: Add<Output = T> + Sub<Output = T> + Rem<Output = T> + Eq + Copy + Default>(
    value: T, alignment: T,
) -> T {
    if value % alignment == T::default() {
        return value;
    }
    value + alignment - (value % alignment)
}

pub fn string_to_u16<S: AsRef<str>>(string: S) -> Vec<u8> {
    let string = string.as_ref();
    let mut data = Vec::with_capacity(string.len() * 2 + 2);
    data.extend(string.encode_utf16().flat_map(u16::to_le_bytes));
    data.extend([0, 0]);
    data
}

pub(crate) fn u16_to_string(units: &[u16], field: &'static str) -> String {
    String::from_utf16(units).unwrap_or_else(|_| {
        warn!("{} contains invalid utf-16, replacing invalid code units", field);
        String::from_utf16_lossy(units)
    })
}

/// Read cursor over a resource buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data:     &'a [u8],
    position: usize,
}
impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self { Self { data, position: 0 } }

    /// Returns the current offset from the start of the buffer.
    pub fn position(&self) -> usize { self.position }

    /// Returns the length of the readable buffer.
    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> usize { self.data.len().saturating_sub(self.position) }

    pub fn is_at_end(&self) -> bool { self.remaining() == 0 }

    /// Move the cursor to the given offset, clamped to the end of the buffer.
    pub fn seek(&mut self, position: usize) { self.position = position.min(self.data.len()); }

    /// Returns a reader positioned at the current offset that cannot read past `end`.
    /// Offsets of the returned reader share the origin of this reader.
    pub fn bounded(&self, end: usize) -> Reader<'a> {
        Reader {
            data:     &self.data[..end.min(self.data.len())],
            position: self.position,
        }
    }

    pub fn read<T: FromBytes + Copy>(&mut self, field: &'static str) -> Result<T, DecodeError> {
        let value = read::<T>(self.data, self.position, field)?;
        self.position += size_of::<T>();
        Ok(value)
    }

    pub fn u8(&mut self, field: &'static str) -> Result<u8, DecodeError> { self.read(field) }

    pub fn u16(&mut self, field: &'static str) -> Result<u16, DecodeError> { self.read(field) }

    pub fn u32(&mut self, field: &'static str) -> Result<u32, DecodeError> { self.read(field) }

    /// Read a value `ahead` bytes after the cursor without moving it.
    pub fn peek<T: FromBytes + Copy>(
        &self, ahead: usize, field: &'static str,
    ) -> Result<T, DecodeError> {
        read::<T>(self.data, self.position + ahead, field)
    }

    pub fn peek_u16(&self, field: &'static str) -> Result<u16, DecodeError> { self.peek(0, field) }

    /// Read `len` raw bytes.
    ///
    /// # Returns
    /// Returns [`DecodeError::OutOfRange`] if fewer than `len` bytes remain.
    pub fn bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::OutOfRange {
                field,
                offset: self.position,
                declared: len,
                available: self.remaining(),
            });
        }
        let data = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(data)
    }

    /// Skip padding up to the next multiple of `alignment`.
    /// Padding missing at the very end of the buffer is tolerated.
    pub fn align(&mut self, alignment: usize) {
        self.position = aligned_to(self.position, alignment).min(self.data.len());
    }

    /// Read a null-terminated UTF-16LE string without consuming any padding.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let start = self.position;
        let mut units = Vec::new();
        loop {
            if self.remaining() < 2 {
                self.position = start;
                return Err(DecodeError::Truncated {
                    field,
                    offset: start,
                });
            }
            let unit = read::<u16>(self.data, self.position, field)?;
            self.position += 2;
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        Ok(u16_to_string(&units, field))
    }

    /// Read a null-terminated UTF-16LE string followed by padding to a DWORD boundary.
    pub fn read_aligned_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let string = self.read_string(field)?;
        self.align(4);
        Ok(string)
    }

    /// Read a DWORD aligned atom-or-string field.
    ///
    /// `0xFFFF` introduces an ordinal, `0x0000` is an empty string and anything else is the first
    /// code unit of a null-terminated string.
    pub fn read_atom_or_string(&mut self, field: &'static str) -> Result<AtomOrString, DecodeError> {
        match self.peek_u16(field)? {
            ATOM_MARKER => {
                self.position += 2;
                let atom = self.u16(field)?;
                self.align(4);
                Ok(AtomOrString::Atom(atom))
            }
            0 => {
                self.position += 2;
                self.align(4);
                Ok(AtomOrString::Text(String::new()))
            }
            _ => self.read_aligned_string(field).map(AtomOrString::Text),
        }
    }
}

/// Write cursor producing a resource buffer.
///
/// Padding is always written as zero bytes.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    data: Vec<u8>,
}
impl Writer {
    pub fn new() -> Self { Self::default() }

    /// Returns the current offset from the start of the buffer.
    pub fn position(&self) -> usize { self.data.len() }

    pub fn as_slice(&self) -> &[u8] { &self.data }

    pub fn into_inner(self) -> Vec<u8> { self.data }

    pub fn write<T: IntoBytes + Immutable>(&mut self, value: &T) {
        self.data.extend_from_slice(value.as_bytes());
    }

    pub fn u8(&mut self, value: u8) { self.data.push(value); }

    pub fn u16(&mut self, value: u16) { self.data.extend(value.to_le_bytes()); }

    pub fn u32(&mut self, value: u32) { self.data.extend(value.to_le_bytes()); }

    pub fn bytes(&mut self, data: &[u8]) { self.data.extend_from_slice(data); }

    /// Write zero padding up to the next multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) {
        self.data.resize(aligned_to(self.data.len(), alignment), 0);
    }

    /// Overwrite a previously written `u16` at `offset`.
    pub fn patch_u16(&mut self, offset: usize, value: u16) {
        self.data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    /// Write a null-terminated UTF-16LE string without padding.
    pub fn write_string<S: AsRef<str>>(&mut self, string: S) {
        self.data.extend(string_to_u16(string));
    }

    /// Write a null-terminated UTF-16LE string followed by padding to a DWORD boundary.
    pub fn write_aligned_string<S: AsRef<str>>(&mut self, string: S) {
        self.write_string(string);
        self.align(4);
    }

    /// Write a DWORD aligned atom-or-string field.
    pub fn write_atom_or_string(&mut self, value: &AtomOrString) {
        match value {
            AtomOrString::Atom(atom) => {
                self.u16(ATOM_MARKER);
                self.u16(*atom);
                self.align(4);
            }
            AtomOrString::Text(text) => self.write_aligned_string(text),
        }
    }
}
