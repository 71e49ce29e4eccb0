//! Accelerator tables.
//!
//! An accelerator table is an array of 8 byte `ACCELTABLEENTRY` records. The last record is marked
//! by [`ACCEL_LAST_ENTRY`] in the high byte of its flags word, while the `F*` flags take the low
//! byte. The marker is never stored in [`Accelerator::flags`].
//! See <https://learn.microsoft.com/en-us/windows/win32/menurc/acceltableentry> for more information.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use log::{trace, warn};

use crate::{constants::*, errors::*, types::*, util::*};

/// Modifier flags that can be set on an accelerator, in display order.
const MODIFIERS: [(u8, &str); 4] = [
    (FSHIFT, "SHIFT"),
    (FCONTROL, "CONTROL"),
    (FALT, "ALT"),
    (FNOINVERT, "NOINVERT"),
];

/// A single accelerator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Accelerator {
    /// `F*` flags without the last entry marker.
    pub flags:      u8,
    /// Virtual key code if [`FVIRTKEY`] is set, character code otherwise.
    pub key_code:   u16,
    pub command_id: u16,
}
impl Accelerator {
    /// Build an accelerator from its textual key and options.
    ///
    /// The key is either a `VK_*` name, a `^X` control character, a single character or a
    /// decimal key code. `VK_*` names and `^X` imply `VIRTKEY`, `^X` also implies `CONTROL`.
    /// Options are any of `VIRTKEY`, `ASCII`, `SHIFT`, `CONTROL`, `ALT` and `NOINVERT`.
    ///
    /// # Returns
    /// Returns an error if the key or an option is not recognized.
    pub fn from_text<S: AsRef<str>>(
        key: &str, options: &[S], command_id: u16,
    ) -> Result<Self, EncodeError> {
        let mut flags = 0;
        let mut ascii = false;
        for option in options {
            let option = option.as_ref().trim();
            match option.to_ascii_uppercase().as_str() {
                "VIRTKEY" => flags |= FVIRTKEY,
                "ASCII" => ascii = true,
                "SHIFT" => flags |= FSHIFT,
                "CONTROL" => flags |= FCONTROL,
                "ALT" => flags |= FALT,
                "NOINVERT" => flags |= FNOINVERT,
                _ => return Err(EncodeError::UnknownOption(option.to_string())),
            }
        }

        let named = key.get(..3).is_some_and(|prefix| prefix.eq_ignore_ascii_case("VK_"));
        let mut chars = key.chars();
        let key_code = match (chars.next(), chars.next(), chars.next()) {
            _ if named => {
                flags |= FVIRTKEY;
                VIRTUAL_KEYS
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))
                    .map(|(_, code)| *code)
                    .or_else(|| single_key_code(&key[3..]))
                    .ok_or_else(|| EncodeError::UnknownKey(key.to_string()))?
            }
            (Some('^'), Some(letter), None) if letter.is_ascii_alphabetic() => {
                flags |= FVIRTKEY | FCONTROL;
                letter.to_ascii_uppercase() as u16
            }
            (Some(character), None, None) => {
                if flags & FVIRTKEY != 0 {
                    character.to_ascii_uppercase() as u16
                } else {
                    let mut units = [0; 2];
                    match character.encode_utf16(&mut units) {
                        [unit] => *unit,
                        _ => return Err(EncodeError::UnknownKey(key.to_string())),
                    }
                }
            }
            _ => key.parse::<u16>().map_err(|_| EncodeError::UnknownKey(key.to_string()))?,
        };
        if ascii && flags & FVIRTKEY != 0 && !named && !key.starts_with('^') {
            flags &= !FVIRTKEY;
        }

        Ok(Self {
            flags,
            key_code,
            command_id,
        })
    }

    /// Returns `true` if the key code is a virtual key code.
    pub fn is_virtkey(&self) -> bool { self.flags & FVIRTKEY != 0 }

    /// Returns the textual form of the key.
    /// Virtual keys are named by their `VK_*` name or their character for letters and digits,
    /// control characters are written as `^X`.
    pub fn key_text(&self) -> String {
        if self.is_virtkey() {
            if let Some((name, _)) = VIRTUAL_KEYS.iter().find(|(_, code)| *code == self.key_code) {
                return name.to_string();
            }
            return match char::from_u32(self.key_code as u32) {
                Some(character) if character.is_ascii_alphanumeric() => character.to_string(),
                _ => format!("{}", self.key_code),
            };
        }
        match self.key_code {
            1..=26 => format!("^{}", (b'A' + self.key_code as u8 - 1) as char),
            code => char::from_u32(code as u32)
                .filter(|character| !character.is_control())
                .map(|character| character.to_string())
                .unwrap_or_else(|| format!("{}", code)),
        }
    }

    /// Returns the names of the set flags, starting with `VIRTKEY` or `ASCII`.
    pub fn flag_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(5);
        names.push(if self.is_virtkey() { "VIRTKEY" } else { "ASCII" });
        names.extend(
            MODIFIERS
                .iter()
                .filter(|(flag, _)| self.flags & flag != 0)
                .map(|(_, name)| *name),
        );
        names
    }
}

fn single_key_code(key: &str) -> Option<u16> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(character), None) if character.is_ascii_alphanumeric() => {
            Some(character.to_ascii_uppercase() as u16)
        }
        _ => None,
    }
}

/// An ordered accelerator table.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct AcceleratorTable(pub Vec<Accelerator>);
impl AcceleratorTable {
    pub fn entries(&self) -> &[Accelerator] { &self.0 }

    pub fn entries_mut(&mut self) -> &mut Vec<Accelerator> { &mut self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// Decode an accelerator table.
///
/// Reading stops after the entry carrying the last entry marker, or at the end of the payload.
pub fn decode(payload: &[u8]) -> Decoded<AcceleratorTable> {
    let mut reader = Reader::new(payload);
    let mut table = AcceleratorTable::default();
    while !reader.is_at_end() {
        let entry = match reader.read::<AcceleratorTableEntry>("accelerator entry") {
            Ok(entry) => entry,
            Err(error) => {
                warn!("accelerator table ends with a partial entry: {:?}", error);
                return Decoded::partial(table, error);
            }
        };
        trace!("{:#x?}", entry);
        // some writers set the marker in the low byte
        let last = entry.flags & (ACCEL_LAST_ENTRY as u16 | (ACCEL_LAST_ENTRY as u16) << 8) != 0;
        table.0.push(Accelerator {
            flags:      (entry.flags as u8) & !ACCEL_LAST_ENTRY,
            key_code:   entry.key,
            command_id: entry.command,
        });
        if last {
            if !reader.is_at_end() {
                trace!("ignoring {} bytes after last accelerator", reader.remaining());
            }
            break;
        }
    }
    Decoded::complete(table)
}

/// Encode an accelerator table.
pub fn encode(table: &AcceleratorTable) -> Vec<u8> {
    let mut writer = Writer::new();
    let count = table.0.len();
    for (index, accelerator) in table.0.iter().enumerate() {
        let mut flags = (accelerator.flags & !ACCEL_LAST_ENTRY) as u16;
        if index + 1 == count {
            flags |= (ACCEL_LAST_ENTRY as u16) << 8;
        }
        writer.write(&AcceleratorTableEntry {
            flags,
            key:      accelerator.key_code,
            command:  accelerator.command_id,
            reserved: 0,
        });
    }
    writer.into_inner()
}
