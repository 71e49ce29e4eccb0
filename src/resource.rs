//! Resource identifiers, records and typed resource dispatch.
//!
//! A [`ResourceSet`] holds the raw records of a `.RES` file or of a portable executable's resource
//! directory, keyed by type, name and language. Payloads stay raw until they are decoded with
//! [`Resource::decode`], so a resource that fails to decode never affects its siblings.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt, iter, ops::Deref};

use ahash::RandomState;
use debug_ignore::DebugIgnore;
use indexmap::IndexMap;
use log::{debug, error, trace};

use crate::{
    accelerator::{self, AcceleratorTable},
    constants::*,
    dialog::{self, DialogTemplate},
    errors::*,
    menu::{self, MenuTemplate},
    res,
    string_table::{self, StringTableBlock},
    version::{self, VersionInfo},
};

/// Resource type or name.
///
/// Ordinals and strings are distinct: `Atom(101)` never equals `Text("101")`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AtomOrString {
    Atom(u16),
    Text(String),
}
impl Default for AtomOrString {
    fn default() -> Self { AtomOrString::Text(String::new()) }
}
impl AtomOrString {
    /// Returns the ordinal, if any.
    pub fn atom(&self) -> Option<u16> {
        match self {
            AtomOrString::Atom(atom) => Some(*atom),
            AtomOrString::Text(_) => None,
        }
    }

    /// Returns the string, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            AtomOrString::Atom(_) => None,
            AtomOrString::Text(text) => Some(text),
        }
    }

    pub fn is_atom(&self) -> bool { matches!(self, AtomOrString::Atom(_)) }

    /// Returns `true` for the empty string.
    pub fn is_empty(&self) -> bool { matches!(self, AtomOrString::Text(text) if text.is_empty()) }

    /// Convert a decimal string such as `"101"` or `"#101"` into an ordinal.
    /// Anything else is returned unchanged.
    pub fn parse_numeric(&self) -> Self {
        match self {
            AtomOrString::Text(text) => text
                .strip_prefix('#')
                .unwrap_or(text)
                .parse::<u16>()
                .map(AtomOrString::Atom)
                .unwrap_or_else(|_| self.clone()),
            AtomOrString::Atom(_) => self.clone(),
        }
    }
}
impl fmt::Display for AtomOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomOrString::Atom(atom) => write!(f, "{}", atom),
            AtomOrString::Text(text) => f.write_str(text),
        }
    }
}
impl From<u16> for AtomOrString {
    fn from(atom: u16) -> Self { AtomOrString::Atom(atom) }
}
impl From<&str> for AtomOrString {
    fn from(text: &str) -> Self { AtomOrString::Text(text.to_string()) }
}
impl From<String> for AtomOrString {
    fn from(text: String) -> Self { AtomOrString::Text(text) }
}

/// Build a language id from a primary language and a sublanguage.
pub fn make_lang_id(primary: u16, sub: u16) -> u16 { (sub << 10) | (primary & 0x3ff) }

/// Returns the primary language of a language id.
pub fn primary_lang_id(language: u16) -> u16 { language & 0x3ff }

/// Returns the sublanguage of a language id.
pub fn sub_lang_id(language: u16) -> u16 { language >> 10 }

/// Unique identity of a resource.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ResourceKey {
    pub type_:    AtomOrString,
    pub name:     AtomOrString,
    pub language: u16,
}
impl ResourceKey {
    pub fn new<T: Into<AtomOrString>, N: Into<AtomOrString>>(type_: T, name: N, language: u16) -> Self {
        Self {
            type_: type_.into(),
            name: name.into(),
            language,
        }
    }

    /// Returns the script name of a predefined resource type.
    pub fn type_name(&self) -> Option<&'static str> {
        let atom = self.type_.atom()?;
        RESOURCE_TYPE_NAMES.iter().find(|(id, _)| *id == atom).map(|(_, name)| *name)
    }
}
impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(type_name) => write!(f, "{} {} ({:#06x})", type_name, self.name, self.language),
            None => write!(f, "{} {} ({:#06x})", self.type_, self.name, self.language),
        }
    }
}

/// A raw resource with its header metadata.
///
/// The metadata fields are carried through unchanged and have no meaning to the codecs.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ResRecord {
    pub key:             ResourceKey,
    pub data_version:    u32,
    pub memory_flags:    u16,
    pub version:         u32,
    pub characteristics: u32,
    pub payload:         DebugIgnore<Vec<u8>>,
}
impl ResRecord {
    pub fn new(key: ResourceKey, payload: Vec<u8>) -> Self {
        Self {
            key,
            memory_flags: MEMORY_FLAGS_DEFAULT,
            payload: payload.into(),
            ..Default::default()
        }
    }

    /// Returns the empty record that starts every `.RES` file.
    pub fn sentinel() -> Self {
        Self {
            key: ResourceKey::new(0u16, 0u16, 0),
            ..Default::default()
        }
    }

    /// Returns `true` if this is the empty record that starts every `.RES` file.
    pub fn is_sentinel(&self) -> bool {
        self.payload.is_empty()
            && self.key.type_ == AtomOrString::Atom(0)
            && self.key.name == AtomOrString::Atom(0)
    }

    /// Returns the raw payload.
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Set the raw payload.
    pub fn set_payload(&mut self, payload: Vec<u8>) { self.payload = payload.into(); }

    /// Decode the payload according to the resource type.
    pub fn decode(&self) -> Decoded<Resource> { Resource::decode(&self.key, &self.payload) }
}
impl From<(AtomOrString, AtomOrString, u16, Vec<u8>)> for ResRecord {
    fn from((type_, name, language, payload): (AtomOrString, AtomOrString, u16, Vec<u8>)) -> Self {
        Self::new(
            ResourceKey {
                type_,
                name,
                language,
            },
            payload,
        )
    }
}

/// Mutable access to a record stored in a [`ResourceSet`].
///
/// The key is read-only, it is the position of the record in the set. Use
/// [`ResourceSet::remove`] and [`ResourceSet::insert`] to move a record to a different key.
#[derive(Debug)]
pub struct ResRecordMut<'a>(&'a mut ResRecord);
impl Deref for ResRecordMut<'_> {
    type Target = ResRecord;

    fn deref(&self) -> &ResRecord { self.0 }
}
impl ResRecordMut<'_> {
    pub fn set_payload(&mut self, payload: Vec<u8>) { self.0.set_payload(payload); }

    /// Encode a resource into the payload, keeping the metadata.
    pub fn set_resource(&mut self, resource: &Resource) -> Result<(), EncodeError> {
        self.0.set_payload(resource.encode()?);
        Ok(())
    }

    pub fn set_data_version(&mut self, data_version: u32) { self.0.data_version = data_version; }

    pub fn set_memory_flags(&mut self, memory_flags: u16) { self.0.memory_flags = memory_flags; }

    pub fn set_version(&mut self, version: u32) { self.0.version = version; }

    pub fn set_characteristics(&mut self, characteristics: u32) {
        self.0.characteristics = characteristics;
    }
}

/// A decoded resource.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Resource {
    Dialog(DialogTemplate),
    Menu(MenuTemplate),
    StringTable(StringTableBlock),
    Accelerators(AcceleratorTable),
    Version(VersionInfo),
    /// Any resource type without a structured representation.
    Raw(Vec<u8>),
}
impl Resource {
    /// Decode a payload according to the type of its key.
    ///
    /// The block number of a string table is the ordinal name of its key.
    pub fn decode(key: &ResourceKey, payload: &[u8]) -> Decoded<Self> {
        let type_ = match key.type_ {
            AtomOrString::Atom(type_) => type_,
            AtomOrString::Text(_) => return Decoded::complete(Resource::Raw(payload.to_vec())),
        };
        trace!("decoding {} ({} bytes)", key, payload.len());
        match type_ {
            RT_DIALOG => dialog::decode(payload).map(Resource::Dialog),
            RT_MENU => menu::decode(payload).map(Resource::Menu),
            RT_ACCELERATOR => accelerator::decode(payload).map(Resource::Accelerators),
            RT_VERSION => version::decode(payload).map(Resource::Version),
            RT_STRING => match &key.name {
                AtomOrString::Atom(block) if string_table::is_valid_block_number(*block) => {
                    string_table::decode(payload, *block).map(Resource::StringTable)
                }
                name => Decoded::partial(
                    Resource::Raw(payload.to_vec()),
                    DecodeError::MalformedField {
                        field:  "string table block number",
                        offset: 0,
                        reason: format!("{:?} is not a valid block number", name),
                    },
                ),
            },
            _ => Decoded::complete(Resource::Raw(payload.to_vec())),
        }
    }

    /// Encode the resource into its payload.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Resource::Dialog(template) => dialog::encode(template),
            Resource::Menu(template) => menu::encode(template),
            Resource::StringTable(block) => string_table::encode(block),
            Resource::Accelerators(table) => Ok(accelerator::encode(table)),
            Resource::Version(info) => version::encode(info),
            Resource::Raw(data) => Ok(data.clone()),
        }
    }

    /// Returns the resource type the resource is stored as, `None` for raw resources.
    pub fn type_id(&self) -> Option<u16> {
        match self {
            Resource::Dialog(_) => Some(RT_DIALOG),
            Resource::Menu(_) => Some(RT_MENU),
            Resource::StringTable(_) => Some(RT_STRING),
            Resource::Accelerators(_) => Some(RT_ACCELERATOR),
            Resource::Version(_) => Some(RT_VERSION),
            Resource::Raw(_) => None,
        }
    }
}

/// Resources keyed by type, name and language, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    records: IndexMap<ResourceKey, ResRecord, RandomState>,
}
impl ResourceSet {
    pub fn new() -> Self { Self::default() }

    /// Build a set from records, for example resources read from a portable executable.
    /// Later records replace earlier records with the same key.
    pub fn from_records<R: Into<ResRecord>, I: IntoIterator<Item = R>>(records: I) -> Self {
        let mut set = Self::new();
        for record in records {
            if let Some(replaced) = set.insert(record.into()) {
                debug!("duplicate resource {} replaced", replaced.key);
            }
        }
        set
    }

    /// Parse a `.RES` file.
    /// The leading empty record is not part of the set.
    pub fn from_res(data: &[u8]) -> Decoded<Self> {
        res::decode(data).map(|records| {
            Self::from_records(records.into_iter().filter(|record| !record.is_sentinel()))
        })
    }

    /// Build a `.RES` file, starting with the empty record.
    pub fn to_res(&self) -> Result<Vec<u8>, EncodeError> {
        let sentinel = ResRecord::sentinel();
        res::encode(iter::once(&sentinel).chain(self.records.values()))
    }

    /// Insert a record.
    /// If a record with the same key already exists, it will be replaced.
    /// # Returns
    /// The replaced record.
    pub fn insert(&mut self, record: ResRecord) -> Option<ResRecord> {
        self.records.insert(record.key.clone(), record)
    }

    /// Encode a resource and store it under the given key.
    /// The metadata of an existing record with the same key is kept.
    /// # Returns
    /// The previous payload, or an error if the resource could not be encoded.
    pub fn insert_resource(
        &mut self, key: ResourceKey, resource: &Resource,
    ) -> Result<Option<Vec<u8>>, EncodeError> {
        let payload = resource.encode()?;
        match self.records.get_mut(&key) {
            Some(record) => {
                let previous = core::mem::replace(&mut record.payload, payload.into());
                Ok(Some(previous.0))
            }
            None => {
                self.records.insert(key.clone(), ResRecord::new(key, payload));
                Ok(None)
            }
        }
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&ResRecord> { self.records.get(key) }

    pub fn get_mut(&mut self, key: &ResourceKey) -> Option<ResRecordMut<'_>> {
        self.records.get_mut(key).map(ResRecordMut)
    }

    /// Remove a record, keeping the order of the remaining records.
    /// # Returns
    /// The removed record.
    pub fn remove(&mut self, key: &ResourceKey) -> Option<ResRecord> {
        self.records.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResourceKey> { self.records.keys() }

    pub fn records(&self) -> impl Iterator<Item = &ResRecord> { self.records.values() }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Decode every record independently.
    ///
    /// A record that fails to decode is reported with its partial value and error next to its key
    /// and does not affect the other records.
    pub fn decode_all(&self) -> Vec<(&ResourceKey, Decoded<Resource>)> {
        self.records
            .iter()
            .map(|(key, record)| {
                let decoded = Resource::decode(key, &record.payload);
                if let Some(error) = &decoded.error {
                    error!("failed to decode resource {}: {:?}", key, error);
                }
                (key, decoded)
            })
            .collect()
    }
}
