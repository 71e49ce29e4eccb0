//! Errors specific to decoding and encoding resource data.

use alloc::string::String;

/// Errors that can occur when decoding resource data.
///
/// Every variant names the field that was being read and the offset of the read,
/// relative to the start of the decoded payload.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum DecodeError {
    /// The buffer ended in the middle of a field.
    #[cfg_attr(feature = "std", error("truncated {field} at offset {offset:#x}"))]
    Truncated { field: &'static str, offset: usize },
    /// A field was present but its content is invalid.
    #[cfg_attr(feature = "std", error("malformed {field} at offset {offset:#x}: {reason}"))]
    MalformedField {
        field:  &'static str,
        offset: usize,
        reason: String,
    },
    /// A declared length exceeds the remaining buffer.
    #[cfg_attr(
        feature = "std",
        error("{field} at offset {offset:#x} declares {declared} bytes but only {available} remain")
    )]
    OutOfRange {
        field:     &'static str,
        offset:    usize,
        declared:  usize,
        available: usize,
    },
}
impl DecodeError {
    /// Returns the name of the field that was being read.
    pub fn field(&self) -> &'static str {
        match self {
            DecodeError::Truncated { field, .. } => field,
            DecodeError::MalformedField { field, .. } => field,
            DecodeError::OutOfRange { field, .. } => field,
        }
    }

    /// Returns the offset at which the failing read started.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::Truncated { offset, .. } => *offset,
            DecodeError::MalformedField { offset, .. } => *offset,
            DecodeError::OutOfRange { offset, .. } => *offset,
        }
    }
}

/// Errors that can occur when encoding resource data.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum EncodeError {
    #[cfg_attr(feature = "std", error("string id {id} is outside of block {block}"))]
    StringIdOutOfBlock { id: u16, block: u16 },
    #[cfg_attr(feature = "std", error("string id {0} appears more than once"))]
    DuplicateStringId(u16),
    #[cfg_attr(feature = "std", error("invalid string table block number: {0}"))]
    InvalidBlockNumber(u16),
    #[cfg_attr(feature = "std", error("{field} value {value} does not fit the target field"))]
    ValueOutOfRange { field: &'static str, value: u64 },
    #[cfg_attr(feature = "std", error("dialog style requests a font but none is set"))]
    MissingFont,
    #[cfg_attr(feature = "std", error("popup \"{0}\" has no children"))]
    EmptyPopup(String),
    #[cfg_attr(feature = "std", error("unknown accelerator key: {0}"))]
    UnknownKey(String),
    #[cfg_attr(feature = "std", error("unknown accelerator option: {0}"))]
    UnknownOption(String),
}

/// Result of a best-effort decode.
///
/// Decoding stops at the first failure and keeps everything assembled up to that point.
/// A partial result carries the error that stopped it.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Decoded<T> {
    pub value: T,
    pub error: Option<DecodeError>,
}
impl<T> Decoded<T> {
    /// A fully decoded value.
    pub fn complete(value: T) -> Self { Self { value, error: None } }

    /// A partially decoded value and the error that stopped decoding.
    pub fn partial(value: T, error: DecodeError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    /// Returns `true` if decoding stopped before the end of the structure.
    pub fn is_partial(&self) -> bool { self.error.is_some() }

    /// Discards the partial value if decoding failed.
    pub fn into_result(self) -> Result<T, DecodeError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            error: self.error,
        }
    }

    pub(crate) fn from_parts(value: T, result: Result<(), DecodeError>) -> Self {
        Self {
            value,
            error: result.err(),
        }
    }
}
