//! Resource data types.
//!
//! These types are a one-to-one mapping of the fixed-size parts of the resource formats described in
//! <https://learn.microsoft.com/en-us/windows/win32/menurc/resource-file-formats>.
//! Variable-length parts such as strings and child lists are handled by the codecs.

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::constants::*;

#[repr(C, packed(4))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct VersionU32 {
    pub major: u32,
    pub minor: u32,
}

/// `VS_FIXEDFILEINFO`.
/// Versions are stored as a most significant and a least significant `u32`, each holding two parts.
#[repr(C, packed(4))]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable)]
pub struct FixedFileInfo {
    pub signature:       u32,
    pub struct_version:  u32,
    pub file_version:    VersionU32,
    pub product_version: VersionU32,
    pub file_flags_mask: u32,
    pub file_flags:      u32,
    pub file_os:         u32,
    pub file_type:       u32,
    pub file_subtype:    u32,
    pub file_date_ms:    u32,
    pub file_date_ls:    u32,
}
impl Default for FixedFileInfo {
    fn default() -> Self {
        Self {
            signature:       VS_FIXEDFILEINFO_SIGNATURE,
            struct_version:  VS_FIXEDFILEINFO_VERSION,
            file_version:    VersionU32 { major: 0x00010000, minor: 0 },
            product_version: VersionU32 { major: 0x00010000, minor: 0 },
            file_flags_mask: 0x0000003f,
            file_flags:      0x00000000,
            file_os:         VOS_NT_WINDOWS32,
            file_type:       VFT_APP,
            file_subtype:    0x00000000,
            file_date_ms:    0x00000000,
            file_date_ls:    0x00000000,
        }
    }
}

#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct VersionHeader {
    pub length:       u16,
    pub value_length: u16,
    pub type_:        u16,
}

/// Leading size fields of a `RESOURCEHEADER`.
#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct ResHeaderPrefix {
    pub data_size:   u32,
    pub header_size: u32,
}

/// Fields of a `RESOURCEHEADER` following the type and name.
#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct ResHeaderTail {
    pub data_version:    u32,
    pub memory_flags:    u16,
    pub language_id:     u16,
    pub version:         u32,
    pub characteristics: u32,
}

#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct DialogTemplateHeader {
    pub style:           u32,
    pub extended_style:  u32,
    pub number_of_items: u16,
    pub x:               i16,
    pub y:               i16,
    pub width:           i16,
    pub height:          i16,
}

/// `DLGTEMPLATEEX` up to the menu field.
#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct DialogTemplateExHeader {
    pub version:         u16,
    pub signature:       u16,
    pub help_id:         u32,
    pub extended_style:  u32,
    pub style:           u32,
    pub number_of_items: u16,
    pub x:               i16,
    pub y:               i16,
    pub width:           i16,
    pub height:          i16,
}

#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct DialogItemHeader {
    pub style:          u32,
    pub extended_style: u32,
    pub x:              i16,
    pub y:              i16,
    pub width:          i16,
    pub height:         i16,
    pub id:             u16,
}

#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct DialogItemExHeader {
    pub help_id:        u32,
    pub extended_style: u32,
    pub style:          u32,
    pub x:              i16,
    pub y:              i16,
    pub width:          i16,
    pub height:         i16,
    pub id:             u32,
}

#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct MenuHeader {
    pub version:     u16,
    pub header_size: u16,
}

/// `MENUEX_TEMPLATE_ITEM` without its text and the trailing help id of plain items.
#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct MenuExItemHeader {
    pub type_:    u32,
    pub state:    u32,
    pub id:       u32,
    pub res_info: u16,
}

#[repr(C, packed(2))]
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, FromBytes, IntoBytes, Immutable, Default,
)]
pub struct AcceleratorTableEntry {
    pub flags:    u16,
    pub key:      u16,
    pub command:  u16,
    pub reserved: u16,
}
