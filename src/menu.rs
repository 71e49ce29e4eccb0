//! Menu templates.
//!
//! Two independent layouts exist. Standard menus (`MENUITEMTEMPLATE`) store a `u16` flags word per
//! item and terminate every sibling list with [`MF_END`]. A separator is a bare flags word with
//! [`MF_SEPARATOR`] set. Extended menus (`MENUEX_TEMPLATE_ITEM`) store separate type and state words,
//! DWORD align every item and terminate sibling lists with [`MENU_EX_LAST`] in the `res_info` word.
//! Plain extended items end with a help id, popups are directly followed by their children.
//!
//! Termination bits are a property of the position of a node in its list and are never stored in the
//! decoded tree. They are recomputed on every encode.
//!
//! See <https://learn.microsoft.com/en-us/windows/win32/menurc/menu-template-header> and
//! <https://learn.microsoft.com/en-us/windows/win32/menurc/menuex-template-header> for more information.

use alloc::{string::String, vec::Vec};

use log::{debug, trace, warn};

use crate::{constants::*, errors::*, types::*, util::*};

/// Nesting limit for popups.
const MAX_DEPTH: usize = 64;

/// Type, state and help id of an extended menu node.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ExtendedMenuFlags {
    /// `MFT_*` flags.
    pub type_:   u32,
    /// `MFS_*` flags.
    pub state:   u32,
    /// Help id, only stored for plain items.
    pub help_id: u32,
}

/// Menu node.
///
/// `F` is the flags representation of the dialect, `u16` `MF_*` flags for standard menus and
/// [`ExtendedMenuFlags`] for extended menus.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MenuNode<F> {
    Item {
        text:  String,
        id:    u32,
        flags: F,
    },
    Popup {
        text:     String,
        /// Only stored in extended menus.
        id:       u32,
        flags:    F,
        children: Vec<MenuNode<F>>,
    },
    Separator,
}

/// Menu template in one of the two dialects.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MenuTemplate {
    Standard(Vec<MenuNode<u16>>),
    Extended {
        help_id: u32,
        items:   Vec<MenuNode<ExtendedMenuFlags>>,
    },
}
impl Default for MenuTemplate {
    fn default() -> Self { MenuTemplate::Standard(Vec::new()) }
}
impl MenuTemplate {
    /// Returns `true` for extended menus.
    pub fn is_extended(&self) -> bool { matches!(self, MenuTemplate::Extended { .. }) }
}

/// Decode a menu template.
///
/// The dialect is detected from the header: version 1 with an item offset of 4 is an extended menu,
/// anything else is a standard menu.
pub fn decode(payload: &[u8]) -> Decoded<MenuTemplate> {
    let mut reader = Reader::new(payload);
    let header = match reader.read::<MenuHeader>("menu header") {
        Ok(header) => header,
        Err(error) => return Decoded::partial(MenuTemplate::default(), error),
    };
    debug!("menu header: {:#x?}", header);

    if header.version == MENU_EX_VERSION && header.header_size == MENU_EX_OFFSET {
        let mut items = Vec::new();
        let mut help_id = 0;
        let result = reader.u32("menu help id").and_then(|value| {
            help_id = value;
            reader.seek(4 + header.header_size as usize);
            decode_extended_items(&mut reader, &mut items, 0)
        });
        if let Err(error) = &result {
            warn!("extended menu decoded partially: {:?}", error);
        }
        Decoded::from_parts(MenuTemplate::Extended { help_id, items }, result)
    } else {
        let mut items = Vec::new();
        let result = reader
            .bytes(header.header_size as usize, "menu header")
            .and_then(|_| decode_standard_items(&mut reader, &mut items, 0));
        if let Err(error) = &result {
            warn!("menu decoded partially: {:?}", error);
        }
        Decoded::from_parts(MenuTemplate::Standard(items), result)
    }
}

fn check_depth(reader: &Reader, depth: usize) -> Result<(), DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::MalformedField {
            field:  "menu popup",
            offset: reader.position(),
            reason: "popups nested too deeply".into(),
        });
    }
    Ok(())
}

fn decode_standard_items(
    reader: &mut Reader, items: &mut Vec<MenuNode<u16>>, depth: usize,
) -> Result<(), DecodeError> {
    check_depth(reader, depth)?;
    loop {
        if depth == 0 && items.is_empty() && reader.is_at_end() {
            return Ok(());
        }
        let flags = reader.u16("menu item flags")?;
        let last = flags & MF_END != 0;

        if flags & MF_SEPARATOR != 0 {
            trace!("{} separator ({:#x})", "--".repeat(depth + 1), flags);
            items.push(MenuNode::Separator);
        } else if flags & MF_POPUP != 0 {
            let text = reader.read_string("menu item text")?;
            trace!("{} popup {:?} ({:#x})", "--".repeat(depth + 1), text, flags);
            items.push(MenuNode::Popup {
                text,
                id: 0,
                flags: flags & !(MF_END | MF_POPUP),
                children: Vec::new(),
            });
            if let Some(MenuNode::Popup { children, .. }) = items.last_mut() {
                decode_standard_items(reader, children, depth + 1)?;
            }
        } else {
            let id = reader.u16("menu item id")?;
            let text = reader.read_string("menu item text")?;
            let flags = flags & !MF_END;
            trace!("{} item {:?} {} ({:#x})", "--".repeat(depth + 1), text, id, flags);
            items.push(MenuNode::Item {
                text,
                id: id as u32,
                flags,
            });
        }

        if last {
            return Ok(());
        }
    }
}

fn decode_extended_items(
    reader: &mut Reader, items: &mut Vec<MenuNode<ExtendedMenuFlags>>, depth: usize,
) -> Result<(), DecodeError> {
    check_depth(reader, depth)?;
    loop {
        reader.align(4);
        if depth == 0 && items.is_empty() && reader.is_at_end() {
            return Ok(());
        }
        let header = reader.read::<MenuExItemHeader>("menu item header")?;
        let text = reader.read_aligned_string("menu item text")?;
        trace!("{} {:#x?} {:?}", "--".repeat(depth + 1), header, text);
        let last = header.res_info & MENU_EX_LAST != 0;

        if header.type_ & MF_POPUP as u32 != 0 || header.res_info & MENU_EX_POPUP != 0 {
            items.push(MenuNode::Popup {
                text,
                id: header.id,
                flags: ExtendedMenuFlags {
                    type_:   header.type_ & !(MF_POPUP as u32),
                    state:   header.state,
                    help_id: 0,
                },
                children: Vec::new(),
            });
            if let Some(MenuNode::Popup { children, .. }) = items.last_mut() {
                decode_extended_items(reader, children, depth + 1)?;
            }
        } else if header.type_ & MFT_SEPARATOR != 0 {
            items.push(MenuNode::Separator);
        } else {
            let help_id = reader.u32("menu item help id")?;
            items.push(MenuNode::Item {
                text,
                id: header.id,
                flags: ExtendedMenuFlags {
                    type_: header.type_,
                    state: header.state,
                    help_id,
                },
            });
        }

        if last {
            return Ok(());
        }
    }
}

/// Encode a menu template in its dialect.
///
/// # Returns
/// Returns an error if a popup has no children, since an empty list cannot be terminated, or if a
/// standard menu item id does not fit a `u16`.
pub fn encode(template: &MenuTemplate) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    match template {
        MenuTemplate::Standard(items) => {
            writer.write(&MenuHeader {
                version:     0,
                header_size: 0,
            });
            encode_standard_items(&mut writer, items)?;
        }
        MenuTemplate::Extended { help_id, items } => {
            writer.write(&MenuHeader {
                version:     MENU_EX_VERSION,
                header_size: MENU_EX_OFFSET,
            });
            writer.u32(*help_id);
            encode_extended_items(&mut writer, items)?;
        }
    }
    Ok(writer.into_inner())
}

fn encode_standard_items(writer: &mut Writer, items: &[MenuNode<u16>]) -> Result<(), EncodeError> {
    for (index, item) in items.iter().enumerate() {
        let end = if index + 1 == items.len() { MF_END } else { 0 };
        match item {
            MenuNode::Item { text, id, flags } => {
                let id = u16::try_from(*id).map_err(|_| EncodeError::ValueOutOfRange {
                    field: "menu item id",
                    value: *id as u64,
                })?;
                writer.u16(flags & !(MF_END | MF_POPUP | MF_SEPARATOR) | end);
                writer.u16(id);
                writer.write_string(text);
            }
            MenuNode::Popup {
                text,
                flags,
                children,
                ..
            } => {
                if children.is_empty() {
                    return Err(EncodeError::EmptyPopup(text.clone()));
                }
                writer.u16(flags & !(MF_END | MF_SEPARATOR) | MF_POPUP | end);
                writer.write_string(text);
                encode_standard_items(writer, children)?;
            }
            MenuNode::Separator => writer.u16(MF_SEPARATOR | end),
        }
    }
    Ok(())
}

fn encode_extended_items(
    writer: &mut Writer, items: &[MenuNode<ExtendedMenuFlags>],
) -> Result<(), EncodeError> {
    for (index, item) in items.iter().enumerate() {
        writer.align(4);
        let last = if index + 1 == items.len() { MENU_EX_LAST } else { 0 };
        match item {
            MenuNode::Item { text, id, flags } => {
                writer.write(&MenuExItemHeader {
                    type_:    flags.type_ & !(MF_POPUP as u32 | MFT_SEPARATOR),
                    state:    flags.state,
                    id:       *id,
                    res_info: last,
                });
                writer.write_aligned_string(text);
                writer.u32(flags.help_id);
            }
            MenuNode::Popup {
                text,
                id,
                flags,
                children,
            } => {
                if children.is_empty() {
                    return Err(EncodeError::EmptyPopup(text.clone()));
                }
                writer.write(&MenuExItemHeader {
                    type_:    flags.type_ & !MFT_SEPARATOR | MF_POPUP as u32,
                    state:    flags.state,
                    id:       *id,
                    res_info: last | MENU_EX_POPUP,
                });
                writer.write_aligned_string(text);
                encode_extended_items(writer, children)?;
            }
            MenuNode::Separator => {
                writer.write(&MenuExItemHeader {
                    type_:    MFT_SEPARATOR,
                    state:    0,
                    id:       0,
                    res_info: last,
                });
                writer.write_aligned_string("");
            }
        }
    }
    Ok(())
}
