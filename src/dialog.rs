//! Dialog box templates.
//!
//! Supports both the standard `DLGTEMPLATE` and the extended `DLGTEMPLATEEX` layout.
//! The header is followed by the menu, class and caption arrays and the optional font name, each
//! padded to a DWORD boundary relative to the start of the template. Every item starts on a DWORD
//! boundary and its class and text arrays are padded the same way.
//!
//! See <https://learn.microsoft.com/en-us/windows/win32/dlgbox/about-dialog-boxes#templates-in-memory>
//! for more information.

use alloc::{string::String, vec::Vec};

use log::{debug, trace, warn};

use crate::{constants::*, errors::*, resource::AtomOrString, types::*, util::*};

/// Marker for extended creation data lengths that do not fit a `u16`.
const CREATION_DATA_EXTENDED_LENGTH: u16 = 0xFFFF;

/// Dialog template layout.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub enum DialogKind {
    /// `DLGTEMPLATE` and `DLGITEMTEMPLATE`.
    #[default]
    Standard,
    /// `DLGTEMPLATEEX` and `DLGITEMTEMPLATEEX`.
    Extended,
}

/// Dialog font, present if the dialog style contains [`DS_SETFONT`] or [`DS_SHELLFONT`].
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct DialogFont {
    pub point_size: u16,
    /// Only stored in extended templates.
    pub weight:     u16,
    /// Only stored in extended templates.
    pub italic:     u8,
    /// Only stored in extended templates.
    pub charset:    u8,
    pub name:       String,
}

/// Dialog box template.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct DialogTemplate {
    pub kind:     DialogKind,
    /// Only stored in extended templates.
    pub help_id:  u32,
    pub ex_style: u32,
    pub style:    u32,
    pub x:        i16,
    pub y:        i16,
    pub width:    i16,
    pub height:   i16,
    /// Menu resource, an empty string if the dialog has no menu.
    pub menu:     AtomOrString,
    /// Window class, an empty string for the default dialog class.
    pub class:    AtomOrString,
    pub caption:  String,
    pub font:     Option<DialogFont>,
    pub items:    Vec<DialogItem>,
}
impl DialogTemplate {
    /// Returns `true` if the style requests a font.
    pub fn has_font_style(&self) -> bool { self.style & (DS_SETFONT | DS_SHELLFONT) != 0 }
}

/// Dialog control.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct DialogItem {
    /// Only stored in extended templates.
    pub help_id:       u32,
    pub ex_style:      u32,
    pub style:         u32,
    pub x:             i16,
    pub y:             i16,
    pub width:         i16,
    pub height:        i16,
    /// Control id, limited to `u16` in standard templates.
    pub id:            u32,
    pub class:         AtomOrString,
    pub text:          AtomOrString,
    pub creation_data: Vec<u8>,
}

/// Decode a dialog template.
///
/// Decoding is best-effort: if the template is truncated, the returned template contains everything
/// read up to that point and the error names the field that could not be read.
pub fn decode(payload: &[u8]) -> Decoded<DialogTemplate> {
    let mut template = DialogTemplate::default();
    let mut reader = Reader::new(payload);
    let result = decode_template(&mut reader, &mut template);
    if let Err(error) = &result {
        warn!(
            "dialog template decoded partially ({} items read): {:?}",
            template.items.len(),
            error
        );
    }
    Decoded::from_parts(template, result)
}

fn decode_template(reader: &mut Reader, template: &mut DialogTemplate) -> Result<(), DecodeError> {
    let extended = matches!(
        (reader.peek::<u16>(0, "dialog version"), reader.peek::<u16>(2, "dialog signature")),
        (Ok(DIALOG_EX_VERSION), Ok(DIALOG_EX_SIGNATURE))
    );

    let number_of_items = if extended {
        let header = reader.read::<DialogTemplateExHeader>("dialog header")?;
        debug!("extended dialog template: {:#x?}", header);
        template.kind = DialogKind::Extended;
        template.help_id = header.help_id;
        template.ex_style = header.extended_style;
        template.style = header.style;
        template.x = header.x;
        template.y = header.y;
        template.width = header.width;
        template.height = header.height;
        header.number_of_items
    } else {
        let header = reader.read::<DialogTemplateHeader>("dialog header")?;
        debug!("standard dialog template: {:#x?}", header);
        template.kind = DialogKind::Standard;
        template.style = header.style;
        template.ex_style = header.extended_style;
        template.x = header.x;
        template.y = header.y;
        template.width = header.width;
        template.height = header.height;
        header.number_of_items
    };

    template.menu = reader.read_atom_or_string("dialog menu")?;
    template.class = reader.read_atom_or_string("dialog class")?;
    template.caption = reader.read_aligned_string("dialog caption")?;
    trace!(
        "menu: {:?}, class: {:?}, caption: {:?}",
        template.menu,
        template.class,
        template.caption
    );

    if template.has_font_style() {
        let mut font = DialogFont {
            point_size: reader.u16("font point size")?,
            ..Default::default()
        };
        if extended {
            font.weight = reader.u16("font weight")?;
            font.italic = reader.u8("font italic")?;
            font.charset = reader.u8("font charset")?;
        }
        font.name = reader.read_aligned_string("font name")?;
        trace!("{:?}", font);
        template.font = Some(font);
    }

    for index in 0..number_of_items {
        reader.align(4);
        trace!("item {} at {:#x}", index, reader.position());
        let item = decode_item(reader, extended)?;
        template.items.push(item);
    }
    Ok(())
}

fn decode_item(reader: &mut Reader, extended: bool) -> Result<DialogItem, DecodeError> {
    let mut item = if extended {
        let header = reader.read::<DialogItemExHeader>("item header")?;
        trace!("{:#x?}", header);
        DialogItem {
            help_id: header.help_id,
            ex_style: header.extended_style,
            style: header.style,
            x: header.x,
            y: header.y,
            width: header.width,
            height: header.height,
            id: header.id,
            ..Default::default()
        }
    } else {
        let header = reader.read::<DialogItemHeader>("item header")?;
        trace!("{:#x?}", header);
        DialogItem {
            style: header.style,
            ex_style: header.extended_style,
            x: header.x,
            y: header.y,
            width: header.width,
            height: header.height,
            id: header.id as u32,
            ..Default::default()
        }
    };
    item.class = reader.read_atom_or_string("item class")?;
    item.text = reader.read_atom_or_string("item text")?;

    let mut length = reader.u16("creation data length")? as usize;
    if extended && length == CREATION_DATA_EXTENDED_LENGTH as usize {
        length = reader.u32("creation data length")? as usize;
    }
    if length > reader.remaining() {
        warn!(
            "creation data of item {} declares {} bytes but only {} remain, clamping",
            item.id,
            length,
            reader.remaining()
        );
        length = reader.remaining();
    }
    item.creation_data = reader.bytes(length, "creation data")?.to_vec();
    trace!(
        "class: {:?}, text: {:?}, creation data: {} bytes",
        item.class,
        item.text,
        item.creation_data.len()
    );
    Ok(item)
}

/// Encode a dialog template using the layout given by its [`DialogKind`].
///
/// # Returns
/// Returns an error if a value does not fit the layout, or if the style requests a font but none is set.
pub fn encode(template: &DialogTemplate) -> Result<Vec<u8>, EncodeError> {
    let extended = template.kind == DialogKind::Extended;
    let number_of_items = u16::try_from(template.items.len()).map_err(|_| {
        EncodeError::ValueOutOfRange {
            field: "dialog item count",
            value: template.items.len() as u64,
        }
    })?;

    let mut writer = Writer::new();
    if extended {
        writer.write(&DialogTemplateExHeader {
            version: DIALOG_EX_VERSION,
            signature: DIALOG_EX_SIGNATURE,
            help_id: template.help_id,
            extended_style: template.ex_style,
            style: template.style,
            number_of_items,
            x: template.x,
            y: template.y,
            width: template.width,
            height: template.height,
        });
    } else {
        writer.write(&DialogTemplateHeader {
            style: template.style,
            extended_style: template.ex_style,
            number_of_items,
            x: template.x,
            y: template.y,
            width: template.width,
            height: template.height,
        });
    }

    writer.write_atom_or_string(&template.menu);
    writer.write_atom_or_string(&template.class);
    writer.write_aligned_string(&template.caption);

    if template.has_font_style() {
        let font = template.font.as_ref().ok_or(EncodeError::MissingFont)?;
        writer.u16(font.point_size);
        if extended {
            writer.u16(font.weight);
            writer.u8(font.italic);
            writer.u8(font.charset);
        }
        writer.write_aligned_string(&font.name);
    } else if template.font.is_some() {
        debug!("dialog style does not request a font, font is not written");
    }

    for item in &template.items {
        writer.align(4);
        encode_item(&mut writer, item, extended)?;
    }
    Ok(writer.into_inner())
}

fn encode_item(writer: &mut Writer, item: &DialogItem, extended: bool) -> Result<(), EncodeError> {
    if extended {
        writer.write(&DialogItemExHeader {
            help_id: item.help_id,
            extended_style: item.ex_style,
            style: item.style,
            x: item.x,
            y: item.y,
            width: item.width,
            height: item.height,
            id: item.id,
        });
    } else {
        let id = u16::try_from(item.id).map_err(|_| EncodeError::ValueOutOfRange {
            field: "dialog item id",
            value: item.id as u64,
        })?;
        writer.write(&DialogItemHeader {
            style: item.style,
            extended_style: item.ex_style,
            x: item.x,
            y: item.y,
            width: item.width,
            height: item.height,
            id,
        });
    }
    writer.write_atom_or_string(&item.class);
    writer.write_atom_or_string(&item.text);

    let length = item.creation_data.len();
    match u16::try_from(length) {
        Ok(length) if length != CREATION_DATA_EXTENDED_LENGTH || !extended => writer.u16(length),
        _ if extended => {
            let length = u32::try_from(length).map_err(|_| EncodeError::ValueOutOfRange {
                field: "creation data length",
                value: length as u64,
            })?;
            writer.u16(CREATION_DATA_EXTENDED_LENGTH);
            writer.u32(length);
        }
        _ => {
            return Err(EncodeError::ValueOutOfRange {
                field: "creation data length",
                value: length as u64,
            })
        }
    }
    writer.bytes(&item.creation_data);
    Ok(())
}
