//! Binary codec for compiled Windows **res**ources, built for **edit**ing.
//!
//! Supports:
//! * Dialog templates in the standard and extended layout
//! * Menu templates in the standard and extended layout
//! * Version information, string tables and accelerator tables
//! * Reading and writing `.RES` files
//!
//! Every codec decodes a raw payload into a structured value and encodes it back into bytes that
//! resource tools and the Windows loader accept. Decoding is best-effort: a truncated or malformed
//! payload yields everything read up to the failing field together with a [`DecodeError`] naming
//! that field.
//!
//! See [`ResourceSet`] for the main entry point for reading, querying and writing resources.
//!
//! # Examples
//!
//! ### Editing version information
//! ```
//! use editres::{constants::*, AtomOrString, Resource, ResourceKey, ResourceSet};
//!
//! let data = std::fs::read(RES_PATH)?;
//!
//! // parse the resource file, keeping every record that could be read
//! let mut resources = ResourceSet::from_res(&data).into_result()?;
//!
//! // find and decode the version resource
//! let key = ResourceKey::new(RT_VERSION, 1u16, LANGUAGE_ID_EN_US);
//! let Resource::Version(mut version) = resources.get(&key).unwrap().decode().into_result()? else {
//!     unreachable!()
//! };
//!
//! // change the product name in the first string table
//! version.string_tables[0].set(VS_PRODUCT_NAME, "Demo");
//!
//! // encode the resource and write the resource file
//! resources.insert_resource(key, &Resource::Version(version))?;
//! let target = resources.to_res()?;
//! ```
//!
//! ### Resources from a portable executable
//! ```
//! use editres::{ResRecord, ResourceSet};
//!
//! // (type, name, language, payload) tuples from any resource directory reader
//! let resources = ResourceSet::from_records(entries.into_iter().map(ResRecord::from));
//!
//! for (key, decoded) in resources.decode_all() {
//!     match decoded.error {
//!         None => println!("{}: {:?}", key, decoded.value),
//!         Some(error) => println!("{}: partially decoded, {}", key, error),
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg_hide))]
#![cfg_attr(docsrs, doc(cfg_hide(doc)))]

extern crate alloc;

pub(crate) mod errors;
pub(crate) mod resource;
pub(crate) mod util;

pub mod accelerator;
pub mod constants;
pub mod dialog;
pub mod menu;
pub mod res;
pub mod string_table;
pub mod types;
pub mod version;

pub use crate::{
    accelerator::{Accelerator, AcceleratorTable},
    dialog::{DialogFont, DialogItem, DialogKind, DialogTemplate},
    errors::*,
    menu::{ExtendedMenuFlags, MenuNode, MenuTemplate},
    resource::*,
    string_table::{StringEntry, StringTableBlock},
    util::{Reader, Writer, ATOM_MARKER},
    version::{FixedInfo, VarEntry, VersionInfo, VersionStringTable},
};
