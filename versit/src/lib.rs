// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Versit (iCalendar and vCard) documents: reading, writing, value codecs
//! and conversion to and from organizer items.
//!
//! ```
//! use pimkit_versit::{OrganizerImporter, read_documents};
//!
//! let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:1\r\n\
//!            SUMMARY:Standup\r\nDTSTART:20260105T090000\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let documents = read_documents(src).unwrap();
//!
//! let mut importer = OrganizerImporter::new();
//! assert!(importer.import_document(&documents[0]));
//! assert_eq!(importer.items().len(), 1);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod config;
pub mod document;
mod keyword;
pub mod organizer;
pub mod reader;
pub mod value;
pub mod writer;

pub use crate::config::{ConfigError, VersitConfig};
pub use crate::document::{VersitDocument, VersitProperty, VersitType, VersitValue};
pub use crate::organizer::{
    DetailHandler, ExportError, ExtendedPropertyHandler, ImportError, OrganizerExporter,
    OrganizerImporter, PropertyHandler,
};
pub use crate::reader::{ReadError, read_documents};
pub use crate::value::ValueError;
pub use crate::writer::{FoldingStyle, WriteOptions, Writer, write_documents};
