// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Conversion between iCalendar documents and organizer items.
//!
//! [`OrganizerImporter`] maps each `VEVENT`, `VTODO` and `VJOURNAL` of a
//! `VCALENDAR` to an item, [`OrganizerExporter`] goes the other way. Both
//! accept a handler that sees every property or detail after the built-in
//! mappings, see [`PropertyHandler`] and [`DetailHandler`].

mod exporter;
mod handler;
mod importer;

pub use crate::organizer::exporter::{ExportError, OrganizerExporter};
pub use crate::organizer::handler::{DetailHandler, ExtendedPropertyHandler, PropertyHandler};
pub use crate::organizer::importer::{ImportError, OrganizerImporter};
