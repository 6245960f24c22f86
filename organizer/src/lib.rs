// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed organizer data: items built from details, recurrence rules, engine
//! identities, sort orders and the manager engine contract.

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

mod datetime;
pub mod detail;
mod id;
mod item;
pub mod manager;
mod recurrence;
mod sort;

pub use crate::datetime::ItemDateTime;
pub use crate::detail::{
    AudibleReminder, Classification, Detail, DetailField, DetailKind, EmailReminder, EventTime,
    ExtendedDetail, FieldValue, ItemTimestamp, JournalTime, Parent, Priority, Recurrence,
    Reminder, TodoProgress, TodoStatus, TodoTime, VisualReminder,
};
pub use crate::id::{CollectionId, IdError, ItemId, StorageLocation};
pub use crate::item::{ItemType, OrganizerItem};
pub use crate::manager::{
    EngineParameters, EngineRegistry, ManagerEngine, ManagerEngineFactory, ManagerError,
    MemoryEngine, MemoryEngineFactory,
};
pub use crate::recurrence::{Frequency, Limit, LimitType, Month, RecurrenceRule, Weekday};
pub use crate::sort::{BlankPolicy, CaseSensitivity, SortDirection, SortOrder, sort_items};
