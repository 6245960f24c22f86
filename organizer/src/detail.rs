// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed details that make up an organizer item.

use std::collections::BTreeSet;

use jiff::civil::{Date, DateTime, Time};

use crate::datetime::ItemDateTime;
use crate::recurrence::RecurrenceRule;

/// Kind of a detail. Each kind is either unique per item or multi-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter)]
#[expect(missing_docs)]
pub enum DetailKind {
    Guid,
    DisplayLabel,
    Description,
    Comment,
    Location,
    Tag,
    EventTime,
    TodoTime,
    JournalTime,
    TodoProgress,
    Timestamp,
    Priority,
    Classification,
    Version,
    Recurrence,
    Parent,
    AudibleReminder,
    VisualReminder,
    EmailReminder,
    Extended,
}

impl DetailKind {
    /// Whether an item holds at most one detail of this kind.
    pub fn is_unique(self) -> bool {
        !matches!(
            self,
            DetailKind::Comment
                | DetailKind::Tag
                | DetailKind::AudibleReminder
                | DetailKind::VisualReminder
                | DetailKind::EmailReminder
                | DetailKind::Extended
        )
    }

    /// Whether this kind is one of the reminder kinds.
    pub fn is_reminder(self) -> bool {
        matches!(
            self,
            DetailKind::AudibleReminder | DetailKind::VisualReminder | DetailKind::EmailReminder
        )
    }
}

/// Field of a detail addressable by a sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[expect(missing_docs)]
pub enum DetailField {
    Text,
    Start,
    End,
    Due,
    Finished,
    Created,
    LastModified,
    Priority,
    Percentage,
    Sequence,
    OriginalDate,
    SecondsBeforeStart,
}

/// Value of a detail field, comparable within the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[expect(missing_docs)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    DateTime(DateTime),
}

/// Start and end of an event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventTime {
    /// When the event starts.
    pub start: Option<ItemDateTime>,
    /// When the event ends.
    pub end: Option<ItemDateTime>,
    /// Whether the event spans whole days.
    pub all_day: bool,
}

/// Start and due time of a todo.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoTime {
    /// When work on the todo starts.
    pub start: Option<ItemDateTime>,
    /// When the todo is due.
    pub due: Option<ItemDateTime>,
    /// Whether the times are whole days.
    pub all_day: bool,
}

/// Entry time of a journal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JournalTime {
    /// When the journal entry was made.
    pub entry: Option<ItemDateTime>,
}

/// Lifecycle state of a todo.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
pub enum TodoStatus {
    /// The todo needs action.
    #[strum(serialize = "NEEDS-ACTION")]
    NeedsAction,
    /// The todo is in progress.
    #[strum(serialize = "IN-PROCESS")]
    InProcess,
    /// The todo has been completed.
    #[strum(serialize = "COMPLETED")]
    Completed,
    /// The todo has been cancelled.
    #[strum(serialize = "CANCELLED")]
    Cancelled,
}

/// Progress of a todo.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoProgress {
    /// Lifecycle state.
    pub status: Option<TodoStatus>,
    /// Percentage complete, `0..=100`.
    pub percentage: Option<u8>,
    /// When the todo was finished.
    pub finished: Option<ItemDateTime>,
}

/// Creation and modification times of an item.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ItemTimestamp {
    /// When the item was created.
    pub created: Option<ItemDateTime>,
    /// When the item was last modified.
    pub last_modified: Option<ItemDateTime>,
}

/// Priority of an item, with values ranging from 1 to 9, and None for no priority.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// No priority.
    #[default]
    None,

    /// Priority 1, highest priority.
    P1,

    /// Priority 2.
    P2,

    /// Priority 3.
    P3,

    /// Priority 4.
    P4,

    /// Priority 5, medium priority.
    P5,

    /// Priority 6.
    P6,

    /// Priority 7.
    P7,

    /// Priority 8.
    P8,

    /// Priority 9, lowest priority.
    P9,
}

impl From<u8> for Priority {
    fn from(value: u8) -> Self {
        match value {
            1 => Priority::P1,
            2 => Priority::P2,
            3 => Priority::P3,
            4 => Priority::P4,
            5 => Priority::P5,
            6 => Priority::P6,
            7 => Priority::P7,
            8 => Priority::P8,
            9 => Priority::P9,
            _ => Priority::None,
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        match value {
            Priority::None => 0,
            Priority::P1 => 1,
            Priority::P2 => 2,
            Priority::P3 => 3,
            Priority::P4 => 4,
            Priority::P5 => 5,
            Priority::P6 => 6,
            Priority::P7 => 7,
            Priority::P8 => 8,
            Priority::P9 => 9,
        }
    }
}

/// Access classification of an item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
#[expect(missing_docs)]
pub enum Classification {
    #[default]
    Public,
    Private,
    Confidential,
}

/// Recurrence of an item: rules, exception rules and explicit dates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recurrence {
    /// Rules generating occurrences.
    pub rules: BTreeSet<RecurrenceRule>,
    /// Rules removing occurrences.
    pub exception_rules: BTreeSet<RecurrenceRule>,
    /// Extra occurrence dates.
    pub dates: BTreeSet<Date>,
    /// Removed occurrence dates.
    pub exception_dates: BTreeSet<Date>,
}

impl Recurrence {
    /// Whether nothing recurs.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
            && self.exception_rules.is_empty()
            && self.dates.is_empty()
            && self.exception_dates.is_empty()
    }
}

/// Link from an occurrence to the series it overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    /// Date of the original occurrence.
    pub original_date: Date,
}

/// Timing shared by all reminder kinds.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Seconds before the start at which the reminder fires. Negative values
    /// fire after the start.
    pub seconds_before_start: i64,
    /// How many additional times the reminder fires.
    pub repetition_count: u32,
    /// Seconds between repetitions.
    pub repetition_delay: i64,
}

/// A reminder that plays a sound.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AudibleReminder {
    /// Timing.
    pub reminder: Reminder,
    /// Sound to play.
    pub data_url: Option<String>,
}

/// A reminder that shows a message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VisualReminder {
    /// Timing.
    pub reminder: Reminder,
    /// Message to show.
    pub message: String,
    /// Image or other content to show.
    pub data_url: Option<String>,
}

/// A reminder that sends an email.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmailReminder {
    /// Timing.
    pub reminder: Reminder,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Recipient addresses.
    pub recipients: Vec<String>,
    /// Attachment locations.
    pub attachments: Vec<String>,
}

/// A property no typed detail covers, kept verbatim.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtendedDetail {
    /// Property name, upper-cased.
    pub name: String,
    /// Property parameters in source order.
    pub parameters: Vec<(String, String)>,
    /// Raw property value.
    pub data: String,
}

/// A typed piece of an organizer item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum Detail {
    Guid(String),
    DisplayLabel(String),
    Description(String),
    Comment(String),
    Location(String),
    Tag(String),
    EventTime(EventTime),
    TodoTime(TodoTime),
    JournalTime(JournalTime),
    TodoProgress(TodoProgress),
    Timestamp(ItemTimestamp),
    Priority(Priority),
    Classification(Classification),
    Version { sequence: i64 },
    Recurrence(Recurrence),
    Parent(Parent),
    AudibleReminder(AudibleReminder),
    VisualReminder(VisualReminder),
    EmailReminder(EmailReminder),
    Extended(ExtendedDetail),
}

impl Detail {
    /// The kind of this detail.
    pub fn kind(&self) -> DetailKind {
        match self {
            Detail::Guid(_) => DetailKind::Guid,
            Detail::DisplayLabel(_) => DetailKind::DisplayLabel,
            Detail::Description(_) => DetailKind::Description,
            Detail::Comment(_) => DetailKind::Comment,
            Detail::Location(_) => DetailKind::Location,
            Detail::Tag(_) => DetailKind::Tag,
            Detail::EventTime(_) => DetailKind::EventTime,
            Detail::TodoTime(_) => DetailKind::TodoTime,
            Detail::JournalTime(_) => DetailKind::JournalTime,
            Detail::TodoProgress(_) => DetailKind::TodoProgress,
            Detail::Timestamp(_) => DetailKind::Timestamp,
            Detail::Priority(_) => DetailKind::Priority,
            Detail::Classification(_) => DetailKind::Classification,
            Detail::Version { .. } => DetailKind::Version,
            Detail::Recurrence(_) => DetailKind::Recurrence,
            Detail::Parent(_) => DetailKind::Parent,
            Detail::AudibleReminder(_) => DetailKind::AudibleReminder,
            Detail::VisualReminder(_) => DetailKind::VisualReminder,
            Detail::EmailReminder(_) => DetailKind::EmailReminder,
            Detail::Extended(_) => DetailKind::Extended,
        }
    }

    /// Timing of a reminder detail.
    pub fn reminder(&self) -> Option<&Reminder> {
        match self {
            Detail::AudibleReminder(r) => Some(&r.reminder),
            Detail::VisualReminder(r) => Some(&r.reminder),
            Detail::EmailReminder(r) => Some(&r.reminder),
            _ => None,
        }
    }

    /// Read a single field, `None` when this detail has no such field or it
    /// is blank.
    pub fn field(&self, field: DetailField) -> Option<FieldValue> {
        let time = |t: &Option<ItemDateTime>| t.as_ref().map(|t| FieldValue::DateTime(t.sort_key()));
        match (self, field) {
            (
                Detail::Guid(s)
                | Detail::DisplayLabel(s)
                | Detail::Description(s)
                | Detail::Comment(s)
                | Detail::Location(s)
                | Detail::Tag(s),
                DetailField::Text,
            ) => Some(FieldValue::Text(s.clone())),
            (Detail::VisualReminder(r), DetailField::Text) => Some(FieldValue::Text(r.message.clone())),
            (Detail::EmailReminder(r), DetailField::Text) => Some(FieldValue::Text(r.subject.clone())),
            (Detail::Extended(e), DetailField::Text) => Some(FieldValue::Text(e.data.clone())),

            (Detail::EventTime(t), DetailField::Start) => time(&t.start),
            (Detail::EventTime(t), DetailField::End) => time(&t.end),
            (Detail::TodoTime(t), DetailField::Start) => time(&t.start),
            (Detail::TodoTime(t), DetailField::Due) => time(&t.due),
            (Detail::JournalTime(t), DetailField::Start) => time(&t.entry),
            (Detail::TodoProgress(p), DetailField::Finished) => time(&p.finished),
            (Detail::TodoProgress(p), DetailField::Percentage) => {
                p.percentage.map(|v| FieldValue::Integer(v.into()))
            }
            (Detail::Timestamp(t), DetailField::Created) => time(&t.created),
            (Detail::Timestamp(t), DetailField::LastModified) => time(&t.last_modified),

            (Detail::Priority(p), DetailField::Priority) => match u8::from(*p) {
                0 => None,
                v => Some(FieldValue::Integer(v.into())),
            },
            (Detail::Version { sequence }, DetailField::Sequence) => {
                Some(FieldValue::Integer(*sequence))
            }
            (Detail::Parent(p), DetailField::OriginalDate) => Some(FieldValue::DateTime(
                p.original_date.to_datetime(Time::midnight()),
            )),
            (detail, DetailField::SecondsBeforeStart) => detail
                .reminder()
                .map(|r| FieldValue::Integer(r.seconds_before_start)),
            _ => None,
        }
    }
}
