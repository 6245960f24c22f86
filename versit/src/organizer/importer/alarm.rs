// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `VALARM` to reminder mappings.

use std::collections::HashMap;
use std::sync::LazyLock;

use jiff::SignedDuration;
use pimkit_organizer::{
    AudibleReminder, Detail, EmailReminder, ItemDateTime, ItemType, OrganizerItem, Reminder,
    VisualReminder,
};

use crate::document::{VersitDocument, VersitProperty};
use crate::keyword::{
    KW_ACTION, KW_ACTION_AUDIO, KW_ACTION_DISPLAY, KW_ACTION_EMAIL, KW_ATTACH, KW_ATTENDEE,
    KW_DESCRIPTION, KW_DURATION, KW_RELATED, KW_RELATED_END, KW_REPEAT, KW_SUMMARY, KW_TRIGGER,
    KW_VALUE, KW_VALUE_DATE_TIME,
};
use crate::organizer::importer::properties::{event_time, todo_time};
use crate::value::{ValueError, parse_duration, parse_integer, property_date_time};

/// Map one alarm property onto the reminder built so far.
///
/// Returns the updated reminder, or `None` if the property does not apply.
pub type AlarmMapping =
    fn(&VersitProperty, &Detail, &OrganizerItem) -> Result<Option<Detail>, ValueError>;

const ALARM_MAPPINGS: &[(&str, AlarmMapping)] = &[
    (KW_ACTION, map_action),
    (KW_TRIGGER, map_trigger),
    (KW_REPEAT, map_repeat),
    (KW_DURATION, map_duration),
    (KW_DESCRIPTION, map_description),
    (KW_SUMMARY, map_summary),
    (KW_ATTENDEE, map_attendee),
    (KW_ATTACH, map_attach),
];

static ALARM_TABLE: LazyLock<HashMap<&'static str, AlarmMapping>> =
    LazyLock::new(|| ALARM_MAPPINGS.iter().copied().collect());

/// The mapping of an alarm property name, if any.
pub fn alarm_mapping(name: &str) -> Option<AlarmMapping> {
    ALARM_TABLE.get(name).copied()
}

/// An empty reminder of the kind named by the alarm's `ACTION`.
pub fn new_reminder(alarm: &VersitDocument) -> Option<Detail> {
    let action = alarm.property(KW_ACTION)?.value().as_str()?;
    match action.trim().to_ascii_uppercase().as_str() {
        KW_ACTION_AUDIO => Some(Detail::AudibleReminder(AudibleReminder::default())),
        KW_ACTION_DISPLAY => Some(Detail::VisualReminder(VisualReminder::default())),
        KW_ACTION_EMAIL => Some(Detail::EmailReminder(EmailReminder::default())),
        _ => None,
    }
}

fn text(property: &VersitProperty) -> String {
    property.value().values().join(",")
}

fn reminder_mut(detail: &mut Detail) -> Option<&mut Reminder> {
    match detail {
        Detail::AudibleReminder(r) => Some(&mut r.reminder),
        Detail::VisualReminder(r) => Some(&mut r.reminder),
        Detail::EmailReminder(r) => Some(&mut r.reminder),
        _ => None,
    }
}

fn update_timing(current: &Detail, update: impl FnOnce(&mut Reminder)) -> Option<Detail> {
    let mut detail = current.clone();
    update(reminder_mut(&mut detail)?);
    Some(detail)
}

/// Start and end of the item the alarm belongs to. The end of a todo is
/// its due time.
fn bounds(item: &OrganizerItem) -> (Option<ItemDateTime>, Option<ItemDateTime>) {
    match item.item_type() {
        ItemType::Event | ItemType::EventOccurrence => {
            let time = event_time(item);
            (time.start, time.end)
        }
        ItemType::Todo | ItemType::TodoOccurrence => {
            let time = todo_time(item);
            (time.start, time.due)
        }
        ItemType::Journal | ItemType::Note => (None, None),
    }
}

fn map_action(
    _: &VersitProperty,
    current: &Detail,
    _: &OrganizerItem,
) -> Result<Option<Detail>, ValueError> {
    Ok(Some(current.clone()))
}

/// A relative trigger is an offset from the start, or from the end with
/// `RELATED=END`. A `DATE-TIME` trigger is an absolute time.
fn map_trigger(
    property: &VersitProperty,
    current: &Detail,
    item: &OrganizerItem,
) -> Result<Option<Detail>, ValueError> {
    let (start, end) = bounds(item);
    let absolute = property
        .parameter(KW_VALUE)
        .is_some_and(|v| v.eq_ignore_ascii_case(KW_VALUE_DATE_TIME));

    let seconds_before_start = if absolute {
        let trigger = property_date_time(property)?;
        let Some(start) = start else {
            return Ok(None);
        };
        start.sort_key().duration_since(trigger.sort_key()).as_secs()
    } else {
        let offset = parse_duration(&text(property))?;
        let related_end = property
            .parameter(KW_RELATED)
            .is_some_and(|v| v.eq_ignore_ascii_case(KW_RELATED_END));
        let from_start = match (related_end, start, end) {
            (true, Some(start), Some(end)) => end.sort_key().duration_since(start.sort_key()),
            _ => SignedDuration::ZERO,
        };
        -(offset + from_start).as_secs()
    };
    Ok(update_timing(current, |r| r.seconds_before_start = seconds_before_start))
}

fn map_repeat(
    property: &VersitProperty,
    current: &Detail,
    _: &OrganizerItem,
) -> Result<Option<Detail>, ValueError> {
    let count = parse_integer::<u32>(&text(property))?;
    Ok(update_timing(current, |r| r.repetition_count = count))
}

fn map_duration(
    property: &VersitProperty,
    current: &Detail,
    _: &OrganizerItem,
) -> Result<Option<Detail>, ValueError> {
    let delay = parse_duration(&text(property))?.as_secs();
    Ok(update_timing(current, |r| r.repetition_delay = delay))
}

fn map_description(
    property: &VersitProperty,
    current: &Detail,
    _: &OrganizerItem,
) -> Result<Option<Detail>, ValueError> {
    Ok(match current {
        Detail::VisualReminder(r) => Some(Detail::VisualReminder(VisualReminder {
            message: text(property),
            ..r.clone()
        })),
        Detail::EmailReminder(r) => Some(Detail::EmailReminder(EmailReminder {
            body: text(property),
            ..r.clone()
        })),
        _ => None,
    })
}

fn map_summary(
    property: &VersitProperty,
    current: &Detail,
    _: &OrganizerItem,
) -> Result<Option<Detail>, ValueError> {
    Ok(match current {
        Detail::EmailReminder(r) => Some(Detail::EmailReminder(EmailReminder {
            subject: text(property),
            ..r.clone()
        })),
        _ => None,
    })
}

fn map_attendee(
    property: &VersitProperty,
    current: &Detail,
    _: &OrganizerItem,
) -> Result<Option<Detail>, ValueError> {
    Ok(match current {
        Detail::EmailReminder(r) => {
            let mut reminder = r.clone();
            reminder.recipients.push(text(property));
            Some(Detail::EmailReminder(reminder))
        }
        _ => None,
    })
}

fn map_attach(
    property: &VersitProperty,
    current: &Detail,
    _: &OrganizerItem,
) -> Result<Option<Detail>, ValueError> {
    let url = text(property);
    Ok(Some(match current {
        Detail::AudibleReminder(r) => Detail::AudibleReminder(AudibleReminder {
            data_url: Some(url),
            ..r.clone()
        }),
        Detail::VisualReminder(r) => Detail::VisualReminder(VisualReminder {
            data_url: Some(url),
            ..r.clone()
        }),
        Detail::EmailReminder(r) => {
            let mut reminder = r.clone();
            reminder.attachments.push(url);
            Detail::EmailReminder(reminder)
        }
        _ => return Ok(None),
    }))
}
