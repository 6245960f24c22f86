// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Detail to property mappings of items.

use std::collections::BTreeSet;

use jiff::SignedDuration;
use jiff::civil::Date;
use pimkit_organizer::{Detail, Recurrence, RecurrenceRule, Reminder};

use crate::document::{VersitDocument, VersitProperty, VersitType, VersitValue};
use crate::keyword::{
    KW_ACTION, KW_ACTION_AUDIO, KW_ACTION_DISPLAY, KW_ACTION_EMAIL, KW_ATTACH, KW_ATTENDEE,
    KW_CATEGORIES, KW_CLASS, KW_COMMENT, KW_COMPLETED, KW_CREATED, KW_DESCRIPTION, KW_DTEND,
    KW_DTSTART, KW_DUE, KW_DURATION, KW_EXDATE, KW_EXRULE, KW_LAST_MODIFIED, KW_LOCATION,
    KW_PERCENT_COMPLETE, KW_PRIORITY, KW_RDATE, KW_RECURRENCE_ID, KW_REPEAT, KW_RRULE,
    KW_SEQUENCE, KW_STATUS, KW_SUMMARY, KW_TRIGGER, KW_UID, KW_VALARM, KW_VALUE, KW_VALUE_DATE,
};
use crate::value::{date_time_property, format_date, format_duration, format_recurrence_rule};

/// Properties written for a detail, `None` when no mapping claims it.
pub fn detail_properties(detail: &Detail) -> Option<Vec<VersitProperty>> {
    let mut properties = Vec::new();
    match detail {
        Detail::Guid(uid) => properties.push(VersitProperty::text(KW_UID, uid.as_str())),
        Detail::DisplayLabel(label) => {
            properties.push(VersitProperty::text(KW_SUMMARY, label.as_str()));
        }
        Detail::Description(text) => {
            properties.push(VersitProperty::text(KW_DESCRIPTION, text.as_str()));
        }
        Detail::Location(text) => properties.push(VersitProperty::text(KW_LOCATION, text.as_str())),
        Detail::Comment(text) => properties.push(VersitProperty::text(KW_COMMENT, text.as_str())),
        Detail::Tag(tag) => properties.push(VersitProperty::new(
            KW_CATEGORIES,
            VersitValue::List(vec![tag.clone()]),
        )),
        Detail::EventTime(time) => {
            properties.extend(time.start.iter().map(|t| date_time_property(KW_DTSTART, t)));
            properties.extend(time.end.iter().map(|t| date_time_property(KW_DTEND, t)));
        }
        Detail::TodoTime(time) => {
            properties.extend(time.start.iter().map(|t| date_time_property(KW_DTSTART, t)));
            properties.extend(time.due.iter().map(|t| date_time_property(KW_DUE, t)));
        }
        Detail::JournalTime(time) => {
            properties.extend(time.entry.iter().map(|t| date_time_property(KW_DTSTART, t)));
        }
        Detail::TodoProgress(progress) => {
            if let Some(status) = progress.status {
                properties.push(VersitProperty::preformatted(KW_STATUS, status.to_string()));
            }
            if let Some(percentage) = progress.percentage {
                properties.push(VersitProperty::preformatted(
                    KW_PERCENT_COMPLETE,
                    percentage.to_string(),
                ));
            }
            if let Some(finished) = &progress.finished {
                properties.push(date_time_property(KW_COMPLETED, finished));
            }
        }
        Detail::Timestamp(timestamp) => {
            if let Some(created) = &timestamp.created {
                properties.push(date_time_property(KW_CREATED, created));
            }
            if let Some(modified) = &timestamp.last_modified {
                properties.push(date_time_property(KW_LAST_MODIFIED, modified));
            }
        }
        Detail::Priority(priority) => properties.push(VersitProperty::preformatted(
            KW_PRIORITY,
            u8::from(*priority).to_string(),
        )),
        Detail::Classification(class) => {
            properties.push(VersitProperty::preformatted(KW_CLASS, class.to_string()));
        }
        Detail::Version { sequence } => {
            properties.push(VersitProperty::preformatted(KW_SEQUENCE, sequence.to_string()));
        }
        Detail::Recurrence(recurrence) => properties.extend(recurrence_properties(recurrence)),
        Detail::Parent(parent) => properties.push(
            VersitProperty::preformatted(KW_RECURRENCE_ID, format_date(parent.original_date))
                .with_parameter(KW_VALUE, KW_VALUE_DATE),
        ),
        Detail::AudibleReminder(_)
        | Detail::VisualReminder(_)
        | Detail::EmailReminder(_)
        | Detail::Extended(_) => return None,
    }
    Some(properties)
}

fn recurrence_properties(recurrence: &Recurrence) -> Vec<VersitProperty> {
    let rules = |name: &'static str, rules: &BTreeSet<RecurrenceRule>| {
        rules
            .iter()
            .filter_map(|rule| match format_recurrence_rule(rule) {
                Ok(text) => Some(VersitProperty::preformatted(name, text)),
                Err(err) => {
                    tracing::debug!(property = name, %err, "dropping recurrence rule");
                    None
                }
            })
            .collect::<Vec<_>>()
    };
    let dates = |name: &str, dates: &BTreeSet<Date>| {
        (!dates.is_empty()).then(|| {
            let text = dates
                .iter()
                .map(|date| format_date(*date))
                .collect::<Vec<_>>()
                .join(",");
            VersitProperty::preformatted(name, text).with_parameter(KW_VALUE, KW_VALUE_DATE)
        })
    };

    let mut properties = rules(KW_RRULE, &recurrence.rules);
    properties.extend(rules(KW_EXRULE, &recurrence.exception_rules));
    properties.extend(dates(KW_RDATE, &recurrence.dates));
    properties.extend(dates(KW_EXDATE, &recurrence.exception_dates));
    properties
}

/// The `VALARM` of a reminder detail, `None` for other details.
pub fn alarm_document(detail: &Detail) -> Option<VersitDocument> {
    let (action, reminder) = match detail {
        Detail::AudibleReminder(r) => (KW_ACTION_AUDIO, &r.reminder),
        Detail::VisualReminder(r) => (KW_ACTION_DISPLAY, &r.reminder),
        Detail::EmailReminder(r) => (KW_ACTION_EMAIL, &r.reminder),
        _ => return None,
    };

    let mut alarm = VersitDocument::new(VersitType::ICalendar20, KW_VALARM)
        .with_property(VersitProperty::preformatted(KW_ACTION, action));
    for property in timing_properties(reminder) {
        alarm.add_property(property);
    }

    match detail {
        Detail::AudibleReminder(r) => {
            if let Some(url) = &r.data_url {
                alarm.add_property(VersitProperty::preformatted(KW_ATTACH, url.as_str()));
            }
        }
        Detail::VisualReminder(r) => {
            alarm.add_property(VersitProperty::text(KW_DESCRIPTION, r.message.as_str()));
            if let Some(url) = &r.data_url {
                alarm.add_property(VersitProperty::preformatted(KW_ATTACH, url.as_str()));
            }
        }
        Detail::EmailReminder(r) => {
            alarm.add_property(VersitProperty::text(KW_DESCRIPTION, r.body.as_str()));
            alarm.add_property(VersitProperty::text(KW_SUMMARY, r.subject.as_str()));
            for recipient in &r.recipients {
                alarm.add_property(VersitProperty::preformatted(KW_ATTENDEE, recipient.as_str()));
            }
            for attachment in &r.attachments {
                alarm.add_property(VersitProperty::preformatted(KW_ATTACH, attachment.as_str()));
            }
        }
        _ => {}
    }
    Some(alarm)
}

/// `TRIGGER` relative to the start, then `REPEAT` and `DURATION` when the
/// reminder repeats.
fn timing_properties(reminder: &Reminder) -> Vec<VersitProperty> {
    let mut properties = vec![VersitProperty::preformatted(
        KW_TRIGGER,
        format_duration(SignedDuration::from_secs(-reminder.seconds_before_start)),
    )];
    if reminder.repetition_count > 0 {
        properties.push(VersitProperty::preformatted(
            KW_REPEAT,
            reminder.repetition_count.to_string(),
        ));
    }
    if reminder.repetition_delay != 0 {
        properties.push(VersitProperty::preformatted(
            KW_DURATION,
            format_duration(SignedDuration::from_secs(reminder.repetition_delay)),
        ));
    }
    properties
}
