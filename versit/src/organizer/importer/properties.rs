// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property to detail mappings of items.
//!
//! Each mapping reads one property of a component against the item as built
//! so far and yields the details to save. `Ok(None)` leaves the property
//! unclaimed.

use std::collections::HashMap;
use std::sync::LazyLock;

use pimkit_organizer::{
    Classification, Detail, DetailKind, EventTime, ItemDateTime, ItemTimestamp, ItemType,
    JournalTime, OrganizerItem, Parent, Priority, Recurrence, TodoProgress, TodoStatus, TodoTime,
};

use crate::document::{VersitDocument, VersitProperty};
use crate::keyword::{
    KW_CATEGORIES, KW_CLASS, KW_COMMENT, KW_COMPLETED, KW_CREATED, KW_DESCRIPTION, KW_DTEND,
    KW_DTSTART, KW_DUE, KW_DURATION, KW_EXDATE, KW_EXRULE, KW_LAST_MODIFIED, KW_LOCATION,
    KW_PERCENT_COMPLETE, KW_PRIORITY, KW_RDATE, KW_RECURRENCE_ID, KW_RRULE, KW_SEQUENCE,
    KW_STATUS, KW_SUMMARY, KW_TZID, KW_UID,
};
use crate::value::{
    ValueError, parse_date_list, parse_duration, parse_integer, parse_keyword,
    parse_recurrence_rule, property_date_time,
};

/// What a mapping produced: `None` when it does not apply to the item.
pub type Mapped = Result<Option<Vec<Detail>>, ValueError>;

/// Map one property of a component.
pub type PropertyMapping = fn(&VersitDocument, &VersitProperty, &OrganizerItem) -> Mapped;

const PROPERTY_MAPPINGS: &[(&str, PropertyMapping)] = &[
    (KW_UID, map_uid),
    (KW_SUMMARY, map_summary),
    (KW_DESCRIPTION, map_description),
    (KW_LOCATION, map_location),
    (KW_COMMENT, map_comment),
    (KW_CATEGORIES, map_categories),
    (KW_DTSTART, map_start),
    (KW_DTEND, map_end),
    (KW_DUE, map_due),
    (KW_DURATION, map_duration),
    (KW_COMPLETED, map_completed),
    (KW_PERCENT_COMPLETE, map_percent_complete),
    (KW_STATUS, map_status),
    (KW_PRIORITY, map_priority),
    (KW_CLASS, map_class),
    (KW_SEQUENCE, map_sequence),
    (KW_CREATED, map_created),
    (KW_LAST_MODIFIED, map_last_modified),
    (KW_RRULE, map_rrule),
    (KW_EXRULE, map_exrule),
    (KW_RDATE, map_rdate),
    (KW_EXDATE, map_exdate),
    (KW_RECURRENCE_ID, map_recurrence_id),
];

static MAPPING_TABLE: LazyLock<HashMap<&'static str, PropertyMapping>> =
    LazyLock::new(|| PROPERTY_MAPPINGS.iter().copied().collect());

/// The mapping of a property name, if any.
pub fn mapping(name: &str) -> Option<PropertyMapping> {
    MAPPING_TABLE.get(name).copied()
}

fn text(property: &VersitProperty) -> String {
    property.value().values().join(",")
}

fn single(detail: Detail) -> Mapped {
    Ok(Some(vec![detail]))
}

fn map_uid(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    single(Detail::Guid(text(property)))
}

fn map_summary(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    single(Detail::DisplayLabel(text(property)))
}

fn map_description(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    single(Detail::Description(text(property)))
}

fn map_location(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    single(Detail::Location(text(property)))
}

fn map_comment(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    single(Detail::Comment(text(property)))
}

fn map_categories(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    let tags = property
        .value()
        .values()
        .into_iter()
        .filter(|tag| !tag.is_empty())
        .map(|tag| Detail::Tag(tag.to_string()))
        .collect();
    Ok(Some(tags))
}

fn map_start(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    let start = property_date_time(property)?;
    let detail = match item.item_type() {
        ItemType::Event | ItemType::EventOccurrence => {
            let mut time = event_time(item);
            time.all_day = start.is_date_only();
            time.start = Some(start);
            Detail::EventTime(time)
        }
        ItemType::Todo | ItemType::TodoOccurrence => {
            let mut time = todo_time(item);
            time.all_day = start.is_date_only();
            time.start = Some(start);
            Detail::TodoTime(time)
        }
        ItemType::Journal => Detail::JournalTime(JournalTime { entry: Some(start) }),
        ItemType::Note => return Ok(None),
    };
    single(detail)
}

fn map_end(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    if !is_event(item) {
        return Ok(None);
    }
    let mut time = event_time(item);
    time.end = Some(property_date_time(property)?);
    single(Detail::EventTime(time))
}

fn map_due(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    if !is_todo(item) {
        return Ok(None);
    }
    let mut time = todo_time(item);
    time.due = Some(property_date_time(property)?);
    single(Detail::TodoTime(time))
}

/// `DURATION` sets the end of an event or the due time of a todo relative
/// to its start. A start not seen yet is read ahead from the component, and
/// a component without a usable start claims the property with no details.
fn map_duration(
    document: &VersitDocument,
    property: &VersitProperty,
    item: &OrganizerItem,
) -> Mapped {
    let duration = parse_duration(&text(property))?;
    if is_event(item) {
        let mut time = event_time(item);
        let Some(start) = time.start.clone().or_else(|| later_start(document)) else {
            return Ok(Some(Vec::new()));
        };
        time.end = start.checked_add(duration);
        single(Detail::EventTime(time))
    } else if is_todo(item) {
        let mut time = todo_time(item);
        let Some(start) = time.start.clone().or_else(|| later_start(document)) else {
            return Ok(Some(Vec::new()));
        };
        time.due = start.checked_add(duration);
        single(Detail::TodoTime(time))
    } else {
        Ok(None)
    }
}

/// The `DTSTART` of a component, for a property that precedes it.
fn later_start(document: &VersitDocument) -> Option<ItemDateTime> {
    let property = document
        .properties()
        .iter()
        .find(|property| property.name() == KW_DTSTART)?;
    property_date_time(property).ok()
}

fn map_completed(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    if !is_todo(item) {
        return Ok(None);
    }
    let mut progress = todo_progress(item);
    progress.finished = Some(property_date_time(property)?);
    single(Detail::TodoProgress(progress))
}

fn map_percent_complete(
    _: &VersitDocument,
    property: &VersitProperty,
    item: &OrganizerItem,
) -> Mapped {
    if !is_todo(item) {
        return Ok(None);
    }
    let mut progress = todo_progress(item);
    progress.percentage = Some(parse_integer::<u8>(&text(property))?.min(100));
    single(Detail::TodoProgress(progress))
}

/// Only todo statuses are mapped, event and journal statuses stay unclaimed.
fn map_status(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    if !is_todo(item) {
        return Ok(None);
    }
    let mut progress = todo_progress(item);
    progress.status = Some(parse_keyword::<TodoStatus>(&text(property))?);
    single(Detail::TodoProgress(progress))
}

fn map_priority(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    let priority = parse_integer::<u8>(&text(property))?;
    single(Detail::Priority(Priority::from(priority)))
}

fn map_class(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    single(Detail::Classification(parse_keyword::<Classification>(
        &text(property),
    )?))
}

fn map_sequence(_: &VersitDocument, property: &VersitProperty, _: &OrganizerItem) -> Mapped {
    let sequence = parse_integer::<i64>(&text(property))?;
    single(Detail::Version { sequence })
}

fn map_created(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    let mut timestamp = item_timestamp(item);
    timestamp.created = Some(property_date_time(property)?);
    single(Detail::Timestamp(timestamp))
}

fn map_last_modified(
    _: &VersitDocument,
    property: &VersitProperty,
    item: &OrganizerItem,
) -> Mapped {
    let mut timestamp = item_timestamp(item);
    timestamp.last_modified = Some(property_date_time(property)?);
    single(Detail::Timestamp(timestamp))
}

fn map_rrule(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    let rule = parse_recurrence_rule(&text(property))?;
    let mut recurrence = recurrence(item);
    recurrence.rules.insert(rule);
    single(Detail::Recurrence(recurrence))
}

fn map_exrule(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    let rule = parse_recurrence_rule(&text(property))?;
    let mut recurrence = recurrence(item);
    recurrence.exception_rules.insert(rule);
    single(Detail::Recurrence(recurrence))
}

fn map_rdate(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    let dates = parse_date_list(&text(property), property.parameter(KW_TZID))?;
    let mut recurrence = recurrence(item);
    recurrence.dates.extend(dates.iter().map(|d| d.date()));
    single(Detail::Recurrence(recurrence))
}

fn map_exdate(_: &VersitDocument, property: &VersitProperty, item: &OrganizerItem) -> Mapped {
    let dates = parse_date_list(&text(property), property.parameter(KW_TZID))?;
    let mut recurrence = recurrence(item);
    recurrence.exception_dates.extend(dates.iter().map(|d| d.date()));
    single(Detail::Recurrence(recurrence))
}

fn map_recurrence_id(
    _: &VersitDocument,
    property: &VersitProperty,
    item: &OrganizerItem,
) -> Mapped {
    if !is_event(item) && !is_todo(item) {
        return Ok(None);
    }
    let original = property_date_time(property)?;
    single(Detail::Parent(Parent {
        original_date: original.date(),
    }))
}

fn is_event(item: &OrganizerItem) -> bool {
    matches!(
        item.item_type(),
        ItemType::Event | ItemType::EventOccurrence
    )
}

fn is_todo(item: &OrganizerItem) -> bool {
    matches!(item.item_type(), ItemType::Todo | ItemType::TodoOccurrence)
}

pub(super) fn event_time(item: &OrganizerItem) -> EventTime {
    match item.detail(DetailKind::EventTime) {
        Some(Detail::EventTime(time)) => time.clone(),
        _ => EventTime::default(),
    }
}

pub(super) fn todo_time(item: &OrganizerItem) -> TodoTime {
    match item.detail(DetailKind::TodoTime) {
        Some(Detail::TodoTime(time)) => time.clone(),
        _ => TodoTime::default(),
    }
}

fn todo_progress(item: &OrganizerItem) -> TodoProgress {
    match item.detail(DetailKind::TodoProgress) {
        Some(Detail::TodoProgress(progress)) => progress.clone(),
        _ => TodoProgress::default(),
    }
}

fn item_timestamp(item: &OrganizerItem) -> ItemTimestamp {
    match item.detail(DetailKind::Timestamp) {
        Some(Detail::Timestamp(timestamp)) => timestamp.clone(),
        _ => ItemTimestamp::default(),
    }
}

fn recurrence(item: &OrganizerItem) -> Recurrence {
    match item.detail(DetailKind::Recurrence) {
        Some(Detail::Recurrence(recurrence)) => recurrence.clone(),
        _ => Recurrence::default(),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, datetime};

    use super::*;
    use crate::document::{VersitType, VersitValue};

    fn apply(item: &mut OrganizerItem, property: &VersitProperty) -> bool {
        apply_in(&VersitDocument::default(), item, property)
    }

    fn apply_in(
        document: &VersitDocument,
        item: &mut OrganizerItem,
        property: &VersitProperty,
    ) -> bool {
        let map = mapping(property.name()).unwrap();
        match map(document, property, item).unwrap() {
            Some(details) => {
                for detail in details {
                    item.save_detail(detail);
                }
                true
            }
            None => false,
        }
    }

    #[test]
    fn table_covers_item_properties() {
        for (name, _) in PROPERTY_MAPPINGS {
            assert!(mapping(name).is_some(), "{name}");
        }
        assert!(mapping("X-CUSTOM").is_none());
    }

    #[test]
    fn duration_before_start_reads_ahead() {
        let duration = VersitProperty::preformatted("DURATION", "PT1H");
        let start = VersitProperty::preformatted("DTSTART", "20260101T100000");
        let document = VersitDocument::new(VersitType::ICalendar20, "VEVENT")
            .with_property(duration.clone())
            .with_property(start.clone());

        let mut item = OrganizerItem::new(ItemType::Event);
        assert!(apply_in(&document, &mut item, &duration));
        assert_eq!(
            event_time(&item),
            EventTime {
                start: None,
                end: Some(ItemDateTime::Floating(datetime(2026, 1, 1, 11, 0, 0, 0))),
                all_day: false,
            }
        );
        apply_in(&document, &mut item, &start);
        assert_eq!(
            event_time(&item),
            EventTime {
                start: Some(ItemDateTime::Floating(datetime(2026, 1, 1, 10, 0, 0, 0))),
                end: Some(ItemDateTime::Floating(datetime(2026, 1, 1, 11, 0, 0, 0))),
                all_day: false,
            }
        );
    }

    #[test]
    fn duration_without_start_is_claimed_empty() {
        let mut todo = OrganizerItem::new(ItemType::Todo);
        assert!(apply(&mut todo, &VersitProperty::preformatted("DURATION", "P1D")));
        assert!(todo.is_empty());
    }

    #[test]
    fn todo_only_properties() {
        let mut event = OrganizerItem::new(ItemType::Event);
        let status = VersitProperty::preformatted("STATUS", "CONFIRMED");
        assert!(!apply(&mut event, &status));
        assert!(!apply(&mut event, &VersitProperty::preformatted("DUE", "20260101")));

        let mut todo = OrganizerItem::new(ItemType::Todo);
        apply(&mut todo, &VersitProperty::preformatted("STATUS", "COMPLETED"));
        apply(&mut todo, &VersitProperty::preformatted("PERCENT-COMPLETE", "100"));
        assert_eq!(
            todo.detail(DetailKind::TodoProgress),
            Some(&Detail::TodoProgress(TodoProgress {
                status: Some(TodoStatus::Completed),
                percentage: Some(100),
                finished: None,
            }))
        );
    }

    #[test]
    fn recurrence_accumulates() {
        let mut item = OrganizerItem::new(ItemType::Event);
        apply(&mut item, &VersitProperty::preformatted("RRULE", "FREQ=DAILY"));
        apply(&mut item, &VersitProperty::preformatted("RRULE", "FREQ=WEEKLY"));
        apply(
            &mut item,
            &VersitProperty::preformatted("EXDATE", "20260102T090000,20260103T090000"),
        );
        let recurrence = recurrence(&item);
        assert_eq!(recurrence.rules.len(), 2);
        assert_eq!(
            recurrence.exception_dates.into_iter().collect::<Vec<_>>(),
            [date(2026, 1, 2), date(2026, 1, 3)]
        );
    }

    #[test]
    fn categories_become_tags() {
        let mut item = OrganizerItem::new(ItemType::Journal);
        let property = VersitProperty::new(
            "CATEGORIES",
            VersitValue::List(vec!["work".to_string(), String::new(), "home".to_string()]),
        );
        apply(&mut item, &property);
        assert_eq!(
            item.details(),
            [Detail::Tag("work".to_string()), Detail::Tag("home".to_string())]
        );
    }

    #[test]
    fn bad_values_are_errors() {
        let item = OrganizerItem::new(ItemType::Todo);
        for (name, value) in [
            ("DTSTART", "tomorrow"),
            ("PRIORITY", "high"),
            ("RRULE", "FREQ=SOMETIMES"),
            ("CLASS", "SECRET"),
        ] {
            let property = VersitProperty::preformatted(name, value);
            let map = mapping(name).unwrap();
            assert!(map(&VersitDocument::default(), &property, &item).is_err(), "{name}:{value}");
        }
    }
}
