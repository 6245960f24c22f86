// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date and date-time values as defined in RFC 5545 Sections 3.3.4 and 3.3.5.

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use pimkit_organizer::ItemDateTime;

use crate::document::VersitProperty;
use crate::keyword::{KW_TZID, KW_VALUE, KW_VALUE_DATE};
use crate::value::miscellaneous::{ValueExpected, fixed_digits};
use crate::value::{ValueError, ValueKind, parse_value};

/// Parse a `DATE` or `DATE-TIME` value.
///
/// A trailing `Z` gives a UTC instant, otherwise a `tzid` gives a zoned wall
/// clock and its absence a floating one. A leap second is clamped to `59`.
///
/// # Errors
/// Returns an error if the text is not a valid date or date-time.
pub fn parse_date_time(text: &str, tzid: Option<&str>) -> Result<ItemDateTime, ValueError> {
    let (date, time) = parse_value(ValueKind::DateTime, text, value_date_time())?;
    let Some((time, utc)) = time else {
        return Ok(ItemDateTime::Date(date));
    };

    let datetime = date.to_datetime(time);
    match (utc, tzid) {
        (true, _) => datetime
            .to_zoned(TimeZone::UTC)
            .map(|zoned| ItemDateTime::Utc(zoned.timestamp()))
            .map_err(|e| ValueError::Syntax {
                kind: ValueKind::DateTime,
                value: text.to_string(),
                message: e.to_string(),
            }),
        (false, Some(tzid)) => Ok(ItemDateTime::Zoned {
            datetime,
            tzid: tzid.to_string(),
        }),
        (false, None) => Ok(ItemDateTime::Floating(datetime)),
    }
}

/// Parse a comma separated list of dates or date-times, as in `RDATE` and
/// `EXDATE`.
///
/// # Errors
/// Returns the first entry that does not parse.
pub fn parse_date_list(text: &str, tzid: Option<&str>) -> Result<Vec<ItemDateTime>, ValueError> {
    text.split(',')
        .map(|item| parse_date_time(item.trim(), tzid))
        .collect()
}

/// Read a date-time property, honouring its `TZID` parameter.
///
/// # Errors
/// Returns an error if the value is not a valid date or date-time.
pub fn property_date_time(property: &VersitProperty) -> Result<ItemDateTime, ValueError> {
    let text = property.value().as_str().unwrap_or_default();
    parse_date_time(text.trim(), property.parameter(KW_TZID))
}

/// Format a date as `YYYYMMDD`.
pub fn format_date(date: Date) -> String {
    date.strftime("%Y%m%d").to_string()
}

/// Format the value part of a date or date-time.
///
/// The timezone of a zoned value is not part of the text, see
/// [`date_time_property`].
pub fn format_date_time(value: &ItemDateTime) -> String {
    match value {
        ItemDateTime::Date(date) => format_date(*date),
        ItemDateTime::Floating(datetime) | ItemDateTime::Zoned { datetime, .. } => {
            datetime.strftime("%Y%m%dT%H%M%S").to_string()
        }
        ItemDateTime::Utc(timestamp) => timestamp.strftime("%Y%m%dT%H%M%SZ").to_string(),
    }
}

/// Build a property carrying a date or date-time, with `VALUE=DATE` for
/// dates and `TZID` for zoned values.
pub fn date_time_property(name: &str, value: &ItemDateTime) -> VersitProperty {
    let property = VersitProperty::preformatted(name, format_date_time(value));
    match value {
        ItemDateTime::Date(_) => property.with_parameter(KW_VALUE, KW_VALUE_DATE),
        ItemDateTime::Zoned { tzid, .. } => property.with_parameter(KW_TZID, tzid.as_str()),
        ItemDateTime::Floating(_) | ItemDateTime::Utc(_) => property,
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
/// ```
pub fn value_date<'src, I, E>() -> impl Parser<'src, I, Date, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    fixed_digits(4)
        .then(fixed_digits(2))
        .then(fixed_digits(2))
        .try_map(|((year, month), day), span| {
            civil_date(year, month, day)
                .ok_or_else(|| E::Error::expected_found([ValueExpected::Date], None, span))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// time-utc     = "Z"
/// ```
///
/// Yields the time and whether it is UTC.
pub fn value_time<'src, I, E>() -> impl Parser<'src, I, (Time, bool), E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    fixed_digits(2)
        .then(fixed_digits(2))
        .then(fixed_digits(2))
        .try_map(|((hour, minute), second), span| {
            civil_time(hour, minute, second.min(59))
                .ok_or_else(|| E::Error::expected_found([ValueExpected::Time], None, span))
        })
        .then(just('Z').or_not().map(|z| z.is_some()))
}

/// ```txt
/// date-time  = date "T" time
/// ```
///
/// A plain `date` is accepted too, with no time part.
pub fn value_date_time<'src, I, E>() -> impl Parser<'src, I, (Date, Option<(Time, bool)>), E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date().then(just('T').ignore_then(value_time()).or_not())
}

fn civil_date(year: u32, month: u32, day: u32) -> Option<Date> {
    let year = i16::try_from(year).ok()?;
    let month = i8::try_from(month).ok()?;
    let day = i8::try_from(day).ok()?;
    Date::new(year, month, day).ok()
}

fn civil_time(hour: u32, minute: u32, second: u32) -> Option<Time> {
    let hour = i8::try_from(hour).ok()?;
    let minute = i8::try_from(minute).ok()?;
    let second = i8::try_from(second).ok()?;
    Time::new(hour, minute, second, 0).ok()
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, datetime};

    use super::*;
    use crate::document::VersitValue;

    #[test]
    fn parses_each_form() {
        assert_eq!(
            parse_date_time("20260314", None).unwrap(),
            ItemDateTime::Date(date(2026, 3, 14))
        );
        assert_eq!(
            parse_date_time("20260314T093000", None).unwrap(),
            ItemDateTime::Floating(datetime(2026, 3, 14, 9, 30, 0, 0))
        );
        assert_eq!(
            parse_date_time("20260314T093000", Some("Europe/Paris")).unwrap(),
            ItemDateTime::Zoned {
                datetime: datetime(2026, 3, 14, 9, 30, 0, 0),
                tzid: "Europe/Paris".to_string(),
            }
        );
        let utc = parse_date_time("20260314T093000Z", Some("Europe/Paris")).unwrap();
        assert_eq!(format_date_time(&utc), "20260314T093000Z");
    }

    #[test]
    fn clamps_leap_second() {
        assert_eq!(
            parse_date_time("20261231T235960", None).unwrap(),
            ItemDateTime::Floating(datetime(2026, 12, 31, 23, 59, 59, 0))
        );
    }

    #[test]
    fn rejects_invalid_values() {
        for src in ["", "2026031", "20260230", "20260314T25", "20260314T250000", "20260314X"] {
            assert!(parse_date_time(src, None).is_err(), "{src} should fail");
        }
        let err = parse_date_time("20261301", None).unwrap_err();
        assert!(matches!(err, ValueError::Syntax { kind: ValueKind::DateTime, .. }));
    }

    #[test]
    fn parses_lists() {
        let dates = parse_date_list("20260101,20260102", None).unwrap();
        assert_eq!(dates.len(), 2);
        assert!(parse_date_list("20260101,bad", None).is_err());
    }

    #[test]
    fn property_round_trip() {
        let values = [
            ItemDateTime::Date(date(2026, 1, 2)),
            ItemDateTime::Floating(datetime(2026, 1, 2, 3, 4, 5, 0)),
            ItemDateTime::Zoned {
                datetime: datetime(2026, 1, 2, 3, 4, 5, 0),
                tzid: "Asia/Shanghai".to_string(),
            },
        ];
        for value in values {
            let property = date_time_property("DTSTART", &value);
            assert_eq!(property_date_time(&property).unwrap(), value);
        }

        let property = date_time_property("DTSTART", &ItemDateTime::Date(date(2026, 1, 2)));
        assert_eq!(property.parameter("VALUE"), Some("DATE"));
        assert_eq!(
            property.value(),
            &VersitValue::Preformatted("20260102".to_string())
        );
    }
}
