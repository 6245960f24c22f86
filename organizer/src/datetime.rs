// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};

/// A point in time as carried by calendar data, which may be date only,
/// floating, absolute, or tied to a named timezone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemDateTime {
    /// Date only without time.
    Date(Date),

    /// Floating date and time without timezone.
    Floating(DateTime),

    /// Absolute instant, written in UTC.
    Utc(Timestamp),

    /// Wall clock time in a named timezone.
    /// NOTE: The timezone identifier is carried verbatim and never resolved.
    Zoned {
        /// Wall clock time.
        datetime: DateTime,
        /// Timezone identifier as written in the source.
        tzid: String,
    },
}

impl ItemDateTime {
    /// Returns the date part
    pub fn date(&self) -> Date {
        match self {
            ItemDateTime::Date(d) => *d,
            ItemDateTime::Floating(dt) | ItemDateTime::Zoned { datetime: dt, .. } => dt.date(),
            ItemDateTime::Utc(ts) => ts.to_zoned(TimeZone::UTC).date(),
        }
    }

    /// Whether the value carries no time of day.
    pub fn is_date_only(&self) -> bool {
        matches!(self, ItemDateTime::Date(_))
    }

    /// Civil date and time used for ordering, midnight for date-only values.
    ///
    /// Zoned values compare by wall clock since the zone is never resolved.
    pub fn sort_key(&self) -> DateTime {
        match self {
            ItemDateTime::Date(d) => d.to_datetime(jiff::civil::Time::midnight()),
            ItemDateTime::Floating(dt) | ItemDateTime::Zoned { datetime: dt, .. } => *dt,
            ItemDateTime::Utc(ts) => ts.to_zoned(TimeZone::UTC).datetime(),
        }
    }

    /// Shift by a duration keeping the same representation.
    ///
    /// Date-only values move by whole days, the remainder is dropped.
    pub fn checked_add(&self, duration: SignedDuration) -> Option<Self> {
        Some(match self {
            ItemDateTime::Date(d) => {
                let days = duration.as_secs() / 86_400;
                let span = jiff::Span::new().try_days(days).ok()?;
                ItemDateTime::Date(d.checked_add(span).ok()?)
            }
            ItemDateTime::Floating(dt) => ItemDateTime::Floating(dt.checked_add(duration).ok()?),
            ItemDateTime::Utc(ts) => ItemDateTime::Utc(ts.checked_add(duration).ok()?),
            ItemDateTime::Zoned { datetime, tzid } => ItemDateTime::Zoned {
                datetime: datetime.checked_add(duration).ok()?,
                tzid: tzid.clone(),
            },
        })
    }
}

impl From<Date> for ItemDateTime {
    fn from(date: Date) -> Self {
        ItemDateTime::Date(date)
    }
}

impl From<DateTime> for ItemDateTime {
    fn from(datetime: DateTime) -> Self {
        ItemDateTime::Floating(datetime)
    }
}

impl From<Timestamp> for ItemDateTime {
    fn from(timestamp: Timestamp) -> Self {
        ItemDateTime::Utc(timestamp)
    }
}
