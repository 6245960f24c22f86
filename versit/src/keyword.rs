// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords of the Versit formats.

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

// Components
pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VCARD: &str = "VCARD";
pub const KW_VEVENT: &str = "VEVENT";
pub const KW_VTODO: &str = "VTODO";
pub const KW_VJOURNAL: &str = "VJOURNAL";
pub const KW_VTIMEZONE: &str = "VTIMEZONE";
pub const KW_VALARM: &str = "VALARM";

// Parameters
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";
pub const KW_VALUE_DATE: &str = "DATE";
pub const KW_VALUE_DATE_TIME: &str = "DATE-TIME";
pub const KW_RELATED: &str = "RELATED";
pub const KW_RELATED_END: &str = "END";

// Calendar properties
pub const KW_VERSION: &str = "VERSION";
pub const KW_PRODID: &str = "PRODID";
pub const KW_VERSION_ICAL: &str = "2.0";
pub const KW_VERSION_VCARD21: &str = "2.1";
pub const KW_VERSION_VCARD30: &str = "3.0";
pub const KW_VERSION_VCARD40: &str = "4.0";

// Component properties
pub const KW_UID: &str = "UID";
pub const KW_SUMMARY: &str = "SUMMARY";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_LOCATION: &str = "LOCATION";
pub const KW_COMMENT: &str = "COMMENT";
pub const KW_CATEGORIES: &str = "CATEGORIES";
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DUE: &str = "DUE";
pub const KW_DURATION: &str = "DURATION";
pub const KW_COMPLETED: &str = "COMPLETED";
pub const KW_PERCENT_COMPLETE: &str = "PERCENT-COMPLETE";
pub const KW_STATUS: &str = "STATUS";
pub const KW_PRIORITY: &str = "PRIORITY";
pub const KW_CLASS: &str = "CLASS";
pub const KW_SEQUENCE: &str = "SEQUENCE";
pub const KW_CREATED: &str = "CREATED";
pub const KW_LAST_MODIFIED: &str = "LAST-MODIFIED";
pub const KW_RRULE: &str = "RRULE";
pub const KW_EXRULE: &str = "EXRULE";
pub const KW_RDATE: &str = "RDATE";
pub const KW_EXDATE: &str = "EXDATE";
pub const KW_RECURRENCE_ID: &str = "RECURRENCE-ID";

// Alarm properties
pub const KW_ACTION: &str = "ACTION";
pub const KW_ACTION_AUDIO: &str = "AUDIO";
pub const KW_ACTION_DISPLAY: &str = "DISPLAY";
pub const KW_ACTION_EMAIL: &str = "EMAIL";
pub const KW_TRIGGER: &str = "TRIGGER";
pub const KW_REPEAT: &str = "REPEAT";
pub const KW_ATTENDEE: &str = "ATTENDEE";
pub const KW_ATTACH: &str = "ATTACH";

// Recurrence rule parts
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_FREQ_SECONDLY: &str = "SECONDLY";
pub const KW_RRULE_FREQ_MINUTELY: &str = "MINUTELY";
pub const KW_RRULE_FREQ_HOURLY: &str = "HOURLY";
pub const KW_RRULE_FREQ_DAILY: &str = "DAILY";
pub const KW_RRULE_FREQ_WEEKLY: &str = "WEEKLY";
pub const KW_RRULE_FREQ_MONTHLY: &str = "MONTHLY";
pub const KW_RRULE_FREQ_YEARLY: &str = "YEARLY";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYSECOND: &str = "BYSECOND";
pub const KW_RRULE_BYMINUTE: &str = "BYMINUTE";
pub const KW_RRULE_BYHOUR: &str = "BYHOUR";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTHDAY: &str = "BYMONTHDAY";
pub const KW_RRULE_BYYEARDAY: &str = "BYYEARDAY";
pub const KW_RRULE_BYWEEKNO: &str = "BYWEEKNO";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";
pub const KW_RRULE_BYSETPOS: &str = "BYSETPOS";
pub const KW_RRULE_WKST: &str = "WKST";

// Weekdays
pub const KW_DAY_MO: &str = "MO";
pub const KW_DAY_TU: &str = "TU";
pub const KW_DAY_WE: &str = "WE";
pub const KW_DAY_TH: &str = "TH";
pub const KW_DAY_FR: &str = "FR";
pub const KW_DAY_SA: &str = "SA";
pub const KW_DAY_SU: &str = "SU";
