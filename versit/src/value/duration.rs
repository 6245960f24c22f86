// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type as defined in RFC 5545 Section 3.3.6.

use std::fmt::Write;

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::SignedDuration;

use crate::value::miscellaneous::{ValueExpected, is_positive, u32_value};
use crate::value::{ValueError, ValueKind, parse_value};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Parse a duration such as `-PT15M` or `P1W`.
///
/// # Errors
/// Returns an error if the text is not a valid duration.
pub fn parse_duration(text: &str) -> Result<SignedDuration, ValueError> {
    parse_value(ValueKind::Duration, text, value_duration()).map(SignedDuration::from_secs)
}

/// Format a duration in its shortest form, whole weeks as `PnW`.
///
/// Sub-second precision is dropped; zero is written as `PT0S`.
pub fn format_duration(duration: SignedDuration) -> String {
    let secs = duration.as_secs();
    let mut out = String::new();
    if secs < 0 {
        out.push('-');
    }
    out.push('P');

    let total = secs.unsigned_abs();
    if total == 0 {
        out.push_str("T0S");
        return out;
    }

    let per_week = SECONDS_PER_WEEK.unsigned_abs();
    if total % per_week == 0 {
        let _ = write!(out, "{}W", total / per_week);
        return out;
    }

    let days = total / SECONDS_PER_DAY.unsigned_abs();
    let hours = total % SECONDS_PER_DAY.unsigned_abs() / SECONDS_PER_HOUR.unsigned_abs();
    let minutes = total % SECONDS_PER_HOUR.unsigned_abs() / SECONDS_PER_MINUTE.unsigned_abs();
    let seconds = total % SECONDS_PER_MINUTE.unsigned_abs();

    if days > 0 {
        let _ = write!(out, "{days}D");
    }
    if hours + minutes + seconds > 0 {
        out.push('T');
        if hours > 0 {
            let _ = write!(out, "{hours}H");
        }
        // dur-hour is followed by dur-minute before any dur-second
        if minutes > 0 || (hours > 0 && seconds > 0) {
            let _ = write!(out, "{minutes}M");
        }
        if seconds > 0 {
            let _ = write!(out, "{seconds}S");
        }
    }
    out
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
///
/// Yields signed seconds.
pub fn value_duration<'src, I, E>() -> impl Parser<'src, I, i64, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let int = u32_value().map(i64::from);

    let week = int.clone().then_ignore(just('W'));

    let second_val = int.clone().then_ignore(just('S'));
    let minute_val = int.clone().then_ignore(just('M'));
    let hour_val = int.clone().then_ignore(just('H'));

    // dur-second = 1*DIGIT "S"
    let second_only = second_val.clone();

    // dur-minute = 1*DIGIT "M" [dur-second]
    let minute_with_second = minute_val
        .clone()
        .then(second_val.clone().or_not())
        .map(|(m, s)| m * SECONDS_PER_MINUTE + s.unwrap_or(0));

    // dur-hour = 1*DIGIT "H" [dur-minute]
    let hour_with_minute = hour_val
        .then(minute_val.then(second_val.or_not()).or_not())
        .map(|(h, ms)| {
            let (m, s) = ms.map_or((0, 0), |(m, s)| (m, s.unwrap_or(0)));
            h * SECONDS_PER_HOUR + m * SECONDS_PER_MINUTE + s
        });

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((hour_with_minute, minute_with_second, second_only)));

    // dur-date = dur-day [dur-time]
    let day = int.then_ignore(just('D'));
    let date = day
        .then(time.clone().or_not())
        .map(|(d, t)| d * SECONDS_PER_DAY + t.unwrap_or(0));

    let week = week.map(|w| w * SECONDS_PER_WEEK);

    is_positive()
        .then_ignore(just('P'))
        .then(choice((date, time, week)))
        .map(|(positive, secs)| if positive { secs } else { -secs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duration() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.6
            ("P15DT5H0M20S", 15 * 86_400 + 5 * 3_600 + 20),
            ("P7W",          7 * 604_800),
            // extra tests
            ("+P3W",         3 * 604_800),
            ("-P1W",         -604_800),
            ("-PT10H11M12S", -(10 * 3_600 + 11 * 60 + 12)),
            ("PT15M",        900),
            ("-PT15M",       -900),
            ("PT30S",        30),
            ("PT1H30M",      5_400),
            ("P1D",          86_400),
        ];
        for (src, secs) in success_cases {
            assert_eq!(parse_duration(src).unwrap().as_secs(), secs, "Failed to parse: {src}");
        }

        let fail_cases = [
            "P",           // missing duration value
            "PT",          // missing time value
            "P3X",         // invalid designator
            "P-3W",        // invalid negative sign position
            "P3DT4H5M6",   // missing 'S' designator
            "3W",          // missing 'P' designator
            "P10H11M12S",  // missing 'T' designator
            "PT1H2S",      // dur-second must follow dur-minute
        ];
        for src in fail_cases {
            assert!(parse_duration(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn formats_shortest_form() {
        let cases = [
            (0, "PT0S"),
            (-900, "-PT15M"),
            (604_800, "P1W"),
            (86_400 + 3_600, "P1DT1H"),
            (3_605, "PT1H0M5S"),
            (90_061, "P1DT1H1M1S"),
            (-86_400, "-P1D"),
        ];
        for (secs, text) in cases {
            let formatted = format_duration(SignedDuration::from_secs(secs));
            assert_eq!(formatted, text);
            assert_eq!(parse_duration(&formatted).unwrap().as_secs(), secs);
        }
    }
}
