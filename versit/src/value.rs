// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Codecs for structured property values.
//!
//! Structured values are kept preformatted in the document tree and only
//! parsed here, when the importer maps them to details. The formatting
//! counterparts produce what the exporter writes.

mod datetime;
mod duration;
mod miscellaneous;
mod rrule;
pub(crate) mod text;

pub use datetime::{
    date_time_property, format_date, format_date_time, parse_date_list, parse_date_time,
    property_date_time,
};
pub use duration::{format_duration, parse_duration};
pub use miscellaneous::ValueExpected;
pub use rrule::{format_recurrence_rule, parse_recurrence_rule};
pub use text::{escape_text, split_text_list, unescape_text};

use std::str::FromStr;

use chumsky::prelude::*;
use pimkit_organizer::Frequency;

/// Kind of value a codec works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ValueKind {
    /// A `DATE` or `DATE-TIME`.
    DateTime,
    /// A `DURATION`.
    Duration,
    /// A `RECUR`.
    RecurrenceRule,
    /// An `INTEGER`.
    Integer,
    /// One of a fixed set of keywords, e.g. a `STATUS`.
    Keyword,
}

/// Errors from value codecs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValueError {
    /// The text does not follow the grammar of its kind.
    #[error("invalid {kind} value {value:?}: {message}")]
    Syntax {
        /// Kind of value being parsed.
        kind: ValueKind,
        /// The offending text.
        value: String,
        /// What the parser expected.
        message: String,
    },

    /// A rule frequency has no textual form.
    #[error("recurrence frequency {0} cannot be written")]
    Unrepresentable(Frequency),
}

/// Parse an `INTEGER` value and narrow it to `T`.
///
/// # Errors
/// Returns an error if the text is not an integer or does not fit `T`.
pub fn parse_integer<T: TryFrom<i64>>(text: &str) -> Result<T, ValueError> {
    let syntax = |message: &str| ValueError::Syntax {
        kind: ValueKind::Integer,
        value: text.to_string(),
        message: message.to_string(),
    };
    let value = lexical::parse::<i64, _>(text.trim()).map_err(|e| syntax(&e.to_string()))?;
    T::try_from(value).map_err(|_| syntax("out of range"))
}

/// Parse one of a fixed set of keywords, case-insensitively.
///
/// # Errors
/// Returns an error if the text names no known keyword.
pub fn parse_keyword<T: FromStr>(text: &str) -> Result<T, ValueError> {
    text.trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| ValueError::Syntax {
            kind: ValueKind::Keyword,
            value: text.to_string(),
            message: "unknown keyword".to_string(),
        })
}

/// Run a value parser over the whole of `src`.
fn parse_value<'src, T>(
    kind: ValueKind,
    src: &'src str,
    parser: impl Parser<'src, &'src str, T, extra::Err<Rich<'src, char>>>,
) -> Result<T, ValueError> {
    parser
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errs| ValueError::Syntax {
            kind,
            value: src.to_string(),
            message: errs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        })
}

#[cfg(test)]
mod tests {
    use pimkit_organizer::{Classification, TodoStatus};

    use super::*;

    #[test]
    fn parses_integers_in_range() {
        assert_eq!(parse_integer::<u8>(" 42 ").unwrap(), 42);
        assert_eq!(parse_integer::<i64>("-7").unwrap(), -7);
        assert!(parse_integer::<u8>("256").is_err());
        assert!(parse_integer::<u8>("-1").is_err());
        assert!(parse_integer::<i64>("4x").is_err());
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(
            parse_keyword::<Classification>("private").unwrap(),
            Classification::Private
        );
        assert_eq!(
            parse_keyword::<TodoStatus>("IN-PROCESS").unwrap(),
            TodoStatus::InProcess
        );
        let err = parse_keyword::<TodoStatus>("CONFIRMED").unwrap_err();
        assert!(matches!(err, ValueError::Syntax { kind: ValueKind::Keyword, .. }));
    }
}
