// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Failure reasons when a specific value was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueExpected {
    /// A calendar date was expected
    Date,
    /// A time of day was expected
    Time,
    /// A 32-bit signed integer value was expected
    I32,
    /// A 32-bit unsigned integer value was expected
    U32,
    /// A positive 32-bit unsigned integer value was expected
    PositiveU32,
    /// A month number from 1 to 12 was expected
    Month,
    /// Each rule part may appear only once
    RRuleDuplicatePart,
    /// FREQ is required in a rule
    RRuleRequiredFreq,
    /// COUNT and UNTIL must not both appear
    RRuleCountUntilExclusion,
    /// Sub-daily frequencies cannot be represented
    RRuleUnsupportedFrequency,
    /// BYHOUR, BYMINUTE and BYSECOND cannot be represented
    RRuleUnsupportedPart,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::Time => Self::Label(Cow::Borrowed("invalid time")),
            ValueExpected::I32 => Self::Label(Cow::Borrowed("i32 out of range")),
            ValueExpected::U32 => Self::Label(Cow::Borrowed("u32 out of range")),
            ValueExpected::PositiveU32 => Self::Label(Cow::Borrowed("positive u32")),
            ValueExpected::Month => Self::Label(Cow::Borrowed("month between 1 and 12")),
            ValueExpected::RRuleDuplicatePart => {
                Self::Label(Cow::Borrowed("each rule part at most once"))
            }
            ValueExpected::RRuleRequiredFreq => Self::Label(Cow::Borrowed("FREQ part")),
            ValueExpected::RRuleCountUntilExclusion => {
                Self::Label(Cow::Borrowed("either COUNT or UNTIL, not both"))
            }
            ValueExpected::RRuleUnsupportedFrequency => Self::Label(Cow::Borrowed(
                "DAILY, WEEKLY, MONTHLY or YEARLY frequency",
            )),
            ValueExpected::RRuleUnsupportedPart => {
                Self::Label(Cow::Borrowed("no BYHOUR, BYMINUTE or BYSECOND part"))
            }
        }
    }
}

/// A single decimal digit.
pub fn digit<'src, I, E>() -> impl Parser<'src, I, u32, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ '0'..='9' => c }.map(|c: char| c.to_digit(10).unwrap_or_default())
}

/// Exactly `n` decimal digits, `n` small enough not to overflow.
pub fn fixed_digits<'src, I, E>(n: usize) -> impl Parser<'src, I, u32, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    digit()
        .repeated()
        .exactly(n)
        .collect::<Vec<_>>()
        .map(|digits| digits.into_iter().fold(0, |acc, d| acc * 10 + d))
}

/// An unsigned integer of 1 to 10 digits.
pub fn u32_value<'src, I, E>() -> impl Parser<'src, I, u32, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .collect::<String>()
        .try_map_with(|str, e| match lexical::parse_partial::<u32, _>(&str) {
            Ok((v, n)) if n == str.len() => Ok(v),
            Ok(_) | Err(_) => Err(E::Error::expected_found(
                [ValueExpected::U32],
                None,
                e.span(),
            )),
        })
}

/// An unsigned integer greater than zero.
pub fn u32_non_zero<'src, I, E>() -> impl Parser<'src, I, u32, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    u32_value().try_map(|v, span| match v {
        0 => Err(E::Error::expected_found(
            [ValueExpected::PositiveU32],
            None,
            span,
        )),
        v => Ok(v),
    })
}

/// An optionally signed integer, e.g. `-1`, `+2` or `20`.
pub fn i32_value<'src, I, E>() -> impl Parser<'src, I, i32, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    is_positive()
        .then(u32_value())
        .try_map(|(positive, v), span| {
            let v = i32::try_from(v)
                .map_err(|_| E::Error::expected_found([ValueExpected::I32], None, span))?;
            Ok(if positive { v } else { -v })
        })
}

/// An optional `+` or `-`, positive when absent.
pub fn is_positive<'src, I, E>() -> impl Parser<'src, I, bool, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}
