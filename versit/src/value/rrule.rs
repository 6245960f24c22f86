// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule values as defined in RFC 5545 Section 3.3.10.

use chumsky::extra::ParserExtra;
use chumsky::input::{Input, ValueInput};
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::civil::Date;
use pimkit_organizer::{Frequency, Limit, Month, RecurrenceRule, Weekday};

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{format_date, value_date_time};
use crate::value::miscellaneous::{ValueExpected, i32_value, u32_non_zero, u32_value};
use crate::value::{ValueError, ValueKind, parse_value};

/// Parse the value of an `RRULE` or `EXRULE` property.
///
/// Part names and values are matched case-insensitively. Ordinals in front of
/// `BYDAY` weekdays are folded into the rule's positions, and `UNTIL` keeps
/// only its date.
///
/// # Errors
/// Returns an error on malformed parts, a missing or repeated part, both
/// `COUNT` and `UNTIL`, or a sub-daily frequency or time part.
pub fn parse_recurrence_rule(text: &str) -> Result<RecurrenceRule, ValueError> {
    let upper = text.trim().to_ascii_uppercase();
    parse_value(ValueKind::RecurrenceRule, &upper, value_rrule())
}

/// Format a rule as the value of an `RRULE` property.
///
/// `INTERVAL=1` and `WKST=MO` are implied and left out.
///
/// # Errors
/// Returns an error if the rule has no representable frequency.
pub fn format_recurrence_rule(rule: &RecurrenceRule) -> Result<String, ValueError> {
    let freq = match rule.frequency() {
        Frequency::Daily => KW_RRULE_FREQ_DAILY,
        Frequency::Weekly => KW_RRULE_FREQ_WEEKLY,
        Frequency::Monthly => KW_RRULE_FREQ_MONTHLY,
        Frequency::Yearly => KW_RRULE_FREQ_YEARLY,
        Frequency::Invalid => return Err(ValueError::Unrepresentable(rule.frequency())),
    };

    let mut parts = vec![format!("{KW_RRULE_FREQ}={freq}")];
    if rule.interval() != 1 {
        parts.push(format!("{KW_RRULE_INTERVAL}={}", rule.interval()));
    }
    match rule.limit() {
        Limit::Unlimited => {}
        Limit::Count(count) => parts.push(format!("{KW_RRULE_COUNT}={count}")),
        Limit::Until(date) => parts.push(format!("{KW_RRULE_UNTIL}={}", format_date(date))),
    }

    let mut push_list = |name: &str, items: Vec<String>| {
        if !items.is_empty() {
            parts.push(format!("{name}={}", items.join(",")));
        }
    };
    push_list(
        KW_RRULE_BYDAY,
        rule.days_of_week()
            .iter()
            .map(|d| weekday_code(*d).to_string())
            .collect(),
    );
    push_list(KW_RRULE_BYMONTHDAY, to_strings(rule.days_of_month()));
    push_list(KW_RRULE_BYYEARDAY, to_strings(rule.days_of_year()));
    push_list(KW_RRULE_BYWEEKNO, to_strings(rule.weeks_of_year()));
    push_list(
        KW_RRULE_BYMONTH,
        rule.months_of_year()
            .iter()
            .map(|m| m.number().to_string())
            .collect(),
    );
    push_list(KW_RRULE_BYSETPOS, to_strings(rule.positions()));

    if rule.first_day_of_week() != Weekday::Monday {
        parts.push(format!(
            "{KW_RRULE_WKST}={}",
            weekday_code(rule.first_day_of_week())
        ));
    }
    Ok(parts.join(";"))
}

fn to_strings<'a>(values: impl IntoIterator<Item = &'a i32>) -> Vec<String> {
    values.into_iter().map(ToString::to_string).collect()
}

fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => KW_DAY_MO,
        Weekday::Tuesday => KW_DAY_TU,
        Weekday::Wednesday => KW_DAY_WE,
        Weekday::Thursday => KW_DAY_TH,
        Weekday::Friday => KW_DAY_FR,
        Weekday::Saturday => KW_DAY_SA,
        Weekday::Sunday => KW_DAY_SU,
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
pub fn value_rrule<'src, I, E>() -> impl Parser<'src, I, RecurrenceRule, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    recur_rule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .try_map(build_from_parts::<I, E::Error>)
}

#[derive(Debug, Clone)]
enum Part {
    Freq(Frequency),
    Until(Date),
    Count(u32),
    Interval(u32),
    ByDay(Vec<(Option<i32>, Weekday)>),
    ByMonthDay(Vec<i32>),
    ByYearDay(Vec<i32>),
    ByWeekNo(Vec<i32>),
    ByMonth(Vec<Month>),
    BySetPos(Vec<i32>),
    Wkst(Weekday),
    TimeOfDay,
}

impl Part {
    fn name(&self) -> &'static str {
        match self {
            Part::Freq(_) => KW_RRULE_FREQ,
            Part::Until(_) => KW_RRULE_UNTIL,
            Part::Count(_) => KW_RRULE_COUNT,
            Part::Interval(_) => KW_RRULE_INTERVAL,
            Part::ByDay(_) => KW_RRULE_BYDAY,
            Part::ByMonthDay(_) => KW_RRULE_BYMONTHDAY,
            Part::ByYearDay(_) => KW_RRULE_BYYEARDAY,
            Part::ByWeekNo(_) => KW_RRULE_BYWEEKNO,
            Part::ByMonth(_) => KW_RRULE_BYMONTH,
            Part::BySetPos(_) => KW_RRULE_BYSETPOS,
            Part::Wkst(_) => KW_RRULE_WKST,
            Part::TimeOfDay => KW_RRULE_BYHOUR,
        }
    }
}

fn build_from_parts<'src, I, Err>(parts: Vec<Part>, span: I::Span) -> Result<RecurrenceRule, Err>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    Err: LabelError<'src, I, ValueExpected>,
{
    let fail = |expected: ValueExpected| Err::expected_found([expected], None, span);

    let mut seen: Vec<&'static str> = Vec::with_capacity(parts.len());
    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut rule = RecurrenceRule::new();
    let mut positions = Vec::new();

    for part in parts {
        if seen.contains(&part.name()) {
            return Err(fail(ValueExpected::RRuleDuplicatePart));
        }
        seen.push(part.name());

        match part {
            Part::Freq(f) => freq = Some(f),
            Part::Until(date) => until = Some(date),
            Part::Count(c) => count = Some(c),
            Part::Interval(i) => rule.set_interval(i),
            Part::ByDay(days) => {
                positions.extend(days.iter().filter_map(|(ordinal, _)| *ordinal));
                rule.set_days_of_week(days.into_iter().map(|(_, day)| day));
            }
            Part::ByMonthDay(v) => rule.set_days_of_month(v),
            Part::ByYearDay(v) => rule.set_days_of_year(v),
            Part::ByWeekNo(v) => rule.set_weeks_of_year(v),
            Part::ByMonth(v) => rule.set_months_of_year(v),
            Part::BySetPos(v) => positions.extend(v),
            Part::Wkst(day) => rule.set_first_day_of_week(day),
            Part::TimeOfDay => return Err(fail(ValueExpected::RRuleUnsupportedPart)),
        }
    }

    match freq {
        None => return Err(fail(ValueExpected::RRuleRequiredFreq)),
        Some(Frequency::Invalid) => return Err(fail(ValueExpected::RRuleUnsupportedFrequency)),
        Some(freq) => rule.set_frequency(freq),
    }

    match (count, until) {
        (Some(_), Some(_)) => return Err(fail(ValueExpected::RRuleCountUntilExclusion)),
        (Some(count), None) => rule.set_limit_count(count),
        (None, Some(date)) => rule.set_limit_date(date),
        (None, None) => {}
    }

    rule.set_positions(positions);
    Ok(rule)
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn recur_rule_part<'src, I, E>() -> impl Parser<'src, I, Part, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let kw = |kw| just(kw).ignore_then(just('='));
    let int_list = || {
        i32_value()
            .separated_by(just(','))
            .at_least(1)
            .collect::<Vec<i32>>()
    };

    let freq = kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq);

    // enddate = date / date-time
    let until = kw(KW_RRULE_UNTIL)
        .ignore_then(value_date_time())
        .map(|(date, _)| Part::Until(date));

    let count = kw(KW_RRULE_COUNT)
        .ignore_then(u32_value())
        .map(Part::Count);

    let interval = kw(KW_RRULE_INTERVAL)
        .ignore_then(u32_non_zero())
        .map(Part::Interval);

    // BYSECOND, BYMINUTE and BYHOUR are recognised only to be rejected
    let time_of_day = choice((
        kw(KW_RRULE_BYSECOND),
        kw(KW_RRULE_BYMINUTE),
        kw(KW_RRULE_BYHOUR),
    ))
    .ignore_then(any().filter(|c: &char| *c != ';').repeated())
    .to(Part::TimeOfDay);

    // BYDAY - weekday with optional occurrence
    let by_day = kw(KW_RRULE_BYDAY)
        .ignore_then(
            i32_value()
                .or_not()
                .then(weekday())
                .separated_by(just(','))
                .at_least(1)
                .collect(),
        )
        .map(Part::ByDay);

    let by_month_day = kw(KW_RRULE_BYMONTHDAY)
        .ignore_then(int_list())
        .map(Part::ByMonthDay);

    let by_year_day = kw(KW_RRULE_BYYEARDAY)
        .ignore_then(int_list())
        .map(Part::ByYearDay);

    let by_week_no = kw(KW_RRULE_BYWEEKNO)
        .ignore_then(int_list())
        .map(Part::ByWeekNo);

    // BYMONTH - 1 to 12
    let by_month = kw(KW_RRULE_BYMONTH)
        .ignore_then(
            u32_value()
                .try_map(|n, span| {
                    u8::try_from(n)
                        .ok()
                        .and_then(Month::from_number)
                        .ok_or_else(|| E::Error::expected_found([ValueExpected::Month], None, span))
                })
                .separated_by(just(','))
                .at_least(1)
                .collect(),
        )
        .map(Part::ByMonth);

    let by_set_pos = kw(KW_RRULE_BYSETPOS)
        .ignore_then(int_list())
        .map(Part::BySetPos);

    let wkst = kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst);

    choice((
        freq,
        until,
        count,
        interval,
        time_of_day,
        by_day,
        by_month_day,
        by_year_day,
        by_week_no,
        by_month,
        by_set_pos,
        wkst,
    ))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
///
/// Sub-daily frequencies yield [`Frequency::Invalid`].
fn freq<'src, I, E>() -> impl Parser<'src, I, Frequency, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_RRULE_FREQ_SECONDLY).to(Frequency::Invalid),
        just(KW_RRULE_FREQ_MINUTELY).to(Frequency::Invalid),
        just(KW_RRULE_FREQ_HOURLY).to(Frequency::Invalid),
        just(KW_RRULE_FREQ_DAILY).to(Frequency::Daily),
        just(KW_RRULE_FREQ_WEEKLY).to(Frequency::Weekly),
        just(KW_RRULE_FREQ_MONTHLY).to(Frequency::Monthly),
        just(KW_RRULE_FREQ_YEARLY).to(Frequency::Yearly),
    ))
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, Weekday, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_DAY_SU).to(Weekday::Sunday),
        just(KW_DAY_MO).to(Weekday::Monday),
        just(KW_DAY_TU).to(Weekday::Tuesday),
        just(KW_DAY_WE).to(Weekday::Wednesday),
        just(KW_DAY_TH).to(Weekday::Thursday),
        just(KW_DAY_FR).to(Weekday::Friday),
        just(KW_DAY_SA).to(Weekday::Saturday),
    ))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn parses_rrule_freq_only() {
        let rule = parse_recurrence_rule("FREQ=WEEKLY").unwrap();
        assert_eq!(rule, RecurrenceRule::with_frequency(Frequency::Weekly));
        assert_eq!(rule.interval(), 1);
        assert_eq!(rule.limit(), Limit::Unlimited);
    }

    #[test]
    fn parses_rrule_parts() {
        let rule = parse_recurrence_rule(
            "FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=MO,-1FR;BYMONTHDAY=1,-1;BYMONTH=1,12;WKST=SU",
        )
        .unwrap();
        assert_eq!(rule.frequency(), Frequency::Monthly);
        assert_eq!(rule.interval(), 2);
        assert_eq!(rule.limit_count(), Some(10));
        assert_eq!(
            rule.days_of_week().iter().copied().collect::<Vec<_>>(),
            [Weekday::Monday, Weekday::Friday]
        );
        assert_eq!(rule.positions().iter().copied().collect::<Vec<_>>(), [-1]);
        assert_eq!(rule.days_of_month().iter().copied().collect::<Vec<_>>(), [-1, 1]);
        assert_eq!(
            rule.months_of_year().iter().copied().collect::<Vec<_>>(),
            [Month::January, Month::December]
        );
        assert_eq!(rule.first_day_of_week(), Weekday::Sunday);
    }

    #[test]
    fn parses_rrule_with_until() {
        for src in ["FREQ=DAILY;UNTIL=20261231", "freq=daily;until=20261231T235959z"] {
            let rule = parse_recurrence_rule(src).unwrap();
            assert_eq!(rule.limit(), Limit::Until(date(2026, 12, 31)), "{src}");
        }
    }

    #[test]
    fn part_order_does_not_matter() {
        let a = parse_recurrence_rule("FREQ=YEARLY;BYMONTH=3;BYSETPOS=2").unwrap();
        let b = parse_recurrence_rule("BYSETPOS=2;BYMONTH=3;FREQ=YEARLY").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_rules() {
        let fail_cases = [
            "",                              // empty
            "INTERVAL=2",                    // missing FREQ
            "FREQ=DAILY;FREQ=WEEKLY",        // duplicate FREQ
            "FREQ=DAILY;BYDAY=MO;BYDAY=TU",  // duplicate part
            "FREQ=DAILY;COUNT=3;UNTIL=20260101", // COUNT with UNTIL
            "FREQ=HOURLY",                   // sub-daily frequency
            "FREQ=DAILY;BYHOUR=9",           // time of day part
            "FREQ=DAILY;BYMONTH=13",         // month out of range
            "FREQ=DAILY;INTERVAL=0",         // interval must be positive
            "FREQ=FORTNIGHTLY",              // unknown frequency
            "FREQ=DAILY;",                   // trailing separator
        ];
        for src in fail_cases {
            assert!(parse_recurrence_rule(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn formats_rrule() {
        let mut rule = RecurrenceRule::with_frequency(Frequency::Weekly);
        rule.set_interval(2);
        rule.set_limit_date(date(2027, 1, 31));
        rule.set_days_of_week([Weekday::Friday, Weekday::Monday]);
        rule.set_positions([-1]);
        rule.set_first_day_of_week(Weekday::Sunday);
        let text = format_recurrence_rule(&rule).unwrap();
        assert_eq!(
            text,
            "FREQ=WEEKLY;INTERVAL=2;UNTIL=20270131;BYDAY=MO,FR;BYSETPOS=-1;WKST=SU"
        );
        assert_eq!(parse_recurrence_rule(&text).unwrap(), rule);

        let plain = RecurrenceRule::with_frequency(Frequency::Daily);
        assert_eq!(format_recurrence_rule(&plain).unwrap(), "FREQ=DAILY");
        assert!(format_recurrence_rule(&RecurrenceRule::new()).is_err());
    }
}
