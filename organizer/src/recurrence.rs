// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value type.
//!
//! A rule describes a repeating pattern without expanding it into concrete
//! occurrences. It is a transport value: setters never validate, so a rule
//! read from a foreign source survives unchanged until some higher layer
//! decides what to do with it.

use std::collections::BTreeSet;

use jiff::civil::Date;

/// How often a rule repeats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum Frequency {
    /// The rule has not been given a frequency.
    #[default]
    Invalid,
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every year.
    Yearly,
}

/// Day of the week, ordered Monday first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[expect(missing_docs)]
pub enum Weekday {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(day: jiff::civil::Weekday) -> Self {
        match day {
            jiff::civil::Weekday::Monday => Weekday::Monday,
            jiff::civil::Weekday::Tuesday => Weekday::Tuesday,
            jiff::civil::Weekday::Wednesday => Weekday::Wednesday,
            jiff::civil::Weekday::Thursday => Weekday::Thursday,
            jiff::civil::Weekday::Friday => Weekday::Friday,
            jiff::civil::Weekday::Saturday => Weekday::Saturday,
            jiff::civil::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

impl From<Weekday> for jiff::civil::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => jiff::civil::Weekday::Monday,
            Weekday::Tuesday => jiff::civil::Weekday::Tuesday,
            Weekday::Wednesday => jiff::civil::Weekday::Wednesday,
            Weekday::Thursday => jiff::civil::Weekday::Thursday,
            Weekday::Friday => jiff::civil::Weekday::Friday,
            Weekday::Saturday => jiff::civil::Weekday::Saturday,
            Weekday::Sunday => jiff::civil::Weekday::Sunday,
        }
    }
}

/// Month of the year, numbered from 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[repr(u8)]
#[expect(missing_docs)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Month for a 1-based month number, `None` outside `1..=12`.
    pub fn from_number(number: u8) -> Option<Self> {
        Some(match number {
            1 => Month::January,
            2 => Month::February,
            3 => Month::March,
            4 => Month::April,
            5 => Month::May,
            6 => Month::June,
            7 => Month::July,
            8 => Month::August,
            9 => Month::September,
            10 => Month::October,
            11 => Month::November,
            12 => Month::December,
            _ => return None,
        })
    }

    /// The 1-based month number.
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Which kind of limit a rule carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs)]
pub enum LimitType {
    NoLimit,
    CountLimit,
    DateLimit,
}

/// End condition of a rule. Exactly one variant is active at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Limit {
    /// Repeats forever.
    #[default]
    Unlimited,
    /// Stops after this many occurrences.
    Count(u32),
    /// Stops after this date (inclusive).
    Until(Date),
}

impl Limit {
    /// The kind of this limit.
    pub fn limit_type(&self) -> LimitType {
        match self {
            Limit::Unlimited => LimitType::NoLimit,
            Limit::Count(_) => LimitType::CountLimit,
            Limit::Until(_) => LimitType::DateLimit,
        }
    }
}

/// A structured, non-expanded description of a repeating pattern.
///
/// Set-valued fields are kept ordered, so two rules built by inserting the
/// same values in a different order are equal and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: u32,
    limit: Limit,
    days_of_week: BTreeSet<Weekday>,
    days_of_month: BTreeSet<i32>,
    days_of_year: BTreeSet<i32>,
    months_of_year: BTreeSet<Month>,
    weeks_of_year: BTreeSet<i32>,
    positions: BTreeSet<i32>,
    first_day_of_week: Weekday,
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            frequency: Frequency::Invalid,
            interval: 1,
            limit: Limit::Unlimited,
            days_of_week: BTreeSet::new(),
            days_of_month: BTreeSet::new(),
            days_of_year: BTreeSet::new(),
            months_of_year: BTreeSet::new(),
            weeks_of_year: BTreeSet::new(),
            positions: BTreeSet::new(),
            first_day_of_week: Weekday::Monday,
        }
    }
}

impl RecurrenceRule {
    /// Create an empty rule with an invalid frequency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty rule repeating with the given frequency.
    pub fn with_frequency(frequency: Frequency) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    /// Set the frequency.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    /// The frequency, [`Frequency::Invalid`] when never set.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Set the interval between periods. Zero is stored as-is.
    pub fn set_interval(&mut self, interval: u32) {
        self.interval = interval;
    }

    /// The interval between periods, 1 by default.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Limit the rule to `count` occurrences, discarding any previous limit.
    pub fn set_limit_count(&mut self, count: u32) {
        self.limit = Limit::Count(count);
    }

    /// Limit the rule to occurrences on or before `date`, discarding any
    /// previous limit.
    pub fn set_limit_date(&mut self, date: Date) {
        self.limit = Limit::Until(date);
    }

    /// Remove any limit.
    pub fn clear_limit(&mut self) {
        self.limit = Limit::Unlimited;
    }

    /// Replace the limit.
    pub fn set_limit(&mut self, limit: Limit) {
        self.limit = limit;
    }

    /// The active limit.
    pub fn limit(&self) -> Limit {
        self.limit
    }

    /// The kind of the active limit.
    pub fn limit_type(&self) -> LimitType {
        self.limit.limit_type()
    }

    /// The occurrence count, if the rule is count limited.
    pub fn limit_count(&self) -> Option<u32> {
        match self.limit {
            Limit::Count(count) => Some(count),
            _ => None,
        }
    }

    /// The end date, if the rule is date limited.
    pub fn limit_date(&self) -> Option<Date> {
        match self.limit {
            Limit::Until(date) => Some(date),
            _ => None,
        }
    }

    /// Set the days of the week.
    pub fn set_days_of_week(&mut self, days: impl IntoIterator<Item = Weekday>) {
        self.days_of_week = days.into_iter().collect();
    }

    /// The days of the week.
    pub fn days_of_week(&self) -> &BTreeSet<Weekday> {
        &self.days_of_week
    }

    /// Set the days of the month; negative values count from the end.
    pub fn set_days_of_month(&mut self, days: impl IntoIterator<Item = i32>) {
        self.days_of_month = days.into_iter().collect();
    }

    /// The days of the month.
    pub fn days_of_month(&self) -> &BTreeSet<i32> {
        &self.days_of_month
    }

    /// Set the days of the year; negative values count from the end.
    pub fn set_days_of_year(&mut self, days: impl IntoIterator<Item = i32>) {
        self.days_of_year = days.into_iter().collect();
    }

    /// The days of the year.
    pub fn days_of_year(&self) -> &BTreeSet<i32> {
        &self.days_of_year
    }

    /// Set the months of the year.
    pub fn set_months_of_year(&mut self, months: impl IntoIterator<Item = Month>) {
        self.months_of_year = months.into_iter().collect();
    }

    /// The months of the year.
    pub fn months_of_year(&self) -> &BTreeSet<Month> {
        &self.months_of_year
    }

    /// Set the weeks of the year; negative values count from the end.
    pub fn set_weeks_of_year(&mut self, weeks: impl IntoIterator<Item = i32>) {
        self.weeks_of_year = weeks.into_iter().collect();
    }

    /// The weeks of the year.
    pub fn weeks_of_year(&self) -> &BTreeSet<i32> {
        &self.weeks_of_year
    }

    /// Set the positions within the period's set of candidates.
    pub fn set_positions(&mut self, positions: impl IntoIterator<Item = i32>) {
        self.positions = positions.into_iter().collect();
    }

    /// The positions within the period's set of candidates.
    pub fn positions(&self) -> &BTreeSet<i32> {
        &self.positions
    }

    /// Set the day a week starts on.
    pub fn set_first_day_of_week(&mut self, day: Weekday) {
        self.first_day_of_week = day;
    }

    /// The day a week starts on, Monday by default.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::hash::{DefaultHasher, Hash, Hasher};

    use jiff::civil::date;
    use strum::IntoEnumIterator;

    use super::*;

    fn hash_of(rule: &RecurrenceRule) -> u64 {
        let mut hasher = DefaultHasher::new();
        rule.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn defaults_are_explicit() {
        let rule = RecurrenceRule::new();
        assert_eq!(rule.frequency(), Frequency::Invalid);
        assert_eq!(rule.interval(), 1);
        assert_eq!(rule.limit_type(), LimitType::NoLimit);
        assert_eq!(rule.first_day_of_week(), Weekday::Monday);
        assert!(rule.days_of_week().is_empty());
        assert!(rule.positions().is_empty());
    }

    #[test]
    fn set_fields_ignore_insertion_order() {
        let mut a = RecurrenceRule::with_frequency(Frequency::Weekly);
        a.set_days_of_week([Weekday::Monday, Weekday::Wednesday, Weekday::Friday]);
        a.set_days_of_month([1, 15, -1]);
        a.set_months_of_year([Month::March, Month::January]);
        a.set_limit_count(10);

        let mut b = RecurrenceRule::new();
        b.set_limit_count(10);
        b.set_months_of_year([Month::January, Month::March, Month::January]);
        b.set_days_of_month([-1, 1, 15]);
        b.set_days_of_week([Weekday::Friday, Weekday::Monday, Weekday::Wednesday]);
        b.set_frequency(Frequency::Weekly);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn every_field_participates_in_equality() {
        let base = RecurrenceRule::with_frequency(Frequency::Daily);
        let mut variants = Vec::new();

        let mut r = base.clone();
        r.set_frequency(Frequency::Yearly);
        variants.push(r);
        let mut r = base.clone();
        r.set_interval(2);
        variants.push(r);
        let mut r = base.clone();
        r.set_limit_count(3);
        variants.push(r);
        let mut r = base.clone();
        r.set_days_of_week([Weekday::Sunday]);
        variants.push(r);
        let mut r = base.clone();
        r.set_days_of_month([2]);
        variants.push(r);
        let mut r = base.clone();
        r.set_days_of_year([200]);
        variants.push(r);
        let mut r = base.clone();
        r.set_months_of_year([Month::June]);
        variants.push(r);
        let mut r = base.clone();
        r.set_weeks_of_year([-1]);
        variants.push(r);
        let mut r = base.clone();
        r.set_positions([1]);
        variants.push(r);
        let mut r = base.clone();
        r.set_first_day_of_week(Weekday::Sunday);
        variants.push(r);

        for variant in &variants {
            assert_ne!(&base, variant);
        }
    }

    #[test]
    fn limit_setters_are_mutually_exclusive() {
        let mut rule = RecurrenceRule::new();
        rule.set_limit_count(5);
        assert_eq!(rule.limit_type(), LimitType::CountLimit);
        assert_eq!(rule.limit_count(), Some(5));

        rule.set_limit_date(date(2026, 12, 31));
        assert_eq!(rule.limit_type(), LimitType::DateLimit);
        assert_eq!(rule.limit_count(), None);
        assert_eq!(rule.limit_date(), Some(date(2026, 12, 31)));

        rule.clear_limit();
        assert_eq!(rule.limit_type(), LimitType::NoLimit);
        assert_eq!(rule.limit_date(), None);
    }

    #[test]
    fn setters_do_not_validate() {
        let mut rule = RecurrenceRule::new();
        rule.set_interval(0);
        rule.set_days_of_month([0, 40, -99]);
        assert_eq!(rule.interval(), 0);
        assert_eq!(rule.days_of_month().len(), 3);
    }

    #[test]
    fn equal_rules_collapse_in_sets() {
        let mut set = HashSet::new();
        for day in Weekday::iter() {
            let mut a = RecurrenceRule::with_frequency(Frequency::Weekly);
            a.set_days_of_week([day, Weekday::Monday]);
            let mut b = RecurrenceRule::with_frequency(Frequency::Weekly);
            b.set_days_of_week([Weekday::Monday, day]);
            set.insert(a);
            set.insert(b);
        }
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn month_numbers_round_trip() {
        for month in Month::iter() {
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn weekday_converts_to_and_from_jiff() {
        for day in Weekday::iter() {
            let jiff_day: jiff::civil::Weekday = day.into();
            assert_eq!(Weekday::from(jiff_day), day);
        }
    }
}
