// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use crate::detail::{DetailField, DetailKind, FieldValue};
use crate::item::OrganizerItem;

/// Sort direction, either ascending or descending.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Ascending,

    /// Descending order.
    Descending,
}

/// Where items without a value are placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BlankPolicy {
    /// Blanks before any value.
    BlanksFirst,

    /// Blanks after any value.
    #[default]
    BlanksLast,
}

/// Whether text values compare case sensitively.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    /// Compare text exactly.
    #[default]
    Sensitive,

    /// Compare text ignoring case.
    Insensitive,
}

/// One key of a multi-key item sort: a field of a detail kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    detail: DetailKind,
    field: DetailField,
    direction: SortDirection,
    blank_policy: BlankPolicy,
    case_sensitivity: CaseSensitivity,
}

impl SortOrder {
    /// Sort ascending by `field` of the first `detail` carrying it, blanks last.
    pub fn new(detail: DetailKind, field: DetailField) -> Self {
        Self {
            detail,
            field,
            direction: SortDirection::default(),
            blank_policy: BlankPolicy::default(),
            case_sensitivity: CaseSensitivity::default(),
        }
    }

    /// Set the direction.
    #[must_use]
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the blank policy.
    #[must_use]
    pub fn with_blank_policy(mut self, blank_policy: BlankPolicy) -> Self {
        self.blank_policy = blank_policy;
        self
    }

    /// Set the case sensitivity.
    #[must_use]
    pub fn with_case_sensitivity(mut self, case_sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = case_sensitivity;
        self
    }

    /// The detail kind sorted on.
    pub fn detail(&self) -> DetailKind {
        self.detail
    }

    /// The field sorted on.
    pub fn field(&self) -> DetailField {
        self.field
    }

    /// The direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// The blank policy.
    pub fn blank_policy(&self) -> BlankPolicy {
        self.blank_policy
    }

    /// The case sensitivity.
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    fn value_of(&self, item: &OrganizerItem) -> Option<FieldValue> {
        let value = item
            .details_of(self.detail)
            .find_map(|d| d.field(self.field))?;
        Some(match (value, self.case_sensitivity) {
            (FieldValue::Text(s), CaseSensitivity::Insensitive) => FieldValue::Text(s.to_lowercase()),
            (value, _) => value,
        })
    }

    /// Compare two items by this key. Blanks obey the blank policy in
    /// either direction.
    pub fn compare(&self, a: &OrganizerItem, b: &OrganizerItem) -> Ordering {
        let blank = match self.blank_policy {
            BlankPolicy::BlanksFirst => Ordering::Less,
            BlankPolicy::BlanksLast => Ordering::Greater,
        };
        match (self.value_of(a), self.value_of(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => blank,
            (Some(_), None) => blank.reverse(),
            (Some(a), Some(b)) => match self.direction {
                SortDirection::Ascending => a.cmp(&b),
                SortDirection::Descending => b.cmp(&a),
            },
        }
    }
}

/// Stable sort by several keys, earlier keys taking precedence.
pub fn sort_items(items: &mut [OrganizerItem], orders: &[SortOrder]) {
    items.sort_by(|a, b| {
        orders
            .iter()
            .map(|order| order.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::{Detail, Priority};
    use crate::item::ItemType;

    fn labelled(label: Option<&str>, priority: Priority) -> OrganizerItem {
        let mut item = OrganizerItem::new(ItemType::Event);
        if let Some(label) = label {
            item.save_detail(Detail::DisplayLabel(label.to_string()));
        }
        item.save_detail(Detail::Priority(priority));
        item
    }

    fn labels(items: &[OrganizerItem]) -> Vec<Option<String>> {
        items
            .iter()
            .map(|i| match i.detail(DetailKind::DisplayLabel) {
                Some(Detail::DisplayLabel(s)) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn blanks_ignore_direction() {
        let by_label = SortOrder::new(DetailKind::DisplayLabel, DetailField::Text)
            .with_blank_policy(BlankPolicy::BlanksFirst)
            .with_direction(SortDirection::Descending);
        let mut items = vec![
            labelled(Some("a"), Priority::None),
            labelled(None, Priority::None),
            labelled(Some("b"), Priority::None),
        ];
        sort_items(&mut items, &[by_label]);
        assert_eq!(
            labels(&items),
            [None, Some("b".to_string()), Some("a".to_string())]
        );

        let by_label = by_label.with_blank_policy(BlankPolicy::BlanksLast);
        sort_items(&mut items, &[by_label]);
        assert_eq!(
            labels(&items),
            [Some("b".to_string()), Some("a".to_string()), None]
        );
    }

    #[test]
    fn case_insensitive_text() {
        let order = SortOrder::new(DetailKind::DisplayLabel, DetailField::Text)
            .with_case_sensitivity(CaseSensitivity::Insensitive);
        let mut items = vec![
            labelled(Some("beta"), Priority::None),
            labelled(Some("Alpha"), Priority::None),
        ];
        sort_items(&mut items, &[order]);
        assert_eq!(
            labels(&items),
            [Some("Alpha".to_string()), Some("beta".to_string())]
        );
    }

    #[test]
    fn later_keys_break_ties_and_sort_is_stable() {
        let by_priority = SortOrder::new(DetailKind::Priority, DetailField::Priority);
        let by_label = SortOrder::new(DetailKind::DisplayLabel, DetailField::Text);
        let mut items = vec![
            labelled(Some("z"), Priority::P2),
            labelled(Some("y"), Priority::P1),
            labelled(Some("x"), Priority::P2),
            labelled(Some("w"), Priority::None),
        ];
        sort_items(&mut items, &[by_priority]);
        assert_eq!(
            labels(&items),
            ["y", "z", "x", "w"].map(|s| Some(s.to_string()))
        );

        sort_items(&mut items, &[by_priority, by_label]);
        assert_eq!(
            labels(&items),
            ["y", "x", "z", "w"].map(|s| Some(s.to_string()))
        );
    }
}
