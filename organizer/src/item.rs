// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::detail::{Detail, DetailKind};
use crate::id::{CollectionId, ItemId};

/// Type of an organizer item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ItemType {
    /// A scheduled event.
    Event,
    /// A single overridden occurrence of a recurring event.
    EventOccurrence,
    /// A task.
    Todo,
    /// A single overridden occurrence of a recurring task.
    TodoOccurrence,
    /// A journal entry.
    Journal,
    /// A free-form note.
    #[default]
    Note,
}

/// A calendar item: a type plus an ordered list of typed details.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrganizerItem {
    id: Option<ItemId>,
    collection_id: Option<CollectionId>,
    item_type: ItemType,
    details: Vec<Detail>,
}

impl OrganizerItem {
    /// Create an item of the given type with no details.
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            ..Self::default()
        }
    }

    /// The id assigned by a manager, if saved.
    pub fn id(&self) -> Option<&ItemId> {
        self.id.as_ref()
    }

    /// Set or clear the id.
    pub fn set_id(&mut self, id: Option<ItemId>) {
        self.id = id;
    }

    /// The collection this item belongs to.
    pub fn collection_id(&self) -> Option<&CollectionId> {
        self.collection_id.as_ref()
    }

    /// Set or clear the collection.
    pub fn set_collection_id(&mut self, collection_id: Option<CollectionId>) {
        self.collection_id = collection_id;
    }

    /// The item type.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// Change the item type.
    pub fn set_item_type(&mut self, item_type: ItemType) {
        self.item_type = item_type;
    }

    /// All details in the order they were saved.
    pub fn details(&self) -> &[Detail] {
        &self.details
    }

    /// Details of one kind, in order.
    pub fn details_of(&self, kind: DetailKind) -> impl Iterator<Item = &Detail> {
        self.details.iter().filter(move |d| d.kind() == kind)
    }

    /// The first detail of a kind.
    pub fn detail(&self, kind: DetailKind) -> Option<&Detail> {
        self.details_of(kind).next()
    }

    /// Save a detail. A detail of a unique kind replaces the existing one in
    /// place; a multi-valued detail is always appended, even when an equal
    /// one exists.
    pub fn save_detail(&mut self, detail: Detail) {
        let kind = detail.kind();
        if kind.is_unique()
            && let Some(slot) = self.details.iter_mut().find(|d| d.kind() == kind)
        {
            *slot = detail;
            return;
        }
        self.details.push(detail);
    }

    /// Remove every detail of a kind, returning how many were removed.
    pub fn remove_details(&mut self, kind: DetailKind) -> usize {
        let before = self.details.len();
        self.details.retain(|d| d.kind() != kind);
        before - self.details.len()
    }

    /// Remove one specific detail, returning whether it was present.
    pub fn remove_detail(&mut self, detail: &Detail) -> bool {
        match self.details.iter().position(|d| d == detail) {
            Some(index) => {
                self.details.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the item has no details.
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::Priority;

    #[test]
    fn unique_kind_replaces_in_place() {
        let mut item = OrganizerItem::new(ItemType::Event);
        item.save_detail(Detail::DisplayLabel("first".to_string()));
        item.save_detail(Detail::Priority(Priority::P1));
        item.save_detail(Detail::DisplayLabel("second".to_string()));

        assert_eq!(
            item.details(),
            &[
                Detail::DisplayLabel("second".to_string()),
                Detail::Priority(Priority::P1)
            ]
        );
    }

    #[test]
    fn multi_kind_appends() {
        let mut item = OrganizerItem::new(ItemType::Todo);
        item.save_detail(Detail::Comment("a".to_string()));
        item.save_detail(Detail::Comment("b".to_string()));
        item.save_detail(Detail::Comment("a".to_string()));

        assert_eq!(item.details_of(DetailKind::Comment).count(), 3);
        assert!(item.remove_detail(&Detail::Comment("a".to_string())));
        assert_eq!(
            item.details(),
            &[
                Detail::Comment("b".to_string()),
                Detail::Comment("a".to_string())
            ]
        );
        assert_eq!(item.remove_details(DetailKind::Comment), 2);
        assert!(item.is_empty());
    }

    #[test]
    fn remove_single_detail() {
        let mut item = OrganizerItem::default();
        assert_eq!(item.item_type(), ItemType::Note);
        item.save_detail(Detail::Tag("x".to_string()));
        assert!(item.remove_detail(&Detail::Tag("x".to_string())));
        assert!(!item.remove_detail(&Detail::Tag("x".to_string())));
    }
}
