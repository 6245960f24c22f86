// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the engine registry and the memory engine.

use pimkit_organizer::{
    BlankPolicy, Detail, DetailField, DetailKind, EngineParameters, EngineRegistry, ItemDateTime,
    ItemId, ItemType, ManagerEngine, ManagerEngineFactory, ManagerError, MemoryEngine,
    OrganizerItem, SortOrder, StorageLocation, TodoTime,
};

#[derive(Debug)]
struct ReadOnlyFactory;

impl ManagerEngineFactory for ReadOnlyFactory {
    fn manager_name(&self) -> &str {
        "readonly"
    }

    fn engine(
        &self,
        _parameters: &EngineParameters,
    ) -> Result<Box<dyn ManagerEngine>, ManagerError> {
        Err(ManagerError::InvalidArgument("read only".to_string()))
    }
}

fn todo(due: Option<ItemDateTime>) -> OrganizerItem {
    let mut item = OrganizerItem::new(ItemType::Todo);
    item.save_detail(Detail::TodoTime(TodoTime {
        due,
        ..TodoTime::default()
    }));
    item
}

#[test]
fn test_registry_lists_custom_factories() {
    let mut registry = EngineRegistry::with_builtin();
    registry.register(Box::new(ReadOnlyFactory));
    assert_eq!(registry.manager_names(), ["memory", "readonly"]);

    let err = registry
        .create("readonly", &EngineParameters::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid argument: read only");
}

#[test]
fn test_items_sorted_by_due_with_blanks_first() {
    let mut engine = MemoryEngine::new(StorageLocation::UserData).unwrap();
    let late = ItemDateTime::Date(jiff::civil::date(2026, 12, 1));
    let early = ItemDateTime::Date(jiff::civil::date(2026, 1, 1));
    let mut items = vec![todo(Some(late.clone())), todo(None), todo(Some(early.clone()))];
    engine.save_items(&mut items).unwrap();

    let order = SortOrder::new(DetailKind::TodoTime, DetailField::Due)
        .with_blank_policy(BlankPolicy::BlanksFirst);
    let dues: Vec<_> = engine
        .items(&[order])
        .into_iter()
        .map(|item| match item.detail(DetailKind::TodoTime) {
            Some(Detail::TodoTime(t)) => t.due.clone(),
            _ => None,
        })
        .collect();
    assert_eq!(dues, [None, Some(early), Some(late)]);
}

#[test]
fn test_ids_survive_string_round_trip() {
    let mut engine = MemoryEngine::new(StorageLocation::SystemData).unwrap();
    let mut items = vec![todo(None)];
    engine.save_items(&mut items).unwrap();

    let id = items[0].id().unwrap().clone();
    let parsed: ItemId = id.to_string().parse().unwrap();
    assert_eq!(engine.item(&parsed).unwrap(), items[0]);

    let collection = engine.default_collection_id();
    assert_eq!(
        collection.to_string().parse::<pimkit_organizer::CollectionId>().as_ref(),
        Ok(collection)
    );
}
