// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Backend contract: engines that store items, factories that build them,
//! and a registry to look factories up by name.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::id::{CollectionId, IdError, ItemId, StorageLocation};
use crate::item::OrganizerItem;
use crate::sort::{SortOrder, sort_items};

/// Construction parameters of an engine, by name.
pub type EngineParameters = BTreeMap<String, String>;

/// Errors reported by engines and the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ManagerError {
    /// The item is not stored by this engine.
    #[error("item '{0}' does not exist")]
    DoesNotExist(ItemId),

    /// No factory is registered under this name.
    #[error("unknown manager '{0}'")]
    UnknownManager(String),

    /// A parameter or argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An id could not be built.
    #[error(transparent)]
    Id(#[from] IdError),
}

/// A storage backend for organizer items.
pub trait ManagerEngine: Debug {
    /// Name the engine is registered under.
    fn manager_name(&self) -> &str;

    /// Uri that prefixes every id this engine hands out.
    fn manager_uri(&self) -> &str;

    /// Collection new items are placed in.
    fn default_collection_id(&self) -> &CollectionId;

    /// Save items. Items without an id are added and given one; items with
    /// an id replace the stored version. Nothing is saved on error.
    ///
    /// # Errors
    /// Returns [`ManagerError::DoesNotExist`] if an id is unknown to the engine.
    fn save_items(&mut self, items: &mut [OrganizerItem]) -> Result<(), ManagerError>;

    /// Fetch one item.
    ///
    /// # Errors
    /// Returns [`ManagerError::DoesNotExist`] if the id is unknown to the engine.
    fn item(&self, id: &ItemId) -> Result<OrganizerItem, ManagerError>;

    /// All items, sorted by the given orders. Unsorted items keep insertion
    /// order.
    fn items(&self, sort_orders: &[SortOrder]) -> Vec<OrganizerItem>;

    /// Remove items. Nothing is removed on error.
    ///
    /// # Errors
    /// Returns [`ManagerError::DoesNotExist`] if an id is unknown to the engine.
    fn remove_items(&mut self, ids: &[ItemId]) -> Result<(), ManagerError>;
}

/// Builds engines of one kind.
pub trait ManagerEngineFactory: Debug {
    /// Name engines built by this factory are registered under.
    fn manager_name(&self) -> &str;

    /// Build an engine.
    ///
    /// # Errors
    /// Returns [`ManagerError::InvalidArgument`] for unusable parameters.
    fn engine(&self, parameters: &EngineParameters) -> Result<Box<dyn ManagerEngine>, ManagerError>;
}

/// Factories by manager name. Created explicitly and owned by the caller.
#[derive(Debug, Default)]
pub struct EngineRegistry {
    factories: BTreeMap<String, Box<dyn ManagerEngineFactory>>,
}

impl EngineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in engines.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(MemoryEngineFactory));
        registry
    }

    /// Register a factory, replacing any factory of the same name.
    pub fn register(&mut self, factory: Box<dyn ManagerEngineFactory>) {
        let name = factory.manager_name().to_string();
        tracing::debug!(manager = %name, "registering engine factory");
        self.factories.insert(name, factory);
    }

    /// Registered manager names, sorted.
    pub fn manager_names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build an engine by manager name.
    ///
    /// # Errors
    /// Returns [`ManagerError::UnknownManager`] if no factory has this name,
    /// or the factory's own error.
    #[tracing::instrument(skip(self))]
    pub fn create(
        &self,
        name: &str,
        parameters: &EngineParameters,
    ) -> Result<Box<dyn ManagerEngine>, ManagerError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ManagerError::UnknownManager(name.to_string()))?;
        factory.engine(parameters)
    }
}

impl Drop for EngineRegistry {
    fn drop(&mut self) {
        tracing::trace!(count = self.factories.len(), "dropping engine registry");
    }
}

const MEMORY_MANAGER: &str = "memory";

/// Builds [`MemoryEngine`]s.
///
/// Recognised parameters: `storage` (`user` or `system`) selects the storage
/// location of the default collection.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryEngineFactory;

impl ManagerEngineFactory for MemoryEngineFactory {
    fn manager_name(&self) -> &str {
        MEMORY_MANAGER
    }

    fn engine(&self, parameters: &EngineParameters) -> Result<Box<dyn ManagerEngine>, ManagerError> {
        let storage = match parameters.get("storage") {
            Some(s) => s
                .parse()
                .map_err(|_| ManagerError::InvalidArgument(format!("storage '{s}'")))?,
            None => StorageLocation::default(),
        };
        Ok(Box::new(MemoryEngine::new(storage)?))
    }
}

/// Engine keeping items in memory, in insertion order.
#[derive(Debug)]
pub struct MemoryEngine {
    collection: CollectionId,
    items: Vec<OrganizerItem>,
    next_id: u64,
}

impl MemoryEngine {
    /// Create an empty engine whose default collection lives in `storage`.
    ///
    /// # Errors
    /// Returns an error if the collection id cannot be built.
    pub fn new(storage: StorageLocation) -> Result<Self, ManagerError> {
        let uuid = uuid::Uuid::new_v4().to_string();
        let collection = CollectionId::new(MEMORY_MANAGER, storage, uuid)?;
        Ok(Self {
            collection,
            items: Vec::new(),
            next_id: 1,
        })
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == Some(id))
    }
}

impl ManagerEngine for MemoryEngine {
    fn manager_name(&self) -> &str {
        MEMORY_MANAGER
    }

    fn manager_uri(&self) -> &str {
        MEMORY_MANAGER
    }

    fn default_collection_id(&self) -> &CollectionId {
        &self.collection
    }

    #[tracing::instrument(skip_all, fields(count = items.len()))]
    fn save_items(&mut self, items: &mut [OrganizerItem]) -> Result<(), ManagerError> {
        if let Some(id) = items
            .iter()
            .filter_map(OrganizerItem::id)
            .find(|id| self.position(id).is_none())
        {
            return Err(ManagerError::DoesNotExist(id.clone()));
        }

        for item in items.iter_mut() {
            if item.collection_id().is_none() {
                item.set_collection_id(Some(self.collection.clone()));
            }
            match item.id().and_then(|id| self.position(id)) {
                Some(index) => {
                    if let Some(slot) = self.items.get_mut(index) {
                        *slot = item.clone();
                    }
                }
                None => {
                    let id = ItemId::new(MEMORY_MANAGER, self.next_id.to_string())?;
                    self.next_id += 1;
                    tracing::debug!(%id, "adding item");
                    item.set_id(Some(id));
                    self.items.push(item.clone());
                }
            }
        }
        Ok(())
    }

    fn item(&self, id: &ItemId) -> Result<OrganizerItem, ManagerError> {
        self.position(id)
            .and_then(|index| self.items.get(index))
            .cloned()
            .ok_or_else(|| ManagerError::DoesNotExist(id.clone()))
    }

    fn items(&self, sort_orders: &[SortOrder]) -> Vec<OrganizerItem> {
        let mut items = self.items.clone();
        sort_items(&mut items, sort_orders);
        items
    }

    fn remove_items(&mut self, ids: &[ItemId]) -> Result<(), ManagerError> {
        if let Some(id) = ids.iter().find(|id| self.position(id).is_none()) {
            return Err(ManagerError::DoesNotExist(id.clone()));
        }
        self.items
            .retain(|item| item.id().is_none_or(|id| !ids.contains(id)));
        Ok(())
    }
}
