// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Engine-scoped identities of items and collections.
//!
//! Both ids render as `<manager_uri>:<rest>` and parse back losslessly. A
//! manager uri is a non-empty run of `[A-Za-z0-9._-]`, so the first `:` always
//! ends it.

use std::fmt::{self, Display};
use std::str::FromStr;

/// Error from building or parsing an id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum IdError {
    /// The string has no `:` after the manager uri.
    #[error("missing ':' separator in id '{0}'")]
    MissingSeparator(String),

    /// The manager uri is empty or contains characters outside `[A-Za-z0-9._-]`.
    #[error("invalid manager uri '{0}'")]
    InvalidManager(String),

    /// The engine-local part is empty.
    #[error("empty local id")]
    EmptyLocalId,

    /// The storage location of a collection id is unknown.
    #[error("unknown storage location '{0}'")]
    InvalidStorage(String),
}

fn validate_manager(manager_uri: &str) -> Result<(), IdError> {
    let valid = !manager_uri.is_empty()
        && manager_uri
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(IdError::InvalidManager(manager_uri.to_string()))
    }
}

fn split_manager(s: &str) -> Result<(&str, &str), IdError> {
    let (manager_uri, rest) = s
        .split_once(':')
        .ok_or_else(|| IdError::MissingSeparator(s.to_string()))?;
    validate_manager(manager_uri)?;
    Ok((manager_uri, rest))
}

/// Identity of an item within the manager that stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    manager_uri: String,
    local_id: String,
}

impl ItemId {
    /// Create an id, validating both parts.
    ///
    /// # Errors
    /// Returns an error if the manager uri is invalid or the local id is empty.
    pub fn new(manager_uri: impl Into<String>, local_id: impl Into<String>) -> Result<Self, IdError> {
        let manager_uri = manager_uri.into();
        let local_id = local_id.into();
        validate_manager(&manager_uri)?;
        if local_id.is_empty() {
            return Err(IdError::EmptyLocalId);
        }
        Ok(Self {
            manager_uri,
            local_id,
        })
    }

    /// The uri of the owning manager.
    pub fn manager_uri(&self) -> &str {
        &self.manager_uri
    }

    /// The engine-local part.
    pub fn local_id(&self) -> &str {
        &self.local_id
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.manager_uri, self.local_id)
    }
}

impl FromStr for ItemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (manager_uri, local_id) = split_manager(s)?;
        Self::new(manager_uri, local_id)
    }
}

/// Where a collection is stored by its engine.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
pub enum StorageLocation {
    /// Per-user data.
    #[default]
    #[strum(serialize = "user")]
    UserData,

    /// System-wide data.
    #[strum(serialize = "system")]
    SystemData,
}

/// Identity of a collection within the manager that stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId {
    manager_uri: String,
    storage: StorageLocation,
    uuid: String,
}

impl CollectionId {
    /// Create an id, validating the manager uri and the uuid.
    ///
    /// # Errors
    /// Returns an error if the manager uri is invalid or the uuid is empty.
    pub fn new(
        manager_uri: impl Into<String>,
        storage: StorageLocation,
        uuid: impl Into<String>,
    ) -> Result<Self, IdError> {
        let manager_uri = manager_uri.into();
        let uuid = uuid.into();
        validate_manager(&manager_uri)?;
        if uuid.is_empty() {
            return Err(IdError::EmptyLocalId);
        }
        Ok(Self {
            manager_uri,
            storage,
            uuid,
        })
    }

    /// The uri of the owning manager.
    pub fn manager_uri(&self) -> &str {
        &self.manager_uri
    }

    /// The storage location.
    pub fn storage(&self) -> StorageLocation {
        self.storage
    }

    /// The engine-local uuid.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.manager_uri, self.storage, self.uuid)
    }
}

impl FromStr for CollectionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (manager_uri, rest) = split_manager(s)?;
        let (storage, uuid) = rest
            .split_once('/')
            .ok_or_else(|| IdError::InvalidStorage(rest.to_string()))?;
        let storage = storage
            .parse()
            .map_err(|_| IdError::InvalidStorage(storage.to_string()))?;
        Self::new(manager_uri, storage, uuid)
    }
}
