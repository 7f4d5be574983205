// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows registry backed store.
//!
//! ```text
//! RegistryStore
//!   User   --> HKEY_CURRENT_USER\Environment
//!   System --> HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\Session Manager\Environment
//!
//! values with '%' --> REG_EXPAND_SZ, others --> REG_SZ
//! enumerate: REG_SZ + REG_EXPAND_SZ, other types skipped with a warning
//! ```
//!
//! On other hosts every call fails with [`StoreError::Unsupported`].

use super::{Access, DeleteOutcome, Store};
use crate::error::StoreError;
use crate::model::Scope;

#[cfg(windows)]
mod windows;

/// The host's persistent environment store.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryStore;

impl RegistryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl Store for RegistryStore {
    fn ensure_access(&self, scope: Scope, access: Access) -> Result<(), StoreError> {
        windows::open(scope, access).map(drop)
    }

    fn upsert(&self, scope: Scope, name: &str, value: &str) -> Result<(), StoreError> {
        let key = windows::open(scope, Access::Write)?;
        tracing::debug!(%scope, name, "Setting registry value");
        key.set(name, value)
    }

    fn delete(&self, scope: Scope, name: &str) -> Result<DeleteOutcome, StoreError> {
        let key = windows::open(scope, Access::Write)?;
        tracing::debug!(%scope, name, "Deleting registry value");
        key.delete(name)
    }

    fn enumerate(&self, scope: Scope) -> Result<Vec<(String, String)>, StoreError> {
        let key = windows::open(scope, Access::Read)?;
        key.values()
    }
}

#[cfg(not(windows))]
impl Store for RegistryStore {
    fn ensure_access(&self, _scope: Scope, _access: Access) -> Result<(), StoreError> {
        Err(StoreError::Unsupported)
    }

    fn upsert(&self, _scope: Scope, _name: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unsupported)
    }

    fn delete(&self, _scope: Scope, _name: &str) -> Result<DeleteOutcome, StoreError> {
        Err(StoreError::Unsupported)
    }

    fn enumerate(&self, _scope: Scope) -> Result<Vec<(String, String)>, StoreError> {
        Err(StoreError::Unsupported)
    }
}
