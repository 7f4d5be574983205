// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent environment variable store.
//!
//! # Architecture
//!
//! ```text
//! Store (trait)
//!   ensure_access(scope, access)   open + close, fails with Access
//!   upsert(scope, name, value)     write or overwrite
//!   delete(scope, name)            Deleted | AlreadyAbsent
//!   enumerate(scope)               [(name, value)]
//!
//! RegistryStore   HKCU\Environment / HKLM\...\Session Manager\Environment
//! MemoryStore     in-process, case-insensitive keys, call log
//! DryRunStore<S>  reads through S, never writes
//! ```
//!
//! - **Idempotent delete**: a missing name is `AlreadyAbsent`, not an error
//! - **No buffering**: every write reaches the store before returning

pub mod dry;
pub mod memory;
pub mod registry;

#[cfg(test)]
mod tests;

use crate::error::StoreError;
use crate::model::Scope;

pub use dry::DryRunStore;
pub use memory::MemoryStore;
pub use registry::RegistryStore;

/// Access requested when opening a scope location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "reading"),
            Self::Write => write!(f, "writing"),
        }
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The value existed and was removed.
    Deleted,
    /// The value did not exist; nothing to do.
    AlreadyAbsent,
}

/// Physical location of a scope in the host store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub hive: &'static str,
    pub subkey: &'static str,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, r"{}\{}", self.hive, self.subkey)
    }
}

/// Registry location backing `scope`.
#[must_use]
pub const fn location(scope: Scope) -> Location {
    match scope {
        Scope::User => Location {
            hive: "HKEY_CURRENT_USER",
            subkey: "Environment",
        },
        Scope::System => Location {
            hive: "HKEY_LOCAL_MACHINE",
            subkey: r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment",
        },
    }
}

/// Name→value store with two scopes.
pub trait Store: Send + Sync {
    /// Opens the location of `scope` with `access` and closes it again.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Access`] if the location cannot be opened.
    fn ensure_access(&self, scope: Scope, access: Access) -> Result<(), StoreError>;

    /// Writes or overwrites `name` in `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Access`] if the location cannot be opened for
    /// writing, or [`StoreError::Write`] if the value cannot be stored.
    fn upsert(&self, scope: Scope, name: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `name` from `scope`. A missing name is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Access`] or [`StoreError::Delete`].
    fn delete(&self, scope: Scope, name: &str) -> Result<DeleteOutcome, StoreError>;

    /// Returns every name→value pair currently in `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Access`] if the location cannot be opened for reading.
    fn enumerate(&self, scope: Scope) -> Result<Vec<(String, String)>, StoreError>;
}
