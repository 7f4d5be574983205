// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process store with registry semantics.
//!
//! ```text
//! MemoryStore
//!   vars:  BTreeMap<(Scope, StoreKey), String>   StoreKey: PATH == Path == path
//!   calls: [StoreCall]                           every trait call, in order
//!   denied scopes  --> Access(PermissionDenied)
//!   failing names  --> Write / Delete errors
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Access, DeleteOutcome, Store, location};
use crate::error::StoreError;
use crate::model::Scope;

/// A case-insensitive variable name, matching registry value-name lookup.
#[derive(Debug, Clone, Eq)]
pub(super) struct StoreKey(String);

impl StoreKey {
    pub(super) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for StoreKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl PartialOrd for StoreKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StoreKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .to_ascii_lowercase()
            .cmp(&other.0.to_ascii_lowercase())
    }
}

/// Kind of store call recorded by [`MemoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    EnsureAccess(Access),
    Upsert,
    Delete,
    Enumerate,
}

/// One recorded store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    pub scope: Scope,
    pub kind: CallKind,
    pub name: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    vars: BTreeMap<(Scope, StoreKey), String>,
    calls: Vec<StoreCall>,
}

/// In-memory [`Store`] used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    denied: BTreeSet<Scope>,
    failing: BTreeSet<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a variable without recording a call.
    #[must_use]
    pub fn with_var(self, scope: Scope, name: &str, value: &str) -> Self {
        self.lock()
            .vars
            .insert((scope, StoreKey::new(name)), value.to_string());
        self
    }

    /// Makes every access to `scope` fail with a permission error.
    #[must_use]
    pub fn deny(mut self, scope: Scope) -> Self {
        self.denied.insert(scope);
        self
    }

    /// Makes writes and deletes of `name` fail.
    #[must_use]
    pub fn fail_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_ascii_lowercase());
        self
    }

    /// Current value of `name` in `scope`.
    #[must_use]
    pub fn get(&self, scope: Scope, name: &str) -> Option<String> {
        self.lock().vars.get(&(scope, StoreKey::new(name))).cloned()
    }

    /// All variables of `scope`, ordered by name.
    #[must_use]
    pub fn snapshot(&self, scope: Scope) -> Vec<(String, String)> {
        self.lock()
            .vars
            .iter()
            .filter(|((s, _), _)| *s == scope)
            .map(|((_, key), value)| (key.0.clone(), value.clone()))
            .collect()
    }

    /// Every call made through the [`Store`] trait so far.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Number of calls made against `scope`.
    #[must_use]
    pub fn calls_for(&self, scope: Scope) -> usize {
        self.lock().calls.iter().filter(|c| c.scope == scope).count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, scope: Scope, kind: CallKind, name: Option<&str>) {
        self.lock().calls.push(StoreCall {
            scope,
            kind,
            name: name.map(str::to_string),
        });
    }

    fn check_access(&self, scope: Scope, access: Access) -> Result<(), StoreError> {
        if self.denied.contains(&scope) {
            return Err(StoreError::Access {
                scope,
                location: location(scope).to_string(),
                access,
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "access is denied",
                ),
            });
        }
        Ok(())
    }

    fn injected_failure(&self, name: &str) -> Option<std::io::Error> {
        self.failing
            .contains(&name.to_ascii_lowercase())
            .then(|| std::io::Error::other("injected failure"))
    }
}

impl Store for MemoryStore {
    fn ensure_access(&self, scope: Scope, access: Access) -> Result<(), StoreError> {
        self.record(scope, CallKind::EnsureAccess(access), None);
        self.check_access(scope, access)
    }

    fn upsert(&self, scope: Scope, name: &str, value: &str) -> Result<(), StoreError> {
        self.record(scope, CallKind::Upsert, Some(name));
        self.check_access(scope, Access::Write)?;
        if let Some(source) = self.injected_failure(name) {
            return Err(StoreError::Write {
                name: name.to_string(),
                location: location(scope).to_string(),
                source,
            });
        }

        let mut state = self.lock();
        // Keep the existing spelling of the name, like the registry does.
        let key = StoreKey::new(name);
        if let Some(existing) = state.vars.get_mut(&(scope, key.clone())) {
            *existing = value.to_string();
        } else {
            state.vars.insert((scope, key), value.to_string());
        }
        Ok(())
    }

    fn delete(&self, scope: Scope, name: &str) -> Result<DeleteOutcome, StoreError> {
        self.record(scope, CallKind::Delete, Some(name));
        self.check_access(scope, Access::Write)?;
        if let Some(source) = self.injected_failure(name) {
            return Err(StoreError::Delete {
                name: name.to_string(),
                location: location(scope).to_string(),
                source,
            });
        }

        let removed = self.lock().vars.remove(&(scope, StoreKey::new(name)));
        Ok(if removed.is_some() {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::AlreadyAbsent
        })
    }

    fn enumerate(&self, scope: Scope) -> Result<Vec<(String, String)>, StoreError> {
        self.record(scope, CallKind::Enumerate, None);
        self.check_access(scope, Access::Read)?;
        Ok(self.snapshot(scope))
    }
}
