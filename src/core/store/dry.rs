// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dry-run wrapper: reads through to the real store, logs writes instead of
//! performing them.
//!
//! ```text
//! DryRunStore
//!   inner:   S                                         never written
//!   pending: BTreeMap<(Scope, StoreKey), Option<String>>
//!            Some(value) --> would be set
//!            None        --> would be deleted
//!
//! lookup: pending first, then inner
//! ```

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::memory::StoreKey;
use super::{Access, DeleteOutcome, Store};
use crate::error::StoreError;
use crate::model::Scope;

type Pending = BTreeMap<(Scope, StoreKey), Option<String>>;

/// A [`Store`] that never modifies the wrapped store.
///
/// Writes of the current run are kept in an overlay, so a delete reports
/// what the same sequence of calls would report against the real store.
#[derive(Debug)]
pub struct DryRunStore<S> {
    inner: S,
    pending: Mutex<Pending>,
}

impl<S: Store> DryRunStore<S> {
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn exists(&self, scope: Scope, name: &str) -> Result<bool, StoreError> {
        if let Some(value) = self.pending().get(&(scope, StoreKey::new(name))) {
            return Ok(value.is_some());
        }
        Ok(self
            .inner
            .enumerate(scope)?
            .iter()
            .any(|(existing, _)| existing.eq_ignore_ascii_case(name)))
    }
}

impl<S: Store> Store for DryRunStore<S> {
    fn ensure_access(&self, scope: Scope, _access: Access) -> Result<(), StoreError> {
        self.inner.ensure_access(scope, Access::Read)
    }

    fn upsert(&self, scope: Scope, name: &str, value: &str) -> Result<(), StoreError> {
        tracing::info!(%scope, name, value, "Dry run: would set variable");
        self.pending()
            .insert((scope, StoreKey::new(name)), Some(value.to_string()));
        Ok(())
    }

    fn delete(&self, scope: Scope, name: &str) -> Result<DeleteOutcome, StoreError> {
        let exists = self.exists(scope, name)?;
        self.pending().insert((scope, StoreKey::new(name)), None);

        if exists {
            tracing::info!(%scope, name, "Dry run: would delete variable");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::AlreadyAbsent)
        }
    }

    fn enumerate(&self, scope: Scope) -> Result<Vec<(String, String)>, StoreError> {
        let mut vars = self.inner.enumerate(scope)?;
        let pending = self.pending();
        let overlay = pending.iter().filter(|((s, _), _)| *s == scope);

        for ((_, key), value) in overlay {
            let existing = vars
                .iter()
                .position(|(name, _)| name.eq_ignore_ascii_case(key.as_str()));
            match (existing, value) {
                (Some(i), Some(value)) => vars[i].1.clone_from(value),
                (Some(i), None) => {
                    vars.remove(i);
                }
                (None, Some(value)) => vars.push((key.as_str().to_string(), value.clone())),
                (None, None) => {}
            }
        }
        Ok(vars)
    }
}
