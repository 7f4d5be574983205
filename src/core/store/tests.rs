// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the store module.

use super::memory::CallKind;
use super::{Access, DeleteOutcome, DryRunStore, MemoryStore, RegistryStore, Store, location};
use crate::error::StoreError;
use crate::model::Scope;

#[test]
fn test_locations() {
    insta::assert_snapshot!(location(Scope::User).to_string(), @r"HKEY_CURRENT_USER\Environment");
    insta::assert_snapshot!(
        location(Scope::System).to_string(),
        @r"HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\Session Manager\Environment"
    );
}

#[test]
fn test_memory_upsert_overwrites_case_insensitively() {
    let store = MemoryStore::new().with_var(Scope::User, "Path", "a");
    store.upsert(Scope::User, "PATH", "b").unwrap();

    assert_eq!(store.get(Scope::User, "path").as_deref(), Some("b"));
    assert_eq!(
        store.snapshot(Scope::User),
        vec![("Path".to_string(), "b".to_string())],
        "existing spelling is kept"
    );
}

#[test]
fn test_memory_scopes_are_separate() {
    let store = MemoryStore::new();
    store.upsert(Scope::System, "FOO", "1").unwrap();

    assert_eq!(store.get(Scope::User, "FOO"), None);
    assert_eq!(store.enumerate(Scope::System).unwrap().len(), 1);
}

#[test]
fn test_memory_delete_is_idempotent() {
    let store = MemoryStore::new().with_var(Scope::User, "FOO", "1");

    assert_eq!(store.delete(Scope::User, "foo").unwrap(), DeleteOutcome::Deleted);
    assert_eq!(
        store.delete(Scope::User, "FOO").unwrap(),
        DeleteOutcome::AlreadyAbsent
    );
}

#[test]
fn test_memory_denied_scope() {
    let store = MemoryStore::new().deny(Scope::System);

    let err = store.ensure_access(Scope::System, Access::Write).unwrap_err();
    assert!(matches!(err, StoreError::Access { scope: Scope::System, .. }));
    assert!(store.ensure_access(Scope::User, Access::Write).is_ok());
    assert!(store.enumerate(Scope::System).is_err());
}

#[test]
fn test_memory_injected_failure() {
    let store = MemoryStore::new().fail_on("BROKEN");

    assert!(matches!(
        store.upsert(Scope::User, "broken", "x"),
        Err(StoreError::Write { .. })
    ));
    assert!(matches!(
        store.delete(Scope::User, "BROKEN"),
        Err(StoreError::Delete { .. })
    ));
    assert!(store.upsert(Scope::User, "FINE", "x").is_ok());
}

#[test]
fn test_memory_records_calls() {
    let store = MemoryStore::new();
    store.ensure_access(Scope::User, Access::Write).unwrap();
    store.upsert(Scope::User, "A", "1").unwrap();
    store.enumerate(Scope::System).unwrap();

    let kinds: Vec<_> = store.calls().into_iter().map(|c| (c.scope, c.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (Scope::User, CallKind::EnsureAccess(Access::Write)),
            (Scope::User, CallKind::Upsert),
            (Scope::System, CallKind::Enumerate),
        ]
    );
    assert_eq!(store.calls_for(Scope::User), 2);
}

#[test]
fn test_dry_run_never_writes() {
    let dry = DryRunStore::new(MemoryStore::new().with_var(Scope::User, "OLD", "x"));

    dry.upsert(Scope::User, "NEW", "1").unwrap();
    assert_eq!(dry.delete(Scope::User, "old").unwrap(), DeleteOutcome::Deleted);
    assert_eq!(
        dry.delete(Scope::User, "MISSING").unwrap(),
        DeleteOutcome::AlreadyAbsent
    );

    let inner = dry.into_inner();
    assert_eq!(inner.get(Scope::User, "NEW"), None);
    assert_eq!(inner.get(Scope::User, "OLD").as_deref(), Some("x"));
}

#[test]
fn test_dry_run_outcomes_match_real_store() {
    let seeded = || MemoryStore::new().with_var(Scope::User, "BAR", "x");
    let steps = |store: &dyn Store| {
        store.upsert(Scope::User, "FOO", "1").unwrap();
        vec![
            store.delete(Scope::User, "foo").unwrap(),
            store.delete(Scope::User, "BAR").unwrap(),
            store.delete(Scope::User, "bar").unwrap(),
        ]
    };

    let real = seeded();
    let dry = DryRunStore::new(seeded());
    let expected = steps(&real);

    assert_eq!(
        expected,
        vec![
            DeleteOutcome::Deleted,
            DeleteOutcome::Deleted,
            DeleteOutcome::AlreadyAbsent,
        ]
    );
    assert_eq!(steps(&dry), expected);
    assert_eq!(
        dry.into_inner().get(Scope::User, "BAR").as_deref(),
        Some("x")
    );
}

#[test]
fn test_dry_run_enumerate_includes_pending_writes() {
    let dry = DryRunStore::new(
        MemoryStore::new()
            .with_var(Scope::User, "KEEP", "1")
            .with_var(Scope::User, "GONE", "2")
            .with_var(Scope::System, "SYS", "3"),
    );

    dry.upsert(Scope::User, "keep", "changed").unwrap();
    dry.upsert(Scope::User, "ADDED", "4").unwrap();
    dry.delete(Scope::User, "GONE").unwrap();

    assert_eq!(
        dry.enumerate(Scope::User).unwrap(),
        vec![
            ("KEEP".to_string(), "changed".to_string()),
            ("ADDED".to_string(), "4".to_string()),
        ]
    );
    assert_eq!(dry.enumerate(Scope::System).unwrap().len(), 1);
}

#[test]
fn test_dry_run_checks_read_access_only() {
    let dry = DryRunStore::new(MemoryStore::new());
    dry.ensure_access(Scope::User, Access::Write).unwrap();

    let calls = dry.into_inner().calls();
    assert_eq!(calls[0].kind, CallKind::EnsureAccess(Access::Read));
}

#[cfg(not(windows))]
#[test]
fn test_registry_unsupported_off_windows() {
    let store = RegistryStore::new();
    assert!(matches!(
        store.enumerate(Scope::User),
        Err(StoreError::Unsupported)
    ));
}

#[cfg(windows)]
#[test]
fn test_registry_user_scope_readable() {
    let store = RegistryStore::new();
    store.ensure_access(Scope::User, Access::Read).unwrap();
    let _ = store.enumerate(Scope::User).unwrap();
}
