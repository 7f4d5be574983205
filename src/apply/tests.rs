// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the applier and preview plan.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Applier, NotificationStatus, Outcome, SystemSkip, plan};
use crate::core::notify::Notifier;
use crate::core::store::{MemoryStore, Store};
use crate::error::{NotificationError, StoreError};
use crate::model::{Configuration, PrivilegeState, Scope, Variable};

#[derive(Default)]
struct CountingNotifier {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingNotifier {
    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Notifier for CountingNotifier {
    fn announce(&self) -> Result<(), NotificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(NotificationError::TimedOut { timeout_ms: 5000 })
        } else {
            Ok(())
        }
    }
}

fn config(user: Vec<Variable>, system: Vec<Variable>) -> Configuration {
    Configuration {
        user_variables: user,
        system_variables: system,
    }
}

#[test]
fn test_set_single_user_variable() {
    let store = MemoryStore::new();
    let notifier = CountingNotifier::default();
    let config = config(vec![Variable::set("FOO", "1")], Vec::new());

    let report = Applier::new(&store)
        .with_notifier(&notifier)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    assert_eq!(store.get(Scope::User, "FOO").as_deref(), Some("1"));
    assert_eq!(notifier.calls(), 1);
    assert_eq!(report.summary().applied, 1);
    assert_eq!(report.system_entries_processed(), 0);
    assert_eq!(report.system_skipped, None);
    assert_eq!(report.notification, NotificationStatus::Sent);
    assert!(report.is_success());
}

#[test]
fn test_delete_absent_is_success() {
    let store = MemoryStore::new();
    let config = config(vec![Variable::delete("FOO")], Vec::new());

    let report = Applier::new(&store)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    assert_eq!(report.user.items[0].outcome, Outcome::AlreadyAbsent);
    assert_eq!(report.summary().failed, 0);
    assert!(report.is_success());
    assert_eq!(report.notification, NotificationStatus::Disabled);
}

#[test]
fn test_system_scope_gated_without_privilege() {
    let store = MemoryStore::new();
    let notifier = CountingNotifier::default();
    let config = config(
        vec![Variable::set("USER_VAR", "u")],
        vec![Variable::set("SYS_A", "a"), Variable::delete("SYS_B")],
    );

    let report = Applier::new(&store)
        .with_notifier(&notifier)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    assert_eq!(store.calls_for(Scope::System), 0);
    assert_eq!(report.system, None);
    assert_eq!(report.system_skipped, Some(SystemSkip { entries: 2 }));
    assert_eq!(report.summary().skipped_no_privilege, 2);
    assert_eq!(store.get(Scope::User, "USER_VAR").as_deref(), Some("u"));
    assert_eq!(notifier.calls(), 1, "user scope counts as attempted");
    assert!(report.is_success());
}

#[test]
fn test_system_only_config_still_notifies() {
    let store = MemoryStore::new();
    let notifier = CountingNotifier::default();
    let config = config(Vec::new(), vec![Variable::set("SYS", "1")]);

    Applier::new(&store)
        .with_notifier(&notifier)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    assert_eq!(notifier.calls(), 1);
    assert_eq!(store.calls_for(Scope::System), 0);
}

#[test]
fn test_system_scope_applied_when_elevated() {
    let store = MemoryStore::new().with_var(Scope::System, "OLD", "x");
    let config = config(
        Vec::new(),
        vec![Variable::set("JAVA_HOME", r"C:\Java"), Variable::delete("OLD")],
    );

    let report = Applier::new(&store)
        .apply(&config, PrivilegeState::Elevated)
        .unwrap();

    assert_eq!(report.system_entries_processed(), 2);
    assert_eq!(report.summary().applied, 2);
    assert_eq!(
        store.get(Scope::System, "JAVA_HOME").as_deref(),
        Some(r"C:\Java")
    );
    assert_eq!(store.get(Scope::System, "OLD"), None);
}

#[test]
fn test_unknown_operation_makes_no_store_call() {
    let store = MemoryStore::new();
    let config = config(
        vec![
            Variable::with_operation("FOO", "1", "frobnicate"),
            Variable::set("BAR", "2"),
        ],
        Vec::new(),
    );

    let report = Applier::new(&store)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    assert_eq!(
        report.user.items[0].outcome,
        Outcome::UnknownOperation("frobnicate".to_string())
    );
    assert_eq!(report.user.items[1].outcome, Outcome::Applied);
    assert!(
        store
            .calls()
            .iter()
            .all(|call| call.name.as_deref() != Some("FOO"))
    );
    assert_eq!(store.get(Scope::User, "FOO"), None);
    assert!(report.is_success());
}

#[test]
fn test_failure_does_not_halt_batch() {
    let store = MemoryStore::new().fail_on("BROKEN");
    let config = config(
        vec![
            Variable::set("BROKEN", "x"),
            Variable::set("AFTER", "y"),
            Variable::set("", "default value"),
        ],
        Vec::new(),
    );

    let report = Applier::new(&store)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    let summary = report.summary();
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.applied, 1);
    assert_eq!(store.get(Scope::User, "AFTER").as_deref(), Some("y"));
    assert!(!report.is_success());
    insta::assert_snapshot!(
        summary.to_string(),
        @"1 applied, 0 already absent, 0 unknown operation, 0 skipped (no privilege), 2 failed"
    );
}

#[test]
fn test_duplicates_last_write_wins() {
    let store = MemoryStore::new();
    let config = config(
        vec![Variable::set("FOO", "1"), Variable::set("foo", "2")],
        Vec::new(),
    );

    Applier::new(&store)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    assert_eq!(store.get(Scope::User, "FOO").as_deref(), Some("2"));
}

#[test]
fn test_scope_access_failure_aborts_before_writing() {
    let store = MemoryStore::new().deny(Scope::System);
    let notifier = CountingNotifier::default();
    let config = config(
        vec![Variable::set("FOO", "1")],
        vec![Variable::set("BAR", "2")],
    );

    let err = Applier::new(&store)
        .with_notifier(&notifier)
        .apply(&config, PrivilegeState::Elevated)
        .unwrap_err();

    assert!(matches!(err, StoreError::Access { scope: Scope::System, .. }));
    assert_eq!(store.get(Scope::User, "FOO"), None);
    assert_eq!(notifier.calls(), 0);
}

#[test]
fn test_user_access_failure_aborts_even_when_empty() {
    let store = MemoryStore::new().deny(Scope::User);
    let result = Applier::new(&store).apply(&Configuration::default(), PrivilegeState::Standard);
    assert!(result.is_err());
}

#[test]
fn test_notification_failure_is_reported_not_fatal() {
    let store = MemoryStore::new();
    let notifier = CountingNotifier::failing();
    let config = config(vec![Variable::set("FOO", "1")], Vec::new());

    let report = Applier::new(&store)
        .with_notifier(&notifier)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    assert_eq!(
        report.notification,
        NotificationStatus::Failed("settings-change broadcast timed out after 5000 ms".to_string())
    );
    assert!(report.is_success());
    assert_eq!(store.get(Scope::User, "FOO").as_deref(), Some("1"));
}

#[test]
fn test_apply_is_idempotent() {
    let store = MemoryStore::new().with_var(Scope::User, "STALE", "x");
    let config = config(
        vec![
            Variable::set("FOO", "1"),
            Variable::delete("STALE"),
            Variable::delete("NEVER_THERE"),
        ],
        Vec::new(),
    );
    let applier = Applier::new(&store);

    let first = applier.apply(&config, PrivilegeState::Standard).unwrap();
    let after_first = store.snapshot(Scope::User);
    let second = applier.apply(&config, PrivilegeState::Standard).unwrap();

    assert_eq!(store.snapshot(Scope::User), after_first);
    assert_eq!(first.summary().failed, 0);
    assert_eq!(second.summary().failed, 0);
    assert_eq!(second.summary().already_absent, 2);
}

#[test]
fn test_report_serializes() {
    let store = MemoryStore::new();
    let config = config(
        vec![Variable::set("FOO", "1")],
        vec![Variable::set("BAR", "2")],
    );
    let report = Applier::new(&store)
        .apply(&config, PrivilegeState::Standard)
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["user"]["items"][0]["outcome"]["status"], "applied");
    assert_eq!(json["user"]["items"][0]["operation"], "set");
    assert_eq!(json["system_skipped"]["entries"], 1);
    assert_eq!(json["notification"]["status"], "disabled");
}

#[test]
fn test_plan_text() {
    let config = config(
        vec![
            Variable::set("FOO", "1"),
            Variable::delete("OLD"),
            Variable::with_operation("ODD", "v", "frobnicate"),
        ],
        vec![Variable::set("JAVA_HOME", r"C:\Java")],
    );

    insta::assert_snapshot!(plan(&config, PrivilegeState::Standard).to_string(), @r"
    USER ENVIRONMENT VARIABLES:

      SET: FOO = 1
      DELETE: OLD
      UNKNOWN OPERATION (frobnicate): ODD = v

    SYSTEM ENVIRONMENT VARIABLES:
      WARNING: Running as standard user - system variables will be IGNORED

      [IGNORED] SET: JAVA_HOME = C:\Java


    Note: After applying changes, a WM_SETTINGCHANGE message will be
    broadcast to notify other applications of the environment changes.
    ");
}

#[test]
fn test_plan_empty() {
    let preview = plan(&Configuration::default(), PrivilegeState::Elevated);
    assert!(preview.is_empty());
    assert_eq!(
        preview.lines()[0],
        "No environment variables found in the configuration file."
    );
}

#[test]
fn test_plan_makes_no_store_calls() {
    let store = MemoryStore::new();
    let config = config(vec![Variable::set("FOO", "1")], Vec::new());
    let _ = plan(&config, PrivilegeState::Elevated);
    assert!(store.calls().is_empty());
    assert!(store.enumerate(Scope::User).unwrap().is_empty());
}
