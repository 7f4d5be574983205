// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Apply report: per-entry outcomes and summary counts.
//!
//! ```text
//! ApplyReport
//!   user:           ScopeReport [ItemReport { name, operation, outcome }]
//!   system:         Option<ScopeReport>   processed only when elevated
//!   system_skipped: Option<SystemSkip>    one fact, not per-item failures
//!   notification:   Sent | Failed(msg) | Disabled
//!
//! Outcome: Applied | AlreadyAbsent | UnknownOperation(op) | Failed(msg)
//! ```

use serde::Serialize;

use crate::model::{Operation, Scope};

/// Result of one declared entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The set or delete reached the store.
    Applied,
    /// A delete found nothing to remove.
    AlreadyAbsent,
    /// The operation string was not recognized; no store call was made.
    UnknownOperation(String),
    /// The store rejected the change.
    Failed(String),
}

impl Outcome {
    /// Failures are the only outcome that makes an apply unsuccessful.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Outcome of one entry, with what was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub operation: Operation,
    pub outcome: Outcome,
}

impl std::fmt::Display for ItemReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.outcome, &self.operation) {
            (Outcome::Applied, Operation::Delete) => write!(f, "deleted {}", self.name),
            (Outcome::Applied, _) => write!(f, "set {}", self.name),
            (Outcome::AlreadyAbsent, _) => {
                write!(f, "{} already deleted or did not exist", self.name)
            }
            (Outcome::UnknownOperation(op), _) => {
                write!(f, "unknown operation '{op}' for {}, skipped", self.name)
            }
            (Outcome::Failed(message), _) => {
                write!(f, "failed to {} {}: {message}", self.operation, self.name)
            }
        }
    }
}

/// Outcomes for one scope, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeReport {
    pub scope: Scope,
    pub items: Vec<ItemReport>,
}

impl ScopeReport {
    #[must_use]
    pub const fn new(scope: Scope) -> Self {
        Self {
            scope,
            items: Vec::new(),
        }
    }
}

/// System scope was not processed because the process is not elevated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemSkip {
    /// Number of declared system entries left untouched.
    pub entries: usize,
}

/// What happened to the settings-change broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    Failed(String),
    Disabled,
}

/// Aggregated counts over an [`ApplyReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub applied: usize,
    pub already_absent: usize,
    pub unknown: usize,
    pub failed: usize,
    pub skipped_no_privilege: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} applied, {} already absent, {} unknown operation, {} skipped (no privilege), {} failed",
            self.applied, self.already_absent, self.unknown, self.skipped_no_privilege, self.failed
        )
    }
}

/// Everything an apply pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub user: ScopeReport,
    pub system: Option<ScopeReport>,
    pub system_skipped: Option<SystemSkip>,
    pub notification: NotificationStatus,
}

impl ApplyReport {
    /// Items of every processed scope, user scope first.
    pub fn items(&self) -> impl Iterator<Item = (Scope, &ItemReport)> {
        std::iter::once(&self.user)
            .chain(self.system.as_ref())
            .flat_map(|report| report.items.iter().map(move |item| (report.scope, item)))
    }

    /// Number of system entries that were handed to the store logic.
    #[must_use]
    pub fn system_entries_processed(&self) -> usize {
        self.system.as_ref().map_or(0, |report| report.items.len())
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            skipped_no_privilege: self.system_skipped.map_or(0, |skip| skip.entries),
            ..Summary::default()
        };
        for (_, item) in self.items() {
            match item.outcome {
                Outcome::Applied => summary.applied += 1,
                Outcome::AlreadyAbsent => summary.already_absent += 1,
                Outcome::UnknownOperation(_) => summary.unknown += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// True when no entry failed. Skips and already-absent deletes are success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.items().all(|(_, item)| !item.outcome.is_failure())
    }
}
