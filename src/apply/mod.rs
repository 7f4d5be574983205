// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Change planner and applier.
//!
//! ```text
//! Applier::new(&store).with_notifier(&notifier)
//!   .apply(&config, privilege)
//!       ensure_access(User, Write)             abort on failure
//!       ensure_access(System, Write)           only if elevated and non-empty
//!       user entries    --> upsert / delete    per-entry outcome, never aborts
//!       system entries  --> same, or one SystemSkip fact when not elevated
//!       notifier.announce()                    exactly once, best-effort
//!       --> ApplyReport
//! ```
//!
//! A best-effort batch: there is no rollback, and privilege is not re-checked
//! per write.

pub mod plan;
pub mod report;

#[cfg(test)]
mod tests;

use tracing::{debug, info, warn};

use crate::core::notify::Notifier;
use crate::core::store::{Access, DeleteOutcome, Store};
use crate::error::StoreError;
use crate::model::{Configuration, Operation, PrivilegeState, Scope, Variable};

pub use plan::{Plan, plan};
pub use report::{ApplyReport, ItemReport, NotificationStatus, Outcome, ScopeReport, Summary, SystemSkip};

/// Applies a [`Configuration`] to a [`Store`].
pub struct Applier<'a> {
    store: &'a dyn Store,
    notifier: Option<&'a dyn Notifier>,
}

impl<'a> Applier<'a> {
    /// Creates an applier without notification.
    #[must_use]
    pub fn new(store: &'a dyn Store) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    /// Announces the change through `notifier` after the pass.
    #[must_use]
    pub fn with_notifier(mut self, notifier: &'a dyn Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Applies every eligible entry of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Access`] if a scope that is about to be processed
    /// cannot be opened for writing. Nothing is written in that case.
    /// Per-entry failures are reported in the [`ApplyReport`] instead.
    pub fn apply(
        &self,
        config: &Configuration,
        privilege: PrivilegeState,
    ) -> Result<ApplyReport, StoreError> {
        let process_system = privilege.is_elevated() && !config.system_variables.is_empty();

        self.store.ensure_access(Scope::User, Access::Write)?;
        if process_system {
            self.store.ensure_access(Scope::System, Access::Write)?;
        }

        info!(
            entries = config.user_variables.len(),
            "Applying user environment variables"
        );
        let user = self.apply_scope(Scope::User, &config.user_variables);

        let (system, system_skipped) = if process_system {
            info!(
                entries = config.system_variables.len(),
                "Applying system environment variables"
            );
            (
                Some(self.apply_scope(Scope::System, &config.system_variables)),
                None,
            )
        } else if config.system_variables.is_empty() {
            (None, None)
        } else {
            warn!(
                entries = config.system_variables.len(),
                "System variables were ignored; relaunch as administrator to apply them"
            );
            (
                None,
                Some(SystemSkip {
                    entries: config.system_variables.len(),
                }),
            )
        };

        let notification = self.announce();

        Ok(ApplyReport {
            user,
            system,
            system_skipped,
            notification,
        })
    }

    fn apply_scope(&self, scope: Scope, variables: &[Variable]) -> ScopeReport {
        let mut report = ScopeReport::new(scope);
        for var in variables {
            let outcome = self.apply_entry(scope, var);
            report.items.push(ItemReport {
                name: var.name.clone(),
                operation: var.operation.clone(),
                outcome,
            });
        }
        report
    }

    fn apply_entry(&self, scope: Scope, var: &Variable) -> Outcome {
        match &var.operation {
            Operation::Other(op) => {
                warn!(%scope, name = %var.name, operation = %op, "Unknown operation, skipping");
                Outcome::UnknownOperation(op.to_string())
            }
            // An empty name would address the key's default value.
            _ if var.name.is_empty() => {
                warn!(%scope, "Variable with empty name, skipping");
                Outcome::Failed("variable name is empty".to_string())
            }
            Operation::Set => match self.store.upsert(scope, &var.name, &var.value) {
                Ok(()) => {
                    info!(%scope, name = %var.name, value = %var.value, "Set variable");
                    Outcome::Applied
                }
                Err(e) => {
                    warn!(%scope, name = %var.name, error = %e, "Failed to set variable");
                    Outcome::Failed(e.to_string())
                }
            },
            Operation::Delete => match self.store.delete(scope, &var.name) {
                Ok(DeleteOutcome::Deleted) => {
                    info!(%scope, name = %var.name, "Deleted variable");
                    Outcome::Applied
                }
                Ok(DeleteOutcome::AlreadyAbsent) => {
                    info!(%scope, name = %var.name, "Variable already deleted or did not exist");
                    Outcome::AlreadyAbsent
                }
                Err(e) => {
                    warn!(%scope, name = %var.name, error = %e, "Failed to delete variable");
                    Outcome::Failed(e.to_string())
                }
            },
        }
    }

    fn announce(&self) -> NotificationStatus {
        let Some(notifier) = self.notifier else {
            debug!("Notification disabled");
            return NotificationStatus::Disabled;
        };

        match notifier.announce() {
            Ok(()) => {
                info!("Environment change announced");
                NotificationStatus::Sent
            }
            Err(e) => {
                warn!(error = %e, "Failed to announce environment change");
                NotificationStatus::Failed(e.to_string())
            }
        }
    }
}
