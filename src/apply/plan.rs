// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Preview of what an apply would do. Makes no store calls.

use crate::model::{Configuration, Operation, PrivilegeState, Scope, Variable};

/// One planned change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedChange {
    Set { name: String, value: String },
    Delete { name: String },
    Unknown { operation: String, name: String, value: String },
}

impl From<&Variable> for PlannedChange {
    fn from(var: &Variable) -> Self {
        match &var.operation {
            Operation::Set => Self::Set {
                name: var.name.clone(),
                value: var.value.clone(),
            },
            Operation::Delete => Self::Delete {
                name: var.name.clone(),
            },
            Operation::Other(op) => Self::Unknown {
                operation: op.to_string(),
                name: var.name.clone(),
                value: var.value.clone(),
            },
        }
    }
}

impl std::fmt::Display for PlannedChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set { name, value } => write!(f, "SET: {name} = {value}"),
            Self::Delete { name } => write!(f, "DELETE: {name}"),
            Self::Unknown {
                operation,
                name,
                value,
            } => write!(f, "UNKNOWN OPERATION ({operation}): {name} = {value}"),
        }
    }
}

/// Planned changes for one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSection {
    pub scope: Scope,
    /// The scope will be skipped for lack of privilege.
    pub ignored: bool,
    pub changes: Vec<PlannedChange>,
}

/// Preview of an apply pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub sections: Vec<PlanSection>,
}

/// Builds the preview for `config` at `privilege`.
///
/// Scopes with no entries are left out.
#[must_use]
pub fn plan(config: &Configuration, privilege: PrivilegeState) -> Plan {
    let sections = Scope::ALL
        .into_iter()
        .filter(|&scope| !config.variables(scope).is_empty())
        .map(|scope| PlanSection {
            scope,
            ignored: !privilege.permits(scope),
            changes: config
                .variables(scope)
                .iter()
                .map(PlannedChange::from)
                .collect(),
        })
        .collect();
    Plan { sections }
}

impl Plan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Preview text, one line per entry.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for section in &self.sections {
            lines.push(format!(
                "{} ENVIRONMENT VARIABLES:",
                section.scope.heading()
            ));
            if section.ignored {
                lines.push(
                    "  WARNING: Running as standard user - system variables will be IGNORED"
                        .to_string(),
                );
            }
            lines.push(String::new());

            let prefix = if section.ignored { "  [IGNORED] " } else { "  " };
            lines.extend(section.changes.iter().map(|c| format!("{prefix}{c}")));
            lines.push(String::new());
        }

        if self.is_empty() {
            lines.push("No environment variables found in the configuration file.".to_string());
        }

        lines.push(String::new());
        lines.push("Note: After applying changes, a WM_SETTINGCHANGE message will be".to_string());
        lines.push(
            "broadcast to notify other applications of the environment changes.".to_string(),
        );
        lines
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
