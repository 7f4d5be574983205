// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Privilege gate: current privilege level and elevated relaunch.
//!
//! ```text
//! PrivilegeGate (trait)
//!   is_elevated()            token query, cached for the process lifetime,
//!                            query failure --> Standard + warning
//!   request_elevation(args)  ShellExecuteW("runas", current_exe, args)
//!
//! forwarded_args(explicit, selected) --> explicit ++ [selected]  (if missing)
//! join_command_line(args)            --> CommandLineToArgvW-compatible string
//! ```
//!
//! The elevated instance is an independent process; nothing is shared with it
//! except the forwarded arguments.

#[cfg(windows)]
mod windows;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::OnceLock;

use crate::error::ElevationError;
use crate::model::PrivilegeState;

/// Source of the process privilege level and of elevated relaunches.
pub trait PrivilegeGate: Send + Sync {
    /// Privilege level of the running process. Never fails.
    fn is_elevated(&self) -> PrivilegeState;

    /// Starts a new elevated instance of this executable with `args`.
    ///
    /// On success the caller is expected to exit.
    ///
    /// # Errors
    ///
    /// Returns [`ElevationError`] if the prompt was declined or the launch
    /// failed; the calling process is unaffected.
    fn request_elevation(&self, args: &[String]) -> Result<(), ElevationError>;
}

/// The host's privilege gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPrivilege;

impl PrivilegeGate for HostPrivilege {
    fn is_elevated(&self) -> PrivilegeState {
        static STATE: OnceLock<PrivilegeState> = OnceLock::new();
        *STATE.get_or_init(query_privilege)
    }

    #[cfg(windows)]
    fn request_elevation(&self, args: &[String]) -> Result<(), ElevationError> {
        let parameters = join_command_line(args);
        tracing::info!(%parameters, "Relaunching elevated");
        windows::relaunch_elevated(&parameters)
    }

    #[cfg(not(windows))]
    fn request_elevation(&self, args: &[String]) -> Result<(), ElevationError> {
        tracing::debug!(?args, "Elevated relaunch requested on unsupported host");
        Err(ElevationError::Unsupported)
    }
}

#[cfg(windows)]
fn query_privilege() -> PrivilegeState {
    match windows::token_is_elevated() {
        Ok(elevated) => PrivilegeState::from(elevated),
        Err(e) => {
            tracing::warn!("Could not determine privilege level: {}", e.message());
            PrivilegeState::Standard
        }
    }
}

#[cfg(not(windows))]
fn query_privilege() -> PrivilegeState {
    PrivilegeState::Standard
}

/// A gate with a fixed answer; relaunch always fails.
///
/// Used where the privilege level is already known, e.g. when replaying a
/// decision in tests or forcing standard behavior.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrivilege(pub PrivilegeState);

impl PrivilegeGate for FixedPrivilege {
    fn is_elevated(&self) -> PrivilegeState {
        self.0
    }

    fn request_elevation(&self, _args: &[String]) -> Result<(), ElevationError> {
        Err(ElevationError::Unsupported)
    }
}

/// Arguments for the elevated instance: `explicit` followed by the selected
/// file when it is not already among them.
#[must_use]
pub fn forwarded_args(explicit: &[String], selected: Option<&Path>) -> Vec<String> {
    let mut args = explicit.to_vec();
    if let Some(path) = selected {
        let path = path.display().to_string();
        if !args.contains(&path) {
            args.push(path);
        }
    }
    args
}

/// Quotes one argument so `CommandLineToArgvW` reads it back unchanged.
#[must_use]
pub fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '\n', '"']) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    let mut backslashes = 0usize;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                quoted.extend(std::iter::repeat_n('\\', backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            _ => {
                quoted.extend(std::iter::repeat_n('\\', backslashes));
                quoted.push(c);
                backslashes = 0;
            }
        }
    }
    // Backslashes before the closing quote must be doubled.
    quoted.extend(std::iter::repeat_n('\\', backslashes * 2));
    quoted.push('"');
    quoted
}

/// Joins arguments into a single command-line string.
#[must_use]
pub fn join_command_line(args: &[String]) -> String {
    args.iter()
        .map(|a| quote_arg(a))
        .collect::<Vec<_>>()
        .join(" ")
}
