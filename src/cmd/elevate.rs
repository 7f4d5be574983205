// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Elevate command: relaunch as administrator.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::ElevateArgs;
use crate::cmd::{Completion, Session};
use crate::core::privilege::{PrivilegeGate, forwarded_args};
use crate::error::Result;

/// Commands whose positional argument is a declarative file.
const FILE_COMMANDS: [&str; 2] = ["apply", "preview"];

/// Resolves `path` against the current directory; the elevated instance may
/// start elsewhere.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Arguments for the elevated instance.
///
/// Without explicit arguments the elevated instance applies the selected
/// file. The selected file is forwarded only to commands that read one, and
/// `--pause` keeps the new console open. Forwarded paths are absolute.
#[must_use]
pub fn elevation_args(explicit: &[String], session: &Session) -> Vec<String> {
    let explicit = if explicit.is_empty() {
        vec!["apply".to_string()]
    } else {
        explicit.to_vec()
    };

    let reads_file = explicit
        .iter()
        .any(|arg| FILE_COMMANDS.contains(&arg.as_str()));
    let selected = session
        .selected()
        .filter(|_| reads_file)
        .map(absolute)
        .filter(|path| !explicit.iter().any(|arg| absolute(Path::new(arg)) == *path));

    let mut args = vec!["--pause".to_string()];
    if session.is_dry() {
        args.push("--dry".to_string());
    }
    for file in session.config_files() {
        args.push("--config".to_string());
        args.push(absolute(file).display().to_string());
    }
    args.extend(forwarded_args(&explicit, selected.as_deref()));
    args
}

/// Starts an elevated instance; the caller exits on success.
///
/// # Errors
///
/// Returns an error if the prompt was declined or the launch failed. The
/// store is not touched in either case.
pub fn run_elevate_command(
    args: &ElevateArgs,
    session: &mut Session,
    gate: &dyn PrivilegeGate,
) -> Result<Completion> {
    if gate.is_elevated().is_elevated() {
        println!("Already running as Administrator.");
        return Ok(Completion::Success);
    }

    if args.args.is_empty() {
        session.resolve_file(None)?;
    }

    let forwarded = elevation_args(&args.args, session);
    tracing::info!(args = ?forwarded, "Requesting elevation");

    if let Err(e) = gate.request_elevation(&forwarded) {
        session.set_status(format!("Failed to restart as administrator: {e}"));
        return Err(e).context("failed to restart as administrator");
    }

    println!("Started an elevated instance. This console can be closed.");
    Ok(Completion::Success)
}
