// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Preview command and the no-command entry.

use crate::apply::plan;
use crate::cli::FileArgs;
use crate::cmd::{Completion, Session, load_manifest};
use crate::error::Result;

/// Prints what applying the file would change.
///
/// # Errors
///
/// Returns an error if no file is selected, or the file is rejected by the
/// extension guard, cannot be read, or cannot be parsed.
pub async fn run_preview_command(args: &FileArgs, session: &mut Session) -> Result<Completion> {
    let path = session.resolve_file(args.file.as_deref())?;
    let config = load_manifest(path.clone()).await?;

    tracing::info!(
        file = %path.display(),
        entries = config.len(),
        privilege = %session.privilege(),
        "Previewing configuration"
    );

    println!("Configuration Preview: {}", path.display());
    println!();
    println!("{}", plan(&config, session.privilege()));

    session.set_status("Preview shown. Run `envman apply` to apply these changes.");
    Ok(Completion::Success)
}

/// Lines printed when envman is started without a command.
#[must_use]
pub fn welcome_lines(session: &Session) -> Vec<String> {
    let mut lines = vec![format!("Privilege Level: {}", session.privilege())];
    match session.selected() {
        Some(path) => {
            lines.push(format!("Selected: {}", path.display()));
            lines.push(
                "File pre-selected. Run `envman preview` or `envman apply` to proceed."
                    .to_string(),
            );
        }
        None => {
            lines.push(session.status().to_string());
            lines.push("Run `envman --help` for usage information.".to_string());
        }
    }
    lines
}

/// No command: show the selection, then preview it if there is one.
///
/// # Errors
///
/// Returns an error if the selected file cannot be previewed.
pub async fn run_default_command(session: &mut Session) -> Result<Completion> {
    for line in welcome_lines(session) {
        println!("{line}");
    }

    if session.selected().is_none() {
        return Ok(Completion::Success);
    }

    println!();
    run_preview_command(&FileArgs::default(), session).await
}
