// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export command: store contents as a declarative file.

use anyhow::Context;

use crate::cli::ExportArgs;
use crate::cmd::{Completion, Session, blocking};
use crate::core::store::{RegistryStore, Store};
use crate::error::{Result, StoreError};
use crate::manifest;
use crate::model::{Configuration, PrivilegeState, Scope, Variable};

/// Reads the store into a [`Configuration`] of `set` entries.
///
/// The system scope is read only when `include_system` is set and the
/// process is elevated.
///
/// # Errors
///
/// Returns [`StoreError::Access`] if a scope that is read cannot be opened.
pub fn collect_snapshot(
    store: &dyn Store,
    privilege: PrivilegeState,
    include_system: bool,
) -> std::result::Result<Configuration, StoreError> {
    let mut config = Configuration::default();

    for scope in Scope::ALL {
        if scope == Scope::System && !include_system {
            continue;
        }
        if !privilege.permits(scope) {
            tracing::info!(
                "Skipping system environment variable export: not running as Administrator"
            );
            continue;
        }

        let entries = store.enumerate(scope)?;
        tracing::debug!(%scope, entries = entries.len(), "Read environment store");
        config.variables_mut(scope).extend(
            entries
                .into_iter()
                .map(|(name, value)| Variable::set(name, value)),
        );
    }

    Ok(config)
}

/// Writes the host store to a file, or to stdout without `OUTPUT`.
///
/// # Errors
///
/// Returns an error if a scope cannot be read or the output cannot be
/// written.
pub async fn run_export_command(args: &ExportArgs, session: &mut Session) -> Result<Completion> {
    let privilege = session.privilege();
    let include_system = !args.user_only && session.settings().export.include_system;
    let output = args.output.clone();

    session.set_status("Exporting variables... Please wait.");

    let result = blocking(move || {
        let config = collect_snapshot(&RegistryStore::new(), privilege, include_system)
            .context("failed to read the environment store")?;
        match output {
            Some(path) => Ok((Some(manifest::save_file(&config, &path)?), config)),
            None => {
                print!("{}", manifest::render(&config)?);
                Ok((None, config))
            }
        }
    })
    .await;

    match result {
        Ok((Some(saved), config)) => {
            println!("Variables exported successfully to: {}", saved.display());
            tracing::info!(path = %saved.display(), entries = config.len(), "Exported variables");
            session.set_status(format!(
                "Variables exported successfully to: {}",
                saved.display()
            ));
            Ok(Completion::Success)
        }
        Ok((None, config)) => {
            tracing::info!(entries = config.len(), "Exported variables to stdout");
            Ok(Completion::Success)
        }
        Err(e) => {
            session.set_status(format!("Error exporting variables: {e}"));
            Err(e)
        }
    }
}
