// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Apply command.

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use crate::apply::{Applier, ApplyReport, NotificationStatus};
use crate::cli::ApplyArgs;
use crate::cmd::{Completion, Session, blocking};
use crate::core::notify::{BroadcastNotifier, Notifier};
use crate::core::store::{DryRunStore, RegistryStore, Store};
use crate::error::Result;
use crate::manifest;
use crate::model::PrivilegeState;

/// Loads `path` and applies it to `store`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or a scope that is about to
/// be processed cannot be opened. Per-entry failures are in the report.
pub fn apply_file(
    path: &Path,
    store: &dyn Store,
    notifier: Option<&dyn Notifier>,
    privilege: PrivilegeState,
) -> Result<ApplyReport> {
    let config = manifest::load_file(path)?;
    info!(
        file = %path.display(),
        entries = config.len(),
        %privilege,
        "Applying configuration"
    );

    let applier = match notifier {
        Some(notifier) => Applier::new(store).with_notifier(notifier),
        None => Applier::new(store),
    };
    let report = applier
        .apply(&config, privilege)
        .with_context(|| format!("failed to apply '{}'", path.display()))?;
    Ok(report)
}

/// Human-readable report, in the order things happened.
#[must_use]
pub fn report_lines(report: &ApplyReport, dry: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if dry {
        lines.push("Dry run: the environment store was not modified.".to_string());
    }

    for scope in [Some(&report.user), report.system.as_ref()]
        .into_iter()
        .flatten()
    {
        lines.push(format!("Applying {} environment variables...", scope.scope));
        lines.extend(scope.items.iter().map(|item| format!("  {item}")));
    }

    if let Some(skip) = report.system_skipped {
        lines.push(format!(
            "System variables were ignored ({} entries). Relaunch as admin to apply them.",
            skip.entries
        ));
    }

    match &report.notification {
        NotificationStatus::Sent => {
            lines.push("Broadcast WM_SETTINGCHANGE message.".to_string());
        }
        NotificationStatus::Failed(message) => {
            lines.push(format!("Warning: error broadcasting changes: {message}"));
        }
        NotificationStatus::Disabled => {}
    }

    lines.push(format!("Summary: {}", report.summary()));
    lines
}

/// Status line after an apply.
#[must_use]
pub fn completion_status(report: &ApplyReport) -> &'static str {
    if !report.is_success() {
        "Some variables could not be applied. See the output above."
    } else if report.system_skipped.is_some() {
        "System variables were ignored. Relaunch as admin to apply them."
    } else {
        "Environment variables applied successfully. Some applications may need to be restarted."
    }
}

/// Applies a file to the host store.
///
/// With `--dry` the store is only read and no broadcast is sent.
///
/// # Errors
///
/// Returns an error if no file is selected, the file cannot be loaded, a
/// scope cannot be opened, or the JSON report cannot be written.
pub async fn run_apply_command(args: &ApplyArgs, session: &mut Session) -> Result<Completion> {
    let path = session.resolve_file(args.file.file.as_deref())?;
    let privilege = session.privilege();
    let dry = session.is_dry();
    let notify = session.settings().notify.enabled;
    let timeout = session.settings().notify_timeout();

    session.set_status("Applying variables... Please wait.");

    let report = blocking(move || {
        let registry = RegistryStore::new();
        if dry {
            apply_file(&path, &DryRunStore::new(registry), None, privilege)
        } else if notify {
            let notifier = BroadcastNotifier::new(timeout);
            apply_file(&path, &registry, Some(&notifier), privilege)
        } else {
            apply_file(&path, &registry, None, privilege)
        }
    })
    .await;

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            session.set_status(format!("Error applying variables: {e}"));
            return Err(e);
        }
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize apply report")?
        );
    } else {
        for line in report_lines(&report, dry) {
            println!("{line}");
        }
    }

    if let NotificationStatus::Failed(message) = &report.notification {
        warn!(error = %message, "Changes were applied but could not be announced");
    }

    let summary = report.summary();
    info!(
        applied = summary.applied,
        failed = summary.failed,
        system_processed = report.system_entries_processed(),
        user_processed = report.user.items.len(),
        skipped = summary.skipped_no_privilege,
        "Apply finished"
    );

    session.set_status(completion_status(&report));
    Ok(if report.is_success() {
        Completion::Success
    } else {
        Completion::PartialFailure
    })
}
