// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status command.

use crate::cmd::{Completion, Session};
use crate::core::store::location;
use crate::model::Scope;

/// Privilege level, store locations, selection and settings.
#[must_use]
pub fn status_lines(session: &Session) -> Vec<String> {
    let mut lines = vec![format!("Privilege Level: {}", session.privilege())];

    for scope in Scope::ALL {
        let access = if session.privilege().permits(scope) {
            "writable"
        } else {
            "requires Administrator"
        };
        lines.push(format!("{scope:<6} store: {} ({access})", location(scope)));
    }

    if let Some(path) = session.selected() {
        lines.push(format!("Selected: {}", path.display()));
    }

    lines.push(String::new());
    if session.settings_files().is_empty() {
        lines.push("No settings files loaded".to_string());
    } else {
        lines.push("Settings files:".to_string());
        lines.extend(session.settings_files().iter().map(|f| format!("  {f}")));
    }
    lines.push("Settings:".to_string());
    lines.extend(
        session
            .settings()
            .format_options()
            .into_iter()
            .map(|option| format!("  {option}")),
    );
    lines
}

pub fn run_status_command(session: &Session) -> Completion {
    for line in status_lines(session) {
        println!("{line}");
    }
    Completion::Success
}
