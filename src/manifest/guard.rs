// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File-type guard: reject anything that is not `.yaml` / `.yml` before reading it.

use std::path::Path;

use crate::error::ManifestError;

/// Extensions accepted for declarative files (compared case-insensitively).
pub const RECOGNIZED_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Returns true if `path` ends in `.yaml` or `.yml`, ignoring case.
#[must_use]
pub fn is_recognized_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            RECOGNIZED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Fails with [`ManifestError::UnsupportedFileType`] unless the extension is recognized.
///
/// # Errors
///
/// Returns an error for any path without a `.yaml` / `.yml` extension.
pub fn ensure_recognized(path: &Path) -> Result<(), ManifestError> {
    if is_recognized_extension(path) {
        Ok(())
    } else {
        Err(ManifestError::UnsupportedFileType {
            path: path.display().to_string(),
        })
    }
}
