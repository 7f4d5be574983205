// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declarative file format (YAML) for [`Configuration`].
//!
//! # Pipeline
//!
//! ```text
//! import: path --> guard --> read --> parse --> Configuration
//! export: Configuration --> render --> temp file --> persist --> path
//! ```
//!
//! # Format
//!
//! ```yaml
//! user_variables:
//!   - name: FOO
//!     value: "1"
//!     operation: set
//! system_variables:
//!   - name: BAR
//!     value: ""
//!     operation: delete
//! ```
//!
//! Unknown top-level keys are ignored. Missing or empty lists are empty.

pub mod guard;


use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::model::Configuration;

pub use guard::{ensure_recognized, is_recognized_extension};

/// Origin name used for documents that did not come from a file.
const INLINE_ORIGIN: &str = "<input>";

/// Parses a declarative document.
///
/// # Errors
///
/// Returns [`ManifestError::Format`] if the document is not valid YAML or does
/// not have the expected shape.
pub fn parse(content: &str) -> Result<Configuration, ManifestError> {
    parse_with_origin(content, INLINE_ORIGIN)
}

fn parse_with_origin(content: &str, origin: &str) -> Result<Configuration, ManifestError> {
    // serde_yaml rejects an empty document; treat it as an empty configuration.
    if content.trim().is_empty() {
        return Ok(Configuration::default());
    }

    serde_yaml::from_str::<Option<Configuration>>(content)
        .map(Option::unwrap_or_default)
        .map_err(|e| ManifestError::Format {
            path: origin.to_string(),
            message: e.to_string(),
        })
}

/// Renders a configuration as YAML.
///
/// `user_variables` is emitted before `system_variables`, and every entry as
/// `name`, `value`, `operation`.
///
/// # Errors
///
/// Returns [`ManifestError::Render`] if serialization fails.
pub fn render(config: &Configuration) -> Result<String, ManifestError> {
    serde_yaml::to_string(config).map_err(|e| ManifestError::Render {
        message: e.to_string(),
    })
}

/// Checks the extension, reads and parses a declarative file.
///
/// # Errors
///
/// Returns [`ManifestError::UnsupportedFileType`] before touching the file when
/// the extension is wrong, [`ManifestError::Read`] if it cannot be read, and
/// [`ManifestError::Format`] if it does not parse.
pub fn load_file(path: &Path) -> Result<Configuration, ManifestError> {
    ensure_recognized(path)?;

    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let config = parse_with_origin(&content, &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        user = config.user_variables.len(),
        system = config.system_variables.len(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Returns `path` with `.yaml` appended unless it already has a recognized extension.
#[must_use]
pub fn with_recognized_extension(path: &Path) -> PathBuf {
    if is_recognized_extension(path) {
        path.to_path_buf()
    } else {
        let mut raw = path.as_os_str().to_os_string();
        raw.push(".yaml");
        PathBuf::from(raw)
    }
}

/// Renders `config` and writes it to `path`, returning the path actually written.
///
/// Writes through a temporary file in the target directory, then renames it
/// into place.
///
/// # Errors
///
/// Returns [`ManifestError::Render`] or [`ManifestError::Write`].
pub fn save_file(config: &Configuration, path: &Path) -> Result<PathBuf, ManifestError> {
    let target = with_recognized_extension(path);
    let rendered = render(config)?;

    let write_error = |source: std::io::Error| ManifestError::Write {
        path: target.display().to_string(),
        source,
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_error)?;
    tmp.write_all(rendered.as_bytes()).map_err(write_error)?;
    tmp.flush().map_err(write_error)?;
    tmp.persist(&target).map_err(|e| write_error(e.error))?;

    tracing::debug!(path = %target.display(), entries = config.len(), "Saved configuration");
    Ok(target)
}
