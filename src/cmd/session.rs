// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! State of one envman invocation, handed to every command handler.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{EnvError, ManifestError, Result};
use crate::manifest;
use crate::model::PrivilegeState;

/// Selected file, privilege level, status line and settings.
#[derive(Debug, Clone)]
pub struct Session {
    selected: Option<PathBuf>,
    privilege: PrivilegeState,
    status: String,
    settings: Settings,
    settings_files: Vec<String>,
    config_files: Vec<PathBuf>,
    dry: bool,
}

impl Session {
    #[must_use]
    pub fn new(privilege: PrivilegeState, settings: Settings) -> Self {
        Self {
            selected: None,
            privilege,
            status: "Ready. Please select a YAML config file.".to_string(),
            settings,
            settings_files: Vec::new(),
            config_files: Vec::new(),
            dry: false,
        }
    }

    /// Records the settings sources shown by `status`.
    #[must_use]
    pub fn with_settings_files(mut self, files: Vec<String>) -> Self {
        self.settings_files = files;
        self
    }

    /// Records the `--config` files given on the command line.
    #[must_use]
    pub fn with_config_files(mut self, files: Vec<PathBuf>) -> Self {
        self.config_files = files;
        self
    }

    #[must_use]
    pub const fn with_dry(mut self, dry: bool) -> Self {
        self.dry = dry;
        self
    }

    /// Selects `path` after checking its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::UnsupportedFileType`] and keeps the previous
    /// selection if `path` is not a `.yaml` or `.yml` file.
    pub fn select(&mut self, path: &Path) -> std::result::Result<(), ManifestError> {
        manifest::ensure_recognized(path)?;
        self.selected = Some(path.to_path_buf());
        self.set_status(
            "File selected. Run `envman preview` or `envman apply` to proceed.",
        );
        Ok(())
    }

    /// `explicit` if given, otherwise the selected file.
    ///
    /// # Errors
    ///
    /// Returns an error if neither is available.
    pub fn resolve_file(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        explicit
            .or(self.selected.as_deref())
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                EnvError::Other("no YAML config file selected; pass FILE".into()).into()
            })
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    #[must_use]
    pub const fn privilege(&self) -> PrivilegeState {
        self.privilege
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        tracing::debug!(status = %self.status, "Status changed");
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn settings_files(&self) -> &[String] {
        &self.settings_files
    }

    #[must_use]
    pub fn config_files(&self) -> &[PathBuf] {
        &self.config_files
    }

    #[must_use]
    pub const fn is_dry(&self) -> bool {
        self.dry
    }
}
