// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Application settings.
//!
//! # Layering
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. envman.toml next to the executable   (optional)
//! 3. envman.toml in the current directory (optional)
//! 4. --config FILE                        (required, repeatable)
//! 5. ENVMAN_* environment variables
//! 6. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! Sections and keys are separated by a double underscore:
//!
//! ```text
//! ENVMAN_NOTIFY__ENABLED=false         → notify.enabled = false
//! ENVMAN_NOTIFY__TIMEOUT_MS=2000       → notify.timeout_ms = 2000
//! ENVMAN_GLOBAL__OUTPUT_LOG_LEVEL=4    → global.output_log_level = 4
//! ```
//!
//! These settings configure the tool itself; the declared variables live in
//! the YAML files handled by [`crate::manifest`].

pub mod loader;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;

pub use loader::ConfigLoader;

/// File name looked up next to the executable and in the working directory.
pub const SETTINGS_FILE_NAME: &str = "envman.toml";

/// Prefix of settings environment variables.
pub const ENV_PREFIX: &str = "ENVMAN";

/// Complete application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub global: GlobalSettings,
    pub notify: NotifySettings,
    pub export: ExportSettings,
}

/// `[global]`: logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalSettings {
    /// Console verbosity (0-6).
    pub output_log_level: LogLevel,
    /// Log file verbosity (0-6).
    pub file_log_level: LogLevel,
    /// Log file; empty disables file logging.
    pub log_file: PathBuf,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
        }
    }
}

/// `[notify]`: settings-change broadcast after an apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifySettings {
    pub enabled: bool,
    pub timeout_ms: u64,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 5000,
        }
    }
}

/// `[export]`: store snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Include the system scope; only honored when running elevated.
    pub include_system: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            include_system: true,
        }
    }
}

impl Settings {
    /// Create a new settings loader.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envman::config::Settings;
    ///
    /// let settings = Settings::builder()
    ///     .add_toml_file_optional("envman.toml")
    ///     .with_env_prefix("ENVMAN")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Loader with the standard layers: the executable's directory, the
    /// working directory, each of `explicit`, and the environment.
    #[must_use]
    pub fn standard_loader(explicit: &[PathBuf]) -> ConfigLoader {
        let mut loader = Self::builder();

        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            loader = loader.add_toml_file_optional(dir.join(SETTINGS_FILE_NAME));
        }
        loader = loader.add_toml_file_optional(SETTINGS_FILE_NAME);

        for path in explicit {
            loader = loader.add_toml_file(path);
        }

        loader.with_env_prefix(ENV_PREFIX)
    }

    /// Parse settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, names unknown keys,
    /// or holds an invalid value.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values the types cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero broadcast timeout.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.notify.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                section: "notify".to_string(),
                key: "timeout_ms".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Log file, if file logging is enabled.
    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        let path = self.global.log_file.as_path();
        (!path.as_os_str().is_empty()).then_some(path)
    }

    /// Broadcast timeout.
    #[must_use]
    pub const fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify.timeout_ms)
    }

    /// `key = value` lines, sorted by key and aligned.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global.log_file.display().to_string(),
        );
        options.insert("notify.enabled", self.notify.enabled.to_string());
        options.insert("notify.timeout_ms", self.notify.timeout_ms.to_string());
        options.insert(
            "export.include_system",
            self.export.include_system.to_string(),
        );

        let width = options.keys().map(|key| key.len()).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<width$} = {value}"))
            .collect()
    }
}
