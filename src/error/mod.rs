// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 EnvError (~24 bytes)
//!                        |
//!      +--------+--------+--+-----+--------+--------+
//!      |        |        |        |        |        |
//!      v        v        v        v        v        v
//!  Manifest   Store   Notify  Elevation  Cfg    Io / Other
//!     Box      Box      Box      Box     Box   Box / Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Manifest     UnsupportedFileType, Read, Format, Render, Write
//!   Store        Access, Write, Delete, Unsupported
//!   Notification BroadcastFailed, TimedOut, Unsupported
//!   Elevation    ExecutablePath, Declined, LaunchFailed, Unsupported
//!   Config       InvalidValue
//! ```
//!
//! File-level errors abort an action. Per-entry outcomes of an apply pass are
//! not errors; they live in [`crate::apply::report`].

use thiserror::Error;

use crate::core::store::Access;
use crate::model::Scope;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvError`].
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Declarative file could not be accepted, read, parsed or written.
    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    /// Persistent variable store could not be accessed.
    #[error("store error: {0}")]
    Store(#[from] Box<StoreError>),

    /// Settings-change broadcast failed.
    #[error("notification error: {0}")]
    Notification(#[from] Box<NotificationError>),

    /// Elevated relaunch failed.
    #[error("elevation error: {0}")]
    Elevation(#[from] Box<ElevationError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvError {
                fn from(err: $error) -> Self {
                    EnvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ManifestError => Manifest,
    StoreError => Store,
    NotificationError => Notification,
    ElevationError => Elevation,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Manifest Errors ---

/// Errors raised while accepting, reading, parsing or writing a declarative file.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The path does not carry a `.yaml` / `.yml` extension.
    #[error("unsupported file type '{path}': expected a .yaml or .yml file")]
    UnsupportedFileType { path: String },

    /// The file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed.
    #[error("failed to parse '{path}': {message}")]
    Format { path: String, message: String },

    /// The configuration could not be rendered.
    #[error("failed to render configuration: {message}")]
    Render { message: String },

    /// The rendered configuration could not be written.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Store Errors ---

/// Errors raised by a persistent variable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A scope location could not be opened with the requested access.
    #[error("cannot open {scope} store '{location}' for {access}: {source}")]
    Access {
        scope: Scope,
        location: String,
        access: Access,
        #[source]
        source: std::io::Error,
    },

    /// A single value could not be written.
    #[error("failed to set '{name}' in '{location}': {source}")]
    Write {
        name: String,
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// A single value could not be removed.
    #[error("failed to delete '{name}' from '{location}': {source}")]
    Delete {
        name: String,
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// No persistent store exists on this host.
    #[error("the persistent environment store is only available on Windows")]
    Unsupported,
}

// --- Notification Errors ---

/// Errors raised while announcing an environment change.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The broadcast call itself failed.
    #[error("settings-change broadcast failed: {source}")]
    BroadcastFailed {
        #[source]
        source: std::io::Error,
    },

    /// Listeners did not acknowledge within the timeout.
    #[error("settings-change broadcast timed out after {timeout_ms} ms")]
    TimedOut { timeout_ms: u64 },

    /// Broadcasting is not available on this host.
    #[error("settings-change broadcast is only available on Windows")]
    Unsupported,
}

// --- Elevation Errors ---

/// Errors raised while relaunching with elevated privilege.
#[derive(Debug, Error)]
pub enum ElevationError {
    /// The path of the running executable could not be determined.
    #[error("cannot find executable path: {0}")]
    ExecutablePath(#[source] std::io::Error),

    /// The user dismissed the elevation prompt.
    #[error("elevation was declined")]
    Declined,

    /// The elevated process could not be started.
    #[error("failed to launch '{program}' elevated (code {code})")]
    LaunchFailed { program: String, code: isize },

    /// Elevation is not available on this host.
    #[error("elevated relaunch is only available on Windows")]
    Unsupported,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
