// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args + Session --> cmd::run_* handlers --> Completion
//!   preview, apply, export, elevate, status, (none)
//!
//! Ok(Success)         exit 0
//! Ok(PartialFailure)  exit 2   some entries failed
//! Err(_)              exit 1   file-level error, nothing applied
//! ```
//!
//! Store access, file I/O and the broadcast run on the blocking pool.

pub mod apply;
pub mod elevate;
pub mod export;
pub mod preview;
pub mod session;
pub mod status;


use std::path::PathBuf;

use anyhow::Context;

use crate::error::Result;
use crate::manifest;
use crate::model::Configuration;

pub use session::Session;

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Success,
    /// The command ran to the end but some entries failed.
    PartialFailure,
}

impl Completion {
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::PartialFailure => 2,
        }
    }
}

/// Runs `f` on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("blocking task did not complete")?
}

/// Guards, reads and parses `path` off the async runtime.
pub(crate) async fn load_manifest(path: PathBuf) -> Result<Configuration> {
    blocking(move || Ok(manifest::load_file(&path)?)).await
}
