// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host-wide "environment changed" announcement.
//!
//! ```text
//! Notifier (trait)
//!   BroadcastNotifier  WM_SETTINGCHANGE("Environment") to HWND_BROADCAST,
//!                      SMTO_ABORTIFHUNG, bounded by timeout (default 5 s)
//!   NullNotifier       dry runs / notify.enabled = false
//! ```
//!
//! Best-effort: a failed broadcast is reported, never retried, and never
//! undoes store changes.

#[cfg(windows)]
mod windows;


use std::time::Duration;

use crate::error::NotificationError;

/// Announces that persistent environment state changed.
pub trait Notifier: Send + Sync {
    /// Sends the announcement once.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] if the broadcast fails or times out.
    fn announce(&self) -> Result<(), NotificationError>;
}

/// Broadcasts `WM_SETTINGCHANGE` to all top-level windows.
#[derive(Debug, Clone, Copy)]
pub struct BroadcastNotifier {
    timeout: Duration,
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl BroadcastNotifier {
    /// Time listeners get to acknowledge the broadcast.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn timeout_ms(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }
}

impl Notifier for BroadcastNotifier {
    #[cfg(windows)]
    fn announce(&self) -> Result<(), NotificationError> {
        tracing::info!(timeout_ms = self.timeout_ms(), "Broadcasting WM_SETTINGCHANGE");
        windows::broadcast_environment_change(self.timeout_ms())
    }

    #[cfg(not(windows))]
    fn announce(&self) -> Result<(), NotificationError> {
        tracing::debug!(timeout_ms = self.timeout_ms(), "No settings-change broadcast on this host");
        Err(NotificationError::Unsupported)
    }
}

/// A notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn announce(&self) -> Result<(), NotificationError> {
        Ok(())
    }
}
