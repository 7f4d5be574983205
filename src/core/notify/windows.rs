// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows-specific broadcast.

use ::windows::Win32::Foundation::{ERROR_TIMEOUT, LPARAM, WPARAM};
use ::windows::Win32::UI::WindowsAndMessaging::{
    HWND_BROADCAST, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_SETTINGCHANGE,
};

use crate::error::NotificationError;

/// Sends `WM_SETTINGCHANGE` with `lParam = "Environment"`.
///
/// # Errors
///
/// Returns [`NotificationError::TimedOut`] when listeners do not answer in
/// time, [`NotificationError::BroadcastFailed`] otherwise.
pub(super) fn broadcast_environment_change(timeout_ms: u32) -> Result<(), NotificationError> {
    let area: Vec<u16> = "Environment"
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();
    let mut result = 0usize;

    // SAFETY: `area` is null-terminated and outlives the synchronous call.
    let ret = unsafe {
        SendMessageTimeoutW(
            HWND_BROADCAST,
            WM_SETTINGCHANGE,
            WPARAM(0),
            LPARAM(area.as_ptr() as isize),
            SMTO_ABORTIFHUNG,
            timeout_ms,
            Some(&raw mut result),
        )
    };

    if ret.0 != 0 {
        return Ok(());
    }

    let source = std::io::Error::last_os_error();
    if source.raw_os_error() == Some(ERROR_TIMEOUT.0.cast_signed()) {
        Err(NotificationError::TimedOut {
            timeout_ms: u64::from(timeout_ms),
        })
    } else {
        Err(NotificationError::BroadcastFailed { source })
    }
}
