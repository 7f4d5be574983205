// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows-specific privilege utilities.
//!
//! ```text
//! token_is_elevated()  OpenProcessToken --> GetTokenInformation(TokenElevation)
//! relaunch_elevated()  ShellExecuteW("runas") --> > 32 ok, 5 declined
//! ```

use std::os::windows::ffi::OsStrExt;

use ::windows::Win32::Foundation::{CloseHandle, HANDLE};
use ::windows::Win32::Security::{GetTokenInformation, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation};
use ::windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};
use ::windows::Win32::UI::Shell::ShellExecuteW;
use ::windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
use ::windows::core::PCWSTR;

use crate::error::ElevationError;

/// `ShellExecuteW` code for a refused UAC prompt.
const SE_ERR_ACCESSDENIED: isize = 5;

/// Process token handle, closed on drop.
struct Token(HANDLE);

impl Drop for Token {
    fn drop(&mut self) {
        // SAFETY: the handle came from OpenProcessToken and is closed once.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Queries whether the current process token is elevated.
pub(super) fn token_is_elevated() -> ::windows::core::Result<bool> {
    let mut handle = HANDLE::default();
    // SAFETY: GetCurrentProcess returns a pseudo handle; handle is a valid out pointer.
    unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &raw mut handle)? };
    let token = Token(handle);

    let mut elevation = TOKEN_ELEVATION::default();
    let mut returned = 0u32;
    let size = u32::try_from(std::mem::size_of::<TOKEN_ELEVATION>()).unwrap_or(u32::MAX);

    // SAFETY: elevation is a TOKEN_ELEVATION of exactly `size` bytes.
    unsafe {
        GetTokenInformation(
            token.0,
            TokenElevation,
            Some((&raw mut elevation).cast()),
            size,
            &raw mut returned,
        )?;
    }

    Ok(elevation.TokenIsElevated != 0)
}

fn wide_os(s: &std::ffi::OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

/// Starts this executable elevated with `parameters` in the current directory.
pub(super) fn relaunch_elevated(parameters: &str) -> Result<(), ElevationError> {
    let exe = std::env::current_exe().map_err(ElevationError::ExecutablePath)?;
    let cwd = std::env::current_dir().ok();

    let verb = wide_os("runas".as_ref());
    let file = wide_os(exe.as_os_str());
    let params = wide_os(parameters.as_ref());
    let dir = cwd.as_deref().map(|d| wide_os(d.as_os_str()));

    // SAFETY: every buffer is null-terminated and outlives the call.
    let instance = unsafe {
        ShellExecuteW(
            None,
            PCWSTR(verb.as_ptr()),
            PCWSTR(file.as_ptr()),
            PCWSTR(params.as_ptr()),
            dir.as_ref().map_or(PCWSTR::null(), |d| PCWSTR(d.as_ptr())),
            SW_SHOWNORMAL,
        )
    };

    let code = instance.0 as isize;
    if code > 32 {
        Ok(())
    } else if code == SE_ERR_ACCESSDENIED {
        Err(ElevationError::Declined)
    } else {
        Err(ElevationError::LaunchFailed {
            program: exe.display().to_string(),
            code,
        })
    }
}
