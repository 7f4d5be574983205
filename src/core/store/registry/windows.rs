// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Win32 registry calls for [`super::RegistryStore`].
//!
//! ```text
//! open(scope, access) --> RegOpenKeyExW(KEY_READ | KEY_SET_VALUE) --> OpenKey
//! OpenKey::set        --> RegSetValueExW(REG_SZ | REG_EXPAND_SZ)
//! OpenKey::delete     --> RegDeleteValueW, ERROR_FILE_NOT_FOUND = AlreadyAbsent
//! OpenKey::values     --> RegEnumValueW until ERROR_NO_MORE_ITEMS
//! drop                --> RegCloseKey
//! ```

use ::windows::Win32::Foundation::{
    ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS, WIN32_ERROR,
};
use ::windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_SET_VALUE, REG_EXPAND_SZ, REG_SZ,
    REG_VALUE_TYPE, RegCloseKey, RegDeleteValueW, RegEnumValueW, RegOpenKeyExW, RegSetValueExW,
};
use ::windows::core::{PCWSTR, PWSTR};

use crate::core::store::{Access, DeleteOutcome, location};
use crate::error::StoreError;
use crate::model::Scope;

/// Longest value name the registry allows, plus the terminator.
const MAX_NAME_CHARS: usize = 16_384;

fn win32_to_io(err: WIN32_ERROR) -> std::io::Error {
    std::io::Error::from_raw_os_error(err.0.cast_signed())
}

/// Null-terminated UTF-16 copy of `s`.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// An open registry key, closed on drop.
pub(super) struct OpenKey {
    handle: HKEY,
    scope: Scope,
}

impl Drop for OpenKey {
    fn drop(&mut self) {
        // SAFETY: handle came from a successful RegOpenKeyExW and is closed once.
        unsafe {
            let _ = RegCloseKey(self.handle);
        }
    }
}

/// Opens the registry key backing `scope`.
pub(super) fn open(scope: Scope, access: Access) -> Result<OpenKey, StoreError> {
    let hive = match scope {
        Scope::User => HKEY_CURRENT_USER,
        Scope::System => HKEY_LOCAL_MACHINE,
    };
    let sam = match access {
        Access::Read => KEY_READ,
        Access::Write => KEY_SET_VALUE | KEY_READ,
    };
    let subkey = wide(location(scope).subkey);
    let mut handle = HKEY::default();

    // SAFETY: subkey is null-terminated and outlives the call; handle is a valid out pointer.
    let status =
        unsafe { RegOpenKeyExW(hive, PCWSTR(subkey.as_ptr()), Some(0), sam, &raw mut handle) };

    if status == ERROR_SUCCESS {
        Ok(OpenKey { handle, scope })
    } else {
        Err(StoreError::Access {
            scope,
            location: location(scope).to_string(),
            access,
            source: win32_to_io(status),
        })
    }
}

impl OpenKey {
    pub(super) fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let kind = if value.contains('%') {
            REG_EXPAND_SZ
        } else {
            REG_SZ
        };
        let name_w = wide(name);
        let data: Vec<u8> = wide(value).iter().flat_map(|c| c.to_le_bytes()).collect();

        // SAFETY: name_w is null-terminated; data is a complete REG_SZ payload.
        let status =
            unsafe { RegSetValueExW(self.handle, PCWSTR(name_w.as_ptr()), None, kind, Some(&data)) };

        if status == ERROR_SUCCESS {
            Ok(())
        } else {
            Err(StoreError::Write {
                name: name.to_string(),
                location: location(self.scope).to_string(),
                source: win32_to_io(status),
            })
        }
    }

    pub(super) fn delete(&self, name: &str) -> Result<DeleteOutcome, StoreError> {
        let name_w = wide(name);

        // SAFETY: name_w is null-terminated and outlives the call.
        let status = unsafe { RegDeleteValueW(self.handle, PCWSTR(name_w.as_ptr())) };

        match status {
            ERROR_SUCCESS => Ok(DeleteOutcome::Deleted),
            ERROR_FILE_NOT_FOUND => Ok(DeleteOutcome::AlreadyAbsent),
            other => Err(StoreError::Delete {
                name: name.to_string(),
                location: location(self.scope).to_string(),
                source: win32_to_io(other),
            }),
        }
    }

    pub(super) fn values(&self) -> Result<Vec<(String, String)>, StoreError> {
        let mut values = Vec::new();
        let mut name_buf = vec![0u16; 256];
        let mut data_buf = vec![0u8; 4096];
        let mut index = 0u32;

        loop {
            let mut name_len = u32::try_from(name_buf.len()).unwrap_or(u32::MAX);
            let mut data_len = u32::try_from(data_buf.len()).unwrap_or(u32::MAX);
            let mut kind = 0u32;

            // SAFETY: buffer lengths are passed alongside their buffers.
            let status = unsafe {
                RegEnumValueW(
                    self.handle,
                    index,
                    PWSTR(name_buf.as_mut_ptr()),
                    &raw mut name_len,
                    None,
                    Some(&raw mut kind),
                    Some(data_buf.as_mut_ptr()),
                    Some(&raw mut data_len),
                )
            };

            match status {
                ERROR_SUCCESS => {}
                ERROR_NO_MORE_ITEMS => break,
                ERROR_MORE_DATA => {
                    name_buf.resize(MAX_NAME_CHARS, 0);
                    data_buf.resize((data_len as usize).max(data_buf.len() * 2), 0);
                    continue;
                }
                other => {
                    return Err(StoreError::Access {
                        scope: self.scope,
                        location: location(self.scope).to_string(),
                        access: Access::Read,
                        source: win32_to_io(other),
                    });
                }
            }

            index += 1;
            let name = String::from_utf16_lossy(&name_buf[..name_len as usize]);
            let kind = REG_VALUE_TYPE(kind);
            if kind != REG_SZ && kind != REG_EXPAND_SZ {
                tracing::warn!(scope = %self.scope, name, kind = kind.0, "Skipping non-string registry value");
                continue;
            }

            values.push((name, decode_string(&data_buf[..data_len as usize])));
        }

        Ok(values)
    }
}

/// Decodes a REG_SZ payload, dropping trailing terminators.
fn decode_string(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let end = units.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
    String::from_utf16_lossy(&units[..end])
}
