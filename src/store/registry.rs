// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows registry backend.
//!
//! ```text
//! User   HKCU\Environment
//! System HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment
//!
//! read   RegEnumValueW + RegGetValueW(RRF_NOEXPAND)   %VAR% kept as written
//! write  RegSetValueExW(REG_EXPAND_SZ) / RegDeleteValueW
//! drop   RegCloseKey
//! ```

use std::io;
use std::iter;

use tracing::{debug, warn};
use windows::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS,
    ERROR_SUCCESS, ERROR_UNSUPPORTED_TYPE, WIN32_ERROR,
};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WRITE, REG_EXPAND_SZ,
    REG_SAM_FLAGS, RRF_NOEXPAND, RRF_RT_REG_EXPAND_SZ, RRF_RT_REG_SZ, RegCloseKey,
    RegDeleteValueW, RegEnumValueW, RegGetValueW, RegOpenKeyExW, RegSetValueExW,
};
use windows::core::{PCWSTR, PWSTR};

use crate::error::{EnvResult, StoreError};

use super::backend::{Access, EnvBackend, ScopeKey};
use super::{EnvVarEntry, Scope};

const USER_SUBKEY: &str = "Environment";
const SYSTEM_SUBKEY: &str = r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

/// Longest registry value name, in UTF-16 units, plus the terminator.
const MAX_VALUE_NAME: usize = 16_384;

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(iter::once(0)).collect()
}

fn win32_to_io(status: WIN32_ERROR) -> io::Error {
    #[allow(clippy::cast_possible_wrap)]
    io::Error::from_raw_os_error(status.0 as i32)
}

const fn subkey(scope: Scope) -> (HKEY, &'static str) {
    match scope {
        Scope::User => (HKEY_CURRENT_USER, USER_SUBKEY),
        Scope::System => (HKEY_LOCAL_MACHINE, SYSTEM_SUBKEY),
    }
}

/// Reads and writes the registry keys Windows builds process environments
/// from.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryBackend;

impl EnvBackend for RegistryBackend {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn open(&self, scope: Scope, access: Access) -> EnvResult<Option<Box<dyn ScopeKey + '_>>> {
        let (root, path) = subkey(scope);
        let wide = to_wide(path);
        let sam: REG_SAM_FLAGS = if access.is_write() {
            KEY_READ | KEY_WRITE
        } else {
            KEY_READ
        };

        let mut hkey = HKEY::default();
        // SAFETY: `wide` is NUL-terminated and outlives the call; `hkey` is a
        // valid out pointer.
        let status =
            unsafe { RegOpenKeyExW(root, PCWSTR(wide.as_ptr()), Some(0), sam, &raw mut hkey) };

        match status {
            ERROR_SUCCESS => {
                debug!(scope = %scope, key = path, ?access, "opened registry key");
                Ok(Some(Box::new(RegistryKey { hkey, scope, path })))
            }
            ERROR_FILE_NOT_FOUND => Ok(None),
            ERROR_ACCESS_DENIED if access.is_write() => Err(StoreError::unavailable(
                scope,
                "access denied (run elevated to change system variables)",
            )
            .into()),
            ERROR_ACCESS_DENIED => Ok(None),
            other => Err(StoreError::Io {
                scope,
                location: path.to_string(),
                source: win32_to_io(other),
            }
            .into()),
        }
    }
}

/// An open registry key, closed on drop.
struct RegistryKey {
    hkey: HKEY,
    scope: Scope,
    path: &'static str,
}

impl RegistryKey {
    fn io_error(&self, status: WIN32_ERROR) -> crate::error::EnvError {
        if status == ERROR_ACCESS_DENIED {
            return StoreError::unavailable(self.scope, "access denied").into();
        }
        StoreError::Io {
            scope: self.scope,
            location: self.path.to_string(),
            source: win32_to_io(status),
        }
        .into()
    }

    fn value_names(&self) -> EnvResult<Vec<String>> {
        let mut names = Vec::new();
        let mut buffer = vec![0u16; MAX_VALUE_NAME];

        for index in 0u32.. {
            #[allow(clippy::cast_possible_truncation)]
            let mut len = buffer.len() as u32;
            // SAFETY: `buffer` holds `len` UTF-16 units; data pointers are
            // omitted so only the name is returned.
            let status = unsafe {
                RegEnumValueW(
                    self.hkey,
                    index,
                    Some(PWSTR(buffer.as_mut_ptr())),
                    &raw mut len,
                    None,
                    None,
                    None,
                    None,
                )
            };
            match status {
                ERROR_SUCCESS => names.push(String::from_utf16_lossy(&buffer[..len as usize])),
                ERROR_NO_MORE_ITEMS => break,
                other => return Err(self.io_error(other)),
            }
        }

        Ok(names)
    }

    /// Reads a string value without expanding `%VAR%` references.
    fn read_value(&self, name: &str) -> EnvResult<Option<String>> {
        let wide_name = to_wide(name);
        let flags = RRF_RT_REG_SZ | RRF_RT_REG_EXPAND_SZ | RRF_NOEXPAND;
        let mut data: Vec<u16> = vec![0; 256];

        loop {
            #[allow(clippy::cast_possible_truncation)]
            let mut size = (data.len() * 2) as u32;
            // SAFETY: `data` is `size` bytes long and `wide_name` is
            // NUL-terminated; both outlive the call.
            let status = unsafe {
                RegGetValueW(
                    self.hkey,
                    PCWSTR::null(),
                    PCWSTR(wide_name.as_ptr()),
                    flags,
                    None,
                    Some(data.as_mut_ptr().cast()),
                    Some(&raw mut size),
                )
            };
            match status {
                ERROR_SUCCESS => {
                    let units = (size as usize / 2).min(data.len());
                    let text = &data[..units];
                    let end = text.iter().position(|&c| c == 0).unwrap_or(text.len());
                    return Ok(Some(String::from_utf16_lossy(&text[..end])));
                }
                ERROR_MORE_DATA => data.resize(size as usize / 2 + 1, 0),
                ERROR_FILE_NOT_FOUND => return Ok(None),
                ERROR_UNSUPPORTED_TYPE => {
                    warn!(scope = %self.scope, name, "skipping non-string registry value");
                    return Ok(None);
                }
                other => return Err(self.io_error(other)),
            }
        }
    }
}

impl ScopeKey for RegistryKey {
    fn location(&self) -> String {
        let root = match self.scope {
            Scope::User => "HKCU",
            Scope::System => "HKLM",
        };
        format!(r"{root}\{}", self.path)
    }

    fn names(&self) -> EnvResult<Vec<String>> {
        self.value_names()
    }

    fn entries(&self) -> EnvResult<Vec<EnvVarEntry>> {
        let mut entries = Vec::new();
        for name in self.value_names()? {
            if let Some(value) = self.read_value(&name)? {
                entries.push(EnvVarEntry { name, value });
            }
        }
        Ok(entries)
    }

    fn set(&mut self, name: &str, value: &str) -> EnvResult<()> {
        let wide_name = to_wide(name);
        let data: Vec<u8> = value
            .encode_utf16()
            .chain(iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();
        // SAFETY: `wide_name` is NUL-terminated and `data` is a NUL-terminated
        // UTF-16LE string, as REG_EXPAND_SZ requires.
        let status = unsafe {
            RegSetValueExW(
                self.hkey,
                PCWSTR(wide_name.as_ptr()),
                None,
                REG_EXPAND_SZ,
                Some(&data),
            )
        };
        if status == ERROR_SUCCESS {
            Ok(())
        } else {
            Err(self.io_error(status))
        }
    }

    fn remove(&mut self, name: &str) -> EnvResult<bool> {
        let wide_name = to_wide(name);
        // SAFETY: `wide_name` is NUL-terminated and outlives the call.
        let status = unsafe { RegDeleteValueW(self.hkey, PCWSTR(wide_name.as_ptr())) };
        match status {
            ERROR_SUCCESS => Ok(true),
            ERROR_FILE_NOT_FOUND => Ok(false),
            other => Err(self.io_error(other)),
        }
    }
}

impl Drop for RegistryKey {
    fn drop(&mut self) {
        // SAFETY: the handle was opened by RegOpenKeyExW and is closed once.
        unsafe {
            let _ = RegCloseKey(self.hkey);
        }
    }
}
