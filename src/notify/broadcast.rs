// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `WM_SETTINGCHANGE` broadcast.
//!
//! ```text
//! SendMessageTimeoutW(HWND_BROADCAST, WM_SETTINGCHANGE, 0, "Environment",
//!                     SMTO_ABORTIFHUNG, timeout)
//! ```
//!
//! Explorer and other top-level windows reload their environment block on
//! this message, so new processes see the change without a logoff.

use std::time::Duration;

use tracing::debug;
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    HWND_BROADCAST, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_SETTINGCHANGE,
};
use windows::core::w;

use super::{NotifyError, Notifier};
use crate::store::Scope;

/// Broadcasts `WM_SETTINGCHANGE` to all top-level windows.
#[derive(Debug, Clone, Copy)]
pub struct BroadcastNotifier {
    timeout: Duration,
}

impl BroadcastNotifier {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Notifier for BroadcastNotifier {
    fn name(&self) -> &'static str {
        "broadcast"
    }

    fn environment_changed(&self, scopes: &[Scope]) -> Result<(), NotifyError> {
        let timeout_ms = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let area = w!("Environment");
        let mut result = 0usize;

        // SAFETY: `area` is a static NUL-terminated wide string; the result
        // pointer is valid for the duration of the call.
        let sent = unsafe {
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

        if sent.0 == 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(1460) {
                // ERROR_TIMEOUT
                return Err(NotifyError::Timeout {
                    timeout: self.timeout,
                });
            }
            return Err(NotifyError::Broadcast(err));
        }

        debug!(?scopes, "broadcast WM_SETTINGCHANGE");
        Ok(())
    }
}
