// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lifecycle events delivered by the host application.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A lifecycle event of the printer host.
///
/// # Examples
///
/// ```
/// use light_controls_http::event::HostEvent;
///
/// let event: HostEvent = "PrintStarted".parse().unwrap();
/// assert_eq!(event, HostEvent::PrintStarted);
/// assert_eq!(event.as_str(), "PrintStarted");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// The host finished starting up.
    Startup,
    /// The printer connected.
    Connected,
    /// The printer disconnected.
    Disconnected,
    /// A print job started.
    PrintStarted,
    /// A print job was paused.
    PrintPaused,
    /// A print job was resumed.
    PrintResumed,
    /// A print job completed.
    PrintDone,
    /// A print job was cancelled.
    PrintCancelled,
    /// A print job failed.
    PrintFailed,
    /// The host is shutting down.
    Shutdown,
    /// The light settings were saved.
    SettingsUpdated,
}

impl HostEvent {
    /// Every event kind.
    pub const ALL: [Self; 11] = [
        Self::Startup,
        Self::Connected,
        Self::Disconnected,
        Self::PrintStarted,
        Self::PrintPaused,
        Self::PrintResumed,
        Self::PrintDone,
        Self::PrintCancelled,
        Self::PrintFailed,
        Self::Shutdown,
        Self::SettingsUpdated,
    ];

    /// Returns the host's name for this event.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "Startup",
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
            Self::PrintStarted => "PrintStarted",
            Self::PrintPaused => "PrintPaused",
            Self::PrintResumed => "PrintResumed",
            Self::PrintDone => "PrintDone",
            Self::PrintCancelled => "PrintCancelled",
            Self::PrintFailed => "PrintFailed",
            Self::Shutdown => "Shutdown",
            Self::SettingsUpdated => "SettingsUpdated",
        }
    }

    /// Returns `true` for the three ways a print job can end.
    #[must_use]
    pub const fn is_print_end(&self) -> bool {
        matches!(
            self,
            Self::PrintDone | Self::PrintCancelled | Self::PrintFailed
        )
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostEvent {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| ValueError::UnknownEvent(s.to_string()))
    }
}
