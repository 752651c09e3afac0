// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration.

#[cfg(feature = "http")]
use crate::protocol::HttpConfig;

/// Configuration for a [`LightControls`](super::LightControls) controller.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use light_controls_http::controller::ControllerConfig;
/// use light_controls_http::protocol::HttpConfig;
///
/// let config = ControllerConfig::new()
///     .with_http(HttpConfig::new("192.168.1.20").with_timeout(Duration::from_secs(2)))
///     .with_event_capacity(64);
/// assert_eq!(config.event_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Where relative light URLs are requested.
    #[cfg(feature = "http")]
    pub http: HttpConfig,
    /// Buffer size of the notification channel.
    pub event_capacity: usize,
}

impl ControllerConfig {
    /// Default notification channel capacity.
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Sets the notification channel capacity. Zero is raised to one.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            #[cfg(feature = "http")]
            http: HttpConfig::default(),
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_event_capacity() {
        assert_eq!(ControllerConfig::default().event_capacity, 256);
    }

    #[cfg(feature = "http")]
    #[test]
    fn default_http_targets_localhost() {
        let config = ControllerConfig::default();
        assert_eq!(config.http.base_url(), "http://127.0.0.1");
    }

    #[test]
    fn zero_capacity_is_raised() {
        assert_eq!(ControllerConfig::new().with_event_capacity(0).event_capacity, 1);
    }
}
