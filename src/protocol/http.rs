// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for lights.

use std::time::Duration;

use reqwest::Client;

use crate::error::ProtocolError;
use crate::protocol::{Transport, TransportResponse};
use crate::types::is_absolute_url;

// ============================================================================
// HttpConfig - where light requests are sent
// ============================================================================

/// Configuration of the HTTP endpoint that light paths are appended to.
///
/// Light identifiers are usually paths such as `/led?v={value}`; they are
/// requested relative to this base. Identifiers that are complete URLs
/// bypass it.
///
/// # Examples
///
/// ```
/// use light_controls_http::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Defaults: http://127.0.0.1, 5 second timeout
/// let config = HttpConfig::default();
/// assert_eq!(config.base_url(), "http://127.0.0.1");
///
/// let config = HttpConfig::new("192.168.1.40")
///     .with_port(8080)
///     .with_credentials("admin", "password")
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.base_url(), "http://192.168.1.40:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    credentials: Option<(String, String)>,
    timeout: Option<Duration>,
}

impl HttpConfig {
    /// Default host.
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a new HTTP configuration for the specified host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            credentials: None,
            timeout: Some(Self::DEFAULT_TIMEOUT),
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets HTTP basic authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables the request timeout.
    ///
    /// A light that never answers will then stall the dispatching task.
    #[must_use]
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an `HttpTransport` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_transport(self) -> Result<HttpTransport, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let base_url = self.base_url();

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProtocolError::Http)?;

        Ok(HttpTransport {
            base_url,
            client,
            credentials: self.credentials,
            timeout: self.timeout,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST)
    }
}

// ============================================================================
// HttpTransport
// ============================================================================

/// Issues GET requests for rendered light URLs.
///
/// The response body is ignored; any non-2xx status is an error.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
    credentials: Option<(String, String)>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Returns the base URL that relative light paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a rendered light URL against the base URL.
    #[must_use]
    pub fn resolve(&self, target: &str) -> String {
        if is_absolute_url(target) {
            target.to_string()
        } else if target.starts_with('/') {
            format!("{}{target}", self.base_url)
        } else {
            format!("{}/{target}", self.base_url)
        }
    }

    fn map_error(&self, error: reqwest::Error) -> ProtocolError {
        match self.timeout {
            Some(timeout) if error.is_timeout() => {
                ProtocolError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
            }
            _ => ProtocolError::Http(error),
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, target: &str) -> Result<TransportResponse, ProtocolError> {
        let url = self.resolve(target);

        tracing::debug!(url = %url, "Sending light request");

        let mut request = self.client.get(&url);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();

        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        tracing::debug!(url = %url, status = status.as_u16(), "Light request succeeded");

        Ok(TransportResponse::new(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::default();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 80);
        assert!(!config.use_https());
        assert!(config.credentials().is_none());
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn http_config_with_https() {
        let config = HttpConfig::new("lights.local").with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_url(), "https://lights.local");
    }

    #[test]
    fn http_config_with_https_custom_port() {
        let config = HttpConfig::new("lights.local").with_port(8443).with_https();
        assert_eq!(config.base_url(), "https://lights.local:8443");
    }

    #[test]
    fn http_config_without_timeout() {
        let config = HttpConfig::default().without_timeout();
        assert!(config.timeout().is_none());
    }

    #[test]
    fn http_config_with_credentials() {
        let config = HttpConfig::default().with_credentials("admin", "secret");
        assert_eq!(config.credentials(), Some(("admin", "secret")));
    }

    #[test]
    fn into_transport_rejects_empty_host() {
        let result = HttpConfig::new("  ").into_transport();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn resolve_relative_and_absolute() {
        let transport = HttpConfig::new("10.0.0.2")
            .with_port(8080)
            .into_transport()
            .unwrap();

        assert_eq!(transport.resolve("/led?v=204"), "http://10.0.0.2:8080/led?v=204");
        assert_eq!(transport.resolve("led?v=204"), "http://10.0.0.2:8080/led?v=204");
        assert_eq!(
            transport.resolve("http://lamp.local/set?b=1"),
            "http://lamp.local/set?b=1"
        );
    }
}
