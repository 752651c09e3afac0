// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound transport toward the lights.
//!
//! The dispatcher only needs "GET this rendered URL"; [`Transport`] is the
//! seam that lets tests and embedding hosts substitute their own client.
//! [`HttpTransport`] is the reqwest-based implementation.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};

use crate::error::ProtocolError;

/// Outcome of a successful light request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    status: u16,
}

impl TransportResponse {
    /// Creates a response with the given status code.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }
}

/// Trait for clients that can issue a light request.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Requests a rendered light URL (a path or an absolute URL).
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the light is unreachable or answers with
    /// a non-success status.
    async fn get(&self, target: &str) -> Result<TransportResponse, ProtocolError>;
}
