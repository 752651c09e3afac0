// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::ProtocolError;
use crate::protocol::{Transport, TransportResponse};

/// Transport that records every requested target instead of sending it.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    requests: Mutex<Vec<String>>,
    fail: bool,
    yielding: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingTransport {
    /// A transport whose requests all succeed with status 200.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A transport whose requests all fail, as an unreachable light would.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// A transport that yields to the scheduler in the middle of each request.
    pub(crate) fn yielding() -> Self {
        Self {
            yielding: true,
            ..Self::default()
        }
    }

    /// Returns the targets requested so far, oldest first.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Returns the highest number of requests that were in progress at once.
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Transport for RecordingTransport {
    async fn get(&self, target: &str) -> Result<TransportResponse, ProtocolError> {
        let active = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(active, Ordering::SeqCst);
        if self.yielding {
            tokio::task::yield_now().await;
        }
        self.requests.lock().push(target.to_string());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail {
            Err(ProtocolError::Status {
                status: 503,
                reason: "Service Unavailable".to_string(),
            })
        } else {
            Ok(TransportResponse::new(200))
        }
    }
}
