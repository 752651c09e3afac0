// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the light controls library.
//!
//! Every failure this crate can observe falls into one of a few families:
//! malformed persisted configuration, lookups of unknown lights, transport
//! failures toward a device, and malformed commands. None of them is fatal
//! to the host; the dispatch layer logs and continues.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to a light.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while reading or writing persisted settings.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A light could not be resolved.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// A command or API payload was malformed.
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    /// The caller is not allowed to use the control API.
    #[error("caller is not authorized to control lights")]
    Unauthorized,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A percentage string could not be parsed as an integer.
    #[error("not a number: {0:?}")]
    NotNumeric(String),

    /// An event name is not one the host emits.
    #[error("unknown host event: {0}")]
    UnknownEvent(String),
}

/// Errors related to outbound HTTP requests.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The light answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to persisted light settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read or written.
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The settings document is not valid JSON of the expected shape.
    #[error("settings JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    /// A record is not a JSON object.
    #[error("light record at index {0} is not an object")]
    NotAnObject(usize),
}

/// A light could not be found.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No binding is registered under this identifier.
    #[error("no light registered for {0:?}")]
    UnknownIdentifier(String),

    /// No binding carries this name.
    #[error("no light named {0:?}")]
    UnknownName(String),
}

/// Errors in the syntax of an in-stream command or API call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// The command is missing the light name or value.
    #[error("command incomplete, expected `LIGHTCONTROL <name> <value>`")]
    MissingArguments,

    /// The value token is not an integer.
    #[error("value {0:?} is not a number")]
    InvalidValue(String),

    /// The API body could not be decoded.
    #[error("malformed API request: {0}")]
    MalformedRequest(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
