// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control API request types.

use serde::Deserialize;
use serde_json::Value;

use crate::error::UsageError;
use crate::types::Percentage;

/// Who is calling the control API.
///
/// The API is admin-only; the host authenticates the caller and tells us
/// its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    admin: bool,
}

impl Caller {
    /// A caller with administrator rights.
    #[must_use]
    pub const fn admin() -> Self {
        Self { admin: true }
    }

    /// A caller without administrator rights.
    #[must_use]
    pub const fn user() -> Self {
        Self { admin: false }
    }

    /// Returns `true` if the caller may use the control API.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin
    }
}

/// A control API command, decoded from a JSON body.
///
/// # Examples
///
/// ```
/// use light_controls_http::controller::ApiCommand;
///
/// let cmd = ApiCommand::from_json(
///     r#"{"command": "setLightValue", "light_control_url": "/led?v={value}", "percentage": 40}"#,
/// )
/// .unwrap();
/// assert!(matches!(cmd, ApiCommand::SetLightValue { .. }));
///
/// let cmd = ApiCommand::from_json(r#"{"command": "getLightValues"}"#).unwrap();
/// assert_eq!(cmd, ApiCommand::GetLightValues);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command")]
pub enum ApiCommand {
    /// Set one light to a percentage.
    #[serde(rename = "setLightValue")]
    SetLightValue {
        /// The light identifier.
        light_control_url: String,
        /// The percentage, as a JSON number or numeric string.
        percentage: Value,
    },
    /// Broadcast every light's current value to observers.
    #[serde(rename = "getLightValues")]
    GetLightValues,
}

impl ApiCommand {
    /// Decodes a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::MalformedRequest` for unknown commands or
    /// missing parameters.
    pub fn from_json(body: &str) -> Result<Self, UsageError> {
        serde_json::from_str(body).map_err(|e| UsageError::MalformedRequest(e.to_string()))
    }
}

/// Interprets an API percentage, clamping it into range.
///
/// # Errors
///
/// Returns `UsageError::InvalidValue` if the value is not an integer or an
/// integer string.
pub fn parse_percentage(value: &Value) -> Result<Percentage, UsageError> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .map(|v| {
                let clamped = Percentage::clamped(v);
                (clamped, i64::from(clamped.value()) != v)
            }),
        Value::String(s) => Percentage::parse_clamped(s).ok(),
        _ => None,
    };
    let Some((clamped, was_clamped)) = parsed else {
        return Err(UsageError::InvalidValue(value.to_string()));
    };

    if was_clamped {
        tracing::warn!(requested = %value, value = clamped.value(), "API percentage out of range, clamped");
    }
    Ok(clamped)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_set_light_value() {
        let cmd = ApiCommand::from_json(
            r#"{"command":"setLightValue","light_control_url":"/a/{value}","percentage":"25"}"#,
        )
        .unwrap();

        assert_eq!(
            cmd,
            ApiCommand::SetLightValue {
                light_control_url: "/a/{value}".to_string(),
                percentage: json!("25"),
            }
        );
    }

    #[test]
    fn decode_rejects_unknown_command() {
        assert!(matches!(
            ApiCommand::from_json(r#"{"command":"reboot"}"#),
            Err(UsageError::MalformedRequest(_))
        ));
    }

    #[test]
    fn decode_rejects_missing_parameter() {
        assert!(ApiCommand::from_json(r#"{"command":"setLightValue","percentage":5}"#).is_err());
    }

    #[test]
    fn percentage_accepts_numbers_and_strings() {
        assert_eq!(parse_percentage(&json!(40)).unwrap().value(), 40);
        assert_eq!(parse_percentage(&json!(" 60 ")).unwrap().value(), 60);
        assert_eq!(parse_percentage(&json!(180)).unwrap().value(), 100);
        assert_eq!(parse_percentage(&json!(-5)).unwrap().value(), 0);
        assert_eq!(parse_percentage(&json!(u64::MAX)).unwrap().value(), 100);
        assert_eq!(
            parse_percentage(&json!("99999999999999999999")).unwrap().value(),
            100
        );
    }

    #[test]
    fn percentage_rejects_other_values() {
        assert!(parse_percentage(&json!("half")).is_err());
        assert!(parse_percentage(&json!(12.5)).is_err());
        assert!(parse_percentage(&Value::Null).is_err());
    }

    #[test]
    fn caller_roles() {
        assert!(Caller::admin().is_admin());
        assert!(!Caller::user().is_admin());
    }
}
