// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification pushed to observers when a light value is published.

use serde::{Deserialize, Serialize};

use crate::types::{Percentage, UrlTemplate};

/// A light's value, as pushed to connected observers.
///
/// Serializes as `{"light_control_url": ..., "value": ...}`, the shape
/// UI clients expect.
///
/// # Examples
///
/// ```
/// use light_controls_http::event::ValueChanged;
/// use light_controls_http::types::{Percentage, UrlTemplate};
///
/// let event = ValueChanged::new(UrlTemplate::new("/led?v={value}"), Percentage::new(80).unwrap());
/// let json = serde_json::to_value(&event).unwrap();
/// assert_eq!(json["light_control_url"], "/led?v={value}");
/// assert_eq!(json["value"], 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueChanged {
    /// The light identifier.
    pub light_control_url: UrlTemplate,
    /// The light's percentage.
    pub value: Percentage,
}

impl ValueChanged {
    /// Creates a notification.
    #[must_use]
    pub fn new(light_control_url: UrlTemplate, value: Percentage) -> Self {
        Self {
            light_control_url,
            value,
        }
    }
}
