// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The persisted light-binding record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::UrlTemplate;

/// One of the per-event percentage fields of a [`LightRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    /// Applied once when the host starts.
    OctoprintStart,
    /// Applied when the printer connects.
    Connect,
    /// Applied when the printer disconnects.
    Disconnect,
    /// Applied when a print starts.
    PrintStart,
    /// Applied when a print is paused.
    PrintPaused,
    /// Applied when a print resumes.
    PrintResumed,
    /// Applied when a print finishes, is cancelled, or fails.
    PrintEnd,
}

impl EventField {
    /// All event fields in settings order.
    pub const ALL: [Self; 7] = [
        Self::OctoprintStart,
        Self::Connect,
        Self::Disconnect,
        Self::PrintStart,
        Self::PrintPaused,
        Self::PrintResumed,
        Self::PrintEnd,
    ];

    /// Returns the settings key of this field.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::OctoprintStart => "onOctoprintStartValue",
            Self::Connect => "onConnectValue",
            Self::Disconnect => "onDisconnectValue",
            Self::PrintStart => "onPrintStartValue",
            Self::PrintPaused => "onPrintPausedValue",
            Self::PrintResumed => "onPrintResumedValue",
            Self::PrintEnd => "onPrintEndValue",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Percentage strings configured per host event.
///
/// An empty string means "no action on this event".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventValues {
    /// Value applied at host startup.
    #[serde(rename = "onOctoprintStartValue")]
    pub on_octoprint_start: String,
    /// Value applied on printer connect.
    #[serde(rename = "onConnectValue")]
    pub on_connect: String,
    /// Value applied on printer disconnect.
    #[serde(rename = "onDisconnectValue")]
    pub on_disconnect: String,
    /// Value applied when a print starts.
    #[serde(rename = "onPrintStartValue")]
    pub on_print_start: String,
    /// Value applied when a print is paused.
    #[serde(rename = "onPrintPausedValue")]
    pub on_print_paused: String,
    /// Value applied when a print resumes.
    #[serde(rename = "onPrintResumedValue")]
    pub on_print_resumed: String,
    /// Value applied when a print ends.
    #[serde(rename = "onPrintEndValue")]
    pub on_print_end: String,
}

impl EventValues {
    /// Returns the configured value for a field.
    #[must_use]
    pub fn get(&self, field: EventField) -> &str {
        match field {
            EventField::OctoprintStart => &self.on_octoprint_start,
            EventField::Connect => &self.on_connect,
            EventField::Disconnect => &self.on_disconnect,
            EventField::PrintStart => &self.on_print_start,
            EventField::PrintPaused => &self.on_print_paused,
            EventField::PrintResumed => &self.on_print_resumed,
            EventField::PrintEnd => &self.on_print_end,
        }
    }

    /// Returns a mutable reference to the value of a field.
    pub fn get_mut(&mut self, field: EventField) -> &mut String {
        match field {
            EventField::OctoprintStart => &mut self.on_octoprint_start,
            EventField::Connect => &mut self.on_connect,
            EventField::Disconnect => &mut self.on_disconnect,
            EventField::PrintStart => &mut self.on_print_start,
            EventField::PrintPaused => &mut self.on_print_paused,
            EventField::PrintResumed => &mut self.on_print_resumed,
            EventField::PrintEnd => &mut self.on_print_end,
        }
    }

    /// Sets the value of a field.
    #[must_use]
    pub fn with(mut self, field: EventField, value: impl Into<String>) -> Self {
        *self.get_mut(field) = value.into();
        self
    }
}

/// A persisted light binding, in the canonical settings schema.
///
/// # Examples
///
/// ```
/// use light_controls_http::config::{EventField, LightRecord};
///
/// let record = LightRecord::new("Desk", "/led?v={value}")
///     .with_event_value(EventField::PrintStart, "80");
/// assert_eq!(record.event_values.get(EventField::PrintStart), "80");
/// assert_eq!(record.event_values.get(EventField::PrintEnd), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightRecord {
    /// Human-readable label.
    pub name: String,
    /// The light's URL template and unique identifier.
    pub light_control_url: String,
    /// Per-event percentages.
    #[serde(flatten)]
    pub event_values: EventValues,
}

impl LightRecord {
    /// Settings key holding the identifier.
    pub const IDENTIFIER_KEY: &'static str = "light_control_url";

    /// Settings key holding the name.
    pub const NAME_KEY: &'static str = "name";

    /// The canonical field set, in settings order.
    pub const FIELDS: [&'static str; 9] = [
        Self::NAME_KEY,
        Self::IDENTIFIER_KEY,
        EventField::OctoprintStart.key(),
        EventField::Connect.key(),
        EventField::Disconnect.key(),
        EventField::PrintStart.key(),
        EventField::PrintPaused.key(),
        EventField::PrintResumed.key(),
        EventField::PrintEnd.key(),
    ];

    /// Creates a record with no event actions.
    #[must_use]
    pub fn new(name: impl Into<String>, light_control_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            light_control_url: light_control_url.into(),
            event_values: EventValues::default(),
        }
    }

    /// Sets the value for one event field.
    #[must_use]
    pub fn with_event_value(mut self, field: EventField, value: impl Into<String>) -> Self {
        self.event_values = self.event_values.with(field, value);
        self
    }

    /// Returns the identifier as a URL template.
    #[must_use]
    pub fn url_template(&self) -> UrlTemplate {
        UrlTemplate::new(self.light_control_url.clone())
    }

    /// Returns a mutable reference to a field by its settings key.
    pub(crate) fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            Self::NAME_KEY => Some(&mut self.name),
            Self::IDENTIFIER_KEY => Some(&mut self.light_control_url),
            _ => EventField::ALL
                .into_iter()
                .find(|field| field.key() == key)
                .map(|field| self.event_values.get_mut(field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_canonical_keys() {
        let record = LightRecord::new("Desk", "/led?v={value}")
            .with_event_value(EventField::PrintStart, "80");
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, LightRecord::FIELDS);
        assert_eq!(object["onPrintStartValue"], "80");
    }

    #[test]
    fn deserializes_canonical_record() {
        let json = serde_json::json!({
            "name": "Enclosure",
            "light_control_url": "/enc/{value}",
            "onOctoprintStartValue": "",
            "onConnectValue": "10",
            "onDisconnectValue": "0",
            "onPrintStartValue": "100",
            "onPrintPausedValue": "50",
            "onPrintResumedValue": "100",
            "onPrintEndValue": "20"
        });
        let record: LightRecord = serde_json::from_value(json).unwrap();

        assert_eq!(record.name, "Enclosure");
        assert_eq!(record.event_values.get(EventField::Connect), "10");
        assert_eq!(record.event_values.get(EventField::PrintEnd), "20");
    }

    #[test]
    fn field_mut_covers_canonical_set() {
        let mut record = LightRecord::default();
        for key in LightRecord::FIELDS {
            assert!(record.field_mut(key).is_some(), "{key}");
        }
        assert!(record.field_mut("brightness").is_none());
    }
}
