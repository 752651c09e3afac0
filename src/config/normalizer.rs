// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation of persisted records against the canonical schema.
//!
//! Settings written by older versions, or edited by hand, may miss fields,
//! carry extra ones, or hold numbers where strings are expected. The
//! normalizer turns each raw JSON record into a [`LightRecord`] and reports
//! whether anything had to be rewritten, so the caller can persist the
//! repaired list.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::ConfigError;

use super::LightRecord;

/// Result of normalizing a list of raw records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Records that survived, in their original order.
    pub records: Vec<LightRecord>,
    /// `true` if at least one surviving record was rewritten.
    pub modified: bool,
}

/// Normalizes a list of raw persisted records.
///
/// Records without a usable identifier are dropped. Every other record is
/// rebuilt from the default record, overlaid with the canonical fields it
/// carries. Dropping a record alone does not set `modified`.
///
/// # Examples
///
/// ```
/// use light_controls_http::config::normalize_records;
///
/// let raw = vec![
///     serde_json::json!({ "name": "Desk", "light_control_url": "/led?v={value}" }),
///     serde_json::json!({ "name": "Unset", "light_control_url": null }),
/// ];
/// let normalized = normalize_records(&raw);
///
/// assert_eq!(normalized.records.len(), 1);
/// assert!(normalized.modified);
/// assert_eq!(normalized.records[0].event_values.on_print_start, "");
/// ```
#[must_use]
pub fn normalize_records(raw: &[Value]) -> Normalized {
    let mut normalized = Normalized::default();

    for (index, value) in raw.iter().enumerate() {
        let Some(object) = value.as_object() else {
            tracing::warn!(
                index,
                error = %ConfigError::NotAnObject(index),
                "Dropping light record"
            );
            continue;
        };

        if !has_identifier(object) {
            tracing::debug!(index, "Dropping light record without light_control_url");
            continue;
        }

        let (record, modified) = normalize_record(object);
        if modified {
            tracing::info!(
                index,
                from = %value,
                to = ?record,
                "Updated light record to the canonical field set"
            );
            normalized.modified = true;
        }
        normalized.records.push(record);
    }

    normalized
}

/// Rebuilds one record object, returning it with a "was modified" flag.
///
/// The flag is set when the key set differs from the canonical set or when
/// a value had to be converted to a string.
#[must_use]
pub fn normalize_record(object: &Map<String, Value>) -> (LightRecord, bool) {
    let canonical: BTreeSet<&str> = LightRecord::FIELDS.into_iter().collect();
    let present: BTreeSet<&str> = object.keys().map(String::as_str).collect();
    let mut modified = canonical != present;

    let mut record = LightRecord::default();
    for (key, value) in object {
        let Some(slot) = record.field_mut(key) else {
            tracing::debug!(key = %key, "Dropping unknown light record field");
            continue;
        };
        let (text, converted) = value_to_string(key, value);
        *slot = text;
        modified |= converted;
    }

    (record, modified)
}

/// Returns `true` if the identifier is a non-empty string.
fn has_identifier(object: &Map<String, Value>) -> bool {
    object
        .get(LightRecord::IDENTIFIER_KEY)
        .and_then(Value::as_str)
        .is_some_and(|url| !url.is_empty())
}

fn value_to_string(key: &str, value: &Value) -> (String, bool) {
    match value {
        Value::String(s) => (s.clone(), false),
        Value::Null => (String::new(), true),
        Value::Number(n) => (n.to_string(), true),
        Value::Bool(b) => (b.to_string(), true),
        Value::Array(_) | Value::Object(_) => {
            tracing::warn!(key = %key, value = %value, "Discarding non-scalar light record value");
            (String::new(), true)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::EventField;

    fn canonical() -> Value {
        json!({
            "name": "Desk",
            "light_control_url": "/led?v={value}",
            "onOctoprintStartValue": "",
            "onConnectValue": "",
            "onDisconnectValue": "",
            "onPrintStartValue": "80",
            "onPrintPausedValue": "",
            "onPrintResumedValue": "",
            "onPrintEndValue": "0"
        })
    }

    #[test]
    fn canonical_record_is_untouched() {
        let normalized = normalize_records(&[canonical()]);

        assert!(!normalized.modified);
        assert_eq!(normalized.records.len(), 1);
        let record = &normalized.records[0];
        assert_eq!(record.name, "Desk");
        assert_eq!(record.event_values.get(EventField::PrintStart), "80");
        assert_eq!(record.event_values.get(EventField::PrintEnd), "0");
    }

    #[test]
    fn missing_field_is_defaulted() {
        let mut raw = canonical();
        raw.as_object_mut().unwrap().remove("onPrintPausedValue");

        let normalized = normalize_records(&[raw]);

        assert!(normalized.modified);
        let rewritten = serde_json::to_value(&normalized.records[0]).unwrap();
        let keys: BTreeSet<&str> = rewritten
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let expected: BTreeSet<&str> = LightRecord::FIELDS.into_iter().collect();
        assert_eq!(keys, expected);
        assert_eq!(rewritten["onPrintPausedValue"], "");
        assert_eq!(rewritten["onPrintStartValue"], "80");
    }

    #[test]
    fn extra_field_is_dropped_and_flagged() {
        let mut raw = canonical();
        raw.as_object_mut()
            .unwrap()
            .insert("legacy_gpio".to_string(), json!(17));

        let normalized = normalize_records(&[raw]);

        assert!(normalized.modified);
        let rewritten = serde_json::to_value(&normalized.records[0]).unwrap();
        assert!(rewritten.get("legacy_gpio").is_none());
    }

    #[test]
    fn records_without_identifier_are_dropped() {
        let raw = vec![
            json!({ "name": "none" }),
            json!({ "name": "null", "light_control_url": null }),
            json!({ "name": "empty", "light_control_url": "" }),
            json!({ "name": "number", "light_control_url": 5 }),
            json!("not an object"),
            canonical(),
        ];

        let normalized = normalize_records(&raw);

        assert_eq!(normalized.records.len(), 1);
        assert_eq!(normalized.records[0].name, "Desk");
        assert!(!normalized.modified);
    }

    #[test]
    fn non_string_values_are_stringified() {
        let mut raw = canonical();
        raw["onConnectValue"] = json!(25);
        raw["onDisconnectValue"] = Value::Null;

        let (record, modified) = normalize_record(raw.as_object().unwrap());

        assert!(modified);
        assert_eq!(record.event_values.get(EventField::Connect), "25");
        assert_eq!(record.event_values.get(EventField::Disconnect), "");
    }

    #[test]
    fn order_is_preserved() {
        let mut second = canonical();
        second["name"] = json!("Second");
        second["light_control_url"] = json!("/second/{value}");

        let normalized = normalize_records(&[canonical(), second]);

        let names: Vec<&str> = normalized.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Desk", "Second"]);
    }
}
