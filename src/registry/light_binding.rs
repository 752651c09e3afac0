// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Live state of one configured light.

use crate::config::{EventField, LightRecord};
use crate::types::{Percentage, UrlTemplate};

/// A registered light: its configuration plus the last dispatched value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightBinding {
    identifier: UrlTemplate,
    config: LightRecord,
    current: Percentage,
}

impl LightBinding {
    /// Creates a binding with a current value of 0%.
    ///
    /// The configuration is an owned copy; later edits to the settings do
    /// not reach the live binding.
    #[must_use]
    pub fn new(identifier: UrlTemplate, config: LightRecord) -> Self {
        Self {
            identifier,
            config,
            current: Percentage::MIN,
        }
    }

    /// Returns the identifier (URL template).
    #[must_use]
    pub fn identifier(&self) -> &UrlTemplate {
        &self.identifier
    }

    /// Returns the light's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the configuration the binding was created from.
    #[must_use]
    pub fn config(&self) -> &LightRecord {
        &self.config
    }

    /// Returns the configured percentage string for an event field.
    #[must_use]
    pub fn event_value(&self, field: EventField) -> &str {
        self.config.event_values.get(field)
    }

    /// Returns the last dispatched percentage.
    #[must_use]
    pub fn current(&self) -> Percentage {
        self.current
    }

    /// Stores a new current value, returning the previous one.
    pub(crate) fn set_current(&mut self, value: Percentage) -> Percentage {
        std::mem::replace(&mut self.current, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_binding_starts_at_zero() {
        let record = LightRecord::new("Desk", "/led?v={value}");
        let binding = LightBinding::new(record.url_template(), record);

        assert_eq!(binding.current(), Percentage::MIN);
        assert_eq!(binding.name(), "Desk");
    }

    #[test]
    fn set_current_returns_previous() {
        let record = LightRecord::new("Desk", "/led?v={value}");
        let mut binding = LightBinding::new(record.url_template(), record);

        let previous = binding.set_current(Percentage::new(40).unwrap());
        assert_eq!(previous, Percentage::MIN);
        assert_eq!(binding.current().value(), 40);
    }

    #[test]
    fn event_value_reads_config() {
        let record = LightRecord::new("Desk", "/led?v={value}")
            .with_event_value(EventField::PrintPaused, "30");
        let binding = LightBinding::new(record.url_template(), record);

        assert_eq!(binding.event_value(EventField::PrintPaused), "30");
        assert_eq!(binding.event_value(EventField::PrintResumed), "");
    }
}
