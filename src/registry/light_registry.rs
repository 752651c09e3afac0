// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of configured lights, keyed by identifier.

use indexmap::IndexMap;

use crate::config::LightRecord;
use crate::error::LookupError;
use crate::types::{Percentage, UrlTemplate};

use super::LightBinding;

/// Owns every [`LightBinding`], in registration order.
///
/// The registry itself is not synchronized; the dispatcher wraps it in a
/// lock and is the only writer of current values.
///
/// # Examples
///
/// ```
/// use light_controls_http::config::LightRecord;
/// use light_controls_http::registry::LightRegistry;
///
/// let mut registry = LightRegistry::new();
/// let record = LightRecord::new("Desk", "/led?v={value}");
/// registry.register(record.url_template(), &record);
///
/// assert_eq!(registry.by_name("Desk").unwrap().as_str(), "/led?v={value}");
/// assert!(registry.by_name("Shelf").is_err());
/// assert_eq!(registry.get("/led?v={value}").value(), 0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct LightRegistry {
    bindings: IndexMap<UrlTemplate, LightBinding>,
}

impl LightRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a light, replacing any binding with the same identifier.
    ///
    /// The configuration is copied and the current value starts at 0%.
    pub fn register(&mut self, identifier: UrlTemplate, config: &LightRecord) {
        tracing::debug!(identifier = %identifier, name = %config.name, "Registering light");

        if self.bindings.contains_key(&identifier) {
            self.unregister(identifier.as_str());
        }

        match identifier.placeholder_count() {
            1 => {}
            0 => tracing::warn!(
                identifier = %identifier,
                "Light URL has no {{value}} placeholder, requests will not carry the brightness"
            ),
            n => tracing::debug!(
                identifier = %identifier,
                placeholders = n,
                "Light URL has several {{value}} placeholders, all are substituted"
            ),
        }

        let binding = LightBinding::new(identifier.clone(), config.clone());
        self.bindings.insert(identifier, binding);
    }

    /// Removes the binding for an identifier.
    ///
    /// HTTP lights hold no device resources, so this only drops bookkeeping.
    pub fn unregister(&mut self, identifier: &str) -> Option<LightBinding> {
        tracing::debug!(identifier = %identifier, "Unregistering light");
        self.bindings.shift_remove(identifier)
    }

    /// Removes every binding, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.bindings.len();
        for identifier in self.bindings.keys() {
            tracing::debug!(identifier = %identifier, "Unregistering light");
        }
        self.bindings.clear();
        count
    }

    /// Returns the current value of a light, or 0% if it is unknown.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Percentage {
        self.bindings
            .get(identifier)
            .map_or(Percentage::MIN, LightBinding::current)
    }

    /// Returns the binding for an identifier.
    #[must_use]
    pub fn binding(&self, identifier: &str) -> Option<&LightBinding> {
        self.bindings.get(identifier)
    }

    /// Returns `true` if the identifier is registered.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.bindings.contains_key(identifier)
    }

    /// Resolves a light name to the identifier of the first matching binding.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UnknownName` if no binding has this name.
    pub fn by_name(&self, name: &str) -> Result<&UrlTemplate, LookupError> {
        let found = self
            .bindings
            .values()
            .find(|binding| binding.name() == name)
            .map(LightBinding::identifier);
        tracing::debug!(name = %name, identifier = ?found.map(UrlTemplate::as_str), "Resolved light name");
        found.ok_or_else(|| LookupError::UnknownName(name.to_string()))
    }

    /// Iterates over all bindings in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&UrlTemplate, &LightBinding)> {
        self.bindings.iter()
    }

    /// Returns the names of all lights in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.bindings
            .values()
            .map(|binding| binding.name().to_string())
            .collect()
    }

    /// Returns the number of registered lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no light is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Stores a new current value, returning the previous one.
    ///
    /// Returns `None` if the identifier is not registered.
    pub(crate) fn set_current(&mut self, identifier: &str, value: Percentage) -> Option<Percentage> {
        self.bindings
            .get_mut(identifier)
            .map(|binding| binding.set_current(value))
    }
}
