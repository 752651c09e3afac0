// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sets light values: request, change detection, notification, state.

use indexmap::IndexMap;
use tokio::sync::{Mutex, MutexGuard, broadcast};

use crate::error::{LookupError, ProtocolError};
use crate::event::{EventBus, ValueChanged};
use crate::protocol::{Transport, TransportResponse};
use crate::registry::LightRegistry;
use crate::types::{Percentage, UrlTemplate};

/// Result of dispatching a value to a registered light.
#[derive(Debug)]
pub struct Dispatched {
    /// The light that was addressed.
    pub identifier: UrlTemplate,
    /// Value before the dispatch.
    pub previous: Percentage,
    /// Value after the dispatch.
    pub value: Percentage,
    /// Outcome of the HTTP request. Local state is updated either way.
    pub transport: Result<TransportResponse, ProtocolError>,
}

impl Dispatched {
    /// Returns `true` if the value differs from the previous one.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.value
    }
}

/// Owns the light registry and applies values to lights.
///
/// All registry access goes through one async mutex, which is held for the
/// whole of a dispatch including the HTTP request. Concurrent callers
/// (host events, API calls, in-stream commands) are therefore serialized.
///
/// # Examples
///
/// ```no_run
/// use light_controls_http::config::LightRecord;
/// use light_controls_http::dispatch::Dispatcher;
/// use light_controls_http::event::EventBus;
/// use light_controls_http::protocol::HttpConfig;
/// use light_controls_http::types::Percentage;
///
/// # async fn example() -> light_controls_http::Result<()> {
/// let transport = HttpConfig::default().into_transport()?;
/// let dispatcher = Dispatcher::new(transport, EventBus::new());
///
/// let record = LightRecord::new("Desk", "/led?v={value}");
/// dispatcher.lock().await.register(record.url_template(), &record);
///
/// // Issues GET http://127.0.0.1/led?v=204
/// dispatcher.set_value("/led?v={value}", Percentage::new(80)?).await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Dispatcher<T> {
    registry: Mutex<LightRegistry>,
    transport: T,
    events: EventBus,
}

impl<T: Transport> Dispatcher<T> {
    /// Creates a dispatcher with an empty registry.
    #[must_use]
    pub fn new(transport: T, events: EventBus) -> Self {
        Self {
            registry: Mutex::new(LightRegistry::new()),
            transport,
            events,
        }
    }

    /// Locks the registry for registration or inspection.
    pub async fn lock(&self) -> MutexGuard<'_, LightRegistry> {
        self.registry.lock().await
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the notification bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribes to value notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ValueChanged> {
        self.events.subscribe()
    }

    /// Sets a light to a percentage.
    ///
    /// Unknown identifiers are a logged no-op and return `None`. Otherwise
    /// the request is issued, a notification is published if the value
    /// changed, and the value is stored even if the request failed.
    pub async fn set_value(&self, identifier: &str, value: Percentage) -> Option<Dispatched> {
        let mut registry = self.registry.lock().await;
        self.dispatch(&mut registry, identifier, value).await
    }

    /// Resolves a light by name, then sets it like [`set_value`](Self::set_value).
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UnknownName` if no light has this name.
    pub async fn set_value_by_name(
        &self,
        name: &str,
        value: Percentage,
    ) -> Result<Dispatched, LookupError> {
        let mut registry = self.registry.lock().await;
        let identifier = registry.by_name(name)?.clone();
        self.dispatch(&mut registry, identifier.as_str(), value)
            .await
            .ok_or_else(|| LookupError::UnknownIdentifier(identifier.to_string()))
    }

    /// Returns the current value of a light, or 0% if it is unknown.
    pub async fn get_value(&self, identifier: &str) -> Percentage {
        self.registry.lock().await.get(identifier)
    }

    /// Returns the current value of a light by name.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UnknownName` if no light has this name.
    pub async fn get_value_by_name(&self, name: &str) -> Result<Percentage, LookupError> {
        let registry = self.registry.lock().await;
        let identifier = registry.by_name(name)?;
        Ok(registry.get(identifier.as_str()))
    }

    /// Publishes the current value of every light without touching devices.
    ///
    /// Returns the number of notifications published.
    pub async fn send_all_values(&self) -> usize {
        let registry = self.registry.lock().await;
        tracing::debug!(count = registry.len(), "Sending all light values");
        for (identifier, binding) in registry.all() {
            self.events
                .publish(ValueChanged::new(identifier.clone(), binding.current()));
        }
        registry.len()
    }

    /// Returns every light's current value, in registration order.
    pub async fn light_values(&self) -> IndexMap<UrlTemplate, Percentage> {
        self.registry
            .lock()
            .await
            .all()
            .map(|(identifier, binding)| (identifier.clone(), binding.current()))
            .collect()
    }

    async fn dispatch(
        &self,
        registry: &mut LightRegistry,
        identifier: &str,
        value: Percentage,
    ) -> Option<Dispatched> {
        let Some(binding) = registry.binding(identifier) else {
            tracing::warn!(
                identifier = %identifier,
                error = %LookupError::UnknownIdentifier(identifier.to_string()),
                "Ignoring value for unregistered light"
            );
            return None;
        };
        let identifier = binding.identifier().clone();
        let previous = binding.current();

        let target = identifier.render(value);
        tracing::debug!(identifier = %identifier, value = value.value(), target = %target, "Setting light value");

        let transport = self.transport.get(&target).await;
        if let Err(e) = &transport {
            tracing::warn!(identifier = %identifier, error = %e, "Light request failed");
        }

        // Compared against the stored value before it is overwritten.
        if value != previous {
            self.events
                .publish(ValueChanged::new(identifier.clone(), value));
        }
        registry.set_current(identifier.as_str(), value);

        Some(Dispatched {
            identifier,
            previous,
            value,
            transport,
        })
    }
}
