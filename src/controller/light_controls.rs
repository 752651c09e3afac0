// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The host-facing light controller.

use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use tokio::sync::broadcast;

use crate::config::{LightRecord, Normalized, SettingsStore, normalize_records};
use crate::dispatch::{CommandStatus, Dispatcher, EventRouter, execute, execute_line};
use crate::error::{ConfigError, Error, Result};
use crate::event::{EventBus, HostEvent, ValueChanged};
use crate::protocol::Transport;
use crate::types::{Percentage, UrlTemplate};

#[cfg(feature = "http")]
use super::ControllerConfig;
#[cfg(feature = "http")]
use crate::protocol::HttpTransport;

use super::api::{ApiCommand, Caller, parse_percentage};

/// Binds configured HTTP lights to host lifecycle events.
///
/// The host forwards its lifecycle events to [`on_event`](Self::on_event),
/// in-stream commands to [`handle_command`](Self::handle_command) and
/// control API calls to [`handle_api`](Self::handle_api). Value changes are
/// published to every [`subscribe`](Self::subscribe)r.
///
/// # Examples
///
/// ```no_run
/// use light_controls_http::config::JsonFileSettingsStore;
/// use light_controls_http::controller::{ControllerConfig, LightControls};
/// use light_controls_http::event::HostEvent;
/// use light_controls_http::protocol::HttpConfig;
///
/// # async fn example() -> light_controls_http::Result<()> {
/// let config = ControllerConfig::new().with_http(HttpConfig::new("192.168.1.20"));
/// let store = JsonFileSettingsStore::new("/var/lib/printer/lights.json");
/// let controls = LightControls::new(config, store)?;
///
/// controls.initialize().await?;
/// let mut values = controls.subscribe();
///
/// controls.on_event(HostEvent::Startup).await;
/// controls.on_event(HostEvent::PrintStarted).await;
///
/// while let Ok(change) = values.try_recv() {
///     println!("{} -> {}", change.light_control_url, change.value);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LightControls<T, S> {
    dispatcher: Dispatcher<T>,
    store: S,
    started: AtomicBool,
}

#[cfg(feature = "http")]
impl<S: SettingsStore> LightControls<HttpTransport, S> {
    /// Creates a controller that requests relative light URLs from the
    /// configured HTTP host.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ControllerConfig, store: S) -> Result<Self> {
        let transport = config.http.into_transport()?;
        Ok(Self::with_transport(
            transport,
            store,
            EventBus::with_capacity(config.event_capacity),
        ))
    }
}

impl<T: Transport, S: SettingsStore> LightControls<T, S> {
    /// Creates a controller over an explicit transport.
    #[must_use]
    pub fn with_transport(transport: T, store: S, events: EventBus) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport, events),
            store,
            started: AtomicBool::new(false),
        }
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Returns the settings store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Subscribes to value notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ValueChanged> {
        self.dispatcher.subscribe()
    }

    /// Loads the persisted lights and registers them.
    ///
    /// Records are normalized first; if any record had to be rewritten the
    /// normalized list is saved back. Any previously registered light is
    /// retired. Returns the number of registered lights.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the settings cannot be read.
    pub async fn initialize(&self) -> Result<usize> {
        let records = self.load_records()?;

        let mut registry = self.dispatcher.lock().await;
        let retired = registry.clear();
        for record in &records {
            registry.register(record.url_template(), record);
        }

        tracing::info!(retired, registered = registry.len(), "Light controls initialized");
        Ok(registry.len())
    }

    /// Retires every light. Returns how many were registered.
    pub async fn shutdown(&self) -> usize {
        let retired = self.dispatcher.lock().await.clear();
        tracing::info!(retired, "Light controls shut down");
        retired
    }

    /// Reacts to a host lifecycle event.
    ///
    /// `Startup` applies start values only the first time it is seen.
    /// `SettingsUpdated` reloads the configuration; `Shutdown` retires every
    /// light. Other events apply their configured values. Returns the number
    /// of lights a value was dispatched to.
    pub async fn on_event(&self, event: HostEvent) -> usize {
        tracing::debug!(event = %event, "Host event");

        match event {
            HostEvent::Startup => {
                if self.started.swap(true, Ordering::SeqCst) {
                    tracing::debug!("Startup already handled");
                    return 0;
                }
                EventRouter::new(&self.dispatcher).route(event).await
            }
            HostEvent::SettingsUpdated => {
                if let Err(e) = self.initialize().await {
                    tracing::warn!(error = %e, "Failed to reload light settings");
                }
                0
            }
            HostEvent::Shutdown => {
                self.shutdown().await;
                0
            }
            _ => EventRouter::new(&self.dispatcher).route(event).await,
        }
    }

    /// Reacts to a host event given by name, such as `"PrintStarted"`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the name is not a known event.
    pub async fn on_event_name(&self, name: &str) -> Result<usize> {
        let event: HostEvent = name.parse()?;
        Ok(self.on_event(event).await)
    }

    /// Handles an in-stream command given as keyword and parameters.
    pub async fn handle_command(&self, keyword: &str, parameters: &str) -> CommandStatus {
        execute(&self.dispatcher, keyword, parameters).await
    }

    /// Handles a full in-stream command line, such as `@LIGHTCONTROL Desk 80`.
    pub async fn handle_command_line(&self, line: &str) -> CommandStatus {
        execute_line(&self.dispatcher, line).await
    }

    /// Handles a control API command.
    ///
    /// `setLightValue` on an unknown light is a logged no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unauthorized` if the caller is not an administrator,
    /// or `Error::Usage` if the percentage is not an integer.
    pub async fn handle_api(&self, caller: Caller, command: ApiCommand) -> Result<()> {
        authorize(caller)?;

        match command {
            ApiCommand::SetLightValue {
                light_control_url,
                percentage,
            } => {
                let value = parse_percentage(&percentage)?;
                tracing::debug!(identifier = %light_control_url, value = value.value(), "API set light value");
                self.dispatcher.set_value(&light_control_url, value).await;
            }
            ApiCommand::GetLightValues => {
                self.dispatcher.send_all_values().await;
            }
        }
        Ok(())
    }

    /// Decodes a JSON request body and handles it like
    /// [`handle_api`](Self::handle_api).
    ///
    /// # Errors
    ///
    /// Returns `Error::Unauthorized` for non-administrators before the body
    /// is looked at, and `Error::Usage` for malformed bodies.
    pub async fn handle_api_json(&self, caller: Caller, body: &str) -> Result<()> {
        authorize(caller)?;
        let command = ApiCommand::from_json(body)?;
        self.handle_api(caller, command).await
    }

    /// Returns the names of the registered lights, in registration order.
    pub async fn light_names(&self) -> Vec<String> {
        self.dispatcher.lock().await.names()
    }

    /// Returns the current value of the first light with this name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Lookup` if no light has this name.
    pub async fn light_value_by_name(&self, name: &str) -> Result<Percentage> {
        Ok(self.dispatcher.get_value_by_name(name).await?)
    }

    /// Sets the first light with this name, clamping `value` to `[0, 100]`.
    ///
    /// Returns the value that was applied.
    ///
    /// # Errors
    ///
    /// Returns `Error::Lookup` if no light has this name.
    pub async fn set_light_value_by_name(&self, name: &str, value: i64) -> Result<Percentage> {
        let dispatched = self
            .dispatcher
            .set_value_by_name(name, Percentage::clamped(value))
            .await?;
        Ok(dispatched.value)
    }

    /// Returns the current value of a light, or 0% if it is unknown.
    pub async fn light_value(&self, identifier: &str) -> Percentage {
        self.dispatcher.get_value(identifier).await
    }

    /// Returns every light's current value, in registration order.
    pub async fn light_values(&self) -> IndexMap<UrlTemplate, Percentage> {
        self.dispatcher.light_values().await
    }

    /// Publishes every light's current value to subscribers.
    pub async fn send_all_values(&self) -> usize {
        self.dispatcher.send_all_values().await
    }

    fn load_records(&self) -> std::result::Result<Vec<LightRecord>, ConfigError> {
        let raw = self.store.load()?;
        let Normalized { records, modified } = normalize_records(&raw);

        if modified {
            tracing::info!(count = records.len(), "Saving normalized light settings");
            if let Err(e) = self.store.save(&records) {
                tracing::warn!(error = %e, "Failed to save normalized light settings");
            }
        }
        Ok(records)
    }
}

fn authorize(caller: Caller) -> Result<()> {
    if caller.is_admin() {
        Ok(())
    } else {
        tracing::warn!("Rejected light API call from non-admin caller");
        Err(Error::Unauthorized)
    }
}
