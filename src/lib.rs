// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light Controls HTTP - drive HTTP-controlled lights from printer host events.
//!
//! Each configured light is identified by a URL template containing a
//! `{value}` placeholder. When the host reports a lifecycle event (startup,
//! connection, print start, pause, end...) the light's configured
//! percentage for that event is converted to a raw `0..=255` value,
//! substituted into the template and requested with an HTTP GET.
//!
//! # Supported Features
//!
//! - **Event bindings**: per-light values for startup, connect, disconnect,
//!   print start, pause, resume and end
//! - **In-stream commands**: `@LIGHTCONTROL <name> <percentage>`
//! - **Control API**: admin-only `setLightValue` / `getLightValues`
//! - **Notifications**: `{light_control_url, value}` broadcast on every change
//! - **Settings**: normalization of persisted records, JSON file or in-memory
//!   stores
//!
//! # Quick Start
//!
//! ```no_run
//! use light_controls_http::{ControllerConfig, HostEvent, HttpConfig, LightControls};
//! use light_controls_http::config::{EventField, LightRecord, MemorySettingsStore};
//!
//! #[tokio::main]
//! async fn main() -> light_controls_http::Result<()> {
//!     let store = MemorySettingsStore::from_records(&[
//!         LightRecord::new("Enclosure", "/led?brightness={value}")
//!             .with_event_value(EventField::PrintStart, "80")
//!             .with_event_value(EventField::PrintEnd, "10"),
//!     ])?;
//!
//!     let config = ControllerConfig::new().with_http(HttpConfig::new("192.168.1.40"));
//!     let controls = LightControls::new(config, store)?;
//!     controls.initialize().await?;
//!
//!     // GET http://192.168.1.40/led?brightness=204
//!     controls.on_event(HostEvent::PrintStarted).await;
//!
//!     // GET http://192.168.1.40/led?brightness=26
//!     controls.on_event(HostEvent::PrintDone).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Observing Value Changes
//!
//! ```no_run
//! use light_controls_http::{ControllerConfig, LightControls};
//! use light_controls_http::config::JsonFileSettingsStore;
//!
//! #[tokio::main]
//! async fn main() -> light_controls_http::Result<()> {
//!     let controls = LightControls::new(
//!         ControllerConfig::default(),
//!         JsonFileSettingsStore::new("lights.json"),
//!     )?;
//!     controls.initialize().await?;
//!
//!     let mut changes = controls.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(change) = changes.recv().await {
//!             println!("{} is now {}", change.light_control_url, change.value);
//!         }
//!     });
//!
//!     controls.handle_command_line("@LIGHTCONTROL Enclosure 50").await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod protocol;
pub mod registry;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{LightRecord, SettingsStore};
pub use controller::{ApiCommand, Caller, ControllerConfig, LightControls};
pub use dispatch::{CommandStatus, Dispatcher};
pub use error::{
    ConfigError, Error, LookupError, ProtocolError, Result, UsageError, ValueError,
};
pub use event::{EventBus, HostEvent, ValueChanged};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpTransport};
pub use protocol::{Transport, TransportResponse};
pub use types::{Percentage, UrlTemplate};
