// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events flowing into and out of the light controller.
//!
//! [`HostEvent`]s come in from the printer host and drive the configured
//! per-event values. [`ValueChanged`] notifications go out over the
//! [`EventBus`] to any connected observer (typically a UI).
//!
//! # Examples
//!
//! ```
//! use light_controls_http::event::{EventBus, ValueChanged};
//! use light_controls_http::types::{Percentage, UrlTemplate};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ValueChanged::new(UrlTemplate::new("/desk/{value}"), Percentage::MIN));
//! assert!(rx.try_recv().is_ok());
//! ```

mod event_bus;
mod host_event;
mod value_changed;

pub use event_bus::EventBus;
pub use host_event::HostEvent;
pub use value_changed::ValueChanged;
