// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maps host lifecycle events to configured light values.

use crate::config::EventField;
use crate::event::HostEvent;
use crate::protocol::Transport;
use crate::types::{Percentage, UrlTemplate};

use super::Dispatcher;

/// Returns the record field consulted for a host event.
///
/// `Shutdown` and `SettingsUpdated` carry no light value.
///
/// # Examples
///
/// ```
/// use light_controls_http::config::EventField;
/// use light_controls_http::dispatch::event_field;
/// use light_controls_http::event::HostEvent;
///
/// assert_eq!(event_field(HostEvent::PrintFailed), Some(EventField::PrintEnd));
/// assert_eq!(event_field(HostEvent::Shutdown), None);
/// ```
#[must_use]
pub const fn event_field(event: HostEvent) -> Option<EventField> {
    match event {
        HostEvent::Startup => Some(EventField::OctoprintStart),
        HostEvent::Connected => Some(EventField::Connect),
        HostEvent::Disconnected => Some(EventField::Disconnect),
        HostEvent::PrintStarted => Some(EventField::PrintStart),
        HostEvent::PrintPaused => Some(EventField::PrintPaused),
        HostEvent::PrintResumed => Some(EventField::PrintResumed),
        end if end.is_print_end() => Some(EventField::PrintEnd),
        _ => None,
    }
}

/// Applies the per-event values of every registered light.
#[derive(Debug)]
pub struct EventRouter<'a, T> {
    dispatcher: &'a Dispatcher<T>,
}

impl<'a, T: Transport> EventRouter<'a, T> {
    /// Creates a router over a dispatcher.
    #[must_use]
    pub fn new(dispatcher: &'a Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    /// Dispatches the configured value of `event` to every light that has one.
    ///
    /// Blank values mean "no action". Non-numeric values are skipped with a
    /// warning; out-of-range values are clamped. Returns the number of
    /// lights dispatched to.
    pub async fn route(&self, event: HostEvent) -> usize {
        let Some(field) = event_field(event) else {
            return 0;
        };

        let targets = self.targets(field).await;
        tracing::debug!(event = %event, field = %field, count = targets.len(), "Routing host event");

        let mut dispatched = 0;
        for (identifier, value) in targets {
            if self
                .dispatcher
                .set_value(identifier.as_str(), value)
                .await
                .is_some()
            {
                dispatched += 1;
            }
        }
        dispatched
    }

    /// Collects (identifier, value) pairs for a field under one lock.
    async fn targets(&self, field: EventField) -> Vec<(UrlTemplate, Percentage)> {
        let registry = self.dispatcher.lock().await;
        registry
            .all()
            .filter_map(|(identifier, binding)| {
                let raw = binding.event_value(field);
                if raw.trim().is_empty() {
                    return None;
                }
                match Percentage::parse_clamped(raw) {
                    Ok((value, clamped)) => {
                        if clamped {
                            tracing::warn!(
                                identifier = %identifier,
                                field = %field,
                                raw = %raw,
                                value = value.value(),
                                "Configured light value out of range, clamped"
                            );
                        }
                        Some((identifier.clone(), value))
                    }
                    Err(e) => {
                        tracing::warn!(
                            identifier = %identifier,
                            field = %field,
                            error = %e,
                            "Ignoring malformed configured light value"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}
