// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting light value notifications.

use tokio::sync::broadcast;

use super::ValueChanged;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting [`ValueChanged`] notifications.
///
/// Uses tokio's broadcast channel so every connected observer gets its own
/// copy. Publishing never blocks: with no subscribers the notification is
/// dropped, and a slow subscriber loses the oldest entries
/// (`RecvError::Lagged`).
///
/// # Examples
///
/// ```
/// use light_controls_http::event::{EventBus, ValueChanged};
/// use light_controls_http::types::{Percentage, UrlTemplate};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ValueChanged::new(UrlTemplate::new("/led?v={value}"), Percentage::MAX));
/// assert_eq!(rx.try_recv().unwrap().value, Percentage::MAX);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ValueChanged>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to notifications published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ValueChanged> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes a notification to all subscribers.
    pub fn publish(&self, event: ValueChanged) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Percentage, UrlTemplate};

    fn event(value: u8) -> ValueChanged {
        ValueChanged::new(
            UrlTemplate::new("/led?v={value}"),
            Percentage::new(value).unwrap(),
        )
    }

    #[test]
    fn new_bus_has_no_subscribers() {
        assert_eq!(EventBus::new().subscriber_count(), 0);
    }

    #[test]
    fn drop_subscriber_decrements_count() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn publish_delivers_to_multiple_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(event(40));

        assert_eq!(rx1.recv().await.unwrap(), event(40));
        assert_eq!(rx2.recv().await.unwrap(), event(40));
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(event(10));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        let _rx = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }
}
