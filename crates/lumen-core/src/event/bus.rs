// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Manages a generic, thread-safe event channel.
///
/// The bus is generic over the type `T` it transports, so higher-level modules
/// can define their own payloads without this module knowing about them.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new EventBus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("EventBus initialized.");
        Self { sender, receiver }
    }

    /// Attempts to send an event, logging an error if the receiver is disconnected.
    pub fn publish(&self, event: T) {
        log::trace!("Publishing an event.");

        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    /// Use this to allow other threads to send events.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a reference to the receiver end of the channel.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Removes every queued event, in arrival order, without blocking.
    ///
    /// An empty channel yields an empty vector.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of events currently queued.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if no event is queued.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::{SendError, TryRecvError};
    use std::{thread, time::Duration};

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        CursorMoved { x: i32, y: i32 },
        KeyPressed { key_code: String },
        FocusLost,
    }

    fn dummy_key_event() -> TestEvent {
        TestEvent::KeyPressed {
            key_code: "KeyA".to_string(),
        }
    }

    #[test]
    fn try_receive_empty() {
        let bus = EventBus::<TestEvent>::new();

        match bus.receiver().try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(event) => panic!("Received unexpected event: {event:?}"),
            Err(e) => panic!("Received unexpected error: {e:?}"),
        }
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn drain_preserves_arrival_order() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();

        let event1 = TestEvent::CursorMoved { x: 1, y: 2 };
        let event2 = dummy_key_event();
        let event3 = TestEvent::FocusLost;

        sender.send(event1.clone()).expect("Send 1 should succeed");
        bus.publish(event2.clone());
        sender.send(event3.clone()).expect("Send 3 should succeed");
        assert_eq!(bus.len(), 3);

        let drained = bus.drain();
        assert_eq!(drained, vec![event1, event2, event3]);
        assert!(bus.is_empty());
    }

    #[test]
    fn send_from_thread() {
        let bus = EventBus::<TestEvent>::new();
        let sender_clone = bus.sender();
        let event_to_send = dummy_key_event();
        let event_clone = event_to_send.clone();

        let handle = thread::spawn(move || {
            sender_clone
                .send(event_clone)
                .expect("Send from thread failed");
        });

        match bus.receiver().recv_timeout(Duration::from_secs(1)) {
            Ok(received_event) => assert_eq!(received_event, event_to_send),
            Err(e) => panic!("Failed to receive event from thread: {e:?}"),
        }

        handle.join().expect("Thread join failed");
    }

    #[test]
    fn send_error_on_receiver_drop() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();

        drop(bus);

        match sender.send(dummy_key_event()) {
            Err(SendError(_)) => {}
            Ok(()) => panic!("Send unexpectedly succeeded after receiver drop"),
        }
    }
}
