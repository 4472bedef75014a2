//! Diagnostic event bus.
//!
//! Sessions report notable moments here: taps that hit something,
//! markers appearing and disappearing, replication loss. Consumers
//! (UI, logging, tests) drain the bus once per tick. The channel is
//! bounded and sends never block; an overwhelmed consumer loses events,
//! not frames.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use lodestone_core::MarkerId;

/// Events emitted by a session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A tap hit-tested onto a scene object.
    Tapped {
        /// Name of the object that was hit.
        name: String,
    },
    /// A marker was detected for the first time.
    MarkerAdded {
        /// The new marker.
        id: MarkerId,
    },
    /// A marker disappeared; its saved pose was dropped.
    MarkerRemoved {
        /// The departed marker.
        id: MarkerId,
    },
    /// One or more replication requests were lost this tick.
    RequestsDropped {
        /// Tick on which the loss happened.
        tick: u64,
        /// Number of requests lost.
        count: u32,
    },
}

/// Bounded event bus with cloneable handles.
pub struct EventBus {
    sender: Sender<SessionEvent>,
    receiver: Receiver<SessionEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Convenience: a fresh sender/receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for emitting events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<SessionEvent>,
}

impl EventSender {
    /// Emits an event without blocking.
    ///
    /// Returns `false` when the bus is full or closed; the event is
    /// dropped.
    #[inline]
    pub fn send(&self, event: SessionEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for consuming events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<SessionEvent>,
}

impl EventReceiver {
    /// Drains every pending event.
    #[inline]
    pub fn drain(&self) -> Vec<SessionEvent> {
        let mut events = Vec::with_capacity(self.receiver.len());
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<SessionEvent> {
        self.receiver.try_recv().ok()
    }

    /// True when events are waiting.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_drain() {
        let (sender, receiver) = EventBus::create_pair(16);

        assert!(sender.send(SessionEvent::MarkerAdded { id: MarkerId(1) }));
        assert!(sender.send(SessionEvent::Tapped {
            name: "anchor".to_string(),
        }));

        let events = receiver.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SessionEvent::MarkerAdded { id: MarkerId(1) });
        assert!(!receiver.has_events());
    }

    #[test]
    fn test_full_bus_drops() {
        let (sender, receiver) = EventBus::create_pair(1);

        assert!(sender.send(SessionEvent::MarkerAdded { id: MarkerId(1) }));
        assert!(!sender.send(SessionEvent::MarkerAdded { id: MarkerId(2) }));

        assert_eq!(receiver.drain().len(), 1);
    }
}
