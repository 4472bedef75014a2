//! Replication channels.
//!
//! Two message families flow through bounded crossbeam channels:
//! requests inward to the authority, field updates outward to observers.
//! Sends never block; a full channel drops the message and the caller
//! learns about it only through the returned `bool`.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use lodestone_shared::Quaternion;

/// One-way request from the controlling client to the authority.
///
/// Both variants carry full replacement values, not increments; applying
/// the same request twice is harmless, applying a stale one is not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SyncRequest {
    /// Replace the canonical pending rotation.
    SetRotation(Quaternion),
    /// Replace the canonical pending scale delta.
    SetScaleDelta(f32),
}

/// Field-level update pushed from the authority to an observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StateUpdate {
    /// The canonical rotation changed.
    Rotation(Quaternion),
    /// The canonical scale delta changed.
    ScaleDelta(f32),
}

/// Creates a bounded request channel.
#[must_use]
pub fn request_channel(capacity: usize) -> (RequestSender, RequestReceiver) {
    let (sender, receiver) = bounded(capacity);
    (RequestSender { sender }, RequestReceiver { receiver })
}

/// Creates a bounded update channel.
#[must_use]
pub fn update_channel(capacity: usize) -> (UpdateSender, UpdateReceiver) {
    let (sender, receiver) = bounded(capacity);
    (UpdateSender { sender }, UpdateReceiver { receiver })
}

/// Sending half of the request channel. Held by the controller.
#[derive(Clone)]
pub struct RequestSender {
    sender: Sender<SyncRequest>,
}

impl RequestSender {
    /// Sends a request without blocking.
    ///
    /// Returns `false` when the channel is full or the authority is
    /// gone; the request is dropped either way.
    #[inline]
    pub fn send(&self, request: SyncRequest) -> bool {
        match self.sender.try_send(request) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Receiving half of the request channel. Held by the authority.
pub struct RequestReceiver {
    receiver: Receiver<SyncRequest>,
}

impl RequestReceiver {
    /// Drains every pending request in arrival order.
    #[inline]
    pub fn drain(&self) -> Vec<SyncRequest> {
        let mut requests = Vec::with_capacity(self.receiver.len());
        while let Ok(request) = self.receiver.try_recv() {
            requests.push(request);
        }
        requests
    }

    /// Number of requests waiting.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

/// Sending half of an update channel. Held by the authority, one per
/// observer.
#[derive(Clone)]
pub struct UpdateSender {
    sender: Sender<StateUpdate>,
}

impl UpdateSender {
    /// Sends an update without blocking.
    ///
    /// Returns `false` when the observer's channel is full or the
    /// observer is gone.
    #[inline]
    pub fn send(&self, update: StateUpdate) -> bool {
        match self.sender.try_send(update) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Receiving half of an update channel. Held by one observer.
pub struct UpdateReceiver {
    receiver: Receiver<StateUpdate>,
}

impl UpdateReceiver {
    /// Drains every pending update in arrival order.
    #[inline]
    pub fn drain(&self) -> Vec<StateUpdate> {
        let mut updates = Vec::with_capacity(self.receiver.len());
        while let Ok(update) = self.receiver.try_recv() {
            updates.push(update);
        }
        updates
    }
}
