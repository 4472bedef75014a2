//! The authority node.
//!
//! Holds the canonical pending-manipulation state. Requests drained at
//! the start of each tick overwrite fields unconditionally; every field
//! change is pushed to subscribed observers.

use lodestone_shared::Quaternion;

use crate::channel::{
    update_channel, RequestReceiver, StateUpdate, SyncRequest, UpdateReceiver, UpdateSender,
};

/// The replicated pending-manipulation state.
///
/// Both fields are one-shot: they hold a delta that has not been
/// consumed yet, and return to their neutral value on consumption.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyncState {
    /// Pending rotation delta (yaw-only in practice).
    pub rotation: Quaternion,
    /// Pending scalar scale delta.
    pub scale_delta: f32,
}

impl SyncState {
    /// Identity rotation, zero scale delta.
    pub const NEUTRAL: Self = Self {
        rotation: Quaternion::IDENTITY,
        scale_delta: 0.0,
    };

    /// True when consuming this state would change nothing.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Counters for authority-side replication traffic.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorityStats {
    /// Requests drained and applied.
    pub requests_applied: u64,
    /// Field updates delivered to observers.
    pub updates_published: u64,
    /// Field updates dropped because an observer's channel was full or
    /// closed.
    pub updates_dropped: u64,
}

/// Owner of the canonical state.
pub struct AuthorityNode {
    state: SyncState,
    /// Last values pushed to observers, for field-level diffing.
    published: SyncState,
    requests: RequestReceiver,
    subscribers: Vec<UpdateSender>,
    stats: AuthorityStats,
}

impl AuthorityNode {
    /// Creates an authority draining the given request channel.
    #[must_use]
    pub fn new(requests: RequestReceiver) -> Self {
        Self {
            state: SyncState::NEUTRAL,
            published: SyncState::NEUTRAL,
            requests,
            subscribers: Vec::new(),
            stats: AuthorityStats::default(),
        }
    }

    /// Registers a new observer and primes it with the current state.
    ///
    /// `capacity` bounds the observer's update channel; a slow observer
    /// loses updates rather than stalling the authority.
    pub fn subscribe(&mut self, capacity: usize) -> UpdateReceiver {
        let (sender, receiver) = update_channel(capacity);
        self.deliver(&sender, StateUpdate::Rotation(self.state.rotation));
        self.deliver(&sender, StateUpdate::ScaleDelta(self.state.scale_delta));
        self.subscribers.push(sender);
        receiver
    }

    /// Drains pending requests and applies them last-writer-wins, then
    /// publishes any resulting field changes.
    ///
    /// Call once at the start of each tick; requests that arrive during
    /// a tick are observed at the start of the next one.
    pub fn pump(&mut self) {
        for request in self.requests.drain() {
            match request {
                SyncRequest::SetRotation(rotation) => self.state.rotation = rotation,
                SyncRequest::SetScaleDelta(delta) => self.state.scale_delta = delta,
            }
            self.stats.requests_applied += 1;
        }
        self.publish_changes();
    }

    /// Replaces the pending rotation locally (authority-as-controller).
    pub fn set_rotation(&mut self, rotation: Quaternion) {
        self.state.rotation = rotation;
        self.publish_changes();
    }

    /// Replaces the pending scale delta locally.
    pub fn set_scale_delta(&mut self, delta: f32) {
        self.state.scale_delta = delta;
        self.publish_changes();
    }

    /// Consumes the pending rotation: returns it and resets the
    /// canonical field to identity.
    pub fn take_rotation(&mut self) -> Quaternion {
        let rotation = std::mem::replace(&mut self.state.rotation, Quaternion::IDENTITY);
        self.publish_changes();
        rotation
    }

    /// Consumes the pending scale delta: returns it and resets the
    /// canonical field to zero.
    pub fn take_scale_delta(&mut self) -> f32 {
        let delta = std::mem::replace(&mut self.state.scale_delta, 0.0);
        self.publish_changes();
        delta
    }

    /// Current canonical rotation.
    #[must_use]
    pub fn rotation(&self) -> Quaternion {
        self.state.rotation
    }

    /// Current canonical scale delta.
    #[must_use]
    pub fn scale_delta(&self) -> f32 {
        self.state.scale_delta
    }

    /// Current canonical state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Traffic counters.
    #[must_use]
    pub fn stats(&self) -> AuthorityStats {
        self.stats
    }

    /// Number of subscribed observers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn deliver(&mut self, subscriber: &UpdateSender, update: StateUpdate) {
        if subscriber.send(update) {
            self.stats.updates_published += 1;
        } else {
            self.stats.updates_dropped += 1;
        }
    }

    fn publish_changes(&mut self) {
        if self.state.rotation != self.published.rotation {
            let update = StateUpdate::Rotation(self.state.rotation);
            self.broadcast(update);
            self.published.rotation = self.state.rotation;
        }
        if self.state.scale_delta != self.published.scale_delta {
            let update = StateUpdate::ScaleDelta(self.state.scale_delta);
            self.broadcast(update);
            self.published.scale_delta = self.state.scale_delta;
        }
    }

    fn broadcast(&mut self, update: StateUpdate) {
        let mut published = 0;
        let mut dropped = 0;
        for subscriber in &self.subscribers {
            if subscriber.send(update) {
                published += 1;
            } else {
                dropped += 1;
            }
        }
        self.stats.updates_published += published;
        self.stats.updates_dropped += dropped;
        if dropped > 0 {
            tracing::debug!(dropped, "observer update channels full, updates lost");
        }
    }
}
