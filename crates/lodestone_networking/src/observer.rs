//! The observer replica.
//!
//! A read-only, eventually-consistent copy of the authority's canonical
//! state. Pumped once at the start of the owning peer's tick; between
//! pumps the replica may be stale, which the protocol accepts.

use crate::authority::SyncState;
use crate::channel::{StateUpdate, UpdateReceiver};
use lodestone_shared::Quaternion;

/// Read-only cached copy of the canonical state.
pub struct ObserverReplica {
    state: SyncState,
    updates: UpdateReceiver,
    updates_applied: u64,
}

impl ObserverReplica {
    /// Creates a replica fed by the given update channel.
    ///
    /// Starts neutral; the authority primes new subscriptions, so the
    /// first pump converges the replica.
    #[must_use]
    pub fn new(updates: UpdateReceiver) -> Self {
        Self {
            state: SyncState::NEUTRAL,
            updates,
            updates_applied: 0,
        }
    }

    /// Applies every pending update in arrival order.
    ///
    /// Returns the number of updates applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        for update in self.updates.drain() {
            match update {
                StateUpdate::Rotation(rotation) => self.state.rotation = rotation,
                StateUpdate::ScaleDelta(delta) => self.state.scale_delta = delta,
            }
            applied += 1;
        }
        self.updates_applied += applied as u64;
        applied
    }

    /// Replicated rotation as of the last pump.
    #[must_use]
    pub fn rotation(&self) -> Quaternion {
        self.state.rotation
    }

    /// Replicated scale delta as of the last pump.
    #[must_use]
    pub fn scale_delta(&self) -> f32 {
        self.state.scale_delta
    }

    /// Replicated state as of the last pump.
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Total updates applied since creation.
    #[must_use]
    pub fn updates_applied(&self) -> u64 {
        self.updates_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::AuthorityNode;
    use crate::channel::request_channel;

    #[test]
    fn test_replica_converges_after_pump() {
        let (_tx, rx) = request_channel(8);
        let mut authority = AuthorityNode::new(rx);
        let mut replica = ObserverReplica::new(authority.subscribe(16));

        let rotation = Quaternion::from_yaw_degrees(-10.0);
        authority.set_rotation(rotation);
        authority.set_scale_delta(0.01);

        // Stale until pumped.
        assert_eq!(replica.rotation(), Quaternion::IDENTITY);

        replica.pump();
        assert!(replica.rotation().approx_eq(rotation, 1e-6));
        assert!((replica.scale_delta() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_late_subscriber_is_primed() {
        let (_tx, rx) = request_channel(8);
        let mut authority = AuthorityNode::new(rx);
        authority.set_rotation(Quaternion::from_yaw_degrees(45.0));

        let mut replica = ObserverReplica::new(authority.subscribe(16));
        replica.pump();
        assert!((replica.rotation().yaw_degrees() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_updates_apply_in_order() {
        let (_tx, rx) = request_channel(8);
        let mut authority = AuthorityNode::new(rx);
        let mut replica = ObserverReplica::new(authority.subscribe(16));

        authority.set_scale_delta(0.1);
        authority.set_scale_delta(0.2);
        replica.pump();

        // The later write is the surviving one.
        assert!((replica.scale_delta() - 0.2).abs() < 1e-6);
    }
}
