//! The replication bridge.
//!
//! One façade over the three peer shapes. The session stages gesture
//! deltas into it, flushes them toward the authority once per tick, and
//! the lifecycle consumes them back out through the
//! [`DeltaSource`](lodestone_core::DeltaSource) trait.
//!
//! Where the pending state lives depends on the role:
//!
//! - **authority** peers stage straight into the canonical
//!   [`AuthorityNode`]; consumption resets canonical fields and the
//!   reset is published to observers.
//! - **source** peers (remote controllers) stage into a local working
//!   copy and flush it to the authority as full-replacement requests
//!   every tick; consumption resets the working copy, and the reset
//!   reaches the authority with the next flush.
//! - **observer** peers hold a read-only replica and stage nothing.

use lodestone_core::DeltaSource;
use lodestone_shared::Quaternion;

use crate::authority::{AuthorityNode, SyncState};
use crate::channel::{RequestReceiver, RequestSender, SyncRequest, UpdateReceiver};
use crate::observer::ObserverReplica;
use crate::roles::SessionRole;

/// Outcome of one flush: how many requests went out, how many were
/// dropped by a full or closed channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Requests delivered to the authority's channel.
    pub sent: u32,
    /// Requests lost. Never resent.
    pub dropped: u32,
}

/// Cumulative bridge-side traffic counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct BridgeStats {
    /// Requests delivered across all flushes.
    pub requests_sent: u64,
    /// Requests dropped across all flushes.
    pub requests_dropped: u64,
}

enum Link {
    Authority(AuthorityNode),
    Source {
        requests: RequestSender,
        pending: SyncState,
    },
    Observer(ObserverReplica),
}

/// Role-shaped façade over the replication topology.
pub struct ReplicationBridge {
    role: SessionRole,
    link: Link,
    stats: BridgeStats,
}

impl ReplicationBridge {
    /// Bridge for a peer holding the canonical state.
    ///
    /// `role` must be an authority role (host or dedicated).
    #[must_use]
    pub fn authority(role: SessionRole, requests: RequestReceiver) -> Self {
        debug_assert!(role.is_authority());
        Self {
            role,
            link: Link::Authority(AuthorityNode::new(requests)),
            stats: BridgeStats::default(),
        }
    }

    /// Bridge for the remote controlling client.
    #[must_use]
    pub fn source(requests: RequestSender) -> Self {
        Self {
            role: SessionRole::controlling_client(),
            link: Link::Source {
                requests,
                pending: SyncState::NEUTRAL,
            },
            stats: BridgeStats::default(),
        }
    }

    /// Bridge for a passive observing client.
    #[must_use]
    pub fn observer(updates: UpdateReceiver) -> Self {
        Self {
            role: SessionRole::observing_client(),
            link: Link::Observer(ObserverReplica::new(updates)),
            stats: BridgeStats::default(),
        }
    }

    /// This peer's role.
    #[must_use]
    pub fn role(&self) -> SessionRole {
        self.role
    }

    /// Pumps inbound traffic: the authority drains requests, observers
    /// refresh their replica, sources have nothing inbound.
    ///
    /// Call once at the start of each tick.
    pub fn pump(&mut self) {
        match &mut self.link {
            Link::Authority(node) => node.pump(),
            Link::Observer(replica) => {
                replica.pump();
            }
            Link::Source { .. } => {}
        }
    }

    /// Replaces the pending rotation with a freshly-computed gesture
    /// delta. No-op on observers.
    pub fn stage_rotation(&mut self, rotation: Quaternion) {
        match &mut self.link {
            Link::Authority(node) => node.set_rotation(rotation),
            Link::Source { pending, .. } => pending.rotation = rotation,
            Link::Observer(_) => {}
        }
    }

    /// Replaces the pending scale delta. No-op on observers.
    pub fn stage_scale_delta(&mut self, delta: f32) {
        match &mut self.link {
            Link::Authority(node) => node.set_scale_delta(delta),
            Link::Source { pending, .. } => pending.scale_delta = delta,
            Link::Observer(_) => {}
        }
    }

    /// Sends the pending state toward the authority.
    ///
    /// Only source peers emit traffic: both fields go out as
    /// full-replacement requests, fire-and-forget. Authority peers
    /// already applied their writes in place; observers send nothing.
    pub fn flush(&mut self) -> FlushReport {
        let mut report = FlushReport::default();
        if let Link::Source { requests, pending } = &self.link {
            for request in [
                SyncRequest::SetRotation(pending.rotation),
                SyncRequest::SetScaleDelta(pending.scale_delta),
            ] {
                if requests.send(request) {
                    report.sent += 1;
                } else {
                    report.dropped += 1;
                }
            }
        }
        self.stats.requests_sent += u64::from(report.sent);
        self.stats.requests_dropped += u64::from(report.dropped);
        report
    }

    /// Pending (or replicated) rotation as seen by this peer.
    #[must_use]
    pub fn rotation(&self) -> Quaternion {
        match &self.link {
            Link::Authority(node) => node.rotation(),
            Link::Source { pending, .. } => pending.rotation,
            Link::Observer(replica) => replica.rotation(),
        }
    }

    /// Pending (or replicated) scale delta as seen by this peer.
    #[must_use]
    pub fn scale_delta(&self) -> f32 {
        match &self.link {
            Link::Authority(node) => node.scale_delta(),
            Link::Source { pending, .. } => pending.scale_delta,
            Link::Observer(replica) => replica.scale_delta(),
        }
    }

    /// Cumulative traffic counters.
    #[must_use]
    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    /// The canonical node, when this peer is the authority.
    #[must_use]
    pub fn authority_node(&self) -> Option<&AuthorityNode> {
        match &self.link {
            Link::Authority(node) => Some(node),
            _ => None,
        }
    }

    /// Registers an observer on this peer's canonical state.
    ///
    /// Returns `None` when this peer is not the authority.
    pub fn subscribe(&mut self, capacity: usize) -> Option<UpdateReceiver> {
        match &mut self.link {
            Link::Authority(node) => Some(node.subscribe(capacity)),
            _ => None,
        }
    }
}

impl DeltaSource for ReplicationBridge {
    /// Consumes the pending rotation.
    ///
    /// Authority peers reset the canonical field (the reset is
    /// published); source peers reset their working copy. Observers
    /// never consume; for them this is a plain read.
    fn consume_rotation(&mut self) -> Quaternion {
        match &mut self.link {
            Link::Authority(node) => node.take_rotation(),
            Link::Source { pending, .. } => {
                std::mem::replace(&mut pending.rotation, Quaternion::IDENTITY)
            }
            Link::Observer(replica) => replica.rotation(),
        }
    }

    /// Consumes the pending scale delta; same rules as rotation.
    fn consume_scale_delta(&mut self) -> f32 {
        match &mut self.link {
            Link::Authority(node) => node.take_scale_delta(),
            Link::Source { pending, .. } => std::mem::replace(&mut pending.scale_delta, 0.0),
            Link::Observer(replica) => replica.scale_delta(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::request_channel;
    use lodestone_shared::SYNC_CHANNEL_CAPACITY;

    fn wired_pair() -> (ReplicationBridge, ReplicationBridge) {
        let (tx, rx) = request_channel(SYNC_CHANNEL_CAPACITY);
        let authority = ReplicationBridge::authority(SessionRole::dedicated_authority(), rx);
        let source = ReplicationBridge::source(tx);
        (authority, source)
    }

    #[test]
    fn test_source_flush_reaches_authority() {
        let (mut authority, mut source) = wired_pair();

        let rotation = Quaternion::from_yaw_degrees(-10.0);
        source.stage_rotation(rotation);
        source.stage_scale_delta(-0.002);
        let report = source.flush();
        assert_eq!(report, FlushReport { sent: 2, dropped: 0 });

        authority.pump();
        assert!(authority.rotation().approx_eq(rotation, 1e-6));
        assert!((authority.scale_delta() - (-0.002)).abs() < 1e-7);
    }

    #[test]
    fn test_source_consume_resets_working_copy() {
        let (_authority, mut source) = wired_pair();

        source.stage_rotation(Quaternion::from_yaw_degrees(15.0));
        source.stage_scale_delta(0.5);

        let rotation = source.consume_rotation();
        assert!((rotation.yaw_degrees() - 15.0).abs() < 1e-3);
        assert!((source.consume_scale_delta() - 0.5).abs() < 1e-6);

        // One-shot: a second consume observes neutral values.
        assert_eq!(source.consume_rotation(), Quaternion::IDENTITY);
        assert_eq!(source.consume_scale_delta(), 0.0);
    }

    #[test]
    fn test_reset_propagates_on_next_flush() {
        let (mut authority, mut source) = wired_pair();

        source.stage_rotation(Quaternion::from_yaw_degrees(-10.0));
        source.flush();
        authority.pump();
        assert!((authority.rotation().yaw_degrees() - (-10.0)).abs() < 1e-3);

        // The controller consumes; the next flush carries identity.
        let _ = source.consume_rotation();
        source.flush();
        authority.pump();
        assert_eq!(authority.rotation(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_host_consumes_canonical_directly() {
        let (_tx, rx) = request_channel(SYNC_CHANNEL_CAPACITY);
        let mut host = ReplicationBridge::authority(SessionRole::host(), rx);

        host.stage_scale_delta(0.25);
        assert!((host.consume_scale_delta() - 0.25).abs() < 1e-6);
        assert_eq!(host.consume_scale_delta(), 0.0);
    }

    #[test]
    fn test_observer_stages_nothing() {
        let (_tx, rx) = request_channel(SYNC_CHANNEL_CAPACITY);
        let mut host = ReplicationBridge::authority(SessionRole::host(), rx);
        let mut observer = ReplicationBridge::observer(host.subscribe(16).unwrap());

        observer.stage_rotation(Quaternion::from_yaw_degrees(90.0));
        assert_eq!(observer.flush(), FlushReport::default());

        host.stage_rotation(Quaternion::from_yaw_degrees(-10.0));
        observer.pump();
        assert!((observer.rotation().yaw_degrees() - (-10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_dropped_requests_are_counted() {
        let (tx, rx) = request_channel(1);
        let _rx = rx;
        let mut source = ReplicationBridge::source(tx);

        source.stage_rotation(Quaternion::from_yaw_degrees(1.0));
        // Two requests into a one-slot channel: the second is lost.
        let report = source.flush();
        assert_eq!(report.sent, 1);
        assert_eq!(report.dropped, 1);
        assert_eq!(source.stats().requests_dropped, 1);
    }
}
