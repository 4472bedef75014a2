//! Session orchestration.
//!
//! One `Session` per peer. Each call to [`Session::tick`] runs the full
//! per-tick order documented on the crate root: pump replication,
//! interpret gestures, flush pending deltas, process the marker
//! lifecycle. Gesture interpretation and lifecycle mutation only happen
//! on the peer that is both the local controller and a client; every
//! other peer just pumps.

use lodestone_core::{
    GestureDelta, GestureInterpreter, MarkerEvents, MarkerLifecycle, SceneQuery, TouchSample,
};
use lodestone_networking::{ReplicationBridge, SessionRole};
use lodestone_shared::Vec2;

use crate::config::SessionConfig;
use crate::events::{EventSender, SessionEvent};

/// Per-session counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Drag gestures that produced a rotation delta.
    pub rotation_gestures: u64,
    /// Pinch gestures that produced a scale delta.
    pub scale_gestures: u64,
    /// Taps detected (hit or miss).
    pub taps: u64,
    /// Replication requests delivered.
    pub requests_sent: u64,
    /// Replication requests lost to a full channel.
    pub requests_dropped: u64,
}

/// One peer's view of a manipulation session.
pub struct Session<S: SceneQuery> {
    role: SessionRole,
    gestures: GestureInterpreter,
    lifecycle: MarkerLifecycle,
    bridge: ReplicationBridge,
    scene: S,
    events: EventSender,
    stats: SessionStats,
    current_tick: u64,
}

impl<S: SceneQuery> Session<S> {
    /// Creates a session around an already-wired replication bridge.
    ///
    /// The bridge's role decides what this session does each tick.
    #[must_use]
    pub fn new(
        config: &SessionConfig,
        bridge: ReplicationBridge,
        scene: S,
        events: EventSender,
    ) -> Self {
        Self {
            role: bridge.role(),
            gestures: GestureInterpreter::new(config.gesture()),
            lifecycle: MarkerLifecycle::new(config.default_marker_scale),
            bridge,
            scene,
            events,
            stats: SessionStats::default(),
            current_tick: 0,
        }
    }

    /// Runs one tick.
    ///
    /// `touches` is this tick's input sample; `markers` is the tracking
    /// collaborator's notification, whose `updated` transforms are
    /// mutated in place.
    pub fn tick(&mut self, touches: &[TouchSample], markers: &mut MarkerEvents) {
        self.current_tick += 1;
        self.stats.ticks += 1;

        // Receipt from the previous tick is observed here, before any
        // local computation.
        self.bridge.pump();

        if !(self.role.is_local_controller() && self.role.is_client()) {
            return;
        }

        if let Some(delta) = self.gestures.interpret(touches) {
            match delta {
                GestureDelta::Rotate(rotation) => {
                    self.bridge.stage_rotation(rotation);
                    self.stats.rotation_gestures += 1;
                }
                GestureDelta::Scale(amount) => {
                    self.bridge.stage_scale_delta(amount);
                    self.stats.scale_gestures += 1;
                }
                GestureDelta::Tap(position) => self.handle_tap(position),
            }
        }

        let report = self.bridge.flush();
        self.stats.requests_sent += u64::from(report.sent);
        self.stats.requests_dropped += u64::from(report.dropped);
        if report.dropped > 0 {
            tracing::warn!(
                tick = self.current_tick,
                dropped = report.dropped,
                "replication requests lost"
            );
            self.events.send(SessionEvent::RequestsDropped {
                tick: self.current_tick,
                count: report.dropped,
            });
        }

        for marker in &markers.added {
            self.events.send(SessionEvent::MarkerAdded { id: marker.id });
        }
        for id in &markers.removed {
            self.events.send(SessionEvent::MarkerRemoved { id: *id });
        }

        self.lifecycle.process(markers, &mut self.bridge);
    }

    fn handle_tap(&mut self, position: Vec2) {
        self.stats.taps += 1;
        if let Some(hit) = self.scene.hit_test(position) {
            tracing::info!(name = %hit.name, "tapped");
            self.events.send(SessionEvent::Tapped { name: hit.name });
        }
    }

    /// This peer's role.
    #[must_use]
    pub fn role(&self) -> SessionRole {
        self.role
    }

    /// The replication bridge, for wiring and inspection.
    #[must_use]
    pub fn bridge(&self) -> &ReplicationBridge {
        &self.bridge
    }

    /// Mutable bridge access, for subscribing observers on an
    /// authority session.
    pub fn bridge_mut(&mut self) -> &mut ReplicationBridge {
        &mut self.bridge
    }

    /// The marker lifecycle, for inspection.
    #[must_use]
    pub fn lifecycle(&self) -> &MarkerLifecycle {
        &self.lifecycle
    }

    /// Per-session counters.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Ticks executed so far.
    #[must_use]
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use lodestone_core::{MarkerId, StaticScene, TrackedMarker, TrackingState};
    use lodestone_networking::request_channel;
    use lodestone_shared::{MarkerTransform, SYNC_CHANNEL_CAPACITY};

    fn host_session(scene: StaticScene) -> (Session<StaticScene>, crate::events::EventReceiver) {
        let (sender, receiver) = EventBus::create_pair(64);
        let (_tx, rx) = request_channel(SYNC_CHANNEL_CAPACITY);
        let bridge = ReplicationBridge::authority(SessionRole::host(), rx);
        let session = Session::new(&SessionConfig::default(), bridge, scene, sender);
        (session, receiver)
    }

    fn tracked(id: u64) -> TrackedMarker {
        TrackedMarker::new(MarkerId(id), MarkerTransform::IDENTITY, TrackingState::Tracking)
    }

    #[test]
    fn test_drag_rotates_marker_on_host() {
        let (mut session, _events) = host_session(StaticScene::new());

        let drag = TouchSample::moved(0, Vec2::new(150.0, 40.0), Vec2::new(100.0, 40.0));
        let mut markers = MarkerEvents {
            updated: vec![tracked(1)],
            ..MarkerEvents::empty()
        };
        session.tick(&[drag], &mut markers);

        assert!((markers.updated[0].transform.rotation.yaw_degrees() - (-10.0)).abs() < 1e-3);
        assert_eq!(session.stats().rotation_gestures, 1);
    }

    #[test]
    fn test_idle_tick_changes_nothing() {
        let (mut session, _events) = host_session(StaticScene::new());

        let drag = TouchSample::moved(0, Vec2::new(150.0, 40.0), Vec2::new(100.0, 40.0));
        let mut markers = MarkerEvents {
            updated: vec![tracked(1)],
            ..MarkerEvents::empty()
        };
        session.tick(&[drag], &mut markers);
        let pose = markers.updated[0].transform;

        let mut markers = MarkerEvents {
            updated: vec![TrackedMarker::new(MarkerId(1), pose, TrackingState::Tracking)],
            ..MarkerEvents::empty()
        };
        session.tick(&[], &mut markers);

        assert!(markers.updated[0]
            .transform
            .rotation
            .approx_eq(pose.rotation, 1e-6));
    }

    #[test]
    fn test_tap_emits_event_on_hit() {
        let scene = StaticScene::new().with("anchor", Vec2::new(10.0, 10.0), 5.0);
        let (mut session, events) = host_session(scene);

        let mut markers = MarkerEvents::empty();
        session.tick(&[TouchSample::began(0, Vec2::new(10.0, 10.0))], &mut markers);
        session.tick(&[TouchSample::ended(0, Vec2::new(10.0, 10.0))], &mut markers);

        let drained = events.drain();
        assert_eq!(
            drained,
            vec![SessionEvent::Tapped {
                name: "anchor".to_string()
            }]
        );
        assert_eq!(session.stats().taps, 1);
    }

    #[test]
    fn test_tap_miss_emits_nothing() {
        let (mut session, events) = host_session(StaticScene::new());

        let mut markers = MarkerEvents::empty();
        session.tick(&[TouchSample::began(0, Vec2::new(10.0, 10.0))], &mut markers);
        session.tick(&[TouchSample::ended(0, Vec2::new(10.0, 10.0))], &mut markers);

        assert!(events.drain().is_empty());
        assert_eq!(session.stats().taps, 1);
    }

    #[test]
    fn test_observer_session_never_mutates() {
        let (sender, _receiver) = EventBus::create_pair(64);
        let (_tx, rx) = request_channel(SYNC_CHANNEL_CAPACITY);
        let mut authority = ReplicationBridge::authority(SessionRole::host(), rx);
        let observer_bridge = ReplicationBridge::observer(authority.subscribe(16).unwrap());
        let mut session = Session::new(
            &SessionConfig::default(),
            observer_bridge,
            StaticScene::new(),
            sender,
        );

        let drag = TouchSample::moved(0, Vec2::new(150.0, 40.0), Vec2::new(100.0, 40.0));
        let mut markers = MarkerEvents {
            updated: vec![tracked(1)],
            ..MarkerEvents::empty()
        };
        session.tick(&[drag], &mut markers);

        // Gestures and lifecycle are gated off for passive observers.
        assert_eq!(markers.updated[0].transform.rotation.yaw_degrees(), 0.0);
        assert_eq!(session.stats().rotation_gestures, 0);
        assert_eq!(session.lifecycle().saved_count(), 0);
    }

    #[test]
    fn test_marker_add_remove_events() {
        let (mut session, events) = host_session(StaticScene::new());

        let mut markers = MarkerEvents {
            added: vec![tracked(3)],
            ..MarkerEvents::empty()
        };
        session.tick(&[], &mut markers);

        let mut markers = MarkerEvents {
            removed: vec![MarkerId(3)],
            ..MarkerEvents::empty()
        };
        session.tick(&[], &mut markers);

        assert_eq!(
            events.drain(),
            vec![
                SessionEvent::MarkerAdded { id: MarkerId(3) },
                SessionEvent::MarkerRemoved { id: MarkerId(3) },
            ]
        );
    }
}
