//! # Pairing Demo
//!
//! Wires the three peer shapes in one process and drives a scripted
//! manipulation through the full data flow:
//!
//! controller gestures → requests → authority canonical state →
//! observer replica, with the controller's lifecycle applying the
//! clamped pose to a simulated tracked marker.
//!
//! Verifies the result and exits non-zero on any mismatch.

use lodestone::core::{MarkerEvents, MarkerId, StaticScene, TouchSample, TrackedMarker, TrackingState};
use lodestone::net::{request_channel, ReplicationBridge, SessionRole};
use lodestone::shared::{MarkerTransform, Vec2};
use lodestone::{EventBus, Session, SessionConfig, SessionEvent, TickDriver};

const MARKER: MarkerId = MarkerId(1);
const TOTAL_TICKS: u64 = 8;

fn touches_for(tick: u64) -> Vec<TouchSample> {
    match tick {
        // Horizontal drag: dx = 50 => -10 degrees of yaw.
        2 => vec![TouchSample::moved(
            0,
            Vec2::new(150.0, 40.0),
            Vec2::new(100.0, 40.0),
        )],
        // Tap on the "anchor" target.
        4 => vec![TouchSample::began(0, Vec2::new(100.0, 100.0))],
        5 => vec![TouchSample::ended(0, Vec2::new(100.0, 100.0))],
        // Pinch closing from 100 to 80 units => scale delta -0.002.
        6 => vec![
            TouchSample::moved(0, Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)),
            TouchSample::moved(1, Vec2::new(80.0, 0.0), Vec2::new(100.0, 0.0)),
        ],
        _ => Vec::new(),
    }
}

fn markers_for(tick: u64, pose: MarkerTransform) -> MarkerEvents {
    let mut events = MarkerEvents::empty();
    match tick {
        1 => events
            .added
            .push(TrackedMarker::new(MARKER, pose, TrackingState::Tracking)),
        8 => events.removed.push(MARKER),
        _ => events
            .updated
            .push(TrackedMarker::new(MARKER, pose, TrackingState::Tracking)),
    }
    events
}

#[allow(clippy::too_many_lines)]
fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                      LODESTONE PAIRING DEMO                      ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    let config = SessionConfig::default();

    // Wire the topology: controller -> authority -> observer.
    let (request_tx, request_rx) = request_channel(config.sync_channel_capacity);
    let mut authority_bridge =
        ReplicationBridge::authority(SessionRole::dedicated_authority(), request_rx);
    let observer_bridge = ReplicationBridge::observer(
        authority_bridge
            .subscribe(config.sync_channel_capacity)
            .expect("authority bridge accepts subscribers"),
    );
    let source_bridge = ReplicationBridge::source(request_tx);

    let (event_tx, event_rx) = EventBus::create_pair(config.event_channel_capacity);
    let scene = StaticScene::new().with("anchor", Vec2::new(100.0, 100.0), 10.0);

    let mut controller = Session::new(&config, source_bridge, scene, event_tx.clone());
    let mut authority = Session::new(&config, authority_bridge, StaticScene::new(), event_tx.clone());
    let mut observer = Session::new(&config, observer_bridge, StaticScene::new(), event_tx);

    let mut driver = TickDriver::new(config.tick_rate);
    let mut pose = MarkerTransform::IDENTITY;
    let mut canonical_peak_yaw = 0.0_f32;
    let mut replica_peak_yaw = 0.0_f32;

    for tick in 1..=TOTAL_TICKS {
        loop {
            if driver.tick_due() {
                break;
            }
            driver.wait();
        }
        let started = driver.begin();

        let touches = touches_for(tick);
        let mut markers = markers_for(tick, pose);
        controller.tick(&touches, &mut markers);
        authority.tick(&[], &mut MarkerEvents::empty());
        observer.tick(&[], &mut MarkerEvents::empty());

        // The tracking collaborator keeps the manipulated pose.
        if let Some(marker) = markers.added.first().or_else(|| markers.updated.first()) {
            pose = marker.transform;
        }

        let canonical_yaw = authority.bridge().rotation().yaw_degrees();
        let replica_yaw = observer.bridge().rotation().yaw_degrees();
        if canonical_yaw.abs() > canonical_peak_yaw.abs() {
            canonical_peak_yaw = canonical_yaw;
        }
        if replica_yaw.abs() > replica_peak_yaw.abs() {
            replica_peak_yaw = replica_yaw;
        }

        driver.complete(started);
    }

    let events = event_rx.drain();
    let tapped_anchor = events.contains(&SessionEvent::Tapped {
        name: "anchor".to_string(),
    });
    let saw_add = events.contains(&SessionEvent::MarkerAdded { id: MARKER });
    let saw_remove = events.contains(&SessionEvent::MarkerRemoved { id: MARKER });

    let checks: Vec<(&str, bool)> = vec![
        (
            "drag applied -10 degrees of yaw to the marker",
            (pose.rotation.yaw_degrees() - (-10.0)).abs() < 1e-2,
        ),
        (
            "pinch shrank the marker from 0.005 to 0.003",
            (pose.scale.x - 0.003).abs() < 1e-6,
        ),
        (
            "authority canonical state saw the rotation",
            (canonical_peak_yaw - (-10.0)).abs() < 1e-2,
        ),
        (
            "observer replica saw the rotation",
            (replica_peak_yaw - (-10.0)).abs() < 1e-2,
        ),
        (
            "canonical state returned to identity after consumption",
            authority.bridge().rotation().yaw_degrees().abs() < 1e-3,
        ),
        ("tap hit-tested onto the anchor", tapped_anchor),
        ("marker add/remove events observed", saw_add && saw_remove),
        (
            "removed marker dropped its saved pose",
            controller.lifecycle().saved_count() == 0,
        ),
    ];

    println!();
    println!("┌─ RESULTS ──────────────────────────────────────────────────────┐");
    for (name, passed) in &checks {
        println!("│ {} {}", if *passed { "✅" } else { "❌" }, name);
    }
    println!("└────────────────────────────────────────────────────────────────┘");

    let stats = controller.stats();
    let timings = driver.timings();
    println!();
    println!("┌─ TRAFFIC ──────────────────────────────────────────────────────┐");
    println!("│ Ticks:             {}", stats.ticks);
    println!("│ Rotation gestures: {}", stats.rotation_gestures);
    println!("│ Scale gestures:    {}", stats.scale_gestures);
    println!("│ Taps:              {}", stats.taps);
    println!("│ Requests sent:     {}", stats.requests_sent);
    println!("│ Requests dropped:  {}", stats.requests_dropped);
    println!("│ Avg tick:          {} us", timings.avg_us);
    println!("└────────────────────────────────────────────────────────────────┘");

    if checks.iter().all(|(_, passed)| *passed) {
        println!();
        println!("✅ PAIRING DEMO PASSED");
        std::process::exit(0);
    }
    println!();
    println!("❌ PAIRING DEMO FAILED");
    std::process::exit(1);
}
