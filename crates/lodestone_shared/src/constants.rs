//! Protocol constants shared by every crate in the workspace.
//!
//! These are the canonical tuning values. `SessionConfig` defaults to them
//! and a config file may override the gesture-related ones.

/// Degrees of yaw produced per screen unit of horizontal drag.
///
/// A drag of 50 units yields a -10 degree rotation at the default value.
pub const ROTATE_SPEED_MODIFIER: f32 = 0.2;

/// Multiplier applied to the pinch distance difference
/// (`previous_distance - current_distance`) to produce a scale delta.
///
/// Negative: spreading the fingers apart grows the marker.
pub const PINCH_SCALE_FACTOR: f32 = -1.0e-4;

/// Maximum distance (screen units) a touch may move between `Began` and
/// `Ended` and still count as a tap.
///
/// Deliberately below one screen unit: a one-pixel move is not a tap.
pub const TAP_SLOP: f32 = 0.5;

/// Lower clamp bound for every scale component.
pub const SCALE_MIN: f32 = 0.001;

/// Upper clamp bound for every scale component.
pub const SCALE_MAX: f32 = 10.0;

/// Uniform scale assigned to a marker when it is first detected.
pub const DEFAULT_MARKER_SCALE: f32 = 0.005;

/// Simulation tick rate in Hz.
pub const TICK_RATE: u32 = 60;

/// Capacity of the replication request and update channels.
///
/// A full channel drops the message; one tick's worth of gesture traffic
/// is a handful of messages, so 64 tolerates a stalled authority for
/// around a second before loss starts.
pub const SYNC_CHANNEL_CAPACITY: usize = 64;

/// Capacity of the diagnostic event bus.
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;
