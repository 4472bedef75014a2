//! # LODESTONE Core
//!
//! Engine-agnostic marker manipulation: touch gestures become clamped
//! rotation and scale deltas on a tracked marker's pose.
//!
//! ## Data Flow
//!
//! ```text
//! touch samples ──> GestureInterpreter ──> GestureDelta
//!                                             │
//!                     staged into the replication bridge (DeltaSource)
//!                                             │
//! marker events ──> MarkerLifecycle ──> consume + apply ──> marker pose
//! ```
//!
//! The interpreter and the lifecycle never talk to a transport directly.
//! The lifecycle consumes deltas through the [`DeltaSource`] trait, which
//! `lodestone_networking` implements for its replication bridge; tests
//! implement it with a plain in-memory store.
//!
//! All processing is single-threaded: one `interpret` and one `process`
//! call per tick, on the tick thread.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod gesture;
pub mod input;
pub mod scene;
pub mod tracking;
pub mod transform;

pub use gesture::{GestureConfig, GestureDelta, GestureInterpreter};
pub use input::{TouchPhase, TouchSample};
pub use scene::{HitResult, SceneQuery, StaticScene};
pub use tracking::{
    DeltaSource, LocalDeltaStore, MarkerEvents, MarkerId, MarkerLifecycle, TrackedMarker,
    TrackingState,
};
pub use transform::{apply_rotation, apply_scale};
