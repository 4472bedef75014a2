//! Tracked-marker lifecycle.
//!
//! The tracking collaborator reports three disjoint sequences per tick:
//! markers that appeared, markers that were updated, and markers that
//! were removed. The lifecycle gives new markers their default scale,
//! applies consumed manipulation deltas to updated markers, and drops
//! the saved pose of removed markers.
//!
//! Saved rotation and scale are captured on the first tracked update and
//! carried here explicitly; the marker's live transform is written from
//! the saved values, never read back for composition.

use std::collections::HashMap;

use lodestone_shared::{MarkerTransform, Quaternion, Vec3};

use crate::transform::{apply_rotation, apply_scale};

/// Stable identifier for a tracked marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Tracking quality reported by the collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingState {
    /// The marker is not currently detected.
    #[default]
    None,
    /// The marker is detected with degraded confidence.
    Limited,
    /// The marker is fully tracked.
    Tracking,
}

impl TrackingState {
    /// True when pose updates should be applied.
    ///
    /// `Limited` still counts as tracked; only `None` suspends updates.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// One tracked marker as reported by the collaborator.
///
/// The transform is mutable: the lifecycle writes the manipulated pose
/// back into it and the host reads it out after the tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedMarker {
    /// Marker identity.
    pub id: MarkerId,
    /// Live pose; mutated once per tick.
    pub transform: MarkerTransform,
    /// Tracking quality this tick.
    pub tracking: TrackingState,
}

impl TrackedMarker {
    /// Creates a marker with the given id and pose.
    #[must_use]
    pub const fn new(id: MarkerId, transform: MarkerTransform, tracking: TrackingState) -> Self {
        Self {
            id,
            transform,
            tracking,
        }
    }
}

/// Per-tick notification from the tracking collaborator.
#[derive(Clone, Debug, Default)]
pub struct MarkerEvents {
    /// Markers detected for the first time this tick.
    pub added: Vec<TrackedMarker>,
    /// Markers whose pose was refreshed this tick.
    pub updated: Vec<TrackedMarker>,
    /// Markers that disappeared this tick.
    pub removed: Vec<MarkerId>,
}

impl MarkerEvents {
    /// Notification with no changes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Source of consumable manipulation deltas.
///
/// Implemented by the replication bridge in `lodestone_networking` and
/// by [`LocalDeltaStore`] for non-networked use. Consumption is one-shot:
/// each call returns the pending value and resets it, so a tick without
/// new gestures observes identity/zero.
pub trait DeltaSource {
    /// Returns the pending rotation delta and resets it to identity.
    fn consume_rotation(&mut self) -> Quaternion;

    /// Returns the pending scale delta and resets it to zero.
    fn consume_scale_delta(&mut self) -> f32;
}

/// Plain in-memory delta store.
///
/// The single-player counterpart of the replication bridge: gestures are
/// staged directly and consumed by the lifecycle on the same peer.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalDeltaStore {
    rotation: Quaternion,
    scale_delta: f32,
}

impl LocalDeltaStore {
    /// Creates an empty store (identity rotation, zero scale delta).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pending rotation.
    pub fn stage_rotation(&mut self, rotation: Quaternion) {
        self.rotation = rotation;
    }

    /// Replaces the pending scale delta.
    pub fn stage_scale_delta(&mut self, delta: f32) {
        self.scale_delta = delta;
    }
}

impl DeltaSource for LocalDeltaStore {
    fn consume_rotation(&mut self) -> Quaternion {
        std::mem::replace(&mut self.rotation, Quaternion::IDENTITY)
    }

    fn consume_scale_delta(&mut self) -> f32 {
        std::mem::replace(&mut self.scale_delta, 0.0)
    }
}

/// Saved pose carried across ticks for one marker.
#[derive(Clone, Copy, Debug)]
struct SavedPose {
    rotation: Quaternion,
    scale: Vec3,
}

/// Applies manipulation deltas to tracked markers.
pub struct MarkerLifecycle {
    default_scale: Vec3,
    saved: HashMap<MarkerId, SavedPose>,
}

impl MarkerLifecycle {
    /// Creates a lifecycle giving new markers a uniform default scale.
    #[must_use]
    pub fn new(default_scale: f32) -> Self {
        Self {
            default_scale: Vec3::splat(default_scale),
            saved: HashMap::new(),
        }
    }

    /// Processes one tick's notification.
    ///
    /// Added markers get the default scale. Updated markers, while
    /// tracked, consume the pending deltas: the scale delta (if any) is
    /// applied to the saved scale, the rotation is composed onto the
    /// saved rotation, and both results are written to the live
    /// transform. Removed markers drop their saved pose.
    pub fn process<D: DeltaSource>(&mut self, events: &mut MarkerEvents, deltas: &mut D) {
        for marker in &mut events.added {
            marker.transform.scale = self.default_scale;
        }

        for marker in &mut events.updated {
            self.update_marker(marker, deltas);
        }

        for id in &events.removed {
            if self.saved.remove(id).is_some() {
                tracing::debug!(marker = id.0, "dropped saved pose for removed marker");
            }
        }
    }

    fn update_marker<D: DeltaSource>(&mut self, marker: &mut TrackedMarker, deltas: &mut D) {
        if !marker.tracking.is_tracked() {
            tracing::trace!(marker = marker.id.0, "tracking lost, skipping update");
            return;
        }

        let saved = self.saved.entry(marker.id).or_insert(SavedPose {
            rotation: marker.transform.rotation,
            scale: marker.transform.scale,
        });

        let scale_delta = deltas.consume_scale_delta();
        if scale_delta != 0.0 {
            let scaled = apply_scale(saved.scale, scale_delta);
            marker.transform.scale = scaled;
            saved.scale = scaled;
        }

        let rotation_delta = deltas.consume_rotation();
        let rotated = apply_rotation(saved.rotation, rotation_delta);
        marker.transform.rotation = rotated;
        saved.rotation = rotated;
    }

    /// Number of markers with a saved pose.
    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// True when a saved pose exists for `id`.
    #[must_use]
    pub fn has_saved(&self, id: MarkerId) -> bool {
        self.saved.contains_key(&id)
    }
}
