//! Scene query seam.
//!
//! Tap handling needs to ask the host scene "what is under this screen
//! position?". The session only sees this trait; the host implements it
//! against its raycast machinery, and tests use [`StaticScene`].

use lodestone_shared::Vec2;

/// Result of a successful hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HitResult {
    /// Name of the object that was hit.
    pub name: String,
}

/// Interface to the host's scene raycast.
pub trait SceneQuery {
    /// Returns the object under `point`, if any.
    fn hit_test(&self, point: Vec2) -> Option<HitResult>;
}

/// A fixed set of circular screen-space targets.
///
/// Test and demo double for [`SceneQuery`]: an object is hit when the
/// query point lies within its radius. Objects are checked in insertion
/// order and the first hit wins.
#[derive(Clone, Debug, Default)]
pub struct StaticScene {
    objects: Vec<SceneObject>,
}

#[derive(Clone, Debug)]
struct SceneObject {
    name: String,
    center: Vec2,
    radius: f32,
}

impl StaticScene {
    /// Creates an empty scene; every hit test misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a circular target.
    pub fn add(&mut self, name: impl Into<String>, center: Vec2, radius: f32) {
        self.objects.push(SceneObject {
            name: name.into(),
            center,
            radius,
        });
    }

    /// Builder-style [`StaticScene::add`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, center: Vec2, radius: f32) -> Self {
        self.add(name, center, radius);
        self
    }
}

impl SceneQuery for StaticScene {
    fn hit_test(&self, point: Vec2) -> Option<HitResult> {
        self.objects
            .iter()
            .find(|object| point.distance(object.center) <= object.radius)
            .map(|object| HitResult {
                name: object.name.clone(),
            })
    }
}
