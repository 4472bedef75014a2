//! Gesture interpretation.
//!
//! Converts the current tick's touch samples into at most one
//! manipulation delta:
//!
//! - one finger dragging horizontally rotates about the vertical axis
//! - one finger down-and-up in place is a tap
//! - two fingers pinching produce a scalar scale delta
//!
//! Zero touches or more than two produce nothing.

use lodestone_shared::{Quaternion, Vec2, PINCH_SCALE_FACTOR, ROTATE_SPEED_MODIFIER, TAP_SLOP};

use crate::input::{TouchPhase, TouchSample};

/// Tuning for the interpreter.
#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    /// Degrees of yaw per screen unit of horizontal drag.
    pub rotate_speed_modifier: f32,
    /// Multiplier applied to the pinch distance difference.
    pub pinch_scale_factor: f32,
    /// Maximum movement between `Began` and `Ended` that still counts
    /// as a tap.
    pub tap_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            rotate_speed_modifier: ROTATE_SPEED_MODIFIER,
            pinch_scale_factor: PINCH_SCALE_FACTOR,
            tap_slop: TAP_SLOP,
        }
    }
}

/// One manipulation delta, produced at most once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureDelta {
    /// Incremental rotation about the vertical axis.
    Rotate(Quaternion),
    /// Incremental scalar scale change.
    Scale(f32),
    /// The finger went down and up without moving; the session should
    /// hit-test this screen position.
    Tap(Vec2),
}

/// Stateful single/two-finger gesture interpreter.
///
/// The only state carried across ticks is the start position of the
/// current single-finger touch, used for tap detection.
#[derive(Clone, Copy, Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    start_position: Option<Vec2>,
}

impl GestureInterpreter {
    /// Creates an interpreter with the given tuning.
    #[must_use]
    pub const fn new(config: GestureConfig) -> Self {
        Self {
            config,
            start_position: None,
        }
    }

    /// Interprets the current tick's touches.
    ///
    /// Returns at most one delta. Exactly one touch is handled as
    /// drag/tap; exactly two as a pinch; anything else is ignored.
    pub fn interpret(&mut self, touches: &[TouchSample]) -> Option<GestureDelta> {
        match touches {
            [touch] => self.single_touch(touch),
            [first, second] => Some(GestureDelta::Scale(pinch_delta(
                first,
                second,
                self.config.pinch_scale_factor,
            ))),
            _ => None,
        }
    }

    fn single_touch(&mut self, touch: &TouchSample) -> Option<GestureDelta> {
        match touch.phase {
            TouchPhase::Began => {
                self.start_position = Some(touch.position);
                None
            }
            TouchPhase::Moved => {
                let yaw = -touch.delta().x * self.config.rotate_speed_modifier;
                let rotation = Quaternion::from_yaw_degrees(yaw);
                tracing::trace!(yaw, "drag rotation");
                Some(GestureDelta::Rotate(rotation))
            }
            TouchPhase::Ended => {
                let start = self.start_position.take()?;
                if touch.position.distance(start) <= self.config.tap_slop {
                    Some(GestureDelta::Tap(touch.position))
                } else {
                    None
                }
            }
        }
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

/// Scale delta for a two-finger pinch.
///
/// The separation of the two fingers is compared between the previous
/// and the current frame; the difference is scaled by `factor`.
fn pinch_delta(first: &TouchSample, second: &TouchSample, factor: f32) -> f32 {
    let previous_distance = first.previous_position.distance(second.previous_position);
    let current_distance = first.position.distance(second.position);
    (previous_distance - current_distance) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> GestureInterpreter {
        GestureInterpreter::default()
    }

    #[test]
    fn test_drag_rotates_about_vertical_axis() {
        let mut gestures = interpreter();
        let touch = TouchSample::moved(0, Vec2::new(150.0, 40.0), Vec2::new(100.0, 40.0));

        let delta = gestures.interpret(&[touch]).unwrap();
        let GestureDelta::Rotate(rotation) = delta else {
            panic!("expected a rotation");
        };
        // dx = 50, modifier = 0.2 => -10 degrees of yaw
        assert!((rotation.yaw_degrees() - (-10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_began_produces_nothing() {
        let mut gestures = interpreter();
        let touch = TouchSample::began(0, Vec2::new(10.0, 10.0));
        assert_eq!(gestures.interpret(&[touch]), None);
    }

    #[test]
    fn test_tap_requires_stationary_finger() {
        let mut gestures = interpreter();
        let down = TouchSample::began(0, Vec2::new(10.0, 10.0));
        assert_eq!(gestures.interpret(&[down]), None);

        let up = TouchSample::ended(0, Vec2::new(10.0, 10.0));
        assert_eq!(
            gestures.interpret(&[up]),
            Some(GestureDelta::Tap(Vec2::new(10.0, 10.0)))
        );
    }

    #[test]
    fn test_moved_finger_is_not_a_tap() {
        let mut gestures = interpreter();
        let down = TouchSample::began(0, Vec2::new(10.0, 10.0));
        assert_eq!(gestures.interpret(&[down]), None);

        let up = TouchSample::ended(0, Vec2::new(10.0, 11.0));
        assert_eq!(gestures.interpret(&[up]), None);
    }

    #[test]
    fn test_ended_without_began_is_not_a_tap() {
        let mut gestures = interpreter();
        let up = TouchSample::ended(0, Vec2::new(10.0, 10.0));
        assert_eq!(gestures.interpret(&[up]), None);
    }

    #[test]
    fn test_pinch_closing_shrinks() {
        let mut gestures = interpreter();
        // Separation goes from 100 to 80.
        let first = TouchSample::moved(0, Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0));
        let second = TouchSample::moved(1, Vec2::new(80.0, 0.0), Vec2::new(100.0, 0.0));

        let delta = gestures.interpret(&[first, second]).unwrap();
        let GestureDelta::Scale(amount) = delta else {
            panic!("expected a scale delta");
        };
        // (100 - 80) * -0.0001 = -0.002
        assert!((amount - (-0.002)).abs() < 1e-7);
    }

    #[test]
    fn test_pinch_opening_grows() {
        let mut gestures = interpreter();
        let first = TouchSample::moved(0, Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0));
        let second = TouchSample::moved(1, Vec2::new(120.0, 0.0), Vec2::new(100.0, 0.0));

        let delta = gestures.interpret(&[first, second]).unwrap();
        let GestureDelta::Scale(amount) = delta else {
            panic!("expected a scale delta");
        };
        assert!(amount > 0.0);
    }

    #[test]
    fn test_no_touches_produces_nothing() {
        let mut gestures = interpreter();
        assert_eq!(gestures.interpret(&[]), None);
    }

    #[test]
    fn test_three_touches_produce_nothing() {
        let mut gestures = interpreter();
        let touches = [
            TouchSample::began(0, Vec2::ZERO),
            TouchSample::began(1, Vec2::new(10.0, 0.0)),
            TouchSample::began(2, Vec2::new(20.0, 0.0)),
        ];
        assert_eq!(gestures.interpret(&touches), None);
    }
}
