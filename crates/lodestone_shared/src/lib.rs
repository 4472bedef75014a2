//! # LODESTONE Shared
//!
//! Common types used by the controller, the authority, and every observer.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - channels or any transport crate
//! - engine or windowing types
//! - anything that does I/O
//!
//! If a type needs a channel, it belongs in `lodestone_networking`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    DEFAULT_MARKER_SCALE, EVENT_CHANNEL_CAPACITY, PINCH_SCALE_FACTOR, ROTATE_SPEED_MODIFIER,
    SCALE_MAX, SCALE_MIN, SYNC_CHANNEL_CAPACITY, TAP_SLOP, TICK_RATE,
};
pub use math::{MarkerTransform, Quaternion, Vec2, Vec3};
