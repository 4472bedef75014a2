//! # LODESTONE
//!
//! Networked marker manipulation: touch gestures on one client rotate
//! and scale a tracked marker, synchronized through an authoritative
//! peer to every observer.
//!
//! ## Tick Order
//!
//! ```text
//! Tick N:
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. PUMP REPLICATION                                          │
//! │    └─ authority drains requests, observers refresh replicas  │
//! │                                                              │
//! │ 2. INTERPRET GESTURES (controller only)                      │
//! │    └─ drag → rotation, pinch → scale, tap → hit test         │
//! │                                                              │
//! │ 3. FLUSH                                                     │
//! │    └─ pending deltas go to the authority, fire-and-forget    │
//! │                                                              │
//! │ 4. MARKER LIFECYCLE (controller only)                        │
//! │    └─ consume deltas, apply clamped pose updates             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests that arrive mid-tick are observed at the start of the next
//! tick. Everything runs on the tick thread.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod events;
pub mod session;
pub mod tick;

pub use lodestone_core as core;
pub use lodestone_networking as net;
pub use lodestone_shared as shared;

pub use config::{ConfigError, SessionConfig};
pub use events::{EventBus, EventReceiver, EventSender, SessionEvent};
pub use session::{Session, SessionStats};
pub use tick::{TickDriver, TickTimings};
