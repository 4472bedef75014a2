//! # LODESTONE Networking - The Replication Bridge
//!
//! Propagates locally-computed manipulation deltas from the controlling
//! client to an authority-held canonical state, and from there to every
//! passive observer.
//!
//! ## Topology
//!
//! ```text
//! CONTROLLER                    AUTHORITY                 OBSERVERS
//!     |                             |                         |
//!     |-- SetRotation(R) ---------->| last-writer-wins        |
//!     |-- SetScaleDelta(d) -------->| overwrite               |
//!     |                             |                         |
//!     |                             |-- Rotation(R) --------->| replica
//!     |                             |-- ScaleDelta(d) ------->| refresh
//! ```
//!
//! ## Guarantees (and non-guarantees)
//!
//! - Requests are one-way and fire-and-forget: a full channel drops the
//!   message silently. At-most-once, no retry, no compensation.
//! - The authority applies requests unconditionally in arrival order;
//!   the last writer wins.
//! - Canonical state is pushed outward per field, on change only.
//!   Observers read a possibly-stale copy.
//! - Everything runs on the owning peer's tick thread; channels are the
//!   only cross-peer surface.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod authority;
pub mod bridge;
pub mod channel;
pub mod observer;
pub mod roles;

pub use authority::{AuthorityNode, AuthorityStats, SyncState};
pub use bridge::{BridgeStats, FlushReport, ReplicationBridge};
pub use channel::{
    request_channel, update_channel, RequestReceiver, RequestSender, StateUpdate, SyncRequest,
    UpdateReceiver, UpdateSender,
};
pub use observer::ObserverReplica;
pub use roles::SessionRole;
