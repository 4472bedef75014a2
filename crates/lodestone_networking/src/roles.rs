//! Session roles.
//!
//! A peer is some combination of three predicates: does it hold the
//! canonical state (authority), is it a rendering participant (client),
//! and does it own the local input (controller). The four constructors
//! cover every combination the protocol supports.

/// Where a peer sits in the replication topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionRole {
    authority: bool,
    client: bool,
    local_controller: bool,
}

impl SessionRole {
    /// Listen server: authority, client and controller in one process.
    #[must_use]
    pub const fn host() -> Self {
        Self {
            authority: true,
            client: true,
            local_controller: true,
        }
    }

    /// Headless authority: holds canonical state, renders nothing,
    /// controls nothing.
    #[must_use]
    pub const fn dedicated_authority() -> Self {
        Self {
            authority: true,
            client: false,
            local_controller: false,
        }
    }

    /// The client whose local input drives the manipulation.
    #[must_use]
    pub const fn controlling_client() -> Self {
        Self {
            authority: false,
            client: true,
            local_controller: true,
        }
    }

    /// A client that only watches the replicated state.
    #[must_use]
    pub const fn observing_client() -> Self {
        Self {
            authority: false,
            client: true,
            local_controller: false,
        }
    }

    /// True when this peer holds the canonical, writable state.
    #[must_use]
    pub const fn is_authority(self) -> bool {
        self.authority
    }

    /// True when this peer renders and participates as a client.
    #[must_use]
    pub const fn is_client(self) -> bool {
        self.client
    }

    /// True when this peer's local input drives the manipulation.
    #[must_use]
    pub const fn is_local_controller(self) -> bool {
        self.local_controller
    }

    /// True for clients that are not the authority.
    #[must_use]
    pub const fn is_remote_client(self) -> bool {
        self.client && !self.authority
    }
}
