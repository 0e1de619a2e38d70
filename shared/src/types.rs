use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Opaque identifier of an observer, handed out by the transport
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObserverKey(u64);

impl ObserverKey {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObserverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}

/// Stable identifier of a replicated entity and the channel it travels on
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ChannelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Delivery guarantee requested from the transport for a channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ChannelMode {
    #[default]
    Reliable,
    Unreliable,
}

impl ChannelMode {
    pub fn is_reliable(&self) -> bool {
        matches!(self, ChannelMode::Reliable)
    }
}

/// Which side of the replication protocol an entity plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleKind {
    /// Owns the canonical value and pushes diffs to observers
    Authority,
    /// Mirrors the value it receives from the authority
    Observer,
    /// Runs the authority in-process and notifies local handlers directly
    LocalSimulation,
}

impl RoleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RoleKind::Authority => "Authority",
            RoleKind::Observer => "Observer",
            RoleKind::LocalSimulation => "LocalSimulation",
        }
    }
}
