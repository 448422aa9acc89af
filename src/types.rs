//! Core types shared across the namespace engine and its adapters.

use chrono::{DateTime, Duration, Utc};

/// Timestamp carried by every node (created / modified).
pub type Timestamp = DateTime<Utc>;

/// NodeId: stable handle of a node slot inside the tree arena.
///
/// Handles are never reused after a node is deleted, so a stale handle
/// resolves to nothing instead of aliasing a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw slot index
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Current wall-clock time.
pub fn now() -> Timestamp {
    Utc::now()
}

/// A timestamp strictly later than `previous`.
///
/// Uses the wall clock when it has moved past `previous`, otherwise steps
/// one nanosecond forward.
pub fn next_after(previous: Timestamp) -> Timestamp {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::nanoseconds(1)
    }
}
