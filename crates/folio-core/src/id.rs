#![forbid(unsafe_code)]

//! Node identifiers and resource references.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;

/// Stable identifier for a node in one structure tree.
///
/// `0` is reserved so ids are always non-zero. Ids are never reused inside a
/// session, which keeps clipboard and selection references unambiguous after
/// a node is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Lowest valid node id.
    pub const MIN: Self = Self(1);

    /// Create a node id, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, InvariantViolation> {
        if raw == 0 {
            return Err(InvariantViolation::ZeroNodeId);
        }
        Ok(Self(raw))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next id, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, InvariantViolation> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(InvariantViolation::IdOverflow { current: self });
        };
        Self::new(next)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdAllocator {
    next: NodeId,
}

impl NodeIdAllocator {
    /// Start allocating from a known id.
    #[must_use]
    pub const fn with_next(next: NodeId) -> Self {
        Self { next }
    }

    /// Peek at the next id without consuming it.
    #[must_use]
    pub const fn peek(&self) -> NodeId {
        self.next
    }

    /// Allocate the next id and advance.
    pub fn allocate(&mut self) -> Result<NodeId, InvariantViolation> {
        let current = self.next;
        self.next = self.next.checked_next()?;
        Ok(current)
    }
}

impl Default for NodeIdAllocator {
    fn default() -> Self {
        Self { next: NodeId::MIN }
    }
}

/// Opaque reference to the page/asset a leaf points at.
///
/// The engine never interprets the value; it is only compared for identity
/// and handed to the save backend and preview collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(String);

impl ResourceRef {
    /// Wrap an external resource identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceRef {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ResourceRef {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
