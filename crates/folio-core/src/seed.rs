#![forbid(unsafe_code)]

//! Session-start input: the ordered member list and optional prior grouping.
//!
//! The grouping shape matches the saved structure payload (`label` + `nodes`
//! for groups, `proxy` for leaves) so a committed structure can seed the next
//! session unchanged.

use serde::{Deserialize, Serialize};

use crate::id::ResourceRef;

/// One member of the owning resource, in its stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafSeed {
    pub resource: ResourceRef,
    #[serde(default)]
    pub label: String,
}

impl LeafSeed {
    #[must_use]
    pub fn new(resource: impl Into<ResourceRef>, label: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            label: label.into(),
        }
    }
}

/// A pre-existing group (range) and its ordered entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSeed {
    pub label: String,
    #[serde(rename = "nodes")]
    pub children: Vec<SeedEntry>,
}

impl GroupSeed {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Append a leaf reference.
    #[must_use]
    pub fn leaf(mut self, resource: impl Into<ResourceRef>) -> Self {
        self.children.push(SeedEntry::leaf(resource));
        self
    }

    /// Append a nested group.
    #[must_use]
    pub fn group(mut self, group: GroupSeed) -> Self {
        self.children.push(SeedEntry::Group(group));
        self
    }
}

/// Entry inside a seeded group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedEntry {
    Group(GroupSeed),
    Leaf { proxy: ResourceRef },
}

impl SeedEntry {
    #[must_use]
    pub fn leaf(resource: impl Into<ResourceRef>) -> Self {
        Self::Leaf {
            proxy: resource.into(),
        }
    }
}
