#![forbid(unsafe_code)]

//! Commit payload: the serialized structure handed to a save backend.
//!
//! The payload is a plain nested document:
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "state_hash": 1234,
//!   "member_ids": ["fs-1", "fs-2"],
//!   "structure": {
//!     "label": "Structure",
//!     "nodes": [
//!       { "label": "Chapter 1", "nodes": [ { "proxy": "fs-1", "label": "p. 1" } ] },
//!       { "proxy": "fs-2", "label": "p. 2" }
//!     ]
//!   },
//!   "settings": { "viewing_direction": "left-to-right", ... }
//! }
//! ```
//!
//! `member_ids` is the new member order of the resource: every leaf's resource
//! in tree order. Node ids are session-local and never leave the process.

use serde::{Deserialize, Serialize};

use folio_core::{Node, NodeId, ResourceRef, TreeStore};
use folio_session::{EditorSession, ResourceSettings};

/// Current payload layout version.
pub const SCHEMA_VERSION: u32 = 1;

/// A group in the payload structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureGroup {
    pub label: String,
    pub nodes: Vec<StructureEntry>,
}

impl StructureGroup {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            nodes: Vec::new(),
        }
    }
}

/// One child in a payload group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureEntry {
    Group(StructureGroup),
    Leaf { proxy: ResourceRef, label: String },
}

/// Everything one commit saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPayload {
    pub schema_version: u32,
    /// Session state hash this payload was taken at.
    pub state_hash: u64,
    pub member_ids: Vec<ResourceRef>,
    pub structure: StructureGroup,
    pub settings: ResourceSettings,
}

impl CommitPayload {
    /// Snapshot `tree` and `settings` into a payload.
    #[must_use]
    pub fn from_tree(tree: &TreeStore, settings: &ResourceSettings) -> Self {
        let member_ids = tree.leaves().map(|leaf| leaf.resource.clone()).collect();
        Self {
            schema_version: SCHEMA_VERSION,
            state_hash: settings.state_hash(tree),
            member_ids,
            structure: build_structure(tree),
            settings: settings.clone(),
        }
    }

    /// Snapshot the current state of `session`.
    #[must_use]
    pub fn from_session(session: &EditorSession) -> Self {
        Self::from_tree(session.tree(), session.settings())
    }

    /// Number of leaves in the payload.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.member_ids.len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

struct Frame<'a> {
    children: &'a [NodeId],
    next: usize,
    group: StructureGroup,
}

fn build_structure(tree: &TreeStore) -> StructureGroup {
    let root = tree.root();
    let mut stack = vec![Frame {
        children: tree.children(root),
        next: 0,
        group: StructureGroup::new(tree.node(root).map_or("", Node::label)),
    }];

    loop {
        let Some(top) = stack.last_mut() else {
            // The root frame is only popped on the return path below.
            return StructureGroup::new("");
        };

        if let Some(&child) = top.children.get(top.next) {
            top.next += 1;
            match tree.node(child) {
                Some(Node::Leaf(leaf)) => top.group.nodes.push(StructureEntry::Leaf {
                    proxy: leaf.resource.clone(),
                    label: leaf.label.clone(),
                }),
                Some(Node::Group(group)) => stack.push(Frame {
                    children: &group.children,
                    next: 0,
                    group: StructureGroup::new(group.label.clone()),
                }),
                None => {}
            }
            continue;
        }

        let Some(done) = stack.pop() else {
            continue;
        };
        match stack.last_mut() {
            Some(parent) => parent.group.nodes.push(StructureEntry::Group(done.group)),
            None => return done.group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{GroupSeed, LeafSeed};
    use folio_session::{SessionConfig, ViewingDirection};

    fn session() -> EditorSession {
        let leaves = ["a", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(i, r)| LeafSeed::new(*r, format!("p. {}", i + 1)))
            .collect();
        let groups = vec![
            GroupSeed::new("Chapter 1")
                .leaf("a")
                .group(GroupSeed::new("Plates").leaf("b")),
        ];
        EditorSession::load(leaves, Some(groups), ResourceSettings::default(), SessionConfig::default()).unwrap()
    }

    #[test]
    fn nested_structure_mirrors_tree() {
        let payload = CommitPayload::from_session(&session());
        assert_eq!(payload.schema_version, SCHEMA_VERSION);
        assert_eq!(payload.structure.label, "Structure");
        assert_eq!(payload.structure.nodes.len(), 3);

        let StructureEntry::Group(chapter) = &payload.structure.nodes[0] else {
            panic!("expected group first");
        };
        assert_eq!(chapter.label, "Chapter 1");
        assert_eq!(
            chapter.nodes[0],
            StructureEntry::Leaf {
                proxy: ResourceRef::from("a"),
                label: "p. 1".into()
            }
        );
        let StructureEntry::Group(plates) = &chapter.nodes[1] else {
            panic!("expected nested group");
        };
        assert_eq!(plates.nodes.len(), 1);
    }

    #[test]
    fn member_ids_follow_tree_order() {
        let payload = CommitPayload::from_session(&session());
        let ids: Vec<_> = payload.member_ids.iter().map(ResourceRef::as_str).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(payload.leaf_count(), 4);
    }

    #[test]
    fn hash_matches_session() {
        let mut session = session();
        session.set_viewing_direction(ViewingDirection::RightToLeft).unwrap();
        let payload = CommitPayload::from_session(&session);
        assert_eq!(payload.state_hash, session.state_hash());
    }

    #[test]
    fn json_shape_uses_proxy_and_nodes() {
        let payload = CommitPayload::from_session(&session());
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(json["structure"]["nodes"][0]["label"], "Chapter 1");
        assert_eq!(json["structure"]["nodes"][0]["nodes"][0]["proxy"], "a");
        assert_eq!(json["structure"]["nodes"][2]["proxy"], "d");
        assert_eq!(json["member_ids"][3], "d");
        assert_eq!(json["settings"]["viewing_hint"], "individuals");

        let back = CommitPayload::from_json_str(&payload.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn deep_nesting_is_built_without_recursion() {
        let mut seed = GroupSeed::new("level 0").leaf("x");
        for depth in 1..500 {
            seed = GroupSeed::new(format!("level {depth}")).group(seed);
        }
        let tree = TreeStore::load(vec![LeafSeed::new("x", "")], Some(vec![seed])).unwrap();
        let payload = CommitPayload::from_tree(&tree, &ResourceSettings::default());
        assert_eq!(payload.member_ids, [ResourceRef::from("x")]);
    }
}
