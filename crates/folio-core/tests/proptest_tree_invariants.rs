#![forbid(unsafe_code)]

//! Property tests for [`TreeStore`] invariants.
//!
//! Validates:
//! - Random move sequences never change the set of leaf resources.
//! - Every accepted or rejected operation leaves a tree that validates.
//! - Rejected operations leave the tree byte-for-byte unchanged.
//! - Multi-node moves keep the relative tree order of the moved nodes.

use std::collections::BTreeSet;

use proptest::prelude::*;

use folio_core::{GroupSeed, LeafSeed, NodeId, TreeStore};

// ============================================================================
// Strategy helpers
// ============================================================================

/// Operations addressed by index into the current preorder, so that
/// generated values stay meaningful as the tree changes.
#[derive(Debug, Clone)]
enum Op {
    MoveUp(usize),
    MoveDown(usize),
    Move {
        picks: Vec<usize>,
        target: usize,
        index: usize,
    },
    CreateGroup(usize),
    Collapse(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<usize>().prop_map(Op::MoveUp),
        3 => any::<usize>().prop_map(Op::MoveDown),
        4 => (prop::collection::vec(any::<usize>(), 1..4), any::<usize>(), 0usize..6)
            .prop_map(|(picks, target, index)| Op::Move { picks, target, index }),
        1 => any::<usize>().prop_map(Op::CreateGroup),
        1 => any::<usize>().prop_map(Op::Collapse),
    ]
}

fn sample_tree(leaf_count: usize) -> TreeStore {
    let leaves: Vec<LeafSeed> = (0..leaf_count)
        .map(|i| LeafSeed::new(format!("fs-{i}"), format!("p. {}", i + 1)))
        .collect();
    let groups = if leaf_count >= 4 {
        Some(vec![
            GroupSeed::new("Chapter 1")
                .leaf("fs-1")
                .group(GroupSeed::new("Plates").leaf("fs-2")),
        ])
    } else {
        None
    };
    TreeStore::load(leaves, groups).unwrap()
}

fn pick(tree: &TreeStore, raw: usize) -> NodeId {
    let ids: Vec<NodeId> = tree.preorder().map(|v| v.id).collect();
    ids[raw % ids.len()]
}

fn resource_set(tree: &TreeStore) -> BTreeSet<String> {
    tree.leaves().map(|leaf| leaf.resource.to_string()).collect()
}

fn apply(tree: &mut TreeStore, op: &Op) {
    match op {
        Op::MoveUp(raw) => {
            let id = pick(tree, *raw);
            let _ = tree.move_up(&[id]);
        }
        Op::MoveDown(raw) => {
            let id = pick(tree, *raw);
            let _ = tree.move_down(&[id]);
        }
        Op::Move {
            picks,
            target,
            index,
        } => {
            let ids: Vec<NodeId> = picks.iter().map(|raw| pick(tree, *raw)).collect();
            let target = pick(tree, *target);
            let _ = tree.move_nodes(&ids, target, *index);
        }
        Op::CreateGroup(raw) => {
            let parent = pick(tree, *raw);
            let _ = tree.create_group(parent);
        }
        Op::Collapse(raw) => {
            let id = pick(tree, *raw);
            let _ = tree.toggle_expanded(id);
        }
    }
}

// ============================================================================
// Invariant 1: Leaf set is preserved
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn leaf_set_survives_random_edits(
        leaf_count in 1usize..12,
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let mut tree = sample_tree(leaf_count);
        let before = resource_set(&tree);

        for op in &ops {
            apply(&mut tree, op);
            prop_assert!(tree.validate().is_ok());
            prop_assert_eq!(tree.leaf_count(), leaf_count);
        }

        prop_assert_eq!(resource_set(&tree), before);
    }
}

// ============================================================================
// Invariant 2: Rejected operations do not touch the tree
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn rejected_move_is_noop(
        leaf_count in 4usize..10,
        picks in prop::collection::vec(any::<usize>(), 1..4),
        index in 0usize..20
    ) {
        let mut tree = sample_tree(leaf_count);
        let ids: Vec<NodeId> = picks.iter().map(|raw| pick(&tree, *raw)).collect();
        // Moving into the first picked node always fails: either it is a leaf
        // or it is itself being moved.
        let target = ids[0];
        let before = tree.clone();
        let hash = tree.state_hash();

        prop_assert!(tree.move_nodes(&ids, target, index).is_err());
        prop_assert_eq!(&tree, &before);
        prop_assert_eq!(tree.state_hash(), hash);
    }
}

// ============================================================================
// Invariant 3: Multi-node moves keep relative tree order
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn moved_leaves_keep_tree_order(
        leaf_count in 2usize..12,
        mask in prop::collection::vec(any::<bool>(), 12)
    ) {
        let mut tree = TreeStore::load(
            (0..leaf_count).map(|i| LeafSeed::new(format!("fs-{i}"), "")).collect(),
            None,
        ).unwrap();
        let root = tree.root();
        let group = tree.create_group_at(root, leaf_count).unwrap();

        let leaves = tree.leaves_in_order();
        let chosen: Vec<NodeId> = leaves
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(id, _)| *id)
            .collect();
        prop_assume!(!chosen.is_empty());

        let mut shuffled = chosen.clone();
        shuffled.reverse();
        tree.move_nodes(&shuffled, group, 0).unwrap();

        prop_assert_eq!(tree.children(group), chosen.as_slice());
    }
}
