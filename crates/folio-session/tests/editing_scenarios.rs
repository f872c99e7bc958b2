#![forbid(unsafe_code)]

//! End-to-end editing scenarios through the public session API.
//!
//! Run:
//!   cargo test -p folio-session --test editing_scenarios

use folio_core::{GroupSeed, LeafSeed, NodeId, ResourceRef, TreeStore};
use folio_label::LabelScheme;
use folio_session::{
    EditorSession, PastePosition, ResourceSettings, SessionConfig, SessionError, Selection, project,
};

fn session(resources: &[&str], groups: Option<Vec<GroupSeed>>) -> EditorSession {
    let leaves = resources.iter().map(|r| LeafSeed::new(*r, "")).collect();
    EditorSession::load(leaves, groups, ResourceSettings::default(), SessionConfig::default()).unwrap()
}

fn leaf(session: &EditorSession, r: &str) -> NodeId {
    session.tree().leaf_for_resource(&ResourceRef::from(r)).unwrap()
}

// ============================================================================
// Cut/paste matches the equivalent move
// ============================================================================

#[test]
fn cut_paste_after_equals_move_after_target() {
    let groups = vec![GroupSeed::new("G").leaf("b").leaf("c")];
    let mut pasted = session(&["a", "b", "c", "d"], Some(groups));
    let mut moved = EditorSession::new(pasted.tree().clone(), ResourceSettings::default(), SessionConfig::default());

    let (x, y) = (leaf(&pasted, "d"), leaf(&pasted, "b"));
    pasted.cut_nodes(&[x]).unwrap();
    pasted.paste(y, PastePosition::After).unwrap();

    let parent = moved.tree().parent_of(y).unwrap();
    let index = moved.tree().index_of(y).unwrap() + 1;
    moved.move_nodes(&[x], parent, index).unwrap();

    assert_eq!(pasted.tree(), moved.tree());
    assert_eq!(pasted.state_hash(), moved.state_hash());
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn grouping_two_top_level_leaves() {
    let mut s = session(&["l1", "l2", "l3"], None);
    let root = s.tree().root();
    let (l1, l2) = (leaf(&s, "l1"), leaf(&s, "l2"));
    s.select(l2, false).unwrap();
    s.select(l1, true).unwrap();

    let group = s.group_selection().unwrap();

    let groups: Vec<_> = s.tree().preorder().filter(|v| v.node.is_group() && v.id != root).collect();
    assert_eq!(groups.len(), 1);
    assert_eq!(s.tree().children(group), [l1, l2]);

    let cards = project(s.tree(), s.selection(), s.clipboard());
    let top_level: Vec<_> = cards.iter().filter(|c| c.parent == root).map(|c| c.node).collect();
    assert_eq!(top_level, [leaf(&s, "l3")]);
}

// ============================================================================
// Stale clipboard
// ============================================================================

#[test]
fn stale_paste_reports_and_leaves_tree_as_after_delete() {
    let groups = vec![GroupSeed::new("G").leaf("x")];
    let mut s = session(&["x", "y", "z"], Some(groups));
    let x = leaf(&s, "x");
    let y = leaf(&s, "y");
    let group = s.tree().parent_of(x).unwrap();

    s.cut_nodes(&[x, y]).unwrap();
    s.delete_group(group).unwrap();
    let after_delete: TreeStore = s.tree().clone();
    let hash = s.state_hash();

    let err = s.paste(leaf(&s, "z"), PastePosition::After).unwrap_err();
    assert_eq!(err, SessionError::ClipboardStale { missing: vec![x] });
    assert_eq!(s.state_hash(), hash);
    assert!(s.clipboard().is_empty());
    // The surviving cut node is released.
    assert!(!s.tree().node(y).unwrap().is_disabled());

    let mut released = after_delete;
    released.clear_disabled();
    assert_eq!(s.tree(), &released);
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn label_preview_ignores_click_order() {
    let mut s = session(&["a", "b", "c", "d"], None);
    for r in ["d", "b", "a", "c"] {
        s.select(leaf(&s, r), true).unwrap();
    }
    let preview = s.preview_labels(&LabelScheme::paginated("p.", 10)).unwrap();
    let labels: Vec<_> = preview.iter().map(|(_, label)| label.to_string()).collect();
    assert_eq!(labels, ["p.10", "p.11", "p.12", "p.13"]);
    assert_eq!(preview.leaves()[0], leaf(&s, "a"));
}

#[test]
fn two_up_labels_apply_to_both_leaves() {
    let mut s = session(&["a", "b"], None);
    s.select_all(None).unwrap();
    let preview = s.preview_labels(&LabelScheme::foliated(10).with_two_up("-")).unwrap();
    s.apply_labels(&preview).unwrap();
    let labels: Vec<_> = s.tree().leaves().map(|l| l.label.clone()).collect();
    assert_eq!(labels, ["f. 10r.-10v.", "f. 10r.-10v."]);
}

#[test]
fn empty_selection_cannot_be_labelled() {
    let s = session(&["a"], None);
    assert!(s.preview_labels(&LabelScheme::default()).is_err());
    assert_eq!(s.selection(), &Selection::new());
}

// ============================================================================
// Undo
// ============================================================================

#[test]
fn undo_walks_back_through_every_edit() {
    let mut s = session(&["a", "b", "c"], None);
    let mut hashes = vec![s.state_hash()];

    let root = s.tree().root();
    let group = s.create_group(root, None).unwrap();
    hashes.push(s.state_hash());
    s.move_nodes(&[leaf(&s, "c")], group, 0).unwrap();
    hashes.push(s.state_hash());
    s.rename_group(group, "Plates").unwrap();
    hashes.push(s.state_hash());

    hashes.pop();
    while let Some(expected) = hashes.pop() {
        assert!(s.undo());
        assert_eq!(s.state_hash(), expected);
    }
    assert!(!s.undo());
    assert!(!s.has_unsaved_changes());
}

#[test]
fn undo_prunes_selection_of_vanished_nodes() {
    let mut s = session(&["a"], None);
    let root = s.tree().root();
    let group = s.create_group(root, None).unwrap();
    s.select(group, false).unwrap();
    assert!(s.undo());
    assert!(s.selection().is_empty());
}

#[test]
fn recreating_the_committed_structure_is_not_an_unsaved_change() {
    let mut s = session(&["a", "b"], Some(vec![GroupSeed::new("Untitled")]));
    s.mark_committed(s.state_hash());
    let root = s.tree().root();
    let seeded = s.tree().children(root)[0];

    s.delete_group(seeded).unwrap();
    assert!(s.has_unsaved_changes());
    s.create_group(root, Some(0)).unwrap();
    assert!(!s.has_unsaved_changes());
}
