#![forbid(unsafe_code)]

//! Resource-level presentation settings edited alongside the structure.

use serde::{Deserialize, Serialize};

use folio_core::{Fingerprint, ResourceRef, TreeStore};

/// Reading direction of the owning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewingDirection {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl ViewingDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "left-to-right",
            Self::RightToLeft => "right-to-left",
            Self::TopToBottom => "top-to-bottom",
            Self::BottomToTop => "bottom-to-top",
        }
    }
}

/// How a viewer should present the leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewingHint {
    #[default]
    Individuals,
    Paged,
    Continuous,
}

impl ViewingHint {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individuals => "individuals",
            Self::Paged => "paged",
            Self::Continuous => "continuous",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    pub viewing_direction: ViewingDirection,
    pub viewing_hint: ViewingHint,
    /// Leaf a viewer opens on.
    pub start_leaf: Option<ResourceRef>,
    /// Leaf used as the resource thumbnail.
    pub thumbnail: Option<ResourceRef>,
}

impl ResourceSettings {
    /// Forget start/thumbnail references to resources no longer in `tree`.
    ///
    /// Returns `true` if anything was cleared.
    pub fn retain_placed(&mut self, tree: &TreeStore) -> bool {
        let mut changed = false;
        for slot in [&mut self.start_leaf, &mut self.thumbnail] {
            if slot
                .as_ref()
                .is_some_and(|resource| tree.leaf_for_resource(resource).is_none())
            {
                *slot = None;
                changed = true;
            }
        }
        changed
    }

    /// Hash of `tree` together with these settings.
    ///
    /// This is the value a commit is keyed on.
    #[must_use]
    pub fn state_hash(&self, tree: &TreeStore) -> u64 {
        let mut hash = Fingerprint::new();
        hash.write_u64(tree.state_hash());
        self.fingerprint(&mut hash);
        hash.finish()
    }

    fn fingerprint(&self, hash: &mut Fingerprint) {
        hash.write_str(self.viewing_direction.as_str());
        hash.write_str(self.viewing_hint.as_str());
        for slot in [&self.start_leaf, &self.thumbnail] {
            match slot {
                Some(resource) => {
                    hash.write_tag(1);
                    hash.write_str(resource.as_str());
                }
                None => hash.write_tag(0),
            }
        }
    }
}
