#![forbid(unsafe_code)]

//! Leaf labeling for Folio structures.
//!
//! [`label_sequence`] maps an ordered run of leaves and a [`LabelScheme`] to
//! display labels: plain pagination, recto/verso foliation, two-up spreads,
//! and bracketed (supplied) numbering. Generation has no side effects; writing
//! labels onto the tree is a separate apply step owned by the session.

pub mod generator;
pub mod scheme;

pub use generator::{Labels, label_sequence};
pub use scheme::{
    BracketLocation, FOLIO_PREFIX, LabelMethod, LabelScheme, SchemeError, StartWith, TwoUpDirection,
};
