//! Style identity
//!
//! Cells are styled attribute by attribute, but the document format defines
//! each style once and references it by name. [`StyleKey`] is the part of a
//! cell that decides which emitted style it can share.

mod key;

pub use key::{ConditionalKey, DataStyleKind, StyleKey};
