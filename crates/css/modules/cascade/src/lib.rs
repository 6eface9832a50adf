//! CSS Cascading — origin, importance and specificity ordering of declarations.
//! Spec: <https://www.w3.org/TR/CSS2/cascade.html#cascade>
//!
//! Decides which of several declarations for the same element and property
//! wins, without matching anything against a document.

#![forbid(unsafe_code)]

mod comparator;
mod origin;
mod property;

pub use comparator::{
    CascadeItem, CascadePriority, compare, compare_priority, sort_cascade, winner,
};
pub use origin::{Origin, PrecedenceLevel};
pub use property::{PropertyConfig, PropertyTest};

/// Errors produced while ranking declarations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CascadeError {
    /// Origin, importance and selector do not describe a possible declaration.
    #[error("invalid cascade state: {0}")]
    InvalidState(String),
}
