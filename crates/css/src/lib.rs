//! Selector parsing, normalization and cascade ranking behind one entry point.
//!
//! The heavy lifting lives in the module crates; this crate re-exports them
//! and adds the string-in, string-out helpers most callers want.

#![forbid(unsafe_code)]

use log::debug;
use std::sync::Arc;

pub use css_cascade::{
    CascadeError, CascadeItem, CascadePriority, Origin, PrecedenceLevel, PropertyConfig,
    PropertyTest, compare, compare_priority, sort_cascade, winner,
};
pub use css_selectors::{
    AttributeOperator, Combinator, Namespace, NthFormula, NthKeyword, PseudoExpression, Selector,
    SelectorError, Specificity, SpecificityType, Token, TokenKind, escape_identifier,
    escape_string, parse_selector, parse_selector_list, specificity_of_tokens, tokens_to_string,
};

/// Either half of the pipeline failing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error(transparent)]
    Cascade(#[from] CascadeError),
}

/// Parse a comma-separated selector list.
///
/// # Errors
/// Returns [`SelectorError`] if any group fails to parse.
pub fn parse(text: &str) -> Result<Vec<Selector>, SelectorError> {
    parse_selector_list(text)
}

/// Whether `text` is a selector list this crate understands.
pub fn is_valid(text: &str) -> bool {
    parse_selector_list(text).is_ok()
}

/// Canonical form of a selector list: every group re-serialized and joined
/// with `", "`.
///
/// # Errors
/// Returns [`SelectorError`] if any group fails to parse.
pub fn normalize(text: &str) -> Result<String, SelectorError> {
    let selectors = parse_selector_list(text)?;
    let normalized = selectors
        .iter()
        .map(Selector::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    debug!("normalized {text:?} to {normalized:?}");
    Ok(normalized)
}

/// Build a declaration for a single stylesheet selector.
///
/// # Errors
/// Returns [`Error::Selector`] if `selector_text` is not exactly one valid
/// selector, or [`Error::Cascade`] if `origin` is [`Origin::Inline`].
pub fn rule(selector_text: &str, origin: Origin, important: bool) -> Result<PropertyTest, Error> {
    let selector = parse_selector(selector_text)?;
    Ok(PropertyTest::try_new(
        origin,
        important,
        Some(Arc::new(selector)),
    )?)
}
