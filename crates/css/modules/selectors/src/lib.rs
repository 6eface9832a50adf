//! Selectors Level 3 — Selector token trees, specificity and serialization.
//! Spec: <https://www.w3.org/TR/selectors-3/>
//!
//! This module models selectors as data rather than matching them:
//! - A token tree per selector, readable from selector text or from the
//!   JSON node shapes of the selector grammar
//! - Specificity calculation (CSS2 a, b, c, d buckets)
//! - Canonical serialization with CSSOM identifier and string escaping
//!
//! Each function names the section of the W3C document it implements.

mod escape;
mod parser;
mod selector;
mod serialize;
mod specificity;
mod token;

// Re-export public API
pub use escape::{escape_identifier, escape_string};
pub use parser::{parse_selector, parse_selector_list};
pub use selector::Selector;
pub use serialize::tokens_to_string;
pub use specificity::{Specificity, specificity_of_tokens};
pub use token::{
    AttributeOperator, Combinator, Namespace, NthFormula, NthKeyword, PseudoExpression,
    SpecificityType, Token, TokenKind,
};

use core::str::FromStr;

/// Errors produced while building selectors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The token sequence (or its JSON form) is empty or malformed.
    #[error("invalid selector input: {0}")]
    InvalidInput(String),
    /// The selector text could not be parsed.
    #[error("selector parse error at {line}:{column}: {message}")]
    Parse {
        /// 1-based line.
        line: u32,
        /// 1-based column.
        column: u32,
        message: String,
    },
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_selector(text)
    }
}
