//! A single selector: its token sequence plus the values derived from it.

use crate::SelectorError;
use crate::serialize::tokens_to_string;
use crate::specificity::{Specificity, specificity_of_tokens};
use crate::token::{Token, TokenKind};
use core::fmt;
use log::trace;

/// One complex selector.
///
/// Specificity and canonical text are recomputed whenever the tokens are
/// replaced, so they never disagree with the tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Top-level compound/combinator sequence.
    tokens: Vec<Token>,
    /// Cached specificity of `tokens`.
    specificity: Specificity,
    /// Cached canonical serialization of `tokens`.
    text: String,
}

impl Selector {
    /// Build a selector from a token sequence.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidInput`] if the sequence is empty or malformed.
    pub fn new(tokens: Vec<Token>) -> Result<Self, SelectorError> {
        validate_sequence(&tokens, false)?;
        let specificity = specificity_of_tokens(&tokens);
        let text = tokens_to_string(&tokens);
        trace!("selector `{text}` has specificity {specificity}");
        Ok(Self {
            tokens,
            specificity,
            text,
        })
    }

    /// Build a selector from a JSON token array as emitted by the selector grammar.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidInput`] if the JSON is not a well-formed token
    /// array, or if the tokens do not form a valid selector.
    pub fn from_json(json: &str) -> Result<Self, SelectorError> {
        let tokens: Vec<Token> = serde_json::from_str(json)
            .map_err(|err| SelectorError::InvalidInput(format!("bad token tree: {err}")))?;
        Self::new(tokens)
    }

    /// Replace the token sequence. On error the selector is left unchanged.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidInput`] under the same conditions as [`Selector::new`].
    pub fn set_tokens(&mut self, tokens: Vec<Token>) -> Result<(), SelectorError> {
        *self = Self::new(tokens)?;
        Ok(())
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    #[inline]
    pub const fn specificity(&self) -> Specificity {
        self.specificity
    }

    #[inline]
    /// Canonical selector text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.text)
    }
}

impl TryFrom<Vec<Token>> for Selector {
    type Error = SelectorError;

    fn try_from(tokens: Vec<Token>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

fn invalid(reason: &str) -> SelectorError {
    SelectorError::InvalidInput(reason.to_owned())
}

/// Check that `tokens` alternates compounds and single combinators, and that
/// every simple selector has its required fields. `:not()` takes a compound only.
fn validate_sequence(tokens: &[Token], negated: bool) -> Result<(), SelectorError> {
    if tokens.is_empty() {
        return Err(invalid(if negated {
            ":not() requires at least one simple selector"
        } else {
            "expected a non-empty token sequence"
        }));
    }
    let mut after_combinator = true;
    for token in tokens {
        if token.kind.combinator().is_some() {
            if negated {
                return Err(invalid("combinators are not allowed inside :not()"));
            }
            if after_combinator {
                return Err(invalid("combinator without a preceding compound selector"));
            }
            after_combinator = true;
        } else {
            validate_simple(&token.kind)?;
            after_combinator = false;
        }
    }
    if after_combinator {
        return Err(invalid("combinator without a following compound selector"));
    }
    Ok(())
}

fn validate_simple(kind: &TokenKind) -> Result<(), SelectorError> {
    let name = match kind {
        TokenKind::Universal { .. } => return Ok(()),
        TokenKind::Negation { tokens } => return validate_sequence(tokens, true),
        TokenKind::Type { name, .. }
        | TokenKind::Id { name }
        | TokenKind::Class { name }
        | TokenKind::AttributePresence { name, .. }
        | TokenKind::AttributeValue { name, .. }
        | TokenKind::PseudoElement { name }
        | TokenKind::PseudoClass { name, .. } => name,
        TokenKind::DescendantCombinator
        | TokenKind::ChildCombinator
        | TokenKind::AdjacentSiblingCombinator
        | TokenKind::GeneralSiblingCombinator => return Ok(()),
    };
    if name.is_empty() {
        return Err(invalid("simple selector is missing its name"));
    }
    Ok(())
}
