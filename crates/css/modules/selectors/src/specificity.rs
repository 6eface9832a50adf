//! CSS selector specificity calculation.
//! Spec: <https://www.w3.org/TR/CSS2/cascade.html#specificity>

use crate::token::{SpecificityType, Token, TokenKind};
use core::fmt;

/// Specificity tuple (a, b, c, d). Field order gives the lexicographic ordering.
/// Spec: CSS2 Section 6.4.3 — Calculating a selector's specificity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    /// `a`: 1 for a style attribute, 0 otherwise.
    pub inline: u32,
    /// `b`: number of ID selectors.
    pub ids: u32,
    /// `c`: number of class, attribute and pseudo-class selectors.
    pub classes: u32,
    /// `d`: number of type selectors and pseudo-elements.
    pub types: u32,
}

impl Specificity {
    /// Specificity of a declaration in a style attribute.
    pub const INLINE: Self = Self::new(1, 0, 0, 0);

    #[inline]
    pub const fn new(inline: u32, ids: u32, classes: u32, types: u32) -> Self {
        Self {
            inline,
            ids,
            classes,
            types,
        }
    }

    /// Sum of all four components.
    pub const fn total(self) -> u32 {
        self.inline
            .saturating_add(self.ids)
            .saturating_add(self.classes)
            .saturating_add(self.types)
    }

    /// Count one more selector in `bucket`.
    fn bump(&mut self, bucket: SpecificityType) {
        let slot = match bucket {
            SpecificityType::Inline => &mut self.inline,
            SpecificityType::Id => &mut self.ids,
            SpecificityType::Class => &mut self.classes,
            SpecificityType::Type => &mut self.types,
        };
        *slot = slot.saturating_add(1);
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "({},{},{},{})",
            self.inline, self.ids, self.classes, self.types
        )
    }
}

/// Compute the specificity of a token sequence.
///
/// A token with a bucket counts once; a token without one is skipped unless it
/// is a `:not()`, whose inner sequence is tallied into the same total.
pub fn specificity_of_tokens(tokens: &[Token]) -> Specificity {
    let mut total = Specificity::default();
    tally(tokens, &mut total);
    total
}

fn tally(tokens: &[Token], total: &mut Specificity) {
    for token in tokens {
        if let Some(bucket) = token.specificity_type {
            total.bump(bucket);
        } else if let TokenKind::Negation { tokens: inner } = &token.kind {
            tally(inner, total);
        }
    }
}
