//! Canonical selector serialization.
//! Spec: <https://drafts.csswg.org/cssom/#serializing-selectors>

use crate::token::{Combinator, Namespace, NthFormula, PseudoExpression, Token, TokenKind};
use core::fmt::{self, Write};
use cssparser::{serialize_identifier, serialize_string};

/// Display adapter that writes a token sequence as selector text.
struct TokenText<'tokens>(&'tokens [Token]);

impl fmt::Display for TokenText<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tokens(formatter, self.0)
    }
}

/// Serialize a token sequence to its canonical selector text.
pub fn tokens_to_string(tokens: &[Token]) -> String {
    TokenText(tokens).to_string()
}

fn write_tokens<W: Write>(dest: &mut W, tokens: &[Token]) -> fmt::Result {
    for token in tokens {
        write_token(dest, token)?;
    }
    Ok(())
}

fn write_namespace<W: Write>(dest: &mut W, namespace: &Namespace) -> fmt::Result {
    match namespace {
        Namespace::None => Ok(()),
        Namespace::Named(prefix) => {
            serialize_identifier(prefix, dest)?;
            dest.write_char('|')
        }
        Namespace::Wildcard => dest.write_str("*|"),
    }
}

fn write_token<W: Write>(dest: &mut W, token: &Token) -> fmt::Result {
    match &token.kind {
        TokenKind::Universal { namespace } => {
            write_namespace(dest, namespace)?;
            dest.write_char('*')
        }
        TokenKind::Type { namespace, name } => {
            write_namespace(dest, namespace)?;
            serialize_identifier(name, dest)
        }
        TokenKind::Id { name } => {
            dest.write_char('#')?;
            serialize_identifier(name, dest)
        }
        TokenKind::Class { name } => {
            dest.write_char('.')?;
            serialize_identifier(name, dest)
        }
        TokenKind::AttributePresence { namespace, name } => {
            dest.write_char('[')?;
            write_namespace(dest, namespace)?;
            serialize_identifier(name, dest)?;
            dest.write_char(']')
        }
        TokenKind::AttributeValue {
            namespace,
            name,
            operator,
            value,
        } => {
            dest.write_char('[')?;
            write_namespace(dest, namespace)?;
            serialize_identifier(name, dest)?;
            dest.write_str(operator.as_str())?;
            serialize_string(value, dest)?;
            dest.write_char(']')
        }
        // Pseudo names are plain identifiers and are written raw.
        TokenKind::PseudoElement { name } => {
            dest.write_str("::")?;
            dest.write_str(name)
        }
        TokenKind::PseudoClass { name, expression } => {
            dest.write_char(':')?;
            dest.write_str(name)?;
            if let Some(expression) = expression {
                dest.write_char('(')?;
                write_expression(dest, expression)?;
                dest.write_char(')')?;
            }
            Ok(())
        }
        TokenKind::Negation { tokens } => {
            dest.write_str(":not(")?;
            write_tokens(dest, tokens)?;
            dest.write_char(')')
        }
        TokenKind::DescendantCombinator => dest.write_str(Combinator::Descendant.as_str()),
        TokenKind::ChildCombinator => dest.write_str(Combinator::Child.as_str()),
        TokenKind::AdjacentSiblingCombinator => {
            dest.write_str(Combinator::AdjacentSibling.as_str())
        }
        TokenKind::GeneralSiblingCombinator => dest.write_str(Combinator::GeneralSibling.as_str()),
    }
}

fn write_expression<W: Write>(dest: &mut W, expression: &PseudoExpression) -> fmt::Result {
    match expression {
        PseudoExpression::Identity(ident) => serialize_identifier(ident, dest),
        PseudoExpression::String(text) => serialize_string(text, dest),
        PseudoExpression::NthKeyword(keyword) => dest.write_str(keyword.as_str()),
        PseudoExpression::NthFormula(formula) => write!(dest, "{formula}"),
    }
}

/// Shortest `An+B` form: `n`/`-n` for a unit step, no `An` term for a zero
/// step, and `B` only when it is non-zero or the `An` term was dropped.
impl fmt::Display for NthFormula {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            0 => {}
            1 => formatter.write_str("n")?,
            -1 => formatter.write_str("-n")?,
            step => write!(formatter, "{step}n")?,
        }
        let has_step = self.step != 0;
        if self.offset != 0 || !has_step {
            if has_step && self.offset > 0 {
                formatter.write_str("+")?;
            }
            write!(formatter, "{}", self.offset)?;
        }
        Ok(())
    }
}
