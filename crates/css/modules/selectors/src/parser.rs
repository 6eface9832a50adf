//! CSS selector parsing.
//! Spec: <https://www.w3.org/TR/selectors-3/#w3cselgrammar>
//!
//! Builds token trees from selector text using the `cssparser` tokenizer.
//! Names keep the case they were written in.

use crate::selector::Selector;
use crate::token::{
    AttributeOperator, Combinator, Namespace, NthFormula, NthKeyword, PseudoExpression, Token,
};
use crate::SelectorError;
use crate::escape::escape_identifier;
use core::fmt;
use cssparser::{
    BasicParseError, BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput,
    Token as CssToken, parse_nth,
};
use log::debug;

/// Parser-specific failures that are not plain unexpected tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SelectorParseErrorKind {
    /// A compound selector had no simple selectors.
    EmptyCompound,
    /// `[*|attr]` style universal attribute names.
    UniversalAttributeName,
    /// A pseudo-class or pseudo-element name that only exists through escapes.
    EscapedPseudoName,
}

impl fmt::Display for SelectorParseErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::EmptyCompound => "expected a simple selector",
            Self::UniversalAttributeName => "attribute names cannot be `*`",
            Self::EscapedPseudoName => "pseudo names must be plain identifiers",
        })
    }
}

type ParseResult<'input, T> = Result<T, ParseError<'input, SelectorParseErrorKind>>;

/// Local part of a qualified name.
enum LocalName {
    Named(String),
    Any,
}

/// Parse a comma separated selector list into one [`Selector`] per group.
/// Spec: Section 5 — Groups of selectors
///
/// # Errors
/// Returns [`SelectorError::Parse`] if the text is not a valid selector list.
pub fn parse_selector_list(text: &str) -> Result<Vec<Selector>, SelectorError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let groups = parser
        .parse_comma_separated(|group| parse_complex(group))
        .map_err(|err| {
            let error = to_selector_error(err);
            debug!("rejected selector list {text:?}: {error}");
            error
        })?;
    groups.into_iter().map(Selector::new).collect()
}

/// Parse text that must contain exactly one selector.
///
/// # Errors
/// Returns [`SelectorError::Parse`] for invalid text and
/// [`SelectorError::InvalidInput`] when the text holds more than one group.
pub fn parse_selector(text: &str) -> Result<Selector, SelectorError> {
    let mut selectors = parse_selector_list(text)?;
    if selectors.len() != 1 {
        return Err(SelectorError::InvalidInput(format!(
            "expected a single selector, found {}",
            selectors.len()
        )));
    }
    selectors
        .pop()
        .ok_or_else(|| SelectorError::InvalidInput("expected a single selector".to_owned()))
}

fn to_selector_error(err: ParseError<'_, SelectorParseErrorKind>) -> SelectorError {
    let message = match err.kind {
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected token {token:?}")
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of input".to_owned()
        }
        ParseErrorKind::Basic(other) => format!("{other:?}"),
        ParseErrorKind::Custom(kind) => kind.to_string(),
    };
    SelectorError::Parse {
        line: err.location.line.saturating_add(1),
        column: err.location.column,
        message,
    }
}

/// Parse one complex selector: compounds separated by combinators.
/// Spec: Section 8 — Combinators
fn parse_complex<'input>(input: &mut Parser<'input, '_>) -> ParseResult<'input, Vec<Token>> {
    let mut tokens = Vec::new();
    input.skip_whitespace();
    parse_compound(input, &mut tokens)?;
    while let Some(combinator) = parse_combinator(input)? {
        tokens.push(Token::combinator(combinator));
        input.skip_whitespace();
        parse_compound(input, &mut tokens)?;
    }
    Ok(tokens)
}

/// Consume the combinator after a compound, or return `None` at the end of the group.
fn parse_combinator<'input>(
    input: &mut Parser<'input, '_>,
) -> ParseResult<'input, Option<Combinator>> {
    let mut saw_whitespace = false;
    loop {
        let state = input.state();
        match input.next_including_whitespace().cloned() {
            Err(_) => return Ok(None),
            Ok(CssToken::WhiteSpace(_)) => saw_whitespace = true,
            Ok(CssToken::Delim('>')) => return Ok(Some(Combinator::Child)),
            Ok(CssToken::Delim('+')) => return Ok(Some(Combinator::AdjacentSibling)),
            Ok(CssToken::Delim('~')) => return Ok(Some(Combinator::GeneralSibling)),
            Ok(token) => {
                if saw_whitespace {
                    input.reset(&state);
                    return Ok(Some(Combinator::Descendant));
                }
                return Err(input.new_unexpected_token_error(token));
            }
        }
    }
}

/// Parse a sequence of simple selectors with no whitespace between them.
/// Spec: Section 4 — Simple selector sequences
fn parse_compound<'input>(
    input: &mut Parser<'input, '_>,
    tokens: &mut Vec<Token>,
) -> ParseResult<'input, ()> {
    let start = tokens.len();
    if let Some((namespace, local)) = parse_qualified_name(input)? {
        tokens.push(match local {
            LocalName::Named(name) => Token::type_selector(namespace, name),
            LocalName::Any => Token::universal(namespace),
        });
    }
    while let Some(token) = parse_simple(input)? {
        tokens.push(token);
    }
    if tokens.len() > start {
        return Ok(());
    }
    match input.next_including_whitespace().cloned() {
        Ok(token) => Err(input.new_unexpected_token_error(token)),
        Err(_) => Err(input.new_custom_error(SelectorParseErrorKind::EmptyCompound)),
    }
}

/// Parse `ns|name`, `*|name`, `|name`, `name` and the `*` forms of each.
/// Spec: Section 6.1 — Type selectors; Section 6.2 — Universal selector
fn parse_qualified_name<'input>(
    input: &mut Parser<'input, '_>,
) -> ParseResult<'input, Option<(Namespace, LocalName)>> {
    let state = input.state();
    let prefix = match input.next_including_whitespace().cloned() {
        Ok(CssToken::Ident(name)) => LocalName::Named(name.to_string()),
        Ok(CssToken::Delim('*')) => LocalName::Any,
        Ok(CssToken::Delim('|')) => {
            let local = parse_local_name(input)?;
            return Ok(Some((Namespace::Named(String::new()), local)));
        }
        _ => {
            input.reset(&state);
            return Ok(None);
        }
    };
    let after_prefix = input.state();
    if matches!(input.next_including_whitespace(), Ok(&CssToken::Delim('|'))) {
        let namespace = match prefix {
            LocalName::Named(name) => Namespace::Named(name),
            LocalName::Any => Namespace::Wildcard,
        };
        let local = parse_local_name(input)?;
        return Ok(Some((namespace, local)));
    }
    input.reset(&after_prefix);
    Ok(Some((Namespace::None, prefix)))
}

fn parse_local_name<'input>(input: &mut Parser<'input, '_>) -> ParseResult<'input, LocalName> {
    match input.next_including_whitespace().cloned()? {
        CssToken::Ident(name) => Ok(LocalName::Named(name.to_string())),
        CssToken::Delim('*') => Ok(LocalName::Any),
        token => Err(input.new_unexpected_token_error(token)),
    }
}

/// An identifier directly after `.` or `::`.
fn expect_adjacent_ident<'input>(input: &mut Parser<'input, '_>) -> ParseResult<'input, String> {
    match input.next_including_whitespace().cloned()? {
        CssToken::Ident(name) => Ok(name.to_string()),
        token => Err(input.new_unexpected_token_error(token)),
    }
}

/// Parse one id, class, attribute or pseudo selector, if the next token starts one.
fn parse_simple<'input>(input: &mut Parser<'input, '_>) -> ParseResult<'input, Option<Token>> {
    let state = input.state();
    let token = match input.next_including_whitespace().cloned() {
        Ok(CssToken::IDHash(name)) => Token::id(name.to_string()),
        Ok(CssToken::Delim('.')) => Token::class(expect_adjacent_ident(input)?),
        Ok(CssToken::SquareBracketBlock) => input.parse_nested_block(|block| parse_attribute(block))?,
        Ok(CssToken::Colon) => parse_pseudo(input)?,
        _ => {
            input.reset(&state);
            return Ok(None);
        }
    };
    Ok(Some(token))
}

/// Parse the inside of `[...]`.
/// Spec: Section 6.3 — Attribute selectors
fn parse_attribute<'input>(input: &mut Parser<'input, '_>) -> ParseResult<'input, Token> {
    input.skip_whitespace();
    let Some((namespace, local)) = parse_qualified_name(input)? else {
        let token = input.next()?.clone();
        return Err(input.new_unexpected_token_error(token));
    };
    let LocalName::Named(name) = local else {
        return Err(input.new_custom_error(SelectorParseErrorKind::UniversalAttributeName));
    };
    if input.is_exhausted() {
        return Ok(Token::attribute_presence(namespace, name));
    }
    let operator = match input.next()?.clone() {
        CssToken::Delim('=') => AttributeOperator::Equals,
        CssToken::IncludeMatch => AttributeOperator::Includes,
        CssToken::DashMatch => AttributeOperator::DashMatch,
        CssToken::PrefixMatch => AttributeOperator::Prefix,
        CssToken::SuffixMatch => AttributeOperator::Suffix,
        CssToken::SubstringMatch => AttributeOperator::Substring,
        token => return Err(input.new_unexpected_token_error(token)),
    };
    let value = match input.next()?.clone() {
        CssToken::Ident(value) | CssToken::QuotedString(value) => value.to_string(),
        token => return Err(input.new_unexpected_token_error(token)),
    };
    Ok(Token::attribute_value(namespace, name, operator, value))
}

/// Pseudo-elements that may still be written with a single colon.
/// Spec: Section 7 — Pseudo-elements
fn is_legacy_pseudo_element(name: &str) -> bool {
    ["before", "after", "first-line", "first-letter"]
        .iter()
        .any(|legacy| name.eq_ignore_ascii_case(legacy))
}

/// Pseudo names are serialized raw, so one that needs escaping would not
/// survive a round trip.
fn plain_pseudo_name<'input>(
    input: &Parser<'input, '_>,
    name: &str,
) -> ParseResult<'input, String> {
    if escape_identifier(name) == name {
        Ok(name.to_owned())
    } else {
        Err(input.new_custom_error(SelectorParseErrorKind::EscapedPseudoName))
    }
}

/// Parse what follows a `:`.
/// Spec: Section 6.6 — Pseudo-classes; Section 6.6.7 — Negation
fn parse_pseudo<'input>(input: &mut Parser<'input, '_>) -> ParseResult<'input, Token> {
    match input.next_including_whitespace().cloned()? {
        CssToken::Colon => {
            let name = expect_adjacent_ident(input)?;
            Ok(Token::pseudo_element(plain_pseudo_name(input, &name)?))
        }
        CssToken::Ident(name) if is_legacy_pseudo_element(&name) => {
            Ok(Token::pseudo_element(name.to_string()))
        }
        CssToken::Ident(name) => Ok(Token::pseudo_class(plain_pseudo_name(input, &name)?, None)),
        CssToken::Function(name) if name.eq_ignore_ascii_case("not") => {
            input.parse_nested_block(|block| {
                block.skip_whitespace();
                let mut inner = Vec::new();
                parse_compound(block, &mut inner)?;
                Ok(Token::negation(inner))
            })
        }
        CssToken::Function(name) => {
            let name = plain_pseudo_name(input, &name)?;
            let expression = input.parse_nested_block(|block| parse_expression(block, &name))?;
            Ok(Token::pseudo_class(name, Some(expression)))
        }
        token => Err(input.new_unexpected_token_error(token)),
    }
}

/// Parse the argument of a functional pseudo-class.
fn parse_expression<'input>(
    input: &mut Parser<'input, '_>,
    function: &str,
) -> ParseResult<'input, PseudoExpression> {
    input.skip_whitespace();
    let is_nth = function
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("nth-"));
    if is_nth {
        if let Ok(keyword) = input.try_parse(parse_nth_keyword) {
            return Ok(PseudoExpression::NthKeyword(keyword));
        }
        let (step, offset) = parse_nth(input)?;
        return Ok(PseudoExpression::NthFormula(NthFormula::new(step, offset)));
    }
    match input.next()?.clone() {
        CssToken::Ident(value) => Ok(PseudoExpression::Identity(value.to_string())),
        CssToken::QuotedString(value) => Ok(PseudoExpression::String(value.to_string())),
        token => Err(input.new_unexpected_token_error(token)),
    }
}

fn parse_nth_keyword<'input>(
    input: &mut Parser<'input, '_>,
) -> Result<NthKeyword, BasicParseError<'input>> {
    let ident = input.expect_ident_cloned()?;
    if ident.eq_ignore_ascii_case("odd") {
        Ok(NthKeyword::Odd)
    } else if ident.eq_ignore_ascii_case("even") {
        Ok(NthKeyword::Even)
    } else {
        Err(input.new_basic_unexpected_token_error(CssToken::Ident(ident)))
    }
}
