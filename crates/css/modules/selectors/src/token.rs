//! Selector token tree.
//! Spec: <https://www.w3.org/TR/selectors-3/#selector-syntax>
//!
//! The serde representation matches the node shapes emitted by the selector
//! grammar, e.g. `{"type": "idSelector", "name": "main", "specificityType": "b"}`.

use serde::{Deserialize, Serialize};

/// Namespace prefix of a type, universal or attribute selector.
/// Spec: Section 6.1.1 — Type selectors and namespaces
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<NamespaceRepr>", into = "Option<NamespaceRepr>")]
pub enum Namespace {
    /// No prefix was written.
    #[default]
    None,
    /// `ns|`, or `|` for the empty namespace.
    Named(String),
    /// `*|`
    Wildcard,
}

impl Namespace {
    #[inline]
    /// True if no namespace prefix was written.
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Wire form of a namespace: a plain string, or `{"type": "wildcard"}`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum NamespaceRepr {
    Named(String),
    Marker(NamespaceMarker),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum NamespaceMarker {
    Wildcard,
}

impl From<Option<NamespaceRepr>> for Namespace {
    fn from(repr: Option<NamespaceRepr>) -> Self {
        match repr {
            None => Self::None,
            Some(NamespaceRepr::Named(name)) => Self::Named(name),
            Some(NamespaceRepr::Marker(NamespaceMarker::Wildcard)) => Self::Wildcard,
        }
    }
}

impl From<Namespace> for Option<NamespaceRepr> {
    fn from(namespace: Namespace) -> Self {
        match namespace {
            Namespace::None => None,
            Namespace::Named(name) => Some(NamespaceRepr::Named(name)),
            Namespace::Wildcard => Some(NamespaceRepr::Marker(NamespaceMarker::Wildcard)),
        }
    }
}

/// CSS2 specificity bucket a simple selector contributes to.
/// Spec: <https://www.w3.org/TR/CSS2/cascade.html#specificity>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecificityType {
    /// `a`: style attribute.
    #[serde(rename = "a")]
    Inline,
    /// `b`: ID selectors.
    #[serde(rename = "b")]
    Id,
    /// `c`: classes, attributes and pseudo-classes.
    #[serde(rename = "c")]
    Class,
    /// `d`: type selectors and pseudo-elements.
    #[serde(rename = "d")]
    Type,
}

/// Attribute value matching operator.
/// Spec: Section 6.3 — Attribute selectors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeOperator {
    /// `[attr=value]`
    #[serde(rename = "=")]
    Equals,
    /// `[attr~=value]`
    #[serde(rename = "~=")]
    Includes,
    /// `[attr|=value]`
    #[serde(rename = "|=")]
    DashMatch,
    /// `[attr^=value]`
    #[serde(rename = "^=")]
    Prefix,
    /// `[attr$=value]`
    #[serde(rename = "$=")]
    Suffix,
    /// `[attr*=value]`
    #[serde(rename = "*=")]
    Substring,
}

impl AttributeOperator {
    #[inline]
    /// Operator text as written in a selector.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        }
    }
}

/// `odd` / `even` argument of the `:nth-*` pseudo-classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NthKeyword {
    /// Same as `2n+1`.
    Odd,
    /// Same as `2n`.
    Even,
}

impl NthKeyword {
    #[inline]
    /// Keyword text as written in a selector.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Odd => "odd",
            Self::Even => "even",
        }
    }
}

/// `An+B` argument of the `:nth-*` pseudo-classes.
/// Spec: Section 6.6.5.2 — :nth-child() pseudo-class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NthFormula {
    /// Coefficient of `n` (A).
    #[serde(rename = "a")]
    pub step: i32,
    /// Constant offset (B).
    #[serde(rename = "b")]
    pub offset: i32,
}

impl NthFormula {
    #[inline]
    /// `step`n+`offset`
    pub const fn new(step: i32, offset: i32) -> Self {
        Self { step, offset }
    }
}

/// Parenthesized argument of a functional pseudo-class.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "parsed", rename_all = "camelCase")]
pub enum PseudoExpression {
    /// Bare identifier, e.g. `:lang(en)`.
    Identity(String),
    /// Quoted string.
    String(String),
    NthKeyword(NthKeyword),
    NthFormula(NthFormula),
}

/// Combinators between compound selectors.
/// Spec: Section 8 — Combinators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the parent.
    Child,
    /// `+`: the immediately preceding sibling.
    AdjacentSibling,
    /// `~`: any preceding sibling.
    GeneralSibling,
}

impl Combinator {
    #[inline]
    /// Canonical text of the combinator, including the surrounding spaces.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::AdjacentSibling => " + ",
            Self::GeneralSibling => " ~ ",
        }
    }
}

/// The node kinds of a selector token tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TokenKind {
    /// `*`, optionally namespace-qualified.
    #[serde(rename = "universalSelector")]
    Universal {
        #[serde(default, skip_serializing_if = "Namespace::is_none")]
        namespace: Namespace,
    },
    /// An element name.
    #[serde(rename = "typeSelector")]
    Type {
        #[serde(default, skip_serializing_if = "Namespace::is_none")]
        namespace: Namespace,
        name: String,
    },
    /// `#name`
    #[serde(rename = "idSelector")]
    Id { name: String },
    /// `.name`
    #[serde(rename = "classSelector")]
    Class { name: String },
    /// `[attr]`
    #[serde(rename = "attributePresenceSelector")]
    AttributePresence {
        #[serde(default, skip_serializing_if = "Namespace::is_none")]
        namespace: Namespace,
        name: String,
    },
    /// `[attr op "value"]`
    #[serde(rename = "attributeValueSelector")]
    AttributeValue {
        #[serde(default, skip_serializing_if = "Namespace::is_none")]
        namespace: Namespace,
        name: String,
        operator: AttributeOperator,
        value: String,
    },
    /// `::name`
    #[serde(rename = "pseudoElementSelector")]
    PseudoElement { name: String },
    /// `:name` or `:name(expression)`.
    #[serde(rename = "pseudoClassSelector")]
    PseudoClass {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<PseudoExpression>,
    },
    /// `:not(...)`; the inner sequence contributes to specificity.
    #[serde(rename = "negationSelector")]
    Negation { tokens: Vec<Token> },
    /// See [`Combinator::Descendant`].
    #[serde(rename = "descendantCombinator")]
    DescendantCombinator,
    /// See [`Combinator::Child`].
    #[serde(rename = "childCombinator")]
    ChildCombinator,
    /// See [`Combinator::AdjacentSibling`].
    #[serde(rename = "adjacentSiblingCombinator")]
    AdjacentSiblingCombinator,
    /// See [`Combinator::GeneralSibling`].
    #[serde(rename = "generalSiblingCombinator")]
    GeneralSiblingCombinator,
}

impl TokenKind {
    /// The combinator this token stands for, if it is one.
    pub const fn combinator(&self) -> Option<Combinator> {
        match self {
            Self::DescendantCombinator => Some(Combinator::Descendant),
            Self::ChildCombinator => Some(Combinator::Child),
            Self::AdjacentSiblingCombinator => Some(Combinator::AdjacentSibling),
            Self::GeneralSiblingCombinator => Some(Combinator::GeneralSibling),
            _ => None,
        }
    }

    /// Bucket a token of this kind contributes to when the producer did not say otherwise.
    pub const fn default_specificity_type(&self) -> Option<SpecificityType> {
        match self {
            Self::Type { .. } | Self::PseudoElement { .. } => Some(SpecificityType::Type),
            Self::Id { .. } => Some(SpecificityType::Id),
            Self::Class { .. }
            | Self::AttributePresence { .. }
            | Self::AttributeValue { .. }
            | Self::PseudoClass { .. } => Some(SpecificityType::Class),
            Self::Universal { .. }
            | Self::Negation { .. }
            | Self::DescendantCombinator
            | Self::ChildCombinator
            | Self::AdjacentSiblingCombinator
            | Self::GeneralSiblingCombinator => None,
        }
    }
}

/// One node of a selector token tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// What the node is.
    #[serde(flatten)]
    pub kind: TokenKind,
    /// Specificity bucket; `None` for combinators, `*` and `:not()`.
    #[serde(
        rename = "specificityType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub specificity_type: Option<SpecificityType>,
}

impl Token {
    /// Build a token with the bucket its kind normally counts towards.
    pub const fn new(kind: TokenKind) -> Self {
        let specificity_type = kind.default_specificity_type();
        Self {
            kind,
            specificity_type,
        }
    }

    #[must_use]
    /// Override the specificity bucket.
    pub fn with_specificity_type(mut self, specificity_type: Option<SpecificityType>) -> Self {
        self.specificity_type = specificity_type;
        self
    }

    /// `*` in the given namespace.
    pub const fn universal(namespace: Namespace) -> Self {
        Self::new(TokenKind::Universal { namespace })
    }

    /// An element name in the given namespace.
    pub fn type_selector(namespace: Namespace, name: impl Into<String>) -> Self {
        Self::new(TokenKind::Type {
            namespace,
            name: name.into(),
        })
    }

    /// `#name`
    pub fn id(name: impl Into<String>) -> Self {
        Self::new(TokenKind::Id { name: name.into() })
    }

    /// `.name`
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TokenKind::Class { name: name.into() })
    }

    /// `[name]`
    pub fn attribute_presence(namespace: Namespace, name: impl Into<String>) -> Self {
        Self::new(TokenKind::AttributePresence {
            namespace,
            name: name.into(),
        })
    }

    /// `[name op "value"]`
    pub fn attribute_value(
        namespace: Namespace,
        name: impl Into<String>,
        operator: AttributeOperator,
        value: impl Into<String>,
    ) -> Self {
        Self::new(TokenKind::AttributeValue {
            namespace,
            name: name.into(),
            operator,
            value: value.into(),
        })
    }

    /// `::name`
    pub fn pseudo_element(name: impl Into<String>) -> Self {
        Self::new(TokenKind::PseudoElement { name: name.into() })
    }

    /// `:name`, with an optional parenthesized argument.
    pub fn pseudo_class(name: impl Into<String>, expression: Option<PseudoExpression>) -> Self {
        Self::new(TokenKind::PseudoClass {
            name: name.into(),
            expression,
        })
    }

    /// `:not(...)` around a compound selector.
    pub const fn negation(tokens: Vec<Self>) -> Self {
        Self::new(TokenKind::Negation { tokens })
    }

    /// The token for `combinator`.
    pub const fn combinator(combinator: Combinator) -> Self {
        Self::new(match combinator {
            Combinator::Descendant => TokenKind::DescendantCombinator,
            Combinator::Child => TokenKind::ChildCombinator,
            Combinator::AdjacentSibling => TokenKind::AdjacentSiblingCombinator,
            Combinator::GeneralSibling => TokenKind::GeneralSiblingCombinator,
        })
    }
}
