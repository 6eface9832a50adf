#![cfg(test)]
#![allow(
    clippy::missing_errors_doc,
    reason = "Test helpers return Result for clear propagation"
)]

use anyhow::Result;
use css_selectors::{
    Selector, SelectorError, Specificity, Token, TokenKind, escape_identifier, escape_string,
    parse_selector, parse_selector_list,
};

const CORPUS: &[&str] = &[
    "DIV.foo:not(#a)",
    "html > body  div.content p:first-child",
    "ul li + li ~ li",
    "a[href^='https://'][target=_blank]:hover",
    "svg|rect, *|*, |p, ns|*",
    "[xml|lang|=en] [ data-count = \"3\" ]",
    "li:nth-child(2n+1):nth-last-of-type(-n+3):nth-of-type(even)",
    "tr:nth-child(0n+5) td:nth-child(n)",
    "p::first-letter, p:after, input::placeholder",
    ".\\31 0col #\\@media .a\\.b",
    "q:lang(fr):contains(\"a\\\"b\")",
    "*:not(.hidden):not([disabled]):not(:focus)",
    "caf\u{e9}.\u{1F600}",
    "a:h\\6f ver::b\\65 fore, li:nth-\\63 hild(odd)",
];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn count_bucketed(tokens: &[Token]) -> u32 {
    tokens
        .iter()
        .map(|token| match (&token.specificity_type, &token.kind) {
            (Some(_), _) => 1,
            (None, TokenKind::Negation { tokens: inner }) => count_bucketed(inner),
            (None, _) => 0,
        })
        .sum()
}

#[test]
fn serialization_reaches_a_fixpoint() -> Result<()> {
    init_logging();
    for text in CORPUS {
        for selector in parse_selector_list(text)? {
            let reparsed = parse_selector(selector.as_str())?;
            assert_eq!(reparsed.as_str(), selector.as_str(), "from {text:?}");
            assert_eq!(reparsed.specificity(), selector.specificity(), "from {text:?}");
            assert_eq!(reparsed.tokens(), selector.tokens(), "from {text:?}");
        }
    }
    Ok(())
}

#[test]
fn specificity_components_sum_to_bucketed_tokens() -> Result<()> {
    init_logging();
    for text in CORPUS {
        for selector in parse_selector_list(text)? {
            assert_eq!(
                selector.specificity().total(),
                count_bucketed(selector.tokens()),
                "for {selector}"
            );
        }
    }
    Ok(())
}

#[test]
fn known_specificities() -> Result<()> {
    init_logging();
    let cases = [
        ("*", Specificity::new(0, 0, 0, 0)),
        ("li", Specificity::new(0, 0, 0, 1)),
        ("ul li", Specificity::new(0, 0, 0, 2)),
        ("ul ol+li", Specificity::new(0, 0, 0, 3)),
        ("h1 + *[rel=up]", Specificity::new(0, 0, 1, 1)),
        ("ul ol li.red", Specificity::new(0, 0, 1, 3)),
        ("li.red.level", Specificity::new(0, 0, 2, 1)),
        ("#x34y", Specificity::new(0, 1, 0, 0)),
        ("#s12:not(FOO)", Specificity::new(0, 1, 0, 1)),
        ("DIV.foo:not(#a)", Specificity::new(0, 1, 1, 1)),
        ("a:hover::before", Specificity::new(0, 0, 1, 2)),
    ];
    for (text, expected) in cases {
        let selector: Selector = text.parse()?;
        assert_eq!(selector.specificity(), expected, "for {text}");
    }
    Ok(())
}

#[test]
fn canonical_text() -> Result<()> {
    init_logging();
    let cases = [
        ("DIV.foo:not( #a )", "DIV.foo:not(#a)"),
        ("a>b   c", "a > b c"),
        ("[type=text]", "[type=\"text\"]"),
        ("li:nth-child( 2n + 0 )", "li:nth-child(2n)"),
        ("li:nth-child(-1n+0)", "li:nth-child(-n)"),
        ("li:nth-child(+5)", "li:nth-child(5)"),
        (".\\-", ".\\-"),
        (".-\\31 a", ".-\\31 a"),
        ("a:h\\6f ver::b\\65 fore", "a:hover::before"),
    ];
    for (text, expected) in cases {
        assert_eq!(parse_selector(text)?.as_str(), expected, "for {text}");
    }
    Ok(())
}

#[test]
fn pseudo_names_needing_escapes_are_rejected() {
    init_logging();
    for text in ["p::a\\.b", "a:\\31 23", "a:\\31 x(y)"] {
        assert!(
            matches!(parse_selector_list(text), Err(SelectorError::Parse { .. })),
            "accepted {text:?}"
        );
    }
}

#[test]
fn documented_escapes() {
    assert_eq!(escape_identifier("1a"), "\\31 a");
    assert_eq!(escape_identifier("-"), "\\-");
    assert_eq!(escape_identifier("-1a"), "-\\31 a");
    assert_eq!(escape_string("a\"b"), "\"a\\\"b\"");
}
