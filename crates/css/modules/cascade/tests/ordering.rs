#![cfg(test)]
#![allow(
    clippy::missing_errors_doc,
    reason = "Test helpers return Result for clear propagation"
)]

use anyhow::Result;
use core::cmp::Ordering;
use css_cascade::{
    CascadeItem, Origin, PrecedenceLevel, PropertyConfig, PropertyTest, compare, sort_cascade,
    winner,
};
use css_selectors::Selector;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn declared(text: &str, origin: Origin, important: bool) -> Result<PropertyTest> {
    let selector: Selector = text.parse()?;
    Ok(PropertyTest::try_new(origin, important, Some(Arc::new(selector)))?)
}

#[test]
fn user_agent_sorts_after_author_regardless_of_specificity() -> Result<()> {
    init_logging();
    let agent = declared("#a #b #c.d.e", Origin::UserAgent, true)?;
    let author = declared("*", Origin::Author, false)?;
    let sorted = sort_cascade(&[agent.clone().into(), author.clone().into()])?;
    assert_eq!(sorted, vec![author, agent]);
    Ok(())
}

#[test]
fn important_author_rules_rank_by_specificity() -> Result<()> {
    init_logging();
    let class = declared(".note", Origin::Author, true)?;
    let id = declared("#note", Origin::Author, true)?;
    assert_eq!(compare(&id, &class)?, Ordering::Less);
    let sorted = sort_cascade(&[class.clone().into(), id.clone().into()])?;
    assert_eq!(sorted, vec![id, class]);
    Ok(())
}

#[test]
fn later_declaration_wins_full_ties() -> Result<()> {
    init_logging();
    let first = declared("p.a", Origin::User, false)?;
    let second = declared("p.b", Origin::User, false)?;
    let third = declared("p.c", Origin::User, false)?;
    let items: Vec<CascadeItem> = vec![first.clone().into(), second.clone().into(), third.clone().into()];
    assert_eq!(sort_cascade(&items)?, vec![third, second.clone(), first.clone()]);
    assert_eq!(winner(&first, &second)?, &second);
    Ok(())
}

#[test]
fn full_precedence_ladder() -> Result<()> {
    init_logging();
    let user_important = declared("p", Origin::User, true)?;
    let author_important = declared("#x", Origin::Author, true)?;
    let inline = PropertyTest::inline(false);
    let author_normal = declared("#x", Origin::Author, false)?;
    let user_normal = declared("#x#y", Origin::User, false)?;
    let agent = declared("#x#y#z", Origin::UserAgent, false)?;
    let expected = vec![
        user_important,
        author_important,
        inline,
        author_normal,
        user_normal,
        agent,
    ];
    let mut items: Vec<CascadeItem> = expected.iter().cloned().map(CascadeItem::from).collect();
    items.reverse();
    assert_eq!(sort_cascade(&items)?, expected);
    Ok(())
}

#[test]
fn compare_is_monotone_in_specificity() -> Result<()> {
    init_logging();
    let texts = ["*", "p", "ul li", "p.a", ".a.b", "#x", "#x p", "#x .a", "#x#y"];
    let tests = texts
        .iter()
        .map(|text| declared(text, Origin::Author, false))
        .collect::<Result<Vec<_>>>()?;
    for left in &tests {
        for right in &tests {
            assert_eq!(left.precedence_level(), right.precedence_level());
            let ordering = compare(left, right)?;
            assert_eq!(
                ordering == Ordering::Less,
                left.specificity()? > right.specificity()?,
                "{:?} vs {:?}",
                left.selector().map(Selector::as_str),
                right.selector().map(Selector::as_str)
            );
            assert_eq!(ordering, compare(right, left)?.reverse());
        }
    }
    Ok(())
}

#[test]
fn sorting_leaves_input_untouched() -> Result<()> {
    init_logging();
    let items: Vec<CascadeItem> = vec![
        declared("p", Origin::UserAgent, false)?.into(),
        declared("#x", Origin::Author, false)?.into(),
        PropertyTest::inline(true).into(),
    ];
    let snapshot = items.clone();
    let sorted = sort_cascade(&items)?;
    assert_eq!(items, snapshot);
    assert_eq!(sorted.len(), items.len());
    assert_eq!(sorted[0].precedence_level(), PrecedenceLevel::AuthorImportant);
    Ok(())
}

#[test]
fn mixed_item_kinds_are_normalized() -> Result<()> {
    init_logging();
    let shared: Arc<Selector> = Arc::new("nav a".parse()?);
    let items = vec![
        CascadeItem::from(Arc::clone(&shared)),
        CascadeItem::from(PropertyConfig {
            origin: Origin::User,
            important: true,
            selector: Some(Arc::clone(&shared)),
        }),
        CascadeItem::from(PropertyConfig::default()),
    ];
    let sorted = sort_cascade(&items)?;
    let levels: Vec<_> = sorted.iter().map(PropertyTest::precedence_level).collect();
    assert_eq!(
        levels,
        vec![
            PrecedenceLevel::UserImportant,
            PrecedenceLevel::AuthorNormal,
            PrecedenceLevel::AuthorNormal,
        ]
    );
    assert_eq!(sorted[1].origin(), Origin::Inline);
    assert_eq!(sorted[2].selector(), Some(&*shared));
    Ok(())
}

#[test]
fn empty_input_sorts_to_empty() -> Result<()> {
    assert!(sort_cascade(&[])?.is_empty());
    Ok(())
}
