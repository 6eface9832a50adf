//! Ordering declarations by cascade precedence.
//! Spec: CSS2 Section 6.4.1 — Cascading order

use crate::CascadeError;
use crate::origin::PrecedenceLevel;
use crate::property::{PropertyConfig, PropertyTest};
use core::cmp::Ordering;
use css_selectors::{Selector, Specificity};
use log::trace;
use std::sync::Arc;

/// Priority pair used to order declarations in the cascade.
/// Spec: Section 6.4.1 — steps 2 and 3
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadePriority {
    /// Spec: step 2 — origin and importance
    pub level: PrecedenceLevel,
    /// Spec: step 3 — specificity
    pub specificity: Specificity,
}

impl CascadePriority {
    /// Rank a declaration.
    ///
    /// # Errors
    /// Returns [`CascadeError::InvalidState`] if the declaration's specificity is undefined.
    pub fn of(test: &PropertyTest) -> Result<Self, CascadeError> {
        Ok(Self {
            level: test.precedence_level(),
            specificity: test.specificity()?,
        })
    }
}

/// Compare two priorities. `Less` means `left` takes precedence and sorts first.
/// Spec: Section 6.4.1 — Sorting the cascade
pub fn compare_priority(left: &CascadePriority, right: &CascadePriority) -> Ordering {
    // Lower level wins
    left.level
        .cmp(&right.level)
        // Higher specificity wins
        .then_with(|| right.specificity.cmp(&left.specificity))
}

/// Compare two declarations. `Less` means `left` takes precedence, `Equal`
/// means neither origin, importance nor specificity separates them.
///
/// # Errors
/// Returns [`CascadeError::InvalidState`] if either declaration has an
/// inconsistent origin/selector combination.
pub fn compare(left: &PropertyTest, right: &PropertyTest) -> Result<Ordering, CascadeError> {
    Ok(compare_priority(
        &CascadePriority::of(left)?,
        &CascadePriority::of(right)?,
    ))
}

/// Of two declarations that apply to the same element and property, the one
/// whose value is used. `right` is taken to be declared later and wins ties.
///
/// # Errors
/// Returns [`CascadeError::InvalidState`] if either declaration has an
/// inconsistent origin/selector combination.
pub fn winner<'decl>(
    left: &'decl PropertyTest,
    right: &'decl PropertyTest,
) -> Result<&'decl PropertyTest, CascadeError> {
    Ok(match compare(left, right)? {
        Ordering::Less => left,
        Ordering::Equal | Ordering::Greater => right,
    })
}

/// One entry handed to [`sort_cascade`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CascadeItem {
    Property(PropertyTest),
    Config(PropertyConfig),
    /// Shorthand for a normal author declaration.
    Selector(Arc<Selector>),
}

impl CascadeItem {
    fn to_property_test(&self) -> PropertyTest {
        match self {
            Self::Property(test) => test.clone(),
            Self::Config(config) => PropertyTest::from(config.clone()),
            Self::Selector(selector) => PropertyTest::from(Arc::clone(selector)),
        }
    }
}

impl From<PropertyTest> for CascadeItem {
    fn from(test: PropertyTest) -> Self {
        Self::Property(test)
    }
}

impl From<PropertyConfig> for CascadeItem {
    fn from(config: PropertyConfig) -> Self {
        Self::Config(config)
    }
}

impl From<Arc<Selector>> for CascadeItem {
    fn from(selector: Arc<Selector>) -> Self {
        Self::Selector(selector)
    }
}

impl From<Selector> for CascadeItem {
    fn from(selector: Selector) -> Self {
        Self::Selector(Arc::new(selector))
    }
}

/// Order declarations from highest to lowest precedence.
///
/// `items` are in declaration order; among entries that [`compare`] ranks equal
/// the later one comes first. The input is left untouched.
///
/// # Errors
/// Returns [`CascadeError::InvalidState`] if any entry has an inconsistent
/// origin/selector combination.
pub fn sort_cascade(items: &[CascadeItem]) -> Result<Vec<PropertyTest>, CascadeError> {
    let mut ranked = items
        .iter()
        .enumerate()
        .map(|(source_order, item)| {
            let test = item.to_property_test();
            Ok((CascadePriority::of(&test)?, source_order, test))
        })
        .collect::<Result<Vec<_>, CascadeError>>()?;
    ranked.sort_by(|left, right| {
        compare_priority(&left.0, &right.0)
            // Source order: later wins
            .then_with(|| right.1.cmp(&left.1))
    });
    trace!("sorted {} cascade entries", ranked.len());
    Ok(ranked.into_iter().map(|(_, _, test)| test).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::Origin;
    use core::ptr;

    fn rule(text: &str, origin: Origin, important: bool) -> PropertyTest {
        PropertyTest::new(origin, important, Some(Arc::new(text.parse().unwrap())))
    }

    #[test]
    fn level_beats_specificity() {
        let agent = rule("#a#b#c", Origin::UserAgent, false);
        let author = rule("p", Origin::Author, false);
        assert_eq!(compare(&author, &agent), Ok(Ordering::Less));
        assert_eq!(compare(&agent, &author), Ok(Ordering::Greater));
    }

    #[test]
    fn specificity_breaks_level_ties() {
        let id = rule("#x", Origin::Author, true);
        let class = rule(".x", Origin::Author, true);
        assert_eq!(compare(&id, &class), Ok(Ordering::Less));
        assert_eq!(compare(&class, &id), Ok(Ordering::Greater));
        assert_eq!(compare(&class, &class.clone()), Ok(Ordering::Equal));
    }

    #[test]
    fn inline_beats_ids_at_the_same_level() {
        let inline = PropertyTest::inline(false);
        let id = rule("#x#y", Origin::Author, false);
        assert_eq!(compare(&inline, &id), Ok(Ordering::Less));
        let important = rule("p", Origin::Author, true);
        assert_eq!(compare(&important, &inline), Ok(Ordering::Less));
    }

    #[test]
    fn winner_prefers_later_on_ties() {
        let first = rule(".a", Origin::Author, false);
        let second = rule(".b", Origin::Author, false);
        assert!(ptr::eq(winner(&first, &second).unwrap(), &second));
        let strong = rule("#a", Origin::Author, false);
        assert!(ptr::eq(winner(&strong, &second).unwrap(), &strong));
    }

    #[test]
    fn errors_propagate() {
        let broken = PropertyTest::new(Origin::Author, false, None);
        let fine = PropertyTest::inline(false);
        assert!(compare(&broken, &fine).is_err());
        assert!(compare(&fine, &broken).is_err());
        assert!(sort_cascade(&[fine.into(), broken.into()]).is_err());
    }
}
