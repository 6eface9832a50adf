//! The cascade identity of a single declaration.

use crate::CascadeError;
use crate::origin::{Origin, PrecedenceLevel};
use css_selectors::{Selector, Specificity};
use std::sync::Arc;

/// Plain configuration for a [`PropertyTest`].
///
/// The default describes a normal inline declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyConfig {
    pub origin: Origin,
    pub important: bool,
    pub selector: Option<Arc<Selector>>,
}

/// A declaration reduced to what decides its cascade position: origin,
/// importance and the selector it was declared under.
///
/// The origin/selector combination is only checked when specificity is asked
/// for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyTest {
    origin: Origin,
    important: bool,
    /// Shared with other declarations from the same rule.
    selector: Option<Arc<Selector>>,
}

impl PropertyTest {
    #[inline]
    pub const fn new(origin: Origin, important: bool, selector: Option<Arc<Selector>>) -> Self {
        Self {
            origin,
            important,
            selector,
        }
    }

    /// Like [`PropertyTest::new`], but checks the origin/selector combination up front.
    ///
    /// # Errors
    /// Returns [`CascadeError::InvalidState`] if inline origin comes with a selector
    /// or a stylesheet origin comes without one.
    pub fn try_new(
        origin: Origin,
        important: bool,
        selector: Option<Arc<Selector>>,
    ) -> Result<Self, CascadeError> {
        let test = Self::new(origin, important, selector);
        test.specificity()?;
        Ok(test)
    }

    #[inline]
    /// A declaration from a `style` attribute.
    pub const fn inline(important: bool) -> Self {
        Self::new(Origin::Inline, important, None)
    }

    #[inline]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    #[inline]
    pub const fn important(&self) -> bool {
        self.important
    }

    #[inline]
    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_deref()
    }

    /// Specificity this declaration cascades with.
    /// Spec: CSS2 Section 6.4.3 — a style attribute counts as (1,0,0,0)
    ///
    /// # Errors
    /// Returns [`CascadeError::InvalidState`] if inline origin comes with a selector
    /// or a stylesheet origin comes without one.
    pub fn specificity(&self) -> Result<Specificity, CascadeError> {
        match (self.origin, self.selector.as_deref()) {
            (Origin::Inline, None) => Ok(Specificity::INLINE),
            (Origin::Inline, Some(selector)) => Err(CascadeError::InvalidState(format!(
                "inline declaration cannot have selector `{selector}`"
            ))),
            (origin, None) => Err(CascadeError::InvalidState(format!(
                "{origin} declaration requires a selector"
            ))),
            (Origin::Author | Origin::User | Origin::UserAgent, Some(selector)) => {
                Ok(selector.specificity())
            }
        }
    }

    #[inline]
    /// Origin and importance rank; see [`PrecedenceLevel`].
    pub const fn precedence_level(&self) -> PrecedenceLevel {
        PrecedenceLevel::of(self.origin, self.important)
    }
}

impl From<PropertyConfig> for PropertyTest {
    fn from(config: PropertyConfig) -> Self {
        Self::new(config.origin, config.important, config.selector)
    }
}

/// A bare selector stands for a normal author declaration.
impl From<Arc<Selector>> for PropertyTest {
    fn from(selector: Arc<Selector>) -> Self {
        Self::new(Origin::Author, false, Some(selector))
    }
}

impl From<Selector> for PropertyTest {
    fn from(selector: Selector) -> Self {
        Self::from(Arc::new(selector))
    }
}
