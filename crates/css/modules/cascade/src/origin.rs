//! Cascade origins and their precedence.
//! Spec: <https://www.w3.org/TR/CSS2/cascade.html#cascading-order>

use crate::CascadeError;
use core::fmt;
use core::str::FromStr;

/// Where a declaration comes from.
/// Spec: CSS2 Section 6.4.1 — Cascading order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A `style` attribute. Cascades as author origin.
    #[default]
    Inline,
    Author,
    User,
    UserAgent,
}

impl Origin {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Author => "author",
            Self::User => "user",
            Self::UserAgent => "userAgent",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = CascadeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "inline" => Ok(Self::Inline),
            "author" => Ok(Self::Author),
            "user" => Ok(Self::User),
            "userAgent" => Ok(Self::UserAgent),
            other => Err(CascadeError::InvalidState(format!(
                "unknown origin `{other}`"
            ))),
        }
    }
}

/// Origin and importance combined into one ordering. Declaration order here is
/// cascade order: earlier variants win.
/// Spec: CSS2 Section 6.4.1 — step 2
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrecedenceLevel {
    UserImportant,
    AuthorImportant,
    AuthorNormal,
    UserNormal,
    /// User agent declarations cannot be `!important`.
    UserAgent,
}

impl PrecedenceLevel {
    /// Look up the level for an origin and importance flag. Inline declarations
    /// rank as author declarations.
    pub const fn of(origin: Origin, important: bool) -> Self {
        match (origin, important) {
            (Origin::User, true) => Self::UserImportant,
            (Origin::Author | Origin::Inline, true) => Self::AuthorImportant,
            (Origin::Author | Origin::Inline, false) => Self::AuthorNormal,
            (Origin::User, false) => Self::UserNormal,
            (Origin::UserAgent, _) => Self::UserAgent,
        }
    }

    /// Position in cascade order; lower wins.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::UserImportant => 0,
            Self::AuthorImportant => 1,
            Self::AuthorNormal => 2,
            Self::UserNormal => 3,
            Self::UserAgent => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_table() {
        let cases = [
            (Origin::User, true, 0),
            (Origin::Author, true, 1),
            (Origin::Inline, true, 1),
            (Origin::Author, false, 2),
            (Origin::Inline, false, 2),
            (Origin::User, false, 3),
            (Origin::UserAgent, false, 4),
            (Origin::UserAgent, true, 4),
        ];
        for (origin, important, ordinal) in cases {
            assert_eq!(
                PrecedenceLevel::of(origin, important).ordinal(),
                ordinal,
                "{origin} important={important}"
            );
        }
    }

    #[test]
    fn ordinal_matches_ordering() {
        let levels = [
            PrecedenceLevel::UserImportant,
            PrecedenceLevel::AuthorImportant,
            PrecedenceLevel::AuthorNormal,
            PrecedenceLevel::UserNormal,
            PrecedenceLevel::UserAgent,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].ordinal() < pair[1].ordinal());
        }
    }

    #[test]
    fn origin_names() {
        for origin in [Origin::Inline, Origin::Author, Origin::User, Origin::UserAgent] {
            assert_eq!(origin.as_str().parse::<Origin>(), Ok(origin));
        }
        assert!(matches!(
            "agent".parse::<Origin>(),
            Err(CascadeError::InvalidState(_))
        ));
    }
}
