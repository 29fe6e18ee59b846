//! [`LikePattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// SQL pattern to be used with a `LIKE` operator.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct LikePattern(String);

impl LikePattern {
    /// Creates a new [`LikePattern`] matching any text containing the given
    /// `input` literally.
    #[must_use]
    pub fn contains(input: &str) -> Self {
        Self(format!(
            "%{}%",
            input
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

#[cfg(test)]
mod spec {
    use super::LikePattern;

    #[test]
    fn wraps_input() {
        assert_eq!(LikePattern::contains("Miami").to_string(), "%Miami%");
        assert_eq!(LikePattern::contains("").to_string(), "%%");
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(
            LikePattern::contains(r"50%_off\").to_string(),
            r"%50\%\_off\\%",
        );
    }
}
