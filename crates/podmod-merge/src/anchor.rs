//! Insertion anchors.

use std::fmt;

/// A line matcher used as the reference point for an insertion.
///
/// Matches a literal token anywhere in a line, ignoring case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    token: String,
    folded: String,
}

impl Anchor {
    /// Case-insensitive match of a literal token anywhere in a line.
    pub fn literal(token: &str) -> Self {
        Self {
            token: token.to_string(),
            folded: token.to_lowercase(),
        }
    }

    /// Returns `true` if `line` contains the token.
    pub fn is_match(&self, line: &str) -> bool {
        line.to_lowercase().contains(&self.folded)
    }

    /// The token as given.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/i", self.token)
    }
}
