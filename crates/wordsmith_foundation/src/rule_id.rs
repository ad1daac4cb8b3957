//! Rule identifiers.

use std::fmt;

/// Identifier of a character group or sub-grammar.
///
/// A rule id is always a single ASCII uppercase letter. Uppercase letters
/// outside ASCII (`Ä`, `Ö`, ...) are ordinary literals in patterns.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RuleId(char);

impl RuleId {
    /// The entry rule every generated word starts from.
    pub const ENTRY: Self = Self('W');

    /// Creates a rule id from a character.
    ///
    /// Returns `None` if the character is not an ASCII uppercase letter.
    #[must_use]
    pub const fn new(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Self(c))
        } else {
            None
        }
    }

    /// Returns true if `c` would be read as a rule reference inside a pattern.
    #[must_use]
    pub const fn is_reference(c: char) -> bool {
        c.is_ascii_uppercase()
    }

    /// Returns the underlying character.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Returns true if this is the entry rule `W`.
    #[must_use]
    pub const fn is_entry(self) -> bool {
        self.0 == Self::ENTRY.0
    }
}

impl TryFrom<char> for RuleId {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c).ok_or(c)
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({})", self.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
