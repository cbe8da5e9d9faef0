// Rejected-character records

use std::fmt;

/// A value character that failed a required token's pattern.
///
/// Rejections are non-fatal: the transducer skips the character and keeps
/// going. Hosts surface them through an `on_invalid` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Char index of the rejected character in the raw value.
    pub position: usize,
    /// The rejected character.
    pub character: char,
    /// Source of the pattern the character was expected to match.
    pub expected: String,
}

impl Rejection {
    pub fn new(position: usize, character: char, expected: impl Into<String>) -> Self {
        Self {
            position,
            character,
            expected: expected.into(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} expected {}",
            self.position, self.character, self.expected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let r = Rejection::new(3, 'x', "[0-9]");
        assert_eq!(r.to_string(), "3 'x' expected [0-9]");
    }
}
