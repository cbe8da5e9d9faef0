// Token table: mask character to matching rule
//
// The default table is plain configuration. Callers build their own table by
// merging overrides over the defaults; a table is never mutated once a mask
// borrows it.

use std::fmt;

use hashbrown::HashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::MaskError;

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// The single-character matcher of a token.
///
/// The built-in classes are ASCII-only and case-sensitive in the regex sense:
/// `Letter` lists both cases, so it accepts `a` and `A` alike.
#[derive(Debug, Clone)]
pub enum CharClass {
    /// `[0-9]`
    Digit,
    /// `[a-zA-Z]`
    Letter,
    /// `[a-zA-Z0-9]`
    Alphanumeric,
    /// Any user-supplied regex, tested against the single character.
    Pattern(Regex),
}

impl CharClass {
    /// Compile a user pattern. Sources equal to a built-in class map to it.
    pub fn from_source(source: &str) -> Result<Self, regex::Error> {
        Ok(match source {
            "[0-9]" | r"\d" => CharClass::Digit,
            "[a-zA-Z]" => CharClass::Letter,
            "[a-zA-Z0-9]" => CharClass::Alphanumeric,
            _ => CharClass::Pattern(Regex::new(source)?),
        })
    }

    pub fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Letter => c.is_ascii_alphabetic(),
            CharClass::Alphanumeric => c.is_ascii_alphanumeric(),
            CharClass::Pattern(re) => {
                let mut buf = [0u8; 4];
                re.is_match(c.encode_utf8(&mut buf))
            }
        }
    }

    /// Regex source of this class.
    pub fn source(&self) -> &str {
        match self {
            CharClass::Digit => "[0-9]",
            CharClass::Letter => "[a-zA-Z]",
            CharClass::Alphanumeric => "[a-zA-Z0-9]",
            CharClass::Pattern(re) => re.as_str(),
        }
    }

    /// Source usable as a single regex atom (user patterns get a group).
    pub fn atom(&self) -> String {
        match self {
            CharClass::Pattern(re) => format!("(?:{})", re.as_str()),
            _ => self.source().to_string(),
        }
    }
}

impl PartialEq for CharClass {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

// ---------------------------------------------------------------------------
// MaskToken
// ---------------------------------------------------------------------------

/// Semantics of one token character of the mask grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskToken {
    pub class: CharClass,
    /// The slot may be skipped when the value character does not match.
    pub optional: bool,
    /// The slot may repeat any number of times.
    pub recursive: bool,
    /// Emitted in place of a value character that does not match.
    pub fallback: Option<char>,
}

impl MaskToken {
    pub fn new(class: CharClass) -> Self {
        Self {
            class,
            optional: false,
            recursive: false,
            fallback: None,
        }
    }

    /// Build a token from regex source.
    pub fn from_pattern(source: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(CharClass::from_source(source)?))
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    pub fn with_fallback(mut self, fallback: char) -> Self {
        self.fallback = Some(fallback);
        self
    }

    #[inline]
    pub fn matches(&self, c: char) -> bool {
        self.class.matches(c)
    }

    pub fn pattern(&self) -> &str {
        self.class.source()
    }
}

/// Serializable description of a token, as found in field options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSpec {
    pub pattern: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub fallback: Option<char>,
}

impl TokenSpec {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            optional: false,
            recursive: false,
            fallback: None,
        }
    }

    /// Compile into a token. `token` only labels the error.
    pub fn build(&self, token: char) -> Result<MaskToken, MaskError> {
        let class = CharClass::from_source(&self.pattern)
            .map_err(|source| MaskError::InvalidPattern { token, source })?;
        Ok(MaskToken {
            class,
            optional: self.optional,
            recursive: self.recursive,
            fallback: self.fallback,
        })
    }
}

// ---------------------------------------------------------------------------
// TokenTable
// ---------------------------------------------------------------------------

/// Lookup from mask character to token. Characters not in the table are
/// literals.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenTable {
    tokens: HashMap<char, MaskToken>,
}

impl Default for TokenTable {
    /// The default table:
    ///
    /// | char | class | modifiers |
    /// |------|-------|-----------|
    /// | `0` | digit | |
    /// | `9` | digit | optional |
    /// | `#` | digit | recursive |
    /// | `A` | letter or digit | |
    /// | `S` | letter | |
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert('0', MaskToken::new(CharClass::Digit));
        table.insert('9', MaskToken::new(CharClass::Digit).optional());
        table.insert('#', MaskToken::new(CharClass::Digit).recursive());
        table.insert('A', MaskToken::new(CharClass::Alphanumeric));
        table.insert('S', MaskToken::new(CharClass::Letter));
        table
    }
}

impl TokenTable {
    /// A table with no tokens: every mask character is a literal.
    pub fn empty() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    /// The default table with `overrides` merged over it. On a key collision
    /// the later entry wins.
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (char, MaskToken)>,
    {
        let mut table = Self::default();
        table.merge(overrides);
        table
    }

    /// The default table with serialized token specs merged over it.
    pub fn from_specs<'a, I>(specs: I) -> Result<Self, MaskError>
    where
        I: IntoIterator<Item = (&'a char, &'a TokenSpec)>,
    {
        let mut table = Self::default();
        for (&c, spec) in specs {
            table.insert(c, spec.build(c)?);
        }
        Ok(table)
    }

    /// Merge `overrides` into this table, replacing existing entries.
    pub fn merge<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (char, MaskToken)>,
    {
        for (c, token) in overrides {
            self.insert(c, token);
        }
    }

    /// Insert or replace a token, returning the previous one.
    pub fn insert(&mut self, c: char, token: MaskToken) -> Option<MaskToken> {
        self.tokens.insert(c, token)
    }

    #[inline]
    pub fn get(&self, c: char) -> Option<&MaskToken> {
        self.tokens.get(&c)
    }

    #[inline]
    pub fn is_token(&self, c: char) -> bool {
        self.tokens.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token characters, in no particular order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.tokens.keys().copied()
    }
}
