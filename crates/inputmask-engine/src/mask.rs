// Mask patterns bound to a token table

use std::borrow::Cow;
use std::fmt;

use inputmask_core::enums::Direction;

use crate::caret::{self, CaretEdit};
use crate::compiler::{self, MaskRegex};
use crate::token::{MaskToken, TokenTable};
use crate::transducer::{self, Transduction};
use crate::MaskError;

/// One mask position: a token reference or a literal character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'t> {
    Token(&'t MaskToken),
    Literal(char),
}

impl Slot<'_> {
    pub fn is_token(&self) -> bool {
        matches!(self, Slot::Token(_))
    }
}

/// A mask pattern resolved against a token table.
///
/// The mask borrows its table; masks are cheap to build, so owners of a
/// table (such as a masked field) create them on the fly per call.
#[derive(Debug, Clone)]
pub struct Mask<'t> {
    chars: Vec<char>,
    table: &'t TokenTable,
    recursive: Option<char>,
}

impl<'t> Mask<'t> {
    /// Bind `pattern` to `table`.
    ///
    /// At most one distinct recursive token character may appear; it may
    /// appear any number of times (`"#.##0,00"` is fine).
    pub fn new(pattern: &str, table: &'t TokenTable) -> Result<Self, MaskError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut recursive: Option<char> = None;
        for &c in &chars {
            if !table.get(c).is_some_and(|t| t.recursive) {
                continue;
            }
            match recursive {
                None => recursive = Some(c),
                Some(first) if first != c => {
                    return Err(MaskError::MultipleRecursiveTokens { first, second: c });
                }
                Some(_) => {}
            }
        }
        Ok(Self {
            chars,
            table,
            recursive,
        })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn pattern(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn table(&self) -> &'t TokenTable {
        self.table
    }

    pub fn slot(&self, idx: usize) -> Option<Slot<'t>> {
        let c = *self.chars.get(idx)?;
        Some(match self.table.get(c) {
            Some(token) => Slot::Token(token),
            None => Slot::Literal(c),
        })
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot<'t>> + '_ {
        (0..self.chars.len()).filter_map(|idx| self.slot(idx))
    }

    #[inline]
    pub fn is_token_at(&self, idx: usize) -> bool {
        self.chars.get(idx).is_some_and(|&c| self.table.is_token(c))
    }

    pub fn token_count(&self) -> usize {
        self.chars.iter().filter(|&&c| self.table.is_token(c)).count()
    }

    /// The recursive token character used by this mask, if any.
    pub fn recursive_token(&self) -> Option<(char, &'t MaskToken)> {
        let c = self.recursive?;
        self.table.get(c).map(|token| (c, token))
    }

    /// Masked representation of `value`.
    pub fn apply(&self, value: &str, direction: Direction) -> Transduction {
        transducer::transduce(self, value, direction, false)
    }

    /// Clean (unmasked) representation of `value`.
    pub fn clean(&self, value: &str, direction: Direction) -> Transduction {
        transducer::transduce(self, value, direction, true)
    }

    /// Validating regex for this mask.
    pub fn to_regex(&self) -> Result<MaskRegex, MaskError> {
        compiler::compile(self)
    }

    /// Measure a caret edit: `raw` is the value before masking and `position`
    /// the caret within it.
    pub fn caret_edit(&self, raw: &str, position: usize, direction: Direction) -> CaretEdit {
        caret::measure(self, raw, position, direction)
    }

    /// Nearest token slot at or before `position - 1`.
    pub fn token_slot_before(&self, position: usize) -> Option<usize> {
        caret::token_slot_before(self, position)
    }
}

// ---------------------------------------------------------------------------
// MaskSpec
// ---------------------------------------------------------------------------

/// A mask given either as a fixed pattern or as a function of the current
/// value, re-evaluated before every transduction.
pub enum MaskSpec {
    Literal(String),
    Dynamic(Box<dyn Fn(&str) -> String>),
}

impl MaskSpec {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        MaskSpec::Dynamic(Box::new(f))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, MaskSpec::Dynamic(_))
    }

    /// The pattern to use for `value`.
    pub fn resolve(&self, value: &str) -> Cow<'_, str> {
        match self {
            MaskSpec::Literal(pattern) => Cow::Borrowed(pattern),
            MaskSpec::Dynamic(f) => Cow::Owned(f(value)),
        }
    }
}

impl fmt::Debug for MaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskSpec::Literal(pattern) => f.debug_tuple("Literal").field(pattern).finish(),
            MaskSpec::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for MaskSpec {
    fn from(pattern: &str) -> Self {
        MaskSpec::Literal(pattern.to_string())
    }
}

impl From<String> for MaskSpec {
    fn from(pattern: String) -> Self {
        MaskSpec::Literal(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{CharClass, MaskToken};

    #[test]
    fn slots() {
        let table = TokenTable::default();
        let mask = Mask::new("(00)", &table).unwrap();
        assert_eq!(mask.len(), 4);
        assert_eq!(mask.slot(0), Some(Slot::Literal('(')));
        assert!(mask.slot(1).is_some_and(|s| s.is_token()));
        assert_eq!(mask.slot(4), None);
        assert_eq!(mask.token_count(), 2);
        assert_eq!(mask.pattern(), "(00)");
    }

    #[test]
    fn repeated_recursive_token_is_accepted() {
        let table = TokenTable::default();
        let mask = Mask::new("#.##0,00", &table).unwrap();
        assert_eq!(mask.recursive_token().map(|(c, _)| c), Some('#'));
    }

    #[test]
    fn two_recursive_tokens_are_rejected() {
        let table =
            TokenTable::with_overrides([('*', MaskToken::new(CharClass::Letter).recursive())]);
        match Mask::new("#-*", &table) {
            Err(MaskError::MultipleRecursiveTokens { first, second }) => {
                assert_eq!((first, second), ('#', '*'));
            }
            other => panic!("expected MultipleRecursiveTokens, got {other:?}"),
        }
    }

    #[test]
    fn empty_mask() {
        let table = TokenTable::default();
        let mask = Mask::new("", &table).unwrap();
        assert!(mask.is_empty());
        assert_eq!(mask.apply("123", Direction::Forward).value, "");
    }

    #[test]
    fn dynamic_spec_resolves_per_value() {
        let spec = MaskSpec::dynamic(|v| {
            if v.len() > 3 {
                "0000".to_string()
            } else {
                "000".to_string()
            }
        });
        assert!(spec.is_dynamic());
        assert_eq!(spec.resolve("12"), "000");
        assert_eq!(spec.resolve("1234"), "0000");
        assert_eq!(MaskSpec::from("00").resolve("anything"), "00");
        assert_eq!(format!("{spec:?}"), "Dynamic(..)");
    }
}
