// Mask-to-regex compilation
//
// Each token contributes its class as one atom, optional tokens get a `?`,
// literals are escaped. The recursive token is first emitted as a marker;
// once the whole mask is laid out, the span from the first marker to the last
// is wrapped in `(...)?` and every marker becomes the token's class. The
// anchored form also lets that span repeat the way recursive scans wrap.

use regex::Regex;

use crate::mask::{Mask, Slot};
use crate::MaskError;

/// Validating regex of a mask.
///
/// The compiled expression is case-sensitive and unanchored; callers that
/// need a whole-value check use [`MaskRegex::is_full_match`].
#[derive(Debug, Clone)]
pub struct MaskRegex {
    regex: Regex,
    anchored: Regex,
}

impl MaskRegex {
    /// Regex source, unanchored.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether some substring of `value` matches the mask.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Whether the whole of `value` matches the mask.
    pub fn is_full_match(&self, value: &str) -> bool {
        self.anchored.is_match(value)
    }
}

enum Piece {
    Text(String),
    Marker,
}

impl Piece {
    fn text<'a>(&'a self, recursive_atom: &'a str) -> &'a str {
        match self {
            Piece::Text(text) => text,
            Piece::Marker => recursive_atom,
        }
    }
}

/// Compile `mask` into its validating regex.
pub fn compile(mask: &Mask<'_>) -> Result<MaskRegex, MaskError> {
    let source = regex_source(mask);
    let full = full_match_source(mask);
    log::debug!(target: "inputmask.compiler", "mask {:?} -> /{}/ /{}/", mask.pattern(), source, full);
    let regex = Regex::new(&source)?;
    let anchored = Regex::new(&full)?;
    Ok(MaskRegex { regex, anchored })
}

fn pieces(mask: &Mask<'_>) -> (Vec<Piece>, String) {
    let mut pieces = Vec::with_capacity(mask.len());
    for slot in mask.slots() {
        pieces.push(match slot {
            Slot::Token(token) if token.recursive => Piece::Marker,
            Slot::Token(token) if token.optional => Piece::Text(format!("{}?", token.class.atom())),
            Slot::Token(token) => Piece::Text(token.class.atom()),
            Slot::Literal(c) => Piece::Text(regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        });
    }
    let recursive_atom = mask
        .recursive_token()
        .map(|(_, token)| token.class.atom())
        .unwrap_or_default();
    (pieces, recursive_atom)
}

/// First and last marker positions.
fn marker_span(pieces: &[Piece]) -> Option<(usize, usize)> {
    let first = pieces.iter().position(|p| matches!(p, Piece::Marker))?;
    let last = pieces.iter().rposition(|p| matches!(p, Piece::Marker))?;
    Some((first, last))
}

fn concat(pieces: &[Piece], recursive_atom: &str) -> String {
    pieces.iter().map(|p| p.text(recursive_atom)).collect()
}

/// Group matching any non-empty suffix of `pieces`.
fn suffixes(pieces: &[Piece], recursive_atom: &str) -> String {
    pieces.iter().fold(String::new(), |acc, p| {
        let text = p.text(recursive_atom);
        if acc.is_empty() {
            format!("(?:{text})")
        } else {
            format!("(?:{acc}?{text})")
        }
    })
}

/// Group matching any non-empty prefix of `pieces`.
fn prefixes(pieces: &[Piece], recursive_atom: &str) -> String {
    pieces.iter().rev().fold(String::new(), |acc, p| {
        let text = p.text(recursive_atom);
        if acc.is_empty() {
            format!("(?:{text})")
        } else {
            format!("(?:{text}{acc}?)")
        }
    })
}

/// Regex source for `mask`, without compiling it.
pub fn regex_source(mask: &Mask<'_>) -> String {
    let (pieces, atom) = pieces(mask);
    match marker_span(&pieces) {
        None => concat(&pieces, &atom),
        Some((first, last)) => format!(
            "{}({})?{}",
            concat(&pieces[..first], &atom),
            concat(&pieces[first..=last], &atom),
            concat(&pieces[last + 1..], &atom),
        ),
    }
}

/// Anchored source accepting every complete value of `mask`.
///
/// A recursive token in a mask's first slot makes reverse scans wrap back to
/// the last recursive slot, so completed values look like a tail of the
/// repeated span, any number of whole spans, then the fixed rest of the mask.
/// A recursive token in the last slot does the same for forward scans with
/// the head and tail swapped. Both shapes are offered next to the plain
/// source.
pub fn full_match_source(mask: &Mask<'_>) -> String {
    let (pieces, atom) = pieces(mask);
    let mut branches = vec![regex_source(mask)];
    if let Some((first, last)) = marker_span(&pieces) {
        if first == 0 {
            let unit = &pieces[..=last];
            branches.push(format!(
                "{}?(?:{})*{}",
                suffixes(unit, &atom),
                concat(unit, &atom),
                concat(&pieces[last + 1..], &atom),
            ));
        }
        if last == pieces.len() - 1 {
            let unit = &pieces[first..];
            branches.push(format!(
                "{}(?:{})*{}?",
                concat(&pieces[..first], &atom),
                concat(unit, &atom),
                prefixes(unit, &atom),
            ));
        }
    }
    format!("^(?:{})$", branches.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{CharClass, MaskToken, TokenTable};

    fn compile_with(pattern: &str, table: &TokenTable) -> MaskRegex {
        Mask::new(pattern, table).unwrap().to_regex().unwrap()
    }

    #[test]
    fn phone_mask() {
        let table = TokenTable::default();
        let re = compile_with("(00) 00000-0000", &table);
        assert!(re.is_full_match("(41) 99988-7766"));
        assert!(!re.is_full_match("(41) 9998-7766"));
        assert!(!re.is_full_match("(41) 99988-776"));
        assert!(re.is_match("tel: (41) 99988-7766"));
        assert!(!re.is_full_match("tel: (41) 99988-7766"));
    }

    #[test]
    fn literals_are_escaped() {
        let table = TokenTable::default();
        let re = compile_with("000.000", &table);
        assert!(re.is_full_match("123.456"));
        assert!(!re.is_full_match("123x456"));
        assert!(re.as_str().starts_with("[0-9][0-9][0-9]"));
    }

    #[test]
    fn optional_tokens() {
        let table = TokenTable::default();
        let re = compile_with("(00) 0000-00009", &table);
        assert!(re.is_full_match("(41) 9998-8776"));
        assert!(re.is_full_match("(41) 9998-87766"));
        assert!(!re.is_full_match("(41) 9998-877"));
    }

    #[test]
    fn recursive_span_source() {
        let table = TokenTable::default();
        let mask = Mask::new("#.##0,00", &table).unwrap();
        assert_eq!(regex_source(&mask), r"([0-9]\.[0-9][0-9])?[0-9],[0-9][0-9]");
        let re = mask.to_regex().unwrap();
        assert!(re.is_full_match("1.234,56"));
        assert!(re.is_full_match("4,56"));
        assert!(!re.is_full_match("1.2345,67"));
        assert!(!re.is_full_match("12.34,56"));
        assert!(!re.is_full_match("1.234,5"));
    }

    #[test]
    fn reverse_recursion_repeats_the_span() {
        let table = TokenTable::default();
        let re = compile_with("#.##0,00", &table);
        assert!(re.is_full_match("34,56"));
        assert!(re.is_full_match("12.345,67"));
        assert!(re.is_full_match("123.456,78"));
        assert!(re.is_full_match("1.234.567,89"));
        assert!(re.is_full_match("123.456.789,01"));
        assert!(!re.is_full_match("12.345.67,89"));
    }

    #[test]
    fn forward_recursion_in_last_slot_repeats() {
        let table = TokenTable::default();
        let re = compile_with("0#", &table);
        assert!(re.is_full_match("1"));
        assert!(re.is_full_match("123456"));
        assert!(!re.is_full_match("12a"));
    }

    #[test]
    fn single_recursive_marker() {
        let table = TokenTable::default();
        let mask = Mask::new("#0", &table).unwrap();
        assert_eq!(regex_source(&mask), "([0-9])?[0-9]");
        let re = mask.to_regex().unwrap();
        assert!(re.is_full_match("7"));
        assert!(re.is_full_match("98765"));
    }

    #[test]
    fn case_sensitive_custom_class() {
        let table = TokenTable::with_overrides([('U', MaskToken::new(
            CharClass::from_source("[A-Z]").unwrap(),
        ))]);
        let re = compile_with("UU-00", &table);
        assert!(re.is_full_match("AB-12"));
        assert!(!re.is_full_match("ab-12"));
    }

    #[test]
    fn letters_match_both_cases() {
        let table = TokenTable::default();
        let re = compile_with("SS-0000", &table);
        assert!(re.is_full_match("ab-1234"));
        assert!(re.is_full_match("AB-1234"));
    }
}
