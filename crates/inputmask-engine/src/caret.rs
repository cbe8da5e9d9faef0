// Caret correction after a transduction
//
// Masking inserts and removes literals around the character the user just
// typed. The corrected caret is
//
//     min(position + (new_len - old_len) - literal_delta, new_len)
//
// where `literal_delta` is the net number of characters the transduction
// added on the far side of the caret. All offsets are in chars.

use inputmask_core::enums::Direction;
use inputmask_core::text::{char_len, char_prefix, char_suffix};

use crate::mask::Mask;
use crate::transducer::transduce;

/// One edit, measured for caret correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretEdit {
    /// Caret within the raw (pre-mask) value.
    pub position: usize,
    /// Length of the raw value.
    pub old_len: usize,
    /// Length of the masked value.
    pub new_len: usize,
    /// Characters gained past the caret, minus those lost there.
    pub literal_delta: isize,
}

/// Corrected caret position, always within `[0, new_len]`.
pub fn correct(edit: &CaretEdit) -> usize {
    let shifted = edit.position as isize + edit.new_len as isize
        - edit.old_len as isize
        - edit.literal_delta;
    shifted.clamp(0, edit.new_len as isize) as usize
}

/// Measure the edit that turns `raw` into its masked form.
///
/// The part of `raw` on the scan-start side of the caret is transduced on
/// its own; its masked length tells where the caret's logical character
/// landed.
pub fn measure(mask: &Mask<'_>, raw: &str, position: usize, direction: Direction) -> CaretEdit {
    let old_len = char_len(raw);
    let position = position.min(old_len);
    let new_len = char_len(&transduce(mask, raw, direction, false).value);

    let target = match direction {
        Direction::Forward => {
            let head = transduce(mask, char_prefix(raw, position), direction, false);
            char_len(&head.value).min(new_len)
        }
        Direction::Reverse => {
            let tail = transduce(mask, char_suffix(raw, position), direction, false);
            new_len.saturating_sub(char_len(&tail.value))
        }
    };

    let literal_delta =
        position as isize + new_len as isize - old_len as isize - target as isize;
    CaretEdit {
        position,
        old_len,
        new_len,
        literal_delta,
    }
}

/// Nearest token slot at or before `position - 1`, walking back over
/// literals. Positions past the mask clamp to its last slot.
pub fn token_slot_before(mask: &Mask<'_>, position: usize) -> Option<usize> {
    if mask.is_empty() || position == 0 {
        return None;
    }
    let mut idx = (position - 1).min(mask.len() - 1);
    loop {
        if mask.is_token_at(idx) {
            return Some(idx);
        }
        if idx == 0 {
            return None;
        }
        idx -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenTable;

    const PHONE: &str = "(00) 00000-0000";

    fn caret_after(pattern: &str, raw: &str, position: usize, direction: Direction) -> usize {
        let table = TokenTable::default();
        let mask = Mask::new(pattern, &table).unwrap();
        correct(&mask.caret_edit(raw, position, direction))
    }

    #[test]
    fn formula_clamps() {
        let edit = CaretEdit {
            position: 10,
            old_len: 4,
            new_len: 6,
            literal_delta: 0,
        };
        assert_eq!(correct(&edit), 6);
        let edit = CaretEdit {
            position: 0,
            old_len: 5,
            new_len: 2,
            literal_delta: 1,
        };
        assert_eq!(correct(&edit), 0);
    }

    #[test]
    fn typing_at_end_follows_inserted_literals() {
        // "4" -> "(4"
        assert_eq!(caret_after(PHONE, "4", 1, Direction::Forward), 2);
        // "(419" -> "(41) 9"
        assert_eq!(caret_after(PHONE, "(419", 4, Direction::Forward), 6);
    }

    #[test]
    fn typing_before_a_literal_jumps_over_it() {
        // User typed `9` with the caret before `)` of "(41)".
        assert_eq!(caret_after(PHONE, "(419)", 4, Direction::Forward), 6);
    }

    #[test]
    fn typing_in_the_middle_stays_put() {
        // `1` inserted after "(41) " of "(41) 9999-8776".
        let raw = "(41) 19999-8776";
        assert_eq!(caret_after("(00) 0000-00009", raw, 6, Direction::Forward), 6);
    }

    #[test]
    fn paste_keeps_caret_at_end() {
        assert_eq!(caret_after(PHONE, "4199", 4, Direction::Forward), 7);
    }

    #[test]
    fn reverse_caret_at_end() {
        assert_eq!(caret_after("#.##0,00", "123456", 6, Direction::Reverse), 8);
    }

    #[test]
    fn reverse_caret_counts_from_the_right() {
        // Caret before "56": the same two characters stay to its right.
        assert_eq!(caret_after("#.##0,00", "123456", 4, Direction::Reverse), 6);
    }

    #[test]
    fn output_is_bounded() {
        for raw in ["", "4", "(41) 9", "abc", "(41) 99988-77665544"] {
            for position in 0..25 {
                let table = TokenTable::default();
                let mask = Mask::new(PHONE, &table).unwrap();
                let edit = mask.caret_edit(raw, position, Direction::Forward);
                assert!(correct(&edit) <= edit.new_len);
            }
        }
    }

    #[test]
    fn slot_walk_skips_literals() {
        let table = TokenTable::default();
        let mask = Mask::new(PHONE, &table).unwrap();
        // Caret after "(41) ": previous token is the `1` at index 2.
        assert_eq!(token_slot_before(&mask, 5), Some(2));
        assert_eq!(token_slot_before(&mask, 3), Some(2));
        assert_eq!(token_slot_before(&mask, 1), None);
        assert_eq!(token_slot_before(&mask, 0), None);
        // Past the end clamps to the last slot.
        assert_eq!(token_slot_before(&mask, 99), Some(14));
    }
}
