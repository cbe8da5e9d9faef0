// Value transducer: raw value -> masked or clean value
//
// Two cursors walk the mask (`m`) and the value (`v`) together, left to right
// or right to left. A token that matches consumes a value character; an
// optional or fallback token that does not match gives up its slot and the
// same value character is retried against the next one; any other mismatch
// rejects the value character. Literals are emitted from the mask and
// consume an equal value character when there is one.

use std::collections::VecDeque;

use inputmask_core::enums::Direction;
use inputmask_core::rejection::Rejection;

use crate::mask::Mask;

/// Result of one transduction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transduction {
    /// Masked value, or clean value when literals were skipped.
    pub value: String,
    /// Value characters that failed a required token.
    pub rejected: Vec<Rejection>,
    /// Number of literal mask characters emitted into `value`.
    pub literal_count: usize,
}

impl Transduction {
    pub fn is_valid(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Output buffer that grows at the end the scan moves away from.
struct Output {
    buf: VecDeque<char>,
    direction: Direction,
}

impl Output {
    fn new(direction: Direction, capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            direction,
        }
    }

    #[inline]
    fn emit(&mut self, c: char) {
        match self.direction {
            Direction::Forward => self.buf.push_back(c),
            Direction::Reverse => self.buf.push_front(c),
        }
    }

    fn finish(self) -> String {
        self.buf.into_iter().collect()
    }
}

/// What the state machine does with the current (mask, value) pair.
enum Step {
    /// Token matched: emit the value character, advance both cursors.
    Accept,
    /// Optional token skipped: advance the mask, retry the value character.
    SkipSlot,
    /// Fallback emitted: advance the mask, retry the value character.
    Fallback(char),
    /// Required token failed: drop the value character.
    Reject,
    /// Literal slot: emit it, consume the value character if it is equal.
    Literal { consume: bool },
}

/// Transduce `value` through `mask`.
///
/// With `skip_literals` the literal mask characters are left out, which
/// yields the clean value.
pub fn transduce(
    mask: &Mask<'_>,
    value: &str,
    direction: Direction,
    skip_literals: bool,
) -> Transduction {
    let mask_chars = mask.chars();
    let value_chars: Vec<char> = value.chars().collect();
    let mask_len = mask_chars.len() as isize;
    let value_len = value_chars.len() as isize;
    let step = direction.step();

    // `far_end` is the last mask position in scan order.
    let (mut m, mut v, far_end) = match direction {
        Direction::Forward => (0, 0, mask_len - 1),
        Direction::Reverse => (mask_len - 1, value_len - 1, 0),
    };
    let mut recursive_anchor: Option<isize> = None;

    let mut out = Output::new(direction, mask_chars.len().max(value_chars.len()));
    let mut rejected = Vec::new();
    let mut literal_count = 0;

    while (0..mask_len).contains(&m) && (0..value_len).contains(&v) {
        let mask_ch = mask_chars[m as usize];
        let value_ch = value_chars[v as usize];
        let token = mask.table().get(mask_ch);

        let action = match token {
            Some(t) if t.matches(value_ch) => Step::Accept,
            Some(t) if t.optional => Step::SkipSlot,
            Some(t) => match t.fallback {
                Some(fallback) => Step::Fallback(fallback),
                None => Step::Reject,
            },
            None => Step::Literal {
                consume: value_ch == mask_ch,
            },
        };

        match action {
            Step::Accept => {
                out.emit(value_ch);
                if token.is_some_and(|t| t.recursive) {
                    match recursive_anchor {
                        None => recursive_anchor = Some(m),
                        Some(anchor) if m == far_end && m != anchor => m = anchor - step,
                        Some(_) => {}
                    }
                    // A recursive token in the last slot repeats in place.
                    if recursive_anchor == Some(far_end) {
                        m -= step;
                    }
                }
                m += step;
                v += step;
            }
            Step::SkipSlot => m += step,
            Step::Fallback(fallback) => {
                out.emit(fallback);
                m += step;
            }
            Step::Reject => {
                let expected = token.map(|t| t.pattern()).unwrap_or_default();
                log::trace!(
                    target: "inputmask.transducer",
                    "rejected {:?} at {} (expected {})",
                    value_ch,
                    v,
                    expected
                );
                rejected.push(Rejection::new(v as usize, value_ch, expected));
                v += step;
            }
            Step::Literal { consume } => {
                if !skip_literals {
                    out.emit(mask_ch);
                    literal_count += 1;
                }
                if consume {
                    v += step;
                }
                m += step;
            }
        }
    }

    // Show the closing literal as soon as only it is left to type.
    if !skip_literals && mask_len == value_len + 1 {
        let edge = mask_chars[far_end as usize];
        if !mask.table().is_token(edge) {
            out.emit(edge);
            literal_count += 1;
        }
    }

    let value = out.finish();
    log::trace!(
        target: "inputmask.transducer",
        "mask_len={} value_len={} out_len={} rejected={}",
        mask_len,
        value_len,
        value.chars().count(),
        rejected.len()
    );
    Transduction {
        value,
        rejected,
        literal_count,
    }
}
