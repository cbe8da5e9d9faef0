// Char-indexed string helpers
//
// Masks, values and caret offsets are all measured in chars, not bytes.

/// Number of chars in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` chars of `s` (all of `s` if it is shorter).
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Everything from char index `n` on (empty if `s` is shorter).
pub fn char_suffix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}
