// Compiled mask regexes keyed by resolved pattern
//
// Dynamic masks resolve to a handful of patterns that alternate as the user
// types, so compiled regexes are kept per pattern. The cache is bounded: when
// full it is cleared and refilled on demand.

use hashbrown::HashMap;

use inputmask_engine::{Mask, MaskError, MaskRegex};

/// Default number of patterns kept.
pub const DEFAULT_CAPACITY: usize = 16;

/// A bounded cache of compiled mask regexes.
///
/// Entries are keyed by mask pattern only, so one cache must not be shared
/// between fields with different token tables.
#[derive(Debug, Clone)]
pub struct RegexCache {
    capacity: usize,
    entries: HashMap<String, MaskRegex>,
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RegexCache {
    /// Create a cache holding at most `capacity` patterns (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// The compiled regex for `mask`, compiling it on a miss.
    pub fn get_or_compile(&mut self, mask: &Mask<'_>) -> Result<MaskRegex, MaskError> {
        let pattern = mask.pattern();
        if let Some(regex) = self.entries.get(&pattern) {
            return Ok(regex.clone());
        }
        let regex = mask.to_regex()?;
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(pattern, regex.clone());
        Ok(regex)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
