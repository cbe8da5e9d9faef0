// Field options

use hashbrown::HashMap;
use serde::Deserialize;

use inputmask_core::enums::DEFAULT_BY_PASS_KEYS;
use inputmask_engine::{TokenSpec, TokenTable};

use crate::FieldError;

/// Options of a masked field.
///
/// Field names are camelCase on the wire so the same object can come from a
/// JS host or a JSON file. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOptions {
    /// Scan right to left (currency-style masks).
    pub reverse: bool,
    /// On focus-out, clear a value that does not match the mask.
    pub clear_if_not_match: bool,
    /// Select the whole value on focus.
    pub select_on_focus: bool,
    /// Placeholder text offered to the host.
    pub placeholder: Option<String>,
    /// Token overrides merged over the default token table.
    pub translation: HashMap<char, TokenSpec>,
    /// Key codes that never trigger masking.
    pub by_pass_keys: Vec<u32>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            reverse: false,
            clear_if_not_match: false,
            select_on_focus: false,
            placeholder: None,
            translation: HashMap::new(),
            by_pass_keys: DEFAULT_BY_PASS_KEYS.to_vec(),
        }
    }
}

impl FieldOptions {
    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        serde_json::from_str(json).map_err(|e| FieldError::InvalidOptions(e.to_string()))
    }

    /// The default token table with `translation` merged over it.
    pub fn token_table(&self) -> Result<TokenTable, FieldError> {
        Ok(TokenTable::from_specs(&self.translation)?)
    }

    #[inline]
    pub fn is_by_pass_key(&self, key_code: u32) -> bool {
        self.by_pass_keys.contains(&key_code)
    }
}
