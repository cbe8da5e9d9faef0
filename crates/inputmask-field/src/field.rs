// MaskedField: a masked input element driven by host events.
//
// Design notes:
// - The field owns its token table and creates a `Mask` on the fly in each
//   call, so no borrowed mask outlives a call.
// - Dynamic mask specs are re-resolved against the raw value before every
//   transduction. The last resolved pattern is kept for queries.
// - Compiled regexes live in a `RefCell` cache so `&self` queries can fill it.

use std::cell::RefCell;

use inputmask_core::enums::{Direction, FieldEvent, KEY_BACKSPACE};
use inputmask_core::rejection::Rejection;
use inputmask_core::text::char_len;
use inputmask_engine::caret;
use inputmask_engine::{Mask, MaskSpec, TokenTable};

use crate::FieldError;
use crate::cache::RegexCache;
use crate::callbacks::{Callbacks, Outcome};
use crate::options::FieldOptions;

const LOG_TARGET: &str = "inputmask.field";

/// What the host should write back into the input element after an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldUpdate {
    /// The element's new value.
    pub value: String,
    /// The element's new caret, in chars.
    pub caret: usize,
    /// Select the whole value (focus with `select_on_focus`).
    pub select_all: bool,
    /// The value was cleared on focus-out for not matching the mask.
    pub cleared: bool,
}

/// A masked input field.
///
/// Holds the field's value, caret and the value seen at the last key-down or
/// focus, which decides whether the change callbacks fire.
#[derive(Debug)]
pub struct MaskedField {
    spec: MaskSpec,
    table: TokenTable,
    options: FieldOptions,

    /// Pattern the mask spec resolved to most recently.
    pattern: String,

    value: String,
    caret: usize,
    old_value: String,
    key_code: Option<u32>,
    rejected: Vec<Rejection>,

    callbacks: Callbacks,

    /// Wrapped in `RefCell` so `&self` queries can compile and cache regexes.
    regex_cache: RefCell<RegexCache>,
}

impl MaskedField {
    /// Create a field for `spec`.
    ///
    /// `options.translation` is merged over the default token table. `spec`
    /// is resolved against the empty value and validated; dynamic specs are
    /// validated again on every later resolution.
    pub fn new(spec: impl Into<MaskSpec>, options: FieldOptions) -> Result<Self, FieldError> {
        let spec = spec.into();
        let table = options.token_table()?;
        let pattern = spec.resolve("").into_owned();
        Mask::new(&pattern, &table)?;
        log::debug!(target: LOG_TARGET, "new field, mask {pattern:?}, reverse={}", options.reverse);

        Ok(Self {
            spec,
            table,
            options,
            pattern,
            value: String::new(),
            caret: 0,
            old_value: String::new(),
            key_code: None,
            rejected: Vec::new(),
            callbacks: Callbacks::default(),
            regex_cache: RefCell::new(RegexCache::default()),
        })
    }

    // -- Events ---------------------------------------------------------------

    /// Handle one host event. `raw` and `caret` are the element's value and
    /// caret as the host sees them when the event fires.
    pub fn handle(
        &mut self,
        event: FieldEvent,
        raw: &str,
        caret: usize,
    ) -> Result<FieldUpdate, FieldError> {
        log::debug!(target: LOG_TARGET, "{event:?} value={raw:?} caret={caret}");
        if event.is_masking() {
            return self.masking_event(event, raw, caret);
        }
        match event {
            FieldEvent::KeyDown(code) => {
                self.key_code = Some(code);
                self.old_value = raw.to_string();
                Ok(self.store(raw, caret))
            }
            FieldEvent::Focus => {
                self.key_code = None;
                self.old_value = raw.to_string();
                let mut update = self.store(raw, caret);
                update.select_all = self.options.select_on_focus;
                Ok(update)
            }
            FieldEvent::FocusOut => self.focus_out(raw, caret),
            _ => Ok(self.store(raw, caret)),
        }
    }

    /// Track the key an event belongs to, then mask.
    ///
    /// Only a key-up and the input between its key-down and key-up belong to
    /// a key. Paste, drop and change carry none, so a by-pass key pressed
    /// earlier never keeps them from being masked.
    fn masking_event(
        &mut self,
        event: FieldEvent,
        raw: &str,
        caret: usize,
    ) -> Result<FieldUpdate, FieldError> {
        match event {
            FieldEvent::KeyUp(code) => self.key_code = Some(code),
            FieldEvent::Input => {}
            _ => self.key_code = None,
        }
        let update = self.behaviour(raw, caret);
        if matches!(event, FieldEvent::KeyUp(_)) {
            self.key_code = None;
        }
        update
    }

    /// Mask `raw`, correct the caret and fire callbacks.
    fn behaviour(&mut self, raw: &str, caret: usize) -> Result<FieldUpdate, FieldError> {
        if let Some(code) = self.key_code.filter(|&c| self.options.is_by_pass_key(c)) {
            log::trace!(target: LOG_TARGET, "key {code} bypasses masking");
            return Ok(self.store(raw, caret));
        }

        self.switch_mask(raw)?;
        let direction = self.direction();
        let (masked, caret) = {
            let mask = self.mask()?;
            let masked = mask.apply(raw, direction);
            let mut caret = caret::correct(&mask.caret_edit(raw, caret, direction));
            // Step back over literals the mask would re-insert after a deletion.
            if self.key_code == Some(KEY_BACKSPACE)
                && direction == Direction::Forward
                && caret <= mask.len()
            {
                caret = mask.token_slot_before(caret).map_or(0, |idx| idx + 1);
            }
            (masked, caret)
        };

        self.value = masked.value;
        self.caret = caret;
        self.rejected = masked.rejected;

        let outcome = Outcome {
            value: &self.value,
            changed: self.value != self.old_value,
            complete: char_len(&self.value) == char_len(&self.pattern),
            rejected: &self.rejected,
        };
        self.callbacks.fire(&outcome);
        self.old_value.clone_from(&self.value);

        Ok(FieldUpdate {
            value: self.value.clone(),
            caret,
            ..FieldUpdate::default()
        })
    }

    fn focus_out(&mut self, raw: &str, caret: usize) -> Result<FieldUpdate, FieldError> {
        let update = self.store(raw, caret);
        if !self.options.clear_if_not_match || self.value.is_empty() {
            return Ok(update);
        }
        self.switch_mask(raw)?;
        if self.matches()? {
            return Ok(update);
        }
        log::debug!(target: LOG_TARGET, "clearing {raw:?}, no match for {:?}", self.pattern);
        self.value.clear();
        self.caret = 0;
        self.rejected.clear();
        Ok(FieldUpdate {
            cleared: true,
            ..FieldUpdate::default()
        })
    }

    /// Take the host's value as is.
    fn store(&mut self, raw: &str, caret: usize) -> FieldUpdate {
        self.value = raw.to_string();
        self.caret = caret.min(char_len(raw));
        FieldUpdate {
            value: self.value.clone(),
            caret: self.caret,
            ..FieldUpdate::default()
        }
    }

    // -- Masks ----------------------------------------------------------------

    /// Re-resolve a dynamic spec against `value`.
    fn switch_mask(&mut self, value: &str) -> Result<(), FieldError> {
        if !self.spec.is_dynamic() {
            return Ok(());
        }
        let pattern = self.spec.resolve(value);
        if *pattern == *self.pattern {
            return Ok(());
        }
        Mask::new(&pattern, &self.table)?;
        log::debug!(target: LOG_TARGET, "mask switch {:?} -> {:?}", self.pattern, pattern);
        self.pattern = pattern.into_owned();
        Ok(())
    }

    /// The current mask, bound to this field's table.
    fn mask(&self) -> Result<Mask<'_>, FieldError> {
        Ok(Mask::new(&self.pattern, &self.table)?)
    }

    fn direction(&self) -> Direction {
        Direction::from_reverse(self.options.reverse)
    }

    // -- Queries --------------------------------------------------------------

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The mask pattern currently in effect.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn table(&self) -> &TokenTable {
        &self.table
    }

    /// Characters rejected by the last transduction.
    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.options.placeholder.as_deref()
    }

    /// The current value without literals.
    pub fn clean_value(&self) -> Result<String, FieldError> {
        Ok(self.mask()?.clean(&self.value, self.direction()).value)
    }

    /// `value` masked with the pattern `spec` resolves to for it. The field's
    /// own state is left untouched.
    pub fn masked_value(&self, value: &str) -> Result<String, FieldError> {
        let pattern = self.spec.resolve(value);
        let mask = Mask::new(&pattern, &self.table)?;
        Ok(mask.apply(value, self.direction()).value)
    }

    /// Whether the value fills the whole mask.
    pub fn is_complete(&self) -> bool {
        char_len(&self.value) == char_len(&self.pattern)
    }

    /// Whether the value matches the current mask's regex.
    pub fn matches(&self) -> Result<bool, FieldError> {
        let mask = self.mask()?;
        let regex = self.regex_cache.borrow_mut().get_or_compile(&mask)?;
        Ok(regex.is_match(&self.value))
    }

    /// Source of the current mask's regex.
    pub fn regex_source(&self) -> Result<String, FieldError> {
        let mask = self.mask()?;
        let regex = self.regex_cache.borrow_mut().get_or_compile(&mask)?;
        Ok(regex.as_str().to_string())
    }

    // -- Mutation -------------------------------------------------------------

    /// Assign a value programmatically. The value is masked; no callbacks
    /// fire and it becomes the reference for the next change check.
    pub fn set_value(&mut self, value: &str) -> Result<(), FieldError> {
        self.switch_mask(value)?;
        let masked = self.mask()?.apply(value, self.direction());
        self.value = masked.value;
        self.caret = char_len(&self.value);
        self.rejected = masked.rejected;
        self.old_value.clone_from(&self.value);
        Ok(())
    }

    /// Tear the field down, returning its clean value.
    pub fn unmask(self) -> Result<String, FieldError> {
        log::debug!(target: LOG_TARGET, "unmask {:?}", self.value);
        self.clean_value()
    }

    // -- Callbacks ------------------------------------------------------------

    pub fn set_on_change(&mut self, f: impl FnMut(&str) + 'static) {
        self.callbacks.on_change = Some(Box::new(f));
    }

    pub fn set_on_key_press(&mut self, f: impl FnMut(&str) + 'static) {
        self.callbacks.on_key_press = Some(Box::new(f));
    }

    pub fn set_on_complete(&mut self, f: impl FnMut(&str) + 'static) {
        self.callbacks.on_complete = Some(Box::new(f));
    }

    pub fn set_on_invalid(&mut self, f: impl FnMut(&str, &[Rejection]) + 'static) {
        self.callbacks.on_invalid = Some(Box::new(f));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inputmask_engine::{MaskError, TokenSpec};

    const PHONE: &str = "(00) 00000-0000";

    #[test]
    fn input_masks_and_moves_caret() {
        let mut field = MaskedField::new(PHONE, FieldOptions::default()).unwrap();
        let update = field.handle(FieldEvent::Input, "4", 1).unwrap();
        assert_eq!(update.value, "(4");
        assert_eq!(update.caret, 2);
        assert_eq!(field.value(), "(4");
        assert_eq!(field.clean_value().unwrap(), "4");
    }

    #[test]
    fn key_down_only_records() {
        let mut field = MaskedField::new(PHONE, FieldOptions::default()).unwrap();
        let update = field.handle(FieldEvent::KeyDown(52), "41", 9).unwrap();
        assert_eq!(update.value, "41");
        assert_eq!(update.caret, 2);
    }

    #[test]
    fn set_value_masks_without_callbacks() {
        let mut field = MaskedField::new(PHONE, FieldOptions::default()).unwrap();
        field.set_on_change(|_| panic!("set_value must not fire callbacks"));
        field.set_value("41999887766").unwrap();
        assert_eq!(field.value(), "(41) 99988-7766");
        assert_eq!(field.caret(), 15);
        assert!(field.is_complete());
        assert!(field.matches().unwrap());
    }

    #[test]
    fn masked_value_leaves_state_alone() {
        let field = MaskedField::new("00/00", FieldOptions::default()).unwrap();
        assert_eq!(field.masked_value("1231").unwrap(), "12/31");
        assert_eq!(field.value(), "");
    }

    #[test]
    fn two_recursive_tokens_fail_construction() {
        let mut options = FieldOptions::default();
        let mut star = TokenSpec::new("[a-z]");
        star.recursive = true;
        options.translation.insert('*', star);
        match MaskedField::new("#-*", options) {
            Err(FieldError::Mask(MaskError::MultipleRecursiveTokens { .. })) => {}
            other => panic!("expected MultipleRecursiveTokens, got {other:?}"),
        }
    }

    #[test]
    fn regex_source_is_cached() {
        let field = MaskedField::new("00-00", FieldOptions::default()).unwrap();
        let first = field.regex_source().unwrap();
        assert_eq!(first, r"[0-9][0-9]\-[0-9][0-9]");
        assert_eq!(field.regex_source().unwrap(), first);
        assert!(field.regex_cache.borrow().contains("00-00"));
    }
}
