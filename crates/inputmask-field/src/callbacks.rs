// Field callbacks
//
// Callbacks are boxed closures registered on the field. They are not part of
// the serializable options.

use std::fmt;

use inputmask_core::rejection::Rejection;

/// Called with the field's masked value.
pub type ValueCallback = Box<dyn FnMut(&str)>;

/// Called with the field's masked value and the rejected characters.
pub type InvalidCallback = Box<dyn FnMut(&str, &[Rejection])>;

/// What a masking event produced, as seen by the callbacks.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Outcome<'a> {
    pub value: &'a str,
    pub changed: bool,
    pub complete: bool,
    pub rejected: &'a [Rejection],
}

/// The callbacks registered on a field.
#[derive(Default)]
pub struct Callbacks {
    pub on_change: Option<ValueCallback>,
    pub on_key_press: Option<ValueCallback>,
    pub on_complete: Option<ValueCallback>,
    pub on_invalid: Option<InvalidCallback>,
}

impl Callbacks {
    /// Fire the callbacks an outcome calls for, in order: change, key press,
    /// complete, invalid.
    pub(crate) fn fire(&mut self, outcome: &Outcome<'_>) {
        if outcome.changed {
            if let Some(f) = self.on_change.as_mut() {
                f(outcome.value);
            }
            if let Some(f) = self.on_key_press.as_mut() {
                f(outcome.value);
            }
        }
        if outcome.complete {
            if let Some(f) = self.on_complete.as_mut() {
                f(outcome.value);
            }
        }
        if !outcome.rejected.is_empty() {
            if let Some(f) = self.on_invalid.as_mut() {
                f(outcome.value, outcome.rejected);
            }
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_key_press", &self.on_key_press.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_invalid", &self.on_invalid.is_some())
            .finish()
    }
}
