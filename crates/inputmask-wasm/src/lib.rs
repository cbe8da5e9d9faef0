// WASM bindings for inputmask.
//
// Provides two classes exported via wasm-bindgen:
// - `WasmMask`: stateless masking of values with a fixed pattern.
// - `WasmMaskedField`: a stateful field that a DOM host drives by forwarding
//   element events. Options arrive as a JS object and results leave as JS
//   objects, both converted with serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const mask = new WasmMask("(00) 00000-0000", {});
//   mask.apply("41999887766");         // => "(41) 99988-7766"
//   mask.clean("(41) 99988-7766");     // => "41999887766"
//   mask.isMatch("(41) 99988-7766");   // => true
//
//   const field = new WasmMaskedField("#.##0,00", { reverse: true });
//   field.handle("input", 0, "123456", 6);
//   // => { value: "1.234,56", caret: 8, selectAll: false, cleared: false, rejected: [] }

use serde::Serialize;
use wasm_bindgen::prelude::*;

use inputmask_core::enums::{Direction, FieldEvent};
use inputmask_core::rejection::Rejection;
use inputmask_engine::{Mask, TokenTable};
use inputmask_field::{FieldError, FieldOptions, FieldUpdate, MaskedField};

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

/// Serializable representation of a rejected character.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRejection {
    position: usize,
    character: String,
    expected: String,
}

/// Serializable result of a field event.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsFieldUpdate {
    value: String,
    caret: usize,
    select_all: bool,
    cleared: bool,
    rejected: Vec<JsRejection>,
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn to_js_rejections(rejected: &[Rejection]) -> Vec<JsRejection> {
    rejected
        .iter()
        .map(|r| JsRejection {
            position: r.position,
            character: r.character.to_string(),
            expected: r.expected.clone(),
        })
        .collect()
}

fn field_error_to_js(e: FieldError) -> JsError {
    JsError::new(&e.to_string())
}

/// Read options from a JS value; `undefined` and `null` give the defaults.
fn options_from_js(options: JsValue) -> Result<FieldOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(FieldOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| field_error_to_js(FieldError::InvalidOptions(e.to_string())))
}

// ============================================================================
// WasmMask
// ============================================================================

/// A fixed mask pattern with its token table.
#[wasm_bindgen]
pub struct WasmMask {
    pattern: String,
    table: TokenTable,
    direction: Direction,
}

impl WasmMask {
    fn mask(&self) -> Result<Mask<'_>, JsError> {
        Mask::new(&self.pattern, &self.table).map_err(|e| JsError::new(&e.to_string()))
    }
}

#[wasm_bindgen]
impl WasmMask {
    /// Create a mask. `options` takes the same `reverse` and `translation`
    /// keys as a field; other keys are ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(pattern: &str, options: JsValue) -> Result<WasmMask, JsError> {
        let options = options_from_js(options)?;
        let table = options.token_table().map_err(field_error_to_js)?;
        Mask::new(pattern, &table).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WasmMask {
            pattern: pattern.to_string(),
            table,
            direction: Direction::from_reverse(options.reverse),
        })
    }

    /// Masked value.
    pub fn apply(&self, value: &str) -> Result<String, JsError> {
        Ok(self.mask()?.apply(value, self.direction).value)
    }

    /// Clean value.
    pub fn clean(&self, value: &str) -> Result<String, JsError> {
        Ok(self.mask()?.clean(value, self.direction).value)
    }

    /// Source of the mask's validating regex.
    pub fn regex(&self) -> Result<String, JsError> {
        let regex = self.mask()?.to_regex().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(regex.as_str().to_string())
    }

    /// Whether `value` matches the mask as a whole.
    #[wasm_bindgen(js_name = "isMatch")]
    pub fn is_match(&self, value: &str) -> Result<bool, JsError> {
        let regex = self.mask()?.to_regex().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(regex.is_full_match(value))
    }

    /// Rejected characters of `value`, as `{ position, character, expected }`.
    pub fn rejections(&self, value: &str) -> Result<JsValue, JsError> {
        let masked = self.mask()?.apply(value, self.direction);
        serde_wasm_bindgen::to_value(&to_js_rejections(&masked.rejected))
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

// ============================================================================
// WasmMaskedField
// ============================================================================

/// A masked input field driven by DOM events.
///
/// Callbacks stay on the JS side: the host compares the returned update with
/// the previous value and dispatches its own events.
#[wasm_bindgen]
pub struct WasmMaskedField {
    field: MaskedField,
}

#[wasm_bindgen]
impl WasmMaskedField {
    /// Create a field. `options` is a JS object with the keys `reverse`,
    /// `clearIfNotMatch`, `selectOnFocus`, `placeholder`, `translation`,
    /// `byPassKeys`.
    #[wasm_bindgen(constructor)]
    pub fn new(pattern: &str, options: JsValue) -> Result<WasmMaskedField, JsError> {
        let options = options_from_js(options)?;
        let field = MaskedField::new(pattern, options).map_err(field_error_to_js)?;
        Ok(WasmMaskedField { field })
    }

    /// Forward a DOM event (`"keydown"`, `"keyup"`, `"input"`, `"paste"`,
    /// `"drop"`, `"change"`, `"focus"`, `"focusout"`).
    ///
    /// Returns `{ value, caret, selectAll, cleared, rejected }`, or `null`
    /// for events the field does not handle.
    pub fn handle(
        &mut self,
        event: &str,
        key_code: u32,
        raw: &str,
        caret: usize,
    ) -> Result<JsValue, JsError> {
        let Some(event) = FieldEvent::from_name(event, key_code) else {
            return Ok(JsValue::NULL);
        };
        let FieldUpdate {
            value,
            caret,
            select_all,
            cleared,
        } = self
            .field
            .handle(event, raw, caret)
            .map_err(field_error_to_js)?;
        let update = JsFieldUpdate {
            value,
            caret,
            select_all,
            cleared,
            rejected: to_js_rejections(self.field.rejected()),
        };
        serde_wasm_bindgen::to_value(&update).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Current (masked) value.
    pub fn value(&self) -> String {
        self.field.value().to_string()
    }

    /// Current caret, in chars.
    pub fn caret(&self) -> usize {
        self.field.caret()
    }

    #[wasm_bindgen(js_name = "cleanValue")]
    pub fn clean_value(&self) -> Result<String, JsError> {
        self.field.clean_value().map_err(field_error_to_js)
    }

    #[wasm_bindgen(js_name = "maskedValue")]
    pub fn masked_value(&self, value: &str) -> Result<String, JsError> {
        self.field.masked_value(value).map_err(field_error_to_js)
    }

    #[wasm_bindgen(js_name = "setValue")]
    pub fn set_value(&mut self, value: &str) -> Result<(), JsError> {
        self.field.set_value(value).map_err(field_error_to_js)
    }

    pub fn placeholder(&self) -> Option<String> {
        self.field.placeholder().map(str::to_string)
    }

    #[wasm_bindgen(js_name = "isComplete")]
    pub fn is_complete(&self) -> bool {
        self.field.is_complete()
    }

    /// Source of the current mask's regex.
    #[wasm_bindgen(js_name = "regexSource")]
    pub fn regex_source(&self) -> Result<String, JsError> {
        self.field.regex_source().map_err(field_error_to_js)
    }

    /// Release the field, returning its clean value.
    pub fn unmask(self) -> Result<String, JsError> {
        self.field.unmask().map_err(field_error_to_js)
    }

    /// Extract a key code from a DOM `KeyboardEvent`-like object, reading
    /// `keyCode` then `which`.
    #[wasm_bindgen(js_name = "keyCodeOf")]
    pub fn key_code_of(event: &JsValue) -> u32 {
        ["keyCode", "which"]
            .iter()
            .filter_map(|k| js_sys::Reflect::get(event, &JsValue::from_str(k)).ok())
            .filter_map(|v| v.as_f64())
            .map(|n| n as u32)
            .find(|&n| n != 0)
            .unwrap_or(0)
    }
}
