// FFI functions are inherently unsafe: callers must ensure pointer validity.
// Safety contracts are documented per-function in the public API comments.
#![allow(clippy::missing_safety_doc)]

// inputmask-ffi: C-compatible FFI layer for MaskedField.
//
// Memory management rules:
// - Opaque `MaskedField` pointer: created by `inputmask_field_new`, freed by
//   `inputmask_field_free`. `inputmask_field_new_with_options` takes the
//   same options JSON as the WASM binding.
// - Returned strings: caller must free with `inputmask_free_str`.
// - All input strings are UTF-8 encoded, null-terminated C strings.
// - Carets are char offsets, not byte offsets.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;

use inputmask_core::enums::{Direction, FieldEvent};
use inputmask_engine::{Mask, TokenTable};
use inputmask_field::{FieldOptions, MaskedField};

// ── Field lifecycle ─────────────────────────────────────────────

/// Create a masked field for `mask`. `reverse` non-zero scans right to left.
///
/// Returns an opaque pointer on success, NULL on failure.
/// On failure, if `error_out` is non-NULL, it receives a heap-allocated error
/// string that the caller must free with `inputmask_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_field_new(
    mask: *const c_char,
    reverse: c_int,
    error_out: *mut *mut c_char,
) -> *mut MaskedField {
    let options = FieldOptions {
        reverse: reverse != 0,
        ..FieldOptions::default()
    };
    new_field(mask, options, error_out)
}

/// Create a masked field for `mask` configured by a JSON options object
/// (`{"reverse": true, "clearIfNotMatch": true, ...}`). A NULL
/// `options_json` means default options.
///
/// Returns an opaque pointer on success, NULL on failure, reporting errors
/// through `error_out` like `inputmask_field_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_field_new_with_options(
    mask: *const c_char,
    options_json: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut MaskedField {
    let options = if options_json.is_null() {
        FieldOptions::default()
    } else {
        let Some(json) = cstr_to_str(options_json) else {
            set_error(error_out, "options are not UTF-8");
            return ptr::null_mut();
        };
        match FieldOptions::from_json(json) {
            Ok(options) => options,
            Err(e) => {
                set_error(error_out, &e.to_string());
                return ptr::null_mut();
            }
        }
    };
    new_field(mask, options, error_out)
}

fn new_field(
    mask: *const c_char,
    options: FieldOptions,
    error_out: *mut *mut c_char,
) -> *mut MaskedField {
    let Some(mask) = cstr_to_str(mask) else {
        set_error(error_out, "mask is null or not UTF-8");
        return ptr::null_mut();
    };
    match MaskedField::new(mask, options) {
        Ok(field) => Box::into_raw(Box::new(field)),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a field created by `inputmask_field_new` or
/// `inputmask_field_new_with_options`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_field_free(field: *mut MaskedField) {
    if !field.is_null() {
        drop(unsafe { Box::from_raw(field) });
    }
}

// ── Field events ────────────────────────────────────────────────

/// Feed the element's raw value and caret as an input event.
///
/// Returns the masked value (free with `inputmask_free_str`), or NULL on
/// error. If `caret_out` is non-NULL it receives the corrected caret.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_field_input(
    field: *mut MaskedField,
    raw: *const c_char,
    caret: usize,
    caret_out: *mut usize,
) -> *mut c_char {
    let Some(field) = (unsafe { field.as_mut() }) else {
        return ptr::null_mut();
    };
    let Some(raw) = cstr_to_str(raw) else {
        return ptr::null_mut();
    };
    match field.handle(FieldEvent::Input, raw, caret) {
        Ok(update) => {
            if !caret_out.is_null() {
                unsafe { *caret_out = update.caret };
            }
            str_to_c(&update.value)
        }
        Err(_) => ptr::null_mut(),
    }
}

/// Forward a named host event (`"keydown"`, `"keyup"`, `"focus"`,
/// `"focusout"`, ...) with its key code.
///
/// Returns 1 when the value was cleared (focus-out without a match), 0 when
/// handled otherwise, -1 on error or for unknown event names.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_field_event(
    field: *mut MaskedField,
    event: *const c_char,
    key_code: u32,
    raw: *const c_char,
    caret: usize,
) -> c_int {
    let Some(field) = (unsafe { field.as_mut() }) else {
        return -1;
    };
    let Some(event) = cstr_to_str(event).and_then(|name| FieldEvent::from_name(name, key_code))
    else {
        return -1;
    };
    let Some(raw) = cstr_to_str(raw) else {
        return -1;
    };
    match field.handle(event, raw, caret) {
        Ok(update) if update.cleared => 1,
        Ok(_) => 0,
        Err(_) => -1,
    }
}

// ── Field queries ───────────────────────────────────────────────

/// The field's current (masked) value. Caller frees with `inputmask_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_field_value(field: *const MaskedField) -> *mut c_char {
    let Some(field) = (unsafe { field.as_ref() }) else {
        return ptr::null_mut();
    };
    str_to_c(field.value())
}

/// The field's clean value. Caller frees with `inputmask_free_str`.
/// Returns NULL on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_field_clean_value(field: *const MaskedField) -> *mut c_char {
    let Some(field) = (unsafe { field.as_ref() }) else {
        return ptr::null_mut();
    };
    match field.clean_value() {
        Ok(clean) => str_to_c(&clean),
        Err(_) => ptr::null_mut(),
    }
}

/// Returns 1 if the field's value fills its mask, 0 if not, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_field_is_complete(field: *const MaskedField) -> c_int {
    let Some(field) = (unsafe { field.as_ref() }) else {
        return -1;
    };
    if field.is_complete() { 1 } else { 0 }
}

// ── Stateless masking ───────────────────────────────────────────

/// Mask `value` with `mask` and the default tokens.
///
/// Returns the masked value (free with `inputmask_free_str`), or NULL on
/// error (null or non-UTF-8 input, invalid mask).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_apply(
    mask: *const c_char,
    value: *const c_char,
    reverse: c_int,
) -> *mut c_char {
    let (Some(mask), Some(value)) = (cstr_to_str(mask), cstr_to_str(value)) else {
        return ptr::null_mut();
    };
    let table = TokenTable::default();
    match Mask::new(mask, &table) {
        Ok(mask) => str_to_c(&mask.apply(value, Direction::from_reverse(reverse != 0)).value),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a heap-allocated C string returned by inputmask functions.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn inputmask_free_str(s: *mut c_char) {
    free_c_str(s);
}

// ── Internal helpers ────────────────────────────────────────────

fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

fn str_to_c(s: &str) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

fn set_error(out: *mut *mut c_char, msg: &str) {
    if !out.is_null() {
        unsafe {
            *out = str_to_c(msg);
        }
    }
}

fn free_c_str(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}
