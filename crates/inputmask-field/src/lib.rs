//! Masked input field.
//!
//! [`MaskedField`] is the host-agnostic binding layer between an input
//! element and the mask engine. A host (DOM glue, a terminal widget, a C
//! caller) forwards events with the element's raw value and caret; the field
//! masks the value, corrects the caret and fires the registered callbacks.
//!
//! # Architecture
//!
//! - [`options`] -- Field options (serde, camelCase)
//! - [`callbacks`] -- Change/key-press/complete/invalid callbacks
//! - [`cache`] -- Compiled mask regexes keyed by pattern
//! - [`field`] -- The field itself

pub mod cache;
pub mod callbacks;
pub mod field;
pub mod options;

pub use field::{FieldUpdate, MaskedField};
pub use options::FieldOptions;

use inputmask_engine::MaskError;

/// Error type for field construction and dynamic mask resolution.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The mask (or a mask returned by a dynamic spec) is invalid.
    #[error(transparent)]
    Mask(#[from] MaskError),

    /// The options payload could not be deserialized.
    #[error("invalid field options: {0}")]
    InvalidOptions(String),
}
