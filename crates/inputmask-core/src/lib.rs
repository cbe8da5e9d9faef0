//! Shared leaf types for the inputmask workspace.
//!
//! - [`enums`] -- scan direction, field events and key codes
//! - [`rejection`] -- rejected-character records produced by the transducer
//! - [`text`] -- char-indexed string helpers

pub mod enums;
pub mod rejection;
pub mod text;
