//! Input-mask engine.
//!
//! A mask such as `"(00) 00000-0000"` mixes literal characters with token
//! characters. This crate compiles masks into validating regular expressions,
//! transduces raw values into masked or clean values, and corrects caret
//! offsets after each transduction.
//!
//! # Architecture
//!
//! - [`token`] -- Token table (mask character to matching rule)
//! - [`mask`] -- Mask patterns bound to a token table, static or dynamic
//! - [`compiler`] -- Mask-to-regex compilation
//! - [`transducer`] -- Forward/reverse value transducer
//! - [`caret`] -- Caret correction after a transduction

pub mod caret;
pub mod compiler;
pub mod mask;
pub mod token;
pub mod transducer;

pub use compiler::MaskRegex;
pub use mask::{Mask, MaskSpec, Slot};
pub use token::{CharClass, MaskToken, TokenSpec, TokenTable};
pub use transducer::Transduction;

/// Error type for token and mask construction.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    #[error("invalid pattern for token {token:?}: {source}")]
    InvalidPattern {
        token: char,
        #[source]
        source: regex::Error,
    },
    #[error("mask uses more than one recursive token: {first:?} and {second:?}")]
    MultipleRecursiveTokens { first: char, second: char },
    #[error("compiled mask is not a valid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
}
