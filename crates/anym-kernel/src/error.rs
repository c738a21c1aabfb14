//! Error types for comprehension dispatch.
//!
//! Two conditions are deliberately *not* errors: filtering a
//! non-filterable wrapper is a documented identity no-op, and an
//! unrecognized callback shape falls back to scalar wrapping instead of
//! failing (see [`crate::normalize`]).

use crate::witness::Witness;

/// Errors arising from dispatch, normalization, or adapter construction.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// The witness is a placeholder with no real adapter behind it.
    #[error("unsupported witness: {witness} has no adapter")]
    UnsupportedWitness { witness: Witness },

    /// An asynchronous value faulted while being settled.
    #[error("asynchronous failure: {message}")]
    Asynchronous { message: String },

    /// A payload does not have the native shape its witness requires.
    #[error("payload mismatch: value is not the native shape of {witness}")]
    PayloadMismatch { witness: Witness },

    /// The witness has no zero/absent representation.
    #[error("witness {witness} has no empty representation")]
    NoEmpty { witness: Witness },

    /// An `ap` function handle held an element that is not an `Apply`.
    #[error("ap element in a {witness} handle is not an Apply function")]
    NotAFunction { witness: Witness },

    /// A registered recognizer failed to convert a value it claimed.
    #[error("recognizer {name} failed: {message}")]
    Recognizer { name: String, message: String },
}
