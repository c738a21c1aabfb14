//! Built-in adapters: one small stateless struct per supported wrapper kind.
//!
//! Each adapter owns the native-shape semantics for its witness. The
//! collection kinds share one parameterized implementation instantiated
//! with their constructor functions; everything else is bespoke.

mod either;
mod future;
mod identity;
mod option;
mod sequence;
mod unsupported;

pub use either::{EitherAdapter, ResultRecognizer};
pub use future::FutureAdapter;
pub use identity::{Ident, IdentRecognizer, IdentityAdapter};
pub use option::OptionAdapter;
pub use sequence::SequenceAdapter;
pub use unsupported::UnsupportedAdapter;
