//! # Anym Kernel
//!
//! One generic `map` / `flat_map` / `filter` / `ap` surface over an
//! open-ended set of wrapper types — optional values, sequences, either
//! results, asynchronous handles, and user-defined extensions — without
//! those types sharing a common interface.
//!
//! This crate is **wrapper-agnostic**: it does not implement any wrapper's
//! data structure. It only prescribes how operations dispatch and how
//! arbitrary callback results are coerced into a wrapper's native shape.
//!
//! ## Architecture
//!
//! ```text
//! Witness               ← Identity tag per wrapper kind (closed enum)
//!     │
//! MonadAdapter          ← Primitive operations + capability flags
//!     │
//! Registry              ← Lazily-built adapter table, passed down, no globals
//!     │
//! normalize             ← Identity → built-ins → extensions → scalar fallback
//!     │
//! ExtensionRegistry     ← Ordered recognizers for foreign wrapper types
//!     │
//! AnyM                  ← The (witness, payload) handle callers compose with
//! ```
//!
//! The hard case is `flat_map`: a callback composed over one wrapper may
//! return a value of any other shape. [`normalize()`] classifies the result —
//! already native, a known built-in shape, a registered foreign type, or a
//! bare scalar — and lifts it into the composing wrapper before the
//! adapter's native flatten ever sees it.
//!
//! The only suspension point in the whole system is the blocking settle of
//! an asynchronous value inside normalization; see [`deferred`] for the
//! trade-off.

pub mod adapter;
pub mod adapters;
pub mod anym;
pub mod deferred;
pub mod error;
pub mod extension;
pub mod normalize;
pub mod registry;
pub mod value;
pub mod witness;

pub use adapter::MonadAdapter;
pub use anym::AnyM;
pub use deferred::{Deferred, DeferredFailure};
pub use error::KernelError;
pub use extension::{ExtensionRegistry, NormalForm, Recognizer};
pub use normalize::normalize;
pub use registry::{Registry, WitnessCapability};
pub use value::{Apply, Value, scalar, value};
pub use witness::Witness;
