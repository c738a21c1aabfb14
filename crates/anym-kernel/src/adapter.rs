//! The adapter contract: the operation set a wrapper kind must support.
//!
//! An adapter is owned by exactly one [`Witness`] and is stateless — one
//! instance serves every caller concurrently with no locking. The payloads
//! it receives are type-erased [`Value`]s that it downcasts back to its
//! native shape; the downcast is the capability guard, and a mismatch is a
//! typed error rather than a panic.
//!
//! This trait is deliberately abstract: the built-in adapters implement it
//! over `std` shapes (`Option`, `Vec`, `Result`, …), and nothing prevents a
//! caller from implementing it for a wrapper kind of their own behind a
//! custom registry.

use crate::error::KernelError;
use crate::value::{BindFn, FilterFn, MapFn, Value};
use crate::witness::Witness;

/// Primitive monadic operations for one wrapper kind.
pub trait MonadAdapter: Send + Sync {
    /// The identity tag this adapter is bound to.
    fn witness(&self) -> Witness;

    /// Capability flag for `filter`.
    ///
    /// Wrappers whose emptiness cannot be represented without extra
    /// structure (a two-sided either would have to fabricate a left value)
    /// report `false`. Filtering such a handle is a documented identity
    /// no-op, not an error.
    fn is_filterable(&self) -> bool {
        true
    }

    /// Whether `payload` already has this adapter's native shape.
    ///
    /// This is the zero-cost path of normalization: a callback that returns
    /// the composing wrapper's own shape round-trips unchanged.
    fn accepts(&self, payload: &Value) -> bool;

    /// Transform every element, preserving the wrapper's structure.
    fn map(&self, payload: Value, f: &MapFn<'_>) -> Result<Value, KernelError>;

    /// Keep only elements the predicate accepts.
    ///
    /// Non-filterable adapters return the payload unchanged.
    fn filter(&self, payload: Value, keep: &FilterFn<'_>) -> Result<Value, KernelError>;

    /// Monadic bind over the native shape.
    ///
    /// `bind` is already normalize-composed: it returns payloads in this
    /// adapter's native shape, so implementations only flatten natively.
    /// The zero element short-circuits without invoking `bind`.
    fn flat_map(&self, payload: Value, bind: &BindFn<'_>) -> Result<Value, KernelError>;

    /// Wrap a single value.
    fn unit(&self, value: Value) -> Result<Value, KernelError>;

    /// Lift an ordered list of elements.
    ///
    /// Multi-valued adapters splice the elements in order; single-valued
    /// adapters wrap the whole list as one value. Each wrapper documents
    /// its own collapse rule here.
    fn unit_sequence(&self, values: Vec<Value>) -> Result<Value, KernelError>;

    /// The zero/absent instance.
    ///
    /// Not every wrapper has one; `identity` reports [`KernelError::NoEmpty`].
    fn empty(&self) -> Result<Value, KernelError>;
}
