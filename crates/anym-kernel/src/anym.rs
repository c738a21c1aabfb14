//! The generic wrapper handle.
//!
//! An [`AnyM`] pairs a witness tag with a payload in that witness's native
//! shape, plus the registry that resolves the tag. Handles are immutable
//! value-like objects: every operation returns a new handle, so no locking
//! is needed around handle use itself.
//!
//! All composition delegates to the adapter resolved from the witness. For
//! `flat_map` and `ap`, each callback result passes through
//! [`normalize`](crate::normalize::normalize) before the adapter's native
//! flatten — the adapter only ever sees values of its own shape, no matter
//! what the callback produced.

use crate::deferred::Deferred;
use crate::error::KernelError;
use crate::normalize::normalize;
use crate::registry::Registry;
use crate::value::{Apply, Value, value};
use crate::witness::Witness;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// A composable wrapper value: (witness, native payload).
///
/// The payload's runtime shape always matches what the witness's adapter
/// operates on; constructing a handle through the [`Registry`] lifts
/// guarantees this, and every native operation re-checks it.
#[derive(Clone)]
pub struct AnyM {
    registry: Registry,
    witness: Witness,
    payload: Value,
}

impl AnyM {
    pub(crate) fn from_parts(registry: Registry, witness: Witness, payload: Value) -> Self {
        Self {
            registry,
            witness,
            payload,
        }
    }

    /// The identity tag of the wrapper kind this handle composes as.
    pub fn witness(&self) -> Witness {
        self.witness
    }

    /// The native payload, type-erased.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The registry this handle resolves its adapter from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Transform every element, keeping the same witness.
    pub fn map(self, f: impl Fn(Value) -> Value) -> Result<AnyM, KernelError> {
        self.try_map(move |v| Ok(f(v)))
    }

    /// `map` with a fallible transform.
    pub fn try_map(
        self,
        f: impl Fn(Value) -> Result<Value, KernelError>,
    ) -> Result<AnyM, KernelError> {
        let adapter = self.registry.resolve(self.witness);
        let payload = adapter.map(self.payload.clone(), &f)?;
        Ok(AnyM { payload, ..self })
    }

    /// Keep only elements the predicate accepts.
    ///
    /// If the witness's adapter reports non-filterable, this returns the
    /// handle unchanged for every predicate — a documented semantic
    /// weakening, not an error. Check
    /// [`Registry::capabilities`](crate::registry::Registry::capabilities)
    /// when predicate semantics must be guaranteed.
    pub fn filter(self, keep: impl Fn(&Value) -> bool) -> Result<AnyM, KernelError> {
        let adapter = self.registry.resolve(self.witness);
        let payload = adapter.filter(self.payload.clone(), &keep)?;
        Ok(AnyM { payload, ..self })
    }

    /// Monadic bind: the callback may return *any* shape — a handle, a
    /// native payload, a foreign wrapper with a registered recognizer, or a
    /// bare scalar — and normalization coerces it into this handle's
    /// witness before the native flatten.
    ///
    /// If the callback returns an asynchronous value, normalization blocks
    /// the calling thread until it settles; a fault surfaces here as
    /// [`KernelError::Asynchronous`].
    pub fn flat_map(self, f: impl Fn(Value) -> Value) -> Result<AnyM, KernelError> {
        self.try_flat_map(move |v| Ok(f(v)))
    }

    /// `flat_map` with a fallible callback.
    pub fn try_flat_map(
        self,
        f: impl Fn(Value) -> Result<Value, KernelError>,
    ) -> Result<AnyM, KernelError> {
        let adapter = self.registry.resolve(self.witness);
        let registry = self.registry.clone();
        let target = self.witness;
        let bind = move |v: Value| normalize(&registry, target, f(v)?);
        let payload = adapter.flat_map(self.payload.clone(), &bind)?;
        Ok(AnyM { payload, ..self })
    }

    /// Apply a wrapped function handle to this handle:
    /// `flat_map(self, v -> map(fns, f -> f(v)))`.
    ///
    /// Elements of `fns` must be [`Apply`] values; anything else surfaces
    /// as [`KernelError::NotAFunction`]. Inherits the normalization path,
    /// including the blocking asynchronous case.
    pub fn ap(self, fns: &AnyM) -> Result<AnyM, KernelError> {
        let fns = fns.clone();
        self.try_flat_map(move |v| {
            let applied = fns.clone().try_map(|f| {
                let apply = f.downcast_ref::<Apply>().ok_or(KernelError::NotAFunction {
                    witness: fns.witness,
                })?;
                Ok(apply.call(v.clone()))
            })?;
            Ok(value(applied))
        })
    }

    /// Downcast the payload to a concrete native shape.
    pub fn unwrap<T: Any + Send + Sync>(&self) -> Result<Arc<T>, KernelError> {
        self.payload
            .clone()
            .downcast::<T>()
            .map_err(|_| KernelError::PayloadMismatch {
                witness: self.witness,
            })
    }

    /// The native `Option` payload of an `option` handle.
    pub fn into_option(self) -> Result<Option<Value>, KernelError> {
        Ok(self.unwrap::<Option<Value>>()?.as_ref().clone())
    }

    /// The native `Vec` payload of a `list` handle.
    pub fn into_list(self) -> Result<Vec<Value>, KernelError> {
        Ok(self.unwrap::<Vec<Value>>()?.as_ref().clone())
    }

    /// The native `VecDeque` payload of a `deque` handle.
    pub fn into_deque(self) -> Result<VecDeque<Value>, KernelError> {
        Ok(self.unwrap::<VecDeque<Value>>()?.as_ref().clone())
    }

    /// The native `Result` payload of an `either` handle.
    pub fn into_result(self) -> Result<Result<Value, Value>, KernelError> {
        Ok(self.unwrap::<Result<Value, Value>>()?.as_ref().clone())
    }

    /// The native deferred of a `future` handle.
    pub fn into_deferred(self) -> Result<Arc<Deferred>, KernelError> {
        self.unwrap::<Deferred>()
    }
}

impl fmt::Debug for AnyM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyM<{}>", self.witness)
    }
}
