//! Normalization: coercing an arbitrary callback result into a target
//! witness's native shape.
//!
//! The steps run in a fixed, total priority order — first match wins, no
//! fallthrough once matched — so behavior is deterministic and independent
//! of recognizer registration timing for the built-in shapes. Built-ins
//! always win over registered recognizers for the shapes they cover, which
//! prevents a late registration from accidentally shadowing them.
//!
//! Step order:
//!
//! 1. **Identity**: the value already has the target's native shape (or is
//!    a handle of the target witness). Zero-cost; this is the common case
//!    for same-type `flat_map` chains.
//! 2. **Built-in sweep**: present/absent single value, ordered sequence,
//!    asynchronous single value. The asynchronous case **blocks the calling
//!    thread** until the handle settles (see [`crate::deferred`]); a fault
//!    propagates synchronously out of the `flat_map`/`ap` that triggered
//!    normalization.
//! 3. **Extension sweep**: registered recognizers, in registration order.
//! 4. **Scalar fallback**: wrap the value as a singleton. This never fails
//!    for an unrecognized type — a least-surprise default, but best effort
//!    only: a type with wrapper-like method names and no recognizer lands
//!    here and is treated as one opaque value. Register a recognizer for
//!    any foreign wrapper whose contents should participate instead.

use crate::adapter::MonadAdapter;
use crate::anym::AnyM;
use crate::deferred::{Deferred, DeferredFailure};
use crate::error::KernelError;
use crate::extension::NormalForm;
use crate::registry::Registry;
use crate::value::Value;
use crate::witness::Witness;
use std::collections::VecDeque;

/// Coerce `candidate` into `target`'s native payload shape.
pub fn normalize(
    registry: &Registry,
    target: Witness,
    candidate: Value,
) -> Result<Value, KernelError> {
    let adapter = registry.resolve(target);

    // 1. identity
    if adapter.accepts(&candidate) {
        return Ok(candidate);
    }
    if let Some(handle) = candidate.downcast_ref::<AnyM>() {
        if handle.witness() == target {
            return Ok(handle.payload().clone());
        }
        // foreign handle: normalize its payload instead
        return normalize(registry, target, handle.payload().clone());
    }

    // 2. built-in sweep, fixed order
    if let Some(opt) = candidate.downcast_ref::<Option<Value>>() {
        return match opt {
            Some(v) => adapter.unit(v.clone()),
            None => adapter.empty(),
        };
    }
    if let Some(seq) = candidate.downcast_ref::<Vec<Value>>() {
        return adapter.unit_sequence(seq.clone());
    }
    if let Some(seq) = candidate.downcast_ref::<VecDeque<Value>>() {
        return adapter.unit_sequence(seq.iter().cloned().collect());
    }
    if let Some(deferred) = candidate.downcast_ref::<Deferred>() {
        return match deferred.settle() {
            Ok(v) => adapter.unit(v),
            Err(DeferredFailure::Empty) => adapter.empty(),
            Err(DeferredFailure::Faulted(message)) => Err(KernelError::Asynchronous { message }),
        };
    }

    // 3. extension sweep
    if let Some(recognizer) = registry.extensions().select(&candidate) {
        let form = recognizer.normalize(candidate)?;
        return lift_form(adapter.as_ref(), form);
    }

    // 4. scalar fallback
    adapter.unit(candidate)
}

/// Lift a recognizer's intermediate form into the target adapter.
pub(crate) fn lift_form(
    adapter: &dyn MonadAdapter,
    form: NormalForm,
) -> Result<Value, KernelError> {
    match form {
        NormalForm::Absent => adapter.empty(),
        NormalForm::One(v) => adapter.unit(v),
        NormalForm::Many(values) => adapter.unit_sequence(values),
    }
}
