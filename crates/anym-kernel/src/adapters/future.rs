//! The asynchronous single-value wrapper.
//!
//! Native shape: [`Deferred`]. Composition settles the handle at
//! composition time — `map` and `flat_map` block until the current outcome
//! is known, then re-wrap. The dispatch layer is synchronous by contract;
//! callers that need lazy chaining compose futures before lifting them.
//! Faults stay in-band: a faulted deferred maps to a faulted deferred
//! without invoking the callback, the same way a left either carries
//! through.

use crate::adapter::MonadAdapter;
use crate::deferred::{Deferred, DeferredFailure};
use crate::error::KernelError;
use crate::value::{BindFn, FilterFn, MapFn, Value, expect_native, value};
use crate::witness::Witness;

/// Adapter for the `future` witness.
///
/// Not filterable: a rejected value would leave the handle with nothing to
/// resolve to, so `filter` is an identity no-op.
pub struct FutureAdapter;

impl FutureAdapter {
    fn settle(payload: &Value) -> Result<Result<Value, DeferredFailure>, KernelError> {
        Ok(expect_native::<Deferred>(Witness::Future, payload)?.settle())
    }
}

impl MonadAdapter for FutureAdapter {
    fn witness(&self) -> Witness {
        Witness::Future
    }

    fn is_filterable(&self) -> bool {
        false
    }

    fn accepts(&self, payload: &Value) -> bool {
        payload.downcast_ref::<Deferred>().is_some()
    }

    fn map(&self, payload: Value, f: &MapFn<'_>) -> Result<Value, KernelError> {
        let rewrapped = match Self::settle(&payload)? {
            Ok(v) => Deferred::ready(f(v)?),
            Err(failure) => Deferred::settled(Err(failure)),
        };
        Ok(value(rewrapped))
    }

    fn filter(&self, payload: Value, _keep: &FilterFn<'_>) -> Result<Value, KernelError> {
        Ok(payload)
    }

    fn flat_map(&self, payload: Value, bind: &BindFn<'_>) -> Result<Value, KernelError> {
        match Self::settle(&payload)? {
            Ok(v) => bind(v),
            Err(failure) => Ok(value(Deferred::settled(Err(failure)))),
        }
    }

    fn unit(&self, value_in: Value) -> Result<Value, KernelError> {
        Ok(value(Deferred::ready(value_in)))
    }

    fn unit_sequence(&self, values: Vec<Value>) -> Result<Value, KernelError> {
        // single-valued collapse: the whole list is one resolved value
        Ok(value(Deferred::ready(value(values))))
    }

    fn empty(&self) -> Result<Value, KernelError> {
        Ok(value(Deferred::absent()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::scalar;

    fn settle(payload: &Value) -> Result<Value, DeferredFailure> {
        payload.downcast_ref::<Deferred>().unwrap().settle()
    }

    #[test]
    fn map_settles_and_rewraps() {
        let payload = value(Deferred::from_future(async { Ok(value(20i64)) }));
        let mapped = FutureAdapter
            .map(payload, &|v| Ok(value(scalar::<i64>(&v).unwrap() + 1)))
            .unwrap();
        assert_eq!(scalar::<i64>(&settle(&mapped).unwrap()), Some(21));
    }

    #[test]
    fn fault_carries_through_without_invoking_callback() {
        let payload = value(Deferred::failed("remote died"));
        let mapped = FutureAdapter
            .map(payload, &|_| panic!("must not run on a fault"))
            .unwrap();
        assert_eq!(
            settle(&mapped).err(),
            Some(DeferredFailure::Faulted("remote died".to_string()))
        );
    }

    #[test]
    fn absent_zero_short_circuits_flat_map() {
        let empty = FutureAdapter.empty().unwrap();
        let out = FutureAdapter
            .flat_map(empty, &|_| panic!("must not run on the zero"))
            .unwrap();
        assert_eq!(settle(&out).err(), Some(DeferredFailure::Empty));
    }
}
