//! Type-erased runtime values.
//!
//! Every payload and every element flowing through the dispatch layer is a
//! [`Value`]: a shared, type-erased cell. `Arc` rather than `Box` so that
//! handles stay cheap to clone, elements can be reused by `ap`, and settled
//! asynchronous results can be memoized — all without locking.
//!
//! Adapters recover their native shapes with `expect_native`, the
//! capability guard that runs before every native operation. A mismatch is a
//! programming error on the caller's side and surfaces as a typed
//! [`KernelError::PayloadMismatch`], never as a panic.

use crate::error::KernelError;
use crate::witness::Witness;
use std::any::Any;
use std::sync::Arc;

/// A type-erased runtime value.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Lift any sendable value into a [`Value`].
pub fn value<T: Any + Send + Sync>(v: T) -> Value {
    Arc::new(v)
}

/// Read a scalar back out of a [`Value`], cloning the inner data.
///
/// Returns `None` if the value holds a different type.
pub fn scalar<T: Any + Send + Sync + Clone>(v: &Value) -> Option<T> {
    v.downcast_ref::<T>().cloned()
}

/// The element shape a function-bearing handle wraps.
///
/// `ap` applies each wrapped function to each wrapped argument; the
/// functions travel through the same type-erased channel as every other
/// element, wrapped in this newtype so adapters can recognize them.
#[derive(Clone)]
pub struct Apply(pub Arc<dyn Fn(Value) -> Value + Send + Sync>);

impl Apply {
    pub fn new(f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, v: Value) -> Value {
        (self.0)(v)
    }
}

/// Fallible element transform handed to an adapter's `map`.
pub type MapFn<'a> = dyn Fn(Value) -> Result<Value, KernelError> + 'a;

/// Predicate handed to an adapter's `filter`.
pub type FilterFn<'a> = dyn Fn(&Value) -> bool + 'a;

/// Normalize-composed callback handed to an adapter's `flat_map`.
///
/// By the time an adapter sees this function, the normalization step has
/// already been composed in: the function returns payloads in the adapter's
/// own native shape, so the adapter only has to flatten natively.
pub type BindFn<'a> = dyn Fn(Value) -> Result<Value, KernelError> + 'a;

/// Downcast guard adapters run before every native operation.
pub(crate) fn expect_native<T: Any + Send + Sync>(
    witness: Witness,
    payload: &Value,
) -> Result<&T, KernelError> {
    payload
        .downcast_ref::<T>()
        .ok_or(KernelError::PayloadMismatch { witness })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_round_trip() {
        let v = value(42i64);
        assert_eq!(scalar::<i64>(&v), Some(42));
        assert_eq!(scalar::<String>(&v), None);
    }

    #[test]
    fn expect_native_mismatch_is_typed() {
        let v = value("text".to_string());
        let err = expect_native::<i64>(Witness::Option, &v).unwrap_err();
        assert!(matches!(
            err,
            KernelError::PayloadMismatch {
                witness: Witness::Option
            }
        ));
    }

    #[test]
    fn apply_calls_through_erasure() {
        let double = Apply::new(|v| value(scalar::<i64>(&v).unwrap() * 2));
        let out = double.call(value(21i64));
        assert_eq!(scalar::<i64>(&out), Some(42));
    }
}
