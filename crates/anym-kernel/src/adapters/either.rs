//! The two-sided result wrapper.
//!
//! Native shape: `Result<Value, Value>`. The right side is the element
//! channel; the left side carries through `map`/`flat_map` untouched.
//! Not filterable — rejecting a right value would require fabricating a
//! left value out of nothing, so `filter` is an identity no-op.

use crate::adapter::MonadAdapter;
use crate::error::KernelError;
use crate::extension::{NormalForm, Recognizer};
use crate::value::{BindFn, FilterFn, MapFn, Value, expect_native, value};
use crate::witness::Witness;

/// Adapter for the `either` witness.
pub struct EitherAdapter;

impl EitherAdapter {
    fn native(payload: &Value) -> Result<Result<Value, Value>, KernelError> {
        Ok(expect_native::<Result<Value, Value>>(Witness::Either, payload)?.clone())
    }
}

impl MonadAdapter for EitherAdapter {
    fn witness(&self) -> Witness {
        Witness::Either
    }

    fn is_filterable(&self) -> bool {
        false
    }

    fn accepts(&self, payload: &Value) -> bool {
        payload.downcast_ref::<Result<Value, Value>>().is_some()
    }

    fn map(&self, payload: Value, f: &MapFn<'_>) -> Result<Value, KernelError> {
        let mapped = match Self::native(&payload)? {
            Ok(v) => Ok(f(v)?),
            Err(left) => Err(left),
        };
        Ok(value(mapped))
    }

    fn filter(&self, payload: Value, _keep: &FilterFn<'_>) -> Result<Value, KernelError> {
        Ok(payload)
    }

    fn flat_map(&self, payload: Value, bind: &BindFn<'_>) -> Result<Value, KernelError> {
        match Self::native(&payload)? {
            Ok(v) => bind(v),
            Err(left) => Ok(value(Err::<Value, Value>(left))),
        }
    }

    fn unit(&self, value_in: Value) -> Result<Value, KernelError> {
        Ok(value(Ok::<Value, Value>(value_in)))
    }

    fn unit_sequence(&self, values: Vec<Value>) -> Result<Value, KernelError> {
        // single-valued collapse: the whole list is one right value
        Ok(value(Ok::<Value, Value>(value(values))))
    }

    fn empty(&self) -> Result<Value, KernelError> {
        // unit left: the only zero a two-sided wrapper can offer
        Ok(value(Err::<Value, Value>(value(()))))
    }
}

/// Built-in recognizer for `Result`-shaped callback results.
///
/// Registered at registry construction, ahead of any user recognizer:
/// a right value normalizes to a singleton, a left value to the target's
/// zero. Normalizing into the `either` witness itself never reaches this
/// recognizer — the identity check claims the value first and the left
/// side survives intact.
pub struct ResultRecognizer;

impl Recognizer for ResultRecognizer {
    fn name(&self) -> &str {
        "builtin.result"
    }

    fn recognizes(&self, value: &Value) -> bool {
        value.downcast_ref::<Result<Value, Value>>().is_some()
    }

    fn normalize(&self, value: Value) -> Result<NormalForm, KernelError> {
        let native = expect_native::<Result<Value, Value>>(Witness::Either, &value)?;
        Ok(match native {
            Ok(v) => NormalForm::One(v.clone()),
            Err(_) => NormalForm::Absent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::scalar;

    fn as_result(payload: &Value) -> Result<Value, Value> {
        payload.downcast_ref::<Result<Value, Value>>().unwrap().clone()
    }

    #[test]
    fn left_short_circuits() {
        let left = value(Err::<Value, Value>(value("boom".to_string())));
        let mapped = EitherAdapter
            .map(left.clone(), &|_| panic!("must not run on a left"))
            .unwrap();
        let inner = as_result(&mapped).err().unwrap();
        assert_eq!(scalar::<String>(&inner), Some("boom".to_string()));

        let bound = EitherAdapter
            .flat_map(left, &|_| panic!("must not run on a left"))
            .unwrap();
        assert!(as_result(&bound).is_err());
    }

    #[test]
    fn filter_is_identity() {
        let payload = EitherAdapter.unit(value(1i64)).unwrap();
        let out = EitherAdapter.filter(payload.clone(), &|_| false).unwrap();
        let before = as_result(&payload).ok().unwrap();
        let after = as_result(&out).ok().unwrap();
        assert_eq!(scalar::<i64>(&before), scalar::<i64>(&after));
    }

    #[test]
    fn recognizer_sends_left_to_absent() {
        let left = value(Err::<Value, Value>(value(())));
        assert!(ResultRecognizer.recognizes(&left));
        assert!(matches!(
            ResultRecognizer.normalize(left).unwrap(),
            NormalForm::Absent
        ));

        let right = value(Ok::<Value, Value>(value(5i64)));
        assert!(matches!(
            ResultRecognizer.normalize(right).unwrap(),
            NormalForm::One(_)
        ));
    }
}
