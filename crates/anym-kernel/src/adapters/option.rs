//! The present/absent single-value wrapper.

use crate::adapter::MonadAdapter;
use crate::error::KernelError;
use crate::value::{BindFn, FilterFn, MapFn, Value, expect_native, value};
use crate::witness::Witness;

/// Adapter for the `option` witness. Native shape: `Option<Value>`.
pub struct OptionAdapter;

impl OptionAdapter {
    fn native(payload: &Value) -> Result<Option<Value>, KernelError> {
        Ok(expect_native::<Option<Value>>(Witness::Option, payload)?.clone())
    }
}

impl MonadAdapter for OptionAdapter {
    fn witness(&self) -> Witness {
        Witness::Option
    }

    fn accepts(&self, payload: &Value) -> bool {
        payload.downcast_ref::<Option<Value>>().is_some()
    }

    fn map(&self, payload: Value, f: &MapFn<'_>) -> Result<Value, KernelError> {
        let mapped = match Self::native(&payload)? {
            Some(v) => Some(f(v)?),
            None => None,
        };
        Ok(value(mapped))
    }

    fn filter(&self, payload: Value, keep: &FilterFn<'_>) -> Result<Value, KernelError> {
        let filtered = Self::native(&payload)?.filter(|v| keep(v));
        Ok(value(filtered))
    }

    fn flat_map(&self, payload: Value, bind: &BindFn<'_>) -> Result<Value, KernelError> {
        match Self::native(&payload)? {
            Some(v) => bind(v),
            None => self.empty(),
        }
    }

    fn unit(&self, value_in: Value) -> Result<Value, KernelError> {
        Ok(value(Some(value_in)))
    }

    fn unit_sequence(&self, values: Vec<Value>) -> Result<Value, KernelError> {
        // single-valued collapse: the whole list is one value
        Ok(value(Some(value(values))))
    }

    fn empty(&self) -> Result<Value, KernelError> {
        Ok(value(None::<Value>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::scalar;

    fn as_option(payload: &Value) -> Option<Value> {
        payload.downcast_ref::<Option<Value>>().unwrap().clone()
    }

    #[test]
    fn map_preserves_absence() {
        let absent = OptionAdapter.empty().unwrap();
        let mapped = OptionAdapter
            .map(absent, &|_| panic!("must not run on the zero"))
            .unwrap();
        assert!(as_option(&mapped).is_none());
    }

    #[test]
    fn filter_drops_rejected() {
        let payload = OptionAdapter.unit(value(4i64)).unwrap();
        let kept = OptionAdapter
            .filter(payload.clone(), &|v| scalar::<i64>(v) == Some(4))
            .unwrap();
        assert!(as_option(&kept).is_some());

        let dropped = OptionAdapter.filter(payload, &|_| false).unwrap();
        assert!(as_option(&dropped).is_none());
    }

    #[test]
    fn flat_map_short_circuits_on_absent() {
        let absent = OptionAdapter.empty().unwrap();
        let out = OptionAdapter
            .flat_map(absent, &|_| panic!("must not run on the zero"))
            .unwrap();
        assert!(as_option(&out).is_none());
    }

    #[test]
    fn unit_sequence_wraps_list_as_one_value() {
        let payload = OptionAdapter
            .unit_sequence(vec![value(1i64), value(2i64)])
            .unwrap();
        let inner = as_option(&payload).unwrap();
        let list = inner.downcast_ref::<Vec<Value>>().unwrap();
        assert_eq!(list.len(), 2);
    }
}
