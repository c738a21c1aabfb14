//! Ordered multi-valued wrappers.
//!
//! One parameterized adapter serves every sequence-shaped witness: it is
//! instantiated with the constructor functions of its concrete collection
//! (match / extract / rebuild), the way a new collection kind would be
//! added without touching the flatten logic.

use crate::adapter::MonadAdapter;
use crate::error::KernelError;
use crate::value::{BindFn, FilterFn, MapFn, Value, value};
use crate::witness::Witness;
use std::collections::VecDeque;

/// Adapter for sequence witnesses. Native shapes: `Vec<Value>` for `list`,
/// `VecDeque<Value>` for `deque`.
pub struct SequenceAdapter {
    witness: Witness,
    matches: fn(&Value) -> bool,
    extract: fn(&Value) -> Option<Vec<Value>>,
    rebuild: fn(Vec<Value>) -> Value,
}

impl SequenceAdapter {
    pub fn list() -> Self {
        Self {
            witness: Witness::List,
            matches: |v| v.downcast_ref::<Vec<Value>>().is_some(),
            extract: |v| v.downcast_ref::<Vec<Value>>().cloned(),
            rebuild: value,
        }
    }

    pub fn deque() -> Self {
        Self {
            witness: Witness::Deque,
            matches: |v| v.downcast_ref::<VecDeque<Value>>().is_some(),
            extract: |v| {
                v.downcast_ref::<VecDeque<Value>>()
                    .map(|d| d.iter().cloned().collect())
            },
            rebuild: |vs| value(VecDeque::from(vs)),
        }
    }

    fn elements(&self, payload: &Value) -> Result<Vec<Value>, KernelError> {
        (self.extract)(payload).ok_or(KernelError::PayloadMismatch {
            witness: self.witness,
        })
    }
}

impl MonadAdapter for SequenceAdapter {
    fn witness(&self) -> Witness {
        self.witness
    }

    fn accepts(&self, payload: &Value) -> bool {
        (self.matches)(payload)
    }

    fn map(&self, payload: Value, f: &MapFn<'_>) -> Result<Value, KernelError> {
        let mut mapped = Vec::new();
        for v in self.elements(&payload)? {
            mapped.push(f(v)?);
        }
        Ok((self.rebuild)(mapped))
    }

    fn filter(&self, payload: Value, keep: &FilterFn<'_>) -> Result<Value, KernelError> {
        let mut kept = self.elements(&payload)?;
        kept.retain(|v| keep(v));
        Ok((self.rebuild)(kept))
    }

    fn flat_map(&self, payload: Value, bind: &BindFn<'_>) -> Result<Value, KernelError> {
        let mut flattened = Vec::new();
        for v in self.elements(&payload)? {
            let native = bind(v)?;
            flattened.extend(self.elements(&native)?);
        }
        Ok((self.rebuild)(flattened))
    }

    fn unit(&self, value_in: Value) -> Result<Value, KernelError> {
        Ok((self.rebuild)(vec![value_in]))
    }

    fn unit_sequence(&self, values: Vec<Value>) -> Result<Value, KernelError> {
        // multi-valued collapse: splice the elements in order
        Ok((self.rebuild)(values))
    }

    fn empty(&self) -> Result<Value, KernelError> {
        Ok((self.rebuild)(Vec::new()))
    }
}
