//! Sentinel adapter for placeholder witnesses.
//!
//! Placeholders resolve to this adapter instead of panicking at
//! construction: resolution stays total, and the error surfaces on the
//! first operation attempt against the unsupported wrapper kind.

use crate::adapter::MonadAdapter;
use crate::error::KernelError;
use crate::value::{BindFn, FilterFn, MapFn, Value};
use crate::witness::Witness;

/// Adapter whose every operation fails with
/// [`KernelError::UnsupportedWitness`].
pub struct UnsupportedAdapter {
    witness: Witness,
}

impl UnsupportedAdapter {
    pub fn new(witness: Witness) -> Self {
        Self { witness }
    }

    fn unsupported<T>(&self) -> Result<T, KernelError> {
        Err(KernelError::UnsupportedWitness {
            witness: self.witness,
        })
    }
}

impl MonadAdapter for UnsupportedAdapter {
    fn witness(&self) -> Witness {
        self.witness
    }

    fn is_filterable(&self) -> bool {
        false
    }

    fn accepts(&self, _payload: &Value) -> bool {
        false
    }

    fn map(&self, _payload: Value, _f: &MapFn<'_>) -> Result<Value, KernelError> {
        self.unsupported()
    }

    fn filter(&self, _payload: Value, _keep: &FilterFn<'_>) -> Result<Value, KernelError> {
        self.unsupported()
    }

    fn flat_map(&self, _payload: Value, _bind: &BindFn<'_>) -> Result<Value, KernelError> {
        self.unsupported()
    }

    fn unit(&self, _value: Value) -> Result<Value, KernelError> {
        self.unsupported()
    }

    fn unit_sequence(&self, _values: Vec<Value>) -> Result<Value, KernelError> {
        self.unsupported()
    }

    fn empty(&self) -> Result<Value, KernelError> {
        self.unsupported()
    }
}
