//! The identity wrapper: a bare single value with no absent state.

use crate::adapter::MonadAdapter;
use crate::error::KernelError;
use crate::extension::{NormalForm, Recognizer};
use crate::value::{BindFn, FilterFn, MapFn, Value, expect_native, value};
use crate::witness::Witness;

/// Native shape of the `identity` witness.
#[derive(Clone)]
pub struct Ident(pub Value);

/// Adapter for the `identity` witness.
///
/// Not filterable: there is no way to represent "the value was filtered
/// out" without an absent state.
pub struct IdentityAdapter;

impl MonadAdapter for IdentityAdapter {
    fn witness(&self) -> Witness {
        Witness::Identity
    }

    fn is_filterable(&self) -> bool {
        false
    }

    fn accepts(&self, payload: &Value) -> bool {
        payload.downcast_ref::<Ident>().is_some()
    }

    fn map(&self, payload: Value, f: &MapFn<'_>) -> Result<Value, KernelError> {
        let id = expect_native::<Ident>(Witness::Identity, &payload)?;
        Ok(value(Ident(f(id.0.clone())?)))
    }

    fn filter(&self, payload: Value, _keep: &FilterFn<'_>) -> Result<Value, KernelError> {
        Ok(payload)
    }

    fn flat_map(&self, payload: Value, bind: &BindFn<'_>) -> Result<Value, KernelError> {
        let id = expect_native::<Ident>(Witness::Identity, &payload)?;
        bind(id.0.clone())
    }

    fn unit(&self, value_in: Value) -> Result<Value, KernelError> {
        Ok(value(Ident(value_in)))
    }

    fn unit_sequence(&self, values: Vec<Value>) -> Result<Value, KernelError> {
        // single-valued collapse: the whole list is one value
        Ok(value(Ident(value(values))))
    }

    fn empty(&self) -> Result<Value, KernelError> {
        Err(KernelError::NoEmpty {
            witness: Witness::Identity,
        })
    }
}

/// Built-in recognizer for bare identity payloads.
///
/// Registered at registry construction so that an identity handle returned
/// from a callback contributes its inner value to the composing wrapper,
/// instead of landing in the scalar fallback still wrapped.
pub struct IdentRecognizer;

impl Recognizer for IdentRecognizer {
    fn name(&self) -> &str {
        "builtin.identity"
    }

    fn recognizes(&self, value: &Value) -> bool {
        value.downcast_ref::<Ident>().is_some()
    }

    fn normalize(&self, value: Value) -> Result<NormalForm, KernelError> {
        let id = expect_native::<Ident>(Witness::Identity, &value)?;
        Ok(NormalForm::One(id.0.clone()))
    }
}
