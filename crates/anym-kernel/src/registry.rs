//! The witness registry: adapter resolution and handle construction.
//!
//! A [`Registry`] is an explicitly constructed context object, not hidden
//! global state — tests build isolated registries with controlled
//! recognizer sets, and production code passes one down (or clones it;
//! clones share the same adapter table and extension list).
//!
//! Adapters are built lazily on first resolution and cached for the
//! registry's lifetime. Resolution is total: placeholder witnesses resolve
//! to a sentinel adapter that fails every operation, so the error surfaces
//! on the first operation attempt rather than at lookup time.

use crate::adapter::MonadAdapter;
use crate::adapters::{
    EitherAdapter, FutureAdapter, Ident, IdentRecognizer, IdentityAdapter, OptionAdapter,
    ResultRecognizer, SequenceAdapter, UnsupportedAdapter,
};
use crate::anym::AnyM;
use crate::deferred::Deferred;
use crate::error::KernelError;
use crate::extension::{ExtensionRegistry, Recognizer};
use crate::value::{Value, value};
use crate::witness::Witness;
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};

struct RegistryInner {
    adapters: [OnceLock<Arc<dyn MonadAdapter>>; Witness::COUNT],
    extensions: ExtensionRegistry,
}

/// Adapter table plus extension registry, shared by every handle it mints.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// A registry with the built-in adapters and the built-in recognizers.
    pub fn new() -> Self {
        let registry = Self {
            inner: Arc::new(RegistryInner {
                adapters: std::array::from_fn(|_| OnceLock::new()),
                extensions: ExtensionRegistry::new(),
            }),
        };
        registry
            .inner
            .extensions
            .register(Arc::new(ResultRecognizer));
        registry
            .inner
            .extensions
            .register(Arc::new(IdentRecognizer));
        registry
    }

    /// Resolve a witness to its adapter. Total; builds and caches on first
    /// use.
    pub fn resolve(&self, witness: Witness) -> Arc<dyn MonadAdapter> {
        self.inner.adapters[witness.index()]
            .get_or_init(|| build_adapter(witness))
            .clone()
    }

    /// The recognizer list consulted for foreign callback shapes.
    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.inner.extensions
    }

    /// Append a recognizer for a foreign wrapper type.
    ///
    /// Must happen before the type first flows through a `flat_map`;
    /// built-in shapes always win over registered recognizers.
    pub fn register_recognizer(&self, recognizer: Arc<dyn Recognizer>) {
        self.inner.extensions.register(recognizer);
    }

    /// Wrap a single value under the given witness.
    pub fn unit(&self, witness: Witness, v: Value) -> Result<AnyM, KernelError> {
        let payload = self.resolve(witness).unit(v)?;
        Ok(AnyM::from_parts(self.clone(), witness, payload))
    }

    /// The zero handle for the given witness.
    pub fn empty(&self, witness: Witness) -> Result<AnyM, KernelError> {
        let payload = self.resolve(witness).empty()?;
        Ok(AnyM::from_parts(self.clone(), witness, payload))
    }

    /// Lift an ordered list of elements under the given witness, using its
    /// sequence-collapse rule.
    pub fn unit_sequence(&self, witness: Witness, values: Vec<Value>) -> Result<AnyM, KernelError> {
        let payload = self.resolve(witness).unit_sequence(values)?;
        Ok(AnyM::from_parts(self.clone(), witness, payload))
    }

    /// Lift an `Option` into an `option` handle.
    pub fn lift_option<T: Any + Send + Sync>(&self, opt: Option<T>) -> AnyM {
        AnyM::from_parts(self.clone(), Witness::Option, value(opt.map(value)))
    }

    /// Lift an iterator into a `list` handle, preserving order.
    pub fn lift_list<T, I>(&self, items: I) -> AnyM
    where
        T: Any + Send + Sync,
        I: IntoIterator<Item = T>,
    {
        let elements: Vec<Value> = items.into_iter().map(value).collect();
        AnyM::from_parts(self.clone(), Witness::List, value(elements))
    }

    /// Lift an iterator into a `deque` handle, preserving order.
    pub fn lift_deque<T, I>(&self, items: I) -> AnyM
    where
        T: Any + Send + Sync,
        I: IntoIterator<Item = T>,
    {
        let elements: VecDeque<Value> = items.into_iter().map(value).collect();
        AnyM::from_parts(self.clone(), Witness::Deque, value(elements))
    }

    /// Lift a `Result` into an `either` handle.
    pub fn lift_result<T, E>(&self, result: Result<T, E>) -> AnyM
    where
        T: Any + Send + Sync,
        E: Any + Send + Sync,
    {
        let native: Result<Value, Value> = result.map(value).map_err(value);
        AnyM::from_parts(self.clone(), Witness::Either, value(native))
    }

    /// Lift a deferred into a `future` handle.
    pub fn lift_deferred(&self, deferred: Deferred) -> AnyM {
        AnyM::from_parts(self.clone(), Witness::Future, value(deferred))
    }

    /// Lift a bare value into an `identity` handle.
    pub fn lift_identity<T: Any + Send + Sync>(&self, v: T) -> AnyM {
        AnyM::from_parts(self.clone(), Witness::Identity, value(Ident(value(v))))
    }

    /// Capability row for every witness, in slot order.
    pub fn capabilities(&self) -> Vec<WitnessCapability> {
        Witness::ALL
            .iter()
            .map(|&witness| {
                let adapter = self.resolve(witness);
                WitnessCapability {
                    witness,
                    supported: !witness.is_placeholder(),
                    filterable: adapter.is_filterable(),
                }
            })
            .collect()
    }

    /// Capability surface as JSON, for diagnostics and conformance checks.
    pub fn capabilities_json(&self) -> serde_json::Value {
        json!({
            "schema": 1,
            "registryKind": "anym.witness_capabilities.v1",
            "witnesses": self.capabilities(),
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// What a witness's adapter can and cannot do.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WitnessCapability {
    pub witness: Witness,
    pub supported: bool,
    pub filterable: bool,
}

fn build_adapter(witness: Witness) -> Arc<dyn MonadAdapter> {
    match witness {
        Witness::Identity => Arc::new(IdentityAdapter),
        Witness::Option => Arc::new(OptionAdapter),
        Witness::List => Arc::new(SequenceAdapter::list()),
        Witness::Deque => Arc::new(SequenceAdapter::deque()),
        Witness::Either => Arc::new(EitherAdapter),
        Witness::Future => Arc::new(FutureAdapter),
        Witness::Reader | Witness::Writer | Witness::State => {
            Arc::new(UnsupportedAdapter::new(witness))
        }
    }
}
