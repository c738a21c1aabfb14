//! Recognizers for foreign wrapper types.
//!
//! When normalization meets a value whose shape is neither the target's own
//! nor one of the built-in shapes, it consults an ordered list of pluggable
//! [`Recognizer`]s. This is how third-party wrapper types gain comprehension
//! support without modifying the kernel: register a recognizer before first
//! use, and every `flat_map` in the process can consume your type.
//!
//! Registration is append-only and idempotent per recognizer name. The list
//! is an immutable snapshot replaced atomically on each registration, so
//! selection is safe for unsynchronized concurrent reads once setup has
//! stabilized.

use crate::error::KernelError;
use crate::value::Value;
use std::sync::{Arc, RwLock};

/// The zero-or-one / zero-or-many intermediate a recognizer produces.
///
/// The normalizer lifts this into the target witness via its adapter's
/// `empty` / `unit` / `unit_sequence`.
pub enum NormalForm {
    /// No value; becomes the target's zero.
    Absent,
    /// Exactly one value; becomes a singleton.
    One(Value),
    /// An ordered list; the target wrapper decides how to collapse it.
    Many(Vec<Value>),
}

/// A pluggable matcher + converter for one foreign wrapper type.
pub trait Recognizer: Send + Sync {
    /// Stable identity; a second registration under the same name is a
    /// harmless no-op.
    fn name(&self) -> &str;

    /// Structural match: does `value` hold the wrapper type this
    /// recognizer converts?
    fn recognizes(&self, value: &Value) -> bool;

    /// Convert a recognized value into its normal form.
    ///
    /// Only called when [`recognizes`](Self::recognizes) returned `true`
    /// for the same value.
    fn normalize(&self, value: Value) -> Result<NormalForm, KernelError>;
}

/// Ordered, append-only set of recognizers.
pub struct ExtensionRegistry {
    recognizers: RwLock<Arc<Vec<Arc<dyn Recognizer>>>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self {
            recognizers: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Append a recognizer.
    ///
    /// Registration order is selection priority order: the first recognizer
    /// whose `recognizes` hits performs the conversion, so a recognizer
    /// registered later never shadows an earlier one. Registering the same
    /// name twice is a no-op.
    pub fn register(&self, recognizer: Arc<dyn Recognizer>) {
        let mut slot = self
            .recognizers
            .write()
            .unwrap_or_else(|e| e.into_inner());
        if slot.iter().any(|r| r.name() == recognizer.name()) {
            return;
        }
        let mut next = Vec::with_capacity(slot.len() + 1);
        next.extend(slot.iter().cloned());
        next.push(recognizer);
        *slot = Arc::new(next);
    }

    /// The current immutable snapshot, in registration order.
    pub fn snapshot(&self) -> Arc<Vec<Arc<dyn Recognizer>>> {
        self.recognizers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// First structural match, if any.
    pub fn select(&self, value: &Value) -> Option<Arc<dyn Recognizer>> {
        self.snapshot()
            .iter()
            .find(|r| r.recognizes(value))
            .cloned()
    }

    /// Registered names, in priority order.
    pub fn names(&self) -> Vec<String> {
        self.snapshot().iter().map(|r| r.name().to_string()).collect()
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{scalar, value};

    struct TagRecognizer {
        name: &'static str,
        tag: i64,
    }

    impl Recognizer for TagRecognizer {
        fn name(&self) -> &str {
            self.name
        }

        fn recognizes(&self, value: &Value) -> bool {
            scalar::<i64>(value).is_some()
        }

        fn normalize(&self, _value: Value) -> Result<NormalForm, KernelError> {
            Ok(NormalForm::One(value(self.tag)))
        }
    }

    #[test]
    fn first_registered_wins() {
        let registry = ExtensionRegistry::new();
        registry.register(Arc::new(TagRecognizer { name: "a", tag: 1 }));
        registry.register(Arc::new(TagRecognizer { name: "b", tag: 2 }));

        let selected = registry.select(&value(0i64)).unwrap();
        assert_eq!(selected.name(), "a");
    }

    #[test]
    fn duplicate_name_is_a_no_op() {
        let registry = ExtensionRegistry::new();
        registry.register(Arc::new(TagRecognizer { name: "a", tag: 1 }));
        registry.register(Arc::new(TagRecognizer { name: "a", tag: 9 }));
        assert_eq!(registry.names(), vec!["a"]);
    }

    #[test]
    fn select_misses_unrecognized_shapes() {
        let registry = ExtensionRegistry::new();
        registry.register(Arc::new(TagRecognizer { name: "a", tag: 1 }));
        assert!(registry.select(&value("text".to_string())).is_none());
    }
}
