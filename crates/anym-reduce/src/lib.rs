//! Reduction companion: fold a sequence of values into one.
//!
//! A [`Monoid`] is a zero plus an associative combine; a [`Reducer`] pairs a
//! monoid with a per-element mapper so a plain sequence can be folded into a
//! collection (or any other combinable value) in one pass. The bridge at the
//! bottom folds type-erased elements into an [`AnyM`] handle, consuming only
//! the lift subset of the adapter contract.
//!
//! Collections here are `std` collections on purpose: this crate folds into
//! them, it does not implement them.

use anym_kernel::{AnyM, KernelError, Registry, Value, Witness};
use std::sync::Arc;

/// A zero and an associative combine over `A`.
pub struct Monoid<A> {
    zero: Arc<dyn Fn() -> A + Send + Sync>,
    combine: Arc<dyn Fn(A, A) -> A + Send + Sync>,
}

impl<A> Clone for Monoid<A> {
    fn clone(&self) -> Self {
        Self {
            zero: self.zero.clone(),
            combine: self.combine.clone(),
        }
    }
}

impl<A: 'static> Monoid<A> {
    pub fn new(
        zero: impl Fn() -> A + Send + Sync + 'static,
        combine: impl Fn(A, A) -> A + Send + Sync + 'static,
    ) -> Self {
        Self {
            zero: Arc::new(zero),
            combine: Arc::new(combine),
        }
    }

    /// A fresh zero element.
    pub fn zero(&self) -> A {
        (self.zero)()
    }

    pub fn combine(&self, a: A, b: A) -> A {
        (self.combine)(a, b)
    }

    /// Fold a sequence from the zero, left to right.
    pub fn reduce(&self, items: impl IntoIterator<Item = A>) -> A {
        items
            .into_iter()
            .fold(self.zero(), |acc, item| self.combine(acc, item))
    }
}

/// A monoid plus a per-element mapper: folds a sequence of `A` into one `C`.
pub struct Reducer<C, A> {
    monoid: Monoid<C>,
    mapper: Arc<dyn Fn(A) -> C + Send + Sync>,
}

impl<C, A> Clone for Reducer<C, A> {
    fn clone(&self) -> Self {
        Self {
            monoid: self.monoid.clone(),
            mapper: self.mapper.clone(),
        }
    }
}

impl<C: 'static, A: 'static> Reducer<C, A> {
    pub fn from_monoid(
        monoid: Monoid<C>,
        mapper: impl Fn(A) -> C + Send + Sync + 'static,
    ) -> Self {
        Self {
            monoid,
            mapper: Arc::new(mapper),
        }
    }

    pub fn monoid(&self) -> &Monoid<C> {
        &self.monoid
    }

    /// Map every element into the carrier, then fold.
    pub fn map_reduce(&self, items: impl IntoIterator<Item = A>) -> C {
        items
            .into_iter()
            .fold(self.monoid.zero(), |acc, item| {
                self.monoid.combine(acc, (self.mapper)(item))
            })
    }
}

/// Stock monoids over `std` carriers.
pub mod monoids {
    use super::Monoid;
    use std::collections::{BTreeSet, VecDeque};

    pub fn vec_concat<T: Send + Sync + 'static>() -> Monoid<Vec<T>> {
        Monoid::new(Vec::new, |mut a, mut b| {
            a.append(&mut b);
            a
        })
    }

    pub fn deque_concat<T: Send + Sync + 'static>() -> Monoid<VecDeque<T>> {
        Monoid::new(VecDeque::new, |mut a, mut b| {
            a.append(&mut b);
            a
        })
    }

    pub fn set_union<T: Ord + Send + Sync + 'static>() -> Monoid<BTreeSet<T>> {
        Monoid::new(BTreeSet::new, |mut a, b| {
            a.extend(b);
            a
        })
    }

    pub fn sum_i64() -> Monoid<i64> {
        Monoid::new(|| 0, |a, b| a + b)
    }

    pub fn product_i64() -> Monoid<i64> {
        Monoid::new(|| 1, |a, b| a * b)
    }

    /// String concatenation with a separator between non-empty operands.
    pub fn join(separator: impl Into<String>) -> Monoid<String> {
        let separator = separator.into();
        Monoid::new(String::new, move |a, b| {
            if a.is_empty() {
                b
            } else if b.is_empty() {
                a
            } else {
                a + &separator + &b
            }
        })
    }
}

/// Stock reducers: singleton-map into a carrier monoid.
pub mod reducers {
    use super::{Reducer, monoids};
    use std::collections::{BTreeSet, VecDeque};

    pub fn to_vec<T: Send + Sync + 'static>() -> Reducer<Vec<T>, T> {
        Reducer::from_monoid(monoids::vec_concat(), |item| vec![item])
    }

    pub fn to_deque<T: Send + Sync + 'static>() -> Reducer<VecDeque<T>, T> {
        Reducer::from_monoid(monoids::deque_concat(), |item| VecDeque::from([item]))
    }

    pub fn to_set<T: Ord + Send + Sync + 'static>() -> Reducer<BTreeSet<T>, T> {
        Reducer::from_monoid(monoids::set_union(), |item| BTreeSet::from([item]))
    }
}

/// Fold type-erased elements into a wrapper handle.
///
/// Consumes only the lift subset of the adapter contract: the target
/// witness's sequence-collapse rule decides whether the elements splice
/// (multi-valued wrappers) or wrap as one value (single-valued wrappers).
pub fn fold_into(
    registry: &Registry,
    witness: Witness,
    items: impl IntoIterator<Item = Value>,
) -> Result<AnyM, KernelError> {
    registry.unit_sequence(witness, items.into_iter().collect())
}
