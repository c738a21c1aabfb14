//! Witness identity tags.
//!
//! A [`Witness`] names a wrapper kind. Exactly one adapter is associated
//! with each witness for the lifetime of a registry, and witnesses are
//! compared by identity only — two handles compose the same way iff they
//! carry the same tag, regardless of what their payloads look like.
//!
//! The enum is deliberately closed: built-in wrapper kinds dispatch by
//! pattern match, and foreign wrapper types enter the system through the
//! extension registry rather than through new tags.

use serde::Serialize;
use std::fmt;

/// Identity tag for a wrapper kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Witness {
    /// Bare single value with no absent state.
    Identity,
    /// Present/absent single value (`Option` native shape).
    Option,
    /// Ordered sequence (`Vec` native shape).
    List,
    /// Double-ended ordered sequence (`VecDeque` native shape).
    Deque,
    /// Two-sided result (`Result` native shape). Not filterable: filtering
    /// would require fabricating a left value out of nothing.
    Either,
    /// Asynchronous single value (`Deferred` native shape).
    Future,
    /// Placeholder: reader wrapper, no adapter yet.
    Reader,
    /// Placeholder: writer wrapper, no adapter yet.
    Writer,
    /// Placeholder: state wrapper, no adapter yet.
    State,
}

impl Witness {
    /// Every witness, in adapter-slot order.
    pub const ALL: [Witness; 9] = [
        Witness::Identity,
        Witness::Option,
        Witness::List,
        Witness::Deque,
        Witness::Either,
        Witness::Future,
        Witness::Reader,
        Witness::Writer,
        Witness::State,
    ];

    /// Number of witnesses (sizes the registry's adapter table).
    pub const COUNT: usize = Self::ALL.len();

    /// Stable slot index into the registry's adapter table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this witness is a placeholder for a not-yet-implemented
    /// wrapper kind. Placeholders resolve to a sentinel adapter whose every
    /// operation fails with [`KernelError::UnsupportedWitness`].
    ///
    /// [`KernelError::UnsupportedWitness`]: crate::error::KernelError::UnsupportedWitness
    pub fn is_placeholder(self) -> bool {
        matches!(self, Witness::Reader | Witness::Writer | Witness::State)
    }

    /// Snake-case name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Witness::Identity => "identity",
            Witness::Option => "option",
            Witness::List => "list",
            Witness::Deque => "deque",
            Witness::Either => "either",
            Witness::Future => "future",
            Witness::Reader => "reader",
            Witness::Writer => "writer",
            Witness::State => "state",
        }
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_all_order() {
        for (i, w) in Witness::ALL.iter().enumerate() {
            assert_eq!(w.index(), i);
        }
    }

    #[test]
    fn placeholders_are_flagged() {
        assert!(Witness::Reader.is_placeholder());
        assert!(Witness::State.is_placeholder());
        assert!(!Witness::Option.is_placeholder());
        assert!(!Witness::Future.is_placeholder());
    }

    #[test]
    fn serde_name_matches_display() {
        for w in Witness::ALL {
            let json = serde_json::to_value(w).unwrap();
            assert_eq!(json, serde_json::Value::String(w.to_string()));
        }
    }
}
