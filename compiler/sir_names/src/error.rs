//! Invariant violations reported by the name repository.
//!
//! Every variant describes a bug in the caller, not malformed input. The
//! panicking entry points (`intern`, `derive_from`, `index_of_type`,
//! `required_label_of`, `generate_labels`) abort with this error's message;
//! the `try_` twins hand it back instead.

use crate::Name;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// A type index was requested for a name that is not a dialect type.
    #[error("{name:?} is not a value type of this dialect")]
    UnknownType { name: Name },

    /// A label was required for a name that does not have one yet.
    #[error("{name:?} currently has no defined label")]
    MissingLabel { name: Name },

    /// The arena or the label table outgrew 32-bit indices.
    #[error("name arena is full: {count} entries, max is {}", u32::MAX)]
    ArenaOverflow { count: usize },

    /// Label finalization was handed a used-name sequence that is not
    /// strictly ascending.
    #[error("used names must be strictly ascending, but {previous:?} is followed by {next:?}")]
    UnsortedUsedNames { previous: Name, next: Name },
}
