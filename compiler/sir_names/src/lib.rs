//! Name management for the stack IR backend.
//!
//! Every identifier of the IR (variables, functions, dialect built-ins and
//! value types) is a [`Name`]: a dense 32-bit handle into one
//! [`NameRepository`]. The repository
//!
//! - interns identifier text once, so names compare and hash as integers;
//! - lets optimizer passes mint derived names that have no text yet
//!   ([`NameRepository::derive_from`]);
//! - assigns final, unique, legal labels to the names that are actually
//!   emitted ([`NameRepository::generate_labels`]), keeping original text
//!   wherever it is still free.
//!
//! It also encodes the dialect's built-ins and value types into the same
//! name space, so "is this a built-in", "is this a type" and "what is the
//! equality operator for type T" are integer range checks and table lookups.
//!
//! # Errors
//!
//! Missing optional things (a dialect without `tstore`, a type without a
//! storage load) are `None`. Everything else that can go wrong is a caller
//! bug: the plain entry points panic, the `try_` twins return [`NameError`].
//!
//! # Features
//!
//! - `cache`: `serde` support for [`Name`], [`LabelIndex`], [`NameState`]
//!   and the predefined-name tables.

mod arena;
mod builtin;
mod error;
mod name;
mod predefined;
mod repository;

pub use arena::NameState;
pub use builtin::BuiltinRecord;
pub use error::NameError;
pub use name::{LabelIndex, Name};
pub use predefined::{
    IndexBoundaries, PredefinedBuiltins, PredefinedNames, LABEL_SUFFIX_SEPARATOR,
    PLACEHOLDER_ONE_LABEL, PLACEHOLDER_THIRTY_TWO_LABEL, PLACEHOLDER_ZERO_LABEL,
    VERBATIM_BASE_LABEL,
};
pub use repository::NameRepository;
