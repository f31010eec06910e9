//! Dialect capability interface for the stack IR backend.
//!
//! A dialect describes one virtual-machine target: its value types, its
//! built-in operations with their signatures, which identifiers it reserves,
//! and which built-in implements each per-type special operation (equality,
//! memory and storage access, hashing, discard).
//!
//! The name repository in `sir_names` only ever talks to a dialect through the
//! [`Dialect`] trait, borrowing the [`BuiltinFunction`] definitions for the
//! lifetime of one compilation.
//!
//! [`TableDialect`] is a table-driven implementation assembled with a
//! [`DialectBuilder`]. It ships two presets: [`TableDialect::evm`] (untyped,
//! EVM-style built-ins) and [`TableDialect::typed`] (explicit `u256`/`bool`
//! value types).

mod builtin;
mod table;
mod verbatim;

pub use builtin::{BuiltinFunction, SideEffects};
pub use table::{DialectBuilder, TableDialect};
pub use verbatim::{parse_verbatim_label, verbatim_label, VERBATIM_PREFIX};

/// Per-type special operations a dialect may provide.
///
/// Each value type can have at most one built-in for each kind. A dialect
/// without explicit value types answers these queries for the empty type
/// label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypedOperation {
    /// Drops a value of the type from the stack.
    Discard,
    /// Compares two values of the type for equality.
    Equality,
    /// Loads a value of the type from memory.
    MemoryLoad,
    /// Stores a value of the type to memory.
    MemoryStore,
    /// Loads a value of the type from persistent storage.
    StorageLoad,
    /// Stores a value of the type to persistent storage.
    StorageStore,
    /// Hashes a memory region, producing a value of the type.
    Hash,
}

impl TypedOperation {
    /// All typed operations, in registration order.
    pub const ALL: [TypedOperation; 7] = [
        TypedOperation::Discard,
        TypedOperation::Equality,
        TypedOperation::MemoryLoad,
        TypedOperation::MemoryStore,
        TypedOperation::StorageLoad,
        TypedOperation::StorageStore,
        TypedOperation::Hash,
    ];
}

/// Read-only view of a virtual-machine dialect.
///
/// Implementors own their built-in definitions; callers borrow them.
pub trait Dialect {
    /// Value-type labels in declaration order.
    ///
    /// At most one entry may be empty, meaning "the default, unnamed type".
    fn types(&self) -> &[String];

    /// Label of the boolean value type (empty if the dialect is untyped).
    fn bool_type(&self) -> &str;

    /// Label of the default value type (empty if the dialect is untyped).
    fn default_type(&self) -> &str;

    /// Labels of all built-in operations in enumeration order.
    ///
    /// The verbatim family is not enumerated; its members are reachable
    /// through [`Dialect::builtin`] only.
    fn builtin_names(&self) -> Vec<&str>;

    /// Full definition of the built-in labelled `label`, if any.
    fn builtin(&self, label: &str) -> Option<&BuiltinFunction>;

    /// Whether `label` is reserved by the dialect and may not be used as a
    /// user identifier.
    fn reserved_identifier(&self, label: &str) -> bool;

    /// Dialect-wide boolean negation, if the dialect has one.
    fn boolean_negation_function(&self) -> Option<&BuiltinFunction>;

    /// Built-in implementing `op` for the value type labelled `type_label`.
    fn typed_function(&self, op: TypedOperation, type_label: &str) -> Option<&BuiltinFunction>;
}
