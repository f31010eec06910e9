//! Names the optimizer needs direct handles to.
//!
//! All of these are computed once while the repository registers its
//! dialect, and never change afterwards.

use sir_dialect::TypedOperation;

use crate::Name;

/// Label of the base name every verbatim built-in is derived from.
///
/// Contains a space, so it can never collide with a user identifier.
pub const VERBATIM_BASE_LABEL: &str = "@ verbatim";

/// Placeholder label for the constant `0`.
pub const PLACEHOLDER_ZERO_LABEL: &str = "@ 0";
/// Placeholder label for the constant `1`.
pub const PLACEHOLDER_ONE_LABEL: &str = "@ 1";
/// Placeholder label for the constant `32`.
pub const PLACEHOLDER_THIRTY_TWO_LABEL: &str = "@ 32";

/// Separator between a base label and its disambiguating counter.
pub const LABEL_SUFFIX_SEPARATOR: char = '_';

/// Identifiers with a fixed meaning in the optimizer.
///
/// The `Option` fields are `Some` only if the dialect defines (or reserves)
/// the corresponding identifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PredefinedNames {
    pub empty: Name,
    /// Base of every verbatim built-in.
    pub verbatim: Name,
    /// Boolean value type, or the empty name for untyped dialects.
    pub bool_type: Name,
    /// Default value type, or the empty name for untyped dialects.
    pub default_type: Name,
    pub dataoffset: Option<Name>,
    pub datasize: Option<Name>,
    pub selfdestruct: Option<Name>,
    pub tstore: Option<Name>,
    pub memoryguard: Option<Name>,
    pub eq: Option<Name>,
    pub add: Option<Name>,
    pub sub: Option<Name>,
    pub placeholder_zero: Name,
    pub placeholder_one: Name,
    pub placeholder_thirty_two: Name,
}

/// Built-ins implementing the per-type special operations.
///
/// `typed` has one slot per dialect value type, in declaration order; a
/// dialect without value types gets a single slot for the empty type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PredefinedBuiltins {
    pub boolean_negation: Option<Name>,
    typed: Vec<[Option<Name>; TypedOperation::ALL.len()]>,
}

impl PredefinedBuiltins {
    pub(crate) fn push_type_slot(&mut self, slot: [Option<Name>; TypedOperation::ALL.len()]) {
        self.typed.push(slot);
    }

    /// Built-in for `op` on the value type at position `type_index`.
    pub fn typed(&self, op: TypedOperation, type_index: usize) -> Option<Name> {
        self.typed.get(type_index)?[slot_of(op)]
    }

    /// Number of type slots.
    pub fn slot_count(&self) -> usize {
        self.typed.len()
    }
}

/// Position of `op` within a type slot.
pub(crate) fn slot_of(op: TypedOperation) -> usize {
    match op {
        TypedOperation::Discard => 0,
        TypedOperation::Equality => 1,
        TypedOperation::MemoryLoad => 2,
        TypedOperation::MemoryStore => 3,
        TypedOperation::StorageLoad => 4,
        TypedOperation::StorageStore => 5,
        TypedOperation::Hash => 6,
    }
}

/// Half-open name ranges fixed at construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexBoundaries {
    pub begin_types: Name,
    pub end_types: Name,
    pub begin_builtins: Name,
    pub end_builtins: Name,
}

impl IndexBoundaries {
    #[inline]
    pub fn contains_type(&self, name: Name) -> bool {
        self.begin_types <= name && name < self.end_types
    }

    #[inline]
    pub fn contains_builtin(&self, name: Name) -> bool {
        self.begin_builtins <= name && name < self.end_builtins
    }
}
