//! Built-in operation definitions.

use bitflags::bitflags;

use crate::verbatim::parse_verbatim_label;

bitflags! {
    /// Side-effect summary of a built-in operation.
    ///
    /// Opaque to the name repository; carried so optimizer passes can query
    /// it through the borrowed definition.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SideEffects: u16 {
        /// Result depends only on the arguments.
        const MOVABLE = 1 << 0;
        /// Can be removed if the result is unused.
        const CAN_BE_REMOVED = 1 << 1;
        /// Reads memory.
        const READS_MEMORY = 1 << 2;
        /// Writes memory.
        const WRITES_MEMORY = 1 << 3;
        /// Reads persistent storage.
        const READS_STORAGE = 1 << 4;
        /// Writes persistent storage.
        const WRITES_STORAGE = 1 << 5;
        /// Ends execution.
        const TERMINATES = 1 << 6;

        /// Pure arithmetic and comparison.
        const PURE = Self::MOVABLE.bits() | Self::CAN_BE_REMOVED.bits();
    }
}

/// Definition of a single built-in operation.
///
/// Parameter and return types are dialect type labels; an empty label means
/// the type is unspecified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinFunction {
    /// Label the operation is invoked by.
    pub name: String,
    /// Parameter type labels.
    pub parameters: Vec<String>,
    /// Return type labels.
    pub returns: Vec<String>,
    /// Side-effect summary.
    pub side_effects: SideEffects,
}

impl BuiltinFunction {
    /// Create a definition with explicit type labels.
    pub fn new(name: impl Into<String>, parameters: Vec<String>, returns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parameters,
            returns,
            side_effects: SideEffects::empty(),
        }
    }

    /// Create a definition whose parameters and returns all have the
    /// unspecified type.
    pub fn untyped(name: impl Into<String>, parameters: usize, returns: usize) -> Self {
        Self::new(
            name,
            vec![String::new(); parameters],
            vec![String::new(); returns],
        )
    }

    /// Replace the side-effect summary.
    #[must_use]
    pub fn with_side_effects(mut self, side_effects: SideEffects) -> Self {
        self.side_effects = side_effects;
        self
    }

    /// Whether this definition belongs to the verbatim family.
    ///
    /// Only a well-formed `verbatim_<n>i_<m>o` label counts; other labels
    /// that merely share the prefix are ordinary built-ins.
    pub fn is_verbatim(&self) -> bool {
        parse_verbatim_label(&self.name).is_some()
    }
}
