//! Built-in operations re-expressed in arena names.

use sir_dialect::BuiltinFunction;

use crate::Name;

/// A dialect built-in as seen by the optimizer.
///
/// Parameter and return types are type names in the repository's arena;
/// a dialect type that is unspecified or unknown maps to [`Name::EMPTY`].
#[derive(Clone, Debug)]
pub struct BuiltinRecord<'d> {
    /// Name the built-in is registered under.
    pub name: Name,
    pub parameters: Vec<Name>,
    pub returns: Vec<Name>,
    /// The dialect's own definition (side effects, labels), borrowed for
    /// the lifetime of the compilation.
    pub definition: &'d BuiltinFunction,
}

impl BuiltinRecord<'_> {
    /// Number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}
