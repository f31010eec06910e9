//! Read-only queries over the repository.
//!
//! Everything here is O(1) or linear in the (small) number of value types or
//! built-ins, except the reverse label lookup after finalization has aliased
//! names away from their textual position.

use sir_dialect::{Dialect, TypedOperation};

use super::NameRepository;
use crate::{
    arena::NameState,
    predefined::{IndexBoundaries, PredefinedBuiltins, PredefinedNames},
    BuiltinRecord, LabelIndex, Name, NameError,
};

impl<'d> NameRepository<'d> {
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    pub fn predefined(&self) -> &PredefinedNames {
        &self.predefined
    }

    pub fn predefined_builtins(&self) -> &PredefinedBuiltins {
        &self.predefined_builtins
    }

    pub fn boundaries(&self) -> IndexBoundaries {
        self.boundaries
    }

    #[inline]
    pub fn empty_name(&self) -> Name {
        self.predefined.empty
    }

    // ── Identity ────────────────────────────────────────────────────

    /// Nearest `Defined` ancestor of `name` (or `name` itself).
    pub fn resolve_base(&self, name: Name) -> Name {
        self.arena.resolve_base(name)
    }

    pub fn is_derived_name(&self, name: Name) -> bool {
        matches!(self.arena.state(name), NameState::Derived(_))
    }

    pub fn is_builtin_name(&self, name: Name) -> bool {
        self.boundaries.contains_builtin(self.resolve_base(name))
    }

    pub fn is_type(&self, name: Name) -> bool {
        self.boundaries.contains_type(self.resolve_base(name))
    }

    pub fn is_verbatim_function(&self, name: Name) -> bool {
        self.resolve_base(name) == self.predefined.verbatim
    }

    // ── Labels ──────────────────────────────────────────────────────

    /// Label of `name`, if it has one.
    ///
    /// Verbatim built-ins report the dialect's label for their arity. A
    /// derived name that has not been finalized has no label yet.
    pub fn label_of(&self, name: Name) -> Option<&str> {
        if let Some(label) = self.arena.defined_label(name) {
            return Some(label);
        }
        if self.is_verbatim_function(name) {
            return self
                .builtin(name)
                .map(|record| record.definition.name.as_str());
        }
        None
    }

    /// Label of a name that must already have one.
    ///
    /// # Panics
    /// Panics if `name` has no label.
    pub fn required_label_of(&self, name: Name) -> &str {
        self.try_required_label_of(name)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible version of [`NameRepository::required_label_of`].
    pub fn try_required_label_of(&self, name: Name) -> Result<&str, NameError> {
        self.label_of(name).ok_or(NameError::MissingLabel { name })
    }

    /// Label of `name`'s resolved base.
    pub fn base_label_of(&self, name: Name) -> &str {
        self.arena.base_label(name)
    }

    /// Defined name carrying the label `label`.
    pub fn name_of_label(&self, label: &str) -> Option<Name> {
        self.defined_name_of_label(label).map(|(name, _)| name)
    }

    pub(super) fn defined_name_of_label(&self, label: &str) -> Option<(Name, LabelIndex)> {
        let index = self.arena.find_label(label)?;
        // Labels are usually interned in step with names, so the name at the
        // label's own position is the first candidate.
        let candidate = Name::from_raw(index.raw());
        if candidate.index() < self.arena.len()
            && self.arena.state(candidate) == NameState::Defined(index)
        {
            return Some((candidate, index));
        }
        self.arena
            .last_defined_at(index)
            .map(|name| (name, index))
    }

    /// Every name that currently has a label, with that label.
    pub fn labels(&self) -> impl Iterator<Item = (Name, &str)> + '_ {
        (0..self.arena.end().raw())
            .map(Name::from_raw)
            .filter_map(|name| self.label_of(name).map(|label| (name, label)))
    }

    // ── Built-ins ───────────────────────────────────────────────────

    pub fn builtin(&self, name: Name) -> Option<&BuiltinRecord<'d>> {
        self.builtins.get(&name)
    }

    /// Built-in registered under `label`, scanning the built-in range.
    pub fn name_of_builtin(&self, label: &str) -> Option<Name> {
        (self.boundaries.begin_builtins.raw()..self.boundaries.end_builtins.raw())
            .map(Name::from_raw)
            .find(|&name| self.label_of(name) == Some(label))
    }

    pub fn boolean_negation_function(&self) -> Option<&BuiltinRecord<'d>> {
        self.builtin(self.predefined_builtins.boolean_negation?)
    }

    pub fn discard_function(&self, ty: Name) -> Option<&BuiltinRecord<'d>> {
        self.typed_function(TypedOperation::Discard, ty)
    }

    pub fn equality_function(&self, ty: Name) -> Option<&BuiltinRecord<'d>> {
        self.typed_function(TypedOperation::Equality, ty)
    }

    pub fn memory_load_function(&self, ty: Name) -> Option<&BuiltinRecord<'d>> {
        self.typed_function(TypedOperation::MemoryLoad, ty)
    }

    pub fn memory_store_function(&self, ty: Name) -> Option<&BuiltinRecord<'d>> {
        self.typed_function(TypedOperation::MemoryStore, ty)
    }

    pub fn storage_load_function(&self, ty: Name) -> Option<&BuiltinRecord<'d>> {
        self.typed_function(TypedOperation::StorageLoad, ty)
    }

    pub fn storage_store_function(&self, ty: Name) -> Option<&BuiltinRecord<'d>> {
        self.typed_function(TypedOperation::StorageStore, ty)
    }

    /// Name of the hash built-in for `ty`.
    pub fn hash_function(&self, ty: Name) -> Option<Name> {
        self.predefined_builtins
            .typed(TypedOperation::Hash, self.index_of_type(ty))
    }

    /// Built-in implementing `op` for the value type `ty`.
    ///
    /// # Panics
    /// Panics if `ty` is not a value type of the dialect.
    pub fn typed_function(&self, op: TypedOperation, ty: Name) -> Option<&BuiltinRecord<'d>> {
        let name = self.predefined_builtins.typed(op, self.index_of_type(ty))?;
        self.builtin(name)
    }

    // ── Types ───────────────────────────────────────────────────────

    /// Type registered under `label`.
    ///
    /// Always `None` for a dialect without value types.
    pub fn name_of_type(&self, label: &str) -> Option<Name> {
        self.dialect_types
            .iter()
            .find(|(_, type_label)| type_label == label)
            .map(|&(name, _)| name)
    }

    /// Position of `ty` among the dialect's value types.
    ///
    /// A dialect without value types has a single implicit slot, 0.
    ///
    /// # Panics
    /// Panics if `ty` is not a value type of the dialect.
    pub fn index_of_type(&self, ty: Name) -> usize {
        self.try_index_of_type(ty)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible version of [`NameRepository::index_of_type`].
    pub fn try_index_of_type(&self, ty: Name) -> Result<usize, NameError> {
        if self.dialect_types.is_empty() {
            return Ok(0);
        }
        self.dialect_types
            .iter()
            .position(|&(name, _)| name == ty)
            .ok_or(NameError::UnknownType { name: ty })
    }

    pub fn type_count(&self) -> usize {
        self.boundaries.end_types.index() - self.boundaries.begin_types.index()
    }
}
