//! Append-only name arena.
//!
//! Two parallel tables: the name records, and the defined labels those
//! records point at. Entries are never removed; the only in-place mutation is
//! [`NameArena::redefine`], used by label finalization.

use rustc_hash::FxHashMap;

use crate::{LabelIndex, Name, NameError};

/// State of a single arena entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum NameState {
    /// Owns, or aliases, the label at this index.
    Defined(LabelIndex),
    /// No label of its own yet; tracks the name it was derived from.
    ///
    /// The base is always `Defined` when created through
    /// [`NameArena::derive`].
    Derived(Name),
}

/// Interned label text.
#[derive(Default)]
struct LabelTable {
    labels: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, LabelIndex>,
}

impl LabelTable {
    fn get(&self, index: LabelIndex) -> &str {
        &self.labels[index.index()]
    }

    fn find(&self, label: &str) -> Option<LabelIndex> {
        self.lookup.get(label).copied()
    }

    /// Index of `label`, appending it if it is not in the table yet.
    fn intern(&mut self, label: &str) -> Result<LabelIndex, NameError> {
        if let Some(index) = self.find(label) {
            return Ok(index);
        }
        let index = LabelIndex::try_from_index(self.labels.len())?;
        self.labels.push(label.into());
        self.lookup.insert(label.into(), index);
        Ok(index)
    }
}

/// Name records plus the label table they refer to.
#[derive(Default)]
pub(crate) struct NameArena {
    records: Vec<NameState>,
    labels: LabelTable,
}

impl NameArena {
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Handle one past the last entry.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "push keeps the length below u32::MAX"
    )]
    pub(crate) fn end(&self) -> Name {
        Name::from_raw(self.records.len() as u32)
    }

    pub(crate) fn state(&self, name: Name) -> NameState {
        self.records[name.index()]
    }

    pub(crate) fn label(&self, index: LabelIndex) -> &str {
        self.labels.get(index)
    }

    pub(crate) fn find_label(&self, label: &str) -> Option<LabelIndex> {
        self.labels.find(label)
    }

    /// Label of `name` if it is `Defined`.
    pub(crate) fn defined_label(&self, name: Name) -> Option<&str> {
        match self.state(name) {
            NameState::Defined(index) => Some(self.label(index)),
            NameState::Derived(_) => None,
        }
    }

    /// Append a `Defined` entry for `label`.
    pub(crate) fn define(&mut self, label: &str) -> Result<Name, NameError> {
        let index = self.labels.intern(label)?;
        self.push(NameState::Defined(index))
    }

    /// Append a `Derived` entry whose base is the resolved base of `name`.
    ///
    /// This is the only way a `Derived` record is created, which keeps every
    /// derivation chain at depth one.
    pub(crate) fn derive(&mut self, name: Name) -> Result<Name, NameError> {
        let base = self.resolve_base(name);
        self.push(NameState::Derived(base))
    }

    /// Follow `Derived` links up to the nearest `Defined` entry.
    pub(crate) fn resolve_base(&self, mut name: Name) -> Name {
        while let NameState::Derived(base) = self.state(name) {
            name = base;
        }
        name
    }

    /// Label of the nearest `Defined` ancestor of `name`.
    pub(crate) fn base_label(&self, mut name: Name) -> &str {
        loop {
            match self.state(name) {
                NameState::Defined(index) => return self.label(index),
                NameState::Derived(base) => name = base,
            }
        }
    }

    /// Point `name` at the label `label`, appending the label if needed.
    pub(crate) fn redefine_with_label(&mut self, name: Name, label: &str) -> Result<(), NameError> {
        let index = self.labels.intern(label)?;
        self.redefine(name, index);
        Ok(())
    }

    /// Point `name` at an existing label index.
    pub(crate) fn redefine(&mut self, name: Name, index: LabelIndex) {
        self.records[name.index()] = NameState::Defined(index);
    }

    /// Last entry that is `Defined` at `index`, scanning from the back.
    pub(crate) fn last_defined_at(&self, index: LabelIndex) -> Option<Name> {
        let position = self
            .records
            .iter()
            .rposition(|&state| state == NameState::Defined(index))?;
        Name::try_from_index(position).ok()
    }

    fn push(&mut self, state: NameState) -> Result<Name, NameError> {
        let name = name_for_entry(self.records.len())?;
        self.records.push(state);
        Ok(name)
    }
}

/// Handle for the entry appended to an arena of `count` entries.
///
/// The last 32-bit value stays unused so that the arena length, and with it
/// [`NameArena::end`], is itself a valid [`Name`].
fn name_for_entry(count: usize) -> Result<Name, NameError> {
    match Name::try_from_index(count) {
        Ok(name) if name.raw() < u32::MAX => Ok(name),
        _ => Err(NameError::ArenaOverflow { count }),
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap for concise assertions"
)]
mod tests;
