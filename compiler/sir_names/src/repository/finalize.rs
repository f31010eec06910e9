//! Label finalization.
//!
//! Run once per emission cycle, after optimization. Every name that will be
//! emitted ends up `Defined` with a label that is unique among the labels in
//! use and not in the caller's illegal set. Labels that already satisfy both
//! are left alone; everything else gets its base label, or the base label
//! with the smallest free `_<n>` suffix.

use std::collections::HashSet;
use std::hash::BuildHasher;

use rustc_hash::FxHashSet;

use super::NameRepository;
use crate::{predefined::LABEL_SUFFIX_SEPARATOR, Name, NameError};

impl NameRepository<'_> {
    /// Assign final labels to every name in `used_names`.
    ///
    /// `used_names` must be strictly ascending. Labels in `illegal` are never
    /// produced.
    ///
    /// # Panics
    /// Panics if `used_names` is not strictly ascending, or if a used name
    /// that must keep its label has none.
    pub fn generate_labels<S: BuildHasher>(
        &mut self,
        used_names: &[Name],
        illegal: &HashSet<String, S>,
    ) {
        self.try_generate_labels(used_names, illegal)
            .unwrap_or_else(|e| panic!("{e}"));
    }

    /// Fallible version of [`NameRepository::generate_labels`].
    ///
    /// On error nothing has been modified, except for label-table overflow,
    /// which leaves the repository partially finalized.
    #[tracing::instrument(level = "debug", skip_all, fields(
        used = used_names.len(),
        illegal = illegal.len(),
    ))]
    pub fn try_generate_labels<S: BuildHasher>(
        &mut self,
        used_names: &[Name],
        illegal: &HashSet<String, S>,
    ) -> Result<(), NameError> {
        if let Some(pair) = used_names.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(NameError::UnsortedUsedNames {
                previous: pair[0],
                next: pair[1],
            });
        }

        // Built-in labels can never be reassigned.
        let mut used: FxHashSet<String> = (0..self.boundaries.end_builtins.raw())
            .map(Name::from_raw)
            .filter_map(|name| self.label_of(name).map(str::to_owned))
            .collect();

        // Names that keep their current label unless it clashes.
        let mut to_derive = FxHashSet::default();
        for &name in used_names {
            if !self.is_derived_name(name) || self.is_verbatim_function(name) {
                let label = self.try_required_label_of(name)?;
                let clashes = illegal.contains(label);
                if !used.insert(label.to_owned()) || clashes {
                    to_derive.insert(name);
                }
            }
        }

        // Both sequences are ascending: merge with a single cursor.
        let mut generated: Vec<(String, Name)> = Vec::new();
        let mut aliased = 0usize;
        let mut cursor = used_names.iter().copied().peekable();
        for raw in self.boundaries.end_builtins.raw()..self.arena.end().raw() {
            let name = Name::from_raw(raw);
            while cursor.next_if(|&used_name| used_name < name).is_some() {}
            if cursor.next_if_eq(&name).is_none() {
                continue;
            }
            let needs_label = (self.is_derived_name(name) && !self.is_verbatim_function(name))
                || to_derive.contains(&name);
            if !needs_label {
                continue;
            }

            let base = self.base_label_of(name).to_owned();
            let mut label = base.clone();
            let mut bump = 1usize;
            while used.contains(&label) || illegal.contains(&label) {
                label = format!("{base}{LABEL_SUFFIX_SEPARATOR}{bump}");
                bump += 1;
            }

            if let Some((existing, index)) = self.defined_name_of_label(&label) {
                self.arena.redefine(name, index);
                aliased += 1;
                tracing::trace!(
                    name = name.raw(),
                    existing = existing.raw(),
                    label = %label,
                    "aliased to existing label",
                );
            } else {
                tracing::trace!(name = name.raw(), label = %label, "generated label");
                generated.push((label.clone(), name));
            }
            used.insert(label);
        }

        let renamed = generated.len();
        for (label, name) in generated {
            debug_assert!(!illegal.contains(&label));
            self.arena.redefine_with_label(name, &label)?;
        }

        tracing::debug!(renamed, aliased, "labels generated");
        Ok(())
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap for concise assertions"
)]
