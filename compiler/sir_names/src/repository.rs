//! The name repository.
//!
//! One [`NameRepository`] exists per dialect and compilation. It interns
//! every identifier of the IR, mints derived names for optimizer passes and
//! finally assigns collision-free labels before emission.
//!
//! # Layout
//!
//! Construction registers, in order: the empty name, the dialect's value
//! types, the verbatim base and the dialect's built-ins, then the reserved
//! predefined identifiers and placeholder constants. The resulting
//! [`IndexBoundaries`] make type and built-in membership a range check.
//!
//! Queries live in `lookup`, label finalization in `finalize`.

mod finalize;
mod lookup;

use rustc_hash::{FxHashMap, FxHashSet};
use sir_dialect::{verbatim_label, BuiltinFunction, Dialect, TypedOperation};

use crate::{
    arena::{NameArena, NameState},
    predefined::{
        slot_of, IndexBoundaries, PredefinedBuiltins, PredefinedNames, PLACEHOLDER_ONE_LABEL,
        PLACEHOLDER_THIRTY_TWO_LABEL, PLACEHOLDER_ZERO_LABEL, VERBATIM_BASE_LABEL,
    },
    BuiltinRecord, Name, NameError,
};

/// Single source of truth for the names of one compilation unit.
pub struct NameRepository<'d> {
    dialect: &'d dyn Dialect,
    arena: NameArena,
    boundaries: IndexBoundaries,
    /// Value types in declaration order, with their labels.
    dialect_types: Vec<(Name, String)>,
    builtins: FxHashMap<Name, BuiltinRecord<'d>>,
    /// Verbatim built-ins by `(parameters, returns)`.
    verbatim_names: FxHashMap<(usize, usize), Name>,
    predefined: PredefinedNames,
    predefined_builtins: PredefinedBuiltins,
}

impl<'d> NameRepository<'d> {
    /// Build the repository for `dialect`.
    ///
    /// # Panics
    /// Panics if the dialect alone overflows the arena.
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self::try_new(dialect).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible version of [`NameRepository::new`].
    #[tracing::instrument(level = "debug", skip_all, fields(
        types = dialect.types().len(),
    ))]
    pub fn try_new(dialect: &'d dyn Dialect) -> Result<Self, NameError> {
        let mut repository = NameRepository {
            dialect,
            arena: NameArena::default(),
            boundaries: IndexBoundaries::default(),
            dialect_types: Vec::new(),
            builtins: FxHashMap::default(),
            verbatim_names: FxHashMap::default(),
            predefined: PredefinedNames::default(),
            predefined_builtins: PredefinedBuiltins::default(),
        };

        let empty = repository.try_intern("")?;
        assert_eq!(empty, Name::EMPTY, "the empty label must be the first name");
        repository.predefined.empty = empty;

        repository.register_types()?;
        repository.register_builtins()?;
        repository.register_predefined()?;
        repository.register_predefined_builtins();

        repository.predefined.placeholder_zero = repository.try_intern(PLACEHOLDER_ZERO_LABEL)?;
        repository.predefined.placeholder_one = repository.try_intern(PLACEHOLDER_ONE_LABEL)?;
        repository.predefined.placeholder_thirty_two =
            repository.try_intern(PLACEHOLDER_THIRTY_TWO_LABEL)?;

        tracing::debug!(
            types = repository.type_count(),
            builtins = repository.builtins.len(),
            names = repository.arena.len(),
            "name repository registered dialect",
        );
        Ok(repository)
    }

    fn register_types(&mut self) -> Result<(), NameError> {
        let dialect = self.dialect;
        self.boundaries.begin_types = if dialect.types().iter().any(String::is_empty) {
            Name::EMPTY
        } else {
            Name::from_raw(1)
        };
        for label in dialect.types() {
            let name = if label.is_empty() {
                Name::EMPTY
            } else {
                self.try_intern(label)?
            };
            self.dialect_types.push((name, label.clone()));
        }
        self.boundaries.end_types = self.arena.end();
        Ok(())
    }

    fn register_builtins(&mut self) -> Result<(), NameError> {
        let dialect = self.dialect;
        self.boundaries.begin_builtins = self.arena.end();
        self.predefined.verbatim = self.try_intern(VERBATIM_BASE_LABEL)?;

        for label in dialect.builtin_names() {
            if label.is_empty() {
                continue;
            }
            let name = self.try_intern(label)?;
            if let Some(function) = dialect.builtin(label) {
                let record = self.convert_builtin(name, function);
                self.builtins.insert(name, record);
            }
        }
        self.boundaries.end_builtins = self.arena.end();
        Ok(())
    }

    fn register_predefined(&mut self) -> Result<(), NameError> {
        let dialect = self.dialect;
        self.predefined.bool_type = self
            .name_of_type(dialect.bool_type())
            .unwrap_or(Name::EMPTY);
        self.predefined.default_type = self
            .name_of_type(dialect.default_type())
            .unwrap_or(Name::EMPTY);

        let builtin_labels: FxHashSet<&str> = dialect.builtin_names().into_iter().collect();
        let mut predefined_name = |label: &str| -> Result<Option<Name>, NameError> {
            if builtin_labels.contains(label) {
                Ok(self.name_of_builtin(label))
            } else if dialect.reserved_identifier(label) {
                self.try_intern(label).map(Some)
            } else {
                Ok(None)
            }
        };

        let dataoffset = predefined_name("dataoffset")?;
        let datasize = predefined_name("datasize")?;
        let selfdestruct = predefined_name("selfdestruct")?;
        let tstore = predefined_name("tstore")?;
        let memoryguard = predefined_name("memoryguard")?;
        let eq = predefined_name("eq")?;
        let add = predefined_name("add")?;
        let sub = predefined_name("sub")?;

        self.predefined = PredefinedNames {
            dataoffset,
            datasize,
            selfdestruct,
            tstore,
            memoryguard,
            eq,
            add,
            sub,
            ..self.predefined
        };
        Ok(())
    }

    fn register_predefined_builtins(&mut self) {
        let dialect = self.dialect;
        let name_of = |function: Option<&BuiltinFunction>| {
            function.and_then(|function| self.name_of_builtin(&function.name))
        };

        let mut predefined = PredefinedBuiltins::default();
        predefined.boolean_negation = name_of(dialect.boolean_negation_function());

        let type_labels: Vec<&str> = if self.dialect_types.is_empty() {
            vec![""]
        } else {
            self.dialect_types.iter().map(|(_, label)| label.as_str()).collect()
        };
        for type_label in type_labels {
            let mut slot = [None; TypedOperation::ALL.len()];
            for op in TypedOperation::ALL {
                slot[slot_of(op)] = name_of(dialect.typed_function(op, type_label));
            }
            predefined.push_type_slot(slot);
        }

        self.predefined_builtins = predefined;
    }

    fn convert_builtin(&self, name: Name, function: &'d BuiltinFunction) -> BuiltinRecord<'d> {
        let to_type = |label: &String| self.name_of_type(label).unwrap_or(Name::EMPTY);
        BuiltinRecord {
            name,
            parameters: function.parameters.iter().map(to_type).collect(),
            returns: function.returns.iter().map(to_type).collect(),
            definition: function,
        }
    }

    /// Intern `label`, returning the existing name if it is already defined.
    ///
    /// Labels of dialect built-ins resolve to the built-in's name. Labels of
    /// the verbatim family never get text of their own: each arity is a
    /// name derived from the verbatim base, minted on first request.
    ///
    /// # Panics
    /// Panics if the arena overflows.
    pub fn intern(&mut self, label: &str) -> Name {
        self.try_intern(label).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible version of [`NameRepository::intern`].
    pub fn try_intern(&mut self, label: &str) -> Result<Name, NameError> {
        let dialect = self.dialect;
        if let Some(function) = dialect.builtin(label) {
            if function.is_verbatim() {
                return self.verbatim_instance(function);
            }
            if let Some(name) = self.name_of_builtin(label) {
                return Ok(name);
            }
        } else if let Some(name) = self.name_of_label(label) {
            return Ok(name);
        }
        self.arena.define(label)
    }

    /// Mint a new name derived from `name`.
    ///
    /// The new name has no label until [`NameRepository::generate_labels`]
    /// gives it one; its base is the resolved base of `name`.
    ///
    /// # Panics
    /// Panics if the arena overflows.
    pub fn derive_from(&mut self, name: Name) -> Name {
        self.try_derive_from(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible version of [`NameRepository::derive_from`].
    pub fn try_derive_from(&mut self, name: Name) -> Result<Name, NameError> {
        self.arena.derive(name)
    }

    /// Name of the verbatim built-in with the given arity, if the dialect
    /// provides one.
    ///
    /// # Panics
    /// Panics if the arena overflows.
    pub fn verbatim_name(&mut self, parameters: usize, returns: usize) -> Option<Name> {
        self.try_verbatim_name(parameters, returns)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible version of [`NameRepository::verbatim_name`].
    pub fn try_verbatim_name(
        &mut self,
        parameters: usize,
        returns: usize,
    ) -> Result<Option<Name>, NameError> {
        let dialect = self.dialect;
        let Some(function) = dialect
            .builtin(&verbatim_label(parameters, returns))
            .filter(|function| function.is_verbatim())
        else {
            return Ok(None);
        };
        self.verbatim_instance(function).map(Some)
    }

    fn verbatim_instance(&mut self, function: &'d BuiltinFunction) -> Result<Name, NameError> {
        let key = (function.parameters.len(), function.returns.len());
        if let Some(&name) = self.verbatim_names.get(&key) {
            return Ok(name);
        }

        let name = self.arena.derive(self.predefined.verbatim)?;
        let record = self.convert_builtin(name, function);
        self.builtins.insert(name, record);
        self.verbatim_names.insert(key, name);
        tracing::trace!(
            name = name.raw(),
            parameters = key.0,
            returns = key.1,
            "minted verbatim built-in",
        );
        Ok(name)
    }

    /// Current state of `name`'s arena entry.
    pub fn state_of(&self, name: Name) -> NameState {
        self.arena.state(name)
    }

    /// Number of names in the arena.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always `false` once constructed; the empty name is always present.
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap for concise assertions"
)]
