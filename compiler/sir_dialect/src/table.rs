//! Table-driven dialect.
//!
//! [`DialectBuilder`] collects value types, built-ins, reserved identifiers
//! and per-type operation assignments; [`TableDialect`] answers [`Dialect`]
//! queries from the resulting tables.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    builtin::{BuiltinFunction, SideEffects},
    verbatim::{verbatim_label, VERBATIM_PREFIX},
    Dialect, TypedOperation,
};

/// Dialect backed by plain lookup tables.
#[derive(Debug)]
pub struct TableDialect {
    types: Vec<String>,
    bool_type: String,
    default_type: String,
    /// Built-ins in enumeration order.
    builtins: Vec<BuiltinFunction>,
    /// Label to position in `builtins`.
    by_label: FxHashMap<String, usize>,
    /// Pre-built verbatim definitions, keyed by label.
    verbatim: FxHashMap<String, BuiltinFunction>,
    reserved: FxHashSet<String>,
    boolean_negation: Option<String>,
    typed: FxHashMap<TypedOperation, FxHashMap<String, String>>,
}

impl TableDialect {
    /// Untyped, EVM-flavoured dialect.
    ///
    /// Every value has the single unnamed type, so per-type operations are
    /// registered against the empty type label.
    pub fn evm() -> Self {
        const BUILTINS: &[(&str, usize, usize, SideEffects)] = &[
            ("stop", 0, 0, SideEffects::TERMINATES),
            ("add", 2, 1, SideEffects::PURE),
            ("sub", 2, 1, SideEffects::PURE),
            ("mul", 2, 1, SideEffects::PURE),
            ("div", 2, 1, SideEffects::PURE),
            ("mod", 2, 1, SideEffects::PURE),
            ("lt", 2, 1, SideEffects::PURE),
            ("gt", 2, 1, SideEffects::PURE),
            ("eq", 2, 1, SideEffects::PURE),
            ("iszero", 1, 1, SideEffects::PURE),
            ("and", 2, 1, SideEffects::PURE),
            ("or", 2, 1, SideEffects::PURE),
            ("xor", 2, 1, SideEffects::PURE),
            ("not", 1, 1, SideEffects::PURE),
            ("shl", 2, 1, SideEffects::PURE),
            ("shr", 2, 1, SideEffects::PURE),
            ("keccak256", 2, 1, SideEffects::READS_MEMORY.union(SideEffects::CAN_BE_REMOVED)),
            ("pop", 1, 0, SideEffects::PURE),
            ("mload", 1, 1, SideEffects::READS_MEMORY.union(SideEffects::CAN_BE_REMOVED)),
            ("mstore", 2, 0, SideEffects::WRITES_MEMORY),
            ("sload", 1, 1, SideEffects::READS_STORAGE.union(SideEffects::CAN_BE_REMOVED)),
            ("sstore", 2, 0, SideEffects::WRITES_STORAGE),
            ("tload", 1, 1, SideEffects::READS_STORAGE.union(SideEffects::CAN_BE_REMOVED)),
            ("tstore", 2, 0, SideEffects::WRITES_STORAGE),
            ("caller", 0, 1, SideEffects::PURE),
            ("calldataload", 1, 1, SideEffects::PURE),
            ("return", 2, 0, SideEffects::TERMINATES),
            ("revert", 2, 0, SideEffects::TERMINATES),
            ("selfdestruct", 1, 0, SideEffects::TERMINATES),
            ("dataoffset", 1, 1, SideEffects::PURE),
            ("datasize", 1, 1, SideEffects::PURE),
            ("memoryguard", 1, 1, SideEffects::PURE),
        ];

        let mut builder = DialectBuilder::new();
        for &(name, parameters, returns, effects) in BUILTINS {
            builder = builder
                .builtin(BuiltinFunction::untyped(name, parameters, returns).with_side_effects(effects));
        }
        builder
            .boolean_negation("iszero")
            .typed(TypedOperation::Discard, "", "pop")
            .typed(TypedOperation::Equality, "", "eq")
            .typed(TypedOperation::MemoryLoad, "", "mload")
            .typed(TypedOperation::MemoryStore, "", "mstore")
            .typed(TypedOperation::StorageLoad, "", "sload")
            .typed(TypedOperation::StorageStore, "", "sstore")
            .typed(TypedOperation::Hash, "", "keccak256")
            .verbatim_arity(8)
            .build()
    }

    /// Dialect with explicit `u256` and `bool` value types.
    pub fn typed() -> Self {
        fn sig(name: &str, parameters: &[&str], returns: &[&str], effects: SideEffects) -> BuiltinFunction {
            BuiltinFunction::new(
                name,
                parameters.iter().map(|&t| t.to_owned()).collect(),
                returns.iter().map(|&t| t.to_owned()).collect(),
            )
            .with_side_effects(effects)
        }

        let reads_memory = SideEffects::READS_MEMORY.union(SideEffects::CAN_BE_REMOVED);
        let reads_storage = SideEffects::READS_STORAGE.union(SideEffects::CAN_BE_REMOVED);

        DialectBuilder::new()
            .value_type("u256")
            .value_type("bool")
            .bool_type("bool")
            .default_type("u256")
            .builtin(sig("add", &["u256", "u256"], &["u256"], SideEffects::PURE))
            .builtin(sig("sub", &["u256", "u256"], &["u256"], SideEffects::PURE))
            .builtin(sig("eq", &["u256", "u256"], &["bool"], SideEffects::PURE))
            .builtin(sig("eqbool", &["bool", "bool"], &["bool"], SideEffects::PURE))
            .builtin(sig("not", &["bool"], &["bool"], SideEffects::PURE))
            .builtin(sig("pop", &["u256"], &[], SideEffects::PURE))
            .builtin(sig("popbool", &["bool"], &[], SideEffects::PURE))
            .builtin(sig("mload", &["u256"], &["u256"], reads_memory))
            .builtin(sig("mstore", &["u256", "u256"], &[], SideEffects::WRITES_MEMORY))
            .builtin(sig("sload", &["u256"], &["u256"], reads_storage))
            .builtin(sig("sstore", &["u256", "u256"], &[], SideEffects::WRITES_STORAGE))
            .builtin(sig("keccak256", &["u256", "u256"], &["u256"], reads_memory))
            .builtin(sig("datasize", &[""], &["u256"], SideEffects::PURE))
            .builtin(sig("dataoffset", &[""], &["u256"], SideEffects::PURE))
            .boolean_negation("not")
            .typed(TypedOperation::Discard, "u256", "pop")
            .typed(TypedOperation::Discard, "bool", "popbool")
            .typed(TypedOperation::Equality, "u256", "eq")
            .typed(TypedOperation::Equality, "bool", "eqbool")
            .typed(TypedOperation::MemoryLoad, "u256", "mload")
            .typed(TypedOperation::MemoryStore, "u256", "mstore")
            .typed(TypedOperation::StorageLoad, "u256", "sload")
            .typed(TypedOperation::StorageStore, "u256", "sstore")
            .typed(TypedOperation::Hash, "u256", "keccak256")
            .verbatim_arity(4)
            .build()
    }
}

impl Dialect for TableDialect {
    fn types(&self) -> &[String] {
        &self.types
    }

    fn bool_type(&self) -> &str {
        &self.bool_type
    }

    fn default_type(&self) -> &str {
        &self.default_type
    }

    fn builtin_names(&self) -> Vec<&str> {
        self.builtins.iter().map(|f| f.name.as_str()).collect()
    }

    fn builtin(&self, label: &str) -> Option<&BuiltinFunction> {
        match self.by_label.get(label) {
            Some(&index) => self.builtins.get(index),
            None => self.verbatim.get(label),
        }
    }

    fn reserved_identifier(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
            || label.starts_with(VERBATIM_PREFIX)
            || self.reserved.contains(label)
    }

    fn boolean_negation_function(&self) -> Option<&BuiltinFunction> {
        self.boolean_negation
            .as_deref()
            .and_then(|label| self.builtin(label))
    }

    fn typed_function(&self, op: TypedOperation, type_label: &str) -> Option<&BuiltinFunction> {
        let label = self.typed.get(&op)?.get(type_label)?;
        self.builtin(label)
    }
}

/// Incremental construction of a [`TableDialect`].
#[derive(Debug, Default)]
pub struct DialectBuilder {
    types: Vec<String>,
    bool_type: String,
    default_type: String,
    builtins: Vec<BuiltinFunction>,
    reserved: FxHashSet<String>,
    boolean_negation: Option<String>,
    typed: FxHashMap<TypedOperation, FxHashMap<String, String>>,
    verbatim_arity: Option<usize>,
}

impl DialectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the next value type.
    #[must_use]
    pub fn value_type(mut self, label: impl Into<String>) -> Self {
        self.types.push(label.into());
        self
    }

    #[must_use]
    pub fn bool_type(mut self, label: impl Into<String>) -> Self {
        self.bool_type = label.into();
        self
    }

    #[must_use]
    pub fn default_type(mut self, label: impl Into<String>) -> Self {
        self.default_type = label.into();
        self
    }

    /// Add a built-in. A later definition with the same label replaces the
    /// earlier one in place.
    #[must_use]
    pub fn builtin(mut self, function: BuiltinFunction) -> Self {
        if let Some(existing) = self.builtins.iter_mut().find(|f| f.name == function.name) {
            *existing = function;
        } else {
            self.builtins.push(function);
        }
        self
    }

    /// Reserve an identifier that is not a built-in.
    #[must_use]
    pub fn reserved(mut self, label: impl Into<String>) -> Self {
        self.reserved.insert(label.into());
        self
    }

    #[must_use]
    pub fn boolean_negation(mut self, builtin_label: impl Into<String>) -> Self {
        self.boolean_negation = Some(builtin_label.into());
        self
    }

    /// Assign the built-in `builtin_label` as the `op` operation of the
    /// value type `type_label`.
    #[must_use]
    pub fn typed(
        mut self,
        op: TypedOperation,
        type_label: impl Into<String>,
        builtin_label: impl Into<String>,
    ) -> Self {
        self.typed
            .entry(op)
            .or_default()
            .insert(type_label.into(), builtin_label.into());
        self
    }

    /// Provide verbatim built-ins for every arity up to `max` parameters and
    /// `max` returns.
    #[must_use]
    pub fn verbatim_arity(mut self, max: usize) -> Self {
        self.verbatim_arity = Some(max);
        self
    }

    pub fn build(self) -> TableDialect {
        let by_label = self
            .builtins
            .iter()
            .enumerate()
            .map(|(index, f)| (f.name.clone(), index))
            .collect();

        let mut verbatim = FxHashMap::default();
        if let Some(max) = self.verbatim_arity {
            for parameters in 0..=max {
                for returns in 0..=max {
                    let label = verbatim_label(parameters, returns);
                    let function = BuiltinFunction::untyped(label.clone(), parameters, returns)
                        .with_side_effects(SideEffects::all().difference(SideEffects::PURE));
                    verbatim.insert(label, function);
                }
            }
        }

        TableDialect {
            types: self.types,
            bool_type: self.bool_type,
            default_type: self.default_type,
            builtins: self.builtins,
            by_label,
            verbatim,
            reserved: self.reserved,
            boolean_negation: self.boolean_negation,
            typed: self.typed,
        }
    }
}
