//! Property-based tests for the name repository.
//!
//! Random sequences of interning and derivation are replayed against a
//! fresh repository, then checked for:
//! 1. Interning: the same text always yields the same name
//! 2. Flattening: every derived name points straight at a defined base
//! 3. Finalization: used names end up with unique, legal labels, and a
//!    second run with the same inputs changes nothing

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::HashSet;

use proptest::prelude::*;
use sir_dialect::{verbatim_label, TableDialect};
use sir_names::{Name, NameRepository, NameState};

// -- Strategies --

/// Labels drawn from a small pool so collisions are common.
const LABEL_POOL: &[&str] = &["a", "b", "x", "tmp", "a_1", "x_2", "tmp_1", "add", "eq", "mload"];

#[derive(Clone, Debug)]
enum Op {
    Intern(&'static str),
    /// Derive from the existing name at this position (modulo the arena size).
    Derive(usize),
}

fn label_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(LABEL_POOL)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        label_strategy().prop_map(Op::Intern),
        any::<usize>().prop_map(Op::Derive),
    ]
}

fn illegal_strategy() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set(label_strategy().prop_map(str::to_owned), 0..4)
}

/// Replay `ops`, returning every name they produced, in creation order.
fn replay(repo: &mut NameRepository<'_>, ops: &[Op]) -> Vec<Name> {
    let first = repo.len();
    let mut produced = Vec::new();
    for op in ops {
        let name = match *op {
            Op::Intern(label) => repo.intern(label),
            Op::Derive(position) => {
                // Never derive from verbatim bases: their derivatives carry no label.
                let base = Name::from_raw(u32::try_from(position % repo.len()).unwrap());
                if repo.is_verbatim_function(base) {
                    continue;
                }
                repo.derive_from(base)
            }
        };
        if name.index() >= first {
            produced.push(name);
        }
    }
    produced.sort_unstable();
    produced.dedup();
    produced
}

fn labels_of(repo: &NameRepository<'_>, names: &[Name]) -> Vec<String> {
    names
        .iter()
        .map(|&name| repo.required_label_of(name).to_owned())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_intern_is_idempotent(labels in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..20)) {
        let dialect = TableDialect::evm();
        let mut repo = NameRepository::new(&dialect);
        for label in &labels {
            let name = repo.intern(label);
            prop_assert_eq!(repo.intern(label), name);
            prop_assert_eq!(repo.label_of(name), Some(label.as_str()));
            prop_assert!(!repo.is_derived_name(name));
        }
    }

    #[test]
    fn prop_derived_names_are_flat(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let dialect = TableDialect::typed();
        let mut repo = NameRepository::new(&dialect);
        replay(&mut repo, &ops);

        for raw in 0..u32::try_from(repo.len()).unwrap() {
            let name = Name::from_raw(raw);
            let base = repo.resolve_base(name);
            prop_assert!(!repo.is_derived_name(base));
            prop_assert_eq!(repo.resolve_base(base), base);
            if repo.is_derived_name(name) {
                prop_assert_eq!(repo.state_of(name), NameState::Derived(base));
                prop_assert_eq!(repo.label_of(name), None);
            } else {
                prop_assert_eq!(base, name);
            }
        }
    }

    #[test]
    fn prop_verbatim_names_are_memoized(
        parameters in 0usize..=8,
        returns in 0usize..=8,
        noise in prop::collection::vec(label_strategy(), 0..5),
    ) {
        let dialect = TableDialect::evm();
        let mut repo = NameRepository::new(&dialect);
        let first = repo.verbatim_name(parameters, returns).unwrap();
        for label in noise {
            repo.intern(label);
        }
        let expected_label = verbatim_label(parameters, returns);

        prop_assert_eq!(repo.verbatim_name(parameters, returns), Some(first));
        prop_assert!(repo.is_verbatim_function(first));
        prop_assert!(repo.is_builtin_name(first));
        prop_assert_eq!(repo.label_of(first), Some(expected_label.as_str()));
        prop_assert_eq!(repo.intern(&expected_label), first);
    }

    #[test]
    fn prop_finalized_labels_are_unique_and_legal(
        ops in prop::collection::vec(op_strategy(), 1..40),
        keep in prop::collection::vec(any::<bool>(), 40),
        illegal in illegal_strategy(),
    ) {
        let dialect = TableDialect::evm();
        let mut repo = NameRepository::new(&dialect);
        let produced = replay(&mut repo, &ops);
        let used: Vec<Name> = produced
            .iter()
            .zip(keep.iter().cycle())
            .filter_map(|(&name, &keep)| keep.then_some(name))
            .collect();

        repo.generate_labels(&used, &illegal);

        let labels = labels_of(&repo, &used);
        let mut seen = HashSet::new();
        for (&name, label) in used.iter().zip(&labels) {
            prop_assert!(!illegal.contains(label), "{:?} got illegal label {}", name, label);
            prop_assert!(seen.insert(label.clone()), "{:?} shares label {}", name, label);
            prop_assert!(!repo.is_derived_name(name));
            // Only built-ins may carry built-in labels.
            prop_assert_eq!(repo.name_of_builtin(label).is_some(), repo.is_builtin_name(name));
        }

        let len = repo.len();
        repo.generate_labels(&used, &illegal);
        prop_assert_eq!(labels_of(&repo, &used), labels);
        prop_assert_eq!(repo.len(), len);
    }
}
