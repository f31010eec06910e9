//! Full name lifecycle against the bundled dialects.
//!
//! Each test plays the role of a compiler pipeline: the parser interns
//! identifiers, optimizer passes query built-ins and mint derived names,
//! and code generation finalizes labels for the names it emits.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use sir_dialect::{Dialect, TableDialect, TypedOperation};
use sir_names::{Name, NameRepository, PLACEHOLDER_ZERO_LABEL};

/// Labels the emitter must never produce: every identifier the dialect
/// reserves, plus keywords of the surface syntax.
fn illegal_labels(dialect: &dyn Dialect) -> HashSet<String> {
    dialect
        .builtin_names()
        .into_iter()
        .map(str::to_owned)
        .chain(["let", "function", "switch"].map(str::to_owned))
        .collect()
}

fn emitted(repo: &NameRepository<'_>, names: &[Name]) -> Vec<String> {
    names
        .iter()
        .map(|&name| repo.required_label_of(name).to_owned())
        .collect()
}

#[test]
fn typed_pipeline() {
    let dialect = TableDialect::typed();
    let mut repo = NameRepository::new(&dialect);

    // Parsing.
    let u256 = repo.intern("u256");
    let bool_type = repo.predefined().bool_type;
    let add = repo.intern("add");
    let value = repo.intern("value");
    let flag = repo.intern("flag");
    assert!(repo.is_type(u256));
    assert!(repo.is_builtin_name(add));
    assert_eq!(repo.builtin(add).unwrap().parameters, vec![u256, u256]);

    // Optimization: split `value` into two SSA copies, compare and negate.
    let value_a = repo.derive_from(value);
    let value_b = repo.derive_from(value_a);
    let eq = repo.equality_function(u256).unwrap();
    assert_eq!(eq.definition.name, "eq");
    assert_eq!(eq.returns, vec![bool_type]);
    let not = repo.boolean_negation_function().unwrap();
    assert_eq!(not.parameters, vec![bool_type]);
    let discard_flag = repo.discard_function(bool_type).unwrap().name;
    assert_eq!(repo.label_of(discard_flag), Some("popbool"));
    assert!(repo.storage_load_function(bool_type).is_none());
    assert_eq!(repo.base_label_of(value_b), "value");

    // Code generation.
    let illegal = illegal_labels(&dialect);
    let used = [add, value, flag, value_a, value_b];
    repo.generate_labels(&used, &illegal);

    assert_eq!(
        emitted(&repo, &used),
        vec!["add", "value", "flag", "value_1", "value_2"]
    );
    assert_eq!(repo.name_of_label("value_2"), Some(value_b));
}

#[test]
fn untyped_pipeline_with_verbatim() {
    let dialect = TableDialect::evm();
    let mut repo = NameRepository::new(&dialect);
    assert_eq!(repo.type_count(), 0);
    assert_eq!(repo.index_of_type(repo.empty_name()), 0);

    let raw = repo.intern("verbatim_2i_1o");
    let function = repo.intern("function_1");
    let tmp = repo.intern("tmp");
    assert_eq!(repo.verbatim_name(2, 1), Some(raw));
    let record = repo.builtin(raw).unwrap();
    assert_eq!((record.arity(), record.returns.len()), (2, 1));
    assert!(repo.verbatim_name(9, 0).is_none());

    let hash = repo.hash_function(repo.empty_name()).unwrap();
    assert_eq!(repo.label_of(hash), Some("keccak256"));
    let zero = repo.intern(PLACEHOLDER_ZERO_LABEL);
    assert_eq!(zero, repo.predefined().placeholder_zero);

    // An inlining pass renames the function body's locals twice.
    let copies: Vec<Name> = (0..3).map(|_| repo.derive_from(tmp)).collect();
    let mut used = vec![raw, function, tmp];
    used.extend(&copies);

    let illegal = illegal_labels(&dialect);
    repo.generate_labels(&used, &illegal);

    assert_eq!(
        emitted(&repo, &used),
        vec!["verbatim_2i_1o", "function_1", "tmp", "tmp_1", "tmp_2", "tmp_3"]
    );
    assert!(repo.is_derived_name(raw));
    for &copy in &copies {
        assert!(!repo.is_derived_name(copy));
        assert!(!repo.is_builtin_name(copy));
    }
}

#[test]
fn keyword_identifier_is_renamed_at_emission() {
    let dialect = TableDialect::evm();
    let mut repo = NameRepository::new(&dialect);
    // A source-level identifier that collides with a keyword of the target.
    let switch = repo.intern("switch");
    let illegal = illegal_labels(&dialect);

    repo.generate_labels(&[switch], &illegal);

    assert_eq!(repo.label_of(switch), Some("switch_1"));
    assert_eq!(
        repo.typed_function(TypedOperation::MemoryStore, repo.empty_name())
            .map(|record| record.definition.name.as_str()),
        Some("mstore")
    );
}
