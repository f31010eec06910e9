use super::*;

fn arena_with(labels: &[&str]) -> (NameArena, Vec<Name>) {
    let mut arena = NameArena::default();
    let names = labels
        .iter()
        .map(|label| arena.define(label).unwrap())
        .collect();
    (arena, names)
}

#[test]
fn test_define_appends_labels() {
    let (arena, names) = arena_with(&["", "x", "y"]);
    assert_eq!(names, vec![Name::EMPTY, Name::from_raw(1), Name::from_raw(2)]);
    assert_eq!(arena.len(), 3);
    assert_eq!(arena.defined_label(names[1]), Some("x"));
    assert_eq!(arena.find_label("y"), Some(LabelIndex::try_from_index(2).unwrap()));
    assert_eq!(arena.find_label("z"), None);
}

#[test]
fn test_define_reuses_existing_label_text() {
    let (arena, names) = arena_with(&["", "x", "x"]);
    assert_ne!(names[1], names[2]);
    assert_eq!(arena.state(names[1]), arena.state(names[2]));
}

#[test]
fn test_derive_flattens_chains() {
    let (mut arena, names) = arena_with(&["", "x"]);
    let first = arena.derive(names[1]).unwrap();
    let second = arena.derive(first).unwrap();

    assert_eq!(arena.state(first), NameState::Derived(names[1]));
    assert_eq!(arena.state(second), NameState::Derived(names[1]));
    assert_eq!(arena.defined_label(second), None);
}

#[test]
fn test_resolve_base_walks_unflattened_chains() {
    let (mut arena, names) = arena_with(&["", "x"]);
    // Built by hand to bypass the flattening in `derive`.
    let first = arena.push(NameState::Derived(names[1])).unwrap();
    let second = arena.push(NameState::Derived(first)).unwrap();

    assert_eq!(arena.resolve_base(second), names[1]);
    assert_eq!(arena.resolve_base(arena.resolve_base(second)), names[1]);
}

#[test]
fn test_redefine_and_last_defined_at() {
    let (mut arena, names) = arena_with(&["", "x"]);
    let derived = arena.derive(names[1]).unwrap();
    let x = arena.find_label("x").unwrap();

    assert_eq!(arena.last_defined_at(x), Some(names[1]));
    arena.redefine(derived, x);
    assert_eq!(arena.last_defined_at(x), Some(derived));
    assert_eq!(arena.defined_label(derived), Some("x"));
}

#[test]
fn test_redefine_with_new_label() {
    let (mut arena, names) = arena_with(&["", "x"]);
    let derived = arena.derive(names[1]).unwrap();
    arena.redefine_with_label(derived, "x_1").unwrap();
    assert_eq!(arena.defined_label(derived), Some("x_1"));
    assert_eq!(arena.end(), Name::from_raw(3));
}

#[test]
fn test_base_label_follows_unflattened_chains() {
    let (mut arena, names) = arena_with(&["", "x"]);
    let first = arena.push(NameState::Derived(names[1])).unwrap();
    let second = arena.push(NameState::Derived(first)).unwrap();

    assert_eq!(arena.base_label(second), "x");
    assert_eq!(arena.base_label(names[1]), "x");
}

#[test]
fn test_last_name_value_is_never_handed_out() {
    let last = u32::MAX as usize;
    assert_eq!(
        name_for_entry(last - 1),
        Ok(Name::from_raw(u32::MAX - 1))
    );
    assert_eq!(
        name_for_entry(last),
        Err(NameError::ArenaOverflow { count: last })
    );
}
