use super::*;

#[test]
fn test_name_empty() {
    assert_eq!(Name::EMPTY.raw(), 0);
    assert_eq!(Name::default(), Name::EMPTY);
}

#[test]
fn test_name_hash() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(Name::from_raw(1));
    set.insert(Name::from_raw(1)); // duplicate
    set.insert(Name::from_raw(2));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_name_ord() {
    assert!(Name::from_raw(1) < Name::from_raw(2));
}

#[test]
fn test_try_from_index() {
    assert_eq!(Name::try_from_index(7), Ok(Name::from_raw(7)));
    assert_eq!(LabelIndex::try_from_index(3).map(LabelIndex::index), Ok(3));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_try_from_index_overflow() {
    let too_big = u32::MAX as usize + 1;
    assert_eq!(
        Name::try_from_index(too_big),
        Err(NameError::ArenaOverflow { count: too_big })
    );
}

#[test]
fn test_debug_format() {
    assert_eq!(format!("{:?}", Name::from_raw(42)), "Name(42)");
    assert_eq!(format!("{:?}", LabelIndex::EMPTY), "LabelIndex(0)");
}
