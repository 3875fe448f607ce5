use quad_ngin::{
    data_structures::game_object::{GameObject, Transform},
    store::{Arena, StoreError},
};

fn object(id: u32, name: &str) -> GameObject {
    GameObject::new(id, name, Transform::default())
}

#[test]
fn sparse_ids_resolve() {
    let mut arena = Arena::new();
    arena.insert(object(42, "far")).unwrap();
    arena.insert(object(7, "near")).unwrap();

    assert_eq!(arena.by_id(42).unwrap().name, "far");
    assert_eq!(arena.by_id(7).unwrap().name, "near");
    assert_eq!(
        arena.by_id(0).unwrap_err(),
        StoreError::UnknownId { kind: "game object", id: 0 }
    );
    let names: Vec<_> = arena.values().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["far", "near"]);
}

#[test]
fn removed_entities_leave_dangling_handles() {
    let mut arena = Arena::new();
    let first = arena.insert(object(1, "first")).unwrap();
    arena.remove(first).unwrap();
    let second = arena.insert(object(2, "second")).unwrap();

    // the slot is reused, the old handle must not reach the new entity
    assert_eq!(first.index(), second.index());
    assert!(matches!(
        arena.get(first),
        Err(StoreError::DanglingReference { .. })
    ));
    assert_eq!(arena.get(second).unwrap().name, "second");
    assert!(!arena.contains_id(1));
}

#[test]
fn duplicate_ids_are_refused() {
    let mut arena = Arena::new();
    arena.insert(object(3, "a")).unwrap();
    let err = arena.insert(object(3, "b")).unwrap_err();

    assert_eq!(err, StoreError::DuplicateId { kind: "game object", id: 3 });
    assert_eq!(err.to_string(), "a game object with id 3 already exists");
    assert_eq!(arena.len(), 1);
}

#[test]
fn drain_empties_last_slot_first() {
    let mut arena = Arena::new();
    let handle = arena.insert(object(1, "one")).unwrap();
    arena.insert(object(2, "two")).unwrap();

    let drained: Vec<_> = arena.drain().into_iter().map(|o| o.id).collect();

    assert_eq!(drained, [2, 1]);
    assert!(arena.is_empty());
    assert!(arena.get(handle).is_err());
    assert!(arena.lookup(1).is_err());
}
