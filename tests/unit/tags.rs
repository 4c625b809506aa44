use std::cell::Cell;
use std::rc::Rc;

use super::*;

/// Handles carry a shared counter bumped on release.
struct Counted;

struct Handle {
    kind: PatternKind,
    released: Rc<Cell<usize>>,
}

impl Resources for Counted {
    type Pattern = Handle;
    type Path = Handle;

    fn release_pattern(pattern: Handle) {
        pattern.released.set(pattern.released.get() + 1);
    }

    fn release_path(path: Handle) {
        path.released.set(path.released.get() + 1);
    }

    fn pattern_kind(pattern: &Handle) -> PatternKind {
        pattern.kind
    }

    fn path_segments(_: &Handle) -> usize {
        3
    }
}

fn handle(kind: PatternKind, released: &Rc<Cell<usize>>) -> Handle {
    Handle {
        kind,
        released: released.clone(),
    }
}

fn extents() -> TextExtents {
    TextExtents {
        x_bearing: 0.5,
        y_bearing: -7.0,
        width: 30.0,
        height: 7.5,
        x_advance: 31.0,
        y_advance: 0.0,
    }
}

#[test]
fn literal_and_tagged_scalars_resolve() {
    let mut store: TagStore<String, Counted> = TagStore::new();
    store.set_scalar("k".to_string(), 3.5).unwrap();

    assert_eq!(store.resolve_scalar(ScalarRef::Literal(3.5)), Ok(3.5));
    assert_eq!(store.resolve_scalar(ScalarRef::Tag(&"k".to_string())), Ok(3.5));
    assert!(matches!(
        store.resolve_scalar(ScalarRef::Tag(&"missing".to_string())),
        Err(TagError::BadArgument(_))
    ));
}

#[test]
fn non_scalar_tag_is_not_a_scalar_operand() {
    let mut store: TagStore<String, Counted> = TagStore::new();
    store
        .insert("t".to_string(), TagValue::TextExtents(extents()))
        .unwrap();
    assert!(matches!(
        store.resolve_scalar(ScalarRef::Tag(&"t".to_string())),
        Err(TagError::BadArgument(_))
    ));
}

#[test]
fn keys_are_set_once_regardless_of_type() {
    let mut store: TagStore<String, Counted> = TagStore::new();
    store.set_scalar("k".to_string(), 1.0).unwrap();
    assert_eq!(store.set_scalar("k".to_string(), 2.0), Err(TagError::AlreadySet));
    assert_eq!(
        store.insert("k".to_string(), TagValue::FontExtents(FontExtents::default())),
        Err(TagError::AlreadySet)
    );
    assert_eq!(store.resolve_scalar(ScalarRef::Tag(&"k".to_string())), Ok(1.0));
}

#[test]
fn duplicate_resource_is_released_immediately() {
    let released = Rc::new(Cell::new(0));
    let mut store: TagStore<String, Counted> = TagStore::new();
    store
        .insert(
            "p".to_string(),
            TagValue::Pattern(handle(PatternKind::Linear, &released)),
        )
        .unwrap();
    let err = store.insert(
        "p".to_string(),
        TagValue::Pattern(handle(PatternKind::Surface, &released)),
    );
    assert_eq!(err, Err(TagError::AlreadySet));
    assert_eq!(released.get(), 1);

    store.destroy();
    assert_eq!(released.get(), 2);
}

#[test]
fn typed_lookup_treats_mismatch_as_absent() {
    let released = Rc::new(Cell::new(0));
    let mut store: TagStore<String, Counted> = TagStore::new();
    store
        .insert(
            "p".to_string(),
            TagValue::Pattern(handle(PatternKind::Linear, &released)),
        )
        .unwrap();
    store.set_scalar("s".to_string(), 1.0).unwrap();

    assert!(store.pattern(&"p".to_string()).is_some());
    assert!(store.pattern_mut(&"p".to_string()).is_some());
    assert!(store.path(&"p".to_string()).is_none());
    assert!(store.pattern(&"s".to_string()).is_none());
    assert!(store.pattern(&"nope".to_string()).is_none());
}

#[test]
fn deref_projects_extents_fields() {
    let mut store: TagStore<String, Counted> = TagStore::new();
    store
        .insert("t".to_string(), TagValue::TextExtents(extents()))
        .unwrap();
    store.set_scalar("s".to_string(), 1.0).unwrap();

    assert_eq!(store.deref_field(&"t".to_string(), "width"), Ok(30.0));
    assert!(matches!(
        store.deref_field(&"t".to_string(), "ascent"),
        Err(TagError::BadArgument(_))
    ));
    assert!(matches!(
        store.deref_field(&"s".to_string(), "width"),
        Err(TagError::BadArgument(_))
    ));
    assert_eq!(
        store.deref_field(&"missing".to_string(), "width"),
        Err(TagError::NotSet)
    );
}

#[test]
fn drain_serializes_in_key_order_and_releases_once() {
    let released = Rc::new(Cell::new(0));
    let mut store: TagStore<String, Counted> = TagStore::new();
    store.set_scalar("b".to_string(), 2.0).unwrap();
    store
        .insert(
            "a".to_string(),
            TagValue::Pattern(handle(PatternKind::Surface, &released)),
        )
        .unwrap();
    store
        .insert(
            "c".to_string(),
            TagValue::Path {
                handle: handle(PatternKind::Solid, &released),
                segments: 3,
            },
        )
        .unwrap();

    let out = store.drain();
    assert_eq!(
        out,
        vec![
            (
                "a".to_string(),
                TagOutput::Pattern {
                    subtype: PatternKind::Surface
                }
            ),
            ("b".to_string(), TagOutput::Scalar { value: 2.0 }),
            ("c".to_string(), TagOutput::Path { segment_count: 3 }),
        ]
    );
    assert_eq!(released.get(), 2);
    assert!(store.is_empty());

    drop(store);
    assert_eq!(released.get(), 2);
}

#[test]
fn dropping_a_store_destroys_its_resources() {
    let released = Rc::new(Cell::new(0));
    {
        let mut store: TagStore<String, Counted> = TagStore::new();
        store
            .insert(
                "p".to_string(),
                TagValue::Pattern(handle(PatternKind::Linear, &released)),
            )
            .unwrap();
    }
    assert_eq!(released.get(), 1);
}

#[test]
fn outputs_serialize_with_a_kind_field() {
    let v = serde_json::to_value(TagOutput::Pattern {
        subtype: PatternKind::Linear,
    })
    .unwrap();
    assert_eq!(v, serde_json::json!({"kind": "pattern", "subtype": "linear"}));

    let v = serde_json::to_value(TagOutput::TextExtents(extents())).unwrap();
    assert_eq!(v["kind"], "text_extents");
    assert_eq!(v["width"], 30.0);

    let v = serde_json::to_value(TagOutput::Scalar { value: 1.5 }).unwrap();
    assert_eq!(v, serde_json::json!({"kind": "scalar", "value": 1.5}));
}
