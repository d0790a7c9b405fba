use std::rc::Rc;

use canopy_ir::{
    arena::Arena,
    kind::Kind,
    properties::{Prop, PropObject},
};

#[test]
fn test_flags_and_ints_are_independent() {
    let mut arena = Arena::new();
    let node = arena.new_node(Kind::Function).unwrap();
    arena.put_bool_prop(node, Prop::ArrowFn, true);
    arena.put_int_prop(node, Prop::ChangeTime, 12);
    assert!(arena.get_bool_prop(node, Prop::ArrowFn));
    assert!(!arena.get_bool_prop(node, Prop::AsyncFn));
    assert_eq!(arena.get_int_prop(node, Prop::ChangeTime, 0), 12);
    assert_eq!(arena.get_int_prop(node, Prop::InputId, -5), -5);
}

#[test]
fn test_clearing_a_flag_removes_the_entry() {
    let mut arena = Arena::new();
    let node = arena.new_node(Kind::Function).unwrap();
    arena.put_bool_prop(node, Prop::GeneratorFn, true);
    assert_eq!(arena.props(node).len(), 1);
    arena.put_bool_prop(node, Prop::GeneratorFn, false);
    assert!(arena.props(node).is_empty());
}

#[test]
fn test_sorted_keys_follow_ids() {
    let mut arena = Arena::new();
    let node = arena.new_node(Kind::Block).unwrap();
    arena.put_int_prop(node, Prop::Length, 1);
    arena.put_bool_prop(node, Prop::Synthetic, true);
    arena.put_object_prop(node, Prop::JsDocInfo, PropObject::Text(Rc::from("doc")));
    assert_eq!(
        arena.sorted_prop_keys(node),
        vec![Prop::JsDocInfo, Prop::Synthetic, Prop::Length]
    );
    arena.remove_prop(node, Prop::Synthetic);
    assert_eq!(arena.sorted_prop_keys(node), vec![Prop::JsDocInfo, Prop::Length]);
}

#[test]
fn test_node_valued_property_points_into_arena() {
    let mut arena = Arena::new();
    let declaration = arena.new_string(Kind::Name, Some("x")).unwrap();
    let reference = arena.new_string(Kind::Name, Some("x")).unwrap();
    arena.put_object_prop(reference, Prop::ReflectedObject, PropObject::Node(declaration));
    match arena.get_object_prop(reference, Prop::ReflectedObject) {
        Some(PropObject::Node(target)) => assert_eq!(*target, declaration),
        other => panic!("unexpected property value {other:?}"),
    }
}

#[test]
fn test_opaque_property_downcasts() {
    #[derive(Debug, PartialEq)]
    struct FeatureSet(u32);

    let mut arena = Arena::new();
    let script = arena.new_node(Kind::Script).unwrap();
    arena.put_object_prop(script, Prop::FeatureSet, PropObject::Opaque(Rc::new(FeatureSet(2021))));
    let Some(PropObject::Opaque(value)) = arena.get_object_prop(script, Prop::FeatureSet) else {
        panic!("feature set missing");
    };
    assert_eq!(value.downcast_ref::<FeatureSet>(), Some(&FeatureSet(2021)));
}

#[test]
fn test_prop_names_are_unique() {
    let mut names: Vec<&str> = Prop::ALL.iter().map(|prop| prop.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Prop::ALL.len());
}
