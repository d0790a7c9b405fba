use std::rc::Rc;

use canopy_ir::{
    arena::Arena,
    kind::Kind,
    properties::{Prop, PropObject},
};
use rustc_hash::FxHashSet;

use crate::utils::{function_script, level_child_counts, nested_blocks, preorder_kinds};

#[test]
fn test_clone_tree_is_isomorphic_and_disjoint() {
    let mut arena = Arena::new();
    let root = nested_blocks(&mut arena, 4, 3);
    let copy = arena.clone_tree(root);

    assert_eq!(preorder_kinds(&arena, root), preorder_kinds(&arena, copy));
    assert_eq!(
        level_child_counts(&arena, root),
        level_child_counts(&arena, copy)
    );

    let original: FxHashSet<_> = arena.preorder(root).collect();
    assert!(arena.preorder(copy).all(|id| !original.contains(&id)));
    assert!(arena.is_detached(copy));
}

#[test]
fn test_clone_tree_copies_payloads_and_positions() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let script = function_script(&mut arena, "main")?;
    let name = arena.preorder(script).find(|&id| arena.kind(id) == Kind::Name).unwrap();
    arena.set_position(name, 12, 9);

    let copy = arena.clone_tree(script);
    assert!(arena.is_equivalent_to(script, copy));
    let copied_name = arena.preorder(copy).find(|&id| arena.kind(id) == Kind::Name).unwrap();
    assert_eq!(arena.string(copied_name)?, "main");
    assert_eq!(arena.line(copied_name), 12);
    assert_eq!(arena.column(copied_name), 9);
    Ok(())
}

#[test]
fn test_editing_clone_leaves_original_alone() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let script = function_script(&mut arena, "f")?;
    let copy = arena.clone_tree(script);

    let copied_name = arena.preorder(copy).find(|&id| arena.kind(id) == Kind::Name).unwrap();
    arena.set_string(copied_name, "g")?;
    let function = arena.first_child(copy).unwrap();
    let extra = arena.new_node(Kind::Empty)?;
    arena.add_child_back(copy, extra)?;
    arena.detach(function)?;

    assert!(!arena.is_equivalent_to(script, copy));
    assert_eq!(arena.count_nodes(script), 5);
    let original_name = arena.preorder(script).find(|&id| arena.kind(id) == Kind::Name).unwrap();
    assert_eq!(arena.string(original_name)?, "f");
    Ok(())
}

#[test]
fn test_clone_node_drops_links_keeps_properties() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let script = function_script(&mut arena, "f")?;
    let function = arena.first_child(script).unwrap();
    arena.put_bool_prop(function, Prop::ArrowFn, true);
    arena.put_object_prop(function, Prop::OriginalName, PropObject::Text(Rc::from("outer")));
    arena.set_position(function, 2, 0);

    let copy = arena.clone_node(function);
    assert!(arena.is_detached(copy));
    assert!(!arena.has_children(copy));
    assert_eq!(arena.kind(copy), Kind::Function);
    assert_eq!(arena.props(copy), arena.props(function));
    assert_eq!(arena.position(copy), arena.position(function));
    Ok(())
}

#[test]
fn test_equivalence_ignores_properties_and_positions() {
    let mut arena = Arena::new();
    let a = arena.new_string_at(Kind::Name, Some("x"), 1, 1).unwrap();
    let b = arena.new_string(Kind::Name, Some("x")).unwrap();
    arena.put_int_prop(a, Prop::Length, 3);
    assert!(arena.is_equivalent_to(a, b));

    let c = arena.new_string(Kind::String, Some("x")).unwrap();
    assert!(!arena.is_equivalent_to(a, c));
}
