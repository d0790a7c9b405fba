use canopy_ir::{arena::Arena, errors::IrError, kind::Kind};

use crate::utils::nested_blocks;

#[test]
fn test_add_child_back_links_parent_and_last_child() {
    let mut arena = Arena::new();
    let parent = arena.new_node(Kind::Block).unwrap();
    let child = arena.new_node(Kind::Empty).unwrap();
    arena.add_child_back(parent, child).unwrap();
    assert_eq!(arena.last_child(parent), Some(child));
    assert_eq!(arena.parent(child), Some(parent));
    assert_eq!(arena.children(parent).filter(|&c| c == child).count(), 1);
}

#[test]
fn test_attach_already_parented_node_fails_and_changes_nothing() {
    let mut arena = Arena::new();
    let first_parent = arena.new_node(Kind::Block).unwrap();
    let p = arena.new_node(Kind::Block).unwrap();
    let existing = arena.new_node(Kind::Empty).unwrap();
    let c = arena.new_node(Kind::Debugger).unwrap();
    arena.add_child_back(first_parent, c).unwrap();
    arena.add_child_back(p, existing).unwrap();

    let err = arena.add_child_back(p, c).unwrap_err();
    assert!(matches!(err, IrError::InvalidTreeState { node, .. } if node == c));

    assert_eq!(arena.children(p).collect::<Vec<_>>(), vec![existing]);
    assert_eq!(arena.last_child(p), Some(existing));
    assert_eq!(arena.parent(c), Some(first_parent));
    assert_eq!(arena.next_sibling(c), None);
    assert_eq!(arena.children(first_parent).collect::<Vec<_>>(), vec![c]);
}

#[test]
fn test_attach_front_also_rejects_parented_node() {
    let mut arena = Arena::new();
    let a = arena.new_node(Kind::Block).unwrap();
    let b = arena.new_node(Kind::Block).unwrap();
    let c = arena.new_node(Kind::Empty).unwrap();
    arena.add_child_front(a, c).unwrap();
    assert!(matches!(
        arena.add_child_front(b, c),
        Err(IrError::InvalidTreeState { .. })
    ));
    assert!(!arena.has_children(b));
}

#[test]
fn test_detached_node_can_move_to_a_new_parent() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let from = arena.new_node(Kind::Block)?;
    let to = arena.new_node(Kind::Block)?;
    let moved = arena.new_node(Kind::Empty)?;
    let stays = arena.new_node(Kind::Debugger)?;
    arena.add_children_back(from, &[moved, stays])?;

    arena.detach(moved)?;
    assert_eq!(arena.parent(moved), None);
    assert_eq!(arena.next_sibling(moved), None);
    arena.add_child_back(to, moved)?;

    assert_eq!(arena.children(from).collect::<Vec<_>>(), vec![stays]);
    assert_eq!(arena.first_child(from), Some(stays));
    assert_eq!(arena.parent(moved), Some(to));
    Ok(())
}

#[test]
fn test_detach_keeps_subtree_of_detached_node() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let root = nested_blocks(&mut arena, 3, 2);
    let branch = arena.first_child(root).unwrap();
    let before = arena.count_nodes(branch);
    arena.detach(branch)?;
    assert_eq!(arena.count_nodes(branch), before);
    assert_eq!(arena.count_nodes(root), 1 + 2 + 4 + 8 - before);
    Ok(())
}

#[test]
fn test_cannot_attach_ancestor_under_descendant() {
    let mut arena = Arena::new();
    let root = nested_blocks(&mut arena, 3, 1);
    let leaf = arena.preorder(root).last().unwrap();
    let leaf_parent = arena.parent(leaf).unwrap();
    assert!(arena.would_create_cycle(leaf_parent, root));
    if cfg!(debug_assertions) {
        let err = arena.add_child_back(leaf_parent, root).unwrap_err();
        assert!(matches!(err, IrError::InvalidTreeState { .. }));
    }
    assert_eq!(arena.parent(root), None);
}

#[test]
fn test_growing_a_deep_chain_at_its_tip() {
    let mut arena = Arena::new();
    let root = arena.new_node(Kind::Block).unwrap();
    let mut tip = root;
    for line in 0..50_000 {
        let child = arena.new_node_at(Kind::Block, line, 0).unwrap();
        arena.add_child_back(tip, child).unwrap();
        tip = child;
    }
    assert_eq!(arena.ancestors(tip).count(), 50_000);
    assert_eq!(arena.count_nodes(root), 50_001);
    let copy = arena.clone_node(tip);
    assert!(!arena.would_create_cycle(tip, copy));
}

#[test]
fn test_grafting_a_subtree_under_a_fresh_parent() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let subtree = nested_blocks(&mut arena, 2, 2);
    let wrapper = arena.new_node(Kind::Block)?;
    assert!(!arena.would_create_cycle(wrapper, subtree));
    arena.add_child_back(wrapper, subtree)?;
    assert_eq!(arena.count_nodes(wrapper), 8);
    Ok(())
}

#[test]
fn test_child_queries() {
    let mut arena = Arena::new();
    let root = nested_blocks(&mut arena, 1, 4);
    let children: Vec<_> = arena.children(root).collect();
    assert_eq!(arena.child_count(root), 4);
    assert_eq!(arena.child_at(root, 2), Some(children[2]));
    assert_eq!(arena.child_at(root, 4), None);
    assert_eq!(arena.previous_sibling(children[0]), None);
    assert_eq!(arena.previous_sibling(children[3]), Some(children[2]));
    assert_eq!(arena.index_of_child(children[3]), Some(3));
    assert_eq!(arena.index_of_child(root), None);
}

#[test]
fn test_replace_and_reattach_replaced_node() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let root = nested_blocks(&mut arena, 1, 3);
    let middle = arena.child_at(root, 1).unwrap();
    let replacement = arena.new_node(Kind::Debugger)?;
    arena.replace_with(middle, replacement)?;
    assert_eq!(arena.child_at(root, 1), Some(replacement));
    assert_eq!(arena.child_count(root), 3);

    arena.add_child_front(root, middle)?;
    assert_eq!(arena.first_child(root), Some(middle));
    assert_eq!(arena.child_count(root), 4);
    Ok(())
}

#[test]
fn test_replace_with_attached_node_is_rejected() {
    let mut arena = Arena::new();
    let root = nested_blocks(&mut arena, 1, 2);
    let first = arena.child_at(root, 0).unwrap();
    let second = arena.child_at(root, 1).unwrap();
    assert!(arena.replace_with(first, second).is_err());
    assert_eq!(arena.children(root).collect::<Vec<_>>(), vec![first, second]);
}

#[test]
fn test_type_annotation_is_shared() {
    use std::rc::Rc;

    use canopy_ir::node::TypeAnnotation;

    #[derive(Debug)]
    struct Named(&'static str);

    impl std::fmt::Display for Named {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    let mut arena = Arena::new();
    let node = arena.new_node(Kind::Block).unwrap();
    let annotation: Rc<dyn TypeAnnotation> = Rc::new(Named("string"));
    arena.set_type_annotation(node, Some(Rc::clone(&annotation)));
    assert!(Rc::ptr_eq(arena.type_annotation(node).unwrap(), &annotation));
    assert_eq!(Rc::strong_count(&annotation), 2);
    arena.set_type_annotation(node, None);
    assert!(arena.type_annotation(node).is_none());
    assert_eq!(Rc::strong_count(&annotation), 1);
}
