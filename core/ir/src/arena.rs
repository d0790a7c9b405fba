//! Arena-backed node store and tree surgery.
//!
//! All nodes of one tree family live in a single [`Arena`] and refer to each other
//! through [`NodeId`] handles. Children form a singly linked chain
//! (`first_child` → `next_sibling` → …) with a cached `last_child` so that both
//! front and back insertion are O(1). The child count is not cached; it is
//! recomputed by walking the chain.
//!
//! Every mutating operation checks its preconditions before touching any link
//! and reports a violation as an [`IrError`]. A failed call leaves the tree
//! exactly as it was.
//!
//! # Example
//!
//! ```
//! use canopy_ir::{arena::Arena, kind::Kind};
//!
//! let mut arena = Arena::new();
//! let block = arena.new_node(Kind::Block)?;
//! let empty = arena.new_node(Kind::Empty)?;
//! arena.add_child_back(block, empty)?;
//! assert_eq!(arena.first_child(block), Some(empty));
//! assert_eq!(arena.parent(empty), Some(block));
//! # Ok::<(), canopy_ir::errors::IrError>(())
//! ```
//!
//! # Panics
//!
//! Handles are plain indices. Passing a [`NodeId`] that was not produced by the
//! same arena panics on out-of-range access.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::{
    errors::IrError,
    kind::{Kind, Variant},
    node::{NodeData, NodeId, Payload, TypeAnnotation},
    position::SourcePosition,
    properties::{Prop, PropObject, PropertyList},
};

#[derive(Clone, Debug, Default)]
pub struct Arena {
    nodes: Vec<NodeData>,
}

impl Arena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes ever allocated, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every allocated node in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    // ---- construction -------------------------------------------------------

    /// Creates a detached payload-less node with an unknown position.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidArgument`] if `kind` requires a text or numeric payload.
    pub fn new_node(&mut self, kind: Kind) -> Result<NodeId, IrError> {
        self.new_generic(kind, SourcePosition::UNKNOWN)
    }

    /// Creates a detached payload-less node at `line`:`col`.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidArgument`] if `kind` requires a text or numeric payload.
    pub fn new_node_at(&mut self, kind: Kind, line: i32, col: i32) -> Result<NodeId, IrError> {
        self.new_generic(kind, SourcePosition::new(line, col))
    }

    /// Creates a detached text node.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidArgument`] if `value` is `None` or `kind` is not a
    /// text kind. Nothing is allocated in that case.
    pub fn new_string(&mut self, kind: Kind, value: Option<&str>) -> Result<NodeId, IrError> {
        self.new_text(kind, value, SourcePosition::UNKNOWN)
    }

    /// Creates a detached text node at `line`:`col`.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::new_string`].
    pub fn new_string_at(
        &mut self,
        kind: Kind,
        value: Option<&str>,
        line: i32,
        col: i32,
    ) -> Result<NodeId, IrError> {
        self.new_text(kind, value, SourcePosition::new(line, col))
    }

    /// Creates a detached `NUMBER` node.
    pub fn new_number(&mut self, value: f64) -> NodeId {
        self.alloc(NodeData::new(
            Kind::Number,
            Payload::Number(value),
            SourcePosition::UNKNOWN,
        ))
    }

    pub fn new_number_at(&mut self, value: f64, line: i32, col: i32) -> NodeId {
        self.alloc(NodeData::new(
            Kind::Number,
            Payload::Number(value),
            SourcePosition::new(line, col),
        ))
    }

    fn new_generic(&mut self, kind: Kind, position: SourcePosition) -> Result<NodeId, IrError> {
        if kind.has_payload() {
            return Err(IrError::invalid_argument(format!(
                "{kind} nodes require a {} payload",
                kind.variant()
            )));
        }
        Ok(self.alloc(NodeData::new(kind, Payload::Generic, position)))
    }

    fn new_text(
        &mut self,
        kind: Kind,
        value: Option<&str>,
        position: SourcePosition,
    ) -> Result<NodeId, IrError> {
        if kind.variant() != Variant::Text {
            return Err(IrError::invalid_argument(format!(
                "{kind} is a {} kind, not a text kind",
                kind.variant()
            )));
        }
        let Some(value) = value else {
            return Err(IrError::invalid_argument(format!(
                "{kind} node requires a text value"
            )));
        };
        Ok(self.alloc(NodeData::new(kind, Payload::Text(value.into()), position)))
    }

    pub(crate) fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(data);
        id
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    // ---- queries ------------------------------------------------------------

    #[must_use]
    pub fn kind(&self, id: NodeId) -> Kind {
        self.data(id).kind
    }

    #[must_use]
    pub fn payload(&self, id: NodeId) -> &Payload {
        &self.data(id).payload
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).first_child
    }

    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).last_child
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).next_sibling
    }

    /// Walks the parent's chain; O(number of siblings).
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let mut previous = None;
        for child in self.children(parent) {
            if child == id {
                return previous;
            }
            previous = Some(child);
        }
        None
    }

    /// Number of children; walks the sibling chain.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    #[must_use]
    pub fn has_children(&self, id: NodeId) -> bool {
        self.data(id).first_child.is_some()
    }

    #[must_use]
    pub fn has_one_child(&self, id: NodeId) -> bool {
        let data = self.data(id);
        data.first_child.is_some() && data.first_child == data.last_child
    }

    #[must_use]
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).nth(index)
    }

    /// Position of `id` among its parent's children.
    #[must_use]
    pub fn index_of_child(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).position(|child| child == id)
    }

    /// True when the node has neither a parent nor a sibling link and may be attached.
    #[must_use]
    pub fn is_detached(&self, id: NodeId) -> bool {
        let data = self.data(id);
        data.parent.is_none() && data.next_sibling.is_none()
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            arena: self,
            next: self.data(id).first_child,
        }
    }

    /// Proper ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.data(id).parent,
        }
    }

    /// Whether `ancestor` is a proper ancestor of `id`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// The topmost ancestor of `id`, or `id` itself when detached.
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    // ---- attaching ----------------------------------------------------------

    /// Links `child` as the first child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidTreeState`] if `child` already has a parent or a
    /// sibling link, or if `child` is `parent`. In debug builds a link that
    /// would make the tree cyclic is rejected as well; see
    /// [`Arena::would_create_cycle`].
    pub fn add_child_front(&mut self, parent: NodeId, child: NodeId) -> Result<(), IrError> {
        self.check_attachable(parent, child, "add_child_front")?;
        let first = self.data(parent).first_child;
        let data = self.data_mut(child);
        data.parent = Some(parent);
        data.next_sibling = first;
        let data = self.data_mut(parent);
        data.first_child = Some(child);
        if data.last_child.is_none() {
            data.last_child = Some(child);
        }
        Ok(())
    }

    /// Links `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::add_child_front`].
    pub fn add_child_back(&mut self, parent: NodeId, child: NodeId) -> Result<(), IrError> {
        self.check_attachable(parent, child, "add_child_back")?;
        self.link_back(parent, child);
        Ok(())
    }

    /// Appends all of `children` in order. Either every child is attached or none is.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidTreeState`] if any child fails the attach
    /// precondition or appears twice in `children`.
    pub fn add_children_back(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), IrError> {
        let mut seen = FxHashSet::default();
        for &child in children {
            self.check_attachable(parent, child, "add_children_back")?;
            if !seen.insert(child) {
                return rejected(child, "add_children_back: node listed twice");
            }
        }
        for &child in children {
            self.link_back(parent, child);
        }
        Ok(())
    }

    /// Links `new_child` directly after `sibling`, under `sibling`'s parent.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidTreeState`] if `sibling` has no parent or
    /// `new_child` fails the attach precondition.
    pub fn add_child_after(&mut self, new_child: NodeId, sibling: NodeId) -> Result<(), IrError> {
        let Some(parent) = self.parent(sibling) else {
            return rejected(sibling, "add_child_after: sibling has no parent");
        };
        self.check_attachable(parent, new_child, "add_child_after")?;
        let next = self.data(sibling).next_sibling;
        let data = self.data_mut(new_child);
        data.parent = Some(parent);
        data.next_sibling = next;
        self.data_mut(sibling).next_sibling = Some(new_child);
        if self.data(parent).last_child == Some(sibling) {
            self.data_mut(parent).last_child = Some(new_child);
        }
        Ok(())
    }

    /// Links `new_child` directly before `sibling`, under `sibling`'s parent.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::add_child_after`].
    pub fn add_child_before(&mut self, new_child: NodeId, sibling: NodeId) -> Result<(), IrError> {
        let Some(parent) = self.parent(sibling) else {
            return rejected(sibling, "add_child_before: sibling has no parent");
        };
        match self.previous_sibling(sibling) {
            Some(previous) => self.add_child_after(new_child, previous),
            None => self.add_child_front(parent, new_child),
        }
    }

    /// Checks that every node in `children` is detached and listed once, for a
    /// parent that does not exist yet.
    pub(crate) fn check_all_detached(
        &self,
        children: &[NodeId],
        operation: &str,
    ) -> Result<(), IrError> {
        let mut seen = FxHashSet::default();
        for &child in children {
            if !self.is_detached(child) {
                return rejected(child, format!("{operation}: node is already attached"));
            }
            if !seen.insert(child) {
                return rejected(child, format!("{operation}: node listed twice"));
            }
        }
        Ok(())
    }

    pub(crate) fn link_back(&mut self, parent: NodeId, child: NodeId) {
        let last = self.data(parent).last_child;
        self.data_mut(child).parent = Some(parent);
        match last {
            Some(last) => self.data_mut(last).next_sibling = Some(child),
            None => self.data_mut(parent).first_child = Some(child),
        }
        self.data_mut(parent).last_child = Some(child);
    }

    fn check_attachable(
        &self,
        parent: NodeId,
        child: NodeId,
        operation: &str,
    ) -> Result<(), IrError> {
        let data = self.data(child);
        if data.parent.is_some() {
            return rejected(child, format!("{operation}: node already has a parent"));
        }
        if data.next_sibling.is_some() {
            return rejected(child, format!("{operation}: node still has a sibling link"));
        }
        if parent == child {
            return rejected(child, format!("{operation}: node cannot parent itself"));
        }
        // A detached leaf cannot be an ancestor of anything, so only subtrees pay
        // for the ancestor walk, and only in debug builds.
        if cfg!(debug_assertions) && self.has_children(child) && self.is_ancestor_of(child, parent)
        {
            return rejected(
                child,
                format!("{operation}: node cannot become a descendant of itself"),
            );
        }
        Ok(())
    }

    /// Whether linking `child` under `parent` would close a cycle. Walks the
    /// ancestors of `parent`.
    ///
    /// Attach operations only run this walk in debug builds; callers grafting
    /// subtrees of unknown origin in release builds should ask first.
    #[must_use]
    pub fn would_create_cycle(&self, parent: NodeId, child: NodeId) -> bool {
        parent == child || self.is_ancestor_of(child, parent)
    }

    // ---- detaching ----------------------------------------------------------

    /// Unlinks `id` from its parent. Afterwards `id` has no parent and no next
    /// sibling, so it satisfies the attach precondition again. Its own children
    /// stay attached to it.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidTreeState`] if `id` has no parent.
    pub fn detach(&mut self, id: NodeId) -> Result<(), IrError> {
        let Some(parent) = self.parent(id) else {
            return rejected(id, "detach: node has no parent");
        };
        self.unlink(parent, id);
        Ok(())
    }

    /// Unlinks `child` from `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidTreeState`] if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), IrError> {
        if self.parent(child) != Some(parent) {
            return rejected(child, format!("remove_child: node is not a child of {parent}"));
        }
        self.unlink(parent, child);
        Ok(())
    }

    /// Unlinks and returns the first child, if any.
    pub fn remove_first_child(&mut self, parent: NodeId) -> Option<NodeId> {
        let first = self.first_child(parent)?;
        self.unlink(parent, first);
        Some(first)
    }

    /// Unlinks every child of `parent` and returns them in their former order.
    pub fn detach_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children: Vec<NodeId> = self.children(parent).collect();
        for &child in &children {
            let data = self.data_mut(child);
            data.parent = None;
            data.next_sibling = None;
        }
        let data = self.data_mut(parent);
        data.first_child = None;
        data.last_child = None;
        children
    }

    /// Puts `replacement` where `old` is and detaches `old`.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidTreeState`] if `old` has no parent or
    /// `replacement` fails the attach precondition.
    pub fn replace_with(&mut self, old: NodeId, replacement: NodeId) -> Result<(), IrError> {
        let Some(parent) = self.parent(old) else {
            return rejected(old, "replace_with: node has no parent");
        };
        self.check_attachable(parent, replacement, "replace_with")?;
        let previous = self.previous_sibling(old);
        let next = self.data(old).next_sibling;

        let data = self.data_mut(replacement);
        data.parent = Some(parent);
        data.next_sibling = next;
        match previous {
            Some(previous) => self.data_mut(previous).next_sibling = Some(replacement),
            None => self.data_mut(parent).first_child = Some(replacement),
        }
        if self.data(parent).last_child == Some(old) {
            self.data_mut(parent).last_child = Some(replacement);
        }

        let data = self.data_mut(old);
        data.parent = None;
        data.next_sibling = None;
        Ok(())
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        let previous = self.previous_sibling(child);
        let next = self.data(child).next_sibling;
        match previous {
            Some(previous) => self.data_mut(previous).next_sibling = next,
            None => self.data_mut(parent).first_child = next,
        }
        if self.data(parent).last_child == Some(child) {
            self.data_mut(parent).last_child = previous;
        }
        let data = self.data_mut(child);
        data.parent = None;
        data.next_sibling = None;
    }

    // ---- payload ------------------------------------------------------------

    /// Text payload of a text node.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::UnsupportedOperation`] for generic and numeric nodes.
    pub fn string(&self, id: NodeId) -> Result<&str, IrError> {
        let data = self.data(id);
        data.payload
            .as_text()
            .ok_or_else(|| IrError::unsupported("string", data.kind))
    }

    /// Replaces the text payload of a text node.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::UnsupportedOperation`] for generic and numeric nodes.
    pub fn set_string(&mut self, id: NodeId, value: &str) -> Result<(), IrError> {
        let data = self.data_mut(id);
        match &mut data.payload {
            Payload::Text(text) => {
                *text = value.into();
                Ok(())
            }
            _ => Err(IrError::unsupported("set_string", data.kind)),
        }
    }

    /// Numeric payload of a `NUMBER` node.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::UnsupportedOperation`] for any other node.
    pub fn number(&self, id: NodeId) -> Result<f64, IrError> {
        let data = self.data(id);
        data.payload
            .as_number()
            .ok_or_else(|| IrError::unsupported("number", data.kind))
    }

    /// # Errors
    ///
    /// Returns [`IrError::UnsupportedOperation`] for any node but `NUMBER`.
    pub fn set_number(&mut self, id: NodeId, value: f64) -> Result<(), IrError> {
        let data = self.data_mut(id);
        match &mut data.payload {
            Payload::Number(number) => {
                *number = value;
                Ok(())
            }
            _ => Err(IrError::unsupported("set_number", data.kind)),
        }
    }

    // ---- position -----------------------------------------------------------

    #[must_use]
    pub fn position(&self, id: NodeId) -> SourcePosition {
        self.data(id).position
    }

    #[must_use]
    pub fn line(&self, id: NodeId) -> i32 {
        self.data(id).position.line()
    }

    #[must_use]
    pub fn column(&self, id: NodeId) -> i32 {
        self.data(id).position.column()
    }

    /// Sets the packed position; columns past 4095 are clamped.
    pub fn set_position(&mut self, id: NodeId, line: i32, col: i32) {
        self.data_mut(id).position = SourcePosition::new(line, col);
    }

    pub fn set_source_position(&mut self, id: NodeId, position: SourcePosition) {
        self.data_mut(id).position = position;
    }

    pub fn copy_position_from(&mut self, id: NodeId, source: NodeId) {
        let position = self.data(source).position;
        self.data_mut(id).position = position;
    }

    // ---- properties ---------------------------------------------------------

    #[must_use]
    pub fn props(&self, id: NodeId) -> &PropertyList {
        &self.data(id).properties
    }

    #[must_use]
    pub fn get_bool_prop(&self, id: NodeId, key: Prop) -> bool {
        self.data(id).properties.get_bool(key)
    }

    #[must_use]
    pub fn get_int_prop(&self, id: NodeId, key: Prop, default: i32) -> i32 {
        self.data(id).properties.get_int(key, default)
    }

    #[must_use]
    pub fn get_object_prop(&self, id: NodeId, key: Prop) -> Option<&PropObject> {
        self.data(id).properties.get_object(key)
    }

    pub fn put_bool_prop(&mut self, id: NodeId, key: Prop, value: bool) {
        self.data_mut(id).properties.put_bool(key, value);
    }

    pub fn put_int_prop(&mut self, id: NodeId, key: Prop, value: i32) {
        self.data_mut(id).properties.put_int(key, value);
    }

    pub fn put_object_prop(&mut self, id: NodeId, key: Prop, value: PropObject) {
        self.data_mut(id).properties.put_object(key, value);
    }

    pub fn remove_prop(&mut self, id: NodeId, key: Prop) {
        self.data_mut(id).properties.remove(key);
    }

    #[must_use]
    pub fn sorted_prop_keys(&self, id: NodeId) -> Vec<Prop> {
        self.data(id).properties.sorted_keys()
    }

    // ---- type annotation ----------------------------------------------------

    #[must_use]
    pub fn type_annotation(&self, id: NodeId) -> Option<&Rc<dyn TypeAnnotation>> {
        self.data(id).type_annotation.as_ref()
    }

    pub fn set_type_annotation(&mut self, id: NodeId, annotation: Option<Rc<dyn TypeAnnotation>>) {
        self.data_mut(id).type_annotation = annotation;
    }
}

fn rejected<T>(node: NodeId, message: impl Into<String>) -> Result<T, IrError> {
    let error = IrError::invalid_tree_state(node, message);
    tracing::debug!(%node, %error, "tree surgery rejected");
    Err(error)
}

/// Iterator over a node's children in order.
#[derive(Clone)]
pub struct Children<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.next_sibling(current);
        Some(current)
    }
}

/// Iterator over a node's proper ancestors, nearest first.
#[derive(Clone)]
pub struct Ancestors<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}
