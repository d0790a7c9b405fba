//! Traversal, counting and visitor walks.
//!
//! Nothing here recurses on the call stack, so arbitrarily deep trees are fine.

use rustc_hash::FxHashMap;

use crate::{arena::Arena, kind::Kind, node::NodeId};

/// What a [`Visitor`] wants after entering a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    Continue,
    SkipChildren,
}

/// Callbacks for [`Arena::walk`]. `leave` runs after all children were walked,
/// or right after `enter` when the children are skipped.
pub trait Visitor {
    fn enter(&mut self, _arena: &Arena, _id: NodeId) -> VisitControl {
        VisitControl::Continue
    }

    fn leave(&mut self, _arena: &Arena, _id: NodeId) {}
}

impl Arena {
    /// Pre-order iterator over the subtree rooted at `root`, `root` first.
    pub fn preorder(&self, root: NodeId) -> Preorder<'_> {
        Preorder {
            arena: self,
            root,
            next: Some(root),
        }
    }

    /// Number of nodes in the subtree, `root` included.
    #[must_use]
    pub fn count_nodes(&self, root: NodeId) -> usize {
        self.preorder(root).count()
    }

    /// How many nodes of each kind the subtree holds.
    #[must_use]
    pub fn kind_histogram(&self, root: NodeId) -> FxHashMap<Kind, usize> {
        let mut histogram = FxHashMap::default();
        for id in self.preorder(root) {
            *histogram.entry(self.kind(id)).or_insert(0) += 1;
        }
        histogram
    }

    /// Walks the subtree depth-first, calling `visitor` on the way down and up.
    pub fn walk<V: Visitor + ?Sized>(&self, root: NodeId, visitor: &mut V) {
        let mut stack = vec![(root, false)];
        while let Some((id, entered)) = stack.pop() {
            if entered {
                visitor.leave(self, id);
                continue;
            }
            match visitor.enter(self, id) {
                VisitControl::SkipChildren => visitor.leave(self, id),
                VisitControl::Continue => {
                    stack.push((id, true));
                    let children: Vec<NodeId> = self.children(id).collect();
                    stack.extend(children.into_iter().rev().map(|child| (child, false)));
                }
            }
        }
    }
}

/// Stackless pre-order iterator; see [`Arena::preorder`].
#[derive(Clone)]
pub struct Preorder<'a> {
    arena: &'a Arena,
    root: NodeId,
    next: Option<NodeId>,
}

impl Preorder<'_> {
    fn successor(&self, current: NodeId) -> Option<NodeId> {
        if let Some(child) = self.arena.first_child(current) {
            return Some(child);
        }
        let mut node = current;
        loop {
            if node == self.root {
                return None;
            }
            if let Some(sibling) = self.arena.next_sibling(node) {
                return Some(sibling);
            }
            node = self.arena.parent(node)?;
        }
    }
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}
