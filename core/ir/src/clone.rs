//! Structural copies and structural comparison.

use crate::{arena::Arena, node::NodeId};

impl Arena {
    /// Copies `id` without its links: same kind, payload, properties, position and
    /// type annotation, but no parent, children or sibling.
    pub fn clone_node(&mut self, id: NodeId) -> NodeId {
        let copy = self.data(id).detached_copy();
        self.alloc(copy)
    }

    /// Copies the whole subtree under `root`. The copy is detached, shares no node
    /// with the original and keeps every child sequence in order.
    pub fn clone_tree(&mut self, root: NodeId) -> NodeId {
        let new_root = self.clone_node(root);
        let mut pending = vec![(root, new_root)];
        while let Some((original, copy)) = pending.pop() {
            let children: Vec<NodeId> = self.children(original).collect();
            for child in children {
                let child_copy = self.clone_node(child);
                self.link_back(copy, child_copy);
                pending.push((child, child_copy));
            }
        }
        new_root
    }

    /// Whether the subtrees under `a` and `b` have the same kinds, payloads and
    /// child sequences. Positions, properties and type annotations are ignored.
    #[must_use]
    pub fn is_equivalent_to(&self, a: NodeId, b: NodeId) -> bool {
        let mut pending = vec![(a, b)];
        while let Some((left, right)) = pending.pop() {
            let (l, r) = (self.data(left), self.data(right));
            if l.kind != r.kind || l.payload != r.payload {
                return false;
            }
            let mut left_children = self.children(left);
            let mut right_children = self.children(right);
            loop {
                match (left_children.next(), right_children.next()) {
                    (Some(lc), Some(rc)) => pending.push((lc, rc)),
                    (None, None) => break,
                    _ => return false,
                }
            }
        }
        true
    }
}
