//! Human-readable node rendering for diagnostics and tests.
//!
//! A node renders as its kind name, then its payload, then whatever
//! [`DebugOptions`] asks for:
//!
//! ```text
//! NAME x 3 [originalname: y] [length: 7] : number
//! ```
//!
//! Properties are printed in ascending id order. Property values that point at
//! other nodes or at opaque pass data are printed as fixed placeholders, so the
//! output never recurses through property links.

use core::fmt;
use std::fmt::{Display, Formatter};

use crate::{
    arena::Arena,
    node::{NodeId, Payload},
    properties::{PropEntry, PropObject},
};

const NODE_PLACEHOLDER: &str = "<node>";
const OPAQUE_PLACEHOLDER: &str = "<opaque>";

/// What [`Arena::to_debug_string`] prints beyond kind and payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugOptions {
    pub print_source: bool,
    pub print_annotations: bool,
    pub print_type: bool,
}

impl DebugOptions {
    /// Everything switched on.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            print_source: true,
            print_annotations: true,
            print_type: true,
        }
    }

    #[must_use]
    pub const fn with_source(mut self, value: bool) -> Self {
        self.print_source = value;
        self
    }

    #[must_use]
    pub const fn with_annotations(mut self, value: bool) -> Self {
        self.print_annotations = value;
        self
    }

    #[must_use]
    pub const fn with_type(mut self, value: bool) -> Self {
        self.print_type = value;
        self
    }
}

impl Arena {
    /// One-line rendering of a single node.
    #[must_use]
    pub fn to_debug_string(&self, id: NodeId, options: &DebugOptions) -> String {
        DebugNode {
            arena: self,
            id,
            options: *options,
        }
        .to_string()
    }

    /// Multi-line rendering of a subtree, one node per line, children indented
    /// two spaces deeper than their parent.
    #[must_use]
    pub fn to_string_tree(&self, root: NodeId, options: &DebugOptions) -> String {
        DebugTree {
            arena: self,
            root,
            options: *options,
        }
        .to_string()
    }
}

struct DebugNode<'a> {
    arena: &'a Arena,
    id: NodeId,
    options: DebugOptions,
}

impl Display for DebugNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let arena = self.arena;
        let kind = arena.kind(self.id);
        f.write_str(kind.name())?;

        match arena.payload(self.id) {
            Payload::Text(text) => write!(f, " {text}")?,
            Payload::Number(value) => write!(f, " {value}")?,
            Payload::Generic if kind.is_function() => {
                let name = arena
                    .first_child(self.id)
                    .and_then(|first| arena.payload(first).as_text())
                    .filter(|name| !name.is_empty());
                if let Some(name) = name {
                    write!(f, " {name}")?;
                }
            }
            Payload::Generic => {}
        }

        if self.options.print_source {
            let line = arena.line(self.id);
            if line != -1 {
                write!(f, " {line}")?;
            }
        }

        if self.options.print_annotations {
            let props = arena.props(self.id);
            for key in props.sorted_keys() {
                if let Some(entry) = props.entry(key) {
                    write!(f, " [{}: ", key.name())?;
                    write_prop_value(f, entry)?;
                    f.write_str("]")?;
                }
            }
        }

        if self.options.print_type {
            if let Some(annotation) = arena.type_annotation(self.id) {
                write!(f, " : {annotation}")?;
            }
        }
        Ok(())
    }
}

fn write_prop_value(f: &mut Formatter<'_>, entry: &PropEntry) -> fmt::Result {
    match &entry.object {
        None => write!(f, "{}", entry.int_value),
        Some(PropObject::Text(text)) => f.write_str(text),
        Some(PropObject::Node(_)) => f.write_str(NODE_PLACEHOLDER),
        Some(PropObject::Opaque(_)) => f.write_str(OPAQUE_PLACEHOLDER),
    }
}

struct DebugTree<'a> {
    arena: &'a Arena,
    root: NodeId,
    options: DebugOptions,
}

impl Display for DebugTree<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = DebugNode {
                arena: self.arena,
                id,
                options: self.options,
            };
            writeln!(f, "{:indent$}{node}", "", indent = depth * 2)?;
            let children: Vec<NodeId> = self.arena.children(id).collect();
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
        Ok(())
    }
}
