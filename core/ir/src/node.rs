//! Node handles, payloads and per-node storage.

use core::fmt;
use std::{
    fmt::{Display, Formatter},
    num::NonZeroU32,
    rc::Rc,
};

use crate::{
    kind::{Kind, Variant},
    position::SourcePosition,
    properties::PropertyList,
};

/// Handle to a node stored in an [`crate::arena::Arena`].
///
/// Zero is reserved so that `Option<NodeId>` stays four bytes wide; the arena
/// index is the raw value minus one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new);
        match raw {
            Some(raw) => NodeId(raw),
            None => panic!("arena exceeded {} nodes", u32::MAX - 1),
        }
    }

    /// Position of the node in its arena's storage.
    #[must_use]
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

/// Opaque type information attached by the type checker.
///
/// The tree never inspects it beyond printing; its lifetime belongs to the type
/// checker, the tree only holds a shared reference.
pub trait TypeAnnotation: fmt::Display + fmt::Debug {}

impl<T: fmt::Display + fmt::Debug + ?Sized> TypeAnnotation for T {}

/// The scalar a node carries next to its kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Generic,
    Text(Box<str>),
    Number(f64),
}

impl Payload {
    #[must_use]
    pub fn variant(&self) -> Variant {
        match self {
            Payload::Generic => Variant::Generic,
            Payload::Text(_) => Variant::Text,
            Payload::Number(_) => Variant::Number,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Payload::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// Storage for one node. Links are arena handles, never owning pointers.
#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: Kind,
    pub(crate) payload: Payload,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) properties: PropertyList,
    pub(crate) position: SourcePosition,
    pub(crate) type_annotation: Option<Rc<dyn TypeAnnotation>>,
}

impl NodeData {
    pub(crate) fn new(kind: Kind, payload: Payload, position: SourcePosition) -> Self {
        debug_assert_eq!(kind.variant(), payload.variant());
        Self {
            kind,
            payload,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            properties: PropertyList::new(),
            position,
            type_annotation: None,
        }
    }

    /// Copy of everything except the links.
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            kind: self.kind,
            payload: self.payload.clone(),
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            properties: self.properties.clone(),
            position: self.position,
            type_annotation: self.type_annotation.clone(),
        }
    }
}
