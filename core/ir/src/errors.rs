//! Error types for the IR crate.
//!
//! Every error here is a precondition violation reported by the call that
//! violated it. Nothing is repaired behind the caller's back: a pass that gets
//! one of these back is defective.

use thiserror::Error;

use crate::{kind::Kind, node::NodeId, source_map::FilePosition};

/// Errors raised by node construction and tree surgery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum IrError {
    /// A constructor was handed a missing or ill-shaped value.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The requested link would break the single-parent or acyclic invariant.
    #[error("invalid tree state at node {node}: {message}")]
    InvalidTreeState { node: NodeId, message: String },

    /// A payload accessor was used on a node of a different variant.
    #[error("unsupported operation `{operation}` on {kind} node")]
    UnsupportedOperation {
        operation: &'static str,
        kind: Kind,
    },
}

impl IrError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_tree_state(node: NodeId, message: impl Into<String>) -> Self {
        Self::InvalidTreeState {
            node,
            message: message.into(),
        }
    }

    pub fn unsupported(operation: &'static str, kind: Kind) -> Self {
        Self::UnsupportedOperation { operation, kind }
    }
}

/// Errors raised by [`crate::source_map::SourceMapRecorder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum SourceMapError {
    /// The generated range ends before it starts.
    #[error("mapping range ends at {end} before it starts at {start}")]
    InvalidRange {
        start: FilePosition,
        end: FilePosition,
    },

    /// A mapping was registered behind the previous one in generated output.
    #[error("mapping at {attempted} registered after a mapping at {previous}")]
    OrderingViolation {
        previous: FilePosition,
        attempted: FilePosition,
    },

    /// The stream was aborted by an earlier ordering violation.
    #[error("mapping stream was aborted by an earlier ordering violation")]
    Aborted,
}
