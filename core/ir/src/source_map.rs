//! Ordered registration of generated-code → source mappings.
//!
//! A code printer walks the tree and, for every node it emits, registers the
//! range of generated output it produced together with the node's source
//! position. Mappings must arrive in non-decreasing order of their generated
//! start. A regression means the printer is broken; the recorder refuses the
//! mapping and aborts the whole stream, since an encoder cannot fix up an
//! unordered stream after the fact.

use core::fmt;
use std::fmt::{Display, Formatter};

use crate::{
    arena::Arena, errors::SourceMapError, node::NodeId, position::SourcePosition,
};

/// A (line, column) position in generated output. Ordered line first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FilePosition {
    pub line: u32,
    pub column: u32,
}

impl FilePosition {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Display for FilePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One registered mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub node: NodeId,
    pub original: SourcePosition,
    /// Source-level name, taken from text nodes.
    pub original_name: Option<String>,
    pub start: FilePosition,
    pub end: FilePosition,
}

#[derive(Debug, Default)]
pub struct SourceMapRecorder {
    mappings: Vec<Mapping>,
    last_start: Option<FilePosition>,
    aborted: bool,
}

impl SourceMapRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers that `node` produced the generated range `start..end`.
    ///
    /// Nodes without a known source position are accepted but produce no
    /// mapping.
    ///
    /// # Errors
    ///
    /// - [`SourceMapError::InvalidRange`] if `end` precedes `start`.
    /// - [`SourceMapError::OrderingViolation`] if `start` precedes the previous
    ///   registration's start; the recorder is aborted from then on.
    /// - [`SourceMapError::Aborted`] for any call after an ordering violation.
    pub fn add_mapping(
        &mut self,
        arena: &Arena,
        node: NodeId,
        start: FilePosition,
        end: FilePosition,
    ) -> Result<(), SourceMapError> {
        if self.aborted {
            return Err(SourceMapError::Aborted);
        }
        if end < start {
            return Err(SourceMapError::InvalidRange { start, end });
        }
        if let Some(previous) = self.last_start {
            if start < previous {
                self.aborted = true;
                tracing::error!(%previous, attempted = %start, "source map ordering violated");
                return Err(SourceMapError::OrderingViolation {
                    previous,
                    attempted: start,
                });
            }
        }
        self.last_start = Some(start);

        let original = arena.position(node);
        if !original.is_known() {
            tracing::trace!(%node, "skipping mapping for node without a position");
            return Ok(());
        }
        self.mappings.push(Mapping {
            node,
            original,
            original_name: arena.payload(node).as_text().map(str::to_owned),
            start,
            end,
        });
        Ok(())
    }

    #[must_use]
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}
