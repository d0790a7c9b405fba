//! Packed source positions.
//!
//! A node stores its (line, column) pair in a single `i32`: the column lives in the
//! low [`COLUMN_BITS`] bits and the line in the remaining high bits. The encoding is
//! lossy: columns past [`MAX_COLUMN`] are clamped, which is fine for hand-written
//! source but will smear positions on minified input. Lines are only recoverable
//! up to `2^20 - 1`, and the single pair (`2^20 - 1`, [`MAX_COLUMN`]) packs to the
//! [`UNKNOWN`] sentinel, so it reads back as an unknown position.
//!
//! ```
//! use canopy_ir::position::{decode_column, decode_line, encode};
//!
//! let packed = encode(12, 7);
//! assert_eq!(decode_line(packed), 12);
//! assert_eq!(decode_column(packed), 7);
//! assert_eq!(encode(-1, 3), -1);
//! ```

use core::fmt;
use std::fmt::{Display, Formatter};

/// Number of low bits reserved for the column.
pub const COLUMN_BITS: u32 = 12;

/// Largest representable column; larger columns are clamped to this value.
pub const MAX_COLUMN: i32 = (1 << COLUMN_BITS) - 1;

/// Sentinel for "position unknown".
pub const UNKNOWN: i32 = -1;

const COLUMN_MASK: i32 = MAX_COLUMN;

/// Packs `line` and `col` into one integer.
///
/// Returns [`UNKNOWN`] if either half is negative. A column above [`MAX_COLUMN`]
/// is clamped rather than rejected.
#[must_use]
pub const fn encode(line: i32, col: i32) -> i32 {
    if line < 0 || col < 0 {
        return UNKNOWN;
    }
    let col = if col > MAX_COLUMN { MAX_COLUMN } else { col };
    (line << COLUMN_BITS) | col
}

/// Extracts the line from a packed position, or `-1` for the sentinel.
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub const fn decode_line(packed: i32) -> i32 {
    if packed == UNKNOWN {
        return UNKNOWN;
    }
    ((packed as u32) >> COLUMN_BITS) as i32
}

/// Extracts the column from a packed position, or `-1` for the sentinel.
#[must_use]
pub const fn decode_column(packed: i32) -> i32 {
    if packed == UNKNOWN {
        return UNKNOWN;
    }
    packed & COLUMN_MASK
}

/// A packed (line, column) pair as stored on every node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SourcePosition(i32);

impl SourcePosition {
    pub const UNKNOWN: SourcePosition = SourcePosition(UNKNOWN);

    #[must_use]
    pub const fn new(line: i32, col: i32) -> Self {
        SourcePosition(encode(line, col))
    }

    /// Wraps an already packed value.
    #[must_use]
    pub const fn from_raw(packed: i32) -> Self {
        SourcePosition(packed)
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn line(self) -> i32 {
        decode_line(self.0)
    }

    #[must_use]
    pub const fn column(self) -> i32 {
        decode_column(self.0)
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        self.0 != UNKNOWN
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        SourcePosition::UNKNOWN
    }
}

impl Display for SourcePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line(), self.column())
        } else {
            write!(f, "?")
        }
    }
}
