//! Cursor — position tracking in document space.
//!
//! The `Cursor` is a lightweight value type: a column and a row index into
//! the document, with movement primitives that respect the document's
//! boundaries. It does not own or reference the document; the document is
//! passed to movement methods as a parameter.
//!
//! # Boundary policies
//!
//! Each arrow direction has an explicit edge rule rather than a silent
//! clamp:
//!
//! - **Left** at the start of a row wraps to the *end* of the previous
//!   row; only at `(0, 0)` is it a no-op.
//! - **Right** at the end of a row hops to the *start* of the next row —
//!   but only while a row exists at `cy`. One row past the last
//!   (`cy == row_count`), Right is unconditionally a no-op: there is
//!   nothing to hop into. The asymmetry is deliberate and load-bearing
//!   for navigation at the last line.
//! - **Up**/**Down** move by whole rows; `cy` may rest at `row_count`,
//!   the insertion point past the final row.
//!
//! After every move the column is clamped to the new row's length, so
//! vertical movement through a short line cannot leave the cursor
//! dangling past its end.

use vy_term::input::Arrow;

use crate::document::Document;

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// A cursor position in document space.
///
/// Invariants, maintained by [`step`](Self::step):
/// `cy <= doc.row_count()` and `cx <= doc.row_len(cy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column (byte offset into the current row).
    pub cx: usize,
    /// Row (index into the document; may equal `row_count`).
    pub cy: usize,
}

impl Cursor {
    /// A cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self { cx: 0, cy: 0 }
    }

    /// A cursor at a specific document position.
    #[must_use]
    pub const fn at(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    /// Apply one arrow key, then clamp the column to the new row.
    pub fn step(&mut self, doc: &Document, arrow: Arrow) {
        match arrow {
            Arrow::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    // Wrap to the end of the previous row.
                    self.cy -= 1;
                    self.cx = doc.row_len(self.cy);
                }
            }
            Arrow::Right => {
                // Only while a row exists here: past the last row there
                // is no row length to compare against and no next row.
                if let Some(row) = doc.row(self.cy) {
                    if self.cx < row.len() {
                        self.cx += 1;
                    } else {
                        // At the exact end of the row: start of next.
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Arrow::Up => {
                if self.cy > 0 {
                    self.cy -= 1;
                }
            }
            Arrow::Down => {
                if self.cy < doc.row_count() {
                    self.cy += 1;
                }
            }
        }

        // Vertical movement keeps cx until this clamp; a shorter target
        // row pulls the cursor back to its end.
        let row_len = doc.row_len(self.cy);
        if self.cx > row_len {
            self.cx = row_len;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
