//! Viewport — the visible window into document space.
//!
//! The viewport is just two offsets: the document row shown at the top of
//! the screen and the document column shown at the left edge. They are not
//! free-standing state — [`scroll_to`](Viewport::scroll_to) recomputes
//! them from the cursor and the terminal size once per frame, before
//! drawing. The rule per axis is two-sided: scroll back if the cursor
//! moved above/left of the window, scroll forward if it moved past the
//! bottom/right edge, otherwise leave the offset alone.
//!
//! After recomputation (for non-zero screen dimensions):
//!
//! ```text
//! row_offset <= cy < row_offset + rows
//! col_offset <= cx < col_offset + cols
//! ```

use vy_term::terminal::Size;

use crate::cursor::Cursor;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Scroll offsets: the top-left corner of the window in document space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First visible document row.
    pub row_offset: usize,
    /// First visible document column.
    pub col_offset: usize,
}

impl Viewport {
    /// A viewport at the document origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
        }
    }

    /// Recompute the offsets so the cursor is inside the window.
    ///
    /// Pure function of the current cursor and the previous offsets; no
    /// history beyond them. Run once per render cycle before drawing.
    pub fn scroll_to(&mut self, cursor: Cursor, size: Size) {
        let rows = size.rows as usize;
        let cols = size.cols as usize;
        if rows == 0 || cols == 0 {
            return;
        }

        // Vertical: reveal the cursor above or below the window.
        if cursor.cy < self.row_offset {
            self.row_offset = cursor.cy;
        }
        if cursor.cy >= self.row_offset + rows {
            self.row_offset = cursor.cy - rows + 1;
        }

        // Horizontal: same rule against the column.
        if cursor.cx < self.col_offset {
            self.col_offset = cursor.cx;
        }
        if cursor.cx >= self.col_offset + cols {
            self.col_offset = cursor.cx - cols + 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
