//! Document buffer — the ordered rows of the loaded file.
//!
//! A `Document` is a read-only sequence of [`Row`]s, one per input line,
//! loaded once at startup and never mutated. Rows are owned byte strings
//! with the line terminator stripped — the viewer does no encoding
//! interpretation, so columns are byte offsets throughout.
//!
//! # Design choices
//!
//! - **`Vec<Row>`**, not a rope. There is no editing, so the only
//!   operations are indexed access and append-at-load. A growable vector
//!   of owned lines is the whole data structure.
//!
//! - **Bytes, not `String`.** Lines are read with `read_until`, so a file
//!   with non-UTF-8 content still loads and renders byte-for-byte.
//!
//! - **Failure is fatal.** An unopenable path is an error for the caller
//!   to die on; there is no partial-buffer fallback. A *missing* path
//!   (no argument) is not an error — that's [`Document::empty`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error as ThisError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A fatal document-layer failure.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The load target could not be opened or read.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One line of the document: owned bytes, no trailing terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    bytes: Vec<u8>,
}

impl Row {
    /// Build a row from raw line bytes (terminator already stripped).
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Length of the row in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the row has no content.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The full row content.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The visible slice of the row for a horizontally scrolled viewport.
    ///
    /// Starts at `col_offset` and is clipped to at most `max_width` bytes.
    /// Empty when `col_offset` is at or past the end of the row.
    #[must_use]
    pub fn slice(&self, col_offset: usize, max_width: usize) -> &[u8] {
        if col_offset >= self.bytes.len() {
            return &[];
        }
        let end = (col_offset + max_width).min(self.bytes.len());
        &self.bytes[col_offset..end]
    }
}

impl From<&str> for Row {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The loaded file as an ordered, read-only sequence of rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    /// An empty document (zero rows) — the no-argument invocation.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a document from pre-split rows (tests, mostly).
    #[must_use]
    pub const fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Load a file, one row per line, terminators stripped.
    ///
    /// Both `\n` and `\r\n` endings are stripped; file order is preserved;
    /// a final line without a trailing newline still becomes a row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOpen`] if the path cannot be opened or read.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let mut rows = Vec::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            let n = reader
                .read_until(b'\n', &mut line)
                .map_err(|source| Error::FileOpen {
                    path: path.to_path_buf(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
            }
            rows.push(Row::new(line.clone()));
        }

        Ok(Self { rows })
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the document has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at index `y`, or `None` past the last row.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    /// Length of the row at `y`, or 0 past the last row.
    ///
    /// The clamping length the cursor model uses: at `cy == row_count()`
    /// the "current row" does not exist and its length is zero.
    #[inline]
    #[must_use]
    pub fn row_len(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, Row::len)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn temp_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents).unwrap();
        f.flush().unwrap();
        f
    }

    // -- Row ----------------------------------------------------------------

    #[test]
    fn row_len_and_bytes() {
        let row = Row::from("hello");
        assert_eq!(row.len(), 5);
        assert!(!row.is_empty());
        assert_eq!(row.as_bytes(), b"hello");
    }

    #[test]
    fn row_slice_clips_to_width() {
        let row = Row::from("abcdefgh");
        assert_eq!(row.slice(0, 3), b"abc");
        assert_eq!(row.slice(2, 3), b"cde");
    }

    #[test]
    fn row_slice_short_tail() {
        let row = Row::from("abcdefgh");
        assert_eq!(row.slice(6, 10), b"gh");
    }

    #[test]
    fn row_slice_past_end_is_empty() {
        let row = Row::from("abc");
        assert_eq!(row.slice(3, 5), b"");
        assert_eq!(row.slice(100, 5), b"");
    }

    #[test]
    fn empty_row_slice() {
        let row = Row::from("");
        assert_eq!(row.slice(0, 80), b"");
    }

    // -- Loading ------------------------------------------------------------

    #[test]
    fn open_strips_lf_and_crlf() {
        // Mixed endings in one file, final line unterminated.
        let f = temp_file(b"abc\nde\r\nf");
        let doc = Document::open(f.path()).unwrap();

        assert_eq!(doc.row_count(), 3);
        assert_eq!(doc.row(0).unwrap().as_bytes(), b"abc");
        assert_eq!(doc.row(1).unwrap().as_bytes(), b"de");
        assert_eq!(doc.row(2).unwrap().as_bytes(), b"f");
    }

    #[test]
    fn open_preserves_blank_lines() {
        let f = temp_file(b"a\n\nb\n");
        let doc = Document::open(f.path()).unwrap();

        assert_eq!(doc.row_count(), 3);
        assert_eq!(doc.row(1).unwrap().as_bytes(), b"");
    }

    #[test]
    fn open_empty_file_is_zero_rows() {
        let f = temp_file(b"");
        let doc = Document::open(f.path()).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.row_count(), 0);
    }

    #[test]
    fn open_keeps_non_utf8_bytes() {
        let f = temp_file(&[0xFF, 0xFE, b'\n', b'x']);
        let doc = Document::open(f.path()).unwrap();

        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.row(0).unwrap().as_bytes(), &[0xFF, 0xFE]);
        assert_eq!(doc.row(1).unwrap().as_bytes(), b"x");
    }

    #[test]
    fn open_missing_path_is_file_open_error() {
        let err = Document::open(Path::new("/nonexistent/vy-test-file")).unwrap_err();
        let Error::FileOpen { path, .. } = err;
        assert_eq!(path, Path::new("/nonexistent/vy-test-file"));
    }

    #[test]
    fn error_message_names_the_path() {
        let err = Document::open(Path::new("/nonexistent/vy-test-file")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/vy-test-file"));
    }

    // -- Accessors ----------------------------------------------------------

    #[test]
    fn empty_document() {
        let doc = Document::empty();
        assert!(doc.is_empty());
        assert!(doc.row(0).is_none());
        assert_eq!(doc.row_len(0), 0);
    }

    #[test]
    fn row_len_past_end_is_zero() {
        let doc = Document::from_rows(vec![Row::from("abc")]);
        assert_eq!(doc.row_len(0), 3);
        assert_eq!(doc.row_len(1), 0);
        assert_eq!(doc.row_len(99), 0);
    }
}
