//! Renderer — document and cursor to a frame of terminal bytes.
//!
//! [`draw`] composes one full frame into a vy-term [`OutputBuffer`]:
//! cursor hide, home, every screen row (document slice, tilde filler, or
//! the welcome banner), a per-line erase, the final cursor reposition,
//! cursor show. The caller flushes the buffer in a single write — that
//! atomicity is what keeps redraw tear-free.
//!
//! There is no damage tracking: a frame is cheap at terminal scale (a few
//! kilobytes), so every keypress redraws everything.
//!
//! Screen-space translation is the one piece of arithmetic here: document
//! position `(cx, cy)` lands on screen at `(cx - col_offset,
//! cy - row_offset)`, which the viewport has already guaranteed to be
//! inside the window.

use std::io;

use vy_term::ansi;
use vy_term::output::OutputBuffer;
use vy_term::terminal::Size;

use crate::cursor::Cursor;
use crate::document::Document;
use crate::viewport::Viewport;

/// Banner shown mid-screen when the viewer starts with no file.
const WELCOME: &str = concat!("vy viewer -- version ", env!("CARGO_PKG_VERSION"));

/// Compose one frame into `out`.
///
/// The caller is responsible for running
/// [`Viewport::scroll_to`](crate::viewport::Viewport::scroll_to) first and
/// for flushing `out` to the terminal afterwards.
///
/// # Errors
///
/// Propagates write errors, which cannot occur for the Vec-backed
/// [`OutputBuffer`].
pub fn draw(
    out: &mut OutputBuffer,
    doc: &Document,
    cursor: Cursor,
    viewport: Viewport,
    size: Size,
) -> io::Result<()> {
    ansi::cursor_hide(out)?;
    ansi::cursor_home(out)?;

    let rows = size.rows as usize;
    let cols = size.cols as usize;

    for y in 0..rows {
        let filerow = y + viewport.row_offset;

        if let Some(row) = doc.row(filerow) {
            out.push_bytes(row.slice(viewport.col_offset, cols));
        } else if doc.is_empty() && y == rows / 3 {
            draw_welcome(out, cols);
        } else {
            out.push_byte(b'~');
        }

        ansi::clear_line_right(out)?;
        if y + 1 < rows {
            out.push_bytes(b"\r\n");
        }
    }

    // Translate the document-space cursor into the window. scroll_to has
    // already pinned it inside, so these subtractions cannot underflow
    // and the results fit the u16 screen coordinates.
    #[allow(clippy::cast_possible_truncation)]
    {
        let screen_x = (cursor.cx - viewport.col_offset) as u16;
        let screen_y = (cursor.cy - viewport.row_offset) as u16;
        ansi::cursor_to(out, screen_x, screen_y)?;
    }

    ansi::cursor_show(out)?;
    Ok(())
}

/// Centered welcome banner for the empty document, truncated to the
/// screen width. A tilde leads the padding so the row still reads as
/// past-end filler.
fn draw_welcome(out: &mut OutputBuffer, cols: usize) {
    let banner = &WELCOME.as_bytes()[..WELCOME.len().min(cols)];

    let mut padding = (cols - banner.len()) / 2;
    if padding > 0 {
        out.push_byte(b'~');
        padding -= 1;
    }
    for _ in 0..padding {
        out.push_byte(b' ');
    }
    out.push_bytes(banner);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Row;
    use pretty_assertions::assert_eq;

    const SIZE: Size = Size { cols: 80, rows: 24 };

    fn frame(doc: &Document, cursor: Cursor, viewport: Viewport, size: Size) -> Vec<u8> {
        let mut out = OutputBuffer::new();
        draw(&mut out, doc, cursor, viewport, size).unwrap();
        out.as_bytes().to_vec()
    }

    /// Split the frame body into screen lines: strip the leading
    /// hide+home and the trailing reposition+show, then split on CRLF.
    fn screen_lines(frame: &[u8]) -> Vec<Vec<u8>> {
        let s = frame
            .strip_prefix(b"\x1b[?25l\x1b[H".as_slice())
            .expect("frame must start with cursor hide + home");
        let s = s
            .strip_suffix(b"\x1b[?25h".as_slice())
            .expect("frame must end with cursor show");
        // The cursor reposition is the final escape; everything before
        // it is the row body.
        let cup = s.iter().rposition(|&b| b == 0x1B).unwrap();
        let body = &s[..cup];

        body.split(|&b| b == b'\n')
            .map(|line| {
                let line = line.strip_suffix(b"\r".as_slice()).unwrap_or(line);
                line.strip_suffix(b"\x1b[K".as_slice())
                    .expect("every row ends with erase-to-end")
                    .to_vec()
            })
            .collect()
    }

    // -- Frame envelope -----------------------------------------------------

    #[test]
    fn frame_hides_homes_then_shows() {
        let f = frame(&Document::empty(), Cursor::new(), Viewport::new(), SIZE);
        assert!(f.starts_with(b"\x1b[?25l\x1b[H"));
        assert!(f.ends_with(b"\x1b[1;1H\x1b[?25h"));
    }

    #[test]
    fn frame_has_erase_per_row_and_crlf_between() {
        let f = frame(&Document::empty(), Cursor::new(), Viewport::new(), SIZE);
        let erases = f.windows(3).filter(|w| w == b"\x1b[K").count();
        assert_eq!(erases, 24);
        let newlines = f.iter().filter(|&&b| b == b'\n').count();
        assert_eq!(newlines, 23, "no newline after the last row");
    }

    // -- Empty document -----------------------------------------------------

    #[test]
    fn empty_document_draws_banner_at_one_third() {
        let f = frame(&Document::empty(), Cursor::new(), Viewport::new(), SIZE);
        let lines = screen_lines(&f);
        assert_eq!(lines.len(), 24);

        // Row 8 (24 / 3) carries the centered banner.
        let banner_line = &lines[8];
        assert!(banner_line.starts_with(b"~"));
        let text = String::from_utf8(banner_line.clone()).unwrap();
        assert!(text.contains("vy viewer -- version"));

        // Centered: tilde plus spaces on the left.
        let pad = (80 - WELCOME.len()) / 2;
        assert!(banner_line[1..pad].iter().all(|&b| b == b' '));
        assert_eq!(banner_line.len(), pad + WELCOME.len());

        // Every other row is a lone tilde.
        for (y, line) in lines.iter().enumerate() {
            if y != 8 {
                assert_eq!(line, b"~", "row {y}");
            }
        }
    }

    #[test]
    fn banner_is_truncated_on_narrow_screens() {
        let narrow = Size { cols: 10, rows: 24 };
        let f = frame(&Document::empty(), Cursor::new(), Viewport::new(), narrow);
        let lines = screen_lines(&f);
        // Truncated to exactly the screen width, no padding fits.
        assert_eq!(lines[8], WELCOME.as_bytes()[..10].to_vec());
    }

    #[test]
    fn non_empty_document_has_no_banner() {
        let doc = Document::from_rows(vec![Row::from("x")]);
        let f = frame(&doc, Cursor::new(), Viewport::new(), SIZE);
        let lines = screen_lines(&f);
        assert_eq!(lines[8], b"~");
    }

    // -- Document rows ------------------------------------------------------

    #[test]
    fn rows_render_then_tildes_fill() {
        let doc = Document::from_rows(vec![Row::from("alpha"), Row::from("beta")]);
        let f = frame(&doc, Cursor::new(), Viewport::new(), SIZE);
        let lines = screen_lines(&f);
        assert_eq!(lines[0], b"alpha");
        assert_eq!(lines[1], b"beta");
        assert_eq!(lines[2], b"~");
    }

    #[test]
    fn row_offset_selects_the_visible_slice() {
        let doc = Document::from_rows(vec![
            Row::from("one"),
            Row::from("two"),
            Row::from("three"),
        ]);
        let vp = Viewport { row_offset: 1, col_offset: 0 };
        let f = frame(&doc, Cursor::at(0, 1), vp, SIZE);
        let lines = screen_lines(&f);
        assert_eq!(lines[0], b"two");
        assert_eq!(lines[1], b"three");
        assert_eq!(lines[2], b"~");
    }

    #[test]
    fn col_offset_clips_long_rows() {
        let doc = Document::from_rows(vec![Row::from("0123456789abcdef")]);
        let small = Size { cols: 5, rows: 2 };
        let vp = Viewport { row_offset: 0, col_offset: 3 };
        let f = frame(&doc, Cursor::at(3, 0), vp, small);
        let lines = screen_lines(&f);
        assert_eq!(lines[0], b"34567");
    }

    #[test]
    fn col_offset_past_row_end_renders_blank() {
        let doc = Document::from_rows(vec![Row::from("ab")]);
        let small = Size { cols: 5, rows: 2 };
        let vp = Viewport { row_offset: 0, col_offset: 4 };
        let f = frame(&doc, Cursor::at(4, 0), vp, small);
        let lines = screen_lines(&f);
        assert_eq!(lines[0], b"");
    }

    // -- Cursor placement ---------------------------------------------------

    #[test]
    fn cursor_is_positioned_in_screen_space() {
        let doc = Document::from_rows(vec![Row::from("hello world")]);
        let f = frame(&doc, Cursor::at(4, 0), Viewport::new(), SIZE);
        // Document (4, 0) → screen column 5, row 1 in 1-indexed CUP.
        assert!(f.ends_with(b"\x1b[1;5H\x1b[?25h"));
    }

    #[test]
    fn cursor_position_subtracts_the_offsets() {
        let doc = Document::from_rows(vec![Row::from("x"); 50]);
        let vp = Viewport { row_offset: 30, col_offset: 2 };
        let f = frame(&doc, Cursor::at(2, 33), vp, SIZE);
        // (2 - 2, 33 - 30) → screen (0, 3) → CUP 4;1.
        assert!(f.ends_with(b"\x1b[4;1H\x1b[?25h"));
    }
}
