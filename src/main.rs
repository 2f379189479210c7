// SPDX-License-Identifier: MIT
//
// vy — a minimal raw-terminal file viewer.
//
// This is the binary that wires together the two crates:
//
//   vy-term → raw mode, ANSI output, key decoding, output buffer
//   vy-view → document rows, cursor, viewport, renderer
//
// The Viewer struct owns all state and drives the loop. Each iteration:
//
//   scroll viewport → compose frame → flush (one write) → read one key
//   → dispatch (move cursor / quit / ignore)
//
// Ordering matters for cleanup: the document is opened *before* raw mode
// is entered, so a bad path dies on a normal terminal; the RawMode guard
// lives on run()'s stack, so every return path — quit, error, panic —
// restores the terminal before main prints anything.

use std::env;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use thiserror::Error;

use vy_term::input::{ctrl, Key, KeyReader};
use vy_term::output::OutputBuffer;
use vy_term::terminal::{get_size, RawMode, Size};
use vy_view::render;
use vy_view::{Cursor, Document, Viewport};

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Any fatal viewer failure. All variants terminate the process with
/// exit code 1 after the terminal has been restored.
#[derive(Debug, Error)]
enum ViewerError {
    #[error(transparent)]
    Terminal(#[from] vy_term::Error),
    #[error(transparent)]
    Document(#[from] vy_view::Error),
    #[error("terminal write failed: {0}")]
    Write(#[from] io::Error),
}

// ─── Viewer ─────────────────────────────────────────────────────────────────

/// What the viewer tells the loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Keep running.
    Continue,
    /// Exit the loop cleanly.
    Quit,
}

/// The quit key: Ctrl-Q.
const QUIT: u8 = ctrl(b'q');

/// All viewer state: the loaded document plus cursor, viewport, and the
/// (startup-queried, static) terminal size.
struct Viewer {
    doc: Document,
    cursor: Cursor,
    viewport: Viewport,
    size: Size,
}

impl Viewer {
    const fn new(doc: Document, size: Size) -> Self {
        Self {
            doc,
            cursor: Cursor::new(),
            viewport: Viewport::new(),
            size,
        }
    }

    /// Compose one frame into `out`: scroll the viewport to the cursor,
    /// then draw. The caller flushes.
    fn refresh(&mut self, out: &mut OutputBuffer) -> io::Result<()> {
        self.viewport.scroll_to(self.cursor, self.size);
        render::draw(out, &self.doc, self.cursor, self.viewport, self.size)
    }

    /// Dispatch one decoded key.
    fn handle_key(&mut self, key: Key) -> Action {
        match key {
            Key::Ctrl(QUIT) => Action::Quit,
            Key::Arrow(arrow) => {
                self.cursor.step(&self.doc, arrow);
                Action::Continue
            }
            // Everything else is a no-op: this viewer only navigates.
            Key::Char(_) | Key::Ctrl(_) | Key::Escape => Action::Continue,
        }
    }

    /// The blocking render/decode loop. Returns on quit.
    fn run(&mut self, keys: &mut KeyReader<impl Read>) -> Result<(), ViewerError> {
        let mut out = OutputBuffer::new();
        loop {
            self.refresh(&mut out)?;
            out.flush_stdout()?;

            let key = keys.read_key()?;
            if self.handle_key(key) == Action::Quit {
                return Ok(());
            }
        }
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn run(path: Option<&str>) -> Result<(), ViewerError> {
    // Open the document before touching the terminal: a bad path should
    // die with a plain diagnostic, not a half-configured terminal.
    let doc = match path {
        Some(path) => Document::open(Path::new(path))?,
        None => Document::empty(),
    };

    let size = get_size()?;
    let _raw = RawMode::enter()?;

    let mut keys = KeyReader::new(io::stdin());
    let mut viewer = Viewer::new(doc, size);
    let result = viewer.run(&mut keys);

    // Leave a clean screen behind on the way out, quit or error alike.
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(b"\x1b[2J\x1b[H");
    let _ = stdout.flush();

    result
    // `_raw` drops here — terminal restored on every path.
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if let Err(e) = run(args.get(1).map(String::as_str)) {
        eprintln!("vy: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vy_term::input::Arrow;
    use vy_view::Row;

    const SIZE: Size = Size { cols: 10, rows: 4 };

    fn viewer_with(lines: &[&str]) -> Viewer {
        let rows = lines.iter().map(|&l| Row::from(l)).collect();
        Viewer::new(Document::from_rows(rows), SIZE)
    }

    // ── Key dispatch ─────────────────────────────────────────────────

    #[test]
    fn ctrl_q_quits() {
        let mut v = viewer_with(&["abc"]);
        assert_eq!(v.handle_key(Key::Ctrl(ctrl(b'q'))), Action::Quit);
    }

    #[test]
    fn arrows_move_the_cursor() {
        let mut v = viewer_with(&["abc", "de"]);
        assert_eq!(v.handle_key(Key::Arrow(Arrow::Right)), Action::Continue);
        assert_eq!(v.cursor, Cursor::at(1, 0));
        assert_eq!(v.handle_key(Key::Arrow(Arrow::Down)), Action::Continue);
        assert_eq!(v.cursor, Cursor::at(1, 1));
    }

    #[test]
    fn other_keys_are_noops() {
        let mut v = viewer_with(&["abc"]);
        for key in [Key::Char(b'x'), Key::Ctrl(ctrl(b'c')), Key::Escape] {
            assert_eq!(v.handle_key(key), Action::Continue);
            assert_eq!(v.cursor, Cursor::new());
        }
    }

    #[test]
    fn ctrl_c_does_not_quit() {
        // ISIG is disabled in raw mode; Ctrl-C must be an ordinary no-op.
        let mut v = viewer_with(&["abc"]);
        assert_eq!(v.handle_key(Key::Ctrl(0x03)), Action::Continue);
    }

    // ── Loop behavior ────────────────────────────────────────────────

    #[test]
    fn run_consumes_keys_until_quit() {
        let mut v = viewer_with(&["abc", "de", "f"]);
        // Down, Down, Right, then Ctrl-Q. Trailing bytes stay unread.
        let bytes = b"\x1b[B\x1b[B\x1b[C\x11zzz".to_vec();
        let mut keys = KeyReader::new(io::Cursor::new(bytes));

        v.run(&mut keys).unwrap();
        assert_eq!(v.cursor, Cursor::at(1, 2));
    }

    #[test]
    fn refresh_scrolls_viewport_to_cursor() {
        let mut v = viewer_with(&["a", "b", "c", "d", "e", "f"]);
        v.cursor = Cursor::at(0, 5);

        let mut out = OutputBuffer::new();
        v.refresh(&mut out).unwrap();

        // 4 screen rows, cursor on document row 5 → top row is 2.
        assert_eq!(v.viewport.row_offset, 2);
        assert!(!out.is_empty());
    }

    #[test]
    fn refresh_after_moves_keeps_cursor_in_window() {
        let mut v = viewer_with(&["0123456789abcdef", "x"]);
        let mut out = OutputBuffer::new();

        for _ in 0..14 {
            v.handle_key(Key::Arrow(Arrow::Right));
            v.refresh(&mut out).unwrap();
            out.clear();

            let cx = v.cursor.cx;
            let off = v.viewport.col_offset;
            assert!(off <= cx && cx < off + SIZE.cols as usize);
        }
    }
}
