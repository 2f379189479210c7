// SPDX-License-Identifier: MIT
//
// Terminal input decoding.
//
// Turns raw stdin bytes into logical key events: printable characters,
// control characters, arrow keys, and Escape. The decoder is synchronous
// and blocking — one key in flight at a time, no state across calls.
//
// # The Escape ambiguity
//
// A bare ESC byte (0x1B) could be either a standalone Escape keypress or
// the start of a multi-byte sequence like `ESC [ A` (cursor up). Raw mode
// sets `VMIN=0, VTIME=1`, so a read with no pending bytes returns empty
// within 100 ms. After seeing ESC we attempt exactly two more single-byte
// reads: if either comes back empty, the user pressed Escape; if they
// spell `[A`..`[D`, it's an arrow; anything else is an unrecognized
// sequence and resolves to Escape rather than an error.
//
// The decoder is generic over `io::Read` so tests can feed byte slices;
// the binary instantiates it over locked stdin.

use std::io::{self, Read};

use crate::error::Error;

// ─── Key Events ─────────────────────────────────────────────────────────────

/// A decoded key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable byte (0x20..=0x7E and high bytes).
    Char(u8),
    /// A terminal control code (< 0x20, or DEL 0x7F).
    Ctrl(u8),
    /// A cursor key.
    Arrow(Arrow),
    /// The Escape key (also the sink for unrecognized escape sequences).
    Escape,
}

/// Cursor key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// The control code produced by Ctrl + a letter: bits 5-7 cleared.
///
/// `ctrl(b'q')` is 0x11 — the viewer's quit key.
#[inline]
#[must_use]
pub const fn ctrl(ch: u8) -> u8 {
    ch & 0x1F
}

// ─── KeyReader ──────────────────────────────────────────────────────────────

/// Blocking key decoder over a raw byte stream.
///
/// [`read_key`](Self::read_key) blocks until one full key event is
/// available. Empty reads (the VTIME idle timeout) are retried internally
/// for the first byte of an event; during escape-sequence resolution an
/// empty read is meaningful and terminates the sequence instead.
pub struct KeyReader<R> {
    source: R,
}

impl<R: Read> KeyReader<R> {
    /// Wrap a raw byte source.
    pub const fn new(source: R) -> Self {
        Self { source }
    }

    /// Decode one key event, blocking until input arrives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputRead`] if the underlying read fails for any
    /// reason other than interruption or the idle timeout.
    pub fn read_key(&mut self) -> Result<Key, Error> {
        let byte = loop {
            match self.read_byte()? {
                Some(b) => break b,
                // Idle timeout — nothing typed yet. Try again.
                None => continue,
            }
        };

        if byte == 0x1B {
            return self.read_escape_sequence();
        }

        Ok(classify(byte))
    }

    /// Resolve the bytes following an ESC.
    ///
    /// Exactly two single-attempt reads: an empty result at either step
    /// means the sequence ended (bare Escape, or a truncated sequence we
    /// treat the same way).
    fn read_escape_sequence(&mut self) -> Result<Key, Error> {
        let Some(first) = self.read_byte()? else {
            return Ok(Key::Escape);
        };
        let Some(second) = self.read_byte()? else {
            return Ok(Key::Escape);
        };

        if first == b'[' {
            let arrow = match second {
                b'A' => Some(Arrow::Up),
                b'B' => Some(Arrow::Down),
                b'C' => Some(Arrow::Right),
                b'D' => Some(Arrow::Left),
                _ => None,
            };
            if let Some(arrow) = arrow {
                return Ok(Key::Arrow(arrow));
            }
        }

        // Unrecognized sequence — dropped, not error-reported.
        Ok(Key::Escape)
    }

    /// Read a single byte. `Ok(None)` means the read returned no data
    /// (VTIME expiry or end of stream).
    fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e)
                    if e.kind() == io::ErrorKind::Interrupted
                        || e.kind() == io::ErrorKind::WouldBlock =>
                {
                    continue;
                }
                Err(e) => return Err(Error::InputRead(e)),
            }
        }
    }
}

/// Classify a single non-escape byte.
const fn classify(byte: u8) -> Key {
    if byte < 0x20 || byte == 0x7F {
        Key::Ctrl(byte)
    } else {
        Key::Char(byte)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
