// SPDX-License-Identifier: MIT
//
// Terminal error taxonomy.
//
// Three failure kinds, all unrecoverable: the viewer either has a working
// raw terminal or it does not run. The benign VTIME idle timeout is *not*
// an error — the key decoder retries on it internally.

use std::io;

use thiserror::Error;

/// A fatal terminal-layer failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Querying terminal state failed (attribute read or size ioctl).
    #[error("failed to query terminal attributes: {0}")]
    TerminalQuery(#[source] io::Error),

    /// Writing the raw-mode configuration failed.
    #[error("failed to configure terminal: {0}")]
    TerminalConfigure(#[source] io::Error),

    /// Reading from the input stream failed (not the idle timeout).
    #[error("failed to read input: {0}")]
    InputRead(#[source] io::Error),
}

// ─── Tests ───────────────────────────────────────────────────────────────────
