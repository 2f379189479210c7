// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode and guaranteed restore.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, and raw fd writes. These are
// the standard POSIX interfaces for terminal control — there is no safe
// alternative. Each unsafe block is minimal and documented.
#![allow(unsafe_code)]
//
// This module owns the terminal's raw state. Entering raw mode captures
// the original termios and returns a [`RawMode`] guard; dropping the guard
// writes the snapshot back. Raw mode disables echo, canonical input,
// signal keys, and CR/NL translation, and sets `VMIN=0, VTIME=1` so a
// blocking read returns within 100 ms even with no input — which is also
// what lets the key decoder tell a lone Escape from a truncated sequence.
//
// A panic hook backs up the guard: it writes a pre-built restore sequence
// straight to fd 1, skipping Rust's stdout lock (which the panicking
// thread may still hold mid-frame), puts termios back from a global
// snapshot, and only then lets the original handler print its message —
// onto a terminal that can actually display it.

use std::io;
use std::sync::{Mutex, Once};

use crate::error::Error;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Queried once at startup; the size is assumed static for the process
/// lifetime (no resize handling).
///
/// # Errors
///
/// Returns [`Error::TerminalQuery`] if the ioctl fails or reports a
/// zero-sized window. There is no fallback size — without known
/// dimensions the viewport cannot be laid out.
#[cfg(unix)]
pub fn get_size() -> Result<Size, Error> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    if result == -1 {
        return Err(Error::TerminalQuery(io::Error::last_os_error()));
    }
    if ws.ws_col == 0 || ws.ws_row == 0 {
        return Err(Error::TerminalQuery(io::Error::other(
            "terminal reported zero size",
        )));
    }

    Ok(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
pub fn get_size() -> Result<Size, Error> {
    Err(Error::TerminalQuery(io::Error::other(
        "terminal size query unsupported on this platform",
    )))
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
///
/// The [`RawMode`] guard owns its own copy, but the panic hook can't
/// access it. This global backup — behind a [`Mutex`], not `static mut` —
/// lets the hook restore raw mode without the guard.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }
        }
    }
}

/// Screen restore sequence for emergency use: show the cursor, clear the
/// screen, home. Leaves the panic message at the top of a clean screen
/// rather than interleaved with viewer rows.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[?25h\x1b[2J\x1b[H";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// A panic in raw mode would otherwise strand the user on a broken
/// terminal: no echo, no line editing, an unreadable error message. The
/// hook pushes [`EMERGENCY_RESTORE`] out through fd 1, puts the saved
/// termios back, and hands off to the previous panic handler.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

/// Write the screen restore sequence directly to stdout's file descriptor.
///
/// Uses a raw `write(2)` rather than `io::stdout()`: if the panic fired
/// while the stdout lock was held (mid-frame flush), taking the lock
/// again would deadlock.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        use std::io::Write;
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── RawMode ────────────────────────────────────────────────────────────────

/// Scoped raw-mode guard.
///
/// [`enter`](Self::enter) captures the current termios and applies the raw
/// configuration; dropping the guard writes the snapshot back. Because the
/// guard lives on the stack of the run loop, restoration happens on every
/// exit path — normal quit, error return, or panic (via the panic hook).
///
/// # Example
///
/// ```no_run
/// use vy_term::terminal::RawMode;
///
/// let _raw = RawMode::enter()?;
/// // ... render frames, read keys ...
/// // Terminal is restored when `_raw` drops.
/// # Ok::<(), vy_term::Error>(())
/// ```
pub struct RawMode {
    /// Original termios saved before entering raw mode. `None` when stdin
    /// is not a TTY (nothing to restore — tests, piped input).
    #[cfg(unix)]
    original: Option<libc::termios>,
}

impl RawMode {
    /// Capture the terminal state and switch to raw mode.
    ///
    /// Disables echo, canonical (line-buffered) input, signal-generating
    /// keys, and CR/NL translation on input and output; sets `VMIN=0,
    /// VTIME=1` so reads return within 100 ms of idle. No-op when stdin
    /// is not a TTY.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalQuery`] if the attribute read fails, or
    /// [`Error::TerminalConfigure`] if the attribute write fails.
    #[cfg(unix)]
    pub fn enter() -> Result<Self, Error> {
        use std::os::unix::io::AsRawFd;

        // Install the panic hook (once per process).
        install_panic_hook();

        if !is_tty() {
            return Ok(Self { original: None });
        }

        let fd = io::stdin().as_raw_fd();

        let original = unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(Error::TerminalQuery(io::Error::last_os_error()));
            }
            termios
        };

        // Save to the global backup for the panic hook.
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = Some(original);
        }

        let mut termios = original;

        // Disable break-to-SIGINT, CR→NL translation, parity checking,
        // bit stripping, and output flow control.
        termios.c_iflag &=
            !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        // Disable output post-processing (NL→CRNL).
        termios.c_oflag &= !libc::OPOST;
        // 8-bit characters.
        termios.c_cflag |= libc::CS8;
        // Disable echo, canonical mode, extended input, and signal keys.
        termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

        // VMIN=0, VTIME=1: read() returns after at most 100 ms even with
        // no input. The key decoder relies on this window to distinguish
        // a bare Escape from the start of a longer sequence.
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = 1;

        unsafe {
            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(Error::TerminalConfigure(io::Error::last_os_error()));
            }
        }

        Ok(Self {
            original: Some(original),
        })
    }

    #[cfg(not(unix))]
    pub fn enter() -> Result<Self, Error> {
        install_panic_hook();
        Ok(Self {})
    }

    /// Whether raw mode is actually active (stdin was a TTY at entry).
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        #[cfg(unix)]
        {
            self.original.is_some()
        }
        #[cfg(not(unix))]
        {
            false
        }
    }
}

impl Drop for RawMode {
    /// Write back the captured termios. Best-effort: there is no way to
    /// report an error from drop, and the process is exiting anyway.
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Some(ref original) = self.original {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }

            // Clear the global backup — we've restored.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
