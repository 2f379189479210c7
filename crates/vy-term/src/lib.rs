// SPDX-License-Identifier: MIT
//
// vy-term — Terminal layer for vy.
//
// Direct terminal control for a raw-mode file viewer: termios raw-mode
// lifecycle with guaranteed restore, ANSI escape generation, a blocking
// key decoder, and a frame output buffer flushed in a single write.
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm) in favor of direct terminal control via ANSI escape
// sequences and raw termios. Every byte sent to the terminal is
// accounted for.

pub mod ansi;
pub mod error;
pub mod input;
pub mod output;
pub mod terminal;

pub use error::Error;
