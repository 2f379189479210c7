//! vy-view — document layer for the vy file viewer.
//!
//! Rows and the document buffer, cursor movement in document space,
//! viewport scrolling, and the screen renderer. Everything here is pure
//! in-memory computation; the terminal itself is vy-term's business.

pub mod cursor;
pub mod document;
pub mod render;
pub mod viewport;

pub use cursor::Cursor;
pub use document::{Document, Error, Row};
pub use viewport::Viewport;
