//! termpad: a screen-oriented text editor for character-cell terminals.
//!
//! The crate is split the way data flows through the editor: bytes from the
//! [`terminal`] are decoded into [`keys`], dispatched by the [`editor`] onto the
//! [`document`] and its [`row`]s, re-highlighted by [`syntax`] and finally
//! composed into a frame by [`render`].

pub mod cli;
pub mod config;
pub mod document;
pub mod editor;
pub mod keys;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod row;
pub mod search;
pub mod syntax;
pub mod terminal;

use simple_error::SimpleError;

pub type Result<T> = std::result::Result<T, SimpleError>;

pub use editor::{Editor, KeyOutcome};
pub use terminal::Terminal;
