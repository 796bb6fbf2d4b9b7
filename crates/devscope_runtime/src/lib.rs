//! Session, REPL, output formatters, and CLI support for devscope.
//!
//! This crate provides:
//! - [`Session`] - One loaded trace plus selection, cursor, and view settings
//! - [`Repl`] - Interactive browser over a session
//! - [`HumanFormatter`] / [`JsonFormatter`] - View output
//! - [`init_logging`] - Subscriber setup for the binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod format;
pub mod logging;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use format::{HumanFormatter, JsonFormatter, ViewFormatter};
pub use logging::init_logging;
pub use repl::{Command, CommandError, Repl, Reply};
pub use session::Session;
