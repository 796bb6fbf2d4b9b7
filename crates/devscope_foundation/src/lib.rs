//! Core values, events, and error types for devscope.
//!
//! This crate provides:
//! - [`Value`] - Typed scalar carried by every trace event
//! - [`Event`] - One `(time, model, kind, path, value)` record
//! - [`TransitionKind`] - Internal vs. external transition classification
//! - [`Error`] - Parse and load errors with source context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod event;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, LoadError, ParseError, Result};
pub use event::{Event, TransitionKind};
pub use value::Value;
