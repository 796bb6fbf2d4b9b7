//! Attribute flattening, trace loading, and the trace store for devscope.
//!
//! This crate provides:
//! - [`AttributeNode`] - One node of a nested state snapshot
//! - [`Flattener`] - Turns a snapshot into dotted-path scalar entries
//! - [`TraceLoader`] - Reads an XML trace into time-sorted [`Event`]s
//! - [`TraceStore`] - Read-only series queries over a loaded trace
//! - [`Hierarchy`] - Selection tree built from dot-delimited names
//!
//! [`Event`]: devscope_foundation::Event

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attribute;
pub mod flatten;
pub mod hierarchy;
pub mod loader;
pub mod store;

pub use attribute::{AttributeNode, AttributeValue, PRIMARY_CATEGORY};
pub use flatten::{FlatState, Flattener};
pub use hierarchy::{Hierarchy, HierarchyNode};
pub use loader::{LoaderConfig, MAX_NESTING_DEPTH, TraceLoader, TraceRecord};
pub use store::{Series, TraceStore};
