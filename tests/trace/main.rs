//! Integration tests for the trace layer.
//!
//! Covers XML loading, attribute flattening, the time-sorted store, and the
//! selection hierarchies built from it.

mod flattening;
mod hierarchy;
mod loading;
mod store;
