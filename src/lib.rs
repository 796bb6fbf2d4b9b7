//! devscope - Trace inspector for DEVS simulations
//!
//! This crate re-exports all layers of devscope for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: devscope_runtime    - Session, REPL, formatters, CLI
//! Layer 2: devscope_view       - Cursor, windowing, step functions, ticks
//! Layer 1: devscope_trace      - XML loading, flattening, event store
//! Layer 0: devscope_foundation - Core types (Value, Event, Error)
//! ```

pub use devscope_foundation as foundation;
pub use devscope_runtime as runtime;
pub use devscope_trace as trace;
pub use devscope_view as view;
