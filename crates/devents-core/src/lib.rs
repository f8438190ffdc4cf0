//! devents core: the lifecycle event model and error surface shared by the
//! aggregator and by collector implementations.
//!
//! This crate defines the event contract consumed by the dispatch loop. It
//! intentionally carries no transport or runtime dependencies so collectors
//! living in other processes or crates can reuse the same types.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `DeventsError`/`Result` so the
//! aggregator process does not crash on malformed producer input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;

/// Shared result type.
pub use error::{DeventsError, Result};
pub use event::{Event, EventType};
