//! Top-level facade crate for devents.
//!
//! Re-exports the core event model and the aggregator library so users can
//! depend on a single crate.

pub mod core {
    pub use devents_core::*;
}

pub mod aggregator {
    pub use devents_aggregator::*;
}
