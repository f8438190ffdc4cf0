//! devents aggregator library entry.
//!
//! This crate wires the config layer, label policy, counter registry,
//! metrics server, and dispatch loop into a cohesive aggregation stack. It
//! is intended to be consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod aggregator;
pub mod collector;
pub mod config;
pub mod labels;
pub mod metrics;
pub mod ops;
pub mod router;
pub mod server;
