//! perfmodel - Analytical runtime model for multi-rank programs
//!
//! This library predicts the wall-clock runtime of a distributed program from
//! per-rank performance counters and attributes the slowest rank's time to
//! compute, cache/memory access, and communication.

pub mod cli;
pub mod counters;
pub mod error;
pub mod loader;
pub mod model;
pub mod params;
pub mod report;
