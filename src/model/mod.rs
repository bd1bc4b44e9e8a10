// Analytical Performance Model for multi-rank programs
//
// Objective: Predict wall-clock runtime from per-rank counters and attribute
// it to compute, cache/memory access, and communication.
//
// Critical-path assumption: ranks synchronize at barriers, so the run is gated
// by its slowest rank. Overall runtime is the MAX of per-rank totals, never
// the sum or mean.

mod analytical;
mod evaluate;

pub use analytical::{AnalyticalModel, CostModel, TimeDecomposition};
pub use evaluate::{evaluate, Breakdown, ModelResult, PerformanceModel, RankTime};
