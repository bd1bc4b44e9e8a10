//! Per-rank performance counter records

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};

/// Positional column names of a counter table, in field order
pub const COLUMNS: [&str; 16] = [
    "rank",
    "instrs",
    "oInstrs",
    "sends",
    "rds",
    "rdCpts",
    "rdCptPct",
    "wrs",
    "wrCpts",
    "wrCptPct",
    "cHits",
    "cMisses",
    "mReads",
    "mWrites",
    "fullDumps",
    "partDumps",
];

/// Counters sampled from one rank of a program run
///
/// Only `instrs`, `sends`, `cache_hits`, `mem_reads` and `mem_writes` feed
/// the time model; the rest are carried for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RankRecord {
    pub rank: u32,
    /// Retired instructions on the critical path
    pub instrs: f64,
    /// Instructions attributed to runtime/framework overhead
    pub overhead_instrs: f64,
    /// Communication send operations issued
    pub sends: f64,
    pub reads: f64,
    pub read_captures: f64,
    pub read_capture_pct: f64,
    pub writes: f64,
    pub write_captures: f64,
    pub write_capture_pct: f64,
    pub cache_hits: f64,
    pub cache_misses: f64,
    pub mem_reads: f64,
    pub mem_writes: f64,
    pub full_dumps: f64,
    pub part_dumps: f64,
}

impl RankRecord {
    /// Create a record with every counter zeroed
    pub fn new(rank: u32) -> Self {
        Self {
            rank,
            ..Default::default()
        }
    }

    /// Build a record from the fifteen counter fields following `rank`,
    /// in [`COLUMNS`] order
    pub fn from_fields(rank: u32, fields: &[f64; 15]) -> Self {
        Self {
            rank,
            instrs: fields[0],
            overhead_instrs: fields[1],
            sends: fields[2],
            reads: fields[3],
            read_captures: fields[4],
            read_capture_pct: fields[5],
            writes: fields[6],
            write_captures: fields[7],
            write_capture_pct: fields[8],
            cache_hits: fields[9],
            cache_misses: fields[10],
            mem_reads: fields[11],
            mem_writes: fields[12],
            full_dumps: fields[13],
            part_dumps: fields[14],
        }
    }

    /// Counter values paired with their column names, in [`COLUMNS`] order
    /// (excluding `rank`)
    pub fn counters(&self) -> [(&'static str, f64); 15] {
        [
            (COLUMNS[1], self.instrs),
            (COLUMNS[2], self.overhead_instrs),
            (COLUMNS[3], self.sends),
            (COLUMNS[4], self.reads),
            (COLUMNS[5], self.read_captures),
            (COLUMNS[6], self.read_capture_pct),
            (COLUMNS[7], self.writes),
            (COLUMNS[8], self.write_captures),
            (COLUMNS[9], self.write_capture_pct),
            (COLUMNS[10], self.cache_hits),
            (COLUMNS[11], self.cache_misses),
            (COLUMNS[12], self.mem_reads),
            (COLUMNS[13], self.mem_writes),
            (COLUMNS[14], self.full_dumps),
            (COLUMNS[15], self.part_dumps),
        ]
    }

    /// Reject negative or non-finite counters
    ///
    /// Bad instrumentation data is never clamped to zero.
    pub fn validate(&self) -> Result<()> {
        for (column, value) in self.counters() {
            if !value.is_finite() {
                return Err(ModelError::malformed(
                    None,
                    column,
                    format!("rank {}: non-finite value {}", self.rank, value),
                ));
            }
            if value < 0.0 {
                return Err(ModelError::malformed(
                    None,
                    column,
                    format!("rank {}: negative value {}", self.rank, value),
                ));
            }
        }
        Ok(())
    }
}
