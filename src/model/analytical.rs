// Per-rank time decomposition
//
// Each rank's predicted time is a pure function of its own counters and the
// calibration parameters. No rank depends on another.

use crate::counters::RankRecord;
use crate::error::Result;
use crate::params::ModelParameters;
use serde::{Deserialize, Serialize};

/// Predicted time of one rank split by cause (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDecomposition {
    pub compute: f64,
    pub cache_and_mem: f64,
    pub communication: f64,
}

impl TimeDecomposition {
    /// Sum of the three components (excludes fixed overhead)
    pub fn sum(&self) -> f64 {
        self.compute + self.cache_and_mem + self.communication
    }
}

/// A strategy mapping one rank's counters to predicted time
///
/// Alternative calibrations or formulas plug in here; aggregation across
/// ranks lives in [`PerformanceModel`](super::PerformanceModel).
pub trait CostModel {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Split one rank's predicted time into its three components
    fn decompose(&self, record: &RankRecord) -> TimeDecomposition;

    /// Constant time added once to every rank's total
    fn overhead(&self) -> f64;
}

/// The basic analytical model: instructions over throughput, per-event
/// latencies for cache and memory, and partially overlapped sends
///
/// # Example
/// ```
/// use perfmodel::counters::RankRecord;
/// use perfmodel::model::{AnalyticalModel, CostModel};
/// use perfmodel::params::ModelParameters;
///
/// let model = AnalyticalModel::new(ModelParameters::default()).unwrap();
/// let record = RankRecord { instrs: 2.8e9, ..RankRecord::new(0) };
/// assert_eq!(model.t_compute(&record), 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AnalyticalModel {
    params: ModelParameters,
}

impl AnalyticalModel {
    /// Create a model from validated parameters
    ///
    /// # Errors
    /// Returns `InvalidParameter` when IPC or clock frequency is not
    /// positive, a latency is negative, or send overlap is outside [0, 1].
    pub fn new(params: ModelParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn t_compute(&self, record: &RankRecord) -> f64 {
        (record.instrs / self.params.ipc) / self.params.clock_freq
    }

    pub fn t_cache_and_mem(&self, record: &RankRecord) -> f64 {
        record.cache_hits * self.params.cache_hit_latency
            + record.mem_reads * self.params.mem_read_latency
            + record.mem_writes * self.params.mem_write_latency
    }

    pub fn t_communication(&self, record: &RankRecord) -> f64 {
        (1.0 - self.params.send_overlap) * record.sends * self.params.send_latency
    }
}

impl CostModel for AnalyticalModel {
    fn name(&self) -> &'static str {
        "analytical"
    }

    fn decompose(&self, record: &RankRecord) -> TimeDecomposition {
        TimeDecomposition {
            compute: self.t_compute(record),
            cache_and_mem: self.t_cache_and_mem(record),
            communication: self.t_communication(record),
        }
    }

    fn overhead(&self) -> f64 {
        self.params.fixed_overhead
    }
}
