// Aggregation of per-rank times into one predicted runtime
//
// overall_runtime = max over ranks of (decomposition + fixed overhead).
// The breakdown reports the bottleneck rank's components as fractions of
// that maximum.

use super::analytical::{AnalyticalModel, CostModel, TimeDecomposition};
use crate::counters::RankRecord;
use crate::error::{ModelError, Result};
use crate::params::ModelParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted time of one rank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankTime {
    pub rank: u32,
    pub decomposition: TimeDecomposition,
    /// decomposition sum + fixed overhead (seconds)
    pub total: f64,
}

/// Bottleneck rank's components as fractions of overall runtime
///
/// Serializes as a mapping keyed `compute`, `cacheAndMem`, `communication`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub compute: f64,
    pub cache_and_mem: f64,
    pub communication: f64,
}

impl Breakdown {
    pub const COMPONENTS: [&'static str; 3] = ["compute", "cacheAndMem", "communication"];

    /// `(component name, fraction)` pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        Self::COMPONENTS
            .into_iter()
            .zip([self.compute, self.cache_and_mem, self.communication])
    }

    /// Sum of the three fractions (excludes the overhead share)
    pub fn total(&self) -> f64 {
        self.compute + self.cache_and_mem + self.communication
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, fraction) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "[{}: {:.2}%]", name, fraction * 100.0)?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of one model evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    /// Predicted wall-clock runtime (seconds), the slowest rank's total
    pub overall_runtime: f64,

    /// Rank achieving the maximum total (lowest rank on ties)
    pub bottleneck_rank: u32,

    pub breakdown: Breakdown,

    /// fixed overhead / overall runtime
    pub overhead_share: f64,

    /// Every rank's predicted time, ascending by rank
    pub ranks: Vec<RankTime>,
}

/// Applies a [`CostModel`] to every rank and aggregates under the
/// critical-path assumption
///
/// # Example
/// ```
/// use perfmodel::counters::RankRecord;
/// use perfmodel::model::{AnalyticalModel, PerformanceModel};
/// use perfmodel::params::ModelParameters;
///
/// let params = ModelParameters { fixed_overhead: 0.0, ..Default::default() };
/// let model = PerformanceModel::new(AnalyticalModel::new(params).unwrap());
/// let records = vec![
///     RankRecord { instrs: 2.8e9, ..RankRecord::new(0) },
///     RankRecord { instrs: 5.6e9, ..RankRecord::new(1) },
/// ];
///
/// let result = model.evaluate(&records).unwrap();
/// assert_eq!(result.overall_runtime, 2.0);
/// assert_eq!(result.bottleneck_rank, 1);
/// assert_eq!(result.breakdown.compute, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PerformanceModel<M: CostModel> {
    model: M,
}

impl<M: CostModel> PerformanceModel<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn cost_model(&self) -> &M {
        &self.model
    }

    /// Evaluate the model over a set of rank records
    ///
    /// Records may be in any order; they are evaluated in ascending rank
    /// order so the bottleneck tie-break is stable.
    ///
    /// When the overall runtime is exactly zero (zero overhead and all-zero
    /// counters) the breakdown is all zeros rather than NaN.
    ///
    /// # Errors
    /// - `EmptyInput` if `records` is empty
    /// - `MalformedInput` on negative/non-finite counters, duplicate ranks,
    ///   or a rank whose predicted time overflows to infinity
    pub fn evaluate(&self, records: &[RankRecord]) -> Result<ModelResult> {
        if records.is_empty() {
            return Err(ModelError::EmptyInput);
        }

        for record in records {
            record.validate()?;
        }

        let mut ordered: Vec<&RankRecord> = records.iter().collect();
        ordered.sort_by_key(|r| r.rank);
        if let Some(pair) = ordered.windows(2).find(|w| w[0].rank == w[1].rank) {
            return Err(ModelError::malformed(
                None,
                "rank",
                format!("duplicate rank {}", pair[0].rank),
            ));
        }

        let overhead = self.model.overhead();
        let ranks: Vec<RankTime> = ordered
            .iter()
            .map(|record| {
                let decomposition = self.model.decompose(record);
                let total = decomposition.sum() + overhead;
                tracing::debug!(
                    "rank {}: compute={:e}s cache_and_mem={:e}s communication={:e}s total={:e}s",
                    record.rank,
                    decomposition.compute,
                    decomposition.cache_and_mem,
                    decomposition.communication,
                    total
                );
                RankTime {
                    rank: record.rank,
                    decomposition,
                    total,
                }
            })
            .collect();

        // Finite counters can still overflow once multiplied by latencies
        if let Some(overflow) = ranks.iter().find(|r| !r.total.is_finite()) {
            return Err(ModelError::malformed(
                None,
                "<total>",
                format!(
                    "rank {}: predicted time overflows ({})",
                    overflow.rank, overflow.total
                ),
            ));
        }

        // First maximum wins: strict comparison keeps the lowest rank on ties
        let mut bottleneck = &ranks[0];
        for candidate in &ranks[1..] {
            if candidate.total > bottleneck.total {
                bottleneck = candidate;
            }
        }

        let overall_runtime = bottleneck.total;
        let (breakdown, overhead_share) = if overall_runtime == 0.0 {
            (Breakdown::default(), 0.0)
        } else {
            let d = &bottleneck.decomposition;
            (
                Breakdown {
                    compute: d.compute / overall_runtime,
                    cache_and_mem: d.cache_and_mem / overall_runtime,
                    communication: d.communication / overall_runtime,
                },
                overhead / overall_runtime,
            )
        };

        tracing::debug!(
            "{} model: overall runtime {}s, bottleneck rank {} of {}",
            self.model.name(),
            overall_runtime,
            bottleneck.rank,
            ranks.len()
        );

        Ok(ModelResult {
            overall_runtime,
            bottleneck_rank: bottleneck.rank,
            breakdown,
            overhead_share,
            ranks,
        })
    }
}

/// Evaluate the analytical model with the given calibration
///
/// # Errors
/// `InvalidParameter` for bad calibration, otherwise as
/// [`PerformanceModel::evaluate`].
pub fn evaluate(records: &[RankRecord], params: &ModelParameters) -> Result<ModelResult> {
    PerformanceModel::new(AnalyticalModel::new(*params)?).evaluate(records)
}
