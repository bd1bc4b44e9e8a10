//! Report rendering for model results
//!
//! Text mirrors the console summary analysts already read; JSON serializes
//! the whole result; CSV emits one row per rank for spreadsheets.

use crate::counters::{RankRecord, COLUMNS};
use crate::model::ModelResult;

/// Render the sorted record table followed by a separator line
pub fn format_records(records: &[RankRecord]) -> String {
    let mut output = String::new();
    output.push_str(&COLUMNS.join(","));
    output.push('\n');

    for record in records {
        let mut fields = vec![record.rank.to_string()];
        fields.extend(record.counters().iter().map(|(_, v)| v.to_string()));
        output.push_str(&fields.join(","));
        output.push('\n');
    }

    output.push_str(&"-".repeat(40));
    output.push('\n');
    output
}

/// Render the runtime summary
///
/// The overhead share is printed after the three components so the
/// percentages add up to 100%.
///
/// # Example
/// ```
/// use perfmodel::counters::RankRecord;
/// use perfmodel::model::evaluate;
/// use perfmodel::params::ModelParameters;
/// use perfmodel::report::format_text;
///
/// let records = vec![RankRecord { instrs: 2.8e9, ..RankRecord::new(0) }];
/// let result = evaluate(&records, &ModelParameters::default()).unwrap();
/// let text = format_text(&result);
/// assert!(text.starts_with("Total execution time: 1.100000\n"));
/// ```
pub fn format_text(result: &ModelResult) -> String {
    format!(
        "Total execution time: {:.6}\nBreakdown: {} [overhead: {:.2}%]\nBottleneck rank: {}\n",
        result.overall_runtime,
        result.breakdown,
        result.overhead_share * 100.0,
        result.bottleneck_rank
    )
}

/// Render the full result as pretty JSON
pub fn format_json(result: &ModelResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Render per-rank predicted times as CSV
pub fn format_csv(result: &ModelResult) -> String {
    let mut output = String::from("rank,compute,cache_and_mem,communication,total\n");
    for rank in &result.ranks {
        let d = &rank.decomposition;
        output.push_str(&format!(
            "{},{:e},{:e},{:e},{:e}\n",
            rank.rank, d.compute, d.cache_and_mem, d.communication, rank.total
        ));
    }
    output
}
