//! Counter table loading
//!
//! Counter tables are generated without a header row: the sixteen fields of
//! [`COLUMNS`] are applied positionally. Rows may arrive in any order and are
//! returned sorted by rank.

use crate::counters::{RankRecord, COLUMNS};
use crate::error::{ModelError, Result};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Advisory about suspicious all-zero columns
///
/// These never fail a load; the model still runs on degenerate data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataQualityWarning {
    /// Every `oInstrs` value is zero
    NoOverheadInstructions,
    /// Every `rdCpts` or every `wrCpts` value is zero
    NoSamplingPercentages,
    /// `mReads` and `mWrites` both sum to zero
    MissingMemoryCounts,
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DataQualityWarning::NoOverheadInstructions => "no overhead instructions gathered",
            DataQualityWarning::NoSamplingPercentages => "no LD/ST sampling percentages specified",
            DataQualityWarning::MissingMemoryCounts => "missing memory RD/WR counts",
        };
        f.write_str(msg)
    }
}

/// Load a counter table from a file
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<RankRecord>> {
    let path = path.as_ref();
    tracing::debug!("Loading counter table from {}", path.display());
    let file = File::open(path)?;
    load_reader(file)
}

/// Load a counter table from any reader
///
/// Emits [`DataQualityWarning`]s through `tracing` before returning.
///
/// # Example
/// ```
/// use perfmodel::loader::load_reader;
///
/// let table = "1,10,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n0,20,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n";
/// let records = load_reader(table.as_bytes()).unwrap();
/// assert_eq!(records[0].rank, 0);
/// assert_eq!(records[1].instrs, 10.0);
/// ```
pub fn load_reader<R: Read>(reader: R) -> Result<Vec<RankRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (index, result) in reader.records().enumerate() {
        let row = result.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize);
            ModelError::malformed(line, "<row>", format!("failed to read row: {}", e))
        })?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);

        if row.len() != COLUMNS.len() {
            return Err(ModelError::malformed(
                Some(line),
                "<row>",
                format!("expected {} fields, found {}", COLUMNS.len(), row.len()),
            ));
        }

        let record = parse_row(&row, line)?;
        if !seen.insert(record.rank) {
            return Err(ModelError::malformed(
                Some(line),
                COLUMNS[0],
                format!("duplicate rank {}", record.rank),
            ));
        }
        records.push(record);
    }

    records.sort_by_key(|r| r.rank);
    tracing::debug!("Loaded {} rank records", records.len());

    for warning in check_data_quality(&records) {
        tracing::warn!("{}", warning);
    }

    Ok(records)
}

fn parse_row(row: &csv::StringRecord, line: usize) -> Result<RankRecord> {
    let rank = parse_rank(&row[0], line)?;

    let mut fields = [0.0; 15];
    for (slot, (column, raw)) in fields
        .iter_mut()
        .zip(COLUMNS.iter().skip(1).zip(row.iter().skip(1)))
    {
        *slot = raw.parse::<f64>().map_err(|_| {
            ModelError::malformed(Some(line), *column, format!("not a number: '{}'", raw))
        })?;
    }

    let record = RankRecord::from_fields(rank, &fields);
    record.validate().map_err(|e| match e {
        ModelError::MalformedInput {
            column, message, ..
        } => ModelError::MalformedInput {
            row: Some(line),
            column,
            message,
        },
        other => other,
    })?;
    Ok(record)
}

// Generated tables may write ranks as floats ("3.0").
fn parse_rank(raw: &str, line: usize) -> Result<u32> {
    let value = raw.parse::<f64>().map_err(|_| {
        ModelError::malformed(Some(line), COLUMNS[0], format!("not a number: '{}'", raw))
    })?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(ModelError::malformed(
            Some(line),
            COLUMNS[0],
            format!("rank must be a non-negative integer, got '{}'", raw),
        ));
    }
    Ok(value as u32)
}

/// Check a table for all-zero diagnostic columns
///
/// An empty table produces no warnings.
pub fn check_data_quality(records: &[RankRecord]) -> Vec<DataQualityWarning> {
    let mut warnings = Vec::new();
    if records.is_empty() {
        return warnings;
    }

    let all_zero = |f: fn(&RankRecord) -> f64| records.iter().all(|r| f(r) == 0.0);

    if all_zero(|r| r.overhead_instrs) {
        warnings.push(DataQualityWarning::NoOverheadInstructions);
    }
    if all_zero(|r| r.read_captures) || all_zero(|r| r.write_captures) {
        warnings.push(DataQualityWarning::NoSamplingPercentages);
    }

    let mem_reads: f64 = records.iter().map(|r| r.mem_reads).sum();
    let mem_writes: f64 = records.iter().map(|r| r.mem_writes).sum();
    if mem_reads == 0.0 && mem_writes == 0.0 {
        warnings.push(DataQualityWarning::MissingMemoryCounts);
    }

    warnings
}
