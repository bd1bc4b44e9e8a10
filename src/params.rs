//! Hardware and network calibration for the performance model
//!
//! Parameters are an immutable value handed to the model at construction.
//! Profiles can be loaded from TOML; keys absent from a file keep the
//! reference calibration below.

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Calibration values for the analytical model (all SI units)
///
/// # Example
/// ```
/// use perfmodel::params::ModelParameters;
///
/// let params = ModelParameters::default();
/// assert_eq!(params.clock_freq, 2.8e9);
/// assert!(params.validate().is_ok());
/// ```
///
/// # Example TOML
/// ```toml
/// clock_freq = 3.2e9
/// ipc = 1.5
/// send_overlap = 0.25
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParameters {
    /// Processor clock frequency (Hz)
    pub clock_freq: f64,

    /// Instructions retired per cycle
    pub ipc: f64,

    /// Time cost per cache hit (s)
    pub cache_hit_latency: f64,

    /// Time cost per memory read (s)
    pub mem_read_latency: f64,

    /// Time cost per memory write (s)
    pub mem_write_latency: f64,

    /// Time cost per communication send (s)
    pub send_latency: f64,

    /// Fraction of send latency hidden behind compute, in [0, 1]
    pub send_overlap: f64,

    /// Constant time added to every rank's total (s)
    ///
    /// Models startup/teardown the counters never see. It does not scale
    /// with `overhead_instrs`.
    pub fixed_overhead: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            clock_freq: 2.8e9,
            ipc: 1.0,
            cache_hit_latency: 5e-9,
            mem_read_latency: 60e-9,
            mem_write_latency: 60e-9,
            send_latency: 1.5e-6,
            send_overlap: 0.0,
            fixed_overhead: 0.1,
        }
    }
}

impl ModelParameters {
    /// Load a calibration profile from a TOML file and validate it
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse a calibration profile from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let params: ModelParameters = toml::from_str(content).map_err(|e| {
            ModelError::malformed(None, "params", format!("invalid TOML profile: {}", e))
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Validate configuration
    ///
    /// Frequency and IPC must be strictly positive (compute time is
    /// undefined otherwise); latencies and overhead must be non-negative.
    pub fn validate(&self) -> Result<()> {
        positive("clock_freq", self.clock_freq)?;
        positive("ipc", self.ipc)?;

        for (name, value) in [
            ("cache_hit_latency", self.cache_hit_latency),
            ("mem_read_latency", self.mem_read_latency),
            ("mem_write_latency", self.mem_write_latency),
            ("send_latency", self.send_latency),
            ("fixed_overhead", self.fixed_overhead),
        ] {
            non_negative(name, value)?;
        }

        if !(0.0..=1.0).contains(&self.send_overlap) {
            return Err(ModelError::InvalidParameter {
                name: "send_overlap",
                value: self.send_overlap,
                reason: "must be in [0, 1]",
            });
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::InvalidParameter {
            name,
            value,
            reason: "must be finite and > 0",
        });
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::InvalidParameter {
            name,
            value,
            reason: "must be finite and >= 0",
        });
    }
    Ok(())
}
