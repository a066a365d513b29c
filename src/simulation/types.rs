use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;

use super::error::{SimulationError, SimulationResult};
use crate::protocol::ProtocolKind;
use crate::reliability::{ReliabilityModel, DEFAULT_MAX_RETRIES};
use crate::topology::Path;

pub const DEFAULT_TRIALS: u64 = 1000;
pub const DEFAULT_SEED: u64 = 42;

/// Tunables of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Link and repeater failure model
    pub reliability: ReliabilityModel,

    /// Monte Carlo sample count per estimate
    pub trials: u64,

    /// Per-link retry budget of the purification protocol
    pub max_retries: u32,

    /// Seed of the random stream; equal seeds give equal results
    pub seed: u64,

    /// Worker tasks for the parallel estimator (1 = sequential)
    pub workers: usize,

    /// Repeater counts visited by the scalability sweep, ascending
    pub sweep_hubs: Vec<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reliability: ReliabilityModel::default(),
            trials: DEFAULT_TRIALS,
            max_retries: DEFAULT_MAX_RETRIES,
            seed: DEFAULT_SEED,
            workers: 1,
            sweep_hubs: (0..=10).collect(),
        }
    }
}

impl SimulationConfig {
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_reliability(mut self, reliability: ReliabilityModel) -> Self {
        self.reliability = reliability;
        self
    }

    pub fn with_sweep_hubs(mut self, hubs: Vec<usize>) -> Self {
        self.sweep_hubs = hubs;
        self
    }

    pub fn validate(&self) -> SimulationResult<()> {
        self.reliability.validate()?;
        validate_trials(self.trials)?;
        if self.max_retries == 0 {
            return Err(SimulationError::InvalidParameter(
                "max_retries must be at least 1".into(),
            ));
        }
        if self.workers == 0 {
            return Err(SimulationError::InvalidParameter(
                "workers must be at least 1".into(),
            ));
        }
        validate_hub_counts(&self.sweep_hubs)?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> SimulationResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<FsPath>) -> SimulationResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

pub(crate) fn validate_trials(trials: u64) -> SimulationResult<()> {
    if trials == 0 {
        return Err(SimulationError::InvalidParameter(
            "trials must be at least 1".into(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_hub_counts(hubs: &[usize]) -> SimulationResult<()> {
    if hubs.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(SimulationError::InvalidParameter(format!(
            "sweep hub counts must be strictly ascending, got {:?}",
            hubs
        )));
    }
    Ok(())
}

/// Aggregate of one Monte Carlo batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationOutcome {
    pub protocol: ProtocolKind,
    pub trials: u64,
    pub successes: u64,
    pub success_rate: f64,
}

impl SimulationOutcome {
    pub fn from_counts(protocol: ProtocolKind, trials: u64, successes: u64) -> Self {
        let success_rate = if trials > 0 {
            successes as f64 / trials as f64
        } else {
            0.0
        };
        Self {
            protocol,
            trials,
            successes,
            success_rate,
        }
    }

    pub fn success_percent(&self) -> f64 {
        self.success_rate * 100.0
    }

    pub fn failures(&self) -> u64 {
        self.trials - self.successes
    }
}

impl std::fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}/{} ({:.2}%)",
            self.protocol,
            self.successes,
            self.trials,
            self.success_percent()
        )
    }
}

/// One point of the scalability sweep
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SweepPoint {
    pub hub_count: usize,
    pub hop_count: usize,
    pub total_distance: f64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub run_id: uuid::Uuid,
    pub generated_at: DateTime<Utc>,
    pub protocol: ProtocolKind,
    pub trials_per_point: u64,
    pub seed: u64,
    pub reliability: ReliabilityModel,
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    pub fn to_json_pretty(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Naive versus purification on the same path and stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolComparison {
    pub path: Path,
    pub max_retries: u32,
    pub naive: SimulationOutcome,
    pub purification: SimulationOutcome,
}

impl ProtocolComparison {
    /// Improvement of purification over naive, in percentage points
    pub fn improvement_points(&self) -> f64 {
        self.purification.success_percent() - self.naive.success_percent()
    }
}

/// A named path to analyse with a given protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkScenario {
    pub name: String,
    pub path: Path,
    pub protocol: ProtocolKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkReport {
    pub name: String,
    pub path: Path,
    pub total_distance: f64,
    pub total_latency: f64,
    pub outcome: SimulationOutcome,
}
