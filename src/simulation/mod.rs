//! Monte Carlo simulation
//!
//! Runs transmission protocols many times over a path to estimate their
//! end-to-end success rate, sweeps repeater chains of growing length, and
//! compares protocols and scenarios on the fixed topology.

pub mod analysis;
pub mod error;
pub mod monte_carlo;
pub mod simulator;
pub mod sweep;
pub mod types;

pub use analysis::{analyze_links, compare_protocols, standard_link_scenarios};
pub use error::{SimulationError, SimulationResult};
pub use monte_carlo::{estimate_success_rate, run_trials, run_trials_parallel, worker_rng};
pub use simulator::Simulator;
pub use sweep::run_sweep;
pub use types::{
    LinkReport, LinkScenario, ProtocolComparison, SimulationConfig, SimulationOutcome, SweepPoint,
    SweepReport, DEFAULT_SEED, DEFAULT_TRIALS,
};
