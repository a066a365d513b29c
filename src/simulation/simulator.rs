use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::analysis::{analyze_links, compare_protocols};
use super::error::SimulationResult;
use super::monte_carlo::{run_trials, run_trials_parallel};
use super::sweep::run_sweep;
use super::types::{
    LinkReport, LinkScenario, ProtocolComparison, SimulationConfig, SimulationOutcome, SweepPoint,
    SweepReport,
};
use crate::protocol::{Protocol, ProtocolKind};
use crate::routing::{compare_routes, shortest_path, RouteComparison, WeightKind};
use crate::topology::{Network, Path};

/// Entry point tying a validated configuration to the simulation operations
///
/// Every public operation starts from a fresh ChaCha8 stream seeded with
/// `config.seed`, so repeating a call repeats its result. The `*_with_rng`
/// variants let callers thread their own stream instead.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        info!(
            "Simulator ready: alpha={}, swap={}, trials={}, seed={}, workers={}",
            config.reliability.alpha,
            config.reliability.swap_success_probability,
            config.trials,
            config.seed,
            config.workers
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Fresh stream seeded from the configuration
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.config.seed)
    }

    /// Build a protocol; `max_retries` falls back to the configured budget
    pub fn protocol(
        &self,
        kind: ProtocolKind,
        max_retries: Option<u32>,
    ) -> SimulationResult<Protocol> {
        let retries = max_retries.unwrap_or(self.config.max_retries);
        Ok(Protocol::new(kind, self.config.reliability, retries)?)
    }

    // ============== Monte Carlo ==============

    pub fn simulate(
        &self,
        kind: ProtocolKind,
        network: &Network,
        path: &Path,
        trials: u64,
        max_retries: Option<u32>,
    ) -> SimulationResult<SimulationOutcome> {
        self.simulate_with_rng(kind, network, path, trials, max_retries, &mut self.rng())
    }

    pub fn simulate_with_rng<R: Rng + ?Sized>(
        &self,
        kind: ProtocolKind,
        network: &Network,
        path: &Path,
        trials: u64,
        max_retries: Option<u32>,
        rng: &mut R,
    ) -> SimulationResult<SimulationOutcome> {
        let protocol = self.protocol(kind, max_retries)?;
        run_trials(&protocol, network, path, trials, rng)
    }

    /// Spread the trials over `config.workers` blocking tasks
    pub async fn simulate_parallel(
        &self,
        kind: ProtocolKind,
        network: Arc<Network>,
        path: Path,
        trials: u64,
        max_retries: Option<u32>,
    ) -> SimulationResult<SimulationOutcome> {
        let protocol = self.protocol(kind, max_retries)?;
        run_trials_parallel(
            protocol,
            network,
            path,
            trials,
            self.config.seed,
            self.config.workers,
        )
        .await
    }

    // ============== Sweep ==============

    /// Naive-protocol sweep over `hub_counts`
    pub fn sweep(
        &self,
        hub_counts: &[usize],
        trials_per_point: u64,
    ) -> SimulationResult<Vec<SweepPoint>> {
        self.sweep_with(ProtocolKind::Naive, hub_counts, trials_per_point)
    }

    pub fn sweep_with(
        &self,
        kind: ProtocolKind,
        hub_counts: &[usize],
        trials_per_point: u64,
    ) -> SimulationResult<Vec<SweepPoint>> {
        let protocol = self.protocol(kind, None)?;
        run_sweep(
            &protocol,
            &self.config.reliability,
            hub_counts,
            trials_per_point,
            &mut self.rng(),
        )
    }

    /// Sweep over the configured hub counts, wrapped for export
    pub fn sweep_report(&self, kind: ProtocolKind) -> SimulationResult<SweepReport> {
        let points = self.sweep_with(kind, &self.config.sweep_hubs, self.config.trials)?;
        Ok(SweepReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            protocol: kind,
            trials_per_point: self.config.trials,
            seed: self.config.seed,
            reliability: self.config.reliability,
            points,
        })
    }

    // ============== Analysis ==============

    pub fn analyze_links(
        &self,
        network: &Network,
        scenarios: &[LinkScenario],
        trials: u64,
    ) -> SimulationResult<Vec<LinkReport>> {
        analyze_links(
            network,
            &self.config.reliability,
            scenarios,
            trials,
            self.config.max_retries,
            &mut self.rng(),
        )
    }

    pub fn compare_protocols(
        &self,
        network: &Network,
        path: &Path,
        trials: u64,
        max_retries: Option<u32>,
    ) -> SimulationResult<ProtocolComparison> {
        compare_protocols(
            network,
            &self.config.reliability,
            path,
            trials,
            max_retries.unwrap_or(self.config.max_retries),
            &mut self.rng(),
        )
    }

    // ============== Routing ==============

    pub fn route(
        &self,
        network: &Network,
        source: &str,
        destination: &str,
        weight: WeightKind,
    ) -> SimulationResult<Path> {
        Ok(shortest_path(
            network,
            &self.config.reliability,
            source,
            destination,
            weight,
        )?)
    }

    pub fn compare_routes(
        &self,
        network: &Network,
        source: &str,
        destination: &str,
    ) -> SimulationResult<RouteComparison> {
        Ok(compare_routes(
            network,
            &self.config.reliability,
            source,
            destination,
        )?)
    }
}
