//! Scalability sweep over repeater chains

use rand::Rng;
use tracing::info;

use super::error::SimulationResult;
use super::monte_carlo::run_trials;
use super::types::{validate_hub_counts, validate_trials, SweepPoint};
use crate::metrics::record_sweep_point;
use crate::protocol::TransmissionProtocol;
use crate::reliability::ReliabilityModel;
use crate::routing::{shortest_path, WeightKind};
use crate::topology::{build_chain_topology, CHAIN_DESTINATION, CHAIN_SOURCE};

/// Evaluate `protocol` on a fresh chain for every hub count, in order
///
/// Every point gets its own topology and its own batch of trials; nothing is
/// carried over between points. Hub counts must be strictly ascending.
pub fn run_sweep<P, R>(
    protocol: &P,
    model: &ReliabilityModel,
    hub_counts: &[usize],
    trials_per_point: u64,
    rng: &mut R,
) -> SimulationResult<Vec<SweepPoint>>
where
    P: TransmissionProtocol,
    R: Rng + ?Sized,
{
    model.validate()?;
    validate_trials(trials_per_point)?;
    validate_hub_counts(hub_counts)?;

    let mut points = Vec::with_capacity(hub_counts.len());
    for &hub_count in hub_counts {
        let network = build_chain_topology(hub_count)?;
        let path = shortest_path(
            &network,
            model,
            CHAIN_SOURCE,
            CHAIN_DESTINATION,
            WeightKind::Classical,
        )?;
        let total_distance = network.path_distance(&path)?;
        let outcome = run_trials(protocol, &network, &path, trials_per_point, rng)?;

        info!(
            "{} repeaters ({} km): {:.2}% success",
            hub_count,
            total_distance,
            outcome.success_percent()
        );
        record_sweep_point(hub_count, outcome.success_rate);

        points.push(SweepPoint {
            hub_count,
            hop_count: path.hop_count(),
            total_distance,
            success_rate: outcome.success_rate,
        });
    }

    Ok(points)
}
