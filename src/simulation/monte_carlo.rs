//! Monte Carlo estimation of end-to-end success rates
//!
//! The sequential estimator consumes a caller-supplied stream. The parallel
//! estimator gives every worker its own ChaCha8 stream (shared seed, stream
//! id = worker index) and a fixed share of the trials, so a given
//! `(seed, workers, trials)` always yields the same count.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::SimulationResult;
use super::types::{validate_trials, SimulationOutcome};
use crate::metrics::BatchTimer;
use crate::protocol::{Protocol, ProtocolKind, TransmissionProtocol};
use crate::topology::{Network, Path, ResolvedPath};

/// Run `trials` independent transfers of `protocol` over `path`
///
/// The trial count and the path are checked before the first draw, so a
/// rejected call leaves `rng` untouched.
pub fn run_trials<P, R>(
    protocol: &P,
    network: &Network,
    path: &Path,
    trials: u64,
    rng: &mut R,
) -> SimulationResult<SimulationOutcome>
where
    P: TransmissionProtocol,
    R: Rng + ?Sized,
{
    validate_trials(trials)?;
    let resolved = network.resolve(path)?;
    warn_on_path_mismatch(protocol.kind(), &resolved);

    let timer = BatchTimer::start(protocol.kind().as_str());
    let successes = count_successes(protocol, &resolved, trials, rng);
    timer.finish(trials, successes);

    let outcome = SimulationOutcome::from_counts(protocol.kind(), trials, successes);
    debug!("{} over {}", outcome, path);
    Ok(outcome)
}

/// Fraction of `trials` transfers that succeeded
pub fn estimate_success_rate<P, R>(
    protocol: &P,
    network: &Network,
    path: &Path,
    trials: u64,
    rng: &mut R,
) -> SimulationResult<f64>
where
    P: TransmissionProtocol,
    R: Rng + ?Sized,
{
    Ok(run_trials(protocol, network, path, trials, rng)?.success_rate)
}

/// Parallel variant of [`run_trials`] over blocking worker tasks
pub async fn run_trials_parallel(
    protocol: Protocol,
    network: Arc<Network>,
    path: Path,
    trials: u64,
    seed: u64,
    workers: usize,
) -> SimulationResult<SimulationOutcome> {
    use futures::stream::{self, StreamExt};

    validate_trials(trials)?;
    {
        let resolved = network.resolve(&path)?;
        warn_on_path_mismatch(protocol.kind(), &resolved);
    }

    let shares = partition_trials(trials, workers);
    let successes = Arc::new(AtomicU64::new(0));
    let path = Arc::new(path);
    let timer = BatchTimer::start(protocol.kind().as_str());

    let results: Vec<_> = stream::iter(shares.into_iter().enumerate())
        .map(|(worker, share)| {
            let network = Arc::clone(&network);
            let path = Arc::clone(&path);
            let successes = Arc::clone(&successes);
            tokio::task::spawn_blocking(move || -> SimulationResult<()> {
                let resolved = network.resolve(&path)?;
                let mut rng = worker_rng(seed, worker);
                let hits = count_successes(&protocol, &resolved, share, &mut rng);
                successes.fetch_add(hits, Ordering::Relaxed);
                Ok(())
            })
        })
        .buffer_unordered(num_cpus::get())
        .collect()
        .await;

    for result in results {
        result??;
    }

    let successes = successes.load(Ordering::Acquire);
    timer.finish(trials, successes);

    let outcome = SimulationOutcome::from_counts(protocol.kind(), trials, successes);
    debug!("{} over {} ({} workers)", outcome, path, workers);
    Ok(outcome)
}

/// Random stream of one parallel worker
pub fn worker_rng(seed: u64, worker: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(worker as u64);
    rng
}

/// Split `trials` into at most `workers` non-empty shares
///
/// Earlier workers take the remainder, one trial each.
pub(crate) fn partition_trials(trials: u64, workers: usize) -> Vec<u64> {
    let workers = (workers.max(1) as u64).min(trials.max(1));
    let base = trials / workers;
    let extra = trials % workers;
    (0..workers)
        .map(|i| base + u64::from(i < extra))
        .filter(|share| *share > 0)
        .collect()
}

fn count_successes<P, R>(protocol: &P, path: &ResolvedPath<'_>, trials: u64, rng: &mut R) -> u64
where
    P: TransmissionProtocol,
    R: Rng + ?Sized,
{
    (0..trials).filter(|_| protocol.attempt(path, rng)).count() as u64
}

/// Why `path` does not suit a protocol of `kind`, if it does not
fn path_mismatch(kind: ProtocolKind, path: &ResolvedPath<'_>) -> Option<&'static str> {
    match kind {
        ProtocolKind::Classical if !path.is_all_classical() => {
            Some("includes quantum nodes; classical forwarding models classical-only paths")
        }
        ProtocolKind::Naive | ProtocolKind::Purification if path.has_classical_relay() => {
            Some("relays through a classical node and cannot succeed")
        }
        _ => None,
    }
}

fn warn_on_path_mismatch(kind: ProtocolKind, path: &ResolvedPath<'_>) {
    if let Some(reason) = path_mismatch(kind, path) {
        warn!("{} transfer over {} {}", kind, path.path(), reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::test_support::{line_network, CountingRng};
    use crate::protocol::NaiveProtocol;
    use crate::reliability::ReliabilityModel;

    fn line_path() -> Path {
        Path::new(["a", "b", "c", "d"]).unwrap()
    }

    #[test]
    fn test_zero_trials_rejected_without_draws() {
        let network = line_network();
        let protocol = NaiveProtocol::new(ReliabilityModel::default()).unwrap();
        let mut rng = CountingRng::low();

        let err = run_trials(&protocol, &network, &line_path(), 0, &mut rng).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_invalid_path_rejected_without_draws() {
        let network = line_network();
        let protocol = NaiveProtocol::new(ReliabilityModel::default()).unwrap();
        let mut rng = CountingRng::low();

        let path = Path::new(["a", "c"]).unwrap();
        let err = run_trials(&protocol, &network, &path, 10, &mut rng).unwrap_err();
        assert!(err.is_invalid_path());

        let path = Path::new(["a", "ghost"]).unwrap();
        let err = run_trials(&protocol, &network, &path, 10, &mut rng).unwrap_err();
        assert!(err.is_unknown_node());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_counts_with_constant_rng() {
        let network = line_network();
        let protocol = NaiveProtocol::new(ReliabilityModel::default()).unwrap();

        // Every loss event fires: nothing gets through
        let outcome =
            run_trials(&protocol, &network, &line_path(), 25, &mut CountingRng::low()).unwrap();
        assert_eq!(outcome.successes, 0);

        // No loss fires on a single hop without swaps
        let rate = estimate_success_rate(
            &protocol,
            &network,
            &Path::new(["a", "b"]).unwrap(),
            25,
            &mut CountingRng::high(),
        )
        .unwrap();
        assert_eq!(rate, 1.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let network = line_network();
        let protocol = NaiveProtocol::new(ReliabilityModel::default()).unwrap();

        let first = run_trials(
            &protocol,
            &network,
            &line_path(),
            1000,
            &mut ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap();
        let second = run_trials(
            &protocol,
            &network,
            &line_path(),
            1000,
            &mut ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_path_mismatch() {
        let network = crate::topology::build_fixed_topology().unwrap();
        let classical = Path::new(["C_Node_E", "C_Node_C", "C_Node_D"]).unwrap();
        let quantum = Path::new(["Q_Node_1", "Q_Hub_A", "Q_Node_2"]).unwrap();
        let relayed = Path::new(["Q_Node_1", "Q_Hub_A", "C_Node_A", "C_Node_C"]).unwrap();

        let classical = network.resolve(&classical).unwrap();
        let quantum = network.resolve(&quantum).unwrap();
        let relayed = network.resolve(&relayed).unwrap();

        assert!(path_mismatch(ProtocolKind::Classical, &classical).is_none());
        assert!(path_mismatch(ProtocolKind::Classical, &quantum).is_some());
        assert!(path_mismatch(ProtocolKind::Naive, &quantum).is_none());
        assert!(path_mismatch(ProtocolKind::Purification, &relayed).is_some());
        assert!(path_mismatch(ProtocolKind::Naive, &classical).is_some());
    }

    #[test]
    fn test_partition_trials() {
        assert_eq!(partition_trials(10, 3), vec![4, 3, 3]);
        assert_eq!(partition_trials(2, 8), vec![1, 1]);
        assert_eq!(partition_trials(7, 1), vec![7]);
        assert_eq!(partition_trials(9, 0), vec![9]);
        assert_eq!(partition_trials(1000, 4).iter().sum::<u64>(), 1000);
    }

    #[test]
    fn test_worker_streams_differ() {
        let mut first = worker_rng(1, 0);
        let mut second = worker_rng(1, 1);
        let a: Vec<u64> = (0..4).map(|_| first.gen()).collect();
        let b: Vec<u64> = (0..4).map(|_| second.gen()).collect();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_parallel_is_reproducible() {
        let network = Arc::new(line_network());
        let protocol =
            Protocol::new(ProtocolKind::Naive, ReliabilityModel::default(), 10).unwrap();

        let first = run_trials_parallel(protocol, Arc::clone(&network), line_path(), 2000, 9, 4)
            .await
            .unwrap();
        let second = run_trials_parallel(protocol, network, line_path(), 2000, 9, 4)
            .await
            .unwrap();

        assert_eq!(first.trials, 2000);
        assert_eq!(first.successes, second.successes);
    }

    #[tokio::test]
    async fn test_parallel_single_worker_matches_sequential() {
        let network = line_network();
        let protocol =
            Protocol::new(ProtocolKind::Purification, ReliabilityModel::default(), 3).unwrap();

        let sequential =
            run_trials(&protocol, &network, &line_path(), 500, &mut worker_rng(3, 0)).unwrap();
        let parallel = run_trials_parallel(protocol, Arc::new(network), line_path(), 500, 3, 1)
            .await
            .unwrap();

        assert_eq!(sequential.successes, parallel.successes);
    }

    #[tokio::test]
    async fn test_parallel_rejects_bad_input() {
        let network = Arc::new(line_network());
        let protocol =
            Protocol::new(ProtocolKind::Naive, ReliabilityModel::default(), 10).unwrap();

        let err = run_trials_parallel(protocol, Arc::clone(&network), line_path(), 0, 1, 2)
            .await
            .unwrap_err();
        assert!(err.is_invalid_parameter());

        let bad = Path::new(["a", "d"]).unwrap();
        let err = run_trials_parallel(protocol, network, bad, 10, 1, 2)
            .await
            .unwrap_err();
        assert!(err.is_invalid_path());
    }
}
