//! Link-behaviour analysis and protocol comparison

use rand::Rng;
use tracing::info;

use super::error::SimulationResult;
use super::monte_carlo::run_trials;
use super::types::{validate_trials, LinkReport, LinkScenario, ProtocolComparison};
use crate::protocol::{NaiveProtocol, Protocol, ProtocolKind, PurificationProtocol};
use crate::reliability::ReliabilityModel;
use crate::topology::{Network, Path, TopologyResult};

/// The four scenarios run against the fixed topology
pub fn standard_link_scenarios() -> TopologyResult<Vec<LinkScenario>> {
    let scenario = |name: &str, nodes: &[&str], protocol: ProtocolKind| -> TopologyResult<LinkScenario> {
        Ok(LinkScenario {
            name: name.to_string(),
            path: Path::new(nodes.iter().copied())?,
            protocol,
        })
    };

    Ok(vec![
        scenario(
            "Short_Quantum_Path",
            &["Q_Node_1", "Q_Hub_A", "Q_Node_2"],
            ProtocolKind::Naive,
        )?,
        scenario(
            "Long_Quantum_Path",
            &["Q_Node_1", "Q_Hub_A", "Q_Hub_B", "Q_Node_3"],
            ProtocolKind::Naive,
        )?,
        scenario(
            "Invalid_Quantum_Path",
            &["Q_Node_1", "Q_Hub_A", "C_Node_A", "C_Node_C"],
            ProtocolKind::Naive,
        )?,
        scenario(
            "Classical_Path",
            &["C_Node_E", "C_Node_C", "C_Node_D", "C_Node_F"],
            ProtocolKind::Classical,
        )?,
    ])
}

/// Run every scenario in order on one random stream
///
/// All paths are resolved up front, so a bad scenario fails the whole call
/// before any draw.
pub fn analyze_links<R: Rng + ?Sized>(
    network: &Network,
    model: &ReliabilityModel,
    scenarios: &[LinkScenario],
    trials: u64,
    max_retries: u32,
    rng: &mut R,
) -> SimulationResult<Vec<LinkReport>> {
    model.validate()?;
    validate_trials(trials)?;
    for scenario in scenarios {
        network.resolve(&scenario.path)?;
    }

    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let protocol = Protocol::new(scenario.protocol, *model, max_retries)?;
        let resolved = network.resolve(&scenario.path)?;
        let outcome = run_trials(&protocol, network, &scenario.path, trials, rng)?;

        info!("{}: {}", scenario.name, outcome);
        reports.push(LinkReport {
            name: scenario.name.clone(),
            path: scenario.path.clone(),
            total_distance: resolved.total_distance(),
            total_latency: resolved.total_latency(),
            outcome,
        });
    }

    Ok(reports)
}

/// Naive then purification over the same path, drawing from one stream
pub fn compare_protocols<R: Rng + ?Sized>(
    network: &Network,
    model: &ReliabilityModel,
    path: &Path,
    trials: u64,
    max_retries: u32,
    rng: &mut R,
) -> SimulationResult<ProtocolComparison> {
    model.validate()?;
    validate_trials(trials)?;
    let naive = NaiveProtocol::new(*model)?;
    let purification = PurificationProtocol::new(*model, max_retries)?;
    network.resolve(path)?;

    let naive = run_trials(&naive, network, path, trials, rng)?;
    let purification = run_trials(&purification, network, path, trials, rng)?;

    let comparison = ProtocolComparison {
        path: path.clone(),
        max_retries,
        naive,
        purification,
    };
    info!(
        "{}: naive {:.2}%, purification {:.2}% ({:+.2} points)",
        path,
        naive.success_percent(),
        purification.success_percent(),
        comparison.improvement_points()
    );
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::build_fixed_topology;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_standard_scenarios_resolve() {
        let network = build_fixed_topology().unwrap();
        let scenarios = standard_link_scenarios().unwrap();

        assert_eq!(scenarios.len(), 4);
        for scenario in &scenarios {
            assert!(network.resolve(&scenario.path).is_ok(), "{}", scenario.name);
        }
    }

    #[test]
    fn test_link_reports() {
        let network = build_fixed_topology().unwrap();
        let model = ReliabilityModel::default();
        let scenarios = standard_link_scenarios().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let reports = analyze_links(&network, &model, &scenarios, 1000, 10, &mut rng).unwrap();
        let rate = |name: &str| {
            reports
                .iter()
                .find(|r| r.name == name)
                .map(|r| r.outcome.success_rate)
                .unwrap()
        };

        assert_eq!(rate("Invalid_Quantum_Path"), 0.0);
        assert!(rate("Classical_Path") > 0.95);
        assert!(rate("Short_Quantum_Path") > rate("Long_Quantum_Path"));

        let classical = reports.iter().find(|r| r.name == "Classical_Path").unwrap();
        assert!((classical.total_distance - 120.0).abs() < 1e-9);
        assert!((classical.total_latency - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_scenario_fails_before_draws() {
        let network = build_fixed_topology().unwrap();
        let mut scenarios = standard_link_scenarios().unwrap();
        scenarios.push(LinkScenario {
            name: "Broken".into(),
            path: Path::new(["Q_Node_1", "Q_Node_4"]).unwrap(),
            protocol: ProtocolKind::Naive,
        });
        let mut rng = crate::protocol::test_support::CountingRng::low();

        let err = analyze_links(
            &network,
            &ReliabilityModel::default(),
            &scenarios,
            10,
            10,
            &mut rng,
        )
        .unwrap_err();
        assert!(err.is_invalid_path());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_purification_beats_naive() {
        let network = build_fixed_topology().unwrap();
        let path = Path::new(["Q_Node_1", "Q_Hub_A", "Q_Hub_B", "Q_Node_4"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let comparison = compare_protocols(
            &network,
            &ReliabilityModel::default(),
            &path,
            1000,
            10,
            &mut rng,
        )
        .unwrap();

        assert_eq!(comparison.naive.trials, 1000);
        assert!(comparison.improvement_points() > -5.0);
        assert!(comparison.purification.success_rate > comparison.naive.success_rate);
    }

    #[test]
    fn test_rejects_unchecked_model() {
        let network = build_fixed_topology().unwrap();
        let path = Path::new(["Q_Node_1", "Q_Hub_A", "Q_Hub_B", "Q_Node_4"]).unwrap();
        let model = ReliabilityModel {
            alpha: 1.5,
            ..Default::default()
        };
        let mut rng = crate::protocol::test_support::CountingRng::low();

        let err = compare_protocols(&network, &model, &path, 100, 10, &mut rng).unwrap_err();
        assert!(err.is_invalid_parameter());

        let scenarios = standard_link_scenarios().unwrap();
        let err = analyze_links(&network, &model, &scenarios, 100, 10, &mut rng).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_compare_rejects_zero_retries() {
        let network = build_fixed_topology().unwrap();
        let path = Path::new(["Q_Node_1", "Q_Hub_A", "Q_Node_2"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = compare_protocols(
            &network,
            &ReliabilityModel::default(),
            &path,
            100,
            0,
            &mut rng,
        )
        .unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
