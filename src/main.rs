//! Command-line driver for the hybrid network reliability simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use qnet_reliability::metrics::{install_recorder, render_metrics};
use qnet_reliability::simulation::{standard_link_scenarios, SimulationConfig, Simulator};
use qnet_reliability::topology::build_fixed_topology;
use qnet_reliability::{Path, ProtocolKind};

#[derive(Parser)]
#[command(name = "qnet-sim")]
#[command(about = "Monte Carlo reliability of hybrid quantum/classical networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the trial count
    #[arg(short, long, global = true)]
    trials: Option<u64>,

    /// Override the worker count of the parallel estimator
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print a Prometheus snapshot of the run's metrics at the end
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Success rate of the four standard paths of the fixed topology
    Links,

    /// Quantum-aware versus distance-only route on the fixed topology
    Route {
        #[arg(long, default_value = "Q_Node_1")]
        from: String,

        #[arg(long, default_value = "Q_Node_4")]
        to: String,
    },

    /// Success rate on repeater chains of growing length
    Sweep {
        #[arg(short, long, default_value = "naive")]
        protocol: ProtocolKind,

        /// Hub counts to visit, ascending (defaults to the configured range)
        #[arg(long, value_delimiter = ',')]
        hubs: Option<Vec<usize>>,
    },

    /// Naive versus purification over one path of the fixed topology
    Compare {
        #[arg(long, value_delimiter = ',', default_value = "Q_Node_1,Q_Hub_A,Q_Hub_B,Q_Node_4")]
        path: Vec<String>,

        #[arg(short, long)]
        retries: Option<u32>,
    },

    /// One protocol over one path, split across worker tasks
    Simulate {
        #[arg(short, long, default_value = "purification")]
        protocol: ProtocolKind,

        #[arg(long, value_delimiter = ',', default_value = "Q_Node_1,Q_Hub_A,Q_Hub_B,Q_Node_4")]
        path: Vec<String>,

        #[arg(short, long)]
        retries: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    if cli.metrics {
        install_recorder().context("installing metrics recorder")?;
    }

    let simulator = Simulator::new(load_config(&cli)?)?;
    let trials = simulator.config().trials;
    let network = build_fixed_topology()?;

    match &cli.command {
        Commands::Links => {
            let reports = simulator.analyze_links(&network, &standard_link_scenarios()?, trials)?;
            emit(&cli, &reports, || {
                println!("Link behaviour over {} trials", trials);
                for report in &reports {
                    println!(
                        "  {:<22} {:>7.2}%  {:>6.1} km  {}",
                        report.name,
                        report.outcome.success_percent(),
                        report.total_distance,
                        report.path
                    );
                }
            })?;
        }

        Commands::Route { from, to } => {
            let comparison = simulator.compare_routes(&network, from, to)?;
            emit(&cli, &comparison, || {
                println!("Routing {} -> {}", from, to);
                for route in [&comparison.quantum, &comparison.classical] {
                    println!(
                        "  {:<9} {}  ({:.1} km, quantum cost {:.2})",
                        route.weight, route.path, route.total_distance, route.quantum_cost
                    );
                }
            })?;
        }

        Commands::Sweep { protocol, hubs } => {
            let mut simulator = simulator.clone();
            if let Some(hubs) = hubs {
                let config = simulator.config().clone().with_sweep_hubs(hubs.clone());
                simulator = Simulator::new(config)?;
            }
            let report = simulator.sweep_report(*protocol)?;
            emit(&cli, &report, || {
                println!(
                    "Scalability sweep ({}, {} trials per point)",
                    report.protocol, report.trials_per_point
                );
                for point in &report.points {
                    println!(
                        "  {:>3} repeaters  {:>7.1} km  {:>7.2}%",
                        point.hub_count,
                        point.total_distance,
                        point.success_rate * 100.0
                    );
                }
            })?;
        }

        Commands::Compare { path, retries } => {
            let path = Path::new(path.iter().map(String::as_str))?;
            let comparison = simulator.compare_protocols(&network, &path, trials, *retries)?;
            emit(&cli, &comparison, || {
                println!("Path tested: {}", comparison.path);
                println!("  {}", comparison.naive);
                println!("  {}", comparison.purification);
                println!(
                    "  improvement: {:+.2} percentage points",
                    comparison.improvement_points()
                );
            })?;
        }

        Commands::Simulate {
            protocol,
            path,
            retries,
        } => {
            let path = Path::new(path.iter().map(String::as_str))?;
            let outcome = simulator
                .simulate_parallel(*protocol, Arc::new(network), path.clone(), trials, *retries)
                .await?;
            emit(&cli, &outcome, || {
                println!("{} ({} workers)", path, simulator.config().workers);
                println!("  {}", outcome);
            })?;
        }
    }

    if cli.metrics {
        if let Some(snapshot) = render_metrics() {
            println!("{}", snapshot);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(trials) = cli.trials {
        config = config.with_trials(trials);
    }
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    Ok(config)
}

fn emit<T: Serialize>(cli: &Cli, value: &T, text: impl FnOnce()) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}
