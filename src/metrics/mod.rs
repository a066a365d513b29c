//! Metrics and observability module
//!
//! Records Monte Carlo activity through the `metrics` facade. A Prometheus
//! recorder can be installed in-process to render a text snapshot.
//!
//! Key metrics exposed:
//! - Trials run and trials succeeded, per protocol
//! - Success rate distribution per batch
//! - Batch wall-clock duration
//! - Sweep points evaluated

pub mod exporter;
pub mod recorder;

pub use exporter::{install_recorder, render_metrics, MetricsError};
pub use recorder::{
    init_metrics, record_batch, record_route, record_sweep_point, BatchTimer,
};
