//! Metrics recorder for simulation runs

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize metric descriptions (call once at startup)
pub fn init_metrics() {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        return; // Already initialized
    }
    describe_all();
}

fn describe_all() {
    describe_counter!("qnet_trials_total", "Total number of simulated transmissions");
    describe_counter!(
        "qnet_trial_successes_total",
        "Total number of simulated transmissions that succeeded"
    );
    describe_counter!("qnet_batches_total", "Total number of Monte Carlo batches");
    describe_counter!(
        "qnet_sweep_points_total",
        "Total number of scalability sweep points evaluated"
    );
    describe_counter!("qnet_routes_total", "Total number of shortest-path queries");

    describe_gauge!(
        "qnet_last_success_rate",
        "Success rate of the most recent batch"
    );
    describe_gauge!(
        "qnet_sweep_success_rate",
        "Success rate of a sweep point, labelled by repeater count"
    );

    describe_histogram!("qnet_success_rate", "Success rate per Monte Carlo batch");
    describe_histogram!(
        "qnet_batch_duration_seconds",
        "Wall-clock time of one Monte Carlo batch"
    );
    describe_histogram!("qnet_route_hops", "Hop count of routed paths");
}

// ============== Monte Carlo ==============

/// Record a finished batch of trials
pub fn record_batch(protocol: &str, trials: u64, successes: u64, duration: Duration) {
    counter!("qnet_trials_total", "protocol" => protocol.to_string()).increment(trials);
    counter!("qnet_trial_successes_total", "protocol" => protocol.to_string())
        .increment(successes);
    counter!("qnet_batches_total", "protocol" => protocol.to_string()).increment(1);

    let rate = if trials > 0 {
        successes as f64 / trials as f64
    } else {
        0.0
    };
    histogram!("qnet_success_rate", "protocol" => protocol.to_string()).record(rate);
    gauge!("qnet_last_success_rate", "protocol" => protocol.to_string()).set(rate);
    histogram!("qnet_batch_duration_seconds").record(duration.as_secs_f64());
}

/// Record one evaluated sweep point
pub fn record_sweep_point(hub_count: usize, success_rate: f64) {
    counter!("qnet_sweep_points_total").increment(1);
    gauge!("qnet_sweep_success_rate", "hubs" => hub_count.to_string()).set(success_rate);
}

// ============== Routing ==============

pub fn record_route(weight: &str, hops: usize) {
    counter!("qnet_routes_total", "weight" => weight.to_string()).increment(1);
    histogram!("qnet_route_hops", "weight" => weight.to_string()).record(hops as f64);
}

/// Times a batch and records it on completion
pub struct BatchTimer {
    protocol: &'static str,
    start_time: Instant,
}

impl BatchTimer {
    pub fn start(protocol: &'static str) -> Self {
        Self {
            protocol,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Stop timing and record the batch
    pub fn finish(self, trials: u64, successes: u64) {
        record_batch(self.protocol, trials, successes, self.start_time.elapsed());
    }
}
