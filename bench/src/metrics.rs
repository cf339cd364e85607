//! Metrics collection module

/// Latency and error counters for one benchmark run
#[derive(Debug, Default, Clone)]
pub struct Metrics {
    ops_count: u64,
    latency_sum: u64,
    latency_max: u64,
    errors: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_op(&mut self, latency_ns: u64) {
        self.ops_count += 1;
        self.latency_sum += latency_ns;
        self.latency_max = self.latency_max.max(latency_ns);
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn total_ops(&self) -> u64 {
        self.ops_count
    }

    pub fn total_latency_ns(&self) -> u64 {
        self.latency_sum
    }

    pub fn max_latency_ns(&self) -> u64 {
        self.latency_max
    }

    pub fn total_errors(&self) -> u64 {
        self.errors
    }

    /// Mean latency in nanoseconds, 0 when nothing ran
    pub fn avg_latency_ns(&self) -> f64 {
        if self.ops_count == 0 {
            0.0
        } else {
            self.latency_sum as f64 / self.ops_count as f64
        }
    }
}
