use serde::{Deserialize, Serialize};

use crate::error::LoadstatsError;
use crate::outcome::MeasurementWindow;

/// Default percentile cut points (p50/p75/p95/p99).
pub const DEFAULT_PERCENTILE_RANKS: [f64; 4] = [50.0, 75.0, 95.0, 99.0];

/// Default latency-group boundaries in milliseconds.
pub const DEFAULT_LOWER_BOUND_MS: u64 = 800;
pub const DEFAULT_UPPER_BOUND_MS: u64 = 1200;

// ---------------------------------------------------------------------------
// SummaryConfig
// ---------------------------------------------------------------------------

/// Configuration for one aggregation pass: the four percentile ranks, the two
/// latency-group boundaries, and the wall-clock window used for throughput.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SummaryConfig {
    /// Percentile ranks in (0, 100], strictly increasing.
    pub percentile_ranks: [f64; 4],
    /// Boundary between the first and second latency group (ms).
    pub lower_bound_ms: u64,
    /// Boundary between the second and third latency group (ms).
    pub upper_bound_ms: u64,
    pub window: MeasurementWindow,
}

impl SummaryConfig {
    /// Config with the default ranks and boundaries over the given window.
    pub fn new(window: MeasurementWindow) -> Self {
        Self {
            percentile_ranks: DEFAULT_PERCENTILE_RANKS,
            lower_bound_ms: DEFAULT_LOWER_BOUND_MS,
            upper_bound_ms: DEFAULT_UPPER_BOUND_MS,
            window,
        }
    }

    /// Display names for the four latency groups, in reporting order.
    /// The fourth group collects every failed outcome regardless of latency.
    pub fn group_names(&self) -> [String; 4] {
        [
            format!("t < {} ms", self.lower_bound_ms),
            format!("{} ms < t < {} ms", self.lower_bound_ms, self.upper_bound_ms),
            format!("t > {} ms", self.upper_bound_ms),
            "failed".to_string(),
        ]
    }
}

/// Validate a [`SummaryConfig`] and return a list of validation errors.
///
/// An empty `Vec` means the config is valid. A zero or inverted measurement
/// window is deliberately not an error — the aggregator degrades throughput
/// to zero for such windows.
pub fn validate_config(config: &SummaryConfig) -> Vec<LoadstatsError> {
    let mut errors = Vec::new();

    for (i, &rank) in config.percentile_ranks.iter().enumerate() {
        if !(rank > 0.0 && rank <= 100.0) {
            errors.push(LoadstatsError::InvalidConfiguration(format!(
                "percentile rank {} must be in (0, 100] (got: {})",
                i + 1,
                rank
            )));
        }
    }

    for pair in config.percentile_ranks.windows(2) {
        if pair[1] <= pair[0] {
            errors.push(LoadstatsError::InvalidConfiguration(format!(
                "percentile ranks must be strictly increasing (got: {} then {})",
                pair[0], pair[1]
            )));
        }
    }

    if config.lower_bound_ms >= config.upper_bound_ms {
        errors.push(LoadstatsError::InvalidConfiguration(format!(
            "latency group boundaries must be strictly increasing (got: {} ms then {} ms)",
            config.lower_bound_ms, config.upper_bound_ms
        )));
    }

    errors
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
