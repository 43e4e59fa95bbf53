use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// One observed request outcome: how long it took and whether it succeeded.
/// Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Outcome {
    /// Observed latency in milliseconds.
    pub latency_ms: u64,
    pub succeeded: bool,
}

impl Outcome {
    /// A successful outcome with the given latency.
    pub fn ok(latency_ms: u64) -> Self {
        Self {
            latency_ms,
            succeeded: true,
        }
    }

    /// A failed outcome with the given latency.
    pub fn ko(latency_ms: u64) -> Self {
        Self {
            latency_ms,
            succeeded: false,
        }
    }
}

// ---------------------------------------------------------------------------
// OutcomeBatch
// ---------------------------------------------------------------------------

/// A named, closed batch of outcomes — typically all results for one logical
/// request within a run. Batches are finite and never updated incrementally;
/// the aggregator consumes them whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutcomeBatch {
    pub name: String,
    pub outcomes: Vec<Outcome>,
}

impl OutcomeBatch {
    pub fn new(name: impl Into<String>, outcomes: Vec<Outcome>) -> Self {
        Self {
            name: name.into(),
            outcomes,
        }
    }
}

// ---------------------------------------------------------------------------
// MeasurementWindow
// ---------------------------------------------------------------------------

/// Wall-clock window over which a batch was collected. The window length
/// drives the per-view throughput figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MeasurementWindow {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl MeasurementWindow {
    pub fn new(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at,
        }
    }

    /// Window length in seconds, with millisecond resolution.
    /// Negative when `finished_at` precedes `started_at`.
    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn ok_and_ko_constructors_set_flags() {
        assert!(Outcome::ok(100).succeeded);
        assert!(!Outcome::ko(100).succeeded);
        assert_eq!(Outcome::ok(42).latency_ms, 42);
    }

    #[test]
    fn window_duration_in_seconds() {
        let start = Utc::now();
        let window = MeasurementWindow::new(start, start + Duration::milliseconds(181_000));
        assert!((window.duration_secs() - 181.0).abs() < 0.001);
    }

    #[test]
    fn window_sub_second_duration() {
        let start = Utc::now();
        let window = MeasurementWindow::new(start, start + Duration::milliseconds(250));
        assert!((window.duration_secs() - 0.25).abs() < 0.001);
    }

    #[test]
    fn inverted_window_duration_is_negative() {
        let start = Utc::now();
        let window = MeasurementWindow::new(start, start - Duration::seconds(5));
        assert!(window.duration_secs() < 0.0);
    }

    #[test]
    fn batch_new_stores_name_and_outcomes() {
        let batch = OutcomeBatch::new("Login", vec![Outcome::ok(10), Outcome::ko(20)]);
        assert_eq!(batch.name, "Login");
        assert_eq!(batch.outcomes.len(), 2);
    }
}
