use tracing::{debug, warn};

use crate::config::{validate_config, SummaryConfig};
use crate::error::LoadstatsError;
use crate::outcome::Outcome;
use crate::summary::{CountTriple, LatencyGroup, RateTriple, SummaryRecord};

// ---------------------------------------------------------------------------
// ViewStats — per-view reduction
// ---------------------------------------------------------------------------

/// Statistics for one view (total/ok/ko) of a batch. All three views go
/// through the same computation over their filtered latency subset.
#[derive(Debug, Clone, Copy)]
struct ViewStats {
    count: u64,
    min_ms: u64,
    max_ms: u64,
    mean_ms: u64,
    std_dev_ms: u64,
    percentiles: [u64; 4],
    rps: f64,
}

/// Reduce one view's latencies (already sorted ascending) to its statistics.
/// An empty view reports every field as zero.
fn view_stats(sorted: &[u64], ranks: [f64; 4], duration_secs: f64) -> ViewStats {
    let count = sorted.len() as u64;
    if count == 0 {
        return ViewStats {
            count: 0,
            min_ms: 0,
            max_ms: 0,
            mean_ms: 0,
            std_dev_ms: 0,
            percentiles: [0; 4],
            rps: 0.0,
        };
    }

    let sum: u64 = sorted.iter().sum();
    let mean = sum as f64 / count as f64;
    // Population standard deviation, matching the reported figures.
    let variance = sorted
        .iter()
        .map(|&ms| {
            let delta = ms as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / count as f64;

    ViewStats {
        count,
        min_ms: sorted[0],
        max_ms: sorted[sorted.len() - 1],
        mean_ms: mean.round() as u64,
        std_dev_ms: variance.sqrt().round() as u64,
        percentiles: ranks.map(|rank| percentile(sorted, rank)),
        rps: rate(count, duration_secs),
    }
}

/// Nearest-rank percentile over a sorted slice: the value at (1-based) index
/// `ceil(rank/100 * n)`, clamped to the slice. This is the documented
/// percentile method for the whole crate; no interpolation is applied.
///
/// `rank` must be in the range (0.0, 100.0]. Returns 0 for an empty slice.
fn percentile(sorted: &[u64], rank: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((rank / 100.0) * sorted.len() as f64).ceil() as usize;
    let idx = idx.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}

/// Mean completed-outcome rate over the window, rounded to three decimals so
/// the in-memory value matches its wire form. Zero when the window has no
/// positive duration.
fn rate(count: u64, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    let rps = count as f64 / duration_secs;
    (rps * 1000.0).round() / 1000.0
}

/// Integer share of the batch, `round(count / total * 100)`.
fn percentage(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u64
}

// ---------------------------------------------------------------------------
// summarize
// ---------------------------------------------------------------------------

/// Aggregate a closed batch of outcomes into a [`SummaryRecord`].
///
/// Pure function of its inputs: one pass over the batch, no side effects.
/// The three views (total, ok, ko) are each reduced by [`view_stats`];
/// latency groups 1-3 partition the ok view's latencies around the configured
/// boundaries and group 4 collects every failed outcome, so the four group
/// counts always sum to the total count.
///
/// An empty batch yields a record with all counts and derived fields zero.
/// Invalid configuration is the only error condition.
pub fn summarize(
    name: &str,
    outcomes: &[Outcome],
    config: &SummaryConfig,
) -> Result<SummaryRecord, LoadstatsError> {
    if let Some(err) = validate_config(config).into_iter().next() {
        return Err(err);
    }

    debug!(batch = name, outcomes = outcomes.len(), "summarizing batch");

    let duration_secs = config.window.duration_secs();
    if duration_secs <= 0.0 && !outcomes.is_empty() {
        warn!(
            batch = name,
            "measurement window has no positive duration; throughput reported as zero"
        );
    }

    let mut all: Vec<u64> = Vec::with_capacity(outcomes.len());
    let mut ok: Vec<u64> = Vec::new();
    let mut ko: Vec<u64> = Vec::new();
    for outcome in outcomes {
        all.push(outcome.latency_ms);
        if outcome.succeeded {
            ok.push(outcome.latency_ms);
        } else {
            ko.push(outcome.latency_ms);
        }
    }
    all.sort_unstable();
    ok.sort_unstable();
    ko.sort_unstable();

    let ranks = config.percentile_ranks;
    let total_view = view_stats(&all, ranks, duration_secs);
    let ok_view = view_stats(&ok, ranks, duration_secs);
    let ko_view = view_stats(&ko, ranks, duration_secs);

    let triple = |pick: fn(&ViewStats) -> u64| CountTriple {
        total: pick(&total_view),
        ok: pick(&ok_view),
        ko: pick(&ko_view),
    };

    // Latency groups partition the ok view; failures land in group 4
    // regardless of latency, so the four counts sum to the total count.
    let (lo, hi) = (config.lower_bound_ms, config.upper_bound_ms);
    let below = ok.iter().filter(|&&ms| ms < lo).count() as u64;
    let within = ok.iter().filter(|&&ms| ms >= lo && ms <= hi).count() as u64;
    let above = ok.iter().filter(|&&ms| ms > hi).count() as u64;
    let failed = ko_view.count;

    let [name1, name2, name3, name4] = config.group_names();
    let group = |name: String, count: u64| LatencyGroup {
        name,
        count,
        percentage: percentage(count, total_view.count),
    };

    Ok(SummaryRecord {
        name: name.to_string(),
        number_of_requests: triple(|v| v.count),
        min_response_time: triple(|v| v.min_ms),
        max_response_time: triple(|v| v.max_ms),
        mean_response_time: triple(|v| v.mean_ms),
        standard_deviation: triple(|v| v.std_dev_ms),
        percentiles1: triple(|v| v.percentiles[0]),
        percentiles2: triple(|v| v.percentiles[1]),
        percentiles3: triple(|v| v.percentiles[2]),
        percentiles4: triple(|v| v.percentiles[3]),
        group1: group(name1, below),
        group2: group(name2, within),
        group3: group(name3, above),
        group4: group(name4, failed),
        mean_number_of_requests_per_second: RateTriple {
            total: total_view.rps,
            ok: ok_view.rps,
            ko: ko_view.rps,
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
