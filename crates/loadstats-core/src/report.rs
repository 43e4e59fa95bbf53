use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregator::summarize;
use crate::config::SummaryConfig;
use crate::error::LoadstatsError;
use crate::outcome::{Outcome, OutcomeBatch};
use crate::summary::SummaryRecord;

/// Name of the synthetic root record that aggregates every batch in a run.
pub const GLOBAL_NAME: &str = "Global Information";

/// Maximum length of the name portion of a formatted path.
const PATH_NAME_LEN: usize = 15;

// ---------------------------------------------------------------------------
// NodeKind / RequestNode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    Group,
    Request,
}

/// One per-request entry in a report's `contents` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub path: String,
    pub path_formatted: String,
    pub stats: SummaryRecord,
}

// ---------------------------------------------------------------------------
// StatsReport — global summary plus per-request breakdown
// ---------------------------------------------------------------------------

/// Complete statistics for a finished run: one global [`SummaryRecord`] over
/// the union of all batches, plus one record per named batch, keyed by the
/// batch's formatted path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    /// Unique ID for the run this report describes.
    pub run_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub path: String,
    pub path_formatted: String,
    pub stats: SummaryRecord,
    pub contents: BTreeMap<String, RequestNode>,
}

impl StatsReport {
    /// Build a report from a set of named batches under one configuration.
    ///
    /// The global record is computed over the concatenation of every batch;
    /// each batch then gets its own record in `contents`. Batches are
    /// independent — the same config (and window) applies to all of them.
    pub fn from_batches(
        batches: &[OutcomeBatch],
        config: &SummaryConfig,
    ) -> Result<Self, LoadstatsError> {
        let all: Vec<Outcome> = batches
            .iter()
            .flat_map(|batch| batch.outcomes.iter().copied())
            .collect();
        let global = summarize(GLOBAL_NAME, &all, config)?;

        let mut contents = BTreeMap::new();
        for batch in batches {
            let path_formatted = format_path("req_", &batch.name);
            let stats = summarize(&batch.name, &batch.outcomes, config)?;
            contents.insert(
                path_formatted.clone(),
                RequestNode {
                    kind: NodeKind::Request,
                    name: batch.name.clone(),
                    path: batch.name.clone(),
                    path_formatted,
                    stats,
                },
            );
        }

        Ok(Self {
            run_id: Uuid::new_v4(),
            kind: NodeKind::Group,
            name: GLOBAL_NAME.to_string(),
            path: String::new(),
            path_formatted: format_path("group_", GLOBAL_NAME),
            stats: global,
            contents,
        })
    }

    /// Look up a per-request record by its original batch name.
    pub fn request(&self, name: &str) -> Option<&SummaryRecord> {
        self.contents
            .values()
            .find(|node| node.name == name)
            .map(|node| &node.stats)
    }
}

/// Build a stable identifier for a report node: prefix, lowercased dashed
/// name truncated to [`PATH_NAME_LEN`] characters, and a short hash of the
/// full name to keep truncated siblings distinct.
fn format_path(prefix: &str, name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let trimmed: String = slug.trim_matches('-').chars().take(PATH_NAME_LEN).collect();
    let trimmed = trimmed.trim_end_matches('-');

    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    format!("{prefix}{trimmed}-{:05x}", hasher.finish() & 0xf_ffff)
}

// ---------------------------------------------------------------------------
// JSON export / parse
// ---------------------------------------------------------------------------

/// Export a report as pretty-printed JSON.
pub fn export_json(report: &StatsReport) -> Result<String, LoadstatsError> {
    serde_json::to_string_pretty(report).map_err(LoadstatsError::from)
}

/// Parse a report previously produced by [`export_json`].
pub fn parse_json(json: &str) -> Result<StatsReport, LoadstatsError> {
    serde_json::from_str(json).map_err(LoadstatsError::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::MeasurementWindow;
    use chrono::{Duration, Utc};

    fn make_config() -> SummaryConfig {
        let start = Utc::now();
        SummaryConfig::new(MeasurementWindow::new(
            start,
            start + Duration::seconds(60),
        ))
    }

    fn make_batches() -> Vec<OutcomeBatch> {
        vec![
            OutcomeBatch::new(
                "Login",
                vec![Outcome::ok(10), Outcome::ok(20), Outcome::ko(900)],
            ),
            OutcomeBatch::new("Search", vec![Outcome::ok(30), Outcome::ok(40)]),
        ]
    }

    // -----------------------------------------------------------------------
    // from_batches
    // -----------------------------------------------------------------------

    #[test]
    fn global_record_covers_all_batches() {
        let report = StatsReport::from_batches(&make_batches(), &make_config()).unwrap();
        assert_eq!(report.name, GLOBAL_NAME);
        assert_eq!(report.kind, NodeKind::Group);
        assert_eq!(report.stats.number_of_requests.total, 5);
        assert_eq!(report.stats.number_of_requests.ko, 1);
    }

    #[test]
    fn contents_hold_one_node_per_batch() {
        let report = StatsReport::from_batches(&make_batches(), &make_config()).unwrap();
        assert_eq!(report.contents.len(), 2);
        for node in report.contents.values() {
            assert_eq!(node.kind, NodeKind::Request);
            assert_eq!(node.path, node.name);
        }
    }

    #[test]
    fn request_lookup_by_name() {
        let report = StatsReport::from_batches(&make_batches(), &make_config()).unwrap();
        let login = report.request("Login").expect("Login should be present");
        assert_eq!(login.number_of_requests.total, 3);
        assert_eq!(login.number_of_requests.ko, 1);
        let search = report.request("Search").expect("Search should be present");
        assert_eq!(search.number_of_requests.total, 2);
        assert!(report.request("Missing").is_none());
    }

    #[test]
    fn no_batches_produce_an_empty_global_report() {
        let report = StatsReport::from_batches(&[], &make_config()).unwrap();
        assert_eq!(report.stats.number_of_requests.total, 0);
        assert!(report.contents.is_empty());
    }

    #[test]
    fn invalid_config_propagates() {
        let mut config = make_config();
        config.lower_bound_ms = 900;
        config.upper_bound_ms = 100;
        let err = StatsReport::from_batches(&make_batches(), &config).unwrap_err();
        assert!(matches!(err, LoadstatsError::InvalidConfiguration(_)));
    }

    // -----------------------------------------------------------------------
    // format_path
    // -----------------------------------------------------------------------

    #[test]
    fn format_path_lowercases_and_dashes() {
        let path = format_path("req_", "Login Request");
        assert!(path.starts_with("req_login-request-"));
    }

    #[test]
    fn format_path_truncates_long_names() {
        let path = format_path("req_", "SageMaker-LEARNING-model-simulator-1");
        assert!(path.starts_with("req_sagemaker-learn-"));
    }

    #[test]
    fn format_path_distinguishes_truncated_siblings() {
        let a = format_path("req_", "SageMaker-LEARNING-model-simulator-1");
        let b = format_path("req_", "SageMaker-LEARNING-model-simulator-2");
        assert_ne!(a, b);
    }

    #[test]
    fn format_path_is_deterministic() {
        assert_eq!(format_path("req_", "Login"), format_path("req_", "Login"));
    }

    // -----------------------------------------------------------------------
    // Export / parse
    // -----------------------------------------------------------------------

    #[test]
    fn export_json_is_valid_json() {
        let report = StatsReport::from_batches(&make_batches(), &make_config()).unwrap();
        let json = export_json(&report).expect("export should succeed");
        let value: serde_json::Value =
            serde_json::from_str(&json).expect("output should be valid JSON");
        assert_eq!(value["type"], "GROUP");
        assert_eq!(value["name"], GLOBAL_NAME);
        assert!(value.get("contents").is_some());
    }

    #[test]
    fn exported_stats_use_the_wire_encoding() {
        let report = StatsReport::from_batches(&make_batches(), &make_config()).unwrap();
        let json = export_json(&report).expect("export should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        // Per-view numbers are strings; group counts are native integers.
        assert_eq!(value["stats"]["numberOfRequests"]["total"], "5");
        assert!(value["stats"]["group4"]["count"].is_u64());
    }

    #[test]
    fn export_then_parse_round_trips() {
        let report = StatsReport::from_batches(&make_batches(), &make_config()).unwrap();
        let json = export_json(&report).expect("export should succeed");
        let parsed = parse_json(&json).expect("parse should succeed");
        assert_eq!(parsed, report);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        let err = parse_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadstatsError::Serde(_)));
    }
}
