use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CountTriple / RateTriple — total/ok/ko views of one statistic
// ---------------------------------------------------------------------------

/// A total/ok/ko triple of integer statistics (counts or millisecond values).
///
/// Serialized with decimal-string leaves: the established report format
/// carries every per-view number as text, and consumers depend on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTriple {
    #[serde(with = "wire::int_string")]
    pub total: u64,
    #[serde(with = "wire::int_string")]
    pub ok: u64,
    #[serde(with = "wire::int_string")]
    pub ko: u64,
}

/// A total/ok/ko triple of request rates (requests per second).
///
/// Values are held rounded to three decimals so that serializing and parsing
/// a record reproduces the same numbers; the wire form is a three-decimal
/// string like `"198.895"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTriple {
    #[serde(with = "wire::rate_string")]
    pub total: f64,
    #[serde(with = "wire::rate_string")]
    pub ok: f64,
    #[serde(with = "wire::rate_string")]
    pub ko: f64,
}

// ---------------------------------------------------------------------------
// LatencyGroup
// ---------------------------------------------------------------------------

/// One latency histogram group: a named range (or the failure condition),
/// the number of outcomes that fell into it, and its share of the batch.
///
/// Unlike the per-view triples, `count` and `percentage` serialize as native
/// integers. The asymmetry is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyGroup {
    pub name: String,
    pub count: u64,
    pub percentage: u64,
}

// ---------------------------------------------------------------------------
// SummaryRecord
// ---------------------------------------------------------------------------

/// Read-only summary of one closed outcome batch.
///
/// Field names and leaf encodings follow the report schema consumed by the
/// existing display layer: camelCase keys, string-encoded per-view numbers,
/// native-integer group counts. Mean, standard deviation and percentile
/// values are rounded to whole milliseconds; throughput to three decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub name: String,
    pub number_of_requests: CountTriple,
    pub min_response_time: CountTriple,
    pub max_response_time: CountTriple,
    pub mean_response_time: CountTriple,
    pub standard_deviation: CountTriple,
    pub percentiles1: CountTriple,
    pub percentiles2: CountTriple,
    pub percentiles3: CountTriple,
    pub percentiles4: CountTriple,
    pub group1: LatencyGroup,
    pub group2: LatencyGroup,
    pub group3: LatencyGroup,
    pub group4: LatencyGroup,
    pub mean_number_of_requests_per_second: RateTriple,
}

impl SummaryRecord {
    /// The four percentile triples in rank order.
    pub fn percentiles(&self) -> [CountTriple; 4] {
        [
            self.percentiles1,
            self.percentiles2,
            self.percentiles3,
            self.percentiles4,
        ]
    }

    /// The four latency groups in reporting order.
    pub fn groups(&self) -> [&LatencyGroup; 4] {
        [&self.group1, &self.group2, &self.group3, &self.group4]
    }
}

// ---------------------------------------------------------------------------
// Wire encoding helpers
// ---------------------------------------------------------------------------

mod wire {
    /// `u64` as a plain decimal string, e.g. `"36000"`.
    pub mod int_string {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(value)
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
        where
            D: Deserializer<'de>,
        {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(serde::de::Error::custom)
        }
    }

    /// `f64` as a three-decimal string, e.g. `"198.895"`.
    pub mod rate_string {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(&format_args!("{value:.3}"))
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
        where
            D: Deserializer<'de>,
        {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(serde::de::Error::custom)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
