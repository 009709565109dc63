//! Wire types for the Prometheus HTTP query API (`/api/v1/query`, `/api/v1/query_range`).

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PromResponse<T> {
    pub status: String,
    pub data: Option<PromData<T>>,

    #[serde(rename = "errorType")]
    pub error_type: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromData<T> {
    #[serde(rename = "resultType")]
    pub result_type: String,
    pub result: Vec<T>,
}

/// One series of a `matrix` result.
#[derive(Debug, Deserialize)]
pub struct PromMatrixSeries {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    #[serde(default)]
    pub values: Vec<(f64, String)>,
}

/// One sample of a `vector` result.
#[derive(Debug, Deserialize)]
pub struct PromVectorSample {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    pub value: (f64, String),
}

/// Prometheus encodes sample values as strings ("NaN" and "+Inf" included).
/// Anything unparsable or non-finite counts as zero usage.
pub fn parse_sample_value(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
