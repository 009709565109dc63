use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::BackendError;

/// Query window for a range query, all values in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: i64,
    pub value: f64,
}

/// A labelled series returned by a range query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSeries {
    pub labels: HashMap<String, String>,
    pub samples: Vec<Sample>,
}

impl RangeSeries {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn value_at(&self, timestamp: i64) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.timestamp == timestamp)
            .map(|s| s.value)
    }
}

/// A labelled point returned by an instant query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstantSample {
    pub labels: HashMap<String, String>,
    pub value: f64,
}

impl InstantSample {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}

/// Query contract the services depend on. Implemented by the Prometheus
/// HTTP client and by test doubles.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    async fn query_range(&self, expr: &str, range: RangeSpec) -> Result<Vec<RangeSeries>, BackendError>;

    async fn query_instant(&self, expr: &str) -> Result<Vec<InstantSample>, BackendError>;
}
