//! In-memory backend used by service and router tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::client::metrics_backend::{InstantSample, MetricsBackend, RangeSeries, RangeSpec, Sample};
use crate::errors::BackendError;

/// Answers queries by matching a substring of the expression.
#[derive(Default)]
pub struct MockBackend {
    range: Vec<(String, Vec<RangeSeries>)>,
    instant: Vec<(String, Vec<InstantSample>)>,
    fail: bool,
    pub calls: Mutex<Vec<(String, Option<RangeSpec>)>>,
}

impl MockBackend {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, expr_contains: &str, series: Vec<RangeSeries>) -> Self {
        self.range.push((expr_contains.to_string(), series));
        self
    }

    pub fn with_instant(mut self, expr_contains: &str, samples: Vec<InstantSample>) -> Self {
        self.instant.push((expr_contains.to_string(), samples));
        self
    }

    pub fn recorded_calls(&self) -> Vec<(String, Option<RangeSpec>)> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn series(label: &str, key: &str, points: &[(i64, f64)]) -> RangeSeries {
    RangeSeries {
        labels: [(label.to_string(), key.to_string())].into_iter().collect(),
        samples: points
            .iter()
            .map(|&(timestamp, value)| Sample { timestamp, value })
            .collect(),
    }
}

pub fn instant(label: Option<(&str, &str)>, value: f64) -> InstantSample {
    InstantSample {
        labels: label
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .into_iter()
            .collect(),
        value,
    }
}

#[async_trait]
impl MetricsBackend for MockBackend {
    async fn query_range(&self, expr: &str, range: RangeSpec) -> Result<Vec<RangeSeries>, BackendError> {
        self.calls.lock().unwrap().push((expr.to_string(), Some(range)));
        if self.fail {
            return Err(BackendError::BackendQueryFailed("mock failure".into()));
        }
        Ok(self
            .range
            .iter()
            .find(|(needle, _)| expr.contains(needle.as_str()))
            .map(|(_, s)| s.clone())
            .unwrap_or_default())
    }

    async fn query_instant(&self, expr: &str) -> Result<Vec<InstantSample>, BackendError> {
        self.calls.lock().unwrap().push((expr.to_string(), None));
        if self.fail {
            return Err(BackendError::BackendQueryFailed("mock failure".into()));
        }
        Ok(self
            .instant
            .iter()
            .find(|(needle, _)| expr.contains(needle.as_str()))
            .map(|(_, s)| s.clone())
            .unwrap_or_default())
    }
}
