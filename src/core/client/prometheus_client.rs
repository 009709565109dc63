use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::AppConfig;
use crate::core::client::metrics_backend::{InstantSample, MetricsBackend, RangeSeries, RangeSpec, Sample};
use crate::core::client::prometheus_dto::{
    parse_sample_value, PromMatrixSeries, PromResponse, PromVectorSample,
};
use crate::errors::BackendError;

/// HTTP client for a Prometheus-compatible query API.
pub struct PrometheusClient {
    base_url: Option<String>,
    client: Client,
}

impl PrometheusClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.query_timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self::with_client(config.prometheus_url.clone(), client))
    }

    pub fn with_client(base_url: Option<String>, client: Client) -> Self {
        Self { base_url, client }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(BackendError::ConfigurationMissing)?;
        let url = format!("{}{}", base_url, path);

        let resp = self.client.get(&url).query(params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(BackendError::BackendQueryFailed(format!(
                "{} returned {}: {}",
                url, status, text
            )));
        }

        let body: PromResponse<T> = resp.json().await.map_err(|e| {
            BackendError::BackendQueryFailed(format!("Failed to decode response from {}: {}", url, e))
        })?;

        if body.status != "success" {
            return Err(BackendError::BackendQueryFailed(format!(
                "{} reported status {} ({}: {})",
                url,
                body.status,
                body.error_type.unwrap_or_default(),
                body.error.unwrap_or_default()
            )));
        }

        let data = body.data.ok_or_else(|| {
            BackendError::BackendQueryFailed(format!("{} returned no data section", url))
        })?;

        debug!("{} returned {} {} result(s)", url, data.result.len(), data.result_type);
        Ok(data.result)
    }
}

#[async_trait]
impl MetricsBackend for PrometheusClient {
    async fn query_range(&self, expr: &str, range: RangeSpec) -> Result<Vec<RangeSeries>, BackendError> {
        let params = [
            ("query", expr.to_string()),
            ("start", range.start.to_string()),
            ("end", range.end.to_string()),
            ("step", range.step.to_string()),
        ];

        let result: Vec<PromMatrixSeries> = self.get("/api/v1/query_range", &params).await?;

        Ok(result
            .into_iter()
            .map(|series| RangeSeries {
                labels: series.metric,
                samples: series
                    .values
                    .iter()
                    .map(|(ts, raw)| Sample {
                        timestamp: ts.round() as i64,
                        value: parse_sample_value(raw),
                    })
                    .collect(),
            })
            .collect())
    }

    async fn query_instant(&self, expr: &str) -> Result<Vec<InstantSample>, BackendError> {
        let params = [("query", expr.to_string())];

        let result: Vec<PromVectorSample> = self.get("/api/v1/query", &params).await?;

        Ok(result
            .into_iter()
            .map(|sample| InstantSample {
                labels: sample.metric,
                value: parse_sample_value(&sample.value.1),
            })
            .collect())
    }
}
