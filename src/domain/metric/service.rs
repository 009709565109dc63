//! Point-in-time energy/carbon/cost snapshot per namespace.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::core::client::metrics_backend::{InstantSample, MetricsBackend};
use crate::core::util::cost_util::{CostUtil, BYTES_PER_GB};
use crate::domain::common::model::UnitPrices;
use crate::domain::metric::model::{
    mock_namespace_metrics, MetricsSnapshotResponse, NamespaceMetric, SnapshotSource,
};

const CPU_CORES_QUERY: &str = "sum(rate(container_cpu_usage_seconds_total[5m])) by (namespace)";
const MEMORY_BYTES_QUERY: &str = "sum(container_memory_usage_bytes) by (namespace)";
const CAPACITY_QUERY: &str = "sum(machine_cpu_cores)";

const WATTS_PER_ACTIVE_CORE: f64 = 4.0;
const WATTS_PER_IDLE_CORE: f64 = 2.0;
/// gCO2eq per kWh, global average grid intensity.
const CARBON_INTENSITY: f64 = 475.0;

pub const IDLE_NAMESPACE: &str = "(Idle)";
const UNKNOWN_NAMESPACE: &str = "unknown";

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    energy: f64,
    carbon: f64,
    cost: f64,
}

/// Raw instant results the snapshot is computed from.
#[derive(Debug, Clone, Default)]
pub struct SnapshotInputs {
    pub cpu_cores: Vec<InstantSample>,
    pub memory_bytes: Vec<InstantSample>,
    pub capacity_cores: f64,
}

pub struct MetricSnapshotService {
    backend: Arc<dyn MetricsBackend>,
    prices: UnitPrices,
}

impl MetricSnapshotService {
    pub fn new(backend: Arc<dyn MetricsBackend>) -> Self {
        Self {
            backend,
            prices: UnitPrices::default(),
        }
    }

    pub async fn get_metrics(&self, now: DateTime<Utc>) -> Result<MetricsSnapshotResponse> {
        let (data, source) = match self.fetch_inputs().await {
            Ok(inputs) => {
                let data = build_snapshot(&inputs, &self.prices);
                if data.is_empty() {
                    info!("Using mock metrics (backend returned no data)");
                    (mock_namespace_metrics(), SnapshotSource::Mock)
                } else {
                    (data, SnapshotSource::Prometheus)
                }
            }
            Err(e) => {
                warn!("Failed to fetch metrics snapshot, using mock data: {}", e);
                (mock_namespace_metrics(), SnapshotSource::Mock)
            }
        };

        Ok(MetricsSnapshotResponse {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            data,
            source,
        })
    }

    async fn fetch_inputs(&self) -> Result<SnapshotInputs> {
        let (cpu_cores, memory_bytes, capacity) = tokio::try_join!(
            self.backend.query_instant(CPU_CORES_QUERY),
            self.backend.query_instant(MEMORY_BYTES_QUERY),
            self.backend.query_instant(CAPACITY_QUERY),
        )?;

        Ok(SnapshotInputs {
            cpu_cores,
            memory_bytes,
            capacity_cores: capacity.first().map(|s| s.value).unwrap_or(0.0),
        })
    }
}

fn namespace_of(sample: &InstantSample) -> &str {
    sample.label("namespace").unwrap_or(UNKNOWN_NAMESPACE)
}

fn carbon_for(energy_watts: f64) -> f64 {
    energy_watts / 1000.0 * CARBON_INTENSITY
}

/// Per-namespace figures in first-seen order: CPU namespaces, then `(Idle)`,
/// then namespaces seen only in memory.
pub fn build_snapshot(inputs: &SnapshotInputs, prices: &UnitPrices) -> Vec<NamespaceMetric> {
    let mut totals: IndexMap<String, Totals> = IndexMap::new();
    let mut allocated_cores = 0.0;

    for sample in &inputs.cpu_cores {
        let cores = sample.value;
        allocated_cores += cores;

        let energy = cores * WATTS_PER_ACTIVE_CORE;
        let entry = totals.entry(namespace_of(sample).to_string()).or_default();
        entry.energy += energy;
        entry.carbon += carbon_for(energy);
        entry.cost += cores * prices.cpu_core_hour;
    }

    let idle_cores = (inputs.capacity_cores - allocated_cores).max(0.0);
    if idle_cores > 0.0 {
        let energy = idle_cores * WATTS_PER_IDLE_CORE;
        totals.insert(
            IDLE_NAMESPACE.to_string(),
            Totals {
                energy: CostUtil::round_to(energy, 2),
                carbon: CostUtil::round_to(carbon_for(energy), 2),
                cost: CostUtil::round4(idle_cores * prices.cpu_core_hour),
            },
        );
    }

    for sample in &inputs.memory_bytes {
        let gb = sample.value / BYTES_PER_GB;
        totals
            .entry(namespace_of(sample).to_string())
            .or_default()
            .cost += gb * prices.memory_gb_hour;
    }

    totals
        .into_iter()
        .map(|(namespace, t)| {
            NamespaceMetric::new(
                &namespace,
                CostUtil::round_to(t.energy, 2),
                CostUtil::round_to(t.carbon, 2),
                CostUtil::round4(t.cost),
            )
        })
        .collect()
}
