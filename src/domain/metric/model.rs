use serde::Serialize;

/// Point-in-time energy/carbon/cost figures for one namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceMetric {
    pub namespace: String,
    /// Watts
    pub energy_usage: f64,
    /// gCO2eq
    pub carbon_emission: f64,
    /// Currency units per hour
    pub cost: f64,
}

impl NamespaceMetric {
    pub fn new(namespace: &str, energy_usage: f64, carbon_emission: f64, cost: f64) -> Self {
        Self {
            namespace: namespace.to_string(),
            energy_usage,
            carbon_emission,
            cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SnapshotSource {
    Prometheus,
    Mock,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshotResponse {
    /// RFC 3339
    pub timestamp: String,
    pub data: Vec<NamespaceMetric>,
    pub source: SnapshotSource,
}

/// Rows served when the backend is unreachable or returns nothing.
pub fn mock_namespace_metrics() -> Vec<NamespaceMetric> {
    vec![
        NamespaceMetric::new("default", 120.0, 45.0, 12.50),
        NamespaceMetric::new("kube-system", 50.0, 18.0, 5.20),
        NamespaceMetric::new("analytics", 350.0, 130.0, 45.00),
    ]
}
