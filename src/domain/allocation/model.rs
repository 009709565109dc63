use std::fmt;

use serde::Serialize;
use tracing::warn;

pub const DEFAULT_STEP_SECONDS: i64 = 86_400;
pub const HOURLY_STEP_SECONDS: i64 = 3_600;
pub const DEFAULT_AGGREGATE: &str = "namespace";

/// Lookback period requested by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    Last24h,
    #[default]
    Last7d,
    Last30d,
}

impl Window {
    /// Soft parse: unknown values fall back to `7d` and are logged.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::default(),
            Some("24h") => Window::Last24h,
            Some("7d") => Window::Last7d,
            Some("30d") => Window::Last30d,
            Some(other) => {
                warn!("Unknown window {:?}, falling back to 7d", other);
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Window::Last24h => "24h",
            Window::Last7d => "7d",
            Window::Last30d => "30d",
        }
    }

    pub fn duration_seconds(&self) -> i64 {
        match self {
            Window::Last24h => 24 * 3_600,
            Window::Last7d => 7 * 86_400,
            Window::Last30d => 30 * 86_400,
        }
    }

    /// Number of calendar buckets the dashboard expects.
    pub fn required_buckets(&self) -> i64 {
        match self {
            Window::Last24h => 24,
            Window::Last7d => 7,
            Window::Last30d => 30,
        }
    }

    /// Range selector for `increase()` / `avg_over_time()`.
    pub fn range_selector(&self) -> &'static str {
        match self {
            Window::Last24h => "1h",
            _ => "24h",
        }
    }

    pub fn total_label(&self) -> String {
        format!("Total ({})", self.as_str())
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Daily,
    EntireWindow,
}

impl Resolution {
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Entire window") => Resolution::EntireWindow,
            _ => Resolution::Daily,
        }
    }
}

/// Parsed request parameters for one cost-allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationParams {
    pub window: Window,
    pub resolution: Resolution,
    pub aggregate: String,
    pub step: i64,
}

impl Default for AllocationParams {
    fn default() -> Self {
        Self {
            window: Window::default(),
            resolution: Resolution::default(),
            aggregate: DEFAULT_AGGREGATE.to_string(),
            step: DEFAULT_STEP_SECONDS,
        }
    }
}

/// One cost row. `group_key` goes out as `namespace`, the field the dashboard
/// reads for every aggregate dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCostRow {
    pub date: String,
    #[serde(rename = "namespace")]
    pub group_key: String,
    pub cpu_cost: f64,
    pub gpu_cost: f64,
    pub ram_cost: f64,
    pub pv_cost: f64,
    pub total_cost: f64,
}

/// Whether the numbers in a response came from the backend, were fabricated, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Synthetic,
    Mixed,
}

impl DataSource {
    pub fn from_counts(real_rows: usize, synthetic_rows: usize) -> Self {
        match (real_rows, synthetic_rows) {
            (r, s) if r > 0 && s > 0 => DataSource::Mixed,
            (_, s) if s > 0 => DataSource::Synthetic,
            _ => DataSource::Live,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CostAllocationResponse {
    pub data: Vec<DailyCostRow>,
    pub source: DataSource,
}
