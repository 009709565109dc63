use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::core::client::metrics_backend::{MetricsBackend, RangeSeries, RangeSpec};
use crate::domain::allocation::model::{Window, DEFAULT_STEP_SECONDS, HOURLY_STEP_SECONDS};

/// Resolved time grid for the two range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPlan {
    pub window: Window,
    pub range: RangeSpec,
}

impl QueryPlan {
    pub fn resolve(window: Window, step: i64, now: DateTime<Utc>) -> Self {
        let end = now.timestamp();
        let start = end - window.duration_seconds();

        // A daily step leaves a 24h view with a single point.
        let step = if window == Window::Last24h && step == DEFAULT_STEP_SECONDS {
            HOURLY_STEP_SECONDS
        } else {
            step
        };

        Self {
            window,
            range: RangeSpec { start, end, step },
        }
    }

    pub fn step(&self) -> i64 {
        self.range.step
    }

    pub fn cpu_expr(&self, aggregate: &str) -> String {
        format!(
            "sum(increase(container_cpu_usage_seconds_total[{}])) by ({})",
            self.window.range_selector(),
            aggregate
        )
    }

    pub fn memory_expr(&self, aggregate: &str) -> String {
        format!(
            "sum(avg_over_time(container_memory_usage_bytes[{}])) by ({})",
            self.window.range_selector(),
            aggregate
        )
    }
}

/// Raw CPU and memory series sharing one timestamp grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageSeries {
    pub cpu: Vec<RangeSeries>,
    pub memory: Vec<RangeSeries>,
}

/// Issues both range queries concurrently. Any failure yields empty usage so
/// the caller falls through to backfill.
pub async fn fetch_usage(backend: &dyn MetricsBackend, plan: &QueryPlan, aggregate: &str) -> UsageSeries {
    let cpu_expr = plan.cpu_expr(aggregate);
    let memory_expr = plan.memory_expr(aggregate);

    let (cpu, memory) = tokio::join!(
        backend.query_range(&cpu_expr, plan.range),
        backend.query_range(&memory_expr, plan.range),
    );

    match (cpu, memory) {
        (Ok(cpu), Ok(memory)) => {
            debug!(
                "Usage query returned {} cpu / {} memory series (window={}, step={})",
                cpu.len(),
                memory.len(),
                plan.window,
                plan.step()
            );
            UsageSeries { cpu, memory }
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Historical usage query failed, continuing without real data: {}", e);
            UsageSeries::default()
        }
    }
}
