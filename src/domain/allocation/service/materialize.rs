use std::collections::BTreeSet;

use chrono::DateTime;
use tracing::warn;

use crate::core::client::metrics_backend::RangeSeries;
use crate::core::util::cost_util::{CostUtil, SECONDS_PER_HOUR};
use crate::domain::allocation::model::DailyCostRow;
use crate::domain::allocation::service::query_stage::UsageSeries;
use crate::domain::common::model::UnitPrices;

/// Real rows plus the group keys observed in the CPU series (first-seen order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Materialized {
    pub rows: Vec<DailyCostRow>,
    pub group_keys: Vec<String>,
}

/// UTC calendar day of an epoch timestamp. Hourly grids collapse onto the day
/// as well; rows keep day resolution in every window. `None` when the
/// timestamp is outside chrono's representable range.
pub fn date_key(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// First series carrying `key` under `label`, then the sample at `timestamp`.
fn lookup(series: &[RangeSeries], label: &str, key: &str, timestamp: i64) -> f64 {
    series
        .iter()
        .find(|s| s.label(label) == Some(key))
        .and_then(|s| s.value_at(timestamp))
        .unwrap_or(0.0)
}

/// Cross-joins observed timestamps and group keys into cost rows. Memory is
/// assumed to share the CPU grid; pairs with no usage are dropped.
pub fn materialize(usage: &UsageSeries, aggregate: &str, step: i64, prices: &UnitPrices) -> Materialized {
    let mut group_keys: Vec<String> = Vec::new();
    let mut timestamps: BTreeSet<i64> = BTreeSet::new();

    for series in &usage.cpu {
        if let Some(key) = series.label(aggregate) {
            if !group_keys.iter().any(|k| k == key) {
                group_keys.push(key.to_string());
            }
        }
        timestamps.extend(series.samples.iter().map(|s| s.timestamp));
    }

    let interval_hours = step as f64 / SECONDS_PER_HOUR;
    let mut rows = Vec::new();

    for &ts in &timestamps {
        let Some(date) = date_key(ts) else {
            warn!("Dropping samples at out-of-range timestamp {}", ts);
            continue;
        };

        for key in &group_keys {
            let cpu_seconds = lookup(&usage.cpu, aggregate, key, ts);
            let mem_bytes = lookup(&usage.memory, aggregate, key, ts);

            let cpu_cost = CostUtil::compute_cpu_cost_from_core_seconds(cpu_seconds, prices);
            let ram_cost = CostUtil::compute_memory_cost(mem_bytes, interval_hours, prices);

            if cpu_cost > 0.0 || ram_cost > 0.0 {
                let cpu_cost = CostUtil::round4(cpu_cost);
                let ram_cost = CostUtil::round4(ram_cost);
                rows.push(DailyCostRow {
                    date: date.clone(),
                    group_key: key.clone(),
                    cpu_cost,
                    gpu_cost: 0.0,
                    ram_cost,
                    pv_cost: 0.0,
                    total_cost: CostUtil::round4(cpu_cost + ram_cost),
                });
            }
        }
    }

    Materialized { rows, group_keys }
}
