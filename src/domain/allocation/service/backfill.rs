use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;

use crate::core::util::cost_util::CostUtil;
use crate::domain::allocation::model::{DailyCostRow, Window};

pub const FALLBACK_GROUP_KEYS: [&str; 3] = ["kube-system", "default", "prometheus"];

const SYSTEM_BASE_COST: f64 = 0.05;
const DEFAULT_BASE_COST: f64 = 0.02;
const CPU_SHARE: f64 = 0.7;
const RAM_SHARE: f64 = 0.3;
const VARIANCE_LOW: f64 = 0.8;
const VARIANCE_HIGH: f64 = 1.2;

pub fn base_cost(group_key: &str) -> f64 {
    if group_key == "kube-system" {
        SYSTEM_BASE_COST
    } else {
        DEFAULT_BASE_COST
    }
}

/// Bucket keys for the trailing window, oldest first. For `24h` the buckets
/// step by hour but are still day-labelled, so neighbours collide.
pub fn bucket_keys(window: Window, now: DateTime<Utc>) -> Vec<String> {
    (0..window.required_buckets())
        .rev()
        .map(|i| {
            let offset = match window {
                Window::Last24h => Duration::hours(i),
                _ => Duration::days(i),
            };
            (now - offset).format("%Y-%m-%d").to_string()
        })
        .collect()
}

pub fn synthetic_row<R: Rng + ?Sized>(date: &str, group_key: &str, rng: &mut R) -> DailyCostRow {
    let base = base_cost(group_key);
    let variance = rng.gen_range(VARIANCE_LOW..VARIANCE_HIGH);

    let cpu = CostUtil::round4(base * CPU_SHARE * variance);
    let ram = CostUtil::round4(base * RAM_SHARE * variance);

    DailyCostRow {
        date: date.to_string(),
        group_key: group_key.to_string(),
        cpu_cost: cpu,
        gpu_cost: 0.0,
        ram_cost: ram,
        pv_cost: 0.0,
        total_cost: CostUtil::round4(cpu + ram),
    }
}

/// Appends synthetic rows for every day in the window that has no real row.
/// Skipped entirely for `24h`. Returns the number of rows added.
pub fn backfill<R: Rng + ?Sized>(
    rows: &mut Vec<DailyCostRow>,
    window: Window,
    group_keys: &[String],
    now: DateTime<Utc>,
    rng: &mut R,
) -> usize {
    if window == Window::Last24h {
        debug!("Backfill skipped for 24h window ({} real rows)", rows.len());
        return 0;
    }

    let existing: HashSet<String> = rows.iter().map(|r| r.date.clone()).collect();

    let active: Vec<&str> = if group_keys.is_empty() {
        FALLBACK_GROUP_KEYS.to_vec()
    } else {
        group_keys.iter().map(String::as_str).collect()
    };

    let before = rows.len();
    for key in bucket_keys(window, now) {
        if existing.contains(&key) {
            continue;
        }
        for group_key in &active {
            rows.push(synthetic_row(&key, group_key, rng));
        }
    }

    let added = rows.len() - before;
    if added > 0 {
        debug!("Backfilled {} synthetic row(s) for window {}", added, window);
    }
    added
}

/// Stable sort by `YYYY-MM-DD` label, which is also chronological.
pub fn sort_by_date(rows: &mut [DailyCostRow]) {
    rows.sort_by(|a, b| a.date.cmp(&b.date));
}
