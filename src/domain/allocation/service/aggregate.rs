use indexmap::IndexMap;

use crate::core::util::cost_util::CostUtil;
use crate::domain::allocation::model::{DailyCostRow, Window};

#[derive(Debug, Clone, Copy, Default)]
struct CostAccumulator {
    cpu: f64,
    gpu: f64,
    ram: f64,
    pv: f64,
    total: f64,
}

impl CostAccumulator {
    fn add(&mut self, row: &DailyCostRow) {
        self.cpu += row.cpu_cost;
        self.gpu += row.gpu_cost;
        self.ram += row.ram_cost;
        self.pv += row.pv_cost;
        self.total += row.total_cost;
    }
}

/// Collapses rows into one `Total (<window>)` row per group key, in
/// first-seen order. Each field is summed independently, then rounded.
pub fn aggregate_rows(rows: &[DailyCostRow], window: Window) -> Vec<DailyCostRow> {
    let mut acc: IndexMap<String, CostAccumulator> = IndexMap::new();

    for row in rows {
        acc.entry(row.group_key.clone()).or_default().add(row);
    }

    let label = window.total_label();

    acc.into_iter()
        .map(|(group_key, sum)| DailyCostRow {
            date: label.clone(),
            group_key,
            cpu_cost: CostUtil::round4(sum.cpu),
            gpu_cost: CostUtil::round4(sum.gpu),
            ram_cost: CostUtil::round4(sum.ram),
            pv_cost: CostUtil::round4(sum.pv),
            total_cost: CostUtil::round4(sum.total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, key: &str, cpu: f64, ram: f64) -> DailyCostRow {
        DailyCostRow {
            date: date.into(),
            group_key: key.into(),
            cpu_cost: cpu,
            gpu_cost: 0.0,
            ram_cost: ram,
            pv_cost: 0.0,
            total_cost: CostUtil::round4(cpu + ram),
        }
    }

    #[test]
    fn one_row_per_key_in_first_seen_order() {
        let rows = vec![
            row("2026-10-16", "web", 0.1, 0.01),
            row("2026-10-16", "db", 0.2, 0.02),
            row("2026-10-17", "web", 0.3, 0.03),
        ];

        let out = aggregate_rows(&rows, Window::Last7d);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].group_key, "web");
        assert_eq!(out[1].group_key, "db");
        assert!(out.iter().all(|r| r.date == "Total (7d)"));
        assert_eq!(out[0].cpu_cost, 0.4);
        assert_eq!(out[0].ram_cost, 0.04);
        assert_eq!(out[0].total_cost, 0.44);
        assert_eq!(out[1].total_cost, 0.22);
    }

    #[test]
    fn totals_match_daily_sums() {
        let rows: Vec<_> = (0..30)
            .map(|i| row(&format!("day-{:02}", i), if i % 2 == 0 { "a" } else { "b" }, 0.0123 * i as f64, 0.0045))
            .collect();

        let out = aggregate_rows(&rows, Window::Last30d);

        for agg in &out {
            let daily: f64 = rows
                .iter()
                .filter(|r| r.group_key == agg.group_key)
                .map(|r| r.total_cost)
                .sum();
            assert!((daily - agg.total_cost).abs() <= 1e-4);
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate_rows(&[], Window::Last24h).is_empty());
    }
}
