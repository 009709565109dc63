//! Cost-allocation pipeline: query → materialize → backfill → aggregate.

pub mod aggregate;
pub mod backfill;
pub mod materialize;
pub mod query_stage;

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;
use validator::Validate;

use crate::api::dto::cost_allocation_dto::CostAllocationQuery;
use crate::core::client::metrics_backend::MetricsBackend;
use crate::domain::allocation::model::{
    AllocationParams, CostAllocationResponse, DataSource, Resolution,
};
use crate::domain::allocation::service::aggregate::aggregate_rows;
use crate::domain::allocation::service::backfill::{backfill, sort_by_date};
use crate::domain::allocation::service::materialize::materialize;
use crate::domain::allocation::service::query_stage::{fetch_usage, QueryPlan, UsageSeries};
use crate::domain::common::model::UnitPrices;

pub struct AllocationService {
    backend: Arc<dyn MetricsBackend>,
    prices: UnitPrices,
}

impl AllocationService {
    pub fn new(backend: Arc<dyn MetricsBackend>) -> Self {
        Self::with_prices(backend, UnitPrices::default())
    }

    pub fn with_prices(backend: Arc<dyn MetricsBackend>, prices: UnitPrices) -> Self {
        Self { backend, prices }
    }

    /// Validates the request and runs the pipeline.
    pub async fn get_cost_allocation<R: Rng + Send + ?Sized>(
        &self,
        query: CostAllocationQuery,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<CostAllocationResponse> {
        query.validate()?;
        let params = query.into_params();
        Ok(self.run(&params, now, rng).await)
    }

    pub async fn run<R: Rng + Send + ?Sized>(
        &self,
        params: &AllocationParams,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> CostAllocationResponse {
        let plan = QueryPlan::resolve(params.window, params.step, now);
        let usage = fetch_usage(self.backend.as_ref(), &plan, &params.aggregate).await;
        self.build(params, &plan, &usage, now, rng)
    }

    /// Synchronous stages over already-fetched usage.
    pub fn build<R: Rng + ?Sized>(
        &self,
        params: &AllocationParams,
        plan: &QueryPlan,
        usage: &UsageSeries,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> CostAllocationResponse {
        let materialized = materialize(usage, &params.aggregate, plan.step(), &self.prices);
        let real_rows = materialized.rows.len();

        let mut rows = materialized.rows;
        let synthetic_rows = backfill(&mut rows, params.window, &materialized.group_keys, now, rng);
        sort_by_date(&mut rows);

        let source = DataSource::from_counts(real_rows, synthetic_rows);

        let data = match params.resolution {
            Resolution::Daily => rows,
            Resolution::EntireWindow => aggregate_rows(&rows, params.window),
        };

        info!(
            "Cost allocation window={} aggregate={} step={} real={} synthetic={} rows={}",
            params.window,
            params.aggregate,
            plan.step(),
            real_rows,
            synthetic_rows,
            data.len()
        );

        CostAllocationResponse { data, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::mock_backend::{series, MockBackend};
    use crate::core::util::cost_util::{CostUtil, BYTES_PER_GB};
    use crate::domain::allocation::model::{DailyCostRow, Window};
    use crate::domain::allocation::service::backfill::{base_cost, bucket_keys, FALLBACK_GROUP_KEYS};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn day_ts(d: u32) -> i64 {
        Utc.with_ymd_and_hms(2026, 10, d, 0, 0, 0).unwrap().timestamp()
    }

    fn params(window: Window, resolution: Resolution) -> AllocationParams {
        AllocationParams {
            window,
            resolution,
            ..AllocationParams::default()
        }
    }

    fn service(backend: MockBackend) -> AllocationService {
        AllocationService::new(Arc::new(backend))
    }

    fn live_backend() -> MockBackend {
        MockBackend::empty()
            .with_range(
                "container_cpu",
                vec![
                    series("namespace", "web", &[(day_ts(16), 7200.0), (day_ts(17), 3600.0)]),
                    series("namespace", "db", &[(day_ts(17), 36000.0)]),
                ],
            )
            .with_range(
                "container_memory",
                vec![series("namespace", "web", &[(day_ts(16), BYTES_PER_GB)])],
            )
    }

    fn assert_synthetic_bounds(row: &DailyCostRow) {
        let base = base_cost(&row.group_key);
        let eps = 1e-4;
        assert!(row.cpu_cost >= base * 0.7 * 0.8 - eps && row.cpu_cost <= base * 0.7 * 1.2 + eps);
        assert!(row.ram_cost >= base * 0.3 * 0.8 - eps && row.ram_cost <= base * 0.3 * 1.2 + eps);
    }

    #[tokio::test]
    async fn empty_backend_seven_days_gives_21_rows() {
        let svc = service(MockBackend::empty());
        let mut rng = StdRng::seed_from_u64(11);

        let resp = svc.run(&params(Window::Last7d, Resolution::Daily), now(), &mut rng).await;

        assert_eq!(resp.data.len(), 21);
        assert_eq!(resp.source, DataSource::Synthetic);
        for row in &resp.data {
            assert!(FALLBACK_GROUP_KEYS.contains(&row.group_key.as_str()));
            assert_synthetic_bounds(row);
            assert_eq!(row.total_cost, CostUtil::round4(row.cpu_cost + row.ram_cost));
        }
    }

    #[tokio::test]
    async fn failing_backend_degrades_to_backfill() {
        let svc = service(MockBackend::failing());
        let mut rng = StdRng::seed_from_u64(5);

        let resp = svc.run(&params(Window::Last30d, Resolution::Daily), now(), &mut rng).await;

        assert_eq!(resp.data.len(), 30 * 3);
        assert_eq!(resp.source, DataSource::Synthetic);
    }

    #[tokio::test]
    async fn entire_window_with_empty_backend_gives_three_totals() {
        let svc = service(MockBackend::empty());
        let mut rng = StdRng::seed_from_u64(99);

        let resp = svc
            .run(&params(Window::Last7d, Resolution::EntireWindow), now(), &mut rng)
            .await;

        assert_eq!(resp.data.len(), 3);
        let keys: Vec<_> = resp.data.iter().map(|r| r.group_key.as_str()).collect();
        assert_eq!(keys, FALLBACK_GROUP_KEYS.to_vec());
        for row in &resp.data {
            let base = base_cost(&row.group_key);
            assert_eq!(row.date, "Total (7d)");
            assert!(row.total_cost >= 7.0 * base * 0.8 - 1e-3);
            assert!(row.total_cost <= 7.0 * base * 1.2 + 1e-3);
        }
    }

    #[tokio::test]
    async fn every_day_is_covered() {
        let svc = service(live_backend());
        let mut rng = StdRng::seed_from_u64(2);

        let resp = svc.run(&params(Window::Last7d, Resolution::Daily), now(), &mut rng).await;

        let real_days = ["2026-10-16", "2026-10-17"];
        for day in bucket_keys(Window::Last7d, now()) {
            let on_day: HashSet<_> = resp
                .data
                .iter()
                .filter(|r| r.date == day)
                .map(|r| r.group_key.as_str())
                .collect();
            assert!(!on_day.is_empty(), "no rows on {}", day);
            if !real_days.contains(&day.as_str()) {
                assert_eq!(on_day, HashSet::from(["web", "db"]), "{}", day);
            }
        }
        assert_eq!(resp.source, DataSource::Mixed);
    }

    #[tokio::test]
    async fn real_days_are_not_backfilled() {
        let svc = service(live_backend());
        let mut rng = StdRng::seed_from_u64(3);

        let resp = svc.run(&params(Window::Last7d, Resolution::Daily), now(), &mut rng).await;

        let day16: Vec<_> = resp.data.iter().filter(|r| r.date == "2026-10-16").collect();
        assert_eq!(day16.len(), 1);
        assert_eq!(day16[0].group_key, "web");
        assert_eq!(day16[0].cpu_cost, 0.1);
        assert_eq!(day16[0].ram_cost, 0.12);
        assert_eq!(day16[0].total_cost, 0.22);

        let day17: Vec<_> = resp.data.iter().filter(|r| r.date == "2026-10-17").collect();
        assert_eq!(day17.len(), 2);

        // 5 empty days × 2 observed keys
        assert_eq!(resp.data.len(), 3 + 10);

        let dates: Vec<_> = resp.data.iter().map(|r| r.date.clone()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn real_rows_are_identical_across_runs() {
        let svc = service(live_backend());
        let p = params(Window::Last7d, Resolution::Daily);

        let a = svc.run(&p, now(), &mut StdRng::seed_from_u64(1)).await;
        let b = svc.run(&p, now(), &mut StdRng::seed_from_u64(2)).await;

        let real = |rows: &[DailyCostRow]| -> Vec<DailyCostRow> {
            rows.iter()
                .filter(|r| r.date == "2026-10-16" || r.date == "2026-10-17")
                .cloned()
                .collect()
        };
        assert_eq!(real(&a.data), real(&b.data));
        for row in a.data.iter().filter(|r| r.date != "2026-10-16" && r.date != "2026-10-17") {
            assert_synthetic_bounds(row);
        }
    }

    #[tokio::test]
    async fn aggregation_matches_daily_totals() {
        let svc = service(live_backend());
        let mut rng = StdRng::seed_from_u64(8);
        let usage = UsageSeries {
            cpu: vec![series("namespace", "web", &[(day_ts(16), 7200.0)])],
            memory: vec![],
        };
        let daily_params = params(Window::Last30d, Resolution::Daily);
        let plan = QueryPlan::resolve(daily_params.window, daily_params.step, now());

        let daily = svc.build(&daily_params, &plan, &usage, now(), &mut rng);
        let totals = aggregate_rows(&daily.data, Window::Last30d);

        for agg in &totals {
            let sum: f64 = daily
                .data
                .iter()
                .filter(|r| r.group_key == agg.group_key)
                .map(|r| r.total_cost)
                .sum();
            assert!((sum - agg.total_cost).abs() <= 1e-4);
        }
    }

    #[tokio::test]
    async fn twenty_four_hours_without_data_is_empty() {
        let svc = service(MockBackend::empty());
        let mut rng = StdRng::seed_from_u64(4);

        let resp = svc.run(&params(Window::Last24h, Resolution::Daily), now(), &mut rng).await;

        assert!(resp.data.is_empty());
        assert_eq!(resp.source, DataSource::Live);
    }

    #[tokio::test]
    async fn twenty_four_hours_uses_hourly_grid() {
        let backend = Arc::new(MockBackend::empty());
        let svc = AllocationService::new(backend.clone());
        let mut rng = StdRng::seed_from_u64(4);

        svc.run(&params(Window::Last24h, Resolution::Daily), now(), &mut rng).await;

        let calls = backend.recorded_calls();
        assert_eq!(calls.len(), 2);
        for (expr, range) in calls {
            assert!(expr.contains("[1h]"));
            assert_eq!(range.map(|r| r.step), Some(3600));
        }
    }

    #[tokio::test]
    async fn invalid_aggregate_is_rejected_before_querying() {
        let backend = Arc::new(MockBackend::empty());
        let svc = AllocationService::new(backend.clone());
        let query = CostAllocationQuery {
            aggregate: Some("namespace) or vector(1".into()),
            ..Default::default()
        };

        let err = svc
            .get_cost_allocation(query, now(), &mut StdRng::seed_from_u64(0))
            .await
            .unwrap_err();

        assert!(err.is::<validator::ValidationErrors>());
        assert!(backend.recorded_calls().is_empty());
    }
}
