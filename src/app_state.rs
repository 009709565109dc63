use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::core::client::metrics_backend::MetricsBackend;
use crate::core::client::prometheus_client::PrometheusClient;
use crate::domain::allocation::service::AllocationService;
use crate::domain::metric::service::MetricSnapshotService;

macro_rules! delegate_async_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> anyhow::Result<$ret> {
                $path($($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub system_service: Arc<SystemService>,
    pub recommendation_service: Arc<RecommendationService>,
    pub allocation_service: Arc<AllocationService>,
    pub metric_service: Arc<MetricSnapshotService>,
}

pub fn build_app_state(config: &AppConfig) -> Result<AppState> {
    let client = PrometheusClient::new(config)?;
    if !client.is_configured() {
        tracing::warn!("PROMETHEUS_URL is not set; serving synthetic and mock data only");
    }
    Ok(AppState::with_backend(Arc::new(client)))
}

impl AppState {
    pub fn with_backend(backend: Arc<dyn MetricsBackend>) -> Self {
        Self {
            system_service: Arc::new(SystemService),
            recommendation_service: Arc::new(RecommendationService),
            allocation_service: Arc::new(AllocationService::new(backend.clone())),
            metric_service: Arc::new(MetricSnapshotService::new(backend)),
        }
    }
}

#[derive(Clone, Default)]
pub struct SystemService;

impl SystemService {
    delegate_async_service! {
        fn health() -> serde_json::Value => crate::domain::system::service::health_service::health;
    }
}

#[derive(Clone, Default)]
pub struct RecommendationService;

impl RecommendationService {
    delegate_async_service! {
        fn list_recommendations() -> Vec<crate::domain::recommendation::model::Recommendation> => crate::domain::recommendation::service::list_recommendations;
    }
}
