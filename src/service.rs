use crate::api::BackendClient;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::Snapshot;
use chrono::Utc;

/// Fetch orchestration for one dashboard refresh cycle.
#[derive(Debug, Clone)]
pub struct DashboardService {
    client: BackendClient,
}

impl DashboardService {
    pub fn new(cfg: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            client: BackendClient::new(cfg)?,
        })
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    /// Fetch all four series concurrently. Any single failure fails the
    /// refresh as a whole; callers keep showing the previous snapshot.
    pub async fn fetch_all(&self) -> Result<Snapshot, AppError> {
        let (cost, forecast, services, usage) = tokio::join!(
            self.client.cost_data(),
            self.client.forecast_data(),
            self.client.aws_data(),
            self.client.usage_data(),
        );

        Ok(Snapshot {
            cost: cost?,
            forecast: forecast?,
            services: services?,
            usage: usage?,
            fetched_at: Some(Utc::now()),
        })
    }
}
