use crate::chat::ChatTransport;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{CostAnalysis, CostPoint, Envelope, ForecastAnalysis, ServicePoint, UsageRow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CostAnalysisRequest<'a> {
    cost_data: &'a [CostPoint],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastAnalysisRequest<'a> {
    historical_data: &'a [CostPoint],
    cost_data: &'a [CostPoint],
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    question: &'a str,
}

/// Typed client for the dashboard backend. Every response arrives wrapped in
/// an envelope with the payload under `data`.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_seconds))
            .build()?;
        let base_url = Url::parse(&cfg.effective_base_url())?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let body: Envelope<T> = self
            .client
            .get(self.endpoint(path)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.data)
    }

    async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, AppError> {
        let body: Envelope<T> = self
            .client
            .post(self.endpoint(path)?)
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.data)
    }

    pub async fn cost_data(&self) -> Result<Vec<CostPoint>, AppError> {
        self.get_json("/api/costdata").await
    }

    pub async fn usage_data(&self) -> Result<Vec<UsageRow>, AppError> {
        self.get_json("/api/usage").await
    }

    pub async fn aws_data(&self) -> Result<Vec<ServicePoint>, AppError> {
        self.get_json("/api/awsdata").await
    }

    pub async fn forecast_data(&self) -> Result<Vec<CostPoint>, AppError> {
        self.get_json("/api/forecast").await
    }

    pub async fn cost_analysis(&self, cost_data: &[CostPoint]) -> Result<CostAnalysis, AppError> {
        self.post_json("/api/analysis/cost", &CostAnalysisRequest { cost_data })
            .await
    }

    pub async fn forecast_analysis(
        &self,
        historical_data: &[CostPoint],
        cost_data: &[CostPoint],
    ) -> Result<ForecastAnalysis, AppError> {
        self.post_json(
            "/api/analysis/forecast",
            &ForecastAnalysisRequest {
                historical_data,
                cost_data,
            },
        )
        .await
    }
}

#[async_trait]
impl ChatTransport for BackendClient {
    async fn send(&self, payload: &str) -> Result<String, AppError> {
        self.post_json("/api/chat", &ChatRequest { question: payload })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> BackendClient {
        let cfg = AppConfig {
            base_url: base.into(),
            ..AppConfig::default()
        };
        BackendClient::new(&cfg).expect("build client")
    }

    #[test]
    fn endpoints_join_against_the_base_url() {
        let client = client_for("http://localhost:4000");
        let url = client.endpoint("/api/costdata").expect("join url");
        assert_eq!(url.as_str(), "http://localhost:4000/api/costdata");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let cfg = AppConfig {
            base_url: "not a url".into(),
            ..AppConfig::default()
        };
        assert!(BackendClient::new(&cfg).is_err());
    }

    #[test]
    fn analysis_requests_use_camel_case_bodies() {
        let body = serde_json::to_string(&ForecastAnalysisRequest {
            historical_data: &[],
            cost_data: &[],
        })
        .expect("encode request");
        assert_eq!(body, "{\"historicalData\":[],\"costData\":[]}");
    }
}
