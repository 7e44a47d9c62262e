// HTTP client for the energy data service
use crate::application::energy_data_source::EnergyDataSource;
use crate::application::error::FetchError;
use crate::domain::panel::TimePeriod;
use crate::domain::payload::{
    ClusterHealthResponse, DailyAverageResponse, DeviceTypeAverage, TopUnit, UnitTypeDay,
    UnitTypeUsageQuery, ZipEnergyResponse,
};
use crate::infrastructure::api_request::ApiRequest;
use crate::infrastructure::config::ServiceSettings;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EnergyApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl EnergyApiClient {
    pub fn new(settings: &ServiceSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Issue one request and decode the JSON body. Transport errors, non-2xx
    /// statuses and undecodable bodies each map to one [`FetchError`] variant.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, request.path());

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header("Accept", "application/json");
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        tracing::debug!("{} {}", request.method, url);
        let response = builder.send().await.map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;
        tracing::debug!("Received {} bytes from {}", bytes.len(), url);

        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl EnergyDataSource for EnergyApiClient {
    async fn daily_average_energy(&self, city: &str) -> Result<DailyAverageResponse, FetchError> {
        let request = ApiRequest::get("/api/daily-average-energy/{city}").path_param("city", city);
        self.execute(&request).await
    }

    async fn cluster_health(&self) -> Result<ClusterHealthResponse, FetchError> {
        self.execute(&ApiRequest::get("/api/cluster-health")).await
    }

    async fn average_energy_by_zip(
        &self,
        city: &str,
        period: TimePeriod,
    ) -> Result<ZipEnergyResponse, FetchError> {
        let request = ApiRequest::get("/api/average-energy-zip/{city}/{timePeriod}")
            .path_param("city", city)
            .path_param("timePeriod", period.as_str());
        self.execute(&request).await
    }

    async fn average_usage_by_unit_type(
        &self,
        query: &UnitTypeUsageQuery,
    ) -> Result<Vec<UnitTypeDay>, FetchError> {
        let path = "/api/average-daily-usage-by-unit-type";
        let body = serde_json::to_value(query).map_err(|source| FetchError::Encode {
            url: path.to_string(),
            source,
        })?;
        let request = ApiRequest::post(path, body);
        self.execute(&request).await
    }

    async fn top_units(&self, city: &str) -> Result<Vec<TopUnit>, FetchError> {
        let request = ApiRequest::get("/top-units/{city}").path_param("city", city);
        self.execute(&request).await
    }

    async fn average_energy_by_device_type(
        &self,
        city: &str,
    ) -> Result<Vec<DeviceTypeAverage>, FetchError> {
        let request =
            ApiRequest::get("/average-energy-by-device-type/{city}").path_param("city", city);
        self.execute(&request).await
    }
}
