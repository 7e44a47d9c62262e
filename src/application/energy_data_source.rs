// Data source trait for the energy service endpoints
use crate::application::error::FetchError;
use crate::domain::panel::TimePeriod;
use crate::domain::payload::{
    ClusterHealthResponse, DailyAverageResponse, DeviceTypeAverage, TopUnit, UnitTypeDay,
    UnitTypeUsageQuery, ZipEnergyResponse,
};
use async_trait::async_trait;

/// One method per remote endpoint. Each call is a single attempt; retries are
/// not part of this contract.
#[async_trait]
pub trait EnergyDataSource: Send + Sync {
    /// Daily on-peak/off-peak averages for a city
    async fn daily_average_energy(&self, city: &str) -> Result<DailyAverageResponse, FetchError>;

    /// Replica-set node status
    async fn cluster_health(&self) -> Result<ClusterHealthResponse, FetchError>;

    /// Per-postal-code averages grouped by `period`
    async fn average_energy_by_zip(
        &self,
        city: &str,
        period: TimePeriod,
    ) -> Result<ZipEnergyResponse, FetchError>;

    async fn average_usage_by_unit_type(
        &self,
        query: &UnitTypeUsageQuery,
    ) -> Result<Vec<UnitTypeDay>, FetchError>;

    async fn top_units(&self, city: &str) -> Result<Vec<TopUnit>, FetchError>;

    async fn average_energy_by_device_type(
        &self,
        city: &str,
    ) -> Result<Vec<DeviceTypeAverage>, FetchError>;
}
