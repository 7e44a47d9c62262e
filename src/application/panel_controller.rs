// Panel controller - runs one panel's fetch, normalize and render pipeline
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::application::energy_data_source::EnergyDataSource;
use crate::application::error::PanelError;
use crate::application::normalizer::{
    normalize_cluster_health, normalize_daily_average, normalize_device_types,
    normalize_top_units, normalize_unit_type_usage, normalize_zip_energy,
};
use crate::domain::panel::{PanelForm, PanelId, PanelRequest, PanelState, ValidationError};
use crate::domain::payload::UnitTypeUsageQuery;
use crate::domain::records::PanelData;
use crate::presentation::panel_view::{render_panel, target_for};
use crate::presentation::render_target::RenderTarget;

/// What a panel currently shows, as returned to the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub panel: PanelId,
    pub state: PanelState,
    pub loading: bool,
    pub error: Option<String>,
    pub html: String,
}

/// Per-panel state. The lock around it is never held across an await.
struct PanelSlot {
    state: PanelState,
    /// State left by the last applied completion, restored if an attempt is cancelled.
    settled: PanelState,
    loading: bool,
    latest_request: u64,
    last_error: Option<String>,
    target: RenderTarget,
}

impl PanelSlot {
    fn snapshot(&self, panel: PanelId) -> PanelSnapshot {
        PanelSnapshot {
            panel,
            state: self.state,
            loading: self.loading,
            error: self.last_error.clone(),
            html: self.target.to_html(),
        }
    }
}

pub struct PanelController {
    id: PanelId,
    source: Arc<dyn EnergyDataSource>,
    cities: Arc<Vec<String>>,
    slot: Mutex<PanelSlot>,
}

impl PanelController {
    pub fn new(id: PanelId, source: Arc<dyn EnergyDataSource>, cities: Arc<Vec<String>>) -> Self {
        Self {
            id,
            source,
            cities,
            slot: Mutex::new(PanelSlot {
                state: PanelState::Idle,
                settled: PanelState::Idle,
                loading: false,
                latest_request: 0,
                last_error: None,
                target: target_for(id),
            }),
        }
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        self.slot.lock().snapshot(self.id)
    }

    /// Validate the submitted controls and, if they pass, run the pipeline.
    /// A rejected form issues no request and leaves the panel untouched.
    pub async fn submit(&self, form: &PanelForm) -> Result<PanelSnapshot, ValidationError> {
        let request = PanelRequest::from_form(self.id, form, &self.cities).map_err(|e| {
            tracing::warn!("Rejected {} submission: {}", self.id, e);
            e
        })?;
        self.trigger(request).await
    }

    /// Run one fetch attempt. Fetch and render failures are recorded in the
    /// panel state rather than returned.
    pub async fn trigger(&self, request: PanelRequest) -> Result<PanelSnapshot, ValidationError> {
        if request.panel() != self.id {
            return Err(ValidationError::UnknownPanel(request.panel().to_string()));
        }

        let pending = self.begin();
        tracing::debug!("Panel {} issued request {}", self.id, pending.ticket);
        let outcome = self.fetch_and_normalize(&request).await;
        Ok(pending.finish(outcome))
    }

    fn begin(&self) -> PendingRequest<'_> {
        let mut slot = self.slot.lock();
        slot.latest_request += 1;
        slot.state = PanelState::Loading;
        slot.loading = true;
        PendingRequest {
            controller: self,
            ticket: slot.latest_request,
            finished: false,
        }
    }

    /// The attempt's future was dropped before it finished, e.g. the client
    /// disconnected. If it was still the latest, the panel goes back to its
    /// last settled state.
    fn abandon(&self, ticket: u64) {
        let mut slot = self.slot.lock();
        if ticket != slot.latest_request {
            return;
        }
        tracing::debug!("Request {} for {} was cancelled", ticket, self.id);
        slot.loading = false;
        slot.state = slot.settled;
    }

    fn complete(&self, ticket: u64, outcome: Result<PanelData, PanelError>) -> PanelSnapshot {
        let mut slot = self.slot.lock();
        if ticket != slot.latest_request {
            tracing::debug!(
                "Dropping stale response {} for {} (latest is {})",
                ticket,
                self.id,
                slot.latest_request
            );
            return slot.snapshot(self.id);
        }

        slot.loading = false;
        // Draw into a copy so a failed render leaves the previous content intact.
        let rendered = outcome.and_then(|data| {
            let mut target = slot.target.clone();
            render_panel(&mut target, &data)?;
            Ok((target, data.len()))
        });

        match rendered {
            Ok((target, count)) => {
                slot.target = target;
                slot.state = PanelState::Rendered;
                slot.settled = PanelState::Rendered;
                slot.last_error = None;
                tracing::info!("Rendered {} with {} records", self.id, count);
            }
            Err(e) => {
                tracing::error!("Error loading {}: {}", self.id, e);
                slot.state = PanelState::Failed;
                slot.settled = PanelState::Failed;
                slot.last_error = Some(e.to_string());
            }
        }
        slot.snapshot(self.id)
    }

    async fn fetch_and_normalize(&self, request: &PanelRequest) -> Result<PanelData, PanelError> {
        let data = match request {
            PanelRequest::DailyAverage { city } => {
                let payload = self.source.daily_average_energy(city).await?;
                tracing::debug!("Fetched {} daily averages for {}", payload.len(), city);
                PanelData::DailyAverage(normalize_daily_average(&payload)?)
            }
            PanelRequest::ClusterHealth => {
                let payload = self.source.cluster_health().await?;
                tracing::debug!("Fetched {} cluster nodes", payload.nodes.len());
                PanelData::ClusterHealth(normalize_cluster_health(&payload))
            }
            PanelRequest::ZipHeatmap { city, period } => {
                let payload = self.source.average_energy_by_zip(city, *period).await?;
                tracing::debug!("Fetched {} postal codes for {}", payload.len(), city);
                PanelData::ZipHeatmap(normalize_zip_energy(&payload)?)
            }
            PanelRequest::UnitTypeUsage {
                city,
                start_date,
                end_date,
            } => {
                let query = UnitTypeUsageQuery {
                    city_name: city.clone(),
                    start_date: start_date.clone(),
                    end_date: end_date.clone(),
                };
                let payload = self.source.average_usage_by_unit_type(&query).await?;
                tracing::debug!("Fetched {} unit type days for {}", payload.len(), city);
                PanelData::UnitTypeUsage(normalize_unit_type_usage(&payload))
            }
            PanelRequest::TopUnits { city } => {
                let payload = self.source.top_units(city).await?;
                PanelData::TopUnits(normalize_top_units(&payload))
            }
            PanelRequest::DeviceType { city } => {
                let payload = self.source.average_energy_by_device_type(city).await?;
                PanelData::DeviceType(normalize_device_types(&payload))
            }
        };
        Ok(data)
    }
}

/// One issued request. Dropping it without [`PendingRequest::finish`] clears
/// the loading flag, so a cancelled attempt never leaves the panel loading.
struct PendingRequest<'a> {
    controller: &'a PanelController,
    ticket: u64,
    finished: bool,
}

impl PendingRequest<'_> {
    fn finish(mut self, outcome: Result<PanelData, PanelError>) -> PanelSnapshot {
        self.finished = true;
        self.controller.complete(self.ticket, outcome)
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.controller.abandon(self.ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::FetchError;
    use crate::domain::panel::TimePeriod;
    use crate::domain::payload::{
        ClusterHealthResponse, DailyAverageResponse, DeviceTypeAverage, TopUnit, UnitTypeDay,
        ZipEnergyResponse,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    /// Scripted daily-average response; `None` payload answers with a 500.
    struct Scripted {
        gate: Option<oneshot::Receiver<()>>,
        payload: Option<DailyAverageResponse>,
    }

    #[derive(Default)]
    struct FakeSource {
        calls: AtomicUsize,
        daily: Mutex<VecDeque<Scripted>>,
    }

    impl FakeSource {
        fn script(&self, gate: Option<oneshot::Receiver<()>>, payload: Option<&str>) {
            self.daily.lock().push_back(Scripted {
                gate,
                payload: payload.map(|p| serde_json::from_str(p).unwrap()),
            });
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EnergyDataSource for FakeSource {
        async fn daily_average_energy(
            &self,
            _city: &str,
        ) -> Result<DailyAverageResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let scripted = self.daily.lock().pop_front().expect("unscripted call");
            if let Some(gate) = scripted.gate {
                gate.await.unwrap();
            }
            scripted.payload.ok_or(FetchError::Status {
                url: "/api/daily-average-energy/Toronto".into(),
                status: 500,
                body: "boom".into(),
            })
        }

        async fn cluster_health(&self) -> Result<ClusterHealthResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ClusterHealthResponse::default())
        }

        async fn average_energy_by_zip(
            &self,
            _city: &str,
            _period: TimePeriod,
        ) -> Result<ZipEnergyResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ZipEnergyResponse::default())
        }

        async fn average_usage_by_unit_type(
            &self,
            _query: &UnitTypeUsageQuery,
        ) -> Result<Vec<UnitTypeDay>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn top_units(&self, _city: &str) -> Result<Vec<TopUnit>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn average_energy_by_device_type(
            &self,
            _city: &str,
        ) -> Result<Vec<DeviceTypeAverage>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    const JANUARY: &str = r#"{"2024-01-01": {"on_peak": 12.5, "off_peak": 3.2}}"#;
    const FEBRUARY: &str = r#"{"2024-02-01": {"on_peak": 8.0, "off_peak": 1.5}}"#;

    fn controller(id: PanelId, source: Arc<FakeSource>) -> Arc<PanelController> {
        Arc::new(PanelController::new(
            id,
            source,
            Arc::new(vec!["Toronto".to_string()]),
        ))
    }

    fn toronto() -> PanelForm {
        PanelForm {
            city: Some("Toronto".to_string()),
            ..Default::default()
        }
    }

    async fn wait_for_calls(source: &FakeSource, n: usize) {
        while source.calls() < n {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_success_renders_and_clears_loading() {
        let source = Arc::new(FakeSource::default());
        source.script(None, Some(JANUARY));
        let panel = controller(PanelId::DailyAverage, source.clone());

        assert_eq!(panel.snapshot().state, PanelState::Idle);
        let snapshot = panel.submit(&toronto()).await.unwrap();

        assert_eq!(snapshot.state, PanelState::Rendered);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error, None);
        assert!(snapshot.html.contains("Jan 01"));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_start_date_issues_no_request() {
        let source = Arc::new(FakeSource::default());
        let panel = controller(PanelId::UnitTypeUsage, source.clone());

        let err = panel.submit(&toronto()).await.unwrap_err();

        assert_eq!(err, ValidationError::MissingStartDate);
        assert_eq!(source.calls(), 0);
        let snapshot = panel.snapshot();
        assert_eq!(snapshot.state, PanelState::Idle);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_render() {
        let source = Arc::new(FakeSource::default());
        source.script(None, Some(JANUARY));
        source.script(None, None);
        let panel = controller(PanelId::DailyAverage, source.clone());

        let rendered = panel.submit(&toronto()).await.unwrap();
        let failed = panel.submit(&toronto()).await.unwrap();

        assert_eq!(failed.state, PanelState::Failed);
        assert!(!failed.loading);
        assert!(failed.error.as_deref().unwrap().contains("status 500"));
        assert_eq!(failed.html, rendered.html);
    }

    #[tokio::test]
    async fn test_unparsable_date_fails_the_panel() {
        let source = Arc::new(FakeSource::default());
        source.script(None, Some(r#"{"yesterday": {"on_peak": 1.0, "off_peak": 2.0}}"#));
        let panel = controller(PanelId::DailyAverage, source.clone());

        let snapshot = panel.submit(&toronto()).await.unwrap();

        assert_eq!(snapshot.state, PanelState::Failed);
        assert!(snapshot.error.unwrap().contains("yesterday"));
        assert!(!snapshot.html.contains("<svg"));
    }

    #[tokio::test]
    async fn test_stale_response_is_dropped() {
        let source = Arc::new(FakeSource::default());
        let (release_first, first_gate) = oneshot::channel();
        let (release_second, second_gate) = oneshot::channel();
        source.script(Some(first_gate), Some(JANUARY));
        source.script(Some(second_gate), Some(FEBRUARY));
        let panel = controller(PanelId::DailyAverage, source.clone());

        let first = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit(&toronto()).await }
        });
        wait_for_calls(&source, 1).await;
        let second = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit(&toronto()).await }
        });
        wait_for_calls(&source, 2).await;
        assert!(panel.snapshot().loading);

        release_second.send(()).unwrap();
        let newest = second.await.unwrap().unwrap();
        assert_eq!(newest.state, PanelState::Rendered);
        assert!(newest.html.contains("Feb 01"));

        release_first.send(()).unwrap();
        let stale = first.await.unwrap().unwrap();
        assert!(stale.html.contains("Feb 01"));
        assert!(!stale.html.contains("Jan 01"));
        assert!(!panel.snapshot().loading);
    }

    #[tokio::test]
    async fn test_loading_stays_on_until_latest_completes() {
        let source = Arc::new(FakeSource::default());
        let (release_first, first_gate) = oneshot::channel();
        let (release_second, second_gate) = oneshot::channel();
        source.script(Some(first_gate), Some(JANUARY));
        source.script(Some(second_gate), None);
        let panel = controller(PanelId::DailyAverage, source.clone());

        let first = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit(&toronto()).await }
        });
        wait_for_calls(&source, 1).await;
        let second = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit(&toronto()).await }
        });
        wait_for_calls(&source, 2).await;

        release_first.send(()).unwrap();
        let stale = first.await.unwrap().unwrap();
        assert!(stale.loading);
        assert_eq!(stale.state, PanelState::Loading);

        release_second.send(()).unwrap();
        let latest = second.await.unwrap().unwrap();
        assert!(!latest.loading);
        assert_eq!(latest.state, PanelState::Failed);
    }

    #[tokio::test]
    async fn test_cancelled_attempt_clears_loading() {
        let source = Arc::new(FakeSource::default());
        let (_release, gate) = oneshot::channel();
        source.script(None, Some(JANUARY));
        source.script(Some(gate), Some(FEBRUARY));
        let panel = controller(PanelId::DailyAverage, source.clone());
        let rendered = panel.submit(&toronto()).await.unwrap();

        let task = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit(&toronto()).await }
        });
        wait_for_calls(&source, 2).await;
        assert!(panel.snapshot().loading);

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        let snapshot = panel.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.state, PanelState::Rendered);
        assert_eq!(snapshot.html, rendered.html);
    }

    #[tokio::test]
    async fn test_cancelled_stale_attempt_leaves_latest_loading() {
        let source = Arc::new(FakeSource::default());
        let (_release_first, first_gate) = oneshot::channel();
        let (release_second, second_gate) = oneshot::channel();
        source.script(Some(first_gate), Some(JANUARY));
        source.script(Some(second_gate), Some(FEBRUARY));
        let panel = controller(PanelId::DailyAverage, source.clone());

        let first = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit(&toronto()).await }
        });
        wait_for_calls(&source, 1).await;
        let second = tokio::spawn({
            let panel = panel.clone();
            async move { panel.submit(&toronto()).await }
        });
        wait_for_calls(&source, 2).await;

        first.abort();
        assert!(first.await.unwrap_err().is_cancelled());
        assert!(panel.snapshot().loading);

        release_second.send(()).unwrap();
        let latest = second.await.unwrap().unwrap();
        assert!(!latest.loading);
        assert!(latest.html.contains("Feb 01"));
    }

    #[tokio::test]
    async fn test_empty_cluster_shows_header_only_table() {
        let source = Arc::new(FakeSource::default());
        let panel = controller(PanelId::ClusterHealth, source.clone());

        let snapshot = panel.submit(&PanelForm::default()).await.unwrap();

        assert_eq!(snapshot.state, PanelState::Rendered);
        assert!(snapshot.html.contains(r#"<table class="data-table">"#));
        assert!(snapshot.html.contains("<th>Ping (ms)</th>"));
        assert!(snapshot.html.contains("<tbody></tbody>"));
    }

    #[tokio::test]
    async fn test_request_for_another_panel_is_rejected() {
        let source = Arc::new(FakeSource::default());
        let panel = controller(PanelId::DailyAverage, source.clone());

        let err = panel.trigger(PanelRequest::ClusterHealth).await.unwrap_err();

        assert_eq!(err, ValidationError::UnknownPanel("cluster-health".into()));
        assert_eq!(source.calls(), 0);
    }
}
