// HTTP request handlers
use crate::application::panel_controller::PanelController;
use crate::domain::panel::{PanelForm, PanelId};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(index))
        .route("/panels/:panel", get(get_panel).post(trigger_panel))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Page shell with every panel's current content
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.dashboard))
}

/// Current snapshot of one panel, without fetching
pub async fn get_panel(
    Path(panel): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match lookup(&state, &panel) {
        Ok(controller) => Json(controller.snapshot()).into_response(),
        Err(response) => response,
    }
}

/// Run one panel's fetch pipeline with the submitted controls
pub async fn trigger_panel(
    Path(panel): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(form): Json<PanelForm>,
) -> Response {
    let controller = match lookup(&state, &panel) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    match controller.submit(&form).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

fn lookup<'a>(state: &'a AppState, panel: &str) -> Result<&'a PanelController, Response> {
    let not_found = |message: String| {
        (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
    };
    let id = panel
        .parse::<PanelId>()
        .map_err(|e| not_found(e.to_string()))?;
    state
        .dashboard
        .controller(id)
        .ok_or_else(|| not_found(format!("Unknown panel '{}'", id)))
}
