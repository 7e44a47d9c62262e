// Application state for HTTP handlers
use crate::application::dashboard::Dashboard;

pub struct AppState {
    pub dashboard: Dashboard,
}
