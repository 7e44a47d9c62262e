// Presentation layer - render targets, renderers and the HTTP host
pub mod app_state;
pub mod charts;
pub mod handlers;
pub mod page;
pub mod panel_view;
pub mod render_target;
pub mod tables;
