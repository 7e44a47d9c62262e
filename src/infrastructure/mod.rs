// Infrastructure layer - External dependencies and adapters
pub mod api_request;
pub mod color;
pub mod config;
pub mod energy_api_client;
pub mod scale;
pub mod svg;
