// Application layer - panel pipeline and use cases
pub mod dashboard;
pub mod energy_data_source;
pub mod error;
pub mod normalizer;
pub mod panel_controller;
pub mod scale_builder;
