// Configuration loading - file and environment layers over built-in defaults
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub service: ServiceSettings,
    pub server: ServerSettings,
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
}

/// Where the energy data service lives.
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cities() -> Vec<String> {
    ["Toronto", "Vancouver", "Montreal", "Calgary", "Ottawa", "Edmonton"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = base_builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn base_builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("service.base_url", "http://127.0.0.1:8000")?
        .set_default("service.timeout_secs", 30)?
        .set_default("server.bind", "0.0.0.0:7000")?)
}
