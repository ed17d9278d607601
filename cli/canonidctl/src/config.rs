use canonid_registry::RegistryConfig;

/// CLI configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_json: bool,
    pub registry: RegistryConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let log_level =
            std::env::var("CANONID_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        let log_json = std::env::var("CANONID_LOG_JSON")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            log_level,
            log_json,
            registry: RegistryConfig::from_env(),
        }
    }
}
