use std::time::Duration;

#[toml_cfg::toml_config]
pub struct TomlConfig {
    #[default("http://192.168.1.8:8080")]
    pub base_url: &'static str,
    #[default(10000)]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build-time defaults, with the backend address overridable at runtime.
    pub fn from_env_var() -> Self {
        match std::env::var("GAMERECORD_BASE_URL") {
            Ok(base_url) if !base_url.is_empty() => Config::new(base_url),
            _ => Config::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: TOML_CONFIG.base_url.to_owned(),
            request_timeout: Duration::from_millis(TOML_CONFIG.request_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_default_timeout() {
        let config = Config::new("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Config::default().request_timeout);
    }
}
