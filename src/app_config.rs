use crate::solax::{DEFAULT_PORT, Variant};
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    inverter: Inverter,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn inverter(&self) -> &Inverter {
        &self.inverter
    }
}

#[derive(Debug, Deserialize)]
pub struct Inverter {
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    timeout: Duration,
    variant: Option<Variant>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> Duration {
    Duration::from_secs(5)
}

impl Inverter {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The variant to fetch from directly, skipping discovery.
    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                inverter: Inverter {
                    host: "192.168.1.10".to_string(),
                    port: DEFAULT_PORT,
                    timeout: Duration::from_secs(5),
                    variant: None,
                },
            },
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.inverter.timeout = timeout;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use pretty_assertions::assert_eq;

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn applies_defaults_for_port_timeout_and_variant() -> Result<(), ConfigError> {
        let config = from_toml(
            r#"
            [inverter]
            host = "192.168.1.20"
            "#,
        )?;

        assert_eq!(config.inverter().host(), "192.168.1.20");
        assert_eq!(config.inverter().port(), 80);
        assert_eq!(config.inverter().timeout(), Duration::from_secs(5));
        assert_eq!(config.inverter().variant(), None);

        Ok(())
    }

    #[test]
    fn reads_all_inverter_settings() -> Result<(), ConfigError> {
        let config = from_toml(
            r#"
            [inverter]
            host = "solax.local"
            port = 8080
            timeout = "1500ms"
            variant = "x3"
            "#,
        )?;

        assert_eq!(config.inverter().host(), "solax.local");
        assert_eq!(config.inverter().port(), 8080);
        assert_eq!(config.inverter().timeout(), Duration::from_millis(1500));
        assert_eq!(config.inverter().variant(), Some(Variant::X3));

        Ok(())
    }

    #[test]
    fn requires_a_host() {
        assert!(from_toml("[inverter]\nport = 80").is_err());
    }
}
