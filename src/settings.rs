use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "sjp_lookup";
const ENV_PREFIX: &str = "SJP";

/// Runtime settings: built-in defaults, then `sjp_lookup.toml` (optional),
/// then `SJP_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Parallel lookups in `batch`.
    pub concurrency: usize,
    pub max_retries: u32,
    pub backoff_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://sjp.pl".to_string(),
            timeout_secs: 10,
            user_agent: concat!("sjp_lookup/", env!("CARGO_PKG_VERSION")).to_string(),
            concurrency: 4,
            max_retries: 3,
            backoff_ms: 2000,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn defaults_without_sources() {
        let s = Settings::from_builder(Config::builder()).unwrap();
        assert_eq!(s.base_url, "https://sjp.pl");
        assert_eq!(s.timeout_secs, 10);
        assert_eq!(s.concurrency, 4);
        assert!(s.user_agent.starts_with("sjp_lookup/"));
    }

    #[test]
    fn file_overrides_some_keys() {
        let builder = Config::builder().add_source(File::from_str(
            "base_url = \"http://localhost:8080\"\nconcurrency = 16",
            FileFormat::Toml,
        ));
        let s = Settings::from_builder(builder).unwrap();
        assert_eq!(s.base_url, "http://localhost:8080");
        assert_eq!(s.concurrency, 16);
        assert_eq!(s.max_retries, 3);
    }

    #[test]
    fn bad_type_is_an_error() {
        let builder =
            Config::builder().add_source(File::from_str("timeout_secs = \"soon\"", FileFormat::Toml));
        assert!(Settings::from_builder(builder).is_err());
    }
}
