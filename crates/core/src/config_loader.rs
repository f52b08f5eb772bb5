use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

/// Prefix for environment overrides, e.g. `OPTION_SCAN_SCAN__DELTA_TARGET`.
pub const ENV_PREFIX: &str = "OPTION_SCAN_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration by merging built-in defaults, the TOML file at
    /// `path` (skipped if missing), and `OPTION_SCAN_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path.as_ref())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        tracing::debug!(path = %path.as_ref().display(), "Loaded configuration");
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::file(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OptionType;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::figment(&dir.path().join("absent.toml"))
            .extract::<AppConfig>()
            .unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.scan.symbols.len(), 16);
        assert_eq!(config.alpha_vantage.quote_timeout_secs, 15);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[alpha_vantage]
base_url = "http://localhost:9999"

[scan]
symbols = ["AMD", "PLTR"]
delta_target = 0.3
option_type = "call"
"#
        )
        .unwrap();

        let config = ConfigLoader::figment(&path).extract::<AppConfig>().unwrap();
        assert_eq!(config.alpha_vantage.base_url, "http://localhost:9999");
        assert_eq!(config.alpha_vantage.request_timeout_secs, 20);
        assert_eq!(config.scan.symbols, vec!["AMD", "PLTR"]);
        assert_eq!(config.scan.option_type, OptionType::Call);
        assert!((config.scan.delta_target - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.scan.earnings_window_days, 30);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Config.toml");
        std::fs::write(&path, "[scan]\ndelta_target = \"lots\"\n").unwrap();
        assert!(ConfigLoader::figment(&path).extract::<AppConfig>().is_err());
    }
}
