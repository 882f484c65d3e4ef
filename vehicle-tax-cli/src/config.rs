//! `vehicle-tax.toml` configuration.
//!
//! Every key is optional:
//!
//! ```toml
//! locale = "de-AT"
//! log_level = "info"
//! log_file = "vehicle-tax.log"
//!
//! # Replaces the built-in schedule; both dimensions must be given.
//! [schedule.power]
//! dimension = "power"
//! unit = "kW"
//! reduction = "45"
//! floor = "10"
//!
//! [[schedule.power.brackets]]
//! start = "0"
//! end = "35"
//! rate = "0.25"
//! label = "Erste 35 kW um 0,25 €:"
//! rate_precision = 2
//! # ...
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use vehicle_tax_core::format::{Locale, UnknownLocaleError};
use vehicle_tax_core::{ScheduleError, TaxScheduleConfig};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "vehicle-tax.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Locale(#[from] UnknownLocaleError),

    #[error("invalid schedule in config: {0}")]
    Schedule(#[from] ScheduleError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub locale: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub schedule: Option<TaxScheduleConfig>,
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and the built-in defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::read(path)
                } else {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(schedule) = &self.schedule {
            schedule.validate()?;
        }
        if let Some(tag) = &self.locale {
            tag.parse::<Locale>()?;
        }
        Ok(())
    }

    /// Locale to format with; `override_tag` (from the command line) wins.
    pub fn locale(
        &self,
        override_tag: Option<&str>,
    ) -> Result<Locale, UnknownLocaleError> {
        match override_tag.or(self.locale.as_deref()) {
            Some(tag) => tag.parse(),
            None => Ok(Locale::default()),
        }
    }

    /// The configured schedule, or the built-in Austrian one.
    pub fn schedule(&self) -> TaxScheduleConfig {
        self.schedule.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const CUSTOM_SCHEDULE: &str = r#"
locale = "en-US"

[schedule.power]
dimension = "power"
unit = "kW"
reduction = "0"
floor = "0"

[[schedule.power.brackets]]
start = "0"
rate = "1"
label = "Flat kW"
rate_precision = 2

[schedule.weight]
dimension = "weight"
unit = "kg"
reduction = "0"
floor = "0"

[[schedule.weight.brackets]]
start = "0"
end = "1000"
rate = "0.010"
label = "First 1000 kg"
rate_precision = 3

[[schedule.weight.brackets]]
start = "1000"
rate = "0.020"
label = "Remaining kg"
rate_precision = 3
"#;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.locale(None).unwrap(), Locale::DeAt);
        assert_eq!(config.schedule(), TaxScheduleConfig::austrian());
    }

    #[test]
    fn locale_override_wins_over_config() {
        let config = AppConfig {
            locale: Some("de-DE".to_string()),
            ..Default::default()
        };

        assert_eq!(config.locale(None).unwrap(), Locale::DeDe);
        assert_eq!(config.locale(Some("en-US")).unwrap(), Locale::EnUs);
        assert!(config.locale(Some("xx")).is_err());
    }

    #[test]
    fn custom_schedule_is_parsed() {
        let config: AppConfig = toml::from_str(CUSTOM_SCHEDULE).unwrap();
        config.validate().unwrap();

        let schedule = config.schedule();
        assert_eq!(schedule.power.brackets.len(), 1);
        assert_eq!(schedule.power.brackets[0].end, None);
        assert_eq!(schedule.weight.brackets[0].end, Some(dec!(1000)));
        assert_eq!(schedule.weight.brackets[1].rate, dec!(0.020));
    }

    #[test]
    fn invalid_schedule_is_rejected() {
        let broken = CUSTOM_SCHEDULE.replace("start = \"1000\"", "start = \"900\"");
        let config: AppConfig = toml::from_str(&broken).unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Schedule(ScheduleError::NotContiguous { .. }))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = toml::from_str::<AppConfig>("colour = \"dark\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn invalid_locale_fails_validation() {
        let config = AppConfig {
            locale: Some("tlh".to_string()),
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Locale(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/no/such/vehicle-tax.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
