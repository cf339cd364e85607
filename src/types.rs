use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Global type definitions
///
/// Stores constants, configuration structs, and type aliases shared by the
/// tables and the binaries
/// Smallest bucket count any table is created with
pub const MIN_CAPACITY: usize = 11;

/// Initial bucket count when none is requested
pub const DEFAULT_CAPACITY: usize = 23;

/// Chaining table growth threshold
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;

/// Open addressing growth threshold
pub const OPEN_MAX_LOAD_FACTOR: f64 = 0.75;

/// Open addressing shrink threshold
pub const OPEN_MIN_LOAD_FACTOR: f64 = 0.25;

/// Upper bound of the double-hashing step
pub const STEP_HASH_MAX: usize = 5;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Config text is not valid JSON for the expected shape
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    /// A field holds a value outside its allowed range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// Separate chaining table configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Requested bucket count, rounded up to a prime
    pub initial_capacity: usize,
    /// Highest load factor allowed after an insert
    pub max_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_load_factor",
                reason: format!("must be a positive number, got {}", self.max_load_factor),
            });
        }
        Ok(())
    }
}

/// Open addressing table configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpenAddressingConfig {
    /// Requested slot count, rounded up to a prime
    pub initial_capacity: usize,
    /// Grow when the load factor reaches this value before an insert
    pub max_load_factor: f64,
    /// Shrink when a delete leaves the load factor below this value
    pub min_load_factor: f64,
    /// Probe steps are drawn from `1..=step_hash_max`
    pub step_hash_max: usize,
}

impl Default for OpenAddressingConfig {
    fn default() -> Self {
        Self {
            initial_capacity: MIN_CAPACITY,
            max_load_factor: OPEN_MAX_LOAD_FACTOR,
            min_load_factor: OPEN_MIN_LOAD_FACTOR,
            step_hash_max: STEP_HASH_MAX,
        }
    }
}

impl OpenAddressingConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "max_load_factor",
                reason: format!("must lie in (0, 1), got {}", self.max_load_factor),
            });
        }
        // A shrink doubles the load factor; it must stay under the growth threshold
        if !(self.min_load_factor >= 0.0 && self.min_load_factor * 2.0 < self.max_load_factor) {
            return Err(ConfigError::InvalidValue {
                field: "min_load_factor",
                reason: format!(
                    "must be non-negative and below half of max_load_factor, got {}",
                    self.min_load_factor
                ),
            });
        }
        // Steps must stay coprime with every prime capacity the table can take
        if self.step_hash_max == 0 || self.step_hash_max >= MIN_CAPACITY {
            return Err(ConfigError::InvalidValue {
                field: "step_hash_max",
                reason: format!("must lie in 1..{}, got {}", MIN_CAPACITY, self.step_hash_max),
            });
        }
        Ok(())
    }
}

/// Top level configuration, read from a JSON file by the binaries
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HashChainConfig {
    pub log_level: LogLevel,
    pub chaining: TableConfig,
    pub open_addressing: OpenAddressingConfig,
}

impl Default for HashChainConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            chaining: TableConfig::default(),
            open_addressing: OpenAddressingConfig::default(),
        }
    }
}

impl HashChainConfig {
    /// Parse and validate a JSON document; missing fields take their defaults
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: HashChainConfig = serde_json::from_str(text)?;
        config.chaining.validate()?;
        config.open_addressing.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_defaults() {
        let config = HashChainConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.chaining.initial_capacity, 23);
        assert_eq!(config.chaining.max_load_factor, 0.7);
        assert_eq!(config.open_addressing.initial_capacity, 11);
        assert_eq!(config.open_addressing.max_load_factor, 0.75);
        assert_eq!(config.open_addressing.min_load_factor, 0.25);
        assert_eq!(config.open_addressing.step_hash_max, 5);
        assert!(config.chaining.validate().is_ok());
        assert!(config.open_addressing.validate().is_ok());
    }

    #[test]
    fn test_config_partial_json_keeps_defaults() {
        let config = HashChainConfig::from_json_str(
            r#"{ "log_level": "debug", "chaining": { "initial_capacity": 11 } }"#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.chaining.initial_capacity, 11);
        assert_eq!(config.chaining.max_load_factor, 0.7);
        assert_eq!(config.open_addressing, OpenAddressingConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let result = HashChainConfig::from_json_str(r#"{ "chaining": { "max_load_factor": 0.0 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "max_load_factor", .. })
        ));

        let result = HashChainConfig::from_json_str(r#"{ "chaining": { "initial_capacity": 0 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "initial_capacity", .. })
        ));

        let result =
            HashChainConfig::from_json_str(r#"{ "open_addressing": { "max_load_factor": 1.0 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "max_load_factor", .. })
        ));

        let result =
            HashChainConfig::from_json_str(r#"{ "open_addressing": { "min_load_factor": 0.4 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "min_load_factor", .. })
        ));

        let result =
            HashChainConfig::from_json_str(r#"{ "open_addressing": { "step_hash_max": 11 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "step_hash_max", .. })
        ));
    }

    #[test]
    fn test_config_parse_error() {
        let result = HashChainConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "open_addressing": {{ "initial_capacity": 31 }} }}"#).unwrap();

        let config = HashChainConfig::load(file.path()).unwrap();
        assert_eq!(config.open_addressing.initial_capacity, 31);

        let missing = HashChainConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_log_level_into_filter() {
        assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
    }
}
