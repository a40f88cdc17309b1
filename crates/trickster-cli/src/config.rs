use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use trickster_bot::{StrategyFeatures, StrategyKind};

/// Root CLI configuration loaded from YAML. Every block is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: CliConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.logging.validate()
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StrategyConfig {
    #[serde(default)]
    pub kind: StrategyKind,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl StrategyConfig {
    pub fn features(&self) -> StrategyFeatures {
        StrategyFeatures::new(self.kind, self.seed)
    }
}

/// Logs go to stderr as text unless `json` or `file` say otherwise.
/// `enabled: false` installs no subscriber at all.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            tracing_level: default_tracing_level(),
            json: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if let Some(file) = &self.file {
            if file.as_os_str().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: "logging.file".to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BASIC_YAML: &str = r#"
strategy:
  kind: "baseline"
  seed: 17
logging:
  tracing_level: "debug"
  json: true
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: CliConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.strategy.kind, StrategyKind::Baseline);
        assert_eq!(cfg.strategy.seed, Some(17));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert!(cfg.logging.json);
        assert_eq!(cfg.logging.file, None);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: CliConfig = serde_yaml::from_str("{}").expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg, CliConfig::default());
        assert_eq!(cfg.strategy.kind, StrategyKind::Tracking);
        assert_eq!(cfg.logging.level(), Some(Level::WARN));
    }

    #[test]
    fn blank_level_falls_back_to_default() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"  \"");
        let mut cfg: CliConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.logging.tracing_level, "warn");
    }

    #[test]
    fn rejects_unknown_level() {
        let yaml = BASIC_YAML.replace("debug", "chatty");
        let mut cfg: CliConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("unknown level");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "logging.tracing_level"
        ));
    }

    #[test]
    fn logging_can_be_switched_off() {
        let mut cfg: CliConfig = serde_yaml::from_str(BASIC_YAML).expect("parse");
        cfg.validate().expect("validate");
        assert!(cfg.logging.enabled);

        let yaml = BASIC_YAML.replace("logging:\n", "logging:\n  enabled: false\n");
        let mut cfg: CliConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("validate");
        assert!(!cfg.logging.enabled);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
    }

    #[test]
    fn rejects_unknown_strategy_kind() {
        let yaml = BASIC_YAML.replace("baseline", "oracle");
        assert!(serde_yaml::from_str::<CliConfig>(&yaml).is_err());
    }

    #[test]
    fn from_path_reports_the_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "logging:\n  tracing_level: loud\n").expect("write");
        let err = CliConfig::from_path(file.path()).expect_err("invalid level");
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert_eq!(err.path(), file.path());

        let missing = CliConfig::from_path("/definitely/not/here.yaml").expect_err("missing");
        assert!(matches!(missing, ConfigError::Read { .. }));
    }

    #[test]
    fn features_carry_kind_and_seed() {
        let mut cfg: CliConfig = serde_yaml::from_str(BASIC_YAML).expect("parse");
        cfg.validate().expect("validate");
        let features = cfg.strategy.features();
        assert_eq!(features.kind(), StrategyKind::Baseline);
        assert_eq!(features.seed(), Some(17));
    }
}
