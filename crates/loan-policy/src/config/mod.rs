use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::policy::PolicyConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the policy front ends.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub policy: PolicySource,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let path = env::var("LOAN_POLICY_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            policy: PolicySource { path },
        })
    }

    /// Policy version to run: the configured file, or the built-in tables.
    pub fn policy(&self) -> Result<PolicyConfig, ConfigError> {
        match &self.policy.path {
            Some(path) => load_policy_file(path),
            None => Ok(PolicyConfig::default()),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Where alternate policy tables come from, if anywhere.
#[derive(Debug, Clone, Default)]
pub struct PolicySource {
    pub path: Option<PathBuf>,
}

pub fn load_policy_file(path: &Path) -> Result<PolicyConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::PolicyRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_policy(&raw).map_err(|source| ConfigError::PolicyParse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_policy(raw: &str) -> Result<PolicyConfig, serde_json::Error> {
    serde_json::from_str(raw)
}

#[derive(Debug)]
pub enum ConfigError {
    PolicyRead {
        path: PathBuf,
        source: std::io::Error,
    },
    PolicyParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PolicyRead { path, .. } => {
                write!(f, "unable to read policy file {}", path.display())
            }
            ConfigError::PolicyParse { path, .. } => {
                write!(f, "policy file {} is not a valid policy", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::PolicyRead { source, .. } => Some(source),
            ConfigError::PolicyParse { source, .. } => Some(source),
        }
    }
}
