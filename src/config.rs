use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for the analyzer service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Composition heuristics
    pub composition: CompositionConfig,

    /// Color heuristics
    pub color: ColorConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.composition.validate()?;
        self.color.validate()?;
        Ok(())
    }
}

/// How analysis failures are turned into HTTP status codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStatusPolicy {
    /// Every analysis failure is a 500
    #[default]
    Flat,
    /// Client-caused failures get 4xx codes, the rest stay 500
    ByKind,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port to bind
    pub port: u16,

    /// CORS origins; a "*" entry allows any origin
    pub allowed_origins: Vec<String>,

    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Number of async runtime worker threads
    pub worker_threads: usize,

    /// Status code mapping for analysis failures
    pub error_status: ErrorStatusPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec!["*".to_string()],
            max_upload_bytes: 10 * 1024 * 1024,
            request_timeout_secs: 30,
            worker_threads: num_cpus::get(),
            error_status: ErrorStatusPolicy::Flat,
        }
    }
}

impl ServerConfig {
    /// Whether CORS should accept any origin
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin.trim() == "*")
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "server.host".to_string(),
                value: self.host.clone()
            }.into());
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.max_upload_bytes".to_string(),
                value: self.max_upload_bytes.to_string()
            }.into());
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.request_timeout_secs".to_string(),
                value: self.request_timeout_secs.to_string()
            }.into());
        }

        if self.worker_threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.worker_threads".to_string(),
                value: self.worker_threads.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Composition analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Luma difference above which a mirrored pixel pair counts as asymmetric
    pub symmetry_threshold: u8,

    /// Aesthetic scores below this get the "needs improvement" feedback
    pub feedback_cutoff: f64,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            symmetry_threshold: 25,
            feedback_cutoff: 0.5,
        }
    }
}

impl CompositionConfig {
    fn validate(&self) -> Result<()> {
        if !self.feedback_cutoff.is_finite() || self.feedback_cutoff < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "composition.feedback_cutoff".to_string(),
                value: self.feedback_cutoff.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Color analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Largest per-channel distance at which the dominant color matches the brand color
    pub brand_tolerance: u8,

    /// Channel means at or below this count as extreme
    pub extreme_low: f64,

    /// Channel means at or above this count as extreme
    pub extreme_high: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            brand_tolerance: 50,
            extreme_low: 50.0,
            extreme_high: 200.0,
        }
    }
}

impl ColorConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=255.0).contains(&self.extreme_low)
            || !(0.0..=255.0).contains(&self.extreme_high)
            || self.extreme_low >= self.extreme_high
        {
            return Err(ConfigError::InvalidValue {
                key: "color.extreme_range".to_string(),
                value: format!("{}-{}", self.extreme_low, self.extreme_high)
            }.into());
        }

        Ok(())
    }
}
