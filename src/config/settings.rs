//! Configuration settings structures for equity-rs
//!
//! Everything here can be loaded from TOML files and `EQUITY_*` environment
//! variables.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "equity-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_jwks_refresh_interval() -> u64 {
    300
}

fn default_leeway() -> u64 {
    60
}

fn default_fmp_base_url() -> String {
    "https://financialmodelingprep.com/api".to_string()
}

fn default_alpha_vantage_base_url() -> String {
    "https://www.alphavantage.co/query".to_string()
}

fn default_provider_timeout() -> u64 {
    20
}

fn default_provider_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("equity-rs/{}", crate::pkg_version())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/equity.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Auth Configuration
// ============================================================================

/// Bearer token verification against the identity provider's JWKS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// URL of the issuer's JWKS document
    #[serde(default)]
    pub jwks_uri: String,

    /// Expected `iss` claim. Not checked when unset.
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected `aud` claim. Not checked when unset.
    #[serde(default)]
    pub audience: Option<String>,

    /// Minimum seconds between JWKS refetches triggered by an unknown `kid`
    #[serde(default = "default_jwks_refresh_interval")]
    pub jwks_refresh_interval: u64,

    /// Clock skew tolerated on `exp` and `nbf`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwks_uri: String::new(),
            issuer: None,
            audience: None,
            jwks_refresh_interval: default_jwks_refresh_interval(),
            leeway: default_leeway(),
        }
    }
}

// ============================================================================
// Market Data Provider Configuration
// ============================================================================

/// Market data provider backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Fmp,
    AlphaVantage,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Fmp => "fmp",
            ProviderKind::AlphaVantage => "alpha_vantage",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fmp" | "financial_modeling_prep" => Ok(ProviderKind::Fmp),
            "alpha_vantage" | "alphavantage" => Ok(ProviderKind::AlphaVantage),
            _ => Err(ConfigError::validation(
                "provider.kind".to_string(),
                format!("Unknown provider '{}'. Valid values are: fmp, alpha_vantage", s),
            )),
        }
    }
}

/// Upstream financial data provider selection and HTTP client tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Which provider serves every market data call
    #[serde(default)]
    pub kind: ProviderKind,

    /// Financial Modeling Prep API root
    #[serde(default = "default_fmp_base_url")]
    pub fmp_base_url: String,

    /// Financial Modeling Prep API key
    /// Keep it out of committed files (use `EQUITY_PROVIDER__FMP_API_KEY`)
    #[serde(default)]
    pub fmp_api_key: String,

    /// Alpha Vantage query endpoint
    #[serde(default = "default_alpha_vantage_base_url")]
    pub alpha_vantage_base_url: String,

    /// Alpha Vantage API key
    #[serde(default)]
    pub alpha_vantage_api_key: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_provider_connect_timeout")]
    pub connect_timeout: u64,

    /// User-Agent header sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ProviderConfig {
    /// API key of the selected provider.
    pub fn api_key(&self) -> &str {
        match self.kind {
            ProviderKind::Fmp => &self.fmp_api_key,
            ProviderKind::AlphaVantage => &self.alpha_vantage_api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        match self.kind {
            ProviderKind::Fmp => &self.fmp_base_url,
            ProviderKind::AlphaVantage => &self.alpha_vantage_base_url,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            fmp_base_url: default_fmp_base_url(),
            fmp_api_key: String::new(),
            alpha_vantage_base_url: default_alpha_vantage_base_url(),
            alpha_vantage_api_key: String::new(),
            timeout: default_provider_timeout(),
            connect_timeout: default_provider_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Append to an existing file instead of truncating it
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to LoggerConfig
    ///
    /// This method transforms the configuration file representation into
    /// the runtime LoggerConfig used by the logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Token verification
    #[serde(default)]
    pub auth: AuthConfig,

    /// Market data provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}
