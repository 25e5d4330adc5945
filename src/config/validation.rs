//! Configuration validation logic
//!
//! Each section validates itself; [`Settings::validate`] stops at the first
//! failing section.

use crate::config::error::ConfigError;
use crate::config::settings::{
    AuthConfig, DatabaseConfig, FileSettings, LoggerSettings, ProviderConfig, ServerConfig,
    Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - CORS origins must be `*` or http(s) URLs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if let Some(origin) = self
            .cors_allowed_origins
            .iter()
            .find(|o| o.as_str() != "*" && !is_http_url(o))
        {
            return Err(ConfigError::validation(
                "server.cors_allowed_origins",
                format!("Invalid origin '{}'. Expected http(s)://host[:port] or '*'", origin),
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty
    /// - URL must use the postgres:// or postgresql:// scheme
    /// - Max connections must be greater than 0
    /// - Min connections must not exceed max connections
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl AuthConfig {
    /// Validate auth configuration
    ///
    /// # Validation Rules
    /// - JWKS URI must be an http(s) URL
    /// - Issuer and audience, when present, must not be blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwks_uri.trim().is_empty() {
            return Err(ConfigError::validation(
                "auth.jwks_uri",
                "JWKS URI is required to verify bearer tokens.",
            ));
        }

        if !is_http_url(&self.jwks_uri) {
            return Err(ConfigError::validation(
                "auth.jwks_uri",
                format!("Invalid JWKS URI '{}'. Expected an http(s) URL.", self.jwks_uri),
            ));
        }

        if self.issuer.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ConfigError::validation(
                "auth.issuer",
                "Issuer must not be blank. Remove it to skip the issuer check.",
            ));
        }

        if self.audience.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ConfigError::validation(
                "auth.audience",
                "Audience must not be blank. Remove it to skip the audience check.",
            ));
        }

        Ok(())
    }
}

impl ProviderConfig {
    /// Validate provider configuration
    ///
    /// Only the selected provider's key and base URL are checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = format!("provider.{}_api_key", self.kind);
        if self.api_key().trim().is_empty() {
            return Err(ConfigError::validation(
                field,
                format!("An API key is required for provider '{}'.", self.kind),
            ));
        }

        if !is_http_url(self.base_url()) {
            return Err(ConfigError::validation(
                format!("provider.{}_base_url", self.kind),
                format!("Invalid base URL '{}'.", self.base_url()),
            ));
        }

        if self.timeout == 0 || self.connect_timeout == 0 {
            return Err(ConfigError::validation(
                "provider.timeout",
                "Provider timeouts must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    ///   (per-target directives after the first comma are not checked)
    /// - At least one output must be enabled
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_level = self.level.split(',').next().unwrap_or_default().trim();
        if !VALID_LOG_LEVELS.contains(&base_level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.provider.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
