//! Configuration management for equity-rs
//!
//! Layered TOML configuration with environment variable overrides. See
//! [`loader`] for the precedence rules.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    AuthConfig, DatabaseConfig, LoggerSettings, ProviderConfig, ProviderKind, ServerConfig,
    Settings,
};
