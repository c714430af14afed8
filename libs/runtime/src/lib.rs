//! Process-level plumbing shared by the orders server: layered configuration,
//! home directory resolution and tracing setup.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, AppConfigProvider, CliArgs, ConfigError, ConfigProvider,
    DatabaseConfig, LoggingConfig, Section, ServerConfig,
};
