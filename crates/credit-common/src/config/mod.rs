//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, Environment, HealthConfig, LedgerConfig,
    LogFormat, RewardConfig, TelegramConfig,
};
