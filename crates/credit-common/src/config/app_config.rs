//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use credit_core::{UserId, DEFAULT_MILESTONE_EVERY, DEFAULT_WINDOW_SECS};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub telegram: TelegramConfig,
    pub ledger: LedgerConfig,
    pub admin: AdminConfig,
    pub rewards: RewardConfig,
    pub health: Option<HealthConfig>,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Telegram Bot API connection
#[derive(Clone, Deserialize)]
pub struct TelegramConfig {
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
    /// The bot's own account; asked from the API at startup when unset
    pub protected_user_id: Option<UserId>,
}

// Never print the token
impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("protected_user_id", &self.protected_user_id)
            .finish()
    }
}

/// Ledger and appreciation window storage
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_window_secs")]
    pub window_secs: i64,
    #[serde(default = "default_milestone_every")]
    pub milestone_every: i64,
}

impl LedgerConfig {
    /// Path of the user ledger document
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger.json")
    }

    /// Path of the appreciation window document
    #[must_use]
    pub fn window_path(&self) -> PathBuf {
        self.data_dir.join("appreciations.json")
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            window_secs: default_window_secs(),
            milestone_every: default_milestone_every(),
        }
    }
}

/// Administrator identity and reporting
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Admin commands are disabled when unset
    pub user_id: Option<UserId>,
    #[serde(default = "default_dump_page_size")]
    pub dump_page_size: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            dump_page_size: default_dump_page_size(),
        }
    }
}

/// Milestone reward attachments
#[derive(Debug, Clone, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,
}

/// Health endpoint listener
#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl HealthConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Default value functions
fn default_app_name() -> String {
    "social-credit-bot".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_window_secs() -> i64 {
    DEFAULT_WINDOW_SECS
}

fn default_milestone_every() -> i64 {
    DEFAULT_MILESTONE_EVERY
}

fn default_dump_page_size() -> usize {
    30
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("./gifs")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match get("APP_ENV") {
            Some(s) => Environment::parse(&s).ok_or(ConfigError::InvalidValue("APP_ENV", s))?,
            None => default_env(),
        };

        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_lowercase) {
            Some(s) if s == "json" => LogFormat::Json,
            Some(s) if s == "pretty" => LogFormat::Pretty,
            Some(s) => return Err(ConfigError::InvalidValue("LOG_FORMAT", s)),
            None if env.is_production() => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        let window_secs =
            parse_var(&get, "APPRECIATION_WINDOW_SECS")?.unwrap_or_else(default_window_secs);
        if window_secs < 0 {
            return Err(ConfigError::InvalidValue(
                "APPRECIATION_WINDOW_SECS",
                window_secs.to_string(),
            ));
        }

        let milestone_every =
            parse_var(&get, "MILESTONE_EVERY")?.unwrap_or_else(default_milestone_every);
        if milestone_every <= 0 {
            return Err(ConfigError::InvalidValue(
                "MILESTONE_EVERY",
                milestone_every.to_string(),
            ));
        }

        let dump_page_size =
            parse_var(&get, "DUMP_PAGE_SIZE")?.unwrap_or_else(default_dump_page_size);
        if dump_page_size == 0 {
            return Err(ConfigError::InvalidValue("DUMP_PAGE_SIZE", "0".to_string()));
        }

        let health = parse_var::<u16, _>(&get, "HEALTH_PORT")?.map(|port| HealthConfig {
            host: get("HEALTH_HOST").unwrap_or_else(default_host),
            port,
        });

        Ok(Self {
            app: AppSettings {
                name: get("APP_NAME").unwrap_or_else(default_app_name),
                env,
                log_format,
            },
            telegram: TelegramConfig {
                token: load_token(&get)?,
                api_url: get("TELEGRAM_API_URL").unwrap_or_else(default_api_url),
                poll_timeout_secs: parse_var(&get, "POLL_TIMEOUT_SECS")?
                    .unwrap_or_else(default_poll_timeout),
                protected_user_id: parse_var(&get, "PROTECTED_USER_ID")?,
            },
            ledger: LedgerConfig {
                data_dir: get("DATA_DIR").map_or_else(default_data_dir, PathBuf::from),
                window_secs,
                milestone_every,
            },
            admin: AdminConfig {
                user_id: parse_var(&get, "ADMIN_USER_ID")?,
                dump_page_size,
            },
            rewards: RewardConfig {
                asset_dir: get("REWARD_ASSET_DIR").map_or_else(default_asset_dir, PathBuf::from),
            },
            health,
        })
    }
}

/// Token from `BOT_TOKEN`, or from the file named by `BOT_TOKEN_FILE`
fn load_token<F>(get: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = get("BOT_TOKEN").filter(|t| !t.trim().is_empty()) {
        return Ok(token.trim().to_string());
    }

    let path = get("BOT_TOKEN_FILE").ok_or(ConfigError::MissingVar("BOT_TOKEN"))?;
    read_token_file(Path::new(&path))
}

fn read_token_file(path: &Path) -> Result<String, ConfigError> {
    let token = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::InvalidValue("BOT_TOKEN_FILE", format!("{}: {e}", path.display()))
    })?;
    let token = token.trim();
    if token.is_empty() {
        return Err(ConfigError::InvalidValue(
            "BOT_TOKEN_FILE",
            format!("{} is empty", path.display()),
        ));
    }
    Ok(token.to_string())
}

fn parse_var<T, F>(get: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_source(|key| map.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load(&[("BOT_TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.telegram.token, "123:abc");
        assert_eq!(config.telegram.api_url, "https://api.telegram.org");
        assert_eq!(config.telegram.poll_timeout_secs, 30);
        assert_eq!(config.telegram.protected_user_id, None);
        assert_eq!(config.ledger.window_secs, 60);
        assert_eq!(config.ledger.milestone_every, 25);
        assert_eq!(config.admin.dump_page_size, 30);
        assert_eq!(config.admin.user_id, None);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
        assert!(config.health.is_none());
        assert_eq!(config.ledger.ledger_path(), PathBuf::from("./data/ledger.json"));
    }

    #[test]
    fn test_missing_token() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("BOT_TOKEN")));
    }

    #[test]
    fn test_token_from_file() {
        let dir = std::env::temp_dir().join(format!("credit-common-token-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bot_key.txt");
        std::fs::write(&path, "42:secret\n").unwrap();

        let config = load(&[("BOT_TOKEN_FILE", path.to_str().unwrap())]).unwrap();
        assert_eq!(config.telegram.token, "42:secret");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_identities_and_overrides() {
        let config = load(&[
            ("BOT_TOKEN", "t"),
            ("PROTECTED_USER_ID", "1968168927"),
            ("ADMIN_USER_ID", "42"),
            ("APPRECIATION_WINDOW_SECS", "10"),
            ("HEALTH_PORT", "8081"),
            ("APP_ENV", "production"),
        ])
        .unwrap();
        assert_eq!(config.telegram.protected_user_id, Some(UserId::new(1_968_168_927)));
        assert_eq!(config.admin.user_id, Some(UserId::new(42)));
        assert_eq!(config.ledger.window_secs, 10);
        assert_eq!(config.health.unwrap().address(), "127.0.0.1:8081");
        assert_eq!(config.app.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = load(&[("BOT_TOKEN", "t"), ("ADMIN_USER_ID", "root")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("ADMIN_USER_ID", _)));

        let err = load(&[("BOT_TOKEN", "t"), ("MILESTONE_EVERY", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("MILESTONE_EVERY", _)));
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let config = load(&[("BOT_TOKEN", "123:very-secret")]).unwrap();
        assert!(!format!("{:?}", config.telegram).contains("very-secret"));
    }
}
