use crate::{
    ApiConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, LoggingConfig, SessionConfig, WalletConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub wallet: WalletConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for FA_CONFIG_DIR env var, else use ~/.financeai/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply FA_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: FA_CONFIG_DIR env var > ~/.financeai/
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        dirs::home_dir()
            .map(|home| home.join(DEFAULT_CONFIG_DIR_NAME))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.session.validate()?;
        self.wallet.validate()?;

        if let Some(file) = &self.logging.file
            && (std::path::Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::config(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path of the persisted session file.
    pub fn session_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.session.file))
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(Self::config_dir()?.join(file))),
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {} (timeout {}s, csrf: {})",
            self.api.base_url,
            self.api.timeout_secs,
            if self.api.csrf_token.is_some() || self.api.csrf_cookie.is_some() {
                "set"
            } else {
                "unset"
            }
        );
        info!("  session: {}", self.session.file);
        info!(
            "  wallet: provider={}, relay={}, project_id={}, chain={}, approval={}s",
            self.wallet.provider_url.as_deref().unwrap_or("none"),
            self.wallet.relay_url.as_deref().unwrap_or("none"),
            if self.wallet.project_id().is_some() {
                "set"
            } else {
                "unset"
            },
            self.wallet.chain_id,
            self.wallet.approval_timeout_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Api
        Self::apply_env_string("FA_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_parse("FA_API_TIMEOUT_SECS", &mut self.api.timeout_secs);
        Self::apply_env_option_string("FA_API_CSRF_TOKEN", &mut self.api.csrf_token);
        Self::apply_env_option_string("FA_API_CSRF_COOKIE", &mut self.api.csrf_cookie);
        Self::apply_env_string("FA_API_LOGIN_PATH", &mut self.api.login_path);

        // Session
        Self::apply_env_string("FA_SESSION_FILE", &mut self.session.file);

        // Wallet
        Self::apply_env_option_string("FA_WALLET_PROVIDER_URL", &mut self.wallet.provider_url);
        Self::apply_env_option_string("FA_WALLET_PROJECT_ID", &mut self.wallet.project_id);
        Self::apply_env_option_string("FA_WALLET_RELAY_URL", &mut self.wallet.relay_url);
        Self::apply_env_string("FA_WALLET_CHAIN_ID", &mut self.wallet.chain_id);
        Self::apply_env_parse(
            "FA_WALLET_APPROVAL_TIMEOUT_SECS",
            &mut self.wallet.approval_timeout_secs,
        );
        Self::apply_env_string(
            "FA_WALLET_QR_IMAGE_SERVICE",
            &mut self.wallet.qr_image_service,
        );

        // Logging
        Self::apply_env_parse("FA_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("FA_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("FA_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
