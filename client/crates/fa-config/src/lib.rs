mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod session_config;
mod wallet_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;
pub use wallet_config::WalletConfig;

const CONFIG_DIR_ENV: &str = "FA_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".financeai";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_LOGIN_PATH: &str = "/login/";
const DEFAULT_SESSION_FILE: &str = "session.json";
const DEFAULT_CHAIN_ID: &str = "eip155:1";
const DEFAULT_QR_IMAGE_SERVICE: &str =
    "https://chart.googleapis.com/chart?cht=qr&chs=260x260&chld=M|0&chl=";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
