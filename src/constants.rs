//! Constants used throughout the tosspay library

use std::path::PathBuf;
use std::time::Duration;

/// Application name for the config directory
pub const APP_NAME: &str = "tosspay";

/// Config file name
pub const CONFIG_FILE: &str = "config.toml";

/// Base URL of the Toss Pay v1 gateway API
pub const API_HOST: &str = "https://pay.toss.im/api/v1";

/// Shared sandbox API key published by the gateway for development use
pub const SANDBOX_API_KEY: &str = "sk_test_w5lNQylNqa5lNQe013Nq";

/// Environment variable holding the merchant API key
pub const API_KEY_ENV: &str = "TOSSPAY_API_KEY";

/// Default HTTP request timeout in seconds (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Longest expiry the gateway accepts for a pending purchase (1 hour)
pub const MAX_EXPIRED_TIME: Duration = Duration::from_secs(60 * 60);

/// Result code the gateway uses for successful responses
pub const SUCCESS_CODE: i64 = 0;

/// Timestamp format used on the wire (e.g. `2016-11-16 13:59:59`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get the tosspay home directory (`~/.tosspay/`)
///
/// # Returns
///
/// - `Some(PathBuf)` if the home directory can be determined
/// - `None` if the home directory cannot be determined
pub fn tosspay_home_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tosspay"))
}

/// Get the default config file path (`~/.tosspay/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    tosspay_home_dir().map(|p| p.join(CONFIG_FILE))
}
