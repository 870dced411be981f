//! Configuration loader for docschat.
//!
//! Reads `config.toml` (`~/.docschat/config.toml` unless a path is given)
//! and deserializes it into [`ChatConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use docschat_types::config::ChatConfig;

/// Directory under the home directory that holds docschat files.
const CONFIG_DIR: &str = ".docschat";

/// `~/.docschat/config.toml`, or `None` when no home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join("config.toml"))
}

/// Load configuration from `path`, or from [`default_config_path`].
///
/// - If the file does not exist, returns [`ChatConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - Otherwise returns the parsed config; absent fields take defaults.
pub async fn load_chat_config(path: Option<&Path>) -> ChatConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                tracing::debug!("No home directory, using default config");
                return ChatConfig::default();
            }
        },
    };

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ChatConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ChatConfig::default();
        }
    };

    match toml::from_str::<ChatConfig>(&content) {
        Ok(config) => {
            tracing::debug!(model = %config.model, "Loaded {}", config_path.display());
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ChatConfig::default()
        }
    }
}
