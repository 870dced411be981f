//! Configuration types for docschat.
//!
//! `ChatConfig` represents the optional `config.toml` that selects the
//! model, provider endpoint and history bound. All fields have defaults.

use serde::{Deserialize, Serialize};

/// Model used when neither the command line nor the config file names one.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.7-sonnet";

/// OpenRouter's OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// One system turn plus ten conversation turns.
pub const DEFAULT_MAX_HISTORY: usize = 11;

/// Top-level configuration, loaded from `~/.docschat/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Provider/model identifier, e.g. `anthropic/claude-3.7-sonnet`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat-completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum number of turns kept in history, system anchor included.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Sent as the `X-Title` header on every request.
    #[serde(default = "default_app_title")]
    pub app_title: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_app_title() -> String {
    "OpenAPI Chat Assistant".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            max_history: default_max_history(),
            app_title: default_app_title(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_config_default_values() {
        let config = ChatConfig::default();
        assert_eq!(config.model, "anthropic/claude-3.7-sonnet");
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.max_history, 11);
        assert_eq!(config.app_title, "OpenAPI Chat Assistant");
    }

    #[test]
    fn test_chat_config_partial_toml_uses_defaults() {
        let config: ChatConfig = toml::from_str(r#"model = "openai/gpt-4o""#).unwrap();
        assert_eq!(config.model, "openai/gpt-4o");
        assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_chat_config_empty_toml_equals_default() {
        let config: ChatConfig = toml::from_str("").unwrap();
        assert_eq!(config, ChatConfig::default());
    }
}
