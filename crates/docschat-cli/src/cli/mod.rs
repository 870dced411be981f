//! CLI command definitions for the `docschat` binary.
//!
//! Uses clap derive macros for argument parsing. The API key is read from
//! `--api-key` or the `OPENROUTER_API_KEY` environment variable through
//! clap's `env` feature; nothing else in the workspace reads the
//! environment.

pub mod ask;
pub mod chat;
pub mod models;

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use secrecy::SecretString;

use docschat_types::config::ChatConfig;

/// Ask questions about a REST API, answered by an LLM grounded in its
/// OpenAPI document.
#[derive(Parser)]
#[command(name = "docschat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs on stderr (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.docschat/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat about an API.
    Chat {
        /// Path to the OpenAPI JSON document.
        #[arg(short, long, value_name = "FILE")]
        spec: PathBuf,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Ask a single question and print the answer.
    Ask {
        /// Path to the OpenAPI JSON document.
        #[arg(short, long, value_name = "FILE")]
        spec: PathBuf,

        #[command(flatten)]
        provider: ProviderArgs,

        /// The question to ask.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// List the models available from the provider.
    Models {
        #[command(flatten)]
        key: ApiKeyArgs,

        /// Output the catalogue as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// API key source shared by every command that talks to the provider.
#[derive(Args)]
pub struct ApiKeyArgs {
    /// OpenRouter API key.
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl ApiKeyArgs {
    /// The key as a secret, or an error when none was supplied.
    pub fn secret(&self) -> anyhow::Result<SecretString> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(SecretString::from(key.to_string())),
            _ => bail!("no API key: pass --api-key or set OPENROUTER_API_KEY"),
        }
    }
}

/// Provider selection for `chat` and `ask`.
#[derive(Args)]
pub struct ProviderArgs {
    /// Model to use, e.g. anthropic/claude-3.7-sonnet.
    #[arg(short, long)]
    pub model: Option<String>,

    #[command(flatten)]
    pub key: ApiKeyArgs,
}

impl ProviderArgs {
    /// Apply the `--model` override to the loaded config.
    pub fn apply(&self, mut config: ChatConfig) -> ChatConfig {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn chat_requires_spec() {
        let result = Cli::try_parse_from(["docschat", "chat"]);
        assert!(result.is_err());
    }

    #[test]
    fn chat_parses_model_and_key() {
        let cli = Cli::try_parse_from([
            "docschat", "-v", "chat", "--spec", "petstore.json", "--model", "openai/gpt-4o",
            "--api-key", "sk-test",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Chat { spec, provider } => {
                assert_eq!(spec, PathBuf::from("petstore.json"));
                let config = provider.apply(ChatConfig::default());
                assert_eq!(config.model, "openai/gpt-4o");
                assert_eq!(provider.key.secret().unwrap().expose_secret(), "sk-test");
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn ask_joins_trailing_words() {
        let cli = Cli::try_parse_from([
            "docschat", "ask", "--spec", "api.json", "--api-key", "k", "how", "do", "I", "login?",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask { question, .. } => assert_eq!(question.join(" "), "how do I login?"),
            _ => panic!("expected ask command"),
        }
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let args = ApiKeyArgs {
            api_key: Some("   ".to_string()),
        };
        assert!(args.secret().is_err());
        let args = ApiKeyArgs { api_key: None };
        let err = args.secret().unwrap_err();
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));
    }

    #[test]
    fn missing_model_keeps_config_model() {
        let args = ProviderArgs {
            model: None,
            key: ApiKeyArgs { api_key: None },
        };
        let config = ChatConfig {
            model: "from/config".to_string(),
            ..ChatConfig::default()
        };
        assert_eq!(args.apply(config).model, "from/config");
    }
}
