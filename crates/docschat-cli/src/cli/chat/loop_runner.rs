//! Main chat loop orchestration.
//!
//! Loads the API document, builds the provider, prints the banner and
//! hands stdin to [`ChatSession::run`].

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use docschat_core::chat::session::{ChatSession, SessionSettings};
use docschat_core::progress::ProgressTarget;
use docschat_infra::llm::OpenRouterProvider;
use docschat_infra::openapi::load_spec;
use docschat_types::config::ChatConfig;

use crate::cli::ProviderArgs;

use super::banner::print_welcome_banner;
use super::renderer::TerminalRenderer;

/// Run the interactive chat loop for the document at `spec_path`.
pub async fn run_chat(
    spec_path: &Path,
    args: &ProviderArgs,
    config: ChatConfig,
) -> anyhow::Result<()> {
    let spec = load_spec(spec_path)
        .await
        .with_context(|| format!("could not load {}", spec_path.display()))?;

    let config = args.apply(config);
    let api_key = args.key.secret()?;
    let provider =
        OpenRouterProvider::new(api_key, &config).context("failed to create provider")?;

    print_welcome_banner(&spec, &config.model);

    info!(model = %config.model, max_history = config.max_history, "starting chat session");
    let mut session = ChatSession::new(Arc::new(spec), provider, SessionSettings::from(&config))
        .with_progress_target(ProgressTarget::Stdout);
    let mut renderer = TerminalRenderer::new();
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());

    let summary = session
        .run(stdin, &mut renderer)
        .await
        .context("failed to read input")?;

    println!();
    info!(turns = summary.turns, "chat finished");
    Ok(())
}
