//! One-shot question without history or streaming.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use docschat_core::chat::history::ConversationHistory;
use docschat_core::chat::session::{MAX_OUTPUT_TOKENS, TEMPERATURE};
use docschat_core::llm::provider::LlmProvider;
use docschat_core::prompt::PromptBuilder;
use docschat_infra::llm::OpenRouterProvider;
use docschat_infra::openapi::load_spec;
use docschat_types::config::ChatConfig;
use docschat_types::llm::CompletionRequest;

use super::ProviderArgs;

/// Answer `question` about the document at `spec_path` and print the reply.
pub async fn ask_once(
    spec_path: &Path,
    args: &ProviderArgs,
    question: &str,
    config: ChatConfig,
) -> anyhow::Result<()> {
    let spec = load_spec(spec_path)
        .await
        .with_context(|| format!("could not load {}", spec_path.display()))?;

    let config = args.apply(config);
    let provider = OpenRouterProvider::new(args.key.secret()?, &config)
        .context("failed to create provider")?;

    let mut history = ConversationHistory::new(
        PromptBuilder::system_instruction(&spec),
        config.max_history,
    );
    history.push_user(question);

    let request = CompletionRequest {
        model: config.model.clone(),
        messages: PromptBuilder::render(&spec, &history),
        max_tokens: MAX_OUTPUT_TOKENS,
        temperature: TEMPERATURE,
        stream: false,
    };

    let response = provider
        .complete(&request)
        .await
        .context("completion request failed")?;
    debug!(
        model = %response.model,
        finish_reason = response.finish_reason.as_deref().unwrap_or("-"),
        "answer received"
    );

    println!("{}", response.content);
    Ok(())
}
