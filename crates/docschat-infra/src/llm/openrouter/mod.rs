//! OpenRouter provider -- concrete [`LlmProvider`] over the OpenAI-compatible
//! chat-completions API.
//!
//! Supports streaming (`stream`), non-streaming (`complete`) and the model
//! catalogue (`list_models`). The API key is wrapped in
//! [`secrecy::SecretString`] and is only exposed when building the
//! `Authorization` header.

pub mod streaming;
pub mod types;

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use docschat_core::llm::provider::{FragmentStream, LlmProvider};
use docschat_types::config::ChatConfig;
use docschat_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ModelInfo, StreamFragment,
};

use self::streaming::sse_fragments;
use self::types::{ChatResponse, ModelsResponse};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const MODELS_PATH: &str = "/models";

/// Chat-completion provider for OpenRouter and compatible endpoints.
///
/// Does NOT derive Debug, so the key cannot leak through `{:?}`.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    app_title: String,
}

impl OpenRouterProvider {
    /// Create a provider for `config.base_url`.
    ///
    /// Only the connect phase has a timeout; long answers may stream for
    /// as long as the server keeps the body open.
    pub fn new(api_key: SecretString, config: &ChatConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LlmError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_title: config.app_title.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the headers every request carries.
    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(self.api_key.expose_secret())
            .header("X-Title", &self.app_title)
    }

    fn chat_request(&self, request: &CompletionRequest) -> reqwest::Result<reqwest::Request> {
        self.authorized(self.client.post(self.url(CHAT_COMPLETIONS_PATH)))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .build()
    }

    /// Fetch the model catalogue from `GET {base_url}/models`.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let request = self
            .authorized(self.client.get(self.url(MODELS_PATH)))
            .build()
            .map_err(|e| LlmError::Request(e.to_string()))?;
        let response = execute(&self.client, request).await?;

        let models: ModelsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse model list: {e}")))?;
        debug!(count = models.data.len(), "fetched model catalogue");
        Ok(models.data)
    }
}

impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = CompletionRequest {
            stream: false,
            ..request.clone()
        };
        let http_request = self
            .chat_request(&body)
            .map_err(|e| LlmError::Request(e.to_string()))?;
        debug!(model = %body.model, messages = body.messages.len(), "sending completion");

        let response = execute(&self.client, http_request).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let choice = parsed.choices.into_iter().next().ok_or(LlmError::NoChoices)?;
        Ok(CompletionResponse {
            id: parsed.id,
            content: choice.message.content.unwrap_or_default(),
            model: if parsed.model.is_empty() {
                body.model
            } else {
                parsed.model
            },
            finish_reason: choice.finish_reason,
        })
    }

    fn stream(&self, request: CompletionRequest) -> FragmentStream {
        let request = CompletionRequest {
            stream: true,
            ..request
        };
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "opening completion stream"
        );
        let prepared = self.chat_request(&request);
        let client = self.client.clone();

        Box::pin(async_stream::stream! {
            let outcome = match prepared {
                Ok(http_request) => execute(&client, http_request).await,
                Err(e) => Err(LlmError::Request(e.to_string())),
            };

            match outcome {
                Ok(response) => {
                    let mut fragments = sse_fragments(response.bytes_stream());
                    while let Some(fragment) = fragments.next().await {
                        yield fragment;
                    }
                }
                Err(e) => {
                    yield StreamFragment::Error(e.to_string());
                }
            }
        })
    }
}

/// Send `request` and turn a non-success status into [`LlmError::Status`].
async fn execute(
    client: &reqwest::Client,
    request: reqwest::Request,
) -> Result<reqwest::Response, LlmError> {
    let response = client
        .execute(request)
        .await
        .map_err(|e| LlmError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, "failed to read error response body");
                String::new()
            }
        };
        warn!(status = status.as_u16(), "provider returned an error status");
        return Err(LlmError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
