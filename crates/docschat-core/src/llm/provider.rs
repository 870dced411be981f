//! LlmProvider trait definition.
//!
//! This is the core abstraction that chat-completion backends implement.
//! Uses RPITIT for `complete`, and `Pin<Box<dyn Stream>>` for `stream` so
//! the stream can be moved into a spawned task.

use std::pin::Pin;

use futures_util::Stream;

use docschat_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamFragment};

/// Boxed, sendable fragment stream returned by [`LlmProvider::stream`].
pub type FragmentStream = Pin<Box<dyn Stream<Item = StreamFragment> + Send + 'static>>;

/// Trait for chat-completion backends.
///
/// Implementations live in docschat-infra (e.g., `OpenRouterProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Open one streaming exchange for `request`.
    ///
    /// The returned stream is finite and not restartable. Transport
    /// failures are not returned as `Err`: they arrive as a final
    /// [`StreamFragment::Error`] followed by the end of the stream.
    fn stream(&self, request: CompletionRequest) -> FragmentStream;
}
