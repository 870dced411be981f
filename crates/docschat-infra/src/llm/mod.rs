//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait
//! defined in `docschat-core`: [`OpenRouterProvider`] for OpenRouter and
//! other OpenAI-compatible endpoints.
//!
//! [`LlmProvider`]: docschat_core::llm::provider::LlmProvider

pub mod openrouter;

pub use self::openrouter::OpenRouterProvider;
