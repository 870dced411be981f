//! Infrastructure layer for docschat.
//!
//! Contains the adapters behind the `docschat-core` abstractions: the
//! OpenRouter streaming provider, the OpenAPI document loader, and the
//! TOML configuration loader.

pub mod config;
pub mod llm;
pub mod openapi;
