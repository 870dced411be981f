//! Shared domain types for docschat.
//!
//! This crate contains the types used across the workspace: conversation
//! messages, completion requests, streamed fragments, the loaded API
//! specification context, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod spec;
