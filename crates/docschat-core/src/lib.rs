//! Chat session logic for docschat.
//!
//! This crate owns conversation history, prompt rendering, the progress
//! indicator and the streaming turn loop. It depends only on
//! `docschat-types`; concrete providers live in `docschat-infra`.

pub mod chat;
pub mod llm;
pub mod progress;
pub mod prompt;
