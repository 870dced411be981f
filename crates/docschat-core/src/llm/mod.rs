//! LLM provider abstractions for docschat.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `FragmentStream`: the boxed stream type every provider returns

pub mod provider;
