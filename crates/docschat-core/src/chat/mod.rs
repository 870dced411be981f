//! Conversation state and the streaming turn loop.

pub mod history;
pub mod session;
