//! Prompt assembly for API questions.
//!
//! The system message sent to the LLM is re-derived on every turn from the
//! short anchor stored in history, a fixed instruction preamble, and the
//! full pretty-printed API document.

use docschat_types::llm::Message;
use docschat_types::spec::SpecContext;

use crate::chat::history::ConversationHistory;

/// Instructions placed between the system anchor and the API document.
pub const SPEC_PREAMBLE: &str = "You are an API documentation assistant. \
Answer questions about the following OpenAPI specification. \
Be concise but thorough. If asked about endpoints, include the path, method, \
parameters, request body structure, and response format. \
If the information isn't in the spec, say so.";

/// Builds the message list sent to the LLM for a turn.
pub struct PromptBuilder;

impl PromptBuilder {
    /// The anchor text stored as element 0 of a fresh history.
    pub fn system_instruction(spec: &SpecContext) -> String {
        format!(
            "You are answering questions about the {} API.",
            spec.display_name()
        )
    }

    /// Render `history` into the exact list to submit.
    ///
    /// Element 0 becomes `anchor + preamble + document`, separated by blank
    /// lines; every other turn is copied unchanged and in order. `history`
    /// is only borrowed.
    pub fn render(spec: &SpecContext, history: &ConversationHistory) -> Vec<Message> {
        let mut messages = history.turns().to_vec();
        let system = &mut messages[0];
        system.content = format!(
            "{}\n\n{}\n\n{}",
            system.content, SPEC_PREAMBLE, spec.raw_document
        );
        messages
    }
}
