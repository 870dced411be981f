//! Bounded conversation history anchored on a system message.

use docschat_types::config::DEFAULT_MAX_HISTORY;
use docschat_types::llm::{Message, MessageRole};

/// Ordered conversation turns whose first element is always the system
/// message.
///
/// The anchor is supplied at construction, so a history without one cannot
/// be built. Callers may only append turns or [`trim`](Self::trim).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHistory {
    turns: Vec<Message>,
    max_len: usize,
}

impl ConversationHistory {
    /// Create a history holding only the system anchor.
    ///
    /// `max_len` counts the anchor and is clamped to at least 1.
    pub fn new(system_instruction: impl Into<String>, max_len: usize) -> Self {
        Self {
            turns: vec![Message::system(system_instruction)],
            max_len: max_len.max(1),
        }
    }

    /// A history with the default bound of 1 system + 10 turns.
    pub fn with_default_bound(system_instruction: impl Into<String>) -> Self {
        Self::new(system_instruction, DEFAULT_MAX_HISTORY)
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Message::assistant(content));
    }

    /// Drop the oldest non-system turns once the bound is exceeded.
    ///
    /// Keeps `[turns[0]] ++ last (max_len - 1) turns`. A history already
    /// within the bound is left untouched.
    pub fn trim(&mut self) {
        if self.turns.len() <= self.max_len {
            return;
        }
        let excess = self.turns.len() - self.max_len;
        self.turns.drain(1..1 + excess);
    }

    /// The system anchor.
    pub fn system(&self) -> &Message {
        &self.turns[0]
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; the anchor is never removed.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of turns with the given role.
    pub fn count(&self, role: MessageRole) -> usize {
        self.turns.iter().filter(|m| m.role == role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with_pairs(pairs: usize, max_len: usize) -> ConversationHistory {
        let mut history = ConversationHistory::new("sys", max_len);
        for i in 0..pairs {
            history.push_user(format!("q{i}"));
            history.push_assistant(format!("a{i}"));
        }
        history
    }

    #[test]
    fn test_new_history_has_system_anchor() {
        let history = ConversationHistory::with_default_bound("You are helpful.");
        assert_eq!(history.len(), 1);
        assert_eq!(history.system().role, MessageRole::System);
        assert_eq!(history.system().content, "You are helpful.");
        assert_eq!(history.max_len(), 11);
    }

    #[test]
    fn test_trim_keeps_anchor_and_most_recent_turns() {
        let mut history = history_with_pairs(8, 11);
        let before = history.turns().to_vec();
        assert_eq!(before.len(), 17);

        history.trim();

        assert_eq!(history.len(), 11);
        assert_eq!(history.turns()[0], before[0]);
        assert_eq!(&history.turns()[1..], &before[before.len() - 10..]);
    }

    #[test]
    fn test_trim_is_idempotent() {
        let mut history = history_with_pairs(12, 5);
        history.trim();
        let once = history.clone();
        history.trim();
        assert_eq!(history, once);
    }

    #[test]
    fn test_trim_within_bound_is_noop() {
        let mut history = history_with_pairs(3, 11);
        let before = history.clone();
        history.trim();
        assert_eq!(history, before);
    }

    #[test]
    fn test_trim_for_every_length_above_bound() {
        for pairs in 0..20 {
            let mut history = history_with_pairs(pairs, 7);
            let before = history.turns().to_vec();
            history.trim();
            if before.len() > 7 {
                assert_eq!(history.len(), 7);
                assert_eq!(history.turns()[0], before[0]);
                assert_eq!(&history.turns()[1..], &before[before.len() - 6..]);
            } else {
                assert_eq!(history.turns(), &before[..]);
            }
        }
    }

    #[test]
    fn test_zero_bound_is_clamped_to_anchor_only() {
        let mut history = history_with_pairs(2, 0);
        history.trim();
        assert_eq!(history.len(), 1);
        assert_eq!(history.system().content, "sys");
    }

    #[test]
    fn test_count_by_role() {
        let history = history_with_pairs(3, 11);
        assert_eq!(history.count(MessageRole::System), 1);
        assert_eq!(history.count(MessageRole::User), 3);
        assert_eq!(history.count(MessageRole::Assistant), 3);
    }
}
