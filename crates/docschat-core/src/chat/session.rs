//! Streaming chat session.
//!
//! `ChatSession` owns the conversation history and drives one turn at a
//! time: it renders the prompt, runs the provider stream and the progress
//! indicator as two tokio tasks, forwards fragments to a [`TurnSink`] in
//! arrival order, and records the assembled answer.

use std::fmt;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use docschat_types::config::{ChatConfig, DEFAULT_MODEL, DEFAULT_MAX_HISTORY};
use docschat_types::llm::{CompletionRequest, StreamFragment};
use docschat_types::spec::SpecContext;

use crate::llm::provider::LlmProvider;
use crate::progress::{ProgressIndicator, ProgressTarget};
use crate::prompt::PromptBuilder;

use super::history::ConversationHistory;

/// Output length requested for every answer.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Sampling temperature for every answer.
pub const TEMPERATURE: f64 = 0.7;

/// Capacity of the channel between the transcriber task and the session.
const FRAGMENT_BUFFER: usize = 64;

/// Literal command that ends the session.
const EXIT_COMMAND: &str = "exit";

/// Receives what a turn produces, in order.
///
/// Implemented by the terminal renderer in `docschat-cli` and by
/// collecting sinks in tests.
pub trait TurnSink {
    /// Called before each line of input is read.
    fn prompt(&mut self) {}

    /// A non-empty piece of the answer.
    fn text(&mut self, fragment: &str);

    /// A transport error that ends the turn.
    fn error(&mut self, message: &str);

    /// The turn is complete and recorded in history.
    fn turn_finished(&mut self) {}
}

/// Where a turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    AwaitingFirstToken,
    Streaming,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnPhase::Idle => write!(f, "idle"),
            TurnPhase::AwaitingFirstToken => write!(f, "awaiting_first_token"),
            TurnPhase::Streaming => write!(f, "streaming"),
        }
    }
}

/// What one call to [`ChatSession::ask`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Concatenation of every text fragment, possibly empty.
    pub answer: String,
    /// The terminal error, if the stream ended with one.
    pub error: Option<String>,
}

/// Totals reported when [`ChatSession::run`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub turns: usize,
}

/// Per-session request settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub model: String,
    pub max_history: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl From<&ChatConfig> for SessionSettings {
    fn from(config: &ChatConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_history: config.max_history,
        }
    }
}

/// True when `line` is the exit command, ignoring case and surrounding
/// whitespace.
pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

/// A conversation about one API specification.
///
/// The session is the only writer of its history; the spawned tasks only
/// send fragments back over a channel.
pub struct ChatSession<P: LlmProvider> {
    spec: Arc<SpecContext>,
    provider: P,
    history: ConversationHistory,
    settings: SessionSettings,
    progress: ProgressTarget,
    phase: TurnPhase,
}

impl<P: LlmProvider> ChatSession<P> {
    /// Start a session whose history holds only the system anchor.
    pub fn new(spec: Arc<SpecContext>, provider: P, settings: SessionSettings) -> Self {
        let history = ConversationHistory::new(
            PromptBuilder::system_instruction(&spec),
            settings.max_history,
        );

        Self {
            spec,
            provider,
            history,
            settings,
            progress: ProgressTarget::default(),
            phase: TurnPhase::Idle,
        }
    }

    /// Choose where the progress indicator draws.
    pub fn with_progress_target(mut self, target: ProgressTarget) -> Self {
        self.progress = target;
        self
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn spec(&self) -> &SpecContext {
        &self.spec
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    fn enter(&mut self, phase: TurnPhase) {
        debug!(from = %self.phase, to = %phase, "turn phase");
        self.phase = phase;
    }

    /// Run one turn for `question`.
    ///
    /// Returns once the stream has ended, the progress indicator and the
    /// transcriber task have both finished, and the answer has been
    /// appended to history. Error text is shown through the sink but is not
    /// stored.
    pub async fn ask<S: TurnSink>(&mut self, question: &str, sink: &mut S) -> TurnOutcome {
        self.history.push_user(question);
        let messages = PromptBuilder::render(&self.spec, &self.history);
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            stream: true,
        };

        self.enter(TurnPhase::AwaitingFirstToken);
        let mut progress = Some(ProgressIndicator::start(&self.progress));

        let (tx, mut rx) = mpsc::channel(FRAGMENT_BUFFER);
        let mut stream = self.provider.stream(request);
        let transcriber = tokio::spawn(async move {
            while let Some(fragment) = stream.next().await {
                if tx.send(fragment).await.is_err() {
                    break;
                }
            }
        });

        let mut answer = String::new();
        let mut error = None;
        let mut fragments = 0usize;

        while let Some(fragment) = rx.recv().await {
            if let Some(indicator) = progress.take() {
                indicator.stop().await;
                self.enter(TurnPhase::Streaming);
            }
            fragments += 1;
            match fragment {
                StreamFragment::Text(text) => {
                    sink.text(&text);
                    answer.push_str(&text);
                }
                StreamFragment::Error(message) => {
                    warn!(error = %message, "turn ended with a transport error");
                    sink.error(&message);
                    error = Some(message);
                }
            }
        }

        if let Some(indicator) = progress.take() {
            indicator.stop().await;
        }
        if let Err(e) = transcriber.await {
            warn!(error = %e, "transcriber task failed");
        }

        self.history.push_assistant(answer.clone());
        self.history.trim();
        self.enter(TurnPhase::Idle);
        debug!(
            fragments,
            chars = answer.len(),
            history = self.history.len(),
            "turn complete"
        );
        sink.turn_finished();

        TurnOutcome { answer, error }
    }

    /// Read questions line by line from `input` until end of input or the
    /// exit command, answering each one.
    ///
    /// Blank lines are ignored. Only read errors are returned; transport
    /// errors are reported per turn through the sink.
    pub async fn run<R, S>(&mut self, input: R, sink: &mut S) -> std::io::Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        S: TurnSink,
    {
        let mut lines = input.lines();
        let mut summary = SessionSummary::default();

        loop {
            sink.prompt();
            let Some(line) = lines.next_line().await? else {
                debug!("end of input");
                break;
            };
            if is_exit_command(&line) {
                debug!("exit command received");
                break;
            }
            let question = line.trim();
            if question.is_empty() {
                continue;
            }

            self.ask(question, sink).await;
            summary.turns += 1;
        }

        info!(turns = summary.turns, "chat session ended");
        Ok(summary)
    }
}
