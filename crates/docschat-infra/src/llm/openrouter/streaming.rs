//! SSE framing for OpenAI-compatible streaming completions.
//!
//! The body is a sequence of newline-delimited records:
//! 1. `data: {chunk json}` -- one per delta
//! 2. `: comment` -- keepalives, ignored
//! 3. `data: [DONE]` -- end of stream
//!
//! Lines are cut from a byte buffer before decoding so a multi-byte UTF-8
//! character split across network chunks is reassembled.

use std::fmt::Display;

use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use docschat_core::llm::provider::FragmentStream;
use docschat_types::llm::{LlmError, StreamFragment};

use super::types::ChatChunk;

/// What a single SSE line contributes to the answer.
#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    /// Blank, comment or unparseable.
    Skip,
    /// `[DONE]` sentinel.
    Done,
    Chunk {
        text: Option<String>,
        finished: bool,
    },
}

/// Turn a raw response body into answer fragments.
///
/// Yields one [`StreamFragment::Text`] per non-empty delta. The stream
/// ends on `[DONE]`, on a non-empty `finish_reason`, or at end of body. A
/// body read error yields a single [`StreamFragment::Error`] and ends the
/// stream. So does a stream that ends before any payload carried a choice.
pub fn sse_fragments<S, B, E>(body: S) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut body = Box::pin(body);
        let mut buffer: Vec<u8> = Vec::new();
        // Bytes of `buffer` already known to hold no newline.
        let mut scanned = 0;
        let mut saw_choice = false;
        let mut finished = false;

        while !finished {
            match body.next().await {
                Some(Ok(bytes)) => {
                    buffer.extend_from_slice(bytes.as_ref());
                    while let Some(offset) = buffer[scanned..].iter().position(|b| *b == b'\n') {
                        let line: Vec<u8> = buffer.drain(..=scanned + offset).collect();
                        scanned = 0;
                        match parse_line(&line) {
                            SseLine::Skip => {}
                            SseLine::Done => {
                                finished = true;
                                break;
                            }
                            SseLine::Chunk { text, finished: end } => {
                                saw_choice = true;
                                if let Some(text) = text {
                                    yield StreamFragment::Text(text);
                                }
                                if end {
                                    finished = true;
                                    break;
                                }
                            }
                        }
                    }
                    scanned = buffer.len();
                    if finished && !saw_choice {
                        yield no_choices();
                    }
                }
                Some(Err(e)) => {
                    warn!(error = %e, "response body failed mid-stream");
                    yield StreamFragment::Error(LlmError::Stream(e.to_string()).to_string());
                    finished = true;
                }
                None => {
                    // Body ended without a trailing newline.
                    if let SseLine::Chunk { text, .. } = parse_line(&buffer) {
                        saw_choice = true;
                        if let Some(text) = text {
                            yield StreamFragment::Text(text);
                        }
                    }
                    if !saw_choice {
                        yield no_choices();
                    }
                    finished = true;
                }
            }
        }
    })
}

/// Terminal fragment for a stream in which no payload carried a choice,
/// such as an in-band provider error.
fn no_choices() -> StreamFragment {
    warn!("stream ended without any choices");
    StreamFragment::Error(LlmError::NoChoices.to_string())
}

fn parse_line(raw: &[u8]) -> SseLine {
    let decoded = String::from_utf8_lossy(raw);
    let line = decoded.trim();
    if line.is_empty() || line.starts_with(':') {
        return SseLine::Skip;
    }

    let payload = line.strip_prefix("data:").map(str::trim_start).unwrap_or(line);
    if payload == "[DONE]" {
        return SseLine::Done;
    }

    let chunk: ChatChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            debug!(error = %e, bytes = payload.len(), "skipping unparseable chunk");
            return SseLine::Skip;
        }
    };

    let Some(choice) = chunk.choices.into_iter().next() else {
        return SseLine::Skip;
    };
    SseLine::Chunk {
        text: choice.delta.content.filter(|t| !t.is_empty()),
        finished: choice.finish_reason.is_some_and(|r| !r.is_empty()),
    }
}
