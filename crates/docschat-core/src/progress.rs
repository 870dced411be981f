//! "Thinking..." spinner shown while waiting for the first fragment.
//!
//! The indicator runs as its own tokio task that ticks an
//! [`indicatif::ProgressBar`] until it is cancelled, then clears the bar.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle, TermLike};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Glyph cycle drawn in front of the label. The trailing empty string is
/// the finished state.
pub const FRAMES: [&str; 5] = ["|", "/", "-", "\\", ""];

/// Delay between two frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(80);

const LABEL: &str = "Thinking...";

/// Builds a fresh terminal for every indicator started on a custom target.
pub type TermFactory = Arc<dyn Fn() -> Box<dyn TermLike> + Send + Sync>;

/// Where the indicator draws.
///
/// `Stdout` and `Stderr` draw nothing when the stream is not a terminal.
#[derive(Clone, Default)]
pub enum ProgressTarget {
    #[default]
    Stdout,
    Stderr,
    /// Draw nothing.
    Hidden,
    /// Draw on a caller-supplied terminal such as indicatif's `InMemoryTerm`.
    Custom(TermFactory),
}

impl ProgressTarget {
    /// Target that draws on clones of `term`.
    pub fn term_like<T>(term: T) -> Self
    where
        T: TermLike + Clone + 'static,
    {
        ProgressTarget::Custom(Arc::new(move || Box::new(term.clone())))
    }

    pub fn draw_target(&self) -> ProgressDrawTarget {
        match self {
            ProgressTarget::Stdout => ProgressDrawTarget::stdout(),
            ProgressTarget::Stderr => ProgressDrawTarget::stderr(),
            ProgressTarget::Hidden => ProgressDrawTarget::hidden(),
            ProgressTarget::Custom(make) => ProgressDrawTarget::term_like(make()),
        }
    }
}

impl fmt::Debug for ProgressTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressTarget::Stdout => write!(f, "Stdout"),
            ProgressTarget::Stderr => write!(f, "Stderr"),
            ProgressTarget::Hidden => write!(f, "Hidden"),
            ProgressTarget::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Handle to a running spinner task.
///
/// Dropping the handle without calling [`stop`](Self::stop) still cancels
/// the task; `stop` additionally waits for the bar to be cleared.
pub struct ProgressIndicator {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ProgressIndicator {
    /// Start drawing on `target` at [`FRAME_INTERVAL`].
    pub fn start(target: &ProgressTarget) -> Self {
        Self::start_with_interval(target.draw_target(), FRAME_INTERVAL)
    }

    pub fn start_with_interval(target: ProgressDrawTarget, interval: Duration) -> Self {
        // Configured while hidden so nothing is drawn before the first tick.
        let bar = ProgressBar::hidden()
            .with_style(ProgressStyle::default_spinner().tick_strings(&FRAMES))
            .with_message(LABEL);
        bar.set_draw_target(target);

        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    // Cancellation wins ties so a stop issued before the
                    // first tick never draws a frame.
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => bar.tick(),
                }
            }

            bar.finish_and_clear();
        });

        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Signal the task to stop and wait until the bar is cleared.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "progress indicator task failed");
            }
        }
    }
}

impl Drop for ProgressIndicator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use indicatif::InMemoryTerm;

    fn term() -> InMemoryTerm {
        InMemoryTerm::new(4, 80)
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_first_frame_leaves_line_blank() {
        let term = term();
        let indicator = ProgressIndicator::start(&ProgressTarget::term_like(term.clone()));

        tokio::time::timeout(Duration::from_secs(1), indicator.stop())
            .await
            .expect("stop must not hang");

        assert_eq!(term.contents(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_rotate_then_clear() {
        let term = term();
        let indicator = ProgressIndicator::start(&ProgressTarget::term_like(term.clone()));

        // Sample halfway between ticks so each snapshot sees a settled frame.
        let mut snapshots = Vec::new();
        tokio::time::sleep(FRAME_INTERVAL / 2).await;
        for _ in 0..3 {
            snapshots.push(term.contents());
            tokio::time::sleep(FRAME_INTERVAL).await;
        }

        assert!(snapshots.iter().all(|s| s.ends_with(" Thinking...")));
        let distinct: HashSet<&String> = snapshots.iter().collect();
        assert!(distinct.len() >= 2, "spinner did not rotate: {snapshots:?}");

        indicator.stop().await;
        assert_eq!(term.contents(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_drawn_after_stop() {
        let term = term();
        let indicator = ProgressIndicator::start(&ProgressTarget::term_like(term.clone()));
        tokio::time::sleep(FRAME_INTERVAL * 2).await;

        indicator.stop().await;
        tokio::time::sleep(FRAME_INTERVAL * 5).await;

        assert_eq!(term.contents(), "");
    }

    #[tokio::test]
    async fn test_drop_cancels_task() {
        let indicator = ProgressIndicator::start(&ProgressTarget::Hidden);
        let token = indicator.cancel.clone();
        drop(indicator);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_target_selection() {
        assert!(ProgressTarget::Hidden.draw_target().is_hidden());
        assert!(matches!(ProgressTarget::default(), ProgressTarget::Stdout));
        assert!(!ProgressTarget::term_like(term()).draw_target().is_hidden());
    }
}
