//! The transient status message shown under the canvas.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Message {
    /// Bumped on every `show`, so a stale timer cannot clear a newer message.
    seq: u64,
    text: Option<String>,
}

/// A single status message with a debounced auto-clear.
///
/// Each [`show`](StatusLine::show) replaces the message and restarts the
/// timer. The timer runs on the ambient tokio runtime; outside a runtime
/// messages stay until replaced or cleared. Dropping the line cancels the timer.
#[derive(Debug)]
pub struct StatusLine {
    message: Arc<Mutex<Message>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    delay: Duration,
}

impl StatusLine {
    /// Create an empty status line clearing after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            message: Arc::new(Mutex::new(Message::default())),
            timer: Mutex::new(None),
            delay,
        }
    }

    /// Show `text`, cancelling any pending clear and starting a new one.
    pub fn show(&self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("status: {text}");
        let seq = {
            let mut message = lock(&self.message);
            message.seq += 1;
            message.text = Some(text);
            message.seq
        };

        let mut timer = lock(&self.timer);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        if let Ok(handle) = Handle::try_current() {
            let message = Arc::clone(&self.message);
            let delay = self.delay;
            *timer = Some(handle.spawn(async move {
                tokio::time::sleep(delay).await;
                let mut message = lock(&message);
                if message.seq == seq {
                    message.text = None;
                }
            }));
        }
    }

    /// The message currently showing.
    pub fn current(&self) -> Option<String> {
        lock(&self.message).text.clone()
    }

    /// Remove the message now and cancel the timer.
    pub fn clear(&self) {
        if let Some(timer) = lock(&self.timer).take() {
            timer.abort();
        }
        lock(&self.message).text = None;
    }

    /// Whether an auto-clear is scheduled and has not yet run.
    pub fn timer_pending(&self) -> bool {
        lock(&self.timer)
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.timer).take() {
            timer.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(3000);

    #[tokio::test(start_paused = true)]
    async fn message_clears_after_delay() {
        let status = StatusLine::new(DELAY);
        status.show("Module is valid.");
        assert_eq!(status.current().as_deref(), Some("Module is valid."));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(status.current().is_some());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(status.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn new_message_restarts_timer() {
        let status = StatusLine::new(DELAY);
        status.show("first");
        tokio::time::sleep(Duration::from_millis(2000)).await;
        status.show("second");
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(status.current().as_deref(), Some("second"));
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(status.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_timer() {
        let status = StatusLine::new(DELAY);
        status.show("bye");
        let message = Arc::clone(&status.message);
        drop(status);
        tokio::time::sleep(Duration::from_millis(5000)).await;
        // The aborted timer never ran, so the text is still there.
        assert_eq!(lock(&message).text.as_deref(), Some("bye"));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_is_immediate() {
        let status = StatusLine::new(DELAY);
        status.show("hello");
        assert!(status.timer_pending());
        status.clear();
        assert!(status.current().is_none());
        assert!(!status.timer_pending());
    }

    #[test]
    fn outside_runtime_message_persists() {
        let status = StatusLine::new(DELAY);
        status.show("no runtime");
        assert_eq!(status.current().as_deref(), Some("no runtime"));
        assert!(!status.timer_pending());
    }
}
