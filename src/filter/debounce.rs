//! Search-input debouncing.
//!
//! Every [`push`](Debouncer::push) cancels the pending timer and starts a new
//! one; the effective value only changes once input has been stable for the
//! whole window. At most one timer is ever pending.
//!
//! This is a library primitive for front ends that feed keystrokes. MCP tool
//! calls already carry settled search text and do not go through it.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Quiet period before raw input becomes the effective value.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// Holds the raw input and publishes the settled value.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    settled: Arc<watch::Sender<T>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// A debouncer with the [`DEFAULT_WINDOW`].
    pub fn new(initial: T) -> Self {
        Self::with_window(initial, DEFAULT_WINDOW)
    }

    pub fn with_window(initial: T, window: Duration) -> Self {
        let (settled, _) = watch::channel(initial);
        Self {
            window,
            settled: Arc::new(settled),
            pending: Mutex::new(None),
        }
    }

    /// Records new raw input. Must be called from within a tokio runtime.
    pub fn push(&self, value: T) {
        let settled = self.settled.clone();
        let window = self.window;
        let task = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            settled.send_replace(value);
        });

        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    /// The effective value.
    pub fn current(&self) -> T {
        self.settled.borrow().clone()
    }

    /// Receiver notified each time a value settles.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.settled.subscribe()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(task) = pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use tokio::time::{Instant, sleep};

    #[tokio::test(start_paused = true)]
    async fn settles_after_default_window() {
        let debouncer = Debouncer::new(String::new());
        let mut settled = debouncer.subscribe();
        let start = Instant::now();

        debouncer.push("z".to_string());
        sleep(Duration::from_millis(299)).await;
        check!(debouncer.current() == "");

        settled.changed().await.unwrap();
        check!(start.elapsed() == Duration::from_millis(300));
        check!(debouncer.current() == "z");
    }

    #[tokio::test(start_paused = true)]
    async fn keystrokes_restart_the_timer() {
        let debouncer = Debouncer::new(String::new());
        let mut settled = debouncer.subscribe();
        let start = Instant::now();

        debouncer.push("z".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.push("ze".to_string());
        sleep(Duration::from_millis(250)).await;
        check!(debouncer.current() == "");

        settled.changed().await.unwrap();
        check!(start.elapsed() == Duration::from_millis(400));
        check!(*settled.borrow_and_update() == "ze");

        // the cancelled keystroke never fires
        sleep(Duration::from_secs(1)).await;
        check!(!settled.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_window_is_honored() {
        let debouncer = Debouncer::with_window(0u32, Duration::from_millis(50));
        let mut settled = debouncer.subscribe();
        let start = Instant::now();

        debouncer.push(7);
        settled.changed().await.unwrap();
        check!(start.elapsed() == Duration::from_millis(50));
        check!(debouncer.current() == 7);
    }
}
