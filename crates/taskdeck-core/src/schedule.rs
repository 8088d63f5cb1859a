//! Cancellable scheduled tasks.
//!
//! A [`ScheduledTask`] wraps a spawned tokio task. Dropping the handle
//! aborts the task, so whoever owns the handle owns the timer's lifetime.
//! Must be created from within a tokio runtime.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug)]
pub struct ScheduledTask {
    label: &'static str,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `f` once after `delay`.
    pub fn after<F>(label: &'static str, delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::spawn(label, async move {
            time::sleep(delay).await;
            f();
        })
    }

    /// Run `f` every `period`, first call one period from now, until it
    /// returns `ControlFlow::Break`.
    pub fn every<F>(label: &'static str, period: Duration, mut f: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        Self::spawn(label, async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if f().is_break() {
                    break;
                }
            }
        })
    }

    fn spawn<Fut>(label: &'static str, fut: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        tracing::trace!(label, "scheduled task spawned");
        Self {
            label,
            handle: tokio::spawn(fut),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the task. Same as dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            tracing::trace!(label = self.label, "scheduled task cancelled");
        }
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn after_fires_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let task = ScheduledTask::after("once", Duration::from_millis(100), move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn every_stops_on_break() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let _task = ScheduledTask::every("ticker", Duration::from_millis(10), move || {
            if h.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_cancels() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let task = ScheduledTask::every("ticker", Duration::from_millis(10), move || {
            h.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        });

        time::sleep(Duration::from_millis(35)).await;
        task.cancel();
        let seen = hits.load(Ordering::SeqCst);
        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), seen);
        assert_eq!(seen, 3);
    }
}
