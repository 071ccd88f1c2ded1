//! Trailing-edge debouncer on tokio timers.
//!
//! Every `call` cancels the pending timer and arms a new one; only the last call
//! of a burst reaches the callback, with that call's arguments. A callback that
//! has already started keeps running.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::task::JoinHandle;

type Callback<T> = Box<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

pub struct Debouncer<T> {
    inner: Arc<DebounceInner<T>>,
}

struct DebounceInner<T> {
    wait: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(wait: Duration, callback: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            inner: Arc::new(DebounceInner {
                wait,
                callback: Box::new(move |args| callback(args).boxed()),
                pending: Mutex::new(None),
            }),
        }
    }

    /// Schedules the callback `wait` from now with `args`, replacing any pending call.
    /// Must be called from within a tokio runtime.
    pub fn call(&self, args: T) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let inner = Arc::clone(&self.inner);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.wait).await;
            // Detached: a later `call` only aborts the timer, never a running callback.
            tokio::spawn((inner.callback)(args));
        }));
    }

    /// Drops the pending call, if any.
    pub fn cancel(&self) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Arc<Mutex<Vec<u32>>>;

    fn recorder(wait_ms: u64) -> (Debouncer<u32>, Log) {
        let log: Log = Arc::default();
        let sink = log.clone();
        let debouncer = Debouncer::new(Duration::from_millis(wait_ms), move |n: u32| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(n);
            }
        });
        (debouncer, log)
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_call() {
        let (debouncer, log) = recorder(300);

        for n in 1..=5 {
            debouncer.call(n);
            advance(100).await;
        }
        assert!(log.lock().unwrap().is_empty());

        advance(300).await;
        assert_eq!(*log.lock().unwrap(), vec![5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_fire() {
        let (debouncer, log) = recorder(300);

        debouncer.call(1);
        debouncer.call(2);
        advance(400).await;
        debouncer.call(3);
        advance(400).await;

        assert_eq!(*log.lock().unwrap(), vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_debouncers_do_not_interfere() {
        let (first, first_log) = recorder(300);
        let (second, second_log) = recorder(300);

        first.call(10);
        second.call(20);
        first.call(11);
        advance(400).await;

        assert_eq!(*first_log.lock().unwrap(), vec![11]);
        assert_eq!(*second_log.lock().unwrap(), vec![20]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_call() {
        let (debouncer, log) = recorder(300);

        debouncer.call(1);
        debouncer.cancel();
        advance(600).await;

        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_callback_is_not_aborted() {
        let log: Log = Arc::default();
        let sink = log.clone();
        let debouncer = Debouncer::new(Duration::from_millis(300), move |n: u32| {
            let sink = sink.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(1_000)).await;
                sink.lock().unwrap().push(n);
            }
        });

        debouncer.call(1);
        advance(350).await;
        debouncer.call(2);
        advance(2_000).await;

        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }
}
