//! Reference-counted busy indicator.
//!
//! Each operation holds a `BusyGuard` for its whole duration. The view is told
//! `set_busy(true)` when the first guard is taken and `set_busy(false)` when the
//! last one drops, so overlapping operations (a delete that reloads the feed,
//! a filter reload racing an upload) never hide the indicator early.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::view::CandidateView;

#[derive(Clone)]
pub struct BusySignal {
    inner: Arc<BusyInner>,
}

struct BusyInner {
    active: Mutex<usize>,
    view: Arc<dyn CandidateView>,
}

/// Releases its hold on the busy indicator when dropped.
#[must_use = "the busy indicator is released as soon as the guard is dropped"]
pub struct BusyGuard {
    inner: Arc<BusyInner>,
}

impl BusySignal {
    pub fn new(view: Arc<dyn CandidateView>) -> Self {
        Self {
            inner: Arc::new(BusyInner {
                active: Mutex::new(0),
                view,
            }),
        }
    }

    pub fn acquire(&self) -> BusyGuard {
        let mut active = self.inner.active.lock().unwrap_or_else(PoisonError::into_inner);
        *active += 1;
        if *active == 1 {
            self.inner.view.set_busy(true);
        }
        debug!("busy: {} active", *active);
        BusyGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    #[cfg(test)]
    pub fn active(&self) -> usize {
        *self.inner.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut active = self.inner.active.lock().unwrap_or_else(PoisonError::into_inner);
        *active = active.saturating_sub(1);
        if *active == 0 {
            self.inner.view.set_busy(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingView, ViewEvent};

    #[test]
    fn test_single_guard_toggles_once() {
        let view = Arc::new(RecordingView::default());
        let busy = BusySignal::new(view.clone());

        {
            let _guard = busy.acquire();
            assert_eq!(busy.active(), 1);
        }

        assert_eq!(busy.active(), 0);
        assert_eq!(
            view.events(),
            vec![ViewEvent::Busy(true), ViewEvent::Busy(false)]
        );
    }

    #[test]
    fn test_overlapping_guards_hide_only_after_last_release() {
        let view = Arc::new(RecordingView::default());
        let busy = BusySignal::new(view.clone());

        let outer = busy.acquire();
        let inner = busy.acquire();
        drop(outer);
        assert_eq!(view.busy_transitions(), vec![true]);

        drop(inner);
        assert_eq!(view.busy_transitions(), vec![true, false]);
    }

    #[test]
    fn test_guard_released_on_early_return() {
        fn fails(busy: &BusySignal) -> Result<(), &'static str> {
            let _guard = busy.acquire();
            let outcome: Result<(), &'static str> = Err("boom");
            outcome?;
            Ok(())
        }

        let view = Arc::new(RecordingView::default());
        let busy = BusySignal::new(view.clone());

        assert!(fails(&busy).is_err());
        assert_eq!(busy.active(), 0);
        assert_eq!(view.busy_transitions(), vec![true, false]);
    }
}
