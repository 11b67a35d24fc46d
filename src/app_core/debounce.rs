//! Trailing-edge debounce over the host [`Timers`].
//!
//! Each call cancels the pending one and schedules a fresh task, so only the
//! last call inside a quiet window ever runs.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::app_core::host::Timers;

pub struct Debouncer<T: Timers> {
    timers: Rc<T>,
    delay: Duration,
    pending: Rc<RefCell<Option<T::Handle>>>,
}

impl<T> Debouncer<T>
where
    T: Timers + 'static,
{
    pub fn new(timers: Rc<T>, delay: Duration) -> Self {
        Self {
            timers,
            delay,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Schedules `task` after the quiet period, superseding any pending task.
    /// Returns `false` if the host refused the timer; `task` was dropped.
    pub fn call(&self, task: impl FnOnce() + 'static) -> bool {
        self.cancel();

        let pending = Rc::clone(&self.pending);
        let handle = self.timers.schedule(
            self.delay,
            Box::new(move || {
                pending.borrow_mut().take();
                task();
            }),
        );
        let scheduled = handle.is_some();
        if !scheduled {
            tracing::warn!(delay_ms = self.delay.as_millis() as u64, "could not schedule debounced task");
        }
        *self.pending.borrow_mut() = handle;
        scheduled
    }

    /// Drops the pending task, if any, without running it.
    pub fn cancel(&self) {
        let pending = self.pending.borrow_mut().take();
        if let Some(handle) = pending {
            self.timers.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::native::ManualTimers;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn rapid_calls_collapse_into_one() {
        let timers = Rc::new(ManualTimers::new());
        let debounce = Debouncer::new(Rc::clone(&timers), ms(100));
        let runs = Rc::new(RefCell::new(Vec::new()));

        for n in 0..5 {
            let runs = Rc::clone(&runs);
            debounce.call(move || runs.borrow_mut().push(n));
            timers.advance(ms(30));
        }
        assert!(runs.borrow().is_empty());
        assert!(debounce.is_pending());

        timers.advance(ms(100));
        assert_eq!(*runs.borrow(), vec![4]);
        assert!(!debounce.is_pending());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn quiet_period_restarts_on_each_call() {
        let timers = Rc::new(ManualTimers::new());
        let debounce = Debouncer::new(Rc::clone(&timers), ms(100));
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        debounce.call(move || c.set(c.get() + 1));
        timers.advance(ms(99));
        let c = Rc::clone(&count);
        debounce.call(move || c.set(c.get() + 1));
        timers.advance(ms(99));
        assert_eq!(count.get(), 0);

        timers.advance(ms(1));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn separate_windows_each_run() {
        let timers = Rc::new(ManualTimers::new());
        let debounce = Debouncer::new(Rc::clone(&timers), ms(100));
        let count = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let c = Rc::clone(&count);
            debounce.call(move || c.set(c.get() + 1));
            timers.advance(ms(150));
        }
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn refused_timer_reports_failure() {
        let timers = Rc::new(ManualTimers::new());
        timers.set_refusing(true);
        let debounce = Debouncer::new(Rc::clone(&timers), ms(100));
        let ran = Rc::new(Cell::new(false));

        let r = Rc::clone(&ran);
        assert!(!debounce.call(move || r.set(true)));
        assert!(!debounce.is_pending());
        timers.advance(ms(500));
        assert!(!ran.get());
    }

    #[test]
    fn cancel_drops_pending_task() {
        let timers = Rc::new(ManualTimers::new());
        let debounce = Debouncer::new(Rc::clone(&timers), ms(100));
        let ran = Rc::new(Cell::new(false));

        let r = Rc::clone(&ran);
        debounce.call(move || r.set(true));
        debounce.cancel();
        timers.advance(ms(500));
        assert!(!ran.get());
    }
}
