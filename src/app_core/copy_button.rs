//! Copy-to-clipboard buttons on code figures.
//!
//! A click starts an asynchronous clipboard write; its result is routed to
//! one of two continuations. Success flips the button to "copied" and starts
//! a revert timer, replacing any revert still pending from an earlier click.
//! Failure alerts the user and leaves the button as it was.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::app_core::errors::ClipboardError;
use crate::app_core::host::{Clipboard, Notifier, Timers};
use crate::model::CopyState;

/// Icon shown while idle.
pub const COPY_ICON: &str = "\u{2398}";
/// Icon shown right after a successful copy.
pub const COPIED_ICON: &str = "\u{2714}";

pub fn icon_for(state: CopyState) -> &'static str {
    match state {
        CopyState::Idle => COPY_ICON,
        CopyState::Copied => COPIED_ICON,
    }
}

/// Renders a button's feedback state (icon plus "copied" class).
pub trait CopyButtonView {
    fn render(&self, state: CopyState);
}

pub struct CopyFeedback<V, T: Timers> {
    view: V,
    timers: Rc<T>,
    notifier: Rc<dyn Notifier>,
    revert_after: Duration,
    state: Cell<CopyState>,
    revert: RefCell<Option<T::Handle>>,
}

impl<V, T> CopyFeedback<V, T>
where
    V: CopyButtonView + 'static,
    T: Timers + 'static,
{
    pub fn new(view: V, timers: Rc<T>, notifier: Rc<dyn Notifier>, revert_after: Duration) -> Rc<Self> {
        view.render(CopyState::Idle);
        Rc::new(Self {
            view,
            timers,
            notifier,
            revert_after,
            state: Cell::new(CopyState::Idle),
            revert: RefCell::new(None),
        })
    }

    pub fn state(&self) -> CopyState {
        self.state.get()
    }

    /// Writes `text` to `clipboard` and reports the result once it settles.
    pub fn copy<C: Clipboard + ?Sized>(self: &Rc<Self>, clipboard: &C, text: String) {
        let this = Rc::clone(self);
        clipboard.write_text(text, Box::new(move |result| this.finish(result)));
    }

    /// Dispatches a settled clipboard write to the matching continuation.
    pub fn finish(self: &Rc<Self>, result: Result<(), ClipboardError>) {
        match result {
            Ok(()) => self.on_copied(),
            Err(err) => self.on_failed(&err),
        }
    }

    fn on_copied(self: &Rc<Self>) {
        self.cancel_revert();
        self.set_state(CopyState::Copied);

        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = self.timers.schedule(
            self.revert_after,
            Box::new(move || {
                if let Some(this) = weak.upgrade() {
                    this.revert.borrow_mut().take();
                    this.set_state(CopyState::Idle);
                }
            }),
        );
        if handle.is_none() {
            // No timer means nothing would ever restore idle.
            tracing::warn!("could not schedule copy feedback revert");
            self.set_state(CopyState::Idle);
        }
        *self.revert.borrow_mut() = handle;
    }

    fn on_failed(&self, err: &ClipboardError) {
        tracing::warn!(%err, "copy to clipboard failed");
        self.notifier.alert(&format!("Could not copy to clipboard: {err}"));
    }

    fn cancel_revert(&self) {
        let pending = self.revert.borrow_mut().take();
        if let Some(handle) = pending {
            self.timers.cancel(handle);
        }
    }

    fn set_state(&self, state: CopyState) {
        self.state.set(state);
        self.view.render(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::native::{ManualClipboard, ManualTimers, MemoryCopyButton, RecordingNotifier};

    const REVERT: Duration = Duration::from_millis(1000);

    struct Fixture {
        timers: Rc<ManualTimers>,
        clipboard: ManualClipboard,
        notifier: Rc<RecordingNotifier>,
        button: MemoryCopyButton,
        feedback: Rc<CopyFeedback<MemoryCopyButton, ManualTimers>>,
    }

    fn fixture() -> Fixture {
        let timers = Rc::new(ManualTimers::new());
        let notifier = Rc::new(RecordingNotifier::new());
        let button = MemoryCopyButton::new();
        let feedback = CopyFeedback::new(
            button.clone(),
            Rc::clone(&timers),
            notifier.clone(),
            REVERT,
        );
        Fixture {
            timers,
            clipboard: ManualClipboard::new(),
            notifier,
            button,
            feedback,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_idle() {
        let f = fixture();
        assert_eq!(f.button.icon(), COPY_ICON);
        assert!(!f.button.has_copied_class());
    }

    #[test]
    fn success_shows_copied_then_reverts() {
        let f = fixture();
        f.feedback.copy(&f.clipboard, "puts hello".to_string());
        assert_eq!(f.clipboard.pending(), 1);
        assert_eq!(f.feedback.state(), CopyState::Idle);

        // The write settles well after the click.
        f.timers.advance(ms(250));
        f.clipboard.resolve_next(Ok(()));
        assert_eq!(f.clipboard.contents().as_deref(), Some("puts hello"));
        assert_eq!(f.feedback.state(), CopyState::Copied);
        assert_eq!(f.button.icon(), COPIED_ICON);
        assert!(f.button.has_copied_class());

        f.timers.advance(ms(999));
        assert_eq!(f.feedback.state(), CopyState::Copied);
        f.timers.advance(ms(1));
        assert_eq!(f.feedback.state(), CopyState::Idle);
        assert_eq!(f.button.icon(), COPY_ICON);
        assert!(!f.button.has_copied_class());
    }

    #[test]
    fn repeated_success_restarts_revert_timer() {
        let f = fixture();
        f.feedback.finish(Ok(()));
        f.timers.advance(ms(600));
        f.feedback.finish(Ok(()));
        assert_eq!(f.timers.pending(), 1);

        // The first timer would have fired here; it was cancelled.
        f.timers.advance(ms(600));
        assert_eq!(f.feedback.state(), CopyState::Copied);

        f.timers.advance(ms(400));
        assert_eq!(f.feedback.state(), CopyState::Idle);
        assert_eq!(f.timers.pending(), 0);
    }

    #[test]
    fn overlapping_clicks_never_stick_on_copied() {
        let f = fixture();
        for _ in 0..3 {
            f.feedback.copy(&f.clipboard, "x".to_string());
        }
        f.clipboard.resolve_next(Ok(()));
        f.timers.advance(ms(300));
        f.clipboard.resolve_next(Ok(()));
        f.timers.advance(ms(300));
        f.clipboard.resolve_next(Ok(()));

        f.timers.advance(ms(1000));
        assert_eq!(f.feedback.state(), CopyState::Idle);
        assert_eq!(f.button.icon(), COPY_ICON);
    }

    #[test]
    fn failure_alerts_and_stays_idle() {
        let f = fixture();
        f.feedback.copy(&f.clipboard, "x".to_string());
        f.clipboard
            .resolve_next(Err(ClipboardError::Rejected("NotAllowedError".to_string())));

        assert_eq!(f.feedback.state(), CopyState::Idle);
        assert_eq!(f.button.icon(), COPY_ICON);
        let alerts = f.notifier.messages();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("NotAllowedError"), "{alerts:?}");
        assert_eq!(f.timers.pending(), 0);
    }

    #[test]
    fn unavailable_clipboard_alerts() {
        let f = fixture();
        let clipboard = ManualClipboard::unavailable();
        f.feedback.copy(&clipboard, "x".to_string());
        assert_eq!(f.feedback.state(), CopyState::Idle);
        assert_eq!(f.notifier.messages().len(), 1);
    }
}
