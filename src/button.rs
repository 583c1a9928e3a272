//! Per-channel gesture interpretation with debounce and timing control.
//!
//! Provides [`ButtonInterpreter`] which turns a stream of raw
//! pressed/released level samples into at most one [`ButtonAction`] per
//! physical gesture: a single press, a double press, or a long hold.
//!
//! The interpreter owns no clock; callers pass the current instant into
//! every call. Deadline-driven actions (a click window expiring into a
//! single press, a hold crossing the long-hold threshold) fire from
//! [`service`](ButtonInterpreter::service) in poll mode, or from
//! [`flush_click`](ButtonInterpreter::flush_click) when a host-scheduled
//! timer comes back in push mode.

use crate::config::ButtonConfig;
use crate::time::{TimeDuration, TimeInstant};
use crate::types::ButtonAction;

/// Generation token identifying one pending click window.
///
/// Every window that opens gets a fresh token. A host that scheduled a
/// window-expiry callback hands the token back through
/// [`ButtonInterpreter::flush_click`]; if the window was meanwhile closed
/// by a double press or a long hold, the token no longer matches and the
/// late callback dies silently. This stands in for timer cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickToken(u32);

/// What an upcoming interpreter deadline will do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeadlineKind {
    /// Pending click window expires into a `SinglePress`.
    ClickWindow(ClickToken),
    /// Ongoing press crosses the long-hold threshold.
    LongHold,
}

/// The earliest upcoming deadline, for push-mode hosts that schedule
/// wake-ups instead of polling.
#[derive(Debug, Clone, Copy)]
pub struct Deadline<I: TimeInstant> {
    /// When the deadline is due.
    pub at: I,
    /// What firing it means.
    pub kind: DeadlineKind,
}

/// Debounced press state of the channel.
#[derive(Debug, Clone, Copy)]
enum PressPhase<I> {
    /// Button released.
    Idle,
    /// Button held since `since`. Once `hold_fired` is set the rest of
    /// the press is absorbed and its release produces nothing.
    Pressed { since: I, hold_fired: bool },
}

/// An open single-press candidate window.
#[derive(Debug, Clone, Copy)]
struct PendingClick<I> {
    opened_at: I,
    token: ClickToken,
}

/// Classifies one channel's raw level samples into button gestures.
///
/// State machine per the channel: `Idle` and `Pressed`, plus an optional
/// pending click window between a release and either a second release
/// (double press) or the window's expiry (single press). Level transitions
/// are accepted only when the configured debounce time has passed since
/// the last accepted transition; faster samples are discarded outright.
///
/// Exactly one of `SinglePress` / `DoublePress` / `LongHold` is emitted
/// per gesture, never more.
pub struct ButtonInterpreter<I: TimeInstant> {
    config: ButtonConfig<I::Duration>,
    phase: PressPhase<I>,
    last_transition: Option<I>,
    pending: Option<PendingClick<I>>,
    next_token: u32,
}

impl<I: TimeInstant> ButtonInterpreter<I> {
    /// Creates an idle interpreter.
    pub fn new(config: ButtonConfig<I::Duration>) -> Self {
        Self {
            config,
            phase: PressPhase::Idle,
            last_transition: None,
            pending: None,
            next_token: 0,
        }
    }

    /// Ingests one raw level sample.
    ///
    /// Poll-mode hosts call this every tick for each channel, push-mode
    /// hosts on every edge interrupt. Call [`service`] with the same `now`
    /// first so that deadlines which lapsed before this sample have
    /// already fired.
    ///
    /// Returns `Some(DoublePress)` when this sample is a release landing
    /// inside an open click window; all other classifications fire from
    /// [`service`] / [`flush_click`].
    ///
    /// [`service`]: ButtonInterpreter::service
    /// [`flush_click`]: ButtonInterpreter::flush_click
    pub fn sample(&mut self, pressed: bool, now: I) -> Option<ButtonAction> {
        match self.phase {
            PressPhase::Idle => {
                if pressed && self.debounce_elapsed(now) {
                    self.phase = PressPhase::Pressed { since: now, hold_fired: false };
                    self.last_transition = Some(now);
                }
                None
            }
            PressPhase::Pressed { hold_fired, .. } => {
                if pressed {
                    // Level unchanged; a poll while held still advances
                    // long-hold detection.
                    self.try_fire_hold(now)
                } else {
                    self.on_release(now, hold_fired)
                }
            }
        }
    }

    /// Fires the earliest due deadline, if any.
    ///
    /// Poll-mode hosts call this once per tick (and again until it returns
    /// `None` after a long gap). Emits `LongHold` when a press has lasted
    /// past the threshold, absorbing the rest of that press and cancelling
    /// any pending click window so no stale `SinglePress` can race the
    /// reset. Emits `SinglePress` when a click window expires un-doubled.
    pub fn service(&mut self, now: I) -> Option<ButtonAction> {
        let hold_over = match self.phase {
            PressPhase::Pressed { since, hold_fired: false } => {
                let held = self.elapsed_or_zero(now, since);
                if held.as_millis() >= self.config.long_hold.as_millis() {
                    Some(held.saturating_sub(self.config.long_hold))
                } else {
                    None
                }
            }
            _ => None,
        };

        let window_over = match self.pending {
            Some(pending) => {
                let open = self.elapsed_or_zero(now, pending.opened_at);
                if open.as_millis() >= self.config.double_click_window.as_millis() {
                    Some(open.saturating_sub(self.config.double_click_window))
                } else {
                    None
                }
            }
            None => None,
        };

        // When both are due, fire whichever deadline lapsed first.
        match (hold_over, window_over) {
            (Some(hold), Some(window)) if hold.as_millis() >= window.as_millis() => {
                self.fire_hold()
            }
            (Some(_), None) => self.fire_hold(),
            (_, Some(_)) => self.fire_window(),
            (None, None) => None,
        }
    }

    /// Push-mode entry for a host-scheduled click-window expiry callback.
    ///
    /// Fires `SinglePress` if `token` still names the open window. A stale
    /// token (the window was closed by a double press or long hold after
    /// the callback was scheduled) is a no-op.
    pub fn flush_click(&mut self, token: ClickToken) -> Option<ButtonAction> {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                Some(ButtonAction::SinglePress)
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::debug!("stale click token; window already closed");
                None
            }
        }
    }

    /// Returns the earliest upcoming deadline, if any.
    ///
    /// Push-mode hosts schedule a timer for it and feed the result back
    /// (via [`flush_click`](ButtonInterpreter::flush_click) for a click
    /// window, or any [`service`](ButtonInterpreter::service) call for a
    /// long hold). Returns `None` when nothing is armed or the deadline
    /// is not representable on this platform's timer.
    pub fn next_deadline(&self) -> Option<Deadline<I>> {
        let hold = match self.phase {
            PressPhase::Pressed { since, hold_fired: false } => since
                .checked_add(self.config.long_hold)
                .map(|at| Deadline { at, kind: DeadlineKind::LongHold }),
            _ => None,
        };

        let window = self.pending.and_then(|pending| {
            pending
                .opened_at
                .checked_add(self.config.double_click_window)
                .map(|at| Deadline { at, kind: DeadlineKind::ClickWindow(pending.token) })
        });

        match (hold, window) {
            (Some(hold), Some(window)) => {
                // `Some` means the window deadline is not before the hold's.
                if window.at.checked_duration_since(hold.at).is_some() {
                    Some(hold)
                } else {
                    Some(window)
                }
            }
            (deadline, None) | (None, deadline) => deadline,
        }
    }

    /// Returns true while the debounced level is pressed.
    pub fn is_pressed(&self) -> bool {
        matches!(self.phase, PressPhase::Pressed { .. })
    }

    fn on_release(&mut self, now: I, hold_fired: bool) -> Option<ButtonAction> {
        if !self.debounce_elapsed(now) {
            return None;
        }
        self.phase = PressPhase::Idle;
        self.last_transition = Some(now);

        if hold_fired {
            // The long hold consumed this gesture.
            return None;
        }

        if let Some(pending) = self.pending.take() {
            let open = self.elapsed_or_zero(now, pending.opened_at);
            if open.as_millis() < self.config.double_click_window.as_millis() {
                return Some(ButtonAction::DoublePress);
            }
            // Lapsed window that the host never flushed; drop it rather
            // than mistake this release for a second click.
        }

        self.pending = Some(PendingClick { opened_at: now, token: self.take_token() });
        None
    }

    fn try_fire_hold(&mut self, now: I) -> Option<ButtonAction> {
        if let PressPhase::Pressed { since, hold_fired: false } = self.phase {
            let held = self.elapsed_or_zero(now, since);
            if held.as_millis() >= self.config.long_hold.as_millis() {
                return self.fire_hold();
            }
        }
        None
    }

    fn fire_hold(&mut self) -> Option<ButtonAction> {
        if let PressPhase::Pressed { since, hold_fired: false } = self.phase {
            self.phase = PressPhase::Pressed { since, hold_fired: true };
            // A reset gesture must not leave a single press behind.
            self.pending = None;
            return Some(ButtonAction::LongHold);
        }
        None
    }

    fn fire_window(&mut self) -> Option<ButtonAction> {
        self.pending = None;
        Some(ButtonAction::SinglePress)
    }

    fn debounce_elapsed(&self, now: I) -> bool {
        match self.last_transition {
            None => true,
            Some(last) => {
                self.elapsed_or_zero(now, last).as_millis()
                    >= self.config.debounce.as_millis()
            }
        }
    }

    /// Duration since `earlier`, degrading a backwards clock to zero so
    /// that no debounce, hold or window timer advances on a bad sample.
    fn elapsed_or_zero(&self, now: I, earlier: I) -> I::Duration {
        match now.checked_duration_since(earlier) {
            Some(elapsed) => elapsed,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("input clock ran backwards; treating sample as zero elapsed");
                I::Duration::ZERO
            }
        }
    }

    fn take_token(&mut self) -> ClickToken {
        let token = ClickToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        token
    }
}
