//! Scoreboard controller binding two input channels to one match engine.
//!
//! Provides [`Scoreboard`], which owns the per-channel
//! [`ButtonInterpreter`]s, the [`MatchEngine`], and the host's display,
//! and borrows the host's clock. Also defines the [`ScoreDisplay`] trait
//! for render hardware abstraction.
//!
//! Gestures route as: single press scores a point for that side, double
//! press on either channel swaps the serve, long hold resets the board.
//! A won game is announced, then scores reset automatically after the
//! configured win-display delay; points arriving in between are rejected.
//!
//! Two drive modes share one code path:
//! * **poll**: call [`service`](Scoreboard::service) every 50-100 ms and
//!   feed levels through [`sample`](Scoreboard::sample);
//! * **push**: feed edges through `sample`, then schedule whatever
//!   [`next_wakeup`](Scoreboard::next_wakeup) returns and fire it back
//!   into [`handle_task`](Scoreboard::handle_task). Stale tasks die
//!   silently, so nothing ever needs cancelling.

use crate::button::{ButtonInterpreter, DeadlineKind};
use crate::command::{ResetToken, ScheduledTask};
use crate::config::{ConfigError, ScoreboardConfig};
use crate::engine::{MatchEngine, MatchSnapshot, PointOutcome};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{ButtonAction, InvalidChannel, Side};

/// Trait for abstracting the scoreboard display hardware.
///
/// Implement this for whatever renders the match (a GUI window, a
/// segment display, a serial console). Handle any hardware errors
/// internally; these methods cannot fail.
pub trait ScoreDisplay {
    /// Called with a fresh snapshot whenever the match state changes.
    ///
    /// Also called once at startup with the zeroed board, and after every
    /// reset, which is the moment to clear a win announcement.
    fn show(&mut self, snapshot: &MatchSnapshot);

    /// Called once when `winner` takes the game, before the delayed
    /// between-games reset lands.
    fn announce_win(&mut self, winner: Side);
}

/// State change reported by one controller call.
///
/// The display is driven through [`ScoreDisplay`] regardless; events let
/// hosts react on the side (sounds, logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScoreboardEvent {
    /// A point was scored.
    PointScored {
        /// The side that scored.
        side: Side,
    },
    /// The serve was swapped manually.
    ServeSwapped,
    /// A side won the game.
    GameWon {
        /// The winning side.
        winner: Side,
    },
    /// Scores were reset (delayed post-win reset or long-hold reset).
    BoardReset,
}

/// Events emitted by one controller call, oldest first.
pub type EventBatch = heapless::Vec<ScoreboardEvent, 8>;

/// Armed automatic reset following a win.
#[derive(Debug, Clone, Copy)]
struct PendingReset<I> {
    due_at: I,
    token: ResetToken,
}

/// Binds two button channels to a match engine and a display.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `D` - Display implementation type
/// * `T` - Time source implementation type
pub struct Scoreboard<'t, I: TimeInstant, D: ScoreDisplay, T: TimeSource<I>> {
    display: D,
    time_source: &'t T,
    buttons: [ButtonInterpreter<I>; 2],
    engine: MatchEngine,
    win_reset_delay: I::Duration,
    reset_games_on_hold: bool,
    pending_reset: Option<PendingReset<I>>,
    next_reset_token: u32,
    shown: MatchSnapshot,
}

impl<'t, I: TimeInstant, D: ScoreDisplay, T: TimeSource<I>> Scoreboard<'t, I, D, T> {
    /// Creates a controller at 0-0 and pushes the initial snapshot to the
    /// display.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the match rules fail validation.
    pub fn new(
        config: ScoreboardConfig<I::Duration>,
        mut display: D,
        time_source: &'t T,
    ) -> Result<Self, ConfigError> {
        let engine = MatchEngine::new(config.rules)?;
        let shown = engine.snapshot();
        display.show(&shown);

        Ok(Self {
            display,
            time_source,
            buttons: [
                ButtonInterpreter::new(config.buttons),
                ButtonInterpreter::new(config.buttons),
            ],
            engine,
            win_reset_delay: config.win_reset_delay,
            reset_games_on_hold: config.reset_games_on_hold,
            pending_reset: None,
            next_reset_token: 0,
            shown,
        })
    }

    /// Ingests one raw level sample for `side`.
    ///
    /// Deadlines that lapsed before this sample fire first, so a late
    /// poll cannot reorder gestures.
    pub fn sample(&mut self, side: Side, pressed: bool) -> EventBatch {
        let now = self.time_source.now();
        let mut events = EventBatch::new();

        self.run_due(now, &mut events);
        if let Some(action) = self.buttons[side.index()].sample(pressed, now) {
            self.route(side, action, now, &mut events);
        }

        self.sync_display();
        events
    }

    /// Ingests one raw level sample by channel index.
    ///
    /// # Errors
    /// Returns [`InvalidChannel`] for indices other than 0 and 1; the
    /// sample is not applied.
    pub fn sample_channel(
        &mut self,
        index: usize,
        pressed: bool,
    ) -> Result<EventBatch, InvalidChannel> {
        let side = Side::from_index(index)?;
        Ok(self.sample(side, pressed))
    }

    /// Advances every due deadline: long holds, expiring click windows,
    /// and the post-win reset. Poll-mode hosts call this every tick.
    pub fn service(&mut self) -> EventBatch {
        let now = self.time_source.now();
        let mut events = EventBatch::new();
        self.run_due(now, &mut events);
        self.sync_display();
        events
    }

    /// Executes one host-scheduled task.
    ///
    /// A task whose generation token no longer matches (the click window
    /// was doubled away, the reset was superseded by a long hold) is a
    /// no-op; duplicate firings are likewise harmless.
    pub fn handle_task(&mut self, task: ScheduledTask) -> EventBatch {
        let now = self.time_source.now();
        let mut events = EventBatch::new();

        match task {
            ScheduledTask::FlushClick { side, token } => {
                if let Some(action) = self.buttons[side.index()].flush_click(token) {
                    self.route(side, action, now, &mut events);
                }
            }
            ScheduledTask::CheckHold { side } => {
                while let Some(action) = self.buttons[side.index()].service(now) {
                    self.route(side, action, now, &mut events);
                }
            }
            ScheduledTask::ExecuteReset { token } => {
                self.execute_reset(token, &mut events);
            }
        }

        self.sync_display();
        events
    }

    /// Returns the next deadline as a delay from now plus the task to
    /// schedule for it, or `None` when nothing is armed.
    ///
    /// Re-query after every `sample`/`handle_task` call; earlier
    /// schedules left running are defused by their tokens.
    pub fn next_wakeup(&self) -> Option<(I::Duration, ScheduledTask)> {
        let now = self.time_source.now();
        let mut earliest: Option<(I, ScheduledTask)> = None;

        for side in Side::ALL {
            if let Some(deadline) = self.buttons[side.index()].next_deadline() {
                let task = match deadline.kind {
                    DeadlineKind::ClickWindow(token) => {
                        ScheduledTask::FlushClick { side, token }
                    }
                    DeadlineKind::LongHold => ScheduledTask::CheckHold { side },
                };
                consider(&mut earliest, deadline.at, task);
            }
        }

        if let Some(pending) = self.pending_reset {
            consider(
                &mut earliest,
                pending.due_at,
                ScheduledTask::ExecuteReset { token: pending.token },
            );
        }

        earliest.map(|(at, task)| {
            let delay = at
                .checked_duration_since(now)
                .unwrap_or(I::Duration::ZERO);
            (delay, task)
        })
    }

    /// Returns an immutable copy of the current match state.
    pub fn state(&self) -> MatchSnapshot {
        self.engine.snapshot()
    }

    /// Returns a reference to the owned display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// True between a win announcement and its automatic reset.
    pub fn is_win_displayed(&self) -> bool {
        self.engine.is_reset_pending()
    }

    fn run_due(&mut self, now: I, events: &mut EventBatch) {
        for side in Side::ALL {
            while let Some(action) = self.buttons[side.index()].service(now) {
                self.route(side, action, now, events);
            }
        }

        if let Some(pending) = self.pending_reset
            && now.checked_duration_since(pending.due_at).is_some()
        {
            self.execute_reset(pending.token, events);
        }
    }

    fn route(&mut self, side: Side, action: ButtonAction, now: I, events: &mut EventBatch) {
        match action {
            ButtonAction::SinglePress => match self.engine.add_point(side) {
                Ok(PointOutcome::Scored) => {
                    push(events, ScoreboardEvent::PointScored { side });
                }
                Ok(PointOutcome::GameWon(winner)) => {
                    push(events, ScoreboardEvent::GameWon { winner });
                    self.display.announce_win(winner);
                    self.schedule_reset(now, events);
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("point dropped; win display still up");
                }
            },
            ButtonAction::DoublePress => {
                // Either channel's double press swaps the serve.
                self.engine.toggle_serve();
                push(events, ScoreboardEvent::ServeSwapped);
            }
            ButtonAction::LongHold => {
                self.engine.reset(self.reset_games_on_hold);
                // A manual reset supersedes any scheduled one.
                self.pending_reset = None;
                push(events, ScoreboardEvent::BoardReset);
            }
        }
    }

    fn schedule_reset(&mut self, now: I, events: &mut EventBatch) {
        let token = ResetToken(self.next_reset_token);
        self.next_reset_token = self.next_reset_token.wrapping_add(1);

        match now.checked_add(self.win_reset_delay) {
            Some(due_at) => {
                self.pending_reset = Some(PendingReset { due_at, token });
            }
            None => {
                // Deadline not representable on this timer; skip the win
                // display rather than wedge the board.
                self.engine.reset(false);
                push(events, ScoreboardEvent::BoardReset);
            }
        }
    }

    fn execute_reset(&mut self, token: ResetToken, events: &mut EventBatch) {
        match self.pending_reset {
            Some(pending) if pending.token == token => {
                self.pending_reset = None;
                self.engine.reset(false);
                push(events, ScoreboardEvent::BoardReset);
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::debug!("stale reset token; board already reset");
            }
        }
    }

    fn sync_display(&mut self) {
        let snapshot = self.engine.snapshot();
        if snapshot != self.shown {
            self.display.show(&snapshot);
            self.shown = snapshot;
        }
    }
}

fn consider<I: TimeInstant>(
    slot: &mut Option<(I, ScheduledTask)>,
    at: I,
    task: ScheduledTask,
) {
    let earlier = match slot {
        Some((current, _)) => at.checked_duration_since(*current).is_none(),
        None => true,
    };
    if earlier {
        *slot = Some((at, task));
    }
}

fn push(events: &mut EventBatch, event: ScoreboardEvent) {
    let _ = events.push(event);
}
