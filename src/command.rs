//! Scheduled-task values for push-mode hosts.
//!
//! Edge-triggered hosts drive the scoreboard with an external timer
//! instead of a poll loop. Rather than handing that timer a closure over
//! controller state, the controller hands out plain [`ScheduledTask`]
//! values: the host schedules the value and feeds it back through
//! [`Scoreboard::handle_task`](crate::scoreboard::Scoreboard::handle_task)
//! when the timer fires. Tasks carry generation tokens where a late or
//! duplicate firing could misfire; a stale token is simply a no-op, so
//! hosts never need to cancel anything.

use crate::button::ClickToken;
use crate::types::Side;

/// Generation token for the post-win delayed reset.
///
/// A long-hold reset during the win display abandons the scheduled reset;
/// its token then no longer matches and the late `ExecuteReset` does
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetToken(pub(crate) u32);

/// A deferred operation for the host's timer collaborator to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduledTask {
    /// Expire `side`'s pending click window into a single press.
    FlushClick {
        /// Channel whose window was armed.
        side: Side,
        /// Window generation the schedule was made for.
        token: ClickToken,
    },
    /// Re-evaluate `side`'s press against the long-hold threshold.
    CheckHold {
        /// Channel currently held.
        side: Side,
    },
    /// Run the automatic between-games reset after a win.
    ExecuteReset {
        /// Reset generation the schedule was made for.
        token: ResetToken,
    },
}
