//! Time abstraction traits for platform-agnostic timing.
//!
//! The scoreboard never reads a wall clock. Hosts implement these traits
//! for whatever monotonic timer their platform provides (a hardware tick
//! counter, `embassy_time::Instant`, a test cell) and the library does all
//! debounce, click-window and hold arithmetic through them.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant, returning `None` if
    /// `earlier` is in the future of `self`.
    ///
    /// This is how the interpreter notices a clock that ran backwards: a
    /// `None` here downgrades the sample to zero elapsed time instead of
    /// corrupting the debounce and hold timers.
    fn checked_duration_since(&self, earlier: Self) -> Option<Self::Duration>;

    /// Adds duration to instant, returns None on overflow.
    ///
    /// Used to compute wake-up deadlines (click-window expiry, long-hold
    /// trigger, post-win reset).
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
