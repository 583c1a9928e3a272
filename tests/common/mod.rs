//! Shared test infrastructure for match-scorekeeper integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use match_scorekeeper::{
    MatchSnapshot, ScoreDisplay, Side, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn checked_duration_since(&self, earlier: Self) -> Option<Self::Duration> {
        self.0.checked_sub(earlier.0).map(TestDuration)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display that records every snapshot and win announcement
pub struct MockDisplay {
    pub shown: heapless::Vec<MatchSnapshot, 128>,
    pub wins: heapless::Vec<Side, 16>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            shown: heapless::Vec::new(),
            wins: heapless::Vec::new(),
        }
    }

    pub fn last_shown(&self) -> &MatchSnapshot {
        self.shown.last().expect("nothing shown yet")
    }
}

impl ScoreDisplay for MockDisplay {
    fn show(&mut self, snapshot: &MatchSnapshot) {
        let _ = self.shown.push(*snapshot);
    }

    fn announce_win(&mut self, winner: Side) {
        let _ = self.wins.push(winner);
    }
}
