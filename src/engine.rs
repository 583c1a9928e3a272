//! Match engine: scores, serve rotation, win detection and games tally.
//!
//! Provides [`MatchEngine`], the single owner of match state. It is a pure
//! rule machine with no clocks and no buttons, mutated only through
//! [`add_point`](MatchEngine::add_point),
//! [`toggle_serve`](MatchEngine::toggle_serve) and
//! [`reset`](MatchEngine::reset), and observed through [`MatchSnapshot`]
//! copies.
//!
//! A won game parks the engine in an awaiting-reset phase: the win is
//! reported exactly once, and further points are rejected until the
//! controller's delayed reset (or a manual one) lands. Without that gate a
//! button pressed during the win display would keep inflating the games
//! tally.

use crate::config::{ConfigError, MatchRules, ServePolicy};
use crate::types::Side;

/// Where the engine is in the game lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnginePhase {
    /// Points are being played.
    InPlay,
    /// A side has won; scoring is locked until a reset.
    AwaitingReset {
        /// The side that won the game.
        winner: Side,
    },
}

/// What an accepted point did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointOutcome {
    /// Point scored, game continues.
    Scored,
    /// Point scored and it won the game for this side. Reported once per
    /// game; the engine is now awaiting a reset.
    GameWon(Side),
}

/// Errors that can occur when scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// A point arrived while a won game awaits its reset. The point is
    /// not scored and not queued.
    ResetPending {
        /// Winner of the game being displayed.
        winner: Side,
    },
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::ResetPending { winner } => {
                write!(
                    f,
                    "point rejected: side {} already won, reset pending",
                    winner.number()
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Immutable copy of the match state, for display collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatchSnapshot {
    /// Points in the current game, indexed by [`Side::index`].
    pub score: [u16; 2],
    /// Games won since the tally was last cleared.
    pub games_won: [u16; 2],
    /// The side currently serving.
    pub serving: Side,
}

impl MatchSnapshot {
    /// Current-game points for one side.
    #[inline]
    pub fn score(&self, side: Side) -> u16 {
        self.score[side.index()]
    }

    /// Games won by one side.
    #[inline]
    pub fn games_won(&self, side: Side) -> u16 {
        self.games_won[side.index()]
    }
}

/// Applies match rules to a stream of scoring operations.
pub struct MatchEngine {
    rules: MatchRules,
    score: [u16; 2],
    games_won: [u16; 2],
    serving: Side,
    serve_counter: u16,
    phase: EnginePhase,
}

impl MatchEngine {
    /// Creates an engine at 0-0 with side one serving.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the rules fail validation.
    pub fn new(rules: MatchRules) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self {
            rules,
            score: [0, 0],
            games_won: [0, 0],
            serving: Side::One,
            serve_counter: 0,
            phase: EnginePhase::InPlay,
        })
    }

    /// Scores a point for `side`.
    ///
    /// Serve rotation advances first (per the configured policy), then the
    /// win condition is evaluated: `side` wins iff its score has reached
    /// `win_points` with a lead of at least `win_difference`. A win locks
    /// the engine until [`reset`](MatchEngine::reset).
    ///
    /// # Errors
    /// [`EngineError::ResetPending`] while a won game awaits its reset;
    /// the point is dropped, never queued.
    pub fn add_point(&mut self, side: Side) -> Result<PointOutcome, EngineError> {
        if let EnginePhase::AwaitingReset { winner } = self.phase {
            return Err(EngineError::ResetPending { winner });
        }

        self.score[side.index()] += 1;
        self.rotate_serve();

        let lead = self.score[side.index()]
            .saturating_sub(self.score[side.other().index()]);
        if self.score[side.index()] >= self.rules.win_points
            && lead >= self.rules.win_difference
        {
            self.games_won[side.index()] += 1;
            self.phase = EnginePhase::AwaitingReset { winner: side };
            return Ok(PointOutcome::GameWon(side));
        }

        Ok(PointOutcome::Scored)
    }

    /// Manually swaps the serving side and restarts the rotation count.
    ///
    /// Never touches scores. Callable at any time, including while a won
    /// game awaits its reset (the reset re-seats the server anyway).
    pub fn toggle_serve(&mut self) {
        self.serving = self.serving.other();
        self.serve_counter = 0;
    }

    /// Returns the match to 0-0 with side one serving.
    ///
    /// Clears any pending-win lock. The games tally survives unless
    /// `reset_games` is set. Idempotent.
    pub fn reset(&mut self, reset_games: bool) {
        self.score = [0, 0];
        self.serve_counter = 0;
        self.serving = Side::One;
        self.phase = EnginePhase::InPlay;
        if reset_games {
            self.games_won = [0, 0];
        }
    }

    /// Returns an immutable copy of the current state.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            score: self.score,
            games_won: self.games_won,
            serving: self.serving,
        }
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// True while a won game is waiting for its reset.
    pub fn is_reset_pending(&self) -> bool {
        matches!(self.phase, EnginePhase::AwaitingReset { .. })
    }

    /// One more point has been played; rotate the serve if the policy
    /// says so. Any rotation restarts the cadence count.
    fn rotate_serve(&mut self) {
        self.serve_counter += 1;

        let every_point = match self.rules.serve_policy {
            ServePolicy::FixedCadence => false,
            ServePolicy::DeuceAccelerated => {
                let threshold = self.rules.win_points - 1;
                self.score[0] >= threshold || self.score[1] >= threshold
            }
        };

        if every_point || self.serve_counter >= self.rules.serve_swap_every {
            self.serving = self.serving.other();
            self.serve_counter = 0;
        }
    }
}
