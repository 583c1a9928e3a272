//! Configuration surface for buttons, match rules and the controller.
//!
//! All options are read once at construction; there is no hot reload.
//! Defaults match the reference device: 11 points to win with a 2-point
//! margin, serve swapped every 5 points, 50 ms debounce, 0.3 s double-click
//! window, 3 s reset hold and a 2 s win-display delay.

use crate::time::TimeDuration;

/// Timing parameters for one input channel's gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig<D: TimeDuration> {
    /// Minimum time between accepted level transitions. Transitions that
    /// arrive faster are treated as contact bounce and discarded.
    pub debounce: D,

    /// How long after a release a second release still counts as a double
    /// press. A release that outlives this window becomes a single press.
    pub double_click_window: D,

    /// How long a button must stay pressed to fire a long hold. The rest
    /// of that press is absorbed; its release produces nothing.
    pub long_hold: D,
}

impl<D: TimeDuration> Default for ButtonConfig<D> {
    fn default() -> Self {
        Self {
            debounce: D::from_millis(50),
            double_click_window: D::from_millis(300),
            long_hold: D::from_millis(3000),
        }
    }
}

/// How the serving side rotates as points accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServePolicy {
    /// Rotate every `serve_swap_every` points, all game long.
    FixedCadence,

    /// Rotate every `serve_swap_every` points until either score reaches
    /// `win_points - 1`, then rotate on every point (table-tennis deuce
    /// behavior).
    DeuceAccelerated,
}

impl Default for ServePolicy {
    fn default() -> Self {
        ServePolicy::DeuceAccelerated
    }
}

/// Scoring and serve-rotation rules for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatchRules {
    /// Points required to win a game.
    pub win_points: u16,

    /// Minimum point difference required to win.
    pub win_difference: u16,

    /// Serve rotation cadence in points.
    pub serve_swap_every: u16,

    /// Rotation policy; see [`ServePolicy`].
    pub serve_policy: ServePolicy,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            win_points: 11,
            win_difference: 2,
            serve_swap_every: 5,
            serve_policy: ServePolicy::default(),
        }
    }
}

impl MatchRules {
    /// Validates the rule set.
    ///
    /// # Errors
    /// * `ZeroWinPoints` - a game nobody can win
    /// * `ZeroWinDifference` - win check would trigger on equal scores
    /// * `ZeroServeCadence` - rotation every zero points is undefined
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_points == 0 {
            return Err(ConfigError::ZeroWinPoints);
        }
        if self.win_difference == 0 {
            return Err(ConfigError::ZeroWinDifference);
        }
        if self.serve_swap_every == 0 {
            return Err(ConfigError::ZeroServeCadence);
        }
        Ok(())
    }
}

/// Complete controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScoreboardConfig<D: TimeDuration> {
    /// Gesture timing, shared by both channels.
    pub buttons: ButtonConfig<D>,

    /// Scoring and serve rules.
    pub rules: MatchRules,

    /// How long the win announcement stays up before scores reset for the
    /// next game.
    pub win_reset_delay: D,

    /// Whether a long-hold reset also clears the games-won tally. The
    /// automatic between-games reset never does.
    pub reset_games_on_hold: bool,
}

impl<D: TimeDuration> Default for ScoreboardConfig<D> {
    fn default() -> Self {
        Self {
            buttons: ButtonConfig::default(),
            rules: MatchRules::default(),
            win_reset_delay: D::from_millis(2000),
            reset_games_on_hold: true,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `win_points` is zero.
    ZeroWinPoints,

    /// `win_difference` is zero.
    ZeroWinDifference,

    /// `serve_swap_every` is zero.
    ZeroServeCadence,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroWinPoints => {
                write!(f, "win_points must be at least 1")
            }
            ConfigError::ZeroWinDifference => {
                write!(f, "win_difference must be at least 1")
            }
            ConfigError::ZeroServeCadence => {
                write!(f, "serve_swap_every must be at least 1")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
