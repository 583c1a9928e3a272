#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ButtonInterpreter`**: Classifies one channel's raw level samples into debounced gestures
//! - **`ButtonAction`**: A classified gesture (`SinglePress`, `DoublePress` or `LongHold`)
//! - **`MatchEngine`**: Applies match rules; owns scores, serve rotation and the games tally
//! - **`MatchSnapshot`**: Immutable copy of the match state handed to displays
//! - **`Scoreboard`**: Binds two interpreters and one engine to a display and a clock
//! - **`ScoreDisplay`**: Trait to implement for your display hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`ScheduledTask`**: Deferred operations carried by a host timer in push mode
//!
//! All timing is expressed through the `TimeInstant`/`TimeDuration` traits; the
//! library never reads a wall clock and works the same under a 50-100 ms poll
//! loop or an edge-triggered host with an external timer.

pub mod button;
pub mod command;
pub mod config;
pub mod engine;
pub mod scoreboard;
pub mod time;
pub mod types;

pub use button::{ButtonInterpreter, ClickToken, Deadline, DeadlineKind};
pub use command::{ResetToken, ScheduledTask};
pub use config::{ButtonConfig, ConfigError, MatchRules, ScoreboardConfig, ServePolicy};
pub use engine::{EngineError, EnginePhase, MatchEngine, MatchSnapshot, PointOutcome};
pub use scoreboard::{EventBatch, ScoreDisplay, Scoreboard, ScoreboardEvent};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{ButtonAction, InvalidChannel, Side};
