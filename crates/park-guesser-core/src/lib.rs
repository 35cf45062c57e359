//! Park Guesser Core Library
//!
//! This crate contains the core game logic for Park Guesser, a photo trivia
//! game where players identify national parks from pictures, with optional
//! generated hints that must never give the answer away.
//!
//! # Design Principles
//!
//! - **No UI dependencies**: This crate is purely game logic
//! - **Explicit randomness**: Every random draw goes through a caller-supplied
//!   generator, so tests seed one and get reproducible games
//! - **Serializable**: All state can be saved/loaded via serde
//! - **Thoroughly tested**: Comprehensive test coverage

// Catalog model
pub mod entry;

// Configuration
pub mod settings;

// Round construction
pub mod round;

// Session flow and scoring
pub mod session;

// Hint leak filtering
pub mod hint;

// Re-exports for convenience
pub use entry::{Catalog, CatalogError, Entry, EntryId};
pub use hint::{HintFilter, HintResult, DEFAULT_FALLBACK_HINT, DEFAULT_STRIP_SUFFIXES};
pub use round::{build_round, select_round, Round, RoundError};
pub use session::{
    GameSession, GuessOutcome, NextRound, Score, SessionError, SessionPhase,
};
pub use settings::{GameSettings, HintSettings, SessionMode, SettingsError};
