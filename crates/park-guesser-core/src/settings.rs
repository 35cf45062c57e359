//! Game configuration types.
//!
//! Settings are validated as a whole before a session starts, so a
//! misconfigured game fails up front rather than mid-round.

use crate::hint::{DEFAULT_FALLBACK_HINT, DEFAULT_STRIP_SUFFIXES};
use serde::{Deserialize, Serialize};

/// How correct answers are chosen across a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Every round is an independent uniform draw over the answerable
    /// entries. Repeats are possible and the session never ends on its own.
    #[default]
    FreePlay,
    /// Every answerable entry appears as the correct answer at most once,
    /// in an order shuffled when the session starts. The session completes
    /// once all of them have been dealt.
    NoRepeat,
}

/// Configuration for one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Correct-answer selection mode.
    pub mode: SessionMode,
    /// Wrong answers shown per round (options shown = this + 1).
    pub wrong_answers: usize,
    /// Hint redaction configuration.
    pub hints: HintSettings,
}

impl GameSettings {
    /// Default settings: free play with four options per round.
    pub fn new() -> Self {
        Self {
            mode: SessionMode::FreePlay,
            wrong_answers: 3,
            hints: HintSettings::default(),
        }
    }

    /// Settings for one full pass over the answerable catalog.
    pub fn no_repeat() -> Self {
        Self {
            mode: SessionMode::NoRepeat,
            ..Self::new()
        }
    }

    /// Total options presented per round, correct answer included.
    pub fn options_per_round(&self) -> usize {
        self.wrong_answers + 1
    }

    /// Validate settings and return any errors.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.wrong_answers == 0 {
            return Err(SettingsError::NoWrongAnswers);
        }
        self.hints.validate()
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the hint leak filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintSettings {
    /// Generic name suffixes stripped (case-sensitively) when deriving a
    /// base name, e.g. " National Park".
    pub strip_suffixes: Vec<String>,
    /// Replacement text shown when a candidate hint leaks the answer.
    pub fallback_text: String,
}

impl HintSettings {
    /// Validate hint configuration and return any errors.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fallback_text.trim().is_empty() {
            return Err(SettingsError::EmptyFallbackHint);
        }
        if self.strip_suffixes.iter().any(|s| s.is_empty()) {
            return Err(SettingsError::EmptySuffix);
        }
        Ok(())
    }
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            strip_suffixes: DEFAULT_STRIP_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback_text: DEFAULT_FALLBACK_HINT.to_string(),
        }
    }
}

/// Errors raised by settings validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// Rounds need at least one wrong answer.
    NoWrongAnswers,
    /// The redaction fallback text is empty or whitespace.
    EmptyFallbackHint,
    /// A configured strip suffix is the empty string.
    EmptySuffix,
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::NoWrongAnswers => {
                write!(f, "At least one wrong answer per round is required")
            }
            SettingsError::EmptyFallbackHint => {
                write!(f, "Fallback hint text cannot be empty")
            }
            SettingsError::EmptySuffix => {
                write!(f, "Strip suffixes cannot be empty strings")
            }
        }
    }
}

impl std::error::Error for SettingsError {}
