//! Game sessions: round sequencing, scoring, and completion.
//!
//! A [`GameSession`] owns a catalog and settings and deals rounds according
//! to the configured [`SessionMode`]. Free play draws independently forever;
//! no-repeat shuffles the answerable entries into a queue at session start
//! and completes when the queue runs out. The whole session serializes with
//! serde, so a host can suspend and resume games.

use crate::entry::{Catalog, Entry, EntryId};
use crate::round::{build_round, select_round, Round, RoundError};
use crate::settings::{GameSettings, SessionMode, SettingsError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Phases of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Rounds can still be dealt.
    #[default]
    Playing,
    /// A no-repeat session has finished its queue.
    Complete,
}

/// Running score for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Rounds answered correctly.
    pub correct: u32,
    /// Rounds answered incorrectly.
    pub incorrect: u32,
    /// Hints requested across the session.
    pub hints_used: u32,
}

impl Score {
    /// Rounds answered, correctly or not.
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Share of answered rounds that were correct, as a percentage.
    pub fn accuracy(&self) -> f64 {
        let total = self.answered();
        if total == 0 {
            100.0
        } else {
            (self.correct as f64 / total as f64) * 100.0
        }
    }
}

/// Result of asking a session for another round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextRound {
    /// A fresh question to present.
    Question(Round),
    /// The no-repeat queue is exhausted and the session is over.
    /// This is the expected end of a playthrough, not an error.
    GameComplete,
}

/// Outcome of one answered round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// The option the player picked.
    pub choice: EntryId,
    /// Whether the pick was right.
    pub was_correct: bool,
    /// The correct entry, for the reveal.
    pub correct: Entry,
    /// Session score after this guess.
    pub score: Score,
}

/// Errors raised by session operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Session settings failed validation.
    InvalidSettings(SettingsError),
    /// The catalog has no answerable entries to play.
    EmptyCatalog,
    /// The catalog cannot supply a full set of wrong answers.
    InsufficientCatalog { needed: usize, available: usize },
    /// No round is awaiting an answer.
    NoActiveRound,
    /// The chosen id is not one of the presented options.
    NotAnOption(EntryId),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidSettings(e) => {
                write!(f, "Invalid settings: {}", e)
            }
            SessionError::EmptyCatalog => {
                write!(f, "No answerable entries in the catalog")
            }
            SessionError::InsufficientCatalog { needed, available } => {
                write!(
                    f,
                    "Catalog too small: need {} wrong answers but only {} candidates available",
                    needed, available
                )
            }
            SessionError::NoActiveRound => {
                write!(f, "No round is awaiting an answer")
            }
            SessionError::NotAnOption(id) => {
                write!(f, "Entry {} is not one of the presented options", id)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::InvalidSettings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SettingsError> for SessionError {
    fn from(e: SettingsError) -> Self {
        SessionError::InvalidSettings(e)
    }
}

/// One playthrough of the trivia game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    catalog: Catalog,
    settings: GameSettings,
    /// Remaining no-repeat correct answers, front of the queue next.
    /// Always empty in free play.
    queue: VecDeque<Entry>,
    current: Option<Round>,
    score: Score,
    rounds_dealt: u32,
    phase: SessionPhase,
}

impl GameSession {
    /// Start a session over a catalog.
    ///
    /// Settings are validated and the catalog must have at least one
    /// answerable entry plus enough distinct entries to fill every round's
    /// wrong answers, so a session cannot exist that is unable to deal a
    /// round. No-repeat sessions shuffle the answerable entries into their
    /// playthrough queue here.
    pub fn new<R: Rng + ?Sized>(
        catalog: Catalog,
        settings: GameSettings,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        if catalog.answerable().is_empty() {
            return Err(SessionError::EmptyCatalog);
        }
        // Any correct answer removes exactly one entry from the pool
        let available = catalog.pool_size() - 1;
        if available < settings.wrong_answers {
            return Err(SessionError::InsufficientCatalog {
                needed: settings.wrong_answers,
                available,
            });
        }

        let queue = match settings.mode {
            SessionMode::FreePlay => VecDeque::new(),
            SessionMode::NoRepeat => {
                let mut entries = catalog.answerable().to_vec();
                entries.shuffle(rng);
                entries.into()
            }
        };

        Ok(Self {
            catalog,
            settings,
            queue,
            current: None,
            score: Score::default(),
            rounds_dealt: 0,
            phase: SessionPhase::Playing,
        })
    }

    /// Deal the next round according to the session mode.
    ///
    /// An unanswered current round is discarded without scoring. In
    /// no-repeat mode an exhausted queue yields [`NextRound::GameComplete`];
    /// free play never completes. A queued entry is only consumed once its
    /// round has been built, so a failed deal leaves the queue intact.
    pub fn next_round<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<NextRound, RoundError> {
        let round = match self.settings.mode {
            SessionMode::FreePlay => select_round(&self.catalog, &self.settings, rng)?,
            SessionMode::NoRepeat => {
                let correct = match self.queue.front() {
                    Some(entry) => entry.clone(),
                    None => {
                        self.phase = SessionPhase::Complete;
                        self.current = None;
                        return Ok(NextRound::GameComplete);
                    }
                };
                let round = build_round(correct, &self.catalog, &self.settings, rng)?;
                self.queue.pop_front();
                round
            }
        };

        self.rounds_dealt += 1;
        self.current = Some(round.clone());
        Ok(NextRound::Question(round))
    }

    /// Answer the active round.
    ///
    /// A choice outside the presented options is rejected and the round
    /// stays active. A valid choice scores and retires the round.
    pub fn submit_guess(&mut self, choice: EntryId) -> Result<GuessOutcome, SessionError> {
        let round = match &self.current {
            Some(round) => round,
            None => return Err(SessionError::NoActiveRound),
        };
        if !round.contains(choice) {
            return Err(SessionError::NotAnOption(choice));
        }

        let was_correct = round.is_correct(choice);
        let correct = round.correct.clone();
        self.current = None;

        if was_correct {
            self.score.correct += 1;
        } else {
            self.score.incorrect += 1;
        }
        if self.settings.mode == SessionMode::NoRepeat && self.queue.is_empty() {
            self.phase = SessionPhase::Complete;
        }

        Ok(GuessOutcome {
            choice,
            was_correct,
            correct,
            score: self.score,
        })
    }

    /// Count a hint request against the active round.
    pub fn record_hint(&mut self) -> Result<(), SessionError> {
        if self.current.is_none() {
            return Err(SessionError::NoActiveRound);
        }
        self.score.hints_used += 1;
        Ok(())
    }

    /// The round awaiting an answer, if any.
    pub fn current_round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    /// Running score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Rounds dealt so far, answered or not.
    pub fn rounds_dealt(&self) -> u32 {
        self.rounds_dealt
    }

    /// Entries still queued in no-repeat mode, `None` in free play.
    pub fn remaining(&self) -> Option<usize> {
        match self.settings.mode {
            SessionMode::FreePlay => None,
            SessionMode::NoRepeat => Some(self.queue.len()),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether a no-repeat playthrough has finished.
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    /// The settings this session runs under.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// The catalog this session draws from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
