//! Round construction.
//!
//! A round is one question: a correct answer drawn from the answerable
//! entries plus wrong answers drawn without replacement from the combined
//! pool, all shuffled into presentation order. Every random draw goes
//! through a caller-supplied [`Rng`], so tests can seed a generator and
//! get reproducible rounds.

use crate::entry::{Catalog, Entry, EntryId};
use crate::settings::GameSettings;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One question: a correct entry plus shuffled answer options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// The entry the player must identify from its photo.
    pub correct: Entry,
    /// All options in presentation order. Contains `correct` exactly once
    /// and the ids are pairwise distinct.
    pub options: Vec<Entry>,
}

impl Round {
    /// Whether a chosen option id is the correct answer.
    pub fn is_correct(&self, choice: EntryId) -> bool {
        self.correct.id == choice
    }

    /// Whether an id is one of the presented options.
    pub fn contains(&self, id: EntryId) -> bool {
        self.options.iter().any(|e| e.id == id)
    }

    /// Option ids in presentation order.
    pub fn option_ids(&self) -> Vec<EntryId> {
        self.options.iter().map(|e| e.id).collect()
    }
}

/// Errors raised by round construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundError {
    /// The catalog has no answerable entries.
    EmptyCatalog,
    /// The combined pool cannot supply enough distinct wrong answers.
    InsufficientCatalog { needed: usize, available: usize },
}

impl std::fmt::Display for RoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundError::EmptyCatalog => {
                write!(f, "No answerable entries in the catalog")
            }
            RoundError::InsufficientCatalog { needed, available } => {
                write!(
                    f,
                    "Need {} wrong answers but only {} candidates available",
                    needed, available
                )
            }
        }
    }
}

impl std::error::Error for RoundError {}

/// Select a complete round: a uniformly random correct answer plus
/// `settings.wrong_answers` distractors, shuffled.
pub fn select_round<R: Rng + ?Sized>(
    catalog: &Catalog,
    settings: &GameSettings,
    rng: &mut R,
) -> Result<Round, RoundError> {
    let correct = catalog
        .answerable()
        .choose(rng)
        .ok_or(RoundError::EmptyCatalog)?
        .clone();

    build_round(correct, catalog, settings, rng)
}

/// Build a round around a known correct entry.
///
/// Wrong answers are drawn without replacement from the combined pool
/// minus the correct entry. No-repeat sessions call this directly with
/// the next queued entry; [`select_round`] calls it after its own draw.
pub fn build_round<R: Rng + ?Sized>(
    correct: Entry,
    catalog: &Catalog,
    settings: &GameSettings,
    rng: &mut R,
) -> Result<Round, RoundError> {
    let pool: Vec<&Entry> = catalog
        .pool()
        .into_iter()
        .filter(|entry| entry.id != correct.id)
        .collect();

    if pool.len() < settings.wrong_answers {
        return Err(RoundError::InsufficientCatalog {
            needed: settings.wrong_answers,
            available: pool.len(),
        });
    }

    let mut options: Vec<Entry> = pool
        .choose_multiple(rng, settings.wrong_answers)
        .map(|entry| (*entry).clone())
        .collect();
    options.push(correct.clone());
    options.shuffle(rng);

    Ok(Round { correct, options })
}
