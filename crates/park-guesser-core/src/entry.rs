//! Catalog entries and the answerable/distractor catalog.
//!
//! Every question is built from a [`Catalog`] holding two lists: the
//! answerable entries (parks with a photo, eligible to be the correct
//! answer) and the distractors (parks that only ever appear as wrong
//! answers). The two lists may overlap by id; wherever a combined pool is
//! needed it is de-duplicated by id, preferring the answerable instance.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier for a catalog entry.
pub type EntryId = u64;

/// One park in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, stable for the lifetime of the catalog.
    pub id: EntryId,
    /// Display name, e.g. "Yosemite National Park".
    pub name: String,
    /// Whether a photo exists for this entry.
    pub has_image: bool,
    /// Opaque reference to the photo (an object-store key, a file path).
    /// Resolving it to something displayable happens outside this crate.
    pub image_ref: Option<String>,
}

impl Entry {
    /// Create an entry with a photo, eligible to be the correct answer.
    pub fn answerable(id: EntryId, name: &str, image_ref: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            has_image: true,
            image_ref: Some(image_ref.to_string()),
        }
    }

    /// Create a photo-less entry, usable only as a wrong answer.
    pub fn distractor(id: EntryId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            has_image: false,
            image_ref: None,
        }
    }
}

/// The two entry lists a game draws from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    answerable: Vec<Entry>,
    distractors: Vec<Entry>,
}

impl Catalog {
    /// Build a catalog from an answerable list and a distractor list.
    ///
    /// Ids must be unique within each list and every entry needs a
    /// non-empty name. The distractor list may repeat answerable ids.
    pub fn new(answerable: Vec<Entry>, distractors: Vec<Entry>) -> Result<Self, CatalogError> {
        Self::validate_list(&answerable)?;
        Self::validate_list(&distractors)?;

        Ok(Self {
            answerable,
            distractors,
        })
    }

    fn validate_list(entries: &[Entry]) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            if entry.name.is_empty() {
                return Err(CatalogError::EmptyName(entry.id));
            }
        }
        Ok(())
    }

    /// Entries eligible to be the correct answer.
    pub fn answerable(&self) -> &[Entry] {
        &self.answerable
    }

    /// Entries that only appear as wrong answers.
    pub fn distractors(&self) -> &[Entry] {
        &self.distractors
    }

    /// The combined pool, de-duplicated by id.
    ///
    /// Answerable entries come first; a distractor whose id also appears
    /// in the answerable list is dropped in favor of that instance.
    pub fn pool(&self) -> Vec<&Entry> {
        let answerable_ids: HashSet<EntryId> = self.answerable.iter().map(|e| e.id).collect();

        self.answerable
            .iter()
            .chain(
                self.distractors
                    .iter()
                    .filter(|e| !answerable_ids.contains(&e.id)),
            )
            .collect()
    }

    /// Number of distinct entries across both lists.
    pub fn pool_size(&self) -> usize {
        self.pool().len()
    }

    /// Look up an entry by id, preferring the answerable instance.
    pub fn find(&self, id: EntryId) -> Option<&Entry> {
        self.answerable
            .iter()
            .chain(self.distractors.iter())
            .find(|e| e.id == id)
    }
}

/// Errors raised while building a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// The same id appears twice within one list.
    DuplicateId(EntryId),
    /// An entry has an empty display name.
    EmptyName(EntryId),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => {
                write!(f, "Duplicate entry id {} in catalog", id)
            }
            CatalogError::EmptyName(id) => {
                write!(f, "Entry {} has an empty name", id)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
