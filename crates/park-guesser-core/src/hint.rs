//! Hint leak filtering.
//!
//! Hints come from an external text generator that is asked not to name
//! the park, but that request is not enforceable. This module is the
//! enforcement: every candidate hint passes through [`HintFilter::sanitize`]
//! before a player sees it, and any candidate containing the park's name is
//! replaced with a fixed fallback.
//!
//! Detection is case-insensitive substring matching against the full
//! display name and against the base name (the display name with a generic
//! suffix such as " National Park" stripped). Paraphrased giveaways
//! ("the first national park") are out of scope for this filter.

use crate::settings::HintSettings;
use serde::{Deserialize, Serialize};

/// Generic suffixes stripped when deriving a base name.
pub const DEFAULT_STRIP_SUFFIXES: &[&str] = &[" National Park"];

/// Replacement text used when a candidate hint reveals the answer.
pub const DEFAULT_FALLBACK_HINT: &str =
    "Study the terrain, wildlife, and landmarks in the photo - they point to what makes this park famous.";

/// Outcome of sanitizing one candidate hint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResult {
    /// The text safe to show the player.
    pub text: String,
    /// Whether the candidate leaked the answer and was replaced. Never
    /// surfaced to players; audit records and tests read it.
    pub was_redacted: bool,
}

/// Filters answer leaks out of generated hints.
#[derive(Clone, Debug)]
pub struct HintFilter {
    suffixes: Vec<String>,
    fallback: String,
}

impl HintFilter {
    /// Create a filter from hint settings.
    pub fn new(settings: &HintSettings) -> Self {
        Self {
            suffixes: settings.strip_suffixes.clone(),
            fallback: settings.fallback_text.clone(),
        }
    }

    /// The target name with the first matching configured suffix stripped.
    ///
    /// Stripping is case-sensitive and at most one suffix is removed. A
    /// name matching no suffix is returned unchanged.
    pub fn base_name<'a>(&self, target_name: &'a str) -> &'a str {
        for suffix in &self.suffixes {
            if let Some(stripped) = target_name.strip_suffix(suffix.as_str()) {
                return stripped;
            }
        }
        target_name
    }

    /// Whether the candidate contains the target's full or base name,
    /// case-insensitively.
    ///
    /// A name consisting only of a suffix strips to an empty base, which
    /// every candidate contains; such targets always leak.
    pub fn leaks(&self, target_name: &str, candidate: &str) -> bool {
        let haystack = candidate.to_lowercase();
        let full = target_name.to_lowercase();
        let base = self.base_name(target_name).to_lowercase();

        haystack.contains(&full) || haystack.contains(&base)
    }

    /// Check a candidate hint against the target name and return safe text.
    ///
    /// A leaking candidate is replaced with the configured fallback;
    /// otherwise the candidate is returned trimmed of surrounding
    /// whitespace. This never fails.
    pub fn sanitize(&self, target_name: &str, candidate: &str) -> HintResult {
        if self.leaks(target_name, candidate) {
            HintResult {
                text: self.fallback.clone(),
                was_redacted: true,
            }
        } else {
            HintResult {
                text: candidate.trim().to_string(),
                was_redacted: false,
            }
        }
    }
}

impl Default for HintFilter {
    fn default() -> Self {
        Self::new(&HintSettings::default())
    }
}
