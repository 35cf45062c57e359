//! Host-side session coordination.
//!
//! [`GameHost`] owns every live session, deals rounds, resolves photos, and
//! shapes responses for a presentation layer. Round payloads carry the
//! photo and the answer options but never mark which option is correct;
//! the host keeps that to itself until a guess comes in. Hint generation
//! asks the host for [`GameHost::active_target`] and runs through
//! [`crate::hint::HintService`] separately.

use crate::images::{ImageError, ImageResolver, ResolvedImage};
use park_guesser_core::{
    Catalog, EntryId, GameSession, GameSettings, GuessOutcome, NextRound, RoundError, Score,
    SessionError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashMap;

/// One answer option as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: EntryId,
    pub name: String,
}

/// A question ready for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundPresentation {
    /// 1-based position of this round in the session.
    pub round_number: u32,
    /// The photo to identify.
    pub image: ResolvedImage,
    /// Options in presentation order, correctness unmarked.
    pub options: Vec<AnswerOption>,
}

/// Host response to a round request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum NextView {
    /// A question to present.
    Question(RoundPresentation),
    /// The playthrough is over; show the final summary.
    GameComplete(SessionSummary),
}

/// Session report for score displays and end screens.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    /// RFC 3339 timestamp of session start.
    pub started_at: String,
    pub rounds_dealt: u32,
    pub score: Score,
    /// Entries still queued in no-repeat mode, absent in free play.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<usize>,
    pub complete: bool,
}

/// Host errors surfaced to the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Unknown session: {0}")]
    UnknownSession(String),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Round error: {0}")]
    Round(#[from] RoundError),
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

impl serde::Serialize for HostError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct SessionRecord {
    session: GameSession,
    started_at: String,
}

/// Coordinates live sessions over one catalog.
pub struct GameHost<I: ImageResolver> {
    catalog: Catalog,
    resolver: I,
    sessions: HashMap<String, SessionRecord>,
    rng: StdRng,
}

impl<I: ImageResolver> GameHost<I> {
    /// Create a host, seeding its generator from the operating system.
    pub fn new(catalog: Catalog, resolver: I) -> Self {
        Self::with_rng(catalog, resolver, StdRng::from_entropy())
    }

    /// Create a host with a caller-supplied generator, for reproducible games.
    pub fn with_rng(catalog: Catalog, resolver: I, rng: StdRng) -> Self {
        Self {
            catalog,
            resolver,
            sessions: HashMap::new(),
            rng,
        }
    }

    /// Start a session and return its id.
    pub fn start_session(&mut self, settings: GameSettings) -> Result<String, HostError> {
        let session = GameSession::new(self.catalog.clone(), settings, &mut self.rng)?;
        let session_id = format!("session-{}", uuid::Uuid::new_v4());

        self.sessions.insert(
            session_id.clone(),
            SessionRecord {
                session,
                started_at: chrono::Utc::now().to_rfc3339(),
            },
        );

        Ok(session_id)
    }

    /// Deal the next round of a session, photo resolved and ready to show.
    pub async fn next_round(&mut self, session_id: &str) -> Result<NextView, HostError> {
        let record = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| HostError::UnknownSession(session_id.to_string()))?;

        match record.session.next_round(&mut self.rng)? {
            NextRound::Question(round) => {
                let image_key = round.correct.image_ref.as_deref().ok_or(ImageError::Missing)?;
                let image = self.resolver.resolve(image_key).await?;

                Ok(NextView::Question(RoundPresentation {
                    round_number: record.session.rounds_dealt(),
                    image,
                    options: round
                        .options
                        .iter()
                        .map(|e| AnswerOption {
                            id: e.id,
                            name: e.name.clone(),
                        })
                        .collect(),
                }))
            }
            NextRound::GameComplete => {
                Ok(NextView::GameComplete(Self::summarize(session_id, record)))
            }
        }
    }

    /// Answer the active round of a session.
    pub fn submit_guess(
        &mut self,
        session_id: &str,
        choice: EntryId,
    ) -> Result<GuessOutcome, HostError> {
        let record = self.session_mut(session_id)?;
        Ok(record.session.submit_guess(choice)?)
    }

    /// The name of the park behind a session's active round.
    ///
    /// Hint generation needs it; round payloads never carry it.
    pub fn active_target(&self, session_id: &str) -> Result<String, HostError> {
        let record = self.session(session_id)?;
        let round = record
            .session
            .current_round()
            .ok_or(HostError::Session(SessionError::NoActiveRound))?;
        Ok(round.correct.name.clone())
    }

    /// Count a served hint against a session's active round.
    pub fn record_hint(&mut self, session_id: &str) -> Result<(), HostError> {
        let record = self.session_mut(session_id)?;
        Ok(record.session.record_hint()?)
    }

    /// Report on a live session.
    pub fn summary(&self, session_id: &str) -> Result<SessionSummary, HostError> {
        let record = self.session(session_id)?;
        Ok(Self::summarize(session_id, record))
    }

    /// Drop a session, returning its final report.
    pub fn end_session(&mut self, session_id: &str) -> Result<SessionSummary, HostError> {
        let record = self
            .sessions
            .remove(session_id)
            .ok_or_else(|| HostError::UnknownSession(session_id.to_string()))?;
        Ok(Self::summarize(session_id, &record))
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// The catalog every session plays over.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn summarize(session_id: &str, record: &SessionRecord) -> SessionSummary {
        SessionSummary {
            session_id: session_id.to_string(),
            started_at: record.started_at.clone(),
            rounds_dealt: record.session.rounds_dealt(),
            score: record.session.score(),
            remaining: record.session.remaining(),
            complete: record.session.is_complete(),
        }
    }

    fn session(&self, session_id: &str) -> Result<&SessionRecord, HostError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| HostError::UnknownSession(session_id.to_string()))
    }

    fn session_mut(&mut self, session_id: &str) -> Result<&mut SessionRecord, HostError> {
        self.sessions
            .get_mut(session_id)
            .ok_or_else(|| HostError::UnknownSession(session_id.to_string()))
    }
}
