//! Hint generation pipeline.
//!
//! A hint travels: prompt, external text generator, leak filter, player,
//! with an audit record written on the side. The prompt asks the generator
//! not to name the park, but that request is advisory; the core
//! [`HintFilter`] does the enforcing, and a substituted fallback is
//! indistinguishable from a generated hint as far as players can tell.

use crate::usage::{HintUsage, UsageRecorder};
use async_trait::async_trait;
use park_guesser_core::{HintFilter, HintResult, HintSettings};
use std::sync::Arc;
use tracing::warn;

/// Build the generation prompt for one park.
pub fn hint_prompt(park_name: &str) -> String {
    format!(
        "You are helping someone guess a national park in a game. \
         Generate a helpful hint about {park}.\n\
         \n\
         CRITICAL RULES:\n\
         - DO NOT mention \"{park}\" or any part of its name in your response\n\
         - DO NOT mention the state name if it is part of the park name\n\
         - Give clues about unique features, geological formations, wildlife, or historical significance\n\
         - Keep the hint to 1-2 sentences\n\
         - Make the hint challenging but fair\n\
         \n\
         Hint:",
        park = park_name
    )
}

/// Produces candidate hint text from a prompt.
///
/// Implementations wrap whatever text service a deployment uses. The
/// returned text is untrusted and always passes through the leak filter.
#[async_trait]
pub trait HintGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, HintError>;
}

/// Errors raised by hint generation.
#[derive(Debug, thiserror::Error)]
pub enum HintError {
    #[error("Hint generation failed: {0}")]
    Generation(String),
}

/// The full pipeline from park name to safe hint text.
pub struct HintService<G, U> {
    generator: G,
    filter: HintFilter,
    recorder: Arc<U>,
}

impl<G, U> HintService<G, U>
where
    G: HintGenerator,
    U: UsageRecorder + 'static,
{
    /// Assemble a pipeline from a generator, filter settings, and a recorder.
    pub fn new(generator: G, hints: &HintSettings, recorder: Arc<U>) -> Self {
        Self {
            generator,
            filter: HintFilter::new(hints),
            recorder,
        }
    }

    /// Generate, sanitize, and record a hint for a park.
    ///
    /// The usage record is written on a blocking task and never awaited;
    /// a failed write logs a warning and the player still gets the hint.
    /// Generation failures surface to the caller, who decides how to tell
    /// the player.
    pub async fn hint_for(&self, park_name: &str) -> Result<HintResult, HintError> {
        let prompt = hint_prompt(park_name);
        let candidate = self.generator.generate(&prompt).await?;
        let result = self.filter.sanitize(park_name, &candidate);

        let usage = HintUsage::now(park_name, &result.text, result.was_redacted);
        let recorder = Arc::clone(&self.recorder);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = recorder.record(&usage) {
                warn!("Failed to record hint usage: {}", e);
            }
        });

        Ok(result)
    }

    /// The filter this pipeline sanitizes with.
    pub fn filter(&self) -> &HintFilter {
        &self.filter
    }
}
