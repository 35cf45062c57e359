//! Park Guesser Host Library
//!
//! Everything a deployment of Park Guesser needs around the core rules:
//! park catalogs, photo URL resolution, the hint pipeline with leak
//! filtering and usage auditing, and per-session coordination for a
//! presentation layer.
//!
//! The crate reaches the outside world through traits: [`ImageResolver`]
//! turns stored image keys into displayable URLs, [`HintGenerator`] produces
//! candidate hint text, and [`UsageRecorder`] sinks audit records. The pure
//! game rules live in `park-guesser-core`; nothing here second-guesses them.

// Park data and catalog loading
pub mod catalog;

// Photo resolution
pub mod images;

// Hint generation pipeline
pub mod hint;

// Hint usage auditing
pub mod usage;

// Session coordination
pub mod state;

// Re-exports for convenience
pub use catalog::{CatalogLoadError, ParkCatalog, ParkRecord};
pub use hint::{hint_prompt, HintError, HintGenerator, HintService};
pub use images::{ImageError, ImageResolver, ResolvedImage, StaticImageResolver};
pub use state::{
    AnswerOption, GameHost, HostError, NextView, RoundPresentation, SessionSummary,
};
pub use usage::{HintUsage, NullUsageRecorder, SqliteUsageLog, UsageError, UsageRecorder};
