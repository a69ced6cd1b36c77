//! Scoring engine for the life simulation party game.
//!
//! A facilitator runs numbered rounds while players spread points over ten
//! life factors and the event wheel nudges them up or down. Once the game is
//! over, [`ScoreCalculator`] turns each player's history into lifetime
//! totals, the Balance / Impact / Efficiency indices, a Final Destiny score
//! and an [`Archetype`].

pub mod archetype;
pub mod catalog;
pub mod error;
pub mod export;
pub mod factor;
pub mod leaderboard;
pub mod narrative;
pub mod records;
pub mod scoring;
pub mod session;

pub use archetype::{Archetype, ArchetypeInfo};
pub use catalog::{Effect, EventCatalog, EventCategory, EventDefinition};
pub use error::{CatalogError, ExportError, RecordError, SessionError};
pub use export::{write_csv, ExportOptions};
pub use factor::{Factor, FactorValues};
pub use leaderboard::{Leaderboard, Participant, PlayerRecords, RankedPlayer};
pub use narrative::narrate;
pub use records::{Allocation, EventOccurrence, Provenance, Reserve};
pub use scoring::{ScoreCalculator, ScoreReport};
pub use session::SessionDump;

/// Score every participant of a session dump against `catalog`.
pub fn score_session(dump: &SessionDump, catalog: &EventCatalog) -> Leaderboard {
    dump.leaderboard(&ScoreCalculator::new(catalog))
}
