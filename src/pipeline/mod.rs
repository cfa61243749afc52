//! Multi-stage fusion pipeline.
//!
//! Stages run in a fixed order: text normalization, dual sentiment fusion,
//! emotion distribution from ensemble margins, genre influence, lexical
//! boosts, and confidence banding. [`engine::ReviewAnalyzer`] wires them
//! together; each stage is also usable on its own.

pub mod confidence;
pub mod distribution;
pub mod engine;
pub mod genre;
pub mod lexical;
pub mod normalize;
pub mod sentiment;

pub use engine::ReviewAnalyzer;
pub use genre::GenreInfluenceTable;
pub use sentiment::{EstimatorOutcome, FusedSentiment};
