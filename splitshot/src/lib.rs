//! Split-shot pattern calculator.
//!
//! Picks combinations of fishing split-shot sizes whose total mass lands closest to a target,
//! using exactly the requested number of shots drawn with repetition from an enabled subset
//! of the [`catalog`]. All operations are pure; the catalog is the only shared data.

pub mod catalog;
pub mod error;
pub mod estimator;
pub mod grams;
pub mod pattern;
pub mod preferences;
pub mod request;
pub mod search;

pub use catalog::{catalog, lookup, WeightClass};
pub use error::ValidationError;
pub use estimator::estimate_combination_count;
pub use grams::{Centigrams, Micrograms};
pub use pattern::{generate_patterns, rank_patterns, PatternResult, RESULT_LIMIT};
pub use preferences::Preferences;
pub use request::{ShotRequest, ValidatedRequest};
pub use search::{search, SearchError, SearchLimits, SearchOutcome};
