//! lifedex-ranker — Country scoring and ranking engine.
//! Implements §3–§4 of ARCHITECTURE.md.

pub mod scores;
pub mod normalise;
pub mod weights;
pub mod scorer;
pub mod correlation;

pub use correlation::CorrelationMatrix;
pub use scores::ScoreTable;
pub use scorer::{rank, rank_with_state, RankedCountry};
pub use weights::CategoryWeights;
