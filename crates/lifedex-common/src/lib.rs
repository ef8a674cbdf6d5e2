//! lifedex-common — Shared types, errors, and configuration used across all Lifedex crates.

pub mod error;
pub mod records;
pub mod region;
pub mod engine_config;
pub mod state;

// Re-export commonly used types
pub use error::{LifedexError, Result};
pub use records::{CategoryDefinition, CountryRecord};
pub use engine_config::{EngineConfig, ScoreScale};
pub use region::Region;
pub use state::EngineState;
