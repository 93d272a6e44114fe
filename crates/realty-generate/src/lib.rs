//! Synthetic listing generation for realty-synth.
//!
//! This crate builds listing records from the core catalog with a seedable
//! RNG and appends them to an existing CSV file, keeping its header intact.

pub mod appender;
pub mod errors;
pub mod generator;
pub mod model;
pub mod output;
pub mod profile;

pub use appender::{TargetFile, append_synthetic_rows};
pub use errors::GenerationError;
pub use generator::{RowGenerator, seeded_rng};
pub use model::{AppendReport, HeaderCheck, HeaderSource, LineEnding};
pub use profile::{GeneratorProfile, MissingRates};
