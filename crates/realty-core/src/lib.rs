//! Core contracts for realty-synth.
//!
//! This crate defines the listing record layout, the header type, and the
//! immutable catalog of categories and district tiers shared by the
//! generator and the CLI.

pub mod catalog;
pub mod error;
pub mod record;

pub use catalog::{AreaRange, Catalog, DistrictTier, PriceRange, TierRanges, TierSpec};
pub use error::{Error, Result};
pub use record::{Header, RECORD_WIDTH, Record, field};
