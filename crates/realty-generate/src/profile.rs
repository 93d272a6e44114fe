use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Per-field probabilities of replacing a sampled value with "".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MissingRates {
    pub price: f64,
    pub area: f64,
    pub direction: f64,
    pub rooms: f64,
    pub toilets: f64,
    /// Forced-empty rate, applied on top of the empty legal option.
    pub legal: f64,
}

impl Default for MissingRates {
    fn default() -> Self {
        Self {
            price: 0.03,
            area: 0.05,
            direction: 0.40,
            rooms: 0.12,
            toilets: 0.12,
            legal: 0.25,
        }
    }
}

/// Tunable probabilities of the row generator.
///
/// Usually loaded from a TOML file; missing keys keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorProfile {
    /// Probability of emitting the sale transaction without a draw.
    pub sale_probability: f64,
    pub missing: MissingRates,
}

impl Default for GeneratorProfile {
    fn default() -> Self {
        Self {
            sale_probability: 0.95,
            missing: MissingRates::default(),
        }
    }
}

impl GeneratorProfile {
    pub fn validate(&self) -> Result<(), GenerationError> {
        let MissingRates {
            price,
            area,
            direction,
            rooms,
            toilets,
            legal,
        } = self.missing;
        for (name, rate) in [
            ("sale_probability", self.sale_probability),
            ("missing.price", price),
            ("missing.area", area),
            ("missing.direction", direction),
            ("missing.rooms", rooms),
            ("missing.toilets", toilets),
            ("missing.legal", legal),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GenerationError::InvalidProfile(format!(
                    "{name} must be between 0 and 1, got {rate}"
                )));
            }
        }
        Ok(())
    }
}
