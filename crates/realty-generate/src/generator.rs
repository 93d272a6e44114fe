use std::collections::BTreeMap;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use realty_core::{Catalog, DistrictTier, Error as CoreError, Header, RECORD_WIDTH, Record, TierRanges};

use crate::errors::GenerationError;
use crate::profile::GeneratorProfile;

/// Deterministic RNG used for every generation run.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Pre-built sampling state for one tier.
#[derive(Debug, Clone)]
struct TierSampler {
    ranges: TierRanges,
    price: Normal<f64>,
}

impl TierSampler {
    fn new(tier: DistrictTier, ranges: TierRanges) -> Result<Self, GenerationError> {
        let min = ranges.price.min as f64;
        let max = ranges.price.max as f64;
        let price = Normal::new((min + max) / 2.0, (max - min) / 6.0).map_err(|err| {
            CoreError::InvalidCatalog(format!("{} tier price distribution: {err}", tier.as_str()))
        })?;
        Ok(Self { ranges, price })
    }

    fn sample_price(&self, rng: &mut dyn RngCore) -> i64 {
        let TierRanges { price, .. } = self.ranges;
        let value = self.price.sample(rng);
        value.clamp(price.min as f64, price.max as f64).round() as i64
    }

    fn sample_area(&self, rng: &mut dyn RngCore) -> f64 {
        let area = self.ranges.area;
        rng.random_range(area.min..=area.max)
    }
}

/// Builds one synthetic listing per call from a borrowed catalog.
#[derive(Debug, Clone)]
pub struct RowGenerator<'a> {
    catalog: &'a Catalog,
    profile: GeneratorProfile,
    samplers: BTreeMap<DistrictTier, TierSampler>,
    fallback: TierSampler,
}

impl<'a> RowGenerator<'a> {
    pub fn new(catalog: &'a Catalog, profile: GeneratorProfile) -> Result<Self, GenerationError> {
        catalog.validate()?;
        profile.validate()?;

        let mut samplers = BTreeMap::new();
        for entry in catalog.tiers() {
            samplers.insert(entry.tier, TierSampler::new(entry.tier, entry.ranges)?);
        }
        let fallback = samplers
            .get(&DistrictTier::Low)
            .cloned()
            .ok_or_else(|| CoreError::InvalidCatalog("low tier is required".to_string()))?;

        Ok(Self {
            catalog,
            profile,
            samplers,
            fallback,
        })
    }

    /// Header describing the records this generator emits.
    pub fn header(&self) -> &Header {
        &self.catalog.header
    }

    /// Generate a single record of exactly eleven fields.
    pub fn generate_row(&self, rng: &mut dyn RngCore) -> Record {
        let catalog = self.catalog;
        let missing = self.profile.missing;

        let property_type = pick(&catalog.property_types, rng);
        let transaction = if rng.random_bool(self.profile.sale_probability) {
            catalog.sale_transaction.clone()
        } else {
            pick(&catalog.transaction_types, rng)
        };
        let province = catalog.city.clone();
        let district = pick(&catalog.districts, rng);

        let sampler = self
            .samplers
            .get(&catalog.tier_of(&district))
            .unwrap_or(&self.fallback);

        let price = sampler.sample_price(rng).to_string();
        let price = sometimes_empty(price, missing.price, rng);
        let area = format!("{:.1}", sampler.sample_area(rng));
        let area = sometimes_empty(area, missing.area, rng);
        let direction = pick(&catalog.directions, rng);
        let direction = sometimes_empty(direction, missing.direction, rng);
        let floors = String::new();
        let rooms = rng.random_range(1..=4_u8).to_string();
        let rooms = sometimes_empty(rooms, missing.rooms, rng);
        let toilets = rng.random_range(1..=3_u8).to_string();
        let toilets = sometimes_empty(toilets, missing.toilets, rng);
        let legal = pick(&catalog.legal_statuses, rng);
        let legal = sometimes_empty(legal, missing.legal, rng);

        let fields = vec![
            property_type,
            transaction,
            province,
            district,
            price,
            area,
            direction,
            floors,
            rooms,
            toilets,
            legal,
        ];
        debug_assert_eq!(fields.len(), RECORD_WIDTH);
        Record::new(fields)
    }

    /// Generate `count` records in order.
    pub fn generate_batch(&self, count: usize, rng: &mut dyn RngCore) -> Vec<Record> {
        (0..count).map(|_| self.generate_row(rng)).collect()
    }
}

/// Replace `value` with "" with probability `rate`.
fn sometimes_empty(value: String, rate: f64, rng: &mut dyn RngCore) -> String {
    if rng.random_bool(rate) {
        String::new()
    } else {
        value
    }
}

fn pick(values: &[String], rng: &mut dyn RngCore) -> String {
    if values.is_empty() {
        return String::new();
    }
    let idx = rng.random_range(0..values.len());
    values[idx].clone()
}
