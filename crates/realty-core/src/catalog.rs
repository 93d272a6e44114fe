use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{Header, RECORD_WIDTH};

const PROPERTY_TYPES: &[&str] = &["Căn hộ, chung cư"];
const SALE: &str = "Cần bán";
const TRANSACTION_TYPES: &[&str] = &[SALE, "Cần thuê"];
const CITY: &str = "Hồ Chí Minh";
const DISTRICTS: &[&str] = &[
    "Quận 9",
    "Quận Tân Bình",
    "Quận Tân Phú",
    "Quận 7",
    "Quận 2",
    "Quận 11",
    "Quận Thủ Đức",
    "Huyện Bình Chánh",
    "Quận Bình Tân",
    "Quận 12",
    "Quận 1",
    "Quận 3",
];
const DIRECTIONS: &[&str] = &[
    "Đông Bắc", "Tây", "Nam", "Tây Bắc", "Bắc", "Tây Nam", "Đông", "Đông Nam",
];
const LEGAL_STATUSES: &[&str] = &["Đã có sổ", "Đang chờ sổ", ""];
const HEADER: &[&str] = &[
    "GIỐNG - LOẠI",
    "GIỐNG - NHU CẦU",
    "GIỐNG - TỈNH THÀNH",
    "QUẬN HUYỆN",
    "GIÁ - TRIỆU ĐỒNG",
    "DIỆN TÍCH - M2",
    "HƯỚNG",
    "SỐ TẦNG",
    "SỐ PHÒNG",
    "SỐ TOILETS",
    "GIẤY TỜ PHÁP LÝ",
];

const HIGH_DISTRICTS: &[&str] = &[
    "Quận 1",
    "Quận 3",
    "Quận 4",
    "Quận 5",
    "Quận Bình Thạnh",
    "Quận Phú Nhuận",
    "Quận 10",
];
const MEDIUM_DISTRICTS: &[&str] = &[
    "Quận 2",
    "Quận 7",
    "Quận Tân Bình",
    "Quận Tân Phú",
    "Quận 11",
    "Quận 9",
    "Quận Thủ Đức",
];
const LOW_DISTRICTS: &[&str] = &[
    "Quận 12",
    "Quận Bình Tân",
    "Huyện Bình Chánh",
    "Huyện Nhà Bè",
    "Huyện Hóc Môn",
];

/// Price band of a district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictTier {
    High,
    Medium,
    Low,
}

impl DistrictTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Inclusive price bounds in million VND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Inclusive area bounds in square meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaRange {
    pub min: f64,
    pub max: f64,
}

impl AreaRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Sampling ranges attached to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRanges {
    pub price: PriceRange,
    pub area: AreaRange,
}

/// Tier membership plus its sampling ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSpec {
    pub tier: DistrictTier,
    pub districts: BTreeSet<String>,
    pub ranges: TierRanges,
}

/// Immutable lookup tables used to build listing records.
///
/// Built once per process and borrowed by the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub property_types: Vec<String>,
    pub transaction_types: Vec<String>,
    /// Transaction label favored by the generator.
    pub sale_transaction: String,
    pub city: String,
    /// Districts eligible for generation.
    pub districts: Vec<String>,
    pub directions: Vec<String>,
    /// Legal statuses, including the explicit empty option.
    pub legal_statuses: Vec<String>,
    pub header: Header,
    tiers: BTreeMap<DistrictTier, TierSpec>,
}

impl Catalog {
    /// Ho Chi Minh City apartment catalog.
    pub fn builtin() -> Self {
        let tiers = [
            tier_spec(DistrictTier::High, HIGH_DISTRICTS, (3500, 8000), (25.0, 90.0)),
            tier_spec(DistrictTier::Medium, MEDIUM_DISTRICTS, (2000, 4500), (40.0, 120.0)),
            tier_spec(DistrictTier::Low, LOW_DISTRICTS, (800, 2500), (50.0, 160.0)),
        ]
        .into_iter()
        .map(|entry| (entry.tier, entry))
        .collect();

        Self {
            property_types: owned(PROPERTY_TYPES),
            transaction_types: owned(TRANSACTION_TYPES),
            sale_transaction: SALE.to_string(),
            city: CITY.to_string(),
            districts: owned(DISTRICTS),
            directions: owned(DIRECTIONS),
            legal_statuses: owned(LEGAL_STATUSES),
            header: Header::new(owned(HEADER)),
            tiers,
        }
    }

    /// Resolve the tier of `district`. Districts outside every tier are `Low`.
    pub fn tier_of(&self, district: &str) -> DistrictTier {
        self.tiers
            .values()
            .find(|entry| entry.districts.contains(district))
            .map(|entry| entry.tier)
            .unwrap_or(DistrictTier::Low)
    }

    pub fn tiers(&self) -> impl Iterator<Item = &TierSpec> {
        self.tiers.values()
    }

    /// Ranges used for `district`, following the low band when the tier has
    /// no ranges of its own.
    pub fn ranges_for(&self, district: &str) -> Option<&TierRanges> {
        let tier = self.tier_of(district);
        self.tiers
            .get(&tier)
            .or_else(|| self.tiers.get(&DistrictTier::Low))
            .map(|entry| &entry.ranges)
    }

    /// Validate internal consistency of the catalog.
    ///
    /// This checks:
    /// - every category list used for sampling is non-empty
    /// - the header has one column per record field
    /// - no district belongs to more than one tier
    /// - the low tier exists and every range is ordered and finite
    pub fn validate(&self) -> Result<()> {
        for (name, values) in [
            ("property_types", &self.property_types),
            ("transaction_types", &self.transaction_types),
            ("districts", &self.districts),
            ("directions", &self.directions),
            ("legal_statuses", &self.legal_statuses),
        ] {
            if values.is_empty() {
                return Err(Error::InvalidCatalog(format!("{name} must not be empty")));
            }
        }

        if self.header.width() != RECORD_WIDTH {
            return Err(Error::InvalidCatalog(format!(
                "header has {} columns, expected {RECORD_WIDTH}",
                self.header.width()
            )));
        }

        if !self.tiers.contains_key(&DistrictTier::Low) {
            return Err(Error::InvalidCatalog("low tier is required".to_string()));
        }

        let mut seen: BTreeMap<&str, DistrictTier> = BTreeMap::new();
        for entry in self.tiers.values() {
            for district in &entry.districts {
                if let Some(previous) = seen.insert(district.as_str(), entry.tier) {
                    return Err(Error::InvalidCatalog(format!(
                        "district '{district}' belongs to both {} and {} tiers",
                        previous.as_str(),
                        entry.tier.as_str()
                    )));
                }
            }

            let TierRanges { price, area } = entry.ranges;
            if price.min > price.max {
                return Err(Error::InvalidCatalog(format!(
                    "{} tier price min must be <= max",
                    entry.tier.as_str()
                )));
            }
            if !area.min.is_finite() || !area.max.is_finite() || area.min > area.max {
                return Err(Error::InvalidCatalog(format!(
                    "{} tier area range is invalid",
                    entry.tier.as_str()
                )));
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn tier_spec(
    tier: DistrictTier,
    districts: &[&str],
    price: (i64, i64),
    area: (f64, f64),
) -> TierSpec {
    TierSpec {
        tier,
        districts: districts.iter().map(|d| d.to_string()).collect(),
        ranges: TierRanges {
            price: PriceRange {
                min: price.0,
                max: price.1,
            },
            area: AreaRange {
                min: area.0,
                max: area.1,
            },
        },
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        Catalog::builtin().validate().expect("builtin catalog");
    }

    #[test]
    fn tier_lookup_uses_membership() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.tier_of("Quận 1"), DistrictTier::High);
        assert_eq!(catalog.tier_of("Quận Thủ Đức"), DistrictTier::Medium);
        assert_eq!(catalog.tier_of("Huyện Bình Chánh"), DistrictTier::Low);
    }

    #[test]
    fn unknown_district_falls_back_to_low() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.tier_of("Quận Gò Vấp"), DistrictTier::Low);
        let ranges = catalog.ranges_for("Quận Gò Vấp").expect("ranges");
        assert_eq!(ranges.price, PriceRange { min: 800, max: 2500 });
    }

    #[test]
    fn every_generator_district_has_a_tier() {
        let catalog = Catalog::builtin();
        for district in &catalog.districts {
            let member_of = catalog
                .tiers()
                .filter(|entry| entry.districts.contains(district))
                .count();
            assert_eq!(member_of, 1, "district {district}");
        }
    }

    #[test]
    fn overlapping_tiers_are_rejected() {
        let mut catalog = Catalog::builtin();
        if let Some(entry) = catalog.tiers.get_mut(&DistrictTier::Low) {
            entry.districts.insert("Quận 1".to_string());
        }
        let err = catalog.validate().expect_err("overlap");
        assert!(err.to_string().contains("Quận 1"));
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let mut catalog = Catalog::builtin();
        if let Some(entry) = catalog.tiers.get_mut(&DistrictTier::High) {
            entry.ranges.price = PriceRange { min: 10, max: 1 };
        }
        assert!(matches!(catalog.validate(), Err(Error::InvalidCatalog(_))));
    }
}
