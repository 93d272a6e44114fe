use proptest::prelude::*;

use realty_core::{Catalog, DistrictTier, PriceRange, RECORD_WIDTH, Record, field};
use realty_generate::{GeneratorProfile, RowGenerator, seeded_rng};

fn assert_record_in_range(catalog: &Catalog, record: &Record) {
    assert_eq!(record.len(), RECORD_WIDTH);
    assert_eq!(record.get(field::FLOORS), Some(""));
    assert_eq!(record.get(field::PROPERTY_TYPE), Some("Căn hộ, chung cư"));

    let district = record.get(field::DISTRICT).expect("district");
    assert!(catalog.districts.iter().any(|d| d == district), "{district}");
    let ranges = catalog.ranges_for(district).expect("ranges");

    let price = record.get(field::PRICE).expect("price");
    if !price.is_empty() {
        let value: i64 = price.parse().expect("integer price");
        assert!(ranges.price.contains(value), "price {value} for {district}");
    }

    let area = record.get(field::AREA).expect("area");
    if !area.is_empty() {
        let (_, fraction) = area.split_once('.').expect("decimal area");
        assert_eq!(fraction.len(), 1, "area {area}");
        let value: f64 = area.parse().expect("numeric area");
        assert!(ranges.area.contains(value), "area {value} for {district}");
    }

    let rooms = record.get(field::ROOMS).expect("rooms");
    if !rooms.is_empty() {
        let value: u8 = rooms.parse().expect("integer rooms");
        assert!((1..=4).contains(&value));
    }

    let toilets = record.get(field::TOILETS).expect("toilets");
    if !toilets.is_empty() {
        let value: u8 = toilets.parse().expect("integer toilets");
        assert!((1..=3).contains(&value));
    }

    let direction = record.get(field::DIRECTION).expect("direction");
    assert!(direction.is_empty() || catalog.directions.iter().any(|d| d == direction));

    let legal = record.get(field::LEGAL).expect("legal");
    assert!(catalog.legal_statuses.iter().any(|l| l == legal));
}

#[test]
fn same_seed_produces_identical_batches() {
    let catalog = Catalog::builtin();
    let generator = RowGenerator::new(&catalog, GeneratorProfile::default()).expect("generator");

    let batch_a = generator.generate_batch(200, &mut seeded_rng(42));
    let batch_b = generator.generate_batch(200, &mut seeded_rng(42));
    let batch_c = generator.generate_batch(200, &mut seeded_rng(43));

    assert_eq!(batch_a, batch_b, "batches should be deterministic");
    assert_ne!(batch_a, batch_c);
}

#[test]
fn high_tier_prices_stay_in_band() {
    let catalog = Catalog::builtin();
    let generator = RowGenerator::new(&catalog, GeneratorProfile::default()).expect("generator");
    let mut rng = seeded_rng(5);

    let mut seen = 0;
    for record in generator.generate_batch(5_000, &mut rng) {
        if record.get(field::DISTRICT) != Some("Quận 1") {
            continue;
        }
        assert_eq!(catalog.tier_of("Quận 1"), DistrictTier::High);
        if let Some(price) = record.get(field::PRICE).filter(|p| !p.is_empty()) {
            let value: i64 = price.parse().expect("integer price");
            assert!(PriceRange { min: 3500, max: 8000 }.contains(value));
            seen += 1;
        }
    }
    assert!(seen > 0, "expected Quận 1 rows in sample");
}

#[test]
fn missing_rates_converge_over_large_sample() {
    const ROWS: usize = 100_000;
    const TOLERANCE: f64 = 0.01;

    let catalog = Catalog::builtin();
    let generator = RowGenerator::new(&catalog, GeneratorProfile::default()).expect("generator");
    let mut rng = seeded_rng(2021);

    let mut empty = [0_usize; RECORD_WIDTH];
    let mut rentals = 0_usize;
    for _ in 0..ROWS {
        let record = generator.generate_row(&mut rng);
        for (index, value) in record.fields().iter().enumerate() {
            if value.is_empty() {
                empty[index] += 1;
            }
        }
        if record.get(field::TRANSACTION) == Some("Cần thuê") {
            rentals += 1;
        }
    }

    let rate = |index: usize| empty[index] as f64 / ROWS as f64;
    let expectations = [
        (field::PRICE, 0.03),
        (field::AREA, 0.05),
        (field::DIRECTION, 0.40),
        (field::ROOMS, 0.12),
        (field::TOILETS, 0.12),
        (field::LEGAL, 0.25 + 0.75 / 3.0),
        (field::FLOORS, 1.0),
        (field::DISTRICT, 0.0),
    ];
    for (index, expected) in expectations {
        let observed = rate(index);
        assert!(
            (observed - expected).abs() < TOLERANCE,
            "field {index}: observed {observed}, expected {expected}"
        );
    }

    let rental_rate = rentals as f64 / ROWS as f64;
    assert!((rental_rate - 0.025).abs() < TOLERANCE, "rentals {rental_rate}");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_record_respects_tier_ranges(seed in any::<u64>()) {
        let catalog = Catalog::builtin();
        let generator = RowGenerator::new(&catalog, GeneratorProfile::default()).expect("generator");
        let mut rng = seeded_rng(seed);
        for record in generator.generate_batch(50, &mut rng) {
            assert_record_in_range(&catalog, &record);
        }
    }
}
