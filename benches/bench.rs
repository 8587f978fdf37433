// Criterion benchmarks for HomeFit Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use homefit_match::core::{Matcher, calculate_match_score, ranges::{parse_price_range, parse_sqft_range}};
use homefit_match::models::{Listing, Preference};

const NEIGHBORHOODS: [&str; 4] = ["Williamsburg", "Astoria", "Harlem", "Park Slope"];

fn create_listing(id: usize) -> Listing {
    Listing {
        id: Some(id.to_string()),
        price: Some(800.0 + (id % 40) as f64 * 50.0),
        bedrooms: Some(format!("{}", 1 + id % 3)),
        neighborhood: Some(NEIGHBORHOODS[id % NEIGHBORHOODS.len()].to_string()),
        floor: Some(format!("{}", id % 12)),
        pets: Some(if id % 2 == 0 { "Pets allowed" } else { "Not allowed" }.to_string()),
        amenities: Some(vec!["Fitness center".to_string(), "Washer/Dryer".to_string()]),
        style: Some("Modern".to_string()),
        move_in_date: Some("2024-08-15".to_string()),
        parking: Some("Yes".to_string()),
        transport: Some(if id % 3 == 0 { "Good" } else { "Average" }.to_string()),
        sqft: Some(format!("{}", 500 + id % 900)),
        safety: Some("High".to_string()),
        view: Some("City".to_string()),
        lease_capacity: Some("2 People".to_string()),
        roommates: Some("Private".to_string()),
    }
}

fn create_preference() -> Preference {
    Preference {
        price_range: Some("$1,000 - $2,000".to_string()),
        bedrooms: Some("2 Bedrooms".to_string()),
        neighborhood: Some("Williamsburg".to_string()),
        floor: Some("Mid-level Floor".to_string()),
        pets: Some("Yes".to_string()),
        amenities: Some(vec!["Gym".to_string(), "Balcony".to_string(), "In-Unit Laundry".to_string()]),
        style: Some("Modern".to_string()),
        move_in_date: Some("2024-09-01".to_string()),
        parking: Some("Need parking".to_string()),
        transport: Some("Very Important".to_string()),
        sqft: Some("700 - 1,000 sq. ft.".to_string()),
        safety: Some("Very Important".to_string()),
        view: Some("City".to_string()),
        lease_capacity: Some("2 People".to_string()),
        roommates: Some("No roommates".to_string()),
    }
}

fn bench_range_parsing(c: &mut Criterion) {
    c.bench_function("parse_price_range", |b| {
        b.iter(|| parse_price_range(black_box(Some("$1,000 - $2,000"))));
    });

    c.bench_function("parse_sqft_range", |b| {
        b.iter(|| parse_sqft_range(black_box(Some("500 - 1,000 sq. ft."))));
    });
}

fn bench_single_score(c: &mut Criterion) {
    let preference = create_preference();
    let listing = create_listing(7);

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&preference), black_box(&listing)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let preference = create_preference();

    let mut group = c.benchmark_group("ranking");

    for listing_count in [10, 50, 100, 500, 1000].iter() {
        let listings: Vec<Listing> = (0..*listing_count).map(create_listing).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_page", listing_count),
            listing_count,
            |b, _| {
                b.iter(|| {
                    matcher.rank_page(
                        black_box(&preference),
                        black_box(listings.clone()),
                        black_box(1),
                        black_box(20),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_range_parsing,
    bench_single_score,
    bench_ranking
);

criterion_main!(benches);
