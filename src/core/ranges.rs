//! Range parsers for free-text numeric ranges
//!
//! Price ranges come from a dropdown ("$1,000 - $2,000", "$3,000+") and
//! square footage from free text ("500 - 1,000 sq. ft."). Unparsable input
//! resolves to a sentinel range rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// Inclusive price interval; an open maximum is `f64::INFINITY`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const UNBOUNDED: PriceRange = PriceRange {
        min: 0.0,
        max: f64::INFINITY,
    };

    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Square footage interval; either bound may be missing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SqftRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SqftRange {
    /// Both bounds, if both parsed
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.min?, self.max?))
    }
}

/// Keep only ASCII digits and parse what is left
fn digits_only(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Parse a price range
///
/// - absent text is unbounded
/// - "$3,000+" is `[3000, inf)`
/// - "$1,000 - $2,000" is `[1000, 2000]`
/// - a single number is treated as a maximum: "2000" is `[0, 2000]`
pub fn parse_price_range(text: Option<&str>) -> PriceRange {
    let Some(text) = text else {
        return PriceRange::UNBOUNDED;
    };

    if text.contains('+') {
        return match digits_only(text) {
            Some(min) => PriceRange {
                min,
                max: f64::INFINITY,
            },
            None => PriceRange::UNBOUNDED,
        };
    }

    let bounds: Vec<f64> = text.split('-').filter_map(digits_only).collect();
    match bounds.as_slice() {
        [low, high] => PriceRange {
            min: *low,
            max: *high,
        },
        [max] => PriceRange { min: 0.0, max: *max },
        _ => PriceRange::UNBOUNDED,
    }
}

/// Parse a square footage range
///
/// Commas are dropped before digit runs are extracted. Two or more numbers
/// give `[first, second]`, one number gives `[n, n]`, none gives an empty
/// range.
pub fn parse_sqft_range(text: Option<&str>) -> SqftRange {
    let Some(text) = text else {
        return SqftRange::default();
    };

    let cleaned = text.replace(',', "");
    let numbers: Vec<f64> = DIGIT_RUN
        .find_iter(&cleaned)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .take(2)
        .collect();

    match numbers.as_slice() {
        [low, high] => SqftRange {
            min: Some(*low),
            max: Some(*high),
        },
        [n] => SqftRange {
            min: Some(*n),
            max: Some(*n),
        },
        _ => SqftRange::default(),
    }
}

/// Parse the integer prefix of a string
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit ("850 sq ft" is 850, "1,200" is 1). Values too large for
/// `i64` saturate.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = &rest[..rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
