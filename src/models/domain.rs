use serde::{Deserialize, Deserializer, Serialize};

/// A user's stated housing criteria
///
/// Every attribute is optional. Records come from the preference form and
/// older documents are missing fields freely, so the scorer treats an absent
/// field as "not comparable" rather than as a mismatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    #[serde(default, deserialize_with = "lenient_text")]
    pub price_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bedrooms: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub neighborhood: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub floor: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pets: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub move_in_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub parking: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub transport: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sqft: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub safety: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub view: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub lease_capacity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub roommates: Option<String>,
}

/// A broker-authored apartment listing
///
/// Same attribute names as [`Preference`], phrased from the listing side:
/// `price` is a plain amount, `moveInDate` is the earliest available date and
/// `transport`/`safety` are quality labels such as "Good" or "Average".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, alias = "_id", deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bedrooms: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub neighborhood: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub floor: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pets: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub move_in_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub parking: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub transport: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sqft: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub safety: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub view: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub lease_capacity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub roommates: Option<String>,
}

/// A listing paired with its compatibility score (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredListing {
    pub listing: Listing,
    pub match_score: u8,
}

/// Per-criterion weights used by the score aggregator
///
/// `amenity` is charged once per preference amenity, so the amenity
/// criterion's total weight grows with the length of the preference list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    pub price: f64,
    pub bedrooms: f64,
    pub neighborhood: f64,
    pub floor: f64,
    pub pets: f64,
    pub amenity: f64,
    pub style: f64,
    pub move_in_date: f64,
    pub parking: f64,
    pub transport: f64,
    pub sqft: f64,
    pub safety: f64,
    pub view: f64,
    pub lease_capacity: f64,
    pub roommates: f64,
}

impl CriterionWeights {
    /// Sum of every fixed weight, excluding the per-item amenity weight
    pub fn fixed_total(&self) -> f64 {
        self.price
            + self.bedrooms
            + self.neighborhood
            + self.floor
            + self.pets
            + self.style
            + self.move_in_date
            + self.parking
            + self.transport
            + self.sqft
            + self.safety
            + self.view
            + self.lease_capacity
            + self.roommates
    }
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            price: 15.0,
            bedrooms: 15.0,
            neighborhood: 10.0,
            floor: 5.0,
            pets: 8.0,
            amenity: 3.0,
            style: 5.0,
            move_in_date: 8.0,
            parking: 8.0,
            transport: 5.0,
            sqft: 6.0,
            safety: 7.0,
            view: 4.0,
            lease_capacity: 8.0,
            roommates: 6.0,
        }
    }
}

/// Raw JSON scalar accepted for text-like fields
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

/// Accept a string or a number for a text field; anything else is absent
///
/// A numeric `0` or `false` is absent as well: stored records use them to
/// mean "not filled in".
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value::<TextOrNumber>(v) {
        Ok(TextOrNumber::Text(s)) => Some(s),
        Ok(TextOrNumber::Integer(0)) | Ok(TextOrNumber::Bool(false)) => None,
        Ok(TextOrNumber::Integer(n)) => Some(n.to_string()),
        Ok(TextOrNumber::Float(n)) if n == 0.0 || n.is_nan() => None,
        Ok(TextOrNumber::Float(n)) => Some(n.to_string()),
        Ok(TextOrNumber::Bool(b)) => Some(b.to_string()),
        Err(_) => None,
    }))
}

/// Accept a number or a numeric string for an amount field; zero is absent
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| *n != 0.0 && !n.is_nan())))
}

/// Accept an array of strings; a non-array value is absent
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_match_table() {
        let weights = CriterionWeights::default();
        assert_eq!(weights.fixed_total(), 110.0);
        assert_eq!(weights.amenity, 3.0);
    }

    #[test]
    fn test_listing_accepts_numeric_fields() {
        let listing: Listing = serde_json::from_value(serde_json::json!({
            "_id": "abc123",
            "price": "1500",
            "floor": 3,
            "sqft": 850,
            "bedrooms": "2",
            "amenities": ["Gym", "Balcony"],
            "moveInDate": "2024-06-01"
        }))
        .unwrap();

        assert_eq!(listing.id.as_deref(), Some("abc123"));
        assert_eq!(listing.price, Some(1500.0));
        assert_eq!(listing.floor.as_deref(), Some("3"));
        assert_eq!(listing.sqft.as_deref(), Some("850"));
        assert_eq!(listing.amenities, Some(vec!["Gym".to_string(), "Balcony".to_string()]));
    }

    #[test]
    fn test_zero_values_are_absent() {
        let listing: Listing = serde_json::from_value(serde_json::json!({
            "price": 0,
            "floor": 0,
            "sqft": 0.0,
            "pets": false,
            "view": "0"
        }))
        .unwrap();

        assert_eq!(listing.price, None);
        assert_eq!(listing.floor, None);
        assert_eq!(listing.sqft, None);
        assert_eq!(listing.pets, None);
        assert_eq!(listing.view.as_deref(), Some("0"));
    }

    #[test]
    fn test_preference_tolerates_malformed_fields() {
        let preference: Preference = serde_json::from_value(serde_json::json!({
            "priceRange": null,
            "amenities": "Gym",
            "pets": {"nested": true},
            "unknownField": 42
        }))
        .unwrap();

        assert_eq!(preference.price_range, None);
        assert_eq!(preference.amenities, None);
        assert_eq!(preference.pets, None);
    }

    #[test]
    fn test_empty_object_is_all_absent() {
        let preference: Preference = serde_json::from_str("{}").unwrap();
        assert_eq!(preference, Preference::default());
    }
}
