use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An airline and the value of its miles, in BRL per thousand miles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    pub id: Uuid,
    pub name: String,
    pub price_per_thousand_miles: f64,
}

impl Airline {
    pub fn new(name: impl Into<String>, price_per_thousand_miles: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price_per_thousand_miles,
        }
    }

    /// A rate of zero or below yields meaningless estimates.
    pub fn has_usable_rate(&self) -> bool {
        self.price_per_thousand_miles.is_finite() && self.price_per_thousand_miles > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airline_json_uses_camel_case() {
        let airline = Airline::new("LATAM", 35.0);
        let json = serde_json::to_value(&airline).unwrap();

        assert_eq!(json["name"], "LATAM");
        assert_eq!(json["pricePerThousandMiles"], 35.0);
        assert!(json.get("price_per_thousand_miles").is_none());
    }

    #[test]
    fn test_usable_rate() {
        assert!(Airline::new("GOL", 32.0).has_usable_rate());
        assert!(!Airline::new("Free", 0.0).has_usable_rate());
        assert!(!Airline::new("Broken", f64::NAN).has_usable_rate());
    }
}
