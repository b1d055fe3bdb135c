//! Mileage price derivation.
//!
//! Prices are rendered to BRL text once, when a flight is written, and that
//! text is what gets stored. Nothing here is consulted again on read.

use milhas_core::currency::{format_brl, ZERO_BRL};

use crate::airline::AirlineCatalog;

/// `(miles / 1000) * rate`
pub fn derive_amount(miles: u64, price_per_thousand_miles: f64) -> f64 {
    (miles as f64 / 1000.0) * price_per_thousand_miles
}

/// Formatted price for a mileage count at a given rate. Zero miles yields `R$ 0,00`.
pub fn derive_price(miles: u64, price_per_thousand_miles: f64) -> String {
    if miles == 0 {
        return ZERO_BRL.to_string();
    }
    format_brl(derive_amount(miles, price_per_thousand_miles))
}

/// Estimate using the airline's current rate, looked up by name.
///
/// An airline missing from the catalog yields `R$ 0,00`.
pub fn estimate_price(catalog: &AirlineCatalog, miles: u64, airline_name: &str) -> String {
    match catalog.find_by_name(airline_name) {
        Some(airline) => derive_price(miles, airline.price_per_thousand_miles),
        None => ZERO_BRL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_price() {
        assert_eq!(derive_amount(50_000, 35.0), 1750.0);
        assert_eq!(derive_price(50_000, 35.0), "R$ 1.750,00");
        assert_eq!(derive_price(1_500, 38.0), "R$ 57,00");
        assert_eq!(derive_price(0, 35.0), ZERO_BRL);
    }

    #[test]
    fn test_estimate_with_catalog() {
        let catalog = AirlineCatalog::with_defaults();

        assert_eq!(estimate_price(&catalog, 50_000, "LATAM"), "R$ 1.750,00");
        assert_eq!(estimate_price(&catalog, 10_000, "GOL"), "R$ 320,00");
        assert_eq!(estimate_price(&catalog, 0, "LATAM"), ZERO_BRL);
        assert_eq!(estimate_price(&catalog, 50_000, "Unknown Air"), ZERO_BRL);
    }
}
