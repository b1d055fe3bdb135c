use milhas_catalog::{estimate_price, AirlineCatalog};
use milhas_shared::FlightDetails;

use crate::book::{PlannerError, PlannerResult};
use crate::validation::validate_flight_input;

/// How a flight's price is obtained
#[derive(Debug, Clone, PartialEq)]
pub enum PricingMode {
    /// Derived from the mileage and the airline's rate at write time
    Miles(u64),
    /// Entered by hand as currency text, stored verbatim
    Direct(String),
}

/// A flight as entered by the user, before its price is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightInput {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub airline: String,
    pub pricing: PricingMode,
    pub ticket_link: String,
    pub taxes: Option<String>,
}

impl FlightInput {
    /// Rebuilds the input a stored flight was written from, so it can be edited and re-submitted.
    pub fn from_details(details: &FlightDetails) -> Self {
        let pricing = if details.use_direct_price {
            PricingMode::Direct(details.price.clone())
        } else {
            PricingMode::Miles(details.miles)
        };

        Self {
            origin: details.origin.clone(),
            destination: details.destination.clone(),
            date: details.date.clone(),
            airline: details.airline.clone(),
            pricing,
            ticket_link: details.ticket_link.clone(),
            taxes: details.taxes.clone(),
        }
    }

    /// Validates the input and freezes its price against the catalog as it is now.
    pub fn price(self, catalog: &AirlineCatalog) -> PlannerResult<FlightDetails> {
        validate_flight_input(&self).map_err(PlannerError::InvalidFlight)?;

        let (miles, price, use_direct_price) = match self.pricing {
            PricingMode::Miles(miles) => {
                (miles, estimate_price(catalog, miles, &self.airline), false)
            }
            PricingMode::Direct(price) => (0, price, true),
        };

        Ok(FlightDetails {
            origin: self.origin,
            destination: self.destination,
            date: self.date,
            airline: self.airline,
            miles,
            price,
            ticket_link: self.ticket_link,
            use_direct_price,
            taxes: self.taxes.filter(|taxes| !taxes.trim().is_empty()),
        })
    }
}
