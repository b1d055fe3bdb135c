use std::fmt;

use milhas_core::datetime::parse_flight_date;

use crate::entry::{FlightInput, PricingMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All the problems found in one flight input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

pub fn validate_flight_input(input: &FlightInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if input.origin.trim().is_empty() {
        errors.push("origin", "Origin is required");
    }
    if input.destination.trim().is_empty() {
        errors.push("destination", "Destination is required");
    }

    if input.date.trim().is_empty() {
        errors.push("date", "Date is required");
    } else if parse_flight_date(&input.date).is_err() {
        errors.push("date", "Date must look like 2024-01-01T10:00");
    }

    match &input.pricing {
        PricingMode::Miles(miles) => {
            if input.airline.trim().is_empty() {
                errors.push("airline", "Airline is required");
            }
            if *miles < 1 {
                errors.push("miles", "Miles must be greater than 0");
            }
        }
        PricingMode::Direct(price) => {
            if price.trim().is_empty() {
                errors.push("price", "Price is required");
            }
        }
    }

    if input.ticket_link.trim().is_empty() {
        errors.push("ticketLink", "Ticket link is required");
    } else if !is_http_url(&input.ticket_link) {
        errors.push("ticketLink", "Invalid URL");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(link: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        link.strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pricing: PricingMode) -> FlightInput {
        FlightInput {
            origin: "GRU".to_string(),
            destination: "MCO".to_string(),
            date: "2024-01-01T10:00".to_string(),
            airline: "LATAM".to_string(),
            pricing,
            ticket_link: "https://x".to_string(),
            taxes: None,
        }
    }

    #[test]
    fn test_valid_inputs_pass() {
        assert!(validate_flight_input(&input(PricingMode::Miles(50_000))).is_ok());
        assert!(validate_flight_input(&input(PricingMode::Direct("R$ 500,00".into()))).is_ok());
    }

    #[test]
    fn test_all_problems_are_reported_together() {
        let mut bad = input(PricingMode::Miles(0));
        bad.origin = "  ".to_string();
        bad.airline = String::new();
        bad.ticket_link = "ftp://x".to_string();

        let errors = validate_flight_input(&bad).unwrap_err();
        assert!(errors.has_field("origin"));
        assert!(errors.has_field("airline"));
        assert!(errors.has_field("miles"));
        assert!(errors.has_field("ticketLink"));
        assert!(!errors.has_field("destination"));
        assert!(errors.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_direct_price_needs_price_not_airline() {
        let mut direct = input(PricingMode::Direct(String::new()));
        direct.airline = String::new();

        let errors = validate_flight_input(&direct).unwrap_err();
        assert!(errors.has_field("price"));
        assert!(!errors.has_field("airline"));
    }

    #[test]
    fn test_date_must_parse() {
        let mut bad_date = input(PricingMode::Miles(1_000));
        bad_date.date = "31/12/2024".to_string();

        let errors = validate_flight_input(&bad_date).unwrap_err();
        assert!(errors.has_field("date"));
    }

    #[test]
    fn test_http_url() {
        assert!(is_http_url("http://a"));
        assert!(is_http_url("https://www.latam.com/"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("www.latam.com"));
    }
}
