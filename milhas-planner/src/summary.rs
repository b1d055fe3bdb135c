use milhas_core::currency::{format_brl, parse_brl};
use milhas_shared::Workspace;
use serde::Serialize;
use tracing::warn;

/// Totals shown under a workspace's flight list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceSummary {
    pub flight_count: usize,
    /// Direct-price flights contribute nothing here
    pub total_miles: u64,
    /// Sum of every flight's stored price, read back from its currency text
    pub total_price: f64,
}

impl WorkspaceSummary {
    pub fn for_workspace(workspace: &Workspace) -> Self {
        let total_miles = workspace.flights.iter().fold(0u64, |total, flight| {
            total.checked_add(flight.counted_miles()).unwrap_or_else(|| {
                warn!(
                    "Mileage total of workspace {} overflows at flight {}; capping it",
                    workspace.id, flight.id
                );
                u64::MAX
            })
        });

        let total_price = workspace
            .flights
            .iter()
            .map(|flight| {
                parse_brl(&flight.details.price).unwrap_or_else(|| {
                    warn!(
                        "Flight {} has an unreadable price {:?}; counting it as zero",
                        flight.id, flight.details.price
                    );
                    0.0
                })
            })
            .sum();

        Self {
            flight_count: workspace.flights.len(),
            total_miles,
            total_price,
        }
    }

    pub fn formatted_total_price(&self) -> String {
        format_brl(self.total_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milhas_shared::{Flight, FlightDetails};

    fn flight(miles: u64, price: &str, use_direct_price: bool) -> Flight {
        Flight::new(FlightDetails {
            miles,
            price: price.to_string(),
            use_direct_price,
            ..FlightDetails::default()
        })
    }

    #[test]
    fn test_summary_totals() {
        let workspace = Workspace::new(
            "Trip",
            vec![
                flight(50_000, "R$ 1.750,00", false),
                flight(0, "R$ 500,00", true),
                flight(10_000, "R$ 320,00", false),
            ],
        );

        let summary = WorkspaceSummary::for_workspace(&workspace);
        assert_eq!(summary.flight_count, 3);
        assert_eq!(summary.total_miles, 60_000);
        assert_eq!(summary.total_price, 2570.0);
        assert_eq!(summary.formatted_total_price(), "R$ 2.570,00");
    }

    #[test]
    fn test_unreadable_price_counts_as_zero() {
        let workspace = Workspace::new("Trip", vec![flight(1_000, "grátis", false)]);

        let summary = WorkspaceSummary::for_workspace(&workspace);
        assert_eq!(summary.total_price, 0.0);
        assert_eq!(summary.formatted_total_price(), "R$ 0,00");
    }

    #[test]
    fn test_total_miles_saturates_instead_of_overflowing() {
        let workspace = Workspace::new(
            "Imported",
            vec![flight(u64::MAX, "R$ 0,00", false), flight(1, "R$ 0,00", false)],
        );

        let summary = WorkspaceSummary::for_workspace(&workspace);
        assert_eq!(summary.flight_count, 2);
        assert_eq!(summary.total_miles, u64::MAX);
    }

    #[test]
    fn test_empty_workspace() {
        let summary = WorkspaceSummary::for_workspace(&Workspace::new("Empty", vec![]));
        assert_eq!(summary.flight_count, 0);
        assert_eq!(summary.total_miles, 0);
    }
}
