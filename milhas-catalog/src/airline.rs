use milhas_shared::Airline;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Airlines offered when nothing has been stored yet (BRL per thousand miles).
pub const DEFAULT_AIRLINES: [(&str, f64); 3] = [("LATAM", 35.0), ("GOL", 32.0), ("Azul", 38.0)];

/// Immutable snapshot of the known airlines.
///
/// Every mutation returns a new catalog; the receiver is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirlineCatalog {
    #[serde(default)]
    pub airlines: Vec<Airline>,
}

/// Partial update for an airline. The id is never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirlinePatch {
    pub name: Option<String>,
    pub price_per_thousand_miles: Option<f64>,
}

impl AirlineCatalog {
    pub fn new(airlines: Vec<Airline>) -> Self {
        Self { airlines }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_AIRLINES
                .iter()
                .map(|(name, rate)| Airline::new(*name, *rate))
                .collect(),
        )
    }

    pub fn get(&self, id: &Uuid) -> Option<&Airline> {
        self.airlines.iter().find(|airline| &airline.id == id)
    }

    /// Exact name match; the first one wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Airline> {
        self.airlines.iter().find(|airline| airline.name == name)
    }

    pub fn add_airline(
        &self,
        name: impl Into<String>,
        price_per_thousand_miles: f64,
    ) -> (Self, Airline) {
        let airline = Airline::new(name, price_per_thousand_miles);
        let mut next = self.clone();
        next.airlines.push(airline.clone());

        info!("Airline added: {} ({})", airline.name, airline.id);
        (next, airline)
    }

    pub fn remove_airline(&self, id: &Uuid) -> Result<Self, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let airlines = self
            .airlines
            .iter()
            .filter(|airline| &airline.id != id)
            .cloned()
            .collect();

        info!("Airline removed: {}", id);
        Ok(Self::new(airlines))
    }

    pub fn update_airline(&self, id: &Uuid, patch: AirlinePatch) -> Result<Self, CatalogError> {
        let mut next = self.clone();
        let airline = next
            .airlines
            .iter_mut()
            .find(|airline| &airline.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        if let Some(name) = patch.name {
            airline.name = name;
        }
        if let Some(rate) = patch.price_per_thousand_miles {
            airline.price_per_thousand_miles = rate;
        }

        info!("Airline updated: {}", id);
        Ok(next)
    }

    pub fn len(&self) -> usize {
        self.airlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airlines.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Airline not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lifecycle() {
        let empty = AirlineCatalog::default();

        // Add
        let (catalog, latam) = empty.add_airline("LATAM", 35.0);
        assert!(empty.is_empty());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_by_name("LATAM").unwrap().id, latam.id);

        // Update keeps the id
        let catalog = catalog
            .update_airline(
                &latam.id,
                AirlinePatch {
                    price_per_thousand_miles: Some(40.0),
                    ..AirlinePatch::default()
                },
            )
            .unwrap();
        let updated = catalog.get(&latam.id).unwrap();
        assert_eq!(updated.name, "LATAM");
        assert_eq!(updated.price_per_thousand_miles, 40.0);

        // Remove
        let catalog = catalog.remove_airline(&latam.id).unwrap();
        assert!(catalog.find_by_name("LATAM").is_none());
    }

    #[test]
    fn test_unknown_airline_is_not_found() {
        let catalog = AirlineCatalog::with_defaults();
        let missing = Uuid::new_v4();

        assert!(matches!(
            catalog.remove_airline(&missing),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            catalog.update_airline(&missing, AirlinePatch::default()),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let catalog = AirlineCatalog::with_defaults();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find_by_name("GOL").unwrap().price_per_thousand_miles, 32.0);
        assert_eq!(catalog.find_by_name("Azul").unwrap().price_per_thousand_miles, 38.0);
    }

    #[test]
    fn test_find_by_name_is_exact_and_first_wins() {
        let (catalog, first) = AirlineCatalog::default().add_airline("GOL", 30.0);
        let (catalog, _second) = catalog.add_airline("GOL", 99.0);

        assert_eq!(catalog.find_by_name("GOL").unwrap().id, first.id);
        assert!(catalog.find_by_name("gol").is_none());
    }
}
