//! Typed filter set for vehicle list queries.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::vehicle::FuelType;

/// Filters accepted by the vehicle list endpoint.
///
/// Converts losslessly to and from the generic string-keyed filter map the
/// query controller tracks. Parsing from the map is lenient: unknown keys
/// and unparseable values are dropped, mirroring the service's own
/// treatment of nonsense query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilters {
    pub brand: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl VehicleFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_fuel_type(mut self, fuel_type: FuelType) -> Self {
        self.fuel_type = Some(fuel_type);
        self
    }

    #[must_use]
    pub fn with_min_price(mut self, min_price: i64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    #[must_use]
    pub fn with_max_price(mut self, max_price: i64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// True when no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.fuel_type.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Query parameters in wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(brand) = &self.brand {
            pairs.push(("brand", brand.clone()));
        }
        if let Some(fuel_type) = self.fuel_type {
            pairs.push(("fuel_type", fuel_type.as_str().to_string()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.to_string()));
        }
        pairs
    }

    /// Convert to the generic filter map used by the query controller.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.query_pairs()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    /// Parse from a generic filter map, dropping anything unusable.
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            brand: map.get("brand").cloned(),
            fuel_type: map
                .get("fuel_type")
                .and_then(|value| FuelType::from_str(value).ok()),
            min_price: map.get("min_price").and_then(|value| value.parse().ok()),
            max_price: map.get("max_price").and_then(|value| value.parse().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_round_trip() {
        let filters = VehicleFilters::new()
            .with_brand("Toyota")
            .with_fuel_type(FuelType::Diesel)
            .with_min_price(200_000)
            .with_max_price(900_000);
        let map = filters.to_map();
        assert_eq!(map.get("brand").unwrap(), "Toyota");
        assert_eq!(map.get("fuel_type").unwrap(), "Diesel");
        assert_eq!(VehicleFilters::from_map(&map), filters);
    }

    #[test]
    fn from_map_drops_unusable_values() {
        let mut map = BTreeMap::new();
        map.insert("brand".to_string(), "Tata".to_string());
        map.insert("fuel_type".to_string(), "steam".to_string());
        map.insert("min_price".to_string(), "cheap".to_string());
        map.insert("sort".to_string(), "price".to_string());

        let filters = VehicleFilters::from_map(&map);
        assert_eq!(filters.brand.as_deref(), Some("Tata"));
        assert!(filters.fuel_type.is_none());
        assert!(filters.min_price.is_none());
        assert!(filters.max_price.is_none());
    }

    #[test]
    fn empty_filters_produce_no_pairs() {
        assert!(VehicleFilters::new().is_empty());
        assert!(VehicleFilters::new().query_pairs().is_empty());
    }
}
