//! Simulation input as it arrives on the wire
//!
//! These structs mirror the JSON object assembled by the parameter editor.
//! Nothing here is validated; `Scenario::from_input` turns it into the
//! dense, checked model the engine runs on.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub days: i64,
    #[serde(alias = "CustomersPerHour")]
    pub customers_per_hour: i64,
    pub products: Vec<ProductInput>,
    #[serde(default)]
    pub categories: Vec<CategoryInput>,
    #[serde(alias = "customers")]
    pub customer_types: Vec<CustomerTypeInput>,
    pub checkouts: Vec<CheckoutInput>,
    #[serde(default)]
    pub calendar: CalendarInput,
}

impl SimulationInput {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub id: i64,
    pub name: String,
    pub price: i64,
    #[serde(default, rename = "categoryID", alias = "categoryId")]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTypeInput {
    pub id: i64,
    pub name: String,
    pub frequency: f64,
    pub impulsivity: f64,
    /// Minutes a non-head queue member waits before leaving
    pub patience: i64,
    /// Product ID -> interest probability
    #[serde(default, alias = "productInterests")]
    pub interests: HashMap<i64, f64>,
    /// Category ID -> interest probability, used when a product has no entry
    #[serde(default)]
    pub category_interests: HashMap<i64, f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    pub id: i64,
    /// Customers per hour
    pub capacity: i64,
    /// Per hour
    pub human_cost: i64,
    /// Per hour
    pub technical_cost: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarInput {
    /// Day index -> (product ID -> override interest)
    #[serde(default)]
    pub deviations: BTreeMap<u32, HashMap<i64, f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_wire_names() {
        let json = r#"{
            "days": 2,
            "CustomersPerHour": 10,
            "products": [
                {"id": 1, "name": "apple", "price": 90, "categoryID": 2},
                {"id": 2, "name": "orange", "price": 100}
            ],
            "customers": [
                {"id": 1, "name": "man", "frequency": 1.0, "impulsivity": 0.3,
                 "patience": 40, "interests": {"1": 0.1, "2": 0.2}}
            ],
            "checkouts": [{"id": 1, "capacity": 10, "humanCost": 100, "technicalCost": 100}],
            "calendar": {"deviations": {"0": {"1": 0}, "1": {"1": 0, "2": 0.9}}}
        }"#;

        let input = SimulationInput::from_json(json).unwrap();
        assert_eq!(input.days, 2);
        assert_eq!(input.customers_per_hour, 10);
        assert_eq!(input.products[0].category_id, Some(2));
        assert_eq!(input.products[1].category_id, None);
        assert!(input.categories.is_empty());
        assert_eq!(input.customer_types[0].interests.get(&2), Some(&0.2));
        assert_eq!(input.checkouts[0].human_cost, 100);
        assert_eq!(input.calendar.deviations.len(), 2);
        assert_eq!(input.calendar.deviations[&1].get(&2), Some(&0.9));
    }

    #[test]
    fn test_parse_category_interests() {
        let json = r#"{
            "days": 1,
            "customersPerHour": 5,
            "products": [{"id": 3, "name": "milk", "price": 150, "categoryId": 9}],
            "categories": [{"id": 9, "name": "dairy"}],
            "customerTypes": [
                {"id": 4, "name": "student", "frequency": 1.0, "impulsivity": 0.0,
                 "patience": 10, "categoryInterests": {"9": 0.5}}
            ],
            "checkouts": [{"id": 1, "capacity": 10, "humanCost": 1, "technicalCost": 1}]
        }"#;

        let input = SimulationInput::from_json(json).unwrap();
        assert_eq!(input.categories[0].name, "dairy");
        assert!(input.customer_types[0].interests.is_empty());
        assert_eq!(input.customer_types[0].category_interests.get(&9), Some(&0.5));
        assert!(input.calendar.deviations.is_empty());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{"days": 1, "products": [], "customerTypes": [], "checkouts": []}"#;
        assert!(SimulationInput::from_json(json).is_err());
    }
}
