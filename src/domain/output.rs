//! Simulation result
//!
//! Serialized with camelCase keys; per-entity maps are keyed by entity ID,
//! which JSON renders as strings. `BTreeMap` keeps key order stable so two
//! identical runs produce identical bytes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::types::{CheckoutId, CustomerTypeId, ProductId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputData {
    pub times_visited: u64,
    pub transactions: u64,
    pub products_purchased: u64,
    /// Minutes, summed over completed transactions
    pub total_time_in_store: u64,
    pub profits: u64,
    pub op_costs: u64,
    /// Customers that left a queue before being served
    #[serde(default)]
    pub reneged: u64,
    /// Customers still shopping or queued when the run ended
    #[serde(default)]
    pub remaining_at_close: u64,
    /// Length of the run in simulated minutes
    #[serde(default)]
    pub simulated_minutes: u64,
    pub checkout_output: BTreeMap<CheckoutId, CheckoutOutput>,
    pub product_output: BTreeMap<ProductId, ProductOutput>,
    pub customer_type_output: BTreeMap<CustomerTypeId, CustomerTypeOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutput {
    pub profits: u64,
    pub technical_cost: u64,
    pub human_cost: u64,
    pub transactions: u64,
    #[serde(default)]
    pub items_scanned: u64,
    #[serde(default)]
    pub reneged: u64,
    #[serde(default)]
    pub max_queue_length: u64,
    /// Customers per hour, copied from the lane definition
    #[serde(default)]
    pub capacity: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOutput {
    pub name: String,
    pub price: u64,
    pub amount_sold: u64,
    pub sold_by_shopping_list: u64,
    pub sold_by_impulse: u64,
    /// Left unpaid in the cart of a customer who reneged
    #[serde(default)]
    pub amount_abandoned: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTypeOutput {
    pub visits: u64,
    pub transactions: u64,
    pub total_products_purchased: u64,
    pub total_time_in_store: u64,
    pub total_profit: u64,
    #[serde(default)]
    pub reneged: u64,
}

impl OutputData {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
