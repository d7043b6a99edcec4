use thiserror::Error;

use crate::domain::types::EntityKind;

/// Configuration problem found before the first tick runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount of days must be a positive number, got {0}")]
    NonPositiveDays(i64),
    #[error("customers per hour must be a positive number, got {0}")]
    NonPositiveArrivalRate(i64),
    #[error("at least one {0} is required")]
    Empty(EntityKind),
    #[error("{kind} ID must be a positive integer, got {id}")]
    NonPositiveId { kind: EntityKind, id: i64 },
    #[error("duplicate {kind} ID: {id}")]
    DuplicateId { kind: EntityKind, id: i64 },
    #[error("price of product {product} must be a positive integer, got {price}")]
    NonPositivePrice { product: i64, price: i64 },
    #[error("checkout {checkout} {field} must be a positive integer, got {value}")]
    NonPositiveCheckoutValue { checkout: i64, field: &'static str, value: i64 },
    #[error("product {product} references unknown category {category}")]
    UnknownCategory { product: i64, category: i64 },
    #[error("{what} must be within [{min}, {max}], got {value}")]
    OutOfRange { what: String, value: f64, min: f64, max: f64 },
    #[error("customer type '{customer_type}' does not define interest for product {product}")]
    MissingInterest { customer_type: String, product: i64 },
    #[error("frequencies of all customer types must add up to 1, got {sum}")]
    FrequencySum { sum: f64 },
    #[error("calendar day {day} references unknown product {product}")]
    UnknownDeviationProduct { day: u32, product: i64 },
}

/// A run that stopped before producing a result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("simulation cancelled at day {day}, minute {minute}")]
    Cancelled { day: u32, minute: u32 },
}
