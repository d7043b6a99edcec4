//! Shared identifier types for the store simulator
//!
//! Two families of newtypes live here:
//! - external IDs (`ProductId`, `CheckoutId`, ...) as they appear in the
//!   input and output JSON
//! - dense internal indices (`ProductIdx`, `LaneIdx`, ...) assigned once at
//!   validation time and used for every lookup inside the tick loop

use serde::{Deserialize, Serialize};

macro_rules! external_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

external_id!(
    /// Product identifier from the input catalog
    ProductId
);
external_id!(
    /// Category identifier from the input catalog
    CategoryId
);
external_id!(
    /// Customer type identifier
    CustomerTypeId
);
external_id!(
    /// Checkout lane identifier
    CheckoutId
);

/// Position of a product in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductIdx(pub usize);

/// Position of a category in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryIdx(pub usize);

/// Position of a customer type in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeIdx(pub usize);

/// Position of a checkout lane in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneIdx(pub usize);

/// Kind of catalog entity, used in validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Category,
    CustomerType,
    Checkout,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Category => "category",
            EntityKind::CustomerType => "customer type",
            EntityKind::Checkout => "checkout",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
