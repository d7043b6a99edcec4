//! Immutable store catalog: products, categories and checkout lanes
//!
//! Built once from the raw input. Every entity gets a dense index in input
//! order, and the ID -> index maps are only consulted while validating the
//! rest of the input (interest tables, calendar). The tick loop works on
//! indices alone.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::domain::error::ValidationError;
use crate::domain::input::{CheckoutInput, SimulationInput};
use crate::domain::types::{
    CategoryId, CategoryIdx, CheckoutId, EntityKind, LaneIdx, ProductId, ProductIdx,
};

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub category: Option<CategoryIdx>,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Static definition of a checkout lane (its queue lives in `CheckoutPool`)
#[derive(Debug, Clone)]
pub struct CheckoutSpec {
    pub id: CheckoutId,
    /// Customers per hour
    pub capacity: u64,
    /// Per hour
    pub human_cost: u64,
    /// Per hour
    pub technical_cost: u64,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    checkouts: Vec<CheckoutSpec>,
    product_index: FxHashMap<ProductId, ProductIdx>,
    category_index: FxHashMap<CategoryId, CategoryIdx>,
}

/// Reject non-positive and repeated IDs of one entity kind
fn check_id(kind: EntityKind, id: i64, seen: &mut FxHashSet<i64>) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::NonPositiveId { kind, id });
    }
    if !seen.insert(id) {
        return Err(ValidationError::DuplicateId { kind, id });
    }
    Ok(())
}

fn positive_checkout_value(
    checkout: &CheckoutInput,
    field: &'static str,
    value: i64,
) -> Result<u64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveCheckoutValue { checkout: checkout.id, field, value });
    }
    Ok(value as u64)
}

impl Catalog {
    pub fn from_input(input: &SimulationInput) -> Result<Self, ValidationError> {
        if input.products.is_empty() {
            return Err(ValidationError::Empty(EntityKind::Product));
        }
        if input.checkouts.is_empty() {
            return Err(ValidationError::Empty(EntityKind::Checkout));
        }

        let mut seen = FxHashSet::default();
        let mut categories = Vec::with_capacity(input.categories.len());
        let mut category_index = FxHashMap::default();
        for raw in &input.categories {
            check_id(EntityKind::Category, raw.id, &mut seen)?;
            category_index.insert(CategoryId(raw.id), CategoryIdx(categories.len()));
            categories.push(Category { id: CategoryId(raw.id), name: raw.name.clone() });
        }

        seen.clear();
        let mut products = Vec::with_capacity(input.products.len());
        let mut product_index = FxHashMap::default();
        for raw in &input.products {
            check_id(EntityKind::Product, raw.id, &mut seen)?;
            if raw.price <= 0 {
                return Err(ValidationError::NonPositivePrice { product: raw.id, price: raw.price });
            }
            let category = match raw.category_id {
                Some(category) => Some(*category_index.get(&CategoryId(category)).ok_or(
                    ValidationError::UnknownCategory { product: raw.id, category },
                )?),
                None => None,
            };
            product_index.insert(ProductId(raw.id), ProductIdx(products.len()));
            products.push(Product {
                id: ProductId(raw.id),
                name: raw.name.clone(),
                price: raw.price as u64,
                category,
            });
        }

        seen.clear();
        let mut checkouts = Vec::with_capacity(input.checkouts.len());
        for raw in &input.checkouts {
            check_id(EntityKind::Checkout, raw.id, &mut seen)?;
            checkouts.push(CheckoutSpec {
                id: CheckoutId(raw.id),
                capacity: positive_checkout_value(raw, "capacity", raw.capacity)?,
                human_cost: positive_checkout_value(raw, "human cost", raw.human_cost)?,
                technical_cost: positive_checkout_value(raw, "technical cost", raw.technical_cost)?,
            });
        }

        Ok(Self { products, categories, checkouts, product_index, category_index })
    }

    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[inline]
    pub fn product(&self, idx: ProductIdx) -> &Product {
        &self.products[idx.0]
    }

    pub fn product_indices(&self) -> impl Iterator<Item = ProductIdx> {
        (0..self.products.len()).map(ProductIdx)
    }

    pub fn product_idx(&self, id: ProductId) -> Option<ProductIdx> {
        self.product_index.get(&id).copied()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, idx: CategoryIdx) -> &Category {
        &self.categories[idx.0]
    }

    pub fn category_idx(&self, id: CategoryId) -> Option<CategoryIdx> {
        self.category_index.get(&id).copied()
    }

    #[inline]
    pub fn checkouts(&self) -> &[CheckoutSpec] {
        &self.checkouts
    }

    #[inline]
    pub fn checkout(&self, idx: LaneIdx) -> &CheckoutSpec {
        &self.checkouts[idx.0]
    }
}
