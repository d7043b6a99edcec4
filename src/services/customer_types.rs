//! Customer type model
//!
//! Holds the behavioral profile of each customer type and its compiled
//! interest table. Interests are resolved once per (type, product): a
//! product-level entry wins, otherwise the entry of the product's category
//! is used. A type that covers neither is rejected before the run starts,
//! so the tick loop can index the table without checks.
//!
//! Type selection draws a pointer in [0, 100) and picks the smallest
//! cumulative integer breakpoint of `floor(frequency * 100)` at or above it.

use rand::Rng;

use crate::domain::catalog::Catalog;
use crate::domain::error::ValidationError;
use crate::domain::input::CustomerTypeInput;
use crate::domain::types::{CustomerTypeId, EntityKind, ProductIdx, TypeIdx};

/// Allowed deviation of the frequency sum from 1
pub const FREQUENCY_TOLERANCE: f64 = 1e-6;

/// Longest patience a customer type may declare (minutes)
pub const MAX_PATIENCE: i64 = 100;

/// Resolution of the type-selection pointer
const SELECTION_SLOTS: u32 = 100;

#[derive(Debug, Clone)]
pub struct CustomerType {
    pub id: CustomerTypeId,
    pub name: String,
    pub frequency: f64,
    pub impulsivity: f64,
    pub patience: u32,
    /// Compiled interest, indexed by `ProductIdx`
    interests: Vec<f64>,
}

fn check_unit_range(what: String, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange { what, value, min: 0.0, max: 1.0 });
    }
    Ok(())
}

impl CustomerType {
    /// Validate one raw customer type and compile its interest table
    pub fn compile(raw: &CustomerTypeInput, catalog: &Catalog) -> Result<Self, ValidationError> {
        check_unit_range(format!("frequency of customer type '{}'", raw.name), raw.frequency)?;
        check_unit_range(format!("impulsivity of customer type '{}'", raw.name), raw.impulsivity)?;
        if !(0..=MAX_PATIENCE).contains(&raw.patience) {
            return Err(ValidationError::OutOfRange {
                what: format!("patience of customer type '{}'", raw.name),
                value: raw.patience as f64,
                min: 0.0,
                max: MAX_PATIENCE as f64,
            });
        }
        for (product, &interest) in &raw.interests {
            check_unit_range(
                format!("interest of customer type '{}' in product {}", raw.name, product),
                interest,
            )?;
        }
        for (category, &interest) in &raw.category_interests {
            check_unit_range(
                format!("interest of customer type '{}' in category {}", raw.name, category),
                interest,
            )?;
        }

        let interests = catalog
            .products()
            .iter()
            .map(|product| {
                raw.interests
                    .get(&product.id.0)
                    .or_else(|| {
                        let category = catalog.category(product.category?);
                        raw.category_interests.get(&category.id.0)
                    })
                    .copied()
                    .ok_or_else(|| ValidationError::MissingInterest {
                        customer_type: raw.name.clone(),
                        product: product.id.0,
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(Self {
            id: CustomerTypeId(raw.id),
            name: raw.name.clone(),
            frequency: raw.frequency,
            impulsivity: raw.impulsivity,
            patience: raw.patience as u32,
            interests,
        })
    }

    #[inline]
    pub fn interest(&self, product: ProductIdx) -> f64 {
        self.interests[product.0]
    }

    pub fn interests(&self) -> &[f64] {
        &self.interests
    }
}

/// All customer types plus the precomputed selection breakpoints
#[derive(Debug, Clone)]
pub struct CustomerTypeModel {
    types: Vec<CustomerType>,
    /// Cumulative `floor(frequency * 100)` in catalog order
    breakpoints: Vec<u32>,
}

impl CustomerTypeModel {
    pub fn from_input(raw: &[CustomerTypeInput], catalog: &Catalog) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::Empty(EntityKind::CustomerType));
        }

        let mut seen = rustc_hash::FxHashSet::default();
        let mut types = Vec::with_capacity(raw.len());
        for entry in raw {
            if entry.id <= 0 {
                return Err(ValidationError::NonPositiveId { kind: EntityKind::CustomerType, id: entry.id });
            }
            if !seen.insert(entry.id) {
                return Err(ValidationError::DuplicateId { kind: EntityKind::CustomerType, id: entry.id });
            }
            types.push(CustomerType::compile(entry, catalog)?);
        }

        let sum: f64 = types.iter().map(|t| t.frequency).sum();
        if (sum - 1.0).abs() > FREQUENCY_TOLERANCE {
            return Err(ValidationError::FrequencySum { sum });
        }

        let mut cumulative = 0u32;
        let breakpoints = types
            .iter()
            .map(|t| {
                // The tolerance keeps 0.29 * 100 = 28.999... from flooring to 28
                cumulative += (t.frequency * SELECTION_SLOTS as f64 + FREQUENCY_TOLERANCE).floor() as u32;
                cumulative
            })
            .collect();

        Ok(Self { types, breakpoints })
    }

    /// Pick a customer type in proportion to its frequency
    ///
    /// The chosen type has the smallest breakpoint `>= pointer`. A type whose
    /// floored share is 0 repeats the previous breakpoint and is skipped.
    /// When flooring leaves the breakpoints short of 100 and the pointer
    /// lands in the gap, the last type in catalog order is chosen.
    pub fn select_random(&self, rng: &mut impl Rng) -> TypeIdx {
        let pointer = rng.gen_range(0..SELECTION_SLOTS);
        TypeIdx(self.type_for_pointer(pointer))
    }

    fn type_for_pointer(&self, pointer: u32) -> usize {
        let mut previous = 0;
        self.breakpoints
            .iter()
            .enumerate()
            .find_map(|(idx, &breakpoint)| {
                let share = breakpoint - previous;
                previous = breakpoint;
                (share > 0 && pointer <= breakpoint).then_some(idx)
            })
            .unwrap_or(self.types.len() - 1)
    }

    #[inline]
    pub fn get(&self, idx: TypeIdx) -> &CustomerType {
        &self.types[idx.0]
    }

    pub fn types(&self) -> &[CustomerType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
