//! Deviation calendar - per-day interest overrides
//!
//! An override replaces the compiled interest of one product for one day.
//! It is an absolute value, not a multiplier: a promotion day that sets
//! milk to 0.9 means every customer spawned that day wants milk with
//! probability 0.9, whatever their type would normally say.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::domain::catalog::Catalog;
use crate::domain::error::ValidationError;
use crate::domain::input::CalendarInput;
use crate::domain::types::{ProductId, ProductIdx};

/// Overrides in effect for a single day, indexed by `ProductIdx`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayDeviations {
    overrides: Vec<Option<f64>>,
}

impl DayDeviations {
    #[inline]
    pub fn override_for(&self, product: ProductIdx) -> Option<f64> {
        self.overrides.get(product.0).copied().flatten()
    }

    /// Interest to use for `product` given its compiled value
    #[inline]
    pub fn resolve(&self, product: ProductIdx, compiled: f64) -> f64 {
        self.override_for(product).unwrap_or(compiled)
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.iter().all(Option::is_none)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviationCalendar {
    days: FxHashMap<u32, DayDeviations>,
    /// Returned for days without an entry
    none: DayDeviations,
}

impl DeviationCalendar {
    pub fn from_input(raw: &CalendarInput, catalog: &Catalog, days: u32) -> Result<Self, ValidationError> {
        let mut calendar = FxHashMap::default();

        for (&day, entries) in &raw.deviations {
            let mut overrides = vec![None; catalog.products().len()];
            for (&product, &interest) in entries {
                let idx = catalog
                    .product_idx(ProductId(product))
                    .ok_or(ValidationError::UnknownDeviationProduct { day, product })?;
                if !(0.0..=1.0).contains(&interest) {
                    return Err(ValidationError::OutOfRange {
                        what: format!("deviation for product {} on day {}", product, day),
                        value: interest,
                        min: 0.0,
                        max: 1.0,
                    });
                }
                overrides[idx.0] = Some(interest);
            }

            if day >= days {
                warn!(day = %day, days = %days, "calendar_day_outside_run");
            }
            calendar.insert(day, DayDeviations { overrides });
        }

        Ok(Self { days: calendar, none: DayDeviations::default() })
    }

    /// Overrides for `day`, empty when the calendar has no entry
    #[inline]
    pub fn for_day(&self, day: u32) -> &DayDeviations {
        self.days.get(&day).unwrap_or(&self.none)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::{CheckoutInput, ProductInput, SimulationInput};
    use std::collections::{BTreeMap, HashMap};

    fn catalog() -> Catalog {
        let input = SimulationInput {
            days: 3,
            customers_per_hour: 10,
            products: (1..=3)
                .map(|id| ProductInput { id, name: format!("p{}", id), price: 10, category_id: None })
                .collect(),
            categories: Vec::new(),
            customer_types: Vec::new(),
            checkouts: vec![CheckoutInput { id: 1, capacity: 10, human_cost: 1, technical_cost: 1 }],
            calendar: Default::default(),
        };
        Catalog::from_input(&input).unwrap()
    }

    fn raw(entries: &[(u32, i64, f64)]) -> CalendarInput {
        let mut deviations: BTreeMap<u32, HashMap<i64, f64>> = BTreeMap::new();
        for &(day, product, interest) in entries {
            deviations.entry(day).or_default().insert(product, interest);
        }
        CalendarInput { deviations }
    }

    #[test]
    fn test_override_is_absolute() {
        let calendar = DeviationCalendar::from_input(&raw(&[(1, 2, 0.9), (1, 3, 0.0)]), &catalog(), 3).unwrap();
        let day = calendar.for_day(1);

        assert_eq!(day.resolve(ProductIdx(1), 0.2), 0.9);
        assert_eq!(day.resolve(ProductIdx(2), 0.7), 0.0);
        assert_eq!(day.resolve(ProductIdx(0), 0.4), 0.4);
    }

    #[test]
    fn test_day_without_entry_has_no_overrides() {
        let calendar = DeviationCalendar::from_input(&raw(&[(1, 2, 0.9)]), &catalog(), 3).unwrap();

        assert!(calendar.for_day(0).is_empty());
        assert!(calendar.for_day(2).is_empty());
        assert_eq!(calendar.for_day(0).resolve(ProductIdx(1), 0.2), 0.2);
        assert!(!calendar.for_day(1).is_empty());
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let result = DeviationCalendar::from_input(&raw(&[(0, 42, 0.5)]), &catalog(), 3);
        assert_eq!(result.unwrap_err(), ValidationError::UnknownDeviationProduct { day: 0, product: 42 });
    }

    #[test]
    fn test_out_of_range_override_is_rejected() {
        let result = DeviationCalendar::from_input(&raw(&[(0, 1, 1.2)]), &catalog(), 3);
        assert!(matches!(result, Err(ValidationError::OutOfRange { value, .. }) if value == 1.2));
    }

    #[test]
    fn test_day_outside_run_is_kept() {
        let calendar = DeviationCalendar::from_input(&raw(&[(10, 1, 0.5)]), &catalog(), 3).unwrap();
        assert_eq!(calendar.for_day(10).override_for(ProductIdx(0)), Some(0.5));
    }
}
