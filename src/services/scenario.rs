//! Validated, immutable run configuration
//!
//! Built once from `SimulationInput`; every ID has been resolved to a dense
//! index and every range checked, so the engine never re-validates.

use crate::domain::catalog::Catalog;
use crate::domain::error::ValidationError;
use crate::domain::input::SimulationInput;
use crate::services::calendar::DeviationCalendar;
use crate::services::customer_types::CustomerTypeModel;

#[derive(Debug, Clone)]
pub struct Scenario {
    days: u32,
    customers_per_hour: u32,
    catalog: Catalog,
    customer_types: CustomerTypeModel,
    calendar: DeviationCalendar,
}

impl Scenario {
    pub fn from_input(input: &SimulationInput) -> Result<Self, ValidationError> {
        let days = u32::try_from(input.days)
            .ok()
            .filter(|&days| days > 0)
            .ok_or(ValidationError::NonPositiveDays(input.days))?;
        let customers_per_hour = u32::try_from(input.customers_per_hour)
            .ok()
            .filter(|&cph| cph > 0)
            .ok_or(ValidationError::NonPositiveArrivalRate(input.customers_per_hour))?;

        let catalog = Catalog::from_input(input)?;
        let customer_types = CustomerTypeModel::from_input(&input.customer_types, &catalog)?;
        let calendar = DeviationCalendar::from_input(&input.calendar, &catalog, days)?;

        Ok(Self { days, customers_per_hour, catalog, customer_types, calendar })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn customers_per_hour(&self) -> u32 {
        self.customers_per_hour
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn customer_types(&self) -> &CustomerTypeModel {
        &self.customer_types
    }

    pub fn calendar(&self) -> &DeviationCalendar {
        &self.calendar
    }
}
