//! Shopping engine - basket construction and in-store customer advancement
//!
//! At spawn a customer snapshots its interests for the day (compiled value
//! or calendar override) and draws its shopping list from them, one draw
//! per product in catalog order.
//!
//! Each tick a shopping customer either waits out its pick cooldown, moves
//! to a checkout once the list is empty, or picks the next product (plus,
//! with probability `impulsivity`, one random product).

use rand::Rng;
use tracing::debug;

use crate::domain::catalog::Catalog;
use crate::domain::customer::{Customer, PickSource};
use crate::domain::types::{ProductIdx, TypeIdx};
use crate::services::calendar::DayDeviations;
use crate::services::checkout_pool::CheckoutPool;
use crate::services::customer_types::CustomerType;
use crate::services::stats::{StatsAggregator, TickSummary};

/// Minutes a customer spends finding the next product
pub const DEFAULT_PICK_COOLDOWN_MINUTES: u32 = 3;

/// Outcome of advancing one shopping customer by a minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoppingStep {
    /// Still deciding / walking to the next product
    Browsing,
    Picked { impulse: bool },
    /// List done, heading to the checkouts
    ReadyToQueue,
}

#[derive(Debug, Clone)]
pub struct ShoppingEngine {
    pick_cooldown: u32,
}

impl Default for ShoppingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PICK_COOLDOWN_MINUTES)
    }
}

impl ShoppingEngine {
    pub fn new(pick_cooldown: u32) -> Self {
        Self { pick_cooldown }
    }

    /// Create a customer of `type_idx` with a freshly drawn shopping list
    pub fn spawn(
        &self,
        type_idx: TypeIdx,
        customer_type: &CustomerType,
        catalog: &Catalog,
        deviations: &DayDeviations,
        rng: &mut impl Rng,
    ) -> Customer {
        let interests: Vec<f64> = catalog
            .product_indices()
            .map(|product| deviations.resolve(product, customer_type.interest(product)))
            .collect();

        let shopping_list: Vec<ProductIdx> = catalog
            .product_indices()
            .filter(|product| rng.gen_bool(interests[product.0]))
            .collect();

        let customer = Customer::new(
            type_idx,
            interests,
            customer_type.impulsivity,
            customer_type.patience,
            shopping_list,
        );

        debug!(
            customer_type = %customer_type.id,
            list_len = %customer.shopping_list().len(),
            expected_items = %format!("{:.2}", customer.expected_items()),
            "customer_spawned"
        );
        customer
    }

    /// Advance one shopping customer by a minute
    pub fn step(&self, customer: &mut Customer, catalog: &Catalog, rng: &mut impl Rng) -> ShoppingStep {
        customer.time_in_store += 1;

        if customer.cooldown > 0 {
            customer.cooldown -= 1;
            return ShoppingStep::Browsing;
        }

        let Some(product) = customer.next_from_list() else {
            return ShoppingStep::ReadyToQueue;
        };
        customer.put_in_cart(product, PickSource::ShoppingList);

        let impulse = rng.gen_bool(customer.impulsivity);
        if impulse {
            let extra = ProductIdx(rng.gen_range(0..catalog.products().len()));
            customer.put_in_cart(extra, PickSource::Impulse);
        }

        customer.cooldown = self.pick_cooldown;
        ShoppingStep::Picked { impulse }
    }

    /// Advance every customer in the roster; finished shoppers move to a checkout
    ///
    /// The roster keeps its order. A customer handed to the pool is moved out
    /// of the roster in the same pass.
    pub fn advance(
        &self,
        roster: &mut Vec<Customer>,
        pool: &mut CheckoutPool,
        catalog: &Catalog,
        stats: &mut StatsAggregator,
        rng: &mut impl Rng,
        summary: &mut TickSummary,
    ) {
        let mut still_shopping = Vec::with_capacity(roster.len());

        for mut customer in roster.drain(..) {
            match self.step(&mut customer, catalog, rng) {
                ShoppingStep::Browsing => still_shopping.push(customer),
                ShoppingStep::Picked { impulse } => {
                    summary.list_picks += 1;
                    if impulse {
                        summary.impulse_picks += 1;
                    }
                    still_shopping.push(customer);
                }
                ShoppingStep::ReadyToQueue => {
                    pool.assign(customer, stats);
                    summary.queued += 1;
                }
            }
        }

        *roster = still_shopping;
    }
}
