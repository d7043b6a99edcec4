//! Statistics aggregation
//!
//! Counters are updated as events happen during a tick and only ever grow.
//! Per-entity counters live in vectors indexed by the dense catalog index,
//! so recording never fails on a missing key. The ID-keyed `OutputData`
//! maps are built once, in `into_output`.
//!
//! Ratios (conversion, averages) are not kept here; see `infra::summary`.

use crate::domain::catalog::Catalog;
use crate::domain::customer::{CartItem, Customer, PickSource};
use crate::domain::output::{CheckoutOutput, CustomerTypeOutput, OutputData, ProductOutput};
use crate::domain::types::{LaneIdx, TypeIdx};
use crate::services::checkout_pool::LaneCost;
use crate::services::customer_types::CustomerTypeModel;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutStats {
    pub profits: u64,
    pub transactions: u64,
    pub items_scanned: u64,
    pub reneged: u64,
    pub max_queue_length: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductStats {
    pub amount_sold: u64,
    pub sold_by_shopping_list: u64,
    pub sold_by_impulse: u64,
    pub amount_abandoned: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerTypeStats {
    pub visits: u64,
    pub transactions: u64,
    pub total_products_purchased: u64,
    pub total_time_in_store: u64,
    pub total_profit: u64,
    pub reneged: u64,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub day: u32,
    pub minute: u32,
    pub arrivals: u32,
    pub list_picks: u32,
    pub impulse_picks: u32,
    /// Customers that joined a checkout queue
    pub queued: u32,
    /// Items popped from carts at the checkouts
    pub items_scanned: u32,
    pub list_sales: u32,
    pub impulse_sales: u32,
    pub transactions: u32,
    pub reneged: u32,
}

impl TickSummary {
    pub fn new(day: u32, minute: u32) -> Self {
        Self { day, minute, ..Default::default() }
    }

    pub fn is_quiet(&self) -> bool {
        self.arrivals == 0
            && self.list_picks == 0
            && self.impulse_picks == 0
            && self.queued == 0
            && self.items_scanned == 0
            && self.transactions == 0
            && self.reneged == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    times_visited: u64,
    transactions: u64,
    products_purchased: u64,
    total_time_in_store: u64,
    profits: u64,
    reneged: u64,
    checkouts: Vec<CheckoutStats>,
    products: Vec<ProductStats>,
    customer_types: Vec<CustomerTypeStats>,
}

impl StatsAggregator {
    pub fn new(products: usize, customer_types: usize, lanes: usize) -> Self {
        Self {
            checkouts: vec![CheckoutStats::default(); lanes],
            products: vec![ProductStats::default(); products],
            customer_types: vec![CustomerTypeStats::default(); customer_types],
            ..Default::default()
        }
    }

    #[inline]
    pub fn record_visit(&mut self, customer_type: TypeIdx) {
        self.times_visited += 1;
        self.customer_types[customer_type.0].visits += 1;
    }

    #[inline]
    pub fn record_queue_length(&mut self, lane: LaneIdx, len: usize) {
        let stats = &mut self.checkouts[lane.0];
        stats.max_queue_length = stats.max_queue_length.max(len as u64);
    }

    /// One item scanned at `lane`
    pub fn record_sale(&mut self, lane: LaneIdx, customer_type: TypeIdx, item: CartItem, price: u64) {
        self.profits += price;
        self.products_purchased += 1;

        let checkout = &mut self.checkouts[lane.0];
        checkout.profits += price;
        checkout.items_scanned += 1;

        let product = &mut self.products[item.product.0];
        product.amount_sold += 1;
        match item.source {
            PickSource::ShoppingList => product.sold_by_shopping_list += 1,
            PickSource::Impulse => product.sold_by_impulse += 1,
        }

        let ty = &mut self.customer_types[customer_type.0];
        ty.total_profit += price;
        ty.total_products_purchased += 1;
    }

    /// Customer paid and left through `lane`
    pub fn record_transaction(&mut self, lane: LaneIdx, customer: &Customer) {
        let time_in_store = u64::from(customer.time_in_store);
        self.transactions += 1;
        self.total_time_in_store += time_in_store;
        self.checkouts[lane.0].transactions += 1;

        let ty = &mut self.customer_types[customer.customer_type.0];
        ty.transactions += 1;
        ty.total_time_in_store += time_in_store;
    }

    /// Customer gave up waiting at `lane`; whatever is left in the cart is abandoned
    pub fn record_renege(&mut self, lane: LaneIdx, customer: &Customer) {
        self.reneged += 1;
        self.checkouts[lane.0].reneged += 1;
        self.customer_types[customer.customer_type.0].reneged += 1;
        for item in customer.cart() {
            self.products[item.product.0].amount_abandoned += 1;
        }
    }

    pub fn times_visited(&self) -> u64 {
        self.times_visited
    }

    pub fn transactions(&self) -> u64 {
        self.transactions
    }

    pub fn products_purchased(&self) -> u64 {
        self.products_purchased
    }

    pub fn profits(&self) -> u64 {
        self.profits
    }

    pub fn reneged(&self) -> u64 {
        self.reneged
    }

    pub fn checkout(&self, lane: LaneIdx) -> &CheckoutStats {
        &self.checkouts[lane.0]
    }

    pub fn products(&self) -> &[ProductStats] {
        &self.products
    }

    pub fn customer_type(&self, customer_type: TypeIdx) -> &CustomerTypeStats {
        &self.customer_types[customer_type.0]
    }

    /// Build the ID-keyed result
    pub fn into_output(
        self,
        catalog: &Catalog,
        customer_types: &CustomerTypeModel,
        costs: &[LaneCost],
        remaining_at_close: u64,
        simulated_minutes: u64,
    ) -> OutputData {
        let checkout_output = catalog
            .checkouts()
            .iter()
            .zip(self.checkouts)
            .zip(costs)
            .map(|((checkout, stats), cost)| {
                let output = CheckoutOutput {
                    profits: stats.profits,
                    technical_cost: cost.technical,
                    human_cost: cost.human,
                    transactions: stats.transactions,
                    items_scanned: stats.items_scanned,
                    reneged: stats.reneged,
                    max_queue_length: stats.max_queue_length,
                    capacity: checkout.capacity,
                };
                (checkout.id, output)
            })
            .collect();

        let product_output = catalog
            .products()
            .iter()
            .zip(self.products)
            .map(|(product, stats)| {
                let output = ProductOutput {
                    name: product.name.clone(),
                    price: product.price,
                    amount_sold: stats.amount_sold,
                    sold_by_shopping_list: stats.sold_by_shopping_list,
                    sold_by_impulse: stats.sold_by_impulse,
                    amount_abandoned: stats.amount_abandoned,
                };
                (product.id, output)
            })
            .collect();

        let customer_type_output = customer_types
            .types()
            .iter()
            .zip(self.customer_types)
            .map(|(ty, stats)| {
                let output = CustomerTypeOutput {
                    visits: stats.visits,
                    transactions: stats.transactions,
                    total_products_purchased: stats.total_products_purchased,
                    total_time_in_store: stats.total_time_in_store,
                    total_profit: stats.total_profit,
                    reneged: stats.reneged,
                };
                (ty.id, output)
            })
            .collect();

        OutputData {
            times_visited: self.times_visited,
            transactions: self.transactions,
            products_purchased: self.products_purchased,
            total_time_in_store: self.total_time_in_store,
            profits: self.profits,
            op_costs: costs.iter().map(LaneCost::total).sum(),
            reneged: self.reneged,
            remaining_at_close,
            simulated_minutes,
            checkout_output,
            product_output,
            customer_type_output,
        }
    }
}
