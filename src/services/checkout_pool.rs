//! Checkout lanes, queue assignment and per-tick service
//!
//! Each lane is a FIFO queue. Per tick and per non-empty lane:
//! - every member except the head waits one more minute; a member whose
//!   wait reaches its patience reneges
//! - the head either hands over one item (one item per minute) or, with an
//!   empty cart, pays and leaves
//!
//! Reneging members are collected during the scan and removed afterwards,
//! back to front, so the scan never observes a queue that changed under it.

use std::collections::VecDeque;

use tracing::debug;

use crate::domain::catalog::Catalog;
use crate::domain::customer::{Customer, CustomerPhase, PickSource};
use crate::domain::types::LaneIdx;
use crate::services::stats::{StatsAggregator, TickSummary};

/// Operating cost of one lane over the whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneCost {
    pub human: u64,
    pub technical: u64,
}

impl LaneCost {
    #[inline]
    pub fn total(&self) -> u64 {
        self.human + self.technical
    }
}

/// `(humanCost, technicalCost) * operating_hours_per_day * days` for each lane
pub fn operating_costs(catalog: &Catalog, operating_hours_per_day: u32, days: u32) -> Vec<LaneCost> {
    let hours = u64::from(operating_hours_per_day) * u64::from(days);
    catalog
        .checkouts()
        .iter()
        .map(|checkout| LaneCost { human: checkout.human_cost * hours, technical: checkout.technical_cost * hours })
        .collect()
}

#[derive(Debug, Default)]
struct CheckoutLane {
    queue: VecDeque<Customer>,
}

#[derive(Debug)]
pub struct CheckoutPool {
    lanes: Vec<CheckoutLane>,
}

impl CheckoutPool {
    pub fn new(lane_count: usize) -> Self {
        Self { lanes: (0..lane_count).map(|_| CheckoutLane::default()).collect() }
    }

    /// Lane with the shortest queue; ties go to the lane listed first
    pub fn least_loaded(&self) -> LaneIdx {
        let idx = self
            .lanes
            .iter()
            .enumerate()
            .min_by_key(|(_, lane)| lane.queue.len())
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        LaneIdx(idx)
    }

    /// Put a customer at the back of the least loaded lane
    pub fn assign(&mut self, mut customer: Customer, stats: &mut StatsAggregator) -> LaneIdx {
        let lane_idx = self.least_loaded();
        customer.set_phase(CustomerPhase::Queued);

        let lane = &mut self.lanes[lane_idx.0];
        lane.queue.push_back(customer);
        stats.record_queue_length(lane_idx, lane.queue.len());

        debug!(lane = %lane_idx.0, queue_len = %lane.queue.len(), "customer_queued");
        lane_idx
    }

    /// Advance every lane by one minute
    pub fn advance(&mut self, catalog: &Catalog, stats: &mut StatsAggregator, summary: &mut TickSummary) {
        for (idx, lane) in self.lanes.iter_mut().enumerate() {
            if lane.queue.is_empty() {
                continue;
            }
            let lane_idx = LaneIdx(idx);

            for customer in lane.queue.iter_mut() {
                customer.time_in_store += 1;
            }

            let mut leaving = Vec::new();
            for (pos, customer) in lane.queue.iter_mut().enumerate().skip(1) {
                customer.minutes_in_queue += 1;
                if customer.minutes_in_queue >= customer.patience {
                    leaving.push(pos);
                }
            }
            for pos in leaving.into_iter().rev() {
                if let Some(mut customer) = lane.queue.remove(pos) {
                    customer.set_phase(CustomerPhase::Reneged);
                    stats.record_renege(lane_idx, &customer);
                    summary.reneged += 1;
                    debug!(
                        lane = %idx,
                        phase = %customer.phase().as_str(),
                        minutes_in_queue = %customer.minutes_in_queue,
                        abandoned_items = %customer.cart().len(),
                        "customer_reneged"
                    );
                }
            }

            let Some(head) = lane.queue.front_mut() else {
                continue;
            };
            match head.take_from_cart() {
                Some(item) => {
                    head.set_phase(CustomerPhase::Served);
                    let price = catalog.product(item.product).price;
                    stats.record_sale(lane_idx, head.customer_type, item, price);
                    summary.items_scanned += 1;
                    match item.source {
                        PickSource::ShoppingList => summary.list_sales += 1,
                        PickSource::Impulse => summary.impulse_sales += 1,
                    }
                }
                None => {
                    if let Some(mut customer) = lane.queue.pop_front() {
                        customer.set_phase(CustomerPhase::Departed);
                        stats.record_transaction(lane_idx, &customer);
                        summary.transactions += 1;
                        debug!(
                            lane = %idx,
                            phase = %customer.phase().as_str(),
                            time_in_store = %customer.time_in_store,
                            "customer_departed"
                        );
                    }
                }
            }
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn queue_len(&self, lane: LaneIdx) -> usize {
        self.lanes[lane.0].queue.len()
    }

    /// Customers waiting in all lanes
    pub fn total_queued(&self) -> usize {
        self.lanes.iter().map(|lane| lane.queue.len()).sum()
    }

    pub fn queue(&self, lane: LaneIdx) -> impl Iterator<Item = &Customer> {
        self.lanes[lane.0].queue.iter()
    }
}
