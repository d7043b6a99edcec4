//! Run summary - ratios derived from a finished result
//!
//! Nothing here is stored in `OutputData`; every value is computed from its
//! counters. A ratio whose denominator is zero is reported as 0.

use std::fmt;

use tracing::info;

use crate::domain::output::OutputData;
use crate::domain::types::CheckoutId;

#[derive(Debug, Clone, PartialEq)]
pub struct LaneSummary {
    pub id: CheckoutId,
    pub transactions: u64,
    pub max_queue_length: u64,
    /// Transactions per open hour divided by capacity
    pub utilization: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub visits: u64,
    pub transactions: u64,
    pub reneged: u64,
    pub remaining_at_close: u64,
    pub open_hours: f64,
    pub conversion_rate: f64,
    pub renege_rate: f64,
    pub avg_basket_size: f64,
    pub avg_time_in_store: f64,
    pub avg_ticket: f64,
    pub net_result: i64,
    pub lanes: Vec<LaneSummary>,
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Summary {
    pub fn from_output(output: &OutputData) -> Self {
        let open_hours = output.simulated_minutes as f64 / 60.0;

        let lanes = output
            .checkout_output
            .iter()
            .map(|(&id, lane)| {
                let per_hour = if open_hours > 0.0 { lane.transactions as f64 / open_hours } else { 0.0 };
                LaneSummary {
                    id,
                    transactions: lane.transactions,
                    max_queue_length: lane.max_queue_length,
                    utilization: if lane.capacity > 0 { per_hour / lane.capacity as f64 } else { 0.0 },
                }
            })
            .collect();

        Self {
            visits: output.times_visited,
            transactions: output.transactions,
            reneged: output.reneged,
            remaining_at_close: output.remaining_at_close,
            open_hours,
            conversion_rate: ratio(output.transactions, output.times_visited),
            renege_rate: ratio(output.reneged, output.times_visited),
            avg_basket_size: ratio(output.products_purchased, output.transactions),
            avg_time_in_store: ratio(output.total_time_in_store, output.transactions),
            avg_ticket: ratio(output.profits, output.transactions),
            net_result: output.profits as i64 - output.op_costs as i64,
            lanes,
        }
    }

    /// Emit the summary as one structured event
    pub fn log(&self) {
        info!(
            visits = %self.visits,
            transactions = %self.transactions,
            reneged = %self.reneged,
            remaining_at_close = %self.remaining_at_close,
            conversion_rate = format!("{:.3}", self.conversion_rate),
            renege_rate = format!("{:.3}", self.renege_rate),
            avg_basket = format!("{:.2}", self.avg_basket_size),
            avg_time_min = format!("{:.1}", self.avg_time_in_store),
            avg_ticket = format!("{:.2}", self.avg_ticket),
            net_result = %self.net_result,
            "run_summary"
        );
        for lane in &self.lanes {
            info!(
                checkout = %lane.id,
                transactions = %lane.transactions,
                max_queue = %lane.max_queue_length,
                utilization = format!("{:.3}", lane.utilization),
                "lane_summary"
            );
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "visits             {}", self.visits)?;
        writeln!(f, "transactions       {}", self.transactions)?;
        writeln!(f, "reneged            {}", self.reneged)?;
        writeln!(f, "remaining at close {}", self.remaining_at_close)?;
        writeln!(f, "open hours         {:.1}", self.open_hours)?;
        writeln!(f, "conversion rate    {:.1}%", self.conversion_rate * 100.0)?;
        writeln!(f, "renege rate        {:.1}%", self.renege_rate * 100.0)?;
        writeln!(f, "avg basket         {:.2} items", self.avg_basket_size)?;
        writeln!(f, "avg time in store  {:.1} min", self.avg_time_in_store)?;
        writeln!(f, "avg ticket         {:.2}", self.avg_ticket)?;
        writeln!(f, "net result         {}", self.net_result)?;
        writeln!(f)?;
        writeln!(f, "{:>8} {:>12} {:>9} {:>11}", "checkout", "transactions", "max queue", "utilization")?;
        for lane in &self.lanes {
            writeln!(
                f,
                "{:>8} {:>12} {:>9} {:>10.1}%",
                lane.id,
                lane.transactions,
                lane.max_queue_length,
                lane.utilization * 100.0
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::output::CheckoutOutput;
    use std::collections::BTreeMap;

    fn output() -> OutputData {
        OutputData {
            times_visited: 50,
            transactions: 40,
            products_purchased: 120,
            total_time_in_store: 800,
            profits: 6000,
            op_costs: 7000,
            reneged: 6,
            remaining_at_close: 4,
            simulated_minutes: 480,
            checkout_output: BTreeMap::from([
                (CheckoutId(1), CheckoutOutput { transactions: 30, capacity: 10, ..Default::default() }),
                (CheckoutId(2), CheckoutOutput { transactions: 10, capacity: 5, ..Default::default() }),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_ratios() {
        let summary = Summary::from_output(&output());

        assert_eq!(summary.conversion_rate, 0.8);
        assert_eq!(summary.renege_rate, 0.12);
        assert_eq!(summary.avg_basket_size, 3.0);
        assert_eq!(summary.avg_time_in_store, 20.0);
        assert_eq!(summary.avg_ticket, 150.0);
        assert_eq!(summary.net_result, -1000);
        assert_eq!(summary.open_hours, 8.0);
    }

    #[test]
    fn test_lane_utilization() {
        let summary = Summary::from_output(&output());

        assert_eq!(summary.lanes.len(), 2);
        assert_eq!(summary.lanes[0].id, CheckoutId(1));
        assert_eq!(summary.lanes[0].utilization, 30.0 / 8.0 / 10.0);
        assert_eq!(summary.lanes[1].utilization, 10.0 / 8.0 / 5.0);
    }

    #[test]
    fn test_empty_run_has_zero_ratios() {
        let summary = Summary::from_output(&OutputData::default());

        assert_eq!(summary.conversion_rate, 0.0);
        assert_eq!(summary.avg_ticket, 0.0);
        assert_eq!(summary.net_result, 0);
        assert!(summary.lanes.is_empty());
    }

    #[test]
    fn test_display_lists_lanes() {
        let text = Summary::from_output(&output()).to_string();
        assert!(text.contains("conversion rate    80.0%"));
        assert_eq!(text.lines().filter(|line| line.trim_start().starts_with('1')).count(), 1);
    }
}
