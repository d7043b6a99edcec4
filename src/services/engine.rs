//! Simulation clock and tick loop
//!
//! Runs `days` x `operating_hours_per_day * 60` one-minute ticks. Every tick:
//! 1. at most one arrival (probability `min(1, customersPerHour / 60)`)
//! 2. shopping customers advance, finished ones join a checkout
//! 3. checkout lanes advance
//!
//! The engine owns the single random generator; every random decision of a
//! run draws from it, so a seed fully determines the output.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, info_span, trace, warn};
use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::error::RunError;
use crate::domain::output::OutputData;
use crate::services::checkout_pool::{operating_costs, CheckoutPool};
use crate::services::scenario::Scenario;
use crate::services::shopping::{ShoppingEngine, DEFAULT_PICK_COOLDOWN_MINUTES};
use crate::services::stats::{StatsAggregator, TickSummary};

pub const DEFAULT_OPERATING_HOURS_PER_DAY: u32 = 8;

const MINUTES_PER_HOUR: u32 = 60;

/// Per-run knobs that are not part of the store description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub seed: u64,
    pub operating_hours_per_day: u32,
    pub pick_cooldown_minutes: u32,
}

impl EngineSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            operating_hours_per_day: DEFAULT_OPERATING_HOURS_PER_DAY,
            pick_cooldown_minutes: DEFAULT_PICK_COOLDOWN_MINUTES,
        }
    }
}

/// Chance of one arrival in a single minute
pub fn arrival_probability(customers_per_hour: u32) -> f64 {
    (f64::from(customers_per_hour) / f64::from(MINUTES_PER_HOUR)).min(1.0)
}

pub struct Engine {
    scenario: Scenario,
    settings: EngineSettings,
    rng: ChaCha8Rng,
    shopping: ShoppingEngine,
    pool: CheckoutPool,
    /// Customers still shopping
    roster: Vec<Customer>,
    stats: StatsAggregator,
    arrival_probability: f64,
    ticks: u64,
}

impl Engine {
    pub fn new(scenario: Scenario, settings: EngineSettings) -> Self {
        let customers_per_hour = scenario.customers_per_hour();
        if customers_per_hour > MINUTES_PER_HOUR {
            warn!(
                customers_per_hour = %customers_per_hour,
                max = %MINUTES_PER_HOUR,
                "arrival_rate_saturated"
            );
        }

        let catalog = scenario.catalog();
        let stats = StatsAggregator::new(
            catalog.products().len(),
            scenario.customer_types().len(),
            catalog.checkouts().len(),
        );
        let pool = CheckoutPool::new(catalog.checkouts().len());

        Self {
            arrival_probability: arrival_probability(customers_per_hour),
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            shopping: ShoppingEngine::new(settings.pick_cooldown_minutes),
            pool,
            roster: Vec::new(),
            stats,
            ticks: 0,
            scenario,
            settings,
        }
    }

    pub fn minutes_per_day(&self) -> u32 {
        self.settings.operating_hours_per_day * MINUTES_PER_HOUR
    }

    /// Run one tick at (`day`, `minute`)
    pub fn step(&mut self, day: u32, minute: u32) -> TickSummary {
        let mut summary = TickSummary::new(day, minute);
        let catalog = self.scenario.catalog();
        let customer_types = self.scenario.customer_types();
        let deviations = self.scenario.calendar().for_day(day);

        if self.rng.gen_bool(self.arrival_probability) {
            let type_idx = customer_types.select_random(&mut self.rng);
            let customer =
                self.shopping
                    .spawn(type_idx, customer_types.get(type_idx), catalog, deviations, &mut self.rng);
            self.stats.record_visit(type_idx);
            self.roster.push(customer);
            summary.arrivals += 1;
        }

        self.shopping.advance(
            &mut self.roster,
            &mut self.pool,
            catalog,
            &mut self.stats,
            &mut self.rng,
            &mut summary,
        );
        self.pool.advance(catalog, &mut self.stats, &mut summary);
        self.ticks += 1;

        if !summary.is_quiet() {
            trace!(
                day = %day,
                minute = %minute,
                arrivals = %summary.arrivals,
                list_picks = %summary.list_picks,
                impulse_picks = %summary.impulse_picks,
                queued = %summary.queued,
                items_scanned = %summary.items_scanned,
                transactions = %summary.transactions,
                reneged = %summary.reneged,
                "tick"
            );
        }
        summary
    }

    /// Run to completion
    pub fn run(self) -> OutputData {
        self.run_with(|_, _| Ok::<(), Infallible>(())).unwrap_or_else(|never| match never {})
    }

    /// Run to completion unless `stop` is raised; checked between ticks
    pub fn run_until(self, stop: &AtomicBool) -> Result<OutputData, RunError> {
        self.run_with(|day, minute| {
            if stop.load(Ordering::Relaxed) {
                warn!(day = %day, minute = %minute, "simulation_cancelled");
                return Err(RunError::Cancelled { day, minute });
            }
            Ok(())
        })
    }

    /// Tick loop; `before_tick` may abort the run before any (day, minute)
    fn run_with<E>(mut self, mut before_tick: impl FnMut(u32, u32) -> Result<(), E>) -> Result<OutputData, E> {
        let run_id = Uuid::now_v7();
        let span = info_span!("simulation", run_id = %run_id, seed = %self.settings.seed);
        let _enter = span.enter();

        let days = self.scenario.days();
        let minutes_per_day = self.minutes_per_day();
        info!(
            days = %days,
            minutes_per_day = %minutes_per_day,
            customers_per_hour = %self.scenario.customers_per_hour(),
            products = %self.scenario.catalog().products().len(),
            customer_types = %self.scenario.customer_types().len(),
            checkouts = %self.scenario.catalog().checkouts().len(),
            "simulation_started"
        );

        for day in 0..days {
            for minute in 0..minutes_per_day {
                before_tick(day, minute)?;
                self.step(day, minute);
            }
            debug!(
                day = %day,
                visits = %self.stats.times_visited(),
                transactions = %self.stats.transactions(),
                in_store = %self.in_store(),
                "day_completed"
            );
        }

        Ok(self.finish())
    }

    /// Customers still shopping or waiting at a checkout
    pub fn in_store(&self) -> usize {
        self.roster.len() + self.pool.total_queued()
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Close the store and build the result
    pub fn finish(self) -> OutputData {
        let remaining_at_close = self.in_store() as u64;
        let costs = operating_costs(
            self.scenario.catalog(),
            self.settings.operating_hours_per_day,
            self.scenario.days(),
        );

        let output = self.stats.into_output(
            self.scenario.catalog(),
            self.scenario.customer_types(),
            &costs,
            remaining_at_close,
            self.ticks,
        );

        info!(
            visits = %output.times_visited,
            transactions = %output.transactions,
            reneged = %output.reneged,
            remaining_at_close = %output.remaining_at_close,
            profits = %output.profits,
            op_costs = %output.op_costs,
            "simulation_finished"
        );
        output
    }
}
