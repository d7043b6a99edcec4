//! Services - simulation logic and run state
//!
//! - `scenario` - Validated run configuration built from the input
//! - `customer_types` - Customer type profiles, interest tables, type selection
//! - `calendar` - Per-day interest overrides
//! - `shopping` - Basket construction and in-store movement
//! - `checkout_pool` - Checkout queues, service and reneging
//! - `stats` - Counters and the ID-keyed result
//! - `engine` - Clock and tick loop

pub mod calendar;
pub mod checkout_pool;
pub mod customer_types;
pub mod engine;
pub mod scenario;
pub mod shopping;
pub mod stats;

pub use calendar::{DayDeviations, DeviationCalendar};
pub use checkout_pool::{CheckoutPool, LaneCost};
pub use customer_types::{CustomerType, CustomerTypeModel};
pub use engine::{Engine, EngineSettings};
pub use scenario::Scenario;
pub use shopping::ShoppingEngine;
pub use stats::{StatsAggregator, TickSummary};
