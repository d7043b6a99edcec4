//! Domain models - core store types
//!
//! - `types` - ID newtypes and dense internal indices
//! - `input` - raw simulation input as received on the wire
//! - `catalog` - validated products, categories and checkout lanes
//! - `customer` - transient customer state
//! - `output` - simulation result
//! - `error` - validation and run errors

pub mod catalog;
pub mod customer;
pub mod error;
pub mod input;
pub mod output;
pub mod types;

// Re-export commonly used types at module level
pub use catalog::Catalog;
pub use customer::{CartItem, Customer, CustomerPhase, PickSource};
pub use error::{RunError, ValidationError};
pub use input::SimulationInput;
pub use output::OutputData;
