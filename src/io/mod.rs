//! IO - simulation input and result egress
//!
//! - `input` - Inline or file input source
//! - `egress` - Result writer (stdout or file)

pub mod egress;
pub mod input;

pub use egress::{Egress, EgressTarget};
pub use input::InputSource;
