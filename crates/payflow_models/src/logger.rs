//! Logging macros used across the crate. Parameter values carry payer details and
//! are never logged, only their names.

pub use tracing::{debug, instrument, warn};
