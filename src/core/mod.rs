//! Core - error type, hot-loop access macros and small numeric helpers
//!
//! Everything above this layer (grid, domain, systems, simulation) depends on it;
//! it depends on nothing else in the crate.

#[macro_use]
pub mod utils;
pub mod error;
pub mod math;

pub use error::{Result, TankError};
