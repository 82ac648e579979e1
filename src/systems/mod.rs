//! Per-step systems: the finite-difference kernel and the sponge mask it
//! scales by.

pub mod kernel;
pub mod sponge;

pub use kernel::{FieldView, PARALLEL_MIN_CELLS};
pub use sponge::SpongeMask;
