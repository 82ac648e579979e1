//! Domain - what lives in the tank: propagation medium, rigid obstacles,
//! coherent emitters and the tank's configuration bundle.

pub mod config;
pub mod medium;
pub mod obstacles;
pub mod sources;

pub use config::{BoundaryMode, TankConfig};
pub use medium::MediumField;
pub use obstacles::ObstacleMask;
pub use sources::{Emission, Source, SourceRegistry, SourceShape};
