//! Spatial layer: the grid index space and cell rasterization shared by
//! obstacles and sources.

pub mod grid;
pub mod raster;

pub use grid::Grid;
