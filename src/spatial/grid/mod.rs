//! Grid - fixed `width x height` index space
//!
//! Every per-cell buffer in a tank (field generations, medium, obstacle mask,
//! sponge, running average) is a flat row-major array of `size` entries
//! addressed through the same `Grid`, so they always share dimensions.

use crate::core::{Result, TankError};

mod indexing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    size: usize,
}

impl Grid {
    /// Build a grid. Zero-sized or unaddressable grids are rejected here, once,
    /// so nothing downstream has to re-check dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TankError::InvalidDimensions { width, height });
        }
        let size = (width as usize)
            .checked_mul(height as usize)
            .ok_or(TankError::GridTooLarge { width, height })?;
        Ok(Self { width, height, size })
    }

    /// Allocate a zeroed per-cell buffer matching this grid.
    pub fn zeroed(&self) -> Vec<f32> {
        vec![0.0; self.size]
    }
}
