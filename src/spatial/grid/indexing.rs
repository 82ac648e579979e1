use super::*;

impl Grid {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===

    /// Flat index of an in-range cell. Callers bounds-check first
    /// (see `is_inside` / `index_of`).
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "index: ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((idx % w) as u32, (idx / w) as u32)
    }

    // === Bounds checking ===
    #[inline]
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Checked variant of `index` for signed (possibly off-grid) coordinates.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_inside(x, y) {
            Some(self.index(x as u32, y as u32))
        } else {
            None
        }
    }

    /// True on the outermost ring of cells.
    #[inline]
    pub fn is_rim(&self, x: u32, y: u32) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// `min(x, y, width-1-x, height-1-y)` for an in-range cell.
    #[inline]
    pub fn edge_distance(&self, x: u32, y: u32) -> u32 {
        let right = self.width - 1 - x;
        let bottom = self.height - 1 - y;
        x.min(y).min(right).min(bottom)
    }
}
