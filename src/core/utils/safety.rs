//! Debug-checked buffer access for the stepper's hot loops
//!
//! Debug builds index normally, so a bad cell index panics and names itself.
//! Release builds skip the bounds check; callers restrict their loops to the
//! grid interior before using these macros.
//!
//! ```rust
//! use ripple_engine::fast;
//!
//! let current = vec![0.0f32, 0.5, 1.0];
//! let centre = *fast!(current, [1]);
//! assert_eq!(centre, 0.5);
//!
//! let mut next = vec![0.0f32; 3];
//! fast!(next, [2] = centre * 2.0);
//! assert_eq!(next[2], 1.0);
//! ```

/// Read: `fast!(buf, [i])` yields `&buf[i]`.
/// Write: `fast!(buf, [i] = v)` evaluates `v` first, then stores it.
#[macro_export]
macro_rules! fast {
    ($buf:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$buf[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $buf.get_unchecked($index) }
        }
    }};

    ($buf:expr, [$index:expr] = $val:expr) => {{
        let value = $val;
        #[cfg(debug_assertions)]
        {
            $buf[$index] = value;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$buf.get_unchecked_mut($index) = value;
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn reads_neighbour_cells() {
        let row = vec![1.0f32, 2.0, 3.0, 4.0];
        let i = 2;
        let lap = *fast!(row, [i - 1]) + *fast!(row, [i + 1]) - 2.0 * *fast!(row, [i]);
        assert_eq!(lap, 0.0);
    }

    #[test]
    fn write_may_read_the_same_buffer() {
        let mut field = vec![0.25f32, 0.0];
        fast!(field, [1] = field[0] * 4.0);
        assert_eq!(field[1], 1.0);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn out_of_range_panics_in_debug() {
        let field = vec![0.0f32; 3];
        let _ = *fast!(field, [7]);
    }
}
