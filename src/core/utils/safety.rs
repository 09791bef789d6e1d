//! Zero-Cost Safety Macros
//!
//! Slot tables are indexed in the innermost particle loop. Indices come from
//! lane id lists that always stay inside `0..MAX_EFFECTS`, so release builds
//! skip the bounds check while debug builds keep it.
//!
//! Usage:
//! ```rust
//! use fireburst_engine::fast;
//!
//! let ids: Vec<u32> = vec![7, 3, 9];
//! let slot = *fast!(ids, [1]);
//! assert_eq!(slot, 3);
//!
//! let mut alive = vec![0u32; 4];
//! fast!(alive, [slot as usize] = 64);
//! assert_eq!(alive[3], 64);
//! ```

/// Bounds checks in debug, `get_unchecked` in release
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) = $val;
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn fast_read_matches_indexing() {
        let ids = vec![10u32, 11, 12];
        assert_eq!(*fast!(ids, [2]), 12);
    }

    #[test]
    fn fast_write_stores_value() {
        let mut alive = vec![0u32; 3];
        fast!(alive, [1] = 64);
        assert_eq!(alive, vec![0, 64, 0]);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn fast_read_is_bounds_checked_in_debug() {
        let ids = vec![1u32, 2];
        let _ = *fast!(ids, [5]);
    }
}
