//! Small positive integer id allocator.
//!
//! Ids are kept in a bitmap of 32-bit buckets. A cursor remembers the lowest
//! bucket that may still have a free bit, so allocation is amortised O(1) for
//! the common sequential case and released ids are handed out again before
//! the bitmap grows.
//!
//! Id 0 is reserved and never issued.
//!
//! # Usage
//!
//! ```rust
//! use ccm_core::IdAllocator;
//!
//! let mut ids = IdAllocator::new();
//! assert_eq!(ids.get_id(), 1);
//! assert_eq!(ids.get_id(), 2);
//! ids.put_id(1).unwrap();
//! assert_eq!(ids.get_id(), 1);
//! ```

use crate::IdError;
use tracing::trace;

const BUCKET_BITS: u32 = u32::BITS;

/// Allocator issuing the smallest unused positive id.
///
/// Not thread-safe; owned by a single compositor instance.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    buckets: Vec<u32>,
    lowest_free_bucket: usize,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Creates an empty allocator with id 0 reserved.
    pub fn new() -> Self {
        Self {
            // bit 0 of bucket 0 is id 0
            buckets: vec![1],
            lowest_free_bucket: 0,
        }
    }

    /// Allocates the smallest unused positive id.
    pub fn get_id(&mut self) -> u32 {
        let bucket = match self.buckets[self.lowest_free_bucket..]
            .iter()
            .position(|&b| b != u32::MAX)
        {
            Some(offset) => self.lowest_free_bucket + offset,
            None => {
                let old_len = self.buckets.len();
                self.buckets.resize(old_len * 2, 0);
                trace!(buckets = self.buckets.len(), "id allocator grown");
                old_len
            }
        };

        let bit = (!self.buckets[bucket]).trailing_zeros();
        self.buckets[bucket] |= 1 << bit;
        self.lowest_free_bucket = bucket;

        bucket as u32 * BUCKET_BITS + bit
    }

    /// Releases an id so it can be issued again.
    pub fn put_id(&mut self, id: u32) -> Result<(), IdError> {
        if id == 0 {
            return Err(IdError::Reserved);
        }

        let bucket = (id / BUCKET_BITS) as usize;
        let mask = 1u32 << (id % BUCKET_BITS);

        match self.buckets.get_mut(bucket) {
            Some(word) if *word & mask != 0 => {
                *word &= !mask;
                if bucket < self.lowest_free_bucket {
                    self.lowest_free_bucket = bucket;
                }
                Ok(())
            }
            _ => Err(IdError::NotAllocated(id)),
        }
    }

    /// Returns true if `id` is currently allocated.
    pub fn is_allocated(&self, id: u32) -> bool {
        let bucket = (id / BUCKET_BITS) as usize;
        self.buckets
            .get(bucket)
            .is_some_and(|word| word & (1 << (id % BUCKET_BITS)) != 0)
            && id != 0
    }

    /// Number of 32-bit buckets currently backing the allocator.
    pub fn capacity_buckets(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdAllocator::new();
        for expected in 1..=200 {
            assert_eq!(ids.get_id(), expected);
        }
    }

    #[test]
    fn test_reuse_released_id() {
        let mut ids = IdAllocator::new();
        for _ in 1..=150 {
            ids.get_id();
        }
        ids.put_id(99).unwrap();
        assert_eq!(ids.get_id(), 99);
        assert_eq!(ids.get_id(), 151);
    }

    #[test]
    fn test_release_does_not_grow() {
        let mut ids = IdAllocator::new();
        for _ in 0..1000 {
            let id = ids.get_id();
            assert_eq!(id, 1);
            ids.put_id(id).unwrap();
        }
        assert_eq!(ids.capacity_buckets(), 1);
    }

    #[test]
    fn test_lowest_free_wins() {
        let mut ids = IdAllocator::new();
        for _ in 1..=100 {
            ids.get_id();
        }
        ids.put_id(70).unwrap();
        ids.put_id(5).unwrap();
        assert_eq!(ids.get_id(), 5);
        assert_eq!(ids.get_id(), 70);
        assert_eq!(ids.get_id(), 101);
    }

    #[test]
    fn test_misuse() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.put_id(0), Err(IdError::Reserved));
        assert_eq!(ids.put_id(7), Err(IdError::NotAllocated(7)));
        assert_eq!(ids.put_id(10_000), Err(IdError::NotAllocated(10_000)));

        let id = ids.get_id();
        ids.put_id(id).unwrap();
        assert_eq!(ids.put_id(id), Err(IdError::NotAllocated(id)));
        assert!(!ids.is_allocated(0));
    }
}
