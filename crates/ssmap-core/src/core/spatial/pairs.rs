use thiserror::Error;

/// Multiplier mixing the larger index into the bucket hash.
const HASH_PRIME: usize = 89237;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PairSetError {
    #[error("Hash bucket {bucket} is full ({slots} slots)")]
    BucketOverflow { bucket: usize, slots: usize },

    #[error("Pair set capacity of {capacity} pairs exceeded")]
    CapacityExceeded { capacity: usize },
}

/// A fixed-capacity set of unordered index pairs.
///
/// `(a, b)` and `(b, a)` are the same pair. Pairs are hashed into a power-of-two table of
/// buckets, each holding at most `slots` entries, and are also kept in insertion order in
/// a flat list. Neither the table nor the list ever grows past the limits chosen at
/// construction: exceeding them is an error, never a silent drop.
#[derive(Debug, Clone)]
pub struct PairSet {
    mask: usize,
    slots: usize,
    capacity: usize,
    buckets: Vec<Vec<u64>>,
    pairs: Vec<(usize, usize)>,
}

impl PairSet {
    /// Creates an empty set.
    ///
    /// `table_width` is rounded up to the next power of two.
    pub fn new(capacity: usize, table_width: usize, slots: usize) -> Self {
        let width = table_width.max(1).next_power_of_two();
        Self {
            mask: width - 1,
            slots,
            capacity,
            buckets: vec![Vec::new(); width],
            pairs: Vec::new(),
        }
    }

    fn normalize(a: usize, b: usize) -> (usize, usize) {
        if a <= b { (a, b) } else { (b, a) }
    }

    fn encode(lo: usize, hi: usize) -> u64 {
        ((hi as u64) << 32) | (lo as u64 & u64::from(u32::MAX))
    }

    fn bucket_of(&self, lo: usize, hi: usize) -> usize {
        lo.wrapping_add(hi.wrapping_mul(HASH_PRIME)) & self.mask
    }

    /// Inserts the pair, returning `Ok(false)` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`PairSetError::CapacityExceeded`] when the set already holds `capacity`
    /// pairs and [`PairSetError::BucketOverflow`] when the target bucket is full. The set
    /// is left unchanged in both cases.
    pub fn add(&mut self, a: usize, b: usize) -> Result<bool, PairSetError> {
        let (lo, hi) = Self::normalize(a, b);
        let key = Self::encode(lo, hi);
        let bucket = self.bucket_of(lo, hi);

        if self.buckets[bucket].contains(&key) {
            return Ok(false);
        }
        if self.pairs.len() >= self.capacity {
            return Err(PairSetError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if self.buckets[bucket].len() >= self.slots {
            return Err(PairSetError::BucketOverflow {
                bucket,
                slots: self.slots,
            });
        }

        self.buckets[bucket].push(key);
        self.pairs.push((lo, hi));
        Ok(true)
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        let (lo, hi) = Self::normalize(a, b);
        self.buckets[self.bucket_of(lo, hi)].contains(&Self::encode(lo, hi))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pairs in insertion order, each as `(min, max)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }
}
