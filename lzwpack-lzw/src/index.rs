//! Open-addressed lookup index for the encoder.
//!
//! Maps `(prefix code, appended byte)` to the code of the extended string
//! in O(1) expected time. Keys are packed into a single `u64` as
//! `prefix << 8 | byte`, hashed with a Fibonacci multiplier, and resolved
//! with linear probing. The table never shrinks and never removes entries.

use crate::config::Code;

/// Marks an unused slot. No real key can reach it because codes are at most
/// 24 bits wide.
const EMPTY: u64 = u64::MAX;

/// 2^64 / golden ratio.
const FIBONACCI: u64 = 0x9E37_79B9_7F4A_7C15;

const MIN_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy)]
struct Slot {
    key: u64,
    code: Code,
}

const VACANT: Slot = Slot {
    key: EMPTY,
    code: 0,
};

/// Hash set of `(prefix, byte)` keys with their assigned codes.
#[derive(Debug)]
pub struct LookupIndex {
    slots: Box<[Slot]>,
    /// `capacity - 1`; capacity is a power of two.
    mask: usize,
    /// `64 - log2(capacity)`, selects the top bits of the product.
    shift: u32,
    len: usize,
}

impl LookupIndex {
    /// Create an index sized for `max_entries` keys at a load factor of at
    /// most one half.
    pub fn with_capacity_for(max_entries: usize) -> Self {
        let capacity = max_entries
            .saturating_mul(2)
            .next_power_of_two()
            .max(MIN_CAPACITY);

        Self {
            slots: vec![VACANT; capacity].into_boxed_slice(),
            mask: capacity - 1,
            shift: 64 - capacity.trailing_zeros(),
            len: 0,
        }
    }

    #[inline]
    fn key(prefix: Code, byte: u8) -> u64 {
        ((prefix as u64) << 8) | byte as u64
    }

    #[inline]
    fn home_slot(&self, key: u64) -> usize {
        (key.wrapping_mul(FIBONACCI) >> self.shift) as usize
    }

    /// Look up the code for `prefix` extended by `byte`.
    #[inline]
    pub fn get(&self, prefix: Code, byte: u8) -> Option<Code> {
        let key = Self::key(prefix, byte);
        let mut pos = self.home_slot(key);
        loop {
            let slot = self.slots[pos];
            if slot.key == key {
                return Some(slot.code);
            }
            if slot.key == EMPTY {
                return None;
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Record `code` for `prefix` extended by `byte`.
    ///
    /// Returns `false` and leaves the index unchanged if the key is already
    /// present or if inserting would leave no vacant slot.
    pub fn insert(&mut self, prefix: Code, byte: u8, code: Code) -> bool {
        // One slot always stays vacant so probing terminates.
        if self.len + 1 >= self.slots.len() {
            return false;
        }

        let key = Self::key(prefix, byte);
        let mut pos = self.home_slot(key);
        loop {
            let slot = &mut self.slots[pos];
            if slot.key == key {
                return false;
            }
            if slot.key == EMPTY {
                *slot = Slot { key, code };
                self.len += 1;
                return true;
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_power_of_two() {
        let index = LookupIndex::with_capacity_for(16384);
        assert_eq!(index.capacity(), 32768);

        let index = LookupIndex::with_capacity_for(300);
        assert_eq!(index.capacity(), 1024);
        assert!(index.capacity().is_power_of_two());

        let index = LookupIndex::with_capacity_for(0);
        assert_eq!(index.capacity(), MIN_CAPACITY);
        assert!(index.is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut index = LookupIndex::with_capacity_for(64);
        assert!(index.insert(65, b'B', 256));
        assert!(index.insert(66, b'A', 257));
        assert!(index.insert(256, b'A', 258));

        assert_eq!(index.get(65, b'B'), Some(256));
        assert_eq!(index.get(66, b'A'), Some(257));
        assert_eq!(index.get(256, b'A'), Some(258));
        assert_eq!(index.get(65, b'A'), None);
        assert_eq!(index.get(258, b'B'), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_duplicate_key_keeps_first_code() {
        let mut index = LookupIndex::with_capacity_for(8);
        assert!(index.insert(1, 2, 300));
        assert!(!index.insert(1, 2, 301));
        assert_eq!(index.get(1, 2), Some(300));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_prefix_and_byte_do_not_alias() {
        // (1, 0) and (0, 1) pack to different keys.
        let mut index = LookupIndex::with_capacity_for(8);
        index.insert(1, 0, 400);
        assert_eq!(index.get(0, 1), None);
        assert_eq!(index.get(1, 0), Some(400));
    }

    #[test]
    fn test_dense_fill_with_collisions() {
        let entries = 4096usize;
        let mut index = LookupIndex::with_capacity_for(entries);
        for i in 0..entries {
            let prefix = (i / 256) as Code;
            let byte = (i % 256) as u8;
            assert!(index.insert(prefix, byte, 256 + i as Code));
        }
        for i in 0..entries {
            let prefix = (i / 256) as Code;
            let byte = (i % 256) as u8;
            assert_eq!(index.get(prefix, byte), Some(256 + i as Code));
        }
        assert_eq!(index.get(9999, 0), None);
    }

    #[test]
    fn test_never_fills_last_slot() {
        let mut index = LookupIndex::with_capacity_for(0);
        let capacity = index.capacity();
        let mut inserted = 0;
        for i in 0..capacity as Code * 2 {
            if index.insert(i, 0, i) {
                inserted += 1;
            }
        }
        assert_eq!(inserted, capacity - 1);
        // Lookups of absent keys still terminate.
        assert_eq!(index.get(1_000_000, 7), None);
    }
}
