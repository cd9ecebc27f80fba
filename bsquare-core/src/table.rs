//! Transposition table
//!
//! Open addressing with linear probing over a power-of-two array of slots.
//! A slot is vacant when its position is [`Position::NULL`], so the table needs
//! no separate occupancy bitmap. Entries are never removed. The array doubles
//! when it passes 3/4 load; an optional entry limit turns runaway growth into
//! [`TableError::CapacityExceeded`].

use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::board::Position;
use crate::error::TableError;
use crate::strategy::Slot;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest array the table will allocate
const MIN_CAPACITY: usize = 16;

/// Load factor numerator/denominator at which the array doubles
const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

// ============================================================================
// TABLE
// ============================================================================

/// Outcome of an insert-if-absent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe<T> {
    /// An entry already existed for the key
    Found(T),
    /// The given slot was stored as a new entry
    Inserted,
}

/// Map from canonical position to its memoized slot
#[derive(Clone, Debug)]
pub struct TranspositionTable<T> {
    slots: Vec<T>,
    len: usize,
    max_entries: Option<usize>,
}

impl<T: Slot> TranspositionTable<T> {
    /// Create a table with room for at least `capacity` slots (rounded up to a
    /// power of two).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY).next_power_of_two();
        Self {
            slots: vec![T::default(); capacity],
            len: 0,
            max_entries: None,
        }
    }

    /// Refuse inserts beyond `max_entries` entries
    pub fn with_limit(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the backing array
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Bytes taken up by the stored entries
    pub fn entry_bytes(&self) -> usize {
        self.len * std::mem::size_of::<T>()
    }

    /// Look up the entry for a canonical position
    pub fn get(&self, key: Position) -> Option<T> {
        let slot = self.slots[self.find(key)];
        if slot.position().is_null() {
            None
        } else {
            Some(slot)
        }
    }

    /// Store `slot` unless its position already has an entry, in which case
    /// the existing entry is returned untouched.
    pub fn insert(&mut self, slot: T) -> Result<Probe<T>, TableError> {
        let key = slot.position();
        debug_assert!(!key.is_null(), "null position used as table key");

        let index = self.find(key);
        let existing = self.slots[index];
        if !existing.position().is_null() {
            return Ok(Probe::Found(existing));
        }

        if let Some(limit) = self.max_entries {
            if self.len >= limit {
                return Err(TableError::CapacityExceeded { limit });
            }
        }

        self.slots[index] = slot;
        self.len += 1;
        if self.len * LOAD_DEN > self.slots.len() * LOAD_NUM {
            self.grow();
        }
        Ok(Probe::Inserted)
    }

    /// Overwrite the entry for `slot`'s position, which must already exist.
    pub fn store(&mut self, slot: T) {
        let index = self.find(slot.position());
        debug_assert!(
            !self.slots[index].position().is_null(),
            "store without a prior insert for {:#x}",
            slot.position()
        );
        self.slots[index] = slot;
    }

    /// All stored entries, in table order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter(|slot| !slot.position().is_null())
    }

    // ------------------------------------------------------------------------
    // Probing
    // ------------------------------------------------------------------------

    fn bucket(&self, key: Position) -> usize {
        let mut hasher = FxHasher::default();
        hasher.write_u64(key.raw());
        let h = hasher.finish();
        (h ^ (h >> 32)) as usize & (self.slots.len() - 1)
    }

    /// Index of the entry for `key`, or of the vacant slot where it belongs
    fn find(&self, key: Position) -> usize {
        let mask = self.slots.len() - 1;
        let mut index = self.bucket(key);
        loop {
            let probed = self.slots[index].position();
            if probed.is_null() || probed == key {
                return index;
            }
            index = (index + 1) & mask;
        }
    }

    fn grow(&mut self) {
        let capacity = self.slots.len() * 2;
        tracing::debug!(entries = self.len, capacity, "growing transposition table");

        let old = std::mem::replace(&mut self.slots, vec![T::default(); capacity]);
        for slot in old.into_iter().filter(|slot| !slot.position().is_null()) {
            let index = self.find(slot.position());
            self.slots[index] = slot;
        }
    }
}
