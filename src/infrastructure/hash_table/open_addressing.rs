// Hash table implementation with open addressing and double hashing

use std::borrow::Borrow;
use std::fmt;

use super::observer::emit;
use super::{key_matches, InsertOutcome, Record, RecordTable, TableError, TableEvent, TableKey, TableObserver, TableResult};
use crate::infrastructure::hash::{bucket_index, find_next_prime};
use crate::types::{ConfigResult, OpenAddressingConfig, MIN_CAPACITY};

/// State of one slot
enum Slot<R> {
    /// Never used; a probe can stop here
    Free,
    Used(R),
    /// Vacated by a delete; probes continue past it
    FormerlyUsed,
}

/// Where a probe sequence ended
enum Probe {
    /// Key stored at this slot, found after this many probes
    Found(usize, usize),
    /// Key absent; a new record would go to this slot
    Vacant(usize, usize),
    /// Key absent and no slot can take it
    Exhausted,
}

/// Hash table storing records directly in a slot array.
///
/// Collisions are resolved by double hashing: the probe step is
/// `step_hash_max - (home % step_hash_max)`. Deleted slots become tombstones
/// so later probes still reach keys stored past them. The table grows when
/// an insert starts at or above the maximum load factor and shrinks when a
/// delete leaves it below the minimum, never going under its floor capacity.
pub struct OpenAddressingTable<R: Record> {
    slots: Vec<Slot<R>>,
    count: usize,
    config: OpenAddressingConfig,
    observer: Option<Box<dyn TableObserver>>,
}

impl<R: Record> OpenAddressingTable<R> {
    pub fn new(capacity_hint: usize) -> Self {
        let config = OpenAddressingConfig {
            initial_capacity: capacity_hint,
            ..OpenAddressingConfig::default()
        };
        Self::from_config(&config)
    }

    /// Create a table from a config, rejecting out-of-range values
    pub fn with_config(config: &OpenAddressingConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: &OpenAddressingConfig) -> Self {
        let capacity = find_next_prime(config.initial_capacity.max(MIN_CAPACITY));

        OpenAddressingTable {
            slots: Self::free_slots(capacity),
            count: 0,
            config: config.clone(),
            observer: None,
        }
    }

    fn free_slots(capacity: usize) -> Vec<Slot<R>> {
        (0..capacity).map(|_| Slot::Free).collect()
    }

    pub fn with_observer(mut self, observer: Box<dyn TableObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Home slot and probe step for `key` under the current capacity
    fn probe_start<Q: TableKey + ?Sized>(&self, key: &Q) -> (usize, usize) {
        let home = bucket_index(key, self.capacity());
        let step = self.config.step_hash_max - home % self.config.step_hash_max;
        (home, step)
    }

    /// Walk the probe sequence for `key`, remembering the first tombstone
    fn probe<Q>(&self, key: &Q) -> Probe
    where
        R::Key: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let capacity = self.capacity();
        let (home, step) = self.probe_start(key);
        let mut tombstone = None;
        let mut index = home;
        let mut probes = 1;

        loop {
            match &self.slots[index] {
                Slot::Free => return Probe::Vacant(tombstone.unwrap_or(index), probes),
                Slot::Used(record) if key_matches(record, key) => {
                    return Probe::Found(index, probes);
                }
                Slot::FormerlyUsed => {
                    tombstone.get_or_insert(index);
                }
                Slot::Used(_) => {}
            }

            index = (index + step) % capacity;
            if index == home {
                return match tombstone {
                    Some(slot) => Probe::Vacant(slot, probes),
                    None => Probe::Exhausted,
                };
            }
            probes += 1;
        }
    }

    /// Insert a record, replacing any record with the same key
    pub fn insert(&mut self, record: R) -> TableResult<InsertOutcome> {
        if self.load_factor() >= self.config.max_load_factor {
            self.resize(self.capacity() * 2);
        }

        match self.probe(record.key()) {
            Probe::Found(index, hops) => {
                emit(&self.observer, || TableEvent::Updated {
                    key: record.key(),
                    index,
                    hops,
                });
                self.slots[index] = Slot::Used(record);
                Ok(InsertOutcome::Updated)
            }
            Probe::Vacant(index, hops) => {
                emit(&self.observer, || TableEvent::Inserted {
                    key: record.key(),
                    index,
                    chain_len: hops,
                });
                self.slots[index] = Slot::Used(record);
                self.count += 1;
                Ok(InsertOutcome::Inserted)
            }
            Probe::Exhausted => Err(TableError::CapacityExhausted {
                key: record.key().to_string(),
                capacity: self.capacity(),
            }),
        }
    }

    pub fn search<Q>(&self, key: &Q) -> Option<&R>
    where
        R::Key: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(index, hops) => {
                emit(&self.observer, || TableEvent::Found {
                    key: &key,
                    index,
                    hops,
                });
                match &self.slots[index] {
                    Slot::Used(record) => Some(record),
                    _ => None,
                }
            }
            Probe::Vacant(_, hops) => {
                emit(&self.observer, || TableEvent::Missed { key: &key, hops });
                None
            }
            Probe::Exhausted => {
                emit(&self.observer, || TableEvent::Missed {
                    key: &key,
                    hops: self.capacity(),
                });
                None
            }
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        R::Key: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        matches!(self.probe(key), Probe::Found(..))
    }

    /// Remove the record stored under `key`, leaving a tombstone in its slot
    pub fn delete<Q>(&mut self, key: &Q) -> Option<R>
    where
        R::Key: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = match self.probe(key) {
            Probe::Found(index, _) => index,
            Probe::Vacant(..) | Probe::Exhausted => {
                emit(&self.observer, || TableEvent::DeleteMissed { key: &key });
                return None;
            }
        };

        let removed = match std::mem::replace(&mut self.slots[index], Slot::FormerlyUsed) {
            Slot::Used(record) => record,
            // probe only reports Found for a used slot
            _ => return None,
        };
        self.count -= 1;
        emit(&self.observer, || TableEvent::Deleted { key: &key, index });

        if self.capacity() > MIN_CAPACITY && self.load_factor() < self.config.min_load_factor {
            self.resize(self.capacity() / 2);
        }
        Some(removed)
    }

    /// Rebuild the slot array with the next prime at or above `requested`
    /// (never below the floor capacity). Tombstones are dropped.
    fn resize(&mut self, requested: usize) {
        let new_capacity = find_next_prime(requested.max(MIN_CAPACITY));
        let old_capacity = self.capacity();
        if new_capacity == old_capacity {
            return;
        }
        emit(&self.observer, || TableEvent::Resized {
            from: old_capacity,
            to: new_capacity,
            load_factor: self.load_factor(),
        });

        let old_slots = std::mem::replace(&mut self.slots, Self::free_slots(new_capacity));
        debug_assert!(self.count < new_capacity);
        self.count = 0;

        for slot in old_slots {
            if let Slot::Used(record) = slot {
                // Keys are unique and the fresh array has no tombstones,
                // so the first free slot on the probe path takes the record
                let (home, step) = self.probe_start(record.key());
                let mut index = home;
                while !matches!(self.slots[index], Slot::Free) {
                    index = (index + step) % new_capacity;
                }
                self.slots[index] = Slot::Used(record);
                self.count += 1;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Number of tombstones currently in the slot array
    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::FormerlyUsed))
            .count()
    }

    /// Every stored record in slot order
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Used(record) => Some(record),
            _ => None,
        })
    }
}

impl<R: Record> RecordTable<R> for OpenAddressingTable<R> {
    fn insert(&mut self, record: R) -> TableResult<InsertOutcome> {
        OpenAddressingTable::insert(self, record)
    }

    fn search(&self, key: &R::Key) -> Option<&R> {
        OpenAddressingTable::search(self, key)
    }

    fn delete(&mut self, key: &R::Key) -> Option<R> {
        OpenAddressingTable::delete(self, key)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        OpenAddressingTable::capacity(self)
    }

    fn load_factor(&self) -> f64 {
        OpenAddressingTable::load_factor(self)
    }
}

impl<R: Record> fmt::Display for OpenAddressingTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Count: {}, Capacity: {}, Load Factor: {:.2}",
            self.count,
            self.capacity(),
            self.load_factor()
        )?;
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Free => writeln!(f, "[{}]: <free>", index)?,
                Slot::Used(record) => writeln!(f, "[{}]: {}", index, record.key())?,
                Slot::FormerlyUsed => writeln!(f, "[{}]: <formerly used>", index)?,
            }
        }
        Ok(())
    }
}
