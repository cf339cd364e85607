// Hash table implementation with separate chaining

use std::borrow::Borrow;
use std::fmt::{self, Display};

use crate::infrastructure::hash::{bucket_index, find_next_prime};
use crate::infrastructure::linked_list::LinkedList;
use crate::types::{
    ConfigResult, TableConfig, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, MIN_CAPACITY,
};

pub mod error;
pub mod observer;
pub mod open_addressing;
pub mod snapshot;

pub use error::{TableError, TableResult};
pub use observer::{LogObserver, TableEvent, TableObserver};
pub use open_addressing::OpenAddressingTable;
pub use snapshot::{BucketSnapshot, TableSnapshot};

use observer::emit;

/// Key usable by the tables.
///
/// Keys are hashed through their `Display` text, so an integer key and its
/// decimal string land in the same bucket.
pub trait TableKey: Display + PartialEq {}

impl<T: Display + PartialEq + ?Sized> TableKey for T {}

/// Value stored in a table, identified by its key.
///
/// The key must not change while the record sits in a table: its bucket was
/// chosen from the key's hash.
pub trait Record {
    type Key: TableKey;

    fn key(&self) -> &Self::Key;
}

impl<K: TableKey, V> Record for (K, V) {
    type Key = K;

    fn key(&self) -> &K {
        &self.0
    }
}

/// Whether `record` is stored under `key`
pub(crate) fn key_matches<R, Q>(record: &R, key: &Q) -> bool
where
    R: Record,
    R::Key: Borrow<Q>,
    Q: PartialEq + ?Sized,
{
    Borrow::<Q>::borrow(record.key()) == key
}

/// What an insert did with the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Key was new; the record count grew by one
    Inserted,
    /// A record with the same key was replaced in place
    Updated,
}

/// Operations shared by the collision strategies
pub trait RecordTable<R: Record> {
    fn insert(&mut self, record: R) -> TableResult<InsertOutcome>;

    fn search(&self, key: &R::Key) -> Option<&R>;

    fn delete(&mut self, key: &R::Key) -> Option<R>;

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    fn load_factor(&self) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash table using separate chaining.
///
/// Every bucket owns a [`LinkedList`] of the records hashing to it. The
/// bucket count is always prime and at least [`MIN_CAPACITY`]. Before an
/// insert would push `len / capacity` above the maximum load factor, the
/// table is rebuilt with the next prime at or above twice its capacity, so
/// the bound holds after every insert. The table never shrinks.
pub struct HashTable<R: Record> {
    /// Array of buckets, each an owned chain of records
    buckets: Vec<LinkedList<R>>,
    /// Number of records across all buckets
    count: usize,
    max_load_factor: f64,
    observer: Option<Box<dyn TableObserver>>,
}

impl<R: Record> HashTable<R> {
    /// Create a table with at least `capacity_hint` buckets, rounded up to a prime
    pub fn new(capacity_hint: usize) -> Self {
        Self::with_load_factor(capacity_hint, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Create a table from a config, rejecting out-of-range values
    pub fn with_config(config: &TableConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::with_load_factor(
            config.initial_capacity,
            config.max_load_factor,
        ))
    }

    fn with_load_factor(capacity_hint: usize, max_load_factor: f64) -> Self {
        assert!(
            max_load_factor.is_finite() && max_load_factor > 0.0,
            "max load factor must be positive"
        );
        let capacity = find_next_prime(capacity_hint.max(MIN_CAPACITY));

        HashTable {
            buckets: Self::empty_buckets(capacity),
            count: 0,
            max_load_factor,
            observer: None,
        }
    }

    fn empty_buckets(capacity: usize) -> Vec<LinkedList<R>> {
        (0..capacity).map(|_| LinkedList::new()).collect()
    }

    /// Attach an observer that receives every table event
    pub fn with_observer(mut self, observer: Box<dyn TableObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Option<Box<dyn TableObserver>>) {
        self.observer = observer;
    }

    /// Bucket index of `key` under the current capacity
    pub fn hash_index<Q: TableKey + ?Sized>(&self, key: &Q) -> usize {
        bucket_index(key, self.capacity())
    }

    /// Insert a record, replacing any record with the same key.
    ///
    /// The load check runs before the key is hashed, using the count the
    /// table would have if the key is new.
    pub fn insert(&mut self, record: R) -> InsertOutcome {
        while (self.count + 1) as f64 > self.max_load_factor * self.capacity() as f64 {
            self.grow();
        }
        self.place(record)
    }

    /// Locate the bucket, then update in place or append
    fn place(&mut self, record: R) -> InsertOutcome {
        let index = self.hash_index(record.key());
        let chain = &mut self.buckets[index];

        if let Some((hops, existing)) = chain.find_mut(|r| r.key() == record.key()) {
            *existing = record;
            let existing: &R = existing;
            emit(&self.observer, || TableEvent::Updated {
                key: existing.key(),
                index,
                hops,
            });
            return InsertOutcome::Updated;
        }

        emit(&self.observer, || TableEvent::Inserted {
            key: record.key(),
            index,
            chain_len: chain.len() + 1,
        });
        chain.append_last(record);
        self.count += 1;
        InsertOutcome::Inserted
    }

    /// Find the record stored under `key`
    pub fn search<Q>(&self, key: &Q) -> Option<&R>
    where
        R::Key: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.hash_index(key);
        let chain = &self.buckets[index];

        match chain.find(|r| key_matches(r, key)) {
            Some((hops, record)) => {
                emit(&self.observer, || TableEvent::Found {
                    key: &key,
                    index,
                    hops,
                });
                Some(record)
            }
            None => {
                emit(&self.observer, || TableEvent::Missed {
                    key: &key,
                    hops: chain.len(),
                });
                None
            }
        }
    }

    /// Mutable lookup. Changing the record's key through this reference
    /// leaves it in the wrong bucket.
    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut R>
    where
        R::Key: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.hash_index(key);
        self.buckets[index]
            .find_mut(|r| key_matches(r, key))
            .map(|(_, record)| record)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        R::Key: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.hash_index(key);
        self.buckets[index]
            .find(|r| key_matches(r, key))
            .is_some()
    }

    /// Remove and return the record stored under `key`.
    ///
    /// A missing key is an ordinary outcome and leaves the table unchanged.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<R>
    where
        R::Key: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.hash_index(key);
        let removed = self.buckets[index].remove_by(|r| key_matches(r, key));

        match removed {
            Some(record) => {
                self.count -= 1;
                emit(&self.observer, || TableEvent::Deleted { key: &key, index });
                Some(record)
            }
            None => {
                emit(&self.observer, || TableEvent::DeleteMissed { key: &key });
                None
            }
        }
    }

    fn grow(&mut self) {
        let requested = self.capacity() * 2;
        self.resize(requested);
    }

    /// Rebuild the bucket array with the next prime at or above `requested`
    /// and rehash every record into it
    fn resize(&mut self, requested: usize) {
        let new_capacity = find_next_prime(requested);
        debug_assert!(new_capacity > self.capacity());

        let old_capacity = self.capacity();
        emit(&self.observer, || TableEvent::Resized {
            from: old_capacity,
            to: new_capacity,
            load_factor: (self.count + 1) as f64 / old_capacity as f64,
        });

        let old_buckets = std::mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        let expected = self.count;
        self.count = 0;

        for chain in old_buckets {
            for record in chain {
                self.place(record);
            }
        }
        debug_assert_eq!(self.count, expected);
    }

    /// Number of records in the table
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buckets
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Chain stored at `index`, if the index is in range
    pub fn bucket(&self, index: usize) -> Option<&LinkedList<R>> {
        self.buckets.get(index)
    }

    /// Length of the chain at `index` (0 when out of range)
    pub fn bucket_len(&self, index: usize) -> usize {
        self.bucket(index).map_or(0, LinkedList::len)
    }

    /// Every bucket with its index, in index order
    pub fn buckets(&self) -> impl Iterator<Item = (usize, &LinkedList<R>)> + '_ {
        self.buckets.iter().enumerate()
    }

    /// Every record, bucket by bucket, each chain in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.buckets.iter().flat_map(LinkedList::iter)
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(LinkedList::len).max().unwrap_or(0)
    }

    /// Serializable view of the non-empty buckets
    pub fn snapshot(&self) -> TableSnapshot<'_, R> {
        TableSnapshot::from_table(self)
    }
}

impl<R: Record> RecordTable<R> for HashTable<R> {
    fn insert(&mut self, record: R) -> TableResult<InsertOutcome> {
        Ok(HashTable::insert(self, record))
    }

    fn search(&self, key: &R::Key) -> Option<&R> {
        HashTable::search(self, key)
    }

    fn delete(&mut self, key: &R::Key) -> Option<R> {
        HashTable::delete(self, key)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        HashTable::capacity(self)
    }

    fn load_factor(&self) -> f64 {
        HashTable::load_factor(self)
    }
}

impl<R: Record> Default for HashTable<R> {
    fn default() -> Self {
        Self::with_load_factor(DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR)
    }
}

impl<R: Record> Extend<R> for HashTable<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

/// Chain dump, one line per non-empty bucket
impl<R: Record> fmt::Display for HashTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Count: {}, Capacity: {}, Load Factor: {:.2}",
            self.count,
            self.capacity(),
            self.load_factor()
        )?;

        for (index, chain) in self.buckets() {
            if chain.is_empty() {
                continue;
            }
            write!(f, "Index {:02}: ", index)?;
            for record in chain {
                write!(f, "[{}] -> ", record.key())?;
            }
            writeln!(f, "None")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
