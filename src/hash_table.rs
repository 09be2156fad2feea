//! A separately chained hash table with a prime number of buckets picked once
//! at creation time. It never rehashes, so a table that outgrows its size
//! hint just gets longer chains.

use std::{
    cmp::Ordering,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash, Hasher},
    io::{self, Write},
    mem,
};

use crate::{array_list::ArrayList, mapping::Mapping};

/// Bucket counts to pick from. The table gets the first one that is at least
/// the size hint, or the last one if the hint is bigger than all of them.
pub const PRIMES: [usize; 11] = [
    73, 179, 283, 419, 811, 1663, 3259, 6481, 12893, 25667, 51263,
];

/// A collision chain. `None` is the end of the chain.
type Chain<K, V> = Option<Box<Bucket<K, V>>>;

/// One entry in a collision chain.
struct Bucket<K, V> {
    key: K,
    value: V,
    next: Chain<K, V>,
}

/// A hash table whose keys are also totally ordered, which is what lets it
/// walk its pairs in ascending key order on request.
pub struct HashTable<K, V, S = RandomState>
where
    K: Ord + Hash,
    S: BuildHasher,
{
    buckets: Box<[Chain<K, V>]>,
    len: usize,
    hash_builder: S,
}

/// Iterates over a table in bucket order, and chain order within a bucket.
pub struct UnorderedIter<'a, K, V> {
    buckets: std::slice::Iter<'a, Chain<K, V>>,
    chain: Option<&'a Bucket<K, V>>,
    remaining: usize,
}

/// The number of buckets a table created with `hint` will have.
pub fn bucket_count_for(hint: usize) -> usize {
    match PRIMES.iter().copied().find(|&prime| prime >= hint) {
        Some(prime) => prime,
        None => {
            let largest = PRIMES[PRIMES.len() - 1];
            tracing::warn!(hint, buckets = largest, "size hint exceeds the largest bucket count");
            largest
        }
    }
}

impl<K, V> HashTable<K, V, RandomState>
where
    K: Ord + Hash,
{
    /// Makes a new table sized for roughly `hint` pairs.
    pub fn with_hint(hint: usize) -> Self {
        HashTable::with_hint_and_hash_builder(hint, Default::default())
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Ord + Hash,
    S: BuildHasher,
{
    /// Makes a new table sized for roughly `hint` pairs, hashing keys with
    /// `hash_builder`.
    pub fn with_hint_and_hash_builder(hint: usize, hash_builder: S) -> Self {
        let size = bucket_count_for(hint);
        tracing::debug!(hint, buckets = size, "creating hash table");

        let buckets = (0..size).map(|_| None).collect::<Vec<_>>();

        Self {
            buckets: buckets.into_boxed_slice(),
            len: 0,
            hash_builder,
        }
    }

    /// The number of buckets, fixed for the lifetime of the table.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a pair, returning the value it replaced if the key was already
    /// in the table. New keys go on the end of their chain.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len;

        let idx = self.index_of(&k);
        let mut link = &mut self.buckets[idx];

        while let Some(bucket) = link {
            if bucket.key.cmp(&k) == Ordering::Equal {
                return Some(mem::replace(&mut bucket.value, v));
            }
            link = &mut bucket.next;
        }

        *link = Some(Box::new(Bucket {
            key: k,
            value: v,
            next: None,
        }));
        self.len += 1;

        #[cfg(test)]
        {
            assert_eq!(original_len + 1, self.len);
            self.continuity_test();
        }

        None
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        let mut link = self.buckets[self.index_of(k)].as_deref();

        while let Some(bucket) = link {
            if bucket.key.cmp(k) == Ordering::Equal {
                return Some(&bucket.value);
            }
            link = bucket.next.as_deref();
        }

        None
    }

    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        let idx = self.index_of(k);
        let mut link = self.buckets[idx].as_deref_mut();

        while let Some(bucket) = link {
            if bucket.key.cmp(k) == Ordering::Equal {
                return Some(&mut bucket.value);
            }
            link = bucket.next.as_deref_mut();
        }

        None
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.get(k).is_some()
    }

    /// Unlinks a key from its chain, returning its value.
    pub fn remove(&mut self, k: &K) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len;

        let idx = self.index_of(k);
        let mut link = &mut self.buckets[idx];

        loop {
            let found = match link.as_deref() {
                Some(bucket) => bucket.key.cmp(k) == Ordering::Equal,
                None => return None,
            };

            if found {
                break;
            }

            link = match link {
                Some(bucket) => &mut bucket.next,
                None => return None,
            };
        }

        let bucket = link.take()?;
        let Bucket { value, next, .. } = *bucket;
        *link = next;
        self.len -= 1;

        #[cfg(test)]
        {
            assert_eq!(original_len - 1, self.len);
            self.continuity_test();
        }

        Some(value)
    }

    /// Drops every pair. The bucket array stays the same size.
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            let mut link = chain.take();

            // unlink one entry at a time so long chains don't drop recursively
            while let Some(mut bucket) = link {
                link = bucket.next.take();
            }
        }

        self.len = 0;
    }

    /// Iterates over every pair in bucket order.
    pub fn iter_unordered(&self) -> UnorderedIter<'_, K, V> {
        UnorderedIter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    /// Calls `visit` on every pair in ascending key order. The pairs are
    /// gathered into a buffer and sorted first, so this costs O(n log n)
    /// rather than a plain pass over the buckets.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for &(k, v) in self.sorted_pairs().iter() {
            visit(k, v);
        }
    }

    /// Calls `visit` on every pair in bucket order.
    pub fn walk_unordered<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter_unordered() {
            visit(k, v);
        }
    }

    fn sorted_pairs(&self) -> ArrayList<(&K, &V)> {
        let mut pairs = ArrayList::with_capacity(self.len);
        pairs.extend(self.iter_unordered());
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        pairs
    }

    fn hash_k(&self, k: &K) -> u64 {
        let mut h = self.hash_builder.build_hasher();
        k.hash(&mut h);
        h.finish()
    }

    fn index_of(&self, k: &K) -> usize {
        (self.hash_k(k) % self.buckets.len() as u64) as usize
    }

    #[cfg(test)]
    fn chain_len(&self, idx: usize) -> usize {
        let mut count = 0;
        let mut link = self.buckets[idx].as_deref();

        while let Some(bucket) = link {
            count = count + 1;
            link = bucket.next.as_deref();
        }

        count
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        let mut count = 0;

        // every entry has to sit in the bucket its hash picks, and the
        // entries have to add up to the length counter
        for (idx, chain) in self.buckets.iter().enumerate() {
            let mut link = chain.as_deref();

            while let Some(bucket) = link {
                assert_eq!(idx, self.index_of(&bucket.key));
                count = count + 1;
                assert!(count <= self.len);
                link = bucket.next.as_deref();
            }
        }

        assert_eq!(self.len, count);
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Ord + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    /// Prints every pair in ascending key order, one per line.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for &(k, v) in self.sorted_pairs().iter() {
            writeln!(out, "{:?} -> {:?}", k, v)?;
        }

        Ok(())
    }
}

impl<'a, K, V> Iterator for UnorderedIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bucket) = self.chain {
                self.chain = bucket.next.as_deref();
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&bucket.key, &bucket.value));
            }

            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for UnorderedIter<'a, K, V> {}

impl<K, V, S> Drop for HashTable<K, V, S>
where
    K: Ord + Hash,
    S: BuildHasher,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: Ord + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_unordered()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Ord + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> Mapping<K, V> for HashTable<K, V, S>
where
    K: Ord + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        HashTable::insert(self, k, v)
    }

    fn get(&self, k: &K) -> Option<&V> {
        HashTable::get(self, k)
    }

    fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        HashTable::get_mut(self, k)
    }

    fn remove(&mut self, k: &K) -> Option<V> {
        HashTable::remove(self, k)
    }

    fn clear(&mut self) {
        HashTable::clear(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn walk<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        HashTable::walk(self, visit)
    }

    fn walk_unordered<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        HashTable::walk_unordered(self, visit)
    }
}
