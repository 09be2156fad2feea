/// Describes what an associative container is. Both the tree map and the hash
/// table keep their keys totally ordered, which is what lets either of them
/// walk its pairs in ascending key order.
pub trait Mapping<K, V>
where
    K: Ord,
{
    /// Puts a pair into the container. Returns the previous value if the key
    /// already had one there, in which case the value is replaced and the
    /// stored key is kept.
    fn insert(&mut self, k: K, v: V) -> Option<V>;

    /// Looks up the value stored for a key.
    fn get(&self, k: &K) -> Option<&V>;

    /// Looks up the value stored for a key so it can be changed in place.
    fn get_mut(&mut self, k: &K) -> Option<&mut V>;

    /// Takes a pair out of the container, returning its value.
    fn remove(&mut self, k: &K) -> Option<V>;

    /// Empties the container.
    fn clear(&mut self);

    /// The number of pairs stored right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, k: &K) -> bool {
        self.get(k).is_some()
    }

    /// Calls `visit` once for every pair, in ascending key order.
    fn walk<F>(&self, visit: F)
    where
        F: FnMut(&K, &V);

    /// Calls `visit` once for every pair in whatever order is cheapest for
    /// the container.
    fn walk_unordered<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        self.walk(visit)
    }
}
