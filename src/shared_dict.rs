use parking_lot::RwLock;
use std::{marker::PhantomData, sync::Arc};

use crate::mapping::Mapping;

/// A dictionary that any number of threads can hold at once. Cloning hands out
/// another handle onto the same container. Readers run side by side; a writer
/// waits for them and has the container to itself.
pub struct SharedDict<C, K, V>(
    Arc<RwLock<C>>,
    PhantomData<K>,
    PhantomData<V>,
)
where
    C: Mapping<K, V>,
    K: Ord,
    V: Clone;

impl<C, K, V> SharedDict<C, K, V>
where
    C: Mapping<K, V>,
    K: Ord,
    V: Clone,
{
    pub fn with_container(container: C) -> Self {
        Self(Arc::new(RwLock::new(container)), PhantomData, PhantomData)
    }

    pub fn insert(&self, k: K, v: V) -> Option<V> {
        self.0.write().insert(k, v)
    }

    /// Looks `k` up under the read lock and hands back a copy of its value,
    /// so the caller never holds the lock.
    pub fn get(&self, k: &K) -> Option<V> {
        self.0.read().get(k).cloned()
    }

    /// Runs `f` on the value stored under `k` while holding the write lock,
    /// returning what `f` returns. Two threads updating the same value never
    /// lose each other's changes, which a `get` followed by an `insert` can.
    pub fn update<F, R>(&self, k: &K, f: F) -> Option<R>
    where
        F: FnOnce(&mut V) -> R,
    {
        self.0.write().get_mut(k).map(f)
    }

    pub fn remove(&self, k: &K) -> Option<V> {
        self.0.write().remove(k)
    }

    pub fn clear(&self) {
        self.0.write().clear()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Visits every pair in ascending key order. The read lock is held until
    /// the walk ends, so calling a mutating method from `visit` deadlocks.
    pub fn walk<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        self.0.read().walk(visit)
    }

    pub fn walk_unordered<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        self.0.read().walk_unordered(visit)
    }
}

impl<C, K, V> Clone for SharedDict<C, K, V>
where
    C: Mapping<K, V>,
    K: Ord,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0), PhantomData, PhantomData)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::{ArrayList, Dict, HashTable, OrderedMap, SharedDict};

    #[test]
    fn test_shared_across_threads() {
        let dict: SharedDict<OrderedMap<usize, usize>, usize, usize> =
            SharedDict::with_container(OrderedMap::new());
        dict.insert(1, 1);

        let thread_dict = dict.clone();
        let r = thread::spawn(move || thread_dict.get(&1)).join();

        assert_eq!(Some(1), r.unwrap());
    }

    #[test]
    fn test_concurrent_writers() {
        let dict: SharedDict<HashTable<usize, usize>, usize, usize> =
            SharedDict::with_container(HashTable::with_hint(100));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let dict = dict.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        dict.insert(t * 250 + i, t);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(1000, dict.len());
        assert_eq!(Some(3), dict.get(&999));

        let mut previous = None;
        dict.walk(|k, _| {
            assert!(previous < Some(*k));
            previous = Some(*k);
        });
    }

    #[test]
    fn test_update_under_contention() {
        let dict: SharedDict<Dict<usize, ArrayList<usize>>, usize, ArrayList<usize>> =
            SharedDict::with_container(Dict::create_table(8));
        dict.insert(0, ArrayList::new());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let dict = dict.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        dict.update(&0, |names| names.append(t * 100 + i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let values = dict.get(&0).unwrap();
        assert_eq!(400, values.len());

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.cmp(b));
        assert!(sorted.iter().copied().eq(0..400));

        assert_eq!(None, dict.update(&1, |names| names.len()));
        assert_eq!(Some(400), dict.update(&0, |names| names.len()));
    }

    #[test]
    fn test_shared_dict() {
        let dict: SharedDict<Dict<String, String>, String, String> =
            SharedDict::with_container(Dict::create_map());
        dict.insert("alice".to_owned(), "chicago".to_owned());

        assert_eq!(Some("chicago".to_owned()), dict.get(&"alice".to_owned()));
        assert_eq!(Some("chicago".to_owned()), dict.remove(&"alice".to_owned()));
        assert!(dict.is_empty());
    }
}
