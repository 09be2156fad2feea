//! A dictionary that is either a hash table or a tree map, picked once when
//! it's created. Every operation just forwards to whichever one it holds.

use std::{
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
};

use crate::{hash_table::HashTable, mapping::Mapping, tree_map::OrderedMap};

/// Which container a [`Dict`] is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictKind {
    Table,
    Map,
}

/// An abstract dictionary. The variant never changes after creation.
pub enum Dict<K, V, S = RandomState>
where
    K: Ord + Hash,
    S: BuildHasher,
{
    Table(HashTable<K, V, S>),
    Map(OrderedMap<K, V>),
}

impl<K, V> Dict<K, V, RandomState>
where
    K: Ord + Hash,
{
    /// Creates a dictionary backed by a hash table sized for `hint` pairs.
    pub fn create_table(hint: usize) -> Self {
        Dict::create_table_with_hash_builder(hint, Default::default())
    }

    /// Creates a dictionary backed by a binary search tree.
    pub fn create_map() -> Self {
        tracing::trace!("creating tree map dictionary");
        Dict::Map(OrderedMap::new())
    }
}

impl<K, V, S> Dict<K, V, S>
where
    K: Ord + Hash,
    S: BuildHasher,
{
    /// Creates a dictionary backed by a hash table that hashes keys with
    /// `hash_builder`.
    pub fn create_table_with_hash_builder(hint: usize, hash_builder: S) -> Self {
        tracing::trace!(hint, "creating hash table dictionary");
        Dict::Table(HashTable::with_hint_and_hash_builder(hint, hash_builder))
    }

    pub fn kind(&self) -> DictKind {
        match self {
            Dict::Table(_) => DictKind::Table,
            Dict::Map(_) => DictKind::Map,
        }
    }
}

impl<K, V, S> Mapping<K, V> for Dict<K, V, S>
where
    K: Ord + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        match self {
            Dict::Table(table) => table.insert(k, v),
            Dict::Map(map) => map.insert(k, v),
        }
    }

    fn get(&self, k: &K) -> Option<&V> {
        match self {
            Dict::Table(table) => table.get(k),
            Dict::Map(map) => map.get(k),
        }
    }

    fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        match self {
            Dict::Table(table) => table.get_mut(k),
            Dict::Map(map) => map.get_mut(k),
        }
    }

    fn remove(&mut self, k: &K) -> Option<V> {
        match self {
            Dict::Table(table) => table.remove(k),
            Dict::Map(map) => map.remove(k),
        }
    }

    fn clear(&mut self) {
        match self {
            Dict::Table(table) => table.clear(),
            Dict::Map(map) => map.clear(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Dict::Table(table) => table.len(),
            Dict::Map(map) => map.len(),
        }
    }

    fn walk<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        match self {
            Dict::Table(table) => table.walk(visit),
            Dict::Map(map) => map.walk(visit),
        }
    }

    fn walk_unordered<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        match self {
            Dict::Table(table) => table.walk_unordered(visit),
            Dict::Map(map) => map.walk(visit),
        }
    }
}
