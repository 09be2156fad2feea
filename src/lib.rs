//! A pair of in-memory associative containers behind one contract: a binary
//! search tree map and a separately chained hash table, plus a dictionary
//! that can be either. Both containers keep their keys totally ordered and
//! can walk their pairs in ascending key order, and neither ever recurses
//! over its own structure.

mod array_list;
mod dict;
mod error;
mod hash_table;
mod hashers;
mod mapping;
#[cfg(feature = "shared")]
mod shared_dict;
mod sort;
mod tree_map;

pub mod groups;

pub use array_list::ArrayList;
pub use dict::{Dict, DictKind};
pub use error::{Error, Result};
pub use hash_table::{bucket_count_for, HashTable, UnorderedIter, PRIMES};
pub use hashers::{BuildIdentityHasher, BuildSdbmHasher, IdentityHasher, SdbmHasher};
pub use mapping::Mapping;
#[cfg(feature = "shared")]
pub use shared_dict::SharedDict;
pub use tree_map::{Iter, OrderedMap};
