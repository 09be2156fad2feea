//! A growable array that keeps track of its own capacity and doubles it when
//! it runs out of room. The tree map uses it as an explicit stack so that
//! traversals never lean on the call stack, and the hash table uses it as the
//! scratch buffer for its sorted walk.

use std::{
    cmp::Ordering,
    fmt,
    io::{self, Write},
    slice,
};

use crate::error::{Error, Result};
use crate::sort::quick_sort_by;

/// The capacity a fresh list starts out with.
const INITIAL_CAPACITY: usize = 4;

/// An ordered, index-addressable sequence of elements.
///
/// The list owns its elements in the Rust sense, but it never does anything
/// with them other than move them around, so storing references (or `Rc`s)
/// gives the shallow-copy behavior of a list of pointers.
#[derive(Clone)]
pub struct ArrayList<T> {
    /// The live elements. `elems.len()` is the length of the list.
    elems: Vec<T>,

    /// The number of slots this list has committed to. Always at least the
    /// length, and only ever grows by doubling.
    capacity: usize,
}

impl<T> ArrayList<T> {
    /// Creates an empty list with room for four elements.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty list with a specific starting capacity. A capacity of
    /// zero is bumped to one so that doubling always makes progress.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            elems: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The number of elements in the list.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// The number of elements the list can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Adds an element to the back of the list.
    pub fn append(&mut self, elem: T) {
        self.grow_if_full();
        self.elems.push(elem);
    }

    /// Adds an element to the front of the list, shifting everything else
    /// one slot to the right.
    pub fn prepend(&mut self, elem: T) {
        self.grow_if_full();
        self.elems.insert(0, elem);
    }

    /// Inserts an element between the (i-1)-th and i-th elements, so that the
    /// new element ends up at index `i`. `i` may be equal to the length, which
    /// is the same as an append.
    pub fn insert_at(&mut self, i: usize, elem: T) -> Result<()> {
        if i > self.len() {
            return Err(Error::IndexOutOfBounds {
                index: i,
                len: self.len(),
            });
        }

        self.grow_if_full();
        self.elems.insert(i, elem);

        Ok(())
    }

    /// Removes the element at `i` and hands it back, shifting everything
    /// after it one slot to the left.
    pub fn remove_at(&mut self, i: usize) -> Result<T> {
        if i >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index: i,
                len: self.len(),
            });
        }

        Ok(self.elems.remove(i))
    }

    /// Removes the last element, if there is one. This is the stack pop the
    /// tree traversals are built on.
    pub fn pop(&mut self) -> Option<T> {
        self.elems.pop()
    }

    /// A mutable reference to the slot at `i`, for overwriting in place.
    pub fn at(&mut self, i: usize) -> Result<&mut T> {
        let len = self.len();
        self.elems
            .get_mut(i)
            .ok_or(Error::IndexOutOfBounds { index: i, len })
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.elems.get(i)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elems.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }

    /// Sorts the list in place with the in-house quicksort. Not stable.
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        quick_sort_by(&mut self.elems, cmp);
    }

    /// Drops every element. Keeps the capacity.
    pub fn clear(&mut self) {
        self.elems.clear();
    }

    /// Doubles the capacity when the next insertion wouldn't fit.
    fn grow_if_full(&mut self) {
        if self.elems.len() >= self.capacity {
            self.capacity *= 2;
            self.elems.reserve_exact(self.capacity - self.elems.len());
        }
    }
}

impl<T> ArrayList<T>
where
    T: fmt::Debug,
{
    /// Prints every element with its index, one per line.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, elem) in self.elems.iter().enumerate() {
            writeln!(out, "l[{}] = {:?}", i, elem)?;
        }

        Ok(())
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ArrayList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elems.iter()).finish()
    }
}

impl<T> PartialEq for ArrayList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.elems == other.elems
    }
}

impl<T> Eq for ArrayList<T> where T: Eq {}

impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.append(elem);
        }
    }
}

impl<T> std::iter::FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = ArrayList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
