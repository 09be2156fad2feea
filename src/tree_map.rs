//! An unbalanced binary search tree. Every node owns its two children, the
//! map owns the root, and nothing ever walks the tree recursively: lookups
//! descend in a loop, while traversals and teardown keep their pending nodes
//! on an [`ArrayList`].

use std::{
    cmp::Ordering,
    fmt,
    io::{self, Write},
    iter::FromIterator,
    mem,
};

use crate::{array_list::ArrayList, mapping::Mapping};

/// An owned child slot. `None` is an empty subtree.
type Link<K, V> = Option<Box<Node<K, V>>>;

/// A node in the tree. Everything in `left` is less than `key`, everything in
/// `right` is greater.
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// A map that keeps its keys in ascending order in a binary search tree.
/// Inserting a key that's already present replaces its value instead of
/// adding a node, so keys are always unique. There's no balancing, so the
/// height of the tree depends on the order keys arrive in.
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

/// In-order iterator over an [`OrderedMap`]. It pushes left children until it
/// runs out, pops a node to yield, then carries on from its right child.
pub struct Iter<'a, K, V> {
    stack: ArrayList<&'a Node<K, V>>,
    curr: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over the pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            stack: ArrayList::new(),
            curr: self.root.as_deref(),
            remaining: self.len,
        }
    }

    /// Calls `visit` on every pair in ascending key order.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    /// Releases every node. Children are detached onto a worklist before
    /// their parent goes away, so dropping a degenerate tree doesn't recurse.
    pub fn clear(&mut self) {
        let mut todo = ArrayList::new();

        if let Some(root) = self.root.take() {
            todo.append(root);
        }

        while let Some(mut node) = todo.pop() {
            if let Some(left) = node.left.take() {
                todo.append(left);
            }
            if let Some(right) = node.right.take() {
                todo.append(right);
            }
        }

        self.len = 0;
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Inserts a pair, returning the value it replaced if the key was already
    /// in the map.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len;

        let link = locate(&mut self.root, &k);
        let previous = match link {
            Some(node) => Some(mem::replace(&mut node.value, v)),
            None => {
                *link = Some(Node::leaf(k, v));
                None
            }
        };

        if previous.is_none() {
            self.len += 1;
        }

        #[cfg(test)]
        {
            let expected = original_len + previous.is_none() as usize;
            assert_eq!(expected, self.len);
            self.continuity_test();
        }

        previous
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        let mut link = &self.root;

        while let Some(node) = link {
            match k.cmp(&node.key) {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }

        None
    }

    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        locate(&mut self.root, k)
            .as_mut()
            .map(|node| &mut node.value)
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.get(k).is_some()
    }

    /// Removes a key from the map, returning its value. A node with at most
    /// one child is replaced by that child. A node with two children takes
    /// over the key and value of its in-order successor, and the successor's
    /// old node is spliced out instead.
    pub fn remove(&mut self, k: &K) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len;

        let link = locate(&mut self.root, k);
        let node = link.as_mut()?;

        let value = if node.left.is_some() && node.right.is_some() {
            let (key, value) = take_leftmost(&mut node.right)?;
            node.key = key;
            mem::replace(&mut node.value, value)
        } else {
            let node = link.take()?;
            let Node {
                value, left, right, ..
            } = *node;
            *link = left.or(right);
            value
        };

        self.len -= 1;

        #[cfg(test)]
        {
            assert_eq!(original_len - 1, self.len);
            self.continuity_test();
        }

        Some(value)
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        let mut count = 0;
        let mut previous: Option<&K> = None;

        // walk the tree in order and make sure the keys only ever go up and
        // the number of nodes matches the length counter
        for (k, _) in self.iter() {
            if let Some(previous) = previous {
                assert!(previous < k);
            }
            previous = Some(k);

            count = count + 1;
            assert!(count <= self.len);
        }

        assert_eq!(self.len, count);
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    /// Prints every pair in ascending key order, one per line.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (k, v) in self.iter() {
            writeln!(out, "{:?} -> {:?}", k, v)?;
        }

        Ok(())
    }

    /// Prints the shape of the tree for debugging: the right subtree above
    /// each node and the left subtree below it, indented by depth.
    pub fn print_internal<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut stack = ArrayList::new();
        let mut curr = self.root.as_deref().map(|node| (node, 0));

        loop {
            while let Some((node, depth)) = curr {
                stack.append((node, depth));
                curr = node.right.as_deref().map(|right| (right, depth + 1));
            }

            let (node, depth) = match stack.pop() {
                Some(entry) => entry,
                None => break,
            };

            writeln!(
                out,
                "{:indent$}{:?} -> {:?}",
                "",
                node.key,
                node.value,
                indent = depth * 4
            )?;
            curr = node.left.as_deref().map(|left| (left, depth + 1));
        }

        Ok(())
    }
}

/// Finds the slot holding `key`, or the empty slot where it would go.
fn locate<'a, K, V>(mut link: &'a mut Link<K, V>, key: &K) -> &'a mut Link<K, V>
where
    K: Ord,
{
    loop {
        let ordering = match link.as_deref() {
            Some(node) => key.cmp(&node.key),
            None => return link,
        };

        link = match (ordering, link) {
            (Ordering::Less, Some(node)) => &mut node.left,
            (Ordering::Greater, Some(node)) => &mut node.right,
            (_, link) => return link,
        };
    }
}

/// Splices the leftmost node out of a non-empty subtree, handing back its key
/// and value. Its right child, if any, takes its place.
fn take_leftmost<K, V>(mut link: &mut Link<K, V>) -> Option<(K, V)> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }

    let node = link.take()?;
    let Node {
        key, value, right, ..
    } = *node;
    *link = right;

    Some((key, value))
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.curr {
            self.stack.append(node);
            self.curr = node.left.as_deref();
        }

        let node = self.stack.pop()?;
        self.curr = node.right.as_deref();
        self.remaining = self.remaining.saturating_sub(1);

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Mapping<K, V> for OrderedMap<K, V>
where
    K: Ord,
{
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        OrderedMap::insert(self, k, v)
    }

    fn get(&self, k: &K) -> Option<&V> {
        OrderedMap::get(self, k)
    }

    fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        OrderedMap::get_mut(self, k)
    }

    fn remove(&mut self, k: &K) -> Option<V> {
        OrderedMap::remove(self, k)
    }

    fn clear(&mut self) {
        OrderedMap::clear(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn walk<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        OrderedMap::walk(self, visit)
    }
}
