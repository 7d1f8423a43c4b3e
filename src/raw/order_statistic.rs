use core::borrow::Borrow;
use core::cmp::Ordering;

use super::handle::Handle;
use super::raw_osrbtree_map::RawOSRBTreeMap;

impl<K, V> RawOSRBTreeMap<K, V> {
    /// Finds the node holding the key of the given rank.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root();
        let mut remaining = rank;
        while let Some(h) = current {
            let node = self.node(h);
            let left_size = self.size_of(node.left());
            current = match remaining.cmp(&left_size) {
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    node.right()
                }
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// Gets an element by its rank (0-indexed position in sorted order).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let h = self.select(rank)?;
        Some(self.node(h).entry())
    }

    /// Gets a mutable element by its rank.
    pub(crate) fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let h = self.select(rank)?;
        Some(self.node_mut(h).entry_mut())
    }

    /// Removes and returns the entry with the smallest key.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root()?;
        self.prepare_root_for_removal(root);
        let (root, entry) = self.remove_min_at(root);
        self.set_root(root);
        Some(entry)
    }

    /// Removes and returns the entry with the largest key.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let root = self.root()?;
        self.prepare_root_for_removal(root);
        let (root, entry) = self.remove_max_at(root);
        self.set_root(root);
        Some(entry)
    }
}

impl<K: Ord, V> RawOSRBTreeMap<K, V> {
    /// Returns the number of keys strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root();
        let mut rank = 0;
        while let Some(h) = current {
            let node = self.node(h);
            current = match self.compare(key, h) {
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    rank += 1 + self.size_of(node.left());
                    node.right()
                }
                Ordering::Equal => return rank + self.size_of(node.left()),
            };
        }
        rank
    }

    /// Returns the rank of `key` if it is present.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root();
        let mut rank = 0;
        while let Some(h) = current {
            let node = self.node(h);
            current = match self.compare(key, h) {
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    rank += 1 + self.size_of(node.left());
                    node.right()
                }
                Ordering::Equal => return Some(rank + self.size_of(node.left())),
            };
        }
        None
    }

    /// Finds the node with the largest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root();
        let mut best = None;
        while let Some(h) = current {
            let node = self.node(h);
            current = match self.compare(key, h) {
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    best = Some(h);
                    node.right()
                }
                Ordering::Equal => return Some(h),
            };
        }
        best
    }

    /// Finds the node with the smallest key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root();
        let mut best = None;
        while let Some(h) = current {
            let node = self.node(h);
            current = match self.compare(key, h) {
                Ordering::Less => {
                    best = Some(h);
                    node.left()
                }
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(h),
            };
        }
        best
    }
}
