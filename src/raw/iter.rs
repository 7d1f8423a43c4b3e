use core::borrow::Borrow;
use core::ops::Bound;

use super::handle::Handle;
use super::node::Direction;
use super::raw_osrbtree_map::{RawOSRBTreeMap, Spine};

/// Double-ended in-order walk over a contiguous run of ranks.
///
/// `front` holds the nodes still to be visited going up (smallest on top),
/// `back` the ones going down. `remaining` is exact, so the two ends stop
/// before they cross.
pub(crate) struct RawIter<'a, K, V> {
    tree: Option<&'a RawOSRBTreeMap<K, V>>,
    front: Spine,
    back: Spine,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    /// Walks every entry.
    pub(crate) fn new(tree: &'a RawOSRBTreeMap<K, V>) -> Self {
        let mut iter = Self {
            tree: Some(tree),
            front: Spine::new(),
            back: Spine::new(),
            remaining: tree.len(),
        };
        iter.push_spine(tree.root(), Direction::Left);
        iter.push_spine(tree.root(), Direction::Right);
        iter
    }

    /// An iterator that yields nothing.
    pub(crate) fn empty() -> Self {
        Self {
            tree: None,
            front: Spine::new(),
            back: Spine::new(),
            remaining: 0,
        }
    }

    /// Pushes `link` and its chain of `direction` children onto the matching
    /// stack: left chains feed the front, right chains the back.
    fn push_spine(&mut self, link: Option<Handle>, direction: Direction) {
        let Some(tree) = self.tree else { return };
        let stack = match direction {
            Direction::Left => &mut self.front,
            Direction::Right => &mut self.back,
        };
        let mut current = link;
        while let Some(h) = current {
            stack.push(h);
            current = tree.node(h).child(direction);
        }
    }

    /// Steps one end of the walk: pops the next node and queues the inner
    /// subtree it leaves behind.
    fn step(&mut self, direction: Direction) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree?;
        let h = match direction {
            Direction::Left => self.front.pop(),
            Direction::Right => self.back.pop(),
        }?;
        self.remaining -= 1;

        let node = tree.node(h);
        self.push_spine(node.child(direction.opposite()), direction);
        Some(node.entry())
    }

    #[inline]
    pub(crate) fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.step(Direction::Left)
    }

    #[inline]
    pub(crate) fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.step(Direction::Right)
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K: Ord, V> RawIter<'a, K, V> {
    /// Walks the entries whose keys lie between `start` and `end`.
    pub(crate) fn range<Q>(tree: &'a RawOSRBTreeMap<K, V>, start: Bound<&Q>, end: Bound<&Q>) -> Self
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let first_rank = match start {
            Bound::Unbounded => 0,
            Bound::Included(key) => tree.rank(key),
            Bound::Excluded(key) => tree.rank(key) + usize::from(tree.contains_key(key)),
        };
        let end_rank = match end {
            Bound::Unbounded => tree.len(),
            Bound::Included(key) => tree.rank(key) + usize::from(tree.contains_key(key)),
            Bound::Excluded(key) => tree.rank(key),
        };

        let mut iter = Self {
            tree: Some(tree),
            front: Spine::new(),
            back: Spine::new(),
            remaining: end_rank.saturating_sub(first_rank),
        };
        if iter.remaining == 0 {
            return iter;
        }

        // Seed the front with the path to the first key at or past `start`.
        let mut current = tree.root();
        while let Some(h) = current {
            let node = tree.node(h);
            let key: &Q = node.key().borrow();
            let in_range = match start {
                Bound::Unbounded => true,
                Bound::Included(start) => key >= start,
                Bound::Excluded(start) => key > start,
            };
            if in_range {
                iter.front.push(h);
                current = node.left();
            } else {
                current = node.right();
            }
        }

        // And the back with the path to the last key at or before `end`.
        let mut current = tree.root();
        while let Some(h) = current {
            let node = tree.node(h);
            let key: &Q = node.key().borrow();
            let in_range = match end {
                Bound::Unbounded => true,
                Bound::Included(end) => key <= end,
                Bound::Excluded(end) => key < end,
            };
            if in_range {
                iter.back.push(h);
                current = node.right();
            } else {
                current = node.left();
            }
        }

        iter
    }
}

impl<K, V> Clone for RawIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}
