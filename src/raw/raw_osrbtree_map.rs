use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Direction, Node};
use super::size::Size;

/// Stack of pending nodes used by the in-order walks.
///
/// A left-leaning red-black tree is at most `2 * log2(n + 1)` levels deep, so
/// the inline capacity covers every realistic tree without spilling.
pub(crate) type Spine = SmallVec<[Handle; 32]>;

/// The left-leaning red-black tree backing `OSRBTreeMap`.
///
/// Every node lives in `nodes`; the shape of the tree is carried entirely by
/// the child handles, which the recursive algorithms reassign from their
/// return values. There are no parent links.
#[derive(Clone)]
pub(crate) struct RawOSRBTreeMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<K, V> RawOSRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        log::trace!("reserving arena slots for {capacity} entries");
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    /// Returns true if the tree contains no elements.
    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes the arena can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        log::trace!("clearing tree of {} entries", self.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Moves every entry out in ascending key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let handles = self.in_order_handles();
        debug_assert_eq!(handles.len(), self.nodes.len());
        log::trace!("draining {} entries", handles.len());

        let mut result = Vec::with_capacity(handles.len());
        for handle in handles {
            result.push(self.nodes.take(handle).into_entry());
        }

        self.nodes.clear();
        self.root = None;
        result
    }

    /// Handles of every node, in ascending key order.
    fn in_order_handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len());
        let mut pending = Spine::new();
        let mut current = self.root;

        loop {
            while let Some(h) = current {
                pending.push(h);
                current = self.nodes.get(h).left();
            }
            let Some(h) = pending.pop() else { break };
            handles.push(h);
            current = self.nodes.get(h).right();
        }

        handles
    }

    /// Returns the root handle, if any.
    #[inline]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Number of nodes below `link`, zero for an empty link.
    #[inline]
    pub(crate) fn size_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |h| self.nodes.get(h).size().to_usize())
    }

    /// Number of levels in the tree.
    pub(crate) fn height(&self) -> usize {
        self.height_at(self.root)
    }

    fn height_at(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |h| {
            let node = self.nodes.get(h);
            1 + self.height_at(node.left()).max(self.height_at(node.right()))
        })
    }

    /// Handle of the leftmost node.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.outermost(Direction::Left)
    }

    /// Handle of the rightmost node.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.outermost(Direction::Right)
    }

    fn outermost(&self, direction: Direction) -> Option<Handle> {
        let mut h = self.root?;
        while let Some(next) = self.nodes.get(h).child(direction) {
            h = next;
        }
        Some(h)
    }

    // ─── Balancing primitives ───────────────────────────────────────────────

    #[inline]
    pub(super) fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|h| self.nodes.get(h).is_red())
    }

    #[inline]
    pub(super) fn child_of(&self, link: Option<Handle>, direction: Direction) -> Option<Handle> {
        link.and_then(|h| self.nodes.get(h).child(direction))
    }

    #[inline]
    fn link_size(&self, link: Option<Handle>) -> Size {
        link.map_or(Size::ZERO, |h| self.nodes.get(h).size())
    }

    fn update_size(&mut self, h: Handle) {
        let node = self.nodes.get(h);
        let size = Size::of_subtree(self.link_size(node.left()), self.link_size(node.right()));
        self.nodes.get_mut(h).set_size(size);
    }

    /// Turns the red link between `h` and its child opposite `direction` so it
    /// leans toward `direction`. Returns the new subtree root.
    ///
    /// The lifted child inherits `h`'s color and size; `h` becomes red.
    pub(super) fn rotate(&mut self, h: Handle, direction: Direction) -> Handle {
        let up = direction.opposite();
        let node = self.nodes.get(h);
        let x = node.child(up).expect("`rotate()` - no child to lift");
        let (color, size) = (node.color(), node.size());
        let inner = self.nodes.get(x).child(direction);

        let node = self.nodes.get_mut(h);
        node.set_child(up, inner);
        node.set_color(Color::Red);

        let lifted = self.nodes.get_mut(x);
        lifted.set_child(direction, Some(h));
        lifted.set_color(color);
        lifted.set_size(size);

        self.update_size(h);
        x
    }

    /// Toggles the color of `h` and of both its children.
    ///
    /// Splits a temporary 4-node on the way up; merges siblings into one on the
    /// way down.
    pub(super) fn flip_colors(&mut self, h: Handle) {
        let node = self.nodes.get_mut(h);
        node.flip_color();
        let (left, right) = (node.left(), node.right());
        for child in [left, right].into_iter().flatten() {
            self.nodes.get_mut(child).flip_color();
        }
    }

    /// Restores the local invariants at `h` after a child link changed, and
    /// recomputes its size. Returns the new subtree root.
    pub(super) fn balance(&mut self, h: Handle) -> Handle {
        let mut h = h;
        let node = self.nodes.get(h);
        if self.is_red(node.right()) && !self.is_red(node.left()) {
            h = self.rotate(h, Direction::Left);
        }
        let left = self.nodes.get(h).left();
        if self.is_red(left) && self.is_red(self.child_of(left, Direction::Left)) {
            h = self.rotate(h, Direction::Right);
        }
        let node = self.nodes.get(h);
        if self.is_red(node.left()) && self.is_red(node.right()) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }

    /// Makes `h`'s left child, or one of its children, red so the descent to
    /// the left never lands on a 2-node.
    pub(super) fn push_red_left(&mut self, h: Handle) -> Handle {
        self.flip_colors(h);
        let right = self.nodes.get(h).right();
        if let Some(right) = right
            && self.is_red(self.nodes.get(right).left())
        {
            let lifted = self.rotate(right, Direction::Right);
            self.nodes.get_mut(h).set_right(Some(lifted));
            let h = self.rotate(h, Direction::Left);
            self.flip_colors(h);
            return h;
        }
        h
    }

    /// Makes `h`'s right child, or one of its children, red so the descent to
    /// the right never lands on a 2-node.
    pub(super) fn push_red_right(&mut self, h: Handle) -> Handle {
        self.flip_colors(h);
        let left = self.nodes.get(h).left();
        if self.is_red(self.child_of(left, Direction::Left)) {
            let h = self.rotate(h, Direction::Right);
            self.flip_colors(h);
            return h;
        }
        h
    }

    /// Turns the root red when neither child is, so a top-down deletion can
    /// start from a node that is not a 2-node.
    pub(super) fn prepare_root_for_removal(&mut self, root: Handle) {
        let node = self.nodes.get(root);
        if !self.is_red(node.left()) && !self.is_red(node.right()) {
            self.nodes.get_mut(root).set_color(Color::Red);
        }
    }

    /// Installs `root` and paints it black.
    pub(super) fn set_root(&mut self, root: Option<Handle>) {
        self.root = root;
        if let Some(root) = root {
            self.nodes.get_mut(root).set_color(Color::Black);
        }
    }

    // ─── Top-down removal of the extremes ───────────────────────────────────

    /// Unlinks the smallest node below `h`. Returns the new subtree root and
    /// the removed entry.
    pub(super) fn remove_min_at(&mut self, h: Handle) -> (Option<Handle>, (K, V)) {
        let Some(left) = self.nodes.get(h).left() else {
            let node = self.nodes.take(h);
            debug_assert!(node.right().is_none(), "`remove_min_at()` - right-leaning leaf");
            return (node.right(), node.into_entry());
        };

        let mut h = h;
        if !self.is_red(Some(left)) && !self.is_red(self.child_of(Some(left), Direction::Left)) {
            h = self.push_red_left(h);
        }
        let left = self.nodes.get(h).left().expect("`remove_min_at()` - push-down lost the left child");
        let (left, entry) = self.remove_min_at(left);
        self.nodes.get_mut(h).set_left(left);
        (Some(self.balance(h)), entry)
    }

    /// Unlinks the largest node below `h`. Returns the new subtree root and
    /// the removed entry.
    pub(super) fn remove_max_at(&mut self, h: Handle) -> (Option<Handle>, (K, V)) {
        let mut h = h;
        if self.is_red(self.nodes.get(h).left()) {
            h = self.rotate(h, Direction::Right);
        }

        let Some(right) = self.nodes.get(h).right() else {
            let node = self.nodes.take(h);
            return (node.left(), node.into_entry());
        };

        if !self.is_red(Some(right)) && !self.is_red(self.child_of(Some(right), Direction::Left)) {
            h = self.push_red_right(h);
        }
        let right = self.nodes.get(h).right().expect("`remove_max_at()` - push-down lost the right child");
        let (right, entry) = self.remove_max_at(right);
        self.nodes.get_mut(h).set_right(right);
        (Some(self.balance(h)), entry)
    }
}

impl<K: Ord, V> RawOSRBTreeMap<K, V> {
    /// Compares `key` against the key stored at `h`.
    #[inline]
    pub(super) fn compare<Q>(&self, key: &Q, h: Handle) -> Ordering
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        key.cmp(self.nodes.get(h).key().borrow())
    }

    /// Searches for a key and returns the handle of its node if found.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            current = match self.compare(key, h) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let h = self.search(key)?;
        Some(self.nodes.get(h).value())
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let h = self.search(key)?;
        Some(self.nodes.get_mut(h).value_mut())
    }

    /// Returns the key-value pair corresponding to the key.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let h = self.search(key)?;
        Some(self.nodes.get(h).entry())
    }

    /// Returns true if the tree contains the specified key.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, old_value) = self.insert_at(self.root, key, value);
        self.set_root(Some(root));
        old_value
    }

    fn insert_at(&mut self, link: Option<Handle>, key: K, value: V) -> (Handle, Option<V>) {
        let Some(h) = link else {
            return (self.nodes.alloc(Node::new(key, value)), None);
        };

        let node = self.nodes.get(h);
        let (ordering, left, right) = (key.cmp(node.key()), node.left(), node.right());
        let old_value = match ordering {
            Ordering::Less => {
                let (left, old_value) = self.insert_at(left, key, value);
                self.nodes.get_mut(h).set_left(Some(left));
                old_value
            }
            Ordering::Greater => {
                let (right, old_value) = self.insert_at(right, key, value);
                self.nodes.get_mut(h).set_right(Some(right));
                old_value
            }
            // Overwriting leaves the shape untouched.
            Ordering::Equal => return (h, Some(self.nodes.get_mut(h).replace_value(value))),
        };

        (self.balance(h), old_value)
    }

    /// Removes a key from the tree, returning the stored key and value.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // The push-down walk reshapes the tree on the way; only start it when
        // the key is known to be present.
        self.search(key)?;
        let root = self.root?;

        self.prepare_root_for_removal(root);
        let (root, removed) = self.remove_at(root, key);
        self.set_root(root);
        removed
    }

    fn remove_at<Q>(&mut self, h: Handle, key: &Q) -> (Option<Handle>, Option<(K, V)>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut h = h;

        if self.compare(key, h) == Ordering::Less {
            let left = self.nodes.get(h).left();
            if !self.is_red(left) && !self.is_red(self.child_of(left, Direction::Left)) {
                h = self.push_red_left(h);
            }
            let removed = match self.nodes.get(h).left() {
                Some(left) => {
                    let (left, removed) = self.remove_at(left, key);
                    self.nodes.get_mut(h).set_left(left);
                    removed
                }
                None => None,
            };
            return (Some(self.balance(h)), removed);
        }

        if self.is_red(self.nodes.get(h).left()) {
            h = self.rotate(h, Direction::Right);
        }

        if self.compare(key, h) == Ordering::Equal && self.nodes.get(h).right().is_none() {
            let node = self.nodes.take(h);
            return (node.left(), Some(node.into_entry()));
        }

        let right = self.nodes.get(h).right();
        if !self.is_red(right) && !self.is_red(self.child_of(right, Direction::Left)) {
            h = self.push_red_right(h);
        }

        let removed = match (self.compare(key, h), self.nodes.get(h).right()) {
            (Ordering::Equal, Some(right)) => {
                // Take over the in-order successor's entry and unlink its node instead.
                let (right, (successor_key, successor_value)) = self.remove_min_at(right);
                let node = self.nodes.get_mut(h);
                node.set_right(right);
                Some(node.replace_entry(successor_key, successor_value))
            }
            (_, Some(right)) => {
                let (right, removed) = self.remove_at(right, key);
                self.nodes.get_mut(h).set_right(right);
                removed
            }
            (_, None) => None,
        };

        (Some(self.balance(h)), removed)
    }
}
